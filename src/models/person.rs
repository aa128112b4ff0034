use diesel::prelude::*;
use jiff_diesel::DateTime;
use serde::Deserialize;

/// Person model for reading from database
/// A person only exists as the owner of a car; there is no independent API surface.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::people)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// NewPerson model for inserting new owner rows.
///
/// Also derives AsChangeset so an owner update overwrites the row wholesale;
/// `treat_none_as_null` clears the patronymic when the payload omits it.
#[derive(Debug, Insertable, AsChangeset, Deserialize, Clone)]
#[diesel(table_name = crate::schema::people)]
#[diesel(treat_none_as_null = true)]
pub struct NewPerson {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
}
