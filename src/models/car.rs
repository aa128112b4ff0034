use diesel::prelude::*;
use jiff_diesel::DateTime;
use serde::Deserialize;

/// Car model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
///
/// `mark`, `model`, `year` and `owner_id` are nullable because bulk-add
/// persists bare rows that are only filled in by a later enrichment pass.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Car {
    pub id: i32,
    pub reg_num: String,
    pub mark: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub owner_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// NewCar model for inserting bare rows keyed by registration number
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::cars)]
pub struct NewCar {
    pub reg_num: String,
}

/// CarChangeset model for partial updates
/// Derives AsChangeset so `None` fields are left untouched
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::cars)]
pub struct CarChangeset {
    pub mark: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub owner_id: Option<i32>,
}

impl CarChangeset {
    /// Whether the changeset would touch any column. Diesel rejects an
    /// UPDATE with an empty SET clause, so callers must check this first.
    pub fn has_changes(&self) -> bool {
        self.mark.is_some() || self.model.is_some() || self.year.is_some() || self.owner_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_changeset_has_no_changes() {
        assert!(!CarChangeset::default().has_changes());
    }

    #[test]
    fn changeset_with_single_field_has_changes() {
        let changeset = CarChangeset {
            year: Some(2020),
            ..Default::default()
        };
        assert!(changeset.has_changes());

        let changeset = CarChangeset {
            owner_id: Some(7),
            ..Default::default()
        };
        assert!(changeset.has_changes());
    }
}
