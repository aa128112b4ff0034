//! Car repository for async database operations.
//!
//! Provides CRUD operations for the cars table using diesel_async, including
//! the all-or-nothing bulk insert and the enrichment write-back.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, DatabaseErrorConverter};
use crate::models::{Car, CarChangeset, NewCar, NewPerson, Person};
use crate::schema::{cars, people};

/// Optional list filters, combined conjunctively.
///
/// `make` matches the `mark` column; the query parameter has always been
/// called `make` while the stored column is `mark`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarFilter {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

/// A car row together with its owner, when one is linked.
pub type CarWithOwner = (Car, Option<Person>);

/// Car repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment). No need for `Arc<CarRepository>`.
#[derive(Clone)]
pub struct CarRepository {
    pool: AsyncDbPool,
}

impl CarRepository {
    /// Creates a new CarRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Lists cars with their owners, filtered, in stable `id` order.
    ///
    /// `offset`/`limit` are assumed validated by the caller (page and
    /// page_size are rejected before they can go non-positive).
    pub async fn list(
        &self,
        filter: &CarFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CarWithOwner>, AppError> {
        let mut conn = self.pool.get().await?;

        let mut query = cars::table
            .left_join(people::table)
            .select((Car::as_select(), Option::<Person>::as_select()))
            .into_boxed();

        if let Some(make) = &filter.make {
            query = query.filter(cars::mark.eq(make.clone()));
        }
        if let Some(model) = &filter.model {
            query = query.filter(cars::model.eq(model.clone()));
        }
        if let Some(year) = filter.year {
            query = query.filter(cars::year.eq(year));
        }

        query
            .order(cars::id.asc())
            .offset(offset)
            .limit(limit)
            .load::<CarWithOwner>(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert(e, "list cars"))
    }

    /// Deletes a car by ID.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1); the caller decides whether a
    /// zero count is an error.
    pub async fn delete(&self, car_id: i32) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(cars::table.filter(cars::id.eq(car_id)))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert(e, "delete car"))
    }

    /// Updates a car's fields and, when `owner` is given, upserts the owner
    /// row, all within one transaction.
    ///
    /// # Returns
    /// `None` when no car with that ID exists; the updated car and owner
    /// otherwise.
    pub async fn update(
        &self,
        car_id: i32,
        changeset: CarChangeset,
        owner: Option<NewPerson>,
    ) -> Result<Option<CarWithOwner>, AppError> {
        let mut guard = self.pool.get().await?;
        let conn = &mut *guard;

        conn.transaction::<Option<CarWithOwner>, AppError, _>(|conn| {
            async move {
                let Some(car) = cars::table
                    .filter(cars::id.eq(car_id))
                    .select(Car::as_select())
                    .first::<Car>(conn)
                    .await
                    .optional()?
                else {
                    return Ok(None);
                };

                let mut changeset = changeset;
                if let Some(owner) = &owner {
                    changeset.owner_id = Some(upsert_owner(conn, car.owner_id, owner).await?);
                }

                let updated = if changeset.has_changes() {
                    diesel::update(cars::table.filter(cars::id.eq(car_id)))
                        .set(&changeset)
                        .returning(Car::as_returning())
                        .get_result::<Car>(conn)
                        .await?
                } else {
                    car
                };

                let owner_row = load_owner(conn, updated.owner_id).await?;
                Ok(Some((updated, owner_row)))
            }
            .scope_boxed()
        })
        .await
    }

    /// Inserts one bare row per registration number inside a single
    /// all-or-nothing transaction. Any failure rolls the whole batch back.
    pub async fn insert_reg_nums(&self, reg_nums: &[String]) -> Result<Vec<Car>, AppError> {
        let new_cars: Vec<NewCar> = reg_nums
            .iter()
            .map(|reg_num| NewCar {
                reg_num: reg_num.clone(),
            })
            .collect();

        let mut guard = self.pool.get().await?;
        let conn = &mut *guard;

        conn.transaction::<Vec<Car>, AppError, _>(|conn| {
            async move {
                let mut inserted = Vec::with_capacity(new_cars.len());
                // Row at a time so a unique violation names the offending
                // registration number.
                for new_car in new_cars {
                    let car = diesel::insert_into(cars::table)
                        .values(&new_car)
                        .returning(Car::as_returning())
                        .get_result::<Car>(conn)
                        .await
                        .map_err(|e| DatabaseErrorConverter::convert(e, "insert car"))?;
                    inserted.push(car);
                }
                Ok(inserted)
            }
            .scope_boxed()
        })
        .await
    }

    /// Writes enriched fields and owner back onto the bare row identified by
    /// its registration number.
    ///
    /// # Returns
    /// `None` when no row with that registration number exists (it was
    /// deleted between insert and enrichment).
    pub async fn apply_enrichment(
        &self,
        reg_num: &str,
        changeset: CarChangeset,
        owner: Option<NewPerson>,
    ) -> Result<Option<CarWithOwner>, AppError> {
        let reg_num = reg_num.to_string();
        let mut guard = self.pool.get().await?;
        let conn = &mut *guard;

        conn.transaction::<Option<CarWithOwner>, AppError, _>(|conn| {
            async move {
                let Some(car) = cars::table
                    .filter(cars::reg_num.eq(&reg_num))
                    .select(Car::as_select())
                    .first::<Car>(conn)
                    .await
                    .optional()?
                else {
                    return Ok(None);
                };

                let mut changeset = changeset;
                if let Some(owner) = &owner {
                    changeset.owner_id = Some(upsert_owner(conn, car.owner_id, owner).await?);
                }

                let updated = if changeset.has_changes() {
                    diesel::update(cars::table.filter(cars::id.eq(car.id)))
                        .set(&changeset)
                        .returning(Car::as_returning())
                        .get_result::<Car>(conn)
                        .await?
                } else {
                    car
                };

                let owner_row = load_owner(conn, updated.owner_id).await?;
                Ok(Some((updated, owner_row)))
            }
            .scope_boxed()
        })
        .await
    }
}

/// Updates the existing owner row or inserts a new one, returning its id.
async fn upsert_owner(
    conn: &mut AsyncPgConnection,
    existing: Option<i32>,
    owner: &NewPerson,
) -> Result<i32, AppError> {
    match existing {
        Some(person_id) => {
            diesel::update(people::table.filter(people::id.eq(person_id)))
                .set(owner)
                .execute(conn)
                .await?;
            Ok(person_id)
        }
        None => diesel::insert_into(people::table)
            .values(owner)
            .returning(people::id)
            .get_result::<i32>(conn)
            .await
            .map_err(AppError::from),
    }
}

/// Loads the owner row linked by `owner_id`, if any.
async fn load_owner(
    conn: &mut AsyncPgConnection,
    owner_id: Option<i32>,
) -> Result<Option<Person>, AppError> {
    match owner_id {
        Some(person_id) => people::table
            .filter(people::id.eq(person_id))
            .select(Person::as_select())
            .first::<Person>(conn)
            .await
            .optional()
            .map_err(AppError::from),
        None => Ok(None),
    }
}
