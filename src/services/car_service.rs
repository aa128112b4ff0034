//! Car service for business logic operations.
//!
//! Encapsulates the rules the handlers rely on: not-found mapping, fail-fast
//! pagination, and the bulk-add flow (atomic insert, then bounded-concurrency
//! enrichment with per-item failure reporting).

use std::future::Future;
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::error::{AppError, AppResult};
use crate::external::{VehicleInfo, VehicleInfoProvider};
use crate::models::{CarChangeset, NewPerson};
use crate::repositories::{CarFilter, CarRepository, CarWithOwner};

/// One registration number whose enrichment did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentFailure {
    pub reg_num: String,
    pub error: String,
}

/// Result of a bulk add: the insert transaction committed for every
/// registration number; `cars` holds the successfully enriched rows in input
/// order, and `failures` names the rows that stayed persisted but bare.
/// Every input registration number appears in exactly one of the two lists.
#[derive(Debug)]
pub struct BulkAddOutcome {
    pub cars: Vec<CarWithOwner>,
    pub failures: Vec<EnrichmentFailure>,
}

/// Car service for handling car-related business logic.
///
/// Wraps the `CarRepository` and the vehicle-info provider. Cloning is cheap
/// since the repository pools use `Arc` internally.
#[derive(Clone)]
pub struct CarService {
    repo: CarRepository,
    provider: Arc<dyn VehicleInfoProvider>,
    max_concurrency: usize,
}

impl CarService {
    /// Creates a new CarService.
    pub fn new(
        repo: CarRepository,
        provider: Arc<dyn VehicleInfoProvider>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            repo,
            provider,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Lists cars for a 1-indexed page.
    ///
    /// Non-positive page or page_size is rejected here as well as at the DTO
    /// layer, so a degenerate OFFSET can never reach the database.
    pub async fn list_cars(
        &self,
        page: u32,
        page_size: u32,
        filter: CarFilter,
    ) -> AppResult<Vec<CarWithOwner>> {
        if page < 1 {
            return Err(AppError::Validation {
                field: "page".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if page_size < 1 {
            return Err(AppError::Validation {
                field: "page_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let offset = i64::from(page - 1) * i64::from(page_size);
        self.repo.list(&filter, offset, i64::from(page_size)).await
    }

    /// Deletes a car by ID.
    ///
    /// # Returns
    /// `NotFound` when no row matched, so deleting a nonexistent id is
    /// visible to the caller instead of silently succeeding.
    pub async fn delete_car(&self, id: i32) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Updates a car's fields (and owner) from the decoded request payload.
    pub async fn update_car(
        &self,
        id: i32,
        changeset: CarChangeset,
        owner: Option<NewPerson>,
    ) -> AppResult<CarWithOwner> {
        if !changeset.has_changes() && owner.is_none() {
            return Err(AppError::Validation {
                field: "body".to_string(),
                reason: "at least one field must be provided".to_string(),
            });
        }

        self.repo
            .update(id, changeset, owner)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Adds a batch of registration numbers.
    ///
    /// The bare rows are inserted in one all-or-nothing transaction; an
    /// insert failure aborts the whole request before any lookup is made.
    /// Enrichment then runs with bounded concurrency, successful lookups are
    /// written back, and per-item failures are collected rather than
    /// aborting the batch. Rows whose enrichment failed stay persisted but
    /// bare; the caller sees them in `failures` and can re-submit.
    pub async fn add_cars(&self, reg_nums: Vec<String>) -> AppResult<BulkAddOutcome> {
        self.repo.insert_reg_nums(&reg_nums).await?;
        tracing::info!(count = reg_nums.len(), "Inserted registration numbers");

        let lookups = fetch_all(&self.provider, &reg_nums, self.max_concurrency).await;

        let repo = self.repo.clone();
        persist_enrichments(lookups, move |reg_num, changeset, owner| {
            let repo = repo.clone();
            async move { repo.apply_enrichment(&reg_num, changeset, owner).await }
        })
        .await
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound {
        entity: "car".to_string(),
        field: "id".to_string(),
        value: id.to_string(),
    }
}

/// Looks up every registration number with at most `max_concurrency` calls
/// in flight, preserving input order in the result.
async fn fetch_all(
    provider: &Arc<dyn VehicleInfoProvider>,
    reg_nums: &[String],
    max_concurrency: usize,
) -> Vec<(String, AppResult<VehicleInfo>)> {
    stream::iter(reg_nums.iter().cloned())
        .map(|reg_num| {
            let provider = Arc::clone(provider);
            async move {
                let result = provider.fetch(&reg_num).await;
                (reg_num, result)
            }
        })
        .buffered(max_concurrency)
        .collect()
        .await
}

/// Partitions lookup results into stored rows and per-item failures.
///
/// Successful lookups are handed to `write_back` (the enrichment write in
/// production); a `None` from the write-back means the bare row disappeared
/// between insert and enrichment. Lookup errors become failures without
/// touching the store. Write-back errors are database-level and abort.
async fn persist_enrichments<F, Fut>(
    lookups: Vec<(String, AppResult<VehicleInfo>)>,
    mut write_back: F,
) -> AppResult<BulkAddOutcome>
where
    F: FnMut(String, CarChangeset, Option<NewPerson>) -> Fut,
    Fut: Future<Output = AppResult<Option<CarWithOwner>>>,
{
    let mut cars = Vec::new();
    let mut failures = Vec::new();
    for (reg_num, result) in lookups {
        match result {
            Ok(info) => {
                let (changeset, owner) = changeset_from_info(&info);
                match write_back(reg_num.clone(), changeset, owner).await? {
                    Some(row) => cars.push(row),
                    None => failures.push(EnrichmentFailure {
                        reg_num,
                        error: "row no longer exists".to_string(),
                    }),
                }
            }
            Err(error) => {
                tracing::warn!(reg_num = %reg_num, error = %error, "Enrichment failed");
                failures.push(EnrichmentFailure {
                    reg_num,
                    error: error.to_string(),
                });
            }
        }
    }

    Ok(BulkAddOutcome { cars, failures })
}

/// Maps a vehicle-info record onto the columns of the bare row.
fn changeset_from_info(info: &VehicleInfo) -> (CarChangeset, Option<NewPerson>) {
    let changeset = CarChangeset {
        mark: Some(info.mark.clone()),
        model: Some(info.model.clone()),
        year: info.year,
        owner_id: None,
    };
    let owner = info.owner.as_ref().map(|owner| NewPerson {
        name: owner.name.clone(),
        surname: owner.surname.clone(),
        patronymic: owner.patronymic.clone(),
    });
    (changeset, owner)
}
