//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories, external clients and handlers.

mod car_service;

pub use car_service::{BulkAddOutcome, CarService, EnrichmentFailure};

use std::sync::Arc;

use crate::external::VehicleInfoProvider;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub cars: CarService,
}

impl Services {
    /// Creates a new Services instance from Repositories and the enrichment
    /// provider.
    pub fn new(
        repos: Repositories,
        provider: Arc<dyn VehicleInfoProvider>,
        enrichment_concurrency: usize,
    ) -> Self {
        Self {
            cars: CarService::new(repos.cars, provider, enrichment_concurrency),
        }
    }
}
