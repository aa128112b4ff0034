//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::EnrichmentConfig;
use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::external::{VehicleInfoClient, VehicleInfoProvider};
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
}

impl AppState {
    /// Creates a new AppState from a database connection pool and the
    /// enrichment service configuration.
    ///
    /// Initializes all repositories and services from the provided pool and
    /// builds the HTTP client for the vehicle-info service.
    pub fn new(pool: AsyncDbPool, enrichment: &EnrichmentConfig) -> AppResult<Self> {
        let provider: Arc<dyn VehicleInfoProvider> =
            Arc::new(VehicleInfoClient::new(enrichment)?);
        Ok(Self::with_provider(pool, provider, enrichment.max_concurrency))
    }

    /// Creates an AppState with an explicit enrichment provider.
    ///
    /// Used in tests to substitute the live vehicle-info client.
    pub fn with_provider(
        pool: AsyncDbPool,
        provider: Arc<dyn VehicleInfoProvider>,
        enrichment_concurrency: usize,
    ) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos, provider, enrichment_concurrency);
        Self {
            services,
            db_pool: pool,
        }
    }
}
