use async_trait::async_trait;

use crate::error::AppResult;
use crate::external::vehicle::types::VehicleInfo;

/// Seam for vehicle-info lookups.
///
/// The service layer depends on this trait rather than the HTTP client so
/// the enrichment flow can be exercised without a network.
#[async_trait]
pub trait VehicleInfoProvider: Send + Sync {
    /// Resolves a registration number into a vehicle record.
    async fn fetch(&self, reg_num: &str) -> AppResult<VehicleInfo>;
}
