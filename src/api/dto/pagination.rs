//! Pagination-related DTOs for API requests.

use serde::Deserialize;
use validator::Validate;

/// Query parameters for pagination.
///
/// Both parameters are required; a missing or non-numeric value is rejected
/// at extraction, a non-positive one by validation.
#[derive(Debug, Deserialize, Validate)]
pub struct PaginationParams {
    /// Page number (1-based)
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: u32,

    /// Number of items per page (max 100)
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: u32,
}

impl PaginationParams {
    /// Calculates the offset for database queries.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    /// Returns the limit for database queries.
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}
