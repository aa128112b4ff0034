//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `car` - Car-related request/response DTOs
//! - `error` - Common error response DTOs
//! - `pagination` - Pagination-related DTOs

mod car;
mod error;
mod pagination;

pub use car::{
    AddCarsRequest, AddCarsResponse, CarFilterParams, CarResponse, EnrichmentFailureResponse,
    OwnerDto, UpdateCarRequest,
};
pub use error::ErrorResponse;
pub use pagination::PaginationParams;
