//! Clients for outbound calls to external services.

pub mod client;
pub mod vehicle;

pub use vehicle::{VehicleInfo, VehicleInfoClient, VehicleInfoProvider, VehicleOwner};
