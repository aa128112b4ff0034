//! Vehicle-info lookup client.
//!
//! Resolves a registration number into descriptive vehicle and owner fields
//! via the third-party vehicle-info HTTP API.

mod client;
mod provider;
mod types;

pub use client::VehicleInfoClient;
pub use provider::VehicleInfoProvider;
pub use types::{VehicleInfo, VehicleOwner};
