//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for all domain entities.

mod car_repo;

pub use car_repo::{CarFilter, CarRepository, CarWithOwner};

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub cars: CarRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            cars: CarRepository::new(pool),
        }
    }
}
