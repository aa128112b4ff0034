//! Database connection pool module.
//!
//! Provides async PostgreSQL connection pooling using diesel_async with bb8,
//! plus the embedded migrations used for idempotent schema bootstrap.

mod migrate;
mod pool;

pub use migrate::{run_pending_migrations, MIGRATIONS};
pub use pool::{establish_async_connection_pool, AsyncDbPool};
