//! Configuration management module for carcat
//!
//! Provides layered configuration loading:
//! 1. `config/default.toml` - base configuration (optional)
//! 2. `CARCAT_*` environment variables
//! 3. Legacy flat variables (`HOST`, `DB_PORT`, `USERNAME`, `PASSWORD`,
//!    `DB_NAME`, `SERVER_PORT`) used by the deployment environment

pub mod error;
pub mod loader;
pub mod settings;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, EnrichmentConfig, ServerConfig, Settings};
