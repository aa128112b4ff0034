//! Configuration loader for carcat
//!
//! Loads configuration from multiple sources with proper precedence.

use std::path::PathBuf;

use config::{Config, Environment, File};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable pointing at a specific configuration file
const CONFIG_FILE_ENV: &str = "CARCAT_CONFIG_FILE";

/// Default configuration file, loaded when present
const DEFAULT_CONFIG_FILE: &str = "config/default.toml";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "CARCAT";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Flat legacy environment variables mapped onto nested configuration keys.
///
/// These are the names the deployment environment has always used; they win
/// over both the file and the prefixed variables.
const LEGACY_ENV_KEYS: [(&str, &str); 6] = [
    ("HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("USERNAME", "database.username"),
    ("PASSWORD", "database.password"),
    ("DB_NAME", "database.dbname"),
    ("SERVER_PORT", "server.port"),
];

/// Configuration loader that handles layered configuration loading
///
/// Sources in order of priority (lowest to highest):
/// 1. `config/default.toml` (optional; path overridable via `CARCAT_CONFIG_FILE`)
/// 2. `CARCAT__*` environment variables (`__` separates nested keys)
/// 3. Legacy flat variables (`HOST`, `DB_PORT`, `USERNAME`, `PASSWORD`,
///    `DB_NAME`, `SERVER_PORT`)
#[derive(Debug)]
pub struct ConfigLoader {
    config_file: PathBuf,
}

impl ConfigLoader {
    /// Create a new configuration loader, resolving the config file path
    /// from `CARCAT_CONFIG_FILE` when set.
    pub fn new() -> Self {
        let config_file = std::env::var(CONFIG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self { config_file }
    }

    /// Load and validate configuration from all sources.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::from(self.config_file.as_path()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR));

        for (var, key) in LEGACY_ENV_KEYS {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        let settings: Settings = builder.build()?.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Environment variables are process-wide; serialize the tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn clear_env() {
        for (var, _) in LEGACY_ENV_KEYS {
            unsafe { std::env::remove_var(var) };
        }
        unsafe { std::env::remove_var(CONFIG_FILE_ENV) };
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create temp config");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn loads_settings_from_file() {
        let _guard = env_guard();
        clear_env();

        let file = write_config(
            r#"
            [server]
            port = 9000

            [database]
            username = "cars"
            dbname = "catalog"

            [enrichment]
            base_url = "http://vehicle-info.local"
            "#,
        );
        unsafe { std::env::set_var(CONFIG_FILE_ENV, file.path()) };

        let settings = ConfigLoader::new().load().expect("load settings");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.database.username, "cars");

        clear_env();
    }

    #[test]
    fn legacy_env_variables_override_file() {
        let _guard = env_guard();
        clear_env();

        let file = write_config(
            r#"
            [database]
            host = "from-file"
            username = "cars"
            dbname = "catalog"

            [enrichment]
            base_url = "http://vehicle-info.local"
            "#,
        );
        unsafe {
            std::env::set_var(CONFIG_FILE_ENV, file.path());
            std::env::set_var("HOST", "from-env");
            std::env::set_var("DB_PORT", "5433");
            std::env::set_var("SERVER_PORT", "8081");
        }

        let settings = ConfigLoader::new().load().expect("load settings");
        assert_eq!(settings.database.host, "from-env");
        assert_eq!(settings.database.port, 5433);
        assert_eq!(settings.server.port, 8081);

        clear_env();
    }

    #[test]
    fn missing_required_values_fail_validation() {
        let _guard = env_guard();
        clear_env();

        // No file, no environment: database credentials are absent.
        unsafe { std::env::set_var(CONFIG_FILE_ENV, "/nonexistent/carcat.toml") };
        let result = ConfigLoader::new().load();
        assert!(result.is_err());

        clear_env();
    }
}
