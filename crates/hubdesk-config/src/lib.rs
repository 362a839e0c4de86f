//! Hubdesk configuration system.
//!
//! TOML-based configuration shared by the desktop shell and the dev
//! launcher. All sections use defaults so partial configs work out of
//! the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{HubdeskConfig, CONFIG_SCHEMA_VERSION};

use hubdesk_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path and validate it.
pub fn load_config() -> Result<HubdeskConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit override path and validate it.
pub fn load_config_from(path: &Path) -> Result<HubdeskConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[discovery]\nports = []\n").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
