//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod discovery;
mod helpers;
mod window;

#[cfg(test)]
mod tests;

use crate::schema::HubdeskConfig;
use hubdesk_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HubdeskConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    discovery::validate_discovery(&mut errors, config);
    discovery::validate_launch(&mut errors, config);
    window::validate_main_window(&mut errors, config);
    window::validate_floating_window(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
