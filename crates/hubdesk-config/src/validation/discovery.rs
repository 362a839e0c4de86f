//! Validation for discovery and launch settings.

use std::collections::HashSet;

use crate::schema::HubdeskConfig;

use super::helpers::{validate_non_empty, validate_range};

/// Validate candidate ports and polling timings.
pub(crate) fn validate_discovery(errors: &mut Vec<String>, config: &HubdeskConfig) {
    let d = &config.discovery;

    if d.ports.is_empty() {
        errors.push("discovery.ports must list at least one port".into());
    }
    if d.ports.contains(&0) {
        errors.push("discovery.ports must not contain port 0".into());
    }
    let mut seen = HashSet::new();
    for port in &d.ports {
        if !seen.insert(port) {
            errors.push(format!("discovery.ports lists {port} more than once"));
        }
    }

    validate_non_empty(errors, "discovery.host", &d.host);
    validate_range(errors, "discovery.probe_timeout_ms", d.probe_timeout_ms, 1, 60_000);
    validate_range(errors, "discovery.wait_timeout_ms", d.wait_timeout_ms, 1, 3_600_000);
    validate_range(errors, "discovery.wait_interval_ms", d.wait_interval_ms, 1, 60_000);

    if d.wait_interval_ms > d.wait_timeout_ms {
        errors.push(format!(
            "discovery.wait_interval_ms ({}) exceeds discovery.wait_timeout_ms ({})",
            d.wait_interval_ms, d.wait_timeout_ms
        ));
    }
}

/// Validate launch settings.
pub(crate) fn validate_launch(errors: &mut Vec<String>, config: &HubdeskConfig) {
    let l = &config.launch;
    validate_non_empty(errors, "launch.env_var", &l.env_var);
    validate_non_empty(errors, "launch.shell_program", &l.shell_program);
    if l.env_var.contains('=') {
        errors.push("launch.env_var must not contain '='".into());
    }
}
