//! Validation for main and floating window settings.

use crate::schema::HubdeskConfig;

use super::helpers::{validate_non_empty, validate_range};

pub(crate) fn validate_main_window(errors: &mut Vec<String>, config: &HubdeskConfig) {
    let m = &config.main_window;
    validate_non_empty(errors, "main_window.url", &m.url);
    validate_range(errors, "main_window.max_retries", m.max_retries as u64, 1, 1000);
    validate_range(errors, "main_window.retry_backoff_ms", m.retry_backoff_ms, 0, 60_000);
    validate_range(errors, "main_window.width", m.width as u64, 1, 16_384);
    validate_range(errors, "main_window.height", m.height as u64, 1, 16_384);
}

pub(crate) fn validate_floating_window(errors: &mut Vec<String>, config: &HubdeskConfig) {
    let f = &config.floating_window;
    validate_non_empty(errors, "floating_window.html", &f.html);
    validate_range(errors, "floating_window.delay_ms", f.delay_ms, 0, 60_000);
    validate_range(errors, "floating_window.compact_width", f.compact_width as u64, 1, 16_384);
    validate_range(errors, "floating_window.compact_height", f.compact_height as u64, 1, 16_384);
    validate_range(errors, "floating_window.expanded_width", f.expanded_width as u64, 1, 16_384);
    validate_range(errors, "floating_window.expanded_height", f.expanded_height as u64, 1, 16_384);
}
