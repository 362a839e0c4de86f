//! Main and floating window settings.

use serde::{Deserialize, Serialize};

/// Main application window.
///
/// The window loads `url` (or `HUBDESK_START_URL`) and retries with a fixed
/// backoff until `max_retries` failures, then shows `error_page`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MainWindowConfig {
    pub url: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Failed load attempts before falling back (valid range: 1-1000).
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    /// Error page file name inside the assets directory.
    pub error_page: String,
    /// Enable webview dev tools (always on in debug builds).
    pub devtools: bool,
}

impl Default for MainWindowConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5173".into(),
            title: "Hubdesk".into(),
            width: 1280,
            height: 800,
            max_retries: 30,
            retry_backoff_ms: 2000,
            error_page: "error.html".into(),
            devtools: cfg!(debug_assertions),
        }
    }
}

/// Floating always-on-top search window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingWindowConfig {
    /// HTML file name inside the assets directory.
    pub html: String,
    /// Delay after main window creation before the floating window appears.
    pub delay_ms: u64,
    pub compact_width: u32,
    pub compact_height: u32,
    pub expanded_width: u32,
    pub expanded_height: u32,
    pub always_on_top: bool,
}

impl Default for FloatingWindowConfig {
    fn default() -> Self {
        Self {
            html: "floating.html".into(),
            delay_ms: 1000,
            compact_width: 320,
            compact_height: 64,
            expanded_width: 320,
            expanded_height: 420,
            always_on_top: true,
        }
    }
}
