//! Tray, external link, and asset directory settings.

use serde::{Deserialize, Serialize};

/// System tray icon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayConfig {
    pub enabled: bool,
    /// PNG icon file name inside the assets directory.
    pub icon: String,
    pub tooltip: String,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            icon: "icon.png".into(),
            tooltip: "Hubdesk".into(),
        }
    }
}

/// External links opened in the OS browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Target of the `open-link` IPC channel.
    pub external_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            external_url: "https://hubdesk.app".into(),
        }
    }
}

/// Bundled static assets (floating window HTML, error page, tray icon).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Asset directory, relative to the working directory unless absolute.
    pub dir: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: "assets".into(),
        }
    }
}
