//! Configuration schema types for Hubdesk.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod discovery;
mod launch;
mod system;
mod tray;
mod window;

pub use discovery::*;
pub use launch::*;
pub use system::*;
pub use tray::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration shared by the `hubdesk` shell and `hubdesk-dev`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct HubdeskConfig {
    pub discovery: DiscoveryConfig,
    pub launch: LaunchConfig,
    pub main_window: MainWindowConfig,
    pub floating_window: FloatingWindowConfig,
    pub tray: TrayConfig,
    pub links: LinksConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
}
