//! Events fed into the window shell.

use hubdesk_common::{Theme, WindowRole};

use crate::lifecycle::LoadFailure;
use crate::tray::TrayAction;

/// Something the shell must react to. Produced by webview handlers, the
/// load prober, the tray, and the window system.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// A raw IPC body posted by a window's renderer.
    Ipc { role: WindowRole, body: String },
    /// A page finished loading.
    PageLoaded { role: WindowRole },
    /// A URL load did not complete.
    LoadFailed {
        role: WindowRole,
        failure: LoadFailure,
    },
    /// Result of reading a window's persisted theme.
    ThemeReported { role: WindowRole, theme: Theme },
    /// The user closed a window through the window system.
    CloseRequested { role: WindowRole },
    /// A tray menu entry was chosen.
    Tray(TrayAction),
}
