//! Host-side window and IPC coordination for the Hubdesk shell.
//!
//! Provides:
//! - The fixed IPC channel contract and the renderer bridge script
//! - Typed decoding of renderer → host commands
//! - Bundled asset loading with compiled-in fallbacks
//! - Bounded retry and timer machinery driven by an injectable clock
//! - `AppShellState`, which owns the main and floating windows and
//!   dispatches every IPC message, load event, timer, and tray action
//!
//! Nothing here touches a real windowing toolkit; the binary plugs one in
//! through [`ShellPlatform`] and [`HostWindow`].

pub mod bridge;
pub mod clock;
pub mod command;
pub mod content;
pub mod events;
pub mod host;
pub mod ipc;
pub mod lifecycle;
pub mod navigation;
pub mod tray;
pub mod window;

pub use bridge::{BridgeEndpoint, IpcBridge};
pub use clock::{Clock, ManualClock, SystemClock, TimerQueue};
pub use command::HostCommand;
pub use content::{AssetLoader, DiskAssets, StaticAssets};
pub use events::ShellEvent;
pub use host::{AppShellState, ShellSettings};
pub use ipc::{Channel, Direction, IpcMessage};
pub use lifecycle::{LoadFailure, LoadStep, MainLoadMachine, RetryDecision, RetryState, WindowState};
pub use navigation::NavigationPolicy;
pub use tray::TrayAction;
pub use window::{HostWindow, ShellPlatform, WindowSpec};
