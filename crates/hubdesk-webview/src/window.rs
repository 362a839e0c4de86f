//! Seams between the shell logic and a concrete windowing toolkit.

use std::path::PathBuf;

use hubdesk_common::{WindowError, WindowRole};
use serde_json::Value;

use crate::ipc::Channel;

/// Parameters for creating a shell window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub role: WindowRole,
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// No native title bar; the page draws its own controls.
    pub frameless: bool,
    pub always_on_top: bool,
    pub resizable: bool,
    pub devtools: bool,
}

/// A live window with an embedded webview.
///
/// Operations on a window that is already gone are silently ignored by
/// implementations; the shell drops its handle when a window closes.
pub trait HostWindow {
    fn minimize(&self);
    fn is_maximized(&self) -> bool;
    fn set_maximized(&self, maximized: bool);
    fn show(&self);
    fn hide(&self);
    fn focus(&self);
    fn set_always_on_top(&self, on_top: bool);
    fn resize(&self, width: u32, height: u32);

    /// Start loading `url`. The outcome arrives later as
    /// [`ShellEvent::PageLoaded`] or [`ShellEvent::LoadFailed`].
    ///
    /// [`ShellEvent::PageLoaded`]: crate::ShellEvent::PageLoaded
    /// [`ShellEvent::LoadFailed`]: crate::ShellEvent::LoadFailed
    fn load_url(&mut self, url: &str);

    /// Replace the page with inline HTML.
    fn load_html(&mut self, html: &str) -> Result<(), WindowError>;

    /// Deliver a host→renderer message.
    fn post(&self, channel: Channel, payload: &Value) -> Result<(), WindowError>;

    /// Read the page's persisted theme. The answer arrives later as
    /// [`ShellEvent::ThemeReported`](crate::ShellEvent::ThemeReported).
    fn request_theme(&self);
}

/// Platform services the shell needs besides windows.
pub trait ShellPlatform {
    type Window: HostWindow;

    fn create_window(&mut self, spec: &WindowSpec) -> Result<Self::Window, WindowError>;

    /// Show a native file picker restricted to PDF files.
    fn pick_pdf(&mut self) -> Option<PathBuf>;

    /// Open `url` in the OS default browser.
    fn open_external(&mut self, url: &str) -> Result<(), WindowError>;

    /// Stop the event loop.
    fn quit(&mut self);
}
