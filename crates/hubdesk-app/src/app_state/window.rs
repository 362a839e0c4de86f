//! `HostWindow` backed by a winit window with a child wry webview.

use std::cell::Cell;
use std::sync::Arc;

use hubdesk_common::{Theme, WindowError, WindowRole};
use hubdesk_discovery::Probe;
use hubdesk_webview::ipc::{js_dispatch_message, READ_THEME_SCRIPT};
use hubdesk_webview::{Channel, HostWindow, LoadFailure, ShellEvent};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};
use winit::dpi::LogicalSize;
use winit::window::{Window, WindowLevel};
use wry::WebView;

use super::types::{ProbeOutcome, WindowContext};

/// One shell window. The webview is declared first so it drops before
/// its parent window.
pub struct WryWindow {
    webview: WebView,
    window: Arc<Window>,
    role: WindowRole,
    /// Set when a load was started; cleared by the first `Finished`.
    awaiting_load: Cell<bool>,
    /// Generation of the latest load, drawn from the shared sequence so
    /// stale probe results can be detected even across recreated windows.
    load_seq: Cell<u64>,
    ctx: WindowContext,
}

impl WryWindow {
    pub(super) fn new(
        webview: WebView,
        window: Arc<Window>,
        role: WindowRole,
        ctx: WindowContext,
    ) -> Self {
        Self {
            webview,
            window,
            role,
            awaiting_load: Cell::new(false),
            load_seq: Cell::new(0),
            ctx,
        }
    }

    /// Whether `seq` is the most recent URL load.
    pub(super) fn is_current_load(&self, seq: u64) -> bool {
        self.load_seq.get() == seq
    }

    /// Navigate the webview after a successful probe.
    pub(super) fn navigate(&self, url: &str) {
        self.awaiting_load.set(true);
        if let Err(e) = self.webview.load_url(url) {
            self.awaiting_load.set(false);
            warn!(role = %self.role, url, error = %e, "webview refused URL");
            self.ctx.push_shell(ShellEvent::LoadFailed {
                role: self.role,
                failure: LoadFailure::Unreachable(e.to_string()),
            });
        }
    }

    /// Consume the pending-load flag. `true` when a load was outstanding.
    pub(super) fn take_awaiting(&self) -> bool {
        self.awaiting_load.replace(false)
    }

    /// Stretch the webview over the window's client area.
    pub(super) fn fit_webview(&self) {
        let size = self.window.inner_size().to_logical::<f64>(self.window.scale_factor());
        let bounds = wry::Rect {
            position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
            size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(size.width, size.height)),
        };
        if let Err(e) = self.webview.set_bounds(bounds) {
            warn!(role = %self.role, error = %e, "failed to resize webview");
        }
    }
}

impl HostWindow for WryWindow {
    fn minimize(&self) {
        self.window.set_minimized(true);
    }

    fn is_maximized(&self) -> bool {
        self.window.is_maximized()
    }

    fn set_maximized(&self, maximized: bool) {
        self.window.set_maximized(maximized);
    }

    fn show(&self) {
        self.window.set_visible(true);
    }

    fn hide(&self) {
        self.window.set_visible(false);
    }

    fn focus(&self) {
        self.window.focus_window();
    }

    fn set_always_on_top(&self, on_top: bool) {
        let level = if on_top {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };
        self.window.set_window_level(level);
    }

    fn resize(&self, width: u32, height: u32) {
        let _ = self
            .window
            .request_inner_size(LogicalSize::new(width, height));
        self.fit_webview();
    }

    fn load_url(&mut self, url: &str) {
        let seq = self.ctx.load_seq.next();
        self.load_seq.set(seq);
        self.awaiting_load.set(false);

        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                warn!(role = %self.role, url, error = %e, "invalid URL");
                self.ctx.push_shell(ShellEvent::LoadFailed {
                    role: self.role,
                    failure: LoadFailure::Unreachable(format!("invalid URL: {e}")),
                });
                return;
            }
        };

        debug!(role = %self.role, url, seq, "probing before load");
        let role = self.role;
        let probe = Arc::clone(&self.ctx.probe);
        let tx = self.ctx.probe_tx.clone();
        self.ctx.runtime.spawn(async move {
            let reachable = probe.check(&parsed).await;
            let _ = tx.send(ProbeOutcome {
                role,
                seq,
                url: parsed.into(),
                reachable,
            });
        });
    }

    fn load_html(&mut self, html: &str) -> Result<(), WindowError> {
        // A pending probe for an earlier URL no longer applies.
        self.load_seq.set(self.ctx.load_seq.next());
        self.awaiting_load.set(true);
        self.webview.load_html(html).map_err(|e| {
            self.awaiting_load.set(false);
            WindowError::Load(e.to_string())
        })
    }

    fn post(&self, channel: Channel, payload: &Value) -> Result<(), WindowError> {
        self.webview
            .evaluate_script(&js_dispatch_message(channel, payload))
            .map_err(|e| WindowError::Script(e.to_string()))
    }

    fn request_theme(&self) {
        let role = self.role;
        let ctx = self.ctx.clone();
        let result = self
            .webview
            .evaluate_script_with_callback(READ_THEME_SCRIPT, move |raw| {
                // The callback receives the script result JSON-encoded.
                let stored = serde_json::from_str::<String>(&raw).ok();
                let theme = Theme::from_storage(stored.as_deref());
                ctx.push_shell(ShellEvent::ThemeReported { role, theme });
            });
        if let Err(e) = result {
            warn!(role = %self.role, error = %e, "failed to read renderer theme");
        }
    }
}
