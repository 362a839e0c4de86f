//! IPC protocol between the host and renderer windows.
//!
//! Messages flow in both directions:
//! - **Renderer -> host**: page code calls `window.api.send(channel, data)`,
//!   which posts `{"channel": ..., "payload": ...}` through `window.ipc`.
//! - **Host -> renderer**: the host evaluates
//!   `window.__hubdesk._dispatch(channel, payload)`, which invokes every
//!   callback registered with `window.api.receive(channel, fn)`.
//!
//! The channel set is closed. Both sides reject names outside it.

use std::fmt;
use std::str::FromStr;

use hubdesk_common::IpcError;
use serde::{Deserialize, Serialize};

/// Which way a channel may carry messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToHost,
    ToRenderer,
    Both,
}

/// Every IPC channel the shell understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    WindowMinimize,
    WindowMaximize,
    WindowClose,
    FloatingClose,
    FloatingPin,
    SearchTerm,
    SearchFocus,
    ThemeChanged,
    OpenPdf,
    OpenLink,
    MakeDraggable,
    UpdateUi,
    WindowMaximizedState,
    PerformSearch,
}

impl Channel {
    pub const ALL: [Channel; 14] = [
        Channel::WindowMinimize,
        Channel::WindowMaximize,
        Channel::WindowClose,
        Channel::FloatingClose,
        Channel::FloatingPin,
        Channel::SearchTerm,
        Channel::SearchFocus,
        Channel::ThemeChanged,
        Channel::OpenPdf,
        Channel::OpenLink,
        Channel::MakeDraggable,
        Channel::UpdateUi,
        Channel::WindowMaximizedState,
        Channel::PerformSearch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WindowMinimize => "window-minimize",
            Self::WindowMaximize => "window-maximize",
            Self::WindowClose => "window-close",
            Self::FloatingClose => "floating-close",
            Self::FloatingPin => "floating-pin",
            Self::SearchTerm => "search-term",
            Self::SearchFocus => "search-focus",
            Self::ThemeChanged => "theme-changed",
            Self::OpenPdf => "open-pdf",
            Self::OpenLink => "open-link",
            Self::MakeDraggable => "make-draggable",
            Self::UpdateUi => "update-ui",
            Self::WindowMaximizedState => "window-maximized-state",
            Self::PerformSearch => "perform-search",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::WindowMinimize
            | Self::WindowMaximize
            | Self::WindowClose
            | Self::FloatingClose
            | Self::FloatingPin
            | Self::SearchTerm
            | Self::SearchFocus
            | Self::OpenPdf
            | Self::OpenLink => Direction::ToHost,
            Self::MakeDraggable
            | Self::UpdateUi
            | Self::WindowMaximizedState
            | Self::PerformSearch => Direction::ToRenderer,
            Self::ThemeChanged => Direction::Both,
        }
    }

    /// Whether a renderer may send on this channel.
    pub fn accepts_from_renderer(self) -> bool {
        matches!(self.direction(), Direction::ToHost | Direction::Both)
    }

    /// Whether the host may deliver on this channel.
    pub fn delivers_to_renderer(self) -> bool {
        matches!(self.direction(), Direction::ToRenderer | Direction::Both)
    }

    /// Channels a renderer may `send` on.
    pub fn renderer_send_channels() -> Vec<Channel> {
        Self::ALL
            .into_iter()
            .filter(|c| c.accepts_from_renderer())
            .collect()
    }

    /// Channels a renderer may `receive` on.
    pub fn renderer_receive_channels() -> Vec<Channel> {
        Self::ALL
            .into_iter()
            .filter(|c| c.delivers_to_renderer())
            .collect()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = IpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| IpcError::UnknownChannel(s.to_string()))
    }
}

/// A raw IPC message as posted by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    pub channel: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from `window.ipc.postMessage`).
    pub fn from_json(raw: &str) -> Result<Self, IpcError> {
        serde_json::from_str(raw).map_err(|e| IpcError::InvalidJson(e.to_string()))
    }

    pub fn new(channel: Channel, payload: serde_json::Value) -> Self {
        Self {
            channel: channel.as_str().to_string(),
            payload,
        }
    }

    /// Resolve the channel name against the renderer→host allowlist.
    pub fn host_channel(&self) -> Result<Channel, IpcError> {
        let channel: Channel = self.channel.parse()?;
        if !channel.accepts_from_renderer() {
            return Err(IpcError::WrongDirection(self.channel.clone()));
        }
        Ok(channel)
    }
}

fn js_string_array(channels: &[Channel]) -> String {
    let names: Vec<&str> = channels.iter().map(|c| c.as_str()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}

/// JavaScript injected into every window before page scripts run.
///
/// Exposes exactly `window.api.send` and `window.api.receive`, each
/// restricted to its allowlist. Callbacks receive only the payload. The
/// underlying `window.ipc` handle is captured privately and then removed
/// from the page's global scope.
pub fn bridge_init_script() -> String {
    format!(
        r#"
(function() {{
    var sendChannels = {send};
    var receiveChannels = {receive};
    var handlers = {{}};
    var post = window.ipc.postMessage.bind(window.ipc);

    // Page scripts only get `window.api`; the raw primitive is removed.
    try {{ delete window.ipc; }} catch (e) {{}}
    if ('ipc' in window) {{
        try {{
            Object.defineProperty(window, 'ipc', {{
                value: undefined,
                writable: false,
                configurable: false
            }});
        }} catch (e) {{}}
    }}

    Object.defineProperty(window, '__hubdesk', {{
        value: Object.freeze({{
            _dispatch: function(channel, payload) {{
                var list = handlers[channel];
                if (!list) return;
                for (var i = 0; i < list.length; i++) {{
                    try {{ list[i](payload); }} catch (e) {{ console.error(e); }}
                }}
            }}
        }}),
        writable: false,
        configurable: false
    }});

    Object.defineProperty(window, 'api', {{
        value: Object.freeze({{
            send: function(channel, data) {{
                if (sendChannels.indexOf(channel) === -1) return;
                post(JSON.stringify({{
                    channel: channel,
                    payload: data === undefined ? null : data
                }}));
            }},
            receive: function(channel, func) {{
                if (receiveChannels.indexOf(channel) === -1) return;
                if (typeof func !== 'function') return;
                (handlers[channel] = handlers[channel] || []).push(func);
            }}
        }}),
        writable: false,
        configurable: false
    }});
}})();
"#,
        send = js_string_array(&Channel::renderer_send_channels()),
        receive = js_string_array(&Channel::renderer_receive_channels()),
    )
}

/// Generate a JS snippet that delivers a message to the renderer's callbacks.
pub fn js_dispatch_message(channel: Channel, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.__hubdesk && window.__hubdesk._dispatch({}, {});",
        serde_json::to_string(channel.as_str()).unwrap_or_else(|_| "\"\"".to_string()),
        payload_json,
    )
}

/// Script that reports the persisted theme as `"light"` or `"dark"`.
pub const READ_THEME_SCRIPT: &str =
    "(function() { try { return localStorage.getItem('theme') || 'light'; } catch (e) { return 'light'; } })()";
