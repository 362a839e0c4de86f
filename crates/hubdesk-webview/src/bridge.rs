//! The renderer-facing bridge surface.
//!
//! A renderer gets exactly two operations: `send` on a renderer→host
//! channel and `receive` on a host→renderer channel. [`bridge_init_script`]
//! installs the JavaScript version inside a webview; [`BridgeEndpoint`] is
//! the same contract in Rust, used by headless hosts and tests.
//!
//! [`bridge_init_script`]: crate::ipc::bridge_init_script

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hubdesk_common::IpcError;
use serde_json::Value;
use tracing::debug;

use crate::ipc::{Channel, IpcMessage};

/// Callback registered for a host→renderer channel. Receives only the payload.
pub type ReceiveFn = Box<dyn Fn(&Value) + Send>;

/// The only operations a renderer may perform.
pub trait IpcBridge {
    /// Send `payload` to the host. Unknown or host→renderer channels are rejected.
    fn send(&self, channel: &str, payload: Value) -> Result<(), IpcError>;

    /// Register `callback` for a host→renderer channel.
    fn receive(&self, channel: &str, callback: ReceiveFn) -> Result<(), IpcError>;
}

#[derive(Default)]
struct EndpointInner {
    outbox: Vec<IpcMessage>,
    handlers: HashMap<Channel, Vec<ReceiveFn>>,
}

/// In-memory bridge endpoint for one renderer.
///
/// Messages sent by the renderer queue in an outbox the host drains;
/// messages the host delivers fan out to registered callbacks.
#[derive(Clone, Default)]
pub struct BridgeEndpoint {
    inner: Arc<Mutex<EndpointInner>>,
}

impl BridgeEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, EndpointInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drain everything the renderer has sent since the last call.
    pub fn take_outbox(&self) -> Vec<IpcMessage> {
        std::mem::take(&mut self.lock().outbox)
    }

    /// Host side: deliver a message to the renderer's callbacks.
    ///
    /// Returns how many callbacks ran. Channels the renderer may not
    /// receive on are refused.
    pub fn deliver(&self, channel: Channel, payload: &Value) -> Result<usize, IpcError> {
        if !channel.delivers_to_renderer() {
            return Err(IpcError::WrongDirection(channel.as_str().to_string()));
        }
        let inner = self.lock();
        let handlers = match inner.handlers.get(&channel) {
            Some(h) => h,
            None => return Ok(0),
        };
        for handler in handlers {
            handler(payload);
        }
        Ok(handlers.len())
    }
}

impl IpcBridge for BridgeEndpoint {
    fn send(&self, channel: &str, payload: Value) -> Result<(), IpcError> {
        let msg = IpcMessage {
            channel: channel.to_string(),
            payload,
        };
        msg.host_channel()?;
        debug!(channel, "renderer send");
        self.lock().outbox.push(msg);
        Ok(())
    }

    fn receive(&self, channel: &str, callback: ReceiveFn) -> Result<(), IpcError> {
        let parsed: Channel = channel.parse()?;
        if !parsed.delivers_to_renderer() {
            return Err(IpcError::WrongDirection(channel.to_string()));
        }
        self.lock().handlers.entry(parsed).or_default().push(callback);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn send_queues_allowed_channels() {
        let bridge = BridgeEndpoint::new();
        bridge.send("search-term", json!("docs")).unwrap();
        bridge.send("theme-changed", json!(true)).unwrap();

        let out = bridge.take_outbox();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].channel, "search-term");
        assert!(bridge.take_outbox().is_empty());
    }

    #[test]
    fn send_rejects_unknown_and_outbound() {
        let bridge = BridgeEndpoint::new();
        assert!(bridge.send("process-exit", Value::Null).is_err());
        assert!(bridge.send("perform-search", json!("x")).is_err());
        assert!(bridge.take_outbox().is_empty());
    }

    #[test]
    fn receive_rejects_inbound_channels() {
        let bridge = BridgeEndpoint::new();
        assert!(bridge.receive("window-close", Box::new(|_| {})).is_err());
        assert!(bridge.receive("nope", Box::new(|_| {})).is_err());
        assert!(bridge.receive("update-ui", Box::new(|_| {})).is_ok());
    }

    #[test]
    fn deliver_passes_payload_only() {
        let bridge = BridgeEndpoint::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bridge
            .receive(
                "perform-search",
                Box::new(move |payload| sink.lock().unwrap().push(payload.clone())),
            )
            .unwrap();

        let ran = bridge
            .deliver(Channel::PerformSearch, &json!("query"))
            .unwrap();
        assert_eq!(ran, 1);
        assert_eq!(*seen.lock().unwrap(), vec![json!("query")]);

        assert_eq!(bridge.deliver(Channel::UpdateUi, &json!({})).unwrap(), 0);
        assert!(bridge.deliver(Channel::WindowClose, &Value::Null).is_err());
    }
}
