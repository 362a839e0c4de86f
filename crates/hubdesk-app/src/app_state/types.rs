//! Internal types and constants for the app state module.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use hubdesk_common::WindowRole;
use hubdesk_discovery::HttpProbe;
use hubdesk_webview::{NavigationPolicy, ShellEvent};

/// How often to poll for webview, probe, and tray events.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Raw events pushed by wry callbacks. Drained on the event loop thread.
#[derive(Debug)]
pub(super) enum WebEvent {
    Shell(ShellEvent),
    /// wry reported `PageLoadEvent::Finished`. Only counts as a page load
    /// when the window was waiting for one.
    PageFinished(WindowRole),
}

/// Reachability result for a URL load, sent from the tokio runtime.
#[derive(Debug)]
pub(super) struct ProbeOutcome {
    pub role: WindowRole,
    /// Load generation this probe belongs to, from [`LoadSequence`].
    pub seq: u64,
    pub url: String,
    pub reachable: bool,
}

/// Process-wide load generation counter. Every URL or HTML load in any
/// window draws a fresh number, so a recreated window never reuses the
/// number of a probe still in flight for its predecessor.
#[derive(Debug, Clone, Default)]
pub(super) struct LoadSequence(Arc<AtomicU64>);

impl LoadSequence {
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Shared plumbing handed to every window.
#[derive(Clone)]
pub(super) struct WindowContext {
    pub events: Arc<Mutex<Vec<WebEvent>>>,
    pub probe_tx: Sender<ProbeOutcome>,
    pub runtime: tokio::runtime::Handle,
    pub probe: Arc<HttpProbe>,
    pub navigation: NavigationPolicy,
    pub load_seq: LoadSequence,
}

impl WindowContext {
    pub fn push(&self, event: WebEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    pub fn push_shell(&self, event: ShellEvent) {
        self.push(WebEvent::Shell(event));
    }

    pub fn drain(&self) -> Vec<WebEvent> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *events)
    }
}
