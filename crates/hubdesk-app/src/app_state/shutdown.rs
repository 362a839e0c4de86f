//! Graceful shutdown: drop the tray, stop probe tasks.

use std::time::Duration;

use super::core::HubdeskApp;

impl HubdeskApp {
    /// Release app-level resources. Windows are closed by the shell before
    /// the event loop exits; this handles what outlives them.
    ///
    /// Order matters:
    /// 1. Remove the tray icon (no more menu events)
    /// 2. Shut down the tokio runtime (cancels in-flight probes)
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        self.tray = None;
        self.roles.clear();

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        tracing::info!("Graceful shutdown complete");
    }
}
