//! Sequential port scan: first reachable candidate wins.

use hubdesk_common::DiscoveryError;
use tracing::{info, warn};

use crate::probe::{probe_port, Probe};

/// Probe `ports` in order and return the first reachable one.
///
/// Probes run strictly one after another and the scan stops at the first
/// hit, so later candidates are never touched once a server is found.
pub async fn scan_ports<P: Probe + ?Sized>(
    probe: &P,
    host: &str,
    ports: &[u16],
) -> Result<u16, DiscoveryError> {
    for &port in ports {
        if probe_port(probe, host, port).await.reachable {
            info!(port, "dev server detected");
            return Ok(port);
        }
    }

    warn!(?ports, "no dev server found on any candidate port");
    Err(DiscoveryError::NoReachablePort(ports.to_vec()))
}
