//! Dev-server discovery settings.

use serde::{Deserialize, Serialize};

/// Candidate ports, probe timeouts, and readiness polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Candidate dev-server ports, tried in order.
    pub ports: Vec<u16>,
    /// Host the candidates are probed on.
    pub host: String,
    /// Timeout for a single probe request.
    pub probe_timeout_ms: u64,
    /// Overall readiness wait ceiling.
    pub wait_timeout_ms: u64,
    /// Delay between readiness checks.
    pub wait_interval_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            ports: vec![5173, 5174, 5175],
            host: "localhost".into(),
            probe_timeout_ms: 1000,
            wait_timeout_ms: 60_000,
            wait_interval_ms: 1000,
        }
    }
}

impl DiscoveryConfig {
    /// The readiness resource covering every candidate port,
    /// e.g. `http-get://localhost:5173|5174|5175`.
    pub fn wait_resource(&self) -> String {
        let ports: Vec<String> = self.ports.iter().map(|p| p.to_string()).collect();
        format!("http-get://{}:{}", self.host, ports.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.ports, vec![5173, 5174, 5175]);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.probe_timeout_ms, 1000);
        assert_eq!(config.wait_timeout_ms, 60_000);
        assert_eq!(config.wait_interval_ms, 1000);
    }

    #[test]
    fn wait_resource_joins_ports() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.wait_resource(), "http-get://localhost:5173|5174|5175");
    }
}
