//! Single-shot HTTP reachability probes.
//!
//! A port counts as reachable when *any* HTTP response arrives before the
//! timeout, including 4xx/5xx. Connection errors and timeouts are
//! unreachable. A probe never retries; callers own the retry policy.

use std::time::Duration;

use async_trait::async_trait;
use hubdesk_common::DiscoveryError;
use reqwest::Url;
use tracing::{debug, info};

/// Outcome of one probe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub port: u16,
    pub reachable: bool,
}

/// Something that can tell whether a URL currently answers HTTP.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn check(&self, url: &Url) -> bool;
}

/// `reqwest`-backed probe with a per-request timeout.
pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, DiscoveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| DiscoveryError::Client(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn check(&self, url: &Url) -> bool {
        match self.client.get(url.clone()).send().await {
            Ok(resp) => {
                debug!(url = %url, status = resp.status().as_u16(), "probe answered");
                true
            }
            Err(e) if e.is_timeout() => {
                debug!(url = %url, timeout_ms = self.timeout.as_millis() as u64, "probe timed out");
                false
            }
            Err(e) => {
                debug!(url = %url, error = %e, "probe failed");
                false
            }
        }
    }
}

/// Build the dev-server URL for a candidate port.
pub fn port_url(host: &str, port: u16) -> Result<Url, DiscoveryError> {
    let raw = format!("http://{host}:{port}");
    Url::parse(&raw).map_err(|e| DiscoveryError::InvalidResource(format!("{raw}: {e}")))
}

/// Probe one port on `host` and log the outcome.
pub async fn probe_port<P: Probe + ?Sized>(probe: &P, host: &str, port: u16) -> ProbeResult {
    let reachable = match port_url(host, port) {
        Ok(url) => probe.check(&url).await,
        Err(e) => {
            tracing::warn!(port, error = %e, "cannot build probe URL");
            false
        }
    };

    if reachable {
        info!(port, "port reachable");
    } else {
        info!(port, "port unreachable");
    }
    ProbeResult { port, reachable }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_once(status_line: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response =
                    format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });
        port
    }

    #[test]
    fn port_url_formats_localhost() {
        let url = port_url("localhost", 5174).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5174/");
    }

    #[test]
    fn port_url_rejects_garbage_host() {
        assert!(port_url("bad host", 5173).is_err());
    }

    #[tokio::test]
    async fn ok_response_is_reachable() {
        let port = serve_once("HTTP/1.1 200 OK").await;
        let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();
        let result = probe_port(&probe, "127.0.0.1", port).await;
        assert!(result.reachable);
        assert_eq!(result.port, port);
    }

    #[tokio::test]
    async fn error_status_still_counts_as_reachable() {
        let port = serve_once("HTTP/1.1 503 Service Unavailable").await;
        let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();
        assert!(probe_port(&probe, "127.0.0.1", port).await.reachable);
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();
        assert!(!probe_port(&probe, "127.0.0.1", port).await.reachable);
    }

    #[tokio::test]
    async fn silent_listener_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            // Accept and hold the connection without answering.
            let held = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(held);
        });

        let probe = HttpProbe::new(Duration::from_millis(200)).unwrap();
        assert!(!probe_port(&probe, "127.0.0.1", port).await.reachable);
    }
}
