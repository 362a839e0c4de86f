//! Readiness waiting: block startup until a dev server answers.
//!
//! Resources use the `http-get://host:port[/path]` notation. Alternative
//! ports can be listed with `|`, so `http-get://localhost:5173|5174|5175`
//! expands to three candidate URLs. The waiter checks exactly one URL per
//! tick, cycling through the candidates, so a starting server is never hit
//! by more than one request per interval.

use std::time::Duration;

use hubdesk_common::DiscoveryError;
use reqwest::Url;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::probe::Probe;

/// Expand a resource string into the URLs it names.
pub fn parse_resource(resource: &str) -> Result<Vec<Url>, DiscoveryError> {
    let invalid = |why: &str| DiscoveryError::InvalidResource(format!("{resource}: {why}"));

    let (scheme, rest) = if let Some(rest) = resource.strip_prefix("http-get://") {
        ("http", rest)
    } else if let Some(rest) = resource.strip_prefix("https-get://") {
        ("https", rest)
    } else if let Some(rest) = resource.strip_prefix("http://") {
        ("http", rest)
    } else if let Some(rest) = resource.strip_prefix("https://") {
        ("https", rest)
    } else {
        return Err(invalid("unsupported scheme"));
    };

    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    };
    if authority.is_empty() {
        return Err(invalid("missing host"));
    }

    let raw_urls: Vec<String> = match authority.rsplit_once(':') {
        Some((host, ports)) => {
            if host.is_empty() {
                return Err(invalid("missing host"));
            }
            ports
                .split('|')
                .map(|p| {
                    p.trim()
                        .parse::<u16>()
                        .map_err(|_| invalid("bad port"))
                        .map(|port| format!("{scheme}://{host}:{port}{path}"))
                })
                .collect::<Result<_, _>>()?
        }
        None => vec![format!("{scheme}://{authority}{path}")],
    };

    raw_urls
        .iter()
        .map(|raw| Url::parse(raw).map_err(|e| invalid(&e.to_string())))
        .collect()
}

/// Polls candidate URLs until one answers or the timeout elapses.
#[derive(Debug, Clone)]
pub struct ReadinessWaiter {
    targets: Vec<Url>,
    interval: Duration,
    timeout: Duration,
}

impl ReadinessWaiter {
    pub fn new(targets: Vec<Url>, interval: Duration, timeout: Duration) -> Self {
        Self {
            targets,
            interval,
            timeout,
        }
    }

    /// Build a waiter from resource strings (see [`parse_resource`]).
    pub fn from_resources<S: AsRef<str>>(
        resources: &[S],
        interval: Duration,
        timeout: Duration,
    ) -> Result<Self, DiscoveryError> {
        let mut targets = Vec::new();
        for resource in resources {
            targets.extend(parse_resource(resource.as_ref())?);
        }
        Ok(Self::new(targets, interval, timeout))
    }

    pub fn targets(&self) -> &[Url] {
        &self.targets
    }

    /// Wait until one target answers. Returns the URL that answered.
    pub async fn wait<P: Probe + ?Sized>(&self, probe: &P) -> Result<Url, DiscoveryError> {
        if self.targets.is_empty() {
            return Err(DiscoveryError::InvalidResource(
                "no resources to wait for".into(),
            ));
        }

        info!(
            targets = self.targets.len(),
            interval_ms = self.interval.as_millis() as u64,
            timeout_ms = self.timeout.as_millis() as u64,
            "waiting for dev server"
        );

        let start = Instant::now();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut checks: u32 = 0;

        loop {
            ticker.tick().await;

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                warn!(checks, elapsed_ms = elapsed.as_millis() as u64, "readiness wait timed out");
                return Err(DiscoveryError::WaitTimeout {
                    elapsed_ms: elapsed.as_millis() as u64,
                    checks,
                });
            }

            let url = &self.targets[checks as usize % self.targets.len()];
            checks += 1;
            if probe.check(url).await {
                info!(url = %url, checks, "dev server ready");
                return Ok(url.clone());
            }
            debug!(url = %url, checks, "not ready yet");
        }
    }
}
