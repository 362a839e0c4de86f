//! The `VITE_PORT=<port>` line printed by the port-detection helper.

use std::sync::LazyLock;

use hubdesk_common::LaunchError;
use regex::Regex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// Prefix of the marker line.
pub const PORT_MARKER: &str = "VITE_PORT=";

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*VITE_PORT=(\d{1,5})\s*$").unwrap());

/// Render the marker line for `port` (without trailing newline).
pub fn format_marker(port: u16) -> String {
    format!("{PORT_MARKER}{port}")
}

/// Parse a single output line. Only a whole-line marker with a valid,
/// non-zero port matches.
pub fn parse_marker(line: &str) -> Option<u16> {
    let caps = MARKER_RE.captures(line)?;
    match caps[1].parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(port) => Some(port),
    }
}

/// Read lines until the first marker. Reaching EOF first is fatal.
pub async fn read_marker<R: AsyncBufRead + Unpin>(reader: R) -> Result<u16, LaunchError> {
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                debug!(line = %line, "helper output");
                if let Some(port) = parse_marker(&line) {
                    return Ok(port);
                }
            }
            Ok(None) => return Err(LaunchError::MissingPortMarker),
            Err(e) => return Err(LaunchError::Wait(format!("failed to read helper output: {e}"))),
        }
    }
}
