//! Dev-server discovery and desktop shell launch.
//!
//! Provides the startup half of the shell:
//! - Probing candidate ports for a listening dev server
//! - Waiting for readiness with bounded, one-at-a-time polling
//! - The `VITE_PORT=<port>` marker exchanged with the helper process
//! - Spawning the desktop shell with the resolved URL and propagating its exit code

pub mod launch;
pub mod marker;
pub mod probe;
pub mod scan;
pub mod wait;

pub use launch::{exit_code_of, launch, run_port_helper, start_url, LaunchSpec};
pub use marker::{format_marker, parse_marker, read_marker, PORT_MARKER};
pub use probe::{port_url, probe_port, HttpProbe, Probe, ProbeResult};
pub use scan::scan_ports;
pub use wait::{parse_resource, ReadinessWaiter};
