//! Subcommand implementations.

use std::io::Write;
use std::time::Duration;

use hubdesk_common::{DiscoveryError, HubdeskError, LaunchError};
use hubdesk_config::HubdeskConfig;
use hubdesk_discovery::{
    format_marker, launch, run_port_helper, scan_ports, start_url, HttpProbe, LaunchSpec,
    ReadinessWaiter,
};
use tracing::info;

use crate::cli::{DetectArgs, StartArgs, WaitArgs};

// =============================================================================
// WAIT
// =============================================================================

/// Build the readiness waiter from flags, falling back to config.
pub fn waiter_for(args: &WaitArgs, config: &HubdeskConfig) -> Result<ReadinessWaiter, DiscoveryError> {
    let discovery = &config.discovery;
    let resources = if args.resources.is_empty() {
        vec![discovery.wait_resource()]
    } else {
        args.resources.clone()
    };
    let interval = Duration::from_millis(args.interval_ms.unwrap_or(discovery.wait_interval_ms));
    let timeout = Duration::from_millis(args.timeout_ms.unwrap_or(discovery.wait_timeout_ms));
    ReadinessWaiter::from_resources(&resources, interval, timeout)
}

async fn wait_until_up(waiter: &ReadinessWaiter, probe_timeout_ms: u64) -> Result<(), HubdeskError> {
    let probe = HttpProbe::new(Duration::from_millis(probe_timeout_ms))?;
    let url = waiter.wait(&probe).await?;
    info!(url = %url, "resource is up");
    Ok(())
}

pub async fn run_wait(args: &WaitArgs, config: &HubdeskConfig) -> Result<(), HubdeskError> {
    let waiter = waiter_for(args, config)?;
    wait_until_up(&waiter, config.discovery.probe_timeout_ms).await
}

// =============================================================================
// DETECT PORT
// =============================================================================

/// Where and how to scan for the dev server.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectPlan {
    pub host: String,
    pub ports: Vec<u16>,
    pub probe_timeout_ms: u64,
}

impl DetectPlan {
    pub fn resolve(args: &DetectArgs, config: &HubdeskConfig) -> Self {
        let discovery = &config.discovery;
        Self {
            host: args.host.clone().unwrap_or_else(|| discovery.host.clone()),
            ports: if args.ports.is_empty() {
                discovery.ports.clone()
            } else {
                args.ports.clone()
            },
            probe_timeout_ms: args.probe_timeout_ms.unwrap_or(discovery.probe_timeout_ms),
        }
    }

    /// Readiness resource covering every port this plan scans.
    pub fn wait_resource(&self) -> String {
        let ports: Vec<String> = self.ports.iter().map(|p| p.to_string()).collect();
        format!("http-get://{}:{}", self.host, ports.join("|"))
    }

    /// Arguments that make a `hubdesk-dev` child run this exact scan.
    pub fn helper_args(&self, config_path: Option<&str>) -> Vec<String> {
        let ports: Vec<String> = self.ports.iter().map(|p| p.to_string()).collect();
        let mut args = Vec::new();
        if let Some(path) = config_path {
            args.push("--config".to_string());
            args.push(path.to_string());
        }
        args.extend([
            "detect-port".to_string(),
            "--host".to_string(),
            self.host.clone(),
            "--ports".to_string(),
            ports.join(","),
            "--probe-timeout-ms".to_string(),
            self.probe_timeout_ms.to_string(),
        ]);
        args
    }
}

/// Scan the candidate ports and return the first live one.
pub async fn detect_port(plan: &DetectPlan) -> Result<u16, HubdeskError> {
    let probe = HttpProbe::new(Duration::from_millis(plan.probe_timeout_ms))?;
    Ok(scan_ports(&probe, &plan.host, &plan.ports).await?)
}

/// Write the marker line and flush so a reading parent sees it immediately.
pub fn emit_marker(out: &mut impl Write, port: u16) -> std::io::Result<()> {
    writeln!(out, "{}", format_marker(port))?;
    out.flush()
}

pub async fn run_detect_port(args: &DetectArgs, config: &HubdeskConfig) -> Result<(), HubdeskError> {
    let plan = DetectPlan::resolve(args, config);
    let port = detect_port(&plan).await?;
    emit_marker(&mut std::io::stdout().lock(), port)?;
    Ok(())
}

// =============================================================================
// START
// =============================================================================

/// The shell to launch for `url`: `-- <program> <args>` when given,
/// otherwise the configured shell.
pub fn shell_spec(shell: &[String], config: &HubdeskConfig, url: String) -> LaunchSpec {
    let launch = &config.launch;
    let (program, args) = match shell.split_first() {
        Some((program, args)) => (program.clone(), args.to_vec()),
        None => (launch.shell_program.clone(), launch.shell_args.clone()),
    };
    LaunchSpec {
        program,
        args,
        env_var: launch.env_var.clone(),
        url,
    }
}

/// Wait flags for `start`. Without `--resource`, wait on the same host and
/// ports the scan will probe.
pub fn start_wait_args(args: &StartArgs, plan: &DetectPlan) -> WaitArgs {
    let mut wait = args.wait.clone();
    if wait.resources.is_empty() {
        wait.resources.push(plan.wait_resource());
    }
    wait
}

/// The wait stage of `start`.
pub async fn wait_for_plan(
    args: &StartArgs,
    plan: &DetectPlan,
    config: &HubdeskConfig,
) -> Result<(), HubdeskError> {
    let waiter = waiter_for(&start_wait_args(args, plan), config)?;
    wait_until_up(&waiter, plan.probe_timeout_ms).await
}

/// Wait → detect → launch. Returns the shell's exit code.
pub async fn run_start(
    args: &StartArgs,
    config: &HubdeskConfig,
    config_path: Option<&str>,
) -> Result<i32, HubdeskError> {
    let plan = DetectPlan::resolve(&args.detect, config);
    wait_for_plan(args, &plan, config).await?;

    let exe = std::env::current_exe().map_err(|e| LaunchError::Spawn {
        program: "hubdesk-dev".into(),
        reason: format!("cannot locate own executable: {e}"),
    })?;
    let helper = exe.to_string_lossy().into_owned();
    let port = run_port_helper(&helper, &plan.helper_args(config_path)).await?;

    let spec = shell_spec(&args.shell, config, start_url(&plan.host, port));
    Ok(launch(&spec).await?)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `200 OK` to every connection on an ephemeral port.
    async fn live_server() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = stream.read(&mut buf).await;
                    let _ = stream
                        .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                        .await;
                });
            }
        });
        port
    }

    /// A port nothing listens on.
    async fn dead_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    fn plan(ports: Vec<u16>) -> DetectPlan {
        DetectPlan {
            host: "127.0.0.1".into(),
            ports,
            probe_timeout_ms: 500,
        }
    }

    #[test]
    fn plan_falls_back_to_config() {
        let config = HubdeskConfig::default();
        let plan = DetectPlan::resolve(&DetectArgs::default(), &config);
        assert_eq!(plan.ports, vec![5173, 5174, 5175]);
        assert_eq!(plan.host, "localhost");
        assert_eq!(plan.probe_timeout_ms, 1000);

        let args = DetectArgs {
            ports: vec![3000],
            host: Some("127.0.0.1".into()),
            probe_timeout_ms: Some(50),
        };
        let plan = DetectPlan::resolve(&args, &config);
        assert_eq!(plan.ports, vec![3000]);
        assert_eq!(plan.host, "127.0.0.1");
    }

    #[test]
    fn helper_args_round_trip_the_plan() {
        let args = plan(vec![5173, 5174]).helper_args(Some("/etc/hubdesk.toml"));
        assert_eq!(
            args,
            vec![
                "--config",
                "/etc/hubdesk.toml",
                "detect-port",
                "--host",
                "127.0.0.1",
                "--ports",
                "5173,5174",
                "--probe-timeout-ms",
                "500",
            ]
        );
    }

    #[test]
    fn waiter_uses_config_resource_by_default() {
        let waiter = waiter_for(&WaitArgs::default(), &HubdeskConfig::default()).unwrap();
        let urls: Vec<&str> = waiter.targets().iter().map(|u| u.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:5173/",
                "http://localhost:5174/",
                "http://localhost:5175/"
            ]
        );
    }

    #[test]
    fn waiter_rejects_bad_resource() {
        let args = WaitArgs {
            resources: vec!["ftp://localhost".into()],
            ..WaitArgs::default()
        };
        assert!(waiter_for(&args, &HubdeskConfig::default()).is_err());
    }

    #[test]
    fn shell_spec_defaults_and_override() {
        let config = HubdeskConfig::default();
        let url = start_url("localhost", 5174);

        let spec = shell_spec(&[], &config, url.clone());
        assert_eq!(spec.program, "hubdesk");
        assert!(spec.args.is_empty());
        assert_eq!(spec.env_var, "HUBDESK_START_URL");
        assert_eq!(spec.url, "http://localhost:5174");

        let shell = vec!["npx".to_string(), "electron".to_string(), ".".to_string()];
        let spec = shell_spec(&shell, &config, url);
        assert_eq!(spec.program, "npx");
        assert_eq!(spec.args, vec!["electron", "."]);
    }

    fn start_args(argv: &[&str]) -> StartArgs {
        let mut full = vec!["hubdesk-dev", "start"];
        full.extend_from_slice(argv);
        match crate::cli::Args::try_parse_from(full).unwrap().command {
            crate::cli::Command::Start(s) => s,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn start_waits_on_scanned_ports_by_default() {
        let args = start_args(&["--host", "127.0.0.1", "--ports", "3000,3001"]);
        let plan = DetectPlan::resolve(&args.detect, &HubdeskConfig::default());
        let wait = start_wait_args(&args, &plan);
        assert_eq!(wait.resources, vec!["http-get://127.0.0.1:3000|3001"]);

        let waiter = waiter_for(&wait, &HubdeskConfig::default()).unwrap();
        let urls: Vec<&str> = waiter.targets().iter().map(|u| u.as_str()).collect();
        assert_eq!(urls, vec!["http://127.0.0.1:3000/", "http://127.0.0.1:3001/"]);
    }

    #[test]
    fn start_keeps_explicit_resources() {
        let args = start_args(&["--ports", "3000", "-r", "http-get://localhost:8080/health"]);
        let plan = DetectPlan::resolve(&args.detect, &HubdeskConfig::default());
        let wait = start_wait_args(&args, &plan);
        assert_eq!(wait.resources, vec!["http-get://localhost:8080/health"]);
    }

    #[tokio::test]
    async fn start_wait_finds_port_given_only_by_flag() {
        let live = live_server().await.to_string();
        let args = start_args(&[
            "--host",
            "127.0.0.1",
            "--ports",
            &live,
            "--timeout-ms",
            "3000",
            "--interval-ms",
            "100",
            "--",
            "true",
        ]);
        let plan = DetectPlan::resolve(&args.detect, &HubdeskConfig::default());
        wait_for_plan(&args, &plan, &HubdeskConfig::default())
            .await
            .unwrap();
    }

    #[test]
    fn marker_is_one_line() {
        let mut out = Vec::new();
        emit_marker(&mut out, 5174).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "VITE_PORT=5174\n");
    }

    #[tokio::test]
    async fn detects_first_live_port() {
        let dead = dead_port().await;
        let live = live_server().await;
        let port = detect_port(&plan(vec![dead, live])).await.unwrap();
        assert_eq!(port, live);
    }

    #[tokio::test]
    async fn exhaustion_is_an_error() {
        let a = dead_port().await;
        let b = dead_port().await;
        let err = detect_port(&plan(vec![a, b])).await.unwrap_err();
        assert!(matches!(
            err,
            HubdeskError::Discovery(DiscoveryError::NoReachablePort(_))
        ));
    }
}
