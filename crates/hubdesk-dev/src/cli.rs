use clap::{Args as ClapArgs, Parser, Subcommand};

/// hubdesk-dev: wait for the dev server, find its port, and launch the desktop shell.
#[derive(Parser, Debug)]
#[command(name = "hubdesk-dev", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Block until one of the resources answers an HTTP request.
    Wait(WaitArgs),
    /// Probe candidate ports and print `VITE_PORT=<port>` for the first live one.
    DetectPort(DetectArgs),
    /// Wait, detect the port, then run the desktop shell with the start URL.
    Start(StartArgs),
}

#[derive(ClapArgs, Debug, Default, Clone)]
pub struct WaitArgs {
    /// Resource to wait for, e.g. `http-get://localhost:5173|5174`. Repeatable.
    #[arg(long = "resource", short = 'r')]
    pub resources: Vec<String>,

    /// Give up after this many milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Delay between checks in milliseconds.
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

#[derive(ClapArgs, Debug, Default, Clone)]
pub struct DetectArgs {
    /// Comma-separated candidate ports, in probe order.
    #[arg(long, value_delimiter = ',')]
    pub ports: Vec<u16>,

    /// Host to probe.
    #[arg(long)]
    pub host: Option<String>,

    /// Per-probe timeout in milliseconds.
    #[arg(long)]
    pub probe_timeout_ms: Option<u64>,
}

#[derive(ClapArgs, Debug, Default, Clone)]
pub struct StartArgs {
    #[command(flatten)]
    pub wait: WaitArgs,

    #[command(flatten)]
    pub detect: DetectArgs,

    /// Shell program and arguments (after `--`). Defaults to the configured shell.
    #[arg(last = true)]
    pub shell: Vec<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn wait_accepts_repeated_resources() {
        let args = parse_from(&[
            "hubdesk-dev",
            "wait",
            "-r",
            "http-get://localhost:5173",
            "--resource",
            "http-get://localhost:8080/health",
            "--timeout-ms",
            "5000",
        ]);
        match args.command {
            Command::Wait(w) => {
                assert_eq!(w.resources.len(), 2);
                assert_eq!(w.timeout_ms, Some(5000));
                assert_eq!(w.interval_ms, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn detect_port_parses_comma_list() {
        let args = parse_from(&["hubdesk-dev", "detect-port", "--ports", "5173,5174,5175"]);
        match args.command {
            Command::DetectPort(d) => assert_eq!(d.ports, vec![5173, 5174, 5175]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn detect_port_rejects_bad_port() {
        assert!(Args::try_parse_from(["hubdesk-dev", "detect-port", "--ports", "5173,abc"]).is_err());
        assert!(Args::try_parse_from(["hubdesk-dev", "detect-port", "--ports", "70000"]).is_err());
    }

    #[test]
    fn start_takes_shell_after_separator() {
        let args = parse_from(&[
            "hubdesk-dev",
            "--config",
            "/tmp/hubdesk.toml",
            "start",
            "--interval-ms",
            "250",
            "--",
            "cargo",
            "run",
            "-p",
            "hubdesk-app",
        ]);
        assert_eq!(args.config.as_deref(), Some("/tmp/hubdesk.toml"));
        match args.command {
            Command::Start(s) => {
                assert_eq!(s.wait.interval_ms, Some(250));
                assert_eq!(s.shell, vec!["cargo", "run", "-p", "hubdesk-app"]);
                assert!(s.detect.ports.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["hubdesk-dev"]).is_err());
    }
}
