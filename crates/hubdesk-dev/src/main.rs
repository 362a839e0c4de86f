//! hubdesk-dev: development launcher for the Hubdesk desktop shell.
//!
//! Waits for the frontend dev server, finds which candidate port it bound,
//! and runs the desktop shell with `HUBDESK_START_URL` pointing at it. The
//! shell's exit code becomes ours. Logs go to stderr; stdout carries only
//! the `VITE_PORT=<port>` marker from `detect-port`.

mod cli;
mod commands;

use std::path::Path;

use hubdesk_config::HubdeskConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::Command;

fn load_config(path: Option<&str>) -> HubdeskConfig {
    let result = match path {
        Some(p) => hubdesk_config::load_config_from(Path::new(p)),
        None => hubdesk_config::load_config(),
    };
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        HubdeskConfig::default()
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hubdesk_dev=info,hubdesk_discovery=info".into()),
        )
        .init();

    let args = cli::parse();
    let config = load_config(args.config.as_deref());

    let code = match &args.command {
        Command::Wait(wait) => commands::run_wait(wait, &config).await.map(|()| 0),
        Command::DetectPort(detect) => commands::run_detect_port(detect, &config)
            .await
            .map(|()| 0),
        Command::Start(start) => {
            commands::run_start(start, &config, args.config.as_deref()).await
        }
    };

    let code = match code {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "hubdesk-dev failed");
            1
        }
    };
    std::process::exit(code);
}
