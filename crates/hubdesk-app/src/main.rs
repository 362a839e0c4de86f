mod app_state;
mod cli;
mod desktop;
mod tray;

use std::path::Path;

use hubdesk_common::ConfigError;
use hubdesk_config::HubdeskConfig;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

fn load_config(path: Option<&str>) -> Result<HubdeskConfig, ConfigError> {
    match path {
        Some(p) => hubdesk_config::load_config_from(Path::new(p)),
        None => hubdesk_config::load_config(),
    }
}

/// Filter directives for every hubdesk crate at `level`.
fn level_directive(level: &str) -> String {
    format!("hubdesk={level},hubdesk_webview={level},hubdesk_discovery={level}")
}

fn env_filter(directive: &str) -> EnvFilter {
    directive
        .split(',')
        .fold(EnvFilter::from_default_env(), |filter, part| {
            match part.trim().parse() {
                Ok(d) => filter.add_directive(d),
                Err(_) => filter,
            }
        })
}

/// The main window URL: `--url` wins, then a non-empty environment value.
fn start_url_override(cli_url: Option<&str>, env_value: Option<String>) -> Option<String> {
    if let Some(url) = cli_url {
        return Some(url.to_string());
    }
    env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn main() {
    let args = cli::parse();

    // Config first so its log level can seed the filter.
    let loaded = load_config(args.config.as_deref());

    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => level_directive(level),
        (None, Ok(config)) => config.logging.level.directive(),
        (None, Err(_)) => level_directive("info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&directive))
        .init();

    tracing::info!("Hubdesk v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        HubdeskConfig::default()
    });

    let env_url = std::env::var(&config.launch.env_var).ok();
    let start_url = start_url_override(args.url.as_deref(), env_url);
    match &start_url {
        Some(url) => tracing::info!(url = %url, "start URL override"),
        None => tracing::info!(url = %config.main_window.url, "using configured start URL"),
    }

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };

    let mut app = match app_state::HubdeskApp::new(config, start_url) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_url_beats_environment() {
        assert_eq!(
            start_url_override(Some("http://localhost:1"), Some("http://localhost:2".into())),
            Some("http://localhost:1".to_string())
        );
    }

    #[test]
    fn environment_used_when_present() {
        assert_eq!(
            start_url_override(None, Some(" http://localhost:5174 ".into())),
            Some("http://localhost:5174".to_string())
        );
        assert_eq!(start_url_override(None, Some("   ".into())), None);
        assert_eq!(start_url_override(None, None), None);
    }

    #[test]
    fn level_directive_covers_all_crates() {
        assert_eq!(
            level_directive("warn"),
            "hubdesk=warn,hubdesk_webview=warn,hubdesk_discovery=warn"
        );
    }
}
