use clap::Parser;

/// Hubdesk: desktop shell for the Hubdesk web app.
#[derive(Parser, Debug)]
#[command(name = "hubdesk", version, about)]
pub struct Args {
    /// URL to load in the main window. Overrides HUBDESK_START_URL and config.
    #[arg(long)]
    pub url: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_flags_optional() {
        let args = Args::try_parse_from(["hubdesk"]).unwrap();
        assert!(args.url.is_none());
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn url_and_log_level() {
        let args = Args::try_parse_from([
            "hubdesk",
            "--url",
            "http://localhost:5174",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.url.as_deref(), Some("http://localhost:5174"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
