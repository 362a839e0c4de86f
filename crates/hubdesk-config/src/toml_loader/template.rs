//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Hubdesk Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[discovery]
# ports = [5173, 5174, 5175]   # tried in order
# host = "localhost"
# probe_timeout_ms = 1000
# wait_timeout_ms = 60000
# wait_interval_ms = 1000

[launch]
# env_var = "HUBDESK_START_URL"
# shell_program = "hubdesk"
# shell_args = []

[main_window]
# url = "http://localhost:5173"   # HUBDESK_START_URL wins when set
# title = "Hubdesk"
# width = 1280
# height = 800
# max_retries = 30               # 1-1000
# retry_backoff_ms = 2000
# error_page = "error.html"

[floating_window]
# html = "floating.html"
# delay_ms = 1000
# compact_width = 320
# compact_height = 64
# expanded_width = 320
# expanded_height = 420
# always_on_top = true

[tray]
# enabled = true
# icon = "icon.png"
# tooltip = "Hubdesk"

[links]
# external_url = "https://hubdesk.app"

[assets]
# dir = "assets"

[logging]
# level = "info"   # trace, debug, info, warn, error
"##
    .to_string()
}
