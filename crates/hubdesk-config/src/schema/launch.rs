//! Desktop shell launch settings.

use serde::{Deserialize, Serialize};

/// How `hubdesk-dev start` hands the resolved URL to the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Environment variable carrying the full start URL.
    pub env_var: String,
    /// Desktop shell executable.
    pub shell_program: String,
    pub shell_args: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            env_var: "HUBDESK_START_URL".into(),
            shell_program: "hubdesk".into(),
            shell_args: Vec::new(),
        }
    }
}
