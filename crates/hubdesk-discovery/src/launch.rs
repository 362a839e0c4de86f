//! Process launching: the port helper and the desktop shell.

use std::process::{ExitStatus, Stdio};

use hubdesk_common::LaunchError;
use tokio::io::BufReader;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::marker::read_marker;

/// The URL handed to the shell for a detected port.
pub fn start_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}")
}

/// What to spawn and which URL to inject.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Environment variable that carries `url` into the child.
    pub env_var: String,
    pub url: String,
}

impl LaunchSpec {
    /// Build the child command: current environment plus the URL variable,
    /// with all stdio inherited.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env(&self.env_var, &self.url)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

/// Map a child's exit status to the code this process should exit with.
///
/// Normal exits pass through unchanged. On Unix a signal death becomes
/// `128 + signal`, the same convention shells use (SIGKILL → 137).
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Spawn the shell and wait for it. Returns the exit code to propagate.
pub async fn launch(spec: &LaunchSpec) -> Result<i32, LaunchError> {
    info!(
        program = %spec.program,
        env_var = %spec.env_var,
        url = %spec.url,
        "launching desktop shell"
    );

    let mut child = spec.command().spawn().map_err(|e| LaunchError::Spawn {
        program: spec.program.clone(),
        reason: e.to_string(),
    })?;

    let status = child
        .wait()
        .await
        .map_err(|e| LaunchError::Wait(e.to_string()))?;

    let code = exit_code_of(status);
    info!(code, "desktop shell exited");
    Ok(code)
}

/// Run the port-detection helper and return the port from its marker line.
///
/// The helper's stdout is captured and scanned line by line; stderr stays
/// attached to ours so its logs remain visible.
pub async fn run_port_helper(program: &str, args: &[String]) -> Result<u16, LaunchError> {
    debug!(program, ?args, "running port helper");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| LaunchError::Spawn {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| LaunchError::Wait("helper stdout was not captured".into()))?;

    let marker = read_marker(BufReader::new(stdout)).await;

    match child.wait().await {
        Ok(status) if !status.success() => {
            warn!(code = exit_code_of(status), "port helper exited with failure");
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "failed to reap port helper"),
    }

    let port = marker?;
    info!(port, "port helper reported dev server");
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> LaunchSpec {
        LaunchSpec {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            env_var: "HUBDESK_START_URL".into(),
            url: start_url("localhost", 5174),
        }
    }

    #[test]
    fn start_url_format() {
        assert_eq!(start_url("localhost", 5174), "http://localhost:5174");
    }

    #[test]
    fn command_injects_url_variable() {
        let spec = sh("true");
        let cmd = spec.command();
        let envs: Vec<_> = cmd.as_std().get_envs().collect();
        assert!(envs.iter().any(|(k, v)| {
            *k == "HUBDESK_START_URL" && v.map(|v| v == "http://localhost:5174").unwrap_or(false)
        }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_codes_pass_through() {
        for code in [0, 1, 137, 42] {
            let spec = sh(&format!("exit {code}"));
            assert_eq!(launch(&spec).await.unwrap(), code);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn signal_death_maps_to_shell_convention() {
        let spec = sh("kill -9 $$");
        assert_eq!(launch(&spec).await.unwrap(), 137);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn child_sees_url_and_inherited_env() {
        std::env::set_var("HUBDESK_TEST_INHERITED", "yes");
        let spec = sh(
            r#"test "$HUBDESK_START_URL" = "http://localhost:5174" && test "$HUBDESK_TEST_INHERITED" = "yes""#,
        );
        assert_eq!(launch(&spec).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let spec = LaunchSpec {
            program: "/nonexistent/hubdesk-shell".into(),
            args: Vec::new(),
            env_var: "HUBDESK_START_URL".into(),
            url: start_url("localhost", 5173),
        };
        assert!(matches!(
            launch(&spec).await,
            Err(LaunchError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn helper_marker_is_read() {
        let args = vec![
            "-c".to_string(),
            "echo probing; echo VITE_PORT=5174".to_string(),
        ];
        assert_eq!(run_port_helper("sh", &args).await.unwrap(), 5174);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn helper_without_marker_is_fatal() {
        let args = vec!["-c".to_string(), "echo nothing here; exit 1".to_string()];
        assert!(matches!(
            run_port_helper("sh", &args).await,
            Err(LaunchError::MissingPortMarker)
        ));
    }
}
