use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("no reachable port among {0:?}")]
    NoReachablePort(Vec<u16>),

    #[error("timed out after {elapsed_ms}ms waiting for resources ({checks} checks)")]
    WaitTimeout { elapsed_ms: u64, checks: u32 },

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("http client error: {0}")]
    Client(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to spawn {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("helper output did not contain a port marker")]
    MissingPortMarker,

    #[error("failed to wait for child: {0}")]
    Wait(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("window creation failed: {0}")]
    Create(String),

    #[error("content load failed: {0}")]
    Load(String),

    #[error("script evaluation failed: {0}")]
    Script(String),
}

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("invalid IPC message: {0}")]
    InvalidJson(String),

    #[error("unknown IPC channel: {0}")]
    UnknownChannel(String),

    #[error("IPC channel {0} cannot be used in this direction")]
    WrongDirection(String),

    #[error("IPC channel {channel} expects {expected} payload")]
    InvalidPayload {
        channel: String,
        expected: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum HubdeskError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Ipc(#[from] IpcError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
