pub mod errors;
pub mod types;

pub use errors::{ConfigError, DiscoveryError, HubdeskError, IpcError, LaunchError, WindowError};
pub use types::{FloatingMode, Theme, WindowRole};

pub type Result<T> = std::result::Result<T, HubdeskError>;
