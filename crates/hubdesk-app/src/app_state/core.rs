//! HubdeskApp struct definition and constructor.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hubdesk_common::{HubdeskError, WindowRole};
use hubdesk_config::HubdeskConfig;
use hubdesk_discovery::HttpProbe;
use hubdesk_webview::{AppShellState, DiskAssets, NavigationPolicy, ShellSettings, SystemClock};
use tray_icon::TrayIcon;
use winit::window::WindowId;

use super::types::{LoadSequence, ProbeOutcome, WindowContext};
use super::window::WryWindow;

/// Top-level application state.
pub struct HubdeskApp {
    pub(super) config: HubdeskConfig,

    // Window shell (both windows live here)
    pub(super) shell: AppShellState<WryWindow>,
    pub(super) roles: HashMap<WindowId, WindowRole>,

    // Callback plumbing shared with every webview
    pub(super) ctx: WindowContext,
    pub(super) probe_rx: Receiver<ProbeOutcome>,

    // Tray icon must stay alive to stay visible
    pub(super) tray: Option<TrayIcon>,

    // Runs page reachability probes
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    pub(super) started: bool,
}

impl HubdeskApp {
    /// Build the app. `start_url` overrides the configured main window URL.
    pub fn new(config: HubdeskConfig, start_url: Option<String>) -> Result<Self, HubdeskError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let probe = HttpProbe::new(Duration::from_millis(config.discovery.probe_timeout_ms))?;

        let settings = ShellSettings::from_config(&config, start_url);
        let navigation = NavigationPolicy::for_start_url(&settings.main_url);
        let (probe_tx, probe_rx) = mpsc::channel();
        let ctx = WindowContext {
            events: Arc::new(Mutex::new(Vec::new())),
            probe_tx,
            runtime: runtime.handle().clone(),
            probe: Arc::new(probe),
            navigation,
            load_seq: LoadSequence::default(),
        };

        let assets = DiskAssets::new(&config.assets.dir);
        let shell = AppShellState::new(settings, Box::new(assets), Arc::new(SystemClock));

        Ok(Self {
            config,
            shell,
            roles: HashMap::new(),
            ctx,
            probe_rx,
            tray: None,
            tokio_runtime: Some(runtime),
            started: false,
        })
    }
}
