//! The window shell: owns both windows and reacts to every event.
//!
//! `AppShellState` is toolkit-agnostic. The binary feeds it [`ShellEvent`]s
//! and calls [`AppShellState::tick`] when [`AppShellState::next_deadline`]
//! passes; all window work goes through a [`ShellPlatform`].
//!
//! [`ShellEvent`]: crate::ShellEvent
//! [`ShellPlatform`]: crate::ShellPlatform

mod dispatch;
mod windows;


use std::sync::Arc;
use std::time::{Duration, Instant};

use hubdesk_common::{FloatingMode, Theme, WindowRole};
use hubdesk_config::HubdeskConfig;

use crate::clock::{Clock, TimerQueue};
use crate::content::AssetLoader;
use crate::lifecycle::{MainLoadMachine, WindowState};
use crate::window::HostWindow;

/// Window behavior derived from configuration.
#[derive(Debug, Clone)]
pub struct ShellSettings {
    pub main_url: String,
    pub main_title: String,
    pub main_size: (u32, u32),
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub error_page: String,
    pub devtools: bool,
    pub floating_html: String,
    pub floating_delay: Duration,
    pub compact_size: (u32, u32),
    pub expanded_size: (u32, u32),
    pub floating_on_top: bool,
    pub external_url: String,
}

impl ShellSettings {
    /// Build settings from config. `main_url` overrides the configured URL.
    pub fn from_config(config: &HubdeskConfig, main_url: Option<String>) -> Self {
        let main = &config.main_window;
        let floating = &config.floating_window;
        Self {
            main_url: main_url.unwrap_or_else(|| main.url.clone()),
            main_title: main.title.clone(),
            main_size: (main.width, main.height),
            max_retries: main.max_retries,
            retry_backoff: Duration::from_millis(main.retry_backoff_ms),
            error_page: main.error_page.clone(),
            devtools: main.devtools,
            floating_html: floating.html.clone(),
            floating_delay: Duration::from_millis(floating.delay_ms),
            compact_size: (floating.compact_width, floating.compact_height),
            expanded_size: (floating.expanded_width, floating.expanded_height),
            floating_on_top: floating.always_on_top,
            external_url: config.links.external_url.clone(),
        }
    }

    pub fn floating_size(&self, mode: FloatingMode) -> (u32, u32) {
        match mode {
            FloatingMode::Compact => self.compact_size,
            FloatingMode::Expanded => self.expanded_size,
        }
    }
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self::from_config(&HubdeskConfig::default(), None)
    }
}

/// Deferred shell work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShellTimer {
    RetryMainLoad,
    CreateFloating,
}

/// State of the two-window desktop shell.
pub struct AppShellState<W: HostWindow> {
    settings: ShellSettings,
    assets: Box<dyn AssetLoader>,
    clock: Arc<dyn Clock>,
    timers: TimerQueue<ShellTimer>,

    main: Option<W>,
    main_load: MainLoadMachine,

    floating: Option<W>,
    floating_state: WindowState,
    floating_mode: FloatingMode,
    floating_pinned: bool,

    /// Last theme seen from the main window.
    theme: Option<Theme>,
    quitting: bool,
}

impl<W: HostWindow> AppShellState<W> {
    pub fn new(
        settings: ShellSettings,
        assets: Box<dyn AssetLoader>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let main_load = MainLoadMachine::new(settings.max_retries, settings.retry_backoff);
        let floating_pinned = settings.floating_on_top;
        Self {
            settings,
            assets,
            clock,
            timers: TimerQueue::new(),
            main: None,
            main_load,
            floating: None,
            floating_state: WindowState::Uncreated,
            floating_mode: FloatingMode::Compact,
            floating_pinned,
            theme: None,
            quitting: false,
        }
    }

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    pub fn main_window(&self) -> Option<&W> {
        self.main.as_ref()
    }

    pub fn floating_window(&self) -> Option<&W> {
        self.floating.as_ref()
    }

    pub fn main_state(&self) -> WindowState {
        self.main_load.state()
    }

    pub fn main_failures(&self) -> u32 {
        self.main_load.retry().failures
    }

    pub fn floating_state(&self) -> WindowState {
        self.floating_state
    }

    pub fn floating_mode(&self) -> FloatingMode {
        self.floating_mode
    }

    pub fn floating_pinned(&self) -> bool {
        self.floating_pinned
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Earliest pending timer, for the event loop's wake-up.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Whether a window for `role` currently exists.
    pub fn has_window(&self, role: WindowRole) -> bool {
        self.window(role).is_some()
    }

    fn window(&self, role: WindowRole) -> Option<&W> {
        match role {
            WindowRole::Main => self.main.as_ref(),
            WindowRole::Floating => self.floating.as_ref(),
        }
    }
}
