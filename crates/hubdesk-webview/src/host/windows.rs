//! Window creation, page loads, timers, tray actions, and shutdown.

use hubdesk_common::{Theme, WindowRole};
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::content::{error_page, floating_page};
use crate::events::ShellEvent;
use crate::ipc::Channel;
use crate::lifecycle::{LoadFailure, LoadStep, RetryDecision, WindowState};
use crate::tray::TrayAction;
use crate::window::{HostWindow, ShellPlatform, WindowSpec};

use super::{AppShellState, ShellTimer};

impl<W: HostWindow> AppShellState<W> {
    // =========================================================================
    // STARTUP
    // =========================================================================

    /// Open the main window and schedule the floating window.
    pub fn start<P: ShellPlatform<Window = W>>(&mut self, platform: &mut P) {
        info!(url = %self.settings.main_url, "starting shell");
        self.open_main(platform);
        let at = self.clock.now() + self.settings.floating_delay;
        self.timers.schedule(at, ShellTimer::CreateFloating);
    }

    /// Run every timer that is due.
    pub fn tick<P: ShellPlatform<Window = W>>(&mut self, platform: &mut P) {
        let now = self.clock.now();
        for timer in self.timers.due(now) {
            match timer {
                ShellTimer::RetryMainLoad => self.retry_main_load(),
                ShellTimer::CreateFloating => {
                    if self.floating.is_none() && !self.quitting {
                        self.open_floating(platform);
                    }
                }
            }
        }
    }

    /// React to one event.
    pub fn handle<P: ShellPlatform<Window = W>>(&mut self, event: ShellEvent, platform: &mut P) {
        if self.quitting {
            return;
        }
        match event {
            ShellEvent::Ipc { role, body } => self.handle_ipc(role, &body, platform),
            ShellEvent::PageLoaded { role } => self.on_page_loaded(role),
            ShellEvent::LoadFailed { role, failure } => self.on_load_failed(role, &failure),
            ShellEvent::ThemeReported { role, theme } => self.on_renderer_theme(role, theme),
            ShellEvent::CloseRequested { role } => match role {
                WindowRole::Main => self.close_main(),
                WindowRole::Floating => self.close_floating(),
            },
            ShellEvent::Tray(action) => self.handle_tray(action, platform),
        }
    }

    // =========================================================================
    // MAIN WINDOW
    // =========================================================================

    fn main_spec(&self) -> WindowSpec {
        WindowSpec {
            role: WindowRole::Main,
            title: self.settings.main_title.clone(),
            width: self.settings.main_size.0,
            height: self.settings.main_size.1,
            frameless: true,
            always_on_top: false,
            resizable: true,
            devtools: self.settings.devtools,
        }
    }

    /// Show the main window, creating it if needed.
    pub(super) fn open_main<P: ShellPlatform<Window = W>>(&mut self, platform: &mut P) {
        if let Some(main) = &self.main {
            main.show();
            main.focus();
            return;
        }

        let window = match platform.create_window(&self.main_spec()) {
            Ok(w) => w,
            Err(e) => {
                error!(error = %e, "failed to create main window");
                return;
            }
        };
        self.main = Some(window);

        match self.main_load.begin() {
            LoadStep::Attempt(attempt) => {
                debug!(attempt, "loading main window");
                if let Some(main) = &mut self.main {
                    main.load_url(&self.settings.main_url);
                }
            }
            LoadStep::Fallback => self.show_error_page(),
        }
    }

    fn retry_main_load(&mut self) {
        if !self.main_load.retry_due() {
            return;
        }
        if let Some(main) = &mut self.main {
            info!(
                attempt = self.main_load.retry().failures + 1,
                url = %self.settings.main_url,
                "retrying main window load"
            );
            main.load_url(&self.settings.main_url);
        }
    }

    fn show_error_page(&mut self) {
        let html = error_page(self.assets.as_ref(), &self.settings.error_page);
        if let Some(main) = &mut self.main {
            if let Err(e) = main.load_html(&html) {
                error!(error = %e, "failed to show error page");
            }
        }
    }

    pub(super) fn close_main(&mut self) {
        if self.main.take().is_some() {
            info!("main window closed");
        }
        self.main_load.on_closed();
        self.timers.cancel(|t| *t == ShellTimer::RetryMainLoad);
    }

    // =========================================================================
    // FLOATING WINDOW
    // =========================================================================

    fn floating_spec(&self) -> WindowSpec {
        let (width, height) = self.settings.floating_size(self.floating_mode);
        WindowSpec {
            role: WindowRole::Floating,
            title: format!("{} Search", self.settings.main_title),
            width,
            height,
            frameless: true,
            always_on_top: self.floating_pinned,
            resizable: false,
            devtools: self.settings.devtools,
        }
    }

    /// Show the floating window, creating it if needed.
    pub(super) fn open_floating<P: ShellPlatform<Window = W>>(&mut self, platform: &mut P) {
        if let Some(floating) = &self.floating {
            floating.show();
            return;
        }

        self.floating_mode = Default::default();
        let mut window = match platform.create_window(&self.floating_spec()) {
            Ok(w) => w,
            Err(e) => {
                error!(error = %e, "failed to create floating window");
                return;
            }
        };

        let html = floating_page(self.assets.as_ref(), &self.settings.floating_html);
        if let Err(e) = window.load_html(&html) {
            error!(error = %e, "failed to load floating window content");
        }
        self.floating = Some(window);
        self.floating_state = WindowState::Loading;
        info!("floating window created");
    }

    pub(super) fn close_floating(&mut self) {
        if self.floating.take().is_some() {
            info!("floating window closed");
        }
        self.floating_state = WindowState::Closed;
    }

    // =========================================================================
    // LOAD EVENTS
    // =========================================================================

    fn on_page_loaded(&mut self, role: WindowRole) {
        match role {
            WindowRole::Main => {
                if self.main_load.on_loaded() {
                    if let Some(main) = &self.main {
                        main.request_theme();
                    }
                }
            }
            WindowRole::Floating => {
                let Some(floating) = &self.floating else {
                    return;
                };
                self.floating_state = WindowState::Loaded;
                if let Err(e) = floating.post(Channel::MakeDraggable, &serde_json::Value::Null) {
                    warn!(error = %e, "failed to send make-draggable");
                }
                if let Some(theme) = self.theme {
                    if let Err(e) = floating.post(Channel::ThemeChanged, &json!(theme.is_dark())) {
                        warn!(error = %e, "failed to send theme to floating window");
                    }
                }
            }
        }
    }

    fn on_load_failed(&mut self, role: WindowRole, failure: &LoadFailure) {
        if role == WindowRole::Floating {
            warn!(?failure, "floating window load failed");
            return;
        }
        if self.main.is_none() {
            return;
        }

        match self.main_load.on_failure(failure) {
            RetryDecision::Retry { delay, .. } => {
                let at = self.clock.now() + delay;
                self.timers.schedule(at, ShellTimer::RetryMainLoad);
            }
            RetryDecision::Exhausted => self.show_error_page(),
            RetryDecision::Ignored => {}
        }
    }

    pub(super) fn relay_theme(&self, theme: Theme) {
        let Some(floating) = &self.floating else {
            return;
        };
        debug!(%theme, "relaying theme to floating window");
        if let Err(e) = floating.post(Channel::ThemeChanged, &json!(theme.is_dark())) {
            warn!(error = %e, "failed to relay theme");
        }
    }

    // =========================================================================
    // TRAY & SHUTDOWN
    // =========================================================================

    fn handle_tray<P: ShellPlatform<Window = W>>(&mut self, action: TrayAction, platform: &mut P) {
        debug!(%action, "tray action");
        match action {
            TrayAction::ShowMain => self.open_main(platform),
            TrayAction::HideMain => {
                if let Some(main) = &self.main {
                    main.hide();
                }
            }
            TrayAction::ShowFloating => self.open_floating(platform),
            TrayAction::HideFloating => {
                if let Some(floating) = &self.floating {
                    floating.hide();
                }
            }
            TrayAction::Quit => self.shutdown(platform),
        }
    }

    /// Close both windows and stop the event loop.
    pub fn shutdown<P: ShellPlatform<Window = W>>(&mut self, platform: &mut P) {
        if self.quitting {
            return;
        }
        info!("shutting down shell");
        self.quitting = true;
        self.timers.cancel(|_| true);
        self.close_floating();
        self.close_main();
        platform.quit();
    }
}
