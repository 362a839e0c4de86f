//! Renderer → host IPC dispatch.
//!
//! Each command targets a specific window. When that window does not
//! exist the command is a no-op; dispatch never creates windows.

use hubdesk_common::{FloatingMode, Theme, WindowRole};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::command::HostCommand;
use crate::ipc::Channel;
use crate::window::{HostWindow, ShellPlatform};

use super::AppShellState;

impl<W: HostWindow> AppShellState<W> {
    /// Handle a single IPC body from a renderer.
    pub(super) fn handle_ipc<P: ShellPlatform<Window = W>>(
        &mut self,
        role: WindowRole,
        body: &str,
        platform: &mut P,
    ) {
        let command = match HostCommand::from_json(body) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    %role,
                    body_len = body.len(),
                    error = %e,
                    "IPC message rejected"
                );
                return;
            }
        };

        debug!(%role, ?command, "IPC message dispatched");

        match command {
            HostCommand::Minimize => {
                if let Some(main) = &self.main {
                    main.minimize();
                }
            }
            HostCommand::ToggleMaximize => self.toggle_maximize(),
            HostCommand::CloseMain => self.close_main(),
            HostCommand::HideFloating => {
                if let Some(floating) = &self.floating {
                    floating.hide();
                }
            }
            HostCommand::Pin(pinned) => {
                if let Some(floating) = &self.floating {
                    floating.set_always_on_top(pinned);
                    self.floating_pinned = pinned;
                }
            }
            HostCommand::Search(term) => self.forward_search(&term),
            HostCommand::SearchFocus(focused) => {
                self.set_floating_mode(FloatingMode::from_focus(focused));
            }
            HostCommand::ThemeChanged(dark) => {
                self.on_renderer_theme(role, Theme::from_dark(dark));
            }
            HostCommand::OpenPdf => match platform.pick_pdf() {
                Some(path) => info!(path = %path.display(), "PDF selected"),
                None => debug!("PDF picker dismissed"),
            },
            HostCommand::OpenLink => {
                if let Err(e) = platform.open_external(&self.settings.external_url) {
                    warn!(url = %self.settings.external_url, error = %e, "failed to open link");
                }
            }
        }
    }

    fn toggle_maximize(&self) {
        let Some(main) = &self.main else {
            return;
        };
        let maximized = !main.is_maximized();
        main.set_maximized(maximized);
        if let Err(e) = main.post(Channel::WindowMaximizedState, &json!(maximized)) {
            warn!(error = %e, "failed to report maximized state");
        }
    }

    fn forward_search(&self, term: &str) {
        let Some(main) = &self.main else {
            return;
        };
        main.show();
        main.focus();
        if let Err(e) = main.post(Channel::PerformSearch, &json!(term)) {
            warn!(error = %e, "failed to forward search");
        }
    }

    fn set_floating_mode(&mut self, mode: FloatingMode) {
        let Some(floating) = &self.floating else {
            return;
        };
        let (width, height) = self.settings.floating_size(mode);
        floating.resize(width, height);
        let payload = json!({ "expanded": mode.is_expanded() });
        if let Err(e) = floating.post(Channel::UpdateUi, &payload) {
            warn!(error = %e, "failed to send update-ui");
        }
        self.floating_mode = mode;
    }

    /// Theme changes flow from the main window to the floating window only,
    /// whether they come from IPC or from reading the page on load.
    pub(super) fn on_renderer_theme(&mut self, role: WindowRole, theme: Theme) {
        match role {
            WindowRole::Main => {
                self.theme = Some(theme);
                self.relay_theme(theme);
            }
            WindowRole::Floating => {
                debug!(%theme, "theme change from floating window; not relayed");
            }
        }
    }
}
