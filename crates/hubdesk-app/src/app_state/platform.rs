//! `ShellPlatform` over winit + wry, borrowed for one event-loop callback.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use hubdesk_common::{WindowError, WindowRole};
use hubdesk_webview::{ShellPlatform, WindowSpec};
use tracing::info;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{WindowAttributes, WindowId, WindowLevel};

use super::types::WindowContext;
use super::webview::build_webview;
use super::window::WryWindow;
use crate::desktop;

pub(super) struct WryPlatform<'a> {
    pub event_loop: &'a ActiveEventLoop,
    pub ctx: &'a WindowContext,
    /// Which shell role each native window plays.
    pub roles: &'a mut HashMap<WindowId, WindowRole>,
}

/// winit attributes for a shell window.
pub(super) fn window_attributes(spec: &WindowSpec) -> WindowAttributes {
    let level = if spec.always_on_top {
        WindowLevel::AlwaysOnTop
    } else {
        WindowLevel::Normal
    };
    WindowAttributes::default()
        .with_title(spec.title.clone())
        .with_inner_size(LogicalSize::new(spec.width, spec.height))
        .with_decorations(!spec.frameless)
        .with_resizable(spec.resizable)
        .with_window_level(level)
}

impl ShellPlatform for WryPlatform<'_> {
    type Window = WryWindow;

    fn create_window(&mut self, spec: &WindowSpec) -> Result<WryWindow, WindowError> {
        let window = self
            .event_loop
            .create_window(window_attributes(spec))
            .map_err(|e| WindowError::Create(e.to_string()))?;
        let window = Arc::new(window);

        let webview = build_webview(&window, spec.role, spec.devtools, self.ctx)
            .map_err(|e| WindowError::Create(format!("webview: {e}")))?;

        self.roles.retain(|_, role| *role != spec.role);
        self.roles.insert(window.id(), spec.role);
        info!(role = %spec.role, width = spec.width, height = spec.height, "window created");
        Ok(WryWindow::new(webview, window, spec.role, self.ctx.clone()))
    }

    fn pick_pdf(&mut self) -> Option<PathBuf> {
        desktop::pick_pdf()
    }

    fn open_external(&mut self, url: &str) -> Result<(), WindowError> {
        desktop::open_in_shell(url).map_err(WindowError::Load)
    }

    fn quit(&mut self) {
        info!("exiting event loop");
        self.event_loop.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(role: WindowRole, on_top: bool) -> WindowSpec {
        WindowSpec {
            role,
            title: "Hubdesk".into(),
            width: 420,
            height: 64,
            frameless: true,
            always_on_top: on_top,
            resizable: false,
            devtools: false,
        }
    }

    #[test]
    fn frameless_spec_disables_decorations() {
        let attrs = window_attributes(&spec(WindowRole::Floating, true));
        assert!(!attrs.decorations);
        assert!(!attrs.resizable);
        assert_eq!(attrs.window_level, WindowLevel::AlwaysOnTop);
        assert_eq!(attrs.title, "Hubdesk");
    }

    #[test]
    fn normal_level_when_not_pinned() {
        let attrs = window_attributes(&spec(WindowRole::Main, false));
        assert_eq!(attrs.window_level, WindowLevel::Normal);
    }
}
