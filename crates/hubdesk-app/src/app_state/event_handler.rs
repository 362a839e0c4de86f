//! `ApplicationHandler` implementation for the winit event loop.

use std::path::Path;

use hubdesk_common::WindowRole;
use hubdesk_webview::{AppShellState, ShellEvent};
use tracing::info;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::HubdeskApp;
use super::platform::WryPlatform;
use super::window::WryWindow;
use crate::tray;

impl ApplicationHandler for HubdeskApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        self.tray = tray::create_tray(&self.config.tray, Path::new(&self.config.assets.dir));
        self.with_platform(event_loop, |shell, platform| shell.start(platform));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(&role) = self.roles.get(&window_id) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                info!(%role, "window close requested");
                self.roles.remove(&window_id);
                self.dispatch(event_loop, ShellEvent::CloseRequested { role });
                self.quit_if_unreachable(event_loop);
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(window) = self.window_for(role) {
                        window.fit_webview();
                    }
                }
            }

            WindowEvent::Destroyed => {
                self.roles.remove(&window_id);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shell.is_quitting() {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

impl HubdeskApp {
    /// Run `f` with the shell and a platform borrowed from this callback.
    pub(super) fn with_platform<R>(
        &mut self,
        event_loop: &ActiveEventLoop,
        f: impl FnOnce(&mut AppShellState<WryWindow>, &mut WryPlatform<'_>) -> R,
    ) -> R {
        let Self {
            shell, ctx, roles, ..
        } = self;
        let mut platform = WryPlatform {
            event_loop,
            ctx,
            roles,
        };
        f(shell, &mut platform)
    }

    pub(super) fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: ShellEvent) {
        self.with_platform(event_loop, |shell, platform| shell.handle(event, platform));
    }

    /// Without a tray and with no window left, nothing can bring the app
    /// back, so exit.
    fn quit_if_unreachable(&mut self, event_loop: &ActiveEventLoop) {
        if self.tray.is_some() {
            return;
        }
        let any_window =
            self.shell.has_window(WindowRole::Main) || self.shell.has_window(WindowRole::Floating);
        if !any_window {
            info!("last window closed and no tray, quitting");
            self.with_platform(event_loop, |shell, platform| shell.shutdown(platform));
        }
    }
}
