//! Event draining and wake-up scheduling.

use std::time::Instant;

use hubdesk_common::WindowRole;
use hubdesk_webview::{LoadFailure, ShellEvent, TrayAction};
use tracing::debug;
use tray_icon::menu::MenuEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::HubdeskApp;
use super::types::{ProbeOutcome, WebEvent, POLL_INTERVAL};
use super::window::WryWindow;

impl HubdeskApp {
    /// Feed pending events to the shell, run due timers, and schedule the
    /// next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        for event in self.collect_events() {
            self.dispatch(event_loop, event);
        }
        self.with_platform(event_loop, |shell, platform| shell.tick(platform));

        if self.shell.is_quitting() {
            event_loop.exit();
            return;
        }

        let mut wake = Instant::now() + POLL_INTERVAL;
        if let Some(deadline) = self.shell.next_deadline() {
            wake = wake.min(deadline);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
    }

    pub(super) fn window_for(&self, role: WindowRole) -> Option<&WryWindow> {
        match role {
            WindowRole::Main => self.shell.main_window(),
            WindowRole::Floating => self.shell.floating_window(),
        }
    }

    fn collect_events(&mut self) -> Vec<ShellEvent> {
        let mut events = Vec::new();

        while let Ok(menu_event) = MenuEvent::receiver().try_recv() {
            match TrayAction::from_id(&menu_event.id.0) {
                Some(action) => events.push(ShellEvent::Tray(action)),
                None => debug!(id = %menu_event.id.0, "unknown tray menu id"),
            }
        }

        while let Ok(outcome) = self.probe_rx.try_recv() {
            if let Some(event) = self.resolve_probe(outcome) {
                events.push(event);
            }
        }

        for event in self.ctx.drain() {
            match event {
                WebEvent::Shell(event) => events.push(event),
                WebEvent::PageFinished(role) => {
                    if self.window_for(role).is_some_and(WryWindow::take_awaiting) {
                        events.push(ShellEvent::PageLoaded { role });
                    }
                }
            }
        }

        events
    }

    /// Navigate on a live probe; report anything else as a load failure.
    fn resolve_probe(&self, outcome: ProbeOutcome) -> Option<ShellEvent> {
        let role = outcome.role;
        let Some(window) = self.window_for(role) else {
            debug!(%role, url = %outcome.url, "probe result for closed window");
            return None;
        };

        if !window.is_current_load(outcome.seq) {
            debug!(%role, seq = outcome.seq, "probe superseded by a newer load");
            return Some(ShellEvent::LoadFailed {
                role,
                failure: LoadFailure::Aborted,
            });
        }

        if outcome.reachable {
            window.navigate(&outcome.url);
            None
        } else {
            Some(ShellEvent::LoadFailed {
                role,
                failure: LoadFailure::Unreachable(format!("{} did not respond", outcome.url)),
            })
        }
    }
}
