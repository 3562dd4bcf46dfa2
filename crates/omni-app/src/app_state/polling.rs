//! Event draining and wake-up scheduling.

use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use omni_views::ShellEvent;

use super::core::OmniApp;
use super::types::POLL_INTERVAL;

impl OmniApp {
    /// Run polling and schedule the next wake-up: the poll interval or the
    /// geometry save deadline, whichever comes first.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_shell_events();
            self.poll_view_events();
            self.forward_controller_events();
        }

        if self.geometry_save.take_due(now) {
            self.flush_geometry();
        }

        let mut wake = Instant::now() + POLL_INTERVAL;
        if let Some(deadline) = self.geometry_save.deadline() {
            wake = wake.min(deadline);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
    }

    fn poll_shell_events(&mut self) {
        for event in self.shell_events.drain() {
            match event {
                ShellEvent::Ipc { body } => self.handle_ipc(&body),
                ShellEvent::Loaded { url } => tracing::debug!(url = %url, "shell page loaded"),
            }
        }
    }

    fn poll_view_events(&mut self) {
        if let Some(ref mut controller) = self.controller {
            let handled = controller.pump_events();
            if handled > 0 {
                tracing::trace!(handled, "engine events handled");
            }
        }
    }
}
