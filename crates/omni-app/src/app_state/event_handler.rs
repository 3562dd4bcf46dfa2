//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use omni_views::ViewCommand;

use super::core::OmniApp;
use super::geometry::logical_size;

impl ApplicationHandler for OmniApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.sync_view_bounds();
                    self.note_geometry_change();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                self.sync_view_bounds();
            }

            WindowEvent::Moved(_) => {
                self.note_geometry_change();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl OmniApp {
    /// Fit the shell to the window and re-layout the AI contexts.
    fn sync_view_bounds(&mut self) {
        let Some(ref window) = self.window else {
            return;
        };
        let size = logical_size(window);
        if let Some(ref shell) = self.shell {
            if let Err(e) = shell.resize(size) {
                tracing::warn!(error = %e, "failed to resize shell");
            }
        }
        if let Some(ref mut controller) = self.controller {
            if let Err(e) = controller.execute(ViewCommand::Resize(size)) {
                tracing::warn!(error = %e, "failed to resize views");
            }
        }
    }
}
