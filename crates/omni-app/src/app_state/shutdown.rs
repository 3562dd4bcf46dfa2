//! Graceful shutdown: save geometry, destroy contexts, close the window.

use super::core::OmniApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl OmniApp {
    /// Perform graceful shutdown. Safe to call more than once.
    ///
    /// Order matters:
    /// 1. Save window geometry (needs the live window)
    /// 2. Destroy AI contexts (controller drops every session)
    /// 3. Drop the shell page
    /// 4. Release the window
    pub(super) fn shutdown(&mut self) {
        if self.should_exit {
            return;
        }
        tracing::info!("Initiating graceful shutdown");

        // 1. Flush geometry unconditionally while the window still exists
        if self.window.is_some() {
            tracing::debug!(
                pending = self.geometry_save.is_pending(),
                "flushing window geometry"
            );
            self.note_geometry_change();
            self.flush_geometry();
        }

        // 2. Destroy all AI contexts
        if let Some(mut controller) = self.controller.take() {
            controller.shutdown();
        }
        self.bus_rx = None;

        // 3. Drop the shell page and anything it still had queued
        self.shell = None;
        self.shell_events.drain();

        // 4. Release the window
        self.window = None;

        self.should_exit = true;
        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
