//! Window geometry: restore at startup, debounced save while running.

use std::path::Path;
use std::time::{Duration, Instant};

use winit::dpi::{LogicalPosition, LogicalSize};
use winit::window::Window;

use omni_common::types::Size;
use omni_config::schema::WindowConfig;
use omni_config::state::{self, ObservedBounds};
use omni_config::WindowGeometry;

use super::core::OmniApp;

// =============================================================================
// DEBOUNCE
// =============================================================================

/// Fires once after `quiet` has elapsed since the last `touch`.
#[derive(Debug, Clone)]
pub(super) struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub(super) fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub(super) fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub(super) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub(super) fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the pending deadline if it has passed.
    pub(super) fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub(super) fn clear(&mut self) {
        self.deadline = None;
    }
}

// =============================================================================
// RESTORE
// =============================================================================

/// Saved geometry, or the configured first-run size when nothing usable is
/// on disk. Always at least the configured minimum.
pub(super) fn load_geometry(path: &Path, window: &WindowConfig) -> WindowGeometry {
    let saved = if path.exists() {
        match state::read_json::<WindowGeometry>(path) {
            Ok(geometry) => Some(geometry),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring saved window geometry");
                None
            }
        }
    } else {
        None
    };
    saved
        .unwrap_or_else(|| {
            WindowGeometry::first_run(
                window.default_width,
                window.default_height,
                window.start_maximized,
            )
        })
        .clamped(window.min_width, window.min_height)
}

/// Current window size in logical pixels.
pub(super) fn logical_size(window: &Window) -> Size {
    let size: LogicalSize<u32> = window.inner_size().to_logical(window.scale_factor());
    Size::new(size.width, size.height)
}

/// What the window reports now. `None` while minimized; a minimized
/// window's size is not worth saving.
fn observe(window: &Window, previous: &WindowGeometry) -> Option<ObservedBounds> {
    if window.is_minimized() == Some(true) {
        return None;
    }
    let size = logical_size(window);
    if size.width == 0 || size.height == 0 {
        return None;
    }
    let scale = window.scale_factor();
    let (x, y) = match window.outer_position() {
        Ok(pos) => {
            let pos: LogicalPosition<i32> = pos.to_logical(scale);
            (pos.x, pos.y)
        }
        Err(_) => (previous.x.unwrap_or(0), previous.y.unwrap_or(0)),
    };
    Some(ObservedBounds {
        x,
        y,
        width: size.width,
        height: size.height,
        is_maximized: window.is_maximized(),
    })
}

// =============================================================================
// SAVE
// =============================================================================

impl OmniApp {
    /// Record the window's current bounds and restart the quiet period.
    pub(super) fn note_geometry_change(&mut self) {
        let Some(ref window) = self.window else {
            return;
        };
        if let Some(observed) = observe(window, &self.geometry) {
            self.geometry = self.geometry.update(observed);
            self.geometry_save.touch(Instant::now());
        }
    }

    pub(super) fn flush_geometry(&mut self) {
        self.geometry_save.clear();
        let path = self.paths.window_state_file();
        match state::write_json_atomic(&path, &self.geometry) {
            Ok(()) => tracing::debug!(path = %path.display(), "window geometry saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save window geometry"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
