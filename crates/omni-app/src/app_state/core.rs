//! OmniApp struct definition and constructor.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use winit::window::Window;

use omni_common::Event;
use omni_config::{OmniConfig, WindowGeometry};
use omni_platform::AppPaths;
use omni_views::backend::{ShellView, WryFactory};
use omni_views::{EventQueue, ShellEvent, ViewController};

use super::geometry::Debounce;

pub(super) type Controller = ViewController<WryFactory<Window>>;

/// Top-level application state.
pub struct OmniApp {
    pub(super) config: OmniConfig,
    pub(super) paths: AppPaths,
    /// `--fresh`: do not restore the saved tab list.
    pub(super) fresh: bool,

    // Windowing
    pub(super) window: Option<Arc<Window>>,

    // Views: the shell page underneath, AI contexts on top
    pub(super) shell: Option<ShellView>,
    pub(super) shell_events: EventQueue<ShellEvent>,
    pub(super) controller: Option<Controller>,
    pub(super) bus_rx: Option<broadcast::Receiver<Event>>,

    // Geometry persistence
    pub(super) geometry: WindowGeometry,
    pub(super) geometry_save: Debounce,

    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl OmniApp {
    pub fn new(config: OmniConfig, paths: AppPaths, fresh: bool) -> Self {
        let quiet = Duration::from_millis(u64::from(config.persistence.geometry_debounce_ms));
        Self {
            config,
            paths,
            fresh,
            window: None,
            shell: None,
            shell_events: EventQueue::new(),
            controller: None,
            bus_rx: None,
            geometry: WindowGeometry::default(),
            geometry_save: Debounce::new(quiet),
            should_exit: false,
            last_poll: Instant::now(),
        }
    }

    /// Restore the saved tab list on the shell's first handshake.
    pub(super) fn restores_tabs(&self) -> bool {
        !self.fresh && self.config.persistence.restore_tabs
    }
}
