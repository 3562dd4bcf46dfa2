//! View lifecycle controller.
//!
//! Owns the session registry, the slot assignment and the layout mode.
//! Every mutation goes through one of the command methods and ends with a
//! re-layout, so the visible geometry always matches the slots.
//!
//! Invariants held after every command:
//! - single mode has no `secondary`
//! - split mode requires at least two sessions
//! - `primary` and `secondary` reference live sessions and never the same one

mod commands;
mod context_events;


use std::sync::Arc;

use omni_common::events::{Event, EventBus};
use omni_common::types::Size;
use omni_common::TabId;
use omni_config::schema::{BroadcastConfig, DetectionConfig};
use omni_config::OmniConfig;
use omni_layout::{Bands, LayoutEngine, LayoutMode, Slots};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::engine::ContextFactory;
use crate::events::{EventQueue, TabEvent};
use crate::inject::{self, StrategySet};
use crate::policy::NetworkPolicy;
use crate::registry::SessionRegistry;

pub use commands::ViewCommand;

/// Controller knobs taken from the config file.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub bands: Bands,
    pub partition_prefix: String,
    pub dark_flash_fix: bool,
    pub detection: DetectionConfig,
    pub broadcast: BroadcastConfig,
    pub policy: NetworkPolicy,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&OmniConfig::default())
    }
}

impl From<&OmniConfig> for ControllerSettings {
    fn from(config: &OmniConfig) -> Self {
        Self {
            bands: Bands {
                header: config.layout.header_height,
                footer: config.layout.footer_height,
            },
            partition_prefix: config.sessions.partition_prefix.clone(),
            dark_flash_fix: config.sessions.dark_flash_fix,
            detection: config.detection.clone(),
            broadcast: config.broadcast.clone(),
            policy: NetworkPolicy::from_config(&config.policy),
        }
    }
}

pub struct ViewController<F: ContextFactory> {
    registry: SessionRegistry<F>,
    slots: Slots,
    mode: LayoutMode,
    engine: LayoutEngine,
    window: Size,
    /// Set while the shell shows a full-window dialog.
    overlay: bool,
    init_scripts: Vec<String>,
    probe_script: Option<String>,
    strategies: StrategySet,
    policy: Arc<NetworkPolicy>,
    event_bus: EventBus,
    /// Shared with the factory's engine callbacks.
    events: EventQueue<TabEvent>,
    shut_down: bool,
}

impl<F: ContextFactory> ViewController<F> {
    pub fn new(
        factory: F,
        settings: ControllerSettings,
        events: EventQueue<TabEvent>,
        window: Size,
    ) -> Self {
        if !factory.supports_header_interception() {
            info!(
                stripped = ?settings.policy.stripped_headers(),
                "engine cannot rewrite response headers; network policy not enforced"
            );
        }
        let probe_script = settings
            .detection
            .probe_blocked_pages
            .then(|| inject::blocked_probe_script(&settings.detection.blocked_markers));

        Self {
            registry: SessionRegistry::new(factory, settings.partition_prefix),
            slots: Slots::default(),
            mode: LayoutMode::Single,
            engine: LayoutEngine {
                bands: settings.bands,
            },
            window,
            overlay: false,
            init_scripts: inject::init_scripts(settings.dark_flash_fix),
            probe_script,
            strategies: StrategySet::from_config(&settings.broadcast),
            policy: Arc::new(settings.policy),
            event_bus: EventBus::new(256),
            events,
            shut_down: false,
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn is_split(&self) -> bool {
        self.mode.is_split()
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn bands(&self) -> Bands {
        self.engine.bands
    }

    pub fn window_size(&self) -> Size {
        self.window
    }

    pub fn overlay_active(&self) -> bool {
        self.overlay
    }

    pub fn registry(&self) -> &SessionRegistry<F> {
        &self.registry
    }

    pub fn tab_ids(&self) -> &[TabId] {
        self.registry.ids()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe()
    }

    /// Producer handle for engine callbacks.
    pub fn event_queue(&self) -> EventQueue<TabEvent> {
        self.events.clone()
    }

    // =========================================================================
    // LAYOUT
    // =========================================================================

    /// Detach every attached context, then attach the slots' placements.
    /// While the overlay is up everything stays detached.
    pub(crate) fn relayout(&mut self) {
        let attached = self.registry.attached_ids();
        if self.overlay {
            for id in &attached {
                if let Err(e) = self.registry.detach(id) {
                    warn!(tab = %id, error = %e, "detach failed");
                }
            }
            self.debug_check();
            return;
        }

        let plan = self
            .engine
            .plan(self.mode, &self.slots, self.window, &attached);
        for id in &plan.detach {
            if let Err(e) = self.registry.detach(id) {
                warn!(tab = %id, error = %e, "detach failed");
            }
        }
        for placement in plan.attach {
            if let Err(e) = self.registry.attach(&placement.id, placement.rect) {
                warn!(tab = %placement.id, error = %e, "attach failed");
            }
        }
        self.debug_check();
    }

    // =========================================================================
    // INVARIANTS
    // =========================================================================

    /// Describe the first broken slot/mode invariant, if any.
    pub fn check_invariants(&self) -> Result<(), String> {
        if !self.mode.is_split() && self.slots.secondary.is_some() {
            return Err("secondary set in single mode".into());
        }
        if self.mode.is_split() && self.registry.len() < 2 {
            return Err(format!("split mode with {} sessions", self.registry.len()));
        }
        if self.slots.secondary.is_some() && self.registry.len() < 2 {
            return Err("secondary set with fewer than two sessions".into());
        }
        if self.slots.primary.is_some() && self.slots.primary == self.slots.secondary {
            return Err("primary and secondary are the same tab".into());
        }
        for id in [&self.slots.primary, &self.slots.secondary].into_iter().flatten() {
            if !self.registry.contains(id) {
                return Err(format!("slot references missing tab {id}"));
            }
        }
        Ok(())
    }

    fn debug_check(&self) {
        if let Err(problem) = self.check_invariants() {
            debug_assert!(false, "{problem}");
            warn!(problem, "view controller invariant broken");
        }
    }

    // =========================================================================
    // SHUTDOWN
    // =========================================================================

    /// Destroy every context. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.overlay = false;
        self.slots.clear();
        self.mode = LayoutMode::Single;
        let count = self.registry.len();
        self.registry.clear();
        self.events.drain();
        self.event_bus.publish(Event::Shutdown);
        info!(sessions = count, "view controller shut down");
    }
}
