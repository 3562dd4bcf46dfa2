//! Tab-management commands.

use std::sync::Arc;

use omni_common::events::Event;
use omni_common::types::Size;
use omni_common::{TabId, ViewError};
use omni_layout::{Bands, LayoutMode};
use tracing::{debug, info, warn};

use super::ViewController;
use crate::content::is_internal_url;
use crate::engine::{BrowsingContext, ContextFactory};
use crate::inject::WEBDRIVER_SHIM;

/// One discrete request from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    AddTab {
        id: TabId,
        url: String,
        incognito: bool,
    },
    SwitchTo(TabId),
    ToggleSplit,
    RemoveTab(TabId),
    Reload(TabId),
    ReloadAll,
    HideAll,
    ShowCurrent(Option<TabId>),
    Broadcast(String),
    UpdateBands {
        header: u32,
        footer: u32,
    },
    Resize(Size),
}

impl<F: ContextFactory> ViewController<F> {
    pub fn execute(&mut self, command: ViewCommand) -> Result<(), ViewError> {
        if self.shut_down {
            debug!(?command, "command ignored after shutdown");
            return Ok(());
        }
        match command {
            ViewCommand::AddTab { id, url, incognito } => self.add_tab(id, &url, incognito)?,
            ViewCommand::SwitchTo(id) => self.switch_to(&id),
            ViewCommand::ToggleSplit => self.toggle_split(),
            ViewCommand::RemoveTab(id) => self.remove_tab(&id),
            ViewCommand::Reload(id) => self.reload(&id),
            ViewCommand::ReloadAll => self.reload_all(),
            ViewCommand::HideAll => self.hide_all(),
            ViewCommand::ShowCurrent(id) => self.show_current(id.as_ref()),
            ViewCommand::Broadcast(text) => {
                self.broadcast(&text);
            }
            ViewCommand::UpdateBands { header, footer } => self.update_bands(header, footer),
            ViewCommand::Resize(size) => self.resize(size),
        }
        Ok(())
    }

    /// Open a new tab. A duplicate id is an error; callers activate the
    /// existing tab instead. In split mode the new tab takes the secondary
    /// slot, replacing whatever was there.
    pub fn add_tab(&mut self, id: TabId, url: &str, incognito: bool) -> Result<(), ViewError> {
        let session = self.registry.create(
            id.clone(),
            url,
            incognito,
            self.init_scripts.clone(),
            Arc::clone(&self.policy),
        )?;
        if let Err(e) = session.context.evaluate(WEBDRIVER_SHIM) {
            debug!(tab = %id, error = %e, "shim injection failed");
        }

        match self.mode {
            LayoutMode::Single => self.slots.primary = Some(id.clone()),
            LayoutMode::Split => {
                self.slots.secondary = Some(id.clone());
                if self.slots.primary.is_none() {
                    self.slots.primary = Some(id.clone());
                }
                self.slots.normalize();
            }
        }

        self.overlay = false;
        info!(tab = %id, incognito, mode = ?self.mode, "tab added");
        self.event_bus.publish(Event::TabOpened(id));
        self.relayout();
        Ok(())
    }

    /// Bring a tab into view. The primary slot is never displaced in split
    /// mode. Unknown ids are ignored.
    pub fn switch_to(&mut self, id: &TabId) {
        if !self.registry.contains(id) {
            debug!(tab = %id, "switch to unknown tab ignored");
            return;
        }

        match self.mode {
            LayoutMode::Single => self.slots.primary = Some(id.clone()),
            LayoutMode::Split => {
                if self.slots.primary.is_none() {
                    self.slots.primary = Some(id.clone());
                } else if !self.slots.contains(id) {
                    self.slots.secondary = Some(id.clone());
                }
                self.slots.normalize();
            }
        }

        self.overlay = false;
        self.relayout();

        if let Some(session) = self.registry.get(id) {
            if let Err(e) = session.context.focus() {
                debug!(tab = %id, error = %e, "focus failed");
            }
        }
        debug!(tab = %id, "tab activated");
        self.event_bus.publish(Event::TabActivated(id.clone()));
    }

    /// Flip between single and split. Entering split needs two tabs; with
    /// fewer the request is refused and the shell is told to resync.
    pub fn toggle_split(&mut self) {
        match self.mode {
            LayoutMode::Single => {
                if self.registry.len() < 2 {
                    info!(tabs = self.registry.len(), "split refused");
                    self.event_bus
                        .publish(Event::SplitStateForced { active: false });
                    return;
                }
                self.mode = LayoutMode::Split;
                if self.slots.primary.is_none() {
                    self.slots.primary = self.registry.ids().first().cloned();
                }
                if self.slots.secondary.is_none() {
                    let primary = self.slots.primary.clone();
                    self.slots.secondary = self
                        .registry
                        .ids()
                        .iter()
                        .find(|id| Some(*id) != primary.as_ref())
                        .cloned();
                }
                self.slots.normalize();
            }
            LayoutMode::Split => {
                self.mode = LayoutMode::Single;
                self.slots.secondary = None;
            }
        }
        info!(mode = ?self.mode, primary = ?self.slots.primary, secondary = ?self.slots.secondary, "layout mode changed");
        self.relayout();
    }

    /// Close a tab. Removing the primary in split mode promotes the
    /// secondary. Below two tabs split mode ends on its own.
    pub fn remove_tab(&mut self, id: &TabId) {
        if !self.registry.contains(id) {
            debug!(tab = %id, "remove of unknown tab ignored");
            return;
        }
        let was_split = self.mode.is_split();

        if self.slots.is_primary(id) {
            self.slots.primary = None;
            if was_split {
                self.slots.primary = self.slots.secondary.take();
            }
        } else if self.slots.is_secondary(id) {
            self.slots.secondary = None;
        }

        self.registry.remove(id);

        if self.registry.len() < 2 {
            self.mode = LayoutMode::Single;
            self.slots.secondary = None;
            if let [only] = self.registry.ids() {
                self.slots.primary = Some(only.clone());
            }
            if was_split {
                info!(tabs = self.registry.len(), "split mode ended by tab removal");
                self.event_bus
                    .publish(Event::SplitStateForced { active: false });
            }
        }

        info!(tab = %id, remaining = self.registry.len(), "tab removed");
        self.event_bus.publish(Event::TabClosed(id.clone()));
        self.relayout();
    }

    /// Reload one tab. A tab showing an internal error page goes back to
    /// the address it was opened with.
    pub fn reload(&mut self, id: &TabId) {
        let Some(session) = self.registry.get_mut(id) else {
            debug!(tab = %id, "reload of unknown tab ignored");
            return;
        };
        let result = if is_internal_url(&session.current_url) {
            let home = session.home_url.clone();
            session.context.load_url(&home)
        } else {
            session.context.reload()
        };
        if let Err(e) = result {
            warn!(tab = %id, error = %e, "reload failed");
        }
    }

    pub fn reload_all(&mut self) {
        let ids = self.registry.ids().to_vec();
        for id in &ids {
            self.reload(id);
        }
        info!(tabs = ids.len(), "all tabs reloaded");
    }

    pub fn hide_all(&mut self) {
        self.overlay = true;
        debug!("overlay shown, contexts hidden");
        self.relayout();
    }

    pub fn show_current(&mut self, id: Option<&TabId>) {
        self.overlay = false;
        match id {
            Some(id) if self.registry.contains(id) && !self.slots.contains(id) => {
                self.switch_to(id)
            }
            _ => self.relayout(),
        }
    }

    /// Type `text` into every tab and submit it. Returns how many tabs the
    /// script was delivered to.
    pub fn broadcast(&mut self, text: &str) -> usize {
        if text.trim().is_empty() {
            return 0;
        }
        let mut delivered = 0;
        for session in self.registry.iter() {
            let script = self.strategies.script_for(&session.current_url, text);
            match session.context.evaluate(&script) {
                Ok(()) => delivered += 1,
                Err(e) => debug!(tab = %session.id, error = %e, "broadcast injection failed"),
            }
        }
        info!(delivered, tabs = self.registry.len(), "prompt broadcast");
        delivered
    }

    pub fn update_bands(&mut self, header: u32, footer: u32) {
        let bands = Bands { header, footer };
        if self.engine.bands == bands {
            return;
        }
        self.engine.bands = bands;
        debug!(header, footer, "bands updated");
        self.relayout();
    }

    pub fn resize(&mut self, size: Size) {
        if self.window == size {
            return;
        }
        self.window = size;
        self.relayout();
    }
}
