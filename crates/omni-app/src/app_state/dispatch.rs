//! Routes shell control messages to the view controller and the
//! persisted tab list.

use std::path::Path;

use omni_common::TabId;
use omni_config::state;
use omni_config::{OmniConfig, SessionSnapshot};
use omni_views::protocol::{CatalogEntry, ControlMessage, RestoredTab, ShellSignal};
use omni_views::ViewCommand;

use super::core::OmniApp;

/// What a control message turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Reaction {
    Command(ViewCommand),
    /// The shell page (re)loaded and wants its initial data.
    Handshake,
    SaveTabs(SessionSnapshot),
    /// Close every tab and save an empty tab list.
    Reset,
}

/// Map one control message. `open` lists the tabs the controller holds,
/// so a repeated `add-ai` activates the existing tab instead.
pub(super) fn translate(message: ControlMessage, open: &[TabId]) -> Reaction {
    let command = match message {
        ControlMessage::UpdateLayout(bands) => ViewCommand::UpdateBands {
            header: bands.header_height,
            footer: bands.footer_height,
        },
        ControlMessage::AddAi(add) if open.contains(&add.id) => {
            tracing::warn!(tab = %add.id, "add-ai for an open tab, switching to it");
            ViewCommand::SwitchTo(add.id)
        }
        ControlMessage::AddAi(add) => ViewCommand::AddTab {
            id: add.id,
            url: add.url,
            incognito: add.is_incognito,
        },
        ControlMessage::SwitchTab(id) => ViewCommand::SwitchTo(id),
        ControlMessage::ToggleSplit => ViewCommand::ToggleSplit,
        ControlMessage::RemoveAi(id) => ViewCommand::RemoveTab(id),
        ControlMessage::ReloadAi(id) => ViewCommand::Reload(id),
        ControlMessage::ReloadAll => ViewCommand::ReloadAll,
        ControlMessage::HideCurrentView => ViewCommand::HideAll,
        ControlMessage::ShowCurrentView(id) => ViewCommand::ShowCurrent(id),
        ControlMessage::BroadcastPrompt(text) => ViewCommand::Broadcast(text),
        ControlMessage::ShellReady => return Reaction::Handshake,
        ControlMessage::ResetTabs => return Reaction::Reset,
        ControlMessage::TabsChanged(changed) => {
            let mut snapshot = SessionSnapshot {
                tabs: changed.tabs,
                active: changed.active,
            };
            snapshot.dedup();
            return Reaction::SaveTabs(snapshot);
        }
    };
    Reaction::Command(command)
}

/// The replies to `shell-ready`: the launcher catalog, then the tabs to
/// reopen (none when `restore` is off).
pub(super) fn handshake_signals(
    config: &OmniConfig,
    tabs_file: &Path,
    restore: bool,
) -> [ShellSignal; 2] {
    let catalog = ShellSignal::Catalog(config.services.iter().map(CatalogEntry::from).collect());

    let snapshot = if restore {
        let mut snapshot: SessionSnapshot = state::read_json_or_default(tabs_file);
        snapshot.dedup();
        snapshot
    } else {
        SessionSnapshot::default()
    };
    let restore = ShellSignal::RestoreTabs {
        tabs: snapshot.tabs.iter().map(RestoredTab::from).collect(),
        active: snapshot.resolve_active(),
    };
    [catalog, restore]
}

impl OmniApp {
    /// Handle one raw IPC body from the shell page.
    pub(super) fn handle_ipc(&mut self, body: &str) {
        match ControlMessage::parse(body) {
            Ok(message) => self.dispatch(message),
            Err(e) => tracing::warn!(error = %e, "IPC message rejected"),
        }
    }

    pub(super) fn dispatch(&mut self, message: ControlMessage) {
        let open = self
            .controller
            .as_ref()
            .map(|c| c.tab_ids())
            .unwrap_or_default();
        match translate(message, open) {
            Reaction::Command(command) => {
                let Some(ref mut controller) = self.controller else {
                    tracing::debug!(?command, "no controller, command dropped");
                    return;
                };
                if let Err(e) = controller.execute(command) {
                    tracing::warn!(error = %e, "view command failed");
                }
            }
            Reaction::Handshake => self.send_handshake(),
            Reaction::SaveTabs(snapshot) => self.save_tabs(&snapshot),
            Reaction::Reset => self.reset_tabs(),
        }
    }

    /// Close every open tab and forget the saved list. The shell reloads
    /// itself afterwards and gets an empty restore on `shell-ready`.
    fn reset_tabs(&mut self) {
        if let Some(ref mut controller) = self.controller {
            for id in controller.tab_ids().to_vec() {
                if let Err(e) = controller.execute(ViewCommand::RemoveTab(id)) {
                    tracing::warn!(error = %e, "tab removal during reset failed");
                }
            }
        }
        self.save_tabs(&SessionSnapshot::default());
        tracing::info!("tabs reset to defaults");
    }

    fn send_handshake(&self) {
        let signals = handshake_signals(&self.config, &self.paths.tabs_file(), self.restores_tabs());
        for signal in &signals {
            self.send_to_shell(signal);
        }
    }

    pub(super) fn save_tabs(&self, snapshot: &SessionSnapshot) {
        let path = self.paths.tabs_file();
        match state::write_json_atomic(&path, snapshot) {
            Ok(()) => tracing::debug!(tabs = snapshot.tabs.len(), "tab list saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save tab list"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::core::test_support::app_in;
    use omni_config::TabRecord;

    fn parse(body: &str) -> ControlMessage {
        ControlMessage::parse(body).unwrap()
    }

    #[test]
    fn add_ai_opens_new_tab() {
        let msg = parse(
            r#"{"kind":"add-ai","payload":{"id":"grok-incog","url":"https://grok.com","isIncognito":true}}"#,
        );
        assert_eq!(
            translate(msg, &[]),
            Reaction::Command(ViewCommand::AddTab {
                id: TabId::from("grok-incog"),
                url: "https://grok.com".into(),
                incognito: true,
            })
        );
    }

    #[test]
    fn duplicate_add_ai_switches_instead() {
        let msg = parse(r#"{"kind":"add-ai","payload":{"id":"grok","url":"https://grok.com"}}"#);
        assert_eq!(
            translate(msg, &[TabId::from("grok")]),
            Reaction::Command(ViewCommand::SwitchTo(TabId::from("grok")))
        );
    }

    #[test]
    fn layout_and_visibility_messages() {
        assert_eq!(
            translate(
                parse(r#"{"kind":"update-layout","payload":{"headerHeight":64,"footerHeight":8}}"#),
                &[]
            ),
            Reaction::Command(ViewCommand::UpdateBands {
                header: 64,
                footer: 8
            })
        );
        assert_eq!(
            translate(parse(r#"{"kind":"hide-current-view"}"#), &[]),
            Reaction::Command(ViewCommand::HideAll)
        );
        assert_eq!(
            translate(parse(r#"{"kind":"show-current-view","payload":{"id":"a"}}"#), &[]),
            Reaction::Command(ViewCommand::ShowCurrent(Some(TabId::from("a"))))
        );
        assert_eq!(
            translate(parse(r#"{"kind":"reload-all-ais"}"#), &[]),
            Reaction::Command(ViewCommand::ReloadAll)
        );
    }

    #[test]
    fn broadcast_carries_text() {
        assert_eq!(
            translate(
                parse(r#"{"kind":"broadcast-prompt","payload":{"text":"hello"}}"#),
                &[]
            ),
            Reaction::Command(ViewCommand::Broadcast("hello".into()))
        );
    }

    #[test]
    fn shell_ready_is_handshake() {
        assert_eq!(
            translate(parse(r#"{"kind":"shell-ready"}"#), &[]),
            Reaction::Handshake
        );
    }

    #[test]
    fn tabs_changed_is_deduplicated() {
        let msg = parse(
            r#"{"kind":"tabs-changed","payload":{"tabs":[
                {"name":"Grok","url":"https://grok.com","isIncognito":false},
                {"name":"grok","url":"https://other.test","isIncognito":false}
            ],"active":"grok"}}"#,
        );
        let Reaction::SaveTabs(snapshot) = translate(msg, &[]) else {
            panic!("expected SaveTabs");
        };
        assert_eq!(snapshot.tabs.len(), 1);
        assert_eq!(snapshot.active, Some(TabId::from("grok")));
    }

    #[test]
    fn handshake_sends_catalog_then_saved_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let tabs_file = dir.path().join("tabs.json");
        let snapshot = SessionSnapshot {
            tabs: vec![
                TabRecord::new("ChatGPT", "https://chat.openai.com", false),
                TabRecord::new("Grok", "https://grok.com", true),
            ],
            active: Some(TabId::from("grok-incog")),
        };
        state::write_json_atomic(&tabs_file, &snapshot).unwrap();

        let config = OmniConfig::default();
        let [catalog, restore] = handshake_signals(&config, &tabs_file, true);

        assert_eq!(catalog.kind(), "catalog");
        assert_eq!(
            catalog.payload()["services"].as_array().unwrap().len(),
            config.services.len()
        );
        let ShellSignal::RestoreTabs { tabs, active } = restore else {
            panic!("expected RestoreTabs");
        };
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[1].id, TabId::from("grok-incog"));
        assert_eq!(active, Some(TabId::from("grok-incog")));
    }

    #[test]
    fn handshake_without_restore_sends_no_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let tabs_file = dir.path().join("tabs.json");
        state::write_json_atomic(
            &tabs_file,
            &SessionSnapshot {
                tabs: vec![TabRecord::new("Grok", "https://grok.com", false)],
                active: None,
            },
        )
        .unwrap();

        let [_, restore] = handshake_signals(&OmniConfig::default(), &tabs_file, false);
        assert_eq!(
            restore,
            ShellSignal::RestoreTabs {
                tabs: Vec::new(),
                active: None
            }
        );
    }

    #[test]
    fn handshake_with_missing_file_sends_no_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let [_, restore] =
            handshake_signals(&OmniConfig::default(), &dir.path().join("tabs.json"), true);
        assert_eq!(restore.payload()["tabs"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn tabs_changed_message_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.handle_ipc(
            r#"{"kind":"tabs-changed","payload":{"tabs":[{"name":"Claude","url":"https://claude.ai"}],"active":"claude"}}"#,
        );
        let saved: SessionSnapshot = state::read_json(&app.paths.tabs_file()).unwrap();
        assert_eq!(saved.tabs, vec![TabRecord::new("Claude", "https://claude.ai", false)]);
        assert_eq!(saved.active, Some(TabId::from("claude")));
    }

    #[test]
    fn reset_tabs_is_its_own_reaction() {
        assert_eq!(
            translate(parse(r#"{"kind":"reset-tabs"}"#), &[TabId::from("grok")]),
            Reaction::Reset
        );
    }

    #[test]
    fn reset_tabs_clears_saved_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.save_tabs(&SessionSnapshot {
            tabs: vec![TabRecord::new("Grok", "https://grok.com", false)],
            active: Some(TabId::from("grok")),
        });

        app.handle_ipc(r#"{"kind":"reset-tabs"}"#);

        let saved: SessionSnapshot = state::read_json(&app.paths.tabs_file()).unwrap();
        assert_eq!(saved, SessionSnapshot::default());
        let [_, restore] = handshake_signals(&app.config, &app.paths.tabs_file(), true);
        assert_eq!(restore.payload()["tabs"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn commands_without_controller_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.handle_ipc(r#"{"kind":"toggle-split"}"#);
        app.handle_ipc(r#"{"kind":"eval","payload":"alert(1)"}"#);
        app.handle_ipc("not json");
        assert!(app.controller.is_none());
    }
}
