//! Controller notifications forwarded to the shell page.

use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;

use omni_common::Event;
use omni_views::protocol::ShellSignal;

use super::core::OmniApp;

/// The shell-facing form of a controller event, if the shell cares.
pub(super) fn signal_for(event: &Event) -> Option<ShellSignal> {
    match event {
        Event::LoadingChanged { id, is_loading } => Some(ShellSignal::LoadingStatus {
            id: id.clone(),
            is_loading: *is_loading,
        }),
        Event::SplitStateForced { active } => Some(ShellSignal::SplitState { is_active: *active }),
        _ => None,
    }
}

/// Everything currently buffered. `None` once the bus is gone.
pub(super) fn drain_bus(rx: &mut Receiver<Event>) -> Option<Vec<Event>> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Empty) => return Some(events),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "shell bridge lagged behind controller events");
            }
            Err(TryRecvError::Closed) => return None,
        }
    }
}

impl OmniApp {
    pub(super) fn forward_controller_events(&mut self) {
        let Some(ref mut rx) = self.bus_rx else {
            return;
        };
        let Some(events) = drain_bus(rx) else {
            self.bus_rx = None;
            return;
        };
        for signal in events.iter().filter_map(signal_for) {
            self.send_to_shell(&signal);
        }
    }

    pub(super) fn send_to_shell(&self, signal: &ShellSignal) {
        let Some(ref shell) = self.shell else {
            tracing::debug!(kind = signal.kind(), "no shell, signal dropped");
            return;
        };
        if let Err(e) = shell.send(signal) {
            tracing::warn!(kind = signal.kind(), error = %e, "failed to signal shell");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omni_common::{EventBus, TabId};

    #[test]
    fn loading_maps_to_status() {
        let signal = signal_for(&Event::LoadingChanged {
            id: TabId::from("grok"),
            is_loading: true,
        })
        .unwrap();
        assert_eq!(signal.kind(), "ai-loading-status");
        assert_eq!(signal.payload()["id"], "grok");
        assert_eq!(signal.payload()["isLoading"], true);
    }

    #[test]
    fn forced_split_maps_to_sync() {
        let signal = signal_for(&Event::SplitStateForced { active: false }).unwrap();
        assert_eq!(signal, ShellSignal::SplitState { is_active: false });
    }

    #[test]
    fn lifecycle_events_stay_internal() {
        assert!(signal_for(&Event::TabOpened(TabId::from("a"))).is_none());
        assert!(signal_for(&Event::TabActivated(TabId::from("a"))).is_none());
        assert!(signal_for(&Event::Shutdown).is_none());
    }

    #[test]
    fn drain_returns_in_publish_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        bus.publish(Event::TabOpened(TabId::from("a")));
        bus.publish(Event::SplitStateForced { active: false });

        let events = drain_bus(&mut rx).unwrap();
        assert_eq!(
            events,
            vec![
                Event::TabOpened(TabId::from("a")),
                Event::SplitStateForced { active: false },
            ]
        );
        assert_eq!(drain_bus(&mut rx), Some(Vec::new()));
    }

    #[test]
    fn drain_skips_past_lag() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();
        for i in 0..5 {
            bus.publish(Event::TabOpened(TabId::from(format!("t{i}"))));
        }
        let events = drain_bus(&mut rx).unwrap();
        assert_eq!(events.last(), Some(&Event::TabOpened(TabId::from("t4"))));
    }

    #[test]
    fn drain_reports_closed_bus() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe();
        drop(bus);
        assert_eq!(drain_bus(&mut rx), None);
    }
}
