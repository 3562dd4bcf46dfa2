use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::TabId;

/// Application-wide notifications emitted by the view controller and
/// consumed by the shell bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    TabOpened(TabId),
    TabClosed(TabId),
    TabActivated(TabId),
    LoadingChanged { id: TabId, is_loading: bool },
    /// Split mode was turned off (or refused) by the controller rather than
    /// by the user; the presentation toggle must resync.
    SplitStateForced { active: bool },
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        tracing::trace!(?event, "event published");
        self.sender.send(event).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::TabOpened(TabId::from("chatgpt")));

        let event = rx.recv().await.unwrap();
        assert_eq!(event, Event::TabOpened(TabId::from("chatgpt")));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::Shutdown);

        assert!(matches!(rx1.recv().await.unwrap(), Event::Shutdown));
        assert!(matches!(rx2.recv().await.unwrap(), Event::Shutdown));
    }

    #[tokio::test]
    async fn events_arrive_in_publish_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let id = TabId::from("claude");

        bus.publish(Event::LoadingChanged {
            id: id.clone(),
            is_loading: true,
        });
        bus.publish(Event::LoadingChanged {
            id: id.clone(),
            is_loading: false,
        });

        let e1 = rx.recv().await.unwrap();
        assert!(matches!(e1, Event::LoadingChanged { is_loading: true, .. }));
        let e2 = rx.recv().await.unwrap();
        assert!(matches!(e2, Event::LoadingChanged { is_loading: false, .. }));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(Event::Shutdown), 0);
    }

    #[test]
    fn try_recv_after_publish() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe();
        bus.publish(Event::SplitStateForced { active: false });
        let event = rx.try_recv().unwrap();
        assert_eq!(event, Event::SplitStateForced { active: false });
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn event_json_shape() {
        let json = serde_json::to_value(Event::TabClosed(TabId::from("grok"))).unwrap();
        assert_eq!(json["type"], "TabClosed");
        assert_eq!(json["data"], "grok");
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomeNewEventWeNeverHeardOf","data":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
