//! Events flowing from engine callbacks to the control thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use omni_common::TabId;

/// Navigation code reported when a load is superseded by another one.
pub const LOAD_ABORTED: i32 = -3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextEvent {
    LoadStarted { url: String },
    LoadFinished { url: String },
    LoadFailed { url: String, code: i32 },
    /// The page loaded but its content is a block notice.
    BlockedPage { url: String },
    TitleChanged { title: String },
    PopupRequested { url: String },
    DownloadStarted { url: String, path: PathBuf },
    DownloadFinished { url: String, path: Option<PathBuf>, success: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEvent {
    pub id: TabId,
    pub event: ContextEvent,
}

impl TabEvent {
    pub fn new(id: TabId, event: ContextEvent) -> Self {
        Self { id, event }
    }
}

/// Events from the shell (presentation) webview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Ipc { body: String },
    Loaded { url: String },
}

/// FIFO shared between engine callbacks (producers) and the event loop
/// (single consumer). Per-producer order is preserved.
#[derive(Debug)]
pub struct EventQueue<T> {
    inner: Arc<Mutex<Vec<T>>>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, event: T) {
        let mut events = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        events.push(event);
    }

    pub fn drain(&self) -> Vec<T> {
        let mut events = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *events)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Clone for EventQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_events_in_push_order() {
        let queue = EventQueue::new();
        let producer = queue.clone();
        let id = TabId::from("a");
        producer.push(TabEvent::new(id.clone(), ContextEvent::LoadStarted { url: "u".into() }));
        producer.push(TabEvent::new(id, ContextEvent::LoadFinished { url: "u".into() }));

        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0].event, ContextEvent::LoadStarted { .. }));
        assert!(matches!(events[1].event, ContextEvent::LoadFinished { .. }));
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_is_shared_across_threads() {
        let queue: EventQueue<u32> = EventQueue::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let q = queue.clone();
                std::thread::spawn(move || q.push(i))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let mut got = queue.drain();
        got.sort();
        assert_eq!(got, vec![0, 1, 2, 3]);
    }
}
