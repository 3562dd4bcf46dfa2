//! Live sessions keyed by tab id.
//!
//! The registry owns the engine factory, so creating a session and
//! allocating its storage partition happen in one place. Removing a
//! session always detaches its context before the context is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use omni_common::types::Rect;
use omni_common::{TabId, ViewError};
use tracing::{debug, info, warn};

use crate::engine::{BrowsingContext, ContextFactory, ContextSpec};
use crate::partition::StoragePartition;
use crate::policy::NetworkPolicy;

pub struct Session<C> {
    pub id: TabId,
    /// URL the session was opened with.
    pub home_url: String,
    /// Last URL reported by the engine.
    pub current_url: String,
    pub title: String,
    pub partition: StoragePartition,
    pub incognito: bool,
    pub loading: bool,
    pub(crate) attached: Option<Rect>,
    pub(crate) context: C,
}

impl<C> Session<C> {
    pub fn attached_bounds(&self) -> Option<Rect> {
        self.attached
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn context(&self) -> &C {
        &self.context
    }
}

pub struct SessionRegistry<F: ContextFactory> {
    factory: F,
    partition_prefix: String,
    sessions: HashMap<TabId, Session<F::Context>>,
    order: Vec<TabId>,
}

impl<F: ContextFactory> SessionRegistry<F> {
    pub fn new(factory: F, partition_prefix: impl Into<String>) -> Self {
        Self {
            factory,
            partition_prefix: partition_prefix.into(),
            sessions: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Create a session and its context. Fails with `AlreadyExists` when
    /// `id` is taken; the caller should activate the existing tab instead.
    pub fn create(
        &mut self,
        id: TabId,
        url: &str,
        incognito: bool,
        init_scripts: Vec<String>,
        policy: Arc<NetworkPolicy>,
    ) -> Result<&mut Session<F::Context>, ViewError> {
        if self.sessions.contains_key(&id) {
            return Err(ViewError::AlreadyExists(id.to_string()));
        }

        let partition = StoragePartition::for_tab(&self.partition_prefix, &id, incognito);
        let spec = ContextSpec {
            id: id.clone(),
            url: url.to_string(),
            partition: partition.clone(),
            init_scripts,
            policy,
        };
        let context = self.factory.create(&spec)?;

        info!(
            tab = %id,
            partition = partition.name(),
            incognito,
            "session created"
        );

        self.order.push(id.clone());
        let session = self.sessions.entry(id.clone()).or_insert(Session {
            id,
            home_url: url.to_string(),
            current_url: url.to_string(),
            title: String::new(),
            partition,
            incognito,
            loading: false,
            attached: None,
            context,
        });
        Ok(session)
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn get(&self, id: &TabId) -> Option<&Session<F::Context>> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &TabId) -> Option<&mut Session<F::Context>> {
        self.sessions.get_mut(id)
    }

    /// Detach and release. Removing an unknown id does nothing.
    pub fn remove(&mut self, id: &TabId) -> bool {
        if let Err(e) = self.detach(id) {
            warn!(tab = %id, error = %e, "detach before removal failed");
        }
        let Some(session) = self.sessions.remove(id) else {
            return false;
        };
        self.order.retain(|other| other != id);
        info!(tab = %id, partition = session.partition.name(), "session removed");
        drop(session);
        true
    }

    pub fn attach(&mut self, id: &TabId, bounds: Rect) -> Result<(), ViewError> {
        let Some(session) = self.sessions.get_mut(id) else {
            return Ok(());
        };
        session.context.attach(bounds)?;
        session.attached = Some(bounds);
        debug!(tab = %id, ?bounds, "attached");
        Ok(())
    }

    pub fn detach(&mut self, id: &TabId) -> Result<(), ViewError> {
        let Some(session) = self.sessions.get_mut(id) else {
            return Ok(());
        };
        if session.attached.take().is_some() {
            session.context.detach()?;
            debug!(tab = %id, "detached");
        }
        Ok(())
    }

    /// Ids in creation order.
    pub fn ids(&self) -> &[TabId] {
        &self.order
    }

    pub fn attached_ids(&self) -> Vec<TabId> {
        self.order
            .iter()
            .filter(|id| self.sessions.get(*id).is_some_and(Session::is_attached))
            .cloned()
            .collect()
    }

    /// Sessions in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Session<F::Context>> {
        self.order.iter().filter_map(|id| self.sessions.get(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Remove every session.
    pub fn clear(&mut self) {
        let ids = self.order.clone();
        for id in &ids {
            self.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Op, RecordingFactory};

    fn registry() -> SessionRegistry<RecordingFactory> {
        SessionRegistry::new(RecordingFactory::new(), "ai_sessions_v2")
    }

    fn create(reg: &mut SessionRegistry<RecordingFactory>, id: &str, incognito: bool) {
        reg.create(
            TabId::from(id),
            "https://example.test",
            incognito,
            Vec::new(),
            Arc::new(NetworkPolicy::default()),
        )
        .unwrap();
    }

    #[test]
    fn create_rejects_duplicate_ids() {
        let mut reg = registry();
        create(&mut reg, "a", false);
        let err = reg
            .create(
                TabId::from("a"),
                "https://other.test",
                false,
                Vec::new(),
                Arc::new(NetworkPolicy::default()),
            )
            .err()
            .unwrap();
        assert!(matches!(err, ViewError::AlreadyExists(_)));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(&TabId::from("a")).unwrap().home_url, "https://example.test");
    }

    #[test]
    fn create_allocates_partition_by_privacy() {
        let mut reg = registry();
        create(&mut reg, "grok", false);
        create(&mut reg, "grok-incog", true);
        let normal = reg.get(&TabId::from("grok")).unwrap();
        let private = reg.get(&TabId::from("grok-incog")).unwrap();
        assert_eq!(normal.partition.name(), "persist:ai_sessions_v2_grok");
        assert!(!private.partition.is_persistent());
        assert_ne!(normal.partition.name(), private.partition.name());
    }

    #[test]
    fn failed_creation_leaves_no_entry() {
        let mut reg = registry();
        reg.factory.fail_next_create();
        let result = reg.create(
            TabId::from("a"),
            "https://example.test",
            false,
            Vec::new(),
            Arc::new(NetworkPolicy::default()),
        );
        assert!(matches!(result, Err(ViewError::Engine(_))));
        assert!(reg.is_empty());
        assert!(reg.ids().is_empty());
    }

    #[test]
    fn ids_keep_insertion_order() {
        let mut reg = registry();
        for id in ["c", "a", "b"] {
            create(&mut reg, id, false);
        }
        let ids: Vec<&str> = reg.ids().iter().map(TabId::as_str).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn remove_detaches_then_releases() {
        let mut reg = registry();
        create(&mut reg, "a", false);
        reg.attach(&TabId::from("a"), Rect::new(0, 70, 100, 100)).unwrap();
        reg.factory.log().clear();

        assert!(reg.remove(&TabId::from("a")));
        let ops = reg.factory.log().take();
        assert_eq!(
            ops,
            vec![Op::Detached(TabId::from("a")), Op::Dropped(TabId::from("a"))]
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let mut reg = registry();
        create(&mut reg, "a", false);
        assert!(reg.remove(&TabId::from("a")));
        assert!(!reg.remove(&TabId::from("a")));
        assert!(reg.is_empty());
    }

    #[test]
    fn detach_is_idempotent() {
        let mut reg = registry();
        create(&mut reg, "a", false);
        let id = TabId::from("a");
        reg.attach(&id, Rect::new(0, 0, 10, 10)).unwrap();
        reg.factory.log().clear();
        reg.detach(&id).unwrap();
        reg.detach(&id).unwrap();
        assert_eq!(reg.factory.log().take(), vec![Op::Detached(id)]);
    }

    #[test]
    fn attached_ids_tracks_attach_state() {
        let mut reg = registry();
        create(&mut reg, "a", false);
        create(&mut reg, "b", false);
        reg.attach(&TabId::from("b"), Rect::new(0, 0, 10, 10)).unwrap();
        assert_eq!(reg.attached_ids(), vec![TabId::from("b")]);
    }

    #[test]
    fn clear_removes_everything() {
        let mut reg = registry();
        create(&mut reg, "a", false);
        create(&mut reg, "b", true);
        reg.clear();
        assert!(reg.is_empty());
        let drops = reg
            .factory
            .log()
            .take()
            .into_iter()
            .filter(|op| matches!(op, Op::Dropped(_)))
            .count();
        assert_eq!(drops, 2);
    }
}
