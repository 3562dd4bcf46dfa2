//! In-memory engine that records every call, for controller and registry
//! tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use omni_common::types::Rect;
use omni_common::{TabId, ViewError};

use crate::engine::{BrowsingContext, ContextFactory, ContextSpec, ScriptCallback};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Created { id: TabId, url: String, partition: String },
    Attached(TabId, Rect),
    Detached(TabId),
    Loaded(TabId, String),
    Reloaded(TabId),
    Evaluated(TabId, String),
    Focused(TabId),
    Dropped(TabId),
}

#[derive(Debug, Clone, Default)]
pub struct OpLog(Arc<Mutex<Vec<Op>>>);

impl OpLog {
    fn push(&self, op: Op) {
        self.0.lock().unwrap().push(op);
    }

    pub fn take(&self) -> Vec<Op> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }

    pub fn snapshot(&self) -> Vec<Op> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    /// Scripts evaluated in `id`, in order.
    pub fn scripts_for(&self, id: &TabId) -> Vec<String> {
        self.snapshot()
            .into_iter()
            .filter_map(|op| match op {
                Op::Evaluated(tab, script) if &tab == id => Some(script),
                _ => None,
            })
            .collect()
    }
}

/// Tabs whose script evaluation fails. Shared with every context the
/// factory builds, so it can be flipped before or after creation.
#[derive(Debug, Clone, Default)]
pub struct EvalFailures(Arc<Mutex<HashSet<TabId>>>);

impl EvalFailures {
    pub fn fail(&self, id: &TabId) {
        self.0.lock().unwrap().insert(id.clone());
    }

    pub fn recover(&self, id: &TabId) {
        self.0.lock().unwrap().remove(id);
    }

    fn check(&self, id: &TabId) -> Result<(), ViewError> {
        if self.0.lock().unwrap().contains(id) {
            return Err(ViewError::Engine(format!("simulated script failure in {id}")));
        }
        Ok(())
    }
}

pub struct RecordingFactory {
    log: OpLog,
    eval_failures: EvalFailures,
    fail_next: bool,
    /// Value handed to `evaluate_with_result` callbacks.
    script_result: Arc<Mutex<String>>,
    pub specs: Vec<ContextSpec>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self {
            log: OpLog::default(),
            eval_failures: EvalFailures::default(),
            fail_next: false,
            script_result: Arc::new(Mutex::new("false".into())),
            specs: Vec::new(),
        }
    }

    pub fn log(&self) -> OpLog {
        self.log.clone()
    }

    pub fn eval_failures(&self) -> EvalFailures {
        self.eval_failures.clone()
    }

    pub fn fail_next_create(&mut self) {
        self.fail_next = true;
    }

    pub fn set_script_result(&self, value: &str) {
        *self.script_result.lock().unwrap() = value.to_string();
    }
}

impl ContextFactory for RecordingFactory {
    type Context = RecordingContext;

    fn create(&mut self, spec: &ContextSpec) -> Result<RecordingContext, ViewError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(ViewError::Engine("simulated failure".into()));
        }
        self.specs.push(spec.clone());
        self.log.push(Op::Created {
            id: spec.id.clone(),
            url: spec.url.clone(),
            partition: spec.partition.name().to_string(),
        });
        Ok(RecordingContext {
            id: spec.id.clone(),
            log: self.log.clone(),
            eval_failures: self.eval_failures.clone(),
            script_result: Arc::clone(&self.script_result),
        })
    }
}

pub struct RecordingContext {
    id: TabId,
    log: OpLog,
    eval_failures: EvalFailures,
    script_result: Arc<Mutex<String>>,
}

impl BrowsingContext for RecordingContext {
    fn attach(&mut self, bounds: Rect) -> Result<(), ViewError> {
        self.log.push(Op::Attached(self.id.clone(), bounds));
        Ok(())
    }

    fn detach(&mut self) -> Result<(), ViewError> {
        self.log.push(Op::Detached(self.id.clone()));
        Ok(())
    }

    fn load_url(&mut self, url: &str) -> Result<(), ViewError> {
        self.log.push(Op::Loaded(self.id.clone(), url.to_string()));
        Ok(())
    }

    fn reload(&mut self) -> Result<(), ViewError> {
        self.log.push(Op::Reloaded(self.id.clone()));
        Ok(())
    }

    fn evaluate(&self, script: &str) -> Result<(), ViewError> {
        self.eval_failures.check(&self.id)?;
        self.log.push(Op::Evaluated(self.id.clone(), script.to_string()));
        Ok(())
    }

    fn evaluate_with_result(
        &self,
        script: &str,
        callback: ScriptCallback,
    ) -> Result<(), ViewError> {
        self.eval_failures.check(&self.id)?;
        self.log.push(Op::Evaluated(self.id.clone(), script.to_string()));
        let result = self.script_result.lock().unwrap().clone();
        callback(result);
        Ok(())
    }

    fn focus(&self) -> Result<(), ViewError> {
        self.log.push(Op::Focused(self.id.clone()));
        Ok(())
    }
}

impl Drop for RecordingContext {
    fn drop(&mut self) {
        self.log.push(Op::Dropped(self.id.clone()));
    }
}
