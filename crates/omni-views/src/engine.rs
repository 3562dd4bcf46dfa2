//! Seam between the controller and the embeddable browser engine.

use std::sync::Arc;

use omni_common::types::Rect;
use omni_common::{TabId, ViewError};

use crate::partition::StoragePartition;
use crate::policy::NetworkPolicy;

/// Callback receiving the JSON-encoded result of a script evaluation.
pub type ScriptCallback = Box<dyn Fn(String) + Send + 'static>;

/// One isolated page surface owned by the engine.
///
/// `attach` places the context in the window at `bounds` and shows it;
/// `detach` hides it. Both are idempotent.
pub trait BrowsingContext {
    fn attach(&mut self, bounds: Rect) -> Result<(), ViewError>;
    fn detach(&mut self) -> Result<(), ViewError>;
    fn load_url(&mut self, url: &str) -> Result<(), ViewError>;
    fn reload(&mut self) -> Result<(), ViewError>;
    /// Run a script in the page. Fire and forget.
    fn evaluate(&self, script: &str) -> Result<(), ViewError>;
    fn evaluate_with_result(&self, script: &str, callback: ScriptCallback)
        -> Result<(), ViewError>;
    fn focus(&self) -> Result<(), ViewError>;
}

/// Everything the engine needs to build a context.
#[derive(Debug, Clone)]
pub struct ContextSpec {
    pub id: TabId,
    pub url: String,
    pub partition: StoragePartition,
    /// Run before any page script on every document.
    pub init_scripts: Vec<String>,
    /// Ignored unless the factory's `supports_header_interception()`
    /// returns true.
    pub policy: Arc<NetworkPolicy>,
}

pub trait ContextFactory {
    type Context: BrowsingContext;

    fn create(&mut self, spec: &ContextSpec) -> Result<Self::Context, ViewError>;

    /// Whether contexts from this factory enforce `ContextSpec::policy` on
    /// response headers.
    fn supports_header_interception(&self) -> bool {
        false
    }
}
