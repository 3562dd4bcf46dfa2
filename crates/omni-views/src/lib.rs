//! Browsing-context management for Omni.
//!
//! - `registry`: tab id to live context, with storage partitions
//! - `controller`: slot assignment, split mode, and command handling
//! - `inject`: scripts run inside every context (shims, broadcast, probes)
//! - `policy`: response header filtering
//! - `backend`: the `wry` engine behind the [`engine`] traits
//! - `ipc` / `protocol`: messages exchanged with the shell page

pub mod backend;
pub mod content;
pub mod controller;
pub mod engine;
pub mod events;
pub mod inject;
pub mod ipc;
pub mod partition;
pub mod policy;
pub mod protocol;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{ControllerSettings, ViewCommand, ViewController};
pub use engine::{BrowsingContext, ContextFactory, ContextSpec};
pub use events::{ContextEvent, EventQueue, ShellEvent, TabEvent};
pub use partition::StoragePartition;
pub use policy::NetworkPolicy;
pub use registry::{Session, SessionRegistry};
