pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, OmniError, PlatformError, Result, StateError, ViewError};
pub use events::{Event, EventBus};
pub use types::TabId;
