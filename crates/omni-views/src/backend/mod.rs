//! `wry` implementation of the engine seam, plus the shell webview.
//!
//! Every AI context is a child webview of the main window with its own
//! `WebContext` (one data directory per persistent partition, incognito
//! mode for ephemeral ones). Engine callbacks push into the shared
//! [`EventQueue`](crate::events::EventQueue); nothing here mutates
//! controller state directly.

mod context;
mod handlers;
mod protocol;
mod shell;

pub use context::{to_wry_rect, EngineSettings, WryContext, WryFactory};
pub use handlers::{download_file_name, is_shell_navigation_allowed, SHELL_NAV_PREFIXES};
pub use protocol::respond;
pub use shell::ShellView;

use omni_common::ViewError;

pub(crate) fn engine_error(e: wry::Error) -> ViewError {
    ViewError::Engine(e.to_string())
}
