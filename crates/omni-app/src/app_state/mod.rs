//! Application state: window, shell page, view controller, persistence.

mod core;
mod dispatch;
mod event_handler;
mod geometry;
mod init;
mod polling;
mod shell_bridge;
mod shutdown;
mod types;

pub use core::OmniApp;
