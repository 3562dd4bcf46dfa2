//! Geometry for the visible browsing contexts: at most two slots placed
//! inside the window content area between the header and footer bands.

pub mod layout;
pub mod slots;

pub use layout::{Bands, LayoutEngine, LayoutMode, LayoutPlan, Placement};
pub use slots::Slots;
