use serde::{Deserialize, Serialize};

/// Saved window placement. `x`/`y` are absent until the window has been
/// positioned once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowGeometry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub is_maximized: bool,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self::first_run(1300, 900, true)
    }
}

/// What the window reports right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub is_maximized: bool,
}

impl WindowGeometry {
    pub fn first_run(width: u32, height: u32, is_maximized: bool) -> Self {
        Self {
            x: None,
            y: None,
            width,
            height,
            is_maximized,
        }
    }

    /// Next document to save. While maximized the previous normal bounds
    /// are kept so un-maximizing after a restart restores them.
    pub fn update(&self, observed: ObservedBounds) -> Self {
        if observed.is_maximized {
            Self {
                is_maximized: true,
                ..*self
            }
        } else {
            Self {
                x: Some(observed.x),
                y: Some(observed.y),
                width: observed.width,
                height: observed.height,
                is_maximized: false,
            }
        }
    }

    /// Clamp the size to the configured minimum.
    pub fn clamped(self, min_width: u32, min_height: u32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
            ..self
        }
    }
}
