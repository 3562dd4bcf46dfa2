use serde::{Deserialize, Serialize};
use std::fmt;

/// Rectangle in logical pixels, origin at the top-left of the window's
/// content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Window content size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Identifier of one tab. Stable across restarts for the same service and
/// privacy mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub const INCOGNITO_SUFFIX: &'static str = "-incog";

    /// Derive the id for a service name: lowercased, each whitespace
    /// character replaced by `-`, plus `-incog` for private sessions.
    pub fn derive(name: &str, incognito: bool) -> Self {
        let mut id: String = name
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect::<String>()
            .to_lowercase();
        if incognito {
            id.push_str(Self::INCOGNITO_SUFFIX);
        }
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_incognito(&self) -> bool {
        self.0.ends_with(Self::INCOGNITO_SUFFIX)
    }
}

impl From<&str> for TabId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TabId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
