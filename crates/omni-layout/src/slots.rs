use omni_common::TabId;
use serde::{Deserialize, Serialize};

/// The two visible positions. `secondary` is only shown in split mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slots {
    pub primary: Option<TabId>,
    pub secondary: Option<TabId>,
}

impl Slots {
    pub fn contains(&self, id: &TabId) -> bool {
        self.primary.as_ref() == Some(id) || self.secondary.as_ref() == Some(id)
    }

    pub fn is_primary(&self, id: &TabId) -> bool {
        self.primary.as_ref() == Some(id)
    }

    pub fn is_secondary(&self, id: &TabId) -> bool {
        self.secondary.as_ref() == Some(id)
    }

    /// A tab never occupies both slots; the duplicate stays in `primary`.
    pub fn normalize(&mut self) {
        if self.primary.is_some() && self.primary == self.secondary {
            self.secondary = None;
        }
    }

    pub fn clear(&mut self) {
        self.primary = None;
        self.secondary = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_checks_both_slots() {
        let slots = Slots {
            primary: Some(TabId::from("a")),
            secondary: Some(TabId::from("b")),
        };
        assert!(slots.contains(&TabId::from("a")));
        assert!(slots.contains(&TabId::from("b")));
        assert!(!slots.contains(&TabId::from("c")));
        assert!(slots.is_primary(&TabId::from("a")));
        assert!(slots.is_secondary(&TabId::from("b")));
    }

    #[test]
    fn normalize_clears_duplicate_secondary() {
        let mut slots = Slots {
            primary: Some(TabId::from("a")),
            secondary: Some(TabId::from("a")),
        };
        slots.normalize();
        assert_eq!(slots.primary, Some(TabId::from("a")));
        assert_eq!(slots.secondary, None);
    }

    #[test]
    fn normalize_keeps_distinct_slots() {
        let mut slots = Slots {
            primary: Some(TabId::from("a")),
            secondary: Some(TabId::from("b")),
        };
        let before = slots.clone();
        slots.normalize();
        assert_eq!(slots, before);
    }
}
