use crate::catalog::EntityId;
use serde::Serialize;

/// Tactile cue emitted alongside selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HapticCue {
    LightImpact,
    Warning,
}

/// Platform hook for haptic pulses.
pub trait HapticFeedback: Send + Sync {
    fn pulse(&self, cue: HapticCue);
}

/// Used on platforms without haptic hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl HapticFeedback for NoHaptics {
    fn pulse(&self, _cue: HapticCue) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    Selected { id: EntityId },
    Deselected { id: EntityId },
    /// The set was full; `evicted` was the oldest insertion.
    Replaced { id: EntityId, evicted: EntityId },
    Cleared { removed: usize },
}

impl SelectionEvent {
    pub const fn haptic(&self) -> HapticCue {
        match self {
            Self::Cleared { .. } => HapticCue::Warning,
            _ => HapticCue::LightImpact,
        }
    }
}

/// Ordered set of at most `capacity` ids, oldest insertion first.
///
/// Ids are not validated against any catalog; dangling ids are filtered at
/// lookup time instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<EntityId>,
    capacity: usize,
}

impl SelectionSet {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ids: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() == self.capacity
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    pub fn toggle(&mut self, id: EntityId) -> SelectionEvent {
        if let Some(position) = self.ids.iter().position(|existing| existing == &id) {
            self.ids.remove(position);
            return SelectionEvent::Deselected { id };
        }

        if self.ids.len() < self.capacity {
            self.ids.push(id.clone());
            return SelectionEvent::Selected { id };
        }

        // Insertion order, not access order: position 0 is always the oldest.
        let evicted = self.ids.remove(0);
        self.ids.push(id.clone());
        SelectionEvent::Replaced { id, evicted }
    }

    pub fn clear(&mut self) -> SelectionEvent {
        let removed = self.ids.len();
        self.ids.clear();
        SelectionEvent::Cleared { removed }
    }
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new(crate::config::PlannerConfig::DEFAULT_SELECTION_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(set: &SelectionSet) -> Vec<&str> {
        set.ids().iter().map(EntityId::as_str).collect()
    }

    #[test]
    fn toggling_selected_id_removes_it_and_keeps_order() {
        let mut set = SelectionSet::new(4);
        for id in ["a", "b", "c"] {
            set.toggle(EntityId::from(id));
        }

        let event = set.toggle(EntityId::from("b"));

        assert_eq!(
            event,
            SelectionEvent::Deselected {
                id: EntityId::from("b")
            }
        );
        assert_eq!(ids(&set), vec!["a", "c"]);
    }

    #[test]
    fn full_set_evicts_oldest_insertion() {
        let mut set = SelectionSet::new(4);
        for id in ["a", "b", "c", "d"] {
            set.toggle(EntityId::from(id));
        }
        // Re-toggling "a" twice moves it to the back without touching the others.
        set.toggle(EntityId::from("a"));
        set.toggle(EntityId::from("a"));

        let event = set.toggle(EntityId::from("e"));

        assert_eq!(
            event,
            SelectionEvent::Replaced {
                id: EntityId::from("e"),
                evicted: EntityId::from("b"),
            }
        );
        assert_eq!(ids(&set), vec!["c", "d", "a", "e"]);
    }

    #[test]
    fn never_exceeds_capacity_or_duplicates() {
        let mut set = SelectionSet::new(3);
        let sequence = ["a", "b", "a", "c", "d", "e", "c", "f", "a", "a", "g", "b"];

        for id in sequence {
            set.toggle(EntityId::from(id));
            assert!(set.len() <= set.capacity());
            let mut unique = set.ids().to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), set.len());
        }
    }

    #[test]
    fn clear_empties_and_requests_warning_pulse() {
        let mut set = SelectionSet::new(2);
        set.toggle(EntityId::from("a"));
        set.toggle(EntityId::from("b"));

        let event = set.clear();

        assert!(set.is_empty());
        assert_eq!(event, SelectionEvent::Cleared { removed: 2 });
        assert_eq!(event.haptic(), HapticCue::Warning);
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut set = SelectionSet::new(0);
        set.toggle(EntityId::from("a"));
        set.toggle(EntityId::from("b"));

        assert_eq!(set.capacity(), 1);
        assert_eq!(ids(&set), vec!["b"]);
    }

    #[test]
    fn unknown_ids_are_accepted() {
        let mut set = SelectionSet::default();
        let event = set.toggle(EntityId::from("not-in-any-catalog"));

        assert_eq!(event.haptic(), HapticCue::LightImpact);
        assert!(set.contains(&EntityId::from("not-in-any-catalog")));
    }
}
