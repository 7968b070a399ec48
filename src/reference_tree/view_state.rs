//! Expansion and selection carried across rebuilds

use super::ReferenceTree;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryState {
    pub expanded: bool,
    pub selected: bool,
}

/// Snapshot of per-entry UI state keyed by stable id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    entries: HashMap<String, EntryState>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the state of every entry. Entries sharing an id merge their
    /// flags.
    pub fn capture(tree: &ReferenceTree) -> Self {
        let mut state = Self::new();
        for entry in tree.entries() {
            let captured = state.entries.entry(entry.stable_id.clone()).or_default();
            captured.expanded |= entry.expanded;
            captured.selected |= entry.selected;
        }
        state
    }

    pub fn insert(&mut self, stable_id: &str, state: EntryState) {
        self.entries.insert(stable_id.to_string(), state);
    }

    pub fn get(&self, stable_id: &str) -> Option<EntryState> {
        self.entries.get(stable_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Restore captured flags onto a freshly built tree
    ///
    /// Entries without a captured state start collapsed and unselected,
    /// except that with `expand_failed` a failed entry with children starts
    /// expanded.
    pub fn apply(&self, tree: &mut ReferenceTree, expand_failed: bool) {
        for reference in &mut tree.references {
            reference.walk_mut(&mut |entry| match self.entries.get(&entry.stable_id) {
                Some(state) => {
                    entry.expanded = state.expanded;
                    entry.selected = state.selected;
                }
                None => {
                    entry.expanded = expand_failed && entry.failed && !entry.children.is_empty();
                    entry.selected = false;
                }
            });
        }
    }
}
