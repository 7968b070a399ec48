//! Reference edit tree
//!
//! View model for the reference edits panel. A tree is always rebuilt as a
//! whole from host state; expansion and selection survive rebuilds through
//! [`ViewState`], keyed by each entry's stable id.

mod builder;
mod entry;
mod report;
mod view_state;

pub use builder::{build_tree, ReferenceSnapshot};
pub use entry::{EditCounts, EntryKind, TreeEntry};
pub use report::{EditReport, ReferenceSection};
pub use view_state::{EntryState, ViewState};

/// All root entries of the panel, in host listing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTree {
    pub references: Vec<TreeEntry>,
}

impl ReferenceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Every entry in pre-order
    pub fn entries(&self) -> Vec<&TreeEntry> {
        let mut entries = Vec::new();
        for reference in &self.references {
            reference.walk(&mut |entry| entries.push(entry));
        }
        entries
    }

    pub fn stable_ids(&self) -> Vec<String> {
        self.entries().iter().map(|entry| entry.stable_id.clone()).collect()
    }

    pub fn find(&self, stable_id: &str) -> Option<&TreeEntry> {
        self.entries().into_iter().find(|entry| entry.stable_id == stable_id)
    }

    pub fn reference(&self, reference_node: &str) -> Option<&TreeEntry> {
        self.references
            .iter()
            .find(|entry| entry.reference_node == reference_node)
    }

    /// Apply `f` to every entry carrying `stable_id`. Node and plug ids may be
    /// shared by several entries; all of them are updated.
    fn for_each_with_id(&mut self, stable_id: &str, mut f: impl FnMut(&mut TreeEntry)) {
        for reference in &mut self.references {
            reference.walk_mut(&mut |entry| {
                if entry.stable_id == stable_id {
                    f(entry);
                }
            });
        }
    }

    pub fn set_expanded(&mut self, stable_id: &str, expanded: bool) {
        self.for_each_with_id(stable_id, |entry| entry.expanded = expanded);
    }

    pub fn toggle_expanded(&mut self, stable_id: &str) {
        self.for_each_with_id(stable_id, |entry| entry.expanded = !entry.expanded);
    }

    /// Select an entry. Without `additive` the previous selection is dropped;
    /// with it the entry's selection is toggled.
    pub fn select(&mut self, stable_id: &str, additive: bool) {
        if !additive {
            self.clear_selection();
            self.for_each_with_id(stable_id, |entry| entry.selected = true);
        } else {
            self.for_each_with_id(stable_id, |entry| entry.selected = !entry.selected);
        }
    }

    pub fn clear_selection(&mut self) {
        for reference in &mut self.references {
            reference.walk_mut(&mut |entry| entry.selected = false);
        }
    }

    pub fn selected(&self) -> Vec<&TreeEntry> {
        self.entries().into_iter().filter(|entry| entry.selected).collect()
    }

    /// Edit counts for the whole tree
    pub fn edit_counts(&self) -> EditCounts {
        self.references
            .iter()
            .map(TreeEntry::edit_counts)
            .fold(EditCounts::default(), |total, counts| EditCounts {
                failed: total.failed + counts.failed,
                successful: total.successful + counts.successful,
                unsupported: total.unsupported + counts.unsupported,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ReferenceTree {
        build_tree(&[
            ReferenceSnapshot {
                name: "aRN".to_string(),
                loaded: true,
                failed_edits: vec!["setAttr a:x.tx 1".to_string()],
                successful_edits: vec!["setAttr a:x.ty 1".to_string(), "oddEdit".to_string()],
            },
            ReferenceSnapshot {
                name: "bRN".to_string(),
                loaded: false,
                failed_edits: vec![],
                successful_edits: vec!["setAttr b:y.v 0".to_string()],
            },
        ])
    }

    #[test]
    fn test_entries_are_pre_order() {
        let tree = sample_tree();
        let ids = tree.stable_ids();
        assert_eq!(
            ids,
            vec![
                "reference_aRN",
                "node_a:x",
                "plug_a:x.tx",
                "edit_setAttr a:x.tx 1#aRN/failed",
                "plug_a:x.ty",
                "edit_setAttr a:x.ty 1#aRN/successful",
                "edit_oddEdit#aRN/successful",
                "reference_bRN",
                "node_b:y",
                "plug_b:y.v",
                "edit_setAttr b:y.v 0#bRN/successful",
            ]
        );
    }

    #[test]
    fn test_select_replaces_or_toggles() {
        let mut tree = sample_tree();
        tree.select("node_a:x", false);
        tree.select("node_b:y", false);
        let selected: Vec<&str> = tree.selected().iter().map(|e| e.stable_id.as_str()).collect();
        assert_eq!(selected, vec!["node_b:y"]);

        tree.select("plug_a:x.tx", true);
        assert_eq!(tree.selected().len(), 2);
        tree.select("plug_a:x.tx", true);
        assert_eq!(tree.selected().len(), 1);

        tree.clear_selection();
        assert!(tree.selected().is_empty());
    }

    #[test]
    fn test_toggle_expanded() {
        let mut tree = sample_tree();
        tree.toggle_expanded("reference_aRN");
        assert!(tree.find("reference_aRN").unwrap().expanded);
        tree.set_expanded("reference_aRN", false);
        assert!(!tree.find("reference_aRN").unwrap().expanded);
    }

    #[test]
    fn test_edit_counts() {
        let tree = sample_tree();
        let counts = tree.edit_counts();
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.successful, 3);
        assert_eq!(counts.unsupported, 1);
        assert_eq!(tree.reference("bRN").unwrap().edit_counts().total(), 1);
    }
}
