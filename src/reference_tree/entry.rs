//! Tree entries
//!
//! The displayed hierarchy is an explicit tree of tagged entries:
//! reference → node → plug → edit. Entries own their children; the owning
//! reference node is kept by name only.

use crate::edits::{CommandType, EditRecord};
use serde::{Deserialize, Serialize};

/// What an entry stands for
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    /// Root entry, one per listed reference node
    Reference { loaded: bool },
    /// Edits grouped by the node they touch
    Node { node: String },
    /// Edits grouped by attribute, only found under a node entry
    Plug { plug: String },
    /// Leaf, one per edit string
    Edit { record: EditRecord },
}

/// Failed / successful / unsupported edit counts below an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCounts {
    pub failed: usize,
    pub successful: usize,
    pub unsupported: usize,
}

impl EditCounts {
    pub fn total(&self) -> usize {
        self.failed + self.successful
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeEntry {
    pub kind: EntryKind,
    pub label: String,
    pub stable_id: String,
    /// Node or plug names affected, in first-encounter order
    pub targets: Vec<String>,
    /// True if this entry or any descendant edit failed
    pub failed: bool,
    pub reference_node: String,
    pub expanded: bool,
    pub selected: bool,
    pub children: Vec<TreeEntry>,
}

impl TreeEntry {
    fn new(kind: EntryKind, label: String, stable_id: String, reference_node: &str) -> Self {
        Self {
            kind,
            label,
            stable_id,
            targets: Vec::new(),
            failed: false,
            reference_node: reference_node.to_string(),
            expanded: false,
            selected: false,
            children: Vec::new(),
        }
    }

    pub fn reference(reference_node: &str, loaded: bool) -> Self {
        Self::new(
            EntryKind::Reference { loaded },
            reference_node.to_string(),
            format!("reference_{}", reference_node),
            reference_node,
        )
    }

    pub fn node(reference_node: &str, node: &str) -> Self {
        let mut entry = Self::new(
            EntryKind::Node { node: node.to_string() },
            crate::edits::short_name(node).to_string(),
            format!("node_{}", node),
            reference_node,
        );
        entry.targets.push(node.to_string());
        entry
    }

    pub fn plug(reference_node: &str, plug: &str) -> Self {
        let mut entry = Self::new(
            EntryKind::Plug { plug: plug.to_string() },
            crate::edits::plug_attribute_label(plug).to_string(),
            format!("plug_{}", plug),
            reference_node,
        );
        entry.targets.push(plug.to_string());
        entry
    }

    /// Leaf entry for one edit. `stable_id` is assigned by the builder so
    /// duplicate edit strings stay distinguishable.
    pub fn edit(reference_node: &str, record: EditRecord, stable_id: String) -> Self {
        let label = record.raw.clone();
        let failed = record.failed;
        let targets = record.target.iter().cloned().collect();
        let mut entry = Self::new(EntryKind::Edit { record }, label, stable_id, reference_node);
        entry.failed = failed;
        entry.targets = targets;
        entry
    }

    /// Record a target once, keeping first-encounter order
    pub fn add_target(&mut self, target: &str) {
        if !self.targets.iter().any(|t| t == target) {
            self.targets.push(target.to_string());
        }
    }

    pub fn record(&self) -> Option<&EditRecord> {
        match &self.kind {
            EntryKind::Edit { record } => Some(record),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, EntryKind::Reference { .. })
    }

    /// Unsupported edits are shown but cannot be acted on
    pub fn is_actionable(&self) -> bool {
        self.record().map_or(true, |record| record.command.is_supported())
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EntryKind::Reference { .. } => "reference",
            EntryKind::Node { .. } => "node",
            EntryKind::Plug { .. } => "plug",
            EntryKind::Edit { .. } => "edit",
        }
    }

    /// Target and command filter to hand to the host when removing the
    /// edits this entry stands for
    pub fn removal_target(&self) -> Option<(String, Option<CommandType>)> {
        match &self.kind {
            EntryKind::Reference { .. } => Some((self.reference_node.clone(), None)),
            EntryKind::Node { node } => Some((node.clone(), None)),
            EntryKind::Plug { plug } => Some((plug.clone(), None)),
            EntryKind::Edit { record } => {
                let target = record.target.clone()?;
                Some((target, Some(record.command)))
            }
        }
    }

    pub fn tooltip(&self) -> String {
        match &self.kind {
            EntryKind::Reference { loaded } => {
                let counts = self.edit_counts();
                format!(
                    "{} ({}): {} failed, {} successful, {} unsupported",
                    self.reference_node,
                    if *loaded { "loaded" } else { "unloaded" },
                    counts.failed,
                    counts.successful,
                    counts.unsupported
                )
            }
            EntryKind::Node { node } => node.clone(),
            EntryKind::Plug { plug } => plug.clone(),
            EntryKind::Edit { record } => {
                let state = if record.failed { "failed" } else { "successful" };
                if record.command.is_supported() {
                    format!("{} edit", state)
                } else {
                    format!("Unsupported edit ({}), cannot be removed individually", state)
                }
            }
        }
    }

    /// Recompute `failed` bottom-up from the edit leaves
    pub fn recompute_failed(&mut self) -> bool {
        if let EntryKind::Edit { record } = &self.kind {
            self.failed = record.failed;
            return self.failed;
        }
        let mut failed = false;
        for child in &mut self.children {
            failed |= child.recompute_failed();
        }
        self.failed = failed;
        failed
    }

    pub fn edit_counts(&self) -> EditCounts {
        let mut counts = EditCounts::default();
        self.walk(&mut |entry| {
            if let Some(record) = entry.record() {
                if record.failed {
                    counts.failed += 1;
                } else {
                    counts.successful += 1;
                }
                if !record.command.is_supported() {
                    counts.unsupported += 1;
                }
            }
        });
        counts
    }

    /// Pre-order traversal including `self`
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TreeEntry)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut TreeEntry)) {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_labels_and_ids() {
        let reference = TreeEntry::reference("charRigRN", true);
        assert_eq!(reference.stable_id, "reference_charRigRN");
        assert_eq!(reference.label, "charRigRN");

        let node = TreeEntry::node("charRigRN", "|charRig:root|charRig:arm");
        assert_eq!(node.label, "arm");
        assert_eq!(node.stable_id, "node_|charRig:root|charRig:arm");
        assert_eq!(node.targets, vec!["|charRig:root|charRig:arm".to_string()]);

        let plug = TreeEntry::plug("charRigRN", "charRig:arm.translateX");
        assert_eq!(plug.label, "translateX");
        assert_eq!(plug.stable_id, "plug_charRig:arm.translateX");
    }

    #[test]
    fn test_unsupported_edit_is_not_actionable() {
        let record = EditRecord::parse("fooCommand bar baz", true);
        let entry = TreeEntry::edit("refRN", record, "edit_fooCommand bar baz".to_string());
        assert!(!entry.is_actionable());
        assert!(entry.failed);
        assert!(entry.targets.is_empty());
        assert!(entry.removal_target().is_none());
        assert!(entry.tooltip().starts_with("Unsupported edit"));
    }

    #[test]
    fn test_removal_targets() {
        let record = EditRecord::parse("setAttr ns:a.tx 1", false);
        let edit = TreeEntry::edit("refRN", record, "edit_x".to_string());
        assert_eq!(
            edit.removal_target(),
            Some(("ns:a.tx".to_string(), Some(CommandType::SetAttr)))
        );
        let reference = TreeEntry::reference("refRN", false);
        assert_eq!(reference.removal_target(), Some(("refRN".to_string(), None)));
    }

    #[test]
    fn test_recompute_failed_bottom_up() {
        let mut node = TreeEntry::node("refRN", "ns:a");
        let mut plug = TreeEntry::plug("refRN", "ns:a.tx");
        plug.children.push(TreeEntry::edit(
            "refRN",
            EditRecord::parse("setAttr ns:a.tx 1", true),
            "edit_1".to_string(),
        ));
        node.children.push(plug);
        node.children.push(TreeEntry::plug("refRN", "ns:a.ty"));

        assert!(node.recompute_failed());
        assert!(node.children[0].failed);
        assert!(!node.children[1].failed);

        node.children[0].children.clear();
        assert!(!node.recompute_failed());
    }

    #[test]
    fn test_add_target_deduplicates() {
        let mut reference = TreeEntry::reference("refRN", true);
        reference.add_target("b");
        reference.add_target("a");
        reference.add_target("b");
        assert_eq!(reference.targets, vec!["b".to_string(), "a".to_string()]);
    }
}
