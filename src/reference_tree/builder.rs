//! Reference tree builder
//!
//! Rebuilds the whole hierarchy from a snapshot of host state. Failed edits
//! are processed before successful ones and failure flags are only ever
//! OR-ed in, so a later successful edit never clears an earlier failure.

use super::entry::TreeEntry;
use super::ReferenceTree;
use crate::edits::{split_plug, EditRecord};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Host state for one listed reference node, as read at rebuild time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSnapshot {
    pub name: String,
    pub loaded: bool,
    pub failed_edits: Vec<String>,
    pub successful_edits: Vec<String>,
}

/// Build a fresh tree, one root entry per snapshot in order
pub fn build_tree(references: &[ReferenceSnapshot]) -> ReferenceTree {
    let mut edit_ids = EditIds::default();
    let references: Vec<TreeEntry> = references
        .iter()
        .map(|snapshot| build_reference_entry(snapshot, &mut edit_ids))
        .collect();
    ReferenceTree { references }
}

/// Hands out edit ids, counting repeats per reference and outcome
#[derive(Default)]
struct EditIds {
    seen: HashMap<(String, bool, String), usize>,
}

impl EditIds {
    fn next(&mut self, reference: &str, record: &EditRecord) -> String {
        let key = (reference.to_string(), record.failed, record.raw.clone());
        let count = self.seen.entry(key).or_insert(0);
        *count += 1;
        edit_stable_id(reference, record, *count)
    }
}

/// `edit_<raw>#<reference>/<failed|successful>`, with `/<n>` appended for
/// the n-th identical edit in the same set
fn edit_stable_id(reference: &str, record: &EditRecord, occurrence: usize) -> String {
    let outcome = if record.failed { "failed" } else { "successful" };
    let id = format!("edit_{}#{}/{}", record.raw, reference, outcome);
    if occurrence == 1 {
        id
    } else {
        format!("{}/{}", id, occurrence)
    }
}

fn build_reference_entry(snapshot: &ReferenceSnapshot, edit_ids: &mut EditIds) -> TreeEntry {
    let reference = snapshot.name.as_str();
    let mut root = TreeEntry::reference(reference, snapshot.loaded);

    // Node entries are scoped to this reference
    let mut node_positions: HashMap<String, usize> = HashMap::new();
    let mut plug_positions: HashMap<String, usize> = HashMap::new();

    let failed_edits = snapshot.failed_edits.iter().map(|edit| (edit, true));
    let successful_edits = snapshot.successful_edits.iter().map(|edit| (edit, false));

    for (raw, failed) in failed_edits.chain(successful_edits) {
        let record = EditRecord::parse(raw, failed);
        let stable_id = edit_ids.next(reference, &record);

        let Some(target) = record.target.clone() else {
            debug!("🌳 Unsupported edit on {}: {}", reference, record.raw);
            root.failed |= failed;
            root.children.push(TreeEntry::edit(reference, record, stable_id));
            continue;
        };

        let node = split_plug(&target).map_or(target.as_str(), |(node, _)| node);
        root.add_target(node);
        root.failed |= failed;

        let node_position = *node_positions.entry(node.to_string()).or_insert_with(|| {
            root.children.push(TreeEntry::node(reference, node));
            root.children.len() - 1
        });
        let node_entry = &mut root.children[node_position];
        node_entry.failed |= failed;

        let edit = TreeEntry::edit(reference, record, stable_id);
        if split_plug(&target).is_some() {
            let plug_position = *plug_positions.entry(target.clone()).or_insert_with(|| {
                node_entry.children.push(TreeEntry::plug(reference, &target));
                node_entry.children.len() - 1
            });
            let plug_entry = &mut node_entry.children[plug_position];
            plug_entry.failed |= failed;
            plug_entry.children.push(edit);
        } else {
            node_entry.children.push(edit);
        }
    }

    debug!(
        "🌳 Built reference {} with {} top-level entries and {} nodes",
        reference,
        root.children.len(),
        root.targets.len()
    );
    root
}
