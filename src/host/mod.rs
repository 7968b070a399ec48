//! Host scene interface
//!
//! Everything the inspector knows about the scene comes through [`SceneHost`].
//! Calls are synchronous; errors carry the host's message and are never
//! retried.

mod memory;

pub use memory::{MemoryReference, MemoryScene, SceneDocument};

use crate::config::InspectorConfig;
use crate::constants::SHARED_REFERENCE_NODE;
use crate::edits::CommandType;
use crate::reference_tree::ReferenceSnapshot;
use log::debug;

/// Scene queries and mutations the inspector relies on
pub trait SceneHost {
    /// All reference nodes in the scene, in host order
    fn list_reference_nodes(&self) -> Result<Vec<String>, String>;

    /// True if the reference is itself brought in by another reference
    fn is_nested_reference(&self, reference_node: &str) -> Result<bool, String>;

    fn is_reference_loaded(&self, reference_node: &str) -> Result<bool, String>;

    /// Edit strings recorded on a reference, filtered by load outcome
    fn query_edit_strings(
        &self,
        reference_node: &str,
        failed: bool,
        successful: bool,
    ) -> Result<Vec<String>, String>;

    /// Loading an already loaded reference is a no-op
    fn load_reference(&mut self, reference_node: &str) -> Result<(), String>;

    /// Unloading an already unloaded reference is a no-op
    fn unload_reference(&mut self, reference_node: &str) -> Result<(), String>;

    /// Remove the edits recorded against `target` (a reference node, node
    /// or plug). Fails while the owning reference is loaded.
    fn remove_edits(
        &mut self,
        target: &str,
        only_successful: bool,
        command: Option<CommandType>,
    ) -> Result<(), String>;

    fn object_exists(&self, name: &str) -> bool;

    fn select_objects(&mut self, names: &[String]) -> Result<(), String>;
}

/// Read the references the panel lists, with their edit strings
///
/// The shared reference node and nested references are skipped. Failed and
/// successful edits are queried separately so their outcome is known.
pub fn collect_references<H: SceneHost + ?Sized>(
    host: &H,
    config: &InspectorConfig,
) -> Result<Vec<ReferenceSnapshot>, String> {
    let mut snapshots = Vec::new();

    for name in host.list_reference_nodes()? {
        if name == SHARED_REFERENCE_NODE {
            continue;
        }
        if host.is_nested_reference(&name)? {
            debug!("Skipping nested reference {}", name);
            continue;
        }

        let failed_edits = if config.show_failed_edits {
            host.query_edit_strings(&name, true, false)?
        } else {
            Vec::new()
        };
        let successful_edits = if config.show_successful_edits {
            host.query_edit_strings(&name, false, true)?
        } else {
            Vec::new()
        };

        snapshots.push(ReferenceSnapshot {
            loaded: host.is_reference_loaded(&name)?,
            name,
            failed_edits,
            successful_edits,
        });
    }

    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> MemoryScene {
        MemoryScene::new(SceneDocument {
            references: vec![
                MemoryReference::new("sharedReferenceNode", true),
                MemoryReference::new("charRigRN", true)
                    .with_failed(&["setAttr charRig:arm.translateX 5"])
                    .with_successful(&["setAttr charRig:arm.rotateY 2"]),
                MemoryReference::new("propRN", false).nested(),
                MemoryReference::new("setRN", false).with_successful(&["setAttr set:floor.v 0"]),
            ],
            ..Default::default()
        })
    }

    #[test]
    fn test_collect_skips_shared_and_nested() {
        let snapshots = collect_references(&scene(), &InspectorConfig::default()).unwrap();
        let names: Vec<&str> = snapshots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["charRigRN", "setRN"]);

        assert!(snapshots[0].loaded);
        assert_eq!(snapshots[0].failed_edits, vec!["setAttr charRig:arm.translateX 5"]);
        assert_eq!(snapshots[0].successful_edits, vec!["setAttr charRig:arm.rotateY 2"]);
        assert!(!snapshots[1].loaded);
    }

    #[test]
    fn test_collect_honours_edit_filters() {
        let config = InspectorConfig {
            show_successful_edits: false,
            ..Default::default()
        };
        let snapshots = collect_references(&scene(), &config).unwrap();
        assert_eq!(snapshots[0].failed_edits.len(), 1);
        assert!(snapshots[0].successful_edits.is_empty());
        assert!(snapshots[1].successful_edits.is_empty());
    }
}
