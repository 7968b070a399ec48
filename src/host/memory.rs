//! In-memory scene host
//!
//! Holds a scene document (references, their recorded edits, scene objects)
//! that can be loaded from JSON. Used by the desktop build and by tests in
//! place of a running application.

use super::SceneHost;
use crate::edits::{CommandType, EditRecord};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    pub references: Vec<MemoryReference>,
    pub objects: Vec<String>,
    pub selection: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryReference {
    pub name: String,
    pub loaded: bool,
    pub nested: bool,
    pub failed_edits: Vec<String>,
    pub successful_edits: Vec<String>,
}

impl MemoryReference {
    pub fn new(name: &str, loaded: bool) -> Self {
        Self {
            name: name.to_string(),
            loaded,
            ..Default::default()
        }
    }

    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    pub fn with_failed(mut self, edits: &[&str]) -> Self {
        self.failed_edits.extend(edits.iter().map(|edit| edit.to_string()));
        self
    }

    pub fn with_successful(mut self, edits: &[&str]) -> Self {
        self.successful_edits.extend(edits.iter().map(|edit| edit.to_string()));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    document: SceneDocument,
}

impl MemoryScene {
    pub fn new(document: SceneDocument) -> Self {
        Self { document }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let document: SceneDocument =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse scene document: {}", e))?;
        Ok(Self::new(document))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene document {}: {}", path.display(), e))?;
        let scene = Self::from_json(&content)?;
        info!(
            "Loaded scene document {} ({} references)",
            path.display(),
            scene.document.references.len()
        );
        Ok(scene)
    }

    pub fn document(&self) -> &SceneDocument {
        &self.document
    }

    pub fn selection(&self) -> &[String] {
        &self.document.selection
    }

    fn reference(&self, name: &str) -> Result<&MemoryReference, String> {
        self.document
            .references
            .iter()
            .find(|reference| reference.name == name)
            .ok_or_else(|| format!("Reference node not found: {}", name))
    }

    fn reference_mut(&mut self, name: &str) -> Result<&mut MemoryReference, String> {
        self.document
            .references
            .iter_mut()
            .find(|reference| reference.name == name)
            .ok_or_else(|| format!("Reference node not found: {}", name))
    }
}

/// Whether `edit` is recorded against `target`. A node target also matches
/// edits on that node's plugs.
fn edit_matches(edit: &str, target: &str, command: Option<CommandType>) -> bool {
    let record = EditRecord::parse(edit, false);
    if command.map_or(false, |command| command != record.command) {
        return false;
    }
    match record.target.as_deref() {
        Some(edit_target) if edit_target == target => true,
        Some(_) => !target.contains('.') && record.node() == Some(target),
        None => false,
    }
}

impl SceneHost for MemoryScene {
    fn list_reference_nodes(&self) -> Result<Vec<String>, String> {
        Ok(self
            .document
            .references
            .iter()
            .map(|reference| reference.name.clone())
            .collect())
    }

    fn is_nested_reference(&self, reference_node: &str) -> Result<bool, String> {
        Ok(self.reference(reference_node)?.nested)
    }

    fn is_reference_loaded(&self, reference_node: &str) -> Result<bool, String> {
        Ok(self.reference(reference_node)?.loaded)
    }

    fn query_edit_strings(
        &self,
        reference_node: &str,
        failed: bool,
        successful: bool,
    ) -> Result<Vec<String>, String> {
        let reference = self.reference(reference_node)?;
        let mut edits = Vec::new();
        if failed {
            edits.extend(reference.failed_edits.iter().cloned());
        }
        if successful {
            edits.extend(reference.successful_edits.iter().cloned());
        }
        Ok(edits)
    }

    fn load_reference(&mut self, reference_node: &str) -> Result<(), String> {
        let reference = self.reference_mut(reference_node)?;
        if !reference.loaded {
            reference.loaded = true;
            info!("Loaded reference {}", reference_node);
        }
        Ok(())
    }

    fn unload_reference(&mut self, reference_node: &str) -> Result<(), String> {
        let reference = self.reference_mut(reference_node)?;
        if reference.loaded {
            reference.loaded = false;
            info!("Unloaded reference {}", reference_node);
        }
        Ok(())
    }

    fn remove_edits(
        &mut self,
        target: &str,
        only_successful: bool,
        command: Option<CommandType>,
    ) -> Result<(), String> {
        let targets_reference = self.document.references.iter().any(|r| r.name == target);
        let matches = |edit: &String| {
            if targets_reference {
                command.map_or(true, |command| EditRecord::parse(edit, false).command == command)
            } else {
                edit_matches(edit, target, command)
            }
        };

        let owners: Vec<usize> = self
            .document
            .references
            .iter()
            .enumerate()
            .filter(|(_, reference)| !targets_reference || reference.name == target)
            .filter(|(_, reference)| {
                reference.successful_edits.iter().any(&matches)
                    || (!only_successful && reference.failed_edits.iter().any(&matches))
            })
            .map(|(index, _)| index)
            .collect();

        if let Some(loaded) = owners.iter().map(|&i| &self.document.references[i]).find(|r| r.loaded) {
            return Err(format!(
                "Cannot remove edits while reference {} is loaded",
                loaded.name
            ));
        }
        if owners.is_empty() {
            debug!("No edits recorded against {}", target);
            return Ok(());
        }

        for index in owners {
            let reference = &mut self.document.references[index];
            if !only_successful {
                reference.failed_edits.retain(|edit| !matches(edit));
            }
            reference.successful_edits.retain(|edit| !matches(edit));
            info!("Removed edits on {} from {}", target, reference.name);
        }
        Ok(())
    }

    fn object_exists(&self, name: &str) -> bool {
        self.document.objects.iter().any(|object| object == name)
    }

    fn select_objects(&mut self, names: &[String]) -> Result<(), String> {
        if let Some(missing) = names.iter().find(|name| !self.object_exists(name)) {
            return Err(format!("No object matches name: {}", missing));
        }
        self.document.selection = names.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(loaded: bool) -> MemoryScene {
        MemoryScene::new(SceneDocument {
            references: vec![MemoryReference::new("charRigRN", loaded)
                .with_failed(&["setAttr charRig:arm.translateX 5"])
                .with_successful(&[
                    "setAttr charRig:arm.rotateY 2",
                    r#"connectAttr "ctrl.out" "charRig:arm.rotateY""#,
                    "setAttr charRig:leg.tx 1",
                    "fooCommand bar baz",
                ])],
            objects: vec!["charRig:arm".to_string()],
            selection: vec![],
        })
    }

    #[test]
    fn test_query_edit_strings() {
        let scene = scene(false);
        assert_eq!(scene.query_edit_strings("charRigRN", true, false).unwrap().len(), 1);
        assert_eq!(scene.query_edit_strings("charRigRN", false, true).unwrap().len(), 4);
        assert_eq!(scene.query_edit_strings("charRigRN", true, true).unwrap().len(), 5);
        assert!(scene.query_edit_strings("missingRN", true, true).is_err());
    }

    #[test]
    fn test_load_and_unload_are_idempotent() {
        let mut scene = scene(false);
        scene.load_reference("charRigRN").unwrap();
        scene.load_reference("charRigRN").unwrap();
        assert!(scene.is_reference_loaded("charRigRN").unwrap());
        scene.unload_reference("charRigRN").unwrap();
        scene.unload_reference("charRigRN").unwrap();
        assert!(!scene.is_reference_loaded("charRigRN").unwrap());
    }

    #[test]
    fn test_remove_edits_requires_unloaded_reference() {
        let mut scene = scene(true);
        let err = scene.remove_edits("charRig:arm", false, None).unwrap_err();
        assert!(err.contains("loaded"));
        assert_eq!(scene.query_edit_strings("charRigRN", true, true).unwrap().len(), 5);
    }

    #[test]
    fn test_remove_edits_on_node_includes_plugs() {
        let mut scene = scene(false);
        scene.remove_edits("charRig:arm", false, None).unwrap();
        let remaining = scene.query_edit_strings("charRigRN", true, true).unwrap();
        assert_eq!(remaining, vec!["setAttr charRig:leg.tx 1", "fooCommand bar baz"]);
    }

    #[test]
    fn test_remove_edits_with_command_filter() {
        let mut scene = scene(false);
        scene
            .remove_edits("charRig:arm.rotateY", false, Some(CommandType::ConnectAttr))
            .unwrap();
        let remaining = scene.query_edit_strings("charRigRN", false, true).unwrap();
        assert!(remaining.contains(&"setAttr charRig:arm.rotateY 2".to_string()));
        assert_eq!(remaining.len(), 3);
    }

    #[test]
    fn test_remove_only_successful_keeps_failed() {
        let mut scene = scene(false);
        scene.remove_edits("charRigRN", true, None).unwrap();
        assert_eq!(scene.query_edit_strings("charRigRN", true, false).unwrap().len(), 1);
        assert!(scene.query_edit_strings("charRigRN", false, true).unwrap().is_empty());
    }

    #[test]
    fn test_select_objects() {
        let mut scene = scene(false);
        scene.select_objects(&["charRig:arm".to_string()]).unwrap();
        assert_eq!(scene.selection().to_vec(), vec!["charRig:arm".to_string()]);
        assert!(scene.select_objects(&["nope".to_string()]).is_err());
        assert_eq!(scene.selection().len(), 1);
    }

    #[test]
    fn test_from_json() {
        let scene = MemoryScene::from_json(
            r#"{ "references": [ { "name": "aRN", "loaded": true, "successful_edits": ["setAttr a:x.v 0"] } ] }"#,
        )
        .unwrap();
        assert_eq!(scene.list_reference_nodes().unwrap(), vec!["aRN"]);
        assert!(!scene.is_nested_reference("aRN").unwrap());
        assert!(MemoryScene::from_json("not json").is_err());
    }
}
