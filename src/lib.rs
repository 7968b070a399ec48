//! Reference edit inspector library
//!
//! Parses the edit strings a host application records on scene references,
//! groups them into a reference → node → plug → edit tree, and drives
//! load/unload/remove-edit actions through the [`host::SceneHost`] trait.

pub mod config;
pub mod constants;
pub mod edits;
pub mod editor;
pub mod host;
pub mod inspector;
pub mod reference_tree;
pub mod theme;

// Re-export commonly used types
pub use config::InspectorConfig;
pub use edits::{CommandType, EditRecord};
pub use host::{MemoryScene, SceneHost};
pub use inspector::{ActionError, ActionOutcome, ReferenceInspector};
pub use reference_tree::{build_tree, ReferenceSnapshot, ReferenceTree, TreeEntry, ViewState};
