//! Panels for the reference edits editor
//!
//! Panels only render the current tree and report what the user asked for
//! as [`PanelAction`]s; the editor applies them to the inspector.

mod tree;

pub use tree::TreePanel;

/// Actions requested from a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Reload,
    ToggleExpanded(String),
    Select { stable_id: String, additive: bool },
    ClearSelection,
    SelectInScene,
    Load,
    Unload,
    RemoveEdits,
    RemoveSuccessfulEdits,
    CopyReport,
}
