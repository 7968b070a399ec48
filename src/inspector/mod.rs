//! Reference inspector
//!
//! Ties the host, the settings and the current tree together. The tree is
//! only ever replaced as a whole: a reload either completes and swaps in the
//! new tree with the previous expansion and selection restored, or fails and
//! leaves the last good tree in place.

pub mod actions;

pub use actions::{ActionError, ActionOutcome};

use crate::config::InspectorConfig;
use crate::host::{collect_references, SceneHost};
use crate::reference_tree::{build_tree, ReferenceTree, ViewState};
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// Last message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

pub struct ReferenceInspector<H: SceneHost> {
    host: H,
    config: InspectorConfig,
    tree: ReferenceTree,
    status: Option<StatusMessage>,
}

impl<H: SceneHost> ReferenceInspector<H> {
    /// Create an inspector with an empty tree; call [`reload`](Self::reload)
    /// to populate it
    pub fn new(host: H, config: InspectorConfig) -> Self {
        Self {
            host,
            config,
            tree: ReferenceTree::new(),
            status: None,
        }
    }

    pub fn tree(&self) -> &ReferenceTree {
        &self.tree
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Replace the settings and rebuild with them
    pub fn set_config(&mut self, config: InspectorConfig) -> Result<(), String> {
        self.config = config;
        self.reload()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    fn set_status(&mut self, text: String, severity: Severity) {
        self.status = Some(StatusMessage { text, severity });
    }

    /// Rebuild the tree from current host state
    pub fn reload(&mut self) -> Result<(), String> {
        let state = ViewState::capture(&self.tree);

        let snapshots = match collect_references(&self.host, &self.config) {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!("Reload failed, keeping previous tree: {}", e);
                self.set_status(format!("Reload failed: {}", e), Severity::Warning);
                return Err(e);
            }
        };

        let mut tree = build_tree(&snapshots);
        state.apply(&mut tree, self.config.expand_failed);

        let counts = tree.edit_counts();
        debug!(
            "🌳 Rebuilt tree: {} references, {} entries, {} failed / {} successful edits",
            tree.references.len(),
            tree.entries().len(),
            counts.failed,
            counts.successful
        );
        self.tree = tree;
        self.set_status(
            format!("Loaded {} reference(s), {} edit(s)", self.tree.references.len(), counts.total()),
            Severity::Info,
        );
        Ok(())
    }

    pub fn select(&mut self, stable_id: &str, additive: bool) {
        self.tree.select(stable_id, additive);
    }

    pub fn clear_selection(&mut self) {
        self.tree.clear_selection();
    }

    pub fn toggle_expanded(&mut self, stable_id: &str) {
        self.tree.toggle_expanded(stable_id);
    }

    pub fn select_in_scene(&mut self) -> Result<ActionOutcome, ActionError> {
        let result = actions::select_in_scene(&mut self.host, &self.tree.selected());
        self.finish_action(result)
    }

    pub fn load_selected(&mut self) -> Result<ActionOutcome, ActionError> {
        let result = actions::set_references_loaded(&mut self.host, &self.tree.selected(), true);
        self.finish_action(result)
    }

    pub fn unload_selected(&mut self) -> Result<ActionOutcome, ActionError> {
        let result = actions::set_references_loaded(&mut self.host, &self.tree.selected(), false);
        self.finish_action(result)
    }

    pub fn remove_selected_edits(&mut self, only_successful: bool) -> Result<ActionOutcome, ActionError> {
        let result = actions::remove_edits(&mut self.host, &self.tree.selected(), only_successful);
        self.finish_action(result)
    }

    /// Pretty JSON report of the current tree
    pub fn report_json(&self) -> Result<String, String> {
        self.tree.report().to_json()
    }

    fn finish_action(
        &mut self,
        result: Result<ActionOutcome, ActionError>,
    ) -> Result<ActionOutcome, ActionError> {
        match &result {
            Ok(outcome) => {
                info!("{}", outcome.message);
                let reloaded = if outcome.mutated && self.config.auto_reload {
                    self.reload().is_ok()
                } else {
                    true
                };
                // A failed reload keeps its own warning in the status line
                if reloaded {
                    self.set_status(outcome.message.clone(), Severity::Info);
                }
            }
            Err(e) => {
                warn!("{}", e);
                self.set_status(e.to_string(), Severity::Warning);
            }
        }
        result
    }
}
