//! User actions on selected entries
//!
//! Each action checks its preconditions for the whole selection before the
//! first host mutation. Host failures are returned as-is and never retried.

use crate::edits::{split_plug, CommandType};
use crate::host::SceneHost;
use crate::reference_tree::{EntryKind, TreeEntry};
use log::{debug, warn};
use std::fmt;

/// Why an action did not run (or stopped)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The action cannot run on the current selection or scene state
    Precondition(String),
    /// The host rejected a call
    Host(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Precondition(message) => write!(f, "{}", message),
            ActionError::Host(message) => write!(f, "Host error: {}", message),
        }
    }
}

impl std::error::Error for ActionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub message: String,
    /// The scene's references or edits changed
    pub mutated: bool,
}

impl ActionOutcome {
    fn new(message: String, mutated: bool) -> Self {
        Self { message, mutated }
    }
}

fn require_selection(selection: &[&TreeEntry]) -> Result<(), ActionError> {
    if selection.is_empty() {
        return Err(ActionError::Precondition("Nothing selected".to_string()));
    }
    Ok(())
}

/// Reference nodes owning the selection, first-selected first
pub fn selected_references(selection: &[&TreeEntry]) -> Vec<String> {
    let mut references: Vec<String> = Vec::new();
    for entry in selection {
        if !references.contains(&entry.reference_node) {
            references.push(entry.reference_node.clone());
        }
    }
    references
}

/// Select the scene nodes behind the selected entries
pub fn select_in_scene<H: SceneHost + ?Sized>(
    host: &mut H,
    selection: &[&TreeEntry],
) -> Result<ActionOutcome, ActionError> {
    require_selection(selection)?;

    let mut nodes: Vec<String> = Vec::new();
    for target in selection.iter().flat_map(|entry| entry.targets.iter()) {
        let node = split_plug(target).map_or(target.as_str(), |(node, _)| node);
        if !nodes.iter().any(|n| n == node) {
            nodes.push(node.to_string());
        }
    }

    let (existing, missing): (Vec<String>, Vec<String>) =
        nodes.into_iter().partition(|node| host.object_exists(node));
    for node in &missing {
        warn!("Cannot select {}: no such object in the scene", node);
    }
    if existing.is_empty() {
        return Err(ActionError::Precondition(
            "None of the selected targets exist in the scene".to_string(),
        ));
    }

    host.select_objects(&existing).map_err(ActionError::Host)?;
    Ok(ActionOutcome::new(
        format!("Selected {} object(s)", existing.len()),
        false,
    ))
}

/// Load or unload the references owning the selection
pub fn set_references_loaded<H: SceneHost + ?Sized>(
    host: &mut H,
    selection: &[&TreeEntry],
    load: bool,
) -> Result<ActionOutcome, ActionError> {
    require_selection(selection)?;

    let verb = if load { "Loaded" } else { "Unloaded" };
    let mut changed = 0;
    for reference in selected_references(selection) {
        if host.is_reference_loaded(&reference).map_err(ActionError::Host)? == load {
            debug!("Reference {} already {}", reference, verb.to_lowercase());
            continue;
        }
        if load {
            host.load_reference(&reference).map_err(ActionError::Host)?;
        } else {
            host.unload_reference(&reference).map_err(ActionError::Host)?;
        }
        changed += 1;
    }

    Ok(ActionOutcome::new(
        format!("{} {} reference(s)", verb, changed),
        changed > 0,
    ))
}

/// Remove the edits the selected entries stand for
///
/// Refused while any owning reference is loaded, or when an unsupported
/// edit is part of the selection.
pub fn remove_edits<H: SceneHost + ?Sized>(
    host: &mut H,
    selection: &[&TreeEntry],
    only_successful: bool,
) -> Result<ActionOutcome, ActionError> {
    require_selection(selection)?;

    if selection.iter().any(|entry| !entry.is_actionable()) {
        return Err(ActionError::Precondition(
            "Unsupported edits cannot be removed".to_string(),
        ));
    }

    for reference in selected_references(selection) {
        if host.is_reference_loaded(&reference).map_err(ActionError::Host)? {
            return Err(ActionError::Precondition(format!(
                "Unload reference {} before removing its edits",
                reference
            )));
        }
    }

    // Failed edit entries have no successful edits behind them
    let (skipped, removable): (Vec<&TreeEntry>, Vec<&TreeEntry>) =
        selection.iter().copied().partition(|entry| {
            only_successful && entry.failed && matches!(entry.kind, EntryKind::Edit { .. })
        });

    let mut targets: Vec<(String, Option<CommandType>)> = Vec::new();
    for target in removable.iter().filter_map(|entry| entry.removal_target()) {
        if !targets.contains(&target) {
            targets.push(target);
        }
    }

    for (target, command) in &targets {
        host.remove_edits(target, only_successful, *command)
            .map_err(ActionError::Host)?;
    }

    let mut message = format!(
        "Removed {}edits on {} target(s)",
        if only_successful { "successful " } else { "" },
        targets.len()
    );
    if !skipped.is_empty() {
        debug!("Skipped {} failed edit(s) while removing successful edits", skipped.len());
        message.push_str(&format!(", skipped {} failed edit(s)", skipped.len()));
    }
    Ok(ActionOutcome::new(message, !targets.is_empty()))
}
