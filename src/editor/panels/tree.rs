//! Tree panel implementation
//!
//! Renders the reference edit hierarchy with expand toggles, selectable rows,
//! failure colouring and per-row context menus.

use super::PanelAction;
use crate::constants::panel::TREE_INDENT;
use crate::inspector::{Severity, StatusMessage};
use crate::reference_tree::{EntryKind, ReferenceTree, TreeEntry};
use crate::theme;
use egui::{Color32, RichText, ScrollArea};

/// Tree panel renderer for the reference edit hierarchy
pub struct TreePanel;

impl TreePanel {
    pub fn new() -> Self {
        Self
    }

    /// Toolbar mirroring the context menu actions
    pub fn render_toolbar(&self, ui: &mut egui::Ui, has_selection: bool, actions: &mut Vec<PanelAction>) {
        ui.horizontal(|ui| {
            if ui.button("⟳ Reload").on_hover_text("Rebuild from the scene (F5)").clicked() {
                actions.push(PanelAction::Reload);
            }
            ui.separator();
            ui.add_enabled_ui(has_selection, |ui| {
                Self::action_buttons(ui, actions);
            });
            ui.separator();
            if ui.button("Copy report").on_hover_text("Copy all edits as JSON").clicked() {
                actions.push(PanelAction::CopyReport);
            }
        });
    }

    fn action_buttons(ui: &mut egui::Ui, actions: &mut Vec<PanelAction>) {
        if ui.button("Select in scene").clicked() {
            actions.push(PanelAction::SelectInScene);
        }
        if ui.button("Load").clicked() {
            actions.push(PanelAction::Load);
        }
        if ui.button("Unload").clicked() {
            actions.push(PanelAction::Unload);
        }
        if ui.button("Remove edits").clicked() {
            actions.push(PanelAction::RemoveEdits);
        }
        if ui.button("Remove successful edits").clicked() {
            actions.push(PanelAction::RemoveSuccessfulEdits);
        }
    }

    /// Render the tree content
    pub fn render_tree(&self, ui: &mut egui::Ui, tree: &ReferenceTree, actions: &mut Vec<PanelAction>) {
        if tree.is_empty() {
            ui.weak("No references in the scene");
            return;
        }

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.spacing_mut().indent = TREE_INDENT;
            for reference in &tree.references {
                Self::render_entry(ui, reference, actions);
            }
        });
    }

    fn render_entry(ui: &mut egui::Ui, entry: &TreeEntry, actions: &mut Vec<PanelAction>) {
        ui.horizontal(|ui| {
            if entry.children.is_empty() {
                let width = ui.spacing().interact_size.y;
                ui.add_space(width);
            } else if ui.small_button(if entry.expanded { "▼" } else { "▶" }).clicked() {
                actions.push(PanelAction::ToggleExpanded(entry.stable_id.clone()));
            }

            let text = RichText::new(&entry.label).color(Self::entry_color(entry));
            let tooltip = entry.tooltip();
            let response = ui
                .add_enabled(entry.is_actionable(), egui::SelectableLabel::new(entry.selected, text))
                .on_hover_text(tooltip.as_str())
                .on_disabled_hover_text(tooltip.as_str());

            if response.clicked() {
                let additive = ui.input(|i| i.modifiers.command || i.modifiers.shift);
                actions.push(PanelAction::Select {
                    stable_id: entry.stable_id.clone(),
                    additive,
                });
            }
            if response.secondary_clicked() && !entry.selected {
                actions.push(PanelAction::Select {
                    stable_id: entry.stable_id.clone(),
                    additive: false,
                });
            }
            response.context_menu(|ui| {
                Self::context_menu(ui, entry, actions);
            });

            if entry.is_reference() {
                let counts = entry.edit_counts();
                ui.weak(format!("{} failed / {} edits", counts.failed, counts.total()));
            }
        });

        if entry.expanded && !entry.children.is_empty() {
            ui.indent(&entry.stable_id, |ui| {
                for child in &entry.children {
                    Self::render_entry(ui, child, actions);
                }
            });
        }
    }

    fn context_menu(ui: &mut egui::Ui, entry: &TreeEntry, actions: &mut Vec<PanelAction>) {
        let mut chosen = None;
        if ui.button("Select in scene").clicked() {
            chosen = Some(PanelAction::SelectInScene);
        }
        ui.separator();
        if ui.button("Load reference").clicked() {
            chosen = Some(PanelAction::Load);
        }
        if ui.button("Unload reference").clicked() {
            chosen = Some(PanelAction::Unload);
        }
        ui.separator();
        let removable = entry.is_actionable();
        if ui.add_enabled(removable, egui::Button::new("Remove edits")).clicked() {
            chosen = Some(PanelAction::RemoveEdits);
        }
        if ui
            .add_enabled(removable, egui::Button::new("Remove successful edits"))
            .clicked()
        {
            chosen = Some(PanelAction::RemoveSuccessfulEdits);
        }

        if let Some(action) = chosen {
            actions.push(action);
            ui.close_menu();
        }
    }

    fn entry_color(entry: &TreeEntry) -> Color32 {
        let colors = theme::colors();
        match &entry.kind {
            _ if !entry.is_actionable() => colors.unsupported,
            _ if entry.failed => colors.failed,
            EntryKind::Reference { loaded: false } => colors.unloaded,
            _ => colors.successful,
        }
    }

    pub fn render_status(ui: &mut egui::Ui, status: Option<&StatusMessage>) {
        let colors = theme::colors();
        match status {
            Some(status) => {
                let color = match status.severity {
                    Severity::Info => colors.status_info,
                    Severity::Warning => colors.status_warning,
                };
                ui.colored_label(color, status.text.as_str());
            }
            None => {
                ui.weak("Ready");
            }
        }
    }
}

impl Default for TreePanel {
    fn default() -> Self {
        Self::new()
    }
}
