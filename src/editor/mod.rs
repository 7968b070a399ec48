//! Reference edits editor
//!
//! eframe application projecting a [`ReferenceInspector`] into a toolbar,
//! the edit tree and a status line.

pub mod panels;

pub use panels::{PanelAction, TreePanel};

use crate::host::SceneHost;
use crate::inspector::ReferenceInspector;
use eframe::egui;
use log::{debug, warn};

/// Main application state for the reference edits editor
pub struct ReferenceEditor<H: SceneHost> {
    inspector: ReferenceInspector<H>,
    tree_panel: TreePanel,
}

impl<H: SceneHost> ReferenceEditor<H> {
    pub fn new(inspector: ReferenceInspector<H>) -> Self {
        Self {
            inspector,
            tree_panel: TreePanel::new(),
        }
    }

    pub fn inspector(&self) -> &ReferenceInspector<H> {
        &self.inspector
    }

    /// Apply one panel action to the inspector. Failures end up in the
    /// inspector's status line.
    pub fn apply_action(&mut self, ctx: &egui::Context, action: PanelAction) {
        debug!("Panel action: {:?}", action);
        match action {
            PanelAction::Reload => {
                let _ = self.inspector.reload();
            }
            PanelAction::ToggleExpanded(stable_id) => self.inspector.toggle_expanded(&stable_id),
            PanelAction::Select { stable_id, additive } => self.inspector.select(&stable_id, additive),
            PanelAction::ClearSelection => self.inspector.clear_selection(),
            PanelAction::SelectInScene => {
                let _ = self.inspector.select_in_scene();
            }
            PanelAction::Load => {
                let _ = self.inspector.load_selected();
            }
            PanelAction::Unload => {
                let _ = self.inspector.unload_selected();
            }
            PanelAction::RemoveEdits => {
                let _ = self.inspector.remove_selected_edits(false);
            }
            PanelAction::RemoveSuccessfulEdits => {
                let _ = self.inspector.remove_selected_edits(true);
            }
            PanelAction::CopyReport => match self.inspector.report_json() {
                Ok(json) => ctx.copy_text(json),
                Err(e) => warn!("{}", e),
            },
        }
    }
}

impl<H: SceneHost> eframe::App for ReferenceEditor<H> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::F5) {
                actions.push(PanelAction::Reload);
            }
            if i.key_pressed(egui::Key::Escape) {
                actions.push(PanelAction::ClearSelection);
            }
        });

        let has_selection = !self.inspector.tree().selected().is_empty();
        egui::TopBottomPanel::top("reference_toolbar").show(ctx, |ui| {
            self.tree_panel.render_toolbar(ui, has_selection, &mut actions);
        });

        egui::TopBottomPanel::bottom("reference_status").show(ctx, |ui| {
            TreePanel::render_status(ui, self.inspector.status());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.tree_panel.render_tree(ui, self.inspector.tree(), &mut actions);
        });

        for action in actions {
            self.apply_action(ctx, action);
        }
    }
}
