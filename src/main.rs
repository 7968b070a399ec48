//! refedit - reference edit inspector
//!
//! Opens a scene document (first argument, or `scene_path` from the settings
//! file) and shows the edits recorded on each of its references. Without a
//! scene document a built-in sample scene is shown.

use eframe::egui;
use log::{error, info};
use refedit::constants::panel::{DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE};
use refedit::editor::ReferenceEditor;
use refedit::host::{MemoryReference, MemoryScene, SceneDocument};
use refedit::{InspectorConfig, ReferenceInspector};
use std::path::PathBuf;

/// Sample scene used when no scene document is given
fn create_sample_scene() -> MemoryScene {
    MemoryScene::new(SceneDocument {
        references: vec![
            MemoryReference::new("charRigRN", true)
                .with_failed(&[
                    "setAttr charRig:arm.translateX 5",
                    r#"connectAttr "ctrl_grp|hand_ctrl.worldMatrix[0]" "charRig:arm.offsetParentMatrix""#,
                ])
                .with_successful(&[
                    "setAttr charRig:arm.rotateY 2",
                    "setAttr charRig:leg.visibility 0",
                    r#"parent -s -r "|charRig:root|charRig:spine" "|charRig:root|charRig:arm""#,
                    "lockNode -l 1 charRig:root",
                ]),
            MemoryReference::new("propRN", false)
                .with_successful(&["setAttr prop:crate.scaleY 1.5"]),
            MemoryReference::new("propDetailRN", true)
                .nested()
                .with_successful(&["setAttr propDetail:bolt.v 0"]),
            MemoryReference::new("sharedReferenceNode", true),
        ],
        objects: vec![
            "charRig:arm".to_string(),
            "charRig:leg".to_string(),
            "|charRig:root|charRig:spine".to_string(),
            "prop:crate".to_string(),
        ],
        selection: Vec::new(),
    })
}

/// Application entry point
fn main() -> Result<(), eframe::Error> {
    let config_path = InspectorConfig::default_path();
    let config = config_path
        .as_deref()
        .map(InspectorConfig::load_or_default)
        .unwrap_or_default();

    let filter = config.log_filter.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let scene_path = std::env::args().nth(1).map(PathBuf::from).or_else(|| config.scene_path.clone());
    let scene = match scene_path {
        Some(path) => match MemoryScene::load_from_file(&path) {
            Ok(scene) => scene,
            Err(e) => {
                error!("{}; showing the sample scene", e);
                create_sample_scene()
            }
        },
        None => {
            info!("No scene document given, showing the sample scene");
            create_sample_scene()
        }
    };

    let mut inspector = ReferenceInspector::new(scene, config);
    if let Err(e) = inspector.reload() {
        error!("Initial load failed: {}", e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE)
            .with_app_id("com.refedit.inspector"),
        ..Default::default()
    };

    eframe::run_native(
        "Reference Edits",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(ReferenceEditor::new(inspector)))
        }),
    )
}
