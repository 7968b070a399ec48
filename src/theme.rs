//! Centralized styling constants for the reference edits panel
//!
//! Single source of truth for the colors used to flag edit outcomes.

use egui::Color32;

/// Color palette for the panel
pub struct Colors {
    // Edit outcome
    pub failed: Color32,
    pub successful: Color32,
    pub unsupported: Color32,

    // Reference state
    pub unloaded: Color32,

    // Status line
    pub status_info: Color32,
    pub status_warning: Color32,
}

impl Colors {
    /// Get the default color palette
    pub fn default() -> Self {
        Self {
            failed: Color32::from_rgb(230, 90, 80),
            successful: Color32::from_rgb(200, 200, 200),
            unsupported: Color32::from_rgb(130, 130, 130),

            unloaded: Color32::from_rgb(150, 150, 110),

            status_info: Color32::from_rgb(140, 190, 140),
            status_warning: Color32::from_rgb(230, 180, 80),
        }
    }
}

/// Complete theme containing all styling constants
pub struct Theme {
    pub colors: Colors,
}

impl Theme {
    /// Get the default theme
    pub fn default() -> Self {
        Self {
            colors: Colors::default(),
        }
    }
}

/// Global theme instance
static GLOBAL_THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(|| Theme::default());

/// Get the global theme
pub fn theme() -> &'static Theme {
    &GLOBAL_THEME
}

pub fn colors() -> &'static Colors {
    &theme().colors
}
