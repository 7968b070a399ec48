//! Application-wide constants and default values
//!
//! Centralized location for the fixed names and sizes used by the inspector

/// Reference node the host creates for shared nodes; never listed
pub const SHARED_REFERENCE_NODE: &str = "sharedReferenceNode";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "refedit";

/// Settings file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "settings.json";

/// Panel sizing constants
pub mod panel {
    /// Default window size
    pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [520.0, 640.0];

    /// Minimum window size
    pub const MIN_WINDOW_SIZE: [f32; 2] = [320.0, 240.0];

    /// Indentation per tree level
    pub const TREE_INDENT: f32 = 14.0;
}
