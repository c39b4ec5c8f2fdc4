//! Bootstrap configuration
//!
//! Application metadata, the fixed window parameters and the validation policy.
//! The shipped binary runs on [`BootstrapConfig::default`]; whether diagnostics
//! are on is decided by the build profile.

use serde::{Deserialize, Serialize};

use super::Config;

/// Khronos validation layer
pub const KHRONOS_VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// How validation layers and the debug messenger are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticsMode {
    /// No layers, no messenger
    Disabled,
    /// Use diagnostics when the driver offers them, otherwise warn and continue
    Optional,
    /// Missing layers or messenger entry points abort startup
    Required,
}

impl DiagnosticsMode {
    /// Mode selected by the build profile: required in debug builds, off in release
    pub const fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Required
        } else {
            Self::Disabled
        }
    }

    /// Whether diagnostics are requested at all
    pub const fn is_requested(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl Default for DiagnosticsMode {
    fn default() -> Self {
        Self::from_build()
    }
}

/// Window parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Vulkan".to_string(),
            resizable: false,
        }
    }
}

/// Complete bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Application name reported to the driver
    pub application_name: String,
    /// Application version (major, minor, patch)
    pub application_version: (u32, u32, u32),
    /// Engine name reported to the driver
    pub engine_name: String,
    /// Engine version (major, minor, patch)
    pub engine_version: (u32, u32, u32),
    /// Window parameters
    pub window: WindowConfig,
    /// Validation layers enabled when diagnostics are on
    pub validation_layers: Vec<String>,
    /// Diagnostics policy
    #[serde(default)]
    pub diagnostics: DiagnosticsMode,
}

impl BootstrapConfig {
    /// Create a configuration with defaults for everything but the name
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            application_name: app_name.into(),
            ..Self::default()
        }
    }

    /// Set window parameters
    #[must_use]
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Set the diagnostics policy
    #[must_use]
    pub fn with_diagnostics(mut self, mode: DiagnosticsMode) -> Self {
        self.diagnostics = mode;
        self
    }

    /// Replace the validation layer list
    #[must_use]
    pub fn with_validation_layers(mut self, layers: Vec<String>) -> Self {
        self.validation_layers = layers;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.application_name.is_empty() {
            return Err("Application name cannot be empty".to_string());
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(format!(
                "Window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }

        if self.diagnostics.is_requested() && self.validation_layers.is_empty() {
            return Err("Diagnostics requested but no validation layers configured".to_string());
        }

        Ok(())
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            application_name: "hello Triangle".to_string(),
            application_version: (1, 0, 0),
            engine_name: "No Engine".to_string(),
            engine_version: (1, 0, 0),
            window: WindowConfig::default(),
            validation_layers: vec![KHRONOS_VALIDATION_LAYER.to_string()],
            diagnostics: DiagnosticsMode::from_build(),
        }
    }
}

impl Config for BootstrapConfig {}
