//! Viewer configuration persistence
//!
//! Stores user preferences in `~/.config/lumen-viewer/config.yaml`.
//! Every field has a default so partial files are valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backend::Interpolation;
use crate::view::pipeline::CheckerboardMode;
use crate::viewport::ZoomMode;

/// Viewer configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Selected theme id (e.g., "dark", "light")
    pub theme: String,
    /// Policy used to derive the zoom factor when not manually zoomed
    pub zoom_mode: ZoomMode,
    /// Smallest zoom factor a zoom-out step may start from
    pub min_zoom: f64,
    /// Largest zoom factor a zoom-in step may start from
    pub max_zoom: f64,
    /// Pixels subtracted from the client size before computing fit ratios
    pub zoom_padding: f64,
    /// Delta used by zoom-in/zoom-out commands (one wheel notch)
    pub zoom_step: f64,
    /// Pan/zoom delta applied per tick while a nudge key is held
    pub key_step: f64,
    pub interpolation: Interpolation,
    /// Prefer the accelerated backend when no animation is running
    pub use_accelerated: bool,
    /// Largest bitmap edge the accelerated backend accepts
    pub max_texture_size: u32,
    pub checkerboard: CheckerboardConfig,
    pub nav_buttons: NavButtonConfig,
    pub text: TextConfig,
    pub message: MessageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerboardConfig {
    pub mode: CheckerboardMode,
    /// Edge length of one checker tile in pixels
    pub tile_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavButtonConfig {
    pub left: bool,
    pub right: bool,
    pub radius: f64,
    /// Gap between the client edge and the button circle
    pub padding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// TTF/OTF file used for overlay text; system fonts are probed when unset
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// How long a message stays visible (0 = until cleared)
    pub duration_ms: u64,
    /// Delay before a message appears
    pub delay_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            zoom_mode: ZoomMode::AutoZoom,
            min_zoom: 0.01,
            max_zoom: 100.0,
            zoom_padding: 0.0,
            zoom_step: 120.0,
            key_step: 20.0,
            interpolation: Interpolation::NearestNeighbor,
            use_accelerated: true,
            max_texture_size: 16384,
            checkerboard: CheckerboardConfig::default(),
            nav_buttons: NavButtonConfig::default(),
            text: TextConfig::default(),
            message: MessageConfig::default(),
        }
    }
}

impl Default for CheckerboardConfig {
    fn default() -> Self {
        Self {
            mode: CheckerboardMode::Image,
            tile_size: 8,
        }
    }
}

impl Default for NavButtonConfig {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
            radius: 30.0,
            padding: 20.0,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            font_size: 16.0,
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            delay_ms: 0,
        }
    }
}

impl ViewerConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<ViewerConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Repair values that would break the transform math
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            tracing::warn!("Invalid min_zoom {}, using default", self.min_zoom);
            self.min_zoom = defaults.min_zoom;
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            tracing::warn!("Invalid max_zoom {}, using default", self.max_zoom);
            self.max_zoom = defaults.max_zoom.max(self.min_zoom);
        }
        if !(self.zoom_padding.is_finite() && self.zoom_padding >= 0.0) {
            self.zoom_padding = 0.0;
        }
        self.checkerboard.tile_size = self.checkerboard.tile_size.max(1);
        if !(self.nav_buttons.radius.is_finite() && self.nav_buttons.radius > 0.0) {
            self.nav_buttons.radius = defaults.nav_buttons.radius;
        }
        if !(self.text.font_size.is_finite() && self.text.font_size > 0.0) {
            self.text.font_size = defaults.text.font_size;
        }
        self
    }
}
