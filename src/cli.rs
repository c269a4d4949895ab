//! Command-line argument parsing for the viewer
//!
//! Supports:
//! - Opening an image, or the first image in a directory
//! - Overriding zoom mode, checkerboard and theme for one session
//! - Forcing the software backend

use clap::Parser;
use std::path::PathBuf;

use crate::config::ViewerConfig;
use crate::view::CheckerboardMode;
use crate::viewport::ZoomMode;

/// A fast image viewer
#[derive(Parser, Debug)]
#[command(name = "lumen", version, about = "A fast image viewer")]
pub struct CliArgs {
    /// Image file or directory to open
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Initial zoom mode
    #[arg(long, value_enum, value_name = "MODE")]
    pub zoom_mode: Option<ZoomMode>,

    /// Never use the accelerated backend
    #[arg(long)]
    pub software: bool,

    /// Checkerboard behind transparent images
    #[arg(long, value_enum, value_name = "MODE")]
    pub checkerboard: Option<CheckerboardMode>,

    /// Theme id (built-in or from the themes directory)
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,
}

/// The startup mode determines what to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Start with no image
    Empty,
    /// Open a single image
    SingleImage(PathBuf),
    /// Open the first image found in a directory
    Directory(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: StartupMode,
    pub zoom_mode: Option<ZoomMode>,
    pub software: bool,
    pub checkerboard: Option<CheckerboardMode>,
    pub theme: Option<String>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let mode = match self.path {
            None => StartupMode::Empty,
            Some(path) if path.is_dir() => StartupMode::Directory(path),
            Some(path) => {
                if !crate::util::is_image_file(&path) {
                    return Err(format!("Not an image: {}", path.display()));
                }
                StartupMode::SingleImage(path)
            }
        };

        Ok(StartupConfig {
            mode,
            zoom_mode: self.zoom_mode,
            software: self.software,
            checkerboard: self.checkerboard,
            theme: self.theme,
        })
    }
}

impl StartupConfig {
    /// Layer command-line overrides over the loaded config
    pub fn apply(&self, config: &mut ViewerConfig) {
        if let Some(mode) = self.zoom_mode {
            config.zoom_mode = mode;
        }
        if self.software {
            config.use_accelerated = false;
        }
        if let Some(mode) = self.checkerboard {
            config.checkerboard.mode = mode;
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
    }

    /// The image to show first, if any
    pub fn initial_image(&self) -> Option<PathBuf> {
        match &self.mode {
            StartupMode::Empty => None,
            StartupMode::SingleImage(path) => Some(path.clone()),
            StartupMode::Directory(dir) => crate::util::images_in_dir(dir).into_iter().next(),
        }
    }
}
