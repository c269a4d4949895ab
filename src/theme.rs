//! Theme system for the viewing surface
//!
//! Provides YAML-based theming with compile-time embedded themes
//! and user-defined themes from the config directory.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/lumen-viewer/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

// Embed theme YAML files at compile time
pub const DARK_YAML: &str = include_str!("../themes/dark.yaml");
pub const LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "dark", "light")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "dark",
        yaml: DARK_YAML,
    },
    BuiltinTheme {
        id: "light",
        yaml: LIGHT_YAML,
    },
];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<ViewerTheme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    ViewerTheme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<ViewerTheme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    ViewerTheme::from_builtin(id)
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Build from an ARGB u32
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Scale alpha by an opacity in `[0, 1]`
    pub fn fade(&self, opacity: f32) -> Self {
        let a = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(a)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|e| e.to_string())
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: UiThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub canvas: CanvasThemeData,
    #[serde(default)]
    pub checkerboard: CheckerboardThemeData,
    #[serde(default)]
    pub nav: NavThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CanvasThemeData {
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CheckerboardThemeData {
    #[serde(default)]
    pub light: Option<String>,
    #[serde(default)]
    pub dark: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NavThemeData {
    #[serde(default)]
    pub hover: Option<String>,
    #[serde(default)]
    pub pressed: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone)]
pub struct ViewerTheme {
    pub name: String,
    /// Canvas fill behind everything
    pub background: Color,
    /// Foreground for the message overlay
    pub text: Color,
    pub checkerboard_light: Color,
    pub checkerboard_dark: Color,
    pub nav_hover: Color,
    pub nav_pressed: Color,
    pub nav_icon: Color,
}

fn optional_color(value: &Option<String>, fallback: Color) -> Result<Color, String> {
    Ok(value
        .as_ref()
        .map(|s| Color::from_hex(s))
        .transpose()?
        .unwrap_or(fallback))
}

impl ViewerTheme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        ViewerTheme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let fallback = Self::fallback_dark();
        let ui = &data.ui;
        Ok(ViewerTheme {
            name: data.name,
            background: Color::from_hex(&ui.canvas.background)?,
            text: Color::from_hex(&ui.canvas.text)?,
            checkerboard_light: optional_color(&ui.checkerboard.light, fallback.checkerboard_light)?,
            checkerboard_dark: optional_color(&ui.checkerboard.dark, fallback.checkerboard_dark)?,
            nav_hover: optional_color(&ui.nav.hover, fallback.nav_hover)?,
            nav_pressed: optional_color(&ui.nav.pressed, fallback.nav_pressed)?,
            nav_icon: optional_color(&ui.nav.icon, fallback.nav_icon)?,
        })
    }

    /// Hardcoded theme used when the embedded YAML cannot be parsed
    fn fallback_dark() -> Self {
        Self {
            name: "Lumen Dark".to_string(),
            background: Color::rgb(0x1E, 0x1E, 0x1E),
            text: Color::rgb(0xE6, 0xE6, 0xE6),
            checkerboard_light: Color::rgb(0x4A, 0x4A, 0x4A),
            checkerboard_dark: Color::rgb(0x38, 0x38, 0x38),
            nav_hover: Color::rgba(0xFF, 0xFF, 0xFF, 0x30),
            nav_pressed: Color::rgba(0xFF, 0xFF, 0xFF, 0x50),
            nav_icon: Color::rgb(0xF0, 0xF0, 0xF0),
        }
    }

    /// Default dark theme (YAML-backed with Rust fallback)
    pub fn default_dark() -> Self {
        Self::from_yaml(DARK_YAML).unwrap_or_else(|_| Self::fallback_dark())
    }
}

impl Default for ViewerTheme {
    fn default() -> Self {
        Self::default_dark()
    }
}
