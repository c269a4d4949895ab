//! Text rasterization for overlay text
//!
//! Wraps a fontdue font and a glyph cache. The font is optional: without
//! one, drawing is a no-op and measurement falls back to a fixed advance.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fontdue::{Font, FontSettings, Metrics};

use super::frame::{blend_colors, Frame};
use crate::geometry::{Point, Size};

// Glyph cache key: (character, font_size as bits)
pub type GlyphCacheKey = (char, u32);
pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Advance width per character, as a fraction of the font size, when no font is loaded
const FALLBACK_ADVANCE: f32 = 0.6;

/// Common system font locations probed when no font is configured
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load a font from an explicit path, or the first system font that parses
pub fn load_font(configured: Option<&Path>) -> Option<Rc<Font>> {
    let candidates: Vec<PathBuf> = configured
        .map(|p| vec![p.to_path_buf()])
        .unwrap_or_else(|| SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect());

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        match Font::from_bytes(bytes, FontSettings::default()) {
            Ok(font) => {
                tracing::info!("Using font {}", path.display());
                return Some(Rc::new(font));
            }
            Err(e) => tracing::warn!("Failed to parse font {}: {}", path.display(), e),
        }
    }

    tracing::warn!("No usable font found; overlay text will not be drawn");
    None
}

/// Font plus glyph cache
pub struct TextRasterizer {
    font: Option<Rc<Font>>,
    glyph_cache: GlyphCache,
}

impl TextRasterizer {
    pub fn new(font: Option<Rc<Font>>) -> Self {
        Self {
            font,
            glyph_cache: HashMap::new(),
        }
    }

    fn line_height(&self, font_size: f32) -> f32 {
        self.font
            .as_ref()
            .and_then(|f| f.horizontal_line_metrics(font_size))
            .map(|m| m.new_line_size)
            .unwrap_or(font_size * 1.2)
    }

    fn ascent(&self, font_size: f32) -> f32 {
        self.font
            .as_ref()
            .and_then(|f| f.horizontal_line_metrics(font_size))
            .map(|m| m.ascent)
            .unwrap_or(font_size)
    }

    /// Measure a single line of text in pixels
    pub fn measure(&mut self, text: &str, font_size: f32) -> Size {
        let height = self.line_height(font_size) as f64;
        let Some(font) = self.font.clone() else {
            let width = text.chars().count() as f32 * font_size * FALLBACK_ADVANCE;
            return Size::new(width as f64, height);
        };

        let mut width = 0.0;
        for ch in text.chars() {
            let key = (ch, font_size.to_bits());
            let (metrics, _) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| font.rasterize(ch, font_size));
            width += metrics.advance_width;
        }
        Size::new(width as f64, height)
    }

    /// Draw a single line of text with its top-left corner at `origin`
    pub fn draw(&mut self, frame: &mut Frame, origin: Point, text: &str, font_size: f32, color: u32) {
        let Some(font) = self.font.clone() else {
            return;
        };

        let color_alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        let mut current_x = origin.x as f32;
        let baseline = origin.y as f32 + self.ascent(font_size);

        for ch in text.chars() {
            let key = (ch, font_size.to_bits());
            let (metrics, bitmap) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| font.rasterize(ch, font_size));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let alpha = bitmap[bitmap_y * metrics.width + bitmap_x];
                    if alpha == 0 {
                        continue;
                    }
                    let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let py = (glyph_top + bitmap_y as f32) as isize;
                    if px < 0 || py < 0 {
                        continue;
                    }
                    let (px, py) = (px as usize, py as usize);
                    if px < frame.width() && py < frame.height() {
                        let alpha_f = alpha as f32 / 255.0 * color_alpha;
                        let bg = frame.get_pixel(px, py);
                        frame.set_pixel(px, py, blend_colors(bg, color, alpha_f));
                    }
                }
            }

            current_x += metrics.advance_width;
        }
    }
}
