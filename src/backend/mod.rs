//! Drawing backends
//!
//! One capability set, two implementations:
//! - [`SoftwareBackend`]: per-pixel CPU sampling from the decode-capable bitmap
//! - [`AcceleratedBackend`]: span-table blits from a bitmap uploaded once in
//!   surface format, with a texture size limit like a GPU backend
//!
//! The render pipeline picks one per repaint through [`Backends::get`].

pub mod accelerated;
pub mod sampling;
pub mod software;

use std::rc::Rc;

use fontdue::Font;
use serde::{Deserialize, Serialize};

pub use accelerated::AcceleratedBackend;
pub use software::SoftwareBackend;

use crate::error::DrawError;
use crate::geometry::{Point, Rect, Size};
use crate::image::{CpuBitmap, NativeBitmap};
use crate::theme::Color;
use crate::view::frame::Frame;

/// Which backend variant is drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Accelerated,
    Software,
}

/// Resampling policy used when drawing a bitmap at a non-native scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    #[default]
    NearestNeighbor,
    Linear,
}

/// A bitmap handed to [`RenderBackend::draw_image`]
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    Cpu(&'a CpuBitmap),
    Native(&'a NativeBitmap),
}

/// Borrowed pixel storage of an [`ImageSource`]
#[derive(Debug, Clone, Copy)]
pub enum PixelView<'a> {
    /// RGBA8 bytes
    Rgba(&'a [u8]),
    /// ARGB u32 words
    Argb(&'a [u32]),
}

impl PixelView<'_> {
    /// ARGB value of the pixel at linear index `idx`
    #[inline]
    pub fn argb_at(&self, idx: usize) -> u32 {
        match self {
            PixelView::Rgba(bytes) => {
                let i = idx * 4;
                let (r, g, b, a) = (
                    bytes[i] as u32,
                    bytes[i + 1] as u32,
                    bytes[i + 2] as u32,
                    bytes[i + 3] as u32,
                );
                (a << 24) | (r << 16) | (g << 8) | b
            }
            PixelView::Argb(words) => words[idx],
        }
    }
}

impl<'a> ImageSource<'a> {
    pub fn width(&self) -> u32 {
        match self {
            ImageSource::Cpu(bmp) => bmp.width(),
            ImageSource::Native(bmp) => bmp.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            ImageSource::Cpu(bmp) => bmp.height(),
            ImageSource::Native(bmp) => bmp.height(),
        }
    }

    /// Pixel storage; fails with [`DrawError::Disposed`] if the bitmap was released
    pub fn pixels(&self) -> Result<PixelView<'a>, DrawError> {
        match *self {
            ImageSource::Cpu(bmp) => bmp.current_pixels().map(PixelView::Rgba),
            ImageSource::Native(bmp) => {
                let expected = bmp.width() as usize * bmp.height() as usize;
                if bmp.pixels().len() < expected {
                    return Err(DrawError::Disposed);
                }
                Ok(PixelView::Argb(bmp.pixels()))
            }
        }
    }
}

/// Per-call options for [`RenderBackend::draw_image`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawImageOptions {
    pub interpolation: Interpolation,
    /// Multiplies the bitmap's own alpha, `[0, 1]`
    pub opacity: f32,
}

impl Default for DrawImageOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::NearestNeighbor,
            opacity: 1.0,
        }
    }
}

/// Font size and color for overlay text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
}

/// Drawing surface capability shared by both backends
pub trait RenderBackend {
    fn kind(&self) -> BackendKind;

    /// Fill `rect`, rounding its corners when `corner_radius > 0`
    fn fill_rect(
        &mut self,
        frame: &mut Frame,
        rect: Rect,
        color: Color,
        corner_radius: f64,
    ) -> Result<(), DrawError>;

    /// Draw the `src` crop of `image` scaled into `dest`
    fn draw_image(
        &mut self,
        frame: &mut Frame,
        image: ImageSource<'_>,
        src: Rect,
        dest: Rect,
        options: DrawImageOptions,
    ) -> Result<(), DrawError>;

    fn draw_ellipse(
        &mut self,
        frame: &mut Frame,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        color: Color,
    ) -> Result<(), DrawError>;

    /// Draw one line of text with its top-left corner at `origin`
    fn draw_text(
        &mut self,
        frame: &mut Frame,
        text: &str,
        origin: Point,
        style: &TextStyle,
    ) -> Result<(), DrawError>;

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Size;
}

/// Both backend instances; the pipeline borrows the active one per repaint
pub struct Backends {
    pub software: SoftwareBackend,
    pub accelerated: AcceleratedBackend,
}

impl Backends {
    pub fn new(font: Option<Rc<Font>>, max_texture_size: u32) -> Self {
        Self {
            software: SoftwareBackend::new(font.clone()),
            accelerated: AcceleratedBackend::new(font, max_texture_size),
        }
    }

    pub fn get(&mut self, kind: BackendKind) -> &mut dyn RenderBackend {
        match kind {
            BackendKind::Accelerated => &mut self.accelerated,
            BackendKind::Software => &mut self.software,
        }
    }
}
