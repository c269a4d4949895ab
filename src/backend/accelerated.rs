//! Accelerated backend
//!
//! Draws from a [`NativeBitmap`] already converted to surface format, so a
//! repaint is a table-driven copy rather than per-pixel format conversion.
//! Column lookups are computed once per draw; opaque bitmaps at full opacity
//! take a straight copy path. Bitmaps larger than the texture limit are
//! refused with [`DrawError::Backend`], mirroring a GPU texture upload.

use std::rc::Rc;

use fontdue::Font;

use super::sampling::{composite, draw_sampled, validate_rects};
use super::software::{check_ellipse, check_rect};
use super::{
    BackendKind, DrawImageOptions, ImageSource, Interpolation, RenderBackend, TextStyle,
};
use crate::error::DrawError;
use crate::geometry::{Point, Rect, Size};
use crate::image::NativeBitmap;
use crate::theme::Color;
use crate::view::frame::Frame;
use crate::view::text::TextRasterizer;

pub struct AcceleratedBackend {
    text: TextRasterizer,
    max_texture_size: u32,
    /// Source column for each destination column of the current blit
    column_table: Vec<usize>,
}

impl AcceleratedBackend {
    pub fn new(font: Option<Rc<Font>>, max_texture_size: u32) -> Self {
        Self {
            text: TextRasterizer::new(font),
            max_texture_size,
            column_table: Vec::new(),
        }
    }

    pub fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }

    fn check_texture(&self, width: u32, height: u32) -> Result<(), DrawError> {
        if width > self.max_texture_size || height > self.max_texture_size {
            return Err(DrawError::Backend(format!(
                "{}x{} exceeds the {}px texture limit",
                width, height, self.max_texture_size
            )));
        }
        Ok(())
    }

    /// Nearest-neighbor blit of a native bitmap using a column lookup table
    fn blit_native(
        &mut self,
        frame: &mut Frame,
        bitmap: &NativeBitmap,
        src: Rect,
        dest: Rect,
        opacity: f32,
    ) -> Result<(), DrawError> {
        let width = bitmap.width() as usize;
        let height = bitmap.height() as usize;
        let pixels = bitmap.pixels();
        if pixels.len() < width * height {
            return Err(DrawError::Disposed);
        }

        let span = frame.span_of(dest);
        if span.is_empty() || dest.is_empty() {
            return Ok(());
        }

        let scale_x = src.width / dest.width;
        let scale_y = src.height / dest.height;

        let columns = span.x1 - span.x0;
        self.column_table.clear();
        self.column_table
            .try_reserve(columns)
            .map_err(|_| DrawError::OutOfMemory)?;
        for px in span.x0..span.x1 {
            let sx = src.x + (px as f64 + 0.5 - dest.x) * scale_x;
            self.column_table
                .push((sx.floor().max(0.0) as usize).min(width - 1));
        }

        let copy = bitmap.is_opaque() && opacity >= 1.0;
        let frame_width = frame.width();
        let buffer = frame.buffer_mut();

        for py in span.y0..span.y1 {
            let sy = src.y + (py as f64 + 0.5 - dest.y) * scale_y;
            let row_base = (sy.floor().max(0.0) as usize).min(height - 1) * width;
            let dest_start = py * frame_width + span.x0;
            let dest_row = &mut buffer[dest_start..dest_start + columns];

            if copy {
                for (out, &col) in dest_row.iter_mut().zip(&self.column_table) {
                    *out = pixels[row_base + col];
                }
            } else {
                for (i, &col) in self.column_table.iter().enumerate() {
                    composite(dest_row, i, pixels[row_base + col], opacity);
                }
            }
        }
        Ok(())
    }
}

impl RenderBackend for AcceleratedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Accelerated
    }

    fn fill_rect(
        &mut self,
        frame: &mut Frame,
        rect: Rect,
        color: Color,
        corner_radius: f64,
    ) -> Result<(), DrawError> {
        check_rect(rect)?;
        if corner_radius > 0.0 {
            frame.fill_rounded_rect_blended(rect, corner_radius, color.to_argb_u32());
        } else if color.a == 255 {
            frame.fill_rect(rect, color.to_argb_u32());
        } else {
            frame.fill_rect_blended(rect, color.to_argb_u32());
        }
        Ok(())
    }

    fn draw_image(
        &mut self,
        frame: &mut Frame,
        image: ImageSource<'_>,
        src: Rect,
        dest: Rect,
        options: DrawImageOptions,
    ) -> Result<(), DrawError> {
        let (width, height) = (image.width(), image.height());
        validate_rects(src, dest, width, height)?;
        self.check_texture(width, height)?;

        match image {
            ImageSource::Native(bitmap) if options.interpolation == Interpolation::NearestNeighbor => {
                self.blit_native(frame, bitmap, src, dest, options.opacity)
            }
            _ => {
                let view = image.pixels()?;
                draw_sampled(frame, view, width, height, src, dest, options);
                Ok(())
            }
        }
    }

    fn draw_ellipse(
        &mut self,
        frame: &mut Frame,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        color: Color,
    ) -> Result<(), DrawError> {
        check_ellipse(center, radius_x, radius_y)?;
        frame.fill_ellipse_blended(center, radius_x, radius_y, color.to_argb_u32());
        Ok(())
    }

    fn draw_text(
        &mut self,
        frame: &mut Frame,
        text: &str,
        origin: Point,
        style: &TextStyle,
    ) -> Result<(), DrawError> {
        self.text
            .draw(frame, origin, text, style.font_size, style.color.to_argb_u32());
        Ok(())
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Size {
        self.text.measure(text, style.font_size)
    }
}
