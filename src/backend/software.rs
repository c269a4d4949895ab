//! CPU backend: samples the decode-capable bitmap pixel by pixel

use std::rc::Rc;

use fontdue::Font;

use super::sampling::{draw_sampled, validate_rects};
use super::{BackendKind, DrawImageOptions, ImageSource, RenderBackend, TextStyle};
use crate::error::DrawError;
use crate::geometry::{Point, Rect, Size};
use crate::theme::Color;
use crate::view::frame::Frame;
use crate::view::text::TextRasterizer;

pub struct SoftwareBackend {
    text: TextRasterizer,
}

impl SoftwareBackend {
    pub fn new(font: Option<Rc<Font>>) -> Self {
        Self {
            text: TextRasterizer::new(font),
        }
    }
}

/// Shared argument checks for shape fills
pub(super) fn check_rect(rect: Rect) -> Result<(), DrawError> {
    if rect.is_finite() && rect.width >= 0.0 && rect.height >= 0.0 {
        Ok(())
    } else {
        Err(DrawError::InvalidArgument(format!("invalid rect {:?}", rect)))
    }
}

pub(super) fn check_ellipse(center: Point, radius_x: f64, radius_y: f64) -> Result<(), DrawError> {
    let finite = center.x.is_finite()
        && center.y.is_finite()
        && radius_x.is_finite()
        && radius_y.is_finite();
    if finite && radius_x >= 0.0 && radius_y >= 0.0 {
        Ok(())
    } else {
        Err(DrawError::InvalidArgument(format!(
            "invalid ellipse at ({}, {}) radii ({}, {})",
            center.x, center.y, radius_x, radius_y
        )))
    }
}

impl RenderBackend for SoftwareBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Software
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
        let view = image.pixels()?;
        draw_sampled(frame, view, width, height, src, dest, options);
        Ok(())
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
