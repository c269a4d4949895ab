//! Shared bitmap sampling used by both backends
//!
//! Maps every destination pixel center back into the source crop and
//! samples it, then composites over the frame with the bitmap's alpha.

use crate::error::DrawError;
use crate::geometry::Rect;
use crate::view::frame::{blend_colors, Frame};

use super::{DrawImageOptions, Interpolation, PixelView};

/// Reject crops and placements the samplers cannot handle
pub fn validate_rects(src: Rect, dest: Rect, width: u32, height: u32) -> Result<(), DrawError> {
    if !src.is_finite() || !dest.is_finite() {
        return Err(DrawError::InvalidArgument(format!(
            "non-finite rect: src {:?} dest {:?}",
            src, dest
        )));
    }
    if src.width <= 0.0 || src.height <= 0.0 {
        return Err(DrawError::InvalidArgument(format!("empty source rect {:?}", src)));
    }
    if width == 0 || height == 0 {
        return Err(DrawError::InvalidArgument("zero-sized bitmap".to_string()));
    }
    Ok(())
}

/// Composite one ARGB sample over the frame pixel at `idx`
#[inline]
pub fn composite(buffer: &mut [u32], idx: usize, argb: u32, opacity: f32) {
    let a = (argb >> 24) & 0xFF;
    if a == 255 && opacity >= 1.0 {
        buffer[idx] = argb;
        return;
    }
    let alpha = a as f32 / 255.0 * opacity;
    if alpha > 0.0 {
        buffer[idx] = blend_colors(buffer[idx], argb, alpha);
    }
}

#[inline]
fn sample_nearest(view: &PixelView, width: u32, height: u32, sx: f64, sy: f64) -> u32 {
    let x = (sx.floor().max(0.0) as u32).min(width - 1) as usize;
    let y = (sy.floor().max(0.0) as u32).min(height - 1) as usize;
    view.argb_at(y * width as usize + x)
}

#[inline]
fn lerp_channel(a: u32, b: u32, shift: u32, t: f64) -> f64 {
    let ca = ((a >> shift) & 0xFF) as f64;
    let cb = ((b >> shift) & 0xFF) as f64;
    ca + (cb - ca) * t
}

#[inline]
fn sample_bilinear(view: &PixelView, width: u32, height: u32, sx: f64, sy: f64) -> u32 {
    let fx = (sx - 0.5).clamp(0.0, (width - 1) as f64);
    let fy = (sy - 0.5).clamp(0.0, (height - 1) as f64);
    let x0 = fx.floor() as usize;
    let y0 = fy.floor() as usize;
    let x1 = (x0 + 1).min(width as usize - 1);
    let y1 = (y0 + 1).min(height as usize - 1);
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let w = width as usize;
    let p00 = view.argb_at(y0 * w + x0);
    let p10 = view.argb_at(y0 * w + x1);
    let p01 = view.argb_at(y1 * w + x0);
    let p11 = view.argb_at(y1 * w + x1);

    let mut out = 0u32;
    for shift in [24u32, 16, 8, 0] {
        let top = lerp_channel(p00, p10, shift, tx);
        let bottom = lerp_channel(p01, p11, shift, tx);
        let value = (top + (bottom - top) * ty).round().clamp(0.0, 255.0) as u32;
        out |= value << shift;
    }
    out
}

/// Draw `src` of the bitmap into `dest` by sampling every covered pixel
pub fn draw_sampled(
    frame: &mut Frame,
    view: PixelView,
    width: u32,
    height: u32,
    src: Rect,
    dest: Rect,
    options: DrawImageOptions,
) {
    let span = frame.span_of(dest);
    if span.is_empty() || dest.is_empty() {
        return;
    }

    let scale_x = src.width / dest.width;
    let scale_y = src.height / dest.height;
    let frame_width = frame.width();
    let buffer = frame.buffer_mut();

    for py in span.y0..span.y1 {
        let sy = src.y + (py as f64 + 0.5 - dest.y) * scale_y;
        let row_start = py * frame_width;
        for px in span.x0..span.x1 {
            let sx = src.x + (px as f64 + 0.5 - dest.x) * scale_x;
            let argb = match options.interpolation {
                Interpolation::NearestNeighbor => sample_nearest(&view, width, height, sx, sy),
                Interpolation::Linear => sample_bilinear(&view, width, height, sx, sy),
            };
            composite(buffer, row_start + px, argb, options.opacity);
        }
    }
}
