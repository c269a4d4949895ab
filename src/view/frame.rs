//! Frame abstraction for drawing primitives
//!
//! Provides a simple, safe API for pixel buffer operations instead of
//! direct buffer indexing scattered throughout rendering code.

use crate::geometry::{Point, Rect};

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). The alpha value from the
/// foreground color determines the blend ratio.
///
/// Returns the blended color with full opacity (alpha = 0xFF).
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end).
#[derive(Clone, Copy, Debug)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// Integer pixel span covered by a rect, clamped to the frame and clip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelSpan {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelSpan {
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds operations are safely clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<ClipRect>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, dimensions are adjusted
    /// to match the actual buffer size to prevent out-of-bounds access.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            let adjusted_height = actual_size / width;
            (width, adjusted_height)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    /// Get the frame width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the frame height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get mutable access to the underlying pixel buffer
    ///
    /// Use this for low-level operations that need direct buffer access.
    /// Prefer using Frame's drawing methods when possible.
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut [u32] {
        self.buffer
    }

    /// Set a clipping rectangle. All subsequent drawing operations will be
    /// constrained to this region.
    pub fn set_clip(&mut self, rect: Rect) {
        let x0 = (rect.x.max(0.0) as usize).min(self.width);
        let y0 = (rect.y.max(0.0) as usize).min(self.height);
        let x1 = (rect.right().max(0.0) as usize).min(self.width);
        let y1 = (rect.bottom().max(0.0) as usize).min(self.height);
        self.clip = Some(ClipRect { x0, y0, x1, y1 });
    }

    /// Remove the clipping rectangle, restoring full-frame drawing.
    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    #[inline]
    fn max_x(&self) -> usize {
        self.clip.map_or(self.width, |c| c.x1)
    }

    #[inline]
    fn max_y(&self) -> usize {
        self.clip.map_or(self.height, |c| c.y1)
    }

    #[inline]
    fn min_x(&self) -> usize {
        self.clip.map_or(0, |c| c.x0)
    }

    #[inline]
    fn min_y(&self) -> usize {
        self.clip.map_or(0, |c| c.y0)
    }

    /// Pixels whose top-left corner lies inside `rect`, clamped to frame and clip
    pub fn span_of(&self, rect: Rect) -> PixelSpan {
        let to_px = |v: f64| if v.is_finite() { v.round().max(0.0) as usize } else { 0 };
        PixelSpan {
            x0: to_px(rect.x).min(self.width).max(self.min_x()),
            y0: to_px(rect.y).min(self.height).max(self.min_y()),
            x1: to_px(rect.right()).min(self.max_x()),
            y1: to_px(rect.bottom()).min(self.max_y()),
        }
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let span = self.span_of(rect);
        for y in span.y0..span.y1 {
            let row_start = y * self.width;
            self.buffer[row_start + span.x0..row_start + span.x1.max(span.x0)].fill(color);
        }
    }

    /// Fill a rectangle with alpha blending (color is ARGB format)
    pub fn fill_rect_blended(&mut self, rect: Rect, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color | 0xFF000000);
        }

        let span = self.span_of(rect);
        for y in span.y0..span.y1 {
            let row_start = y * self.width;
            for x in span.x0..span.x1 {
                let idx = row_start + x;
                self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
            }
        }
    }

    /// Fill a rectangle with rounded corners, anti-aliased at the corners
    pub fn fill_rounded_rect_blended(&mut self, rect: Rect, radius: f64, color: u32) {
        let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        if radius < 0.5 {
            return self.fill_rect_blended(rect, color);
        }

        let span = self.span_of(rect);
        let left = rect.x + radius;
        let right = rect.right() - radius;
        let top = rect.y + radius;
        let bottom = rect.bottom() - radius;

        for y in span.y0..span.y1 {
            let cy = y as f64 + 0.5;
            for x in span.x0..span.x1 {
                let cx = x as f64 + 0.5;
                let nearest_x = cx.clamp(left, right);
                let nearest_y = cy.clamp(top, bottom);
                let dist = Point::new(cx, cy).distance_to(Point::new(nearest_x, nearest_y));
                let coverage = (radius - dist + 0.5).clamp(0.0, 1.0) as f32;
                self.blend_coverage(x, y, color, coverage);
            }
        }
    }

    /// Fill an axis-aligned ellipse, anti-aliased along its edge
    pub fn fill_ellipse_blended(&mut self, center: Point, radius_x: f64, radius_y: f64, color: u32) {
        if radius_x <= 0.0 || radius_y <= 0.0 {
            return;
        }
        let bounds = Rect::new(
            center.x - radius_x - 1.0,
            center.y - radius_y - 1.0,
            radius_x * 2.0 + 2.0,
            radius_y * 2.0 + 2.0,
        );
        let span = self.span_of(bounds);
        let edge_scale = radius_x.min(radius_y);

        for y in span.y0..span.y1 {
            let dy = (y as f64 + 0.5 - center.y) / radius_y;
            for x in span.x0..span.x1 {
                let dx = (x as f64 + 0.5 - center.x) / radius_x;
                let d = (dx * dx + dy * dy).sqrt();
                let coverage = ((1.0 - d) * edge_scale + 0.5).clamp(0.0, 1.0) as f32;
                self.blend_coverage(x, y, color, coverage);
            }
        }
    }

    /// Blend `color` at (x, y) with its alpha scaled by `coverage`
    #[inline]
    pub fn blend_coverage(&mut self, x: usize, y: usize, color: u32, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        if x < self.min_x() || x >= self.max_x() || y < self.min_y() || y >= self.max_y() {
            return;
        }
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0 * coverage;
        let idx = y * self.width + x;
        if alpha >= 1.0 {
            self.buffer[idx] = color | 0xFF000000;
        } else if alpha > 0.0 {
            self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
        }
    }

    /// Set a single pixel (bounds-checked, respects clip rect)
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x >= self.min_x() && x < self.max_x() && y >= self.min_y() && y < self.max_y() {
            self.buffer[y * self.width + x] = color;
        }
    }

    /// Get a single pixel (bounds-checked, returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Blend a pixel with alpha (ARGB format, alpha in high byte)
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32) {
        self.blend_coverage(x, y, color, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_fill_rect() {
        let mut buffer = vec![0u32; 100 * 100];
        let mut frame = Frame::new(&mut buffer, 100, 100);

        frame.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0), 0xFFFF0000);

        assert_eq!(frame.get_pixel(15, 15), 0xFFFF0000);
        assert_eq!(frame.get_pixel(5, 5), 0);
        assert_eq!(frame.get_pixel(30, 30), 0);
    }

    #[test]
    fn test_frame_blend_pixel() {
        let mut buffer = vec![0xFFFFFFFF_u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        // Blend 50% black
        frame.blend_pixel(5, 5, 0x80000000);

        let result = frame.get_pixel(5, 5);
        let r = (result >> 16) & 0xFF;
        assert!(r > 100 && r < 160, "R channel: {}", r);
    }

    #[test]
    fn test_frame_out_of_bounds() {
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        frame.set_pixel(100, 100, 0xFFFFFFFF);
        frame.blend_pixel(100, 100, 0x80FFFFFF);
        frame.fill_rect(Rect::new(-50.0, -50.0, 500.0, 5.0), 0xFF00FF00);
        assert_eq!(frame.get_pixel(100, 100), 0);
        assert_eq!(frame.get_pixel(0, 0), 0);
    }

    #[test]
    fn test_frame_with_clip_restricts_fill_rect() {
        let mut buffer = vec![0u32; 100 * 100];
        let mut frame = Frame::new(&mut buffer, 100, 100);
        frame.set_clip(Rect::new(10.0, 10.0, 30.0, 30.0));

        frame.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 0xFFFF0000);

        assert_eq!(frame.get_pixel(20, 20), 0xFFFF0000);
        assert_eq!(frame.get_pixel(5, 5), 0);
        assert_eq!(frame.get_pixel(10, 10), 0xFFFF0000);
        assert_eq!(frame.get_pixel(39, 39), 0xFFFF0000);
        assert_eq!(frame.get_pixel(40, 40), 0);

        frame.clear_clip();
        frame.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), 0xFF00FF00);
        assert_eq!(frame.get_pixel(0, 0), 0xFF00FF00);
    }

    #[test]
    fn test_frame_short_buffer_adjusts_height() {
        let mut buffer = vec![0u32; 10 * 5];
        let frame = Frame::new(&mut buffer, 10, 10);
        assert_eq!(frame.height(), 5);
    }

    #[test]
    fn test_ellipse_fills_center_not_corners() {
        let mut buffer = vec![0xFF000000_u32; 40 * 40];
        let mut frame = Frame::new(&mut buffer, 40, 40);
        frame.fill_ellipse_blended(Point::new(20.0, 20.0), 10.0, 10.0, 0xFFFFFFFF);
        assert_eq!(frame.get_pixel(20, 20), 0xFFFFFFFF);
        assert_eq!(frame.get_pixel(11, 11), 0xFF000000);
        assert_eq!(frame.get_pixel(0, 0), 0xFF000000);
    }

    #[test]
    fn test_rounded_rect_skips_corner_pixel() {
        let mut buffer = vec![0xFF000000_u32; 40 * 40];
        let mut frame = Frame::new(&mut buffer, 40, 40);
        frame.fill_rounded_rect_blended(Rect::new(0.0, 0.0, 40.0, 40.0), 10.0, 0xFFFFFFFF);
        assert_eq!(frame.get_pixel(0, 0), 0xFF000000);
        assert_eq!(frame.get_pixel(20, 20), 0xFFFFFFFF);
        assert_eq!(frame.get_pixel(20, 0), 0xFFFFFFFF);
    }
}
