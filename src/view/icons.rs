//! Procedural navigation icons
//!
//! Chevrons are rasterized once into small RGBA bitmaps so both backends
//! draw them through the same `draw_image` path as the photo itself.

use crate::geometry::Point;
use crate::image::CpuBitmap;
use crate::nav::NavSide;
use crate::theme::Color;

/// Stroke width as a fraction of the icon size
const STROKE: f64 = 0.12;

/// Left/right chevrons for the nav buttons
#[derive(Debug, Clone)]
pub struct NavIcons {
    pub left: CpuBitmap,
    pub right: CpuBitmap,
    pub size: u32,
    pub color: Color,
}

impl NavIcons {
    pub fn new(size: u32, color: Color) -> Self {
        let size = size.max(4);
        Self {
            left: chevron(size, NavSide::Left, color),
            right: chevron(size, NavSide::Right, color),
            size,
            color,
        }
    }

    pub fn get(&self, side: NavSide) -> &CpuBitmap {
        match side {
            NavSide::Left => &self.left,
            NavSide::Right => &self.right,
        }
    }

    /// Whether these icons were built for `size` and `color`
    pub fn matches(&self, size: u32, color: Color) -> bool {
        self.size == size.max(4) && self.color == color
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.distance_to(Point::new(a.x + abx * t, a.y + aby * t))
}

/// Anti-aliased chevron pointing toward `side`
pub fn chevron(size: u32, side: NavSide, color: Color) -> CpuBitmap {
    let s = size as f64;
    let (tip_x, tail_x) = match side {
        NavSide::Left => (0.36 * s, 0.62 * s),
        NavSide::Right => (0.64 * s, 0.38 * s),
    };
    let top = Point::new(tail_x, 0.22 * s);
    let tip = Point::new(tip_x, 0.5 * s);
    let bottom = Point::new(tail_x, 0.78 * s);
    let half_stroke = STROKE * s / 2.0;

    let mut pixels = vec![0u8; (size * size * 4) as usize];
    for y in 0..size {
        for x in 0..size {
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let d = distance_to_segment(p, top, tip).min(distance_to_segment(p, tip, bottom));
            let coverage = (half_stroke - d + 0.5).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let idx = ((y * size + x) * 4) as usize;
            pixels[idx] = color.r;
            pixels[idx + 1] = color.g;
            pixels[idx + 2] = color.b;
            pixels[idx + 3] = (color.a as f64 * coverage).round() as u8;
        }
    }
    CpuBitmap::from_rgba(size, size, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(bmp: &CpuBitmap, x: u32, y: u32) -> u8 {
        let pixels = bmp.current_pixels().unwrap();
        pixels[((y * bmp.width() + x) * 4 + 3) as usize]
    }

    #[test]
    fn test_chevron_tip_points_outward() {
        let icons = NavIcons::new(40, Color::rgb(255, 255, 255));
        // Tip of the left chevron sits left of centre, right chevron right of centre
        assert!(alpha_at(&icons.left, 14, 20) > 0);
        assert_eq!(alpha_at(&icons.left, 26, 20), 0);
        assert!(alpha_at(&icons.right, 25, 20) > 0);
        assert_eq!(alpha_at(&icons.right, 13, 20), 0);
    }

    #[test]
    fn test_corners_are_transparent() {
        let bmp = chevron(32, NavSide::Right, Color::rgb(0, 0, 0));
        assert!(bmp.has_alpha());
        assert_eq!(alpha_at(&bmp, 0, 0), 0);
        assert_eq!(alpha_at(&bmp, 31, 31), 0);
    }

    #[test]
    fn test_matches_tracks_size_and_color() {
        let icons = NavIcons::new(30, Color::rgb(1, 2, 3));
        assert!(icons.matches(30, Color::rgb(1, 2, 3)));
        assert!(!icons.matches(31, Color::rgb(1, 2, 3)));
        assert!(!icons.matches(30, Color::rgb(0, 2, 3)));
    }
}
