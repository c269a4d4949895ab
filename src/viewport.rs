//! Viewport transform
//!
//! Owns the mapping between image pixels and client pixels: the visible
//! source crop (`src`), where it is painted (`dest`), and the zoom factor.
//! Mutations only mark the state dirty; [`ViewportState::recompute`] derives
//! `src`/`dest` lazily, independently per axis.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Keeps the anchor ratio finite when the client axis is zero
const ANCHOR_EPSILON: f64 = 0.001;

/// Wheel delta that corresponds to doubling the zoom speed term
const ZOOM_SPEED_DIVISOR: f64 = 500.0;

/// Policy for deriving the zoom factor when it is not set manually
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ZoomMode {
    /// Native size if the image fits, otherwise fit
    #[default]
    AutoZoom,
    /// Keep whatever factor was last set
    LockZoom,
    ScaleToWidth,
    ScaleToHeight,
    ScaleToFit,
    ScaleToFill,
}

impl ZoomMode {
    pub const ALL: [ZoomMode; 6] = [
        ZoomMode::AutoZoom,
        ZoomMode::LockZoom,
        ZoomMode::ScaleToWidth,
        ZoomMode::ScaleToHeight,
        ZoomMode::ScaleToFit,
        ZoomMode::ScaleToFill,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ZoomMode::AutoZoom => "Auto zoom",
            ZoomMode::LockZoom => "Lock zoom",
            ZoomMode::ScaleToWidth => "Scale to width",
            ZoomMode::ScaleToHeight => "Scale to height",
            ZoomMode::ScaleToFit => "Scale to fit",
            ZoomMode::ScaleToFill => "Scale to fill",
        }
    }

    /// Next mode in [`ZoomMode::ALL`], wrapping
    pub fn next(self) -> ZoomMode {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Source/destination mapping plus zoom bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    /// Visible crop in image pixels
    pub src: Rect,
    /// Placement of the crop in client pixels
    pub dest: Rect,
    pub zoom: f64,
    /// Zoom used by the previous recompute; baseline for the anchor shift
    pub old_zoom: f64,
    /// Set by explicit zoom/pan; disables auto-refit on resize
    pub manual_zoom: bool,
    pub zoom_mode: ZoomMode,
    /// Anchor of the last zoom in client pixels; zero means no shift
    pub draw_point: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Subtracted from the client size when deriving a zoom factor
    pub padding: f64,
    /// Carried pan term in image pixels, zeroed when a drag starts
    pub pan_speed: Point,

    client: Size,
    image: Size,
    dirty: bool,
    x_out: bool,
    y_out: bool,
    /// Pointer position panning is measured from
    pan_from: Point,
}

/// Result of recomputing one axis
struct AxisLayout {
    src_pos: f64,
    src_len: f64,
    dest_pos: f64,
    dest_len: f64,
    out: bool,
}

impl ViewportState {
    pub fn new(min_zoom: f64, max_zoom: f64, padding: f64, zoom_mode: ZoomMode) -> Self {
        Self {
            src: Rect::default(),
            dest: Rect::default(),
            zoom: 1.0,
            old_zoom: 1.0,
            manual_zoom: false,
            zoom_mode,
            draw_point: Point::ZERO,
            min_zoom,
            max_zoom,
            padding,
            pan_speed: Point::ZERO,
            client: Size::default(),
            image: Size::default(),
            dirty: true,
            x_out: false,
            y_out: false,
            pan_from: Point::ZERO,
        }
    }

    pub fn client_size(&self) -> Size {
        self.client
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether the last recompute clamped the crop on (x, y)
    pub fn out_of_bounds(&self) -> (bool, bool) {
        (self.x_out, self.y_out)
    }

    pub fn pan_reference(&self) -> Point {
        self.pan_from
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round().max(0.0) as u32
    }

    pub fn set_client_size(&mut self, size: Size) {
        if size != self.client {
            self.client = size;
            self.dirty = true;
        }
    }

    /// Reset the mapping for a newly loaded image and derive its zoom
    pub fn reset_for_image(&mut self, image: Size) {
        self.image = image;
        self.src = Rect::from_size(image);
        self.dest = Rect::default();
        self.old_zoom = self.zoom;
        self.draw_point = Point::ZERO;
        self.pan_speed = Point::ZERO;
        self.x_out = false;
        self.y_out = false;
        self.update_zoom_mode(self.zoom_mode);
    }

    /// Forget the image; the viewport draws nothing until the next load
    pub fn clear_image(&mut self) {
        self.image = Size::default();
        self.src = Rect::default();
        self.dest = Rect::default();
        self.dirty = true;
    }

    /// Recompute only if something changed since the last call
    pub fn recompute_if_dirty(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.recompute();
        true
    }

    /// Derive `src` and `dest` from zoom, previous zoom, anchor and sizes
    pub fn recompute(&mut self) {
        let x = self.layout_axis(
            self.client.width,
            self.image.width,
            self.src.x,
            self.draw_point.x,
        );
        let y = self.layout_axis(
            self.client.height,
            self.image.height,
            self.src.y,
            self.draw_point.y,
        );

        self.src = Rect::new(x.src_pos, y.src_pos, x.src_len, y.src_len);
        self.dest = Rect::new(x.dest_pos, y.dest_pos, x.dest_len, y.dest_len);
        self.x_out = x.out;
        self.y_out = y.out;
        self.old_zoom = self.zoom;
        self.dirty = false;

        tracing::debug!(
            "Viewport recompute: zoom={:.4} src=({:.1},{:.1} {:.1}x{:.1}) dest=({:.1},{:.1} {:.1}x{:.1})",
            self.zoom,
            self.src.x,
            self.src.y,
            self.src.width,
            self.src.height,
            self.dest.x,
            self.dest.y,
            self.dest.width,
            self.dest.height
        );
    }

    fn layout_axis(&self, client: f64, image: f64, src_pos: f64, anchor: f64) -> AxisLayout {
        let scaled = image * self.zoom;

        if client > scaled {
            return AxisLayout {
                src_pos: 0.0,
                src_len: image,
                dest_pos: (client - scaled) / 2.0,
                dest_len: scaled,
                out: false,
            };
        }

        let mut pos = src_pos;
        if anchor != 0.0 && self.old_zoom > 0.0 && self.zoom > 0.0 {
            let shrink = client / self.old_zoom - client / self.zoom;
            pos += shrink / ((client + ANCHOR_EPSILON) / anchor);
        }
        let mut len = if self.zoom > 0.0 { client / self.zoom } else { image };

        let mut out = false;
        if len > image {
            len = image;
        }
        if pos < 0.0 || !pos.is_finite() {
            pos = 0.0;
            out = true;
        }
        if pos + len > image {
            pos = (image - len).max(0.0);
            out = true;
        }

        AxisLayout {
            src_pos: pos,
            src_len: len,
            dest_pos: 0.0,
            dest_len: client,
            out,
        }
    }

    /// Derive the zoom factor from `mode` and the padded client/image ratio
    pub fn update_zoom_mode(&mut self, mode: ZoomMode) {
        self.zoom_mode = mode;
        self.manual_zoom = false;
        self.draw_point = Point::ZERO;
        self.dirty = true;

        if self.image.is_empty() {
            return;
        }

        let width_scale = (self.client.width - self.padding) / self.image.width;
        let height_scale = (self.client.height - self.padding) / self.image.height;

        let zoom = match mode {
            ZoomMode::AutoZoom => {
                if width_scale >= 1.0 && height_scale >= 1.0 {
                    1.0
                } else {
                    width_scale.min(height_scale)
                }
            }
            ZoomMode::LockZoom => return,
            ZoomMode::ScaleToWidth => width_scale,
            ZoomMode::ScaleToHeight => height_scale,
            ZoomMode::ScaleToFit => width_scale.min(height_scale),
            ZoomMode::ScaleToFill => width_scale.max(height_scale),
        };

        // A client smaller than the padding would give a non-positive factor
        self.zoom = if zoom.is_finite() && zoom > 0.0 {
            zoom
        } else {
            self.min_zoom
        };
    }

    /// Zoom by a wheel-style delta around `anchor` (client pixels).
    ///
    /// The bound check runs before the step is applied, so the step that
    /// crosses `min_zoom`/`max_zoom` still lands; only the next one is
    /// rejected. Returns false when nothing changed.
    pub fn zoom_to_point(&mut self, delta: f64, anchor: Point) -> bool {
        if delta == 0.0 || !delta.is_finite() {
            return false;
        }

        let speed = delta / ZOOM_SPEED_DIVISOR;
        if delta > 0.0 {
            if self.zoom > self.max_zoom {
                return false;
            }
            self.old_zoom = self.zoom;
            self.zoom *= 1.0 + speed;
        } else {
            if self.zoom < self.min_zoom {
                return false;
            }
            self.zoom /= 1.0 - speed;
        }

        self.manual_zoom = true;
        self.draw_point = anchor;
        self.dirty = true;
        true
    }

    /// Set an explicit zoom factor, clamped to the bounds, anchored at the client centre
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() {
            return false;
        }
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if zoom == self.zoom {
            return false;
        }
        self.zoom = zoom;
        self.manual_zoom = true;
        self.draw_point = Rect::from_size(self.client).center();
        self.dirty = true;
        true
    }

    /// Shift the crop by a client-pixel delta. Returns false without an image.
    pub fn pan_to(&mut self, h_delta: f64, v_delta: f64) -> bool {
        if !self.has_image() {
            return false;
        }
        self.recompute_if_dirty();

        self.src.x += h_delta / self.zoom + self.pan_speed.x;
        self.src.y += v_delta / self.zoom + self.pan_speed.y;
        self.draw_point = Point::ZERO;
        self.manual_zoom = true;
        self.dirty = true;
        // Clamp now so the out-of-bounds flags describe this pan
        self.recompute();
        true
    }

    /// Capture the drag reference and drop any carried pan speed
    pub fn begin_pan(&mut self, pointer: Point) {
        self.pan_from = pointer;
        self.pan_speed = Point::ZERO;
    }

    /// Pan by the distance from the drag reference to `pointer`.
    ///
    /// The reference follows the pointer only on axes that are not clamped,
    /// so pushing against an edge does not drift the anchor.
    pub fn drag_to(&mut self, pointer: Point) -> bool {
        let h = self.pan_from.x - pointer.x;
        let v = self.pan_from.y - pointer.y;
        if !self.pan_to(h, v) {
            return false;
        }
        if !self.x_out {
            self.pan_from.x = pointer.x;
        }
        if !self.y_out {
            self.pan_from.y = pointer.y;
        }
        true
    }

    /// Image coordinates under a client-space point
    pub fn screen_to_image(&self, screen: Point) -> Point {
        if self.zoom <= 0.0 {
            return self.src.origin();
        }
        Point::new(
            (screen.x - self.dest.x) / self.zoom + self.src.x,
            (screen.y - self.dest.y) / self.zoom + self.src.y,
        )
    }
}
