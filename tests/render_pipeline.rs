//! Render pipeline tests
//!
//! Renders into an in-memory frame and inspects pixels and the pass report.

mod common;

use std::time::{Duration, Instant};

use common::{animated_image, model_with_image, solid_rgba, still_image, test_model};
use lumen::backend::{BackendKind, Backends};
use lumen::error::DrawError;
use lumen::geometry::{Point, Size};
use lumen::image::{CpuBitmap, LoadedImage};
use lumen::messages::{AppMsg, MessageMsg, PointerMsg};
use lumen::model::ViewerModel;
use lumen::update::update;
use lumen::view::{render, CheckerboardMode, Frame, RenderReport};

const RED: u32 = 0xFFFF0000;

struct Canvas {
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    backends: Backends,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self::with_texture_limit(width, height, 16384)
    }

    fn with_texture_limit(width: usize, height: usize, limit: u32) -> Self {
        Self {
            buffer: vec![0; width * height],
            width,
            height,
            backends: Backends::new(None, limit),
        }
    }

    fn render(&mut self, model: &mut ViewerModel) -> RenderReport {
        let mut frame = Frame::new(&mut self.buffer, self.width, self.height);
        render(model, &mut frame, &mut self.backends)
    }

    fn pixel(&self, x: usize, y: usize) -> u32 {
        self.buffer[y * self.width + x]
    }
}

fn background(model: &ViewerModel) -> u32 {
    model.theme.background.to_argb_u32()
}

#[test]
fn test_empty_model_paints_background() {
    let mut model = test_model((40.0, 30.0));
    model.checkerboard = CheckerboardMode::None;
    let mut canvas = Canvas::new(40, 30);

    let report = canvas.render(&mut model);
    assert_eq!(report.image_backend, None);
    assert!(report.skipped.is_empty());
    assert!(canvas.buffer.iter().all(|&p| p == background(&model)));
}

#[test]
fn test_static_image_prefers_accelerated() {
    let mut model = model_with_image((100.0, 100.0), still_image(10, 10, [255, 0, 0, 255]), Instant::now());
    let mut canvas = Canvas::new(100, 100);

    let report = canvas.render(&mut model);
    assert_eq!(report.image_backend, Some(BackendKind::Accelerated));
    assert!(!report.animated);

    // 10x10 at 100% centred in 100x100
    assert_eq!(canvas.pixel(45, 45), RED);
    assert_eq!(canvas.pixel(54, 54), RED);
    assert_eq!(canvas.pixel(44, 50), background(&model));
    assert_eq!(canvas.pixel(0, 0), background(&model));
}

#[test]
fn test_software_preference_draws_same_pixels() {
    let mut model = model_with_image((100.0, 100.0), still_image(10, 10, [255, 0, 0, 255]), Instant::now());
    update(&mut model, AppMsg::SetAcceleration(false).into(), Instant::now());
    let mut canvas = Canvas::new(100, 100);

    let report = canvas.render(&mut model);
    assert_eq!(report.image_backend, Some(BackendKind::Software));
    assert_eq!(canvas.pixel(45, 45), RED);
    assert_eq!(canvas.pixel(44, 50), background(&model));
}

#[test]
fn test_accelerated_failure_retries_in_software() {
    let mut model = model_with_image((100.0, 100.0), still_image(10, 10, [255, 0, 0, 255]), Instant::now());
    // Texture limit below the bitmap size
    let mut canvas = Canvas::with_texture_limit(100, 100, 4);

    let report = canvas.render(&mut model);
    assert_eq!(report.image_backend, Some(BackendKind::Software));
    assert!(matches!(report.skipped.as_slice(), [DrawError::Backend(_)]));
    assert_eq!(canvas.pixel(50, 50), RED);
}

#[test]
fn test_animated_frames_use_software_path() {
    let t0 = Instant::now();
    let mut model = model_with_image((20.0, 20.0), animated_image(20, 20, 3, 100), t0);
    let mut canvas = Canvas::new(20, 20);

    let report = canvas.render(&mut model);
    assert!(report.animated);
    assert_eq!(report.image_backend, Some(BackendKind::Software));
    assert_eq!(canvas.pixel(10, 10), 0xFF000000);

    update(&mut model, AppMsg::Tick.into(), t0 + Duration::from_millis(100));
    canvas.render(&mut model);
    assert_eq!(canvas.pixel(10, 10), 0xFF282828);
}

#[test]
fn test_disposed_frame_stops_animation_and_continues() {
    let t0 = Instant::now();
    let mut model = model_with_image((20.0, 20.0), animated_image(20, 20, 3, 100), t0);
    if let Some(bitmap) = model.image.cpu.as_mut() {
        bitmap.release();
    }
    let mut canvas = Canvas::new(20, 20);

    let report = canvas.render(&mut model);
    assert!(report.animation_stopped);
    assert!(!report.animated);
    assert!(!model.animation.is_animating());
    assert!(model.prefer_accelerated);
    assert!(report
        .skipped
        .iter()
        .all(|e| matches!(e, DrawError::Disposed)));

    // Later passes take the static path without touching the animation again
    let report = canvas.render(&mut model);
    assert!(!report.animation_stopped);
}

#[test]
fn test_canvas_checkerboard_tiles() {
    let mut model = test_model((32.0, 16.0));
    model.checkerboard = CheckerboardMode::Canvas;
    let mut canvas = Canvas::new(32, 16);

    canvas.render(&mut model);
    let light = model.theme.checkerboard_light.to_argb_u32();
    let dark = model.theme.checkerboard_dark.to_argb_u32();
    let tile = model.config.checkerboard.tile_size as usize;

    assert_eq!(canvas.pixel(0, 0), light);
    assert_eq!(canvas.pixel(tile, 0), dark);
    assert_eq!(canvas.pixel(0, tile), dark);
    assert_eq!(canvas.pixel(tile, tile), light);
}

#[test]
fn test_image_checkerboard_only_under_transparent_images() {
    let mut canvas = Canvas::new(100, 100);

    let mut opaque = model_with_image((100.0, 100.0), still_image(10, 10, [255, 0, 0, 255]), Instant::now());
    opaque.checkerboard = CheckerboardMode::Image;
    canvas.render(&mut opaque);
    assert_eq!(canvas.pixel(45, 45), RED);

    let pixels = solid_rgba(10, 10, [0, 0, 0, 0]);
    let clear = LoadedImage::from_parts(Some(CpuBitmap::from_rgba(10, 10, pixels)), None);
    let mut transparent = model_with_image((100.0, 100.0), clear, Instant::now());
    transparent.checkerboard = CheckerboardMode::Image;
    canvas.render(&mut transparent);

    // Fully transparent image leaves the checkerboard showing
    assert_eq!(
        canvas.pixel(45, 45),
        transparent.theme.checkerboard_light.to_argb_u32()
    );
    assert_eq!(canvas.pixel(0, 0), background(&transparent));
}

#[test]
fn test_message_box_drawn_over_image() {
    let t0 = Instant::now();
    let mut model = model_with_image((100.0, 100.0), still_image(100, 100, [255, 0, 0, 255]), t0);
    update(
        &mut model,
        MessageMsg::Show {
            text: "Hi".into(),
            duration_ms: Some(1000),
        }
        .into(),
        t0,
    );
    let mut canvas = Canvas::new(100, 100);

    canvas.render(&mut model);
    assert_ne!(canvas.pixel(50, 50), RED);
    assert_eq!(canvas.pixel(2, 2), RED);

    update(&mut model, MessageMsg::Clear.into(), t0);
    canvas.render(&mut model);
    assert_eq!(canvas.pixel(50, 50), RED);
}

#[test]
fn test_nav_button_drawn_only_when_hovered() {
    let mut model = model_with_image((200.0, 100.0), still_image(200, 100, [255, 0, 0, 255]), Instant::now());
    let center = model.nav.center(lumen::nav::NavSide::Left, Size::new(200.0, 100.0));
    let mut canvas = Canvas::new(200, 100);

    canvas.render(&mut model);
    assert_eq!(canvas.pixel(center.x as usize, center.y as usize), RED);

    update(
        &mut model,
        PointerMsg::Move {
            position: Point::new(center.x, center.y),
        }
        .into(),
        Instant::now(),
    );
    canvas.render(&mut model);
    assert_ne!(canvas.pixel(center.x as usize, center.y as usize), RED);
    // Outside the circle stays untouched
    assert_eq!(canvas.pixel(100, 50), RED);
}
