//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use lumen::config::ViewerConfig;
use lumen::geometry::Size;
use lumen::image::{BitmapFrame, CpuBitmap, LoadedImage, NativeBitmap};
use lumen::model::ViewerModel;
use lumen::theme::ViewerTheme;
use lumen::update::install_image;
use lumen::viewport::{ViewportState, ZoomMode};

pub const EPS: f64 = 1e-6;

/// Assert two floats are equal within [`EPS`]
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

/// Viewport with an image installed and recomputed
pub fn viewport(client: (f64, f64), image: (f64, f64), mode: ZoomMode) -> ViewportState {
    let mut vp = ViewportState::new(0.01, 100.0, 0.0, mode);
    vp.set_client_size(Size::new(client.0, client.1));
    vp.reset_for_image(Size::new(image.0, image.1));
    vp.recompute();
    vp
}

/// Solid RGBA pixels
pub fn solid_rgba(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    rgba.iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect()
}

/// Static image with both representations
pub fn still_image(width: u32, height: u32, rgba: [u8; 4]) -> LoadedImage {
    let pixels = solid_rgba(width, height, rgba);
    let native = NativeBitmap::from_rgba(width, height, &pixels, 16384).ok();
    LoadedImage::from_parts(Some(CpuBitmap::from_rgba(width, height, pixels)), native)
}

/// Animated CPU-only image; frame `i` is filled with grey level `i * 40`
pub fn animated_image(width: u32, height: u32, frames: usize, delay_ms: u64) -> LoadedImage {
    let frames = (0..frames)
        .map(|i| {
            let v = (i * 40).min(255) as u8;
            BitmapFrame {
                pixels: solid_rgba(width, height, [v, v, v, 255]),
                delay: Duration::from_millis(delay_ms),
            }
        })
        .collect();
    LoadedImage::from_parts(Some(CpuBitmap::from_frames(width, height, frames)), None)
}

pub fn test_model(client: (f64, f64)) -> ViewerModel {
    test_model_with(ViewerConfig::default(), client)
}

pub fn test_model_with(config: ViewerConfig, client: (f64, f64)) -> ViewerModel {
    ViewerModel::new(
        config,
        ViewerTheme::default(),
        Size::new(client.0, client.1),
    )
}

/// Model with `image` installed and the resulting notifications drained
pub fn model_with_image(client: (f64, f64), image: LoadedImage, now: Instant) -> ViewerModel {
    let mut model = test_model(client);
    install_image(&mut model, image, now);
    model.drain_events();
    model
}
