//! Layered render pass
//!
//! Fixed order per repaint:
//! 1. recompute the viewport if dirty
//! 2. checkerboard
//! 3. image (animated frame path or static path)
//! 4. message text
//! 5. navigation buttons
//!
//! Draw failures never abort the pass; a failing layer is skipped.

use serde::{Deserialize, Serialize};

use crate::animation::FailureOutcome;
use crate::backend::{
    BackendKind, Backends, DrawImageOptions, ImageSource, RenderBackend, TextStyle,
};
use crate::error::DrawError;
use crate::geometry::{Point, Rect, Size};
use crate::model::ViewerModel;
use crate::nav::{ButtonState, NavSide};
use crate::theme::Color;

use super::frame::Frame;

/// Distance between the client edge and the message box
const MESSAGE_MARGIN: f64 = 20.0;
/// Padding inside the message box
const MESSAGE_PADDING: Size = Size {
    width: 14.0,
    height: 8.0,
};
const MESSAGE_CORNER_RADIUS: f64 = 6.0;
/// Opacity of the message box tint over the canvas background
const MESSAGE_TINT: f32 = 0.85;
/// Icon opacity and downward offset while a nav button is held
const PRESSED_ICON_OPACITY: f32 = 0.7;
const PRESSED_ICON_OFFSET: f64 = 1.0;

/// Where the transparency checkerboard is painted
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckerboardMode {
    None,
    /// Whole client area
    Canvas,
    /// Only under the image, and only if it has transparency
    #[default]
    Image,
}

impl CheckerboardMode {
    pub fn next(self) -> Self {
        match self {
            CheckerboardMode::None => CheckerboardMode::Canvas,
            CheckerboardMode::Canvas => CheckerboardMode::Image,
            CheckerboardMode::Image => CheckerboardMode::None,
        }
    }
}

/// What happened during one pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    /// Backend used for the image layer, if one was drawn
    pub image_backend: Option<BackendKind>,
    /// The image layer came from the animated frame path
    pub animated: bool,
    /// Layers skipped because of draw errors
    pub skipped: Vec<DrawError>,
    /// An animation failure stopped the animation during this pass
    pub animation_stopped: bool,
}

/// Render the model into `frame`
pub fn render(model: &mut ViewerModel, frame: &mut Frame, backends: &mut Backends) -> RenderReport {
    let mut report = RenderReport::default();

    model.viewport.recompute_if_dirty();
    model.refresh_nav_icons();

    frame.clear(model.theme.background.to_argb_u32());

    let kind = model.active_backend();
    skip_on_error(&mut report, draw_checkerboard(model, frame, backends.get(kind)));
    draw_image_layer(model, frame, backends, &mut report);
    skip_on_error(&mut report, draw_message(model, frame, backends.get(kind)));
    skip_on_error(&mut report, draw_nav_buttons(model, frame, backends.get(kind)));

    report
}

fn skip_on_error(report: &mut RenderReport, result: Result<(), DrawError>) {
    if let Err(e) = result {
        tracing::debug!("Skipping layer: {}", e);
        report.skipped.push(e);
    }
}

/// Region the checkerboard covers for the current mode, if any
pub fn checkerboard_region(model: &ViewerModel) -> Option<Rect> {
    match model.checkerboard {
        CheckerboardMode::None => None,
        CheckerboardMode::Canvas => Some(Rect::from_size(model.viewport.client_size())),
        CheckerboardMode::Image => {
            if model.image.is_empty() || !model.image.has_alpha() {
                None
            } else {
                Some(model.viewport.dest)
            }
        }
    }
}

fn draw_checkerboard(
    model: &ViewerModel,
    frame: &mut Frame,
    backend: &mut dyn RenderBackend,
) -> Result<(), DrawError> {
    let Some(region) = checkerboard_region(model) else {
        return Ok(());
    };
    if region.is_empty() {
        return Ok(());
    }
    let tile = model.config.checkerboard.tile_size.max(1) as f64;

    backend.fill_rect(frame, region, model.theme.checkerboard_dark, 0.0)?;

    // Light tiles on the even diagonal of the grid anchored at the region origin
    let cols = (region.width / tile).ceil() as usize;
    let rows = (region.height / tile).ceil() as usize;
    for row in 0..rows {
        for col in (row % 2..cols).step_by(2) {
            let x = region.x + col as f64 * tile;
            let y = region.y + row as f64 * tile;
            let w = tile.min(region.right() - x);
            let h = tile.min(region.bottom() - y);
            backend.fill_rect(frame, Rect::new(x, y, w, h), model.theme.checkerboard_light, 0.0)?;
        }
    }
    Ok(())
}

fn draw_image_layer(
    model: &mut ViewerModel,
    frame: &mut Frame,
    backends: &mut Backends,
    report: &mut RenderReport,
) {
    if model.image.is_empty() || !model.viewport.has_image() {
        return;
    }
    let options = DrawImageOptions {
        interpolation: model.config.interpolation,
        opacity: 1.0,
    };
    let (src, dest) = (model.viewport.src, model.viewport.dest);

    if model.animation.can_animate() {
        let result = match model.image.cpu.as_ref() {
            Some(cpu) => backends
                .software
                .draw_image(frame, ImageSource::Cpu(cpu), src, dest, options),
            None => Err(DrawError::Disposed),
        };
        match result {
            Ok(()) => {
                report.image_backend = Some(BackendKind::Software);
                report.animated = true;
                return;
            }
            Err(e) => {
                let outcome = model.animation.handle_failure(
                    &e,
                    model.image.cpu.as_mut(),
                    &mut model.prefer_accelerated,
                );
                report.skipped.push(e);
                match outcome {
                    FailureOutcome::Skipped => return,
                    FailureOutcome::Stopped => report.animation_stopped = true,
                }
            }
        }
    }

    draw_static_image(model, frame, backends, options, report);
}

/// Pick a source for `kind`, falling back to whichever representation exists
fn image_source(model: &ViewerModel, kind: BackendKind) -> Option<ImageSource<'_>> {
    let native = model.image.native.as_ref().map(ImageSource::Native);
    let cpu = model.image.cpu.as_ref().map(ImageSource::Cpu);
    match kind {
        BackendKind::Accelerated => native.or(cpu),
        BackendKind::Software => cpu.or(native),
    }
}

fn draw_static_image(
    model: &ViewerModel,
    frame: &mut Frame,
    backends: &mut Backends,
    options: DrawImageOptions,
    report: &mut RenderReport,
) {
    let (src, dest) = (model.viewport.src, model.viewport.dest);
    let kind = model.active_backend();
    let Some(source) = image_source(model, kind) else {
        return;
    };

    match backends.get(kind).draw_image(frame, source, src, dest, options) {
        Ok(()) => report.image_backend = Some(kind),
        Err(e) if kind == BackendKind::Accelerated => {
            tracing::debug!("Accelerated draw failed, retrying in software: {}", e);
            report.skipped.push(e);
            let Some(source) = image_source(model, BackendKind::Software) else {
                return;
            };
            match backends.software.draw_image(frame, source, src, dest, options) {
                Ok(()) => report.image_backend = Some(BackendKind::Software),
                Err(e) => skip_on_error(report, Err(e)),
            }
        }
        Err(e) => skip_on_error(report, Err(e)),
    }
}

/// Box the message is drawn in, centred in the inset client area
pub fn message_box(client: Size, text_size: Size) -> Rect {
    let area = Rect::from_size(client).inset(MESSAGE_MARGIN);
    let size = Size::new(
        (text_size.width + MESSAGE_PADDING.width * 2.0).min(area.width),
        (text_size.height + MESSAGE_PADDING.height * 2.0).min(area.height),
    );
    area.centered(size)
}

fn draw_message(
    model: &ViewerModel,
    frame: &mut Frame,
    backend: &mut dyn RenderBackend,
) -> Result<(), DrawError> {
    let text = model.message.text();
    if text.is_empty() {
        return Ok(());
    }

    let style = TextStyle {
        font_size: model.config.text.font_size,
        color: model.theme.text,
    };
    let text_size = backend.measure_text(text, &style);
    let rect = message_box(model.viewport.client_size(), text_size);
    if rect.is_empty() {
        return Ok(());
    }

    let tint = model.theme.background.fade(MESSAGE_TINT);
    backend.fill_rect(frame, rect, tint, MESSAGE_CORNER_RADIUS)?;

    frame.set_clip(rect);
    let origin = Point::new(
        rect.x + MESSAGE_PADDING.width,
        rect.y + (rect.height - text_size.height) / 2.0,
    );
    let result = backend.draw_text(frame, text, origin, &style);
    frame.clear_clip();
    result
}

fn draw_nav_buttons(
    model: &ViewerModel,
    frame: &mut Frame,
    backend: &mut dyn RenderBackend,
) -> Result<(), DrawError> {
    let client = model.viewport.client_size();
    let radius = model.nav.radius;

    for side in [NavSide::Left, NavSide::Right] {
        let button = model.nav.button(side);
        if !button.enabled {
            continue;
        }
        let fill: Color = match button.state() {
            ButtonState::Normal => continue,
            ButtonState::Hovered => model.theme.nav_hover,
            ButtonState::Pressed => model.theme.nav_pressed,
        };

        let center = model.nav.center(side, client);
        backend.draw_ellipse(frame, center, radius, radius, fill)?;

        let Some(icons) = model.nav_icons.as_ref() else {
            continue;
        };
        let icon = icons.get(side);
        let (w, h) = (icon.width() as f64, icon.height() as f64);
        let (opacity, offset) = if button.pressed {
            (PRESSED_ICON_OPACITY, PRESSED_ICON_OFFSET)
        } else {
            (1.0, 0.0)
        };
        let dest = Rect::new(center.x - w / 2.0, center.y - h / 2.0 + offset, w, h);
        backend.draw_image(
            frame,
            ImageSource::Cpu(icon),
            Rect::new(0.0, 0.0, w, h),
            dest,
            DrawImageOptions {
                interpolation: crate::backend::Interpolation::NearestNeighbor,
                opacity,
            },
        )?;
    }
    Ok(())
}
