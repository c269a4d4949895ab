//! Image lifecycle, settings toggles and the periodic tick

use std::path::Path;
use std::time::Instant;

use crate::commands::Cmd;
use crate::error::LoadError;
use crate::events::ViewerEvent;
use crate::geometry::Size;
use crate::image::{load_image, LoadedImage};
use crate::messages::AppMsg;
use crate::model::ViewerModel;
use crate::util::{filename_for_display, neighbor_image, validate_image_path};

use super::animation::tick_animation;
use super::keys::apply_nudges;
use super::merge;
use super::message::show_message;

pub fn update_app(model: &mut ViewerModel, msg: AppMsg, now: Instant) -> Option<Cmd> {
    match msg {
        AppMsg::LoadImage(path) => {
            model.pending_path = None;
            if let Err(e) = validate_image_path(&path) {
                tracing::warn!("Refusing to open {}: {}", path.display(), e);
                show_message(model, e.user_message(&filename_for_display(&path)), None, now);
                return Some(Cmd::Redraw);
            }
            let result = load_image(&path, model.config.max_texture_size);
            finish_load(model, &path, result, now)
        }

        AppMsg::Decoded { path, result } => {
            if model.pending_path.as_deref() != Some(path.as_path()) {
                tracing::debug!("Dropping stale decode of {}", path.display());
                return None;
            }
            model.pending_path = None;
            finish_load(model, &path, result, now)
        }

        AppMsg::OpenSibling(step) => {
            // Step from the image being decoded so rapid clicks keep advancing
            let current = model
                .pending_path
                .as_deref()
                .or(model.image.path.as_deref())?;
            match neighbor_image(current, step) {
                Some(path) => {
                    model.pending_path = Some(path.clone());
                    Some(Cmd::OpenPath(path))
                }
                None => {
                    tracing::debug!("No other image next to {}", current.display());
                    None
                }
            }
        }

        AppMsg::ImageLoaded(image) => install_image(model, image, now),

        AppMsg::UnloadImage => {
            if model.image.is_empty() {
                return None;
            }
            model.pending_path = None;
            model.animation.stop(&mut model.prefer_accelerated);
            model.image.release();
            model.image = LoadedImage::default();
            model.viewport.clear_image();
            model.emit(ViewerEvent::ImageChanged);
            Some(Cmd::redraw_with_title())
        }

        AppMsg::SetAcceleration(enabled) => set_acceleration(model, enabled),

        AppMsg::ToggleAcceleration => {
            let current = model.config.use_accelerated;
            set_acceleration(model, !current)
        }

        AppMsg::SetCheckerboard(mode) => {
            if model.checkerboard == mode {
                return None;
            }
            model.checkerboard = mode;
            model.config.checkerboard.mode = mode;
            Some(Cmd::batch(vec![Cmd::SaveConfig, Cmd::Redraw]))
        }

        AppMsg::CycleCheckerboard => {
            let mode = model.checkerboard.next();
            update_app(model, AppMsg::SetCheckerboard(mode), now)
        }

        AppMsg::Tick => {
            let message_changed = model.message.poll(now);
            merge([
                tick_animation(model, now),
                apply_nudges(model, now),
                message_changed.then_some(Cmd::Redraw),
            ])
        }
    }
}

/// Install a decode result, or keep the current image and report the failure
fn finish_load(
    model: &mut ViewerModel,
    path: &Path,
    result: Result<LoadedImage, LoadError>,
    now: Instant,
) -> Option<Cmd> {
    match result {
        Ok(image) => install_image(model, image, now),
        Err(e) => {
            tracing::warn!("Failed to load {}: {}", path.display(), e);
            show_message(model, format!("Cannot open image: {}", e), None, now);
            Some(Cmd::Redraw)
        }
    }
}

/// Replace the displayed image, releasing the previous one first
pub fn install_image(model: &mut ViewerModel, image: LoadedImage, now: Instant) -> Option<Cmd> {
    model.animation.stop(&mut model.prefer_accelerated);
    model.image.release();
    model.image = image;

    let size = Size::new(model.image.width() as f64, model.image.height() as f64);
    if size.is_empty() {
        model.viewport.clear_image();
    } else {
        model.viewport.reset_for_image(size);
    }

    model.animation.on_image_loaded(
        model.image.cpu.as_ref(),
        &mut model.prefer_accelerated,
        now,
    );

    model.emit(ViewerEvent::ImageChanged);
    model.emit(ViewerEvent::ZoomChanged {
        factor: model.viewport.zoom,
    });
    Some(Cmd::redraw_with_title())
}

fn set_acceleration(model: &mut ViewerModel, enabled: bool) -> Option<Cmd> {
    if model.config.use_accelerated == enabled {
        return None;
    }
    model.config.use_accelerated = enabled;
    model
        .animation
        .set_preference(&mut model.prefer_accelerated, enabled);
    tracing::debug!("Accelerated backend preference: {}", enabled);
    Some(Cmd::batch(vec![Cmd::SaveConfig, Cmd::Redraw]))
}
