//! Animation control handlers

use std::time::Instant;

use crate::animation::FailureOutcome;
use crate::commands::Cmd;
use crate::messages::AnimationMsg;
use crate::model::ViewerModel;

pub fn update_animation(model: &mut ViewerModel, msg: AnimationMsg, now: Instant) -> Option<Cmd> {
    let changed = match msg {
        AnimationMsg::Start => {
            let Some(bitmap) = model.image.cpu.as_ref() else {
                return None;
            };
            model
                .animation
                .start(bitmap, &mut model.prefer_accelerated, now)
        }
        AnimationMsg::Stop => model.animation.stop(&mut model.prefer_accelerated),
        AnimationMsg::Pause => model.animation.pause(),
        AnimationMsg::Resume => resume(model, now),
        AnimationMsg::TogglePause => {
            if model.animation.is_paused() {
                resume(model, now)
            } else {
                model.animation.pause()
            }
        }
    };
    changed.then_some(Cmd::Redraw)
}

fn resume(model: &mut ViewerModel, now: Instant) -> bool {
    match model.image.cpu.as_ref() {
        Some(bitmap) => model.animation.resume(bitmap, now),
        None => false,
    }
}

/// Advance the animated bitmap if its frame is due
pub(crate) fn tick_animation(model: &mut ViewerModel, now: Instant) -> Option<Cmd> {
    let Some(bitmap) = model.image.cpu.as_mut() else {
        return None;
    };
    match model.animation.tick(bitmap, now) {
        Ok(true) => Some(Cmd::Redraw),
        Ok(false) => None,
        Err(err) => {
            let outcome =
                model
                    .animation
                    .handle_failure(&err, Some(bitmap), &mut model.prefer_accelerated);
            (outcome == FailureOutcome::Stopped).then_some(Cmd::Redraw)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::ViewerConfig;
    use crate::geometry::Size;
    use crate::image::{BitmapFrame, CpuBitmap, LoadedImage};
    use crate::theme::ViewerTheme;
    use crate::update::install_image;

    fn animated_model(now: Instant) -> ViewerModel {
        let mut model = ViewerModel::new(
            ViewerConfig::default(),
            ViewerTheme::default(),
            Size::new(50.0, 50.0),
        );
        let frames = (0..3)
            .map(|i| BitmapFrame {
                pixels: vec![i as u8; 4 * 4 * 4],
                delay: Duration::from_millis(100),
            })
            .collect();
        let image = LoadedImage::from_parts(Some(CpuBitmap::from_frames(4, 4, frames)), None);
        install_image(&mut model, image, now);
        model
    }

    #[test]
    fn test_toggle_pause_round_trips() {
        let t0 = Instant::now();
        let mut model = animated_model(t0);
        assert!(model.animation.is_animating());

        update_animation(&mut model, AnimationMsg::TogglePause, t0);
        assert!(model.animation.is_paused());
        assert_eq!(model.animation.next_deadline(), None);

        update_animation(&mut model, AnimationMsg::TogglePause, t0);
        assert!(!model.animation.is_paused());
        assert!(model.animation.next_deadline().is_some());
    }

    #[test]
    fn test_tick_advances_frame_when_due() {
        let t0 = Instant::now();
        let mut model = animated_model(t0);
        assert!(tick_animation(&mut model, t0).is_none());
        assert!(tick_animation(&mut model, t0 + Duration::from_millis(100)).is_some());
        assert_eq!(
            model.image.cpu.as_ref().map(|c| c.current_frame_index()),
            Some(1)
        );
    }

    #[test]
    fn test_stop_restores_acceleration_preference() {
        let t0 = Instant::now();
        let mut model = animated_model(t0);
        assert!(!model.prefer_accelerated);
        update_animation(&mut model, AnimationMsg::Stop, t0);
        assert!(model.prefer_accelerated);
    }
}
