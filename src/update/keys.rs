//! Keyboard nudges: held arrow and zoom keys repeat on a timer

use std::time::Instant;

use crate::commands::Cmd;
use crate::events::ViewerEvent;
use crate::messages::{KeyMsg, NudgeKey};
use crate::model::ViewerModel;

use super::viewport::zoom_step;
use super::merge;

pub fn update_keys(model: &mut ViewerModel, msg: KeyMsg, now: Instant) -> Option<Cmd> {
    match msg {
        KeyMsg::Press(key) => {
            if !model.held_keys.press(key, now) {
                // OS key repeat; the nudge timer handles repetition
                return None;
            }
            nudge(model, key)
        }
        KeyMsg::Release(key) => {
            model.held_keys.release(key);
            None
        }
        KeyMsg::ReleaseAll => {
            model.held_keys.release_all();
            None
        }
    }
}

/// Apply one nudge for every held key if the repeat timer is due
pub fn apply_nudges(model: &mut ViewerModel, now: Instant) -> Option<Cmd> {
    if !model.held_keys.take_due(now) {
        return None;
    }
    let keys: Vec<NudgeKey> = model.held_keys.iter().collect();
    merge(keys.into_iter().map(|key| nudge(model, key)))
}

fn nudge(model: &mut ViewerModel, key: NudgeKey) -> Option<Cmd> {
    let step = model.config.key_step;
    let (dx, dy) = match key {
        NudgeKey::PanLeft => (-step, 0.0),
        NudgeKey::PanRight => (step, 0.0),
        NudgeKey::PanUp => (0.0, -step),
        NudgeKey::PanDown => (0.0, step),
        NudgeKey::ZoomIn => return zoom_step(model, step),
        NudgeKey::ZoomOut => return zoom_step(model, -step),
    };

    if !model.viewport.pan_to(dx, dy) {
        return None;
    }
    model.emit(ViewerEvent::Panning {
        pointer: model.pointer,
        reference: model.viewport.pan_reference(),
    });
    Some(Cmd::Redraw)
}
