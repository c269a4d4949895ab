//! Pointer handlers: nav buttons, drag panning, wheel zoom

use crate::commands::Cmd;
use crate::events::ViewerEvent;
use crate::messages::{PointerButton, PointerMsg};
use crate::model::ViewerModel;
use crate::nav::NavSide;

use super::zoom_changed;

pub fn update_pointer(model: &mut ViewerModel, msg: PointerMsg) -> Option<Cmd> {
    match msg {
        PointerMsg::Down { position, button } => {
            model.pointer = position;
            model.buttons.set(button, true);

            let mut redraw = false;
            if button == PointerButton::Primary && model.nav.any_enabled() {
                redraw = model.nav.press(model.client_size(), position);
            }
            if model.has_image() {
                model.viewport.begin_pan(position);
            }
            redraw.then_some(Cmd::Redraw)
        }

        PointerMsg::Move { position } => {
            model.pointer = position;
            let mut redraw = false;

            if !model.buttons.any() {
                redraw = model.nav.update_hover(model.client_size(), position);
            } else if model.buttons.primary && model.has_image() && !model.nav.any_pressed() {
                if model.viewport.drag_to(position) {
                    model.emit(ViewerEvent::Panning {
                        pointer: position,
                        reference: model.viewport.pan_reference(),
                    });
                    redraw = true;
                }
            }

            // Without an image the client coordinates are reported as-is
            let image_point = if model.has_image() {
                model.viewport.recompute_if_dirty();
                model.viewport.screen_to_image(position)
            } else {
                position
            };
            model.emit(ViewerEvent::PointerMoved {
                image_x: image_point.x,
                image_y: image_point.y,
                buttons: model.buttons,
            });

            redraw.then_some(Cmd::Redraw)
        }

        PointerMsg::Up { position, button } => {
            model.pointer = position;
            model.buttons.set(button, false);
            if button != PointerButton::Primary {
                return None;
            }

            let was_pressed = model.nav.any_pressed();
            match model.nav.release(model.client_size(), position) {
                Some(NavSide::Left) => model.emit(ViewerEvent::NavLeftClicked),
                Some(NavSide::Right) => model.emit(ViewerEvent::NavRightClicked),
                None => {}
            }
            was_pressed.then_some(Cmd::Redraw)
        }

        PointerMsg::Wheel { delta, position } => {
            model.pointer = position;
            if !model.has_image() || delta == 0.0 {
                return None;
            }
            if model.viewport.zoom_to_point(delta, position) {
                zoom_changed(model)
            } else {
                None
            }
        }

        PointerMsg::Left => {
            let changed = model.nav.clear_hover();
            changed.then_some(Cmd::Redraw)
        }
    }
}
