//! Viewport handlers: resize, zoom commands, zoom modes

use crate::commands::Cmd;
use crate::events::ViewerEvent;
use crate::geometry::Rect;
use crate::messages::ViewportMsg;
use crate::model::ViewerModel;

use super::zoom_changed;

pub fn update_viewport(model: &mut ViewerModel, msg: ViewportMsg) -> Option<Cmd> {
    match msg {
        ViewportMsg::Resize(size) => {
            model.viewport.set_client_size(size);
            model.viewport.mark_dirty();
            if !model.viewport.manual_zoom && model.has_image() {
                let before = model.viewport.zoom;
                model.viewport.update_zoom_mode(model.viewport.zoom_mode);
                if model.viewport.zoom != before {
                    return zoom_changed(model);
                }
            }
            Some(Cmd::Redraw)
        }

        ViewportMsg::ZoomIn => zoom_step(model, model.config.zoom_step),

        ViewportMsg::ZoomOut => zoom_step(model, -model.config.zoom_step),

        ViewportMsg::SetZoomFactor(factor) => {
            if model.has_image() && model.viewport.set_zoom(factor) {
                zoom_changed(model)
            } else {
                None
            }
        }

        ViewportMsg::ActualSize => {
            if model.has_image() && model.viewport.set_zoom(1.0) {
                zoom_changed(model)
            } else {
                None
            }
        }

        ViewportMsg::SetZoomMode(mode) => set_zoom_mode(model, mode),

        ViewportMsg::CycleZoomMode => {
            let mode = model.viewport.zoom_mode.next();
            set_zoom_mode(model, mode)
        }

        ViewportMsg::PanBy { dx, dy } => {
            if !model.viewport.pan_to(dx, dy) {
                return None;
            }
            model.emit(ViewerEvent::Panning {
                pointer: model.pointer,
                reference: model.viewport.pan_reference(),
            });
            Some(Cmd::Redraw)
        }
    }
}

/// Zoom by `delta` anchored at the client centre
pub(crate) fn zoom_step(model: &mut ViewerModel, delta: f64) -> Option<Cmd> {
    if !model.has_image() {
        return None;
    }
    let anchor = Rect::from_size(model.client_size()).center();
    if model.viewport.zoom_to_point(delta, anchor) {
        zoom_changed(model)
    } else {
        None
    }
}

fn set_zoom_mode(model: &mut ViewerModel, mode: crate::viewport::ZoomMode) -> Option<Cmd> {
    let before = model.viewport.zoom;
    model.viewport.update_zoom_mode(mode);
    model.config.zoom_mode = mode;
    tracing::debug!("Zoom mode set to {}", mode.label());

    let title = Cmd::batch(vec![Cmd::SaveConfig, Cmd::Redraw]);
    if model.viewport.zoom != before {
        model.emit(ViewerEvent::ZoomChanged {
            factor: model.viewport.zoom,
        });
        return Some(Cmd::batch(vec![title, Cmd::UpdateTitle]));
    }
    Some(title)
}
