//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod animation;
mod app;
mod keys;
mod message;
mod pointer;
mod viewport;

use std::time::Instant;

use crate::commands::Cmd;
use crate::messages::ViewerMsg;
use crate::model::ViewerModel;

pub use animation::update_animation;
pub use app::{install_image, update_app};
pub use keys::{apply_nudges, update_keys};
pub use message::update_message;
pub use pointer::update_pointer;
pub use viewport::update_viewport;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut ViewerModel, msg: ViewerMsg, now: Instant) -> Option<Cmd> {
    match msg {
        ViewerMsg::Pointer(m) => update_pointer(model, m),
        ViewerMsg::Viewport(m) => update_viewport(model, m),
        ViewerMsg::Key(m) => update_keys(model, m, now),
        ViewerMsg::Animation(m) => update_animation(model, m, now),
        ViewerMsg::Message(m) => update_message(model, m, now),
        ViewerMsg::App(m) => update_app(model, m, now),
    }
}

/// Emit a zoom notification and ask for a repaint plus title refresh
pub(crate) fn zoom_changed(model: &mut ViewerModel) -> Option<Cmd> {
    model.emit(crate::events::ViewerEvent::ZoomChanged {
        factor: model.viewport.zoom,
    });
    Some(Cmd::redraw_with_title())
}

/// Combine optional commands into one
pub(crate) fn merge(cmds: impl IntoIterator<Item = Option<Cmd>>) -> Option<Cmd> {
    let cmds: Vec<Cmd> = cmds.into_iter().flatten().collect();
    match cmds.len() {
        0 => None,
        1 => cmds.into_iter().next(),
        _ => Some(Cmd::Batch(cmds)),
    }
}
