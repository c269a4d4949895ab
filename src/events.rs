//! Outbound notifications for the host
//!
//! Queued on the model exactly once per state change and drained by the
//! host after each update.

use crate::geometry::Point;
use crate::messages::PointerButtons;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    ZoomChanged {
        factor: f64,
    },
    Panning {
        /// Pointer in client coordinates
        pointer: Point,
        /// Drag reference the pan is measured from
        reference: Point,
    },
    ImageChanged,
    /// Image-space position, or the client position while no image is shown
    PointerMoved {
        image_x: f64,
        image_y: f64,
        buttons: PointerButtons,
    },
    NavLeftClicked,
    NavRightClicked,
}
