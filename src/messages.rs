//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::error::LoadError;
use crate::geometry::{Point, Size};
use crate::image::LoadedImage;
use crate::view::pipeline::CheckerboardMode;
use crate::viewport::ZoomMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Buttons held during a pointer event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl PointerButtons {
    pub fn any(&self) -> bool {
        self.primary || self.secondary || self.middle
    }

    pub fn set(&mut self, button: PointerButton, down: bool) {
        match button {
            PointerButton::Primary => self.primary = down,
            PointerButton::Secondary => self.secondary = down,
            PointerButton::Middle => self.middle = down,
        }
    }
}

/// Keys that nudge pan or zoom for as long as they are held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NudgeKey {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
}

/// Pointer input in client coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum PointerMsg {
    Down { position: Point, button: PointerButton },
    Move { position: Point },
    Up { position: Point, button: PointerButton },
    /// Wheel delta in wheel units (120 per notch, positive zooms in)
    Wheel { delta: f64, position: Point },
    /// Pointer left the window
    Left,
}

/// Viewport transform commands
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportMsg {
    /// Client area changed size
    Resize(Size),
    ZoomIn,
    ZoomOut,
    SetZoomFactor(f64),
    /// Zoom to 100%
    ActualSize,
    SetZoomMode(ZoomMode),
    CycleZoomMode,
    /// Pan by a client-pixel delta
    PanBy { dx: f64, dy: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMsg {
    Press(NudgeKey),
    Release(NudgeKey),
    /// Window lost focus
    ReleaseAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMsg {
    Start,
    Stop,
    Pause,
    Resume,
    TogglePause,
}

/// On-canvas text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageMsg {
    /// Show text; `duration_ms` falls back to the configured duration
    Show {
        text: String,
        duration_ms: Option<u64>,
    },
    Clear,
}

/// Image lifecycle and settings
#[derive(Debug)]
pub enum AppMsg {
    /// Decode a file and display it
    LoadImage(PathBuf),
    /// Display an image decoded elsewhere
    ImageLoaded(LoadedImage),
    /// Result of a background decode started by `Cmd::OpenPath`
    Decoded {
        path: PathBuf,
        result: Result<LoadedImage, LoadError>,
    },
    /// Open the image `n` positions away in the current directory
    OpenSibling(isize),
    /// Release the current image
    UnloadImage,
    SetAcceleration(bool),
    ToggleAcceleration,
    SetCheckerboard(CheckerboardMode),
    CycleCheckerboard,
    /// Periodic timer: animation frames, key nudges, message steps
    Tick,
}

/// Top-level message type
#[derive(Debug)]
pub enum ViewerMsg {
    Pointer(PointerMsg),
    Viewport(ViewportMsg),
    Key(KeyMsg),
    Animation(AnimationMsg),
    Message(MessageMsg),
    App(AppMsg),
}

impl From<PointerMsg> for ViewerMsg {
    fn from(msg: PointerMsg) -> Self {
        ViewerMsg::Pointer(msg)
    }
}

impl From<ViewportMsg> for ViewerMsg {
    fn from(msg: ViewportMsg) -> Self {
        ViewerMsg::Viewport(msg)
    }
}

impl From<KeyMsg> for ViewerMsg {
    fn from(msg: KeyMsg) -> Self {
        ViewerMsg::Key(msg)
    }
}

impl From<AnimationMsg> for ViewerMsg {
    fn from(msg: AnimationMsg) -> Self {
        ViewerMsg::Animation(msg)
    }
}

impl From<MessageMsg> for ViewerMsg {
    fn from(msg: MessageMsg) -> Self {
        ViewerMsg::Message(msg)
    }
}

impl From<AppMsg> for ViewerMsg {
    fn from(msg: AppMsg) -> Self {
        ViewerMsg::App(msg)
    }
}
