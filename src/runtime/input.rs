//! Keyboard and mouse input mapping
//!
//! Translates winit input into viewer messages. Held keys (arrows, zoom)
//! produce press/release pairs so the model can repeat them on its own
//! timer; everything else fires once on press.

use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, NamedKey};

use lumen::messages::{
    AnimationMsg, AppMsg, KeyMsg, NudgeKey, PointerButton, ViewerMsg, ViewportMsg,
};

/// Wheel units per scroll line
const LINE_DELTA: f64 = 120.0;

/// What a key does
#[derive(Debug)]
pub enum KeyAction {
    Msg(ViewerMsg),
    Quit,
}

fn nudge_key(key: &Key) -> Option<NudgeKey> {
    match key {
        Key::Named(NamedKey::ArrowLeft) => Some(NudgeKey::PanLeft),
        Key::Named(NamedKey::ArrowRight) => Some(NudgeKey::PanRight),
        Key::Named(NamedKey::ArrowUp) => Some(NudgeKey::PanUp),
        Key::Named(NamedKey::ArrowDown) => Some(NudgeKey::PanDown),
        Key::Character(c) if matches!(c.as_str(), "+" | "=") => Some(NudgeKey::ZoomIn),
        Key::Character(c) if matches!(c.as_str(), "-" | "_") => Some(NudgeKey::ZoomOut),
        _ => None,
    }
}

/// Map a logical key to an action
pub fn map_key(key: &Key, pressed: bool) -> Option<KeyAction> {
    if let Some(nudge) = nudge_key(key) {
        let msg = if pressed {
            KeyMsg::Press(nudge)
        } else {
            KeyMsg::Release(nudge)
        };
        return Some(KeyAction::Msg(msg.into()));
    }

    if !pressed {
        return None;
    }

    let msg: ViewerMsg = match key {
        Key::Named(NamedKey::Escape) => return Some(KeyAction::Quit),
        Key::Named(NamedKey::PageDown) => AppMsg::OpenSibling(1).into(),
        Key::Named(NamedKey::PageUp) => AppMsg::OpenSibling(-1).into(),
        Key::Named(NamedKey::Space) => AnimationMsg::TogglePause.into(),
        Key::Character(c) => match c.as_str() {
            "0" => ViewportMsg::ActualSize.into(),
            "z" | "Z" => ViewportMsg::CycleZoomMode.into(),
            "c" | "C" => AppMsg::CycleCheckerboard.into(),
            "a" | "A" => AppMsg::ToggleAcceleration.into(),
            "q" | "Q" => return Some(KeyAction::Quit),
            _ => return None,
        },
        _ => return None,
    };
    Some(KeyAction::Msg(msg))
}

pub fn map_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Wheel delta in line units scaled to [`LINE_DELTA`]; positive zooms in
pub fn wheel_delta(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64 * LINE_DELTA,
        MouseScrollDelta::PixelDelta(pos) => pos.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_arrow_keys_press_and_release() {
        let key = Key::Named(NamedKey::ArrowLeft);
        assert!(matches!(
            map_key(&key, true),
            Some(KeyAction::Msg(ViewerMsg::Key(KeyMsg::Press(NudgeKey::PanLeft))))
        ));
        assert!(matches!(
            map_key(&key, false),
            Some(KeyAction::Msg(ViewerMsg::Key(KeyMsg::Release(NudgeKey::PanLeft))))
        ));
    }

    #[test]
    fn test_one_shot_keys_ignore_release() {
        let key = Key::Named(NamedKey::PageDown);
        assert!(matches!(
            map_key(&key, true),
            Some(KeyAction::Msg(ViewerMsg::App(AppMsg::OpenSibling(1))))
        ));
        assert!(map_key(&key, false).is_none());
    }

    #[test]
    fn test_escape_quits() {
        assert!(matches!(
            map_key(&Key::Named(NamedKey::Escape), true),
            Some(KeyAction::Quit)
        ));
    }

    #[test]
    fn test_wheel_delta_scales_lines() {
        assert_eq!(wheel_delta(MouseScrollDelta::LineDelta(0.0, 1.0)), 120.0);
        assert_eq!(
            wheel_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -30.0))),
            -30.0
        );
    }
}
