//! Previous/next navigation buttons drawn over the canvas
//!
//! Positions and hit regions are pure functions of the client size and
//! the configured radius/padding. Hover and press flags are derived from
//! pointer events and never persisted.

use crate::config::NavButtonConfig;
use crate::geometry::{Point, Rect, Size};

/// Visual state of one button, determined from pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Hovered,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavButton {
    pub enabled: bool,
    pub hovered: bool,
    pub pressed: bool,
}

impl NavButton {
    pub fn state(&self) -> ButtonState {
        if self.pressed {
            ButtonState::Pressed
        } else if self.hovered {
            ButtonState::Hovered
        } else {
            ButtonState::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavButtons {
    pub left: NavButton,
    pub right: NavButton,
    pub radius: f64,
    pub padding: f64,
}

impl NavButtons {
    pub fn new(config: &NavButtonConfig) -> Self {
        Self {
            left: NavButton {
                enabled: config.left,
                ..NavButton::default()
            },
            right: NavButton {
                enabled: config.right,
                ..NavButton::default()
            },
            radius: config.radius,
            padding: config.padding,
        }
    }

    pub fn button(&self, side: NavSide) -> &NavButton {
        match side {
            NavSide::Left => &self.left,
            NavSide::Right => &self.right,
        }
    }

    fn button_mut(&mut self, side: NavSide) -> &mut NavButton {
        match side {
            NavSide::Left => &mut self.left,
            NavSide::Right => &mut self.right,
        }
    }

    pub fn any_enabled(&self) -> bool {
        self.left.enabled || self.right.enabled
    }

    /// Centre of a button for the given client size
    pub fn center(&self, side: NavSide, client: Size) -> Point {
        let offset = self.padding + self.radius;
        let y = client.height / 2.0;
        match side {
            NavSide::Left => Point::new(offset, y),
            NavSide::Right => Point::new(client.width - offset, y),
        }
    }

    /// Circular press region
    pub fn hit_test(&self, side: NavSide, client: Size, pointer: Point) -> bool {
        self.button(side).enabled && self.center(side, client).distance_to(pointer) <= self.radius
    }

    /// Enlarged hover region: radius plus padding horizontally, three radii vertically
    pub fn hover_region(&self, side: NavSide, client: Size) -> Rect {
        let c = self.center(side, client);
        let half_w = self.radius + self.padding;
        let half_h = self.radius * 3.0;
        Rect::new(c.x - half_w, c.y - half_h, half_w * 2.0, half_h * 2.0)
    }

    pub fn hover_test(&self, side: NavSide, client: Size, pointer: Point) -> bool {
        self.button(side).enabled && self.hover_region(side, client).contains(pointer)
    }

    /// Update hover flags; returns true if either flag changed
    pub fn update_hover(&mut self, client: Size, pointer: Point) -> bool {
        let mut changed = false;
        for side in [NavSide::Left, NavSide::Right] {
            let hovered = self.hover_test(side, client, pointer);
            let button = self.button_mut(side);
            if button.hovered != hovered {
                button.hovered = hovered;
                changed = true;
            }
        }
        changed
    }

    /// Clear hover flags when the pointer leaves the window
    pub fn clear_hover(&mut self) -> bool {
        let changed = self.left.hovered || self.right.hovered;
        self.left.hovered = false;
        self.right.hovered = false;
        changed
    }

    /// Set press flags from a pointer-down; returns true if any button is pressed
    pub fn press(&mut self, client: Size, pointer: Point) -> bool {
        self.left.pressed = self.hit_test(NavSide::Left, client, pointer);
        self.right.pressed = self.hit_test(NavSide::Right, client, pointer);
        self.left.pressed || self.right.pressed
    }

    pub fn any_pressed(&self) -> bool {
        self.left.pressed || self.right.pressed
    }

    /// Resolve a pointer-up: the pressed button whose region still contains
    /// the pointer is clicked. Press flags are always cleared.
    pub fn release(&mut self, client: Size, pointer: Point) -> Option<NavSide> {
        let clicked = [NavSide::Left, NavSide::Right]
            .into_iter()
            .find(|&side| self.button(side).pressed && self.hit_test(side, client, pointer));
        self.left.pressed = false;
        self.right.pressed = false;
        clicked
    }
}
