//! Viewer model - the complete state of the viewer
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod keys;

pub use keys::HeldKeys;

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Instant;

use crate::animation::AnimationDriver;
use crate::backend::BackendKind;
use crate::config::ViewerConfig;
use crate::events::ViewerEvent;
use crate::geometry::{Point, Size};
use crate::image::LoadedImage;
use crate::messages::PointerButtons;
use crate::nav::NavButtons;
use crate::overlay::MessageOverlay;
use crate::theme::ViewerTheme;
use crate::view::icons::NavIcons;
use crate::view::pipeline::CheckerboardMode;
use crate::viewport::ViewportState;

/// The complete viewer model
///
/// Lives on the UI thread only: every mutation goes through `update`, and
/// the raw-pointer marker keeps the type `!Send` so it cannot be moved to
/// another thread by accident.
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<lumen::ViewerModel>();
/// ```
#[derive(Debug)]
pub struct ViewerModel {
    pub config: ViewerConfig,
    pub theme: ViewerTheme,
    pub image: LoadedImage,
    /// Path of the newest background decode; older results are dropped
    pub pending_path: Option<PathBuf>,
    pub viewport: ViewportState,
    pub animation: AnimationDriver,
    pub nav: NavButtons,
    /// Chevron bitmaps, rebuilt when the radius or icon colour changes
    pub nav_icons: Option<NavIcons>,
    pub message: MessageOverlay,
    pub held_keys: HeldKeys,
    /// Use the accelerated backend when possible; forced off while animating
    pub prefer_accelerated: bool,
    pub checkerboard: CheckerboardMode,
    /// Last pointer position in client coordinates
    pub pointer: Point,
    pub buttons: PointerButtons,
    events: VecDeque<ViewerEvent>,
    _not_send: PhantomData<*const ()>,
}

impl ViewerModel {
    pub fn new(config: ViewerConfig, theme: ViewerTheme, client: Size) -> Self {
        let config = config.sanitized();
        let mut viewport = ViewportState::new(
            config.min_zoom,
            config.max_zoom,
            config.zoom_padding,
            config.zoom_mode,
        );
        viewport.set_client_size(client);

        let mut model = Self {
            nav: NavButtons::new(&config.nav_buttons),
            nav_icons: None,
            prefer_accelerated: config.use_accelerated,
            checkerboard: config.checkerboard.mode,
            config,
            theme,
            image: LoadedImage::default(),
            pending_path: None,
            viewport,
            animation: AnimationDriver::new(),
            message: MessageOverlay::new(),
            held_keys: HeldKeys::default(),
            pointer: Point::ZERO,
            buttons: PointerButtons::default(),
            events: VecDeque::new(),
            _not_send: PhantomData,
        };
        model.refresh_nav_icons();
        model
    }

    pub fn client_size(&self) -> Size {
        self.viewport.client_size()
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty() && self.viewport.has_image()
    }

    /// Queue an outbound notification
    pub fn emit(&mut self, event: ViewerEvent) {
        self.events.push_back(event);
    }

    /// Take every queued notification in emission order
    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        self.events.drain(..).collect()
    }

    /// Backend the static image path and overlays draw with.
    ///
    /// Software while animating; otherwise accelerated when preferred and a
    /// native bitmap exists. Falls back to whichever representation is present.
    pub fn active_backend(&self) -> BackendKind {
        if self.animation.is_animating() {
            return BackendKind::Software;
        }
        match (self.image.native.is_some(), self.image.cpu.is_some()) {
            (true, _) if self.prefer_accelerated => BackendKind::Accelerated,
            (_, true) => BackendKind::Software,
            (true, false) => BackendKind::Accelerated,
            (false, false) => {
                if self.prefer_accelerated {
                    BackendKind::Accelerated
                } else {
                    BackendKind::Software
                }
            }
        }
    }

    /// Earliest moment any timer needs servicing
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.animation.next_deadline(),
            self.held_keys.next_deadline(),
            self.message.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Rebuild nav icons if the radius or icon colour changed
    pub fn refresh_nav_icons(&mut self) {
        let size = self.nav.radius.round().max(0.0) as u32;
        let color = self.theme.nav_icon;
        let stale = self
            .nav_icons
            .as_ref()
            .map_or(true, |icons| !icons.matches(size, color));
        if stale && self.nav.any_enabled() {
            self.nav_icons = Some(NavIcons::new(size, color));
        }
    }

    /// Window title: file name and zoom percent
    pub fn title(&self) -> String {
        match self.image.path.as_deref() {
            Some(path) => format!(
                "{} ({}%) - Lumen",
                crate::util::filename_for_display(path),
                self.viewport.zoom_percent()
            ),
            None => "Lumen".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{CpuBitmap, NativeBitmap};

    fn model() -> ViewerModel {
        ViewerModel::new(
            ViewerConfig::default(),
            ViewerTheme::default(),
            Size::new(100.0, 100.0),
        )
    }

    #[test]
    fn test_active_backend_prefers_native() {
        let mut m = model();
        m.image = LoadedImage::from_parts(
            Some(CpuBitmap::from_rgba(1, 1, vec![0, 0, 0, 255])),
            Some(NativeBitmap::from_rgba(1, 1, &[0, 0, 0, 255], 16).unwrap()),
        );
        assert_eq!(m.active_backend(), BackendKind::Accelerated);
        m.prefer_accelerated = false;
        assert_eq!(m.active_backend(), BackendKind::Software);
    }

    #[test]
    fn test_active_backend_falls_back_to_available() {
        let mut m = model();
        m.image = LoadedImage::from_parts(Some(CpuBitmap::from_rgba(1, 1, vec![0; 4])), None);
        assert_eq!(m.active_backend(), BackendKind::Software);

        m.prefer_accelerated = false;
        m.image = LoadedImage::from_parts(
            None,
            Some(NativeBitmap::from_rgba(1, 1, &[0; 4], 16).unwrap()),
        );
        assert_eq!(m.active_backend(), BackendKind::Accelerated);
    }

    #[test]
    fn test_events_drain_in_order_once() {
        let mut m = model();
        m.emit(ViewerEvent::ImageChanged);
        m.emit(ViewerEvent::ZoomChanged { factor: 2.0 });
        assert_eq!(
            m.drain_events(),
            vec![
                ViewerEvent::ImageChanged,
                ViewerEvent::ZoomChanged { factor: 2.0 }
            ]
        );
        assert!(m.drain_events().is_empty());
    }

    #[test]
    fn test_title_without_image() {
        assert_eq!(model().title(), "Lumen");
    }
}
