//! Animation driver
//!
//! Steps multi-frame bitmaps on per-frame delays. While animating, the
//! accelerated backend preference is forced off and the previous value is
//! remembered so stopping restores it.

use std::time::Instant;

use crate::error::{DrawError, DrawErrorClass};
use crate::image::CpuBitmap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Animating,
}

/// What the caller should do after a draw or frame-advance failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Skip this layer for one repaint
    Skipped,
    /// Animation stopped and rewound; draw the static path
    Stopped,
}

#[derive(Debug, Default)]
pub struct AnimationDriver {
    state: AnimationState,
    can_animate: bool,
    paused: bool,
    next_frame_at: Option<Instant>,
    /// Acceleration preference saved on entry to `Animating`
    saved_preference: Option<bool>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == AnimationState::Animating
    }

    pub fn can_animate(&self) -> bool {
        self.can_animate
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Decide animation for a freshly loaded bitmap and start if it has frames.
    /// Returns true if the driver entered `Animating`.
    pub fn on_image_loaded(
        &mut self,
        bitmap: Option<&CpuBitmap>,
        prefer_accelerated: &mut bool,
        now: Instant,
    ) -> bool {
        self.stop(prefer_accelerated);
        self.paused = false;
        self.can_animate = bitmap.is_some_and(|b| b.frame_count() > 1);

        match bitmap {
            Some(bitmap) if self.can_animate => self.start(bitmap, prefer_accelerated, now),
            _ => false,
        }
    }

    /// Enter `Animating`, forcing the software backend
    pub fn start(
        &mut self,
        bitmap: &CpuBitmap,
        prefer_accelerated: &mut bool,
        now: Instant,
    ) -> bool {
        if !self.can_animate || self.is_animating() {
            return false;
        }
        self.saved_preference = Some(*prefer_accelerated);
        *prefer_accelerated = false;
        self.state = AnimationState::Animating;
        self.next_frame_at = Some(now + bitmap.current_delay());
        tracing::debug!(
            "Animation started ({} frames), accelerated backend suspended",
            bitmap.frame_count()
        );
        true
    }

    /// Leave `Animating`, restoring the saved backend preference
    pub fn stop(&mut self, prefer_accelerated: &mut bool) -> bool {
        if !self.is_animating() {
            return false;
        }
        self.state = AnimationState::Idle;
        self.next_frame_at = None;
        if let Some(saved) = self.saved_preference.take() {
            *prefer_accelerated = saved;
        }
        tracing::debug!("Animation stopped");
        true
    }

    /// Record a preference change; while animating it is applied on stop
    pub fn set_preference(&mut self, prefer_accelerated: &mut bool, value: bool) {
        if self.is_animating() {
            self.saved_preference = Some(value);
        } else {
            *prefer_accelerated = value;
        }
    }

    pub fn pause(&mut self) -> bool {
        if !self.is_animating() || self.paused {
            return false;
        }
        self.paused = true;
        self.next_frame_at = None;
        true
    }

    pub fn resume(&mut self, bitmap: &CpuBitmap, now: Instant) -> bool {
        if !self.is_animating() || !self.paused {
            return false;
        }
        self.paused = false;
        self.next_frame_at = Some(now + bitmap.current_delay());
        true
    }

    /// When the next frame is due, if a timer is running
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.is_animating() && !self.paused {
            self.next_frame_at
        } else {
            None
        }
    }

    /// Advance the bitmap if its frame is due. Returns true if a frame changed.
    pub fn tick(&mut self, bitmap: &mut CpuBitmap, now: Instant) -> Result<bool, DrawError> {
        let Some(due) = self.next_deadline() else {
            return Ok(false);
        };
        if now < due {
            return Ok(false);
        }
        let delay = bitmap.advance_frame()?;
        self.next_frame_at = Some(now + delay);
        Ok(true)
    }

    /// Classify a failure from the animated draw path and react to it.
    ///
    /// Transient failures skip one repaint. Anything else stops the animation,
    /// rewinds to frame zero and disables animation until the next load.
    pub fn handle_failure(
        &mut self,
        err: &DrawError,
        bitmap: Option<&mut CpuBitmap>,
        prefer_accelerated: &mut bool,
    ) -> FailureOutcome {
        match err.class() {
            DrawErrorClass::Transient => {
                tracing::debug!("Skipping animation frame: {}", err);
                FailureOutcome::Skipped
            }
            DrawErrorClass::StopAnimation => {
                tracing::warn!("Stopping animation after draw failure: {}", err);
                self.stop(prefer_accelerated);
                self.can_animate = false;
                if let Some(bitmap) = bitmap {
                    if let Err(e) = bitmap.select_frame(0) {
                        tracing::debug!("Could not rewind animation: {}", e);
                    }
                }
                FailureOutcome::Stopped
            }
        }
    }
}
