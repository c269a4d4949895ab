//! Held nudge keys and their repeat timer

use std::time::{Duration, Instant};

use crate::messages::NudgeKey;

/// Interval between nudges while a key is held
pub const NUDGE_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    /// Held keys in press order
    keys: Vec<NudgeKey>,
    next_nudge_at: Option<Instant>,
}

impl HeldKeys {
    /// Record a press. Returns true if the key was not already held.
    pub fn press(&mut self, key: NudgeKey, now: Instant) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        if self.next_nudge_at.is_none() {
            self.next_nudge_at = Some(now + NUDGE_INTERVAL);
        }
        true
    }

    pub fn release(&mut self, key: NudgeKey) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| *k != key);
        if self.keys.is_empty() {
            self.next_nudge_at = None;
        }
        self.keys.len() != before
    }

    pub fn release_all(&mut self) {
        self.keys.clear();
        self.next_nudge_at = None;
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_held(&self, key: NudgeKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = NudgeKey> + '_ {
        self.keys.iter().copied()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_nudge_at
    }

    /// If a nudge is due at `now`, schedule the next one and return true
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_nudge_at {
            Some(due) if now >= due && !self.keys.is_empty() => {
                self.next_nudge_at = Some(now + NUDGE_INTERVAL);
                true
            }
            _ => false,
        }
    }
}
