//! Cancelable on-canvas text message
//!
//! A message is shown after an optional delay and hidden after its display
//! duration. Each `show`/`clear` bumps a generation counter; scheduled steps
//! carry the generation they were created under and are dropped once it is
//! stale, so at most one message sequence is ever live.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageAction {
    Show(String),
    Hide,
}

/// One scheduled step of a message sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTask {
    pub generation: u64,
    pub due: Instant,
    pub action: MessageAction,
}

#[derive(Debug, Default)]
pub struct MessageOverlay {
    text: String,
    generation: u64,
    tasks: Vec<MessageTask>,
}

impl MessageOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently displayed (empty when hidden)
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Supersede any pending or displayed message with `text`.
    ///
    /// A zero `duration` keeps the message up until the next show or clear.
    pub fn show(&mut self, text: impl Into<String>, delay: Duration, duration: Duration, now: Instant) {
        self.generation += 1;
        self.text.clear();

        let text = text.into();
        let shown_at = now + delay;
        self.tasks.push(MessageTask {
            generation: self.generation,
            due: shown_at,
            action: MessageAction::Show(text),
        });
        if !duration.is_zero() {
            self.tasks.push(MessageTask {
                generation: self.generation,
                due: shown_at + duration,
                action: MessageAction::Hide,
            });
        }

        // A zero delay shows immediately
        self.poll(now);
    }

    /// Hide the message and cancel every pending step
    pub fn clear(&mut self) -> bool {
        self.generation += 1;
        let changed = !self.text.is_empty();
        self.text.clear();
        changed
    }

    /// Run due steps of the live generation. Returns true if the text changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let generation = self.generation;
        self.tasks.retain(|t| t.generation == generation);

        let mut due: Vec<MessageTask> = Vec::new();
        self.tasks.retain(|t| {
            if t.due <= now {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|t| t.due);

        let before = self.text.clone();
        for task in due {
            // Stale steps never write
            if task.generation != self.generation {
                continue;
            }
            match task.action {
                MessageAction::Show(text) => self.text = text,
                MessageAction::Hide => self.text.clear(),
            }
        }
        before != self.text
    }

    /// Earliest pending step of the live generation
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks
            .iter()
            .filter(|t| t.generation == self.generation)
            .map(|t| t.due)
            .min()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.generation == self.generation)
            .count()
    }
}
