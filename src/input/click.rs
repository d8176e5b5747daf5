//! Button state and double-click detection
//!
//! libinput reports single button transitions; the classifier wants the full
//! down mask and a double-click flag. This keeps both.

use std::time::{Duration, Instant};

use super::event::{MouseAction, MouseButtons};

/// Tracks held buttons and recent presses
#[derive(Debug)]
pub struct ClickTracker {
    /// Buttons held down right now
    down: MouseButtons,
    /// Last plain press (button, time); cleared once it became a double-click
    last_press: Option<(MouseButtons, Instant)>,
    threshold: Duration,
}

impl ClickTracker {
    pub fn new(threshold: Duration) -> Self {
        Self {
            down: MouseButtons::empty(),
            last_press: None,
            threshold,
        }
    }

    pub fn set_threshold(&mut self, threshold: Duration) {
        self.threshold = threshold;
    }

    /// Record a press; returns the action and the down mask after it
    pub fn press(&mut self, button: MouseButtons, now: Instant) -> (MouseAction, MouseButtons) {
        self.down.insert(button);
        let action = match self.last_press {
            Some((prev, at)) if prev == button && now.duration_since(at) < self.threshold => {
                // A third quick press starts over as a plain click
                self.last_press = None;
                MouseAction::DoubleClick
            }
            _ => {
                self.last_press = Some((button, now));
                MouseAction::Press
            }
        };
        (action, self.down)
    }

    /// Record a release; returns the down mask after it
    pub fn release(&mut self, button: MouseButtons) -> MouseButtons {
        self.down.remove(button);
        self.down
    }

    /// Forget everything (session lost)
    pub fn reset(&mut self) {
        self.down = MouseButtons::empty();
        self.last_press = None;
    }
}
