//! Presentation state tracker
//!
//! Owns the persistent state (modifiers, buttons, wheel) and the transient
//! texts (current key, last action). Applies classifier output and runs the
//! wheel auto-clear timer.

use std::time::{Duration, Instant};

use log::debug;
use smol_str::SmolStr;

use super::state::{ModifierState, MouseButtonState, RenderState, WheelDirection};
use crate::input::classifier::{Classification, KeyReadout, StateUpdate};

/// Pending one-shot wheel clear
///
/// The tracker holds at most one; arming a new one replaces the old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WheelTimer {
    deadline: Instant,
}

/// Current presentation state
#[derive(Debug)]
pub struct Tracker {
    modifiers: ModifierState,
    mouse_buttons: MouseButtonState,
    wheel: WheelDirection,
    wheel_timer: Option<WheelTimer>,
    /// How long the wheel indicator stays lit
    wheel_clear: Duration,
    current_key: Option<SmolStr>,
    last_action: String,
}

impl Tracker {
    pub fn new(wheel_clear: Duration) -> Self {
        Self {
            modifiers: ModifierState::default(),
            mouse_buttons: MouseButtonState::default(),
            wheel: WheelDirection::None,
            wheel_timer: None,
            wheel_clear,
            current_key: None,
            last_action: String::new(),
        }
    }

    /// Change the wheel window (takes effect on the next wheel event)
    pub fn set_wheel_clear(&mut self, wheel_clear: Duration) {
        self.wheel_clear = wheel_clear;
    }

    /// Apply one classified event and return the resulting snapshot
    pub fn apply(&mut self, classification: &Classification, now: Instant) -> RenderState {
        match &classification.update {
            StateUpdate::Reset => {
                self.modifiers = ModifierState::default();
                self.mouse_buttons = MouseButtonState::default();
            }
            StateUpdate::Key { modifiers, readout } => {
                self.modifiers = ModifierState::from_mask(*modifiers);
                match readout {
                    KeyReadout::Show(text) => self.current_key = Some(text.clone()),
                    KeyReadout::Clear => self.current_key = None,
                    KeyReadout::Keep => {}
                }
            }
            StateUpdate::Mouse {
                buttons,
                double_click,
            } => {
                self.mouse_buttons = MouseButtonState::from_mask(*buttons, *double_click);
            }
            StateUpdate::Wheel(direction) => {
                self.wheel = *direction;
                self.arm_wheel_timer(now);
            }
        }

        if let Some(label) = classification.label.as_deref().filter(|l| !l.is_empty()) {
            self.last_action = describe(&self.modifiers, label);
            debug!("Last action: {}", self.last_action);
        }

        self.snapshot()
    }

    /// Fire the wheel clear if its deadline has passed
    ///
    /// Returns the new snapshot when the indicator was cleared.
    pub fn on_wheel_timeout(&mut self, now: Instant) -> Option<RenderState> {
        let timer = self.wheel_timer?;
        if now < timer.deadline {
            return None;
        }
        self.wheel_timer = None;
        self.wheel = WheelDirection::None;
        Some(self.snapshot())
    }

    /// Deadline of the pending wheel clear, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.wheel_timer.map(|t| t.deadline)
    }

    pub fn snapshot(&self) -> RenderState {
        RenderState {
            modifiers: self.modifiers,
            mouse_buttons: self.mouse_buttons,
            wheel: self.wheel,
            current_key: self.current_key.clone(),
            last_action: self.last_action.clone(),
        }
    }

    fn arm_wheel_timer(&mut self, now: Instant) {
        // Replacing the handle supersedes any pending clear
        self.wheel_timer = Some(WheelTimer {
            deadline: now + self.wheel_clear,
        });
    }
}

/// Action description: held modifiers in fixed order, then the label
pub fn describe(modifiers: &ModifierState, label: &str) -> String {
    let mut text = modifiers.prefix();
    text.push_str(label);
    text
}
