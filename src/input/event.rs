//! Raw input events
//!
//! The platform-neutral event stream the classifier consumes.
//! The libinput source produces these; tests build them by hand.

use bitflags::bitflags;

use super::keycodes::KeyCode;

bitflags! {
    /// Modifier bitmask reported with a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const CTRL  = 0b0001;
        const SHIFT = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

bitflags! {
    /// Mouse buttons currently held down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const LEFT   = 0b001;
        const RIGHT  = 0b010;
        const MIDDLE = 0b100;
    }
}

/// Key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

/// Mouse button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Press,
    Release,
    DoubleClick,
}

/// One event from the global input stream
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    /// Application/session gained or lost focus
    Activation { active: bool },
    /// Key press or release
    Key {
        action: KeyAction,
        code: KeyCode,
        /// Modifier state at the time of the event
        modifiers: Modifiers,
        /// Synthetic repeat while the key is held
        autorepeat: bool,
    },
    /// Mouse button press, release or double-click
    Mouse {
        action: MouseAction,
        /// Every button held down after this event
        buttons: MouseButtons,
    },
    /// Vertical wheel motion (positive = away from the user)
    Wheel { delta_y: f64 },
    /// Anything else (motion, device hotplug, ...)
    Other { kind: &'static str },
}

impl RawEvent {
    /// Non-repeating key press
    pub fn key_press(code: u32, modifiers: Modifiers) -> Self {
        RawEvent::Key {
            action: KeyAction::Press,
            code: KeyCode(code),
            modifiers,
            autorepeat: false,
        }
    }

    /// Non-repeating key release
    pub fn key_release(code: u32, modifiers: Modifiers) -> Self {
        RawEvent::Key {
            action: KeyAction::Release,
            code: KeyCode(code),
            modifiers,
            autorepeat: false,
        }
    }

    /// Short name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            RawEvent::Activation { .. } => "activation",
            RawEvent::Key { .. } => "key",
            RawEvent::Mouse { .. } => "mouse",
            RawEvent::Wheel { .. } => "wheel",
            RawEvent::Other { kind } => *kind,
        }
    }
}
