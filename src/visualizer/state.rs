//! Presentation state
//!
//! Value types describing what the user is doing right now.
//! `RenderState` is the immutable snapshot handed to renderers.

use smol_str::SmolStr;

use crate::input::event::{Modifiers, MouseButtons};

/// Held modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierState {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl ModifierState {
    /// Snapshot of a modifier bitmask
    pub fn from_mask(mask: Modifiers) -> Self {
        Self {
            ctrl: mask.contains(Modifiers::CTRL),
            shift: mask.contains(Modifiers::SHIFT),
            alt: mask.contains(Modifiers::ALT),
            meta: mask.contains(Modifiers::META),
        }
    }

    /// Prefix for an action description ("Ctrl + Shift + ")
    ///
    /// Order is always Ctrl, Shift, Alt, Meta.
    pub fn prefix(&self) -> String {
        let mut prefix = String::new();
        for (held, name) in [
            (self.ctrl, "Ctrl"),
            (self.shift, "Shift"),
            (self.alt, "Alt"),
            (self.meta, "Meta"),
        ] {
            if held {
                prefix.push_str(name);
                prefix.push_str(" + ");
            }
        }
        prefix
    }
}

/// State of a single mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
    /// Held after a double-click (drawn differently from a plain press)
    DoubleClicked,
}

/// State of the three tracked mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseButtonState {
    pub left: ButtonState,
    pub middle: ButtonState,
    pub right: ButtonState,
}

impl MouseButtonState {
    /// Derive all three buttons from a down-button mask
    pub fn from_mask(buttons: MouseButtons, double_click: bool) -> Self {
        let held = if double_click {
            ButtonState::DoubleClicked
        } else {
            ButtonState::Pressed
        };
        let state = |button: MouseButtons| {
            if buttons.contains(button) {
                held
            } else {
                ButtonState::Released
            }
        };
        Self {
            left: state(MouseButtons::LEFT),
            middle: state(MouseButtons::MIDDLE),
            right: state(MouseButtons::RIGHT),
        }
    }
}

/// Wheel indicator direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelDirection {
    #[default]
    None,
    Up,
    Down,
}

impl WheelDirection {
    /// Direction for a vertical delta (zero counts as down)
    pub fn from_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            WheelDirection::Up
        } else {
            WheelDirection::Down
        }
    }

    pub fn is_active(&self) -> bool {
        *self != WheelDirection::None
    }
}

/// Snapshot of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderState {
    pub modifiers: ModifierState,
    pub mouse_buttons: MouseButtonState,
    pub wheel: WheelDirection,
    /// Live readout of the key currently held (None when cleared)
    pub current_key: Option<SmolStr>,
    /// Description of the most recent labelled action
    pub last_action: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_order() {
        let all = ModifierState::from_mask(Modifiers::all());
        assert_eq!(all.prefix(), "Ctrl + Shift + Alt + Meta + ");

        let some = ModifierState::from_mask(Modifiers::META | Modifiers::SHIFT);
        assert_eq!(some.prefix(), "Shift + Meta + ");

        assert_eq!(ModifierState::default().prefix(), "");
    }

    #[test]
    fn test_buttons_from_mask() {
        let state = MouseButtonState::from_mask(MouseButtons::LEFT | MouseButtons::MIDDLE, false);
        assert_eq!(state.left, ButtonState::Pressed);
        assert_eq!(state.middle, ButtonState::Pressed);
        assert_eq!(state.right, ButtonState::Released);

        let state = MouseButtonState::from_mask(MouseButtons::RIGHT, true);
        assert_eq!(state.right, ButtonState::DoubleClicked);
        assert_eq!(state.left, ButtonState::Released);
    }

    #[test]
    fn test_wheel_direction_from_delta() {
        assert_eq!(WheelDirection::from_delta(120.0), WheelDirection::Up);
        assert_eq!(WheelDirection::from_delta(-120.0), WheelDirection::Down);
        assert_eq!(WheelDirection::from_delta(0.0), WheelDirection::Down);
    }
}
