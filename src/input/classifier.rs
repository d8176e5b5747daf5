//! Event classifier
//!
//! Turns one raw input event into an optional action label plus the state
//! update it implies. Pure function, no state of its own.

use smol_str::SmolStr;

use super::event::{KeyAction, Modifiers, MouseAction, MouseButtons, RawEvent};
use super::keycodes::key_label;
use crate::visualizer::state::WheelDirection;

/// What a key event does to the current-key readout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyReadout {
    /// Show this label
    Show(SmolStr),
    /// Clear the readout
    Clear,
    /// Leave the readout alone (key not in the label table)
    Keep,
}

/// State change implied by a classified event
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// Focus changed: release every modifier and button
    Reset,
    /// Key press/release: snapshot modifiers, update readout
    Key {
        modifiers: Modifiers,
        readout: KeyReadout,
    },
    /// Mouse buttons from the full down mask
    Mouse {
        buttons: MouseButtons,
        double_click: bool,
    },
    /// Wheel moved
    Wheel(WheelDirection),
}

/// Classifier output
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Action label; None never overwrites the last action
    pub label: Option<SmolStr>,
    pub update: StateUpdate,
}

impl Classification {
    fn unlabelled(update: StateUpdate) -> Self {
        Self {
            label: None,
            update,
        }
    }
}

/// Name of the highest-priority held button (Left > Right > Middle)
pub fn primary_button(buttons: MouseButtons) -> Option<&'static str> {
    if buttons.contains(MouseButtons::LEFT) {
        Some("Left")
    } else if buttons.contains(MouseButtons::RIGHT) {
        Some("Right")
    } else if buttons.contains(MouseButtons::MIDDLE) {
        Some("Middle")
    } else {
        None
    }
}

/// Classify one raw event
///
/// Returns None for events that change nothing (autorepeat, unknown kinds).
pub fn classify(event: &RawEvent) -> Option<Classification> {
    match *event {
        RawEvent::Activation { .. } => Some(Classification::unlabelled(StateUpdate::Reset)),

        RawEvent::Key { autorepeat: true, .. } => None,

        RawEvent::Key {
            action,
            code,
            modifiers,
            autorepeat: false,
        } => {
            let (label, readout) = match (key_label(code), action) {
                (Some(text), KeyAction::Press) => {
                    let text = SmolStr::new_inline(text);
                    (Some(text.clone()), KeyReadout::Show(text))
                }
                (Some(_), KeyAction::Release) => (None, KeyReadout::Clear),
                (None, _) => (None, KeyReadout::Keep),
            };
            Some(Classification {
                label,
                update: StateUpdate::Key { modifiers, readout },
            })
        }

        RawEvent::Mouse { action, buttons } => {
            let double_click = action == MouseAction::DoubleClick;
            let label = match action {
                MouseAction::Press => {
                    primary_button(buttons).map(|b| SmolStr::from(format!("{} click", b)))
                }
                MouseAction::DoubleClick => {
                    primary_button(buttons).map(|b| SmolStr::from(format!("{} double-click", b)))
                }
                MouseAction::Release => None,
            };
            Some(Classification {
                label,
                update: StateUpdate::Mouse {
                    buttons,
                    double_click,
                },
            })
        }

        RawEvent::Wheel { delta_y } => {
            let direction = WheelDirection::from_delta(delta_y);
            let label = match direction {
                WheelDirection::Up => "Wheel \u{2191}",
                _ => "Wheel \u{2193}",
            };
            Some(Classification {
                label: Some(SmolStr::new_inline(label)),
                update: StateUpdate::Wheel(direction),
            })
        }

        RawEvent::Other { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keycodes::*;

    fn label(event: &RawEvent) -> Option<String> {
        classify(event).and_then(|c| c.label).map(|s| s.to_string())
    }

    #[test]
    fn test_activation_resets_without_label() {
        for active in [true, false] {
            let c = classify(&RawEvent::Activation { active }).unwrap();
            assert_eq!(c.label, None);
            assert_eq!(c.update, StateUpdate::Reset);
        }
    }

    #[test]
    fn test_key_press_and_release() {
        let press = classify(&RawEvent::key_press(KEY_LOWER_A, Modifiers::CTRL)).unwrap();
        assert_eq!(press.label.as_deref(), Some("A"));
        assert_eq!(
            press.update,
            StateUpdate::Key {
                modifiers: Modifiers::CTRL,
                readout: KeyReadout::Show(SmolStr::new("A")),
            }
        );

        let release = classify(&RawEvent::key_release(KEY_LOWER_A, Modifiers::CTRL)).unwrap();
        assert_eq!(release.label, None);
        assert_eq!(
            release.update,
            StateUpdate::Key {
                modifiers: Modifiers::CTRL,
                readout: KeyReadout::Clear,
            }
        );
    }

    #[test]
    fn test_unknown_key_keeps_readout() {
        let c = classify(&RawEvent::key_press(KEY_CONTROL_L, Modifiers::CTRL)).unwrap();
        assert_eq!(c.label, None);
        assert_eq!(
            c.update,
            StateUpdate::Key {
                modifiers: Modifiers::CTRL,
                readout: KeyReadout::Keep,
            }
        );
    }

    #[test]
    fn test_autorepeat_ignored() {
        let event = RawEvent::Key {
            action: KeyAction::Press,
            code: KeyCode(KEY_LOWER_A),
            modifiers: Modifiers::SHIFT,
            autorepeat: true,
        };
        assert_eq!(classify(&event), None);
    }

    #[test]
    fn test_mouse_priority() {
        let both = RawEvent::Mouse {
            action: MouseAction::Press,
            buttons: MouseButtons::LEFT | MouseButtons::RIGHT,
        };
        assert_eq!(label(&both).as_deref(), Some("Left click"));

        let right_middle = RawEvent::Mouse {
            action: MouseAction::DoubleClick,
            buttons: MouseButtons::RIGHT | MouseButtons::MIDDLE,
        };
        assert_eq!(label(&right_middle).as_deref(), Some("Right double-click"));

        let middle = RawEvent::Mouse {
            action: MouseAction::Press,
            buttons: MouseButtons::MIDDLE,
        };
        assert_eq!(label(&middle).as_deref(), Some("Middle click"));
    }

    #[test]
    fn test_mouse_release_has_no_label() {
        let c = classify(&RawEvent::Mouse {
            action: MouseAction::Release,
            buttons: MouseButtons::RIGHT,
        })
        .unwrap();
        assert_eq!(c.label, None);
        assert_eq!(
            c.update,
            StateUpdate::Mouse {
                buttons: MouseButtons::RIGHT,
                double_click: false,
            }
        );
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(label(&RawEvent::Wheel { delta_y: 120.0 }).as_deref(), Some("Wheel \u{2191}"));
        assert_eq!(label(&RawEvent::Wheel { delta_y: -15.0 }).as_deref(), Some("Wheel \u{2193}"));
        let zero = classify(&RawEvent::Wheel { delta_y: 0.0 }).unwrap();
        assert_eq!(zero.update, StateUpdate::Wheel(WheelDirection::Down));
    }

    #[test]
    fn test_other_not_classified() {
        assert_eq!(classify(&RawEvent::Other { kind: "pointer-motion" }), None);
    }
}
