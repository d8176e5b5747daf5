//! End-to-end scenarios through the public API
//!
//! Raw events go in, RenderState snapshots come out. No devices needed.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use inputviz::input::keycodes::*;
use inputviz::input::{Modifiers, MouseAction, MouseButtons};
use inputviz::visualizer::{ButtonState, WheelDirection};
use inputviz::{RawEvent, RenderState, Visualizer};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Visualizer that records every rendered frame
fn recorder() -> (
    Visualizer<impl FnMut(&RenderState)>,
    Rc<RefCell<Vec<RenderState>>>,
) {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = frames.clone();
    let viz = Visualizer::new(ms(200), move |state: &RenderState| {
        sink.borrow_mut().push(state.clone())
    });
    (viz, frames)
}

fn last(frames: &Rc<RefCell<Vec<RenderState>>>) -> RenderState {
    frames.borrow().last().cloned().unwrap_or_default()
}

fn mouse(action: MouseAction, buttons: MouseButtons) -> RawEvent {
    RawEvent::Mouse { action, buttons }
}

#[test]
fn test_ctrl_a_scenario() {
    let (mut viz, frames) = recorder();
    let t0 = Instant::now();

    viz.handle_event(&RawEvent::key_press(KEY_CONTROL_L, Modifiers::CTRL), t0);
    viz.handle_event(&RawEvent::key_press(KEY_LOWER_A, Modifiers::CTRL), t0);
    let state = last(&frames);
    assert_eq!(state.last_action, "Ctrl + A");
    assert_eq!(state.current_key.as_deref(), Some("A"));
    assert!(state.modifiers.ctrl);

    viz.handle_event(&RawEvent::key_release(KEY_LOWER_A, Modifiers::CTRL), t0);
    viz.handle_event(&RawEvent::key_release(KEY_CONTROL_L, Modifiers::empty()), t0);
    let state = last(&frames);
    assert_eq!(state.last_action, "Ctrl + A");
    assert!(!state.modifiers.ctrl);
    assert_eq!(state.current_key, None);
}

#[test]
fn test_modifier_prefix_order_is_fixed() {
    let (mut viz, frames) = recorder();
    let t0 = Instant::now();
    let all = Modifiers::META | Modifiers::ALT | Modifiers::SHIFT | Modifiers::CTRL;

    viz.handle_event(&RawEvent::key_press(KEY_SUPER_L, Modifiers::META), t0);
    viz.handle_event(&RawEvent::key_press(KEY_ALT_L, Modifiers::META | Modifiers::ALT), t0);
    viz.handle_event(&RawEvent::key_press(KEY_F1 + 4, all), t0);
    assert_eq!(last(&frames).last_action, "Ctrl + Shift + Alt + Meta + F5");
}

#[test]
fn test_autorepeat_changes_nothing() {
    let (mut viz, frames) = recorder();
    let t0 = Instant::now();

    viz.handle_event(&RawEvent::key_press(KEY_ESCAPE, Modifiers::empty()), t0);
    let before = last(&frames);
    let rendered = frames.borrow().len();

    viz.handle_event(
        &RawEvent::Key {
            action: inputviz::input::KeyAction::Press,
            code: inputviz::input::KeyCode(KEY_TAB),
            modifiers: Modifiers::SHIFT,
            autorepeat: true,
        },
        t0,
    );
    assert_eq!(frames.borrow().len(), rendered);
    assert_eq!(last(&frames), before);
}

#[test]
fn test_activation_resets_but_keeps_last_action() {
    let (mut viz, frames) = recorder();
    let t0 = Instant::now();

    viz.handle_event(&RawEvent::key_press(KEY_SHIFT_L, Modifiers::SHIFT), t0);
    viz.handle_event(&mouse(MouseAction::Press, MouseButtons::RIGHT), t0);
    viz.handle_event(&RawEvent::Activation { active: false }, t0);

    let state = last(&frames);
    assert!(!state.modifiers.shift);
    assert_eq!(state.mouse_buttons.right, ButtonState::Released);
    assert_eq!(state.last_action, "Shift + Right click");
}

#[test]
fn test_left_wins_over_right() {
    let (mut viz, frames) = recorder();
    viz.handle_event(
        &mouse(MouseAction::Press, MouseButtons::LEFT | MouseButtons::RIGHT),
        Instant::now(),
    );
    assert_eq!(last(&frames).last_action, "Left click");
}

#[test]
fn test_double_click_scenario() {
    let (mut viz, frames) = recorder();
    let t0 = Instant::now();

    viz.handle_event(&mouse(MouseAction::Press, MouseButtons::LEFT), t0);
    let pressed = last(&frames);
    viz.handle_event(&mouse(MouseAction::Release, MouseButtons::empty()), t0 + ms(80));
    let released = last(&frames);
    viz.handle_event(&mouse(MouseAction::DoubleClick, MouseButtons::LEFT), t0 + ms(150));
    let double = last(&frames);

    assert_eq!(pressed.mouse_buttons.left, ButtonState::Pressed);
    assert_eq!(pressed.last_action, "Left click");
    assert_eq!(released.mouse_buttons.left, ButtonState::Released);
    assert_eq!(double.mouse_buttons.left, ButtonState::DoubleClicked);
    assert_eq!(double.last_action, "Left double-click");
}

#[test]
fn test_wheel_direction_and_auto_clear() {
    let (mut viz, frames) = recorder();
    let t0 = Instant::now();

    viz.handle_event(&RawEvent::Wheel { delta_y: 120.0 }, t0);
    assert_eq!(last(&frames).wheel, WheelDirection::Up);
    assert_eq!(last(&frames).last_action, "Wheel \u{2191}");

    viz.handle_event(&RawEvent::Wheel { delta_y: 0.0 }, t0);
    assert_eq!(last(&frames).wheel, WheelDirection::Down);
    assert_eq!(last(&frames).last_action, "Wheel \u{2193}");

    viz.poll_timers(t0 + ms(199));
    assert_eq!(last(&frames).wheel, WheelDirection::Down);
    viz.poll_timers(t0 + ms(200));
    assert_eq!(last(&frames).wheel, WheelDirection::None);
    assert_eq!(viz.next_deadline(), None);
}

#[test]
fn test_wheel_rearm_extends_window() {
    let (mut viz, frames) = recorder();
    let t0 = Instant::now();

    viz.handle_event(&RawEvent::Wheel { delta_y: -1.0 }, t0);
    viz.handle_event(&RawEvent::Wheel { delta_y: -1.0 }, t0 + ms(100));
    assert_eq!(viz.next_deadline(), Some(t0 + ms(300)));

    viz.poll_timers(t0 + ms(250));
    assert_eq!(last(&frames).wheel, WheelDirection::Down);
    viz.poll_timers(t0 + ms(300));
    assert_eq!(last(&frames).wheel, WheelDirection::None);
}

#[test]
fn test_key_events_do_not_clear_wheel() {
    let (mut viz, frames) = recorder();
    let t0 = Instant::now();

    viz.handle_event(&RawEvent::Wheel { delta_y: 3.0 }, t0);
    viz.handle_event(&RawEvent::key_press(KEY_SPACE, Modifiers::empty()), t0 + ms(10));
    let state = last(&frames);
    assert_eq!(state.wheel, WheelDirection::Up);
    assert_eq!(state.last_action, "Space");
}

#[test]
fn test_unknown_key_keeps_readout_and_action() {
    let (mut viz, frames) = recorder();
    let t0 = Instant::now();

    viz.handle_event(&RawEvent::key_press(KEY_PAGE_DOWN, Modifiers::empty()), t0);
    // Caps_Lock is not in the label table
    viz.handle_event(&RawEvent::key_press(0xffe5, Modifiers::empty()), t0);
    let state = last(&frames);
    assert_eq!(state.current_key.as_deref(), Some("Page Down"));
    assert_eq!(state.last_action, "Page Down");
}
