//! Input visualizer core
//!
//! Wires the classifier to the state tracker and pushes every resulting
//! snapshot to a renderer.
//! - classify: raw event -> label + state update
//! - track: state update -> RenderState
//! - render: RenderState -> pixels/text (external)

pub mod state;
pub mod tracker;

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::input::classifier::classify;
use crate::input::event::RawEvent;

pub use state::{ButtonState, ModifierState, MouseButtonState, RenderState, WheelDirection};
pub use tracker::{describe, Tracker};

/// Receives a snapshot after every processed event and every wheel clear
pub trait Render {
    fn render(&mut self, state: &RenderState);
}

impl<F> Render for F
where
    F: FnMut(&RenderState),
{
    fn render(&mut self, state: &RenderState) {
        self(state)
    }
}

/// Classifier + tracker + renderer
pub struct Visualizer<R: Render> {
    tracker: Tracker,
    renderer: R,
}

impl<R: Render> Visualizer<R> {
    pub fn new(wheel_clear: Duration, renderer: R) -> Self {
        Self {
            tracker: Tracker::new(wheel_clear),
            renderer,
        }
    }

    /// Observe one event from the global stream
    ///
    /// The event is only read; callers keep delivering it to the rest of
    /// the application.
    pub fn handle_event(&mut self, event: &RawEvent, now: Instant) {
        match classify(event) {
            Some(classification) => {
                debug!("{} event: {:?}", event.kind(), classification.update);
                let state = self.tracker.apply(&classification, now);
                self.renderer.render(&state);
            }
            None => trace!("Unclassified event: {}", event.kind()),
        }
    }

    /// Fire the wheel auto-clear if it is due
    pub fn poll_timers(&mut self, now: Instant) {
        if let Some(state) = self.tracker.on_wheel_timeout(now) {
            self.renderer.render(&state);
        }
    }

    /// When the event loop must wake up next, if anything is pending
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tracker.next_deadline()
    }

    pub fn set_wheel_clear(&mut self, wheel_clear: Duration) {
        self.tracker.set_wheel_clear(wheel_clear);
    }

    /// Draw the current state without an event (startup, config reload)
    pub fn redraw(&mut self) {
        let state = self.tracker.snapshot();
        self.renderer.render(&state);
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
