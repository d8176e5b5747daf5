//! Input handling
//!
//! Decode the global input event stream.
//! - Raw events and key codes (platform-neutral)
//! - Classifier: raw event -> action label + state update
//! - libinput + xkbcommon source (Linux console / any seat)

pub mod classifier;
pub mod click;
pub mod event;
pub mod keycodes;
#[cfg(target_os = "linux")]
pub mod source;

pub use classifier::{classify, Classification, KeyReadout, StateUpdate};
pub use click::ClickTracker;
pub use event::{KeyAction, Modifiers, MouseAction, MouseButtons, RawEvent};
pub use keycodes::{key_label, KeyCode};
#[cfg(target_os = "linux")]
pub use source::{InputSource, SourceError};
