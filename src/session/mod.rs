//! Session management
//!
//! With the `seatd` feature, input devices are opened through libseat
//! (seatd or logind, no root needed). Session enable/disable (VT switch)
//! is what the visualizer treats as an activation change.

#[cfg(all(target_os = "linux", feature = "seatd"))]
mod seatd;
#[cfg(all(target_os = "linux", feature = "seatd"))]
pub use seatd::{SeatSession, SessionEvent};
