//! libseat session backend
//!
//! Opens input devices without root through seatd or logind, and reports
//! VT switches as session enable/disable.

use std::cell::Cell;
use std::os::fd::{AsFd, AsRawFd, FromRawFd, OwnedFd, RawFd};
use std::path::Path;
use std::rc::Rc;
use std::sync::mpsc;

use anyhow::{Context, Result};
use libseat::{Seat, SeatEvent, SeatRef};
use log::{debug, info, warn};

use crate::input::RawEvent;

/// Session event from libseat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Session enabled (VT acquired)
    Enable,
    /// Session disabled (VT released)
    Disable,
}

impl SessionEvent {
    /// The activation change this session event represents
    pub fn to_raw_event(self) -> RawEvent {
        RawEvent::Activation {
            active: self == SessionEvent::Enable,
        }
    }
}

/// Record a libseat callback event in the shared active flag
fn session_event(active: &Cell<bool>, event: &SeatEvent) -> SessionEvent {
    match event {
        SeatEvent::Enable => {
            active.set(true);
            SessionEvent::Enable
        }
        SeatEvent::Disable => {
            active.set(false);
            SessionEvent::Disable
        }
    }
}

/// libseat seat handle plus the events its callback has queued
pub struct SeatSession {
    seat: Seat,
    /// Written by the libseat callback
    active: Rc<Cell<bool>>,
    events: mpsc::Receiver<SessionEvent>,
}

impl SeatSession {
    /// Open the seat; the session starts disabled until libseat enables it
    pub fn open() -> Result<Self> {
        let (tx, events) = mpsc::channel();
        let active = Rc::new(Cell::new(false));
        let flag = active.clone();

        let seat = Seat::open(move |seat_ref: &mut SeatRef, event: SeatEvent| {
            let event = session_event(&flag, &event);
            info!("libseat: session {:?}", event);
            if event == SessionEvent::Disable {
                // libseat waits for this acknowledgement before switching VT
                if let Err(e) = seat_ref.disable() {
                    warn!("libseat: failed to acknowledge disable: {}", e);
                }
            }
            let _ = tx.send(event);
        })
        .context("Failed to open libseat session")?;

        info!("libseat: opened seat '{}'", seat.name());
        Ok(Self {
            seat,
            active,
            events,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Block up to `timeout_ms` for the initial Enable
    ///
    /// Devices can only be opened once the seat is enabled.
    pub fn wait_active(&mut self, timeout_ms: i32) -> Result<bool> {
        if !self.is_active() {
            self.seat
                .dispatch(timeout_ms)
                .context("Failed to dispatch seat events")?;
        }
        Ok(self.is_active())
    }

    /// Pollable seat fd
    pub fn get_fd(&mut self) -> Result<RawFd> {
        let fd = self.seat.get_fd().context("Failed to get seat fd")?;
        Ok(fd.as_raw_fd())
    }

    /// Run pending libseat callbacks (call when the seat fd is readable)
    pub fn dispatch(&mut self) -> Result<()> {
        self.seat
            .dispatch(0)
            .context("Failed to dispatch seat events")?;
        Ok(())
    }

    /// Next queued enable/disable, if any
    pub fn try_recv_event(&self) -> Option<SessionEvent> {
        self.events.try_recv().ok()
    }

    /// Open an input device through the seat
    ///
    /// libseat keeps its own fd; the caller gets a duplicate it owns.
    pub fn open_device<P: AsRef<Path>>(&mut self, path: P) -> Result<OwnedFd> {
        let path = path.as_ref();
        let device = self
            .seat
            .open_device(&path)
            .with_context(|| format!("Failed to open device: {}", path.display()))?;

        let raw_fd = device.as_fd().as_raw_fd();
        let dup_fd = nix::unistd::dup(raw_fd).context("Failed to dup device fd")?;
        debug!("libseat: opened {} (fd={})", path.display(), dup_fd);
        Ok(unsafe { OwnedFd::from_raw_fd(dup_fd) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Needs seatd or logind and a seat the user may take.
    #[test]
    #[ignore]
    fn test_open_session() {
        let session = SeatSession::open();
        assert!(session.is_ok(), "Failed to open seat session");
    }

    #[test]
    fn test_session_event_tracks_active() {
        let active = Cell::new(false);
        assert_eq!(session_event(&active, &SeatEvent::Enable), SessionEvent::Enable);
        assert!(active.get());
        assert_eq!(session_event(&active, &SeatEvent::Disable), SessionEvent::Disable);
        assert!(!active.get());
    }

    #[test]
    fn test_session_event_to_activation() {
        assert_eq!(
            SessionEvent::Enable.to_raw_event(),
            RawEvent::Activation { active: true }
        );
        assert_eq!(
            SessionEvent::Disable.to_raw_event(),
            RawEvent::Activation { active: false }
        );
    }
}
