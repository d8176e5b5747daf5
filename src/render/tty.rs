//! Terminal echo control
//!
//! The status line shares its tty with the keyboard being visualized.
//! With echo on, every typed character would land on the line between
//! redraws, so echo is off while the guard lives.

use std::os::fd::{AsRawFd, BorrowedFd, RawFd};

use anyhow::{anyhow, Result};
use log::info;
use nix::sys::termios::{self, LocalFlags, SetArg, Termios};

/// Copy of `orig` with input echo disabled
///
/// Canonical mode and signal keys stay as they are, so Ctrl+C still stops
/// the program.
fn without_echo(orig: &Termios) -> Termios {
    let mut quiet = orig.clone();
    quiet
        .local_flags
        .remove(LocalFlags::ECHO | LocalFlags::ECHONL);
    quiet
}

/// Disables echo on stdin; restores the original settings on drop
pub struct EchoGuard {
    fd: RawFd,
    orig_termios: Termios,
}

impl EchoGuard {
    pub fn new() -> Result<Self> {
        let fd = std::io::stdin().as_raw_fd();
        let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };

        let orig_termios =
            termios::tcgetattr(borrowed).map_err(|e| anyhow!("tcgetattr failed: {}", e))?;
        termios::tcsetattr(borrowed, SetArg::TCSANOW, &without_echo(&orig_termios))
            .map_err(|e| anyhow!("tcsetattr failed: {}", e))?;

        info!("Terminal echo disabled");
        Ok(Self { fd, orig_termios })
    }
}

impl Drop for EchoGuard {
    fn drop(&mut self) {
        // TCSAFLUSH drops the keystrokes queued while visualizing, so they
        // don't reach the shell afterwards
        let borrowed = unsafe { BorrowedFd::borrow_raw(self.fd) };
        let _ = termios::tcsetattr(borrowed, SetArg::TCSAFLUSH, &self.orig_termios);
        info!("Terminal echo restored");
    }
}
