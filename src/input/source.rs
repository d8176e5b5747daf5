//! libinput input source
//!
//! Use libinput + xkbcommon to read every keyboard/mouse event on the seat
//! from /dev/input/eventN and translate it into `RawEvent`s.
//! This is the process-wide subscription; nothing is grabbed, so other
//! clients keep receiving the same events.

use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, OwnedFd, RawFd};
use std::path::Path;
use std::time::{Duration, Instant};

use input::event::keyboard::{KeyState, KeyboardEventTrait};
use input::event::pointer::{Axis, ButtonState, PointerScrollEvent};
use input::event::{Event, PointerEvent};
use input::{Libinput, LibinputInterface};
use log::{debug, info, warn};
use thiserror::Error;
use xkbcommon::xkb;

#[cfg(all(target_os = "linux", feature = "seatd"))]
use std::cell::RefCell;
#[cfg(all(target_os = "linux", feature = "seatd"))]
use std::rc::Rc;
#[cfg(all(target_os = "linux", feature = "seatd"))]
use crate::session::SeatSession;

use super::click::ClickTracker;
use super::event::{KeyAction, Modifiers, MouseAction, MouseButtons, RawEvent};
use super::keycodes::KeyCode;
use crate::config::KeyboardInputConfig;
use crate::constants::{BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, XKB_KEYCODE_OFFSET};

/// Input source failures
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Cannot scan /dev/input: {0}")]
    Scan(#[from] std::io::Error),

    #[error("No input devices found. Check permissions for /dev/input/event*.")]
    NoDevices,

    #[error("Failed to create xkb keymap (model={model}, layout={layout}, variant={variant}, options={options})")]
    Keymap {
        model: String,
        layout: String,
        variant: String,
        options: String,
    },

    #[error("fcntl failed: {0}")]
    Fcntl(#[from] nix::errno::Errno),

    #[error("libinput dispatch failed: {0}")]
    Dispatch(std::io::Error),

    #[error("libinput resume failed")]
    Resume,
}

/// LibinputInterface implementation for libinput
struct InputInterface;

impl LibinputInterface for InputInterface {
    fn open_restricted(&mut self, path: &Path, flags: i32) -> std::result::Result<OwnedFd, i32> {
        let f = OpenOptions::new()
            .read(true)
            .write((flags & libc::O_WRONLY != 0) || (flags & libc::O_RDWR != 0))
            .custom_flags(flags & !libc::O_WRONLY & !libc::O_RDWR & !libc::O_RDONLY)
            .open(path)
            .map_err(|e| {
                warn!("Cannot open device: {:?}: {}", path, e);
                e.raw_os_error().unwrap_or(-libc::ENOENT)
            })?;
        Ok(OwnedFd::from(f))
    }

    fn close_restricted(&mut self, fd: OwnedFd) {
        drop(fd);
    }
}

/// LibinputInterface implementation using libseat for device access
#[cfg(all(target_os = "linux", feature = "seatd"))]
struct SeatInputInterface {
    session: Rc<RefCell<SeatSession>>,
}

#[cfg(all(target_os = "linux", feature = "seatd"))]
impl LibinputInterface for SeatInputInterface {
    fn open_restricted(&mut self, path: &Path, _flags: i32) -> std::result::Result<OwnedFd, i32> {
        self.session.borrow_mut().open_device(path).map_err(|e| {
            warn!("libseat: Cannot open device {:?}: {:#}", path, e);
            -libc::EACCES
        })
    }

    fn close_restricted(&mut self, fd: OwnedFd) {
        // Device is closed when OwnedFd is dropped
        drop(fd);
    }
}

/// Seat-wide keyboard + pointer event source
pub struct InputSource {
    /// libinput context
    input: Libinput,
    /// xkbcommon keyboard state
    xkb_state: xkb::State,
    /// libinput fd (for poll)
    fd: RawFd,
    /// Held buttons and double-click detection
    clicks: ClickTracker,
}

impl InputSource {
    /// Open every input device directly (needs read access to /dev/input)
    pub fn new(kb_config: &KeyboardInputConfig, double_click: Duration) -> Result<Self, SourceError> {
        let mut input = Libinput::new_from_path(InputInterface);
        let count = add_event_devices(&mut input)?;
        info!("libinput: {} input devices added", count);
        Self::from_libinput(input, kb_config, double_click)
    }

    /// Open every input device through a libseat session (no root required)
    #[cfg(all(target_os = "linux", feature = "seatd"))]
    pub fn new_with_seat(
        session: Rc<RefCell<SeatSession>>,
        kb_config: &KeyboardInputConfig,
        double_click: Duration,
    ) -> Result<Self, SourceError> {
        let mut input = Libinput::new_from_path(SeatInputInterface { session });
        let count = add_event_devices(&mut input)?;
        info!("libinput: {} input devices added via libseat", count);
        Self::from_libinput(input, kb_config, double_click)
    }

    fn from_libinput(
        input: Libinput,
        kb_config: &KeyboardInputConfig,
        double_click: Duration,
    ) -> Result<Self, SourceError> {
        let fd = input.as_raw_fd();

        // Set fd to non-blocking
        let flags = nix::fcntl::fcntl(fd, nix::fcntl::FcntlArg::F_GETFL)?;
        let mut flags = nix::fcntl::OFlag::from_bits_truncate(flags);
        flags.insert(nix::fcntl::OFlag::O_NONBLOCK);
        nix::fcntl::fcntl(fd, nix::fcntl::FcntlArg::F_SETFL(flags))?;

        let xkb_state = xkb::State::new(&build_keymap(kb_config)?);

        info!(
            "Input source ready (layout={}, double_click={}ms)",
            if kb_config.xkb_layout.is_empty() { "default" } else { kb_config.xkb_layout.as_str() },
            double_click.as_millis()
        );

        Ok(Self {
            input,
            xkb_state,
            fd,
            clicks: ClickTracker::new(double_click),
        })
    }

    /// Return libinput fd (for poll)
    pub fn fd(&self) -> RawFd {
        self.fd
    }

    pub fn set_double_click(&mut self, double_click: Duration) {
        self.clicks.set_threshold(double_click);
    }

    /// Drain pending libinput events
    pub fn read_events(&mut self, now: Instant) -> Result<Vec<RawEvent>, SourceError> {
        self.input.dispatch().map_err(SourceError::Dispatch)?;

        let mut events = Vec::new();
        while let Some(event) = self.input.next() {
            events.push(self.translate(event, now));
        }
        Ok(events)
    }

    /// Stop reading devices (session disabled)
    pub fn suspend(&mut self) {
        self.input.suspend();
        self.clicks.reset();
        info!("Input source suspended");
    }

    /// Reopen devices (session enabled)
    pub fn resume(&mut self) -> Result<(), SourceError> {
        self.input.resume().map_err(|_| SourceError::Resume)?;
        info!("Input source resumed");
        Ok(())
    }

    fn translate(&mut self, event: Event, now: Instant) -> RawEvent {
        match event {
            Event::Keyboard(kb_event) => {
                if let input::event::KeyboardEvent::Key(key_event) = kb_event {
                    let evdev_code = key_event.key();
                    let xkb_keycode = xkb::Keycode::new(evdev_code + XKB_KEYCODE_OFFSET);
                    let key_state = key_event.key_state();

                    // Keysym before the state update so Shift itself maps to Shift_L
                    let sym = self.xkb_state.key_get_one_sym(xkb_keycode);

                    let (action, direction) = match key_state {
                        KeyState::Pressed => (KeyAction::Press, xkb::KeyDirection::Down),
                        KeyState::Released => (KeyAction::Release, xkb::KeyDirection::Up),
                    };
                    self.xkb_state.update_key(xkb_keycode, direction);

                    // libinput filters kernel repeats, so nothing here is autorepeat
                    RawEvent::Key {
                        action,
                        code: KeyCode(sym.raw()),
                        modifiers: modifier_snapshot(&self.xkb_state),
                        autorepeat: false,
                    }
                } else {
                    RawEvent::Other { kind: "keyboard" }
                }
            }
            Event::Pointer(ptr_event) => self.translate_pointer(ptr_event, now),
            Event::Device(_) => RawEvent::Other { kind: "device" },
            _ => RawEvent::Other { kind: "other" },
        }
    }

    fn translate_pointer(&mut self, event: PointerEvent, now: Instant) -> RawEvent {
        match event {
            PointerEvent::Button(b) => {
                let button = match b.button() {
                    BTN_LEFT => MouseButtons::LEFT,
                    BTN_RIGHT => MouseButtons::RIGHT,
                    BTN_MIDDLE => MouseButtons::MIDDLE,
                    other => {
                        debug!("Untracked mouse button: {:#x}", other);
                        return RawEvent::Other { kind: "pointer-button" };
                    }
                };
                match b.button_state() {
                    ButtonState::Pressed => {
                        let (action, buttons) = self.clicks.press(button, now);
                        RawEvent::Mouse { action, buttons }
                    }
                    ButtonState::Released => RawEvent::Mouse {
                        action: MouseAction::Release,
                        buttons: self.clicks.release(button),
                    },
                }
            }
            PointerEvent::ScrollWheel(s) => {
                let v120 = s.has_axis(Axis::Vertical).then(|| s.scroll_value_v120(Axis::Vertical));
                wheel_event(v120)
            }
            PointerEvent::ScrollContinuous(s) => {
                wheel_event(s.has_axis(Axis::Vertical).then(|| s.scroll_value(Axis::Vertical)))
            }
            PointerEvent::ScrollFinger(s) => {
                // Touchpad two-finger scroll
                finger_scroll_event(s.has_axis(Axis::Vertical).then(|| s.scroll_value(Axis::Vertical)))
            }
            PointerEvent::Motion(_) | PointerEvent::MotionAbsolute(_) => {
                RawEvent::Other { kind: "pointer-motion" }
            }
            _ => RawEvent::Other { kind: "pointer" },
        }
    }
}

impl Drop for InputSource {
    fn drop(&mut self) {
        info!("Input source closed");
    }
}

/// Wheel event from a libinput vertical scroll value
///
/// libinput: positive = down; ours: positive = up. No vertical axis
/// (horizontal-only scroll) reads as zero.
fn wheel_event(vertical: Option<f64>) -> RawEvent {
    RawEvent::Wheel {
        delta_y: vertical.map_or(0.0, |v| -v),
    }
}

/// Wheel event from a touchpad scroll
///
/// libinput ends every finger scroll with a zero-valued vertical event;
/// that one is a stop marker, not motion.
fn finger_scroll_event(vertical: Option<f64>) -> RawEvent {
    match vertical {
        Some(v) if v == 0.0 => RawEvent::Other { kind: "scroll-stop" },
        _ => wheel_event(vertical),
    }
}

/// Add every /dev/input/event* device to a path-based libinput context
fn add_event_devices(input: &mut Libinput) -> Result<usize, SourceError> {
    let mut device_count = 0;
    for entry in std::fs::read_dir("/dev/input")? {
        let path = entry?.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with("event") {
            let path_str = path.to_str().unwrap_or("");
            if input.path_add_device(path_str).is_some() {
                debug!("Input device added: {}", path_str);
                device_count += 1;
            }
        }
    }

    if device_count == 0 {
        return Err(SourceError::NoDevices);
    }
    Ok(device_count)
}

/// Compile an xkb keymap from config (empty fields = system default)
fn build_keymap(kb_config: &KeyboardInputConfig) -> Result<xkb::Keymap, SourceError> {
    let context = xkb::Context::new(xkb::CONTEXT_NO_FLAGS);
    let options = if kb_config.xkb_options.is_empty() {
        None
    } else {
        Some(kb_config.xkb_options.clone())
    };

    xkb::Keymap::new_from_names(
        &context,
        "", // Always use default rules
        kb_config.xkb_model.as_str(),
        kb_config.xkb_layout.as_str(),
        kb_config.xkb_variant.as_str(),
        options,
        xkb::COMPILE_NO_FLAGS,
    )
    .ok_or_else(|| SourceError::Keymap {
        model: kb_config.xkb_model.clone(),
        layout: kb_config.xkb_layout.clone(),
        variant: kb_config.xkb_variant.clone(),
        options: kb_config.xkb_options.clone(),
    })
}

/// Effective modifier mask after the latest key update
fn modifier_snapshot(state: &xkb::State) -> Modifiers {
    let mut mods = Modifiers::empty();
    for (name, flag) in [
        (xkb::MOD_NAME_CTRL, Modifiers::CTRL),
        (xkb::MOD_NAME_SHIFT, Modifiers::SHIFT),
        (xkb::MOD_NAME_ALT, Modifiers::ALT),
        (xkb::MOD_NAME_LOGO, Modifiers::META),
    ] {
        if state.mod_name_is_active(name, xkb::STATE_MODS_EFFECTIVE) {
            mods |= flag;
        }
    }
    mods
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_event_direction() {
        assert_eq!(wheel_event(Some(-120.0)), RawEvent::Wheel { delta_y: 120.0 });
        assert_eq!(wheel_event(Some(15.0)), RawEvent::Wheel { delta_y: -15.0 });
        assert_eq!(wheel_event(None), RawEvent::Wheel { delta_y: 0.0 });
    }

    #[test]
    fn test_finger_scroll_is_wheel() {
        assert_eq!(finger_scroll_event(Some(-4.5)), RawEvent::Wheel { delta_y: 4.5 });
        assert_eq!(finger_scroll_event(Some(2.0)), RawEvent::Wheel { delta_y: -2.0 });
        assert_eq!(
            finger_scroll_event(Some(0.0)),
            RawEvent::Other { kind: "scroll-stop" }
        );
        assert_eq!(finger_scroll_event(None), RawEvent::Wheel { delta_y: 0.0 });
    }
}
