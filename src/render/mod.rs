//! Status line renderer
//!
//! Draws a RenderState as one line of colored chips on a terminal:
//!
//! ```text
//! [Ctrl][Shift][Alt][Meta]  [L][↑][R]  A   Last action: Ctrl + A
//! ```
//!
//! Write failures are logged and dropped; they never reach the core.

pub mod tty;

use std::io::Write;

use log::warn;

use crate::config::{Config, Palette};
use crate::constants::{ARROW_DOWN, ARROW_UP};
use crate::utils::color::{sgr_background, sgr_foreground};
use crate::utils::Rgb;
use crate::visualizer::{ButtonState, Render, RenderState, WheelDirection};

pub use tty::EchoGuard;

/// SGR reset
const SGR_RESET: &str = "\x1b[0m";

/// Erase to end of line
const ERASE_LINE: &str = "\x1b[K";

/// Single-line ANSI renderer
pub struct StatusLine<W: Write> {
    out: W,
    palette: Palette,
    show_meta: bool,
    last_action_prefix: String,
    /// Set after the first write error so the log isn't flooded
    write_failed: bool,
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W, config: &Config) -> Self {
        Self {
            out,
            palette: config.colors.to_palette(),
            show_meta: config.display.show_meta,
            last_action_prefix: config.display.last_action_prefix.clone(),
            write_failed: false,
        }
    }

    /// Pick up reloaded colors and display settings
    pub fn apply_config(&mut self, config: &Config) {
        self.palette = config.colors.to_palette();
        self.show_meta = config.display.show_meta;
        self.last_action_prefix = config.display.last_action_prefix.clone();
    }

    /// Build the line for a snapshot (no trailing newline)
    pub fn format(&self, state: &RenderState) -> String {
        let p = &self.palette;
        let mut line = String::from("\r");

        let held = |on: bool| if on { p.pressed } else { p.idle };
        let m = &state.modifiers;
        line.push_str(&self.chip("Ctrl", held(m.ctrl)));
        line.push_str(&self.chip("Shift", held(m.shift)));
        line.push_str(&self.chip("Alt", held(m.alt)));
        if self.show_meta {
            line.push_str(&self.chip("Meta", held(m.meta)));
        }

        line.push_str("  ");
        let buttons = &state.mouse_buttons;
        line.push_str(&self.chip("L", self.button_color(buttons.left)));
        let (middle_text, middle_color) = match state.wheel {
            WheelDirection::Up => (ARROW_UP, p.wheel),
            WheelDirection::Down => (ARROW_DOWN, p.wheel),
            WheelDirection::None => ("M", self.button_color(buttons.middle)),
        };
        line.push_str(&self.chip(middle_text, middle_color));
        line.push_str(&self.chip("R", self.button_color(buttons.right)));

        line.push_str("  ");
        line.push_str(state.current_key.as_deref().unwrap_or(""));
        line.push_str("   ");
        line.push_str(&self.last_action_prefix);
        line.push_str(&state.last_action);
        line.push_str(ERASE_LINE);
        line
    }

    fn button_color(&self, state: ButtonState) -> Rgb {
        match state {
            ButtonState::Released => self.palette.idle,
            ButtonState::Pressed => self.palette.pressed,
            ButtonState::DoubleClicked => self.palette.double_click,
        }
    }

    fn chip(&self, text: &str, background: Rgb) -> String {
        format!(
            "{}{} {} {}",
            sgr_background(background),
            sgr_foreground(self.palette.text),
            text,
            SGR_RESET
        )
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for StatusLine<W> {
    fn render(&mut self, state: &RenderState) {
        let line = self.format(state);
        let result = self
            .out
            .write_all(line.as_bytes())
            .and_then(|_| self.out.flush());
        match result {
            Ok(()) => self.write_failed = false,
            Err(e) if !self.write_failed => {
                warn!("Status line write failed: {}", e);
                self.write_failed = true;
            }
            Err(_) => {}
        }
    }
}
