//! Global constants for inputviz
//!
//! Consolidates timing defaults and display glyphs
//! to eliminate magic numbers throughout the codebase.

// ============================================================================
// Timing Constants
// ============================================================================

/// How long the wheel indicator stays lit after the last wheel event
pub const WHEEL_CLEAR_MS: u64 = 200;

/// Double-click detection threshold in milliseconds
pub const DOUBLE_CLICK_THRESHOLD_MS: u64 = 300;

/// Upper bound on a single poll wait, so signals and config reloads
/// are noticed even when no input arrives
pub const IDLE_POLL_MS: i32 = 250;

// ============================================================================
// libinput
// ============================================================================

/// evdev keycode -> xkb keycode offset
pub const XKB_KEYCODE_OFFSET: u32 = 8;

/// Left mouse button (BTN_LEFT from linux/input-event-codes.h)
pub const BTN_LEFT: u32 = 0x110;

/// Right mouse button
pub const BTN_RIGHT: u32 = 0x111;

/// Middle mouse button
pub const BTN_MIDDLE: u32 = 0x112;

// ============================================================================
// Display Glyphs
// ============================================================================

pub const ARROW_LEFT: &str = "\u{2190}";
pub const ARROW_UP: &str = "\u{2191}";
pub const ARROW_RIGHT: &str = "\u{2192}";
pub const ARROW_DOWN: &str = "\u{2193}";
