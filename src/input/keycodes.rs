//! Key codes and the key label table
//!
//! Key codes are X keysyms as produced by xkbcommon, so labels follow the
//! active layout (Shift+= arrives as `plus`, not as `equal`).
//! Values are from <xkbcommon/xkbcommon-keysyms.h>.

use crate::constants::{ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT, ARROW_UP};

/// Opaque platform key identifier (an X keysym)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

// ============================================================================
// Latin-1 Keysyms
// ============================================================================

pub const KEY_SPACE: u32 = 0x0020;
pub const KEY_ASTERISK: u32 = 0x002a;
pub const KEY_PLUS: u32 = 0x002b;
pub const KEY_COMMA: u32 = 0x002c;
pub const KEY_MINUS: u32 = 0x002d;
pub const KEY_PERIOD: u32 = 0x002e;
pub const KEY_SLASH: u32 = 0x002f;
pub const KEY_0: u32 = 0x0030;
pub const KEY_9: u32 = 0x0039;
pub const KEY_UPPER_A: u32 = 0x0041;
pub const KEY_UPPER_Z: u32 = 0x005a;
pub const KEY_LOWER_A: u32 = 0x0061;
pub const KEY_LOWER_Z: u32 = 0x007a;

// ============================================================================
// Control and Navigation Keysyms
// ============================================================================

pub const KEY_BACKSPACE: u32 = 0xff08;
pub const KEY_TAB: u32 = 0xff09;
pub const KEY_RETURN: u32 = 0xff0d;
pub const KEY_ESCAPE: u32 = 0xff1b;
pub const KEY_HOME: u32 = 0xff50;
pub const KEY_LEFT: u32 = 0xff51;
pub const KEY_UP: u32 = 0xff52;
pub const KEY_RIGHT: u32 = 0xff53;
pub const KEY_DOWN: u32 = 0xff54;
pub const KEY_PAGE_UP: u32 = 0xff55;
pub const KEY_PAGE_DOWN: u32 = 0xff56;
pub const KEY_END: u32 = 0xff57;
pub const KEY_DELETE: u32 = 0xffff;

// ============================================================================
// Keypad Keysyms
// ============================================================================

pub const KEY_KP_ENTER: u32 = 0xff8d;
pub const KEY_KP_MULTIPLY: u32 = 0xffaa;
pub const KEY_KP_ADD: u32 = 0xffab;
pub const KEY_KP_SUBTRACT: u32 = 0xffad;
pub const KEY_KP_DECIMAL: u32 = 0xffae;
pub const KEY_KP_DIVIDE: u32 = 0xffaf;
pub const KEY_KP_0: u32 = 0xffb0;
pub const KEY_KP_9: u32 = 0xffb9;

// ============================================================================
// Function Keysyms
// ============================================================================

/// F1 key
pub const KEY_F1: u32 = 0xffbe;

/// F12 key
pub const KEY_F12: u32 = 0xffc9;

// ============================================================================
// Modifier Keysyms
// ============================================================================

pub const KEY_SHIFT_L: u32 = 0xffe1;
pub const KEY_CONTROL_L: u32 = 0xffe3;
pub const KEY_ALT_L: u32 = 0xffe9;
pub const KEY_SUPER_L: u32 = 0xffeb;

// ============================================================================
// Label Table
// ============================================================================

const LETTERS: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

const FUNCTION_KEYS: [&str; 12] = [
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
];

/// Convert function key code to function key number (1-12)
/// Returns None if not a function key
#[inline]
pub const fn function_key_number(keysym: u32) -> Option<u8> {
    if keysym >= KEY_F1 && keysym <= KEY_F12 {
        Some((keysym - KEY_F1 + 1) as u8)
    } else {
        None
    }
}

/// Display label for a key, or None if the key is not shown
pub fn key_label(code: KeyCode) -> Option<&'static str> {
    let sym = code.0;
    let label = match sym {
        KEY_SPACE => "Space",
        KEY_KP_ENTER => "Enter",
        KEY_RETURN => "Return",
        KEY_ESCAPE => "Esc",
        KEY_TAB => "Tab",
        KEY_DELETE => "Del",
        KEY_MINUS | KEY_KP_SUBTRACT => "-",
        KEY_PLUS | KEY_KP_ADD => "+",
        KEY_BACKSPACE => "Backspace",
        KEY_HOME => "Home",
        KEY_END => "End",
        KEY_PAGE_UP => "Page Up",
        KEY_PAGE_DOWN => "Page Down",
        KEY_SLASH | KEY_KP_DIVIDE => "/",
        KEY_ASTERISK | KEY_KP_MULTIPLY => "*",
        KEY_COMMA => ",",
        KEY_PERIOD | KEY_KP_DECIMAL => ".",
        KEY_LEFT => ARROW_LEFT,
        KEY_RIGHT => ARROW_RIGHT,
        KEY_UP => ARROW_UP,
        KEY_DOWN => ARROW_DOWN,
        KEY_UPPER_A..=KEY_UPPER_Z => LETTERS[(sym - KEY_UPPER_A) as usize],
        KEY_LOWER_A..=KEY_LOWER_Z => LETTERS[(sym - KEY_LOWER_A) as usize],
        KEY_0..=KEY_9 => DIGITS[(sym - KEY_0) as usize],
        KEY_KP_0..=KEY_KP_9 => DIGITS[(sym - KEY_KP_0) as usize],
        _ => {
            let n = function_key_number(sym)?;
            FUNCTION_KEYS[(n - 1) as usize]
        }
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        let cases = [
            (KEY_SPACE, "Space"),
            (KEY_KP_ENTER, "Enter"),
            (KEY_RETURN, "Return"),
            (KEY_ESCAPE, "Esc"),
            (KEY_TAB, "Tab"),
            (KEY_DELETE, "Del"),
            (KEY_MINUS, "-"),
            (KEY_PLUS, "+"),
            (KEY_BACKSPACE, "Backspace"),
            (KEY_HOME, "Home"),
            (KEY_END, "End"),
            (KEY_PAGE_UP, "Page Up"),
            (KEY_PAGE_DOWN, "Page Down"),
            (KEY_SLASH, "/"),
            (KEY_ASTERISK, "*"),
            (KEY_COMMA, ","),
            (KEY_PERIOD, "."),
        ];
        for (sym, label) in cases {
            assert_eq!(key_label(KeyCode(sym)), Some(label), "keysym {:#x}", sym);
        }
    }

    #[test]
    fn test_arrows() {
        assert_eq!(key_label(KeyCode(KEY_LEFT)), Some("\u{2190}"));
        assert_eq!(key_label(KeyCode(KEY_RIGHT)), Some("\u{2192}"));
        assert_eq!(key_label(KeyCode(KEY_UP)), Some("\u{2191}"));
        assert_eq!(key_label(KeyCode(KEY_DOWN)), Some("\u{2193}"));
    }

    #[test]
    fn test_function_keys() {
        for n in 1..=12u32 {
            let label = key_label(KeyCode(KEY_F1 + n - 1));
            assert_eq!(label, Some(format!("F{}", n).as_str()));
        }
        assert_eq!(function_key_number(KEY_F12 + 1), None);
    }

    #[test]
    fn test_alphanumeric() {
        for (i, letter) in ('A'..='Z').enumerate() {
            let expected = letter.to_string();
            let upper = key_label(KeyCode(KEY_UPPER_A + i as u32));
            let lower = key_label(KeyCode(KEY_LOWER_A + i as u32));
            assert_eq!(upper, Some(expected.as_str()), "upper {}", letter);
            assert_eq!(lower, Some(expected.as_str()), "lower {}", letter);
        }
        for d in 0..=9u32 {
            let expected = d.to_string();
            assert_eq!(key_label(KeyCode(KEY_0 + d)), Some(expected.as_str()));
            assert_eq!(key_label(KeyCode(KEY_KP_0 + d)), Some(expected.as_str()));
        }
        assert_eq!(KEY_UPPER_A + 25, KEY_UPPER_Z);
        assert_eq!(KEY_KP_0 + 9, KEY_KP_9);
    }

    #[test]
    fn test_keypad_keys() {
        let cases = [
            (KEY_KP_ADD, "+"),
            (KEY_KP_SUBTRACT, "-"),
            (KEY_KP_MULTIPLY, "*"),
            (KEY_KP_DIVIDE, "/"),
            (KEY_KP_DECIMAL, "."),
            (KEY_KP_ENTER, "Enter"),
        ];
        for (sym, label) in cases {
            assert_eq!(key_label(KeyCode(sym)), Some(label), "keysym {:#x}", sym);
        }
    }

    #[test]
    fn test_unknown_keys() {
        // Modifiers, Insert, '=' and '!' are not in the table
        for sym in [KEY_SHIFT_L, KEY_CONTROL_L, KEY_ALT_L, KEY_SUPER_L, 0xff63, 0x3d, 0x21] {
            assert_eq!(key_label(KeyCode(sym)), None, "keysym {:#x}", sym);
        }
    }
}
