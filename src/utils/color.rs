//! Color parsing utilities
//!
//! Hex color parsing for the config palette and ANSI true-color output.

use log::warn;

/// 8-bit RGB triple
pub type Rgb = (u8, u8, u8);

/// Parse 6-digit hex color (e.g., "ff0000" -> (255, 0, 0))
/// Also supports 3-digit short format (e.g., "f00" -> (255, 0, 0))
/// Returns None on invalid input.
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            // Short format: expand F -> FF
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse a configured color, falling back with a warning
pub fn parse_hex_color_or(name: &str, hex: &str, fallback: Rgb) -> Rgb {
    parse_hex_color(hex).unwrap_or_else(|| {
        warn!("Invalid color for {}: {:?}, using default", name, hex);
        fallback
    })
}

/// SGR sequence selecting a true-color background
pub fn sgr_background((r, g, b): Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", r, g, b)
}

/// SGR sequence selecting a true-color foreground
pub fn sgr_foreground((r, g, b): Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}
