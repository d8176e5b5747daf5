//! Configuration file management
//!
//! Loads TOML configuration files and provides application settings.
//! Default config path: ~/.config/inputviz/config.toml

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(target_os = "linux")]
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
#[cfg(target_os = "linux")]
use std::path::Path;
#[cfg(target_os = "linux")]
use std::sync::mpsc;

use crate::constants::{DOUBLE_CLICK_THRESHOLD_MS, WHEEL_CLEAR_MS};
use crate::utils::{parse_hex_color_or, Rgb};

/// Application settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timing settings
    pub timing: TimingConfig,
    /// Status line colors
    pub colors: ColorsConfig,
    /// Keyboard settings
    pub keyboard: KeyboardInputConfig,
    /// Display settings
    pub display: DisplayConfig,
}

/// Timing settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Wheel indicator lifetime after the last wheel event (ms)
    pub wheel_clear_ms: u64,
    /// Two presses of the same button within this window are a double-click (ms)
    pub double_click_ms: u64,
}

/// Status line colors (RRGGBB)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Held modifier or pressed button
    pub pressed: String,
    /// Button held after a double-click
    pub double_click: String,
    /// Middle button while the wheel indicator is lit
    pub wheel: String,
    /// Anything not active
    pub idle: String,
    /// Chip text
    pub text: String,
}

/// Keyboard input settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeyboardInputConfig {
    /// XKB keyboard model (empty = default)
    pub xkb_model: String,
    /// XKB keyboard layout (e.g., "us", "jp", empty = default)
    pub xkb_layout: String,
    /// XKB keyboard variant (empty = default)
    pub xkb_variant: String,
    /// XKB keyboard options (e.g., "ctrl:nocaps", empty = default)
    pub xkb_options: String,
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the Meta chip next to Ctrl/Shift/Alt
    pub show_meta: bool,
    /// Text shown before the last action
    pub last_action_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            colors: ColorsConfig::default(),
            keyboard: KeyboardInputConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            wheel_clear_ms: WHEEL_CLEAR_MS,
            double_click_ms: DOUBLE_CLICK_THRESHOLD_MS,
        }
    }
}

impl TimingConfig {
    pub fn wheel_clear(&self) -> Duration {
        Duration::from_millis(self.wheel_clear_ms)
    }

    pub fn double_click(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            pressed: "ff0000".to_string(),
            double_click: "008000".to_string(),
            wheel: "ffa500".to_string(),
            idle: "d3d3d3".to_string(),
            text: "000000".to_string(),
        }
    }
}

/// Parsed status line colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub pressed: Rgb,
    pub double_click: Rgb,
    pub wheel: Rgb,
    pub idle: Rgb,
    pub text: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            pressed: (0xff, 0x00, 0x00),
            double_click: (0x00, 0x80, 0x00),
            wheel: (0xff, 0xa5, 0x00),
            idle: (0xd3, 0xd3, 0xd3),
            text: (0x00, 0x00, 0x00),
        }
    }
}

impl ColorsConfig {
    /// Parse every color; invalid entries fall back to the built-in palette
    pub fn to_palette(&self) -> Palette {
        let fallback = Palette::default();
        Palette {
            pressed: parse_hex_color_or("pressed", &self.pressed, fallback.pressed),
            double_click: parse_hex_color_or(
                "double_click",
                &self.double_click,
                fallback.double_click,
            ),
            wheel: parse_hex_color_or("wheel", &self.wheel, fallback.wheel),
            idle: parse_hex_color_or("idle", &self.idle, fallback.idle),
            text: parse_hex_color_or("text", &self.text, fallback.text),
        }
    }
}

impl Default for KeyboardInputConfig {
    fn default() -> Self {
        Self {
            xkb_model: String::new(),
            xkb_layout: String::new(),
            xkb_variant: String::new(),
            xkb_options: String::new(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_meta: true,
            last_action_prefix: "Last action: ".to_string(),
        }
    }
}

impl Config {
    /// System-wide config path
    const SYSTEM_CONFIG_PATH: &'static str = "/etc/inputviz/config.toml";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. User config: ~/.config/inputviz/config.toml
        if let Some(config_path) = default_config_path() {
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 2. System config: /etc/inputviz/config.toml
        let system_config = std::path::Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration with priority:
    /// 1. ~/.config/inputviz/config.toml (user config)
    /// 2. /etc/inputviz/config.toml (system config)
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Write the default config template to the user config path
    pub fn write_default_config() -> Result<PathBuf> {
        let config_path =
            default_config_path().ok_or_else(|| anyhow::anyhow!("Config directory not found"))?;
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        std::fs::write(&config_path, Self::default_template())
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(config_path)
    }

    /// Commented TOML template holding the defaults
    pub fn default_template() -> String {
        let defaults = Self::default();
        format!(
            r#"# inputviz configuration

[timing]
# Wheel indicator lifetime after the last wheel event (ms)
wheel_clear_ms = {wheel_clear_ms}
# Second press of the same button within this window is a double-click (ms)
double_click_ms = {double_click_ms}

[colors]
# RRGGBB hex
pressed = "{pressed}"
double_click = "{double_click}"
wheel = "{wheel}"
idle = "{idle}"
text = "{text}"

[keyboard]
# Empty = system default
xkb_model = ""
xkb_layout = ""
xkb_variant = ""
xkb_options = ""

[display]
show_meta = {show_meta}
last_action_prefix = "{prefix}"
"#,
            wheel_clear_ms = defaults.timing.wheel_clear_ms,
            double_click_ms = defaults.timing.double_click_ms,
            pressed = defaults.colors.pressed,
            double_click = defaults.colors.double_click,
            wheel = defaults.colors.wheel,
            idle = defaults.colors.idle,
            text = defaults.colors.text,
            show_meta = defaults.display.show_meta,
            prefix = defaults.display.last_action_prefix,
        )
    }
}

/// Config file change watcher (Linux only)
#[cfg(target_os = "linux")]
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

#[cfg(target_os = "linux")]
impl ConfigWatcher {
    /// Start watching config file
    pub fn new(config_path: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                // Editors often save by writing to temp file then rename
                use notify::EventKind;
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        })?;

        // Watch the parent directory to catch rename operations
        let watch_path = config_path.parent().unwrap_or(config_path);
        watcher.watch(watch_path, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Check if config file was modified (non-blocking)
    pub fn check_reload(&self) -> bool {
        // Drain so one save triggers one reload
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("inputviz").join("config.toml"))
}
