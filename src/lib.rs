//! inputviz - live keyboard and mouse input visualizer
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │              Event Loop                  │
//! ├──────────────────────────────────────────┤
//! │  Input (libinput)  →  Classifier         │
//! │                          ↓               │
//! │       State Tracker (+ wheel timer)      │
//! │                          ↓               │
//! │              Renderer (status line)      │
//! └──────────────────────────────────────────┘
//! ```

pub mod config;
pub mod constants;
pub mod input;
pub mod render;
pub mod session;
pub mod utils;
pub mod visualizer;

pub use config::Config;
pub use input::{classify, RawEvent};
pub use visualizer::{Render, RenderState, Visualizer};
