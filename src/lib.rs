//! jk - a modal terminal text editor
//!
//! This crate provides the editing engine (byte text storage, cursor and
//! viewport mapping, modal command dispatch, and the tag line interpreter)
//! plus the crossterm shell the `jk` binary runs.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod interpreter;
pub mod keymap;
pub mod model;
pub mod process;
pub mod term;
pub mod tracing;

// Re-export commonly used types
pub use config::EditorConfig;
pub use error::{EditorError, Result};
pub use keymap::{Command, Keystroke, Mode, ModeRegistry};
pub use model::{Editor, TextStore, View};
pub use process::{ProcessRunner, SystemRunner};
