//! Modal keyboard mapping
//!
//! This module provides the data-driven mode system that:
//! - Maps keystrokes to editor commands, one table per mode
//! - Runs enter/exit hooks when the active mode changes
//! - Lets insert-style modes self-insert printable bytes
//! - Enables user customization via YAML config files
//!
//! # Architecture
//!
//! ```text
//! crossterm::KeyEvent → Keystroke → Mode::lookup() → Command → Editor::execute()
//! ```
//!
//! # Loading Modes
//!
//! ```ignore
//! // Embedded defaults plus ~/.config/jk/keymap.yaml
//! let modes = load_modes(None);
//!
//! // Or build one by hand
//! let normal = Mode::new("normal").with_binding(Keystroke::char('q'), Command::Quit);
//! ```

mod binding;
mod command;
mod config;
mod defaults;
mod mode;
mod types;

pub use binding::Keybinding;
pub use command::{Command, ParseCommandError};
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError, ModeDef};
pub use defaults::{
    default_modes, get_default_keymap_yaml, load_modes, merge_modes, validate_modes,
};
pub use mode::{Mode, ModeRegistry};
pub use types::{KeyCode, Keystroke, Modifiers};
