//! Default modes for the editor
//!
//! The shipped keymap is `keymap.yaml` at the crate root, embedded at compile
//! time. If it ever fails to parse, the hardcoded tables below take over.

use std::path::{Path, PathBuf};

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml, KeymapError, ModeDef};
use super::mode::{Mode, ModeRegistry};
use super::types::{KeyCode, Keystroke, Modifiers};
use crate::config_paths;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// Get the embedded default keymap YAML (for writing a starter user file)
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge modes: defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. `user_path`, or `~/.config/jk/keymap.yaml` when none is given
///
/// A user file that fails to parse, or that switches into a mode nobody
/// defines, is ignored with a warning.
pub fn load_modes(user_path: Option<&Path>) -> ModeRegistry {
    let base = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(defs) => {
            tracing::info!("Loaded embedded default keymap ({} modes)", defs.len());
            merge_modes(Vec::new(), defs)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_modes()
        }
    };

    let user_path: Option<PathBuf> = user_path
        .map(Path::to_path_buf)
        .or_else(config_paths::keymap_file);

    let modes = match user_path {
        Some(path) if path.exists() => match load_user_modes(&path, base.clone()) {
            Ok(merged) => merged,
            Err(e) => {
                tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
                base
            }
        },
        _ => base,
    };

    modes.into_iter().collect()
}

fn load_user_modes(path: &Path, base: Vec<Mode>) -> Result<Vec<Mode>, KeymapError> {
    let defs = load_keymap_file(path)?;
    tracing::info!(
        "Merging user keymap from {} ({} modes)",
        path.display(),
        defs.len()
    );
    let merged = merge_modes(base, defs);
    validate_modes(&merged)?;
    Ok(merged)
}

/// Layer mode definitions over `base`
///
/// A definition naming an existing mode is applied on top of it (same key
/// replaces, `Unbound` removes, hooks given are replaced); any other name
/// adds a new mode.
pub fn merge_modes(base: Vec<Mode>, overlay: Vec<ModeDef>) -> Vec<Mode> {
    let mut result = base;

    for def in overlay {
        match result.iter_mut().find(|m| m.name() == def.name) {
            Some(existing) => def.apply_to(existing),
            None => result.push(def.into_mode()),
        }
    }

    result
}

/// Every `SwitchMode` target must name a mode in `modes`
pub fn validate_modes(modes: &[Mode]) -> Result<(), KeymapError> {
    for mode in modes {
        for command in mode.commands() {
            if let Command::SwitchMode(target) = command {
                if !modes.iter().any(|m| m.name() == target) {
                    return Err(KeymapError::UnknownMode(target.clone()));
                }
            }
        }
    }
    Ok(())
}

/// Hardcoded normal and insert modes, mirroring `keymap.yaml`
pub fn default_modes() -> Vec<Mode> {
    let none = Modifiers::NONE;
    let ctrl = Modifiers::CTRL;

    let normal = Mode::new(Command::NORMAL_MODE).with_bindings([
        // ====================================================================
        // Cursor Movement
        // ====================================================================
        bind(KeyCode::Char('h'), none, Command::MoveLeft),
        bind(KeyCode::Char('j'), none, Command::MoveDown),
        bind(KeyCode::Char('k'), none, Command::MoveUp),
        bind(KeyCode::Char('l'), none, Command::MoveRight),
        bind(KeyCode::Left, none, Command::MoveLeft),
        bind(KeyCode::Down, none, Command::MoveDown),
        bind(KeyCode::Up, none, Command::MoveUp),
        bind(KeyCode::Right, none, Command::MoveRight),
        bind(KeyCode::Home, none, Command::LineStart),
        bind(KeyCode::End, none, Command::LineEnd),
        bind(KeyCode::PageUp, none, Command::PageUp),
        bind(KeyCode::PageDown, none, Command::PageDown),
        bind(KeyCode::Char('g'), none, Command::DocumentStart),
        bind(KeyCode::Char('G'), none, Command::DocumentEnd),
        // ====================================================================
        // Modes and Targets
        // ====================================================================
        bind(
            KeyCode::Char('i'),
            none,
            Command::SwitchMode(Command::INSERT_MODE.to_string()),
        ),
        bind(KeyCode::Char('a'), none, Command::Append),
        bind(KeyCode::Char('t'), none, Command::ToggleTarget),
        // ====================================================================
        // Files, Scripts and Views
        // ====================================================================
        bind(KeyCode::Char('s'), none, Command::Save),
        bind(KeyCode::Char('x'), none, Command::ExecuteUnderCursor),
        bind(KeyCode::Char('n'), ctrl, Command::NextView),
        bind(KeyCode::Char('p'), ctrl, Command::PrevView),
        bind(KeyCode::Char('q'), none, Command::Quit),
        bind(KeyCode::Escape, none, Command::Quit),
    ]);

    let insert = Mode::new(Command::INSERT_MODE)
        .with_self_insert(true)
        .with_on_exit(Command::MoveLeft)
        .with_bindings([
            bind(KeyCode::Enter, none, Command::InsertNewline),
            bind(KeyCode::Tab, none, Command::InsertByte(b'\t')),
            bind(KeyCode::Backspace, none, Command::DeleteBackward),
            bind(KeyCode::Delete, none, Command::DeleteForward),
            bind(KeyCode::Left, none, Command::MoveLeft),
            bind(KeyCode::Down, none, Command::MoveDown),
            bind(KeyCode::Up, none, Command::MoveUp),
            bind(KeyCode::Right, none, Command::MoveRight),
            bind(
                KeyCode::Escape,
                none,
                Command::SwitchMode(Command::NORMAL_MODE.to_string()),
            ),
        ]);

    vec![normal, insert]
}

/// Helper to create a keybinding
fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}
