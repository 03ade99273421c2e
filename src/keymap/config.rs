//! YAML configuration parsing for keymaps
//!
//! A keymap file lists modes by name. Each mode carries its bindings and,
//! optionally, enter/exit hooks and the self-insert flag:
//!
//! ```yaml
//! modes:
//!   insert:
//!     self_insert: true
//!     on_exit: MoveLeft
//!     bindings:
//!       - key: esc
//!         command: SwitchMode normal
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::binding::Keybinding;
use super::command::Command;
use super::mode::Mode;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub modes: BTreeMap<String, ModeConfig>,
}

/// One mode entry from YAML
#[derive(Debug, Default, Deserialize)]
pub struct ModeConfig {
    #[serde(default)]
    pub on_enter: Option<String>,
    #[serde(default)]
    pub on_exit: Option<String>,
    #[serde(default)]
    pub self_insert: Option<bool>,
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
}

/// A parsed mode definition.
///
/// Fields left `None` are not mentioned in the file, so layering a
/// definition over an existing mode keeps whatever it already had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeDef {
    pub name: String,
    pub bindings: Vec<Keybinding>,
    /// `Some(Command::Unbound)` clears the hook
    pub on_enter: Option<Command>,
    pub on_exit: Option<Command>,
    pub self_insert: Option<bool>,
}

impl ModeDef {
    /// Build a fresh mode from this definition
    pub fn into_mode(self) -> Mode {
        let mut mode = Mode::new(self.name.clone());
        self.apply_to(&mut mode);
        mode
    }

    /// Layer this definition over `mode`
    pub fn apply_to(self, mode: &mut Mode) {
        if let Some(hook) = self.on_enter {
            mode.set_on_enter((hook != Command::Unbound).then_some(hook));
        }
        if let Some(hook) = self.on_exit {
            mode.set_on_exit((hook != Command::Unbound).then_some(hook));
        }
        if let Some(self_insert) = self.self_insert {
            mode.set_self_insert(self_insert);
        }
        for binding in self.bindings {
            tracing::debug!(mode = mode.name(), "{}", binding.display_string());
            mode.bind(binding.keystroke, binding.command);
        }
    }
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, Error)]
pub enum KeymapError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Unknown mode: {0}")]
    UnknownMode(String),
}

/// Load mode definitions from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<ModeDef>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse mode definitions from a YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<ModeDef>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    config
        .modes
        .into_iter()
        .map(|(name, mode)| parse_mode(name, mode))
        .collect()
}

fn parse_mode(name: String, config: ModeConfig) -> Result<ModeDef, KeymapError> {
    let bindings = config
        .bindings
        .iter()
        .map(|entry| {
            Ok(Keybinding::new(
                parse_key_string(&entry.key)?,
                parse_command(&entry.command)?,
            ))
        })
        .collect::<Result<Vec<_>, KeymapError>>()?;

    Ok(ModeDef {
        name,
        bindings,
        on_enter: config.on_enter.as_deref().map(parse_command).transpose()?,
        on_exit: config.on_exit.as_deref().map(parse_command).transpose()?,
        self_insert: config.self_insert,
    })
}

/// Parse a key string like "ctrl+n", "esc" or "G" into a Keystroke.
///
/// Single characters keep their case. `shift+<letter>` folds into the
/// uppercase letter, since that is what the terminal delivers.
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    if key_str == "+" {
        return Ok(Keystroke::char('+'));
    }

    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "meta" | "option" => mods = mods | Modifiers::ALT,
            _ => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(part)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(match key {
        KeyCode::Char(c) if mods.shift() && c.is_ascii_alphabetic() => {
            Keystroke::new(KeyCode::Char(c.to_ascii_uppercase()), mods.without_shift())
        }
        KeyCode::Char(_) => Keystroke::new(key, mods.without_shift()),
        _ => Keystroke::new(key, mods),
    })
}

/// Parse a key code from string
fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(if c == ' ' {
            KeyCode::Space
        } else {
            KeyCode::Char(c)
        });
    }

    let lower = key.to_lowercase();
    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdown" | "pgdn" => Ok(KeyCode::PageDown),
        "insert" | "ins" => Ok(KeyCode::Insert),

        f if f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => Ok(KeyCode::F(n)),
            _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
        },

        _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

/// Parse a command name string into a Command
fn parse_command(cmd: &str) -> Result<Command, KeymapError> {
    cmd.parse()
        .map_err(|_| KeymapError::InvalidCommand(cmd.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key_keeps_case() {
        assert_eq!(parse_key_string("g").unwrap(), Keystroke::char('g'));
        assert_eq!(parse_key_string("G").unwrap(), Keystroke::char('G'));
    }

    #[test]
    fn test_parse_shift_letter_folds_to_uppercase() {
        assert_eq!(parse_key_string("shift+g").unwrap(), Keystroke::char('G'));
    }

    #[test]
    fn test_parse_key_with_modifier() {
        let stroke = parse_key_string("ctrl+n").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('n'));
        assert!(stroke.mods.ctrl());
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_key_string("esc").unwrap().key, KeyCode::Escape);
        assert_eq!(parse_key_string("PgDn").unwrap().key, KeyCode::PageDown);
        assert_eq!(parse_key_string("f12").unwrap().key, KeyCode::F(12));
        assert!(parse_key_string("f13").is_err());
        assert!(parse_key_string("hyper").is_err());
        assert!(parse_key_string("ctrl+a+b").is_err());
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(parse_key_string("+").unwrap(), Keystroke::char('+'));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
modes:
  normal:
    bindings:
      - key: h
        command: MoveLeft
      - key: i
        command: SwitchMode insert
  insert:
    self_insert: true
    on_exit: MoveLeft
    bindings:
      - key: esc
        command: SwitchMode normal
"#;

        let defs = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(defs.len(), 2);

        let insert = defs.iter().find(|d| d.name == "insert").unwrap();
        assert_eq!(insert.self_insert, Some(true));
        assert_eq!(insert.on_exit, Some(Command::MoveLeft));

        let normal = defs.iter().find(|d| d.name == "normal").unwrap().clone();
        let mode = normal.into_mode();
        assert_eq!(
            mode.lookup(&Keystroke::char('i')),
            Some(Command::SwitchMode("insert".into()))
        );
    }

    #[test]
    fn test_parse_yaml_rejects_unknown_command() {
        let yaml = r#"
modes:
  normal:
    bindings:
      - key: h
        command: Teleport
"#;
        assert!(matches!(
            parse_keymap_yaml(yaml),
            Err(KeymapError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_overlay_clears_hook_and_unbinds() {
        let mut mode = Mode::new("insert")
            .with_on_exit(Command::MoveLeft)
            .with_binding(Keystroke::char('q'), Command::Quit);
        let overlay = ModeDef {
            name: "insert".into(),
            bindings: vec![Keybinding::new(Keystroke::char('q'), Command::Unbound)],
            on_enter: None,
            on_exit: Some(Command::Unbound),
            self_insert: None,
        };
        overlay.apply_to(&mut mode);
        assert_eq!(mode.on_exit(), None);
        assert_eq!(mode.lookup(&Keystroke::char('q')), None);
    }
}
