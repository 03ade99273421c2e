//! Modes and the mode registry
//!
//! A mode is a named table from keystrokes to commands plus optional
//! enter/exit hooks. The registry is built once at startup and shared by
//! every view of an editor through an `Rc`; nothing writes to it afterwards.

use std::collections::HashMap;
use std::rc::Rc;

use super::binding::Keybinding;
use super::command::Command;
use super::types::Keystroke;
use crate::error::{EditorError, Result};

/// A named set of key-to-command bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    name: String,
    bindings: HashMap<Keystroke, Command>,
    on_enter: Option<Command>,
    on_exit: Option<Command>,
    /// Unbound printable bytes (0x20-0x7E) insert themselves
    self_insert: bool,
}

impl Mode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: HashMap::new(),
            on_enter: None,
            on_exit: None,
            self_insert: false,
        }
    }

    /// Add a binding (builder pattern)
    pub fn with_binding(mut self, keystroke: Keystroke, command: Command) -> Self {
        self.bind(keystroke, command);
        self
    }

    pub fn with_bindings(mut self, bindings: impl IntoIterator<Item = Keybinding>) -> Self {
        for binding in bindings {
            self.bind(binding.keystroke, binding.command);
        }
        self
    }

    pub fn with_on_enter(mut self, command: Command) -> Self {
        self.on_enter = Some(command);
        self
    }

    pub fn with_on_exit(mut self, command: Command) -> Self {
        self.on_exit = Some(command);
        self
    }

    pub fn with_self_insert(mut self, self_insert: bool) -> Self {
        self.self_insert = self_insert;
        self
    }

    /// Bind `keystroke`, replacing any previous binding.
    ///
    /// Binding to [`Command::Unbound`] removes the key instead.
    pub fn bind(&mut self, keystroke: Keystroke, command: Command) {
        if command == Command::Unbound {
            self.bindings.remove(&keystroke);
        } else {
            self.bindings.insert(keystroke, command);
        }
    }

    pub fn set_on_enter(&mut self, command: Option<Command>) {
        self.on_enter = command;
    }

    pub fn set_on_exit(&mut self, command: Option<Command>) {
        self.on_exit = command;
    }

    pub fn set_self_insert(&mut self, self_insert: bool) {
        self.self_insert = self_insert;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn on_enter(&self) -> Option<&Command> {
        self.on_enter.as_ref()
    }

    pub fn on_exit(&self) -> Option<&Command> {
        self.on_exit.as_ref()
    }

    pub fn is_self_insert(&self) -> bool {
        self.self_insert
    }

    /// Command bound to `keystroke`, falling back to self-insert
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        if let Some(command) = self.bindings.get(keystroke) {
            return Some(command.clone());
        }
        if self.self_insert {
            return keystroke.self_insert_byte().map(Command::InsertByte);
        }
        None
    }

    /// Keystroke bound to `command` (first match, for help text)
    pub fn binding_for(&self, command: &Command) -> Option<Keystroke> {
        self.bindings
            .iter()
            .find(|(_, bound)| *bound == command)
            .map(|(keystroke, _)| *keystroke)
    }

    /// Every command this mode can issue, hooks included
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.bindings
            .values()
            .chain(self.on_enter.iter())
            .chain(self.on_exit.iter())
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

/// All registered modes by name
#[derive(Debug, Clone, Default)]
pub struct ModeRegistry {
    modes: HashMap<String, Rc<Mode>>,
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `mode` under its own name, replacing any earlier one
    pub fn register(&mut self, mode: Mode) {
        tracing::info!(
            mode = mode.name(),
            bindings = mode.binding_count(),
            "registered mode"
        );
        self.modes.insert(mode.name().to_string(), Rc::new(mode));
    }

    pub fn get(&self, name: &str) -> Result<Rc<Mode>> {
        self.modes
            .get(name)
            .cloned()
            .ok_or_else(|| EditorError::ModeNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modes.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl FromIterator<Mode> for ModeRegistry {
    fn from_iter<I: IntoIterator<Item = Mode>>(iter: I) -> Self {
        let mut registry = Self::new();
        for mode in iter {
            registry.register(mode);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{KeyCode, Modifiers};

    #[test]
    fn test_lookup_bound_key() {
        let mode = Mode::new("normal").with_binding(Keystroke::char('h'), Command::MoveLeft);
        assert_eq!(mode.lookup(&Keystroke::char('h')), Some(Command::MoveLeft));
        assert_eq!(mode.lookup(&Keystroke::char('z')), None);
    }

    #[test]
    fn test_self_insert_only_for_unbound_printables() {
        let mode = Mode::new("insert")
            .with_self_insert(true)
            .with_binding(Keystroke::key(KeyCode::Escape), Command::Quit);

        assert_eq!(
            mode.lookup(&Keystroke::char('x')),
            Some(Command::InsertByte(b'x'))
        );
        assert_eq!(
            mode.lookup(&Keystroke::key(KeyCode::Escape)),
            Some(Command::Quit)
        );
        let ctrl_x = Keystroke::new(KeyCode::Char('x'), Modifiers::CTRL);
        assert_eq!(mode.lookup(&ctrl_x), None);
        assert_eq!(mode.lookup(&Keystroke::key(KeyCode::F(5))), None);
    }

    #[test]
    fn test_unbound_removes_binding() {
        let mut mode = Mode::new("normal").with_binding(Keystroke::char('q'), Command::Quit);
        mode.bind(Keystroke::char('q'), Command::Unbound);
        assert_eq!(mode.lookup(&Keystroke::char('q')), None);
    }

    #[test]
    fn test_registry_missing_mode() {
        let registry: ModeRegistry = [Mode::new("normal")].into_iter().collect();
        assert!(registry.get("normal").is_ok());
        assert!(matches!(
            registry.get("visual"),
            Err(EditorError::ModeNotFound(name)) if name == "visual"
        ));
        assert_eq!(registry.names(), vec!["normal"]);
    }
}
