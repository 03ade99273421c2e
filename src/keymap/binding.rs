//! Keybinding struct representing a mapping from a keystroke to a command

use super::command::Command;
use super::types::Keystroke;

/// A single keybinding inside a mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Command,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self { keystroke, command }
    }

    /// Get display string for this keybinding
    pub fn display_string(&self) -> String {
        format!("{} → {}", self.keystroke, self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{KeyCode, Modifiers};

    #[test]
    fn test_display_string() {
        let stroke = Keystroke::new(KeyCode::Char('s'), Modifiers::CTRL);
        let binding = Keybinding::new(stroke, Command::Save);
        assert_eq!(binding.display_string(), "Ctrl+s → Save");
    }
}
