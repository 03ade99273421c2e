//! Tag line scripting
//!
//! A script is one parenthesized expression such as `(save)` or `(ls -l)`.
//! [`parse_expression`] turns it into tokens; the first token is looked up
//! in a [`CommandTable`], and on a miss the editor runs the tokens as an
//! external program (see [`crate::model::Editor::interpret`]).

use std::collections::HashMap;

use crate::error::{EditorError, Result};
use crate::keymap::Command;

/// Split a script into tokens.
///
/// Outer whitespace is trimmed and every inner run of Unicode whitespace
/// becomes one ASCII space. Empty input, and `()`, yield `Ok(None)`.
/// Anything not wrapped in exactly one pair of parentheses is
/// [`EditorError::MalformedExpression`].
pub fn parse_expression(input: &str) -> Result<Option<Vec<String>>> {
    let normalized = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Ok(None);
    }

    let inner = normalized
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| EditorError::MalformedExpression(normalized.clone()))?;

    let tokens: Vec<String> = inner
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    Ok((!tokens.is_empty()).then_some(tokens))
}

/// Script names the editor handles itself
#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: HashMap<String, Command>,
}

impl CommandTable {
    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, command: Command) {
        self.commands.insert(name.into(), command);
    }

    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Like [`CommandTable::lookup`], but a miss is [`EditorError::UnknownCommand`]
    pub fn resolve(&self, name: &str) -> Result<&Command> {
        self.lookup(name)
            .ok_or_else(|| EditorError::UnknownCommand(name.to_string()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register("save", Command::Save);
        table.register("quit", Command::Quit);
        table.register(
            "insert",
            Command::SwitchMode(Command::INSERT_MODE.to_string()),
        );
        table.register(
            "normal",
            Command::SwitchMode(Command::NORMAL_MODE.to_string()),
        );
        table.register("tag", Command::ToggleTarget);
        table.register("next", Command::NextView);
        table.register("prev", Command::PrevView);
        table.register("top", Command::DocumentStart);
        table.register("bottom", Command::DocumentEnd);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Option<Vec<String>> {
        parse_expression(input).unwrap()
    }

    #[test]
    fn test_parse_trims_and_strips_parens() {
        assert_eq!(tokens("  (save)  "), Some(vec!["save".to_string()]));
        assert_eq!(
            tokens("(ls -l)"),
            Some(vec!["ls".to_string(), "-l".to_string()])
        );
    }

    #[test]
    fn test_parse_collapses_unicode_whitespace() {
        assert_eq!(
            tokens("(echo\t\u{00a0} a\u{2003}b)"),
            Some(vec!["echo".to_string(), "a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_parse_empty_is_noop() {
        assert_eq!(tokens(""), None);
        assert_eq!(tokens(" \n\t "), None);
        assert_eq!(tokens("()"), None);
        assert_eq!(tokens("(  )"), None);
    }

    #[test]
    fn test_parse_rejects_missing_parens() {
        for input in ["save", "(save", "save)", ")save("] {
            assert!(
                matches!(
                    parse_expression(input),
                    Err(EditorError::MalformedExpression(_))
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn test_default_table() {
        let table = CommandTable::default();
        assert_eq!(table.lookup("save"), Some(&Command::Save));
        assert_eq!(table.lookup("top"), Some(&Command::DocumentStart));
        assert!(matches!(
            table.resolve("ls"),
            Err(EditorError::UnknownCommand(name)) if name == "ls"
        ));
        assert_eq!(table.names().len(), 9);
    }
}
