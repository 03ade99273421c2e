//! Command enum representing every operation a key or script can trigger
//!
//! Commands are the bridge between modes and the editor: a mode maps a
//! keystroke to a `Command`, the interpreter maps a script name to one, and
//! [`crate::model::Editor::execute`] carries it out against the current view.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// All executable editor operations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Cursor Movement
    // ========================================================================
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Move to column 0
    LineStart,
    /// Move past the last character of the line
    LineEnd,
    /// Move up by one screen of text rows
    PageUp,
    /// Move down by one screen of text rows
    PageDown,
    DocumentStart,
    DocumentEnd,

    // ========================================================================
    // Text Editing
    // ========================================================================
    /// Insert one byte at the cursor and step past it
    InsertByte(u8),
    /// Insert a line feed and move to the start of the next line
    InsertNewline,
    /// Delete the byte behind the cursor
    DeleteBackward,
    /// Delete the byte under the cursor
    DeleteForward,

    // ========================================================================
    // Modes and Targets
    // ========================================================================
    /// Make the named mode active, running exit/enter hooks
    SwitchMode(String),
    /// Step right, then enter insert mode
    Append,
    /// Flip the edit target between the buffer and the tag line
    ToggleTarget,

    // ========================================================================
    // Files, Scripts and Views
    // ========================================================================
    Save,
    /// Run the token under the cursor through the interpreter
    ExecuteUnderCursor,
    NextView,
    PrevView,
    Quit,

    /// Does nothing; binding a key to it removes the key (`Noop` in YAML)
    Unbound,
}

impl Command {
    /// Mode name that insert-style commands switch to
    pub const INSERT_MODE: &'static str = "insert";
    /// Mode name the editor starts in by default
    pub const NORMAL_MODE: &'static str = "normal";

    /// Whether a count greater than one runs this command that many times.
    ///
    /// Mode switches, saves and quitting happen once however often they are
    /// requested.
    pub fn is_repeatable(&self) -> bool {
        !matches!(
            self,
            Command::SwitchMode(_)
                | Command::Append
                | Command::Save
                | Command::ExecuteUnderCursor
                | Command::Quit
                | Command::Unbound
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::InsertByte(b) => write!(f, "InsertByte {}", b),
            Command::SwitchMode(name) => write!(f, "SwitchMode {}", name),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Error for a command name that does not parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command: {0}")]
pub struct ParseCommandError(pub String);

/// Parse a command name with an optional argument: `MoveLeft`,
/// `SwitchMode insert`, `InsertByte 9`
impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        let err = || ParseCommandError(s.to_string());

        if parts.next().is_some() {
            return Err(err());
        }

        let command = match (name, arg) {
            ("MoveLeft", None) => Command::MoveLeft,
            ("MoveRight", None) => Command::MoveRight,
            ("MoveUp", None) => Command::MoveUp,
            ("MoveDown", None) => Command::MoveDown,
            ("LineStart", None) => Command::LineStart,
            ("LineEnd", None) => Command::LineEnd,
            ("PageUp", None) => Command::PageUp,
            ("PageDown", None) => Command::PageDown,
            ("DocumentStart", None) => Command::DocumentStart,
            ("DocumentEnd", None) => Command::DocumentEnd,

            ("InsertByte", Some(byte)) => Command::InsertByte(byte.parse().map_err(|_| err())?),
            ("InsertTab", None) => Command::InsertByte(b'\t'),
            ("InsertNewline", None) => Command::InsertNewline,
            ("DeleteBackward", None) => Command::DeleteBackward,
            ("DeleteForward", None) => Command::DeleteForward,

            ("SwitchMode", Some(mode)) => Command::SwitchMode(mode.to_string()),
            ("EnterInsert", None) => Command::SwitchMode(Command::INSERT_MODE.to_string()),
            ("EnterNormal", None) => Command::SwitchMode(Command::NORMAL_MODE.to_string()),
            ("Append", None) => Command::Append,
            ("ToggleTarget", None) => Command::ToggleTarget,

            ("Save", None) => Command::Save,
            ("ExecuteUnderCursor", None) => Command::ExecuteUnderCursor,
            ("NextView", None) => Command::NextView,
            ("PrevView", None) => Command::PrevView,
            ("Quit", None) => Command::Quit,
            ("Unbound", None) | ("Noop", None) => Command::Unbound,

            _ => return Err(err()),
        };
        Ok(command)
    }
}
