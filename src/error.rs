//! Error kinds shared by the text store, mode table, and interpreter
//!
//! None of these are fatal: the editor reports them on the status line and
//! leaves the buffer untouched.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    /// A line index past the end of the buffer
    #[error("line {line} does not exist (buffer has {line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },

    /// An insert or delete span that falls outside the content
    #[error("invalid range: {len} bytes at offset {offset} in a {buffer_len}-byte buffer")]
    InvalidRange {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    #[error("malformed expression: {0:?}")]
    MalformedExpression(String),

    /// Interpreter table miss; triggers the external-command fallback
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("external command `{program}` failed: {reason}")]
    ExternalCommandFailure { program: String, reason: String },

    #[error("mode \"{0}\" does not exist")]
    ModeNotFound(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Save requested without a path on a buffer that never had one
    #[error("no file name")]
    NoPath,
}

impl EditorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EditorError::Io {
            path: path.into(),
            source,
        }
    }
}
