//! Command-line argument parsing for the editor
//!
//! Supports:
//! - Opening several files, one view each
//! - Jump to line/column in the first file
//! - New empty buffer mode
//! - An alternate keymap file

use clap::Parser;
use std::path::PathBuf;

/// A small modal text editor with an executable tag line
#[derive(Parser, Debug)]
#[command(name = "jk", version, about = "A small modal text editor")]
pub struct CliArgs {
    /// Files to open
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Start with one empty scratch buffer, ignoring PATHS
    #[arg(short = 'n', long)]
    pub new: bool,

    /// Go to line N in the first file
    #[arg(long, value_name = "N")]
    pub line: Option<usize>,

    /// Go to column N (used with --line)
    #[arg(long, value_name = "N")]
    pub column: Option<usize>,

    /// Keymap file to layer over the defaults instead of ~/.config/jk/keymap.yaml
    #[arg(short = 'k', long, value_name = "FILE")]
    pub keymap: Option<PathBuf>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Files to open; empty means one scratch buffer
    pub files: Vec<PathBuf>,
    /// Initial cursor position (line, column) - 1-indexed from user, converted to 0-indexed
    pub initial_position: Option<(usize, usize)>,
    pub keymap: Option<PathBuf>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let files = if self.new { Vec::new() } else { self.paths };

        if let Some(dir) = files.iter().find(|p| p.is_dir()) {
            return Err(format!("{} is a directory", dir.display()));
        }

        // Convert from 1-indexed (user input) to 0-indexed (internal)
        let initial_position = self.line.map(|line| {
            let line_0 = line.saturating_sub(1);
            let col_0 = self.column.unwrap_or(1).saturating_sub(1);
            (line_0, col_0)
        });

        Ok(StartupConfig {
            files,
            initial_position,
            keymap: self.keymap,
        })
    }
}
