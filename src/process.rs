//! External command execution
//!
//! The interpreter falls back to running a program when a script name is not
//! in its command table. The editor only sees the [`ProcessRunner`] trait, so
//! tests can substitute a fake runner.

use std::process::{Command, Stdio};

use crate::error::{EditorError, Result};

/// Runs a program synchronously and returns its captured standard output
pub trait ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>>;
}

/// Runs programs with `std::process`, blocking until they exit.
///
/// There is no timeout: a program that never exits stalls the input loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>> {
        tracing::info!(program, ?args, "running external command");

        let failure = |reason: String| EditorError::ExternalCommandFailure {
            program: program.to_string(),
            reason,
        };

        if program.is_empty() {
            return Err(failure("empty program name".to_string()));
        }

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| failure(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let reason = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, stderr)
            };
            return Err(failure(reason));
        }

        tracing::debug!(program, bytes = output.stdout.len(), "external command finished");
        Ok(output.stdout)
    }
}
