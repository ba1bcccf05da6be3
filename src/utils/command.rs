//! Command execution primitives with consistent error handling.

use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Run a command in a specific directory and return its raw output.
///
/// Only spawn failures (binary missing, permission denied) are errors here;
/// a non-zero exit is returned to the caller for domain-specific mapping.
pub fn output_in(dir: &str, program: &str, args: &[&str], context: &str) -> Result<Output> {
    Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| {
            Error::internal_io(
                format!("Failed to run {}: {}", context, e),
                Some(context.to_string()),
            )
        })
}

/// Run a command in a specific directory.
///
/// Returns trimmed stdout if the command succeeds.
/// Returns an error with stderr (or stdout fallback) if it fails.
pub fn run_in(dir: &str, program: &str, args: &[&str], context: &str) -> Result<String> {
    let output = output_in(dir, program, args, context)?;

    if !output.status.success() {
        return Err(Error::internal_io(
            format!("{} failed: {}", context, error_text(&output)),
            Some(context.to_string()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a command in a directory, returning None on failure instead of error.
///
/// Useful when command failure is expected/acceptable (e.g., probing a repo).
pub fn run_in_optional(dir: &str, program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        None
    } else {
        Some(stdout)
    }
}

/// Extract error text from command output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_in_succeeds_with_valid_command() {
        let result = run_in("/tmp", "echo", &["hello"], "echo test");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "hello");
    }

    #[test]
    fn run_in_fails_with_invalid_command() {
        let result = run_in("/tmp", "nonexistent_command_xyz", &[], "test");
        assert!(result.is_err());
    }

    #[test]
    fn run_in_optional_returns_none_on_failure() {
        let result = run_in_optional("/tmp", "false", &[]);
        assert!(result.is_none());
    }

    #[test]
    fn output_in_reports_non_zero_exit_without_error() {
        let output = output_in("/tmp", "false", &[], "false test").unwrap();
        assert!(!output.status.success());
    }

    #[test]
    fn error_text_prefers_stderr() {
        let output = output_in("/tmp", "sh", &["-c", "echo out; echo err >&2"], "mixed").unwrap();
        assert_eq!(error_text(&output), "err");
    }

    #[test]
    fn error_text_falls_back_to_stdout() {
        let output = output_in("/tmp", "sh", &["-c", "echo only-out"], "stdout only").unwrap();
        assert_eq!(error_text(&output), "only-out");
    }
}
