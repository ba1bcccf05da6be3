//! Terminal I/O utilities for CLI.
//!
//! Provides TTY detection and user prompting.

use std::io::{self, BufRead, IsTerminal, Write};

use shipmate::release::Prompt;

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

/// Print status message to stderr if running in a terminal.
pub fn status(message: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{}", message);
    }
}

fn read_answer(question: &str, default: &str) -> io::Result<String> {
    eprint!("{} [{}]: ", question, default);
    io::stderr().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Interactive prompt. Empty input, a non-TTY stdin, or a read failure all
/// yield the default.
pub struct TtyPrompt;

impl Prompt for TtyPrompt {
    fn ask(&self, question: &str, default: &str) -> String {
        if !is_stdin_tty() {
            return default.to_string();
        }

        match read_answer(question, default) {
            Ok(answer) if !answer.is_empty() => answer,
            _ => default.to_string(),
        }
    }
}

// log_status! macro is defined in lib.rs (#[macro_export]) and available crate-wide.
