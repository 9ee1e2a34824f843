//! Terminal prompt implementation

use std::io::{self, BufRead, Write};

use super::traits::{Prompt, PromptError, PromptResult};

/// A prompt that talks to the controlling terminal
///
/// Messages go to stderr so they never mix with data a host writes to
/// stdout. Hidden input is read with `rpassword`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

/// Strip the line terminator left by `read_line`
fn trim_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

impl Prompt for TerminalPrompt {
    fn prompt(&self, message: &str) -> PromptResult<String> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(message.as_bytes())?;
        stderr.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(trim_line_ending(line))
    }

    fn prompt_hidden(&self, message: &str) -> PromptResult<String> {
        Ok(rpassword::prompt_password(message)?)
    }
}
