//! Prompt port definition

use thiserror::Error;

/// Errors that can occur while asking the operator for input
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Input stream closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PromptResult<T> = Result<T, PromptError>;

/// Interactive input from a human operator
///
/// Implementations:
/// - `TerminalPrompt`: stderr + stdin, hidden input via `rpassword`
/// - `ScriptedPrompt`: canned answers for tests and non-terminal hosts
///
/// Calls block until the operator answers.
pub trait Prompt: Send + Sync {
    /// Show `message` and read a line with echo
    fn prompt(&self, message: &str) -> PromptResult<String>;

    /// Show `message` and read a line without echo
    ///
    /// Hosts with no way to hide input fall back to `prompt`.
    fn prompt_hidden(&self, message: &str) -> PromptResult<String> {
        self.prompt(message)
    }
}
