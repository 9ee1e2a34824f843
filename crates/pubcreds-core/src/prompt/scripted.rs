//! Scripted prompt with canned answers

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::traits::{Prompt, PromptError, PromptResult};

/// Which input channel a prompt was asked on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChannel {
    Echoed,
    Hidden,
}

/// A prompt that replays queued answers and records what was asked
///
/// When the queue runs dry the prompt reports `PromptError::Closed`, the same
/// way a terminal does at end of input.
///
/// # Example
///
/// ```
/// use pubcreds_core::prompt::{Prompt, PromptChannel, ScriptedPrompt};
///
/// let prompt = ScriptedPrompt::with_answers(["alice"]);
/// assert_eq!(prompt.prompt("Enter your username: ").unwrap(), "alice");
/// assert_eq!(
///     prompt.asked(),
///     vec![("Enter your username: ".to_string(), PromptChannel::Echoed)],
/// );
/// assert!(prompt.prompt("again? ").is_err());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<(String, PromptChannel)>>,
}

impl ScriptedPrompt {
    /// A prompt with no answers; every call fails with `Closed`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Queue another answer
    pub fn push_answer(&self, answer: impl Into<String>) {
        self.answers.lock().push_back(answer.into());
    }

    /// Every message shown so far, in order, with its channel
    pub fn asked(&self) -> Vec<(String, PromptChannel)> {
        self.asked.lock().clone()
    }

    /// Number of prompts shown so far
    pub fn times_asked(&self) -> usize {
        self.asked.lock().len()
    }

    fn answer(&self, message: &str, channel: PromptChannel) -> PromptResult<String> {
        self.asked.lock().push((message.to_string(), channel));
        self.answers.lock().pop_front().ok_or(PromptError::Closed)
    }
}

impl Prompt for ScriptedPrompt {
    fn prompt(&self, message: &str) -> PromptResult<String> {
        self.answer(message, PromptChannel::Echoed)
    }

    fn prompt_hidden(&self, message: &str) -> PromptResult<String> {
        self.answer(message, PromptChannel::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_in_order() {
        let prompt = ScriptedPrompt::with_answers(["first", "second"]);

        assert_eq!(prompt.prompt("a").unwrap(), "first");
        assert_eq!(prompt.prompt_hidden("b").unwrap(), "second");
        assert!(matches!(prompt.prompt("c"), Err(PromptError::Closed)));

        assert_eq!(
            prompt.asked(),
            vec![
                ("a".to_string(), PromptChannel::Echoed),
                ("b".to_string(), PromptChannel::Hidden),
                ("c".to_string(), PromptChannel::Echoed),
            ]
        );
    }

    #[test]
    fn test_push_answer() {
        let prompt = ScriptedPrompt::new();
        assert!(prompt.prompt("x").is_err());

        prompt.push_answer("late");
        assert_eq!(prompt.prompt("x").unwrap(), "late");
        assert_eq!(prompt.times_asked(), 2);
    }
}
