//! Interactive prompt abstractions
//!
//! - `Prompt` trait: the port credential managers ask through
//! - `TerminalPrompt`: real terminal input
//! - `ScriptedPrompt`: canned answers

mod traits;
mod terminal;
mod scripted;

pub use traits::{Prompt, PromptError, PromptResult};
pub use terminal::TerminalPrompt;
pub use scripted::{PromptChannel, ScriptedPrompt};
