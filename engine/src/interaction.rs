//! Prompt/response boundary between the game and whoever is answering
//!
//! The engine only ever talks through [`Interaction`]. Validation loops
//! (re-asking until an answer is recognized) live here rather than in the
//! implementations, so every front end gets identical behavior.

use std::collections::VecDeque;

use crate::error::{EngineError, Result};

/// Re-prompt used whenever a yes/no answer is not recognized
pub const YES_NO_REPROMPT: &str = "Please answer 'yes' or 'no': ";

/// Line-based conversation with the player.
pub trait Interaction {
    /// Show `prompt` and read one line of response.
    ///
    /// Returns [`EngineError::InputClosed`] when no more input will arrive.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Show an informational message
    fn say(&mut self, message: &str) -> Result<()>;
}

/// Normalize a yes/no answer. `None` when it is neither.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Ask `question` until the answer is "yes" or "no".
pub fn ask_yes_no<I: Interaction + ?Sized>(io: &mut I, question: &str) -> Result<bool> {
    let mut answer = io.ask(&format!("{question} (yes/no) "))?;
    loop {
        if let Some(value) = parse_yes_no(&answer) {
            return Ok(value);
        }
        answer = io.ask(YES_NO_REPROMPT)?;
    }
}

/// Ask until a non-blank line arrives; returns it trimmed.
pub fn ask_text<I: Interaction + ?Sized>(io: &mut I, prompt: &str) -> Result<String> {
    loop {
        let answer = io.ask(prompt)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
    }
}

/// Ask until the answer is a number in `min..=max`.
pub fn ask_number<I: Interaction + ?Sized>(
    io: &mut I,
    prompt: &str,
    min: usize,
    max: usize,
) -> Result<usize> {
    let mut answer = io.ask(prompt)?;
    loop {
        if let Ok(n) = answer.trim().parse::<usize>() {
            if (min..=max).contains(&n) {
                return Ok(n);
            }
        }
        answer = io.ask(&format!("Please enter {}: ", spoken_choices(min, max)))?;
    }
}

/// "1", "1 or 2", "1, 2 or 3", ...
fn spoken_choices(min: usize, max: usize) -> String {
    let mut choices: Vec<String> = (min..=max).map(|n| n.to_string()).collect();
    match choices.pop() {
        Some(last) if !choices.is_empty() => format!("{} or {last}", choices.join(", ")),
        Some(last) => last,
        None => String::new(),
    }
}

/// Replays a fixed list of answers and records everything shown.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    messages: Vec<String>,
}

impl ScriptedInteraction {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInteraction {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Prompts asked so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Messages shown so far, in order
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Interaction for ScriptedInteraction {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or(EngineError::InputClosed)
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.messages.push(message.to_string());
        Ok(())
    }
}
