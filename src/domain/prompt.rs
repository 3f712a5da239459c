use std::fmt;

/// Upper bound on prompt length, counted in characters.
pub const MAX_PROMPT_CHARS: usize = 1000;

/// A validated user prompt. Construction is the only way to obtain one, so
/// anything downstream of the services can rely on the bounds holding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt must not be empty")]
    Empty,
    #[error("prompt is longer than {MAX_PROMPT_CHARS} characters: got {len}")]
    TooLong { len: usize },
}

impl Prompt {
    pub fn new(text: impl Into<String>) -> Result<Self, PromptError> {
        let text = text.into();
        let len = text.chars().count();
        if len == 0 {
            return Err(PromptError::Empty);
        }
        if len > MAX_PROMPT_CHARS {
            return Err(PromptError::TooLong { len });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
