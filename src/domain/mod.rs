mod prompt;
mod schematic_image;

pub use prompt::{MAX_PROMPT_CHARS, Prompt, PromptError};
pub use schematic_image::SchematicImage;
