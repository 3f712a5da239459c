mod ask;
mod health;
mod transcribe;

pub use ask::{BAD_UPSTREAM_FORMAT_DETAIL, TIMEOUT_DETAIL, ask_handler};
pub use health::health_handler;
pub use transcribe::transcribe_handler;
