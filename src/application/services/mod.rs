mod review_prompt;
mod review_service;

pub use review_prompt::review_system_prompt;
pub use review_service::{ReviewError, ReviewService};
