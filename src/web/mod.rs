mod handlers;
mod router;
mod state;
mod templates;

pub use router::create_web_router;
pub use state::WebState;
