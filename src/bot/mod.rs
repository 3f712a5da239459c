mod context;
mod dispatcher;
mod handlers;

pub use context::BotContext;
pub use dispatcher::{dispatch_update, run_polling};
pub use handlers::{handle_callback, handle_message};
