use std::sync::Arc;

use crate::application::ports::{Messenger, RelayApi};

/// Shared dependencies for the bot handlers. Cloned into every spawned
/// update task.
pub struct BotContext<M, R>
where
    M: Messenger,
    R: RelayApi,
{
    pub messenger: Arc<M>,
    pub relay: Arc<R>,
    pub version: String,
}

impl<M, R> Clone for BotContext<M, R>
where
    M: Messenger,
    R: RelayApi,
{
    fn clone(&self) -> Self {
        Self {
            messenger: Arc::clone(&self.messenger),
            relay: Arc::clone(&self.relay),
            version: self.version.clone(),
        }
    }
}
