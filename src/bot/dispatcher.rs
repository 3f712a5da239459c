use std::sync::Arc;
use std::time::Duration;

use super::context::BotContext;
use super::handlers;
use crate::application::ports::{Messenger, RelayApi};
use crate::infrastructure::telegram::{TelegramClient, Update};

const POLL_TIMEOUT_SECS: u64 = 30;
const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Long-polls for updates and spawns one task per update. Pending updates
/// queued while the bot was down are dropped before the first poll.
pub async fn run_polling<R>(client: Arc<TelegramClient>, ctx: BotContext<TelegramClient, R>) -> !
where
    R: RelayApi + 'static,
{
    let mut offset = drain_pending(&client).await;
    tracing::info!("Bot polling started");

    loop {
        match client.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);
                    let ctx = ctx.clone();
                    tokio::spawn(async move {
                        dispatch_update(&ctx, update).await;
                    });
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Polling failed");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
            }
        }
    }
}

/// A zero-timeout `getUpdates` returns the backlog immediately; confirming
/// past the last id discards it.
async fn drain_pending(client: &TelegramClient) -> Option<i64> {
    match client.get_updates(None, 0).await {
        Ok(updates) => {
            let next = updates.last().map(|u| u.update_id + 1);
            if !updates.is_empty() {
                tracing::info!(skipped = updates.len(), "Dropped pending updates");
            }
            next
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to drain pending updates");
            None
        }
    }
}

/// Routes one update to its handler. Handler failures are logged; the
/// polling loop never sees them.
pub async fn dispatch_update<M, R>(ctx: &BotContext<M, R>, update: Update)
where
    M: Messenger,
    R: RelayApi,
{
    let update_id = update.update_id;

    let outcome = if let Some(callback) = update.callback_query {
        handlers::handle_callback(ctx, callback).await
    } else if let Some(message) = update.message {
        handlers::handle_message(ctx, message).await
    } else {
        Ok(())
    };

    if let Err(e) = outcome {
        tracing::error!(update_id, error = %e, "Update handling failed");
    }
}
