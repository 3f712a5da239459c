use std::sync::Arc;

use skhema::bot::{BotContext, run_polling};
use skhema::infrastructure::observability::{TracingConfig, init_tracing};
use skhema::infrastructure::relay::RelayHttpClient;
use skhema::infrastructure::telegram::TelegramClient;
use skhema::presentation::config::BotSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(TracingConfig::default(), "bot");

    let settings = BotSettings::from_env()?;
    let client = Arc::new(TelegramClient::new(settings.token.clone()));
    let relay = Arc::new(RelayHttpClient::new(&settings.relay_url));

    let ctx = BotContext {
        messenger: Arc::clone(&client),
        relay,
        version: settings.version.clone(),
    };

    tracing::info!(relay_url = %settings.relay_url, version = %settings.version, "Bot starting");

    run_polling(client, ctx).await
}
