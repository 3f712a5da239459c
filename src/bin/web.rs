use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use skhema::infrastructure::observability::{TracingConfig, init_tracing};
use skhema::infrastructure::relay::RelayHttpClient;
use skhema::presentation::config::WebSettings;
use skhema::web::{WebState, create_web_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(TracingConfig::default(), "web");

    let settings = WebSettings::from_env();
    let relay = Arc::new(RelayHttpClient::new(&settings.relay_url));
    let state = WebState::new(relay);
    let router = create_web_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(relay_url = %settings.relay_url, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
