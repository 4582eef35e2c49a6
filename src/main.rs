use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url_summarizer::{
    config::{GroqConfig, ServerConfig},
    api::routes::{create_router, create_setup_error_router},
    fetcher::HttpFetcher,
    llm::GroqClient,
    AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let server_addr = ServerConfig::load()?.server_addr;

    // Without a credential only the configuration error is served.
    let app = match GroqConfig::load() {
        Ok(groq) => {
            info!(api_base = %groq.api_base, "completion API configured");
            let app_state = AppState {
                fetcher: Arc::new(HttpFetcher::new()?),
                summarizer: Arc::new(GroqClient::new(groq)),
            };
            create_router(app_state)
        }
        Err(err) => {
            error!(error = %err, "missing configuration, serving setup error page only");
            create_setup_error_router(url_summarizer::config::MISSING_API_KEY_MESSAGE)
        }
    };

    let listener = TcpListener::bind(server_addr).await?;
    info!("Listening on http://{}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
