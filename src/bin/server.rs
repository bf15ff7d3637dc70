//! Contact server: loads settings from the environment, opens the store, serves HTTP.

use contact_desk::{
    app, open_repository, seed_sample_contacts, AppState, ContactService, Settings, StaticTokenAuthorizer,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contact_desk=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let repo = open_repository(&settings).await?;
    let contacts = ContactService::new(repo, settings.offset_mode);
    if settings.seed_sample_data {
        seed_sample_contacts(&contacts).await?;
    }

    let authorizer = StaticTokenAuthorizer::new(&settings.access_tokens);
    if authorizer.is_empty() {
        tracing::warn!("ACCESS_TOKENS is empty; every admin route will answer 401");
    }
    let state = AppState::new(contacts, Arc::new(authorizer));
    let router = app(state, &settings);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
