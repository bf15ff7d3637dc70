//! Contact tools over stdin/stdout, one JSON request per line.

use contact_desk::tools::stdio;
use contact_desk::{open_repository, ContactService, ContactTools, Settings};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    // stdout carries replies, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("contact_desk=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let repo = open_repository(&settings).await?;
    let tools = ContactTools::new(ContactService::new(repo, settings.offset_mode));
    tracing::info!(tools = ContactTools::descriptors().len(), "serving contact tools on stdio");
    stdio::serve(&tools, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
    Ok(())
}
