use katsaus::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting katsaus");

    // Load configuration
    let config = startup::load_config().await?;

    // Fetch and print the overview
    startup::run_overview(config).await
}
