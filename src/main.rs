use std::fs;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use videodb::{
    api::{create_router, AppState},
    config::Config,
    services,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "videodb=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    if config.is_batch() {
        return run_batch(&config);
    }

    // Initialize application state
    let state = AppState::with_max_runs(config.max_runs);

    // Create the router with all routes
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!("Server running on http://{}", address);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Processes one dataset file and writes the results as a JSON array
fn run_batch(config: &Config) -> anyhow::Result<()> {
    let Some(input) = config.input_path.as_ref() else {
        return Ok(());
    };

    let dataset = services::read_dataset(input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    let results = services::run_dataset(dataset)?;
    let rendered = serde_json::to_string_pretty(&results)?;

    match config.output_path.as_ref() {
        Some(output) => {
            fs::write(output, rendered)
                .with_context(|| format!("failed to write {}", output.display()))?;
            tracing::info!(path = %output.display(), results = results.len(), "Results written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
