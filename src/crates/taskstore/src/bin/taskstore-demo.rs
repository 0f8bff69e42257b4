//! Task store demo binary
//!
//! Reads an optional `.env` file, opens the store named by `DATABASE_URL`,
//! runs the demo sequence and prints the results. Any failure ends the
//! process with a non-zero status.

use anyhow::Context;
use std::sync::Arc;
use taskstore::config::load_dotenv;
use taskstore::db::redact_url;
use taskstore::{run_demo, DatabaseConnection, DemoConfig, TaskRepository};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_path = load_dotenv();
    let config = DemoConfig::from_env();

    // Logs go to stderr so stdout carries only the listing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    if config.uses_fallback_database() {
        tracing::warn!(
            url = %redact_url(&config.database.url),
            "DATABASE_URL is not set, using the built-in demo database"
        );
    }

    tracing::info!("Connecting to database");
    let db = Arc::new(
        DatabaseConnection::open(&config.database.url)
            .await
            .context("openDB error")?,
    );
    let repo = TaskRepository::new(db.clone());

    let mut stdout = std::io::stdout();
    let result = run_demo(&repo, &config.timeouts, &mut stdout).await;
    db.close().await;

    match result {
        Ok(report) => {
            tracing::info!(
                inserted = report.inserted,
                listed = report.tasks.len(),
                done = report.done_tasks.len(),
                "Demo finished"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Demo failed");
            Err(e.into())
        }
    }
}
