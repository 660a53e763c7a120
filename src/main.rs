// This is the entry point of folio-fetch.
//
// **Architecture Overview:**
// - `core/` = Business logic (settings, workflow, ports)
// - `infra/` = Implementations of core traits (HTTP clients, file store)
//
// This file's job is to:
// 1. Load configuration
// 2. Wire the concrete clients into the workflow (dependency injection)
// 3. Run it and map the outcome to an exit code

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a pile of mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::time::Duration;

use crate::core::settings::Settings;
use crate::core::sync::{SyncError, SyncService};
use crate::infra::github::graphql_client::GithubGraphqlClient;
use crate::infra::medium::feed_client::MediumFeedClient;
use crate::infra::snapshot::file_store::SnapshotFileStore;

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Read the environment exactly once; everything downstream takes the
    // settings value by parameter.
    let settings = Settings::from_env();

    if let Err(err) = run(&settings).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(settings: &Settings) -> Result<(), SyncError> {
    let timeout = Duration::from_secs(settings.timeout_secs);

    let profile = GithubGraphqlClient::new(settings.github_token.as_deref(), timeout)?;
    let feed = MediumFeedClient::new(timeout)?;
    let store = SnapshotFileStore::new(&settings.output_dir);

    let service = SyncService::new(profile, feed, store);
    let report = service.run(settings).await?;

    tracing::info!(
        profile_saved = report.profile_saved,
        blogs_saved = report.blogs_saved,
        "Fetch workflow finished"
    );

    Ok(())
}
