use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use apify_client::ApifyClient;
use top100_common::{Config, SnapshotStore};
use top100_refresh::{Cli, SnapshotFetcher};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("top100=info".parse()?)
                .add_directive("apify_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    Config::load_env_files();
    let config = Config::refresh_from_env()?;
    config.log_redacted();

    let plan = cli.plan(&config)?;
    let store = SnapshotStore::new(cli.snapshot_dir(&config));
    info!(dir = %store.dir().display(), categories = plan.len(), "Refreshing snapshots");

    let client = ApifyClient::new(config.apify_api_token.clone());
    let fetcher = SnapshotFetcher::new(client, store);

    for (category, task_id) in plan {
        println!("Starting Apify scraper for {}...", category.title());
        let outcome = fetcher
            .refresh_category(category, &task_id)
            .await
            .with_context(|| format!("refreshing {category} snapshot"))?;

        println!("{}", outcome.summary());
    }

    Ok(())
}
