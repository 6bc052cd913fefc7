use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use top100_common::{Catalog, Config, SnapshotStore};
use top100_web::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("top100=info".parse()?))
        .init();

    Config::load_env_files();
    let config = Config::web_from_env()?;
    config.log_redacted();

    // Snapshots are read once; a refresh needs a restart to show up.
    let store = SnapshotStore::new(config.snapshot_dir.clone());
    let catalog = Catalog::load(&store)
        .context("loading snapshots (run `refresh --all` to create them)")?;

    let state = Arc::new(AppState {
        catalog,
        affiliate_tag: config.affiliate_tag.clone(),
    });
    let app = router(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Top 100 web server starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
