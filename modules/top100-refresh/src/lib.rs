pub mod cli;
pub mod fetcher;

pub use cli::Cli;
pub use fetcher::{RefreshOutcome, SnapshotFetcher, TaskRunner};
