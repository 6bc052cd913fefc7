use std::path::PathBuf;

use clap::Parser;

use top100_common::{Category, Config, Result, Top100Error};

/// Refresh ranking snapshots from their Apify scraping tasks.
#[derive(Parser, Debug)]
#[command(name = "refresh")]
#[command(version)]
pub struct Cli {
    /// Categories to refresh: space-marine, military-scifi, space-fleet
    #[arg(value_name = "CATEGORY", required_unless_present = "all")]
    pub categories: Vec<Category>,

    /// Refresh all three categories
    #[arg(long, conflicts_with = "categories")]
    pub all: bool,

    /// Run this Apify task instead of the configured one (single category only)
    #[arg(long)]
    pub task_id: Option<String>,

    /// Directory holding the snapshot files (overrides SNAPSHOT_DIR)
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,
}

impl Cli {
    /// Categories to refresh, in order, each with the task that scrapes it.
    ///
    /// Resolved up front so a missing task id fails before any remote call.
    pub fn plan(&self, config: &Config) -> Result<Vec<(Category, String)>> {
        let categories: Vec<Category> = if self.all {
            Category::ALL.to_vec()
        } else {
            let mut seen = Vec::new();
            for c in &self.categories {
                if !seen.contains(c) {
                    seen.push(*c);
                }
            }
            seen
        };

        if let Some(task_id) = &self.task_id {
            return match categories.as_slice() {
                [category] => Ok(vec![(*category, task_id.clone())]),
                _ => Err(Top100Error::Config(
                    "--task-id applies to exactly one category".to_string(),
                )),
            };
        }

        categories
            .into_iter()
            .map(|c| Ok((c, config.task_id(c)?.to_string())))
            .collect()
    }

    pub fn snapshot_dir(&self, config: &Config) -> PathBuf {
        self.snapshot_dir
            .clone()
            .unwrap_or_else(|| config.snapshot_dir.clone())
    }
}
