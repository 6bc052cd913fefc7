use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use crate::affiliate::DEFAULT_AFFILIATE_TAG;
use crate::category::Category;
use crate::error::{Result, Top100Error};

/// Apify task that scrapes the Space Fleet list, used when none is configured.
const DEFAULT_SPACE_FLEET_TASK: &str = "dynC4NShWJn0ZjviT";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Scraping
    pub apify_api_token: String,
    pub task_ids: BTreeMap<Category, String>,

    // Snapshots
    pub snapshot_dir: PathBuf,

    // Web server
    pub affiliate_tag: String,
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Pull `.env.local` and `.env` into the process environment, if present.
    /// Variables already set win.
    pub fn load_env_files() {
        dotenvy::from_filename(".env.local").ok();
        dotenvy::dotenv().ok();
    }

    /// Configuration for the snapshot refresh job. The Apify token is required.
    pub fn refresh_from_env() -> Result<Self> {
        Self::refresh_from(|key| env::var(key).ok())
    }

    /// Configuration for the web server. No scraping credentials needed.
    pub fn web_from_env() -> Result<Self> {
        Self::web_from(|key| env::var(key).ok())
    }

    pub fn refresh_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let apify_api_token = lookup("APIFY_API_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Top100Error::Config("APIFY_API_TOKEN is not set".to_string()))?;

        let mut task_ids = BTreeMap::new();
        for category in Category::ALL {
            let configured = lookup(category.task_env_var()).filter(|v| !v.trim().is_empty());
            let task_id = match (configured, category) {
                (Some(id), _) => Some(id),
                (None, Category::SpaceFleet) => Some(DEFAULT_SPACE_FLEET_TASK.to_string()),
                (None, _) => None,
            };
            if let Some(id) = task_id {
                task_ids.insert(category, id);
            }
        }

        Ok(Self {
            apify_api_token,
            task_ids,
            ..Self::web_from(lookup)?
        })
    }

    pub fn web_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let web_port = match lookup("WEB_PORT") {
            Some(port) => port.parse().map_err(|_| {
                Top100Error::Config(format!("WEB_PORT must be a number, got {port:?}"))
            })?,
            None => 3000,
        };

        Ok(Self {
            apify_api_token: String::new(),
            task_ids: BTreeMap::new(),
            snapshot_dir: lookup("SNAPSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            affiliate_tag: lookup("AFFILIATE_TAG")
                .unwrap_or_else(|| DEFAULT_AFFILIATE_TAG.to_string()),
            web_host: lookup("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port,
        })
    }

    /// Task id bound to `category`.
    pub fn task_id(&self, category: Category) -> Result<&str> {
        self.task_ids
            .get(&category)
            .map(String::as_str)
            .ok_or_else(|| {
                Top100Error::Config(format!(
                    "no Apify task configured for {category}; set {}",
                    category.task_env_var()
                ))
            })
    }

    /// Log the loaded configuration with secrets shortened to a preview.
    pub fn log_redacted(&self) {
        fn preview(val: &str) -> String {
            if val.is_empty() {
                return "<not set>".to_string();
            }
            let n = val.chars().count().min(5);
            let head: String = val.chars().take(n).collect();
            format!("{}...({} chars)", head, val.chars().count())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  APIFY_API_TOKEN: {}", preview(&self.apify_api_token));
        for (category, task_id) in &self.task_ids {
            tracing::info!("  {}: {}", category.task_env_var(), task_id);
        }
        tracing::info!("  SNAPSHOT_DIR: {}", self.snapshot_dir.display());
        tracing::info!("  AFFILIATE_TAG: {}", self.affiliate_tag);
    }
}
