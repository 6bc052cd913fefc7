//! Snapshot fetcher: run a category's scraping task and overwrite its snapshot.

use std::path::PathBuf;

use apify_client::{ApifyClient, ApifyError};
use async_trait::async_trait;
use tracing::info;

use top100_common::{Category, RawRecord, Result, SnapshotStore, Top100Error};

/// Runs a remote scraping task to completion and returns its result set.
#[async_trait]
pub trait TaskRunner: Send + Sync {
    async fn run_task(&self, task_id: &str) -> Result<Vec<RawRecord>>;
}

#[async_trait]
impl TaskRunner for ApifyClient {
    async fn run_task(&self, task_id: &str) -> Result<Vec<RawRecord>> {
        self.call_task::<RawRecord>(task_id)
            .await
            .map_err(remote_error)
    }
}

fn remote_error(err: ApifyError) -> Top100Error {
    Top100Error::Remote(Box::new(err))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub category: Category,
    pub path: PathBuf,
    pub count: usize,
}

impl RefreshOutcome {
    /// Console report printed once a category's snapshot has been replaced.
    pub fn summary(&self) -> String {
        format!(
            "Found {} items\n✓ Successfully updated {}\n  Total books: {}",
            self.count,
            self.path.display(),
            self.count
        )
    }
}

pub struct SnapshotFetcher<R> {
    runner: R,
    store: SnapshotStore,
}

impl<R: TaskRunner> SnapshotFetcher<R> {
    pub fn new(runner: R, store: SnapshotStore) -> Self {
        Self { runner, store }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Run `task_id` and replace `category`'s snapshot with whatever it returned.
    ///
    /// The snapshot is only touched after the remote run and fetch both
    /// succeed. No retries.
    pub async fn refresh_category(
        &self,
        category: Category,
        task_id: &str,
    ) -> Result<RefreshOutcome> {
        info!(category = %category, task_id, "Starting Apify scraper");
        let items = self.runner.run_task(task_id).await?;
        info!(category = %category, count = items.len(), "Found items");

        let path = self.store.write(category, &items)?;
        Ok(RefreshOutcome {
            category,
            path,
            count: items.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_keep_the_apify_cause() {
        let err = remote_error(ApifyError::RunFailed {
            run_id: "run-1".to_string(),
            status: "ABORTED".to_string(),
        });

        assert_eq!(
            err.to_string(),
            "Remote task error: Run run-1 finished with status: ABORTED"
        );
        let source = std::error::Error::source(&err).unwrap();
        assert!(matches!(
            source.downcast_ref::<ApifyError>(),
            Some(ApifyError::RunFailed { status, .. }) if status == "ABORTED"
        ));
    }

    #[test]
    fn summary_reports_count_and_path() {
        let outcome = RefreshOutcome {
            category: Category::SpaceFleet,
            path: PathBuf::from("data/top-100-space-fleet.json"),
            count: 97,
        };
        assert_eq!(
            outcome.summary(),
            "Found 97 items\n✓ Successfully updated data/top-100-space-fleet.json\n  Total books: 97"
        );
    }
}
