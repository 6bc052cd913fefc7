pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{RunData, RunStatus};

use serde::de::DeserializeOwned;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Seconds the server may hold a run-status request open before answering.
const WAIT_FOR_FINISH_SECS: u32 = 60;

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (stub servers, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Start a run of a saved actor task. Returns immediately with run metadata.
    ///
    /// The task carries its own input; nothing is sent in the body.
    pub async fn start_task(&self, task_id: &str) -> Result<RunData> {
        let url = format!("{}/actor-tasks/{}/runs", self.base_url, task_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let resp = ensure_success(resp).await?;
        let api_resp: ApiResponse<RunData> = resp.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run reaches a terminal state. Uses `waitForFinish` for long-polling.
    ///
    /// There is no overall deadline: a run that never finishes blocks forever.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        loop {
            let url = format!(
                "{}/actor-runs/{}?waitForFinish={}",
                self.base_url, run_id, WAIT_FOR_FINISH_SECS
            );
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let resp = ensure_success(resp).await?;
            let api_resp: ApiResponse<RunData> = resp.json().await?;
            let run = api_resp.data;
            match run.run_status() {
                Some(RunStatus::Succeeded) => return Ok(run),
                Some(status) if status.is_terminal() => {
                    return Err(ApifyError::RunFailed {
                        run_id: run.id,
                        status: run.status,
                    });
                }
                _ => {
                    tracing::debug!(run_id, status = %run.status, "Run still in progress");
                    continue;
                }
            }
        }
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items?format=json", self.base_url, dataset_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let resp = ensure_success(resp).await?;
        let items: Vec<T> = resp.json().await?;
        Ok(items)
    }

    /// Run a saved task end-to-end: start, wait for completion, fetch its dataset.
    pub async fn call_task<T: DeserializeOwned>(&self, task_id: &str) -> Result<Vec<T>> {
        tracing::info!(task_id, "Starting Apify task run");

        let run = self.start_task(task_id).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed, fetching results from dataset"
        );

        let items: Vec<T> = self
            .get_dataset_items(&completed.default_dataset_id)
            .await?;
        tracing::info!(count = items.len(), "Fetched dataset items");

        Ok(items)
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApifyError::Api {
        status: status.as_u16(),
        message: body,
    })
}
