//! Snapshot fetcher write/abort behaviour with an in-memory task runner.

use std::fs;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use top100_common::{Category, RawRecord, Result, SnapshotStore, Top100Error};
use top100_refresh::{SnapshotFetcher, TaskRunner};

enum Scripted {
    Items(Vec<RawRecord>),
    Fail(&'static str),
}

struct FakeRunner {
    reply: Scripted,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    fn new(reply: Scripted) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TaskRunner for FakeRunner {
    async fn run_task(&self, task_id: &str) -> Result<Vec<RawRecord>> {
        self.calls.lock().unwrap().push(task_id.to_string());
        match &self.reply {
            Scripted::Items(items) => Ok(items.clone()),
            Scripted::Fail(msg) => Err(Top100Error::Remote((*msg).into())),
        }
    }
}

fn items() -> Vec<RawRecord> {
    serde_json::from_value(json!([
        {
            "title": "Armor",
            "asin": "B1",
            "bestsellerPageData": {"categoryName": "Space Marine", "position": 1}
        },
        {"name": "Legion", "asin": "B2", "position": 2}
    ]))
    .unwrap()
}

#[tokio::test]
async fn successful_run_overwrites_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    fs::write(store.path(Category::SpaceMarine), "[{\"asin\": \"stale\"}]").unwrap();

    let runner = FakeRunner::new(Scripted::Items(items()));
    let fetcher = SnapshotFetcher::new(runner, store.clone());
    let outcome = fetcher
        .refresh_category(Category::SpaceMarine, "task-marine")
        .await
        .unwrap();

    assert_eq!(outcome.category, Category::SpaceMarine);
    assert_eq!(outcome.count, 2);
    assert_eq!(outcome.path, store.path(Category::SpaceMarine));
    assert_eq!(store.load(Category::SpaceMarine).unwrap(), items());
    assert!(outcome.summary().starts_with("Found 2 items\n"));
}

#[tokio::test]
async fn task_id_is_passed_through() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::new(Scripted::Items(Vec::new()));
    let fetcher = SnapshotFetcher::new(runner, SnapshotStore::new(dir.path()));

    fetcher
        .refresh_category(Category::SpaceFleet, "dynC4NShWJn0ZjviT")
        .await
        .unwrap();

    assert_eq!(
        *fetcher.runner().calls.lock().unwrap(),
        vec!["dynC4NShWJn0ZjviT".to_string()]
    );
    assert!(fetcher.store().load(Category::SpaceFleet).unwrap().is_empty());
}

#[tokio::test]
async fn remote_failure_leaves_previous_snapshot_untouched() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    let previous = "[\n  {\n    \"asin\": \"keep\"\n  }\n]";
    fs::write(store.path(Category::SpaceFleet), previous).unwrap();

    let runner = FakeRunner::new(Scripted::Fail("run FAILED"));
    let fetcher = SnapshotFetcher::new(runner, store.clone());
    let err = fetcher
        .refresh_category(Category::SpaceFleet, "task-fleet")
        .await
        .unwrap_err();

    assert!(matches!(&err, Top100Error::Remote(source) if source.to_string() == "run FAILED"));
    assert_eq!(fs::read_to_string(store.path(Category::SpaceFleet)).unwrap(), previous);
}

#[tokio::test]
async fn remote_failure_creates_no_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());

    let fetcher = SnapshotFetcher::new(FakeRunner::new(Scripted::Fail("boom")), store.clone());
    assert!(fetcher
        .refresh_category(Category::MilitaryScifi, "t")
        .await
        .is_err());

    assert!(!store.path(Category::MilitaryScifi).exists());
}

#[tokio::test]
async fn write_failure_is_an_error() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().join("missing"));

    let runner = FakeRunner::new(Scripted::Items(items()));
    let fetcher = SnapshotFetcher::new(runner, store);
    let err = fetcher
        .refresh_category(Category::SpaceMarine, "t")
        .await
        .unwrap_err();

    assert!(matches!(err, Top100Error::Snapshot { .. }));
}

#[tokio::test]
async fn each_refresh_invokes_the_task_once() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::new(Scripted::Items(items()));
    let fetcher = SnapshotFetcher::new(runner, SnapshotStore::new(dir.path()));

    fetcher.refresh_category(Category::SpaceMarine, "a").await.unwrap();
    fetcher.refresh_category(Category::SpaceMarine, "b").await.unwrap();

    assert_eq!(*fetcher.runner().calls.lock().unwrap(), vec!["a", "b"]);
    let reloaded = fetcher.store().load(Category::SpaceMarine).unwrap();
    assert_eq!(reloaded.len(), 2);
}
