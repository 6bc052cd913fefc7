//! Flat-file snapshots of scraped records, one JSON file per category.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::category::Category;
use crate::error::{Result, Top100Error};
use crate::normalize::normalize;
use crate::record::{DisplayRecord, RawRecord};

/// Directory holding the per-category snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, category: Category) -> PathBuf {
        self.dir.join(category.snapshot_file())
    }

    /// Read a category's snapshot in full.
    pub fn load(&self, category: Category) -> Result<Vec<RawRecord>> {
        let path = self.path(category);
        let text = fs::read_to_string(&path).map_err(|source| Top100Error::Snapshot {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Top100Error::Parse { path, source })
    }

    /// Replace a category's snapshot with `records`, pretty-printed.
    ///
    /// Writes in place: there is no temp file, so a failure part-way leaves
    /// a truncated snapshot behind.
    pub fn write(&self, category: Category, records: &[RawRecord]) -> Result<PathBuf> {
        let path = self.path(category);
        let text = serde_json::to_string_pretty(records).map_err(|source| Top100Error::Parse {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, text).map_err(|source| Top100Error::Snapshot {
            path: path.clone(),
            source,
        })?;
        info!(
            category = %category,
            count = records.len(),
            path = %path.display(),
            "Snapshot written"
        );
        Ok(path)
    }
}

/// Scraped records of every category, loaded once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    lists: BTreeMap<Category, Vec<RawRecord>>,
}

impl Catalog {
    /// Load every category's snapshot. Any missing or unreadable file fails the load.
    pub fn load(store: &SnapshotStore) -> Result<Self> {
        let mut lists = BTreeMap::new();
        for category in Category::ALL {
            let records = store.load(category)?;
            info!(category = %category, count = records.len(), "Snapshot loaded");
            lists.insert(category, records);
        }
        Ok(Self { lists })
    }

    pub fn from_lists(lists: impl IntoIterator<Item = (Category, Vec<RawRecord>)>) -> Self {
        Self {
            lists: lists.into_iter().collect(),
        }
    }

    /// Raw records of a category in snapshot order. Empty when never loaded.
    pub fn records(&self, category: Category) -> &[RawRecord] {
        self.lists
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Display records of a category, recomputed on every call.
    pub fn display(&self, category: Category) -> Vec<DisplayRecord> {
        normalize(self.records(category))
    }
}
