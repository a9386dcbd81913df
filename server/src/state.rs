use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use estate_map_shared::Dataset;
use tokio::sync::RwLock;

const EMPTY_DATASET_JSON: &[u8] = br#"{"cities":[],"properties":[]}"#;

/// Loaded dataset, serialized once and shared by every request via Arc.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    /// Bumped whenever the served JSON changes.
    pub revision: u64,
    pub loaded_at: Option<DateTime<Utc>>,
    pub city_count: usize,
    pub property_count: usize,
    pub json: Arc<Bytes>,
    /// Derived from the served bytes, so it stays valid across restarts.
    pub etag: String,
}

/// Strong ETag for a served body: CRC-32 plus length.
pub fn content_etag(body: &[u8]) -> String {
    format!("\"dataset-{:08x}-{}\"", crc32fast::hash(body), body.len())
}

impl Default for DatasetSnapshot {
    fn default() -> Self {
        Self {
            revision: 0,
            loaded_at: None,
            city_count: 0,
            property_count: 0,
            json: Arc::new(Bytes::from_static(EMPTY_DATASET_JSON)),
            etag: content_etag(EMPTY_DATASET_JSON),
        }
    }
}

impl DatasetSnapshot {
    /// Snapshot that would replace `self` for `dataset`, or `None` if the
    /// served JSON would be unchanged.
    pub fn successor(&self, dataset: &Dataset) -> Result<Option<Self>, serde_json::Error> {
        let json = serde_json::to_vec(dataset)?;
        if self.loaded_at.is_some() && self.json.as_ref() == json.as_slice() {
            return Ok(None);
        }
        Ok(Some(Self {
            revision: self.revision + 1,
            loaded_at: Some(Utc::now()),
            city_count: dataset.cities.len(),
            property_count: dataset.properties.len(),
            etag: content_etag(&json),
            json: Arc::new(Bytes::from(json)),
        }))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<RwLock<DatasetSnapshot>>,
    pub data_path: Arc<PathBuf>,
    /// Root of the built client bundle.
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(data_path: PathBuf, static_dir: PathBuf) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(DatasetSnapshot::default())),
            data_path: Arc::new(data_path),
            static_dir: Arc::new(static_dir),
        }
    }
}
