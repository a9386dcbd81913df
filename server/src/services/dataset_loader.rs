use std::path::Path;
use std::time::Duration;

use estate_map_shared::Dataset;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub async fn read_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
    Dataset::from_json(&text).map_err(|source| DatasetError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Read the data file and swap it in. Returns `Ok(true)` when the served
/// document changed. On error the current snapshot is left untouched.
pub async fn reload(state: &AppState) -> Result<bool, DatasetError> {
    let path = state.data_path.as_path();
    let dataset = read_dataset(path).await?;

    let mut snapshot = state.dataset.write().await;
    let next = snapshot
        .successor(&dataset)
        .map_err(|source| DatasetError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    let Some(next) = next else {
        return Ok(false);
    };
    info!(
        revision = next.revision,
        cities = next.city_count,
        properties = next.property_count,
        path = %path.display(),
        "loaded dataset"
    );
    *snapshot = next;
    Ok(true)
}

/// Re-read the data file every `period`. The initial load happens in `main`.
pub async fn run(state: AppState, period: Duration) {
    info!("Dataset loader started (interval: {}s)", period.as_secs());

    let mut interval = tokio::time::interval(period);
    // Consume the immediate first tick so the first reload waits a full period.
    interval.tick().await;

    loop {
        interval.tick().await;
        match reload(&state).await {
            Ok(true) => {}
            Ok(false) => debug!("dataset unchanged"),
            Err(e) => warn!(error = %e, "dataset reload failed, keeping previous snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    struct TempFile(PathBuf);

    impl TempFile {
        fn new(name: &str, contents: &str) -> Self {
            let path = std::env::temp_dir()
                .join(format!("estate-map-{}-{name}.json", std::process::id()));
            std::fs::write(&path, contents).expect("write temp data file");
            Self(path)
        }

        fn write(&self, contents: &str) {
            std::fs::write(&self.0, contents).expect("rewrite temp data file");
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn state_for(file: &TempFile) -> AppState {
        AppState::new(file.0.clone(), PathBuf::from("client/dist"))
    }

    #[tokio::test]
    async fn reload_swaps_in_valid_data() {
        let file = TempFile::new(
            "valid",
            r#"{"cities":[{"title":"Lyon","lat":45.76,"lng":4.83}],"properties":null}"#,
        );
        let state = state_for(&file);

        assert!(reload(&state).await.expect("reload succeeds"));
        let snapshot = state.dataset.read().await;
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.city_count, 1);
        assert_eq!(snapshot.property_count, 0);
    }

    #[tokio::test]
    async fn unchanged_file_keeps_revision() {
        let file = TempFile::new("unchanged", r#"{"cities":[]}"#);
        let state = state_for(&file);

        assert!(reload(&state).await.expect("first reload"));
        assert!(!reload(&state).await.expect("second reload"));
        assert_eq!(state.dataset.read().await.revision, 1);
    }

    #[tokio::test]
    async fn malformed_file_keeps_previous_snapshot() {
        let file = TempFile::new(
            "malformed",
            r#"{"cities":[{"title":"Nice","lat":43.7,"lng":7.26}]}"#,
        );
        let state = state_for(&file);
        reload(&state).await.expect("initial reload");
        let before = state.dataset.read().await.json.clone();

        file.write("{ not json");
        let err = reload(&state).await.expect_err("parse failure");
        assert!(matches!(err, DatasetError::Parse { .. }));

        let snapshot = state.dataset.read().await;
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.json, before);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let state = AppState::new(
            std::env::temp_dir().join("estate-map-does-not-exist.json"),
            PathBuf::from("client/dist"),
        );
        let err = reload(&state).await.expect_err("missing file");
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(state.dataset.read().await.loaded_at.is_none());
    }
}
