//! Flat-file storage for the app catalog.
//!
//! The whole catalog is one JSON array. Every change is a read-modify-write
//! of the full document, serialized by a single async mutex, and lands on
//! disk through a temporary file that is renamed over the original. Readers
//! therefore see either the previous or the next document, never a partial
//! one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use appdeck_core::AppError;

use super::model::App;

#[derive(Debug)]
pub struct AppStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AppStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the catalog. A missing file is an empty catalog.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Vec<App>, AppError> {
        read_apps(&self.path).await
    }

    /// Runs `f` against the current catalog and persists the result if `f`
    /// succeeds. Nothing is written when `f` returns an error.
    pub async fn update<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Vec<App>) -> Result<T, AppError>,
    {
        let _guard = self.write_lock.lock().await;

        let mut apps = read_apps(&self.path).await?;
        let result = f(&mut apps)?;
        write_apps(&self.path, &apps).await?;

        Ok(result)
    }
}

async fn read_apps(path: &Path) -> Result<Vec<App>, AppError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Apps file not found, using empty catalog");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(AppError::internal(
                anyhow::Error::new(e).context(format!("failed to read {}", path.display())),
            ));
        }
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let apps = serde_json::from_str(&raw)
        .with_context(|| format!("malformed apps file {}", path.display()))?;

    Ok(apps)
}

async fn write_apps(path: &Path, apps: &[App]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut body = serde_json::to_vec_pretty(apps)?;
    body.push(b'\n');

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &body)
        .await
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to replace {}", path.display()))?;

    debug!(path = %path.display(), apps = apps.len(), "Apps file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use uuid::Uuid;

    fn sample(name: &str) -> App {
        App {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            category: "Tools".to_string(),
            route: format!("/{}", name),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AppStore::new(dir.path().join("apps.json"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_persists_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("apps.json");
        let store = AppStore::new(&path);

        store
            .update(|apps| {
                apps.push(sample("wiki"));
                Ok(())
            })
            .await
            .unwrap();

        let reopened = AppStore::new(&path);
        let apps = reopened.load().await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "wiki");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_update_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.json");
        let store = AppStore::new(&path);

        let result: Result<(), AppError> = store
            .update(|apps| {
                apps.push(sample("wiki"));
                Err(AppError::conflict(anyhow::anyhow!("nope")))
            })
            .await;

        assert_eq!(result.unwrap_err().status, StatusCode::CONFLICT);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_malformed_file_is_server_error_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.json");
        std::fs::write(&path, "[{ not json").unwrap();
        let store = AppStore::new(&path);

        let err = store.load().await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let err = store.update(|_| Ok(())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{ not json");
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(AppStore::new(dir.path().join("apps.json")));

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update(move |apps| {
                        apps.push(sample(&format!("app-{}", i)));
                        Ok(())
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.load().await.unwrap().len(), 10);
    }
}
