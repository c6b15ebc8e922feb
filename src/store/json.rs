use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;

use super::StateStore;
use crate::error::StoreError;
use crate::models::BillingState;

/// State stored as a pretty-printed JSON file.
///
/// Saves go to a hidden temp file in the same directory which is then
/// renamed over the target. `update` holds an exclusive lock on a sidecar
/// `.lock` file for the whole load/mutate/save cycle.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "state.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }
        Ok(())
    }

    fn lock(&self) -> Result<FileLock, StoreError> {
        self.ensure_parent()?;
        FileLock::acquire(self.path.with_extension("lock"))
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<BillingState, StoreError> {
        if !self.path.exists() {
            tracing::debug!("No state file at {}, using defaults", self.path.display());
            return Ok(BillingState::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;
        if content.trim().is_empty() {
            return Ok(BillingState::default());
        }

        let state: BillingState =
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(
            "Loaded {} clients and {} entries from {}",
            state.clients.len(),
            state.logs.len(),
            self.path.display()
        );
        Ok(state)
    }

    fn save(&self, state: &BillingState) -> Result<(), StoreError> {
        self.ensure_parent()?;

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        state.serialize(&mut ser).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path).map_err(|e| self.io_err(e))?;
        tmp_file.write_all(&buf).map_err(|e| self.io_err(e))?;
        tmp_file.sync_all().map_err(|e| self.io_err(e))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_err(e))?;
        tracing::debug!("Saved state to {}", self.path.display());
        Ok(())
    }

    fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut BillingState) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _lock = self.lock()?;
        let mut state = self.load()?;
        let out = f(&mut state)?;
        self.save(&state)?;
        Ok(out)
    }
}

/// Exclusive advisory lock, released when dropped.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(lock_path: PathBuf) -> Result<Self, StoreError> {
        let lock_err = |source| StoreError::Lock {
            path: lock_path.clone(),
            source,
        };

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
