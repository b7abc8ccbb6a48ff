//! Project persistence adapter.
//!
//! # Responsibility
//! - Save/load/clear one project document under a fixed slot key.
//! - Contain every persistence failure: log it, then degrade.
//!
//! # Invariants
//! - Stored value is the compact JSON encoding of `Project`.
//! - A value that fails to decode is reported as absent.
//! - Safe to share across threads; access to the backend is serialized.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::model::project::Project;
use log::{debug, error, info, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Slot key used when no explicit key is configured.
pub const DEFAULT_STORAGE_KEY: &str = "website-builder-project";

pub struct ProjectStorage<S: KeyValueStore> {
    key: String,
    backend: Mutex<S>,
}

impl<S: KeyValueStore> ProjectStorage<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            backend: Mutex::new(backend),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes `project` into the slot.
    ///
    /// Returns `false` when the write failed; the failure is logged only.
    pub fn save(&self, project: &Project) -> bool {
        match self.try_save(project) {
            Ok(bytes) => {
                debug!(
                    "event=project_save module=storage status=ok key={} project_id={} pages={} bytes={bytes}",
                    self.key,
                    project.id,
                    project.pages.len()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=project_save module=storage status=error key={} error_code={} error={err}",
                    self.key,
                    err.code()
                );
                false
            }
        }
    }

    /// Reads the slot; `None` when absent, unreadable or undecodable.
    pub fn load(&self) -> Option<Project> {
        match self.try_load() {
            Ok(Some(project)) => {
                info!(
                    "event=project_load module=storage status=ok key={} project_id={} pages={}",
                    self.key,
                    project.id,
                    project.pages.len()
                );
                Some(project)
            }
            Ok(None) => {
                info!(
                    "event=project_load module=storage status=skip key={} reason=absent",
                    self.key
                );
                None
            }
            Err(err) => {
                warn!(
                    "event=project_load module=storage status=error key={} error_code={} error={err}",
                    self.key,
                    err.code()
                );
                None
            }
        }
    }

    /// Removes the slot. Failures are logged only.
    pub fn clear(&self) {
        let result = self.backend().remove(&self.key);
        match result {
            Ok(()) => info!("event=project_clear module=storage status=ok key={}", self.key),
            Err(err) => error!(
                "event=project_clear module=storage status=error key={} error_code={} error={err}",
                self.key,
                err.code()
            ),
        }
    }

    fn try_save(&self, project: &Project) -> StorageResult<usize> {
        let encoded = serde_json::to_string(project).map_err(StorageError::Encode)?;
        self.backend().set(&self.key, &encoded)?;
        Ok(encoded.len())
    }

    fn try_load(&self) -> StorageResult<Option<Project>> {
        let Some(raw) = self.backend().get(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(StorageError::Decode)
    }

    // Every backend write is a single statement; a poisoned lock is still usable.
    fn backend(&self) -> MutexGuard<'_, S> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
