//! Brew session persistence.
//!
//! The whole session (recipe, steps, progress, gamification) is one JSON
//! blob. The countdown timer is deliberately not part of it: an in-flight
//! timer is lost silently on reload.

use std::path::PathBuf;

use crate::error::StoreError;
use crate::session::BrewSession;
use crate::storage::data_dir;

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open() -> Result<Self, StoreError> {
        let data_dir = data_dir().map_err(|e| StoreError::DataDir(e.to_string()))?;
        Ok(Self {
            path: data_dir.join("session.json"),
        })
    }

    /// Create a session store with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the persisted session, if any. A missing or garbled file yields
    /// `None`; the caller starts a fresh session.
    pub fn load(&self) -> Option<BrewSession> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self, session: &BrewSession) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
