use anyhow::{Context, Result};
use domain::{Case, CaseStore, StoreError};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Persists each session's case as a JSON file under a root directory.
pub struct FileCaseStore {
    root: PathBuf,
}

impl FileCaseStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store at ~/.dx-trainer/cases, created on first use.
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        let root = home.join(".dx-trainer").join("cases");

        if !root.exists() {
            fs::create_dir_all(&root).context("Failed to create case store directory")?;
        }

        Ok(Self::new(root))
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// File backing `session`. Session ids are restricted to
    /// `[A-Za-z0-9_-]` so they can never escape the root.
    pub fn case_path(&self, session: &str) -> Result<PathBuf, StoreError> {
        let valid = !session.is_empty()
            && session
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidSession(session.to_string()));
        }
        Ok(self.root.join(format!("{}.json", session)))
    }
}

impl CaseStore for FileCaseStore {
    fn load(&self, session: &str) -> Result<Option<Case>, StoreError> {
        let path = self.case_path(session)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;
        let case = serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))?;
        Ok(Some(case))
    }

    fn save(&self, session: &str, case: &Case) -> Result<(), StoreError> {
        let path = self.case_path(session)?;
        if !self.root.exists() {
            fs::create_dir_all(&self.root)
                .map_err(|e| StoreError::Io(format!("{}: {}", self.root.display(), e)))?;
        }

        let content =
            serde_json::to_string_pretty(case).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        // Staged beside the target and renamed over it: readers never see a
        // half-written case.
        let io_err = |e: std::io::Error| StoreError::Io(format!("{}: {}", path.display(), e));
        let mut staged = NamedTempFile::new_in(&self.root).map_err(io_err)?;
        staged.write_all(content.as_bytes()).map_err(io_err)?;
        staged.as_file().sync_all().map_err(io_err)?;
        staged.persist(&path).map_err(|e| io_err(e.error))?;
        tracing::debug!(session, path = %path.display(), "Saved case");
        Ok(())
    }

    fn remove(&self, session: &str) -> Result<bool, StoreError> {
        let path = self.case_path(session)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;
        Ok(true)
    }
}
