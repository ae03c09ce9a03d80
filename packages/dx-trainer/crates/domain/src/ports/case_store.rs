use crate::entities::case::Case;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid session id: '{0}'")]
    InvalidSession(String),
    #[error("Case store I/O error: {0}")]
    Io(String),
    #[error("Stored case is corrupt: {0}")]
    Corrupt(String),
    #[error("Case store lock poisoned")]
    Poisoned,
}

/// Keyed storage for in-progress cases, one per session.
///
/// Implementations serialize access per session; the engine itself holds
/// no state between calls.
pub trait CaseStore: Send + Sync {
    fn load(&self, session: &str) -> Result<Option<Case>, StoreError>;
    fn save(&self, session: &str, case: &Case) -> Result<(), StoreError>;
    /// Returns whether a case was present.
    fn remove(&self, session: &str) -> Result<bool, StoreError>;
}
