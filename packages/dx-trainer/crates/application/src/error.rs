use domain::{InvalidCatalogError, KeyMismatchError, StoreError, TestOrderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("No case generated yet for session '{0}'")]
    NoActiveCase(String),

    #[error("No test specified")]
    EmptyTestName,

    #[error(transparent)]
    InvalidCatalog(#[from] InvalidCatalogError),

    #[error(transparent)]
    TestOrder(#[from] TestOrderError),

    #[error(transparent)]
    KeyMismatch(#[from] KeyMismatchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TrainingError {
    /// Whether the learner caused this (bad input) rather than the setup.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TrainingError::NoActiveCase(_)
                | TrainingError::EmptyTestName
                | TrainingError::TestOrder(_)
        )
    }
}
