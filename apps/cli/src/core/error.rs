use dx_trainer::application::TrainingError;
use dx_trainer::domain::{CatalogLoadError, StoreError, TestOrderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not load disease templates: {0}")]
    Templates(String),

    #[error("{0}")]
    NoActiveCase(String),

    #[error("{0}")]
    UnknownTest(String),

    #[error("{0}")]
    AlreadyOrdered(String),

    #[error("{0}")]
    NotApplicable(String),

    #[error("No test specified")]
    EmptyTestName,

    #[error("{0}")]
    InvalidSession(String),

    #[error("Case store error: {0}")]
    Store(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    /// Returns a themed, actionable suggestion for the error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CliError::Config(_) => Some(
                "Check dx-trainer.toml and the DX_TRAINER_* variables for typos or bad values."
                    .to_string(),
            ),
            CliError::Templates(_) => Some(
                "Point --templates (or DX_TRAINER_TEMPLATES) at a directory of disease templates."
                    .to_string(),
            ),
            CliError::NoActiveCase(_) => {
                Some("Run `dx-trainer new` to draw a patient first.".to_string())
            }
            CliError::UnknownTest(_) | CliError::EmptyTestName => {
                Some("Run `dx-trainer tests` to see what can be ordered.".to_string())
            }
            CliError::AlreadyOrdered(_) => {
                Some("Run `dx-trainer show` to see the earlier result.".to_string())
            }
            CliError::InvalidSession(_) => Some(
                "Session names may only contain letters, digits, '-' and '_'.".to_string(),
            ),
            CliError::Store(_) => Some(
                "Run `dx-trainer reset` to discard the stored case, or check the store directory is writable."
                    .to_string(),
            ),
            _ => None,
        }
    }

    pub fn render(&self) {
        eprintln!("\n{} {}", console::style("Error:").red().bold(), self);
        if let Some(s) = self.suggestion() {
            eprintln!("{} {}", console::style("  help:").dim(), s);
        }
    }
}

impl From<&TrainingError> for CliError {
    fn from(err: &TrainingError) -> Self {
        match err {
            TrainingError::NoActiveCase(_) => CliError::NoActiveCase(err.to_string()),
            TrainingError::EmptyTestName => CliError::EmptyTestName,
            TrainingError::TestOrder(order) => match order {
                TestOrderError::Unknown(_) => CliError::UnknownTest(order.to_string()),
                TestOrderError::AlreadyOrdered(_) => CliError::AlreadyOrdered(order.to_string()),
                TestOrderError::NotApplicable(_) => CliError::NotApplicable(order.to_string()),
                TestOrderError::UnknownHiddenDisease => CliError::Runtime(order.to_string()),
            },
            TrainingError::Store(store) => CliError::from(store),
            TrainingError::InvalidCatalog(_) => CliError::Templates(err.to_string()),
            TrainingError::KeyMismatch(_) => CliError::Runtime(err.to_string()),
        }
    }
}

impl From<&StoreError> for CliError {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::InvalidSession(_) => CliError::InvalidSession(err.to_string()),
            StoreError::Io(_) | StoreError::Corrupt(_) | StoreError::Poisoned => {
                CliError::Store(err.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<CliError>() {
            Ok(cli) => return cli,
            Err(err) => err,
        };
        if let Some(training) = err.downcast_ref::<TrainingError>() {
            return CliError::from(training);
        }
        if err.downcast_ref::<CatalogLoadError>().is_some() {
            return CliError::Templates(format!("{:#}", err));
        }
        if let Some(store) = err.downcast_ref::<StoreError>() {
            return CliError::from(store);
        }
        CliError::Runtime(format!("{:#}", err))
    }
}
