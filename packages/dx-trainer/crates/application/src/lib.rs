pub mod config;
pub mod error;
pub mod format;
pub mod training_service;
pub mod view;

pub use config::{EvidencePolicy, TrainerConfig};
pub use error::TrainingError;
pub use training_service::TrainingService;
pub use view::{CaseView, DiagnosisVerdict, TestReport};
