pub mod entities;
pub mod inference;
pub mod math;
pub mod ports;
pub mod simulation;

pub use entities::case::{Case, Demographics, Distribution, TestOutcome, TestResult};
pub use entities::catalog::{CatalogLoadError, DiseaseCatalog, InvalidCatalogError};
pub use inference::evidence::Evidence;
pub use inference::likelihood::LikelihoodEngine;
pub use inference::posterior::{KeyMismatchError, PosteriorUpdater};
pub use ports::case_store::{CaseStore, StoreError};
pub use simulation::generator::CaseGenerator;
pub use simulation::test_runner::{TestOrderError, TestSimulator};

pub use dx_template::{DiagnosticTest, DiseaseTemplate, GaussianParams, TestCharacteristics};

#[cfg(test)]
pub(crate) mod fixtures;
