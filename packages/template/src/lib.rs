pub mod types;
pub use types::*;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistical model of how one disease presents in a patient population.
///
/// A template is read once when the catalog is built and never mutated
/// afterwards. Anything derived from it (normalized priors, normalized
/// category weights) is computed on copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DiseaseTemplate {
    /// Unique disease identifier, e.g. `Appendicitis`.
    pub name: String,

    /// Unnormalized prevalence weight. Must be non-negative.
    pub prior: f64,

    /// Age, sex and race distributions of affected patients.
    pub demographics: DemographicsModel,

    /// Probability that each symptom is present given this disease.
    #[serde(default)]
    pub symptoms: BTreeMap<String, SymptomModel>,

    /// Gaussian model of each vital sign given this disease.
    #[serde(default)]
    pub vitals: BTreeMap<String, GaussianParams>,

    /// Diagnostic tests and their behaviour for this disease.
    #[serde(default)]
    pub diagnostic_tests: BTreeMap<String, DiagnosticTest>,
}

impl DiseaseTemplate {
    pub fn test(&self, test_name: &str) -> Option<&DiagnosticTest> {
        self.diagnostic_tests.get(test_name)
    }

    pub fn symptom_probability(&self, symptom: &str) -> Option<f64> {
        self.symptoms.get(symptom).map(|s| s.probability)
    }
}
