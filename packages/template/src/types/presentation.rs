use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters of a normal distribution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GaussianParams {
    pub mean: f64,
    /// Standard deviation. Must be strictly positive.
    pub std: f64,
}

impl GaussianParams {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }
}

/// How likely a symptom is under a disease.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SymptomModel {
    /// P(symptom present | disease), in [0, 1].
    pub probability: f64,
}

impl SymptomModel {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}
