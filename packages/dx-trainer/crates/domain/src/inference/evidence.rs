use crate::entities::case::{Case, Demographics, TestResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A batch of observations scored together under conditional independence.
///
/// Every category is optional; absent symptoms, vitals and tests simply
/// contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default)]
    pub demographics: Option<Demographics>,
    #[serde(default)]
    pub symptoms: BTreeMap<String, bool>,
    #[serde(default)]
    pub vitals: BTreeMap<String, f64>,
    #[serde(default)]
    pub tests: BTreeMap<String, TestResult>,
}

impl Evidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything visible at presentation: demographics, symptoms and vitals.
    pub fn presentation(case: &Case) -> Self {
        Self {
            demographics: Some(case.demographics.clone()),
            symptoms: case.symptoms.clone(),
            vitals: case.vitals_as_observations(),
            tests: BTreeMap::new(),
        }
    }

    /// A single test result.
    pub fn test(test_name: impl Into<String>, result: TestResult) -> Self {
        let mut evidence = Self::default();
        evidence.tests.insert(test_name.into(), result);
        evidence
    }

    pub fn with_demographics(mut self, demographics: Demographics) -> Self {
        self.demographics = Some(demographics);
        self
    }

    pub fn with_symptom(mut self, symptom: impl Into<String>, present: bool) -> Self {
        self.symptoms.insert(symptom.into(), present);
        self
    }

    pub fn with_vital(mut self, vital: impl Into<String>, value: f64) -> Self {
        self.vitals.insert(vital.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.demographics.is_none()
            && self.symptoms.is_empty()
            && self.vitals.is_empty()
            && self.tests.is_empty()
    }
}
