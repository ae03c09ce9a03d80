use domain::{Case, Demographics, Distribution, TestResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A case as the learner may see it: everything except the hidden disease.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseView {
    pub probabilities: Distribution,
    pub demographics: Demographics,
    pub symptoms: BTreeMap<String, bool>,
    pub vitals: BTreeMap<String, i64>,
    pub test_results: BTreeMap<String, TestResult>,
}

impl From<&Case> for CaseView {
    fn from(case: &Case) -> Self {
        Self {
            probabilities: case.probabilities.clone(),
            demographics: case.demographics.clone(),
            symptoms: case.symptoms.clone(),
            vitals: case.vitals.clone(),
            test_results: case.test_results.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestReport {
    pub test_name: String,
    pub result: TestResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosisVerdict {
    pub correct: bool,
    pub submitted: String,
    pub feedback: String,
}
