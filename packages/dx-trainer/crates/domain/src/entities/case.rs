use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Disease name -> probability (or likelihood weight), ordered by name.
pub type Distribution = BTreeMap<String, f64>;

/// One simulated patient encounter.
///
/// `hidden_disease` is the sampled ground truth. Nothing in the engine
/// redacts it; callers must strip it before showing a case to a learner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub hidden_disease: String,
    pub probabilities: Distribution,
    pub demographics: Demographics,
    pub symptoms: BTreeMap<String, bool>,
    pub vitals: BTreeMap<String, i64>,
    #[serde(default)]
    pub test_results: BTreeMap<String, TestResult>,
}

impl Case {
    pub fn has_ordered(&self, test_name: &str) -> bool {
        self.test_results.contains_key(test_name)
    }

    /// Vitals as real-valued observations for likelihood scoring.
    pub fn vitals_as_observations(&self) -> BTreeMap<String, f64> {
        self.vitals
            .iter()
            .map(|(name, value)| (name.clone(), *value as f64))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Demographics {
    pub age: u32,
    pub sex: String,
    pub race: String,
}

/// Outcome of a binary test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Positive,
    Negative,
}

impl TestOutcome {
    pub fn from_bool(positive: bool) -> Self {
        if positive {
            TestOutcome::Positive
        } else {
            TestOutcome::Negative
        }
    }

    pub fn is_positive(self) -> bool {
        self == TestOutcome::Positive
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestOutcome::Positive => write!(f, "positive"),
            TestOutcome::Negative => write!(f, "negative"),
        }
    }
}

/// Result of an ordered test: `"positive"`/`"negative"` for binary tests,
/// or the list of findings that came back for a multi-finding test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TestResult {
    Binary(TestOutcome),
    Findings(Vec<String>),
}

impl TestResult {
    pub fn has_finding(&self, finding: &str) -> bool {
        match self {
            TestResult::Binary(_) => false,
            TestResult::Findings(findings) => findings.iter().any(|f| f == finding),
        }
    }

    /// Whether anything abnormal came back.
    pub fn is_positive(&self) -> bool {
        match self {
            TestResult::Binary(outcome) => outcome.is_positive(),
            TestResult::Findings(findings) => !findings.is_empty(),
        }
    }
}

impl From<TestOutcome> for TestResult {
    fn from(outcome: TestOutcome) -> Self {
        TestResult::Binary(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_result_wire_shape() {
        let positive = serde_json::to_value(TestResult::Binary(TestOutcome::Positive)).unwrap();
        assert_eq!(positive, serde_json::json!("positive"));

        let findings =
            serde_json::to_value(TestResult::Findings(vec!["gallstones".to_string()])).unwrap();
        assert_eq!(findings, serde_json::json!(["gallstones"]));

        let parsed: TestResult = serde_json::from_str(r#""negative""#).unwrap();
        assert_eq!(parsed, TestResult::Binary(TestOutcome::Negative));
        let parsed: TestResult = serde_json::from_str("[]").unwrap();
        assert_eq!(parsed, TestResult::Findings(vec![]));
        assert!(!parsed.is_positive());
    }

    #[test]
    fn test_unknown_outcome_is_rejected() {
        assert!(serde_json::from_str::<TestResult>(r#""maybe""#).is_err());
    }
}
