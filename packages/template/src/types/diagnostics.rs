use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Sensitivity and specificity of a test (or of one finding of a test).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TestCharacteristics {
    /// P(positive | disease present).
    pub sensitivity: f64,
    /// P(negative | disease absent).
    pub specificity: f64,
}

impl TestCharacteristics {
    pub const fn new(sensitivity: f64, specificity: f64) -> Self {
        Self {
            sensitivity,
            specificity,
        }
    }
}

/// A diagnostic test as defined for one disease.
///
/// On disk the two shapes share one record and are told apart by the
/// `Binary` flag:
///
/// ```json
/// { "Binary": true, "sensitivity": 0.9, "specificity": 0.95 }
/// { "Binary": false, "fluid": { "sensitivity": 0.8, "specificity": 0.9 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDiagnosticTest", into = "RawDiagnosticTest")]
pub enum DiagnosticTest {
    /// Single positive/negative outcome.
    Binary(TestCharacteristics),
    /// Independent named findings, each with its own characteristics.
    MultiFinding(BTreeMap<String, TestCharacteristics>),
}

impl DiagnosticTest {
    pub fn is_binary(&self) -> bool {
        matches!(self, DiagnosticTest::Binary(_))
    }

    /// Finding names of a multi-finding test; empty for binary tests.
    pub fn finding_names(&self) -> impl Iterator<Item = &str> {
        let findings = match self {
            DiagnosticTest::Binary(_) => None,
            DiagnosticTest::MultiFinding(findings) => Some(findings.keys()),
        };
        findings.into_iter().flatten().map(String::as_str)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum DiagnosticTestError {
    #[error("binary test is missing `{0}`")]
    MissingCharacteristic(&'static str),

    #[error("binary test must not declare findings (found `{0}`)")]
    FindingsOnBinary(String),

    #[error("multi-finding test must not declare a top-level `{0}`")]
    ScalarOnMultiFinding(&'static str),

    #[error("multi-finding test declares no findings")]
    NoFindings,
}

/// Storage shape of [`DiagnosticTest`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RawDiagnosticTest {
    /// `true` for a positive/negative test, `false` for a multi-finding test.
    #[serde(rename = "Binary")]
    pub binary: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specificity: Option<f64>,

    /// Findings of a multi-finding test, keyed by finding name.
    #[serde(flatten)]
    pub findings: BTreeMap<String, TestCharacteristics>,
}

impl TryFrom<RawDiagnosticTest> for DiagnosticTest {
    type Error = DiagnosticTestError;

    fn try_from(raw: RawDiagnosticTest) -> Result<Self, Self::Error> {
        if raw.binary {
            if let Some(finding) = raw.findings.keys().next() {
                return Err(DiagnosticTestError::FindingsOnBinary(finding.clone()));
            }
            let sensitivity = raw
                .sensitivity
                .ok_or(DiagnosticTestError::MissingCharacteristic("sensitivity"))?;
            let specificity = raw
                .specificity
                .ok_or(DiagnosticTestError::MissingCharacteristic("specificity"))?;
            return Ok(DiagnosticTest::Binary(TestCharacteristics::new(
                sensitivity,
                specificity,
            )));
        }

        if raw.sensitivity.is_some() {
            return Err(DiagnosticTestError::ScalarOnMultiFinding("sensitivity"));
        }
        if raw.specificity.is_some() {
            return Err(DiagnosticTestError::ScalarOnMultiFinding("specificity"));
        }
        if raw.findings.is_empty() {
            return Err(DiagnosticTestError::NoFindings);
        }
        Ok(DiagnosticTest::MultiFinding(raw.findings))
    }
}

impl From<DiagnosticTest> for RawDiagnosticTest {
    fn from(test: DiagnosticTest) -> Self {
        match test {
            DiagnosticTest::Binary(c) => RawDiagnosticTest {
                binary: true,
                sensitivity: Some(c.sensitivity),
                specificity: Some(c.specificity),
                findings: BTreeMap::new(),
            },
            DiagnosticTest::MultiFinding(findings) => RawDiagnosticTest {
                binary: false,
                sensitivity: None,
                specificity: None,
                findings,
            },
        }
    }
}

impl JsonSchema for DiagnosticTest {
    fn schema_name() -> String {
        "DiagnosticTest".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        RawDiagnosticTest::json_schema(gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_binary_from_json() {
        let test: DiagnosticTest =
            serde_json::from_str(r#"{"Binary": true, "sensitivity": 0.9, "specificity": 0.95}"#)
                .unwrap();
        assert_eq!(
            test,
            DiagnosticTest::Binary(TestCharacteristics::new(0.9, 0.95))
        );
        assert!(test.is_binary());
    }

    #[test]
    fn test_multi_finding_from_json() {
        let test: DiagnosticTest = serde_json::from_str(
            r#"{
                "Binary": false,
                "free_fluid": {"sensitivity": 0.4, "specificity": 0.9},
                "wall_thickening": {"sensitivity": 0.8, "specificity": 0.85}
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = test.finding_names().collect();
        assert_eq!(names, vec!["free_fluid", "wall_thickening"]);
        assert!(!test.is_binary());
    }

    #[test]
    fn test_binary_missing_specificity_is_rejected() {
        let err = serde_json::from_str::<DiagnosticTest>(r#"{"Binary": true, "sensitivity": 0.9}"#)
            .unwrap_err();
        assert!(err.to_string().contains("specificity"));
    }

    #[test]
    fn test_multi_finding_without_findings_is_rejected() {
        let err = serde_json::from_str::<DiagnosticTest>(r#"{"Binary": false}"#).unwrap_err();
        assert!(err.to_string().contains("no findings"));
    }

    #[test]
    fn test_missing_flag_is_rejected() {
        assert!(
            serde_json::from_str::<DiagnosticTest>(r#"{"sensitivity": 0.9, "specificity": 0.9}"#)
                .is_err()
        );
    }

    #[test]
    fn test_serializes_back_to_storage_shape() {
        let test = DiagnosticTest::Binary(TestCharacteristics::new(0.5, 0.75));
        let value = serde_json::to_value(&test).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"Binary": true, "sensitivity": 0.5, "specificity": 0.75})
        );
    }
}
