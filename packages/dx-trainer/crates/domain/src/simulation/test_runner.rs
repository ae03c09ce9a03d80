use crate::entities::case::{Case, TestOutcome, TestResult};
use crate::entities::catalog::DiseaseCatalog;
use dx_template::DiagnosticTest;
use rand::Rng;
use thiserror::Error;

/// Rejections for a test order. Messages never name the hidden disease.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TestOrderError {
    #[error("No disease defines a test named '{0}'")]
    Unknown(String),

    #[error("Test '{0}' has already been ordered for this case")]
    AlreadyOrdered(String),

    #[error("Test '{0}' is not available for this patient")]
    NotApplicable(String),

    #[error("Case refers to a disease that is not in the catalog")]
    UnknownHiddenDisease,
}

/// Produces ground-truth test results from the hidden disease.
///
/// Only the hidden disease's sensitivities are used: a binary test comes
/// back positive with probability `sensitivity`, and each finding of a
/// multi-finding test is reported with its own `sensitivity`.
pub struct TestSimulator;

impl TestSimulator {
    /// Run `test_name` against `case`, record the result and return it.
    pub fn run_test<R: Rng + ?Sized>(
        catalog: &DiseaseCatalog,
        case: &mut Case,
        test_name: &str,
        rng: &mut R,
    ) -> Result<TestResult, TestOrderError> {
        if !catalog.defines_test(test_name) {
            return Err(TestOrderError::Unknown(test_name.to_string()));
        }
        if case.has_ordered(test_name) {
            return Err(TestOrderError::AlreadyOrdered(test_name.to_string()));
        }

        let disease = catalog
            .get_ignore_case(&case.hidden_disease)
            .ok_or(TestOrderError::UnknownHiddenDisease)?;
        let test = disease
            .test(test_name)
            .ok_or_else(|| TestOrderError::NotApplicable(test_name.to_string()))?;

        let result = Self::draw(test, rng);
        tracing::debug!(test = test_name, ?result, "Simulated test result");

        case.test_results
            .insert(test_name.to_string(), result.clone());
        Ok(result)
    }

    fn draw<R: Rng + ?Sized>(test: &DiagnosticTest, rng: &mut R) -> TestResult {
        match test {
            DiagnosticTest::Binary(c) => {
                TestResult::Binary(TestOutcome::from_bool(rng.gen::<f64>() < c.sensitivity))
            }
            DiagnosticTest::MultiFinding(findings) => TestResult::Findings(
                findings
                    .iter()
                    .filter(|(_, c)| rng.gen::<f64>() < c.sensitivity)
                    .map(|(name, _)| name.clone())
                    .collect(),
            ),
        }
    }
}
