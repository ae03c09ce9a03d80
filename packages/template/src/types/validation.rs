use crate::{DiagnosticTest, DiseaseTemplate, GaussianParams, TestCharacteristics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub level: ValidationLevel,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.issues.push(ValidationIssue {
            level: ValidationLevel::Error,
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            level: ValidationLevel::Warning,
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.level == ValidationLevel::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.level == ValidationLevel::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.level == ValidationLevel::Warning)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks that a template can be sampled from and scored against.
pub struct TemplateValidator;

impl TemplateValidator {
    pub fn validate(template: &DiseaseTemplate) -> ValidationResult {
        let mut result = ValidationResult::new();

        Self::validate_identity(template, &mut result);
        Self::validate_demographics(template, &mut result);
        Self::validate_symptoms(template, &mut result);
        Self::validate_vitals(template, &mut result);
        Self::validate_tests(template, &mut result);

        result
    }

    fn validate_identity(template: &DiseaseTemplate, result: &mut ValidationResult) {
        if template.name.trim().is_empty() {
            result.add_error("name", "Disease name must not be empty");
        }
        if !template.prior.is_finite() || template.prior < 0.0 {
            result.add_error(
                "prior",
                format!("Prior must be a non-negative number, got {}", template.prior),
            );
        }
    }

    fn validate_demographics(template: &DiseaseTemplate, result: &mut ValidationResult) {
        let demographics = &template.demographics;
        check_gaussian("demographics.age", &demographics.age, result);
        check_categories(
            "demographics.sex_distribution",
            &demographics.sex_distribution,
            result,
        );
        check_categories(
            "demographics.race_distribution",
            &demographics.race_distribution,
            result,
        );
    }

    fn validate_symptoms(template: &DiseaseTemplate, result: &mut ValidationResult) {
        for (name, symptom) in &template.symptoms {
            if !is_probability(symptom.probability) {
                result.add_error(
                    format!("symptoms.{}.probability", name),
                    format!(
                        "Symptom probability must lie in [0, 1], got {}",
                        symptom.probability
                    ),
                );
            }
        }
    }

    fn validate_vitals(template: &DiseaseTemplate, result: &mut ValidationResult) {
        for (name, params) in &template.vitals {
            check_gaussian(&format!("vitals.{}", name), params, result);
        }
    }

    fn validate_tests(template: &DiseaseTemplate, result: &mut ValidationResult) {
        if template.diagnostic_tests.is_empty() {
            result.add_warning(
                "diagnostic_tests",
                format!("'{}' defines no diagnostic tests", template.name),
            );
        }

        for (name, test) in &template.diagnostic_tests {
            match test {
                DiagnosticTest::Binary(c) => {
                    check_characteristics(&format!("diagnostic_tests.{}", name), c, result)
                }
                DiagnosticTest::MultiFinding(findings) => {
                    for (finding, c) in findings {
                        check_characteristics(
                            &format!("diagnostic_tests.{}.{}", name, finding),
                            c,
                            result,
                        );
                    }
                }
            }
        }
    }
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

fn check_gaussian(field: &str, params: &GaussianParams, result: &mut ValidationResult) {
    if !params.mean.is_finite() {
        result.add_error(format!("{}.mean", field), "Mean must be finite");
    }
    if !params.std.is_finite() || params.std <= 0.0 {
        result.add_error(
            format!("{}.std", field),
            format!("Standard deviation must be positive, got {}", params.std),
        );
    }
}

fn check_categories(field: &str, weights: &BTreeMap<String, f64>, result: &mut ValidationResult) {
    if weights.is_empty() {
        result.add_error(field, "Distribution must list at least one category");
        return;
    }

    if let Some((category, weight)) = weights.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
        result.add_error(
            format!("{}.{}", field, category),
            format!("Category weight must be non-negative, got {}", weight),
        );
        return;
    }

    let total: f64 = weights.values().sum();
    if total <= 0.0 {
        result.add_error(field, "Category weights sum to zero");
    } else if (total - 1.0).abs() > 1e-6 {
        result.add_warning(
            field,
            format!("Category weights sum to {:.4}; they will be normalized", total),
        );
    }
}

fn check_characteristics(field: &str, c: &TestCharacteristics, result: &mut ValidationResult) {
    if !is_probability(c.sensitivity) {
        result.add_error(
            format!("{}.sensitivity", field),
            format!("Sensitivity must lie in [0, 1], got {}", c.sensitivity),
        );
    }
    if !is_probability(c.specificity) {
        result.add_error(
            format!("{}.specificity", field),
            format!("Specificity must lie in [0, 1], got {}", c.specificity),
        );
    }
}
