use crate::entities::case::{Demographics, Distribution, TestOutcome, TestResult};
use crate::entities::catalog::DiseaseCatalog;
use crate::inference::evidence::Evidence;
use crate::math::gaussian::normal_pdf;
use dx_template::{DiagnosticTest, DiseaseTemplate, TestCharacteristics};
use std::collections::BTreeMap;

/// Characteristics assumed for a test a disease does not define: a
/// near-impossible cross-reaction.
pub const FALLBACK_CHARACTERISTICS: TestCharacteristics = TestCharacteristics::new(0.01, 0.99);

/// Per-disease likelihood of observed evidence, P(evidence | disease).
///
/// Categories are scored independently and multiplied (naive Bayes).
/// Observations a disease does not model (a symptom or vital missing from
/// its template) contribute a factor of 1.
pub struct LikelihoodEngine<'a> {
    catalog: &'a DiseaseCatalog,
    fallback: TestCharacteristics,
}

impl<'a> LikelihoodEngine<'a> {
    pub fn new(catalog: &'a DiseaseCatalog) -> Self {
        Self {
            catalog,
            fallback: FALLBACK_CHARACTERISTICS,
        }
    }

    pub fn with_fallback(mut self, fallback: TestCharacteristics) -> Self {
        self.fallback = fallback;
        self
    }

    /// Age density times the probabilities of the observed sex and race.
    pub fn likelihood_of_demographics(&self, demographics: &Demographics) -> Distribution {
        self.per_disease(|disease| demographics_factor(disease, demographics))
    }

    pub fn likelihood_of_symptoms(&self, symptoms: &BTreeMap<String, bool>) -> Distribution {
        self.per_disease(|disease| symptoms_factor(disease, symptoms))
    }

    pub fn likelihood_of_vitals(&self, vitals: &BTreeMap<String, f64>) -> Distribution {
        self.per_disease(|disease| vitals_factor(disease, vitals))
    }

    pub fn likelihood_of_test(&self, test_name: &str, result: &TestResult) -> Distribution {
        self.per_disease(|disease| self.test_factor(disease, test_name, result))
    }

    /// Product of the likelihoods of every category present in `evidence`.
    /// Empty evidence scores 1 for every disease.
    pub fn likelihood_of_evidence_batch(&self, evidence: &Evidence) -> Distribution {
        self.per_disease(|disease| {
            let mut likelihood = 1.0;
            if let Some(demographics) = &evidence.demographics {
                likelihood *= demographics_factor(disease, demographics);
            }
            likelihood *= symptoms_factor(disease, &evidence.symptoms);
            likelihood *= vitals_factor(disease, &evidence.vitals);
            for (test_name, result) in &evidence.tests {
                likelihood *= self.test_factor(disease, test_name, result);
            }
            likelihood
        })
    }

    fn per_disease(&self, f: impl Fn(&DiseaseTemplate) -> f64) -> Distribution {
        self.catalog
            .iter()
            .map(|disease| (disease.name.clone(), f(disease)))
            .collect()
    }

    fn test_factor(&self, disease: &DiseaseTemplate, test_name: &str, result: &TestResult) -> f64 {
        match (disease.test(test_name), result) {
            (Some(DiagnosticTest::Binary(c)), TestResult::Binary(outcome)) => {
                binary_factor(*c, *outcome)
            }
            (Some(DiagnosticTest::MultiFinding(findings)), TestResult::Findings(_)) => findings
                .iter()
                .map(|(finding, c)| finding_factor(*c, result.has_finding(finding)))
                .product(),
            (None, TestResult::Findings(_)) => self
                .catalog
                .findings_for(test_name)
                .iter()
                .map(|finding| finding_factor(self.fallback, result.has_finding(finding)))
                .product(),
            // Missing definition, or a result whose shape does not match this
            // disease's definition: score it as a cross-reaction.
            _ => binary_factor(self.fallback, TestOutcome::from_bool(result.is_positive())),
        }
    }
}

fn demographics_factor(disease: &DiseaseTemplate, demographics: &Demographics) -> f64 {
    let model = &disease.demographics;
    normal_pdf(demographics.age as f64, model.age)
        * model.sex_probability(&demographics.sex)
        * model.race_probability(&demographics.race)
}

fn symptoms_factor(disease: &DiseaseTemplate, symptoms: &BTreeMap<String, bool>) -> f64 {
    symptoms
        .iter()
        .filter_map(|(symptom, &present)| {
            let p = disease.symptom_probability(symptom)?;
            Some(if present { p } else { 1.0 - p })
        })
        .product()
}

fn vitals_factor(disease: &DiseaseTemplate, vitals: &BTreeMap<String, f64>) -> f64 {
    vitals
        .iter()
        .filter_map(|(vital, &value)| disease.vitals.get(vital).map(|p| normal_pdf(value, *p)))
        .product()
}

fn binary_factor(c: TestCharacteristics, outcome: TestOutcome) -> f64 {
    match outcome {
        TestOutcome::Positive => c.sensitivity,
        TestOutcome::Negative => 1.0 - c.specificity,
    }
}

fn finding_factor(c: TestCharacteristics, present: bool) -> f64 {
    if present {
        c.sensitivity
    } else {
        1.0 - c.specificity
    }
}
