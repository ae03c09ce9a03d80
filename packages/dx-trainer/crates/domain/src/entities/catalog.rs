use crate::entities::case::Distribution;
use dx_template::{DiseaseTemplate, TemplateValidator};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogLoadError {
    #[error("catalog contains no disease templates")]
    Empty,

    #[error("duplicate disease name '{0}'")]
    DuplicateName(String),

    #[error("invalid template '{name}': {field}: {message}")]
    InvalidTemplate {
        name: String,
        field: String,
        message: String,
    },

    #[error("failed to read template {origin}: {message}")]
    Unreadable { origin: String, message: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidCatalogError {
    #[error("disease priors sum to zero; no disease can be sampled")]
    ZeroTotalPrior,
}

/// Immutable, ordered collection of disease templates.
///
/// Built once and then shared read-only; lookups by name are O(1), both
/// exact and case-insensitive.
#[derive(Debug, Clone)]
pub struct DiseaseCatalog {
    templates: Vec<DiseaseTemplate>,
    by_name: HashMap<String, usize>,
    by_lowercase: HashMap<String, usize>,
}

impl DiseaseCatalog {
    /// Build a catalog, validating every template and rejecting name
    /// collisions (including ones that differ only by case).
    pub fn new(
        templates: impl IntoIterator<Item = DiseaseTemplate>,
    ) -> Result<Self, CatalogLoadError> {
        let templates: Vec<DiseaseTemplate> = templates.into_iter().collect();
        if templates.is_empty() {
            return Err(CatalogLoadError::Empty);
        }

        let mut by_name = HashMap::with_capacity(templates.len());
        let mut by_lowercase = HashMap::with_capacity(templates.len());

        for (idx, template) in templates.iter().enumerate() {
            let validation = TemplateValidator::validate(template);
            if let Some(issue) = validation.errors().next() {
                return Err(CatalogLoadError::InvalidTemplate {
                    name: template.name.clone(),
                    field: issue.field.clone(),
                    message: issue.message.clone(),
                });
            }
            for warning in validation.warnings() {
                tracing::warn!(
                    disease = %template.name,
                    field = %warning.field,
                    "{}",
                    warning.message
                );
            }

            if by_name.insert(template.name.clone(), idx).is_some()
                || by_lowercase
                    .insert(template.name.to_lowercase(), idx)
                    .is_some()
            {
                return Err(CatalogLoadError::DuplicateName(template.name.clone()));
            }
        }

        tracing::debug!("Built disease catalog with {} templates", templates.len());

        Ok(Self {
            templates,
            by_name,
            by_lowercase,
        })
    }

    pub fn get(&self, name: &str) -> Option<&DiseaseTemplate> {
        self.by_name.get(name).map(|&idx| &self.templates[idx])
    }

    pub fn get_ignore_case(&self, name: &str) -> Option<&DiseaseTemplate> {
        self.by_lowercase
            .get(&name.to_lowercase())
            .map(|&idx| &self.templates[idx])
    }

    pub fn templates(&self) -> &[DiseaseTemplate] {
        &self.templates
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiseaseTemplate> {
        self.templates.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Priors rescaled to sum to 1. The templates are left untouched.
    pub fn normalized_priors(&self) -> Result<Distribution, InvalidCatalogError> {
        let total: f64 = self.templates.iter().map(|t| t.prior).sum();
        if total <= 0.0 {
            return Err(InvalidCatalogError::ZeroTotalPrior);
        }

        Ok(self
            .templates
            .iter()
            .map(|t| (t.name.clone(), t.prior / total))
            .collect())
    }

    /// Uniform distribution over every disease in the catalog.
    pub fn uniform(&self) -> Distribution {
        let p = 1.0 / self.templates.len() as f64;
        self.names().map(|name| (name.to_string(), p)).collect()
    }

    /// Whether any disease defines `test_name`.
    pub fn defines_test(&self, test_name: &str) -> bool {
        self.templates
            .iter()
            .any(|t| t.diagnostic_tests.contains_key(test_name))
    }

    /// Every test name defined by at least one disease, sorted.
    pub fn available_tests(&self) -> Vec<String> {
        let tests: BTreeSet<&String> = self
            .templates
            .iter()
            .flat_map(|t| t.diagnostic_tests.keys())
            .collect();
        tests.into_iter().cloned().collect()
    }

    /// Union of the finding names any disease defines for `test_name`.
    pub fn findings_for(&self, test_name: &str) -> BTreeSet<String> {
        self.templates
            .iter()
            .filter_map(|t| t.test(test_name))
            .flat_map(|test| test.finding_names())
            .map(str::to_string)
            .collect()
    }
}
