use crate::entities::case::{Case, Demographics};
use crate::entities::catalog::{DiseaseCatalog, InvalidCatalogError};
use crate::math::categorical::sample_key;
use crate::math::gaussian::sample_normal;
use dx_template::DiseaseTemplate;
use rand::Rng;
use std::collections::BTreeMap;

/// Samples a hidden disease from the population prior and synthesizes a
/// patient presentation from its template.
pub struct CaseGenerator;

impl CaseGenerator {
    /// Draw a fresh case.
    ///
    /// `probabilities` starts at the normalized prior; the presentation is
    /// not folded in here.
    pub fn generate<R: Rng + ?Sized>(
        catalog: &DiseaseCatalog,
        rng: &mut R,
    ) -> Result<Case, InvalidCatalogError> {
        let priors = catalog.normalized_priors()?;
        let disease = Self::sample_disease(catalog, &priors, rng)?;

        tracing::debug!(disease = %disease.name, "Sampled hidden disease");

        Ok(Case {
            hidden_disease: disease.name.clone(),
            probabilities: priors,
            demographics: Self::synthesize_demographics(disease, rng),
            symptoms: Self::synthesize_symptoms(disease, rng),
            vitals: Self::synthesize_vitals(disease, rng),
            test_results: BTreeMap::new(),
        })
    }

    fn sample_disease<'c, R: Rng + ?Sized>(
        catalog: &'c DiseaseCatalog,
        priors: &BTreeMap<String, f64>,
        rng: &mut R,
    ) -> Result<&'c DiseaseTemplate, InvalidCatalogError> {
        sample_key(priors, rng)
            .and_then(|name| catalog.get(name))
            .ok_or(InvalidCatalogError::ZeroTotalPrior)
    }

    /// Age ~ Normal, clamped at 0 and rounded; sex and race are weighted draws.
    pub fn synthesize_demographics<R: Rng + ?Sized>(
        disease: &DiseaseTemplate,
        rng: &mut R,
    ) -> Demographics {
        let model = &disease.demographics;
        let age = sample_normal(rng, model.age).round().max(0.0) as u32;

        // Catalog validation rejects empty and all-zero distributions.
        let sex = sample_key(&model.sex_distribution, rng).unwrap_or_default();
        let race = sample_key(&model.race_distribution, rng).unwrap_or_default();

        Demographics {
            age,
            sex: sex.to_string(),
            race: race.to_string(),
        }
    }

    /// One independent Bernoulli draw per modelled symptom.
    pub fn synthesize_symptoms<R: Rng + ?Sized>(
        disease: &DiseaseTemplate,
        rng: &mut R,
    ) -> BTreeMap<String, bool> {
        disease
            .symptoms
            .iter()
            .map(|(name, model)| (name.clone(), rng.gen::<f64>() < model.probability))
            .collect()
    }

    /// One Gaussian draw per modelled vital, rounded to an integer.
    pub fn synthesize_vitals<R: Rng + ?Sized>(
        disease: &DiseaseTemplate,
        rng: &mut R,
    ) -> BTreeMap<String, i64> {
        disease
            .vitals
            .iter()
            .map(|(name, params)| (name.clone(), sample_normal(rng, *params).round() as i64))
            .collect()
    }
}
