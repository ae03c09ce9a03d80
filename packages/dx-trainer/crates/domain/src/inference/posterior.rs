use crate::entities::case::{Case, Distribution};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("prior and likelihood diseases differ (no likelihood for {missing:?}, no prior for {unexpected:?})")]
pub struct KeyMismatchError {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

/// Bayes' rule over a finite set of disease hypotheses.
pub struct PosteriorUpdater;

impl PosteriorUpdater {
    /// `posterior[d] = prior[d] * likelihood[d] / Z`.
    ///
    /// When `Z == 0` (no disease is compatible with the evidence) every
    /// posterior is 0. Callers must treat that as "no disease fits" rather
    /// than as a distribution.
    pub fn apply(
        priors: &Distribution,
        likelihoods: &Distribution,
    ) -> Result<Distribution, KeyMismatchError> {
        Self::check_keys(priors, likelihoods)?;

        let unnormalized: Distribution = priors
            .iter()
            .map(|(disease, prior)| (disease.clone(), prior * likelihoods[disease]))
            .collect();

        let total: f64 = unnormalized.values().sum();
        if total == 0.0 {
            tracing::warn!("Evidence is incompatible with every disease; posterior is all zero");
            return Ok(priors.keys().map(|d| (d.clone(), 0.0)).collect());
        }

        Ok(unnormalized
            .into_iter()
            .map(|(disease, p)| (disease, p / total))
            .collect())
    }

    /// Fold `likelihoods` into the case's running distribution.
    pub fn update_case(case: &mut Case, likelihoods: &Distribution) -> Result<(), KeyMismatchError> {
        case.probabilities = Self::apply(&case.probabilities, likelihoods)?;
        Ok(())
    }

    fn check_keys(priors: &Distribution, likelihoods: &Distribution) -> Result<(), KeyMismatchError> {
        let missing: Vec<String> = priors
            .keys()
            .filter(|d| !likelihoods.contains_key(*d))
            .cloned()
            .collect();
        let unexpected: Vec<String> = likelihoods
            .keys()
            .filter(|d| !priors.contains_key(*d))
            .cloned()
            .collect();

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(KeyMismatchError {
                missing,
                unexpected,
            })
        }
    }
}

/// Whether every probability is zero (contradictory evidence).
pub fn is_degenerate(distribution: &Distribution) -> bool {
    distribution.values().all(|&p| p == 0.0)
}

/// Diseases by descending probability, ties broken by name.
pub fn ranked(distribution: &Distribution) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = distribution
        .iter()
        .map(|(name, &p)| (name.as_str(), p))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

/// Most probable disease, or `None` when the distribution is degenerate.
pub fn most_likely(distribution: &Distribution) -> Option<(&str, f64)> {
    if is_degenerate(distribution) {
        return None;
    }
    ranked(distribution).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn dist(pairs: &[(&str, f64)]) -> Distribution {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_posterior_sums_to_one() {
        let priors = dist(&[("a", 0.2), ("b", 0.3), ("c", 0.5)]);
        let likelihoods = dist(&[("a", 0.9), ("b", 0.01), ("c", 0.4)]);

        let posterior = PosteriorUpdater::apply(&priors, &likelihoods).unwrap();

        assert_abs_diff_eq!(posterior.values().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(posterior["a"], 0.18 / 0.383, epsilon = 1e-12);
    }

    #[test]
    fn test_all_zero_likelihoods_give_all_zero_posterior() {
        let priors = dist(&[("a", 0.5), ("b", 0.5)]);
        let likelihoods = dist(&[("a", 0.0), ("b", 0.0)]);

        let posterior = PosteriorUpdater::apply(&priors, &likelihoods).unwrap();

        assert_eq!(posterior, dist(&[("a", 0.0), ("b", 0.0)]));
        assert!(is_degenerate(&posterior));
        assert_eq!(most_likely(&posterior), None);
    }

    #[test]
    fn test_key_mismatch() {
        let priors = dist(&[("a", 0.5), ("b", 0.5)]);
        let likelihoods = dist(&[("a", 1.0), ("c", 1.0)]);

        let err = PosteriorUpdater::apply(&priors, &likelihoods).unwrap_err();
        assert_eq!(err.missing, vec!["b".to_string()]);
        assert_eq!(err.unexpected, vec!["c".to_string()]);
    }

    #[test]
    fn test_ranking() {
        let d = dist(&[("b", 0.25), ("a", 0.25), ("c", 0.5)]);
        assert_eq!(ranked(&d), vec![("c", 0.5), ("a", 0.25), ("b", 0.25)]);
        assert_eq!(most_likely(&d), Some(("c", 0.5)));
    }
}
