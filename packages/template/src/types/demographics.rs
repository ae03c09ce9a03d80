use crate::GaussianParams;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Demographic profile of patients with a given disease.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DemographicsModel {
    /// Age in years.
    pub age: GaussianParams,

    /// Category weight per sex (e.g. `male`, `female`).
    pub sex_distribution: BTreeMap<String, f64>,

    /// Category weight per race.
    pub race_distribution: BTreeMap<String, f64>,
}

impl DemographicsModel {
    /// Probability of `sex` after normalizing the sex weights.
    pub fn sex_probability(&self, sex: &str) -> f64 {
        category_probability(&self.sex_distribution, sex)
    }

    /// Probability of `race` after normalizing the race weights.
    pub fn race_probability(&self, race: &str) -> f64 {
        category_probability(&self.race_distribution, race)
    }
}

/// Normalized weight of `key` in `weights`. Unknown categories and
/// all-zero distributions give 0.
pub fn category_probability(weights: &BTreeMap<String, f64>, key: &str) -> f64 {
    let total: f64 = weights.values().sum();
    if total <= 0.0 {
        return 0.0;
    }
    weights.get(key).map_or(0.0, |w| w / total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_category_probability_normalizes() {
        let w = weights(&[("male", 3.0), ("female", 1.0)]);
        assert_eq!(category_probability(&w, "male"), 0.75);
        assert_eq!(category_probability(&w, "female"), 0.25);
    }

    #[test]
    fn test_unknown_category_is_zero() {
        let w = weights(&[("male", 0.5), ("female", 0.5)]);
        assert_eq!(category_probability(&w, "other"), 0.0);
        assert_eq!(category_probability(&BTreeMap::new(), "male"), 0.0);
    }
}
