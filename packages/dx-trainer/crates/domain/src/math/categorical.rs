use rand::distributions::{Distribution as _, WeightedIndex};
use rand::Rng;
use std::collections::BTreeMap;

/// Weighted draw of one key from `weights`.
///
/// Returns `None` when no draw is possible (empty map, negative or
/// all-zero weights).
pub fn sample_key<'a, R: Rng + ?Sized>(
    weights: &'a BTreeMap<String, f64>,
    rng: &mut R,
) -> Option<&'a str> {
    let index = WeightedIndex::<f64>::new(weights.values()).ok()?;
    weights
        .keys()
        .nth(index.sample(rng))
        .map(String::as_str)
}
