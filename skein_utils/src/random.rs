use std::collections::BTreeMap;

use rand::Rng;

/// Draw an index from a set of unnormalized log weights.
///
/// Weights of `-inf` are never drawn.
///
/// # Panics
///
/// Panics if `ln_weights` is empty or if no weight is finite.
pub fn ln_pflip<R: Rng>(ln_weights: &[f64], rng: &mut R) -> usize {
    if ln_weights.is_empty() {
        panic!("Empty container");
    }

    let maxval = ln_weights
        .iter()
        .copied()
        .fold(std::f64::NEG_INFINITY, f64::max);

    if !maxval.is_finite() {
        panic!("Could not draw from {:?}", ln_weights);
    }

    // doing this instead of exp-ing and calling a cumsum shaves a pass off the
    // weights.
    let mut weights: Vec<f64> =
        ln_weights.iter().map(|w| (w - maxval).exp()).collect();
    for ix in 1..weights.len() {
        weights[ix] += weights[ix - 1];
    }

    let scale = weights[weights.len() - 1];
    let r = rng.gen::<f64>() * scale;

    match weights.iter().position(|&w| w > r) {
        Some(ix) => ix,
        // r can only miss due to rounding at the top end, in which case we
        // take the last entry that carries any weight.
        None => ln_weights
            .iter()
            .rposition(|w| w.is_finite())
            .unwrap_or(ln_weights.len() - 1),
    }
}

/// Draw a key from a map of unnormalized log weights.
///
/// Returns `None` if the map is empty.
pub fn ln_pflip_key<K, R>(
    ln_weights: &BTreeMap<K, f64>,
    rng: &mut R,
) -> Option<K>
where
    K: Clone,
    R: Rng,
{
    if ln_weights.is_empty() {
        return None;
    }
    let values: Vec<f64> = ln_weights.values().copied().collect();
    let ix = ln_pflip(&values, rng);
    ln_weights.keys().nth(ix).cloned()
}

/// Choose one key of a map uniformly at random, ignoring the values.
///
/// Returns `None` if the map is empty.
pub fn choose_key<K, V, R>(map: &BTreeMap<K, V>, rng: &mut R) -> Option<K>
where
    K: Clone,
    R: Rng,
{
    if map.is_empty() {
        None
    } else {
        let ix = rng.gen_range(0..map.len());
        map.keys().nth(ix).cloned()
    }
}
