use std::collections::BTreeMap;
use std::f64::NEG_INFINITY;
use std::fmt::Debug;
use std::mem::swap;

use thiserror::Error;

pub trait MinMax {
    type Inner: PartialOrd;
    /// Simultaneously compute the min and max of items in an Iterator. Returns
    /// `None` if the iterator is empty.
    fn minmax(&mut self) -> Option<(Self::Inner, Self::Inner)>;
}

impl<T> MinMax for T
where
    T: Iterator,
    T::Item: PartialOrd + Clone,
{
    type Inner = T::Item;
    fn minmax(&mut self) -> Option<(Self::Inner, Self::Inner)> {
        let mut min = self.next()?;

        let mut max = if let Some(item) = self.next() {
            item
        } else {
            return Some((min.clone(), min));
        };

        if min > max {
            swap(&mut min, &mut max);
        }

        for item in self {
            if item > max {
                max = item;
            } else if item < min {
                min = item;
            }
        }
        Some((min, max))
    }
}

/// Numerically stable `log(sum(exp(xs))`
///
/// Entries equal to `-inf` contribute nothing to the sum. An empty slice, or a
/// slice of only `-inf`, yields `-inf` rather than `NaN`.
///
/// # Example
///
/// ```rust
/// # use skein_utils::logsumexp;
/// let xs = [0.0_f64.ln(), 0.5_f64.ln(), 0.5_f64.ln()];
/// assert!(logsumexp(&xs).abs() < 1E-12);
/// ```
#[inline]
pub fn logsumexp(xs: &[f64]) -> f64 {
    if xs.len() == 1 {
        return xs[0];
    }

    let maxval = xs.iter().fold(NEG_INFINITY, |acc, &x| {
        if x > acc || x.is_nan() {
            x
        } else {
            acc
        }
    });

    if maxval == NEG_INFINITY {
        NEG_INFINITY
    } else if maxval.is_nan() || maxval.is_infinite() {
        maxval
    } else {
        xs.iter()
            .fold(0.0_f64, |acc, x| acc + (x - maxval).exp())
            .ln()
            + maxval
    }
}

/// Normalize a map of log weights so that the weights sum to one in linear
/// space.
///
/// If every weight is `-inf` there is nothing to normalize against and the
/// weights are returned unchanged.
pub fn ln_normalize<K>(ln_weights: &BTreeMap<K, f64>) -> BTreeMap<K, f64>
where
    K: Ord + Clone,
{
    let values: Vec<f64> = ln_weights.values().copied().collect();
    let z = logsumexp(&values);
    if z == NEG_INFINITY {
        return ln_weights.clone();
    }
    ln_weights
        .iter()
        .map(|(key, &w)| (key.clone(), w - z))
        .collect()
}

/// The two maps handed to [`merge_add`] did not have identical key sets
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("cannot merge log-weight maps: key sets differ ({left} keys vs {right} keys)")]
pub struct KeyMismatchError {
    pub left: usize,
    pub right: usize,
}

/// Add two log-weight maps element-wise.
///
/// Both maps must have exactly the same keys; a key present in only one of
/// them is an error rather than being silently dropped or passed through.
///
/// # Example
///
/// ```rust
/// # use skein_utils::merge_add;
/// # use std::collections::BTreeMap;
/// let a: BTreeMap<&str, f64> = [("x", 1.0), ("y", 2.0)].into_iter().collect();
/// let b: BTreeMap<&str, f64> = [("x", 0.5), ("y", -1.0)].into_iter().collect();
///
/// let c = merge_add(&a, &b).unwrap();
/// assert_eq!(c["x"], 1.5);
/// assert_eq!(c["y"], 1.0);
///
/// let d: BTreeMap<&str, f64> = [("x", 0.5)].into_iter().collect();
/// assert!(merge_add(&a, &d).is_err());
/// ```
pub fn merge_add<K>(
    left: &BTreeMap<K, f64>,
    right: &BTreeMap<K, f64>,
) -> Result<BTreeMap<K, f64>, KeyMismatchError>
where
    K: Ord + Clone + Debug,
{
    let mismatch = || KeyMismatchError {
        left: left.len(),
        right: right.len(),
    };

    if left.len() != right.len() {
        return Err(mismatch());
    }

    left.iter()
        .map(|(key, &a)| {
            right
                .get(key)
                .map(|&b| (key.clone(), a + b))
                .ok_or_else(mismatch)
        })
        .collect()
}

/// `n` evenly spaced points from `a` to `b`, inclusive
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let step = (b - a) / (n - 1) as f64;
            (0..n).map(|ix| (ix as f64).mul_add(step, a)).collect()
        }
    }
}

/// `n` points from `a` to `b`, inclusive, evenly spaced in log space.
///
/// `a` and `b` must be positive.
pub fn log_linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    linspace(a.ln(), b.ln(), n)
        .iter()
        .map(|x| x.exp())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::*;
    use maplit::btreemap;

    const TOL: f64 = 1E-10;

    // minmax
    // ------
    #[test]
    fn minmax_should_copy_the_entry_for_a_single_element_iter() {
        let (a, b) = vec![1_u8].into_iter().minmax().unwrap();

        assert_eq!(a, 1);
        assert_eq!(b, 1);
    }

    #[test]
    fn minmax_on_reverse_unique_iter() {
        let xs: Vec<f64> = vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0];
        let (a, b) = xs.iter().copied().minmax().unwrap();

        assert_eq!(a, 0.0);
        assert_eq!(b, 5.0);
    }

    #[test]
    fn minmax_on_empty_is_none() {
        let xs: Vec<f64> = Vec::new();
        assert!(xs.iter().minmax().is_none());
    }

    // logsumexp
    // ---------
    #[test]
    fn logsumexp_on_vector_of_zeros() {
        let xs: Vec<f64> = vec![0.0; 5];
        // should be about log(5)
        assert_relative_eq!(
            logsumexp(&xs),
            1.609_437_912_434_100_3,
            epsilon = TOL
        );
    }

    #[test]
    fn logsumexp_on_random_values() {
        let xs: Vec<f64> = vec![
            0.304_153_86,
            -0.070_722_96,
            -1.042_870_19,
            0.278_554_07,
            -0.818_967_65,
        ];
        assert_relative_eq!(
            logsumexp(&xs),
            1.482_000_789_426_305_9,
            epsilon = TOL
        );
    }

    #[test]
    fn logsumexp_returns_only_value_on_one_element_container() {
        let xs: Vec<f64> = vec![0.304_153_86];
        assert_relative_eq!(logsumexp(&xs), 0.304_153_86, epsilon = TOL);
    }

    #[test]
    fn logsumexp_ignores_neg_infinity_entries() {
        let xs: Vec<f64> = vec![NEG_INFINITY, 0.0, NEG_INFINITY, 0.0];
        assert_relative_eq!(logsumexp(&xs), 2_f64.ln(), epsilon = TOL);
    }

    #[test]
    fn logsumexp_of_all_neg_infinity_is_neg_infinity() {
        let xs: Vec<f64> = vec![NEG_INFINITY; 3];
        assert_eq!(logsumexp(&xs), NEG_INFINITY);
    }

    #[test]
    fn logsumexp_on_empty_is_neg_infinity() {
        let xs: Vec<f64> = Vec::new();
        assert_eq!(logsumexp(&xs), NEG_INFINITY);
    }

    // ln_normalize
    // ------------
    #[test]
    fn ln_normalize_sums_to_one() {
        let weights = btreemap! {
            "a" => 1_f64.ln(),
            "b" => 3_f64.ln(),
        };
        let normed = ln_normalize(&weights);
        assert_relative_eq!(normed["a"].exp(), 0.25, epsilon = TOL);
        assert_relative_eq!(normed["b"].exp(), 0.75, epsilon = TOL);
    }

    #[test]
    fn ln_normalize_keeps_neg_infinity() {
        let weights = btreemap! {
            0 => NEG_INFINITY,
            1 => -3.0,
        };
        let normed = ln_normalize(&weights);
        assert_eq!(normed[&0], NEG_INFINITY);
        assert_relative_eq!(normed[&1], 0.0, epsilon = TOL);
    }

    #[test]
    fn ln_normalize_all_neg_infinity_is_unchanged() {
        let weights = btreemap! {
            0 => NEG_INFINITY,
            1 => NEG_INFINITY,
        };
        assert_eq!(ln_normalize(&weights), weights);
    }

    // merge_add
    // ---------
    #[test]
    fn merge_add_with_different_keys_of_same_size_fails() {
        let a = btreemap! { 0 => 1.0, 1 => 2.0 };
        let b = btreemap! { 0 => 1.0, 2 => 2.0 };
        assert_eq!(
            merge_add(&a, &b),
            Err(KeyMismatchError { left: 2, right: 2 })
        );
    }

    #[test]
    fn merge_add_propagates_neg_infinity() {
        let a = btreemap! { 0 => NEG_INFINITY, 1 => -1.0 };
        let b = btreemap! { 0 => -2.0, 1 => -1.0 };
        let c = merge_add(&a, &b).unwrap();
        assert_eq!(c[&0], NEG_INFINITY);
        assert_eq!(c[&1], -2.0);
    }

    // linspace
    // --------
    #[test]
    fn linspace_includes_endpoints() {
        let xs = linspace(-1.0, 1.0, 5);
        assert_eq!(xs.len(), 5);
        assert_relative_eq!(xs[0], -1.0, epsilon = TOL);
        assert_relative_eq!(xs[2], 0.0, epsilon = TOL);
        assert_relative_eq!(xs[4], 1.0, epsilon = TOL);
    }

    #[test]
    fn linspace_with_one_point_is_start() {
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(2.0, 3.0, 0).is_empty());
    }

    #[test]
    fn log_linspace_is_geometric() {
        let xs = log_linspace(1.0, 100.0, 3);
        assert_relative_eq!(xs[0], 1.0, epsilon = TOL);
        assert_relative_eq!(xs[1], 10.0, epsilon = 1E-8);
        assert_relative_eq!(xs[2], 100.0, epsilon = 1E-8);
    }
}
