//! Hyperparameters of the primitive models and the grids used to search over
//! them.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skein_consts::*;
use skein_data::Datum;
use skein_utils::{linspace, log_linspace, MinMax};

use crate::StatType;

/// Prior parameters shared by every category of a column.
///
/// Each variant uses the parameterization of the conjugate prior backing the
/// corresponding primitive model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Hyperparameters {
    /// Beta(alpha, beta) on the success probability
    Bernoulli { alpha: f64, beta: f64 },
    /// Symmetric Dirichlet(alpha) on the category weights. The number of
    /// categories comes from the column metadata.
    Categorical { alpha: f64 },
    /// Normal inverse chi-squared(m, k, v, s2) on the mean and variance
    Gaussian { m: f64, k: f64, v: f64, s2: f64 },
    /// Gamma(shape, rate) on the Poisson rate
    Count { shape: f64, rate: f64 },
}

impl Hyperparameters {
    /// The default hyperparameters for a stattype
    pub fn default_for(stattype: StatType) -> Self {
        match stattype {
            StatType::Bernoulli => Self::Bernoulli {
                alpha: DEFAULT_BERNOULLI_ALPHA,
                beta: DEFAULT_BERNOULLI_BETA,
            },
            StatType::Categorical => Self::Categorical {
                alpha: DEFAULT_CATEGORICAL_ALPHA,
            },
            StatType::Gaussian => Self::Gaussian {
                m: DEFAULT_GAUSSIAN_M,
                k: DEFAULT_GAUSSIAN_K,
                v: DEFAULT_GAUSSIAN_V,
                s2: DEFAULT_GAUSSIAN_S2,
            },
            StatType::Count => Self::Count {
                shape: DEFAULT_COUNT_SHAPE,
                rate: DEFAULT_COUNT_RATE,
            },
        }
    }

    /// The stattype these hyperparameters parameterize
    pub fn stattype(&self) -> StatType {
        match self {
            Self::Bernoulli { .. } => StatType::Bernoulli,
            Self::Categorical { .. } => StatType::Categorical,
            Self::Gaussian { .. } => StatType::Gaussian,
            Self::Count { .. } => StatType::Count,
        }
    }
}

/// Candidate values for each hyperparameter, keyed by hyperparameter name.
///
/// Computed once from a column's initial data and never updated.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct HyperGrid(BTreeMap<String, Vec<f64>>);

impl HyperGrid {
    /// Build the grid for `stattype` from the observed values in `xs`.
    /// Missing values are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// # use skein_stats::{HyperGrid, StatType};
    /// # use skein_data::Datum;
    /// let xs = vec![Datum::Binary(true), Datum::Missing, Datum::Binary(false)];
    /// let grid = HyperGrid::from_data(StatType::Bernoulli, &xs, 10);
    ///
    /// assert_eq!(grid.get("alpha").unwrap().len(), 10);
    /// assert_eq!(grid.get("beta").unwrap().len(), 10);
    /// assert!(grid.get("m").is_none());
    /// ```
    pub fn from_data(stattype: StatType, xs: &[Datum], n_grid: usize) -> Self {
        let present: Vec<&Datum> =
            xs.iter().filter(|x| !x.is_missing()).collect();
        let n = present.len().max(1) as f64;

        let mut grid = BTreeMap::new();
        match stattype {
            StatType::Bernoulli => {
                let axis = log_linspace(0.5, n, n_grid);
                grid.insert(String::from("alpha"), axis.clone());
                grid.insert(String::from("beta"), axis);
            }
            StatType::Categorical => {
                grid.insert(
                    String::from("alpha"),
                    log_linspace(n.recip(), n, n_grid),
                );
            }
            StatType::Gaussian => {
                let values: Vec<f64> =
                    present.iter().filter_map(|x| x.to_f64_opt()).collect();
                let (min, max) =
                    values.iter().copied().minmax().unwrap_or((0.0, 0.0));
                let ssqdev = sum_sq_dev(&values);
                let spread = 1.5 * ssqdev.sqrt();

                grid.insert(
                    String::from("m"),
                    linspace(min - spread, max + spread, n_grid),
                );
                grid.insert(
                    String::from("k"),
                    log_linspace(n.recip(), n, n_grid),
                );
                grid.insert(String::from("v"), log_linspace(1.0, n, n_grid));
                grid.insert(
                    String::from("s2"),
                    log_linspace(ssqdev / (100.0 * n), ssqdev / n, n_grid),
                );
            }
            StatType::Count => {
                let axis = log_linspace(n.recip(), n, n_grid);
                grid.insert(String::from("shape"), axis.clone());
                grid.insert(String::from("rate"), axis);
            }
        }
        HyperGrid(grid)
    }

    /// The candidate values for the hyperparameter `name`
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.0.get(name).map(|axis| axis.as_slice())
    }

    /// The names of the hyperparameters in the grid
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|name| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sum of squared deviations from the mean. Degenerate data (none, or all
/// equal) gets a unit spread so that grids stay strictly positive.
fn sum_sq_dev(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 1.0;
    }
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    let ssqdev = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>();
    if ssqdev > 0.0 && ssqdev.is_finite() {
        ssqdev
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::*;

    #[test]
    fn default_hyper_matches_stattype() {
        for stattype in [
            StatType::Bernoulli,
            StatType::Categorical,
            StatType::Gaussian,
            StatType::Count,
        ] {
            let hyper = Hyperparameters::default_for(stattype);
            assert_eq!(hyper.stattype(), stattype);
        }
    }

    #[test]
    fn categorical_grid_spans_inverse_n_to_n() {
        let xs: Vec<Datum> =
            (0..4).map(|x| Datum::Categorical(x % 2)).collect();
        let grid = HyperGrid::from_data(StatType::Categorical, &xs, 5);
        let alpha = grid.get("alpha").unwrap();
        assert_eq!(alpha.len(), 5);
        assert_relative_eq!(alpha[0], 0.25, epsilon = 1E-10);
        assert_relative_eq!(alpha[4], 4.0, epsilon = 1E-10);
    }

    #[test]
    fn gaussian_grid_centers_on_data() {
        let xs = vec![
            Datum::Continuous(-1.0),
            Datum::Missing,
            Datum::Continuous(1.0),
        ];
        let grid = HyperGrid::from_data(StatType::Gaussian, &xs, 11);
        let names: Vec<&str> = grid.names().collect();
        assert_eq!(names, vec!["k", "m", "s2", "v"]);

        // ssqdev = 2
        let m = grid.get("m").unwrap();
        let spread = 1.5 * 2_f64.sqrt();
        assert_relative_eq!(m[0], -1.0 - spread, epsilon = 1E-10);
        assert_relative_eq!(m[10], 1.0 + spread, epsilon = 1E-10);
        assert_relative_eq!(m[5], 0.0, epsilon = 1E-10);

        let s2 = grid.get("s2").unwrap();
        assert_relative_eq!(s2[0], 2.0 / 200.0, epsilon = 1E-10);
        assert_relative_eq!(s2[10], 1.0, epsilon = 1E-10);
    }

    #[test]
    fn gaussian_grid_without_data_is_finite() {
        let grid = HyperGrid::from_data(StatType::Gaussian, &[], 7);
        for name in ["m", "k", "v", "s2"] {
            let axis = grid.get(name).unwrap();
            assert_eq!(axis.len(), 7);
            assert!(axis.iter().all(|x| x.is_finite()), "{name}: {axis:?}");
        }
    }

    #[test]
    fn count_grid_is_positive() {
        let xs: Vec<Datum> = vec![Datum::Count(0), Datum::Count(12)];
        let grid = HyperGrid::from_data(StatType::Count, &xs, 4);
        assert!(grid.get("shape").unwrap().iter().all(|&x| x > 0.0));
        assert!(grid.get("rate").unwrap().iter().all(|&x| x > 0.0));
    }

    #[test]
    fn hyperparameters_from_json() {
        let hyper: Hyperparameters = serde_json::from_str(
            r#"{"gaussian": {"m": 0.5, "k": 2.0, "v": 3.0, "s2": 4.0}}"#,
        )
        .unwrap();
        assert_eq!(
            hyper,
            Hyperparameters::Gaussian {
                m: 0.5,
                k: 2.0,
                v: 3.0,
                s2: 4.0
            }
        );
    }
}
