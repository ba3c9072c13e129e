//! Chinese Restaurant Process prior over the partition of a column's rows
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skein_data::CategoryId;
use skein_utils::ln_normalize;
use thiserror::Error;

/// Key of a CRP weight map: an existing category or the synthetic slot for a
/// new one
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
    Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum CrpKey {
    Category(CategoryId),
    Aux,
}

impl CrpKey {
    /// The category id, if the key names an existing category
    pub fn category(self) -> Option<CategoryId> {
        match self {
            Self::Category(id) => Some(id),
            Self::Aux => None,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CrpError {
    /// The concentration parameter must be finite and positive
    #[error("CRP alpha must be finite and greater than zero, got {0}")]
    InvalidAlpha(f64),
}

/// The Chinese Restaurant Process with concentration `alpha`
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Crp {
    alpha: f64,
}

impl Crp {
    pub fn new(alpha: f64) -> Result<Self, CrpError> {
        if alpha.is_finite() && alpha > 0.0 {
            Ok(Self { alpha })
        } else {
            Err(CrpError::InvalidAlpha(alpha))
        }
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Unnormalized log weight of joining a category with `n_k` members
    #[inline]
    pub fn ln_gibbs_weight(&self, n_k: usize) -> f64 {
        (n_k as f64).ln()
    }

    /// Unnormalized log weight of opening a new category
    #[inline]
    pub fn ln_singleton_weight(&self) -> f64 {
        self.alpha.ln()
    }

    /// Unnormalized log weights of each category in `counts`, plus `Aux` if
    /// `append_new` is `true`.
    pub fn ln_weights(
        &self,
        counts: &BTreeMap<CategoryId, usize>,
        append_new: bool,
    ) -> BTreeMap<CrpKey, f64> {
        let mut weights: BTreeMap<CrpKey, f64> = counts
            .iter()
            .map(|(&id, &n_k)| {
                (CrpKey::Category(id), self.ln_gibbs_weight(n_k))
            })
            .collect();

        if append_new {
            weights.insert(CrpKey::Aux, self.ln_singleton_weight());
        }
        weights
    }

    /// Normalized log weights: the log probability that the next row joins
    /// each category, or opens a new one if `append_new` is `true`.
    ///
    /// # Example
    ///
    /// ```
    /// # use skein_stats::{Crp, CrpKey};
    /// # use skein_data::CategoryId;
    /// # use std::collections::BTreeMap;
    /// let crp = Crp::new(1.0).unwrap();
    /// let counts: BTreeMap<CategoryId, usize> =
    ///     [(CategoryId(0), 3)].into_iter().collect();
    ///
    /// let weights = crp.weights(&counts, true);
    /// let p_join = weights[&CrpKey::Category(CategoryId(0))].exp();
    /// let p_new = weights[&CrpKey::Aux].exp();
    ///
    /// assert!((p_join - 0.75).abs() < 1E-12);
    /// assert!((p_new - 0.25).abs() < 1E-12);
    /// ```
    pub fn weights(
        &self,
        counts: &BTreeMap<CategoryId, usize>,
        append_new: bool,
    ) -> BTreeMap<CrpKey, f64> {
        ln_normalize(&self.ln_weights(counts, append_new))
    }

    /// The log probability of a partition with the given category sizes
    pub fn ln_f_partition(&self, counts: &[usize]) -> f64 {
        let n: usize = counts.iter().sum();
        lcrp(n, counts, self.alpha)
    }
}

/// The log probability of a partition of `n` items into categories of size
/// `cts` under CRP(`alpha`)
pub fn lcrp(n: usize, cts: &[usize], alpha: f64) -> f64 {
    let k: f64 = cts.len() as f64;
    let gsum = cts.iter().fold(0.0, |acc, ct| {
        acc + ::special::Gamma::ln_gamma(*ct as f64).0
    });
    let cpnt_2 = ::special::Gamma::ln_gamma(alpha).0
        - ::special::Gamma::ln_gamma(n as f64 + alpha).0;
    gsum + k.mul_add(alpha.ln(), cpnt_2)
}
