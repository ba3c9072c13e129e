use serde::{Deserialize, Serialize};
use skein_consts::{DEFAULT_CRP_ALPHA, DEFAULT_N_GRID};
use skein_stats::{Hyperparameters, StatType};

fn default_alpha() -> f64 {
    DEFAULT_CRP_ALPHA
}

fn default_n_grid() -> usize {
    DEFAULT_N_GRID
}

/// Configuration for building a `Column`
///
/// Sets the CRP concentration, the hyper-grid resolution, the hyperparameters
/// shared by every category, and whether the column tracks row-indexed data.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// CRP concentration parameter
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Number of points along each hyper-grid axis
    #[serde(default = "default_n_grid")]
    pub n_grid: usize,
    /// Hyperparameters for every category. If `None`, the stattype defaults
    /// are used.
    #[serde(default)]
    pub hyper: Option<Hyperparameters>,
    /// Whether the column keeps the row-indexed data map used by the CrossCat
    /// API
    #[serde(default)]
    pub crosscat: bool,
}

impl ColumnConfig {
    pub fn new() -> Self {
        Self {
            alpha: DEFAULT_CRP_ALPHA,
            n_grid: DEFAULT_N_GRID,
            hyper: None,
            crosscat: false,
        }
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn n_grid(mut self, n_grid: usize) -> Self {
        self.n_grid = n_grid;
        self
    }

    pub fn hyper(mut self, hyper: Hyperparameters) -> Self {
        self.hyper = Some(hyper);
        self
    }

    pub fn crosscat(mut self, crosscat: bool) -> Self {
        self.crosscat = crosscat;
        self
    }

    /// The hyperparameters to use for a column of `stattype`
    pub fn hyper_for(&self, stattype: StatType) -> Hyperparameters {
        self.hyper
            .clone()
            .unwrap_or_else(|| Hyperparameters::default_for(stattype))
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self::new()
    }
}
