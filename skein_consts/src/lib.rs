pub use rv;

/// Default CRP concentration parameter for a column's category process
pub const DEFAULT_CRP_ALPHA: f64 = 1.0;

/// Default number of points along each hyperparameter axis of a hyper-grid
pub const DEFAULT_N_GRID: usize = 30;

/// Default Beta prior on Bernoulli components, Beta(0.5, 0.5)
pub const DEFAULT_BERNOULLI_ALPHA: f64 = 0.5;
pub const DEFAULT_BERNOULLI_BETA: f64 = 0.5;

/// Default symmetric Dirichlet concentration for categorical columns
pub const DEFAULT_CATEGORICAL_ALPHA: f64 = 1.0;

/// Default Normal inverse chi-squared prior (m, k, v, s2) on Gaussian
/// components
pub const DEFAULT_GAUSSIAN_M: f64 = 0.0;
pub const DEFAULT_GAUSSIAN_K: f64 = 1.0;
pub const DEFAULT_GAUSSIAN_V: f64 = 1.0;
pub const DEFAULT_GAUSSIAN_S2: f64 = 1.0;

/// Default Gamma(shape, rate) prior on Poisson component rates
pub const DEFAULT_COUNT_SHAPE: f64 = 1.0;
pub const DEFAULT_COUNT_RATE: f64 = 1.0;

/// The largest categorical domain a `u8`-valued datum can index
pub const MAX_CATEGORICAL_K: usize = 256;
