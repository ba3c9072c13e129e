//! CRP mixture columns for cross-categorization.
//!
//! A [`Column`] models one variable as a Chinese Restaurant Process mixture
//! of conjugate primitive models. Observations are placed into categories by
//! the CRP, and every category scores data by its posterior predictive.
//!
//! # Example
//!
//! Incorporate a few binary observations and ask how likely another `true`
//! would be.
//!
//! ```
//! use maplit::btreemap;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256Plus;
//! use skein::{Column, ColumnConfig, Datum};
//! use skein::stats::{ColumnMetadata, StatType};
//!
//! let mut rng = Xoshiro256Plus::seed_from_u64(1337);
//! let mut column = Column::new(
//!     "swims",
//!     StatType::Bernoulli,
//!     ColumnMetadata::default(),
//!     &ColumnConfig::default(),
//! )
//! .unwrap();
//!
//! for x in [true, true, true, false] {
//!     column.incorporate(&Datum::Binary(x), &mut rng).unwrap();
//! }
//! assert_eq!(column.n(), 4);
//!
//! let targets = btreemap! { String::from("swims") => Datum::Binary(true) };
//! let logp = column.logpdf(&targets, &btreemap! {}).unwrap();
//! assert!(logp.exp() > 0.5);
//! ```
//!
//! Column settings can be read from YAML.
//!
//! ```
//! use skein::config::column_config_from_yaml;
//!
//! let config = column_config_from_yaml("alpha: 2.0\ncrosscat: true").unwrap();
//! assert_eq!(config.alpha, 2.0);
//! assert!(config.crosscat);
//! ```
#![warn(unused_extern_crates)]
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]

pub mod config;

pub use config::ConfigError;
pub use skein_cc::{
    construct_column_from_latents, Column, ColumnConfig, ColumnData,
    ColumnDiagnostics, ColumnError, ColumnLatents,
};
pub use skein_data::{CategoryId, Datum, RowId, Values};

pub mod consts {
    pub use skein_consts::*;
}

pub mod data {
    pub use skein_data::*;
}

pub mod cc {
    pub use skein_cc::*;
}

pub mod stats {
    pub use skein_stats::*;
}

pub mod utils {
    pub use skein_utils::*;
}
