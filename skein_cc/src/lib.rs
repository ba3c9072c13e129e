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
//! The CRP mixture column: one variable of a CrossCat model
mod column;
mod config;
mod diagnostics;
mod error;
mod latents;
mod ledger;

pub use column::Column;
pub use config::ColumnConfig;
pub use diagnostics::{ColumnDiagnostics, ColumnDiagnosticsError};
pub use error::ColumnError;
pub use latents::{construct_column_from_latents, ColumnData, ColumnLatents};
pub use ledger::Ledger;
