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

mod datum;
mod ids;

pub use datum::{Datum, DatumConversionError, Values};
pub use ids::{CategoryId, RowId};
