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
pub mod component;
mod crp;
mod error;
mod hyper;
mod metadata;
pub mod primitive;
mod stattype;

pub use crp::{lcrp, Crp, CrpError, CrpKey};
pub use error::PrimitiveError;
pub use hyper::{HyperGrid, Hyperparameters};
pub use metadata::ColumnMetadata;
pub use primitive::{Primitive, PrimitiveModel};
pub use skein_consts::rv;
pub use stattype::StatType;
