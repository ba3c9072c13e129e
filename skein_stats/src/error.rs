use skein_data::Datum;
use thiserror::Error;

use crate::StatType;

/// Errors from primitive (per-category) models
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PrimitiveError {
    /// The datum's variant does not match the model's stattype
    #[error("{stattype} model cannot accept datum {datum:?}")]
    InvalidDatum { stattype: StatType, datum: Datum },
    /// The datum has the right type but lies outside the model's support
    #[error("datum {datum:?} is outside the support of the {stattype} model")]
    OutOfSupport { stattype: StatType, datum: Datum },
    /// A missing datum was handed to an operation that needs a value
    #[error("missing datum cannot be handed to a primitive model")]
    Missing,
    /// Tried to remove a datum from a model with no observations
    #[error("cannot unincorporate from a {0} model with no observations")]
    NoObservations(StatType),
    /// The hyperparameters do not define a valid prior
    #[error("invalid {stattype} hyperparameters: {reason}")]
    InvalidHyperparameters { stattype: StatType, reason: String },
    /// Categorical models need the size of the domain
    #[error("categorical models require a domain in the column metadata")]
    MissingCategoricalDomain,
    /// The categorical domain is empty or too large to be indexed by `u8`
    #[error("categorical domain must have between 1 and 256 options, got {0}")]
    InvalidCategoricalDomain(usize),
}
