use skein_data::{CategoryId, Datum, RowId};
use skein_stats::{CrpError, PrimitiveError, StatType};
use skein_utils::KeyMismatchError;
use thiserror::Error;

/// Errors that can occur when building or updating a `Column`
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ColumnError {
    /// Tried to unincorporate a value that is not in the column
    #[error("value {0:?} has not been incorporated into the column")]
    ValueNotIncorporated(Datum),
    /// The requested category does not exist
    #[error("the column has no category {0}")]
    UnknownCategory(CategoryId),
    /// The row already holds a value in this column
    #[error("{0} has already been incorporated into the column")]
    RowAlreadyIncorporated(RowId),
    /// The row's value is not recorded in the requested category.
    ///
    /// The column keeps no row to category map, so this is checked against
    /// the values held by the category. A row whose value also occurs in the
    /// requested category passes the check even if the row was assigned
    /// elsewhere.
    #[error("{row} is not assigned to {category}")]
    RowNotInCategory { row: RowId, category: CategoryId },
    /// A row-indexed operation was requested from a column without row data
    #[error("the column does not track row-indexed data")]
    NoRowData,
    /// Every category id is in use
    #[error("no unused category id remains")]
    CategoryIdsExhausted,
    /// A present datum has no category assignment
    #[error("{0} has a value but no category assignment")]
    UnassignedRow(RowId),
    /// The hyperparameters do not match the column's stattype
    #[error("hyperparameters are for {hyper} but the column is {stattype}")]
    StatTypeMismatch { stattype: StatType, hyper: StatType },
    #[error("invalid CRP: {0}")]
    Crp(#[from] CrpError),
    #[error("primitive model error: {0}")]
    Primitive(#[from] PrimitiveError),
    #[error(transparent)]
    KeyMismatch(#[from] KeyMismatchError),
}
