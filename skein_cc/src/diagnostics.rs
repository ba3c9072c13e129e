use serde::{Deserialize, Serialize};
use skein_stats::PrimitiveModel;
use thiserror::Error;

use crate::Column;

/// Checks of a column's internal bookkeeping
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDiagnostics {
    /// Every category should hold at least one observation
    no_empty_categories: bool,
    /// The ledger's count for each category should equal that category's
    /// number of observations
    ledger_agrees_with_categories: bool,
    /// The ledger should record as many occurrences as there are
    /// observations
    ledger_total_is_n: bool,
    /// The ledger should only name categories the column holds
    ledger_categories_exist: bool,
    /// In CrossCat mode, there should be one data entry per observation
    data_len_is_n: bool,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ColumnDiagnosticsError {
    #[error("One or more categories is empty")]
    EmptyCategory,
    #[error("The ledger counts disagree with the category counts")]
    LedgerCategoryMismatch,
    #[error("The ledger total does not equal the number of observations")]
    LedgerTotalMismatch,
    #[error("The ledger names a category the column does not have")]
    LedgerUnknownCategory,
    #[error("The row data does not match the number of observations")]
    DataLengthMismatch,
}

impl ColumnDiagnostics {
    pub fn new(column: &Column) -> Self {
        let counts = column.category_counts();
        let ledger = column.assignments();
        let ledger_totals = ledger.category_totals();
        let n = column.n();

        ColumnDiagnostics {
            no_empty_categories: {
                column.categories().values().all(|model| model.n() > 0)
            },
            ledger_agrees_with_categories: {
                counts.iter().all(|(id, &ct)| {
                    ledger_totals.get(id).copied().unwrap_or(0) == ct
                })
            },
            ledger_total_is_n: ledger.total() == n,
            ledger_categories_exist: {
                ledger_totals.keys().all(|id| counts.contains_key(id))
            },
            data_len_is_n: column.data().map_or(true, |data| data.len() == n),
        }
    }

    /// `true` if none of diagnostics was violated
    pub fn is_valid(&self) -> bool {
        self.no_empty_categories
            && self.ledger_agrees_with_categories
            && self.ledger_total_is_n
            && self.ledger_categories_exist
            && self.data_len_is_n
    }

    /// The first violated diagnostic, if any
    pub fn validate(&self) -> Result<(), ColumnDiagnosticsError> {
        if !self.no_empty_categories {
            Err(ColumnDiagnosticsError::EmptyCategory)
        } else if !self.ledger_agrees_with_categories {
            Err(ColumnDiagnosticsError::LedgerCategoryMismatch)
        } else if !self.ledger_total_is_n {
            Err(ColumnDiagnosticsError::LedgerTotalMismatch)
        } else if !self.ledger_categories_exist {
            Err(ColumnDiagnosticsError::LedgerUnknownCategory)
        } else if !self.data_len_is_n {
            Err(ColumnDiagnosticsError::DataLengthMismatch)
        } else {
            Ok(())
        }
    }
}
