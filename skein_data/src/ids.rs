use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a category (cluster) within one column.
///
/// Ids are only unique within the column that holds them.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct CategoryId(pub usize);

impl CategoryId {
    /// The id following this one, or `None` if this is the largest id
    #[inline]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(CategoryId)
    }
}

impl From<usize> for CategoryId {
    fn from(ix: usize) -> Self {
        CategoryId(ix)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category_{}", self.0)
    }
}

/// Identifies a row of the table a column belongs to
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct RowId(pub usize);

impl From<usize> for RowId {
    fn from(ix: usize) -> Self {
        RowId(ix)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ids_order_by_index() {
        assert!(CategoryId(1) < CategoryId(2));
        assert_eq!(CategoryId(4).next(), Some(CategoryId(5)));
    }

    #[test]
    fn largest_category_id_has_no_next() {
        assert_eq!(CategoryId(usize::MAX).next(), None);
    }

    #[test]
    fn display() {
        assert_eq!(CategoryId(3).to_string(), "category_3");
        assert_eq!(RowId(12).to_string(), "row_12");
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        assert_eq!(serde_json::to_string(&CategoryId(7)).unwrap(), "7");
        let row: RowId = serde_json::from_str("42").unwrap();
        assert_eq!(row, RowId(42));
    }
}
