//! Row-indexed updates driven by an outer CrossCat sampler
use std::collections::BTreeMap;

use skein_data::{CategoryId, Datum, RowId, Values};

use super::Column;
use crate::ColumnError;

impl Column {
    /// Add `row`'s value for this column to `category`.
    ///
    /// The caller chooses the category, which is created if it does not
    /// exist. Does nothing if `values` has no value for this column.
    pub fn crosscat_incorporate(
        &mut self,
        values: &Values,
        category: CategoryId,
        row: RowId,
    ) -> Result<(), ColumnError> {
        let Some(x) = values.get(&self.name).and_then(Datum::present) else {
            return Ok(());
        };
        self.check_datum(x)?;

        let seen = self
            .data
            .as_ref()
            .map_or(false, |data| data.contains_key(&row));
        if seen {
            return Err(ColumnError::RowAlreadyIncorporated(row));
        }

        self.incorporate_into(x, category)?;
        self.data
            .get_or_insert_with(BTreeMap::new)
            .insert(row, x.clone());
        Ok(())
    }

    /// Remove `row`'s value from `category`, deleting the category if it
    /// becomes empty.
    ///
    /// Does nothing if the row holds no value in this column.
    pub fn crosscat_unincorporate(
        &mut self,
        category: CategoryId,
        row: RowId,
    ) -> Result<(), ColumnError> {
        let data = self.data.as_ref().ok_or(ColumnError::NoRowData)?;
        let Some(x) = data.get(&row).cloned() else {
            return Ok(());
        };

        if !self.categories.contains_key(&category) {
            return Err(ColumnError::UnknownCategory(category));
        }
        if self.ledger.count(&x, category) == 0 {
            return Err(ColumnError::RowNotInCategory { row, category });
        }

        self.unincorporate_from(&x, category)?;
        if let Some(data) = self.data.as_mut() {
            data.remove(&row);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnConfig;
    use maplit::btreemap;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;
    use skein_stats::{ColumnMetadata, StatType};

    fn count_column(crosscat: bool) -> Column {
        Column::new(
            "visits",
            StatType::Count,
            ColumnMetadata::default(),
            &ColumnConfig::new().crosscat(crosscat),
        )
        .unwrap()
    }

    fn visits(x: u32) -> Values {
        btreemap! { String::from("visits") => Datum::Count(x) }
    }

    #[test]
    fn incorporate_records_row_and_category() {
        let mut column = count_column(true);
        column
            .crosscat_incorporate(&visits(3), CategoryId(5), RowId(0))
            .unwrap();
        column
            .crosscat_incorporate(&visits(1), CategoryId(5), RowId(1))
            .unwrap();

        let counts = column.category_counts();
        assert_eq!(counts, btreemap! { CategoryId(5) => 2 });
        assert_eq!(column.data().unwrap()[&RowId(1)], Datum::Count(1));
        assert!(column.diagnostics().is_valid());
    }

    #[test]
    fn incorporate_creates_data_map_on_first_use() {
        let mut column = count_column(false);
        assert!(!column.is_crosscat());
        column
            .crosscat_incorporate(&visits(3), CategoryId(0), RowId(2))
            .unwrap();
        assert!(column.is_crosscat());
    }

    #[test]
    fn incorporate_without_value_is_noop() {
        let mut column = count_column(true);
        let other = btreemap! { String::from("age") => Datum::Count(30) };
        column
            .crosscat_incorporate(&other, CategoryId(0), RowId(0))
            .unwrap();
        let missing = btreemap! { String::from("visits") => Datum::Missing };
        column
            .crosscat_incorporate(&missing, CategoryId(0), RowId(0))
            .unwrap();
        assert_eq!(column.n(), 0);
        assert!(column.data().unwrap().is_empty());
    }

    #[test]
    fn incorporate_same_row_twice_fails() {
        let mut column = count_column(true);
        column
            .crosscat_incorporate(&visits(3), CategoryId(0), RowId(0))
            .unwrap();
        let res =
            column.crosscat_incorporate(&visits(4), CategoryId(1), RowId(0));
        assert_eq!(res, Err(ColumnError::RowAlreadyIncorporated(RowId(0))));
        assert_eq!(column.n(), 1);
        assert_eq!(column.k(), 1);
    }

    #[test]
    fn external_ids_bump_generated_ids() {
        let mut rng = Xoshiro256Plus::seed_from_u64(1337);
        let mut column = count_column(true);
        column
            .crosscat_incorporate(&visits(3), CategoryId(9), RowId(0))
            .unwrap();
        for _ in 0..20 {
            let id = column.incorporate(&Datum::Count(3), &mut rng).unwrap();
            assert!(id.unwrap() >= CategoryId(9));
        }
    }

    #[test]
    fn largest_external_id_does_not_collide_with_new_ids() {
        let mut rng = Xoshiro256Plus::seed_from_u64(1337);
        let mut column = Column::new(
            "visits",
            StatType::Count,
            ColumnMetadata::default(),
            &ColumnConfig::new().alpha(1E6).crosscat(true),
        )
        .unwrap();
        column
            .crosscat_incorporate(&visits(3), CategoryId(0), RowId(0))
            .unwrap();
        column
            .crosscat_incorporate(&visits(2), CategoryId(usize::MAX), RowId(1))
            .unwrap();

        for _ in 0..5 {
            let before = column.category_counts();
            let id = column
                .incorporate(&Datum::Count(1), &mut rng)
                .unwrap()
                .unwrap();
            assert!(!before.contains_key(&id));
            assert_eq!(column.k(), before.len() + 1);
        }
        assert_eq!(column.category_counts()[&CategoryId(0)], 1);
        assert_eq!(column.category_counts()[&CategoryId(usize::MAX)], 1);
    }

    #[test]
    fn unincorporate_removes_row_and_empty_category() {
        let mut column = count_column(true);
        column
            .crosscat_incorporate(&visits(3), CategoryId(2), RowId(7))
            .unwrap();
        column.crosscat_unincorporate(CategoryId(2), RowId(7)).unwrap();

        assert_eq!(column.k(), 0);
        assert!(column.assignments().is_empty());
        assert!(column.data().unwrap().is_empty());
    }

    #[test]
    fn unincorporate_without_data_map_fails() {
        let mut column = count_column(false);
        assert_eq!(
            column.crosscat_unincorporate(CategoryId(0), RowId(0)),
            Err(ColumnError::NoRowData)
        );
    }

    #[test]
    fn unincorporate_unknown_row_is_noop() {
        let mut column = count_column(true);
        column
            .crosscat_incorporate(&visits(3), CategoryId(0), RowId(0))
            .unwrap();
        column.crosscat_unincorporate(CategoryId(0), RowId(1)).unwrap();
        assert_eq!(column.n(), 1);
    }

    #[test]
    fn unincorporate_from_unknown_category_fails() {
        let mut column = count_column(true);
        column
            .crosscat_incorporate(&visits(3), CategoryId(0), RowId(0))
            .unwrap();
        assert_eq!(
            column.crosscat_unincorporate(CategoryId(1), RowId(0)),
            Err(ColumnError::UnknownCategory(CategoryId(1)))
        );
        assert_eq!(column.n(), 1);
    }

    #[test]
    fn unincorporate_from_wrong_category_fails() {
        let mut column = count_column(true);
        column
            .crosscat_incorporate(&visits(3), CategoryId(0), RowId(0))
            .unwrap();
        column
            .crosscat_incorporate(&visits(8), CategoryId(1), RowId(1))
            .unwrap();
        assert_eq!(
            column.crosscat_unincorporate(CategoryId(1), RowId(0)),
            Err(ColumnError::RowNotInCategory {
                row: RowId(0),
                category: CategoryId(1),
            })
        );
        assert_eq!(column.n(), 2);
        assert!(column.diagnostics().is_valid());
    }

    #[test]
    fn category_membership_is_checked_by_value() {
        let mut column = count_column(true);
        column
            .crosscat_incorporate(&visits(3), CategoryId(0), RowId(0))
            .unwrap();
        column
            .crosscat_incorporate(&visits(3), CategoryId(1), RowId(1))
            .unwrap();

        // row 0 was placed in category 0, but category 1 also holds a 3
        column.crosscat_unincorporate(CategoryId(1), RowId(0)).unwrap();

        assert_eq!(column.category_counts(), btreemap! { CategoryId(0) => 1 });
        assert!(!column.data().unwrap().contains_key(&RowId(0)));
        assert!(column.diagnostics().is_valid());
    }
}
