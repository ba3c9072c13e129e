//! Building a column from a snapshot of its latent partition
use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use skein_data::{CategoryId, Datum, RowId};
use skein_stats::{ColumnMetadata, PrimitiveModel, StatType};

use crate::{Column, ColumnConfig, ColumnError};

/// The observed values of one column
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ColumnData {
    /// Values keyed by row id
    Rows(BTreeMap<RowId, Datum>),
    /// Values in row order; the value at position `ix` belongs to `RowId(ix)`
    Positional(Vec<Datum>),
}

impl ColumnData {
    pub fn into_rows(self) -> BTreeMap<RowId, Datum> {
        match self {
            Self::Rows(rows) => rows,
            Self::Positional(xs) => xs
                .into_iter()
                .enumerate()
                .map(|(ix, x)| (RowId(ix), x))
                .collect(),
        }
    }
}

impl From<Vec<Datum>> for ColumnData {
    fn from(xs: Vec<Datum>) -> Self {
        Self::Positional(xs)
    }
}

impl From<BTreeMap<RowId, Datum>> for ColumnData {
    fn from(rows: BTreeMap<RowId, Datum>) -> Self {
        Self::Rows(rows)
    }
}

/// The latent state of a column's partition
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnLatents {
    /// CRP concentration parameter
    pub alpha: f64,
    /// The categories of the partition and the number of rows in each
    pub counts: BTreeMap<CategoryId, usize>,
    /// The category of each row
    pub y: BTreeMap<RowId, CategoryId>,
}

/// Build a column from data and a snapshot of its partition.
///
/// Every present datum is incorporated into the category its row is assigned
/// to, and the hyper-grid is computed from the present data. Categories in
/// `latents.counts` that receive no data are dropped. The row-indexed data map
/// is kept only if `config.crosscat` is set. `latents.alpha` takes precedence
/// over `config.alpha`.
///
/// # Example
///
/// ```
/// # use skein_cc::{construct_column_from_latents, ColumnConfig, ColumnData};
/// # use skein_cc::ColumnLatents;
/// # use skein_data::{CategoryId, Datum, RowId};
/// # use skein_stats::{ColumnMetadata, StatType};
/// let data = ColumnData::Positional(vec![
///     Datum::Continuous(1.2),
///     Datum::Missing,
///     Datum::Continuous(-0.4),
/// ]);
///
/// let latents = ColumnLatents {
///     alpha: 1.0,
///     counts: [(CategoryId(0), 1), (CategoryId(3), 1)].into_iter().collect(),
///     y: [(RowId(0), CategoryId(0)), (RowId(2), CategoryId(3))]
///         .into_iter()
///         .collect(),
/// };
///
/// let column = construct_column_from_latents(
///     "height",
///     StatType::Gaussian,
///     data,
///     &latents,
///     ColumnMetadata::default(),
///     &ColumnConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(column.n(), 2);
/// assert_eq!(column.k(), 2);
/// ```
pub fn construct_column_from_latents(
    name: impl Into<String>,
    stattype: StatType,
    data: ColumnData,
    latents: &ColumnLatents,
    metadata: ColumnMetadata,
    config: &ColumnConfig,
) -> Result<Column, ColumnError> {
    let rows: BTreeMap<RowId, Datum> = data
        .into_rows()
        .into_iter()
        .filter(|(_, x)| !x.is_missing())
        .collect();

    let xs: Vec<Datum> = rows.values().cloned().collect();
    let config = config.clone().alpha(latents.alpha);
    let mut column =
        Column::with_grid_data(name, stattype, metadata, &config, &xs)?;

    for &id in latents.counts.keys() {
        column.ensure_category(id);
    }

    for (&row, x) in rows.iter() {
        let id = *latents
            .y
            .get(&row)
            .ok_or(ColumnError::UnassignedRow(row))?;
        if !latents.counts.contains_key(&id) {
            return Err(ColumnError::UnknownCategory(id));
        }
        column.incorporate_into(x, id)?;
    }

    column.drop_empty_categories();

    for (id, &expected) in latents.counts.iter() {
        let actual = column.category(*id).map_or(0, |model| model.n());
        if actual != expected {
            debug!(
                "column '{}': latents list {} rows in {} but {} were present",
                column.name(),
                expected,
                id,
                actual
            );
        }
    }

    column.set_data(if config.crosscat { Some(rows) } else { None });

    debug!(
        "constructed column '{}' from latents: {} rows in {} categories",
        column.name(),
        column.n(),
        column.k()
    );
    Ok(column)
}
