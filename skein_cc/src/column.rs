//! A single variable modeled as a CRP mixture of primitive models
mod crosscat;

use std::collections::BTreeMap;
use std::f64::NEG_INFINITY;

use log::{debug, trace};
use rand::Rng;
use skein_data::{CategoryId, Datum, RowId, Values};
use skein_stats::{
    ColumnMetadata, Crp, CrpKey, HyperGrid, Hyperparameters, Primitive,
    PrimitiveModel, StatType,
};
use skein_utils::{ln_pflip, ln_pflip_key, logsumexp, merge_add};

use crate::{ColumnConfig, ColumnDiagnostics, ColumnError, Ledger};

/// One variable of a table, modeled as an infinite mixture.
///
/// Rows are partitioned into categories by a Chinese Restaurant Process and
/// each category owns a primitive model of the variable's values. Every
/// category holds at least one observation.
///
/// Mutating methods validate their input before touching any state, so a
/// method that returns an error leaves the column unchanged.
///
/// # Example
///
/// ```
/// # use skein_cc::{Column, ColumnConfig};
/// # use skein_data::{Datum, Values};
/// # use skein_stats::{ColumnMetadata, StatType};
/// # use rand::SeedableRng;
/// # use rand_xoshiro::Xoshiro256Plus;
/// let mut rng = Xoshiro256Plus::seed_from_u64(1337);
/// let mut column = Column::new(
///     "flag",
///     StatType::Bernoulli,
///     ColumnMetadata::default(),
///     &ColumnConfig::default(),
/// )
/// .unwrap();
///
/// column.incorporate(&Datum::Binary(true), &mut rng).unwrap();
/// column.incorporate(&Datum::Binary(false), &mut rng).unwrap();
/// assert_eq!(column.n(), 2);
///
/// let mut targets = Values::new();
/// targets.insert(String::from("flag"), Datum::Binary(true));
/// let logp = column.logpdf(&targets, &Values::new()).unwrap();
/// assert!(logp < 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Column {
    name: String,
    stattype: StatType,
    crp: Crp,
    hyper: Hyperparameters,
    hyper_grid: HyperGrid,
    metadata: ColumnMetadata,
    /// Empty model cloned into every new category
    prototype: Primitive,
    categories: BTreeMap<CategoryId, Primitive>,
    ledger: Ledger,
    data: Option<BTreeMap<RowId, Datum>>,
    /// Next generated id; `None` once an id of `usize::MAX` has been used
    next_id: Option<CategoryId>,
}

impl Column {
    /// Create an empty column
    pub fn new(
        name: impl Into<String>,
        stattype: StatType,
        metadata: ColumnMetadata,
        config: &ColumnConfig,
    ) -> Result<Self, ColumnError> {
        Self::with_grid_data(name, stattype, metadata, config, &[])
    }

    /// Create an empty column whose hyper-grid is computed from `xs`
    pub(crate) fn with_grid_data(
        name: impl Into<String>,
        stattype: StatType,
        metadata: ColumnMetadata,
        config: &ColumnConfig,
        xs: &[Datum],
    ) -> Result<Self, ColumnError> {
        let crp = Crp::new(config.alpha)?;
        let hyper = config.hyper_for(stattype);
        if hyper.stattype() != stattype {
            return Err(ColumnError::StatTypeMismatch {
                stattype,
                hyper: hyper.stattype(),
            });
        }
        let prototype = Primitive::new(&hyper, &metadata)?;
        let hyper_grid = HyperGrid::from_data(stattype, xs, config.n_grid);

        Ok(Column {
            name: name.into(),
            stattype,
            crp,
            hyper,
            hyper_grid,
            metadata,
            prototype,
            categories: BTreeMap::new(),
            ledger: Ledger::new(),
            data: if config.crosscat {
                Some(BTreeMap::new())
            } else {
                None
            },
            next_id: Some(CategoryId(0)),
        })
    }

    /// The name of the modeled variable
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn stattype(&self) -> StatType {
        self.stattype
    }

    /// The CRP concentration parameter
    pub fn alpha(&self) -> f64 {
        self.crp.alpha()
    }

    /// The total number of incorporated observations
    pub fn n(&self) -> usize {
        self.categories.values().map(|model| model.n()).sum()
    }

    /// The number of categories
    pub fn k(&self) -> usize {
        self.categories.len()
    }

    /// The number of observations in each category
    pub fn category_counts(&self) -> BTreeMap<CategoryId, usize> {
        self.categories
            .iter()
            .map(|(&id, model)| (id, model.n()))
            .collect()
    }

    pub fn categories(&self) -> &BTreeMap<CategoryId, Primitive> {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Primitive> {
        self.categories.get(&id)
    }

    /// The value to category ledger
    pub fn assignments(&self) -> &Ledger {
        &self.ledger
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyper
    }

    pub fn hyper_grid(&self) -> &HyperGrid {
        &self.hyper_grid
    }

    pub fn metadata(&self) -> &ColumnMetadata {
        &self.metadata
    }

    /// The row-indexed data, if the column is in CrossCat mode
    pub fn data(&self) -> Option<&BTreeMap<RowId, Datum>> {
        self.data.as_ref()
    }

    pub fn is_crosscat(&self) -> bool {
        self.data.is_some()
    }

    /// Log probability of the current partition under the CRP
    pub fn ln_partition_prior(&self) -> f64 {
        let counts: Vec<usize> =
            self.category_counts().into_values().collect();
        self.crp.ln_f_partition(&counts)
    }

    pub fn diagnostics(&self) -> ColumnDiagnostics {
        ColumnDiagnostics::new(self)
    }

    /// Normalized log CRP weights of every category plus `Aux`, the weight
    /// of opening a new category.
    pub fn crp_weights(&self) -> BTreeMap<CrpKey, f64> {
        self.crp.weights(&self.category_counts(), true)
    }

    /// Check that `datum` is a value this column can incorporate
    pub fn check_datum(&self, datum: &Datum) -> Result<(), ColumnError> {
        self.prototype.check_datum(datum).map_err(ColumnError::from)
    }

    fn model_for(&self, key: CrpKey) -> &Primitive {
        key.category()
            .and_then(|id| self.categories.get(&id))
            .unwrap_or(&self.prototype)
    }

    fn fresh_id(&mut self) -> Result<CategoryId, ColumnError> {
        if let Some(id) = self.next_id {
            self.next_id = id.next();
            return Ok(id);
        }
        // the counter is spent, so reuse the lowest id not held
        (0..usize::MAX)
            .map(CategoryId)
            .find(|id| !self.categories.contains_key(id))
            .ok_or(ColumnError::CategoryIdsExhausted)
    }

    /// Create an empty category if `id` is not already a category. Empty
    /// categories must be filled or dropped before control returns to the
    /// caller.
    pub(crate) fn ensure_category(&mut self, id: CategoryId) {
        if self.next_id.map_or(false, |next| id >= next) {
            self.next_id = id.next();
        }
        if !self.categories.contains_key(&id) {
            debug!("column '{}': creating {}", self.name, id);
            self.categories.insert(id, self.prototype.clone());
        }
    }

    /// Remove every category holding no observations
    pub(crate) fn drop_empty_categories(&mut self) {
        let name = &self.name;
        self.categories.retain(|id, model| {
            let keep = model.n() > 0;
            if !keep {
                debug!("column '{}': removing empty {}", name, id);
            }
            keep
        });
    }

    pub(crate) fn set_data(&mut self, data: Option<BTreeMap<RowId, Datum>>) {
        self.data = data;
    }

    /// Add `datum` to category `id`, creating the category if needed
    pub(crate) fn incorporate_into(
        &mut self,
        datum: &Datum,
        id: CategoryId,
    ) -> Result<(), ColumnError> {
        self.check_datum(datum)?;
        self.ensure_category(id);
        if let Some(model) = self.categories.get_mut(&id) {
            model.incorporate(datum)?;
            self.ledger.add(datum, id);
        }
        Ok(())
    }

    /// Remove `datum` from category `id`, deleting the category if it
    /// becomes empty. The ledger must record `datum` in `id`.
    pub(crate) fn unincorporate_from(
        &mut self,
        datum: &Datum,
        id: CategoryId,
    ) -> Result<(), ColumnError> {
        let model = self
            .categories
            .get_mut(&id)
            .ok_or(ColumnError::UnknownCategory(id))?;
        model.unincorporate(datum)?;
        self.ledger.remove(datum, id);

        if model.n() == 0 {
            debug!("column '{}': removing empty {}", self.name, id);
            self.categories.remove(&id);
        }
        Ok(())
    }

    /// Add one observation to the column. The CRP chooses the category,
    /// which may be new.
    ///
    /// Returns the category the datum joined, or `None` if the datum is
    /// missing, in which case the column is unchanged.
    pub fn incorporate<R: Rng>(
        &mut self,
        datum: &Datum,
        rng: &mut R,
    ) -> Result<Option<CategoryId>, ColumnError> {
        if datum.is_missing() {
            return Ok(None);
        }
        self.check_datum(datum)?;

        let weights = self.crp_weights();
        trace!("column '{}': CRP weights {:?}", self.name, weights);

        let id = match ln_pflip_key(&weights, rng) {
            Some(CrpKey::Category(id)) => id,
            Some(CrpKey::Aux) | None => self.fresh_id()?,
        };
        self.incorporate_into(datum, id)?;
        Ok(Some(id))
    }

    /// Remove one observation of `datum` from a category chosen uniformly
    /// among those containing it.
    ///
    /// Returns the category the datum was removed from, or `None` if the
    /// datum is missing. Fails with `ValueNotIncorporated` if the column
    /// holds no such value.
    pub fn unincorporate<R: Rng>(
        &mut self,
        datum: &Datum,
        rng: &mut R,
    ) -> Result<Option<CategoryId>, ColumnError> {
        if datum.is_missing() {
            return Ok(None);
        }
        self.check_datum(datum)?;

        let id = self
            .ledger
            .choose(datum, rng)
            .ok_or_else(|| ColumnError::ValueNotIncorporated(datum.clone()))?;
        self.unincorporate_from(datum, id)?;
        Ok(Some(id))
    }

    /// Log density of this column's target value, marginalized over the
    /// category assignment of a new row.
    ///
    /// Returns `0.0` if `targets` has no value for this column. If the
    /// column is constrained, the result is `0.0` when the target equals the
    /// constraint and `-inf` otherwise. Entries for other variables are
    /// ignored.
    pub fn logpdf(
        &self,
        targets: &Values,
        constraints: &Values,
    ) -> Result<f64, ColumnError> {
        let x = match targets.get(&self.name).and_then(Datum::present) {
            Some(x) => x,
            None => return Ok(0.0),
        };
        self.check_datum(x)?;

        if let Some(constraint) =
            constraints.get(&self.name).and_then(Datum::present)
        {
            return Ok(if constraint == x { 0.0 } else { NEG_INFINITY });
        }

        let crp_weights = self.crp_weights();
        let mut ln_pps: BTreeMap<CrpKey, f64> = BTreeMap::new();
        for (&id, model) in self.categories.iter() {
            ln_pps.insert(CrpKey::Category(id), model.logpdf(x)?);
        }
        ln_pps.insert(CrpKey::Aux, self.prototype.logpdf(x)?);

        let joint = merge_add(&crp_weights, &ln_pps)?;
        trace!("column '{}': joint log weights {:?}", self.name, joint);

        let values: Vec<f64> = joint.into_values().collect();
        Ok(logsumexp(&values))
    }

    /// Draw `n` values from the column's predictive distribution. Each draw
    /// picks a category (or a new one) by CRP weight and samples from that
    /// category's posterior predictive.
    pub fn draw_values<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Datum> {
        let ln_weights = self.crp.ln_weights(&self.category_counts(), true);
        let keys: Vec<CrpKey> = ln_weights.keys().copied().collect();
        let weights: Vec<f64> = ln_weights.values().copied().collect();

        (0..n)
            .map(|_| {
                let ix = ln_pflip(&weights, rng);
                self.model_for(keys[ix]).draw(rng)
            })
            .collect()
    }

    /// Simulate `n` rows. Each row holds a value for this column if the
    /// column is among `targets`, and is empty otherwise. A constrained
    /// column always simulates its constraint.
    ///
    /// Never mutates the column.
    pub fn simulate<R: Rng>(
        &self,
        targets: &[String],
        constraints: &Values,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Values>, ColumnError> {
        if !targets.iter().any(|target| target == &self.name) {
            return Ok(vec![Values::new(); n]);
        }

        let xs = match constraints.get(&self.name).and_then(Datum::present) {
            Some(constraint) => {
                self.check_datum(constraint)?;
                vec![constraint.clone(); n]
            }
            None => self.draw_values(n, rng),
        };

        let rows = xs
            .into_iter()
            .map(|x| {
                let mut row = Values::new();
                row.insert(self.name.clone(), x);
                row
            })
            .collect();
        Ok(rows)
    }

    /// Log marginal likelihood of the incorporated data, mixing each
    /// category's marginal likelihood by its normalized CRP weight.
    ///
    /// An empty column scores `0.0`.
    pub fn logpdf_score(&self) -> f64 {
        if self.categories.is_empty() {
            return 0.0;
        }

        let scores: Vec<f64> = self
            .crp
            .weights(&self.category_counts(), false)
            .into_iter()
            .map(|(key, ln_w)| ln_w + self.model_for(key).logpdf_score())
            .collect();
        logsumexp(&scores)
    }
}
