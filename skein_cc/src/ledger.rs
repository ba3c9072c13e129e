//! Bookkeeping of which categories hold each observed value
use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use skein_data::{CategoryId, Datum};
use skein_utils::choose_key;

/// Maps each observed value to the categories containing it and how many
/// times it occurs in each.
///
/// Counts are always positive: an entry that reaches zero is removed, and a
/// value whose bag becomes empty is removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    bags: HashMap<Datum, BTreeMap<CategoryId, usize>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `datum` in `category`
    pub fn add(&mut self, datum: &Datum, category: CategoryId) {
        *self
            .bags
            .entry(datum.clone())
            .or_default()
            .entry(category)
            .or_insert(0) += 1;
    }

    /// Remove one occurrence of `datum` from `category`. Returns `false`, and
    /// changes nothing, if there is no such occurrence.
    pub fn remove(&mut self, datum: &Datum, category: CategoryId) -> bool {
        let Some(bag) = self.bags.get_mut(datum) else {
            return false;
        };
        let Some(ct) = bag.get_mut(&category) else {
            return false;
        };

        *ct -= 1;
        if *ct == 0 {
            bag.remove(&category);
            if bag.is_empty() {
                self.bags.remove(datum);
            }
        }
        true
    }

    /// The categories holding `datum` and the number of occurrences in each
    pub fn bag(&self, datum: &Datum) -> Option<&BTreeMap<CategoryId, usize>> {
        self.bags.get(datum)
    }

    /// Choose uniformly among the categories holding `datum`
    pub fn choose<R: Rng>(
        &self,
        datum: &Datum,
        rng: &mut R,
    ) -> Option<CategoryId> {
        self.bags.get(datum).and_then(|bag| choose_key(bag, rng))
    }

    /// The number of occurrences of `datum` in `category`
    pub fn count(&self, datum: &Datum, category: CategoryId) -> usize {
        self.bags
            .get(datum)
            .and_then(|bag| bag.get(&category))
            .copied()
            .unwrap_or(0)
    }

    /// The total number of recorded occurrences
    pub fn total(&self) -> usize {
        self.bags.values().flat_map(|bag| bag.values()).sum()
    }

    /// The number of recorded occurrences in each category
    pub fn category_totals(&self) -> BTreeMap<CategoryId, usize> {
        let mut totals = BTreeMap::new();
        self.bags
            .values()
            .flat_map(|bag| bag.iter())
            .for_each(|(&category, &ct)| {
                *totals.entry(category).or_insert(0) += ct;
            });
        totals
    }

    /// The number of distinct values recorded
    pub fn len(&self) -> usize {
        self.bags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bags.is_empty()
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&Datum, &BTreeMap<CategoryId, usize>)> {
        self.bags.iter()
    }
}
