//! Vacancy index ordered by distance from the entrance
//!
//! Keys are `(distance, id)` so equal distances stay distinct; the farthest
//! spot sits at the end of the set.

use ordered_float::OrderedFloat;
use std::collections::BTreeSet;

use super::types::SpotId;

type VacancyKey = (OrderedFloat<f64>, SpotId);

/// Spots available for one kind of assignment, farthest first
#[derive(Debug, Clone, Default)]
pub struct VacancyIndex {
    entries: BTreeSet<VacancyKey>,
}

impl VacancyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the spot was already indexed
    pub fn insert(&mut self, id: SpotId, distance: f64) -> bool {
        self.entries.insert((OrderedFloat(distance), id))
    }

    /// Returns false if the spot was not indexed
    pub fn remove(&mut self, id: SpotId, distance: f64) -> bool {
        self.entries.remove(&(OrderedFloat(distance), id))
    }

    pub fn contains(&self, id: SpotId, distance: f64) -> bool {
        self.entries.contains(&(OrderedFloat(distance), id))
    }

    /// The farthest spot, without removing it
    pub fn peek_farthest(&self) -> Option<SpotId> {
        self.entries.last().map(|(_, id)| *id)
    }

    /// Removes and returns the farthest spot
    pub fn pop_farthest(&mut self) -> Option<(SpotId, f64)> {
        self.entries
            .pop_last()
            .map(|(distance, id)| (id, distance.into_inner()))
    }

    /// Indexed spots from farthest to nearest
    pub fn iter_farthest_first(&self) -> impl Iterator<Item = (SpotId, f64)> + '_ {
        self.entries
            .iter()
            .rev()
            .map(|(distance, id)| (*id, distance.into_inner()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
