//! Spot allocation engine
//!
//! The lot keeps four vacancy indices and a registry of parked plates. Every
//! operation validates first, then mutates the spot, re-indexes it and updates
//! the registry, so a failed call leaves the lot untouched.
//!
//! Allocation always hands out the spot farthest from the entrance, keeping
//! the near spots free for as long as possible.

use log::debug;
use std::collections::{HashMap, HashSet};

use super::error::{ParkingError, ParkingResult};
use super::plate::{format_plate, validate_plate};
use super::spot::{ParkingSpot, SpotState};
use super::types::{SpotCategory, SpotId};
use super::vacancy::VacancyIndex;

/// The four vacancy indices of a lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VacancyKind {
    VacantCar,
    VacantMotorcycle,
    VacantCommercial,
    /// Car stalls holding exactly one motorcycle
    HalfFullCar,
}

impl VacancyKind {
    pub const ALL: [VacancyKind; 4] = [
        VacancyKind::VacantCar,
        VacancyKind::VacantMotorcycle,
        VacancyKind::VacantCommercial,
        VacancyKind::HalfFullCar,
    ];

    /// The index a spot belongs to, or `None` while it cannot take anyone
    pub fn for_spot(category: SpotCategory, state: SpotState) -> Option<Self> {
        match (category, state) {
            (SpotCategory::Car, SpotState::Vacant) => Some(VacancyKind::VacantCar),
            (SpotCategory::Motorcycle, SpotState::Vacant) => Some(VacancyKind::VacantMotorcycle),
            (SpotCategory::Commercial, SpotState::Vacant) => Some(VacancyKind::VacantCommercial),
            (SpotCategory::Car, SpotState::HalfOccupied) => Some(VacancyKind::HalfFullCar),
            _ => None,
        }
    }
}

/// Sizes of the vacancy indices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VacancyCounts {
    pub car: usize,
    pub motorcycle: usize,
    pub commercial: usize,
    pub half_full_car: usize,
}

/// A parking lot and its allocation state
#[derive(Debug, Clone)]
pub struct ParkingLot {
    name: String,

    /// All spots, keyed by id
    spots: HashMap<SpotId, ParkingSpot>,

    /// Formatted plates currently parked anywhere in the lot
    assigned_plates: HashSet<String>,

    vacant_car: VacancyIndex,
    vacant_motorcycle: VacancyIndex,
    vacant_commercial: VacancyIndex,
    half_full_car: VacancyIndex,
}

impl ParkingLot {
    /// Creates an empty lot
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spots: HashMap::new(),
            assigned_plates: HashSet::new(),
            vacant_car: VacancyIndex::new(),
            vacant_motorcycle: VacancyIndex::new(),
            vacant_commercial: VacancyIndex::new(),
            half_full_car: VacancyIndex::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Changes the name of the lot
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Adds a vacant spot and indexes it
    ///
    /// `distance` must be finite and non-negative; it normally comes from the
    /// lot graph.
    pub fn add_spot(
        &mut self,
        id: SpotId,
        distance: f64,
        category: SpotCategory,
    ) -> ParkingResult<&ParkingSpot> {
        if self.spots.contains_key(&id) {
            return Err(ParkingError::DuplicateId(id));
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(ParkingError::InvalidDistance { spot: id, distance });
        }

        let spot = ParkingSpot::new(id, distance, category);
        if let Some(kind) = VacancyKind::for_spot(category, spot.state()) {
            self.index_mut(kind).insert(id, distance);
        }
        debug!("{}: added {} spot {} at distance {}", self.name, category, id, distance);

        let spot: &ParkingSpot = self.spots.entry(id).or_insert(spot);
        Ok(spot)
    }

    /// Parks a vehicle in the farthest suitable spot
    ///
    /// Motorcycles overflow into car stalls once the motorcycle spots are
    /// gone, preferring a stall that already holds one motorcycle. Returns
    /// `Ok(None)` when nothing is free.
    pub fn occupy(
        &mut self,
        raw_plate: &str,
        category: SpotCategory,
    ) -> ParkingResult<Option<&ParkingSpot>> {
        let plate = self.admit_plate(raw_plate)?;

        let assigned = match category {
            SpotCategory::Car => self.assign_whole(VacancyKind::VacantCar, &plate)?,
            SpotCategory::Commercial => self.assign_whole(VacancyKind::VacantCommercial, &plate)?,
            SpotCategory::Motorcycle => self.assign_motorcycle(&plate)?,
        };

        let Some(id) = assigned else {
            debug!("{}: no {} spot left for {}", self.name, category, plate);
            return Ok(None);
        };

        debug!("{}: {} {} parked in spot {}", self.name, category, plate, id);
        self.assigned_plates.insert(plate);
        Ok(self.spots.get(&id))
    }

    /// Parks a vehicle in a chosen spot
    ///
    /// An occupied spot only accepts a second motorcycle into a half-occupied
    /// car stall. Motorcycles can only be placed manually into car stalls.
    /// Illegal placements return `Ok(None)`.
    pub fn manually_occupy(
        &mut self,
        id: SpotId,
        raw_plate: &str,
        as_motorcycle: bool,
    ) -> ParkingResult<Option<&ParkingSpot>> {
        let plate = self.admit_plate(raw_plate)?;
        let spot = self.spots.get(&id).ok_or(ParkingError::UnknownSpot(id))?;

        let legal = match (spot.state(), as_motorcycle) {
            (SpotState::Vacant, false) => true,
            (SpotState::Vacant, true) | (SpotState::HalfOccupied, true) => {
                spot.category() == SpotCategory::Car
            }
            _ => false,
        };
        if !legal {
            debug!(
                "{}: refused manual placement of {} in spot {} ({:?})",
                self.name,
                plate,
                id,
                spot.state()
            );
            return Ok(None);
        }

        let parked = plate.clone();
        if as_motorcycle {
            self.apply(id, |spot| spot.occupy_with_motorcycle(parked).map(drop))?;
        } else {
            self.apply(id, |spot| spot.occupy(parked))?;
        }

        debug!("{}: {} manually parked in spot {}", self.name, plate, id);
        self.assigned_plates.insert(plate);
        Ok(self.spots.get(&id))
    }

    /// Frees whatever spot holds `raw_plate`
    ///
    /// Scans every spot; returns `Ok(None)` when the plate is not parked here.
    pub fn release(&mut self, raw_plate: &str) -> ParkingResult<Option<&ParkingSpot>> {
        let plate = format_plate(raw_plate);

        let Some(spot) = self.spots.values().find(|spot| spot.holds_plate(&plate)) else {
            debug!("{}: release of unknown plate {}", self.name, plate);
            return Ok(None);
        };
        let id = spot.id();
        let shared = spot.motorcycle_count() > 0;

        if shared {
            self.apply(id, |spot| spot.release_motorcycle(&plate).map(drop))?;
        } else {
            self.apply(id, |spot| spot.release().map(drop))?;
        }

        debug!("{}: {} left spot {}", self.name, plate, id);
        self.assigned_plates.remove(&plate);
        Ok(self.spots.get(&id))
    }

    /// Looks up a spot by id
    pub fn find_spot(&self, id: SpotId) -> Option<&ParkingSpot> {
        self.spots.get(&id)
    }

    /// All spots in no particular order
    pub fn spots(&self) -> impl Iterator<Item = &ParkingSpot> {
        self.spots.values()
    }

    pub fn spot_count(&self) -> usize {
        self.spots.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.spots.values().filter(|spot| spot.is_occupied()).count()
    }

    /// Whether the formatted form of `raw_plate` is parked in this lot
    pub fn is_plate_assigned(&self, raw_plate: &str) -> bool {
        self.assigned_plates.contains(&format_plate(raw_plate))
    }

    pub fn assigned_plates(&self) -> impl Iterator<Item = &str> {
        self.assigned_plates.iter().map(String::as_str)
    }

    pub fn vacancy_index(&self, kind: VacancyKind) -> &VacancyIndex {
        match kind {
            VacancyKind::VacantCar => &self.vacant_car,
            VacancyKind::VacantMotorcycle => &self.vacant_motorcycle,
            VacancyKind::VacantCommercial => &self.vacant_commercial,
            VacancyKind::HalfFullCar => &self.half_full_car,
        }
    }

    pub fn vacancy_counts(&self) -> VacancyCounts {
        VacancyCounts {
            car: self.vacant_car.len(),
            motorcycle: self.vacant_motorcycle.len(),
            commercial: self.vacant_commercial.len(),
            half_full_car: self.half_full_car.len(),
        }
    }

    /// Get a summary string for display
    pub fn summary(&self) -> String {
        let counts = self.vacancy_counts();
        format!(
            "{}: {} spots | {} occupied | {} plates | \
             vacant car {} / motorcycle {} / commercial {} | half-full car {}",
            self.name,
            self.spot_count(),
            self.occupied_count(),
            self.assigned_plates.len(),
            counts.car,
            counts.motorcycle,
            counts.commercial,
            counts.half_full_car
        )
    }

    /// Checks the registry and index invariants
    ///
    /// Every parked plate is registered exactly once, nothing else is
    /// registered, and each spot sits in exactly the index its state calls for.
    pub fn audit(&self) -> ParkingResult<()> {
        let mut parked: HashSet<&str> = HashSet::new();
        for spot in self.spots.values() {
            for plate in spot.plates() {
                if !parked.insert(plate) {
                    return Err(ParkingError::Inconsistent(format!(
                        "plate {plate} is parked twice"
                    )));
                }
                if !self.assigned_plates.contains(plate) {
                    return Err(ParkingError::Inconsistent(format!(
                        "plate {plate} in spot {} is not registered",
                        spot.id()
                    )));
                }
            }

            let expected = VacancyKind::for_spot(spot.category(), spot.state());
            for kind in VacancyKind::ALL {
                let indexed = self.vacancy_index(kind).contains(spot.id(), spot.distance());
                if indexed != (expected == Some(kind)) {
                    return Err(ParkingError::Inconsistent(format!(
                        "spot {} ({:?}) has wrong membership in {:?}",
                        spot.id(),
                        spot.state(),
                        kind
                    )));
                }
            }
        }

        if parked.len() != self.assigned_plates.len() {
            return Err(ParkingError::Inconsistent(format!(
                "{} plates registered but {} parked",
                self.assigned_plates.len(),
                parked.len()
            )));
        }

        let indexed: usize = VacancyKind::ALL
            .iter()
            .map(|kind| self.vacancy_index(*kind).len())
            .sum();
        let available = self
            .spots
            .values()
            .filter(|spot| VacancyKind::for_spot(spot.category(), spot.state()).is_some())
            .count();
        if indexed != available {
            return Err(ParkingError::Inconsistent(format!(
                "{indexed} index entries for {available} available spots"
            )));
        }

        Ok(())
    }

    /// Formats the plate and rejects plates already parked
    fn admit_plate(&self, raw_plate: &str) -> ParkingResult<String> {
        let plate = validate_plate(raw_plate)?;
        if self.assigned_plates.contains(&plate) {
            return Err(ParkingError::DuplicatePlate(plate));
        }
        Ok(plate)
    }

    /// Gives the farthest spot of one index to a full-size vehicle
    fn assign_whole(&mut self, kind: VacancyKind, plate: &str) -> ParkingResult<Option<SpotId>> {
        let Some(id) = self.vacancy_index(kind).peek_farthest() else {
            return Ok(None);
        };

        self.apply(id, |spot| spot.occupy(plate.to_string()))?;
        Ok(Some(id))
    }

    fn assign_motorcycle(&mut self, plate: &str) -> ParkingResult<Option<SpotId>> {
        if self.vacant_motorcycle.peek_farthest().is_some() {
            return self.assign_whole(VacancyKind::VacantMotorcycle, plate);
        }

        let overflow = self
            .half_full_car
            .peek_farthest()
            .or_else(|| self.vacant_car.peek_farthest());
        let Some(id) = overflow else {
            return Ok(None);
        };

        let state = self.apply(id, |spot| spot.occupy_with_motorcycle(plate.to_string()))?;
        debug!("{}: motorcycle {} overflowed into car spot {} ({:?})", self.name, plate, id, state);
        Ok(Some(id))
    }

    /// Runs a spot transition and moves the spot to the index of its new state
    fn apply<T>(
        &mut self,
        id: SpotId,
        transition: impl FnOnce(&mut ParkingSpot) -> ParkingResult<T>,
    ) -> ParkingResult<T> {
        let spot = self
            .spots
            .get_mut(&id)
            .ok_or(ParkingError::UnknownSpot(id))?;

        let before = spot.state();
        let outcome = transition(&mut *spot)?;
        let (category, distance, after) = (spot.category(), spot.distance(), spot.state());

        let from = VacancyKind::for_spot(category, before);
        let to = VacancyKind::for_spot(category, after);
        if from != to {
            if let Some(kind) = from {
                self.index_mut(kind).remove(id, distance);
            }
            if let Some(kind) = to {
                self.index_mut(kind).insert(id, distance);
            }
        }

        Ok(outcome)
    }

    fn index_mut(&mut self, kind: VacancyKind) -> &mut VacancyIndex {
        match kind {
            VacancyKind::VacantCar => &mut self.vacant_car,
            VacancyKind::VacantMotorcycle => &mut self.vacant_motorcycle,
            VacancyKind::VacantCommercial => &mut self.vacant_commercial,
            VacancyKind::HalfFullCar => &mut self.half_full_car,
        }
    }
}
