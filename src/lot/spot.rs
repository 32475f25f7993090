//! Parking spot state machine
//!
//! A spot only changes its own fields. Moving it between the lot's vacancy
//! indices is the allocator's job.

use super::error::{ParkingError, ParkingResult};
use super::types::{SpotCategory, SpotId, MOTORCYCLES_PER_CAR_SPOT};

/// Observable occupancy of a spot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpotState {
    Vacant,
    /// Holds a single vehicle of the spot's own size
    Occupied,
    /// Car stall holding one motorcycle, one slot free
    HalfOccupied,
    /// Car stall holding two motorcycles
    FullyShared,
}

/// Occupancy of a car stall
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarBay {
    Vacant,
    Car(String),
    /// At least one slot is filled
    Motorcycles([Option<String>; MOTORCYCLES_PER_CAR_SPOT]),
}

/// Category-specific payload of a spot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotKind {
    Car(CarBay),
    Motorcycle(Option<String>),
    Commercial(Option<String>),
}

/// A parking spot in the lot
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingSpot {
    id: SpotId,
    /// Fixed at creation from the lot graph
    distance: f64,
    kind: SpotKind,
}

impl ParkingSpot {
    pub fn new(id: SpotId, distance: f64, category: SpotCategory) -> Self {
        let kind = match category {
            SpotCategory::Car => SpotKind::Car(CarBay::Vacant),
            SpotCategory::Motorcycle => SpotKind::Motorcycle(None),
            SpotCategory::Commercial => SpotKind::Commercial(None),
        };

        Self { id, distance, kind }
    }

    pub fn id(&self) -> SpotId {
        self.id
    }

    /// Distance from the lot entrance
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn category(&self) -> SpotCategory {
        match self.kind {
            SpotKind::Car(_) => SpotCategory::Car,
            SpotKind::Motorcycle(_) => SpotCategory::Motorcycle,
            SpotKind::Commercial(_) => SpotCategory::Commercial,
        }
    }

    pub fn kind(&self) -> &SpotKind {
        &self.kind
    }

    pub fn state(&self) -> SpotState {
        match &self.kind {
            SpotKind::Car(CarBay::Vacant)
            | SpotKind::Motorcycle(None)
            | SpotKind::Commercial(None) => SpotState::Vacant,
            SpotKind::Car(CarBay::Car(_))
            | SpotKind::Motorcycle(Some(_))
            | SpotKind::Commercial(Some(_)) => SpotState::Occupied,
            SpotKind::Car(CarBay::Motorcycles(slots)) => {
                if slots.iter().all(Option::is_some) {
                    SpotState::FullyShared
                } else {
                    SpotState::HalfOccupied
                }
            }
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.state() != SpotState::Vacant
    }

    /// Plate of the single vehicle holding the spot, if any
    pub fn plate(&self) -> Option<&str> {
        match &self.kind {
            SpotKind::Car(CarBay::Car(plate))
            | SpotKind::Motorcycle(Some(plate))
            | SpotKind::Commercial(Some(plate)) => Some(plate),
            _ => None,
        }
    }

    /// Motorcycle slots of a car stall; always empty for other categories
    pub fn motorcycle_plates(&self) -> [Option<&str>; MOTORCYCLES_PER_CAR_SPOT] {
        match &self.kind {
            SpotKind::Car(CarBay::Motorcycles([first, second])) => {
                [first.as_deref(), second.as_deref()]
            }
            _ => [None, None],
        }
    }

    /// Number of motorcycles sharing a car stall
    pub fn motorcycle_count(&self) -> usize {
        self.motorcycle_plates().iter().flatten().count()
    }

    /// Every plate currently parked here
    pub fn plates(&self) -> Vec<&str> {
        let mut plates: Vec<&str> = self.motorcycle_plates().into_iter().flatten().collect();
        plates.extend(self.plate());
        plates
    }

    pub fn holds_plate(&self, plate: &str) -> bool {
        self.motorcycle_plates().contains(&Some(plate)) || self.plate() == Some(plate)
    }

    /// Parks a vehicle of the spot's own size
    pub fn occupy(&mut self, plate: String) -> ParkingResult<()> {
        let (id, state) = (self.id, self.state());
        match &mut self.kind {
            SpotKind::Car(bay @ CarBay::Vacant) => *bay = CarBay::Car(plate),
            SpotKind::Motorcycle(slot @ None) | SpotKind::Commercial(slot @ None) => {
                *slot = Some(plate)
            }
            _ => return Err(illegal(id, state, "occupy")),
        }
        Ok(())
    }

    /// Frees a spot held by a single vehicle and returns its plate
    pub fn release(&mut self) -> ParkingResult<String> {
        let (id, state) = (self.id, self.state());
        let released = match &mut self.kind {
            SpotKind::Car(bay) => match std::mem::replace(bay, CarBay::Vacant) {
                CarBay::Car(plate) => Some(plate),
                other => {
                    *bay = other;
                    None
                }
            },
            SpotKind::Motorcycle(slot) | SpotKind::Commercial(slot) => slot.take(),
        };

        released.ok_or_else(|| illegal(id, state, "release"))
    }

    /// Parks a motorcycle in a car stall, filling slot 1 before slot 2
    pub fn occupy_with_motorcycle(&mut self, plate: String) -> ParkingResult<SpotState> {
        let (id, state) = (self.id, self.state());
        match &mut self.kind {
            SpotKind::Car(bay @ CarBay::Vacant) => {
                *bay = CarBay::Motorcycles([Some(plate), None]);
            }
            SpotKind::Car(CarBay::Motorcycles(slots)) => {
                match slots.iter_mut().find(|slot| slot.is_none()) {
                    Some(slot) => *slot = Some(plate),
                    None => return Err(illegal(id, state, "take another motorcycle")),
                }
            }
            _ => return Err(illegal(id, state, "take a motorcycle")),
        }
        Ok(self.state())
    }

    /// Removes a motorcycle from a car stall
    ///
    /// Fails with [`ParkingError::PlateNotFound`] when neither slot holds
    /// `plate`.
    pub fn release_motorcycle(&mut self, plate: &str) -> ParkingResult<SpotState> {
        let id = self.id;
        let SpotKind::Car(bay) = &mut self.kind else {
            return Err(plate_not_found(id, plate));
        };
        let CarBay::Motorcycles(slots) = bay else {
            return Err(plate_not_found(id, plate));
        };

        let slot = slots
            .iter_mut()
            .find(|slot| slot.as_deref() == Some(plate))
            .ok_or_else(|| plate_not_found(id, plate))?;
        *slot = None;

        if slots.iter().all(Option::is_none) {
            *bay = CarBay::Vacant;
        }
        Ok(self.state())
    }
}

fn illegal(spot: SpotId, state: SpotState, action: &'static str) -> ParkingError {
    ParkingError::IllegalTransition {
        spot,
        state,
        action,
    }
}

fn plate_not_found(spot: SpotId, plate: &str) -> ParkingError {
    ParkingError::PlateNotFound {
        spot,
        plate: plate.to_string(),
    }
}
