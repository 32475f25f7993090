//! Parking lot allocation
//!
//! The lot graph measures how far each spot is from the entrance; the
//! allocation engine hands out spots farthest-first using those distances.

mod allocator;
mod error;
mod facility;
mod graph;
mod plate;
mod spot;
mod types;
mod vacancy;

pub use allocator::{ParkingLot, VacancyCounts, VacancyKind};
pub use error::{ParkingError, ParkingResult};
pub use facility::{DemoLayout, ParkingFacility};
pub use graph::{LotGraph, ShortestPath};
pub use plate::{format_plate, validate_plate};
pub use spot::{CarBay, ParkingSpot, SpotKind, SpotState};
pub use types::{
    IntersectionId, SpotCategory, SpotId, VertexId, MOTORCYCLES_PER_CAR_SPOT, PLATE_MAX_LEN,
    PLATE_MIN_LEN,
};
pub use vacancy::VacancyIndex;
