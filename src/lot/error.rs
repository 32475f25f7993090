//! Error taxonomy for the parking allocator

use thiserror::Error;

use super::spot::SpotState;
use super::types::{IntersectionId, SpotId, VertexId};

/// Errors reported by the graph, the spots and the allocation engine.
///
/// A full lot is not an error; allocation returns `Ok(None)` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParkingError {
    #[error("Spot {0} already exists in this lot")]
    DuplicateId(SpotId),

    #[error("Invalid plate {raw:?}: formatted as {formatted:?}, expected 5-7 alphanumeric characters")]
    InvalidPlate { raw: String, formatted: String },

    #[error("Plate {0} is already parked in this lot")]
    DuplicatePlate(String),

    #[error("Plate {plate} is not parked in spot {spot}")]
    PlateNotFound { spot: SpotId, plate: String },

    #[error("No path from {from} to {to}")]
    GraphDisconnected { from: VertexId, to: VertexId },

    #[error("Vertex {0} is not part of the graph")]
    UnknownVertex(VertexId),

    #[error("Edge {a} - {b} has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { a: VertexId, b: VertexId, weight: f64 },

    #[error("Spot {spot} has invalid distance {distance}; distances must be finite and non-negative")]
    InvalidDistance { spot: SpotId, distance: f64 },

    #[error("Spot {0} not found")]
    UnknownSpot(SpotId),

    #[error("Intersection {0} already exists")]
    DuplicateIntersection(IntersectionId),

    #[error("Spot {spot} cannot {action} while {state:?}")]
    IllegalTransition {
        spot: SpotId,
        state: SpotState,
        action: &'static str,
    },

    #[error("Spot {spot} cannot be reached from the entrance")]
    SpotUnreachable {
        spot: SpotId,
        #[source]
        source: Box<ParkingError>,
    },

    #[error("Lot state is inconsistent: {0}")]
    Inconsistent(String),
}

pub type ParkingResult<T> = Result<T, ParkingError>;
