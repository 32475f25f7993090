//! Core types for the parking allocator
//!
//! Identifiers, vertex identities and spot categories shared by the graph,
//! the spot model and the allocation engine.

use std::fmt;

/// Identifier of a parking spot, unique within one lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpotId(pub u32);

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an intersection inside the lot's road graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntersectionId(pub u32);

impl fmt::Display for IntersectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a vertex in the lot graph
///
/// Every distance is measured from [`VertexId::Entrance`]. Spot vertices share
/// their id with the lot spot they stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VertexId {
    Entrance,
    Intersection(IntersectionId),
    Spot(SpotId),
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexId::Entrance => write!(f, "ENTRANCE"),
            VertexId::Intersection(id) => write!(f, "I_{}", id.0),
            VertexId::Spot(id) => write!(f, "P_{}", id.0),
        }
    }
}

impl From<IntersectionId> for VertexId {
    fn from(id: IntersectionId) -> Self {
        VertexId::Intersection(id)
    }
}

impl From<SpotId> for VertexId {
    fn from(id: SpotId) -> Self {
        VertexId::Spot(id)
    }
}

/// Category of a parking spot, also used to describe the arriving vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpotCategory {
    /// Regular stall; may be shared by two motorcycles
    Car,
    /// Small stall for a single motorcycle
    Motorcycle,
    /// Large stall for buses and trucks
    Commercial,
}

impl SpotCategory {
    pub const ALL: [SpotCategory; 3] = [
        SpotCategory::Car,
        SpotCategory::Motorcycle,
        SpotCategory::Commercial,
    ];
}

impl fmt::Display for SpotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpotCategory::Car => "car",
            SpotCategory::Motorcycle => "motorcycle",
            SpotCategory::Commercial => "commercial",
        };
        f.write_str(label)
    }
}

/// Shortest accepted plate after formatting
pub const PLATE_MIN_LEN: usize = 5;

/// Longest accepted plate after formatting
pub const PLATE_MAX_LEN: usize = 7;

/// Number of motorcycles that fit into one car stall
pub const MOTORCYCLES_PER_CAR_SPOT: usize = 2;
