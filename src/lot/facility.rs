//! Parking facility: the lot graph and the lot it feeds
//!
//! Spots enter the lot through [`ParkingFacility::register_spot`], which runs
//! the shortest-path search from the entrance once and freezes the result as
//! the spot's distance.

use log::{debug, info};
use std::collections::HashMap;

use super::allocator::ParkingLot;
use super::error::{ParkingError, ParkingResult};
use super::graph::{LotGraph, ShortestPath};
use super::spot::ParkingSpot;
use super::types::{IntersectionId, SpotCategory, SpotId, VertexId};

/// Spots attached to each aisle intersection of the demo layout
const DEMO_SPOTS_PER_INTERSECTION: usize = 4;

/// Aisle length between two consecutive demo intersections
const DEMO_AISLE_LENGTH: f64 = 10.0;

/// Spot counts for [`ParkingFacility::create_demo_facility`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoLayout {
    pub car_spots: usize,
    pub motorcycle_spots: usize,
    pub commercial_spots: usize,
}

impl Default for DemoLayout {
    fn default() -> Self {
        Self {
            car_spots: 12,
            motorcycle_spots: 4,
            commercial_spots: 2,
        }
    }
}

impl DemoLayout {
    pub fn total_spots(&self) -> usize {
        self.car_spots + self.motorcycle_spots + self.commercial_spots
    }
}

/// A lot together with the graph its distances come from
#[derive(Debug, Clone)]
pub struct ParkingFacility {
    graph: LotGraph,
    lot: ParkingLot,

    /// Display names of the aisle intersections
    intersections: HashMap<IntersectionId, String>,

    /// Entrance-to-spot routes computed at registration
    routes: HashMap<SpotId, ShortestPath>,
}

impl ParkingFacility {
    /// Creates a facility with an empty lot and a graph holding only the entrance
    pub fn new(name: &str) -> Self {
        let mut graph = LotGraph::new(name);
        graph.add_vertex(VertexId::Entrance);

        Self {
            graph,
            lot: ParkingLot::new(name),
            intersections: HashMap::new(),
            routes: HashMap::new(),
        }
    }

    /// Adds a named intersection to the graph
    pub fn add_intersection(&mut self, id: IntersectionId, name: &str) -> ParkingResult<()> {
        if self.intersections.contains_key(&id) {
            return Err(ParkingError::DuplicateIntersection(id));
        }

        self.graph.add_vertex(VertexId::Intersection(id));
        self.intersections.insert(id, name.to_string());
        Ok(())
    }

    pub fn intersection_name(&self, id: IntersectionId) -> Option<&str> {
        self.intersections.get(&id).map(String::as_str)
    }

    /// Connects two vertices; see [`LotGraph::connect`]
    pub fn connect(
        &mut self,
        a: impl Into<VertexId>,
        b: impl Into<VertexId>,
        weight: f64,
    ) -> ParkingResult<()> {
        self.graph.connect(a.into(), b.into(), weight)
    }

    /// Disconnects two vertices; see [`LotGraph::disconnect`]
    pub fn disconnect(&mut self, a: impl Into<VertexId>, b: impl Into<VertexId>) -> bool {
        self.graph.disconnect(a.into(), b.into())
    }

    /// Adds the spot behind vertex `P_<id>` to the lot
    ///
    /// The spot's distance is the shortest path from the entrance. A spot the
    /// entrance cannot reach is rejected with [`ParkingError::SpotUnreachable`]
    /// and nothing is added.
    pub fn register_spot(
        &mut self,
        id: SpotId,
        category: SpotCategory,
    ) -> ParkingResult<&ParkingSpot> {
        if self.lot.find_spot(id).is_some() {
            return Err(ParkingError::DuplicateId(id));
        }

        let route = self
            .graph
            .shortest_path(VertexId::Entrance, VertexId::Spot(id))
            .map_err(|source| ParkingError::SpotUnreachable {
                spot: id,
                source: Box::new(source),
            })?;

        self.lot.add_spot(id, route.distance, category)?;
        debug!(
            "{}: registered {} spot {} at distance {} ({} hops)",
            self.lot.name(),
            category,
            id,
            route.distance,
            route.hops()
        );
        self.routes.insert(id, route);

        self.lot.find_spot(id).ok_or(ParkingError::UnknownSpot(id))
    }

    /// The cached entrance-to-spot route of a registered spot
    pub fn route_to(&self, id: SpotId) -> Option<&ShortestPath> {
        self.routes.get(&id)
    }

    /// Changes the name of the lot
    pub fn rename(&mut self, name: &str) {
        self.lot.rename(name);
    }

    pub fn graph(&self) -> &LotGraph {
        &self.graph
    }

    pub fn lot(&self) -> &ParkingLot {
        &self.lot
    }

    pub fn lot_mut(&mut self) -> &mut ParkingLot {
        &mut self.lot
    }

    /// Builds a single-aisle demo lot
    ///
    /// Intersections sit along one aisle leading away from the entrance, each
    /// serving up to four spots. Commercial spots come first, then motorcycle
    /// spots, then car spots, so spot ids grow with distance.
    pub fn create_demo_facility(layout: DemoLayout) -> ParkingResult<Self> {
        let mut facility = Self::new("Demo Lot");

        let categories = std::iter::repeat(SpotCategory::Commercial)
            .take(layout.commercial_spots)
            .chain(std::iter::repeat(SpotCategory::Motorcycle).take(layout.motorcycle_spots))
            .chain(std::iter::repeat(SpotCategory::Car).take(layout.car_spots));

        let mut aisle_end = VertexId::Entrance;
        for (index, category) in categories.enumerate() {
            let aisle = index / DEMO_SPOTS_PER_INTERSECTION;
            let bay = index % DEMO_SPOTS_PER_INTERSECTION;

            if bay == 0 {
                let intersection = IntersectionId(aisle as u32);
                facility.add_intersection(intersection, &format!("Aisle {}", aisle + 1))?;
                facility.connect(aisle_end, intersection, DEMO_AISLE_LENGTH)?;
                aisle_end = VertexId::Intersection(intersection);
            }

            let spot = SpotId(index as u32 + 1);
            facility.connect(aisle_end, spot, 2.0 + bay as f64 * 2.5)?;
            facility.register_spot(spot, category)?;
        }

        info!(
            "{}: demo layout ready with {} spots on {} intersections",
            facility.lot.name(),
            layout.total_spots(),
            facility.intersections.len()
        );

        Ok(facility)
    }
}
