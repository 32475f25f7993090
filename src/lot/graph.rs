//! Lot graph for entrance-to-spot distances
//!
//! An undirected weighted graph of the entrance, the aisle intersections and
//! the spot vertices. Distances are computed once per spot with Dijkstra's
//! algorithm and then cached by the facility.

use log::debug;
use ordered_float::OrderedFloat;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::{EdgeRef, NodeIndexable};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::error::{ParkingError, ParkingResult};
use super::types::VertexId;

/// Result of a shortest-path query
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Vertices from start to end, both included
    pub path: Vec<VertexId>,
    /// Sum of the edge weights along `path`
    pub distance: f64,
}

impl ShortestPath {
    /// Number of edges walked
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Per-run Dijkstra bookkeeping, indexed by node index
///
/// Rebuilt for every query so nothing leaks between runs.
struct SearchState {
    tentative: Vec<f64>,
    visited: Vec<bool>,
    predecessor: Vec<Option<NodeIndex>>,
}

impl SearchState {
    fn new(node_bound: usize) -> Self {
        Self {
            tentative: vec![f64::INFINITY; node_bound],
            visited: vec![false; node_bound],
            predecessor: vec![None; node_bound],
        }
    }
}

/// Undirected lot graph
#[derive(Debug, Clone)]
pub struct LotGraph {
    id: String,

    /// The underlying petgraph undirected graph; node weights are vertex ids
    graph: UnGraph<VertexId, f64>,

    /// Maps vertex ids to their node indices in the graph
    vertex_to_node: HashMap<VertexId, NodeIndex>,
}

impl LotGraph {
    /// Creates an empty graph; its id is `"<name> GRAPH"`
    pub fn new(name: &str) -> Self {
        Self {
            id: format!("{name} GRAPH"),
            graph: UnGraph::default(),
            vertex_to_node: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds a vertex; adding an existing vertex is a no-op
    pub fn add_vertex(&mut self, vertex: VertexId) -> NodeIndex {
        if let Some(node) = self.vertex_to_node.get(&vertex) {
            return *node;
        }

        let node = self.graph.add_node(vertex);
        self.vertex_to_node.insert(vertex, node);
        node
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertex_to_node.contains_key(&vertex)
    }

    /// Connects two vertices in both directions
    ///
    /// Reconnecting an already connected pair overwrites the weight. Missing
    /// vertices are added first.
    pub fn connect(&mut self, a: VertexId, b: VertexId, weight: f64) -> ParkingResult<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ParkingError::InvalidWeight { a, b, weight });
        }

        let a_node = self.add_vertex(a);
        let b_node = self.add_vertex(b);
        self.graph.update_edge(a_node, b_node, weight);
        Ok(())
    }

    /// Removes the edge between two vertices
    ///
    /// Returns whether an edge was removed; disconnected or unknown pairs are
    /// left untouched.
    pub fn disconnect(&mut self, a: VertexId, b: VertexId) -> bool {
        let (Some(a_node), Some(b_node)) =
            (self.vertex_to_node.get(&a), self.vertex_to_node.get(&b))
        else {
            return false;
        };

        match self.graph.find_edge(*a_node, *b_node) {
            Some(edge) => {
                self.graph.remove_edge(edge);
                true
            }
            None => false,
        }
    }

    pub fn is_connected(&self, a: VertexId, b: VertexId) -> bool {
        self.edge_weight(a, b).is_some()
    }

    /// Weight of the edge between two vertices, if they are adjacent
    pub fn edge_weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        let a_node = self.vertex_to_node.get(&a)?;
        let b_node = self.vertex_to_node.get(&b)?;
        let edge = self.graph.find_edge(*a_node, *b_node)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Adjacent vertices with their edge weights
    pub fn neighbors(&self, vertex: VertexId) -> ParkingResult<Vec<(VertexId, f64)>> {
        let node = self.node(vertex)?;
        Ok(self
            .graph
            .edges(node)
            .map(|edge| (self.graph[edge.target()], *edge.weight()))
            .collect())
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Finds the shortest path between two vertices with Dijkstra's algorithm
    ///
    /// Fails with [`ParkingError::GraphDisconnected`] when `end` cannot be
    /// reached from `start`.
    pub fn shortest_path(&self, start: VertexId, end: VertexId) -> ParkingResult<ShortestPath> {
        let start_node = self.node(start)?;
        let end_node = self.node(end)?;

        let mut state = SearchState::new(self.graph.node_bound());
        state.tentative[start_node.index()] = 0.0;

        let mut queue = BinaryHeap::new();
        queue.push(Reverse((OrderedFloat(0.0), start_node)));

        while let Some(Reverse((_, current))) = queue.pop() {
            // Stale entries for a settled vertex
            if state.visited[current.index()] {
                continue;
            }
            state.visited[current.index()] = true;
            let current_distance = state.tentative[current.index()];

            for edge in self.graph.edges(current) {
                let neighbor = edge.target();
                if state.visited[neighbor.index()] {
                    continue;
                }

                let candidate = current_distance + *edge.weight();
                if candidate < state.tentative[neighbor.index()] {
                    state.tentative[neighbor.index()] = candidate;
                    state.predecessor[neighbor.index()] = Some(current);
                    queue.push(Reverse((OrderedFloat(candidate), neighbor)));
                }
            }
        }

        let path = self.reconstruct(&state, start_node, end_node)?;
        let distance = state.tentative[end_node.index()];
        debug!(
            "{}: shortest path {} -> {} is {} over {} hops",
            self.id,
            start,
            end,
            distance,
            path.len().saturating_sub(1)
        );

        Ok(ShortestPath { path, distance })
    }

    /// Walks predecessor links back from `end` to `start`
    fn reconstruct(
        &self,
        state: &SearchState,
        start_node: NodeIndex,
        end_node: NodeIndex,
    ) -> ParkingResult<Vec<VertexId>> {
        let disconnected = || ParkingError::GraphDisconnected {
            from: self.graph[start_node],
            to: self.graph[end_node],
        };

        let mut path = vec![self.graph[end_node]];
        let mut cursor = end_node;
        while cursor != start_node {
            let previous = state.predecessor[cursor.index()].ok_or_else(disconnected)?;
            path.push(self.graph[previous]);
            cursor = previous;

            if path.len() > self.graph.node_count() {
                return Err(ParkingError::Inconsistent(format!(
                    "predecessor chain from {} loops",
                    self.graph[end_node]
                )));
            }
        }

        path.reverse();
        Ok(path)
    }

    fn node(&self, vertex: VertexId) -> ParkingResult<NodeIndex> {
        self.vertex_to_node
            .get(&vertex)
            .copied()
            .ok_or(ParkingError::UnknownVertex(vertex))
    }
}
