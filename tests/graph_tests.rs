//! Lot graph and shortest-path tests

use parking_allocator::lot::{
    IntersectionId, LotGraph, ParkingError, SpotId, VertexId,
};

const I1: VertexId = VertexId::Intersection(IntersectionId(1));
const I2: VertexId = VertexId::Intersection(IntersectionId(2));
const SPOT7: VertexId = VertexId::Spot(SpotId(7));

fn entrance_to_spot7() -> LotGraph {
    let mut graph = LotGraph::new("Test Lot");
    graph.connect(VertexId::Entrance, I1, 3.0).unwrap();
    graph.connect(I1, SPOT7, 4.0).unwrap();
    graph
}

#[test]
fn test_graph_id_follows_lot_name() {
    let graph = LotGraph::new("North Garage");
    assert_eq!(graph.id(), "North Garage GRAPH");
    assert_eq!(graph.vertex_count(), 0);
}

#[test]
fn test_shortest_path_through_intersection() {
    let graph = entrance_to_spot7();

    let route = graph.shortest_path(VertexId::Entrance, SPOT7).unwrap();
    assert_eq!(route.path, vec![VertexId::Entrance, I1, SPOT7]);
    assert_eq!(route.distance, 7.0);
    assert_eq!(route.hops(), 2);
}

#[test]
fn test_shortest_path_fails_once_edge_removed() {
    let mut graph = entrance_to_spot7();
    assert!(graph.disconnect(I1, SPOT7));

    let result = graph.shortest_path(VertexId::Entrance, SPOT7);
    assert_eq!(
        result,
        Err(ParkingError::GraphDisconnected {
            from: VertexId::Entrance,
            to: SPOT7,
        })
    );
}

#[test]
fn test_shortest_path_prefers_lighter_detour() {
    let mut graph = entrance_to_spot7();
    // Direct edge is heavier than going through I1
    graph.connect(VertexId::Entrance, SPOT7, 9.0).unwrap();
    graph.connect(VertexId::Entrance, I2, 1.0).unwrap();
    graph.connect(I2, SPOT7, 1.5).unwrap();

    let route = graph.shortest_path(VertexId::Entrance, SPOT7).unwrap();
    assert_eq!(route.path, vec![VertexId::Entrance, I2, SPOT7]);
    assert_eq!(route.distance, 2.5);
}

#[test]
fn test_shortest_path_is_symmetric() {
    let graph = entrance_to_spot7();

    let route = graph.shortest_path(SPOT7, VertexId::Entrance).unwrap();
    assert_eq!(route.path, vec![SPOT7, I1, VertexId::Entrance]);
    assert_eq!(route.distance, 7.0);
}

#[test]
fn test_shortest_path_to_self() {
    let graph = entrance_to_spot7();

    let route = graph.shortest_path(I1, I1).unwrap();
    assert_eq!(route.path, vec![I1]);
    assert_eq!(route.distance, 0.0);
}

#[test]
fn test_shortest_path_unknown_vertex() {
    let graph = entrance_to_spot7();

    let missing = VertexId::Spot(SpotId(99));
    assert_eq!(
        graph.shortest_path(VertexId::Entrance, missing),
        Err(ParkingError::UnknownVertex(missing))
    );
}

#[test]
fn test_isolated_vertex_is_disconnected() {
    let mut graph = entrance_to_spot7();
    graph.add_vertex(I2);

    assert!(matches!(
        graph.shortest_path(VertexId::Entrance, I2),
        Err(ParkingError::GraphDisconnected { .. })
    ));
}

#[test]
fn test_connect_overwrites_weight() {
    let mut graph = entrance_to_spot7();
    graph.connect(SPOT7, I1, 1.0).unwrap();

    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edge_weight(I1, SPOT7), Some(1.0));
    assert_eq!(graph.edge_weight(SPOT7, I1), Some(1.0));
    assert_eq!(
        graph.shortest_path(VertexId::Entrance, SPOT7).unwrap().distance,
        4.0
    );
}

#[test]
fn test_connect_rejects_negative_and_nan_weights() {
    let mut graph = entrance_to_spot7();

    assert!(matches!(
        graph.connect(I1, I2, -1.0),
        Err(ParkingError::InvalidWeight { .. })
    ));
    assert!(matches!(
        graph.connect(I1, I2, f64::NAN),
        Err(ParkingError::InvalidWeight { .. })
    ));
    assert!(!graph.contains_vertex(I2));
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_disconnect_twice_matches_once() {
    let mut graph = entrance_to_spot7();

    assert!(graph.disconnect(VertexId::Entrance, I1));
    let vertices = graph.vertex_count();
    let edges = graph.edge_count();

    assert!(!graph.disconnect(VertexId::Entrance, I1));
    assert!(!graph.disconnect(I1, VertexId::Entrance));
    assert_eq!(graph.vertex_count(), vertices);
    assert_eq!(graph.edge_count(), edges);
    assert!(!graph.is_connected(VertexId::Entrance, I1));
    assert!(graph.is_connected(I1, SPOT7));
}

#[test]
fn test_disconnect_unknown_vertices_is_noop() {
    let mut graph = entrance_to_spot7();
    assert!(!graph.disconnect(I2, VertexId::Spot(SpotId(3))));
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_add_vertex_is_idempotent() {
    let mut graph = entrance_to_spot7();
    let before = graph.vertex_count();

    graph.add_vertex(I1);
    graph.add_vertex(VertexId::Entrance);
    assert_eq!(graph.vertex_count(), before);
}

#[test]
fn test_neighbors_report_both_directions() {
    let graph = entrance_to_spot7();

    let mut around_i1 = graph.neighbors(I1).unwrap();
    around_i1.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(around_i1, vec![(VertexId::Entrance, 3.0), (SPOT7, 4.0)]);

    assert_eq!(graph.neighbors(SPOT7).unwrap(), vec![(I1, 4.0)]);
}

#[test]
fn test_repeated_queries_do_not_share_state() {
    let mut graph = entrance_to_spot7();
    graph.connect(VertexId::Entrance, I2, 2.0).unwrap();

    let first = graph.shortest_path(VertexId::Entrance, SPOT7).unwrap();
    let second = graph.shortest_path(I2, SPOT7).unwrap();
    let third = graph.shortest_path(VertexId::Entrance, SPOT7).unwrap();

    assert_eq!(first, third);
    assert_eq!(second.path, vec![I2, VertexId::Entrance, I1, SPOT7]);
    assert_eq!(second.distance, 9.0);
}

#[test]
fn test_vertex_display_names() {
    assert_eq!(VertexId::Entrance.to_string(), "ENTRANCE");
    assert_eq!(I1.to_string(), "I_1");
    assert_eq!(SPOT7.to_string(), "P_7");
}
