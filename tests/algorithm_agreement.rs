//! Cross-checks of the three shortest-path algorithms on built graphs.

mod fixtures;

use chrono::NaiveDate;

use cafe_discovery::Error;
use cafe_discovery::filters::PreferenceFilters;
use cafe_discovery::graph::{Graph, USER_NODE_ID, build_preference_graph};
use cafe_discovery::shortest_path::Algorithm;

#[test]
fn algorithms_agree_without_preference_deltas() {
    let snapshot = fixtures::all_cafes()
        .tags(fixtures::tags(101, true, true, true))
        .tags(fixtures::tags(104, false, true, false))
        .tags(fixtures::tags(201, false, true, true))
        .build();
    let now = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();

    // Only hard filters: no branch of the cost model fires.
    let filter_sets = [
        PreferenceFilters::default(),
        PreferenceFilters {
            wifi: Some(true),
            ..PreferenceFilters::default()
        },
        PreferenceFilters {
            max_distance_km: Some(3.0),
            ..PreferenceFilters::default()
        },
    ];

    for filters in &filter_sets {
        let built = build_preference_graph(&snapshot, fixtures::LIMA_USER, filters, now);
        let dijkstra = Algorithm::Dijkstra.run(&built.graph, built.user_node).unwrap();
        let floyd = Algorithm::FloydWarshall.run(&built.graph, built.user_node).unwrap();
        let bellman = Algorithm::BellmanFord.run(&built.graph, built.user_node).unwrap();

        for &node in built.graph.nodes() {
            let expected = dijkstra.distance_to(node);
            assert_eq!(floyd.distance_to(node), expected, "Floyd-Warshall differs at {}", node);
            assert_eq!(bellman.distance_to(node), expected, "Bellman-Ford differs at {}", node);
            if node != USER_NODE_ID {
                assert_eq!(Some(expected), built.graph.weight(USER_NODE_ID, node));
            }
        }
    }
}

#[test]
fn bellman_ford_reports_negative_cycle() {
    let mut graph = Graph::new();
    graph.add_edge(USER_NODE_ID, 101, 1.2);
    graph.add_edge(USER_NODE_ID, 102, 0.4);
    graph.add_edge(101, 102, -2.0);
    graph.add_edge(102, 101, 1.0);

    let result = Algorithm::BellmanFord.run(&graph, USER_NODE_ID);
    assert!(matches!(result, Err(Error::NegativeCycleDetected)));
}

#[test]
fn negative_star_edges_agree_across_algorithms() {
    let mut graph = Graph::new();
    graph.add_edge(USER_NODE_ID, 1, -2.4);
    graph.add_edge(USER_NODE_ID, 2, 0.7);
    graph.add_edge(USER_NODE_ID, 3, -0.1);
    assert!(!graph.has_negative_edge_beyond(USER_NODE_ID));

    let reference = Algorithm::BellmanFord.run(&graph, USER_NODE_ID).unwrap();
    for algorithm in [Algorithm::Dijkstra, Algorithm::FloydWarshall] {
        let result = algorithm.run(&graph, USER_NODE_ID).unwrap();
        for &node in graph.nodes() {
            assert_eq!(result.distance_to(node), reference.distance_to(node), "{} at {}", algorithm, node);
        }
    }
}

#[test]
fn negative_edge_outside_the_star_is_flagged_and_reexpanded() {
    // A negative edge between two cafés improves a node the priority queue
    // already settled; the graph reports it and the search re-expands it.
    let mut graph = Graph::new();
    graph.add_edge(USER_NODE_ID, 1, 1.0);
    graph.add_edge(USER_NODE_ID, 2, 3.0);
    graph.add_edge(2, 1, -4.0);
    graph.add_edge(1, 3, 1.0);

    assert!(graph.has_negative_edge_beyond(USER_NODE_ID));
    let bellman = Algorithm::BellmanFord.run(&graph, USER_NODE_ID).unwrap();
    let dijkstra = Algorithm::Dijkstra.run(&graph, USER_NODE_ID).unwrap();
    for node in [1, 3] {
        assert_eq!(dijkstra.distance_to(node), bellman.distance_to(node), "node {}", node);
    }
    assert_eq!(bellman.distance_to(1), -1.0);
    assert_eq!(bellman.distance_to(3), 0.0);
}

#[test]
fn negative_cycle_stops_every_single_source_algorithm() {
    let mut graph = Graph::new();
    graph.add_edge(USER_NODE_ID, 1, 1.0);
    graph.add_edge(1, 2, -3.0);
    graph.add_edge(2, 1, 1.0);

    for algorithm in [Algorithm::Dijkstra, Algorithm::BellmanFord] {
        let result = algorithm.run(&graph, USER_NODE_ID);
        assert!(matches!(result, Err(Error::NegativeCycleDetected)), "{}", algorithm);
    }
}
