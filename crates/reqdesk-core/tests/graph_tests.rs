// Rust guideline compliant 2026-10-14

//! Unit tests for the relationship graph.

use chrono::{DateTime, Duration, TimeZone, Utc};
use reqdesk_core::graph::{edge_weight, similarity};
use reqdesk_core::{Record, RelationshipGraph, Status};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap()
}

/// Helper to create a record at `t0 + hours`.
fn record(category: &str, location: &str, status: Status, hours: i64) -> Record {
    let mut record = Record::at(t0() + Duration::hours(hours), location, category, "");
    record.status = status;
    record
}

#[test]
fn test_empty_graph() {
    let graph = RelationshipGraph::from_records::<Record>(&[]);
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.minimum_spanning_tree().is_empty());
}

#[test]
fn test_single_node_graph() {
    let a = record("Roads", "Main St", Status::Submitted, 0);
    let graph = RelationshipGraph::from_records(&[a.clone()]);
    assert!(graph.contains(a.id));
    assert_eq!(graph.breadth_first_search(a.id), vec![a.id]);
    assert!(graph.minimum_spanning_tree().is_empty());
}

#[test]
fn test_category_location_and_proximity_weight() {
    let a = record("Roads", "Main St", Status::Submitted, 0);
    let b = record("Roads", "Main St", Status::InProgress, 1);
    assert!((similarity(&a, &b) - 1.7).abs() < 1e-9);
    let weight = edge_weight(&a, &b).unwrap();
    assert!((weight - 1.0 / 1.7).abs() < 1e-9);
    assert!((weight - 0.588).abs() < 1e-3);
}

#[test]
fn test_proximity_window_is_exclusive() {
    let a = record("Roads", "X", Status::Submitted, 0);
    let b = record("Water", "Y", Status::Closed, 24);
    assert_eq!(similarity(&a, &b), 0.0);

    let c = record("Water", "Y", Status::Closed, 23);
    assert!((similarity(&a, &c) - 0.2).abs() < 1e-9);
}

#[test]
fn test_neighbors_sorted_by_weight() {
    let a = record("Roads", "Main St", Status::Submitted, 0);
    let close = record("Roads", "Main St", Status::Submitted, 1);
    let far = record("Water", "Elm St", Status::Submitted, 100);
    let mid = record("Roads", "Elm St", Status::Closed, 100);
    let graph = RelationshipGraph::from_records(&[a.clone(), far.clone(), mid.clone(), close.clone()]);

    let neighbors: Vec<_> = graph.neighbors_by_weight(a.id).into_iter().map(|(id, _)| id).collect();
    assert_eq!(neighbors, vec![close.id, mid.id, far.id]);
}

#[test]
fn test_disconnected_components() {
    let a = record("Roads", "Main St", Status::Submitted, 0);
    let b = record("Roads", "Main St", Status::Submitted, 2);
    let c = record("Water", "Elm St", Status::Closed, 200);
    let d = record("Water", "Elm St", Status::Closed, 201);
    let graph = RelationshipGraph::from_records(&[a.clone(), b.clone(), c.clone(), d.clone()]);

    let mut reached = graph.breadth_first_search(a.id);
    reached.sort();
    let mut expected = vec![a.id, b.id];
    expected.sort();
    assert_eq!(reached, expected);

    let forest = graph.minimum_spanning_tree();
    assert_eq!(forest.len(), 2);
}

#[test]
fn test_depth_first_goes_deep_before_wide() {
    // Chain a - b - c by proximity only; d hangs off a by location only.
    let a = record("A", "P", Status::Submitted, 0);
    let b = record("B", "Q", Status::UnderReview, 20);
    let c = record("C", "R", Status::InProgress, 40);
    let d = record("D", "p", Status::OnHold, 300);
    let graph = RelationshipGraph::from_records(&[a.clone(), b.clone(), c.clone(), d.clone()]);

    let dfs = graph.depth_first_search(a.id);
    let bfs = graph.breadth_first_search(a.id);
    assert_eq!(dfs.len(), 4);
    assert_eq!(bfs.len(), 4);
    assert_eq!(bfs[0], a.id);
    assert_eq!(bfs[3], c.id, "c is two hops away, so breadth-first reaches it last");
    let b_pos = dfs.iter().position(|id| *id == b.id).unwrap();
    let c_pos = dfs.iter().position(|id| *id == c.id).unwrap();
    assert_eq!(c_pos, b_pos + 1, "depth-first reaches c right after b");
}

#[test]
fn test_connect_matches_full_rebuild() {
    let records = vec![
        record("Roads", "Main St", Status::Submitted, 0),
        record("Water", "main st", Status::Submitted, 5),
        record("Roads", "Elm St", Status::Closed, 50),
        record("Sanitation", "Oak Ave", Status::OnHold, 500),
    ];

    let mut incremental = RelationshipGraph::new();
    for (i, record) in records.iter().enumerate() {
        incremental.connect(record, &records[..i]);
    }
    let rebuilt = RelationshipGraph::from_records(&records);

    assert_eq!(incremental.node_count(), rebuilt.node_count());
    assert_eq!(incremental.edge_count(), rebuilt.edge_count());
    let total = |g: &RelationshipGraph| -> f64 { g.minimum_spanning_tree().iter().map(|e| e.weight).sum() };
    assert!((total(&incremental) - total(&rebuilt)).abs() < 1e-9);
}

#[test]
fn test_large_rebuild_is_deterministic() {
    let records: Vec<Record> = (0..300)
        .map(|i| {
            let category = ["Roads", "Water", "Lighting"][i % 3];
            record(category, "Main St", Status::Submitted, i as i64)
        })
        .collect();
    let first = RelationshipGraph::from_records(&records);
    let second = RelationshipGraph::from_records(&records);
    assert_eq!(first.edges(), second.edges());
    assert_eq!(first.minimum_spanning_tree().len(), records.len() - 1);
}
