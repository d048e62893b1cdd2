// Composition tests — the full data flow chained together.
//
// Raw records -> classify -> resolve -> aggregate -> edge-list text for
// the repost network, and classify -> tag-pair expansion -> aggregate for
// the hashtag network. Filesystem round-trips (archive ingestion, bucket
// persistence, edge-list files) go through tempfile directories.

use std::fs;

use serde_json::json;

use filament::ingest;
use filament::output;
use filament::output::edgelist::{write_edgelist, write_edgelist_file};
use filament::pipeline::classify::classify_records;
use filament::pipeline::{hashtag_edges, repost_edges};

fn post(id: &str, author: &str, tags: &[&str]) -> serde_json::Value {
    let hashtags: Vec<_> = tags.iter().map(|t| json!({ "tag": t })).collect();
    json!({
        "id": id,
        "author_id": author,
        "created_at": "2021-03-01T12:00:00.000Z",
        "entities": { "hashtags": hashtags }
    })
}

fn repost(id: &str, author: &str, target: &str) -> serde_json::Value {
    json!({
        "id": id,
        "author_id": author,
        "created_at": "2021-03-01T12:05:00.000Z",
        "referenced_tweets": [{ "type": "retweeted", "id": target }]
    })
}

// ============================================================
// Repost network, end to end
// ============================================================

#[test]
fn one_repost_becomes_one_weighted_edge() {
    let batch = classify_records(vec![post("1", "alice", &[]), repost("2", "bob", "1")]);
    let (edges, resolution) = repost_edges(&batch);

    assert_eq!(resolution.connections.len(), 1);
    assert_eq!(resolution.connections[0].source, "alice");
    assert_eq!(resolution.connections[0].target, "bob");

    assert_eq!(edges.edges.len(), 1);
    assert_eq!(edges.edges[0].weight, 1);

    let mut text = Vec::new();
    write_edgelist(&edges.edges, &mut text).unwrap();
    assert_eq!(String::from_utf8(text).unwrap(), "alice bob 1\n");
}

#[test]
fn two_reposters_of_one_author_make_two_edges() {
    let batch = classify_records(vec![
        post("1", "alice", &[]),
        repost("2", "bob", "1"),
        repost("3", "carol", "1"),
    ]);
    let (edges, _) = repost_edges(&batch);

    assert_eq!(edges.edges.len(), 2);
    assert!(edges.edges.iter().all(|e| e.weight == 1));
    assert!(edges
        .edges
        .iter()
        .all(|e| e.a == "alice" || e.b == "alice"));
}

#[test]
fn self_repost_is_suppressed_but_counted() {
    let batch = classify_records(vec![post("1", "alice", &[]), repost("2", "alice", "1")]);
    let (edges, resolution) = repost_edges(&batch);

    assert_eq!(resolution.connections.len(), 1);
    assert!(edges.edges.is_empty());
    assert_eq!(edges.self_loop_events, 1);
}

#[test]
fn unknown_reference_yields_no_edges_and_one_unresolved() {
    let batch = classify_records(vec![post("1", "alice", &[]), repost("2", "bob", "99")]);
    let (edges, resolution) = repost_edges(&batch);

    assert!(resolution.connections.is_empty());
    assert_eq!(resolution.unresolved, 1);
    assert!(edges.edges.is_empty());
}

#[test]
fn repeated_interaction_accumulates_weight() {
    let batch = classify_records(vec![
        post("1", "alice", &[]),
        post("2", "alice", &[]),
        repost("10", "bob", "1"),
        repost("11", "bob", "2"),
    ]);
    let (edges, _) = repost_edges(&batch);

    assert_eq!(edges.edges.len(), 1);
    assert_eq!(edges.edges[0].weight, 2);
}

// ============================================================
// Hashtag network, end to end
// ============================================================

#[test]
fn three_tags_make_three_unit_edges() {
    let batch = classify_records(vec![post("1", "alice", &["x", "y", "z"])]);
    let edges = hashtag_edges(&batch);

    assert_eq!(edges.edges.len(), 3);
    assert!(edges.edges.iter().all(|e| e.weight == 1));
}

#[test]
fn shared_tag_pair_across_posts_accumulates_weight() {
    let batch = classify_records(vec![
        post("1", "alice", &["x", "y"]),
        post("2", "bob", &["y", "x"]),
    ]);
    let edges = hashtag_edges(&batch);

    assert_eq!(edges.edges.len(), 1);
    assert_eq!(edges.edges[0].weight, 2);
}

#[test]
fn lone_tags_stay_out_of_the_network() {
    let batch = classify_records(vec![
        post("1", "alice", &["solo"]),
        post("2", "bob", &[]),
        post("3", "carol", &["x", "y"]),
    ]);
    let edges = hashtag_edges(&batch);

    assert_eq!(edges.edges.len(), 1);
    let edge = &edges.edges[0];
    assert!(edge.a != "solo" && edge.b != "solo");
}

#[test]
fn repost_tags_do_not_enter_the_hashtag_network() {
    let mut tagged_repost = repost("2", "bob", "1");
    tagged_repost["entities"] = json!({ "hashtags": [{ "tag": "x" }, { "tag": "y" }] });

    let batch = classify_records(vec![post("1", "alice", &[]), tagged_repost]);
    let edges = hashtag_edges(&batch);
    assert!(edges.edges.is_empty());
}

// ============================================================
// Filesystem round-trips
// ============================================================

#[test]
fn archive_files_discover_load_and_classify() {
    let dir = tempfile::tempdir().unwrap();

    let chunk_a = serde_json::to_string(&vec![post("1", "alice", &[]), repost("2", "bob", "1")])
        .unwrap();
    let chunk_b = serde_json::to_string(&vec![repost("3", "carol", "1")]).unwrap();
    fs::write(dir.path().join("run_data_0001.json"), chunk_a).unwrap();
    fs::write(dir.path().join("run_data_0002.json"), chunk_b).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

    let files = ingest::discover_files(dir.path(), "*_data_*.json").unwrap();
    assert_eq!(files.len(), 2);

    let mut records = Vec::new();
    for path in &files {
        records.extend(ingest::load_file(path).unwrap());
    }
    let batch = classify_records(records);
    assert_eq!(batch.originals.len(), 1);
    assert_eq!(batch.reposts.len(), 2);
}

#[test]
fn non_array_archive_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_data_1.json");
    fs::write(&path, "{\"id\": \"1\"}").unwrap();
    assert!(ingest::load_file(&path).is_err());
}

#[test]
fn buckets_round_trip_through_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let batch = classify_records(vec![
        post("1", "alice", &["x", "y"]),
        repost("2", "bob", "1"),
        json!({ "author_id": "carol" }),
    ]);

    output::write_buckets(dir.path(), &batch).unwrap();
    let reloaded = ingest::load_buckets(dir.path()).unwrap();

    assert_eq!(reloaded.originals.len(), batch.originals.len());
    assert_eq!(reloaded.reposts.len(), batch.reposts.len());
    assert_eq!(reloaded.malformed.len(), batch.malformed.len());
    assert_eq!(reloaded.originals[0].tags, vec!["x", "y"]);

    // The reloaded buckets drive the pipeline identically
    let (edges, _) = repost_edges(&reloaded);
    assert_eq!(edges.edges.len(), 1);
}

#[test]
fn edge_list_file_round_trips_regardless_of_endpoint_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("net").join("repost.edgelist");

    let batch = classify_records(vec![
        post("1", "alice", &[]),
        repost("2", "bob", "1"),
        repost("3", "bob", "1"),
    ]);
    let (edges, _) = repost_edges(&batch);
    write_edgelist_file(&path, &edges.edges).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let fields: Vec<&str> = contents.trim_end().split(' ').collect();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[2], "2");
    // Endpoint order within the line is non-semantic
    let mut endpoints = [fields[0], fields[1]];
    endpoints.sort();
    assert_eq!(endpoints, ["alice", "bob"]);
}
