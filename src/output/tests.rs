//! Tests for output module

use super::*;
use crate::types::OutputRecord;
use chrono::TimeZone;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::tempdir;

// ============================================================================
// JsonLinesSink Tests
// ============================================================================

#[tokio::test]
async fn test_json_lines_sink_writes_one_line_per_record() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.emit(OutputRecord::new("first")).await.unwrap();
    sink.emit(OutputRecord::new("second\nline")).await.unwrap();
    sink.finish().await.unwrap();

    assert_eq!(sink.records(), 2);
    let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(
        output,
        "{\"response\":\"first\"}\n{\"response\":\"second\\nline\"}\n"
    );
}

#[tokio::test]
async fn test_json_lines_sink_empty() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.finish().await.unwrap();
    assert!(sink.into_inner().unwrap().is_empty());
}

// ============================================================================
// CollectSink Tests
// ============================================================================

#[tokio::test]
async fn test_collect_sink() {
    let mut sink = CollectSink::new();
    sink.emit(OutputRecord::new("a")).await.unwrap();
    sink.emit(OutputRecord::new("b")).await.unwrap();
    assert!(!sink.finished);

    sink.finish().await.unwrap();
    assert!(sink.finished);
    assert_eq!(sink.responses(), vec!["a", "b"]);
}

// ============================================================================
// Cloud Destination Tests
// ============================================================================

#[test]
fn test_build_partitioned_path() {
    let now = chrono::Utc.with_ymd_and_hms(2025, 12, 14, 9, 30, 5).unwrap();
    assert_eq!(
        build_partitioned_path(now),
        "dt=2025-12-14/responses-20251214T093005Z.jsonl"
    );
}

#[test]
fn test_parse_local_path() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().to_str().unwrap();
    let dest = CloudDestination::parse(path).unwrap();
    assert_eq!(dest.scheme(), "file");
}

#[test]
fn test_parse_local_creates_directory() {
    let temp_dir = tempdir().unwrap();
    let nested = temp_dir.path().join("out/nested");
    CloudDestination::parse(nested.to_str().unwrap()).unwrap();
    assert!(nested.is_dir());
}

#[tokio::test]
async fn test_object_store_sink_writes_on_finish() {
    let store = Arc::new(InMemory::new());
    let dest = CloudDestination::with_store(store.clone(), "exports/run", "memory");
    let mut sink = ObjectStoreSink::new(dest);

    sink.emit(OutputRecord::new("one")).await.unwrap();
    sink.emit(OutputRecord::new("two")).await.unwrap();
    assert!(sink.written().is_none());

    sink.finish().await.unwrap();
    let written = sink.written().unwrap().to_string();
    assert!(written.starts_with("memory://exports/run/dt="));
    assert!(written.ends_with(".jsonl"));

    let key = written.trim_start_matches("memory://");
    let bytes = store
        .get(&ObjectPath::from(key))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        "{\"response\":\"one\"}\n{\"response\":\"two\"}\n"
    );

    // A second finish does not write again
    sink.finish().await.unwrap();
    assert_eq!(sink.written().unwrap(), written);
}

#[tokio::test]
async fn test_open_sink_local_directory() {
    let temp_dir = tempdir().unwrap();
    let mut sink = open_sink(Some(temp_dir.path().to_str().unwrap())).unwrap();
    sink.emit(OutputRecord::new("x")).await.unwrap();
    sink.finish().await.unwrap();

    let partitions: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
    assert_eq!(partitions.len(), 1);
}
