//! Tests for export module

use super::*;
use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn sample() -> Vec<Value> {
    vec![
        json!({
            "id": "a1",
            "created": "2024-01-15T10:30:00.123456+00:00",
            "updated": "2024-01-16T08:00:00+00:00",
            "user": "acct:alice@hypothes.is",
            "uri": "https://example.com/page",
            "text": "first line\nsecond, line",
            "tags": ["rust", "notes"],
            "group": "__world__",
            "document": {"title": ["Example Page"]},
            "target": [{
                "source": "https://example.com/page",
                "selector": [
                    {"type": "RangeSelector", "startContainer": "/p[1]"},
                    {"type": "TextQuoteSelector", "exact": "quoted \"text\""}
                ]
            }]
        }),
        json!({
            "id": "a2",
            "created": "2024-01-10T09:00:00Z",
            "user": "acct:bob@hypothes.is",
            "uri": "https://example.com/other",
            "text": "   ",
            "tags": ["rust"],
            "group": "g123",
            "references": ["a1", "a0"]
        }),
    ]
}

// ============================================================================
// Helper Tests
// ============================================================================

#[test]
fn test_extract_username() {
    assert_eq!(extract_username(Some("acct:alice@hypothes.is")), "alice");
    assert_eq!(extract_username(Some("plainname")), "plainname");
    assert_eq!(extract_username(Some("")), "(unknown)");
    assert_eq!(extract_username(None), "(unknown)");
}

#[test]
fn test_extract_quote() {
    let annotations = sample();
    assert_eq!(extract_quote(&annotations[0]), "quoted \"text\"");
    assert_eq!(extract_quote(&annotations[1]), "");
    assert_eq!(extract_quote(&json!({"target": [{"source": "x"}]})), "");
}

#[test]
fn test_document_title() {
    assert_eq!(document_title(&sample()[0]), "Example Page");
    assert_eq!(document_title(&json!({"document": {"title": "Plain"}})), "Plain");
    assert_eq!(document_title(&json!({"document": {}})), "");
}

#[test]
fn test_parse_date() {
    let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();

    assert_eq!(parse_date(Some("2024-01-15T10:30:00Z")), Some(expected));
    assert_eq!(parse_date(Some("2024-01-15T10:30:00+00:00")), Some(expected));
    assert_eq!(parse_date(Some("2024-01-15T10:30:00")), Some(expected));
    assert_eq!(
        parse_date(Some("2024-01-15T12:30:00+02:00")),
        Some(expected)
    );
    assert!(parse_date(Some("2024-01-15T10:30:00.123456+00:00")).is_some());
    assert_eq!(parse_date(Some("yesterday")), None);
    assert_eq!(parse_date(Some("")), None);
    assert_eq!(parse_date(None), None);
}

#[test]
fn test_truncate() {
    assert_eq!(truncate(Some("short"), 60), "short");
    assert_eq!(truncate(Some("line one\nline two"), 60), "line one line two");
    assert_eq!(truncate(Some("abcdefghij"), 8), "abcde...");
    assert_eq!(truncate(Some("  "), 10), "(no text)");
    assert_eq!(truncate(None, 10), "(no text)");
    // Multi-byte characters are not split
    assert_eq!(truncate(Some("ééééééé"), 5), "éé...");
}

// ============================================================================
// JSON Export Tests
// ============================================================================

#[test]
fn test_json_document() {
    let exported_at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let document = json_document(&sample(), exported_at);

    assert_eq!(document["exported_at"], "2024-02-01T00:00:00+00:00");
    assert_eq!(document["count"], 2);
    assert_eq!(document["annotations"][1]["references"], json!(["a1", "a0"]));
}

#[test]
fn test_export_json_round_trips_annotations() {
    let mut out = Vec::new();
    export_json(&sample(), &mut out).unwrap();

    let parsed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed["count"], 2);
    assert_eq!(parsed["annotations"], Value::Array(sample()));
    assert!(parse_date(parsed["exported_at"].as_str()).is_some());
}

// ============================================================================
// CSV Export Tests
// ============================================================================

#[test]
fn test_export_csv() {
    let mut out = Vec::new();
    export_csv(&sample(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.split("\r\n").collect();

    assert_eq!(
        lines[0],
        "id,created,updated,user,uri,title,text,tags,quote,group,references"
    );
    assert_eq!(
        lines[1],
        "a1,2024-01-15T10:30:00.123456+00:00,2024-01-16T08:00:00+00:00,alice,\
         https://example.com/page,Example Page,\"first line second, line\",rust|notes,\
         \"quoted \"\"text\"\"\",__world__,"
    );
    assert_eq!(
        lines[2],
        "a2,2024-01-10T09:00:00Z,,bob,https://example.com/other,,   ,rust,,g123,a1|a0"
    );
    assert_eq!(lines[3], "");
}

#[test]
fn test_export_csv_empty() {
    let mut out = Vec::new();
    export_csv(&[], &mut out).unwrap();
    assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 1);
}

#[test]
fn test_export_csv_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annotations.csv");

    export_csv(&sample(), std::fs::File::create(&path).unwrap()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
}

// ============================================================================
// Stats Tests
// ============================================================================

#[test]
fn test_collection_stats() {
    let annotations = sample();
    let stats = CollectionStats::from_annotations(&annotations);

    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_user.get("alice"), Some(&1));
    assert_eq!(stats.by_user.get("bob"), Some(&1));
    assert_eq!(stats.top_tags(1), vec![("rust", 2)]);
    assert_eq!(stats.by_group.len(), 2);
    assert_eq!(stats.earliest, NaiveDate::from_ymd_opt(2024, 1, 10));
    assert_eq!(stats.latest, NaiveDate::from_ymd_opt(2024, 1, 15));
    assert_eq!(stats.with_text, 1);
    assert_eq!(stats.highlights_only, 1);
    assert_eq!(stats.replies, 1);
}

#[test]
fn test_collection_stats_defaults_for_missing_fields() {
    let stats = CollectionStats::from_annotations(&[json!({})]);

    assert_eq!(stats.by_user.get("(unknown)"), Some(&1));
    assert_eq!(stats.by_group.get("__world__"), Some(&1));
    assert_eq!(stats.by_uri.get("unknown"), Some(&1));
    assert_eq!(stats.earliest, None);
    assert_eq!(stats.highlights_only, 1);
}

#[test]
fn test_most_common_orders_by_count_then_key() {
    let annotations = vec![
        json!({"tags": ["b", "a"]}),
        json!({"tags": ["c", "a"]}),
    ];
    let stats = CollectionStats::from_annotations(&annotations);

    assert_eq!(stats.top_tags(10), vec![("a", 2), ("b", 1), ("c", 1)]);
}

#[test]
fn test_stats_display() {
    let annotations = sample();
    let rendered = CollectionStats::from_annotations(&annotations).to_string();

    assert!(rendered.starts_with("Total annotations: 2\n"));
    assert!(rendered.contains("By Group:\n  Public: 1\n  g123: 1\n"));
    assert!(rendered.contains("Earliest: 2024-01-10"));
    assert!(rendered.contains("Replies: 1"));

    let empty = CollectionStats::default().to_string();
    assert_eq!(empty, "Total annotations: 0\n");
}
