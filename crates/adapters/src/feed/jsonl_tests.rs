// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use recon_core::{Object, Resource};
use std::io::Write;

fn feed(input: &'static str) -> JsonLinesFeed<Resource, &'static [u8]> {
    JsonLinesFeed::new(input.as_bytes())
}

#[tokio::test]
async fn decodes_events_and_skips_blank_lines() {
    let mut feed = feed(concat!(
        r#"{"type":"LISTED","object":[{"metadata":{"namespace":"ns","name":"a"}}]}"#,
        "\n\n",
        r#"{"type":"DELETED","object":{"metadata":{"namespace":"ns","name":"a"}}}"#,
        "\n",
    ));

    match feed.next_event().await.unwrap() {
        Some(WatchEvent::Listed(objects)) => {
            assert_eq!(objects.len(), 1);
            assert_eq!(objects[0].key().as_str(), "ns/a");
        }
        other => panic!("expected listing, got {:?}", other),
    }
    assert!(matches!(
        feed.next_event().await.unwrap(),
        Some(WatchEvent::Deleted(_))
    ));
    assert!(feed.next_event().await.unwrap().is_none());
}

#[tokio::test]
async fn bad_line_is_reported_with_its_number_and_skipped() {
    let mut feed = feed(concat!(
        "\n",
        "not json\n",
        r#"{"type":"ADDED","object":{"metadata":{"name":"cluster-wide"}}}"#,
        "\n",
    ));

    match feed.next_event().await {
        Err(WatchError::Decode { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected decode error, got {:?}", other),
    }
    match feed.next_event().await.unwrap() {
        Some(WatchEvent::Added(object)) => assert_eq!(object.key().as_str(), "cluster-wide"),
        other => panic!("expected added, got {:?}", other),
    }
}

#[tokio::test]
async fn unreadable_line_still_counts_towards_line_numbers() {
    let mut feed: JsonLinesFeed<Resource, &'static [u8]> =
        JsonLinesFeed::new(&b"\xff\xfe\nnot json\n"[..]);

    assert!(matches!(feed.next_event().await, Err(WatchError::Io(_))));
    match feed.next_event().await {
        Err(WatchError::Decode { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected decode error, got {:?}", other),
    }
    assert!(feed.next_event().await.unwrap().is_none());
}

#[tokio::test]
async fn open_reads_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"type":"MODIFIED","object":{{"metadata":{{"namespace":"ns","name":"b"}}}}}}"#
    )
    .unwrap();

    let mut feed = JsonLinesFeed::<Resource, _>::open(file.path()).await.unwrap();
    assert!(matches!(
        feed.next_event().await.unwrap(),
        Some(WatchEvent::Modified(_))
    ));
    assert!(feed.next_event().await.unwrap().is_none());
}

#[tokio::test]
async fn open_missing_file_is_io_error() {
    let result = JsonLinesFeed::<Resource, _>::open(Path::new("/nonexistent/events.jsonl")).await;
    assert!(matches!(result, Err(WatchError::Io(_))));
}
