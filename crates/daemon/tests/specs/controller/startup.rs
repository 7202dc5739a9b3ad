//! Startup sync specs

use crate::prelude::*;

#[test]
fn feed_ending_before_a_listing_aborts() {
    let temp = Project::empty();
    let events = temp.events(&[&added("a")]);

    temp.recond()
        .arg("--events")
        .arg(&events)
        .arg("--exit-on-eof")
        .fails()
        .stdout_lacks("ns/a")
        .stderr_has("cache sync aborted");
}

#[test]
fn empty_events_file_aborts() {
    let temp = Project::empty();
    let events = temp.file("events.jsonl", "");

    temp.recond()
        .arg("--events")
        .arg(&events)
        .arg("--exit-on-eof")
        .fails()
        .stderr_has("sync_aborted");
}

#[test]
fn empty_listing_starts_and_exits_cleanly() {
    let temp = Project::empty();
    let events = temp.events(&[&listed(&[])]);

    temp.recond()
        .arg("--events")
        .arg(&events)
        .arg("--exit-on-eof")
        .passes()
        .stderr_has("controller stopped");
}
