//! Reconcile output specs

use crate::prelude::*;

#[test]
fn listed_objects_are_settled() {
    let temp = Project::empty();
    let events = temp.events(&[&listed(&["a", "b"])]);

    temp.recond()
        .arg("--events")
        .arg(&events)
        .arg("--exit-on-eof")
        .passes()
        .stdout_has("settled ns/a\n")
        .stdout_has("settled ns/b\n");
}

#[test]
fn deleted_object_is_removed() {
    let temp = Project::empty();
    let events = temp.events(&[&listed(&["a", "b"]), &deleted("b")]);

    temp.recond()
        .arg("--events")
        .arg(&events)
        .arg("--exit-on-eof")
        .passes()
        .stdout_has("settled ns/a\n")
        .stdout_has("removed ns/b\n");
}

#[test]
fn objects_missing_from_a_relisting_are_removed() {
    let temp = Project::empty();
    let events = temp.events(&[&listed(&["a"]), &added("b"), &listed(&["b"])]);

    temp.recond()
        .arg("--events")
        .arg(&events)
        .arg("--exit-on-eof")
        .passes()
        .stdout_has("removed ns/a\n")
        .stdout_has("settled ns/b\n");
}

#[test]
fn events_are_read_from_stdin() {
    let temp = Project::empty();
    let input = format!("{}\n{}\n", listed(&["a"]), added("b"));

    temp.recond()
        .arg("--exit-on-eof")
        .write_stdin(input)
        .passes()
        .stdout_has("settled ns/a\n")
        .stdout_has("settled ns/b\n");
}

#[test]
fn malformed_line_is_logged_and_skipped() {
    let temp = Project::empty();
    let config = temp.file("recon.toml", "[informer]\nfeed_retry_delay = \"10ms\"\n");
    let events = temp.events(&["{not json", &listed(&["a"])]);

    temp.recond()
        .arg("--config")
        .arg(&config)
        .arg("--events")
        .arg(&events)
        .arg("--exit-on-eof")
        .passes()
        .stdout_has("settled ns/a\n")
        .stderr_has("malformed event at line 1");
}
