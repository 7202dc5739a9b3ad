//! Command-line argument specs

use crate::prelude::*;

#[test]
fn help_lists_the_options() {
    let temp = Project::empty();

    temp.recond()
        .arg("--help")
        .passes()
        .stdout_has("--events")
        .stdout_has("--exit-on-eof")
        .stdout_has("--config")
        .stdout_has("--log-file");
}

#[test]
fn unknown_flag_is_rejected() {
    let temp = Project::empty();

    temp.recond()
        .arg("--bogus")
        .fails()
        .stderr_has("unexpected argument");
}

#[test]
fn missing_events_file_fails() {
    let temp = Project::empty();

    temp.recond()
        .args(["--events", "nowhere.jsonl", "--exit-on-eof"])
        .fails()
        .stderr_has("No such file");
}

#[test]
fn log_file_receives_the_logs() {
    let temp = Project::empty();
    let events = temp.events(&[&listed(&["a"])]);

    temp.recond()
        .arg("--events")
        .arg(&events)
        .args(["--exit-on-eof", "--log-file", "logs/recond.log"])
        .passes()
        .stdout_has("settled ns/a");

    let log = std::fs::read_to_string(temp.path().join("logs/recond.log")).unwrap();
    assert!(log.contains("Starting recond"), "log:\n{}", log);
    assert!(log.contains("cache synced"), "log:\n{}", log);
}
