//! Config file specs

use crate::prelude::*;

#[test]
fn invalid_config_fails_before_reading_events() {
    let temp = Project::empty();
    let config = temp.file("recon.toml", "[controller]\nworkers = \"many\"\n");

    temp.recond()
        .arg("--config")
        .arg(&config)
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn missing_config_fails() {
    let temp = Project::empty();

    temp.recond()
        .args(["--config", "absent.toml"])
        .fails()
        .stderr_has("failed to read config");
}

#[test]
fn state_dir_lock_is_released_on_exit() {
    let temp = Project::empty();
    let config = temp.file("recon.toml", "state_dir = \"state\"\n");
    let events = temp.events(&[&listed(&["a"])]);

    temp.recond()
        .arg("--config")
        .arg(&config)
        .arg("--events")
        .arg(&events)
        .arg("--exit-on-eof")
        .passes()
        .stdout_has("settled ns/a");

    assert!(temp.path().join("state").is_dir());
    assert!(!temp.path().join("state/recond.pid").exists());
}

#[test]
fn multiple_workers_handle_every_key() {
    let temp = Project::empty();
    let config = temp.file("recon.toml", "[controller]\nworkers = 4\n");
    let events = temp.events(&[&listed(&["a", "b", "c", "d", "e"])]);

    temp.recond()
        .arg("--config")
        .arg(&config)
        .arg("--events")
        .arg(&events)
        .arg("--exit-on-eof")
        .passes()
        .stdout_has("settled ns/a")
        .stdout_has("settled ns/c")
        .stdout_has("settled ns/e");
}
