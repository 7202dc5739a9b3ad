// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.controller.workers, 1);
    assert_eq!(config.controller.max_retries, 5);
    assert_eq!(config.informer.feed_retry_delay, Duration::from_secs(1));
    assert!(config.schedule.is_empty());
}

#[test]
fn full_config_is_parsed() {
    let config = Config::parse(
        r#"
        state_dir = ".recon"
        log_path = "recon.log"

        [controller]
        workers = 3
        max_retries = 2
        stop_on_feed_end = true

        [controller.backoff]
        base = "50ms"
        max = "30s"

        [informer]
        resync_interval = "10m"
        tombstone_retention = "5m"
        compaction_interval = "1m"

        [[schedule]]
        name = "hello-world"
        interval = "1m"
        manifest = "workflows/hello-world.yaml"
        parameters = ["hello=one", "bye=two", "what=is"]
        "#,
    )
    .unwrap();

    assert_eq!(config.state_dir, Some(PathBuf::from(".recon")));
    assert_eq!(config.controller.workers, 3);
    assert_eq!(config.controller.max_retries, 2);
    assert!(config.controller.stop_on_feed_end);
    assert_eq!(config.controller.backoff.base, Duration::from_millis(50));
    assert_eq!(config.controller.backoff.max, Duration::from_secs(30));
    assert_eq!(config.informer.resync_interval, Some(Duration::from_secs(600)));
    assert_eq!(config.informer.compaction_interval, Some(Duration::from_secs(60)));

    let schedule = &config.schedule[0];
    assert_eq!(schedule.name, "hello-world");
    assert_eq!(schedule.interval, Duration::from_secs(60));
    assert_eq!(schedule.namespace, "default");
    assert_eq!(schedule.parameters.len(), 3);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = Config::parse("socket = \"/tmp/x\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn bad_duration_is_a_parse_error() {
    let err = Config::parse("[controller.backoff]\nbase = \"soon\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn duplicate_schedule_names_are_rejected() {
    let err = Config::parse(
        r#"
        [[schedule]]
        name = "a"
        interval = "1m"
        manifest = "a.yaml"

        [[schedule]]
        name = "a"
        interval = "2m"
        manifest = "b.yaml"
        "#,
    )
    .unwrap_err();

    assert!(err.to_string().contains("used twice"), "{}", err);
}

#[test]
fn zero_interval_is_rejected() {
    let err = Config::parse(
        "[[schedule]]\nname = \"a\"\ninterval = \"0s\"\nmanifest = \"a.yaml\"\n",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Schedule { .. }));
}

#[test]
fn load_resolves_relative_paths_next_to_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recon.toml");
    std::fs::write(
        &path,
        "state_dir = \"state\"\nlog_path = \"/var/log/recon.log\"\n\n[[schedule]]\nname = \"a\"\ninterval = \"1m\"\nmanifest = \"wf.yaml\"\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.state_dir, Some(dir.path().join("state")));
    assert_eq!(config.log_path, Some(PathBuf::from("/var/log/recon.log")));
    assert_eq!(config.schedule[0].manifest, dir.path().join("wf.yaml"));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = Config::load(Path::new("/nonexistent/recon.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
