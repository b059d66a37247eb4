// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_values() {
    let config = ServiceConfig::default();
    assert_eq!(config.max_results, 50);
    assert_eq!(config.cancellation_message, "Job {job} was cancelled");
}

#[test]
fn partial_toml_falls_back_to_defaults() {
    let config: ServiceConfig = toml::from_str("max_results = 10\n").unwrap();
    assert_eq!(config.max_results, 10);
    assert_eq!(config.cancellation_message, "Job {job} was cancelled");
}

#[test]
fn cancellation_message_expands_job_id() {
    let config = ServiceConfig::default();
    assert_eq!(
        config.render_cancellation_message("Ping"),
        "Job Ping was cancelled"
    );
}

#[test]
fn toml_round_trip() {
    let config = ServiceConfig {
        max_results: 5,
        cancellation_message: "stop {job}".into(),
    };
    let rendered = toml::to_string(&config).unwrap();
    let parsed: ServiceConfig = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed, config);
}
