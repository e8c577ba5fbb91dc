use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use chrono::NaiveDate;
use larder_cli::commands::{doctor, migrate, seed, suggest};
use serde_json::{json, Value};

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(&[("LARDER_DATABASE_URL", "sqlite::memory:")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn migrate_returns_config_failure_for_invalid_log_level() {
    with_env(&[("LARDER_LOG_LEVEL", "chatty")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn seed_populates_an_empty_database_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("larder.db").display());

    with_env(&[("LARDER_DATABASE_URL", url.as_str())], || {
        let first = seed::run();
        assert_eq!(first.exit_code, 0, "expected first seed invocation success");
        let first_payload = parse_payload(&first.output);
        assert_eq!(first_payload["command"], "seed");
        assert_eq!(first_payload["status"], "ok");
        assert_eq!(
            first_payload["message"],
            "seeded demo household: 3 ingredients, 2 sales, 3 family members"
        );

        let second = seed::run();
        assert_eq!(second.exit_code, 0, "expected second seed invocation success");
        let second_payload = parse_payload(&second.output);
        assert_eq!(second_payload["message"], "store already holds data; demo household not seeded");
    });
}

#[test]
fn doctor_reports_config_failure_with_exit_code() {
    with_env(&[("LARDER_STORAGE_BACKEND", "dynamo")], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][0]["name"], "config_validation");
        assert_eq!(payload["checks"][2]["status"], "skipped");
    });
}

#[test]
fn doctor_passes_against_in_memory_database() {
    with_env(&[("LARDER_DATABASE_URL", "sqlite::memory:")], || {
        let result = doctor::run(false);
        assert_eq!(result.exit_code, 0, "unexpected doctor output: {}", result.output);
        assert!(result.output.starts_with("doctor: all readiness checks passed"));
    });
}

#[test]
fn suggest_runs_engine_over_snapshot_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("snapshot.json");
    let snapshot = json!({
        "ingredients": [
            {"id": "i-1", "name": "鶏むね肉", "quantity": 2, "category": "肉", "expiryDate": "2026-10-21"},
            {"id": "i-2", "name": "ブロッコリー", "quantity": 1, "category": "野菜", "expiryDate": "2026-10-20"}
        ]
    });
    fs::write(&input, snapshot.to_string()).expect("write snapshot");

    let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
    let result = suggest::run(&input, Some(today));
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "suggest");
    assert_eq!(payload["message"], "1 suggestion(s) for 2026-10-19");
    let suggestions = payload["data"].as_array().expect("suggestions");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["kind"], "balanced_plate");
    assert_eq!(suggestions[0]["usedIngredients"][0]["usedQuantity"], 1.5);
    assert_eq!(suggestions[0]["usedIngredients"][1]["usedQuantity"], 1.0);
}

#[test]
fn suggest_reports_unreadable_and_malformed_input() {
    let dir = tempfile::tempdir().expect("tempdir");

    let missing = suggest::run(&dir.path().join("missing.json"), None);
    assert_eq!(missing.exit_code, 7);
    assert_eq!(parse_payload(&missing.output)["error_class"], "input_read");

    let malformed = dir.path().join("malformed.json");
    fs::write(&malformed, r#"{"ingredients": [{"name": "no id"}]}"#).expect("write");
    let result = suggest::run(&malformed, None);
    assert_eq!(result.exit_code, 7);
    assert_eq!(parse_payload(&result.output)["error_class"], "input_parse");
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "LARDER_STORAGE_BACKEND",
        "LARDER_STORAGE_SEED_DEMO_DATA",
        "LARDER_DATABASE_URL",
        "LARDER_DATABASE_MAX_CONNECTIONS",
        "LARDER_DATABASE_TIMEOUT_SECS",
        "LARDER_SERVER_BIND_ADDRESS",
        "LARDER_SERVER_PORT",
        "LARDER_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "LARDER_LOGGING_LEVEL",
        "LARDER_LOGGING_FORMAT",
        "LARDER_LOG_LEVEL",
        "LARDER_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
