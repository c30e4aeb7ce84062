//! Test fixtures for integration tests.
//!
//! Provides a scenario snapshot shaped like what scenario parsing hands
//! the engine after provisioning, plus small helpers.

use std::path::PathBuf;

use tempfile::TempDir;

use weft::Scenario;

/// Scenario snapshot after provisioning: three hosts, two of them
/// counted instances of the same base resource.
pub const SCENARIO_JSON: &str = r#"{
    "name": "web-stack",
    "hosts": [
        {
            "name": "web_0",
            "groups": ["web", "frontend"],
            "labels": ["app"],
            "ip_address": ["10.0.0.5", "192.168.1.5"],
            "metadata": {"zone": "east", "ports": {"http": 80, "https": 443}}
        },
        {
            "name": "web_1",
            "groups": ["web", "frontend"],
            "labels": ["app"],
            "ip_address": ["10.0.0.6"],
            "metadata": {"zone": "west", "ports": {"http": 8080, "https": 8443}}
        },
        {
            "name": "db01",
            "groups": ["db"],
            "labels": ["data"],
            "ip_address": "10.0.1.9",
            "credentials": [{"user": "admin", "role": "owner"}]
        }
    ],
    "actions": [
        {
            "name": "install_nginx",
            "orchestrator": "ansible",
            "labels": ["app"],
            "hosts": ["web"],
            "ansible_options": {"extra_vars": {"upstream": "{ db01.ip_address }"}}
        },
        {
            "name": "init_db",
            "orchestrator": "ansible",
            "labels": ["data"],
            "hosts": ["db01"],
            "cleanup": {"playbook": "drop_db.yml"}
        },
        {
            "name": "smoke_check",
            "labels": ["app"],
            "hosts": ["all"],
            "command": "curl -k https://{ web_0.ip_address[0] }:{ web_0.metadata.ports.https }/health"
        }
    ],
    "executes": [
        {
            "name": "api_tests",
            "executor": "runner",
            "labels": ["app"],
            "hosts": ["frontend"],
            "shell": [{"command": "pytest --base-url http://{ web_1.ip_address[0] }"}]
        }
    ],
    "reports": [
        {"name": "junit_upload", "importer": "polarion", "executes": ["api_tests"]}
    ],
    "notifications": [
        {"name": "kickoff", "notifier": "email", "on_start": true, "on_tasks": ["provision"]},
        {"name": "all_green", "notifier": "slack", "on_failure": false, "on_tasks": ["execute"]},
        {"name": "page_oncall", "notifier": "pager", "on_success": false, "on_tasks": ["execute", "orchestrate"]},
        {"name": "summary", "notifier": "email", "on_tasks": ["report"]},
        {"name": "manual", "notifier": "email", "on_demand": true}
    ]
}"#;

pub fn scenario() -> Scenario {
    Scenario::from_json(SCENARIO_JSON).expect("fixture scenario parses")
}

/// Write the fixture scenario to a temporary file.
pub fn scenario_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("scenario.json");
    std::fs::write(&path, SCENARIO_JSON).expect("Failed to write scenario");
    (temp_dir, path)
}

pub fn tasks(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
