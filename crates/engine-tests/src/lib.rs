#![allow(dead_code)]

use engine_config::settings::Settings;
use std::collections::HashMap;
use wiremock::MockServer;

pub mod utils;

pub const ORDERS_PATH: &str = "/admin/api/orders.json";
pub const TEST_TOKEN: &str = "shpat_test_token";

/// Environment for a run against `server`, with fast backoff.
pub fn test_env(server: &MockServer) -> HashMap<String, String> {
    env_for_base(&server.uri())
}

/// Same as [`test_env`] for a shop listening at `base_uri`.
pub fn env_for_base(base_uri: &str) -> HashMap<String, String> {
    [
        ("ORDERS_API_ENDPOINT", format!("{base_uri}{ORDERS_PATH}")),
        ("ORDERS_API_TOKEN", TEST_TOKEN.to_string()),
        ("REPORT_CITIES", "Chennai,Mumbai".to_string()),
        ("FETCH_BACKOFF_BASE_MS", "10".to_string()),
        ("FETCH_BACKOFF_MAX_MS", "50".to_string()),
        ("FETCH_DEADLINE_SECS", "30".to_string()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

pub fn test_settings(server: &MockServer) -> Settings {
    settings_with(server, &[])
}

/// Settings from [`test_env`] with `overrides` applied on top.
pub fn settings_with(server: &MockServer, overrides: &[(&str, &str)]) -> Settings {
    let mut env = test_env(server);
    for (key, value) in overrides {
        env.insert(key.to_string(), value.to_string());
    }
    Settings::from_env(&env).expect("valid test settings")
}

/// Base URI of a local port nothing listens on.
pub fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
