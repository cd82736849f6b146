//! Shared fixtures for the HTTP-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skillbridge_client::{ClientConfig, MemorySessionStore, SessionStore, SkillBridgeClient};

pub const TOKEN: &str = "tok-123";

pub fn user_json() -> Value {
    json!({
        "id": 7,
        "nome": "Ana Souza",
        "email": "ana@example.com",
        "objetivoCarreira": "Desenvolvedora backend",
        "competencias": ["Java", "SQL"]
    })
}

pub fn client_for(server: &MockServer, store: Arc<dyn SessionStore>) -> SkillBridgeClient {
    let config = ClientConfig::new(server.uri()).unwrap();
    SkillBridgeClient::new(config, store).unwrap()
}

pub fn anonymous_client(server: &MockServer) -> SkillBridgeClient {
    client_for(server, Arc::new(MemorySessionStore::new()))
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": TOKEN, "usuario": user_json()})),
        )
        .mount(server)
        .await;
}

/// Client with a session for user 7 already established.
pub async fn logged_in_client(server: &MockServer) -> SkillBridgeClient {
    mount_login(server).await;
    let client = anonymous_client(server);
    client
        .session()
        .login("ana@example.com", "segredo")
        .await
        .unwrap();
    client
}

/// JSON bodies of every request the server saw on `request_path`.
pub async fn bodies_sent_to(server: &MockServer, request_path: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|req| req.url.path() == request_path)
        .map(|req| serde_json::from_slice(&req.body).unwrap_or(Value::Null))
        .collect()
}

pub async fn requests_to(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|req| req.url.path() == request_path)
        .count()
}
