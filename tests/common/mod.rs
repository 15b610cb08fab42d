//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use chat_simple::events::EventReceiver;
use chat_simple::sync::IdentityMode;
use chat_simple::{ApiClient, AppConfig, ChatEvent, Contact};
use wiremock::matchers::header;
use wiremock::MockServer;

pub const ME: &str = "999";
pub const TOKEN: &str = "test-token";

pub fn config(server: &MockServer) -> AppConfig {
    let mut cfg = AppConfig::new();
    cfg.base_url = server.uri();
    cfg.phone_number = ME.to_string();
    cfg.api_token = TOKEN.to_string();
    cfg.display_name = "Luis".to_string();
    cfg
}

pub fn config_with_mode(server: &MockServer, mode: IdentityMode) -> AppConfig {
    let mut cfg = config(server);
    cfg.identity_mode = mode;
    cfg
}

pub fn client(server: &MockServer) -> ApiClient {
    ApiClient::from_config(&config(server)).expect("client")
}

pub fn ana() -> Contact {
    Contact::new("555", "Ana Diaz")
}

pub fn auth() -> wiremock::matchers::HeaderExactMatcher {
    header("Authorization", format!("Token token={}", TOKEN).as_str())
}

pub fn drain(rx: &mut EventReceiver) -> Vec<ChatEvent> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push(event);
    }
    out
}
