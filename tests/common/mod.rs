//! Shared fixtures: a wiremock server driven from a plain (blocking) test.
//!
//! The mock server lives on its own tokio runtime; the blocking client is
//! called from the test thread, outside `block_on`.

#![allow(dead_code)]

use serde_json::{json, Value};
use tokio::runtime::Runtime;
use toniebox::{Client, ClientConfig, Endpoints, Household, JwtToken};
use wiremock::{Mock, MockServer, Request};

pub const TOKEN_PATH: &str = "/auth/realms/tonies/protocol/openid-connect/token";
pub const STORAGE_PATH: &str = "/upload/";

pub struct MockApi {
    // dropped before the runtime
    pub server: MockServer,
    rt: Runtime,
}

impl MockApi {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("tokio runtime");
        let server = rt.block_on(MockServer::start());
        MockApi { server, rt }
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn requests_with(&self, method: &str, path: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.as_str() == method && r.url.path() == path)
            .collect()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_endpoints(Endpoints::with_base(&self.server.uri()))
    }

    /// Client pointed at the mock server, with no token.
    pub fn client(&self) -> Client {
        Client::with_config(self.config()).expect("client")
    }

    /// Client pointed at the mock server, already holding `abc123`.
    pub fn authed_client(&self) -> Client {
        let mut client = self.client();
        client.set_token(JwtToken::new("abc123"));
        client
    }
}

pub fn authorization(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn household() -> Household {
    Household {
        id: "h1".into(),
        name: "Family".into(),
        access: "owner".into(),
        ..Household::default()
    }
}

pub fn tonie_json(id: &str, name: &str, chapters: Value) -> Value {
    json!({
        "id": id,
        "name": name,
        "live": false,
        "private": true,
        "imageUrl": format!("https://img.example/{}.png", id),
        "transcodingErrors": [],
        "transcoding": false,
        "secondsPresent": 60.0,
        "secondsRemaining": 5340.0,
        "chaptersPresent": 1,
        "chaptersRemaining": 98,
        "chapters": chapters,
        "householdId": "h1"
    })
}

pub fn chapter_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "file": format!("file-{}", id),
        "title": title,
        "seconds": 60.0,
        "transcoding": false
    })
}
