// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! In-process application under test.

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{Request, StatusCode},
    Router,
};
use contact_relay::{
    config::Config,
    handlers::AppState,
    notify::{MailTransport, OutgoingMail, TransportError},
    router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const API_KEY: &str = "test-secret-key";

/// Mail transport that records instead of sending.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail: bool,
}

impl RecordingTransport {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn verify(&self) -> Result<(), TransportError> {
        if self.fail {
            Err(TransportError::Unreachable)
        } else {
            Ok(())
        }
    }

    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

/// Configuration with a known API key; clients are keyed by X-Forwarded-For
/// so one router can simulate many addresses.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.access.api_key = API_KEY.to_string();
    config.mail.username = "relay@example.com".to_string();
    config.rate_limit.trust_forwarded_for = true;
    config
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub transport: Arc<RecordingTransport>,
}

impl TestApp {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(RecordingTransport::default()))
    }

    pub fn with_transport(config: Config, transport: Arc<RecordingTransport>) -> Self {
        let state = AppState::new(config, transport.clone()).unwrap();
        Self::from_state(state, transport)
    }

    pub fn from_state(state: AppState, transport: Arc<RecordingTransport>) -> Self {
        let state = Arc::new(state);
        let router = router(state.clone())
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
        Self {
            router,
            state,
            transport,
        }
    }

    /// POST a JSON submission as `client`.
    pub async fn submit(
        &self,
        client: &str,
        api_key: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        self.submit_raw(client, api_key, body.to_string()).await
    }

    /// POST an arbitrary body as `client`.
    pub async fn submit_raw(
        &self,
        client: &str,
        api_key: Option<&str>,
        body: String,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method("POST")
            .uri("/api/email/send")
            .header("content-type", "application/json")
            .header("x-forwarded-for", client);
        if let Some(key) = api_key {
            request = request.header("x-api-key", key);
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// GET a path and return the body as text.
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}
