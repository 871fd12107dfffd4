// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact relay.
//!
//! `POST /api/email/send` runs the submission pipeline in a fixed order:
//! rate limit, field validation, honeypot, API key, spam classification and
//! finally mail dispatch. The first failing stage answers the request.

use crate::access::{AccessGate, API_KEY_HEADER};
use crate::classifier::SpamClassifier;
use crate::config::{Config, CorsConfig};
use crate::error::{ApiResponse, Rejection};
use crate::limiter::{client_ip, RateLimitResult, RateLimiter};
use crate::metrics::{Metrics, ACCEPTED};
use crate::notify::{MailTransport, Notifier};
use crate::submission::SubmissionForm;
use crate::trap;
use crate::validator::FieldValidator;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Shared application state.
pub struct AppState {
    pub limiter: RateLimiter,
    pub validator: FieldValidator,
    pub gate: AccessGate,
    pub classifier: SpamClassifier,
    pub notifier: Notifier,
    pub metrics: Metrics,
    pub config: Config,
}

impl AppState {
    /// Assemble every pipeline stage from configuration.
    pub fn new(config: Config, transport: Arc<dyn MailTransport>) -> Result<Self, prometheus::Error> {
        Ok(Self {
            limiter: RateLimiter::new(config.rate_limit.clone()),
            validator: FieldValidator::new(config.validation.clone()),
            gate: AccessGate::new(config.access.api_key.clone()),
            classifier: SpamClassifier::new(&config.spam),
            notifier: Notifier::new(transport, &config.mail),
            metrics: Metrics::new()?,
            config,
        })
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-relay",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus exposition endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.encode() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Accept a contact-form submission and relay it to the operator.
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Json<SubmissionForm>, JsonRejection>,
) -> Response {
    match process(&state, addr.ip(), &headers, body).await {
        Ok(()) => {
            state.metrics.record(ACCEPTED);
            (
                StatusCode::OK,
                Json(ApiResponse::ok("Email sent successfully!")),
            )
                .into_response()
        }
        Err(rejection) => {
            state.metrics.record(rejection.outcome());
            match &rejection {
                Rejection::Spam { score, reasons } => {
                    info!(score, reasons = ?reasons, "Submission rejected as spam");
                }
                // logged by the notifier
                Rejection::Delivery(_) => {}
                other => info!(outcome = other.outcome(), reason = %other, "Submission rejected"),
            }
            rejection.into_response_for(state.config.environment)
        }
    }
}

async fn process(
    state: &AppState,
    peer: IpAddr,
    headers: &HeaderMap,
    body: Result<Json<SubmissionForm>, JsonRejection>,
) -> Result<(), Rejection> {
    let client = client_ip(peer, headers, state.config.rate_limit.trust_forwarded_for);
    if let RateLimitResult::Limited { retry_after } = state.limiter.check(client).await {
        return Err(Rejection::RateLimited { retry_after });
    }

    let Json(form) = body.map_err(|e| Rejection::MalformedBody(e.body_text()))?;
    let submission = state.validator.validate(&form)?;

    if trap::is_trapped(&submission) {
        return Err(Rejection::BotTrap);
    }

    state.gate.check_headers(headers)?;

    let classification = state.classifier.classify(&submission);
    if !classification.accepted {
        return Err(Rejection::Spam {
            score: classification.score,
            reasons: classification.reasons,
        });
    }

    debug!(client = %client, "Submission cleared every check");
    state.notifier.dispatch(&submission, Utc::now()).await?;
    Ok(())
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/api/email/send", post(send_email))
        .route("/health", get(health))
        .route("/healthz", get(health));

    if state.config.metrics.enabled {
        router = router.route(&state.config.metrics.path, get(metrics));
    }

    router
        .layer(cors_layer(&state.config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive CORS unless origins are configured.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)]);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
