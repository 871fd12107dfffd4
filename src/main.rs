// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Relay Service
//!
//! Accepts contact-form submissions on `POST /api/email/send`, screens them
//! and mails the survivors to the site operator.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables (a `.env` file is read
//! first when present):
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:5000); `PORT` replaces the port
//! - `APP_ENV` / `NODE_ENV`: `development` returns spam diagnostics to callers
//! - `MAX_REQUESTS`, `RATE_WINDOW_SECS`: Rate limit (default: 5 per 900s)
//! - `API_KEY`: Shared secret expected in `x-api-key`
//! - `EMAIL_USER`, `EMAIL_PASS`, `SMTP_HOST`, `MAIL_RECIPIENT`: Outbound mail
//! - `SPAM_THRESHOLD`: Classifier rejection score (default: 5)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_relay::{config::Config, handlers::AppState, notify::SmtpMailer, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        environment = ?config.environment,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        spam_threshold = config.spam.threshold,
        smtp_host = %config.mail.smtp_host,
        "Starting contact relay"
    );

    if config.access.api_key.is_empty() {
        warn!("API_KEY is not set; every submission will be rejected");
    }
    if config.mail.username.is_empty() || config.mail.password.is_empty() {
        warn!("EMAIL_USER or EMAIL_PASS is not set; mail delivery will fail");
    }

    let mailer = Arc::new(SmtpMailer::new(&config.mail)?);
    let state = Arc::new(AppState::new(config.clone(), mailer)?);

    // Spawn cleanup task
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            cleanup_state.limiter.cleanup().await;
        }
    });

    let app = router(state);

    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
