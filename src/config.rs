// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact relay.
//!
//! Defaults match the behaviour of the public contact form: five submissions
//! per client per fifteen minutes, a spam threshold of 5 and Gmail SMTP as
//! the outbound relay.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Configuration for the contact relay service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:5000)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Deployment environment; controls diagnostic output
    #[serde(default)]
    pub environment: Environment,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Field validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Spam classifier configuration
    #[serde(default)]
    pub spam: SpamConfig,

    /// Shared-secret access configuration
    #[serde(default)]
    pub access: AccessConfig,

    /// Outbound mail configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    /// Parse an environment name; anything but "development" is production.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("development") {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Whether classifier diagnostics may be returned to callers.
    pub fn exposes_debug(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Fixed-window rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per client per window (default: 5)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds (default: 900)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Key clients by the first X-Forwarded-For hop (default: false)
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

/// Field validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum trimmed message length in characters (default: 10)
    #[serde(default = "default_min_message_chars")]
    pub min_message_chars: usize,

    /// Minimum phone digit count (default: 10)
    #[serde(default = "default_phone_min_digits")]
    pub phone_min_digits: usize,

    /// Maximum phone digit count (default: 15)
    #[serde(default = "default_phone_max_digits")]
    pub phone_max_digits: usize,
}

/// Spam classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpamConfig {
    /// Score at or above which a submission is rejected (default: 5)
    #[serde(default = "default_spam_threshold")]
    pub threshold: u32,
}

/// Shared-secret access configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Expected value of the `x-api-key` header. Empty rejects every key.
    #[serde(default)]
    pub api_key: String,
}

/// Outbound mail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP relay host (default: smtp.gmail.com)
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// Mail account user; also the envelope sender
    #[serde(default)]
    pub username: String,

    /// Mail account password
    #[serde(default, skip_serializing)]
    pub password: String,

    /// Operator address receiving notifications (default: the mail account)
    #[serde(default)]
    pub recipient: Option<String>,

    /// Bound on connectivity check plus send, in seconds (default: 30)
    #[serde(default = "default_mail_timeout_secs")]
    pub timeout_secs: u64,
}

/// CORS configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_secs() -> u64 {
    15 * 60
}

fn default_min_message_chars() -> usize {
    10
}

fn default_phone_min_digits() -> usize {
    10
}

fn default_phone_max_digits() -> usize {
    15
}

fn default_spam_threshold() -> u32 {
    5
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_mail_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            environment: Environment::default(),
            rate_limit: RateLimitConfig::default(),
            validation: ValidationConfig::default(),
            spam: SpamConfig::default(),
            access: AccessConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            trust_forwarded_for: false,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_message_chars: default_min_message_chars(),
            phone_min_digits: default_phone_min_digits(),
            phone_max_digits: default_phone_max_digits(),
        }
    }
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            threshold: default_spam_threshold(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            username: String::new(),
            password: String::new(),
            recipient: None,
            timeout_secs: default_mail_timeout_secs(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl MailConfig {
    /// Address that receives notifications.
    pub fn recipient_address(&self) -> &str {
        match self.recipient.as_deref() {
            Some(r) if !r.trim().is_empty() => r,
            _ => &self.username,
        }
    }

    /// Get the delivery timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let mut bind_addr = lookup("BIND_ADDR").unwrap_or(defaults.bind_addr);
        if let Some(port) = parse_var::<u16, _>(&lookup, "PORT") {
            let host = bind_addr
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            bind_addr = format!("{}:{}", host, port);
        }

        let environment = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .map(|v| Environment::from_name(&v))
            .unwrap_or_default();

        Config {
            bind_addr,
            environment,
            rate_limit: RateLimitConfig {
                max_requests: parse_var(&lookup, "MAX_REQUESTS").unwrap_or(defaults.rate_limit.max_requests),
                window_secs: parse_var(&lookup, "RATE_WINDOW_SECS").unwrap_or(defaults.rate_limit.window_secs),
                trust_forwarded_for: parse_var(&lookup, "TRUST_FORWARDED_FOR").unwrap_or(false),
            },
            validation: defaults.validation,
            spam: SpamConfig {
                threshold: parse_var(&lookup, "SPAM_THRESHOLD").unwrap_or(defaults.spam.threshold),
            },
            access: AccessConfig {
                api_key: lookup("API_KEY").unwrap_or_default(),
            },
            mail: MailConfig {
                smtp_host: lookup("SMTP_HOST").unwrap_or(defaults.mail.smtp_host),
                username: lookup("EMAIL_USER").unwrap_or_default(),
                password: lookup("EMAIL_PASS").unwrap_or_default(),
                recipient: lookup("MAIL_RECIPIENT"),
                timeout_secs: parse_var(&lookup, "MAIL_TIMEOUT_SECS").unwrap_or(defaults.mail.timeout_secs),
            },
            cors: CorsConfig {
                allowed_origins: lookup("ALLOWED_ORIGINS")
                    .map(|v| {
                        v.split(',')
                            .map(|o| o.trim().to_string())
                            .filter(|o| !o.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            metrics: MetricsConfig {
                enabled: parse_var(&lookup, "METRICS_ENABLED").unwrap_or(true),
                ..defaults.metrics
            },
        }
    }
}

/// Look up and parse a variable, ignoring values that fail to parse.
fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}
