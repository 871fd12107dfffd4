// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Metrics collection for abuse simulation results.

use axum::http::StatusCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Collects metrics during attack simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    /// Start time of the attack
    start_time: Option<Instant>,
    /// End time of the attack
    end_time: Option<Instant>,
    /// Count of requests by outcome
    outcomes: HashMap<Outcome, usize>,
    /// Count of requests by IP
    requests_per_ip: HashMap<String, usize>,
    /// Latency samples (microseconds)
    latencies: Vec<u64>,
}

/// Possible outcomes for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    RateLimited,
    Invalid,
    BotTrapped,
    Unauthorized,
    Spam,
    DeliveryFailed,
}

impl Outcome {
    /// Classify a response by status and public message.
    pub fn from_response(status: StatusCode, message: &str) -> Self {
        match status {
            StatusCode::OK => Outcome::Accepted,
            StatusCode::TOO_MANY_REQUESTS => Outcome::RateLimited,
            StatusCode::BAD_REQUEST => Outcome::Invalid,
            StatusCode::UNAUTHORIZED => Outcome::Unauthorized,
            StatusCode::FORBIDDEN if message == "Please try again." => Outcome::BotTrapped,
            StatusCode::FORBIDDEN if message == "Invalid API key" => Outcome::Unauthorized,
            StatusCode::FORBIDDEN => Outcome::Spam,
            _ => Outcome::DeliveryFailed,
        }
    }
}

impl AttackMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of an attack.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Mark the end of an attack.
    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Record a request outcome.
    pub fn record(&mut self, outcome: Outcome, ip: &str, latency: Duration) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self.requests_per_ip.entry(ip.to_string()).or_insert(0) += 1;
        self.latencies.push(latency.as_micros() as u64);
    }

    /// Get total request count.
    pub fn total_requests(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Get count for a specific outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Get duration of the attack.
    pub fn duration(&self) -> Duration {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    /// Get block rate (ratio of blocked to total).
    pub fn block_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        let accepted = self.count(Outcome::Accepted);
        (total - accepted) as f64 / total as f64
    }

    /// Get median latency in microseconds.
    pub fn median_latency_us(&self) -> u64 {
        if self.latencies.is_empty() {
            return 0;
        }
        let mut sorted = self.latencies.clone();
        sorted.sort_unstable();
        sorted[sorted.len() / 2]
    }

    /// Get number of unique IPs that made requests.
    pub fn unique_ips(&self) -> usize {
        self.requests_per_ip.len()
    }

    /// Generate a summary report.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total_requests: self.total_requests(),
            accepted: self.count(Outcome::Accepted),
            rate_limited: self.count(Outcome::RateLimited),
            invalid: self.count(Outcome::Invalid),
            bot_trapped: self.count(Outcome::BotTrapped),
            unauthorized: self.count(Outcome::Unauthorized),
            spam: self.count(Outcome::Spam),
            delivery_failed: self.count(Outcome::DeliveryFailed),
            duration_ms: self.duration().as_millis() as u64,
            block_rate: self.block_rate(),
            median_latency_us: self.median_latency_us(),
            unique_ips: self.unique_ips(),
        }
    }
}

/// Summary report of attack metrics.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total_requests: usize,
    pub accepted: usize,
    pub rate_limited: usize,
    pub invalid: usize,
    pub bot_trapped: usize,
    pub unauthorized: usize,
    pub spam: usize,
    pub delivery_failed: usize,
    pub duration_ms: u64,
    pub block_rate: f64,
    pub median_latency_us: u64,
    pub unique_ips: usize,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Attack Metrics Report ===")?;
        writeln!(f, "Duration:          {} ms", self.duration_ms)?;
        writeln!(f, "Total Requests:    {}", self.total_requests)?;
        writeln!(f)?;
        writeln!(f, "--- Outcomes ---")?;
        writeln!(f, "Accepted:          {}", self.accepted)?;
        writeln!(f, "Rate Limited:      {}", self.rate_limited)?;
        writeln!(f, "Invalid:           {}", self.invalid)?;
        writeln!(f, "Bot Trapped:       {}", self.bot_trapped)?;
        writeln!(f, "Unauthorized:      {}", self.unauthorized)?;
        writeln!(f, "Spam:              {}", self.spam)?;
        writeln!(f, "Delivery Failed:   {}", self.delivery_failed)?;
        writeln!(f, "Block Rate:        {:.1}%", self.block_rate * 100.0)?;
        writeln!(f)?;
        writeln!(f, "Median Latency:    {} us", self.median_latency_us)?;
        writeln!(f, "Unique IPs:        {}", self.unique_ips)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let mut metrics = AttackMetrics::new();
        metrics.start();

        metrics.record(Outcome::Accepted, "10.0.0.1", Duration::from_micros(100));
        metrics.record(Outcome::Spam, "10.0.0.2", Duration::from_micros(150));
        metrics.record(Outcome::RateLimited, "10.0.0.1", Duration::from_micros(50));

        metrics.finish();

        assert_eq!(metrics.total_requests(), 3);
        assert_eq!(metrics.count(Outcome::Accepted), 1);
        assert_eq!(metrics.count(Outcome::RateLimited), 1);
        assert_eq!(metrics.unique_ips(), 2);
    }

    #[test]
    fn test_block_rate() {
        let mut metrics = AttackMetrics::new();
        for _ in 0..3 {
            metrics.record(Outcome::Accepted, "10.0.0.1", Duration::ZERO);
        }
        for _ in 0..7 {
            metrics.record(Outcome::RateLimited, "10.0.0.1", Duration::ZERO);
        }

        assert!((metrics.block_rate() - 0.7).abs() < 0.01);
    }

    #[test]
    fn test_outcome_from_response() {
        assert_eq!(
            Outcome::from_response(StatusCode::FORBIDDEN, "Please try again."),
            Outcome::BotTrapped
        );
        assert_eq!(
            Outcome::from_response(StatusCode::FORBIDDEN, "Invalid API key"),
            Outcome::Unauthorized
        );
        assert_eq!(
            Outcome::from_response(
                StatusCode::FORBIDDEN,
                "Message detected as spam or inappropriate content."
            ),
            Outcome::Spam
        );
    }
}
