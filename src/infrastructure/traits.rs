//! I/O boundary traits for testability
//!
//! These traits abstract the HTTP exchange and the user notice, allowing
//! services to be tested with fake implementations.

use std::time::Duration;

use colored::Colorize;
use thiserror::Error;
use tracing::debug;

use crate::application::wire::{GuaRequest, GENERATE_PATH};

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure: nothing usable came back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Generation endpoint abstraction.
pub trait GuaTransport: Send + Sync {
    /// POST `{"numbers": ...}` and return whatever status and body came back.
    fn post_numbers(&self, numbers: &str) -> Result<RawResponse, TransportError>;
}

/// Blocking user notice (the page's `alert`).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Blocking HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpTransport {
    /// Build a transport for `endpoint` (scheme + host, no path).
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::new(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: format!("{}{}", endpoint.trim_end_matches('/'), GENERATE_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl GuaTransport for HttpTransport {
    fn post_numbers(&self, numbers: &str) -> Result<RawResponse, TransportError> {
        debug!("post_numbers: url={} numbers={}", self.url, numbers);
        let request = GuaRequest {
            numbers: numbers.to_string(),
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .map_err(|e| TransportError::new(format!("connection failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::new(format!("failed to read body: {e}")))?;
        debug!("post_numbers: status={} body_len={}", status, body.len());
        Ok(RawResponse { status, body })
    }
}

/// Notice on stderr, red like other user-facing errors.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message.red().bold());
    }
}
