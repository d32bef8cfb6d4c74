// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the service requester
//!
//! Transport failures are never swallowed. When the failed call carried an
//! HTTP response, the error keeps that response and, when the body is a JSON
//! error document, a human-readable `description` pulled out of it.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Result type alias for requester operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service requester
#[derive(Error, Debug)]
pub enum Error {
    /// The transport failed before a response was available
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("HTTP {status}{}", .description.as_deref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Status {
        status: u16,
        headers: BTreeMap<String, String>,
        body: String,
        description: Option<String>,
    },

    /// No response head within the service timeout
    #[error("Timed out after {duration_ms}ms waiting for response")]
    Timeout { duration_ms: u64 },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A header name or value could not be put on the wire
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No async runtime to drive a streaming download
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a status error enriched from the response body
    ///
    /// The description is best effort: a body that is not a JSON object, or
    /// has no usable `error`/`message` field, leaves it empty.
    pub fn from_response(status: u16, headers: BTreeMap<String, String>, body: String) -> Self {
        let description = describe(&body);
        Error::Status {
            status,
            headers,
            body,
            description,
        }
    }

    /// Create a status error without looking at the body
    pub fn status(status: u16, headers: BTreeMap<String, String>, body: String) -> Self {
        Error::Status {
            status,
            headers,
            body,
            description: None,
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a timeout error
    pub fn timeout(limit: Duration) -> Self {
        Error::Timeout {
            duration_ms: limit.as_millis().try_into().unwrap_or(u64::MAX),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Human-readable description extracted from the error response
    ///
    /// Inherent method; unrelated to the deprecated
    /// `std::error::Error::description`, which this type does not override.
    pub fn description(&self) -> Option<&str> {
        match self {
            Error::Status { description, .. } => description.as_deref(),
            _ => None,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw body of the error response, if there was one
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code()
            .map(|s| (400..500).contains(&s))
            .unwrap_or(false)
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code()
            .map(|s| (500..600).contains(&s))
            .unwrap_or(false)
    }
}

/// Pull `error` (falling back to `message`) out of a JSON error body.
fn describe(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    let fields = parsed.as_object()?;

    ["error", "message"]
        .iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| is_truthy(value))
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Array(_) | Value::Object(_) => true,
    }
}
