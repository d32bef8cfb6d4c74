// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Service Requester - uniform HTTP calls for generated API clients
//!
//! Adapts reqwest to a small request contract: given a service (base URL,
//! default headers, timeout), an endpoint and call options, perform a
//! GET/POST/PUT/DELETE and get back a normalized `{ body, headers, status }`,
//! or start a STREAM and get back a byte stream filled as chunks arrive.
//!
//! ## Features
//!
//! - JSON bodies: camelCase keys become snake_case, all-caps keys are kept
//! - Multipart bodies: passed through untouched
//! - Query strings: decamelized keys, `key[]=value` arrays
//! - Responses: JSON parsed when the content type says so, text otherwise
//! - Errors: non-2xx responses carry the backend's `error`/`message` text
//!
//! ## Example
//!
//! ```rust,no_run
//! use service_requester::{CallOptions, Requester, ReqwestRequester, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = ServiceConfig::new("https://gitlab.example.com/api/v4")
//!         .header("private-token", "secret");
//!     let requester = ReqwestRequester::new()?;
//!
//!     let options = CallOptions::new()
//!         .query("perPage", "20")
//!         .query("labels", vec!["bug", "ui"]);
//!     let response = requester.get(&service, "projects/1/issues", options).await?;
//!
//!     println!("{} {:?}", response.status, response.body);
//!     Ok(())
//! }
//! ```

pub mod case;
pub mod config;
pub mod error;
pub mod http;
pub mod options;
pub mod query;

// Re-exports for convenience

// Configuration
pub use config::{ServiceConfig, DEFAULT_REQUEST_TIMEOUT_MS};

// Call options
pub use options::{CallOptions, QueryValue, RequestBody, Verb};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{
    ByteStream, NormalizedResponse, PreparedRequest, Reply, ReqwestRequester, Requester,
    ResponseBody,
};

// Normalization helpers
pub use case::{decamelize, decamelize_keys};
pub use query::encode_query;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
