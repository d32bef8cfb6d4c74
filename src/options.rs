// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-call options and the closed set of request verbs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use reqwest::multipart::Form;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Verbs a requester can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    /// Chunked download, surfaced as a byte stream
    Stream,
}

impl Verb {
    /// All verbs, in dispatch order
    pub const ALL: [Verb; 5] = [Verb::Get, Verb::Post, Verb::Put, Verb::Delete, Verb::Stream];

    /// HTTP method put on the wire
    ///
    /// `Stream` downloads are always issued as GET.
    pub fn method(self) -> Method {
        match self {
            Verb::Get | Verb::Stream => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Delete => "delete",
            Verb::Stream => "stream",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .iter()
            .copied()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::config(format!("Unknown verb: {}", s)))
    }
}

/// Request body
#[derive(Debug)]
pub enum RequestBody {
    /// Payload value; objects, arrays and null are decamelized and sent as
    /// JSON, scalars are sent as plain text
    Json(Value),
    /// Multipart form; sent as-is, the transport picks the boundary
    Multipart(Form),
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<Form> for RequestBody {
    fn from(form: Form) -> Self {
        RequestBody::Multipart(form)
    }
}

/// A query parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    One(String),
    /// Encoded as repeated `key[]=value` pairs
    Many(Vec<String>),
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::One(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::One(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Many(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::Many(values.into_iter().map(String::from).collect())
    }
}

/// Options for a single call
#[derive(Debug, Default)]
pub struct CallOptions {
    /// Request body
    pub body: Option<RequestBody>,
    /// Query parameters, keyed by their caller-side (camelCase) names
    pub query: BTreeMap<String, QueryValue>,
    /// User to impersonate, sent as the `sudo` header
    pub sudo: Option<String>,
}

impl CallOptions {
    /// Create empty call options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a JSON body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set a multipart body
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// Add a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Impersonate another user
    pub fn sudo(mut self, actor: impl Into<String>) -> Self {
        self.sudo = Some(actor.into());
        self
    }
}
