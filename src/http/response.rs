// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Normalized response types

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::headers::CONTENT_TYPE;
use crate::error::{Error, Result};

/// Response body after content-type inspection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Parsed JSON (an empty object when the payload was empty or malformed)
    Json(Value),
    /// Anything that is not JSON, as raw text
    Text(String),
}

impl ResponseBody {
    /// Pick the body representation from the response content type
    pub fn from_text(content_type: &str, text: String) -> Self {
        if !content_type.contains("json") {
            return ResponseBody::Text(text);
        }
        let parsed = if text.is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };
        ResponseBody::Json(parsed.unwrap_or_else(|| Value::Object(Map::new())))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }
}

/// Uniform `{ body, headers, status }` response shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResponse {
    /// Response body
    pub body: ResponseBody,
    /// Response headers, lower-cased names
    pub headers: BTreeMap<String, String>,
    /// Response status code
    pub status: u16,
}

impl NormalizedResponse {
    /// Read a reqwest response to completion
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = normalize_headers(response.headers());
        let content_type = headers
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_default();
        let text = response.text().await?;

        Ok(Self {
            body: ResponseBody::from_text(&content_type, text),
            headers,
            status,
        })
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize a JSON body into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.body {
            ResponseBody::Json(value) => serde_json::from_value(value.clone()).map_err(Error::from),
            ResponseBody::Text(text) => serde_json::from_str(text).map_err(Error::from),
        }
    }
}

/// Flatten a header map into lower-cased name → value
///
/// Repeated headers are joined with `", "`.
pub fn normalize_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        match out.get_mut(name.as_str()) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            None => {
                out.insert(name.as_str().to_ascii_lowercase(), value.into_owned());
            }
        }
    }
    out
}
