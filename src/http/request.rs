// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request construction
//!
//! Turns a `(service, verb, endpoint, options)` call into a fully formed
//! transport request. Nothing here touches the network.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use super::headers::{CONTENT_TYPE, SUDO};
use crate::case::decamelize_keys;
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::options::{CallOptions, RequestBody, Verb};
use crate::query::encode_query;

/// Body as it goes on the wire
#[derive(Debug)]
pub enum PreparedBody {
    /// Serialized JSON, or the text of a scalar body
    Bytes(Bytes),
    /// Untouched multipart form
    Multipart(Form),
}

/// A request ready to hand to the transport
#[derive(Debug)]
pub struct PreparedRequest {
    /// Request method
    pub method: Method,
    /// Absolute URL, query included
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<PreparedBody>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl PreparedRequest {
    /// Build the transport request for one call
    pub fn build(
        service: &ServiceConfig,
        verb: Verb,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<Self> {
        let CallOptions { body, query, sudo } = options;

        let mut headers = HeaderMap::new();
        for (name, value) in &service.headers {
            append_header(&mut headers, name, value)?;
        }
        if let Some(actor) = sudo.filter(|s| !s.is_empty()) {
            append_header(&mut headers, SUDO, &actor)?;
        }

        let body = match body {
            Some(RequestBody::Json(value @ (Value::Object(_) | Value::Array(_) | Value::Null))) => {
                let json = serde_json::to_vec(&decamelize_keys(value))?;
                headers.append(
                    HeaderName::from_static(CONTENT_TYPE),
                    HeaderValue::from_static("application/json"),
                );
                Some(PreparedBody::Bytes(Bytes::from(json)))
            }
            // Scalars go out as their plain text, content type left to the caller
            Some(RequestBody::Json(Value::String(text))) => {
                Some(PreparedBody::Bytes(Bytes::from(text)))
            }
            Some(RequestBody::Json(scalar)) => {
                Some(PreparedBody::Bytes(Bytes::from(scalar.to_string())))
            }
            Some(RequestBody::Multipart(form)) => Some(PreparedBody::Multipart(form)),
            None => None,
        };

        let url = resolve_url(&service.base_url, endpoint, &encode_query(&query))?;

        Ok(Self {
            method: verb.method(),
            url,
            headers,
            body,
            timeout: service.request_timeout(),
        })
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Serialized body bytes, if the body is not multipart
    pub fn body_bytes(&self) -> Option<&Bytes> {
        match &self.body {
            Some(PreparedBody::Bytes(bytes)) => Some(bytes),
            _ => None,
        }
    }

    /// Hand the request to a reqwest client
    pub fn into_builder(self, client: &Client) -> reqwest::RequestBuilder {
        let mut builder = client.request(self.method, self.url).headers(self.headers);

        builder = match self.body {
            Some(PreparedBody::Bytes(bytes)) => builder.body(bytes),
            Some(PreparedBody::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }
}

fn append_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::invalid_header(name, e))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e))?;
    headers.append(header_name, header_value);
    Ok(())
}

/// Join base URL and endpoint with a single `/` and set the query
///
/// A non-empty query replaces whatever query the endpoint carried.
fn resolve_url(base: &str, endpoint: &str, query: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined)?;
    if !query.is_empty() {
        url.set_query(Some(query));
    }
    Ok(url)
}
