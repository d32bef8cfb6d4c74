// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Requester trait and its reqwest implementation

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::Client;
use tokio::runtime::Handle;

use super::request::PreparedRequest;
use super::response::{normalize_headers, NormalizedResponse};
use super::stream::ByteStream;
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::options::{CallOptions, Verb};

/// Outcome of a verb-dispatched call
#[derive(Debug)]
pub enum Reply {
    Response(NormalizedResponse),
    Stream(ByteStream),
}

impl Reply {
    pub fn into_response(self) -> Option<NormalizedResponse> {
        match self {
            Reply::Response(response) => Some(response),
            Reply::Stream(_) => None,
        }
    }

    pub fn into_stream(self) -> Option<ByteStream> {
        match self {
            Reply::Stream(stream) => Some(stream),
            Reply::Response(_) => None,
        }
    }
}

/// Uniform request interface consumed by generated API clients
///
/// One method per verb. Non-stream verbs resolve to a [`NormalizedResponse`];
/// a non-2xx answer is an [`Error::Status`] carrying the response and, when
/// the body says so, a description.
#[async_trait]
pub trait Requester: Send + Sync {
    async fn get(
        &self,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<NormalizedResponse>;

    async fn post(
        &self,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<NormalizedResponse>;

    async fn put(
        &self,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<NormalizedResponse>;

    async fn delete(
        &self,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<NormalizedResponse>;

    /// Start a chunked download
    ///
    /// Returns as soon as the request is built; chunks are appended to the
    /// stream as the transport receives them. The service timeout bounds the
    /// wait for response headers only, not the body transfer.
    fn stream(
        &self,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<ByteStream>;

    /// Dispatch on a verb
    async fn call(
        &self,
        verb: Verb,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<Reply> {
        let response = match verb {
            Verb::Get => self.get(service, endpoint, options).await?,
            Verb::Post => self.post(service, endpoint, options).await?,
            Verb::Put => self.put(service, endpoint, options).await?,
            Verb::Delete => self.delete(service, endpoint, options).await?,
            Verb::Stream => return self.stream(service, endpoint, options).map(Reply::Stream),
        };
        Ok(Reply::Response(response))
    }
}

/// [`Requester`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestRequester {
    client: Client,
}

impl ReqwestRequester {
    /// Create a requester with a fresh connection pool
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(Client::builder().build()?))
    }

    /// Reuse an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }

    async fn send(
        &self,
        verb: Verb,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<NormalizedResponse> {
        let request = PreparedRequest::build(service, verb, endpoint, options)?;
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let response = request.into_builder(&self.client).send().await?;
        let status = response.status();

        if !status.is_success() {
            let headers = normalize_headers(response.headers());
            let body = response.text().await.unwrap_or_default();
            let error = Error::from_response(status.as_u16(), headers, body);
            tracing::warn!(
                %verb,
                endpoint,
                status = status.as_u16(),
                description = error.description().unwrap_or(""),
                "Request failed"
            );
            return Err(error);
        }

        let response = NormalizedResponse::read(response).await?;
        tracing::debug!(%verb, endpoint, status = response.status, "Response received");
        Ok(response)
    }
}

#[async_trait]
impl Requester for ReqwestRequester {
    async fn get(
        &self,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<NormalizedResponse> {
        self.send(Verb::Get, service, endpoint, options).await
    }

    async fn post(
        &self,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<NormalizedResponse> {
        self.send(Verb::Post, service, endpoint, options).await
    }

    async fn put(
        &self,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<NormalizedResponse> {
        self.send(Verb::Put, service, endpoint, options).await
    }

    async fn delete(
        &self,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<NormalizedResponse> {
        self.send(Verb::Delete, service, endpoint, options).await
    }

    fn stream(
        &self,
        service: &ServiceConfig,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<ByteStream> {
        let mut request = PreparedRequest::build(service, Verb::Stream, endpoint, options)?;
        let runtime = Handle::try_current().map_err(|e| Error::Runtime(e.to_string()))?;
        tracing::debug!(url = %request.url, "Starting download");

        // reqwest timeouts span the whole body; downloads only bound the headers
        let header_timeout = request.timeout.take();
        let builder = request.into_builder(&self.client);
        let (sink, stream) = ByteStream::channel();

        runtime.spawn(async move {
            if let Err(error) = download(builder, header_timeout, |chunk| sink.push(chunk)).await {
                tracing::debug!(%error, "Download failed");
                sink.fail(error);
            }
        });

        Ok(stream)
    }
}

/// Run a GET and hand every received chunk to `on_progress`
///
/// `header_timeout` bounds the wait for the response head. The transfer stops
/// early once `on_progress` returns `false`.
async fn download<F>(
    request: reqwest::RequestBuilder,
    header_timeout: Option<Duration>,
    mut on_progress: F,
) -> Result<()>
where
    F: FnMut(Bytes) -> bool,
{
    let response = match header_timeout {
        Some(limit) => tokio::time::timeout(limit, request.send())
            .await
            .map_err(|_| Error::timeout(limit))??,
        None => request.send().await?,
    };
    let status = response.status();
    if !status.is_success() {
        let headers = normalize_headers(response.headers());
        let body = response.text().await.unwrap_or_default();
        return Err(Error::status(status.as_u16(), headers, body));
    }

    let mut chunks = response.bytes_stream();
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        tracing::trace!(len = chunk.len(), "Chunk received");
        if !on_progress(chunk) {
            tracing::debug!("Stream dropped, stopping download");
            break;
        }
    }
    Ok(())
}
