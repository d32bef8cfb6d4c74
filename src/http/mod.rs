// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer of the service requester
//!
//! Builds transport requests from call options, runs them through reqwest
//! and normalizes what comes back.

mod client;
mod request;
mod response;
mod stream;

pub use client::{Reply, ReqwestRequester, Requester};
pub use request::{PreparedBody, PreparedRequest};
pub use response::{normalize_headers, NormalizedResponse, ResponseBody};
pub use stream::{ByteStream, ChunkSink};

/// Header names the requester sets or reads
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const SUDO: &str = "sudo";
}
