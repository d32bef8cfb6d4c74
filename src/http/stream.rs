// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Incrementally filled byte stream for chunked downloads

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

use crate::error::{Error, Result};

/// Stream of body chunks, in the order the transport delivered them
///
/// Ends after the last chunk, or after a single `Err` item if the download
/// failed part way. Dropping the stream does not cancel the download.
#[derive(Debug)]
pub struct ByteStream {
    rx: mpsc::UnboundedReceiver<Result<Bytes>>,
}

/// Producer half of a [`ByteStream`]
#[derive(Debug, Clone)]
pub struct ChunkSink {
    tx: mpsc::UnboundedSender<Result<Bytes>>,
}

impl ByteStream {
    /// Create a connected sink/stream pair
    pub fn channel() -> (ChunkSink, ByteStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChunkSink { tx }, ByteStream { rx })
    }

    /// Drain the stream into one buffer
    pub async fn collect_bytes(mut self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// View the stream as an `AsyncRead`
    pub fn into_async_read(self) -> impl AsyncRead + Unpin + Send {
        StreamReader::new(
            self.map(|chunk| chunk.map_err(|e| io::Error::new(io::ErrorKind::Other, e))),
        )
    }
}

impl Stream for ByteStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl ChunkSink {
    /// Append a chunk; returns `false` once the consumer is gone
    pub fn push(&self, chunk: Bytes) -> bool {
        self.tx.send(Ok(chunk)).is_ok()
    }

    /// Terminate the stream with an error
    pub fn fail(&self, error: Error) {
        let _ = self.tx.send(Err(error));
    }
}
