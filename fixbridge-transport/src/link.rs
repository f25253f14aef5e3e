/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Host link: framed delivery of converted mappings to the host process.
//!
//! The engine side holds a [`HostSender`], the host side a [`HostReceiver`].
//! Each [`FieldMapping`] travels as one `bincode` payload inside one
//! [`FrameCodec`] frame.

use crate::codec::{CodecError, FrameCodec};
use bytes::Bytes;
use fixbridge_core::field::FieldMapping;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, DuplexStream};
use tokio::sync::Mutex;
use tokio_util::codec::{FramedRead, FramedWrite};

/// Factory for in-process host links.
#[derive(Debug, Clone, Copy)]
pub struct HostLink;

impl HostLink {
    /// Creates a connected sender/receiver pair over an in-memory duplex pipe.
    ///
    /// # Arguments
    /// * `capacity` - Pipe buffer size in bytes
    #[must_use]
    pub fn pair(capacity: usize) -> (HostSender<DuplexStream>, HostReceiver<DuplexStream>) {
        Self::pair_with_codec(capacity, FrameCodec::new())
    }

    /// Creates a pair using the given codec settings on both ends.
    #[must_use]
    pub fn pair_with_codec(
        capacity: usize,
        codec: FrameCodec,
    ) -> (HostSender<DuplexStream>, HostReceiver<DuplexStream>) {
        let (engine_side, host_side) = tokio::io::duplex(capacity);
        tracing::info!(capacity, max_frame_size = codec.max_frame_size(), "host link opened");
        (
            HostSender::new(engine_side, codec.clone()),
            HostReceiver::new(host_side, codec),
        )
    }
}

/// Engine side of a host link.
///
/// Cloning shares the underlying writer; concurrent sends are serialized so
/// frames never interleave.
#[derive(Debug)]
pub struct HostSender<W> {
    sink: Arc<Mutex<FramedWrite<W, FrameCodec>>>,
}

impl<W> Clone for HostSender<W> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<W: AsyncWrite + Unpin> HostSender<W> {
    /// Wraps a writer.
    #[must_use]
    pub fn new(writer: W, codec: FrameCodec) -> Self {
        Self {
            sink: Arc::new(Mutex::new(FramedWrite::new(writer, codec))),
        }
    }

    /// Serializes and sends one mapping.
    ///
    /// # Errors
    /// Returns `CodecError` if serialization fails, the payload exceeds the
    /// frame limit, or the pipe is closed.
    pub async fn send(&self, mapping: &FieldMapping) -> Result<(), CodecError> {
        let payload = Bytes::from(bincode::serialize(mapping)?);
        let len = payload.len();
        self.sink.lock().await.send(payload).await?;
        tracing::trace!(bytes = len, "sent mapping to host");
        Ok(())
    }
}

/// Host side of a host link.
#[derive(Debug)]
pub struct HostReceiver<R> {
    stream: FramedRead<R, FrameCodec>,
}

impl<R: AsyncRead + Unpin> HostReceiver<R> {
    /// Wraps a reader.
    #[must_use]
    pub fn new(reader: R, codec: FrameCodec) -> Self {
        Self {
            stream: FramedRead::new(reader, codec),
        }
    }

    /// Receives the next mapping.
    ///
    /// Returns `None` once the sending side has closed and all frames have
    /// been read.
    pub async fn recv(&mut self) -> Option<Result<FieldMapping, CodecError>> {
        let frame = self.stream.next().await?;
        Some(frame.and_then(|payload| Ok(bincode::deserialize(&payload)?)))
    }
}
