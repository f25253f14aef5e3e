/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixbridge Transport
//!
//! Delivery of converted mappings between the engine and the host process.
//!
//! This crate provides:
//! - **Codec**: Tokio codec for length-prefixed payload framing
//! - **Host link**: `bincode`-serialized mappings over an async byte pipe

pub mod codec;
pub mod link;

pub use codec::{CodecError, DEFAULT_MAX_FRAME_SIZE, FrameCodec};
pub use link::{HostLink, HostReceiver, HostSender};
