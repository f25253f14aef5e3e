/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixbridge Engine
//!
//! Session-facing side of the fixbridge message/value bridge.
//!
//! This crate provides:
//! - **Application trait**: Callback interface for handling FIX messages
//! - **Bridge**: Application that forwards inbound messages to the host and
//!   routes host mappings to live sessions
//! - **Session registry**: Outbound channels keyed by session
//! - **Builder API**: Fluent configuration for bridge setup
//! - **Log replay**: Offline replay of FIX log files
//! - **Introspection**: Dictionary tables and build information

pub mod application;
pub mod bridge;
pub mod builder;
pub mod config;
pub mod introspect;
pub mod registry;
pub mod replay;

pub use application::{Application, NoOpApplication, RejectReason, SessionId};
pub use bridge::Bridge;
pub use builder::BridgeBuilder;
pub use config::{
    BridgeConfig, CounterpartyRole, SessionConfig, SessionSettings, strip_path_marker,
};
pub use introspect::{DictionaryTables, introspect, version_info};
pub use registry::{OutboundReceiver, SessionRegistry};
pub use replay::{ReplaySummary, replay_log};
