/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session callbacks.
//!
//! The FIX session layer drives an [`Application`] as sessions come and go
//! and as messages cross the wire. [`crate::Bridge`] is the implementation
//! that forwards inbound messages to the host; replay drives the same
//! callbacks from a log file.

use async_trait::async_trait;
use fixbridge_core::message::Message;

/// The BeginString/SenderCompID/TargetCompID triple naming a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SessionId {
    /// BeginString (FIX version).
    pub begin_string: String,
    /// Sender CompID.
    pub sender_comp_id: String,
    /// Target CompID.
    pub target_comp_id: String,
}

impl SessionId {
    #[must_use]
    pub fn new(
        begin_string: impl Into<String>,
        sender_comp_id: impl Into<String>,
        target_comp_id: impl Into<String>,
    ) -> Self {
        Self {
            begin_string: begin_string.into(),
            sender_comp_id: sender_comp_id.into(),
            target_comp_id: target_comp_id.into(),
        }
    }

    /// Reads the session a message belongs to from its header (8, 49, 56).
    ///
    /// Returns `None` if any of the three fields is missing.
    #[must_use]
    pub fn from_header(message: &Message) -> Option<Self> {
        Some(Self::new(
            message.begin_string()?,
            message.sender_comp_id()?,
            message.target_comp_id()?,
        ))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}->{}",
            self.begin_string, self.sender_comp_id, self.target_comp_id
        )
    }
}

/// Why an inbound message was refused, reported back as a session-level
/// Reject (35=3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectReason {
    /// SessionRejectReason (373).
    pub code: u32,
    /// Text (58).
    pub text: String,
    /// RefTagID (371).
    pub ref_tag: Option<u32>,
}

impl RejectReason {
    /// A tag the data dictionary does not know.
    pub const INVALID_TAG: u32 = 0;
    /// A value that does not convert to its semantic type.
    pub const INCORRECT_DATA_FORMAT: u32 = 6;
    /// Anything else, including host-side failures.
    pub const OTHER: u32 = 99;

    #[must_use]
    pub fn new(code: u32, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
            ref_tag: None,
        }
    }

    #[must_use]
    pub const fn with_ref_tag(mut self, tag: u32) -> Self {
        self.ref_tag = Some(tag);
        self
    }
}

/// Callbacks a FIX session invokes.
///
/// Only [`from_app`](Application::from_app) must be provided; the lifecycle
/// and outbound hooks default to doing nothing and admin messages are
/// accepted unless overridden.
#[async_trait]
pub trait Application: Send + Sync {
    async fn on_create(&self, _session_id: &SessionId) {}

    async fn on_logon(&self, _session_id: &SessionId) {}

    async fn on_logout(&self, _session_id: &SessionId) {}

    /// An outbound Logon, Heartbeat or other admin message, before it is sent.
    async fn to_admin(&self, _message: &mut Message, _session_id: &SessionId) {}

    #[allow(clippy::wrong_self_convention)]
    async fn from_admin(
        &self,
        _message: &Message,
        _session_id: &SessionId,
    ) -> Result<(), RejectReason> {
        Ok(())
    }

    async fn to_app(&self, _message: &mut Message, _session_id: &SessionId) {}

    /// An inbound application message. `Err` refuses it with the given reason.
    #[allow(clippy::wrong_self_convention)]
    async fn from_app(&self, message: &Message, session_id: &SessionId)
    -> Result<(), RejectReason>;
}

/// Accepts every message and ignores every event.
#[derive(Debug, Default)]
pub struct NoOpApplication;

#[async_trait]
impl Application for NoOpApplication {
    async fn from_app(
        &self,
        _message: &Message,
        _session_id: &SessionId,
    ) -> Result<(), RejectReason> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id() {
        let id = SessionId::new("FIX.4.4", "SENDER", "TARGET");
        assert_eq!(id.begin_string, "FIX.4.4");
        assert_eq!(id.to_string(), "FIX.4.4:SENDER->TARGET");
    }

    #[test]
    fn test_session_id_from_header() {
        let mut msg = Message::new();
        msg.header_mut().set_field(8, "FIX.4.2");
        msg.header_mut().set_field(49, "BANK");
        assert_eq!(SessionId::from_header(&msg), None);

        msg.header_mut().set_field(56, "CLIENT");
        assert_eq!(
            SessionId::from_header(&msg),
            Some(SessionId::new("FIX.4.2", "BANK", "CLIENT"))
        );
    }

    #[test]
    fn test_reject_reason() {
        let reason = RejectReason::new(RejectReason::INCORRECT_DATA_FORMAT, "bad date")
            .with_ref_tag(75);
        assert_eq!(reason.code, 6);
        assert_eq!(reason.text, "bad date");
        assert_eq!(reason.ref_tag, Some(75));
    }

    #[tokio::test]
    async fn test_noop_application() {
        let app = NoOpApplication;
        let session_id = SessionId::default();
        let mut msg = Message::new();

        app.on_create(&session_id).await;
        app.on_logon(&session_id).await;
        app.to_admin(&mut msg, &session_id).await;
        app.to_app(&mut msg, &session_id).await;
        app.on_logout(&session_id).await;
        assert!(msg.body().is_empty());
        assert!(app.from_app(&msg, &session_id).await.is_ok());
        assert!(app.from_admin(&msg, &session_id).await.is_ok());
    }
}
