/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session registry.
//!
//! Maps each live [`SessionId`] to the channel its outbound wire bytes are
//! written to. The session side registers on logon and unregisters on
//! logout; senders resolve the session from the message header.

use crate::application::SessionId;
use bytes::Bytes;
use fixbridge_core::error::{FixError, SessionError};
use fixbridge_core::message::Message;
use fixbridge_tagvalue::encode_message;
use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Receiving end of a session's outbound channel.
pub type OutboundReceiver = mpsc::UnboundedReceiver<Bytes>;

/// Registry of sessions that can accept outbound messages.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, mpsc::UnboundedSender<Bytes>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session and returns the receiver for its outbound bytes.
    ///
    /// Registering an existing session replaces its channel.
    pub fn register(&self, session_id: SessionId) -> OutboundReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        tracing::info!(session = %session_id, "session registered");
        self.sessions.write().insert(session_id, tx);
        rx
    }

    /// Removes a session. Returns `true` if it was registered.
    pub fn unregister(&self, session_id: &SessionId) -> bool {
        let removed = self.sessions.write().remove(session_id).is_some();
        if removed {
            tracing::info!(session = %session_id, "session unregistered");
        }
        removed
    }

    /// Returns `true` if the session is registered.
    #[must_use]
    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.read().contains_key(session_id)
    }

    /// Returns the number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns `true` if no session is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Serializes a message and queues it on the session named by its
    /// header (BeginString, SenderCompID, TargetCompID).
    ///
    /// # Errors
    /// Returns `SessionError::SessionNotFound` when the header does not
    /// name a registered session or its receiver has been dropped, and
    /// `EncodeError` when the message cannot be serialized.
    pub fn send_to_target(&self, message: &Message) -> Result<(), FixError> {
        let session_id = SessionId::from_header(message).ok_or_else(|| {
            SessionError::SessionNotFound {
                session: format!(
                    "{}:{}->{}",
                    message.begin_string().unwrap_or_default(),
                    message.sender_comp_id().unwrap_or_default(),
                    message.target_comp_id().unwrap_or_default()
                ),
            }
        })?;

        let sender = self.sessions.read().get(&session_id).cloned();
        let Some(sender) = sender else {
            return Err(SessionError::SessionNotFound {
                session: session_id.to_string(),
            }
            .into());
        };

        let bytes = encode_message(message)?.freeze();
        let len = bytes.len();
        if sender.send(bytes).is_err() {
            self.remove_closed(&session_id, &sender);
            return Err(SessionError::SessionNotFound {
                session: session_id.to_string(),
            }
            .into());
        }
        tracing::debug!(session = %session_id, bytes = len, "queued outbound message");
        Ok(())
    }

    /// Drops the entry for `session_id` only while it still holds the
    /// closed `sender`; a session re-registered in the meantime stays.
    fn remove_closed(&self, session_id: &SessionId, sender: &mpsc::UnboundedSender<Bytes>) {
        let mut sessions = self.sessions.write();
        if sessions
            .get(session_id)
            .is_some_and(|current| current.same_channel(sender))
        {
            sessions.remove(session_id);
            tracing::info!(session = %session_id, "session receiver closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(target: &str) -> Message {
        let mut msg = Message::new();
        msg.header_mut().set_field(8, "FIX.4.4");
        msg.header_mut().set_field(35, "D");
        msg.header_mut().set_field(49, "BRIDGE");
        msg.header_mut().set_field(56, target);
        msg.body_mut().set_field(55, "MSFT");
        msg
    }

    #[test]
    fn test_register_and_send() {
        let registry = SessionRegistry::new();
        let mut rx = registry.register(SessionId::new("FIX.4.4", "BRIDGE", "EXCHANGE"));
        assert_eq!(registry.len(), 1);

        registry.send_to_target(&order("EXCHANGE")).unwrap();
        let bytes = rx.try_recv().unwrap();
        assert!(bytes.starts_with(b"8=FIX.4.4\x019="));
        assert!(bytes.windows(8).any(|w| w == b"\x0155=MSFT"));
    }

    #[test]
    fn test_unknown_session() {
        let registry = SessionRegistry::new();
        let _rx = registry.register(SessionId::new("FIX.4.4", "BRIDGE", "EXCHANGE"));
        assert!(matches!(
            registry.send_to_target(&order("BROKER")),
            Err(FixError::Session(SessionError::SessionNotFound { session }))
                if session == "FIX.4.4:BRIDGE->BROKER"
        ));
    }

    #[test]
    fn test_missing_header_fields() {
        let registry = SessionRegistry::new();
        let mut msg = Message::new();
        msg.body_mut().set_field(55, "MSFT");
        assert!(matches!(
            registry.send_to_target(&msg),
            Err(FixError::Session(SessionError::SessionNotFound { .. }))
        ));
    }

    #[test]
    fn test_dropped_receiver_unregisters() {
        let registry = SessionRegistry::new();
        let id = SessionId::new("FIX.4.4", "BRIDGE", "EXCHANGE");
        drop(registry.register(id.clone()));

        assert!(registry.send_to_target(&order("EXCHANGE")).is_err());
        assert!(!registry.contains(&id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_closed_sender_keeps_reregistered_session() {
        let registry = SessionRegistry::new();
        let id = SessionId::new("FIX.4.4", "BRIDGE", "EXCHANGE");
        drop(registry.register(id.clone()));
        let stale = registry.sessions.read().get(&id).cloned().unwrap();

        let mut rx = registry.register(id.clone());
        registry.remove_closed(&id, &stale);
        assert!(registry.contains(&id));

        registry.send_to_target(&order("EXCHANGE")).unwrap();
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_reregister_after_receiver_dropped() {
        let registry = SessionRegistry::new();
        let id = SessionId::new("FIX.4.4", "BRIDGE", "EXCHANGE");
        drop(registry.register(id.clone()));
        assert!(registry.send_to_target(&order("EXCHANGE")).is_err());

        let mut rx = registry.register(id.clone());
        registry.send_to_target(&order("EXCHANGE")).unwrap();
        assert!(registry.contains(&id));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_unregister() {
        let registry = SessionRegistry::new();
        let id = SessionId::new("FIX.4.4", "BRIDGE", "EXCHANGE");
        let _rx = registry.register(id.clone());
        assert!(registry.unregister(&id));
        assert!(!registry.unregister(&id));
    }
}
