/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! The bridge application.
//!
//! Inbound: every admin and application message is converted with
//! [`to_mapping`] and pushed to the host. Outbound: host mappings are
//! converted with [`to_message`] and routed through the [`SessionRegistry`].

use crate::application::{Application, RejectReason, SessionId};
use crate::registry::SessionRegistry;
use async_trait::async_trait;
use fixbridge_core::error::{ConvertError, FixError, SessionError};
use fixbridge_core::field::{FieldMapping, FieldValue};
use fixbridge_core::message::Message;
use fixbridge_convert::{to_mapping, to_message};
use fixbridge_dictionary::TypeDictionary;
use fixbridge_transport::HostSender;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tracing::{debug, error, info, warn};

/// Converts between engine messages and host mappings.
#[derive(Debug)]
pub struct Bridge<W> {
    dictionary: Arc<TypeDictionary>,
    registry: Arc<SessionRegistry>,
    host: HostSender<W>,
}

impl<W> Bridge<W> {
    /// Creates a bridge.
    #[must_use]
    pub fn new(
        dictionary: Arc<TypeDictionary>,
        registry: Arc<SessionRegistry>,
        host: HostSender<W>,
    ) -> Self {
        Self {
            dictionary,
            registry,
            host,
        }
    }

    /// Returns the type dictionary.
    #[must_use]
    pub fn dictionary(&self) -> &Arc<TypeDictionary> {
        &self.dictionary
    }

    /// Returns the session registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Sends a host mapping to the session named in its header.
    ///
    /// A missing session is logged and the message dropped.
    ///
    /// # Errors
    /// Returns `ConvertError` if the mapping cannot be converted and
    /// `EncodeError` if the message cannot be serialized.
    pub fn send(&self, mapping: &FieldMapping) -> Result<(), FixError> {
        let message = to_message(mapping, &self.dictionary)?;
        match self.registry.send_to_target(&message) {
            Err(FixError::Session(SessionError::SessionNotFound { session })) => {
                warn!(%session, msg_type = message.msg_type().unwrap_or_default(), "session not found, message dropped");
                Ok(())
            }
            other => other,
        }
    }

    /// Sends a host mapping given as parallel tag and value sequences.
    ///
    /// # Errors
    /// Returns `ConvertError::ShapeMismatch` if the sequences differ in
    /// length, otherwise as [`Bridge::send`].
    pub fn send_parts(&self, tags: Vec<u32>, values: Vec<FieldValue>) -> Result<(), FixError> {
        let mapping = FieldMapping::from_parts(tags, values)?;
        self.send(&mapping)
    }
}

impl<W: AsyncWrite + Unpin + Send> Bridge<W> {
    async fn forward(&self, message: &Message, session_id: &SessionId) -> Result<(), RejectReason> {
        let mapping = to_mapping(message, &self.dictionary).map_err(|err| {
            error!(session = %session_id, error = %err, "inbound conversion failed");
            reject_for(&err)
        })?;

        self.host.send(&mapping).await.map_err(|err| {
            error!(session = %session_id, error = %err, "host delivery failed");
            RejectReason::new(RejectReason::OTHER, err.to_string())
        })?;

        debug!(
            session = %session_id,
            msg_type = message.msg_type().unwrap_or_default(),
            entries = mapping.len(),
            "forwarded message to host"
        );
        Ok(())
    }
}

fn reject_for(err: &ConvertError) -> RejectReason {
    match err {
        ConvertError::UnknownTag { tag } => {
            RejectReason::new(RejectReason::INVALID_TAG, err.to_string()).with_ref_tag(*tag)
        }
        ConvertError::InvalidValue { tag, .. } => {
            RejectReason::new(RejectReason::INCORRECT_DATA_FORMAT, err.to_string())
                .with_ref_tag(*tag)
        }
        _ => RejectReason::new(RejectReason::OTHER, err.to_string()),
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Application for Bridge<W> {
    async fn on_create(&self, session_id: &SessionId) {
        info!(session = %session_id, "session created");
    }

    async fn on_logon(&self, session_id: &SessionId) {
        info!(session = %session_id, "logon");
    }

    async fn on_logout(&self, session_id: &SessionId) {
        info!(session = %session_id, "logout");
    }

    async fn from_admin(
        &self,
        message: &Message,
        session_id: &SessionId,
    ) -> Result<(), RejectReason> {
        self.forward(message, session_id).await
    }

    async fn from_app(
        &self,
        message: &Message,
        session_id: &SessionId,
    ) -> Result<(), RejectReason> {
        self.forward(message, session_id).await
    }
}
