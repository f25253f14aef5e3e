/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Bridge builder for fluent configuration.
//!
//! Assembles a [`Bridge`] from a [`BridgeConfig`]: loads the type dictionary,
//! opens the host link with the configured frame limit and attaches a
//! session registry.

use crate::bridge::Bridge;
use crate::config::{BridgeConfig, CounterpartyRole};
use crate::registry::SessionRegistry;
use fixbridge_core::error::FixError;
use fixbridge_dictionary::TypeDictionary;
use fixbridge_transport::{FrameCodec, HostLink, HostReceiver};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::DuplexStream;

/// Default host link buffer size in bytes.
pub const DEFAULT_LINK_CAPACITY: usize = 64 * 1024;

/// Builder for a [`Bridge`] and its host link.
#[derive(Debug)]
pub struct BridgeBuilder {
    config: BridgeConfig,
    dictionary: Option<Arc<TypeDictionary>>,
    registry: Option<Arc<SessionRegistry>>,
    link_capacity: usize,
}

impl BridgeBuilder {
    /// Creates a builder from a configuration.
    #[must_use]
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            dictionary: None,
            registry: None,
            link_capacity: DEFAULT_LINK_CAPACITY,
        }
    }

    /// Creates a builder from the host's role string and file paths.
    ///
    /// # Errors
    /// Returns `SessionError::Configuration` if `role` is neither
    /// `"initiator"` nor `"acceptor"`.
    pub fn create(
        role: &str,
        settings_path: Option<&str>,
        dictionary_path: &str,
    ) -> Result<Self, FixError> {
        let role = CounterpartyRole::from_str(role)?;
        let mut config = BridgeConfig::new(role, dictionary_path);
        if let Some(path) = settings_path {
            config = config.with_settings_path(path);
        }
        Ok(Self::new(config))
    }

    /// Uses an already loaded type dictionary instead of reading
    /// `dictionary_path`.
    #[must_use]
    pub fn with_dictionary(mut self, dictionary: Arc<TypeDictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Shares an existing session registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<SessionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the host link buffer size.
    #[must_use]
    pub const fn with_link_capacity(mut self, capacity: usize) -> Self {
        self.link_capacity = capacity;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Returns the host link buffer size.
    #[must_use]
    pub const fn link_capacity(&self) -> usize {
        self.link_capacity
    }

    /// Builds the bridge and returns it with the host end of its link.
    ///
    /// # Errors
    /// Returns `DictionaryError` if no dictionary was supplied and
    /// `dictionary_path` cannot be loaded.
    pub fn build(self) -> Result<(Bridge<DuplexStream>, HostReceiver<DuplexStream>), FixError> {
        let dictionary = match self.dictionary {
            Some(dictionary) => dictionary,
            None => Arc::new(TypeDictionary::load(&self.config.dictionary_path)?),
        };
        let registry = self.registry.unwrap_or_default();
        let codec = FrameCodec::new().with_max_frame_size(self.config.max_frame_size);
        let (host, receiver) = HostLink::pair_with_codec(self.link_capacity, codec);

        tracing::info!(
            role = %self.config.role,
            dictionary = %self.config.dictionary_path.display(),
            tags = dictionary.len(),
            "bridge created"
        );
        Ok((Bridge::new(dictionary, registry, host), receiver))
    }
}
