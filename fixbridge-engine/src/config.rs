/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Bridge and session configuration.
//!
//! - [`BridgeConfig`]: counterparty role, file locations and frame limit
//! - [`SessionSettings`]: QuickFIX-style settings file with `[DEFAULT]` and
//!   `[SESSION]` sections

use crate::application::SessionId;
use fixbridge_core::error::{FixError, SessionError};
use fixbridge_transport::DEFAULT_MAX_FRAME_SIZE;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Settings file used when none is supplied.
pub const DEFAULT_SETTINGS_PATH: &str = "src/config/sessions/sample.ini";

/// Marker character the host prefixes onto path-like values.
pub const PATH_MARKER: char = ':';

/// Removes every path marker character from a host-supplied path.
#[must_use]
pub fn strip_path_marker(path: &str) -> String {
    path.chars().filter(|&c| c != PATH_MARKER).collect()
}

/// Which side of the FIX connection the bridge plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterpartyRole {
    /// Connects out to the counterparty.
    Initiator,
    /// Accepts connections from the counterparty.
    Acceptor,
}

impl CounterpartyRole {
    /// Returns the host-facing name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initiator => "initiator",
            Self::Acceptor => "acceptor",
        }
    }
}

impl FromStr for CounterpartyRole {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initiator" => Ok(Self::Initiator),
            "acceptor" => Ok(Self::Acceptor),
            other => Err(SessionError::Configuration(format!(
                "type: unknown counterparty role '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for CounterpartyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Counterparty role.
    pub role: CounterpartyRole,
    /// QuickFIX-style session settings file.
    pub settings_path: PathBuf,
    /// QuickFIX XML data dictionary.
    pub dictionary_path: PathBuf,
    /// Largest payload sent to the host in one frame.
    pub max_frame_size: usize,
}

impl BridgeConfig {
    /// Creates a configuration for `role` reading the given data dictionary.
    ///
    /// Path markers are stripped from `dictionary_path`.
    #[must_use]
    pub fn new(role: CounterpartyRole, dictionary_path: &str) -> Self {
        Self {
            role,
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            dictionary_path: PathBuf::from(strip_path_marker(dictionary_path)),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }

    /// Sets the session settings file; path markers are stripped.
    #[must_use]
    pub fn with_settings_path(mut self, path: &str) -> Self {
        self.settings_path = PathBuf::from(strip_path_marker(path));
        self
    }

    /// Sets the maximum host frame size.
    #[must_use]
    pub const fn with_max_frame_size(mut self, size: usize) -> Self {
        self.max_frame_size = size;
        self
    }

    /// Loads the session settings file.
    ///
    /// # Errors
    /// See [`SessionSettings::load`].
    pub fn load_sessions(&self) -> Result<SessionSettings, FixError> {
        SessionSettings::load(&self.settings_path)
    }
}

/// One `[SESSION]` section with `[DEFAULT]` values merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// FIX version BeginString (e.g., "FIX.4.4").
    pub begin_string: String,
    /// Sender CompID (tag 49).
    pub sender_comp_id: String,
    /// Target CompID (tag 56).
    pub target_comp_id: String,
    /// Every key of the section, defaults included.
    pub settings: HashMap<String, String>,
}

impl SessionConfig {
    fn from_settings(settings: HashMap<String, String>) -> Result<Self, SessionError> {
        let required = |key: &str| {
            settings.get(key).cloned().ok_or_else(|| {
                SessionError::Configuration(format!("session is missing {}", key))
            })
        };
        Ok(Self {
            begin_string: required("BeginString")?,
            sender_comp_id: required("SenderCompID")?,
            target_comp_id: required("TargetCompID")?,
            settings,
        })
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        SessionId::new(
            self.begin_string.as_str(),
            self.sender_comp_id.as_str(),
            self.target_comp_id.as_str(),
        )
    }

    /// Returns a setting by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}

/// Parsed session settings file.
#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    defaults: HashMap<String, String>,
    sessions: Vec<SessionConfig>,
}

enum Section {
    Default,
    Session(usize),
}

impl SessionSettings {
    /// Reads and parses a settings file.
    ///
    /// # Errors
    /// Returns `FixError::Io` if the file cannot be read and
    /// `SessionError::Configuration` if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::parse(&text)?;
        tracing::info!(
            path = %path.display(),
            sessions = settings.sessions.len(),
            "loaded session settings"
        );
        Ok(settings)
    }

    /// Parses settings text.
    ///
    /// `[DEFAULT]` values apply to every session wherever the section
    /// appears; a session's own values take precedence.
    ///
    /// # Errors
    /// Returns `SessionError::Configuration` for a key outside any section,
    /// an unknown section, a line without `=`, or a session missing
    /// BeginString, SenderCompID or TargetCompID.
    pub fn parse(text: &str) -> Result<Self, SessionError> {
        let mut defaults = HashMap::new();
        let mut raw_sessions: Vec<HashMap<String, String>> = Vec::new();
        let mut section: Option<Section> = None;

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = Some(match name.trim().to_ascii_uppercase().as_str() {
                    "DEFAULT" => Section::Default,
                    "SESSION" => {
                        raw_sessions.push(HashMap::new());
                        Section::Session(raw_sessions.len() - 1)
                    }
                    other => {
                        return Err(SessionError::Configuration(format!(
                            "line {}: unknown section [{}]",
                            index + 1,
                            other
                        )));
                    }
                });
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| {
                SessionError::Configuration(format!("line {}: expected key=value", index + 1))
            })?;
            let entry = (key.trim().to_string(), value.trim().to_string());
            match section {
                Some(Section::Default) => {
                    defaults.insert(entry.0, entry.1);
                }
                Some(Section::Session(i)) => {
                    raw_sessions[i].insert(entry.0, entry.1);
                }
                None => {
                    return Err(SessionError::Configuration(format!(
                        "line {}: setting outside of a section",
                        index + 1
                    )));
                }
            }
        }

        let sessions = raw_sessions
            .into_iter()
            .map(|own| {
                let mut merged = defaults.clone();
                merged.extend(own);
                SessionConfig::from_settings(merged)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { defaults, sessions })
    }

    /// Returns the `[DEFAULT]` values.
    #[must_use]
    pub fn defaults(&self) -> &HashMap<String, String> {
        &self.defaults
    }

    /// Returns the sessions in file order.
    #[must_use]
    pub fn sessions(&self) -> &[SessionConfig] {
        &self.sessions
    }
}
