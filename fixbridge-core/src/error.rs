/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the fixbridge conversion engine.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across decoding, conversion, dictionary loading and
//! session routing.

use crate::types::SemanticType;
use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all fixbridge operations.
#[derive(Debug, Error)]
pub enum FixError {
    /// Error during wire decoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error during wire encoding.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Error converting between messages and mappings.
    #[error("conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// Error loading the data dictionary.
    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// Error in session routing.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// I/O error from configuration, log files or the host link.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur during FIX message decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Message buffer is incomplete, need more data.
    #[error("incomplete message, need more data")]
    Incomplete,

    /// Invalid BeginString field (tag 8).
    #[error("invalid begin string: expected 8=FIX.x.y")]
    InvalidBeginString,

    /// Missing BodyLength field (tag 9).
    #[error("missing body length field (tag 9)")]
    MissingBodyLength,

    /// Invalid BodyLength value.
    #[error("invalid body length value")]
    InvalidBodyLength,

    /// Missing MsgType field (tag 35).
    #[error("missing msg type field (tag 35)")]
    MissingMsgType,

    /// Checksum mismatch between calculated and declared values.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Calculated checksum value.
        calculated: u8,
        /// Declared checksum value in message.
        declared: u8,
    },

    /// Invalid tag format (not a valid integer).
    #[error("invalid tag format: {0}")]
    InvalidTag(String),

    /// Invalid field value for the expected type.
    #[error("invalid field value for tag {tag}: {reason}")]
    InvalidFieldValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Repeating group count mismatch.
    #[error("group count mismatch for tag {count_tag}: expected {expected}, found {actual}")]
    GroupCountMismatch {
        /// The tag containing the group count.
        count_tag: u32,
        /// Expected number of group entries.
        expected: u32,
        /// Actual number of group entries found.
        actual: u32,
    },

    /// A replayed log line carried no message separator.
    #[error("log line {line} has no message separator")]
    MalformedLogLine {
        /// One-based line number in the log file.
        line: usize,
    },

    /// Invalid UTF-8 in string field.
    #[error("invalid utf-8 in field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Errors that occur during FIX message encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Missing required field during encoding.
    #[error("missing required field: tag {tag}")]
    MissingRequiredField {
        /// The tag number of the missing field.
        tag: u32,
    },
}

/// Failures turning field text into a typed value.
///
/// Each variant carries the text that failed to parse. Numeric and temporal
/// text is never defaulted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Text is not a base-10 integer.
    #[error("invalid integer '{0}'")]
    Int(String),

    /// Text is not a floating point number.
    #[error("invalid float '{0}'")]
    Float(String),

    /// Character field with no content.
    #[error("empty character value")]
    EmptyChar,

    /// Text is not a `YYYYMMDD` date.
    #[error("invalid date '{0}', expected YYYYMMDD")]
    Date(String),

    /// Text is not an `HH:MM:SS` time.
    #[error("invalid time '{0}', expected HH:MM:SS")]
    Time(String),

    /// Text is not a `YYYYMMDD-HH:MM:SS.sss` timestamp.
    #[error("invalid timestamp '{0}', expected YYYYMMDD-HH:MM:SS.sss")]
    Timestamp(String),

    /// Timestamp is outside the range representable by the host.
    #[error("timestamp out of range: {0}")]
    TimestampRange(i64),
}

/// Errors converting between messages and field mappings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConvertError {
    /// Tag has no entry in the type dictionary.
    #[error("tag {tag} is not in the type dictionary")]
    UnknownTag {
        /// The offending tag.
        tag: u32,
    },

    /// Field text could not be decoded as its dictionary type.
    #[error("tag {tag} ({semantic_type}): {source}")]
    InvalidValue {
        /// The offending tag.
        tag: u32,
        /// The type the dictionary declared for it.
        semantic_type: SemanticType,
        /// The underlying parse failure.
        #[source]
        source: ValueError,
    },

    /// Host supplied tag and value sequences of different lengths.
    #[error("type: {tags} tags but {values} values")]
    ShapeMismatch {
        /// Number of tags supplied.
        tags: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// A group value was supplied under a tag that is not a repeat count.
    #[error("tag {tag} carries group instances but is not a repeat-count tag")]
    NotAGroup {
        /// The offending tag.
        tag: u32,
    },

    /// A group instance without any fields.
    #[error("group {tag} has an empty instance")]
    EmptyGroupInstance {
        /// The group tag.
        tag: u32,
    },
}

/// Errors loading a data dictionary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// Dictionary source could not be read.
    #[error("dictionary could not be read: {0}")]
    Io(String),

    /// Dictionary source is not a well-formed FIX dictionary.
    #[error("malformed dictionary: {0}")]
    Malformed(String),
}

/// Errors in session routing and configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No active session matches the message header.
    #[error("session not found: {session}")]
    SessionNotFound {
        /// Display form of the session identifier.
        session: String,
    },

    /// Session configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}
