/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Core value types shared by the dictionary and the converters.
//!
//! - [`SemanticType`]: the closed set of host value types a field maps to
//! - [`TypedValue`]: a decoded field value in host representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic value type of a field, derived from its dictionary wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SemanticType {
    /// Free text.
    String,
    /// Interned text (exchange codes).
    Symbol,
    /// Signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Single character.
    Char,
    /// `Y`/`N` flag.
    Boolean,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Point in time with sub-second precision.
    Timestamp,
}

impl SemanticType {
    /// Returns the upper-case name used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Symbol => "SYMBOL",
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Char => "CHAR",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
        }
    }

    /// Returns true if values of this type are calendar based.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value in host representation.
///
/// Temporal values are counted from the host epoch, 2000-01-01T00:00:00 UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    /// Free text.
    String(String),
    /// Interned text.
    Symbol(String),
    /// Integer at the host's default width.
    Int(i64),
    /// Narrow integer supplied by the host.
    Short(i16),
    /// Floating point number.
    Float(f64),
    /// Single character.
    Char(char),
    /// Boolean flag.
    Bool(bool),
    /// Days since 2000-01-01.
    Date(i32),
    /// Milliseconds since midnight.
    Time(i32),
    /// Nanoseconds since 2000-01-01T00:00:00 UTC.
    Timestamp(i64),
}

impl TypedValue {
    /// Returns the semantic type this value belongs to.
    ///
    /// `Short` reports [`SemanticType::Int`].
    #[must_use]
    pub const fn semantic_type(&self) -> SemanticType {
        match self {
            Self::String(_) => SemanticType::String,
            Self::Symbol(_) => SemanticType::Symbol,
            Self::Int(_) | Self::Short(_) => SemanticType::Int,
            Self::Float(_) => SemanticType::Float,
            Self::Char(_) => SemanticType::Char,
            Self::Bool(_) => SemanticType::Boolean,
            Self::Date(_) => SemanticType::Date,
            Self::Time(_) => SemanticType::Time,
            Self::Timestamp(_) => SemanticType::Timestamp,
        }
    }

    /// Returns the text of a `String` or `Symbol` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer of an `Int` or `Short` value.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Short(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Returns the float of a `Float` value.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the flag of a `Bool` value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for TypedValue {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}
