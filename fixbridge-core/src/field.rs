/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field types for FIX messages and their host-side mappings.
//!
//! This module provides:
//! - [`FieldTag`]: Type-safe wrapper for FIX field tag numbers
//! - [`FieldRef`]: Zero-copy reference to a field within a message buffer
//! - [`FieldValue`]: A mapping entry, either a scalar or a repeating group
//! - [`FieldMapping`]: Ordered tag/value mapping exchanged with the host

use crate::error::{ConvertError, DecodeError};
use crate::types::TypedValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// FIX field tag number.
///
/// Tags are positive integers that identify fields within a FIX message.
/// Standard tags are defined in the FIX specification (1-5000 range),
/// while user-defined tags use the 5001+ range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FieldTag(u32);

impl FieldTag {
    /// Creates a new field tag.
    #[inline]
    #[must_use]
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// Returns the raw tag number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns true if this is a user-defined tag (5001+).
    #[inline]
    #[must_use]
    pub const fn is_user_defined(self) -> bool {
        self.0 > 5000
    }
}

impl From<u32> for FieldTag {
    fn from(tag: u32) -> Self {
        Self(tag)
    }
}

impl From<FieldTag> for u32 {
    fn from(tag: FieldTag) -> Self {
        tag.0
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Zero-copy reference to a field within a FIX message buffer.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    /// The field tag number.
    pub tag: u32,
    /// Reference to the field value bytes (without delimiters).
    pub value: &'a [u8],
}

impl<'a> FieldRef<'a> {
    /// Creates a new field reference.
    #[inline]
    #[must_use]
    pub const fn new(tag: u32, value: &'a [u8]) -> Self {
        Self { tag, value }
    }

    /// Returns the value as a string slice.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidUtf8` if the value is not valid UTF-8.
    pub fn as_str(&self) -> Result<&'a str, DecodeError> {
        std::str::from_utf8(self.value).map_err(DecodeError::from)
    }

    /// Parses the value as an unsigned count (used for repeat-count fields).
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if the value is not a valid count.
    pub fn as_count(&self) -> Result<u32, DecodeError> {
        let s = self.as_str()?;
        s.parse().map_err(|_| DecodeError::InvalidFieldValue {
            tag: self.tag,
            reason: format!("failed to parse '{}' as a group count", s),
        })
    }
}

/// One entry of a [`FieldMapping`].
///
/// A repeating group is a sequence of instances, each an ordered mapping of
/// its own that may hold further groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// A single typed value.
    Scalar(TypedValue),
    /// Instances of a repeating group.
    Group(Vec<FieldMapping>),
}

impl FieldValue {
    /// Returns the scalar value, if this is not a group.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&TypedValue> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Group(_) => None,
        }
    }

    /// Returns the group instances, if this is a group.
    #[must_use]
    pub fn as_group(&self) -> Option<&[FieldMapping]> {
        match self {
            Self::Group(instances) => Some(instances),
            Self::Scalar(_) => None,
        }
    }
}

impl From<TypedValue> for FieldValue {
    fn from(value: TypedValue) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<FieldMapping>> for FieldValue {
    fn from(instances: Vec<FieldMapping>) -> Self {
        Self::Group(instances)
    }
}

/// Ordered tag/value mapping.
///
/// Used for a whole message and for each group instance. Insertion order is
/// preserved; the last key of a group instance names that group's delimiter
/// when the mapping is turned back into a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    entries: Vec<(FieldTag, FieldValue)>,
}

impl FieldMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mapping with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Builds a mapping from the host's parallel tag and value sequences.
    ///
    /// # Errors
    /// Returns `ConvertError::ShapeMismatch` if the sequences differ in length.
    pub fn from_parts(tags: Vec<u32>, values: Vec<FieldValue>) -> Result<Self, ConvertError> {
        if tags.len() != values.len() {
            return Err(ConvertError::ShapeMismatch {
                tags: tags.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            entries: tags.into_iter().map(FieldTag::new).zip(values).collect(),
        })
    }

    /// Splits the mapping into parallel tag and value sequences.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u32>, Vec<FieldValue>) {
        self.entries
            .into_iter()
            .map(|(tag, value)| (tag.value(), value))
            .unzip()
    }

    /// Appends an entry.
    pub fn push(&mut self, tag: impl Into<FieldTag>, value: impl Into<FieldValue>) {
        self.entries.push((tag.into(), value.into()));
    }

    /// Appends a scalar entry, builder style.
    #[must_use]
    pub fn with(mut self, tag: u32, value: impl Into<TypedValue>) -> Self {
        self.push(tag, FieldValue::Scalar(value.into()));
        self
    }

    /// Appends a group entry, builder style.
    #[must_use]
    pub fn with_group(mut self, tag: u32, instances: Vec<FieldMapping>) -> Self {
        self.push(tag, FieldValue::Group(instances));
        self
    }

    /// Returns the first value stored under `tag`.
    #[must_use]
    pub fn get(&self, tag: u32) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(t, _)| t.value() == tag)
            .map(|(_, v)| v)
    }

    /// Returns the first scalar stored under `tag`.
    #[must_use]
    pub fn get_scalar(&self, tag: u32) -> Option<&TypedValue> {
        self.get(tag).and_then(FieldValue::as_scalar)
    }

    /// Returns true if any entry uses `tag`.
    #[must_use]
    pub fn contains(&self, tag: u32) -> bool {
        self.get(tag).is_some()
    }

    /// Returns the tags in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|(t, _)| t.value())
    }

    /// Returns the tag of the last entry.
    #[must_use]
    pub fn last_tag(&self) -> Option<u32> {
        self.entries.last().map(|(t, _)| t.value())
    }

    /// Returns an iterator over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &FieldValue)> {
        self.entries.iter().map(|(t, v)| (t.value(), v))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for FieldMapping {
    type Item = (FieldTag, FieldValue);
    type IntoIter = std::vec::IntoIter<(FieldTag, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(FieldTag, FieldValue)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (FieldTag, FieldValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
