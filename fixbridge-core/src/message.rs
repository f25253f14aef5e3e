/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Structured FIX message tree.
//!
//! This module provides:
//! - [`Field`]: A tag with its textual wire value
//! - [`FieldMap`]: Ordered fields plus the repeating groups attached to them
//! - [`Group`]: One instance of a repeating group
//! - [`Message`]: Header, body and trailer field maps
//!
//! Field values are kept as wire text; typing happens in the converters.

use serde::{Deserialize, Serialize};

/// BeginString (tag 8).
pub const TAG_BEGIN_STRING: u32 = 8;
/// BodyLength (tag 9).
pub const TAG_BODY_LENGTH: u32 = 9;
/// CheckSum (tag 10).
pub const TAG_CHECKSUM: u32 = 10;
/// MsgType (tag 35).
pub const TAG_MSG_TYPE: u32 = 35;
/// SenderCompID (tag 49).
pub const TAG_SENDER_COMP_ID: u32 = 49;
/// TargetCompID (tag 56).
pub const TAG_TARGET_COMP_ID: u32 = 56;

/// Returns true for the standard header tags.
#[must_use]
pub const fn is_header_tag(tag: u32) -> bool {
    matches!(
        tag,
        8 | 9
            | 35
            | 49
            | 56
            | 115
            | 128
            | 90
            | 91
            | 34
            | 50
            | 142
            | 57
            | 143
            | 116
            | 144
            | 129
            | 145
            | 43
            | 97
            | 52
            | 122
            | 212
            | 213
            | 347
            | 369
            | 627
            | 628
            | 629
            | 630
            | 1128
            | 1129
            | 1156
    )
}

/// Returns true for the standard trailer tags.
#[must_use]
pub const fn is_trailer_tag(tag: u32) -> bool {
    matches!(tag, 93 | 89 | 10)
}

/// A field with its textual wire value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// The field tag number.
    pub tag: u32,
    /// The wire value, without delimiters.
    pub value: String,
}

impl Field {
    /// Creates a new field.
    #[must_use]
    pub fn new(tag: u32, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }
}

/// Ordered fields plus attached repeating groups.
///
/// Setting a tag that already exists replaces its value in place. Adding a
/// group instance keeps the group's repeat-count field equal to the number of
/// instances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    fields: Vec<Field>,
    groups: Vec<(u32, Vec<Group>)>,
}

impl FieldMap {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any existing value for the tag.
    pub fn set_field(&mut self, tag: u32, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.tag == tag) {
            Some(field) => field.value = value,
            None => self.fields.push(Field { tag, value }),
        }
    }

    /// Gets a field value by tag.
    #[must_use]
    pub fn get_field(&self, tag: u32) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.value.as_str())
    }

    /// Returns true if the tag is set.
    #[must_use]
    pub fn has_field(&self, tag: u32) -> bool {
        self.fields.iter().any(|f| f.tag == tag)
    }

    /// Removes a field, returning its value.
    pub fn remove_field(&mut self, tag: u32) -> Option<String> {
        let pos = self.fields.iter().position(|f| f.tag == tag)?;
        Some(self.fields.remove(pos).value)
    }

    /// Returns an iterator over fields in order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Appends a group instance under its count tag.
    pub fn add_group(&mut self, group: Group) {
        let count_tag = group.count_tag;
        let count = match self.groups.iter_mut().find(|(tag, _)| *tag == count_tag) {
            Some((_, instances)) => {
                instances.push(group);
                instances.len()
            }
            None => {
                self.groups.push((count_tag, vec![group]));
                1
            }
        };
        let mut buf = itoa::Buffer::new();
        self.set_field(count_tag, buf.format(count));
    }

    /// Returns the instances of a group, or an empty slice.
    #[must_use]
    pub fn group(&self, count_tag: u32) -> &[Group] {
        self.groups
            .iter()
            .find(|(tag, _)| *tag == count_tag)
            .map(|(_, instances)| instances.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the number of instances of a group.
    #[must_use]
    pub fn group_count(&self, count_tag: u32) -> usize {
        self.group(count_tag).len()
    }

    /// Returns an iterator over attached groups in the order they were first added.
    pub fn groups(&self) -> impl Iterator<Item = (u32, &[Group])> {
        self.groups
            .iter()
            .map(|(tag, instances)| (*tag, instances.as_slice()))
    }

    /// Returns true if the map has neither fields nor groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.groups.is_empty()
    }
}

/// One instance of a repeating group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    count_tag: u32,
    delimiter_tag: u32,
    field_order: Vec<u32>,
    map: FieldMap,
}

impl Group {
    /// Creates an empty instance.
    ///
    /// # Arguments
    /// * `count_tag` - The repeat-count tag the group hangs off
    /// * `delimiter_tag` - The tag that marks an instance boundary
    #[must_use]
    pub fn new(count_tag: u32, delimiter_tag: u32) -> Self {
        Self {
            count_tag,
            delimiter_tag,
            field_order: Vec::new(),
            map: FieldMap::new(),
        }
    }

    /// Sets the field order hint used when the instance is serialized.
    #[must_use]
    pub fn with_field_order(mut self, order: Vec<u32>) -> Self {
        self.field_order = order;
        self
    }

    /// Returns the repeat-count tag.
    #[inline]
    #[must_use]
    pub const fn count_tag(&self) -> u32 {
        self.count_tag
    }

    /// Returns the delimiter tag.
    #[inline]
    #[must_use]
    pub const fn delimiter_tag(&self) -> u32 {
        self.delimiter_tag
    }

    /// Returns the field order hint.
    #[must_use]
    pub fn field_order(&self) -> &[u32] {
        &self.field_order
    }

    /// Returns the instance's fields and nested groups.
    #[inline]
    #[must_use]
    pub const fn map(&self) -> &FieldMap {
        &self.map
    }

    /// Returns the instance's fields and nested groups mutably.
    #[inline]
    pub fn map_mut(&mut self) -> &mut FieldMap {
        &mut self.map
    }

    /// Sets a field on the instance.
    pub fn set_field(&mut self, tag: u32, value: impl Into<String>) {
        self.map.set_field(tag, value);
    }

    /// Attaches a nested group instance.
    pub fn add_group(&mut self, group: Group) {
        self.map.add_group(group);
    }
}

/// A structured FIX message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    header: FieldMap,
    body: FieldMap,
    trailer: FieldMap,
}

impl Message {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the header.
    #[inline]
    #[must_use]
    pub const fn header(&self) -> &FieldMap {
        &self.header
    }

    /// Returns the header mutably.
    #[inline]
    pub fn header_mut(&mut self) -> &mut FieldMap {
        &mut self.header
    }

    /// Returns the body.
    #[inline]
    #[must_use]
    pub const fn body(&self) -> &FieldMap {
        &self.body
    }

    /// Returns the body mutably.
    #[inline]
    pub fn body_mut(&mut self) -> &mut FieldMap {
        &mut self.body
    }

    /// Returns the trailer.
    #[inline]
    #[must_use]
    pub const fn trailer(&self) -> &FieldMap {
        &self.trailer
    }

    /// Returns the trailer mutably.
    #[inline]
    pub fn trailer_mut(&mut self) -> &mut FieldMap {
        &mut self.trailer
    }

    /// Sets a body field.
    pub fn set_field(&mut self, tag: u32, value: impl Into<String>) {
        self.body.set_field(tag, value);
    }

    /// Attaches a body group instance.
    pub fn add_group(&mut self, group: Group) {
        self.body.add_group(group);
    }

    /// Returns the MsgType (tag 35).
    #[must_use]
    pub fn msg_type(&self) -> Option<&str> {
        self.header.get_field(TAG_MSG_TYPE)
    }

    /// Returns the BeginString (tag 8).
    #[must_use]
    pub fn begin_string(&self) -> Option<&str> {
        self.header.get_field(TAG_BEGIN_STRING)
    }

    /// Returns the SenderCompID (tag 49).
    #[must_use]
    pub fn sender_comp_id(&self) -> Option<&str> {
        self.header.get_field(TAG_SENDER_COMP_ID)
    }

    /// Returns the TargetCompID (tag 56).
    #[must_use]
    pub fn target_comp_id(&self) -> Option<&str> {
        self.header.get_field(TAG_TARGET_COMP_ID)
    }
}
