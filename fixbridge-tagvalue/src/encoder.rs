/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message encoder.
//!
//! [`Encoder`] builds a frame field by field; [`encode_message`] writes a
//! whole [`Message`] tree, emitting each group's count field followed by its
//! instances, each laid out in its group's field order.

use crate::checksum::{calculate_checksum, format_checksum};
use crate::decoder::SOH;
use bytes::{BufMut, BytesMut};
use fixbridge_core::error::EncodeError;
use fixbridge_core::message::{
    FieldMap, Group, Message, TAG_BEGIN_STRING, TAG_BODY_LENGTH, TAG_CHECKSUM, TAG_MSG_TYPE,
};

/// FIX message encoder.
///
/// Fields are appended in tag=value form. BeginString, BodyLength and
/// CheckSum are written by [`Encoder::finish`].
#[derive(Debug)]
pub struct Encoder {
    /// Buffer for the message body (between BodyLength and Checksum).
    body: BytesMut,
    /// The BeginString value (e.g., "FIX.4.4").
    begin_string: String,
}

impl Encoder {
    /// Creates a new encoder with the specified BeginString.
    #[must_use]
    pub fn new(begin_string: impl Into<String>) -> Self {
        Self::with_capacity(begin_string, 256)
    }

    /// Creates a new encoder with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `begin_string` - The FIX version string
    /// * `capacity` - Initial body buffer capacity in bytes
    #[must_use]
    pub fn with_capacity(begin_string: impl Into<String>, capacity: usize) -> Self {
        Self {
            body: BytesMut::with_capacity(capacity),
            begin_string: begin_string.into(),
        }
    }

    /// Appends a field with a string value.
    #[inline]
    pub fn put_str(&mut self, tag: u32, value: &str) {
        self.put_raw(tag, value.as_bytes());
    }

    /// Appends a field with an unsigned integer value.
    #[inline]
    pub fn put_uint(&mut self, tag: u32, value: u64) {
        let mut buf = itoa::Buffer::new();
        self.put_raw(tag, buf.format(value).as_bytes());
    }

    /// Appends a field with raw bytes.
    #[inline]
    pub fn put_raw(&mut self, tag: u32, value: &[u8]) {
        let mut tag_buf = itoa::Buffer::new();
        self.body.put_slice(tag_buf.format(tag).as_bytes());
        self.body.put_u8(b'=');
        self.body.put_slice(value);
        self.body.put_u8(SOH);
    }

    /// Finalizes the message and returns the complete encoded bytes.
    ///
    /// Prepends BeginString (8) and BodyLength (9) and appends CheckSum (10).
    #[must_use]
    pub fn finish(self) -> BytesMut {
        let body_len = self.body.len();
        let mut len_buf = itoa::Buffer::new();
        let len_str = len_buf.format(body_len);

        let mut message =
            BytesMut::with_capacity(self.begin_string.len() + len_str.len() + body_len + 14);
        message.put_slice(b"8=");
        message.put_slice(self.begin_string.as_bytes());
        message.put_u8(SOH);
        message.put_slice(b"9=");
        message.put_slice(len_str.as_bytes());
        message.put_u8(SOH);
        message.put_slice(&self.body);

        let checksum = format_checksum(calculate_checksum(&message));
        message.put_slice(b"10=");
        message.put_slice(&checksum);
        message.put_u8(SOH);

        message
    }

    /// Returns the current body length.
    #[inline]
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Clears the encoder for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.body.clear();
    }

    fn put_map(&mut self, map: &FieldMap, skip: &[u32]) {
        for field in map.fields().filter(|f| !skip.contains(&f.tag)) {
            self.put_str(field.tag, &field.value);
            for instance in map.group(field.tag) {
                self.put_group(instance);
            }
        }
    }

    fn put_group(&mut self, group: &Group) {
        let map = group.map();
        let mut written: Vec<u32> = Vec::with_capacity(map.field_count());

        for &tag in group.field_order() {
            if written.contains(&tag) {
                continue;
            }
            if let Some(value) = map.get_field(tag) {
                self.put_str(tag, value);
                for instance in map.group(tag) {
                    self.put_group(instance);
                }
                written.push(tag);
            }
        }
        self.put_map(map, &written);
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new("FIX.4.4")
    }
}

/// Encodes a message tree into a complete frame.
///
/// BodyLength and CheckSum are always recomputed; any values stored in the
/// message for those tags are ignored. MsgType is written first in the body,
/// followed by the remaining header fields, the body and the trailer.
///
/// # Errors
/// Returns `EncodeError::MissingRequiredField` if BeginString or MsgType is
/// absent.
pub fn encode_message(message: &Message) -> Result<BytesMut, EncodeError> {
    let begin_string = message.begin_string().ok_or(EncodeError::MissingRequiredField {
        tag: TAG_BEGIN_STRING,
    })?;
    let msg_type = message
        .msg_type()
        .ok_or(EncodeError::MissingRequiredField { tag: TAG_MSG_TYPE })?;

    let mut encoder = Encoder::new(begin_string);
    encoder.put_str(TAG_MSG_TYPE, msg_type);
    encoder.put_map(
        message.header(),
        &[TAG_BEGIN_STRING, TAG_BODY_LENGTH, TAG_MSG_TYPE],
    );
    encoder.put_map(message.body(), &[]);
    encoder.put_map(message.trailer(), &[TAG_CHECKSUM]);
    Ok(encoder.finish())
}
