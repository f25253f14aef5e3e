/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Zero-copy FIX tag=value tokenizer.
//!
//! The decoder splits a frame into [`FieldRef`]s that borrow from the input
//! buffer. It checks the fixed header prefix (8, 9, 35) and, optionally, the
//! trailing checksum; grouping fields into a message tree is left to
//! [`crate::parser::MessageParser`].

use crate::checksum::verify_checksum;
use fixbridge_core::error::DecodeError;
use fixbridge_core::field::FieldRef;
use memchr::memchr;
use smallvec::SmallVec;

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// Equals sign delimiter between tag and value.
pub const EQUALS: u8 = b'=';

/// Fields of one decoded frame, in wire order.
pub type Fields<'a> = SmallVec<[FieldRef<'a>; 32]>;

/// Zero-copy FIX message decoder.
#[derive(Debug)]
pub struct Decoder<'a> {
    /// Input buffer.
    input: &'a [u8],
    /// Current position in the buffer.
    offset: usize,
    /// Field delimiter, SOH unless overridden.
    delimiter: u8,
    /// Whether to validate checksums.
    validate_checksum: bool,
}

impl<'a> Decoder<'a> {
    /// Creates a new decoder for the given input buffer.
    ///
    /// # Arguments
    /// * `input` - The FIX message bytes to decode
    #[inline]
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            delimiter: SOH,
            validate_checksum: true,
        }
    }

    /// Sets whether to validate checksums during decoding.
    #[inline]
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Uses a printable field delimiter such as `|` instead of SOH.
    #[inline]
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Decodes one complete frame from the buffer.
    ///
    /// The frame must start with BeginString (8), BodyLength (9) and MsgType
    /// (35). Decoding stops after the CheckSum (10) field, or at the end of
    /// the buffer when checksum validation is disabled.
    ///
    /// # Errors
    /// Returns `DecodeError` if the frame is malformed or incomplete, or if
    /// its checksum does not match.
    pub fn decode(&mut self) -> Result<Fields<'a>, DecodeError> {
        let start_offset = self.offset;

        let begin_string = self.try_next_field()?.ok_or(DecodeError::Incomplete)?;
        if begin_string.tag != 8 {
            return Err(DecodeError::InvalidBeginString);
        }

        let body_length = self
            .try_next_field()?
            .filter(|f| f.tag == 9)
            .ok_or(DecodeError::MissingBodyLength)?;
        body_length
            .as_str()?
            .parse::<usize>()
            .map_err(|_| DecodeError::InvalidBodyLength)?;

        let msg_type = self
            .try_next_field()?
            .filter(|f| f.tag == 35)
            .ok_or(DecodeError::MissingMsgType)?;

        let mut fields = Fields::new();
        fields.push(begin_string);
        fields.push(body_length);
        fields.push(msg_type);

        let mut checksum: Option<(usize, FieldRef<'a>)> = None;
        loop {
            let field_start = self.offset;
            let Some(field) = self.try_next_field()? else {
                break;
            };
            fields.push(field);
            if field.tag == 10 {
                checksum = Some((field_start, field));
                break;
            }
        }

        if self.validate_checksum {
            let (checksum_start, field) = checksum.ok_or(DecodeError::Incomplete)?;
            verify_checksum(&self.input[start_offset..checksum_start], field.value)?;
        }

        Ok(fields)
    }

    /// Parses the next field, reporting malformed input.
    ///
    /// # Returns
    /// `Ok(None)` once the buffer is exhausted.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidTag` for a non-numeric tag and
    /// `DecodeError::Incomplete` for a field cut off before its delimiter.
    pub fn try_next_field(&mut self) -> Result<Option<FieldRef<'a>>, DecodeError> {
        if self.offset >= self.input.len() {
            return Ok(None);
        }

        let remaining = &self.input[self.offset..];
        let eq_pos = memchr(EQUALS, remaining).ok_or(DecodeError::Incomplete)?;
        let tag_bytes = &remaining[..eq_pos];
        let tag = parse_tag(tag_bytes)
            .ok_or_else(|| DecodeError::InvalidTag(String::from_utf8_lossy(tag_bytes).into()))?;

        let value_start = eq_pos + 1;
        let end = memchr(self.delimiter, &remaining[value_start..]).ok_or(DecodeError::Incomplete)?;
        let value = &remaining[value_start..value_start + end];

        self.offset += value_start + end + 1;
        Ok(Some(FieldRef::new(tag, value)))
    }

    /// Parses the next field from the buffer.
    ///
    /// # Returns
    /// The next field, or `None` if the buffer is exhausted or malformed.
    #[inline]
    pub fn next_field(&mut self) -> Option<FieldRef<'a>> {
        self.try_next_field().ok().flatten()
    }

    /// Returns the current offset in the buffer.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the remaining bytes in the buffer.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.offset..]
    }

    /// Returns true if the buffer has been fully consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }
}

/// Parses a tag number from ASCII bytes.
#[inline]
fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }

    let mut result: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }

    Some(result)
}
