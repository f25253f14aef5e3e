/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX checksum (tag 10) handling.
//!
//! The checksum is the byte sum of everything before the `10=` field,
//! modulo 256, written as three zero-padded digits.

use fixbridge_core::error::DecodeError;

/// Calculates the FIX checksum for the given data.
///
/// # Arguments
/// * `data` - The message bytes preceding the `10=` field
///
/// # Example
/// ```
/// use fixbridge_tagvalue::calculate_checksum;
///
/// let checksum = calculate_checksum(b"8=FIX.4.4\x019=5\x0135=0\x01");
/// assert_eq!(checksum, 163);
/// ```
#[inline]
#[must_use]
pub fn calculate_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Formats a checksum value as three zero-padded ASCII digits.
#[inline]
#[must_use]
pub fn format_checksum(checksum: u8) -> [u8; 3] {
    [
        b'0' + checksum / 100,
        b'0' + (checksum / 10) % 10,
        b'0' + checksum % 10,
    ]
}

/// Parses a three-digit checksum value.
///
/// Returns `None` unless `bytes` is exactly three ASCII digits.
#[inline]
#[must_use]
pub fn parse_checksum(bytes: &[u8]) -> Option<u8> {
    let [d0, d1, d2] = <[u8; 3]>::try_from(bytes).ok()?;
    if !(d0.is_ascii_digit() && d1.is_ascii_digit() && d2.is_ascii_digit()) {
        return None;
    }
    let value = u32::from(d0 - b'0') * 100 + u32::from(d1 - b'0') * 10 + u32::from(d2 - b'0');
    u8::try_from(value).ok()
}

/// Checks a declared checksum against the bytes it covers.
///
/// # Arguments
/// * `covered` - The message bytes preceding the `10=` field
/// * `declared` - The raw value of the `10=` field
///
/// # Errors
/// Returns `DecodeError::InvalidFieldValue` if the declared value is not
/// three digits, or `DecodeError::ChecksumMismatch` if it differs.
pub fn verify_checksum(covered: &[u8], declared: &[u8]) -> Result<(), DecodeError> {
    let declared = parse_checksum(declared).ok_or_else(|| DecodeError::InvalidFieldValue {
        tag: 10,
        reason: "invalid checksum format".to_string(),
    })?;
    let calculated = calculate_checksum(covered);
    if calculated != declared {
        return Err(DecodeError::ChecksumMismatch {
            calculated,
            declared,
        });
    }
    Ok(())
}
