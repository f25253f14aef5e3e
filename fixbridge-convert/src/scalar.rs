/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Scalar codec: wire text to [`TypedValue`] and back.

use crate::temporal;
use fixbridge_core::error::ValueError;
use fixbridge_core::types::{SemanticType, TypedValue};

/// Decodes a field's wire text according to its semantic type.
///
/// # Arguments
/// * `text` - The field value as it appears on the wire
/// * `semantic_type` - The type looked up in the type dictionary
///
/// # Errors
/// Returns `ValueError` if numeric, character or temporal text is malformed.
/// BOOLEAN never fails: only `"Y"` is true.
pub fn decode(text: &str, semantic_type: SemanticType) -> Result<TypedValue, ValueError> {
    Ok(match semantic_type {
        SemanticType::String => TypedValue::String(text.to_string()),
        SemanticType::Symbol => TypedValue::Symbol(text.to_string()),
        SemanticType::Int => TypedValue::Int(
            text.parse()
                .map_err(|_| ValueError::Int(text.to_string()))?,
        ),
        SemanticType::Float => TypedValue::Float(decode_float(text)?),
        SemanticType::Char => TypedValue::Char(text.chars().next().ok_or(ValueError::EmptyChar)?),
        SemanticType::Boolean => TypedValue::Bool(text == "Y"),
        SemanticType::Date => TypedValue::Date(temporal::decode_date(text)?),
        SemanticType::Time => TypedValue::Time(temporal::decode_time(text)?),
        SemanticType::Timestamp => TypedValue::Timestamp(temporal::decode_timestamp(text)?),
    })
}

/// Parses FIX FLOAT text: an optional sign, digits and an optional decimal
/// point. Exponents, `NaN` and infinities are rejected.
fn decode_float(text: &str) -> Result<f64, ValueError> {
    let err = || ValueError::Float(text.to_string());
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(err());
    }
    text.parse().map_err(|_| err())
}

/// Encodes a typed value as canonical wire text.
///
/// # Errors
/// Returns `ValueError` if a date, time or timestamp is outside the range
/// its wire format can express.
pub fn encode(value: &TypedValue) -> Result<String, ValueError> {
    Ok(match value {
        TypedValue::String(s) | TypedValue::Symbol(s) => s.clone(),
        TypedValue::Int(v) => itoa::Buffer::new().format(*v).to_string(),
        TypedValue::Short(v) => itoa::Buffer::new().format(*v).to_string(),
        TypedValue::Float(v) => v.to_string(),
        TypedValue::Char(c) => c.to_string(),
        TypedValue::Bool(b) => (if *b { "Y" } else { "N" }).to_string(),
        TypedValue::Date(days) => temporal::encode_date(*days)?.to_string(),
        TypedValue::Time(millis) => temporal::encode_time(*millis)?.to_string(),
        TypedValue::Timestamp(nanos) => temporal::encode_timestamp(*nanos)?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(text: &str, semantic_type: SemanticType) -> String {
        encode(&decode(text, semantic_type).unwrap()).unwrap()
    }

    #[test]
    fn test_boolean() {
        assert_eq!(decode("Y", SemanticType::Boolean).unwrap(), TypedValue::Bool(true));
        assert_eq!(decode("N", SemanticType::Boolean).unwrap(), TypedValue::Bool(false));
        assert_eq!(decode("", SemanticType::Boolean).unwrap(), TypedValue::Bool(false));
        assert_eq!(decode("y", SemanticType::Boolean).unwrap(), TypedValue::Bool(false));
        assert_eq!(canonical("Y", SemanticType::Boolean), "Y");
        assert_eq!(canonical("", SemanticType::Boolean), "N");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(decode("42", SemanticType::Int).unwrap(), TypedValue::Int(42));
        assert_eq!(decode("-7", SemanticType::Int).unwrap(), TypedValue::Int(-7));
        assert_eq!(decode("101.25", SemanticType::Float).unwrap(), TypedValue::Float(101.25));
        assert_eq!(canonical("100", SemanticType::Float), "100");
        assert_eq!(encode(&TypedValue::Short(-12)).unwrap(), "-12");
    }

    #[test]
    fn test_numbers_reject_garbage() {
        assert_eq!(
            decode("12x", SemanticType::Int).unwrap_err(),
            ValueError::Int("12x".to_string())
        );
        assert_eq!(
            decode("", SemanticType::Float).unwrap_err(),
            ValueError::Float(String::new())
        );
    }

    #[test]
    fn test_float_rejects_non_decimal_text() {
        for text in ["NaN", "inf", "-infinity", "1e5", "1.5E-3", ".", "-", "1.2.3", " 1", "0x10"] {
            assert_eq!(
                decode(text, SemanticType::Float).unwrap_err(),
                ValueError::Float(text.to_string()),
                "{}",
                text
            );
        }
        assert_eq!(decode("-0.5", SemanticType::Float).unwrap(), TypedValue::Float(-0.5));
        assert_eq!(decode("+3", SemanticType::Float).unwrap(), TypedValue::Float(3.0));
        assert_eq!(decode(".25", SemanticType::Float).unwrap(), TypedValue::Float(0.25));
        assert_eq!(decode("7.", SemanticType::Float).unwrap(), TypedValue::Float(7.0));
    }

    #[test]
    fn test_char() {
        assert_eq!(decode("1", SemanticType::Char).unwrap(), TypedValue::Char('1'));
        assert_eq!(decode("AB", SemanticType::Char).unwrap(), TypedValue::Char('A'));
        assert_eq!(decode("", SemanticType::Char).unwrap_err(), ValueError::EmptyChar);
    }

    #[test]
    fn test_text_types() {
        assert_eq!(
            decode("NASDAQ", SemanticType::Symbol).unwrap(),
            TypedValue::Symbol("NASDAQ".to_string())
        );
        assert_eq!(canonical("NASDAQ", SemanticType::Symbol), "NASDAQ");
        assert_eq!(canonical("hello world", SemanticType::String), "hello world");
    }

    #[test]
    fn test_temporal_canonical_text() {
        assert_eq!(canonical("20230615", SemanticType::Date), "20230615");
        assert_eq!(canonical("14:30:00", SemanticType::Time), "14:30:00");
        assert_eq!(
            canonical("20230615-14:30:00.123", SemanticType::Timestamp),
            "20230615-14:30:00.123"
        );
    }

    #[test]
    fn test_value_roundtrip_law() {
        let cases = [
            ("12", SemanticType::Int),
            ("0.1", SemanticType::Float),
            ("1.50", SemanticType::Float),
            ("X", SemanticType::Char),
            ("N", SemanticType::Boolean),
            ("20240229", SemanticType::Date),
            ("23:59:59.999", SemanticType::Time),
            ("20230615-14:30:00.000001", SemanticType::Timestamp),
        ];
        for (text, semantic_type) in cases {
            let first = decode(text, semantic_type).unwrap();
            let again = decode(&encode(&first).unwrap(), semantic_type).unwrap();
            assert_eq!(first, again, "{} as {}", text, semantic_type);
        }
    }
}
