/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message to mapping conversion.
//!
//! Output order is fixed: header fields, body fields, groups, trailer
//! fields. Groups follow the flat fields of their scope rather than sitting
//! at their wire position, and repeat-count fields are never emitted; a
//! group's count is the number of instances in its value.

use crate::scalar;
use fixbridge_core::error::ConvertError;
use fixbridge_core::field::{FieldMapping, FieldValue};
use fixbridge_core::message::{FieldMap, Message};
use fixbridge_dictionary::TypeDictionary;

/// Converts a message into an ordered host mapping.
///
/// # Arguments
/// * `message` - The message to convert
/// * `dictionary` - Tag types and repeat-count tags
///
/// # Errors
/// Returns `ConvertError::UnknownTag` for a field missing from the
/// dictionary and `ConvertError::InvalidValue` for text that does not decode
/// as the field's type.
pub fn to_mapping(
    message: &Message,
    dictionary: &TypeDictionary,
) -> Result<FieldMapping, ConvertError> {
    let capacity =
        message.header().field_count() + message.body().field_count() + message.trailer().field_count();
    let mut out = FieldMapping::with_capacity(capacity);

    append_fields(message.header(), dictionary, &mut out)?;
    append_fields(message.body(), dictionary, &mut out)?;
    append_groups(message.header(), dictionary, &mut out)?;
    append_groups(message.body(), dictionary, &mut out)?;
    append_fields(message.trailer(), dictionary, &mut out)?;

    tracing::debug!(
        msg_type = message.msg_type().unwrap_or_default(),
        entries = out.len(),
        "converted message to mapping"
    );
    Ok(out)
}

/// Converts one field map (a group instance) into a mapping.
fn map_to_mapping(map: &FieldMap, dictionary: &TypeDictionary) -> Result<FieldMapping, ConvertError> {
    let mut out = FieldMapping::with_capacity(map.field_count());
    append_fields(map, dictionary, &mut out)?;
    append_groups(map, dictionary, &mut out)?;
    Ok(out)
}

fn append_fields(
    map: &FieldMap,
    dictionary: &TypeDictionary,
    out: &mut FieldMapping,
) -> Result<(), ConvertError> {
    for field in map.fields() {
        if dictionary.is_group_tag(field.tag) {
            continue;
        }
        let semantic_type = dictionary
            .semantic_type(field.tag)
            .ok_or(ConvertError::UnknownTag { tag: field.tag })?;
        let value = scalar::decode(&field.value, semantic_type).map_err(|source| {
            ConvertError::InvalidValue {
                tag: field.tag,
                semantic_type,
                source,
            }
        })?;
        out.push(field.tag, value);
    }
    Ok(())
}

fn append_groups(
    map: &FieldMap,
    dictionary: &TypeDictionary,
    out: &mut FieldMapping,
) -> Result<(), ConvertError> {
    for (count_tag, instances) in map.groups() {
        let converted = instances
            .iter()
            .map(|group| map_to_mapping(group.map(), dictionary))
            .collect::<Result<Vec<_>, _>>()?;
        out.push(count_tag, FieldValue::Group(converted));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::dictionary;
    use fixbridge_core::message::Group;
    use fixbridge_core::types::TypedValue;

    fn snapshot() -> Message {
        let mut msg = Message::new();
        msg.header_mut().set_field(8, "FIX.4.4");
        msg.header_mut().set_field(35, "W");
        msg.header_mut().set_field(49, "SENDER");
        msg.header_mut().set_field(52, "20230615-14:30:00.123");
        msg.set_field(55, "MSFT");
        for (side, px) in [("0", "101.5"), ("1", "101.75")] {
            let mut entry = Group::new(268, 269);
            entry.set_field(269, side);
            entry.set_field(270, px);
            msg.add_group(entry);
        }
        msg.set_field(207, "NASDAQ");
        msg.trailer_mut().set_field(10, "042");
        msg
    }

    #[test]
    fn test_fixed_walk_order() {
        let mapping = to_mapping(&snapshot(), &dictionary()).unwrap();
        let tags: Vec<u32> = mapping.tags().collect();
        assert_eq!(tags, vec![8, 35, 49, 52, 55, 207, 268, 10]);
    }

    #[test]
    fn test_typed_values() {
        let mapping = to_mapping(&snapshot(), &dictionary()).unwrap();
        assert_eq!(mapping.get_scalar(35), Some(&TypedValue::String("W".into())));
        assert_eq!(
            mapping.get_scalar(207),
            Some(&TypedValue::Symbol("NASDAQ".into()))
        );
        assert!(matches!(
            mapping.get_scalar(52),
            Some(TypedValue::Timestamp(_))
        ));
    }

    #[test]
    fn test_groups_omit_count_tag() {
        let mapping = to_mapping(&snapshot(), &dictionary()).unwrap();
        let entries = mapping.get(268).and_then(FieldValue::as_group).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].tags().collect::<Vec<_>>(), vec![269, 270]);
        assert_eq!(entries[1].get_scalar(270), Some(&TypedValue::Float(101.75)));
        assert_eq!(mapping.iter().filter(|(tag, _)| *tag == 268).count(), 1);
        assert!(mapping.get(268).and_then(FieldValue::as_scalar).is_none());
    }

    #[test]
    fn test_nested_groups() {
        let mut msg = Message::new();
        msg.header_mut().set_field(35, "W");
        let mut entry = Group::new(268, 269);
        entry.set_field(269, "0");
        for id in ["P1", "P2"] {
            let mut party = Group::new(453, 448);
            party.set_field(448, id);
            party.set_field(452, "3");
            entry.add_group(party);
        }
        msg.add_group(entry);

        let mapping = to_mapping(&msg, &dictionary()).unwrap();
        let entries = mapping.get(268).and_then(FieldValue::as_group).unwrap();
        assert_eq!(entries[0].tags().collect::<Vec<_>>(), vec![269, 453]);
        let parties = entries[0].get(453).and_then(FieldValue::as_group).unwrap();
        assert_eq!(parties.len(), 2);
        assert_eq!(parties[1].get_scalar(448), Some(&TypedValue::String("P2".into())));
    }

    #[test]
    fn test_unknown_tag() {
        let mut msg = snapshot();
        msg.set_field(9999, "x");
        assert_eq!(
            to_mapping(&msg, &dictionary()).unwrap_err(),
            ConvertError::UnknownTag { tag: 9999 }
        );
    }

    #[test]
    fn test_invalid_value_names_field() {
        let mut msg = snapshot();
        msg.set_field(44, "abc");
        assert!(matches!(
            to_mapping(&msg, &dictionary()),
            Err(ConvertError::InvalidValue { tag: 44, .. })
        ));
    }
}
