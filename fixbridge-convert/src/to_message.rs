/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Mapping to message conversion.
//!
//! Each group instance is rebuilt with its own last key as the delimiter tag
//! and its full key sequence as the field order. Instances are checked before
//! they are attached: a group must sit under a repeat-count tag and no
//! instance may be empty. Instances of one group may end on different tags,
//! as they do when trailing optional fields are absent.

use crate::scalar;
use fixbridge_core::error::ConvertError;
use fixbridge_core::field::{FieldMapping, FieldValue};
use fixbridge_core::message::{
    FieldMap, Group, Message, TAG_BEGIN_STRING, TAG_MSG_TYPE, TAG_SENDER_COMP_ID,
    TAG_TARGET_COMP_ID, is_header_tag, is_trailer_tag,
};
use fixbridge_core::types::TypedValue;
use fixbridge_dictionary::TypeDictionary;

/// Tags that always belong to the header, wherever they appear in a mapping.
pub const RESERVED_HEADER_TAGS: [u32; 4] = [
    TAG_MSG_TYPE,
    TAG_BEGIN_STRING,
    TAG_SENDER_COMP_ID,
    TAG_TARGET_COMP_ID,
];

/// Rebuilds a message from an ordered host mapping.
///
/// Reserved and standard header tags go to the header, trailer tags to the
/// trailer, everything else to the body.
///
/// # Errors
/// Returns `ConvertError::UnknownTag` for a tag missing from the
/// dictionary, `ConvertError::InvalidValue` for a temporal value outside its
/// wire range, and the group validation errors described in the module docs.
pub fn to_message(
    mapping: &FieldMapping,
    dictionary: &TypeDictionary,
) -> Result<Message, ConvertError> {
    let mut message = Message::new();
    for (tag, value) in mapping.iter() {
        let target = if RESERVED_HEADER_TAGS.contains(&tag) || is_header_tag(tag) {
            message.header_mut()
        } else if is_trailer_tag(tag) {
            message.trailer_mut()
        } else {
            message.body_mut()
        };
        set_entry(target, tag, value, dictionary)?;
    }

    tracing::debug!(
        msg_type = message.msg_type().unwrap_or_default(),
        entries = mapping.len(),
        "converted mapping to message"
    );
    Ok(message)
}

fn set_entry(
    target: &mut FieldMap,
    tag: u32,
    value: &FieldValue,
    dictionary: &TypeDictionary,
) -> Result<(), ConvertError> {
    match value {
        FieldValue::Scalar(scalar) => {
            let text = encode_field(tag, scalar, dictionary)?;
            target.set_field(tag, text);
        }
        FieldValue::Group(instances) => {
            let groups = build_groups(tag, instances, dictionary)?;
            if groups.is_empty() {
                target.set_field(tag, "0");
            }
            for group in groups {
                target.add_group(group);
            }
        }
    }
    Ok(())
}

fn encode_field(
    tag: u32,
    value: &TypedValue,
    dictionary: &TypeDictionary,
) -> Result<String, ConvertError> {
    if dictionary.semantic_type(tag).is_none() {
        return Err(ConvertError::UnknownTag { tag });
    }
    scalar::encode(value).map_err(|source| ConvertError::InvalidValue {
        tag,
        semantic_type: value.semantic_type(),
        source,
    })
}

fn build_groups(
    count_tag: u32,
    instances: &[FieldMapping],
    dictionary: &TypeDictionary,
) -> Result<Vec<Group>, ConvertError> {
    if !dictionary.is_group_tag(count_tag) {
        return Err(match dictionary.semantic_type(count_tag) {
            Some(_) => ConvertError::NotAGroup { tag: count_tag },
            None => ConvertError::UnknownTag { tag: count_tag },
        });
    }

    let mut groups = Vec::with_capacity(instances.len());
    for instance in instances {
        let delimiter = instance
            .last_tag()
            .ok_or(ConvertError::EmptyGroupInstance { tag: count_tag })?;
        let mut group =
            Group::new(count_tag, delimiter).with_field_order(instance.tags().collect());
        for (tag, value) in instance.iter() {
            set_entry(group.map_mut(), tag, value, dictionary)?;
        }
        groups.push(group);
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::dictionary;
    use crate::to_mapping::to_mapping;

    fn md_entry(side: &str, px: f64) -> FieldMapping {
        FieldMapping::new().with(269, side).with(270, px)
    }

    #[test]
    fn test_reserved_tags_go_to_header() {
        let mapping = FieldMapping::new()
            .with(55, "MSFT")
            .with(35, "D")
            .with(8, "FIX.4.4")
            .with(56, "TARGET")
            .with(49, "SENDER")
            .with(34, 7i64)
            .with(10, "042");
        let msg = to_message(&mapping, &dictionary()).unwrap();
        assert_eq!(msg.msg_type(), Some("D"));
        assert_eq!(msg.begin_string(), Some("FIX.4.4"));
        assert_eq!(msg.sender_comp_id(), Some("SENDER"));
        assert_eq!(msg.target_comp_id(), Some("TARGET"));
        assert_eq!(msg.header().get_field(34), Some("7"));
        assert_eq!(msg.body().get_field(55), Some("MSFT"));
        assert_eq!(msg.trailer().get_field(10), Some("042"));
        assert!(!msg.body().has_field(35));
    }

    #[test]
    fn test_last_key_is_delimiter() {
        let mapping = FieldMapping::new()
            .with(35, "W")
            .with_group(268, vec![md_entry("0", 101.5), md_entry("1", 101.75)]);
        let msg = to_message(&mapping, &dictionary()).unwrap();

        let entries = msg.body().group(268);
        assert_eq!(entries.len(), 2);
        for entry in entries {
            assert_eq!(entry.delimiter_tag(), 270);
            assert_eq!(entry.field_order(), &[269, 270]);
        }
        assert_eq!(msg.body().get_field(268), Some("2"));
        assert_eq!(entries[1].map().get_field(270), Some("101.75"));
    }

    #[test]
    fn test_nested_group_rebuilt_before_attach() {
        let party = FieldMapping::new().with(448, "P1").with(452, 3i64);
        let entry = FieldMapping::new()
            .with(269, "0")
            .with_group(453, vec![party.clone(), party]);
        let mapping = FieldMapping::new().with(35, "W").with_group(268, vec![entry]);

        let msg = to_message(&mapping, &dictionary()).unwrap();
        let entry = &msg.body().group(268)[0];
        assert_eq!(entry.delimiter_tag(), 453);
        let parties = entry.map().group(453);
        assert_eq!(parties.len(), 2);
        assert_eq!(parties[0].delimiter_tag(), 452);
        assert_eq!(entry.map().get_field(453), Some("2"));
    }

    #[test]
    fn test_group_validation() {
        let dict = dictionary();
        let not_a_group = FieldMapping::new().with_group(55, vec![md_entry("0", 1.0)]);
        assert_eq!(
            to_message(&not_a_group, &dict).unwrap_err(),
            ConvertError::NotAGroup { tag: 55 }
        );

        let empty = FieldMapping::new().with_group(268, vec![FieldMapping::new()]);
        assert_eq!(
            to_message(&empty, &dict).unwrap_err(),
            ConvertError::EmptyGroupInstance { tag: 268 }
        );
    }

    #[test]
    fn test_instances_keep_their_own_delimiter() {
        let dict = dictionary();
        let mapping = FieldMapping::new().with(35, "W").with_group(
            268,
            vec![md_entry("0", 101.5), FieldMapping::new().with(269, "J")],
        );
        let msg = to_message(&mapping, &dict).unwrap();

        let entries = msg.body().group(268);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].delimiter_tag(), 270);
        assert_eq!(entries[1].delimiter_tag(), 269);
        assert_eq!(entries[1].field_order(), &[269]);
        assert_eq!(to_mapping(&msg, &dict).unwrap(), mapping);
    }

    #[test]
    fn test_unknown_tags() {
        let dict = dictionary();
        assert_eq!(
            to_message(&FieldMapping::new().with(9999, "x"), &dict).unwrap_err(),
            ConvertError::UnknownTag { tag: 9999 }
        );
        let unknown_group = FieldMapping::new().with_group(9998, vec![md_entry("0", 1.0)]);
        assert_eq!(
            to_message(&unknown_group, &dict).unwrap_err(),
            ConvertError::UnknownTag { tag: 9998 }
        );
    }

    #[test]
    fn test_empty_group_sets_zero_count() {
        let mapping = FieldMapping::new().with(35, "W").with_group(268, Vec::new());
        let msg = to_message(&mapping, &dictionary()).unwrap();
        assert_eq!(msg.body().get_field(268), Some("0"));
        assert!(msg.body().group(268).is_empty());
    }

    #[test]
    fn test_out_of_range_time() {
        let mapping = FieldMapping::new().with(273, TypedValue::Time(-5));
        assert!(matches!(
            to_message(&mapping, &dictionary()),
            Err(ConvertError::InvalidValue { tag: 273, .. })
        ));
    }

    #[test]
    fn test_roundtrip_idempotent() {
        let dict = dictionary();
        let party = FieldMapping::new().with(448, "P1").with(452, 3i64);
        let entry = FieldMapping::new()
            .with(269, "0")
            .with(270, 101.5)
            .with_group(453, vec![party]);
        let mapping = FieldMapping::new()
            .with(8, "FIX.4.4")
            .with(35, "W")
            .with(49, "SENDER")
            .with(56, "TARGET")
            .with(52, TypedValue::Timestamp(739_629_000_123_000_000))
            .with(43, true)
            .with(55, "MSFT")
            .with(207, TypedValue::Symbol("NASDAQ".into()))
            .with_group(268, vec![entry.clone(), entry]);

        let first = to_mapping(&to_message(&mapping, &dict).unwrap(), &dict).unwrap();
        assert_eq!(first, mapping);
        let second = to_mapping(&to_message(&first, &dict).unwrap(), &dict).unwrap();
        assert_eq!(second, first);
    }
}
