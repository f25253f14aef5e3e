/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Tag to semantic type lookup used by the converters.
//!
//! A [`TypeDictionary`] is built once from a [`Dictionary`] and never changes
//! afterwards, so it can be shared freely between threads.

use crate::schema::{Dictionary, FieldDef};
use fixbridge_core::error::DictionaryError;
use fixbridge_core::types::SemanticType;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Immutable tag lookup: semantic type per tag plus the set of repeat-count tags.
#[derive(Debug, Clone, Default)]
pub struct TypeDictionary {
    types: HashMap<u32, SemanticType>,
    group_tags: HashSet<u32>,
    names_and_tags: Vec<(String, u32)>,
    message_types: Vec<(String, String)>,
}

impl TypeDictionary {
    /// Builds the lookup from field definitions alone.
    ///
    /// When a tag is declared more than once the first declaration wins.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a FieldDef>) -> Self {
        let mut dict = Self::default();
        for field in fields {
            if dict.types.contains_key(&field.tag) {
                continue;
            }
            dict.types.insert(field.tag, field.field_type.semantic_type());
            if field.field_type.is_num_in_group() {
                dict.group_tags.insert(field.tag);
            }
            dict.names_and_tags.push((field.name.clone(), field.tag));
        }
        dict
    }

    /// Builds the lookup from a loaded data dictionary.
    #[must_use]
    pub fn from_dictionary(dictionary: &Dictionary) -> Self {
        let mut dict = Self::from_fields(dictionary.fields());
        dict.message_types = dictionary
            .messages()
            .map(|m| (m.name.clone(), m.msg_type.clone()))
            .collect();
        tracing::debug!(
            tags = dict.types.len(),
            group_tags = dict.group_tags.len(),
            "built type dictionary"
        );
        dict
    }

    /// Loads a QuickFIX XML data dictionary and builds the lookup from it.
    ///
    /// # Errors
    /// Returns a `DictionaryError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        Ok(Self::from_dictionary(&Dictionary::load(path)?))
    }

    /// Returns the semantic type of `tag`, if the tag is known.
    #[inline]
    #[must_use]
    pub fn semantic_type(&self, tag: u32) -> Option<SemanticType> {
        self.types.get(&tag).copied()
    }

    /// Returns true if `tag` is a repeat-count (NUMINGROUP) tag.
    #[inline]
    #[must_use]
    pub fn is_group_tag(&self, tag: u32) -> bool {
        self.group_tags.contains(&tag)
    }

    /// Returns the repeat-count tags.
    pub fn group_tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.group_tags.iter().copied()
    }

    /// Returns (field name, tag) pairs in declaration order.
    #[must_use]
    pub fn names_and_tags(&self) -> &[(String, u32)] {
        &self.names_and_tags
    }

    /// Returns (message name, msg_type) pairs in declaration order.
    #[must_use]
    pub fn message_type_names(&self) -> &[(String, String)] {
        &self.message_types
    }

    /// Returns the number of known tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no tags are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use crate::xml::tests::SAMPLE;

    #[test]
    fn test_semantic_lookup() {
        let dict = TypeDictionary::from_dictionary(&Dictionary::from_xml_str(SAMPLE).unwrap());
        assert_eq!(dict.semantic_type(52), Some(SemanticType::Timestamp));
        assert_eq!(dict.semantic_type(207), Some(SemanticType::Symbol));
        assert_eq!(dict.semantic_type(270), Some(SemanticType::Float));
        assert_eq!(dict.semantic_type(269), Some(SemanticType::Char));
        assert_eq!(dict.semantic_type(9), Some(SemanticType::Float));
        assert_eq!(dict.semantic_type(9999), None);
    }

    #[test]
    fn test_group_tag_set() {
        let dict = TypeDictionary::from_dictionary(&Dictionary::from_xml_str(SAMPLE).unwrap());
        assert!(dict.is_group_tag(268));
        assert!(dict.is_group_tag(453));
        assert!(!dict.is_group_tag(269));
        assert_eq!(dict.group_tags().count(), 2);
    }

    #[test]
    fn test_first_declaration_wins() {
        let fields = [
            FieldDef::new(44, "Price", FieldType::Price),
            FieldDef::new(44, "PriceAgain", FieldType::String),
        ];
        let dict = TypeDictionary::from_fields(&fields);
        assert_eq!(dict.semantic_type(44), Some(SemanticType::Float));
        assert_eq!(dict.names_and_tags(), &[("Price".to_string(), 44)]);
    }

    #[test]
    fn test_exports() {
        let dict = TypeDictionary::from_dictionary(&Dictionary::from_xml_str(SAMPLE).unwrap());
        assert_eq!(dict.names_and_tags()[0], ("BeginString".to_string(), 8));
        assert_eq!(
            dict.message_type_names(),
            &[
                ("Heartbeat".to_string(), "0".to_string()),
                (
                    "MarketDataSnapshotFullRefresh".to_string(),
                    "W".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_empty() {
        let dict = TypeDictionary::default();
        assert!(dict.is_empty());
        assert!(!dict.is_group_tag(268));
    }
}
