/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Dictionary introspection and build information.

use crate::config::strip_path_marker;
use fixbridge_core::error::DictionaryError;
use fixbridge_dictionary::TypeDictionary;

/// Name and code tables of a data dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryTables {
    /// Field names and tags, in declaration order.
    pub names_and_tags: Vec<(String, u32)>,
    /// Message names and type codes, in declaration order.
    pub message_types: Vec<(String, String)>,
}

impl From<&TypeDictionary> for DictionaryTables {
    fn from(dictionary: &TypeDictionary) -> Self {
        Self {
            names_and_tags: dictionary.names_and_tags().to_vec(),
            message_types: dictionary.message_type_names().to_vec(),
        }
    }
}

/// Loads a data dictionary and returns its name and code tables.
///
/// Path markers are stripped from `dictionary_path`.
///
/// # Errors
/// Returns `DictionaryError` if the dictionary cannot be read or parsed.
pub fn introspect(dictionary_path: &str) -> Result<DictionaryTables, DictionaryError> {
    let dictionary = TypeDictionary::load(strip_path_marker(dictionary_path))?;
    Ok(DictionaryTables::from(&dictionary))
}

/// Returns build information as ordered key/value pairs.
#[must_use]
pub fn version_info() -> Vec<(&'static str, String)> {
    vec![
        ("release", env!("CARGO_PKG_VERSION").to_string()),
        ("engine", format!("fixbridge-tagvalue {}", env!("CARGO_PKG_VERSION"))),
        ("os", std::env::consts::OS.to_string()),
        ("arch", std::env::consts::ARCH.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DICTIONARY: &str = r#"<fix type="FIX" major="4" minor="2">
  <header/>
  <trailer/>
  <messages>
    <message name="Heartbeat" msgtype="0" msgcat="admin"/>
    <message name="NewOrderSingle" msgtype="D" msgcat="app">
      <field name="Symbol" required="Y"/>
    </message>
  </messages>
  <components/>
  <fields>
    <field number="35" name="MsgType" type="STRING"/>
    <field number="55" name="Symbol" type="STRING"/>
  </fields>
</fix>"#;

    #[test]
    fn test_introspect() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DICTIONARY.as_bytes()).unwrap();

        let tables = introspect(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            tables.names_and_tags,
            vec![("MsgType".to_string(), 35), ("Symbol".to_string(), 55)]
        );
        assert_eq!(
            tables.message_types,
            vec![
                ("Heartbeat".to_string(), "0".to_string()),
                ("NewOrderSingle".to_string(), "D".to_string())
            ]
        );
    }

    #[test]
    fn test_introspect_missing_file() {
        assert!(matches!(
            introspect(":/nonexistent/FIX42.xml"),
            Err(DictionaryError::Io(_))
        ));
    }

    #[test]
    fn test_version_info_keys() {
        let info = version_info();
        let keys: Vec<_> = info.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["release", "engine", "os", "arch"]);
        assert!(info.iter().all(|(_, v)| !v.is_empty()));
    }
}
