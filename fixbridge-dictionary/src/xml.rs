/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! QuickFIX XML data dictionary loader.
//!
//! Reads the `<fix>` document layout used by QuickFIX (`header`, `trailer`,
//! `messages`, `components`, `fields`) into a [`Dictionary`]. Components are
//! expanded in place so every message and group lists its own fields, and
//! each group's delimiter is the first member it declares.

use crate::schema::{
    Dictionary, FieldDef, FieldType, GroupDef, MemberRef, MessageCategory, MessageDef, Version,
};
use fixbridge_core::error::DictionaryError;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use xmltree::{Element, XMLNode};

/// Deepest component nesting accepted before the document is rejected.
const MAX_COMPONENT_DEPTH: usize = 32;

trait XmlHelper {
    fn attribute(&self, name: &str) -> Result<&str, DictionaryError>;
    fn child_elements(&self) -> Box<dyn Iterator<Item = &Element> + '_>;
}

impl XmlHelper for Element {
    fn attribute(&self, name: &str) -> Result<&str, DictionaryError> {
        self.attributes.get(name).map(String::as_str).ok_or_else(|| {
            DictionaryError::Malformed(format!("no `{}` attribute in `{}` element", name, self.name))
        })
    }

    fn child_elements(&self) -> Box<dyn Iterator<Item = &Element> + '_> {
        Box::new(self.children.iter().filter_map(XMLNode::as_element))
    }
}

fn is_required(element: &Element) -> bool {
    element
        .attributes
        .get("required")
        .is_some_and(|v| v.eq_ignore_ascii_case("Y"))
}

fn parse_number(element: &Element, name: &str) -> Result<u32, DictionaryError> {
    let raw = element.attribute(name)?;
    raw.parse().map_err(|_| {
        DictionaryError::Malformed(format!(
            "`{}` attribute of `{}` is not a number: {}",
            name, element.name, raw
        ))
    })
}

/// Fields and groups collected while expanding a member list.
#[derive(Default)]
struct Members {
    fields: Vec<MemberRef>,
    groups: Vec<GroupDef>,
    order: Vec<u32>,
}

struct Expander<'a> {
    tags_by_name: HashMap<&'a str, u32>,
    components: HashMap<&'a str, &'a Element>,
}

impl<'a> Expander<'a> {
    fn tag_of(&self, name: &str) -> Result<u32, DictionaryError> {
        self.tags_by_name
            .get(name)
            .copied()
            .ok_or_else(|| DictionaryError::Malformed(format!("unknown field `{}`", name)))
    }

    fn expand(
        &self,
        element: &Element,
        out: &mut Members,
        depth: usize,
    ) -> Result<(), DictionaryError> {
        if depth > MAX_COMPONENT_DEPTH {
            return Err(DictionaryError::Malformed(format!(
                "component nesting deeper than {} levels",
                MAX_COMPONENT_DEPTH
            )));
        }
        for child in element.child_elements() {
            match child.name.as_str() {
                "field" => {
                    let name = child.attribute("name")?;
                    let tag = self.tag_of(name)?;
                    out.order.push(tag);
                    out.fields.push(MemberRef {
                        tag,
                        name: name.to_string(),
                        required: is_required(child),
                    });
                }
                "group" => {
                    let group = self.group(child, depth)?;
                    out.order.push(group.count_tag);
                    out.groups.push(group);
                }
                "component" => {
                    let name = child.attribute("name")?;
                    let component = self.components.get(name).ok_or_else(|| {
                        DictionaryError::Malformed(format!("unknown component `{}`", name))
                    })?;
                    self.expand(component, out, depth + 1)?;
                }
                other => {
                    return Err(DictionaryError::Malformed(format!(
                        "unexpected member `{}` in `{}`",
                        other, element.name
                    )));
                }
            }
        }
        Ok(())
    }

    fn group(&self, element: &Element, depth: usize) -> Result<GroupDef, DictionaryError> {
        let name = element.attribute("name")?;
        let count_tag = self.tag_of(name)?;
        let mut members = Members::default();
        self.expand(element, &mut members, depth + 1)?;
        let delimiter_tag = *members.order.first().ok_or_else(|| {
            DictionaryError::Malformed(format!("group `{}` has no members", name))
        })?;
        Ok(GroupDef {
            count_tag,
            name: name.to_string(),
            delimiter_tag,
            fields: members.fields,
            groups: members.groups,
            field_order: members.order,
            required: is_required(element),
        })
    }
}

fn parse_field(element: &Element) -> Result<FieldDef, DictionaryError> {
    let tag = parse_number(element, "number")?;
    let name = element.attribute("name")?;
    let field_type = element
        .attribute("type")?
        .parse::<FieldType>()
        .unwrap_or(FieldType::String);
    let values = element
        .child_elements()
        .filter(|e| e.name == "value")
        .filter_map(|e| {
            let value = e.attributes.get("enum")?;
            let description = e.attributes.get("description").cloned().unwrap_or_default();
            Some((value.clone(), description))
        })
        .collect();
    Ok(FieldDef::new(tag, name, field_type).with_values(values))
}

fn parse_version(root: &Element) -> Option<Version> {
    let kind = root.attributes.get("type").map_or("FIX", String::as_str);
    let major = parse_number(root, "major").ok()?;
    let minor = parse_number(root, "minor").ok()?;
    let service_pack = parse_number(root, "servicepack").unwrap_or(0);
    Version::from_parts(kind, major, minor, service_pack)
}

impl Dictionary {
    /// Parses a QuickFIX XML data dictionary.
    ///
    /// # Arguments
    /// * `reader` - Source of the XML document
    ///
    /// # Errors
    /// Returns `DictionaryError::Malformed` if the document is not valid XML,
    /// lacks a `fields` section, or references unknown fields or components.
    pub fn from_xml<R: Read>(reader: R) -> Result<Self, DictionaryError> {
        let root =
            Element::parse(reader).map_err(|e| DictionaryError::Malformed(e.to_string()))?;
        Self::from_element(&root)
    }

    /// Parses a QuickFIX XML data dictionary held in memory.
    ///
    /// # Errors
    /// See [`Dictionary::from_xml`].
    pub fn from_xml_str(xml: &str) -> Result<Self, DictionaryError> {
        Self::from_xml(xml.as_bytes())
    }

    /// Loads a QuickFIX XML data dictionary from disk.
    ///
    /// # Errors
    /// Returns `DictionaryError::Io` if the file cannot be read, or any error
    /// of [`Dictionary::from_xml`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| DictionaryError::Io(format!("{}: {}", path.display(), e)))?;
        let dictionary = Self::from_xml(std::io::BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            fields = dictionary.fields().count(),
            messages = dictionary.messages().count(),
            "loaded data dictionary"
        );
        Ok(dictionary)
    }

    fn from_element(root: &Element) -> Result<Self, DictionaryError> {
        let mut dictionary = Self::new(parse_version(root));

        let fields = root
            .get_child("fields")
            .ok_or_else(|| DictionaryError::Malformed("no `fields` section".to_string()))?;
        for element in fields.child_elements().filter(|e| e.name == "field") {
            dictionary.add_field(parse_field(element)?);
        }

        let mut expander = Expander {
            tags_by_name: HashMap::new(),
            components: HashMap::new(),
        };
        for element in fields.child_elements().filter(|e| e.name == "field") {
            expander
                .tags_by_name
                .insert(element.attribute("name")?, parse_number(element, "number")?);
        }
        if let Some(components) = root.get_child("components") {
            for element in components.child_elements() {
                expander
                    .components
                    .insert(element.attribute("name")?, element);
            }
        }

        if let Some(header) = root.get_child("header") {
            let mut members = Members::default();
            expander.expand(header, &mut members, 0)?;
            dictionary.header = members.fields;
            dictionary.header_groups = members.groups;
        }
        if let Some(trailer) = root.get_child("trailer") {
            let mut members = Members::default();
            expander.expand(trailer, &mut members, 0)?;
            dictionary.trailer = members.fields;
        }

        if let Some(messages) = root.get_child("messages") {
            for element in messages.child_elements().filter(|e| e.name == "message") {
                let mut members = Members::default();
                expander.expand(element, &mut members, 0)?;
                let category = match element.attributes.get("msgcat").map(String::as_str) {
                    Some("admin") => MessageCategory::Admin,
                    _ => MessageCategory::App,
                };
                dictionary.add_message(MessageDef {
                    msg_type: element.attribute("msgtype")?.to_string(),
                    name: element.attribute("name")?.to_string(),
                    category,
                    fields: members.fields,
                    groups: members.groups,
                });
            }
        }

        Ok(dictionary)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"<fix type="FIX" major="4" minor="4" servicepack="0">
  <header>
    <field name="BeginString" required="Y"/>
    <field name="BodyLength" required="Y"/>
    <field name="MsgType" required="Y"/>
    <field name="SenderCompID" required="Y"/>
    <field name="TargetCompID" required="Y"/>
    <field name="MsgSeqNum" required="Y"/>
    <field name="SendingTime" required="Y"/>
  </header>
  <trailer>
    <field name="CheckSum" required="Y"/>
  </trailer>
  <messages>
    <message name="Heartbeat" msgtype="0" msgcat="admin">
      <field name="TestReqID" required="N"/>
    </message>
    <message name="MarketDataSnapshotFullRefresh" msgtype="W" msgcat="app">
      <component name="Instrument" required="Y"/>
      <group name="NoMDEntries" required="Y">
        <field name="MDEntryType" required="Y"/>
        <field name="MDEntryPx" required="N"/>
        <component name="Parties" required="N"/>
      </group>
    </message>
  </messages>
  <components>
    <component name="Instrument">
      <field name="Symbol" required="Y"/>
      <field name="SecurityExchange" required="N"/>
    </component>
    <component name="Parties">
      <group name="NoPartyIDs" required="N">
        <field name="PartyID" required="N"/>
        <field name="PartyRole" required="N"/>
      </group>
    </component>
  </components>
  <fields>
    <field number="8" name="BeginString" type="STRING"/>
    <field number="9" name="BodyLength" type="LENGTH"/>
    <field number="10" name="CheckSum" type="STRING"/>
    <field number="34" name="MsgSeqNum" type="SEQNUM"/>
    <field number="35" name="MsgType" type="STRING">
      <value enum="0" description="HEARTBEAT"/>
      <value enum="W" description="MARKET_DATA_SNAPSHOT_FULL_REFRESH"/>
    </field>
    <field number="49" name="SenderCompID" type="STRING"/>
    <field number="52" name="SendingTime" type="UTCTIMESTAMP"/>
    <field number="55" name="Symbol" type="STRING"/>
    <field number="56" name="TargetCompID" type="STRING"/>
    <field number="112" name="TestReqID" type="STRING"/>
    <field number="207" name="SecurityExchange" type="EXCHANGE"/>
    <field number="268" name="NoMDEntries" type="NUMINGROUP"/>
    <field number="269" name="MDEntryType" type="CHAR"/>
    <field number="270" name="MDEntryPx" type="PRICE"/>
    <field number="448" name="PartyID" type="STRING"/>
    <field number="452" name="PartyRole" type="INT"/>
    <field number="453" name="NoPartyIDs" type="NUMINGROUP"/>
  </fields>
</fix>"#;

    #[test]
    fn test_parse_fields_in_order() {
        let dict = Dictionary::from_xml_str(SAMPLE).unwrap();
        assert_eq!(dict.version, Some(Version::Fix44));
        let first: Vec<u32> = dict.fields().take(3).map(|f| f.tag).collect();
        assert_eq!(first, vec![8, 9, 10]);
        assert_eq!(dict.get_field(270).unwrap().field_type, FieldType::Price);
        assert_eq!(dict.get_field(35).unwrap().values.len(), 2);
    }

    #[test]
    fn test_components_are_flattened() {
        let dict = Dictionary::from_xml_str(SAMPLE).unwrap();
        let msg = dict.get_message("W").unwrap();
        let tags: Vec<u32> = msg.fields.iter().map(|f| f.tag).collect();
        assert_eq!(tags, vec![55, 207]);
        assert_eq!(msg.category, MessageCategory::App);
    }

    #[test]
    fn test_group_layout() {
        let dict = Dictionary::from_xml_str(SAMPLE).unwrap();
        let group = dict.get_message("W").unwrap().find_group(268).unwrap();
        assert_eq!(group.delimiter_tag, 269);
        assert_eq!(group.field_order, vec![269, 270, 453]);
        let nested = group.find_group(453).unwrap();
        assert_eq!(nested.delimiter_tag, 448);
        assert!(nested.has_field(452));
    }

    #[test]
    fn test_header_and_trailer() {
        let dict = Dictionary::from_xml_str(SAMPLE).unwrap();
        assert_eq!(dict.header.len(), 7);
        assert_eq!(dict.trailer[0].tag, 10);
        assert!(dict.get_message("0").unwrap().category == MessageCategory::Admin);
    }

    #[test]
    fn test_unknown_field_reference() {
        let xml = r#"<fix major="4" minor="2"><messages><message name="X" msgtype="X">
            <field name="Missing" required="N"/></message></messages>
            <fields><field number="1" name="Account" type="STRING"/></fields></fix>"#;
        assert!(matches!(
            Dictionary::from_xml_str(xml),
            Err(DictionaryError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_fields_section() {
        assert!(Dictionary::from_xml_str("<fix/>").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dictionary::load("/nonexistent/FIX44.xml").unwrap_err();
        assert!(matches!(err, DictionaryError::Io(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("FIX44.xml");
        std::fs::write(&path, SAMPLE).unwrap();
        let dict = Dictionary::load(&path).unwrap();
        assert!(dict.get_message("W").is_some());
    }
}
