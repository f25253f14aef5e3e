/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Dictionary-driven message parser.
//!
//! Turns a decoded frame into a [`Message`] tree: header and trailer tags are
//! routed to their sections, and repeating groups are nested using the
//! dictionary's group layouts.

use crate::decoder::{Decoder, SOH};
use fixbridge_core::error::DecodeError;
use fixbridge_core::field::FieldRef;
use fixbridge_core::message::{Group, Message, is_header_tag, is_trailer_tag};
use fixbridge_dictionary::{Dictionary, GroupDef};

/// Parses raw FIX frames into [`Message`] trees.
#[derive(Debug, Clone)]
pub struct MessageParser<'d> {
    dictionary: &'d Dictionary,
    validate_checksum: bool,
    delimiter: u8,
}

impl<'d> MessageParser<'d> {
    /// Creates a parser that validates checksums.
    #[must_use]
    pub const fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            dictionary,
            validate_checksum: true,
            delimiter: SOH,
        }
    }

    /// Sets whether the trailing checksum is verified.
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parses one frame.
    ///
    /// # Errors
    /// Returns `DecodeError` if the frame is malformed, fails the checksum
    /// check, or declares more group instances than it carries.
    pub fn parse(&self, input: &[u8]) -> Result<Message, DecodeError> {
        let fields = Decoder::new(input)
            .with_delimiter(self.delimiter)
            .with_checksum_validation(self.validate_checksum)
            .decode()?;

        let msg_type = fields[2].as_str()?;
        let body_groups = self.dictionary.body_groups(msg_type);
        let header_groups = self.dictionary.header_groups.as_slice();

        let mut message = Message::new();
        let mut pos = 0;
        while pos < fields.len() {
            let field = fields[pos];
            pos += 1;

            let header_group = header_groups.iter().find(|g| g.count_tag == field.tag);
            let body_group = body_groups.iter().find(|g| g.count_tag == field.tag);
            if let Some(def) = header_group.or(body_group) {
                let count = field.as_count()?;
                let instances = parse_instances(def, count, &fields, &mut pos)?;
                let target = if header_group.is_some() {
                    message.header_mut()
                } else {
                    message.body_mut()
                };
                if instances.is_empty() {
                    target.set_field(field.tag, field.as_str()?);
                }
                for instance in instances {
                    target.add_group(instance);
                }
                continue;
            }

            let value = field.as_str()?;
            if is_header_tag(field.tag) {
                message.header_mut().set_field(field.tag, value);
            } else if is_trailer_tag(field.tag) {
                message.trailer_mut().set_field(field.tag, value);
            } else {
                message.body_mut().set_field(field.tag, value);
            }
        }

        Ok(message)
    }
}

/// Reads `count` instances of `def` starting at `fields[*pos]`.
fn parse_instances(
    def: &GroupDef,
    count: u32,
    fields: &[FieldRef<'_>],
    pos: &mut usize,
) -> Result<Vec<Group>, DecodeError> {
    // Every instance starts with its delimiter field, so the remaining
    // fields bound how many can follow regardless of the declared count.
    let remaining = fields.len().saturating_sub(*pos);
    let mut instances = Vec::with_capacity((count as usize).min(remaining));
    for found in 0..count {
        match fields.get(*pos) {
            Some(field) if field.tag == def.delimiter_tag => {}
            _ => {
                return Err(DecodeError::GroupCountMismatch {
                    count_tag: def.count_tag,
                    expected: count,
                    actual: found,
                });
            }
        }

        let mut group =
            Group::new(def.count_tag, def.delimiter_tag).with_field_order(def.field_order.clone());
        let mut first = true;
        while let Some(&field) = fields.get(*pos) {
            if field.tag == def.delimiter_tag && !first {
                break;
            }
            first = false;

            if let Some(nested) = def.find_group(field.tag) {
                *pos += 1;
                let nested_count = field.as_count()?;
                let nested_instances = parse_instances(nested, nested_count, fields, pos)?;
                if nested_instances.is_empty() {
                    group.set_field(field.tag, field.as_str()?);
                }
                for instance in nested_instances {
                    group.add_group(instance);
                }
            } else if def.has_field(field.tag) {
                *pos += 1;
                group.set_field(field.tag, field.as_str()?);
            } else {
                break;
            }
        }
        instances.push(group);
    }
    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_message;

    const XML: &str = r#"<fix major="4" minor="4" servicepack="0">
  <header>
    <field name="BeginString" required="Y"/>
    <field name="BodyLength" required="Y"/>
    <field name="MsgType" required="Y"/>
    <field name="SenderCompID" required="Y"/>
    <field name="TargetCompID" required="Y"/>
  </header>
  <trailer><field name="CheckSum" required="Y"/></trailer>
  <messages>
    <message name="MarketDataSnapshotFullRefresh" msgtype="W" msgcat="app">
      <field name="Symbol" required="Y"/>
      <group name="NoMDEntries" required="Y">
        <field name="MDEntryType" required="Y"/>
        <field name="MDEntryPx" required="N"/>
        <group name="NoPartyIDs" required="N">
          <field name="PartyID" required="N"/>
          <field name="PartyRole" required="N"/>
        </group>
      </group>
    </message>
  </messages>
  <fields>
    <field number="8" name="BeginString" type="STRING"/>
    <field number="9" name="BodyLength" type="LENGTH"/>
    <field number="10" name="CheckSum" type="STRING"/>
    <field number="35" name="MsgType" type="STRING"/>
    <field number="49" name="SenderCompID" type="STRING"/>
    <field number="55" name="Symbol" type="STRING"/>
    <field number="56" name="TargetCompID" type="STRING"/>
    <field number="268" name="NoMDEntries" type="NUMINGROUP"/>
    <field number="269" name="MDEntryType" type="CHAR"/>
    <field number="270" name="MDEntryPx" type="PRICE"/>
    <field number="448" name="PartyID" type="STRING"/>
    <field number="452" name="PartyRole" type="INT"/>
    <field number="453" name="NoPartyIDs" type="NUMINGROUP"/>
  </fields>
</fix>"#;

    fn frame(body: &str) -> Vec<u8> {
        let body = body.replace('|', "\x01");
        let head = format!("8=FIX.4.4\x019={}\x01", body.len());
        let sum = head
            .bytes()
            .chain(body.bytes())
            .fold(0u8, |acc, b| acc.wrapping_add(b));
        format!("{}{}10={:03}\x01", head, body, sum).into_bytes()
    }

    #[test]
    fn test_parse_routes_sections() {
        let dict = Dictionary::from_xml_str(XML).unwrap();
        let msg = MessageParser::new(&dict)
            .parse(&frame("35=W|49=S|56=T|55=MSFT|"))
            .unwrap();
        assert_eq!(msg.msg_type(), Some("W"));
        assert_eq!(msg.sender_comp_id(), Some("S"));
        assert_eq!(msg.body().get_field(55), Some("MSFT"));
        assert!(msg.trailer().has_field(10));
        assert!(!msg.body().has_field(35));
    }

    #[test]
    fn test_parse_nested_groups() {
        let dict = Dictionary::from_xml_str(XML).unwrap();
        let input = frame("35=W|49=S|56=T|55=MSFT|268=2|269=0|270=1.5|453=1|448=P1|452=3|269=1|270=1.6|");
        let msg = MessageParser::new(&dict).parse(&input).unwrap();

        let entries = msg.body().group(268);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].map().get_field(270), Some("1.5"));
        assert_eq!(entries[1].map().get_field(269), Some("1"));
        let parties = entries[0].map().group(453);
        assert_eq!(parties.len(), 1);
        assert_eq!(parties[0].map().get_field(452), Some("3"));
        assert!(entries[1].map().group(453).is_empty());
    }

    #[test]
    fn test_parse_group_count_mismatch() {
        let dict = Dictionary::from_xml_str(XML).unwrap();
        let input = frame("35=W|49=S|56=T|268=2|269=0|270=1.5|");
        assert!(matches!(
            MessageParser::new(&dict).parse(&input),
            Err(DecodeError::GroupCountMismatch { count_tag: 268, expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_parse_oversized_group_count() {
        let dict = Dictionary::from_xml_str(XML).unwrap();
        let input = frame("35=W|49=S|56=T|55=MSFT|268=4000000000|269=0|");
        assert!(matches!(
            MessageParser::new(&dict).parse(&input),
            Err(DecodeError::GroupCountMismatch {
                count_tag: 268,
                expected: 4_000_000_000,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_parse_without_checksum() {
        let dict = Dictionary::from_xml_str(XML).unwrap();
        let msg = MessageParser::new(&dict)
            .with_checksum_validation(false)
            .with_delimiter(b'|')
            .parse(b"8=FIX.4.4|9=1|35=W|55=IBM|10=000|")
            .unwrap();
        assert_eq!(msg.body().get_field(55), Some("IBM"));
    }

    #[test]
    fn test_parse_encode_roundtrip() {
        let dict = Dictionary::from_xml_str(XML).unwrap();
        let input = frame("35=W|49=S|56=T|55=MSFT|268=1|269=0|453=1|448=P1|");
        let parser = MessageParser::new(&dict);
        let msg = parser.parse(&input).unwrap();
        let encoded = encode_message(&msg).unwrap();
        assert_eq!(&encoded[..], &input[..]);
    }
}
