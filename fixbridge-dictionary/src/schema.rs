/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema definitions for FIX dictionaries.
//!
//! This module defines the structures that represent a loaded data dictionary:
//! - [`FieldType`]: Wire type of a field and its semantic mapping
//! - [`FieldDef`]: Field definitions with tag, name, and type
//! - [`GroupDef`]: Repeating group layouts
//! - [`MessageDef`]: Message definitions with components flattened
//! - [`Dictionary`]: Complete FIX version dictionary

use fixbridge_core::types::SemanticType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// FIX protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    /// FIX 4.0
    Fix40,
    /// FIX 4.1
    Fix41,
    /// FIX 4.2
    Fix42,
    /// FIX 4.3
    Fix43,
    /// FIX 4.4
    Fix44,
    /// FIX 5.0
    Fix50,
    /// FIX 5.0 SP1
    Fix50Sp1,
    /// FIX 5.0 SP2
    Fix50Sp2,
    /// FIXT 1.1 (transport layer for FIX 5.0+)
    Fixt11,
}

impl Version {
    /// Resolves a version from the attributes of a dictionary root element.
    ///
    /// # Arguments
    /// * `kind` - The `type` attribute (`FIX` or `FIXT`)
    /// * `major` - The `major` attribute
    /// * `minor` - The `minor` attribute
    /// * `service_pack` - The `servicepack` attribute, 0 when absent
    #[must_use]
    pub fn from_parts(kind: &str, major: u32, minor: u32, service_pack: u32) -> Option<Self> {
        let fixt = kind.eq_ignore_ascii_case("FIXT");
        match (fixt, major, minor, service_pack) {
            (true, 1, 1, _) => Some(Self::Fixt11),
            (false, 4, 0, _) => Some(Self::Fix40),
            (false, 4, 1, _) => Some(Self::Fix41),
            (false, 4, 2, _) => Some(Self::Fix42),
            (false, 4, 3, _) => Some(Self::Fix43),
            (false, 4, 4, _) => Some(Self::Fix44),
            (false, 5, 0, 0) => Some(Self::Fix50),
            (false, 5, 0, 1) => Some(Self::Fix50Sp1),
            (false, 5, 0, 2) => Some(Self::Fix50Sp2),
            _ => None,
        }
    }

    /// Returns the BeginString value for this version.
    #[must_use]
    pub const fn begin_string(&self) -> &'static str {
        match self {
            Self::Fix40 => "FIX.4.0",
            Self::Fix41 => "FIX.4.1",
            Self::Fix42 => "FIX.4.2",
            Self::Fix43 => "FIX.4.3",
            Self::Fix44 => "FIX.4.4",
            Self::Fix50 | Self::Fix50Sp1 | Self::Fix50Sp2 | Self::Fixt11 => "FIXT.1.1",
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.begin_string())
    }
}

/// FIX field wire type, as named by the dictionary's `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Integer value.
    Int,
    /// Length field (for data fields).
    Length,
    /// Sequence number.
    SeqNum,
    /// Number of entries in a repeating group.
    NumInGroup,
    /// Tag number reference.
    TagNum,
    /// Day of month (1-31).
    DayOfMonth,
    /// Floating point number.
    Float,
    /// Quantity.
    Qty,
    /// Price.
    Price,
    /// Price offset.
    PriceOffset,
    /// Amount (price * quantity).
    Amt,
    /// Percentage.
    Percentage,
    /// Single character.
    Char,
    /// Boolean (Y/N).
    Boolean,
    /// String.
    String,
    /// Multiple value string (space-separated, FIX 4.2 naming).
    MultipleValueString,
    /// Multiple character value (space-separated).
    MultipleCharValue,
    /// Multiple string value (space-separated).
    MultipleStringValue,
    /// Country code (ISO 3166).
    Country,
    /// Currency code (ISO 4217).
    Currency,
    /// Exchange code (ISO 10383 MIC).
    Exchange,
    /// Month-year (YYYYMM or YYYYMMDD or YYYYMMWW).
    MonthYear,
    /// UTC timestamp.
    UtcTimestamp,
    /// UTC time only.
    UtcTimeOnly,
    /// UTC date (FIX 4.2 naming).
    UtcDate,
    /// UTC date only.
    UtcDateOnly,
    /// Local market date.
    LocalMktDate,
    /// Local market time.
    LocalMktTime,
    /// Date (FIX 4.0/4.1 naming).
    Date,
    /// Time (FIX 4.0/4.1 naming).
    Time,
    /// Timezone.
    TzTimeOnly,
    /// Timezone with timestamp.
    TzTimestamp,
    /// Raw data (binary).
    Data,
    /// XML data.
    XmlData,
    /// Language code (ISO 639-1).
    Language,
    /// Pattern (regex).
    Pattern,
    /// Tenor (e.g., "1M", "3M").
    Tenor,
}

impl FieldType {
    /// Maps the wire type to the semantic type its values decode to.
    ///
    /// Types without an explicit entry decode as [`SemanticType::String`].
    #[must_use]
    pub const fn semantic_type(&self) -> SemanticType {
        match self {
            Self::Int | Self::NumInGroup | Self::SeqNum => SemanticType::Int,
            Self::Price
            | Self::Amt
            | Self::Currency
            | Self::Qty
            | Self::Length
            | Self::Float
            | Self::PriceOffset
            | Self::Percentage => SemanticType::Float,
            Self::Char => SemanticType::Char,
            Self::Boolean => SemanticType::Boolean,
            Self::Exchange => SemanticType::Symbol,
            Self::UtcTimestamp => SemanticType::Timestamp,
            Self::LocalMktDate | Self::UtcDate | Self::UtcDateOnly => SemanticType::Date,
            Self::UtcTimeOnly => SemanticType::Time,
            _ => SemanticType::String,
        }
    }

    /// Returns true if this is a repeat-count type.
    #[must_use]
    pub const fn is_num_in_group(&self) -> bool {
        matches!(self, Self::NumInGroup)
    }
}

impl std::str::FromStr for FieldType {
    type Err = std::convert::Infallible;

    /// Creates a FieldType from a dictionary type name.
    ///
    /// Unknown names map to [`FieldType::String`]; this never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "INT" => Self::Int,
            "LENGTH" => Self::Length,
            "SEQNUM" => Self::SeqNum,
            "NUMINGROUP" => Self::NumInGroup,
            "TAGNUM" => Self::TagNum,
            "DAYOFMONTH" => Self::DayOfMonth,
            "FLOAT" => Self::Float,
            "QTY" | "QUANTITY" => Self::Qty,
            "PRICE" => Self::Price,
            "PRICEOFFSET" => Self::PriceOffset,
            "AMT" | "AMOUNT" => Self::Amt,
            "PERCENTAGE" => Self::Percentage,
            "CHAR" => Self::Char,
            "BOOLEAN" => Self::Boolean,
            "MULTIPLEVALUESTRING" => Self::MultipleValueString,
            "MULTIPLECHARVALUE" => Self::MultipleCharValue,
            "MULTIPLESTRINGVALUE" => Self::MultipleStringValue,
            "COUNTRY" => Self::Country,
            "CURRENCY" => Self::Currency,
            "EXCHANGE" => Self::Exchange,
            "MONTHYEAR" => Self::MonthYear,
            "UTCTIMESTAMP" => Self::UtcTimestamp,
            "UTCTIMEONLY" => Self::UtcTimeOnly,
            "UTCDATE" => Self::UtcDate,
            "UTCDATEONLY" => Self::UtcDateOnly,
            "LOCALMKTDATE" => Self::LocalMktDate,
            "LOCALMKTTIME" => Self::LocalMktTime,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TZTIMEONLY" => Self::TzTimeOnly,
            "TZTIMESTAMP" => Self::TzTimestamp,
            "DATA" => Self::Data,
            "XMLDATA" => Self::XmlData,
            "LANGUAGE" => Self::Language,
            "PATTERN" => Self::Pattern,
            "TENOR" => Self::Tenor,
            _ => Self::String,
        })
    }
}

/// Definition of a FIX field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field tag number.
    pub tag: u32,
    /// Field name.
    pub name: String,
    /// Field wire type.
    pub field_type: FieldType,
    /// Enumerated values as (wire value, description) pairs.
    pub values: Vec<(String, String)>,
}

impl FieldDef {
    /// Creates a new field definition.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `name` - The field name
    /// * `field_type` - The field wire type
    #[must_use]
    pub fn new(tag: u32, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            tag,
            name: name.into(),
            field_type,
            values: Vec::new(),
        }
    }

    /// Adds enumerated values.
    #[must_use]
    pub fn with_values(mut self, values: Vec<(String, String)>) -> Self {
        self.values = values;
        self
    }
}

/// Reference to a field within a message, group, or component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    /// Field tag number.
    pub tag: u32,
    /// Field name.
    pub name: String,
    /// Whether the field is required.
    pub required: bool,
}

/// Definition of a repeating group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDef {
    /// Tag of the count field (NumInGroup).
    pub count_tag: u32,
    /// Name of the group.
    pub name: String,
    /// Tag of the first field in each group entry (delimiter).
    pub delimiter_tag: u32,
    /// Fields within each group entry.
    pub fields: Vec<MemberRef>,
    /// Nested groups within this group.
    pub groups: Vec<GroupDef>,
    /// Member tags in declaration order, nested count tags included.
    pub field_order: Vec<u32>,
    /// Whether the group is required.
    pub required: bool,
}

impl GroupDef {
    /// Returns true if `tag` is a field of this group.
    #[must_use]
    pub fn has_field(&self, tag: u32) -> bool {
        self.fields.iter().any(|f| f.tag == tag)
    }

    /// Finds a directly nested group by its count tag.
    #[must_use]
    pub fn find_group(&self, count_tag: u32) -> Option<&GroupDef> {
        self.groups.iter().find(|g| g.count_tag == count_tag)
    }
}

/// Message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCategory {
    /// Administrative message (session level).
    Admin,
    /// Application message.
    App,
}

/// Definition of a FIX message with its components expanded in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDef {
    /// Message type value (tag 35).
    pub msg_type: String,
    /// Message name.
    pub name: String,
    /// Message category (admin or app).
    pub category: MessageCategory,
    /// Fields in this message.
    pub fields: Vec<MemberRef>,
    /// Groups in this message.
    pub groups: Vec<GroupDef>,
}

impl MessageDef {
    /// Finds a top-level group by its count tag.
    #[must_use]
    pub fn find_group(&self, count_tag: u32) -> Option<&GroupDef> {
        self.groups.iter().find(|g| g.count_tag == count_tag)
    }
}

/// Complete FIX dictionary for a specific version.
///
/// Fields and messages keep their declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dictionary {
    /// FIX version, when the root element names a known one.
    pub version: Option<Version>,
    /// Field definitions in declaration order.
    fields: Vec<FieldDef>,
    /// Field position by tag.
    field_index: HashMap<u32, usize>,
    /// Field tag by name.
    fields_by_name: HashMap<String, u32>,
    /// Message definitions in declaration order.
    messages: Vec<MessageDef>,
    /// Message position by msg_type.
    message_index: HashMap<String, usize>,
    /// Header fields.
    pub header: Vec<MemberRef>,
    /// Header groups.
    pub header_groups: Vec<GroupDef>,
    /// Trailer fields.
    pub trailer: Vec<MemberRef>,
}

impl Dictionary {
    /// Creates a new empty dictionary.
    #[must_use]
    pub fn new(version: Option<Version>) -> Self {
        Self {
            version,
            fields: Vec::new(),
            field_index: HashMap::new(),
            fields_by_name: HashMap::new(),
            messages: Vec::new(),
            message_index: HashMap::new(),
            header: Vec::new(),
            header_groups: Vec::new(),
            trailer: Vec::new(),
        }
    }

    /// Adds a field definition, replacing any earlier one with the same tag.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields_by_name.insert(field.name.clone(), field.tag);
        match self.field_index.get(&field.tag) {
            Some(&pos) => self.fields[pos] = field,
            None => {
                self.field_index.insert(field.tag, self.fields.len());
                self.fields.push(field);
            }
        }
    }

    /// Adds a message definition, replacing any earlier one with the same type.
    pub fn add_message(&mut self, message: MessageDef) {
        match self.message_index.get(&message.msg_type) {
            Some(&pos) => self.messages[pos] = message,
            None => {
                self.message_index
                    .insert(message.msg_type.clone(), self.messages.len());
                self.messages.push(message);
            }
        }
    }

    /// Gets a field definition by tag.
    #[must_use]
    pub fn get_field(&self, tag: u32) -> Option<&FieldDef> {
        self.field_index.get(&tag).map(|&pos| &self.fields[pos])
    }

    /// Gets a field definition by name.
    #[must_use]
    pub fn get_field_by_name(&self, name: &str) -> Option<&FieldDef> {
        self.fields_by_name
            .get(name)
            .and_then(|tag| self.get_field(*tag))
    }

    /// Gets a message definition by type.
    #[must_use]
    pub fn get_message(&self, msg_type: &str) -> Option<&MessageDef> {
        self.message_index
            .get(msg_type)
            .map(|&pos| &self.messages[pos])
    }

    /// Returns the top-level groups of a message type, or an empty slice.
    #[must_use]
    pub fn body_groups(&self, msg_type: &str) -> &[GroupDef] {
        self.get_message(msg_type)
            .map(|m| m.groups.as_slice())
            .unwrap_or(&[])
    }

    /// Returns an iterator over field definitions in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }

    /// Returns an iterator over message definitions in declaration order.
    pub fn messages(&self) -> impl Iterator<Item = &MessageDef> {
        self.messages.iter()
    }
}
