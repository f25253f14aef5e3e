/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixbridge Convert
//!
//! Conversion between FIX messages and ordered host mappings.
//!
//! - [`scalar`]: field text to [`TypedValue`] and back
//! - [`temporal`]: date, time and timestamp codec on the host epoch
//! - [`to_mapping`]: message tree to [`FieldMapping`]
//! - [`to_message`]: [`FieldMapping`] to message tree
//!
//! Every function here is synchronous and free of I/O. The only shared
//! input is a [`TypeDictionary`], which is immutable once built.
//!
//! [`TypedValue`]: fixbridge_core::TypedValue
//! [`FieldMapping`]: fixbridge_core::FieldMapping
//! [`TypeDictionary`]: fixbridge_dictionary::TypeDictionary

pub mod scalar;
pub mod temporal;
pub mod to_mapping;
pub mod to_message;

pub use scalar::{decode, encode};
pub use to_mapping::to_mapping;
pub use to_message::{RESERVED_HEADER_TAGS, to_message};

#[cfg(test)]
pub(crate) mod tests {
    use fixbridge_dictionary::{FieldDef, FieldType, TypeDictionary};

    pub(crate) fn dictionary() -> TypeDictionary {
        let fields = [
            (8, "BeginString", FieldType::String),
            (9, "BodyLength", FieldType::Length),
            (10, "CheckSum", FieldType::String),
            (34, "MsgSeqNum", FieldType::SeqNum),
            (35, "MsgType", FieldType::String),
            (43, "PossDupFlag", FieldType::Boolean),
            (44, "Price", FieldType::Price),
            (49, "SenderCompID", FieldType::String),
            (52, "SendingTime", FieldType::UtcTimestamp),
            (55, "Symbol", FieldType::String),
            (56, "TargetCompID", FieldType::String),
            (75, "TradeDate", FieldType::LocalMktDate),
            (207, "SecurityExchange", FieldType::Exchange),
            (268, "NoMDEntries", FieldType::NumInGroup),
            (269, "MDEntryType", FieldType::String),
            (270, "MDEntryPx", FieldType::Price),
            (273, "MDEntryTime", FieldType::UtcTimeOnly),
            (448, "PartyID", FieldType::String),
            (452, "PartyRole", FieldType::Int),
            (453, "NoPartyIDs", FieldType::NumInGroup),
        ]
        .map(|(tag, name, field_type)| FieldDef::new(tag, name, field_type));
        TypeDictionary::from_fields(&fields)
    }
}
