/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixbridge Dictionary
//!
//! FIX data dictionary loading for the fixbridge converters.
//!
//! This crate provides:
//! - **Schema definitions**: Field, group, and message definitions
//! - **Dictionary parsing**: QuickFIX XML format parser
//! - **Type lookup**: `TypeDictionary`, mapping tags to semantic types and
//!   identifying repeat-count tags

pub mod schema;
pub mod type_dictionary;
pub mod xml;

pub use schema::{
    Dictionary, FieldDef, FieldType, GroupDef, MemberRef, MessageCategory, MessageDef, Version,
};
pub use type_dictionary::TypeDictionary;
