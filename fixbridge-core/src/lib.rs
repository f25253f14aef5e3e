/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixbridge Core
//!
//! Core types and error definitions for the fixbridge message/value bridge.
//!
//! This crate provides the building blocks shared by every fixbridge crate:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Value types**: `SemanticType` and `TypedValue`
//! - **Mapping types**: `FieldTag`, `FieldValue` and the ordered `FieldMapping`
//! - **Message tree**: `Message`, `FieldMap` and `Group`
//!
//! ## Ownership
//!
//! Messages and mappings are plain owned trees. Converters take them by
//! reference and hand back freshly owned results, so nothing is shared
//! between conversions.

pub mod error;
pub mod field;
pub mod message;
pub mod types;

pub use error::{
    ConvertError, DecodeError, DictionaryError, EncodeError, FixError, Result, SessionError,
    ValueError,
};
pub use field::{FieldMapping, FieldRef, FieldTag, FieldValue};
pub use message::{Field, FieldMap, Group, Message};
pub use types::{SemanticType, TypedValue};
