/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixbridge
//!
//! Converts FIX messages into ordered, typed key/value mappings for a host
//! process and converts host mappings back into FIX messages.
//!
//! ## Features
//!
//! - **Dictionary driven**: Every tag is typed from a QuickFIX XML data dictionary
//! - **Typed values**: Dates, times and timestamps become host epoch integers
//! - **Nested groups**: Repeating groups map to sequences of nested mappings
//! - **Async delivery**: Mappings reach the host over a framed Tokio link
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fixbridge::prelude::*;
//!
//! let dictionary = TypeDictionary::load("data/FIX44.xml")?;
//! let mapping = to_mapping(&message, &dictionary)?;
//! let rebuilt = to_message(&mapping, &dictionary)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Value types, mapping types, message tree and errors
//! - [`dictionary`]: Data dictionary parsing and the type dictionary
//! - [`tagvalue`]: tag=value parsing and serialization
//! - [`convert`]: Scalar codec and message/mapping converters
//! - [`transport`]: Host link framing
//! - [`engine`]: Session callbacks, registry, replay and configuration

pub mod core {
    //! Value types, mapping types, message tree and errors.
    pub use fixbridge_core::*;
}

pub mod dictionary {
    //! Data dictionary parsing and the type dictionary.
    pub use fixbridge_dictionary::*;
}

pub mod tagvalue {
    //! tag=value parsing and serialization.
    pub use fixbridge_tagvalue::*;
}

pub mod convert {
    //! Scalar codec and message/mapping converters.
    pub use fixbridge_convert::*;
}

pub mod transport {
    //! Host link framing.
    pub use fixbridge_transport::*;
}

pub mod engine {
    //! Session callbacks, registry, replay and configuration.
    pub use fixbridge_engine::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use fixbridge_core::{
        ConvertError, DecodeError, DictionaryError, EncodeError, FieldMapping, FieldTag,
        FieldValue, FixError, Group, Message, Result, SemanticType, SessionError, TypedValue,
        ValueError,
    };

    // Dictionary
    pub use fixbridge_dictionary::{Dictionary, FieldDef, FieldType, TypeDictionary, Version};

    // Tag-value encoding
    pub use fixbridge_tagvalue::{MessageParser, encode_message};

    // Conversion
    pub use fixbridge_convert::{to_mapping, to_message};

    // Transport
    pub use fixbridge_transport::{CodecError, HostLink, HostReceiver, HostSender};

    // Engine
    pub use fixbridge_engine::{
        Application, Bridge, BridgeBuilder, BridgeConfig, CounterpartyRole, SessionId,
        SessionRegistry, introspect, replay_log, version_info,
    };
}
