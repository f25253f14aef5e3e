/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixbridge Tag-Value
//!
//! FIX tag=value encoding and decoding for the fixbridge converters.
//!
//! ## Features
//!
//! - **Zero-copy tokenizing**: Field values reference the original buffer
//! - **SIMD-accelerated**: Uses `memchr` for fast delimiter search
//! - **Group-aware parsing**: Nested repeating groups from the data dictionary
//! - **Frame encoding**: BodyLength and CheckSum computed on write

pub mod checksum;
pub mod decoder;
pub mod encoder;
pub mod parser;

pub use checksum::{calculate_checksum, verify_checksum};
pub use decoder::{Decoder, SOH};
pub use encoder::{Encoder, encode_message};
pub use parser::MessageParser;
