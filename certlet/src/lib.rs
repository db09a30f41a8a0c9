//! Certlet wire encoding.
//!
//! A compact, self-describing field format: every value carries a packed
//! identifier (field id, wire type, repeated and name flags), an optional
//! UTF-8 name, and a payload that is a fixed-length scalar, a zig-zag
//! varint, a length-prefixed blob, or a nested structure.
//!
//! The varint primitives live in [`varint`] and are usable on their own;
//! [`Encoder`] and [`Decoder`] are bounds-checked cursors the field codec is
//! built on.

mod decoder;
mod encoder;
pub mod error;
mod field;
pub mod varint;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::Error;
pub use field::{
    parse_fields, Field, FieldValue, FixedKind, FixedValue, WireId, WireType,
    WIRE_HAS_NAME_FLAG, WIRE_REPEATED_FLAG,
};
