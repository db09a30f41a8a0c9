//! The self-describing field codec.
//!
//! Every value on the wire starts with a wire identifier (an unsigned
//! varint), optionally followed by a length-prefixed UTF-8 name, followed by
//! a payload picked by the wire type.
//!
//! The identifier packs `(field_id << 4) | wire_type`, OR'd with `0x40` for
//! repeated fields and `0x80` for named fields. The flag bits alias bits 2
//! and 3 of the field id, so ids whose low bits disagree with the flags do
//! not survive a decode unchanged; callers pick ids accordingly.

use std::fmt::{self, Display, Formatter};

use num_bigint::BigInt;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::Error;
use crate::varint::{var_int_size, var_uint_size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    FixedLength,
    VariableLength,
    Blob,
    InnerStructure,
}

impl WireType {
    fn from_bits(bits: u64) -> WireType {
        match bits & 3 {
            0 => WireType::FixedLength,
            1 => WireType::VariableLength,
            2 => WireType::Blob,
            _ => WireType::InnerStructure,
        }
    }

    fn bits(&self) -> u64 {
        match self {
            WireType::FixedLength => 0,
            WireType::VariableLength => 1,
            WireType::Blob => 2,
            WireType::InnerStructure => 3,
        }
    }
}

impl Display for WireType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireType::FixedLength => "FixedLength",
            WireType::VariableLength => "Varint",
            WireType::Blob => "Blob",
            WireType::InnerStructure => "InnerStructure",
        };
        write!(f, "{name}")
    }
}

pub const WIRE_REPEATED_FLAG: u64 = 0x40;
pub const WIRE_HAS_NAME_FLAG: u64 = 0x80;

/// The packed field identifier as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireId(u64);

impl WireId {
    pub fn from_value(value: u64) -> WireId {
        WireId(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn field_id(&self) -> u64 {
        self.0 >> 4
    }

    pub fn wire_type(&self) -> WireType {
        WireType::from_bits(self.0)
    }

    pub fn repeated(&self) -> bool {
        self.0 & WIRE_REPEATED_FLAG != 0
    }

    pub fn has_name(&self) -> bool {
        self.0 & WIRE_HAS_NAME_FLAG != 0
    }
}

/// Scalar kind stored in the high two bits of the fixed-length flag octet.
/// The low bits carry the byte width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedKind {
    Null = 0x00,
    Integer = 0x40,
    Float = 0x80,
    Timestamp = 0xc0,
}

impl FixedKind {
    fn from_flag(flag: u8) -> FixedKind {
        match flag & 0xc0 {
            0x00 => FixedKind::Null,
            0x40 => FixedKind::Integer,
            0x80 => FixedKind::Float,
            _ => FixedKind::Timestamp,
        }
    }
}

/// A fixed-length scalar: the flag kind, the byte width, and the raw
/// little-endian payload bits. Typed views are produced on demand, so a
/// decoded value always equals the encoded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedValue {
    kind: FixedKind,
    width: usize,
    bits: u64,
}

impl FixedValue {
    pub fn timestamp(seconds: u64) -> FixedValue {
        FixedValue {
            kind: FixedKind::Timestamp,
            width: 8,
            bits: seconds,
        }
    }

    pub fn kind(&self) -> FixedKind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn flag(&self) -> u8 {
        self.kind as u8 | self.width as u8
    }

    pub fn as_uint(&self) -> u64 {
        self.bits
    }

    pub fn as_int(&self) -> i64 {
        if self.width >= 8 {
            return self.bits as i64;
        }

        let shift = 64 - self.width * 8;
        ((self.bits << shift) as i64) >> shift
    }

    pub fn as_float(&self) -> f64 {
        match self.width {
            8 => f64::from_bits(self.bits),
            4 => f64::from(f32::from_bits(self.bits as u32)),
            _ => 0.0,
        }
    }

    fn validate_width(kind: FixedKind, width: usize, flag: u8) -> Result<(), Error> {
        let valid = match kind {
            FixedKind::Null => width == 0,
            FixedKind::Integer | FixedKind::Timestamp => {
                matches!(width, 1 | 2 | 4 | 8)
            }
            FixedKind::Float => matches!(width, 4 | 8),
        };

        if !valid {
            return Err(Error::InvalidFixedFlag(flag));
        }

        Ok(())
    }
}

macro_rules! fixed_value_from_uint {
    ($($t:ty),*) => {$(
        impl From<$t> for FixedValue {
            fn from(value: $t) -> FixedValue {
                FixedValue {
                    kind: FixedKind::Integer,
                    width: std::mem::size_of::<$t>(),
                    bits: u64::from(value),
                }
            }
        }
    )*};
}

fixed_value_from_uint!(u8, u16, u32);

impl From<u64> for FixedValue {
    fn from(value: u64) -> FixedValue {
        FixedValue {
            kind: FixedKind::Integer,
            width: 8,
            bits: value,
        }
    }
}

macro_rules! fixed_value_from_int {
    ($($t:ty => $u:ty),*) => {$(
        impl From<$t> for FixedValue {
            fn from(value: $t) -> FixedValue {
                FixedValue {
                    kind: FixedKind::Integer,
                    width: std::mem::size_of::<$t>(),
                    bits: u64::from(value as $u),
                }
            }
        }
    )*};
}

fixed_value_from_int!(i8 => u8, i16 => u16, i32 => u32);

impl From<i64> for FixedValue {
    fn from(value: i64) -> FixedValue {
        FixedValue {
            kind: FixedKind::Integer,
            width: 8,
            bits: value as u64,
        }
    }
}

impl From<f32> for FixedValue {
    fn from(value: f32) -> FixedValue {
        FixedValue {
            kind: FixedKind::Float,
            width: 4,
            bits: u64::from(value.to_bits()),
        }
    }
}

impl From<f64> for FixedValue {
    fn from(value: f64) -> FixedValue {
        FixedValue {
            kind: FixedKind::Float,
            width: 8,
            bits: value.to_bits(),
        }
    }
}

/// The in-memory payload slot, one per wire type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Fixed(FixedValue),
    Varint(i64),
    Blob(Vec<u8>),
    Inner(Vec<u8>),
}

/// One field of a certlet structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    id: u64,
    wire_type: WireType,
    repeated: bool,
    name: Option<String>,
    value: FieldValue,
}

impl Field {
    pub fn fixed(id: u64, value: impl Into<FixedValue>) -> Field {
        Field {
            id,
            wire_type: WireType::FixedLength,
            repeated: false,
            name: None,
            value: FieldValue::Fixed(value.into()),
        }
    }

    pub fn variable(id: u64, value: i64) -> Field {
        Field {
            id,
            wire_type: WireType::VariableLength,
            repeated: false,
            name: None,
            value: FieldValue::Varint(value),
        }
    }

    pub fn blob(id: u64, value: impl Into<Vec<u8>>) -> Field {
        Field {
            id,
            wire_type: WireType::Blob,
            repeated: false,
            name: None,
            value: FieldValue::Blob(value.into()),
        }
    }

    /// Stores the big-endian magnitude of `value` as a blob payload.
    pub fn big_integer(id: u64, value: &BigInt) -> Field {
        let (_, bytes) = value.to_bytes_be();
        Field::blob(id, bytes)
    }

    /// Packs `fields` into one length-prefixed nested encoding.
    pub fn inner(id: u64, fields: &[Field]) -> Result<Field, Error> {
        let total = fields.iter().map(Field::encoded_size).sum();
        let mut buffer = vec![0u8; total];
        let mut offset = 0;
        for field in fields {
            offset = field.write_to(&mut buffer, offset)?;
        }

        Ok(Field {
            id,
            wire_type: WireType::InnerStructure,
            repeated: false,
            name: None,
            value: FieldValue::Inner(buffer),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Field {
        self.name = Some(name.into());
        self
    }

    pub fn with_repeated(mut self, repeated: bool) -> Field {
        self.repeated = repeated;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn wire_id(&self) -> WireId {
        let mut wid = self.wire_type.bits() | (self.id << 4);
        if self.repeated {
            wid |= WIRE_REPEATED_FLAG;
        }

        if self.name.is_some() {
            wid |= WIRE_HAS_NAME_FLAG;
        }

        WireId(wid)
    }

    pub fn uint(&self) -> u64 {
        match &self.value {
            FieldValue::Fixed(v)
                if matches!(v.kind(), FixedKind::Integer | FixedKind::Timestamp) =>
            {
                v.as_uint()
            }
            _ => 0,
        }
    }

    pub fn int(&self) -> i64 {
        match &self.value {
            FieldValue::Fixed(v) if v.kind() == FixedKind::Integer => v.as_int(),
            FieldValue::Varint(v) => *v,
            _ => 0,
        }
    }

    pub fn float(&self) -> f64 {
        match &self.value {
            FieldValue::Fixed(v) if v.kind() == FixedKind::Float => v.as_float(),
            _ => 0.0,
        }
    }

    pub fn text(&self) -> String {
        match &self.value {
            FieldValue::Blob(b) => String::from_utf8_lossy(b).into_owned(),
            _ => String::new(),
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.value {
            FieldValue::Blob(b) | FieldValue::Inner(b) => Some(b),
            _ => None,
        }
    }

    /// Re-parses a nested encoding into its child fields.
    pub fn inner_fields(&self) -> Result<Vec<Field>, Error> {
        match &self.value {
            FieldValue::Inner(b) => parse_fields(b),
            _ => Ok(Vec::new()),
        }
    }

    pub fn encoded_size(&self) -> usize {
        let mut size = var_uint_size(self.wire_id().value());
        if let Some(name) = &self.name {
            size += var_uint_size(name.len() as u64) + name.len();
        }

        size += match &self.value {
            FieldValue::Fixed(v) => 1 + v.width(),
            FieldValue::Varint(v) => var_int_size(*v),
            FieldValue::Blob(b) | FieldValue::Inner(b) => {
                var_uint_size(b.len() as u64) + b.len()
            }
        };

        size
    }

    /// Serialises the field and returns the next offset, which advances by
    /// exactly `encoded_size()`.
    pub fn write_to(&self, buffer: &mut [u8], offset: usize) -> Result<usize, Error> {
        let mut encoder = Encoder::new(buffer, offset);
        encoder.encode_var_uint(self.wire_id().value())?;

        if let Some(name) = &self.name {
            encoder.encode_binary(name.as_bytes())?;
        }

        match &self.value {
            FieldValue::Fixed(v) => {
                encoder.encode_byte(v.flag())?;
                match v.kind() {
                    FixedKind::Float => encoder.encode_float_le(v.as_float(), v.width())?,
                    _ => encoder.encode_uint_le(v.as_uint(), v.width())?,
                };
            }
            FieldValue::Varint(v) => {
                encoder.encode_var_int(*v)?;
            }
            FieldValue::Blob(b) | FieldValue::Inner(b) => {
                encoder.encode_binary(b)?;
            }
        }

        Ok(encoder.offset())
    }

    /// Reads one field starting at `offset` and returns it with the offset
    /// just past its encoding.
    pub fn parse(buffer: &[u8], offset: usize) -> Result<(Field, usize), Error> {
        let mut decoder = Decoder::new(buffer, offset);
        let wire_id = decoder.decode_wire_id()?;

        let name = if wire_id.has_name() {
            let raw = decoder.decode_binary()?;
            Some(String::from_utf8(raw).map_err(|_| Error::InvalidName)?)
        } else {
            None
        };

        let value = match wire_id.wire_type() {
            WireType::FixedLength => {
                let flag = decoder.decode_byte()?;
                let kind = FixedKind::from_flag(flag);
                let width = (flag & 0x3f) as usize;
                FixedValue::validate_width(kind, width, flag)?;
                let bits = decoder.decode_uint_le(width)?;
                FieldValue::Fixed(FixedValue { kind, width, bits })
            }
            WireType::VariableLength => FieldValue::Varint(decoder.decode_var_int()?),
            WireType::Blob => FieldValue::Blob(decoder.decode_binary()?),
            WireType::InnerStructure => FieldValue::Inner(decoder.decode_binary()?),
        };

        let field = Field {
            id: wire_id.field_id(),
            wire_type: wire_id.wire_type(),
            repeated: wire_id.repeated(),
            name,
            value,
        };

        Ok((field, decoder.offset()))
    }
}

/// Parses fields back to back until the buffer is exhausted.
pub fn parse_fields(buffer: &[u8]) -> Result<Vec<Field>, Error> {
    let mut fields = Vec::new();
    let mut offset = 0;
    while offset < buffer.len() {
        let (field, next) = Field::parse(buffer, offset)?;
        fields.push(field);
        offset = next;
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn encode(field: &Field) -> Vec<u8> {
        let mut buffer = vec![0u8; field.encoded_size()];
        let next = field.write_to(&mut buffer, 0).unwrap();
        assert_eq!(field.encoded_size(), next);
        buffer
    }

    #[test]
    fn test_encode_blob_field() {
        //        2    a    field id
        //      0010 1010
        // 0010 1010 0000   left shifted 4 bits
        //           0010   wire type blob
        // 0010 1010 0010   wire id
        let field = Field::blob(42, "expecto patronum");
        let expected = vec![
            0xa2, 0x05, // wire id
            0x10, // length
            0x65, 0x78, 0x70, 0x65, 0x63, 0x74, 0x6f, 0x20, //
            0x70, 0x61, 0x74, 0x72, 0x6f, 0x6e, 0x75, 0x6d,
        ];

        assert_eq!(expected, encode(&field));
        assert_eq!("expecto patronum", field.text());
        assert_eq!(0, field.uint());
        assert_eq!(0, field.int());
    }

    #[test]
    fn test_encode_named_blob_field() {
        let field = Field::blob(42, "expecto patronum").with_name("spell");
        let expected = vec![
            0xa2, 0x05, // wire id
            0x05, // name length
            0x73, 0x70, 0x65, 0x6c, 0x6c, // name
            0x10, // length
            0x65, 0x78, 0x70, 0x65, 0x63, 0x74, 0x6f, 0x20, //
            0x70, 0x61, 0x74, 0x72, 0x6f, 0x6e, 0x75, 0x6d,
        ];

        let encoded = encode(&field);
        assert_eq!(expected, encoded);

        // Field id 42 carries the name flag bit itself, so the named form
        // survives a decode unchanged.
        let (parsed, next) = Field::parse(&encoded, 0).unwrap();
        assert_eq!(encoded.len(), next);
        assert_eq!(field, parsed);
        assert_eq!(Some("spell"), parsed.name());
        assert_eq!("expecto patronum", parsed.text());
        assert_eq!(WireType::Blob, parsed.wire_id().wire_type());
    }

    #[rstest(field, expected,
        case(Field::fixed(42, 0x12u8), vec![0xa0, 0x05, 0x41, 0x12]),
        case(Field::fixed(42, 0x1234u16), vec![0xa0, 0x05, 0x42, 0x34, 0x12]),
        case(Field::fixed(42, 0x12345678u32), vec![0xa0, 0x05, 0x44, 0x78, 0x56, 0x34, 0x12]),
        case(
            Field::fixed(42, 0x0f1e2d3c4b5a6978u64),
            vec![0xa0, 0x05, 0x48, 0x78, 0x69, 0x5a, 0x4b, 0x3c, 0x2d, 0x1e, 0x0f],
        ),
        case(Field::fixed(42, -0x12345678i32), vec![0xa0, 0x05, 0x44, 0x88, 0xa9, 0xcb, 0xed]),
    )]
    fn test_encode_fixed_length_field(field: Field, expected: Vec<u8>) {
        assert_eq!(expected, encode(&field));
    }

    #[test]
    fn test_fixed_length_accessors() {
        let field = Field::fixed(42, 0x1234u16);
        assert_eq!(0x1234, field.uint());
        assert_eq!("", field.text());

        let field = Field::fixed(42, -0x12345678i32);
        assert_eq!(-0x12345678, field.int());

        let field = Field::fixed(42, 1.5f64);
        assert_eq!(1.5, field.float());
        assert_eq!(0, field.uint());
    }

    // Field ids here keep bits 2 and 3 in agreement with the repeated and
    // name flags, so every observable property survives the round trip.
    #[rstest(field,
        case(Field::blob(2, "hi")),
        case(Field::fixed(17, 0xbeefu16)),
        case(Field::fixed(16, 2.5f32)),
        case(Field::variable(3, -123456)),
        case(Field::variable(5, 7).with_repeated(true)),
        case(Field::blob(42, vec![0u8, 1, 2, 3]).with_name("bytes")),
        case(Field::fixed(1, FixedValue::timestamp(1700000000))),
    )]
    fn test_field_roundtrip(field: Field) {
        let encoded = encode(&field);
        let (parsed, next) = Field::parse(&encoded, 0).unwrap();
        assert_eq!(encoded.len(), next);
        assert_eq!(field, parsed);
    }

    #[test]
    fn test_inner_structure_roundtrip() {
        let children = vec![
            Field::fixed(1, 0x42u8),
            Field::blob(2, "nested"),
        ];
        let field = Field::inner(16, &children).unwrap();

        let encoded = encode(&field);
        let (parsed, next) = Field::parse(&encoded, 0).unwrap();
        assert_eq!(encoded.len(), next);
        assert_eq!(field, parsed);
        assert_eq!(children, parsed.inner_fields().unwrap());
    }

    #[test]
    fn test_big_integer_blob() {
        let value = num_bigint::BigInt::from(0x010001);
        let field = Field::big_integer(2, &value);
        assert_eq!(Some(&[0x01u8, 0x00, 0x01][..]), field.bytes());

        let encoded = encode(&field);
        let (parsed, _) = Field::parse(&encoded, 0).unwrap();
        assert_eq!(field, parsed);
    }

    #[test]
    fn test_parse_rejects_bad_fixed_width() {
        // Integer kind with width 3.
        let buffer = vec![0x00, 0x43, 0x01, 0x02, 0x03];
        assert_eq!(
            Err(Error::InvalidFixedFlag(0x43)),
            Field::parse(&buffer, 0).map(|(f, _)| f.uint())
        );
    }

    #[test]
    fn test_parse_fields_sequence() {
        let fields = vec![
            Field::fixed(1, 7u8),
            Field::blob(2, "two"),
            Field::variable(3, -9),
        ];

        let total: usize = fields.iter().map(Field::encoded_size).sum();
        let mut buffer = vec![0u8; total];
        let mut offset = 0;
        for field in &fields {
            offset = field.write_to(&mut buffer, offset).unwrap();
        }
        assert_eq!(total, offset);

        assert_eq!(fields, parse_fields(&buffer).unwrap());
    }
}
