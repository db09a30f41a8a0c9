//! The typed ASN.1 object model and its recursive DER codec.

use std::fmt::{self, Display, Formatter};

use num_bigint::{BigInt, Sign};

use crate::error::{check_buffer, Error};
use crate::length::Length;
use crate::oid::{known_oid_name, Oid};
use crate::tag::{
    Tag, TagClass, TAG_BIT_STRING, TAG_BOOLEAN, TAG_INTEGER, TAG_NULL,
    TAG_OBJECT_IDENTIFIER, TAG_OCTET_STRING, TAG_PRINTABLE_STRING, TAG_SEQUENCE,
    TAG_SET,
};

/// Maximum nesting depth accepted by the recursive reader.
pub const MAX_DEPTH: usize = 64;

/// BIT STRING content: either raw bits in primitive form, or exactly one
/// wrapped inner object in constructed form (the SubjectPublicKeyInfo-style
/// wrapping).
#[derive(Debug, Clone, PartialEq)]
pub enum BitString {
    Bits { data: Vec<u8>, bit_length: usize },
    Wrapped(Box<Asn1Object>),
}

impl BitString {
    pub fn from_bytes(data: Vec<u8>) -> BitString {
        let bit_length = data.len() * 8;
        BitString::Bits { data, bit_length }
    }

    pub fn from_bit_array(data: Vec<u8>, bit_length: usize) -> BitString {
        let byte_length = bit_length.div_ceil(8).min(data.len());
        let bit_length = bit_length.min(data.len() * 8);
        BitString::Bits {
            data: data[..byte_length].to_vec(),
            bit_length,
        }
    }

    pub fn from_object(object: Asn1Object) -> BitString {
        BitString::Wrapped(Box::new(object))
    }

    pub fn bit_length(&self) -> usize {
        match self {
            BitString::Bits { bit_length, .. } => *bit_length,
            BitString::Wrapped(object) => object.encoded_length() * 8,
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            BitString::Bits { data, .. } => Some(data),
            BitString::Wrapped(_) => None,
        }
    }

    pub fn inner(&self) -> Option<&Asn1Object> {
        match self {
            BitString::Bits { .. } => None,
            BitString::Wrapped(object) => Some(object),
        }
    }

    fn is_constructed(&self) -> bool {
        matches!(self, BitString::Wrapped(_))
    }

    fn content_length(&self) -> usize {
        match self {
            BitString::Bits { data, .. } => data.len() + 1,
            BitString::Wrapped(object) => object.encoded_length(),
        }
    }
}

/// OCTET STRING content: raw bytes in primitive form, or one wrapped inner
/// object in constructed form.
#[derive(Debug, Clone, PartialEq)]
pub enum OctetString {
    Bytes(Vec<u8>),
    Wrapped(Box<Asn1Object>),
}

impl OctetString {
    pub fn from_bytes(data: Vec<u8>) -> OctetString {
        OctetString::Bytes(data)
    }

    pub fn from_object(object: Asn1Object) -> OctetString {
        OctetString::Wrapped(Box::new(object))
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            OctetString::Bytes(data) => Some(data),
            OctetString::Wrapped(_) => None,
        }
    }

    pub fn inner(&self) -> Option<&Asn1Object> {
        match self {
            OctetString::Bytes(_) => None,
            OctetString::Wrapped(object) => Some(object),
        }
    }

    fn is_constructed(&self) -> bool {
        matches!(self, OctetString::Wrapped(_))
    }

    fn content_length(&self) -> usize {
        match self {
            OctetString::Bytes(data) => data.len(),
            OctetString::Wrapped(object) => object.encoded_length(),
        }
    }
}

/// Fallback for tags outside the supported universal set. The parsed tag and
/// raw content are preserved for round trips.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericData {
    pub tag: Tag,
    pub data: Vec<u8>,
}

/// A decoded ASN.1 value. The variant set is closed; anything else lands in
/// `Generic`.
#[derive(Debug, Clone, PartialEq)]
pub enum Asn1Object {
    Boolean(bool),
    Integer(BigInt),
    BitString(BitString),
    OctetString(OctetString),
    Null,
    ObjectIdentifier(Oid),
    Sequence(Vec<Asn1Object>),
    Set(Vec<Asn1Object>),
    PrintableString(String),
    Generic(GenericData),
}

impl Asn1Object {
    pub fn integer(value: impl Into<BigInt>) -> Asn1Object {
        Asn1Object::Integer(value.into())
    }

    pub fn oid(ids: &[u64]) -> Asn1Object {
        Asn1Object::ObjectIdentifier(Oid::new(ids))
    }

    pub fn printable_string(value: impl Into<String>) -> Asn1Object {
        Asn1Object::PrintableString(value.into())
    }

    pub fn tag(&self) -> Tag {
        match self {
            // X.690 8.2.1, boolean values SHALL be primitive
            Asn1Object::Boolean(_) => Tag::universal(TAG_BOOLEAN),
            // X.690 8.3.1, integer values SHALL be primitive
            Asn1Object::Integer(_) => Tag::universal(TAG_INTEGER),
            // X.690 8.6.1, either primitive or constructed
            Asn1Object::BitString(s) => Tag {
                class: TagClass::Universal,
                constructed: s.is_constructed(),
                number: TAG_BIT_STRING,
            },
            // X.690 8.7.1, either primitive or constructed
            Asn1Object::OctetString(s) => Tag {
                class: TagClass::Universal,
                constructed: s.is_constructed(),
                number: TAG_OCTET_STRING,
            },
            Asn1Object::Null => Tag::universal(TAG_NULL),
            Asn1Object::ObjectIdentifier(_) => Tag::universal(TAG_OBJECT_IDENTIFIER),
            // X.690 8.9.1, sequence values SHALL be constructed
            Asn1Object::Sequence(_) => Tag::constructed(TAG_SEQUENCE),
            // X.690 8.11.2
            Asn1Object::Set(_) => Tag::constructed(TAG_SET),
            Asn1Object::PrintableString(_) => Tag::universal(TAG_PRINTABLE_STRING),
            Asn1Object::Generic(g) => g.tag,
        }
    }

    pub fn content_length(&self) -> usize {
        match self {
            Asn1Object::Boolean(_) => 1,
            Asn1Object::Integer(value) => {
                let (pad, bytes) = integer_content_length(value);
                pad + bytes
            }
            Asn1Object::BitString(s) => s.content_length(),
            Asn1Object::OctetString(s) => s.content_length(),
            Asn1Object::Null => 0,
            Asn1Object::ObjectIdentifier(oid) => oid.content_length(),
            Asn1Object::Sequence(objects) | Asn1Object::Set(objects) => {
                objects.iter().map(Asn1Object::encoded_length).sum()
            }
            Asn1Object::PrintableString(s) => s.len(),
            Asn1Object::Generic(g) => g.data.len(),
        }
    }

    /// Full wire length: tag octets + length octets + content octets.
    pub fn encoded_length(&self) -> usize {
        let content_length = self.content_length();
        self.tag().wire_length()
            + Length::Definite(content_length).wire_length()
            + content_length
    }

    /// Writes the complete TLV encoding and returns the next offset.
    pub fn write_to(&self, buffer: &mut [u8], offset: usize) -> Result<usize, Error> {
        let next = self.tag().write_to(buffer, offset)?;
        let next = Length::Definite(self.content_length()).write_to(buffer, next)?;
        self.write_content_to(buffer, next)
    }

    pub fn to_der(&self) -> Result<Vec<u8>, Error> {
        let mut buffer = vec![0u8; self.encoded_length()];
        self.write_to(&mut buffer, 0)?;
        Ok(buffer)
    }

    fn write_content_to(&self, buffer: &mut [u8], offset: usize) -> Result<usize, Error> {
        match self {
            Asn1Object::Boolean(value) => {
                check_buffer(buffer.len(), offset, 1)?;
                buffer[offset] = if *value { 0xff } else { 0x00 };
                Ok(offset + 1)
            }
            Asn1Object::Integer(value) => write_integer_content(value, buffer, offset),
            Asn1Object::BitString(BitString::Bits { data, bit_length }) => {
                check_buffer(buffer.len(), offset, data.len() + 1)?;
                buffer[offset] = ((data.len() * 8).saturating_sub(*bit_length)) as u8;
                buffer[offset + 1..offset + 1 + data.len()].copy_from_slice(data);
                Ok(offset + 1 + data.len())
            }
            Asn1Object::BitString(BitString::Wrapped(object)) => {
                object.write_to(buffer, offset)
            }
            Asn1Object::OctetString(OctetString::Bytes(data)) => {
                check_buffer(buffer.len(), offset, data.len())?;
                buffer[offset..offset + data.len()].copy_from_slice(data);
                Ok(offset + data.len())
            }
            Asn1Object::OctetString(OctetString::Wrapped(object)) => {
                object.write_to(buffer, offset)
            }
            Asn1Object::Null => Ok(offset),
            Asn1Object::ObjectIdentifier(oid) => oid.write_content_to(buffer, offset),
            Asn1Object::Sequence(objects) | Asn1Object::Set(objects) => {
                write_objects(buffer, offset, objects)
            }
            Asn1Object::PrintableString(s) => {
                check_buffer(buffer.len(), offset, s.len())?;
                buffer[offset..offset + s.len()].copy_from_slice(s.as_bytes());
                Ok(offset + s.len())
            }
            Asn1Object::Generic(g) => {
                check_buffer(buffer.len(), offset, g.data.len())?;
                buffer[offset..offset + g.data.len()].copy_from_slice(&g.data);
                Ok(offset + g.data.len())
            }
        }
    }

    /// Renders a multiline tree. Each nesting level adds a `"| "` prefix;
    /// the root gets `"+ "`.
    pub fn pretty_string(&self, indent: &str) -> String {
        match self {
            Asn1Object::Sequence(objects) | Asn1Object::Set(objects) => {
                let indent = if indent.is_empty() { "+ " } else { indent };
                let mut lines = Vec::with_capacity(objects.len() + 1);
                lines.push(format!("{indent}{self}"));
                let child_indent = format!("| {indent}");
                for object in objects {
                    lines.push(object.pretty_string(&child_indent));
                }

                lines.join("\n")
            }
            Asn1Object::BitString(BitString::Wrapped(inner)) => {
                inner.pretty_string(indent)
            }
            _ => format!("{indent}{self}"),
        }
    }
}

impl Display for Asn1Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Asn1Object::Boolean(true) => write!(f, "Boolean[true]"),
            Asn1Object::Boolean(false) => write!(f, "Boolean[false]"),
            Asn1Object::Integer(value) => write!(f, "Integer[{value}]"),
            Asn1Object::BitString(BitString::Bits { bit_length, .. }) => {
                write!(f, "BitString[{bit_length} bits]")
            }
            Asn1Object::BitString(BitString::Wrapped(inner)) => {
                write!(f, "BitString[{inner}]")
            }
            Asn1Object::OctetString(OctetString::Bytes(data)) => {
                write!(f, "OctetString[{} bytes]", data.len())
            }
            Asn1Object::OctetString(OctetString::Wrapped(inner)) => {
                write!(f, "OctetString[{inner}]")
            }
            Asn1Object::Null => write!(f, "Null"),
            Asn1Object::ObjectIdentifier(oid) => {
                let name = known_oid_name(oid).unwrap_or("unknown");
                write!(f, "ObjectIdentifier[{oid} ({name})]")
            }
            Asn1Object::Sequence(objects) => {
                write!(f, "Sequence [{} elements]", objects.len())
            }
            Asn1Object::Set(objects) => write!(f, "Set [{} elements]", objects.len()),
            Asn1Object::PrintableString(s) => write!(f, "PrintableString[{s}]"),
            Asn1Object::Generic(g) => {
                write!(f, "GenericData[{} ({} bytes)]", g.tag, g.data.len())
            }
        }
    }
}

/// (padding octets, magnitude octets) for an INTEGER content encoding. The
/// pad keeps a magnitude with its top bit set non-negative.
fn integer_content_length(value: &BigInt) -> (usize, usize) {
    let bits = value.bits();
    if bits == 0 {
        return (0, 1);
    }

    let byte_length = bits.div_ceil(8) as usize;
    let pad = usize::from(bits % 8 == 0);
    (pad, byte_length)
}

fn write_integer_content(
    value: &BigInt,
    buffer: &mut [u8],
    offset: usize,
) -> Result<usize, Error> {
    let (pad, byte_length) = integer_content_length(value);
    check_buffer(buffer.len(), offset, pad + byte_length)?;

    if value.sign() == Sign::NoSign {
        buffer[offset] = 0x00;
        return Ok(offset + 1);
    }

    let mut next = offset;
    if pad == 1 {
        buffer[next] = 0x00;
        next += 1;
    }

    let (_, bytes) = value.to_bytes_be();
    buffer[next..next + bytes.len()].copy_from_slice(&bytes);
    Ok(next + bytes.len())
}

/// Reads one object starting at `offset` and returns it with the offset just
/// past its encoding.
pub fn read_object(buffer: &[u8], offset: usize) -> Result<(Asn1Object, usize), Error> {
    read_object_at(buffer, offset, 0)
}

fn read_object_at(
    buffer: &[u8],
    offset: usize,
    depth: usize,
) -> Result<(Asn1Object, usize), Error> {
    if depth > MAX_DEPTH {
        return Err(Error::TooDeep(MAX_DEPTH));
    }

    let (tag, next) = Tag::read_from(buffer, offset)?;
    let (length, next) = Length::read_from(buffer, next)?;
    let Length::Definite(content_length) = length else {
        return Err(Error::IndefiniteLength);
    };

    check_buffer(buffer.len(), next, content_length)?;
    let object = read_content(&tag, content_length, buffer, next, depth)?;
    Ok((object, next + content_length))
}

fn read_content(
    tag: &Tag,
    length: usize,
    buffer: &[u8],
    offset: usize,
    depth: usize,
) -> Result<Asn1Object, Error> {
    let content = &buffer[offset..offset + length];
    if tag.class != TagClass::Universal {
        return Ok(Asn1Object::Generic(GenericData {
            tag: *tag,
            data: content.to_vec(),
        }));
    }

    match tag.number {
        TAG_BOOLEAN => {
            if length == 0 {
                return Err(Error::InsufficientBuffer {
                    needed: 1,
                    available: 0,
                });
            }

            // Tolerant read: any non-zero content octet is true. The writer
            // always emits the DER 0xFF.
            Ok(Asn1Object::Boolean(content[0] != 0))
        }
        TAG_INTEGER => Ok(Asn1Object::Integer(BigInt::from_bytes_be(
            Sign::Plus,
            content,
        ))),
        TAG_BIT_STRING => {
            if tag.constructed {
                let (inner, _) =
                    read_object_at(&buffer[..offset + length], offset, depth + 1)?;
                return Ok(Asn1Object::BitString(BitString::Wrapped(Box::new(inner))));
            }

            if length == 0 {
                return Err(Error::InvalidBitString(
                    "missing unused-bits octet".to_string(),
                ));
            }

            let unused = content[0] as usize;
            if unused > 7 || (length == 1 && unused > 0) {
                return Err(Error::InvalidBitString(format!(
                    "unused bit count out of range: {unused}"
                )));
            }

            Ok(Asn1Object::BitString(BitString::Bits {
                data: content[1..].to_vec(),
                bit_length: (length - 1) * 8 - unused,
            }))
        }
        TAG_OCTET_STRING => {
            if tag.constructed {
                let (inner, _) =
                    read_object_at(&buffer[..offset + length], offset, depth + 1)?;
                return Ok(Asn1Object::OctetString(OctetString::Wrapped(Box::new(
                    inner,
                ))));
            }

            Ok(Asn1Object::OctetString(OctetString::Bytes(content.to_vec())))
        }
        TAG_NULL => Ok(Asn1Object::Null),
        TAG_OBJECT_IDENTIFIER => {
            let (oid, _) = Oid::read_content_from(buffer, offset, length)?;
            Ok(Asn1Object::ObjectIdentifier(oid))
        }
        TAG_SEQUENCE if tag.constructed => {
            let (objects, _) = read_objects_at(buffer, offset, offset + length, depth + 1)?;
            Ok(Asn1Object::Sequence(objects))
        }
        TAG_SET if tag.constructed => {
            let (objects, _) = read_objects_at(buffer, offset, offset + length, depth + 1)?;
            Ok(Asn1Object::Set(objects))
        }
        TAG_PRINTABLE_STRING => {
            // The PrintableString character subset is not validated.
            let s = String::from_utf8(content.to_vec())
                .map_err(|e| Error::InvalidPrintableString(e.to_string()))?;
            Ok(Asn1Object::PrintableString(s))
        }
        _ => Ok(Asn1Object::Generic(GenericData {
            tag: *tag,
            data: content.to_vec(),
        })),
    }
}

/// Reads objects until exactly `end`. A final offset beyond `end` is an
/// error, as is trailing data the caller did not expect.
pub fn read_objects(
    buffer: &[u8],
    offset: usize,
    end: usize,
) -> Result<(Vec<Asn1Object>, usize), Error> {
    read_objects_at(buffer, offset, end, 0)
}

fn read_objects_at(
    buffer: &[u8],
    offset: usize,
    end: usize,
    depth: usize,
) -> Result<(Vec<Asn1Object>, usize), Error> {
    let mut objects = Vec::new();
    let mut next = offset;
    while next < end {
        let (object, n) = read_object_at(buffer, next, depth)?;
        objects.push(object);
        next = n;
    }

    if next != end {
        return Err(Error::NotAllParsed {
            parsed: next,
            total: end,
        });
    }

    Ok((objects, next))
}

/// Serialises objects back to back in declared order. Content lengths are
/// computed up front, so no back-patching happens.
pub fn write_objects(
    buffer: &mut [u8],
    offset: usize,
    objects: &[Asn1Object],
) -> Result<usize, Error> {
    let mut next = offset;
    for object in objects {
        next = object.write_to(buffer, next)?;
    }

    Ok(next)
}
