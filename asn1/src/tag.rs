//! ASN.1 identifier octets (X.690 8.1.2).

use std::fmt::{self, Display, Formatter};

use crate::base128::{base128_uint_size, read_base128_uint, write_base128_uint};
use crate::error::{check_buffer, Error};

/// Tag class, X.690 8.1.2.2 Table 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    fn from_bits(bits: u8) -> TagClass {
        match bits & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }

    fn bits(&self) -> u8 {
        match self {
            TagClass::Universal => 0,
            TagClass::Application => 1,
            TagClass::ContextSpecific => 2,
            TagClass::Private => 3,
        }
    }
}

impl Display for TagClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagClass::Universal => "Universal",
            TagClass::Application => "Application",
            TagClass::ContextSpecific => "ContextSpecific",
            TagClass::Private => "Private",
        };
        write!(f, "{name}")
    }
}

// Universal tag numbers, X.680 8.4 Table 1.
pub const TAG_RESERVED0: u64 = 0;
pub const TAG_BOOLEAN: u64 = 1;
pub const TAG_INTEGER: u64 = 2;
pub const TAG_BIT_STRING: u64 = 3;
pub const TAG_OCTET_STRING: u64 = 4;
pub const TAG_NULL: u64 = 5;
pub const TAG_OBJECT_IDENTIFIER: u64 = 6;
pub const TAG_ENUMERATED: u64 = 10;
pub const TAG_UTF8_STRING: u64 = 12;
pub const TAG_SEQUENCE: u64 = 16;
pub const TAG_SET: u64 = 17;
pub const TAG_NUMERIC_STRING: u64 = 18;
pub const TAG_PRINTABLE_STRING: u64 = 19;
pub const TAG_T61_STRING: u64 = 20;
pub const TAG_IA5_STRING: u64 = 22;
pub const TAG_UTC_TIME: u64 = 23;
pub const TAG_GENERALIZED_TIME: u64 = 24;
pub const TAG_GENERAL_STRING: u64 = 27;
pub const TAG_BMP_STRING: u64 = 30;

const TAG_MASK_CONSTRUCTED: u8 = 0x20;
const TAG_MASK_NUMBER: u8 = 0x1f;

pub(crate) fn tag_number_name(number: u64) -> String {
    let name = match number {
        TAG_BOOLEAN => "Boolean",
        TAG_INTEGER => "Integer",
        TAG_BIT_STRING => "BitString",
        TAG_OCTET_STRING => "OctetString",
        TAG_NULL => "Null",
        TAG_OBJECT_IDENTIFIER => "ObjectIdentifier",
        TAG_ENUMERATED => "Enumerated",
        TAG_UTF8_STRING => "UTF8String",
        TAG_SEQUENCE => "Sequence",
        TAG_SET => "Set",
        TAG_NUMERIC_STRING => "NumericString",
        TAG_PRINTABLE_STRING => "PrintableString",
        TAG_T61_STRING => "T61String",
        TAG_IA5_STRING => "IA5String",
        TAG_UTC_TIME => "UTCTime",
        TAG_GENERALIZED_TIME => "GeneralizedTime",
        TAG_GENERAL_STRING => "GeneralString",
        TAG_BMP_STRING => "BMPString",
        _ => return format!("UnknownTag({number})"),
    };

    name.to_string()
}

/// One decoded identifier octet group: class, primitive/constructed bit and
/// tag number. Numbers above 30 use the long form (base-128 with
/// continuation bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub class: TagClass,
    pub constructed: bool,
    pub number: u64,
}

impl Tag {
    pub fn universal(number: u64) -> Tag {
        Tag {
            class: TagClass::Universal,
            constructed: false,
            number,
        }
    }

    pub fn constructed(number: u64) -> Tag {
        Tag {
            class: TagClass::Universal,
            constructed: true,
            number,
        }
    }

    pub fn wire_length(&self) -> usize {
        if self.number <= 30 {
            return 1;
        }

        1 + base128_uint_size(self.number)
    }

    pub fn read_from(buffer: &[u8], offset: usize) -> Result<(Tag, usize), Error> {
        check_buffer(buffer.len(), offset, 1)?;

        let first_octet = buffer[offset];
        let class = TagClass::from_bits(first_octet >> 6);
        let constructed = first_octet & TAG_MASK_CONSTRUCTED != 0;
        let number = u64::from(first_octet & TAG_MASK_NUMBER);
        if number <= 30 {
            return Ok((
                Tag {
                    class,
                    constructed,
                    number,
                },
                offset + 1,
            ));
        }

        let (number, next) = read_base128_uint(buffer, offset + 1, buffer.len())
            .map_err(|_| Error::InvalidTagLongForm(buffer.len()))?;

        Ok((
            Tag {
                class,
                constructed,
                number,
            },
            next,
        ))
    }

    pub fn write_to(&self, buffer: &mut [u8], offset: usize) -> Result<usize, Error> {
        let mut mask = self.class.bits() << 6;
        if self.constructed {
            mask |= TAG_MASK_CONSTRUCTED;
        }

        if self.number <= 30 {
            check_buffer(buffer.len(), offset, 1)?;
            buffer[offset] = mask | self.number as u8;
            return Ok(offset + 1);
        }

        check_buffer(buffer.len(), offset, self.wire_length())?;
        buffer[offset] = mask | TAG_MASK_NUMBER;
        write_base128_uint(buffer, offset + 1, self.number)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = if self.constructed { " C" } else { "" };
        write!(
            f,
            "Tag[class={} number={}{}]",
            self.class,
            tag_number_name(self.number),
            c
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest(tag, expected,
        case(Tag::constructed(TAG_SEQUENCE), vec![0x30]),
        case(Tag::universal(TAG_INTEGER), vec![0x02]),
        // 0x1234 = 0001 0010 0011 0100 -> [1]010 0100 [0]011 0100
        case(Tag { class: TagClass::Private, constructed: false, number: 0x1234 }, vec![0xdf, 0xa4, 0x34]),
        case(Tag { class: TagClass::ContextSpecific, constructed: true, number: 0 }, vec![0xa0]),
    )]
    fn test_tag_encoding(tag: Tag, expected: Vec<u8>) {
        let mut buffer = vec![0u8; 10];
        let next = tag.write_to(&mut buffer, 0).unwrap();
        assert_eq!(expected, buffer[..next]);

        let (parsed, read_next) = Tag::read_from(&buffer, 0).unwrap();
        assert_eq!(next, read_next);
        assert_eq!(tag, parsed);
    }

    #[rstest(tag, expected,
        case(Tag::universal(TAG_BOOLEAN), 1),
        case(Tag::universal(30), 1),
        case(Tag::universal(31), 2),
        case(Tag { class: TagClass::Private, constructed: false, number: 0x1234 }, 3),
    )]
    fn test_tag_wire_length(tag: Tag, expected: usize) {
        assert_eq!(expected, tag.wire_length());
    }

    #[test]
    fn test_tag_truncated_long_form() {
        // Long-form marker with every continuation bit set and no final octet.
        let buffer = [0xdfu8, 0xa4];
        assert_eq!(
            Err(Error::InvalidTagLongForm(2)),
            Tag::read_from(&buffer, 0)
        );
    }
}
