//! DER encoding and decoding of ASN.1 data structures.
//!
//! Reference:
//!   - ITU-T X.680, ISO/IEC 8824-1:2021
//!   - ITU-T X.690, ISO/IEC 8825-1:2021
//!
//! The crate exposes a closed object model ([`Asn1Object`]) covering the
//! universal tags the toolkit works with, plus the tag/length codecs it is
//! built on. Anything outside the supported set round-trips through the
//! generic fallback variant.

mod base128;
pub mod error;
mod guess;
mod length;
mod object;
mod oid;
mod tag;

pub use error::Error;
pub use guess::can_be_certificate;
pub use length::Length;
pub use object::{
    read_object, read_objects, write_objects, Asn1Object, BitString, GenericData,
    OctetString, MAX_DEPTH,
};
pub use oid::{
    known_oid_name, Oid, OID_EC_PUBLIC_KEY, OID_PKCS7, OID_PRIME256V1,
    OID_RSA_ENCRYPTION,
};
pub use tag::{
    Tag, TagClass, TAG_BIT_STRING, TAG_BMP_STRING, TAG_BOOLEAN, TAG_ENUMERATED,
    TAG_GENERALIZED_TIME, TAG_GENERAL_STRING, TAG_IA5_STRING, TAG_INTEGER,
    TAG_NULL, TAG_NUMERIC_STRING, TAG_OBJECT_IDENTIFIER, TAG_OCTET_STRING,
    TAG_PRINTABLE_STRING, TAG_RESERVED0, TAG_SEQUENCE, TAG_SET, TAG_T61_STRING,
    TAG_UTC_TIME, TAG_UTF8_STRING,
};

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use rstest::rstest;

    use super::*;

    fn roundtrip(object: &Asn1Object) -> Asn1Object {
        let encoded = object.to_der().unwrap();
        let (decoded, next) = read_object(&encoded, 0).unwrap();
        assert_eq!(encoded.len(), next);
        decoded
    }

    #[rstest(value, expected,
        case(true, vec![0x01, 0x01, 0xff]),
        case(false, vec![0x01, 0x01, 0x00]),
    )]
    fn test_boolean_encoding(value: bool, expected: Vec<u8>) {
        let object = Asn1Object::Boolean(value);
        assert_eq!(expected, object.to_der().unwrap());
        assert_eq!(object, roundtrip(&object));
    }

    #[test]
    fn test_boolean_tolerant_read() {
        // Strict DER wants 0xFF for true, the reader accepts any non-zero.
        let (object, _) = read_object(&[0x01, 0x01, 0x2a], 0).unwrap();
        assert_eq!(Asn1Object::Boolean(true), object);
    }

    #[rstest(value, expected_content,
        case("0", vec![0x00]),
        case("1", vec![0x01]),
        case("65537", vec![0x01, 0x00, 0x01]),
        case(
            "6601204065283920107277770906064294761447734425098926021533406129124414385083445165102057553180206149348965242768485",
            vec![
                0x2a, 0xe3, 0x8e, 0x2e, 0x39, 0xb0, 0x1a, 0x0b,
                0x63, 0x1b, 0xa4, 0x80, 0x48, 0x5e, 0x16, 0xd9,
                0xef, 0x0a, 0xb5, 0x06, 0x40, 0x35, 0x1b, 0x18,
                0x5c, 0xc5, 0xc9, 0x0c, 0x6c, 0x01, 0x0a, 0x2f,
                0x5f, 0x33, 0xb4, 0x32, 0x4b, 0xd7, 0x6f, 0x94,
                0x52, 0xf0, 0xad, 0xc0, 0xe0, 0xd6, 0x0c, 0x65,
            ],
        ),
        // The magnitude's high bit is set, so a 0x00 pad octet is added.
        case(
            "35320900396551763846858960837766376768327329926871947290926180702279872098691177642687624258287709119380894217091237",
            vec![
                0x00, 0xe5, 0x7c, 0x09, 0x8a, 0x46, 0xe9, 0x93,
                0xfa, 0xb2, 0x41, 0xea, 0xf3, 0x79, 0x4b, 0x29,
                0xb9, 0x92, 0xa1, 0xaa, 0x1d, 0x4a, 0x3e, 0xe8,
                0xf6, 0xb8, 0x17, 0x69, 0xf2, 0xf8, 0x9c, 0xb8,
                0x1c, 0x6e, 0x4c, 0x95, 0x1d, 0xd5, 0x6f, 0x9d,
                0xdc, 0xb9, 0xa2, 0x90, 0xe5, 0x20, 0x1b, 0x38,
                0xa5,
            ],
        ),
    )]
    fn test_integer_encoding(value: &str, expected_content: Vec<u8>) {
        let number = BigInt::parse_bytes(value.as_bytes(), 10).unwrap();
        let object = Asn1Object::Integer(number);

        let encoded = object.to_der().unwrap();
        assert_eq!(expected_content.len(), object.content_length());
        assert_eq!(expected_content, encoded[encoded.len() - expected_content.len()..]);
        assert_eq!(object, roundtrip(&object));
    }

    #[rstest(data, bit_length, expected_content,
        case(vec![0x0a, 0x3b, 0x5f, 0x29, 0xc1, 0xd0], 44, vec![0x04, 0x0a, 0x3b, 0x5f, 0x29, 0xc1, 0xd0]),
        case(vec![0x0a, 0x3b, 0x5f, 0x29, 0xc1, 0xd0], 48, vec![0x00, 0x0a, 0x3b, 0x5f, 0x29, 0xc1, 0xd0]),
    )]
    fn test_bit_string_primitive_encoding(
        data: Vec<u8>,
        bit_length: usize,
        expected_content: Vec<u8>,
    ) {
        let object = Asn1Object::BitString(BitString::from_bit_array(data, bit_length));
        let encoded = object.to_der().unwrap();
        assert_eq!(expected_content, encoded[2..]);
        assert_eq!(object, roundtrip(&object));
    }

    #[test]
    fn test_bit_string_constructed_wraps_one_object() {
        let inner = Asn1Object::Sequence(vec![
            Asn1Object::integer(BigInt::from(65537)),
            Asn1Object::Null,
        ]);
        let object = Asn1Object::BitString(BitString::from_object(inner.clone()));

        assert_eq!(inner.encoded_length(), object.content_length());
        let decoded = roundtrip(&object);
        let Asn1Object::BitString(bits) = &decoded else {
            panic!("expected a bit string, got {decoded}");
        };
        assert_eq!(Some(&inner), bits.inner());
    }

    // Construction dispatches on the value kind: bytes give the primitive
    // form, an object gives the constructed wrapping.
    #[test]
    fn test_octet_string_constructor_dispatch() {
        let primitive = Asn1Object::OctetString(OctetString::from_bytes(vec![0x03, 0x02, 0x06, 0xa0]));
        assert!(!primitive.tag().constructed);
        assert_eq!(4, primitive.content_length());
        assert_eq!(primitive, roundtrip(&primitive));

        let inner = Asn1Object::printable_string("hi");
        let wrapped = Asn1Object::OctetString(OctetString::from_object(inner.clone()));
        assert!(wrapped.tag().constructed);
        // Constructed content covers the whole inner encoding.
        assert_eq!(inner.encoded_length(), wrapped.content_length());
        assert_eq!(wrapped, roundtrip(&wrapped));
    }

    #[test]
    fn test_object_identifier_encoding() {
        let object = Asn1Object::oid(&[2, 5, 4, 6]);
        assert_eq!(vec![0x06, 0x03, 0x55, 0x04, 0x06], object.to_der().unwrap());
        assert_eq!(object, roundtrip(&object));
    }

    #[test]
    fn test_sequence_roundtrip() {
        let object = Asn1Object::Sequence(vec![
            Asn1Object::integer(BigInt::from(7)),
            Asn1Object::Sequence(vec![
                Asn1Object::oid(&[1, 2, 840, 113549, 1, 1, 11]),
                Asn1Object::Null,
            ]),
            Asn1Object::printable_string("gossl"),
            Asn1Object::Set(vec![Asn1Object::Boolean(true)]),
        ]);

        let encoded = object.to_der().unwrap();
        assert_eq!(object.encoded_length(), encoded.len());
        assert_eq!(object, roundtrip(&object));
    }

    #[test]
    fn test_sequence_and_set_are_distinct() {
        let children = vec![Asn1Object::integer(BigInt::from(1))];
        let sequence = Asn1Object::Sequence(children.clone());
        let set = Asn1Object::Set(children);
        assert_ne!(sequence, set);
        assert_eq!(0x30, sequence.to_der().unwrap()[0]);
        assert_eq!(0x31, set.to_der().unwrap()[0]);
    }

    #[test]
    fn test_generic_fallback_roundtrip() {
        // UTCTime is outside the typed variant set and must survive as-is.
        let input = vec![
            0x17, 0x0d, 0x31, 0x39, 0x31, 0x32, 0x31, 0x36, 0x30, 0x33, 0x30,
            0x32, 0x31, 0x30, 0x5a,
        ];
        let (object, next) = read_object(&input, 0).unwrap();
        assert_eq!(input.len(), next);

        let Asn1Object::Generic(g) = &object else {
            panic!("expected generic data, got {object}");
        };
        assert_eq!(TAG_UTC_TIME, g.tag.number);
        assert_eq!(input, object.to_der().unwrap());
    }

    #[test]
    fn test_read_objects_rejects_trailing_garbage() {
        // One NULL followed by a truncated tag.
        let input = vec![0x05, 0x00, 0x02];
        let result = read_objects(&input, 0, input.len());
        assert!(result.is_err());
    }

    #[test]
    fn test_read_objects_rejects_overrun() {
        // The inner element claims more content than the caller's window.
        let input = vec![0x02, 0x03, 0x01, 0x00, 0x01];
        assert_eq!(
            Err(Error::NotAllParsed { parsed: 5, total: 4 }),
            read_objects(&input, 0, 4)
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut object = Asn1Object::Null;
        for _ in 0..(MAX_DEPTH + 2) {
            object = Asn1Object::Sequence(vec![object]);
        }

        let encoded = object.to_der().unwrap();
        assert_eq!(
            Err(Error::TooDeep(MAX_DEPTH)),
            read_object(&encoded, 0).map(|(o, _)| o.tag().number)
        );
    }

    #[test]
    fn test_indefinite_length_reported() {
        let input = vec![0x30, 0x80, 0x05, 0x00, 0x00, 0x00];
        assert_eq!(
            Err(Error::IndefiniteLength),
            read_object(&input, 0).map(|(o, _)| o.tag().number)
        );
    }

    #[test]
    fn test_pretty_string_layout() {
        let object = Asn1Object::Sequence(vec![
            Asn1Object::integer(BigInt::from(7)),
            Asn1Object::Sequence(vec![Asn1Object::Null]),
        ]);

        let expected = "\
+ Sequence [2 elements]
| + Integer[7]
| + Sequence [1 elements]
| | + Null";
        assert_eq!(expected, object.pretty_string(""));
    }

    mod guess {
        use std::str::FromStr;

        use gossl::decoder::Decoder;
        use rstest::rstest;

        use crate::{can_be_certificate, read_object, Asn1Object};

        const TEST_PEM_CERT: &str = r"-----BEGIN CERTIFICATE-----
MIICLDCCAdKgAwIBAgIBADAKBggqhkjOPQQDAjB9MQswCQYDVQQGEwJCRTEPMA0G
A1UEChMGR251VExTMSUwIwYDVQQLExxHbnVUTFMgY2VydGlmaWNhdGUgYXV0aG9y
aXR5MQ8wDQYDVQQIEwZMZXV2ZW4xJTAjBgNVBAMTHEdudVRMUyBjZXJ0aWZpY2F0
ZSBhdXRob3JpdHkwHhcNMTEwNTIzMjAzODIxWhcNMTIxMjIyMDc0MTUxWjB9MQsw
CQYDVQQGEwJCRTEPMA0GA1UEChMGR251VExTMSUwIwYDVQQLExxHbnVUTFMgY2Vy
dGlmaWNhdGUgYXV0aG9yaXR5MQ8wDQYDVQQIEwZMZXV2ZW4xJTAjBgNVBAMTHEdu
dVRMUyBjZXJ0aWZpY2F0ZSBhdXRob3JpdHkwWTATBgcqhkjOPQIBBggqhkjOPQMB
BwNCAARS2I0jiuNn14Y2sSALCX3IybqiIJUvxUpj+oNfzngvj/Niyv2394BWnW4X
uQ4RTEiywK87WRcWMGgJB5kX/t2no0MwQTAPBgNVHRMBAf8EBTADAQH/MA8GA1Ud
DwEB/wQFAwMHBgAwHQYDVR0OBBYEFPC0gf6YEr+1KLlkQAPLzB9mTigDMAoGCCqG
SM49BAMCA0gAMEUCIDGuwD1KPyG+hRf88MeyMQcqOFZD0TbVleF+UsAGQ4enAiEA
l4wOuDwKQa+upc8GftXE2C//4mKANBC6It01gUaTIpo=
-----END CERTIFICATE-----";

        #[test]
        fn test_can_be_certificate() {
            let pem = pem::Pem::from_str(TEST_PEM_CERT).unwrap();
            let der: Vec<u8> = pem.decode().unwrap();
            let (object, next) = read_object(&der, 0).unwrap();
            assert_eq!(der.len(), next);

            can_be_certificate(&object).unwrap();
        }

        #[rstest(object,
            case(Asn1Object::Null),
            case(Asn1Object::Sequence(vec![Asn1Object::Null])),
            case(Asn1Object::Sequence(vec![
                Asn1Object::Sequence(vec![]),
                Asn1Object::Sequence(vec![]),
                Asn1Object::Null,
            ])),
        )]
        fn test_can_be_certificate_rejects(object: Asn1Object) {
            assert!(can_be_certificate(&object).is_err());
        }
    }
}
