use asn1::{Asn1Object, Oid, OID_PKCS7};
use gossl::decoder::{DecodableFrom, Decoder};

use crate::error::{Error, Result};

/*
RFC 2315 - PKCS #7: Cryptographic Message Syntax

ContentInfo ::= SEQUENCE {
    contentType ContentType,
    content [0] EXPLICIT ANY DEFINED BY contentType OPTIONAL
}

ContentType ::= OBJECT IDENTIFIER
*/

/// The outer PKCS#7 message shell. The content is kept as a raw object;
/// interpreting the inner syntaxes is out of scope here.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentInfo {
    pub content_type: Oid,
    pub content: Option<Asn1Object>,
}

impl ContentInfo {
    pub fn from_der(data: &[u8]) -> Result<ContentInfo> {
        crate::decode_single_object(data)?.decode()
    }

    /// The last sub-identifier of the content type, e.g. 1 for `data`, 2
    /// for `signedData`.
    pub fn content_kind(&self) -> Option<u64> {
        self.content_type.ids().last().copied()
    }
}

impl DecodableFrom<Asn1Object> for ContentInfo {}

impl Decoder<Asn1Object, ContentInfo> for Asn1Object {
    type Error = Error;

    fn decode(&self) -> Result<ContentInfo> {
        let Asn1Object::Sequence(elements) = self else {
            return Err(Error::InvalidStructure(
                "expected Sequence for ContentInfo".to_string(),
            ));
        };

        if elements.is_empty() || elements.len() > 2 {
            return Err(Error::InvalidStructure(format!(
                "expected 1 or 2 elements in ContentInfo, got {}",
                elements.len()
            )));
        }

        let Asn1Object::ObjectIdentifier(content_type) = &elements[0] else {
            return Err(Error::InvalidStructure(
                "expected ObjectIdentifier for contentType".to_string(),
            ));
        };

        if !content_type.starts_with(OID_PKCS7) {
            return Err(Error::InvalidStructure(format!(
                "not a PKCS#7 content type: {content_type}"
            )));
        }

        Ok(ContentInfo {
            content_type: content_type.clone(),
            content: elements.get(1).cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use asn1::{GenericData, Tag, TagClass};

    use super::*;

    #[test]
    fn test_decode_content_info() {
        let payload = Asn1Object::OctetString(asn1::OctetString::from_bytes(
            b"hello".to_vec(),
        ));
        let object = Asn1Object::Sequence(vec![
            Asn1Object::ObjectIdentifier(Oid::new(OID_PKCS7).child(&[1])),
            Asn1Object::Generic(GenericData {
                tag: Tag {
                    class: TagClass::ContextSpecific,
                    constructed: true,
                    number: 0,
                },
                data: payload.to_der().unwrap(),
            }),
        ]);

        let info: ContentInfo = object.decode().unwrap();
        assert_eq!(Some(1), info.content_kind());
        assert!(info.content.is_some());

        let der = object.to_der().unwrap();
        assert_eq!(info, ContentInfo::from_der(&der).unwrap());
    }

    #[test]
    fn test_reject_foreign_content_type() {
        let object = Asn1Object::Sequence(vec![Asn1Object::oid(&[1, 2, 840, 113549, 1, 1, 1])]);
        let result: Result<ContentInfo> = object.decode();
        assert!(result.is_err());
    }
}
