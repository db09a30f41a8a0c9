use asn1::{Asn1Object, GenericData, Oid, Tag, TagClass};
use gossl::decoder::{DecodableFrom, Decoder};
use gossl::encoder::{EncodableTo, Encoder};
use num_bigint::BigInt;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::pkix::EcPublicKey;

/*
RFC 5915 - Elliptic Curve Private Key Structure (SEC1)

ECPrivateKey ::= SEQUENCE {
    version        INTEGER { ecPrivkeyVer1(1) } (ecPrivkeyVer1),
    privateKey     OCTET STRING,
    parameters [0] ECParameters {{ NamedCurve }} OPTIONAL,
    publicKey  [1] BIT STRING OPTIONAL
}
*/

const EC_PRIVATE_KEY_VERSION: i64 = 1;

/// SEC1 EC private key. The curve is optional on the wire; a PKCS#8
/// wrapper usually supplies it through the algorithm parameters instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EcPrivateKey {
    pub private_key: Vec<u8>,
    pub curve: Option<Oid>,
    pub public_key: Option<Vec<u8>>,
}

impl EcPrivateKey {
    pub fn from_der(data: &[u8]) -> Result<EcPrivateKey> {
        crate::decode_single_object(data)?.decode()
    }

    /// Key size in bits: the length of the private scalar.
    pub fn key_size(&self) -> u32 {
        (self.private_key.len() * 8) as u32
    }

    /// The embedded public key point, when the wire form carried one.
    pub fn public_key(&self) -> Option<EcPublicKey> {
        self.public_key.as_ref().map(|point| EcPublicKey {
            curve: self.curve.clone(),
            point: point.clone(),
        })
    }
}

/// `[n] EXPLICIT` wrappers decode as generic data; the payload is one
/// complete inner encoding.
fn explicit_inner(data: &[u8]) -> Result<Asn1Object> {
    crate::decode_single_object(data)
}

impl DecodableFrom<Asn1Object> for EcPrivateKey {}

impl Decoder<Asn1Object, EcPrivateKey> for Asn1Object {
    type Error = Error;

    fn decode(&self) -> Result<EcPrivateKey> {
        let Asn1Object::Sequence(elements) = self else {
            return Err(Error::InvalidStructure(
                "expected Sequence for ECPrivateKey".to_string(),
            ));
        };

        if elements.len() < 2 {
            return Err(Error::InvalidStructure(format!(
                "expected at least 2 elements in ECPrivateKey sequence, got {}",
                elements.len()
            )));
        }

        let Asn1Object::Integer(version) = &elements[0] else {
            return Err(Error::InvalidStructure(
                "expected Integer for version".to_string(),
            ));
        };

        if version != &BigInt::from(EC_PRIVATE_KEY_VERSION) {
            let value = i64::try_from(version).unwrap_or(-1);
            return Err(Error::InvalidVersion(value));
        }

        let Asn1Object::OctetString(private_key) = &elements[1] else {
            return Err(Error::InvalidStructure(
                "expected OctetString for privateKey".to_string(),
            ));
        };

        let Some(private_key) = private_key.bytes() else {
            return Err(Error::InvalidStructure(
                "constructed privateKey is not supported".to_string(),
            ));
        };

        let mut curve = None;
        let mut public_key = None;
        for element in &elements[2..] {
            let Asn1Object::Generic(g) = element else {
                continue;
            };

            if g.tag.class != TagClass::ContextSpecific {
                continue;
            }

            match g.tag.number {
                0 => {
                    if let Asn1Object::ObjectIdentifier(oid) = explicit_inner(&g.data)? {
                        curve = Some(oid);
                    }
                }
                1 => {
                    if let Asn1Object::BitString(bits) = explicit_inner(&g.data)? {
                        public_key = bits.bytes().map(|b| b.to_vec());
                    }
                }
                _ => {}
            }
        }

        Ok(EcPrivateKey {
            private_key: private_key.to_vec(),
            curve,
            public_key,
        })
    }
}

impl EncodableTo<EcPrivateKey> for Asn1Object {}

impl Encoder<EcPrivateKey, Asn1Object> for EcPrivateKey {
    type Error = Error;

    fn encode(&self) -> Result<Asn1Object> {
        let mut elements = vec![
            Asn1Object::Integer(BigInt::from(EC_PRIVATE_KEY_VERSION)),
            Asn1Object::OctetString(asn1::OctetString::from_bytes(
                self.private_key.clone(),
            )),
        ];

        if let Some(curve) = &self.curve {
            elements.push(Asn1Object::Generic(GenericData {
                tag: Tag {
                    class: TagClass::ContextSpecific,
                    constructed: true,
                    number: 0,
                },
                data: Asn1Object::ObjectIdentifier(curve.clone()).to_der()?,
            }));
        }

        if let Some(public_key) = &self.public_key {
            elements.push(Asn1Object::Generic(GenericData {
                tag: Tag {
                    class: TagClass::ContextSpecific,
                    constructed: true,
                    number: 1,
                },
                data: Asn1Object::BitString(asn1::BitString::from_bytes(
                    public_key.clone(),
                ))
                .to_der()?,
            }));
        }

        Ok(Asn1Object::Sequence(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key() -> EcPrivateKey {
        EcPrivateKey {
            private_key: vec![0x11; 32],
            curve: Some(Oid::new(asn1::OID_PRIME256V1)),
            public_key: Some(vec![0x04; 65]),
        }
    }

    #[test]
    fn test_ec_private_key_roundtrip() {
        let key = sample_key();
        let encoded = key.encode().unwrap();
        let decoded: EcPrivateKey = encoded.decode().unwrap();
        assert_eq!(key, decoded);
        assert_eq!(256, decoded.key_size());

        let der = encoded.to_der().unwrap();
        assert_eq!(key, EcPrivateKey::from_der(&der).unwrap());
    }

    #[test]
    fn test_ec_private_key_without_optionals() {
        let object = Asn1Object::Sequence(vec![
            Asn1Object::Integer(BigInt::from(1)),
            Asn1Object::OctetString(asn1::OctetString::from_bytes(vec![0x22; 48])),
        ]);

        let key: EcPrivateKey = object.decode().unwrap();
        assert_eq!(None, key.curve);
        assert_eq!(None, key.public_key);
        assert_eq!(384, key.key_size());
        assert!(key.public_key().is_none());
    }

    #[test]
    fn test_ec_private_key_rejects_wrong_version() {
        let object = Asn1Object::Sequence(vec![
            Asn1Object::Integer(BigInt::from(2)),
            Asn1Object::OctetString(asn1::OctetString::from_bytes(vec![0x22; 32])),
        ]);

        let result: Result<EcPrivateKey> = object.decode();
        assert!(matches!(result, Err(Error::InvalidVersion(2))));
    }

    #[test]
    fn test_embedded_public_key_carries_curve() {
        let key = sample_key();
        let public = key.public_key().unwrap();
        assert_eq!(key.curve, public.curve);
        assert_eq!(256, public.key_size());
    }
}
