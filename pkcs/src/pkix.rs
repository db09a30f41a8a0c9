use asn1::{Asn1Object, Oid, OID_EC_PUBLIC_KEY, OID_RSA_ENCRYPTION};
use gossl::decoder::{DecodableFrom, Decoder};
use gossl::encoder::{EncodableTo, Encoder};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::pkcs1::RsaPublicKey;

/*
RFC 5280 - Internet X.509 Public Key Infrastructure

AlgorithmIdentifier ::= SEQUENCE {
    algorithm   OBJECT IDENTIFIER,
    parameters  ANY DEFINED BY algorithm OPTIONAL
}

SubjectPublicKeyInfo ::= SEQUENCE {
    algorithm        AlgorithmIdentifier,
    subjectPublicKey BIT STRING
}
*/

#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmIdentifier {
    pub algorithm: Oid,
    pub parameters: Option<Asn1Object>,
}

impl AlgorithmIdentifier {
    pub fn new(algorithm: Oid, parameters: Option<Asn1Object>) -> AlgorithmIdentifier {
        AlgorithmIdentifier {
            algorithm,
            parameters,
        }
    }

    /// The parameters as an OID, the shape used by named EC curves.
    pub fn parameter_oid(&self) -> Option<&Oid> {
        match &self.parameters {
            Some(Asn1Object::ObjectIdentifier(oid)) => Some(oid),
            _ => None,
        }
    }
}

impl DecodableFrom<Asn1Object> for AlgorithmIdentifier {}

impl Decoder<Asn1Object, AlgorithmIdentifier> for Asn1Object {
    type Error = Error;

    fn decode(&self) -> Result<AlgorithmIdentifier> {
        let Asn1Object::Sequence(elements) = self else {
            return Err(Error::InvalidStructure(
                "expected Sequence for AlgorithmIdentifier".to_string(),
            ));
        };

        if elements.is_empty() || elements.len() > 2 {
            return Err(Error::InvalidStructure(format!(
                "expected 1 or 2 elements in AlgorithmIdentifier, got {}",
                elements.len()
            )));
        }

        let Asn1Object::ObjectIdentifier(algorithm) = &elements[0] else {
            return Err(Error::InvalidStructure(
                "expected ObjectIdentifier for algorithm".to_string(),
            ));
        };

        Ok(AlgorithmIdentifier {
            algorithm: algorithm.clone(),
            parameters: elements.get(1).cloned(),
        })
    }
}

impl EncodableTo<AlgorithmIdentifier> for Asn1Object {}

impl Encoder<AlgorithmIdentifier, Asn1Object> for AlgorithmIdentifier {
    type Error = Error;

    fn encode(&self) -> Result<Asn1Object> {
        let mut elements = vec![Asn1Object::ObjectIdentifier(self.algorithm.clone())];
        if let Some(parameters) = &self.parameters {
            elements.push(parameters.clone());
        }

        Ok(Asn1Object::Sequence(elements))
    }
}

/// X.509 SubjectPublicKeyInfo: the algorithm and the raw public key bits.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub subject_public_key: Vec<u8>,
}

impl SubjectPublicKeyInfo {
    pub fn from_der(data: &[u8]) -> Result<SubjectPublicKeyInfo> {
        crate::decode_single_object(data)?.decode()
    }

    /// Extracts a PKCS#1 RSA public key from the bit string payload.
    pub fn rsa_public_key(&self) -> Result<RsaPublicKey> {
        if self.algorithm.algorithm.ids() != OID_RSA_ENCRYPTION {
            return Err(Error::UnexpectedAlgorithm(
                self.algorithm.algorithm.to_string(),
            ));
        }

        RsaPublicKey::from_der(&self.subject_public_key)
    }

    /// Extracts an EC public key point; the curve comes from the algorithm
    /// parameters.
    pub fn ec_public_key(&self) -> Result<EcPublicKey> {
        if self.algorithm.algorithm.ids() != OID_EC_PUBLIC_KEY {
            return Err(Error::UnexpectedAlgorithm(
                self.algorithm.algorithm.to_string(),
            ));
        }

        Ok(EcPublicKey {
            curve: self.algorithm.parameter_oid().cloned(),
            point: self.subject_public_key.clone(),
        })
    }
}

impl DecodableFrom<Asn1Object> for SubjectPublicKeyInfo {}

impl Decoder<Asn1Object, SubjectPublicKeyInfo> for Asn1Object {
    type Error = Error;

    fn decode(&self) -> Result<SubjectPublicKeyInfo> {
        let Asn1Object::Sequence(elements) = self else {
            return Err(Error::InvalidStructure(
                "expected Sequence for SubjectPublicKeyInfo".to_string(),
            ));
        };

        if elements.len() != 2 {
            return Err(Error::InvalidStructure(format!(
                "expected 2 elements in SubjectPublicKeyInfo, got {}",
                elements.len()
            )));
        }

        let algorithm: AlgorithmIdentifier = elements[0].decode()?;

        let Asn1Object::BitString(bits) = &elements[1] else {
            return Err(Error::InvalidStructure(
                "expected BitString for subjectPublicKey".to_string(),
            ));
        };

        let Some(data) = bits.bytes() else {
            return Err(Error::InvalidStructure(
                "constructed subjectPublicKey is not supported".to_string(),
            ));
        };

        Ok(SubjectPublicKeyInfo {
            algorithm,
            subject_public_key: data.to_vec(),
        })
    }
}

/// An EC public key: the curve point in uncompressed or compressed form and
/// the named curve, when known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EcPublicKey {
    pub curve: Option<Oid>,
    pub point: Vec<u8>,
}

impl EcPublicKey {
    pub fn key_size(&self) -> u32 {
        // An uncompressed point is 0x04 || X || Y.
        if self.point.first() == Some(&0x04) && self.point.len() > 1 {
            return ((self.point.len() - 1) / 2 * 8) as u32;
        }

        (self.point.len() * 8) as u32
    }
}

#[cfg(test)]
mod tests {
    use asn1::BitString;
    use gossl::encoder::Encoder;
    use num_bigint::BigInt;

    use super::*;
    use crate::pkcs1::RsaPublicKey;

    fn rsa_spki_object() -> Asn1Object {
        let public_key = RsaPublicKey {
            modulus: BigInt::from(0xc0ffeeu64),
            public_exponent: BigInt::from(65537),
        };
        let key_der = public_key.encode().unwrap().to_der().unwrap();

        Asn1Object::Sequence(vec![
            Asn1Object::Sequence(vec![
                Asn1Object::oid(OID_RSA_ENCRYPTION),
                Asn1Object::Null,
            ]),
            Asn1Object::BitString(BitString::from_bytes(key_der)),
        ])
    }

    #[test]
    fn test_decode_rsa_subject_public_key_info() {
        let spki: SubjectPublicKeyInfo = rsa_spki_object().decode().unwrap();
        assert_eq!(OID_RSA_ENCRYPTION, spki.algorithm.algorithm.ids());

        let key = spki.rsa_public_key().unwrap();
        assert_eq!(BigInt::from(65537), key.public_exponent);
        assert!(spki.ec_public_key().is_err());
    }

    #[test]
    fn test_decode_ec_subject_public_key_info() {
        let point = vec![0x04u8; 65];
        let object = Asn1Object::Sequence(vec![
            Asn1Object::Sequence(vec![
                Asn1Object::oid(OID_EC_PUBLIC_KEY),
                Asn1Object::oid(asn1::OID_PRIME256V1),
            ]),
            Asn1Object::BitString(BitString::from_bytes(point.clone())),
        ]);

        let spki: SubjectPublicKeyInfo = object.decode().unwrap();
        let key = spki.ec_public_key().unwrap();
        assert_eq!(Some(asn1::Oid::new(asn1::OID_PRIME256V1)), key.curve);
        assert_eq!(point, key.point);
        assert_eq!(256, key.key_size());
        assert!(spki.rsa_public_key().is_err());
    }

    #[test]
    fn test_algorithm_identifier_roundtrip() {
        let identifier = AlgorithmIdentifier::new(
            Oid::new(OID_RSA_ENCRYPTION),
            Some(Asn1Object::Null),
        );

        let encoded = identifier.encode().unwrap();
        let decoded: AlgorithmIdentifier = encoded.decode().unwrap();
        assert_eq!(identifier, decoded);
        assert_eq!(None, decoded.parameter_oid());
    }
}
