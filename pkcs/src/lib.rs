//! Typed views over decoded ASN.1 key material.
//!
//! Each module covers one standard: `pkcs1` (RSA keys, RFC 8017), `pkcs8`
//! (generic private keys, RFC 5958), `sec1` (EC private keys, RFC 5915),
//! `pkix` (AlgorithmIdentifier and SubjectPublicKeyInfo, RFC 5280) and
//! `pkcs7` (the ContentInfo shell, RFC 2315). The conversion pattern is
//! `Asn1Object → typed structure` via the core `Decoder` trait, with
//! `from_der` conveniences for full buffers.

pub mod error;
pub mod pkcs1;
pub mod pkcs7;
pub mod pkcs8;
pub mod pkix;
pub mod sec1;

use std::fmt::{self, Display, Formatter};

pub use error::{Error, Result};

/// Decodes exactly one ASN.1 object spanning the whole buffer.
pub(crate) fn decode_single_object(data: &[u8]) -> Result<asn1::Asn1Object> {
    let (object, next) = asn1::read_object(data, 0)?;
    if next != data.len() {
        return Err(Error::Asn1(asn1::Error::NotAllParsed {
            parsed: next,
            total: data.len(),
        }));
    }

    Ok(object)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
    Ecdsa,
}

impl Display for KeyAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Rsa => write!(f, "RSA"),
            KeyAlgorithm::Ecdsa => write!(f, "ECDSA"),
        }
    }
}

/// A private key of any supported algorithm.
#[derive(Debug, Clone, PartialEq)]
pub enum PrivateKey {
    Rsa(pkcs1::RsaPrivateKey),
    Ec(sec1::EcPrivateKey),
}

impl PrivateKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PrivateKey::Rsa(_) => KeyAlgorithm::Rsa,
            PrivateKey::Ec(_) => KeyAlgorithm::Ecdsa,
        }
    }

    pub fn key_size(&self) -> u32 {
        match self {
            PrivateKey::Rsa(key) => key.key_size(),
            PrivateKey::Ec(key) => key.key_size(),
        }
    }

    /// Derives the matching public key where the material allows it.
    pub fn public_key(&self) -> Option<PublicKey> {
        match self {
            PrivateKey::Rsa(key) => Some(PublicKey::Rsa(key.public_key())),
            PrivateKey::Ec(key) => key.public_key().map(PublicKey::Ec),
        }
    }
}

/// A public key of any supported algorithm.
#[derive(Debug, Clone, PartialEq)]
pub enum PublicKey {
    Rsa(pkcs1::RsaPublicKey),
    Ec(pkix::EcPublicKey),
}

impl PublicKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PublicKey::Rsa(_) => KeyAlgorithm::Rsa,
            PublicKey::Ec(_) => KeyAlgorithm::Ecdsa,
        }
    }

    pub fn key_size(&self) -> u32 {
        match self {
            PublicKey::Rsa(key) => key.key_size(),
            PublicKey::Ec(key) => key.key_size(),
        }
    }
}
