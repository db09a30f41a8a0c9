//! Key-file format and key-type enumerations, plus the non-destructive
//! format detector.

use std::fmt::{self, Display, Formatter};

use gossl::decoder::Decoder;
use pem::{Label, Pem};
use serde::{Serialize, Serializer};

/// Recognised key-file encodings. The display strings are stable and
/// surfaced to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFileFormat {
    Invalid,
    Pkcs1RsaPrivateKey,
    Pkcs1RsaPublicKey,
    Pkcs7Message,
    Pkcs8PrivateKey,
    PkixPublicKey,
    EcPrivateKey,
    EcPublicKey,
    EcParameters,
    Certificate,
    CertificateRequest,
    Pem,
}

impl Display for KeyFileFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyFileFormat::Invalid => "INVALID",
            KeyFileFormat::Pkcs1RsaPrivateKey => "RSAPrivateKey[PKCS1]",
            KeyFileFormat::Pkcs1RsaPublicKey => "RSAPublicKey[PKCS1]",
            KeyFileFormat::Pkcs7Message => "PKCS7Message",
            KeyFileFormat::Pkcs8PrivateKey => "PrivateKey[PKCS8]",
            KeyFileFormat::PkixPublicKey => "PublicKey[PKIX]",
            KeyFileFormat::EcPrivateKey => "ECPrivateKey",
            KeyFileFormat::EcPublicKey => "ECPublicKey",
            KeyFileFormat::EcParameters => "ECParameters",
            KeyFileFormat::Certificate => "Certificate",
            KeyFileFormat::CertificateRequest => "CertificateRequest",
            KeyFileFormat::Pem => "PEM",
        };
        write!(f, "{name}")
    }
}

impl Serialize for KeyFileFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The kind of artifact a container holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    Invalid,
    RsaPrivateKey,
    RsaPublicKey,
    EcPrivateKey,
    EcPublicKey,
    EcParameters,
    Certificate,
    CertificateRequest,
}

impl Display for KeyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyType::Invalid => "INVALID",
            KeyType::RsaPrivateKey => "RSA PrivateKey",
            KeyType::RsaPublicKey => "RSA PublicKey",
            KeyType::EcPrivateKey => "EC PrivateKey",
            KeyType::EcPublicKey => "EC PublicKey",
            KeyType::EcParameters => "EC Parameters",
            KeyType::Certificate => "Certificate",
            KeyType::CertificateRequest => "CertificateRequest",
        };
        write!(f, "{name}")
    }
}

impl Serialize for KeyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Classifies `data` without building a chain. A PEM block contributes
/// `PEM` plus the format of its body; the remainder of the input is
/// classified in turn.
pub fn detect(data: &[u8]) -> Vec<KeyFileFormat> {
    let mut formats = Vec::new();

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok((block, consumed)) = Pem::scan(text) {
            formats.push(KeyFileFormat::Pem);
            if block.label() == Label::EcParameters {
                formats.push(KeyFileFormat::EcParameters);
            } else {
                let body: Result<Vec<u8>, _> = block.decode();
                match body {
                    Ok(der) => formats.push(der_detect(&der)),
                    Err(_) => formats.push(KeyFileFormat::Invalid),
                }
            }

            let rest = text[consumed..].trim_start();
            if !rest.is_empty() {
                formats.extend(detect(rest.as_bytes()));
            }

            return formats;
        }
    }

    formats.push(der_detect(data));
    formats
}

fn der_detect(data: &[u8]) -> KeyFileFormat {
    match crate::parse_der(data) {
        Ok((format, _, _)) => format,
        Err(_) => KeyFileFormat::Invalid,
    }
}
