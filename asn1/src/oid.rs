//! Object identifiers and the well-known OID name registry.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::base128::{base128_uint_size, read_base128_uint, write_base128_uint};
use crate::error::{check_buffer, Error};

// OID arcs referenced by name elsewhere in the toolkit.
pub const OID_RSA_ENCRYPTION: &[u64] = &[1, 2, 840, 113549, 1, 1, 1];
pub const OID_PKCS7: &[u64] = &[1, 2, 840, 113549, 1, 7];
pub const OID_EC_PUBLIC_KEY: &[u64] = &[1, 2, 840, 10045, 2, 1];
pub const OID_PRIME256V1: &[u64] = &[1, 2, 840, 10045, 3, 1, 7];

/// An object identifier: a non-empty ordered sequence of sub-identifiers.
///
/// Wire form (X.690 8.19): the first octet holds `40 * id[0] + id[1]`,
/// every following sub-identifier is big-endian base-128 with continuation
/// bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Oid(Vec<u64>);

impl Oid {
    pub fn new(ids: impl Into<Vec<u64>>) -> Oid {
        Oid(ids.into())
    }

    pub fn ids(&self) -> &[u64] {
        &self.0
    }

    /// Returns a new OID extending this one with `tail`.
    pub fn child(&self, tail: &[u64]) -> Oid {
        let mut ids = self.0.clone();
        ids.extend_from_slice(tail);
        Oid(ids)
    }

    pub fn starts_with(&self, prefix: &[u64]) -> bool {
        self.0.starts_with(prefix)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.0.len() < 2 {
            return Err(Error::InvalidObjectIdentifier(format!(
                "too few sub-identifiers: {}",
                self.0.len()
            )));
        }

        if self.0[0] > 2 {
            return Err(Error::InvalidObjectIdentifier(format!(
                "first sub-identifier out of range: {}",
                self.0[0]
            )));
        }

        if self.0[0] <= 1 && self.0[1] > 39 {
            return Err(Error::InvalidObjectIdentifier(format!(
                "second sub-identifier out of range: {}",
                self.0[1]
            )));
        }

        Ok(())
    }

    pub(crate) fn content_length(&self) -> usize {
        let mut length = 1;
        for &id in self.0.get(2..).unwrap_or(&[]) {
            length += base128_uint_size(id);
        }

        length
    }

    pub(crate) fn write_content_to(
        &self,
        buffer: &mut [u8],
        offset: usize,
    ) -> Result<usize, Error> {
        self.validate()?;
        check_buffer(buffer.len(), offset, self.content_length())?;

        buffer[offset] = (self.0[0] * 40 + self.0[1]) as u8;
        let mut next = offset + 1;
        for &id in &self.0[2..] {
            next = write_base128_uint(buffer, next, id)?;
        }

        Ok(next)
    }

    pub(crate) fn read_content_from(
        buffer: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(Oid, usize), Error> {
        check_buffer(buffer.len(), offset, length)?;
        if length == 0 {
            return Err(Error::InvalidObjectIdentifier(
                "empty content".to_string(),
            ));
        }

        let first_octet = u64::from(buffer[offset]);
        let mut ids = vec![first_octet / 40, first_octet % 40];
        let mut next = offset + 1;
        let end = offset + length;
        while next < end {
            let (id, n) = read_base128_uint(buffer, next, end).map_err(|_| {
                Error::InvalidObjectIdentifier(format!(
                    "truncated sub-identifier at byte {next}"
                ))
            })?;
            ids.push(id);
            next = n;
        }

        Ok((Oid(ids), next))
    }
}

impl From<&[u64]> for Oid {
    fn from(ids: &[u64]) -> Oid {
        Oid(ids.to_vec())
    }
}

impl Display for Oid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let parts = self
            .0
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<String>>();
        write!(f, "{}", parts.join("."))
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ids = s
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|e| Error::InvalidObjectIdentifier(e.to_string()))
            })
            .collect::<Result<Vec<u64>, Error>>()?;

        Ok(Oid(ids))
    }
}

struct NameNode {
    name: Option<&'static str>,
    children: HashMap<u64, NameNode>,
}

impl NameNode {
    fn new() -> NameNode {
        NameNode {
            name: None,
            children: HashMap::new(),
        }
    }

    fn register(&mut self, path: &[u64], name: &'static str) {
        let mut node = self;
        for &id in path {
            node = node.children.entry(id).or_insert_with(NameNode::new);
        }

        node.name = Some(name);
    }

    fn find(&self, path: &[u64]) -> Option<&'static str> {
        let mut node = self;
        for &id in path {
            node = node.children.get(&id)?;
        }

        node.name
    }
}

#[rustfmt::skip]
static KNOWN_OID_NAMES: &[(&[u64], &str)] = &[
    (&[0], "itu-t"),
    (&[1], "iso"),
    (&[2], "joint-iso-itu-t"),

    (&[1, 2, 840, 10045, 2, 1], "EC Public Key"),                // 1.2.840.10045.2.1
    (&[1, 2, 840, 10045, 3, 1], "Prime Curve"),                  // 1.2.840.10045.3.1
    (&[1, 2, 840, 10045, 3, 1, 1], "Prime Curve P192v1"),
    (&[1, 2, 840, 10045, 3, 1, 2], "Prime Curve P192v2"),
    (&[1, 2, 840, 10045, 3, 1, 3], "Prime Curve P192v3"),
    (&[1, 2, 840, 10045, 3, 1, 4], "Prime Curve P239v1"),
    (&[1, 2, 840, 10045, 3, 1, 5], "Prime Curve P239v2"),
    (&[1, 2, 840, 10045, 3, 1, 6], "Prime Curve P239v3"),
    (&[1, 2, 840, 10045, 3, 1, 7], "Prime Curve P256v1"),
    (&[1, 2, 840, 10045, 4, 1], "ECDSA with SHA1"),              // 1.2.840.10045.4.1
    (&[1, 2, 840, 10045, 4, 2], "ECDSA with Recommended"),
    (&[1, 2, 840, 10045, 4, 3], "ECDSA with SHA2"),
    (&[1, 2, 840, 10045, 4, 3, 1], "ECDSA with SHA224"),
    (&[1, 2, 840, 10045, 4, 3, 2], "ECDSA with SHA256"),
    (&[1, 2, 840, 10045, 4, 3, 3], "ECDSA with SHA384"),
    (&[1, 2, 840, 10045, 4, 3, 4], "ECDSA with SHA512"),

    (&[1, 2, 840, 113549, 1, 1, 1], "RSA Encryption"),           // 1.2.840.113549.1.1.1
    (&[1, 2, 840, 113549, 1, 1, 2], "MD2 with RSA"),
    (&[1, 2, 840, 113549, 1, 1, 3], "MD4 with RSA"),
    (&[1, 2, 840, 113549, 1, 1, 4], "MD5 with RSA"),
    (&[1, 2, 840, 113549, 1, 1, 5], "SHA1 with RSA"),
    (&[1, 2, 840, 113549, 1, 1, 6], "RSA OAEP Encryption SET"),
    (&[1, 2, 840, 113549, 1, 1, 7], "RSAES-OAEP"),
    (&[1, 2, 840, 113549, 1, 1, 8], "MGF1"),
    (&[1, 2, 840, 113549, 1, 1, 9], "PSpecified"),
    (&[1, 2, 840, 113549, 1, 1, 10], "RSASSA-PSS"),
    (&[1, 2, 840, 113549, 1, 1, 11], "SHA256 with RSA"),
    (&[1, 2, 840, 113549, 1, 1, 12], "SHA384 with RSA"),
    (&[1, 2, 840, 113549, 1, 1, 13], "SHA512 with RSA"),
    (&[1, 2, 840, 113549, 1, 1, 14], "SHA224 with RSA"),

    (&[2, 5, 4], "Directory Attribute Types"),                   // 2.5.4
    (&[2, 5, 4, 0], "Object Class"),
    (&[2, 5, 4, 1], "Aliased Entry Name"),
    (&[2, 5, 4, 2], "Knowledge Information"),
    (&[2, 5, 4, 3], "Common Name (CN)"),
    (&[2, 5, 4, 4], "Surname"),
    (&[2, 5, 4, 5], "Serial Number"),
    (&[2, 5, 4, 6], "Country Name (C)"),
    (&[2, 5, 4, 7], "Locality Name (L)"),
    (&[2, 5, 4, 8], "State or Province Name (S)"),
    (&[2, 5, 4, 9], "Street Address (ST)"),
    (&[2, 5, 4, 10], "Organization Name (O)"),
    (&[2, 5, 4, 11], "Organizational Unit Name (OU)"),
    (&[2, 5, 4, 12], "Title"),
    (&[2, 5, 4, 13], "Description"),
    (&[2, 5, 4, 14], "Search Guide"),

    (&[2, 5, 29, 14], "Subject Key Identifier"),                 // 2.5.29.14
    (&[2, 5, 29, 15], "Key Usage"),
    (&[2, 5, 29, 17], "Subject Alternative Name"),
    (&[2, 5, 29, 19], "Basic Constraints"),
    (&[2, 5, 29, 31], "CRL Distribution Points"),
    (&[2, 5, 29, 32], "Certificate Policies"),
    (&[2, 5, 29, 35], "Authority Key Identifier"),
    (&[2, 5, 29, 37], "Extended Key Usage"),

    (&[1, 3, 132, 0], "Certicom Curve"),                         // 1.3.132.0
    (&[1, 3, 132, 0, 1], "Certicom Curve ANSI T163k1"),
    (&[1, 3, 132, 0, 2], "Certicom Curve ANSI T163r1"),
    (&[1, 3, 132, 0, 3], "Certicom Curve ANSI T239k1"),
    (&[1, 3, 132, 0, 4], "Certicom Curve SEC T113r1"),
    (&[1, 3, 132, 0, 5], "Certicom Curve SEC T113r2"),
    (&[1, 3, 132, 0, 6], "Certicom Curve SEC P112r1"),
    (&[1, 3, 132, 0, 7], "Certicom Curve SEC P112r2"),
    (&[1, 3, 132, 0, 8], "Certicom Curve ANSI P160r1"),
    (&[1, 3, 132, 0, 9], "Certicom Curve ANSI P160k2"),
    (&[1, 3, 132, 0, 10], "Certicom Curve ANSI P256k1"),
    (&[1, 3, 132, 0, 15], "Certicom Curve ANSI T163r2"),
    (&[1, 3, 132, 0, 16], "Certicom Curve ANSI T283k1"),
    (&[1, 3, 132, 0, 17], "Certicom Curve ANSI T283r1"),
    (&[1, 3, 132, 0, 22], "Certicom Curve SEC T131r1"),
    (&[1, 3, 132, 0, 23], "Certicom Curve SEC T131r2"),
    (&[1, 3, 132, 0, 24], "Certicom Curve ANSI T193r1"),
    (&[1, 3, 132, 0, 25], "Certicom Curve ANSI T193r2"),
    (&[1, 3, 132, 0, 26], "Certicom Curve ANSI T233k1"),
    (&[1, 3, 132, 0, 27], "Certicom Curve ANSI T233r1"),
    (&[1, 3, 132, 0, 28], "Certicom Curve SEC P128r1"),
    (&[1, 3, 132, 0, 29], "Certicom Curve SEC P128r2"),
    (&[1, 3, 132, 0, 30], "Certicom Curve ANSI P160r2"),
    (&[1, 3, 132, 0, 31], "Certicom Curve ANSI P192k1"),
    (&[1, 3, 132, 0, 32], "Certicom Curve ANSI P224k1"),
    (&[1, 3, 132, 0, 33], "Certicom Curve ANSI P224r1"),
    (&[1, 3, 132, 0, 34], "Certicom Curve ANSI P384r1"),
    (&[1, 3, 132, 0, 35], "Certicom Curve ANSI P521r1"),
    (&[1, 3, 132, 0, 36], "Certicom Curve ANSI T409k1"),
    (&[1, 3, 132, 0, 37], "Certicom Curve ANSI T409r1"),
    (&[1, 3, 132, 0, 38], "Certicom Curve ANSI T571k1"),
    (&[1, 3, 132, 0, 39], "Certicom Curve ANSI T571r1"),
];

static NAME_ROOT: LazyLock<NameNode> = LazyLock::new(|| {
    let mut root = NameNode::new();
    for (path, name) in KNOWN_OID_NAMES {
        root.register(path, name);
    }

    root
});

/// Returns the registered display name for `oid`, walking the prefix tree.
/// Interior nodes without a registered name answer `None`.
pub fn known_oid_name(oid: &Oid) -> Option<&'static str> {
    NAME_ROOT.find(oid.ids())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use std::str::FromStr;

    use super::*;

    #[rstest(ids, expected,
        case(vec![2, 5, 4, 6], vec![0x55, 0x04, 0x06]),
        case(vec![1, 2, 840, 113549, 1, 1, 5], vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x05]),
        case(vec![0, 9, 2342, 19200300, 100, 1, 1], vec![0x09, 0x92, 0x26, 0x89, 0x93, 0xf2, 0x2c, 0x64, 0x01, 0x01]),
        case(vec![1, 3, 132, 0, 34], vec![0x2b, 0x81, 0x04, 0x00, 0x22]),
    )]
    fn test_oid_content_encoding(ids: Vec<u64>, expected: Vec<u8>) {
        let oid = Oid::new(ids);
        let mut buffer = vec![0u8; 100];
        let next = oid.write_content_to(&mut buffer, 0).unwrap();
        assert_eq!(expected, buffer[..next]);
        assert_eq!(expected.len(), oid.content_length());

        let (parsed, read_next) = Oid::read_content_from(&buffer, 0, next).unwrap();
        assert_eq!(next, read_next);
        assert_eq!(oid, parsed);
    }

    #[rstest(ids,
        case(vec![1]),
        case(vec![3, 1]),
        case(vec![1, 40]),
    )]
    fn test_oid_validation(ids: Vec<u64>) {
        let oid = Oid::new(ids);
        let mut buffer = vec![0u8; 10];
        assert!(oid.write_content_to(&mut buffer, 0).is_err());
    }

    #[test]
    fn test_oid_display_and_from_str() {
        let oid = Oid::from_str("1.2.840.113549.1.1.11").unwrap();
        assert_eq!("1.2.840.113549.1.1.11", oid.to_string());
        assert_eq!(Oid::new(vec![1, 2, 840, 113549, 1, 1, 11]), oid);
        assert!(Oid::from_str("1.2.x").is_err());
    }

    #[test]
    fn test_oid_child() {
        let base = Oid::new(vec![1, 2, 840, 10045]);
        assert_eq!(
            Oid::new(vec![1, 2, 840, 10045, 3, 1, 7]),
            base.child(&[3, 1, 7])
        );
    }

    #[rstest(ids, expected,
        case(vec![2, 5, 4, 6], Some("Country Name (C)")),
        case(vec![1, 2, 840, 10045, 2, 1], Some("EC Public Key")),
        case(vec![1, 2, 840, 113549, 1, 1, 11], Some("SHA256 with RSA")),
        case(vec![2, 5, 29, 19], Some("Basic Constraints")),
        case(vec![1, 3, 132, 0, 35], Some("Certicom Curve ANSI P521r1")),
        // Registered prefixes without a name of their own.
        case(vec![1, 2], None),
        case(vec![2, 5], None),
        case(vec![1, 3, 132], None),
        // Unregistered.
        case(vec![1, 2, 3, 4], None),
    )]
    fn test_known_oid_name(ids: Vec<u64>, expected: Option<&str>) {
        assert_eq!(expected, known_oid_name(&Oid::new(ids)));
    }
}
