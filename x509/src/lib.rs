//! Structural holders for X.509 certificates and PKCS#10 certificate
//! requests.
//!
//! These types validate the outer shape of the encodings (the element
//! counts and tag kinds) and keep the decoded object tree for inspection.
//! Signature verification and semantic X.509 processing are out of scope.

pub mod error;

use asn1::{can_be_certificate, Asn1Object, TAG_BIT_STRING, TAG_INTEGER, TAG_SEQUENCE};
use num_bigint::BigInt;

pub use error::{Error, Result};

fn decode_single_object(data: &[u8]) -> Result<Asn1Object> {
    let (object, next) = asn1::read_object(data, 0)?;
    if next != data.len() {
        return Err(Error::Asn1(asn1::Error::NotAllParsed {
            parsed: next,
            total: data.len(),
        }));
    }

    Ok(object)
}

/// A decoded object that passed the certificate shape check:
/// `SEQUENCE { tbsCertificate, signatureAlgorithm, signature }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    object: Asn1Object,
}

impl Certificate {
    pub fn from_object(object: Asn1Object) -> Result<Certificate> {
        can_be_certificate(&object)?;
        Ok(Certificate { object })
    }

    pub fn from_der(data: &[u8]) -> Result<Certificate> {
        Certificate::from_object(decode_single_object(data)?)
    }

    pub fn object(&self) -> &Asn1Object {
        &self.object
    }

    fn children(&self) -> &[Asn1Object] {
        match &self.object {
            Asn1Object::Sequence(children) => children,
            // from_object only admits sequences
            _ => &[],
        }
    }

    pub fn tbs_certificate(&self) -> &Asn1Object {
        &self.children()[0]
    }

    pub fn signature_algorithm(&self) -> &Asn1Object {
        &self.children()[1]
    }

    pub fn signature(&self) -> &Asn1Object {
        &self.children()[2]
    }

    /// The serial number from the TBSCertificate, when it is present as a
    /// plain INTEGER.
    pub fn serial_number(&self) -> Option<&BigInt> {
        let Asn1Object::Sequence(tbs) = self.tbs_certificate() else {
            return None;
        };

        match tbs.get(1) {
            Some(Asn1Object::Integer(serial)) => Some(serial),
            _ => None,
        }
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(self.object.to_der()?)
    }
}

/// Checks whether `object` has the outer shape of a PKCS#10
/// CertificationRequest: a SEQUENCE of exactly (CertificationRequestInfo,
/// AlgorithmIdentifier, signature BIT STRING), with the info sequence
/// starting (version INTEGER, subject SEQUENCE, SubjectPKInfo SEQUENCE).
pub fn can_be_certificate_request(object: &Asn1Object) -> Result<()> {
    let Asn1Object::Sequence(children) = object else {
        return Err(Error::Structure("not a sequence".to_string()));
    };

    if children.len() != 3 {
        return Err(Error::Structure(format!(
            "invalid number of elements: {}",
            children.len()
        )));
    }

    let expected = [TAG_SEQUENCE, TAG_SEQUENCE, TAG_BIT_STRING];
    for (i, &number) in expected.iter().enumerate() {
        let tag = children[i].tag();
        if tag.number != number {
            return Err(Error::Structure(format!(
                "invalid tag {} on index {}",
                tag, i
            )));
        }
    }

    let Asn1Object::Sequence(info) = &children[0] else {
        return Err(Error::Structure(
            "CertificationRequestInfo is not a sequence".to_string(),
        ));
    };

    if info.len() < 3 {
        return Err(Error::Structure(format!(
            "invalid number of elements in CertificationRequestInfo: {}",
            info.len()
        )));
    }

    let expected = [TAG_INTEGER, TAG_SEQUENCE, TAG_SEQUENCE];
    for (i, &number) in expected.iter().enumerate() {
        let tag = info[i].tag();
        if tag.number != number {
            return Err(Error::Structure(format!(
                "invalid tag {} on index {} of CertificationRequestInfo",
                tag, i
            )));
        }
    }

    Ok(())
}

/// A decoded object that passed the certificate request shape check.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateRequest {
    object: Asn1Object,
}

impl CertificateRequest {
    pub fn from_object(object: Asn1Object) -> Result<CertificateRequest> {
        can_be_certificate_request(&object)?;
        Ok(CertificateRequest { object })
    }

    pub fn from_der(data: &[u8]) -> Result<CertificateRequest> {
        CertificateRequest::from_object(decode_single_object(data)?)
    }

    pub fn object(&self) -> &Asn1Object {
        &self.object
    }

    fn children(&self) -> &[Asn1Object] {
        match &self.object {
            Asn1Object::Sequence(children) => children,
            _ => &[],
        }
    }

    pub fn info(&self) -> &Asn1Object {
        &self.children()[0]
    }

    pub fn signature_algorithm(&self) -> &Asn1Object {
        &self.children()[1]
    }

    pub fn signature(&self) -> &Asn1Object {
        &self.children()[2]
    }
}
