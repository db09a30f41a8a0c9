//! Shape-based classification of decoded ASN.1 objects.

use crate::error::Error;
use crate::object::Asn1Object;
use crate::tag::{
    tag_number_name, TAG_BIT_STRING, TAG_INTEGER, TAG_RESERVED0, TAG_SEQUENCE,
};

fn check_sequence_element_types(
    objects: &[Asn1Object],
    tag_numbers: &[u64],
) -> Result<(), Error> {
    for (i, &number) in tag_numbers.iter().enumerate() {
        let tag = objects[i].tag();
        if tag.number != number {
            return Err(Error::StructuralMismatch(format!(
                "invalid tag {} on index {}, expected {}",
                tag,
                i,
                tag_number_name(number)
            )));
        }
    }

    Ok(())
}

/// Checks whether `object` has the outer shape of an X.509 Certificate:
/// a SEQUENCE of exactly (TBSCertificate, AlgorithmIdentifier, signature
/// BIT STRING), where the TBSCertificate is a SEQUENCE of at least seven
/// elements starting with the `[0]` version, the serial INTEGER and five
/// SEQUENCEs. No cryptographic or temporal validation happens here.
pub fn can_be_certificate(object: &Asn1Object) -> Result<(), Error> {
    let Asn1Object::Sequence(children) = object else {
        return Err(Error::StructuralMismatch("not a sequence".to_string()));
    };

    if children.len() != 3 {
        return Err(Error::StructuralMismatch(format!(
            "invalid number of elements: {}",
            children.len()
        )));
    }

    check_sequence_element_types(children, &[TAG_SEQUENCE, TAG_SEQUENCE, TAG_BIT_STRING])?;

    let Asn1Object::Sequence(tbs) = &children[0] else {
        return Err(Error::StructuralMismatch(
            "TBSCertificate is not a sequence".to_string(),
        ));
    };

    if tbs.len() < 7 {
        return Err(Error::StructuralMismatch(format!(
            "invalid number of elements in TBSCertificate: {}",
            tbs.len()
        )));
    }

    check_sequence_element_types(
        tbs,
        &[
            TAG_RESERVED0,
            TAG_INTEGER,
            TAG_SEQUENCE,
            TAG_SEQUENCE,
            TAG_SEQUENCE,
            TAG_SEQUENCE,
            TAG_SEQUENCE,
        ],
    )?;

    Ok(())
}
