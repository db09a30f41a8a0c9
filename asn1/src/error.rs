use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("insufficient buffer: need {needed} bytes, {available} available")]
    InsufficientBuffer { needed: usize, available: usize },
    #[error("invalid length octet 0x{0:02x}")]
    InvalidLengthOctet(u8),
    #[error("truncated long-form tag at byte {0}")]
    InvalidTagLongForm(usize),
    #[error("indefinite length is not supported")]
    IndefiniteLength,
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
    #[error("not all data parsed: {parsed}/{total} bytes")]
    NotAllParsed { parsed: usize, total: usize },
    #[error("invalid object identifier: {0}")]
    InvalidObjectIdentifier(String),
    #[error("invalid bit string: {0}")]
    InvalidBitString(String),
    #[error("invalid printable string: {0}")]
    InvalidPrintableString(String),
    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),
}

pub(crate) fn check_buffer(len: usize, offset: usize, needed: usize) -> Result<(), Error> {
    if offset + needed > len {
        return Err(Error::InsufficientBuffer {
            needed,
            available: len.saturating_sub(offset),
        });
    }

    Ok(())
}
