use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("insufficient buffer: need {needed} bytes, {available} available")]
    InsufficientBuffer { needed: usize, available: usize },
    #[error("truncated varint")]
    TruncatedVarint,
    #[error("varint does not terminate within {0} octets")]
    VarintTooLong(usize),
    #[error("non-canonical varint encoding")]
    NonCanonicalVarint,
    #[error("invalid fixed-length flag octet 0x{0:02x}")]
    InvalidFixedFlag(u8),
    #[error("field name is not valid UTF-8")]
    InvalidName,
    #[error("unsupported value width {0}")]
    UnsupportedWidth(usize),
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
