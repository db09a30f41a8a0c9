use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("ASN.1 decode error: {0}")]
    Asn1(#[from] asn1::Error),

    #[error("structural mismatch: {0}")]
    Structure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
