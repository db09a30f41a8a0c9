use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    #[error("invalid version: {0}")]
    InvalidVersion(i64),

    #[error("unexpected algorithm: {0}")]
    UnexpectedAlgorithm(String),

    #[error("ASN.1 decode error: {0}")]
    Asn1(#[from] asn1::Error),

    #[error("PEM decode error: {0}")]
    Pem(#[from] pem::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
