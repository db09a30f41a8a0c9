use thiserror::Error;

use crate::format::KeyType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("can not parse data as DER format")]
    DerCascadeExhausted,

    #[error("wrong key type: expected {expected}, got {actual}")]
    WrongKeyType { expected: KeyType, actual: KeyType },

    #[error("PEM decode error: {0}")]
    Pem(#[from] pem::error::Error),
}
