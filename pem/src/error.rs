use base64::DecodeError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("missing a BEGIN encapsulation boundary")]
    MissingBegin,
    #[error("unterminated PEM block")]
    UnterminatedBlock,
    #[error("BEGIN and END labels don't match: {begin} vs {end}")]
    LabelMismatch { begin: String, end: String },
    #[error("nested BEGIN boundary inside a block")]
    NestedBlock,
    #[error("base64 decode: {0}")]
    Base64Decode(#[from] DecodeError),
}
