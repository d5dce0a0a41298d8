use thiserror::Error;

use crate::Symbol;

pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Debug, Error)]
pub enum HuffmanError {
    #[error("frequency table is empty, nothing to encode")]
    EmptyInput,
    #[error("malformed tree: {0}")]
    MalformedTree(String),
    #[error("symbol {0:?} has no code in the table")]
    UnknownSymbol(Symbol),
    #[error("bitstream ended in the middle of a code after {consumed} bits")]
    TruncatedStream { consumed: usize },
    #[error("bit {position} does not lead anywhere in the tree")]
    InvalidPath { position: usize },
    #[error("expected '0' or '1' at position {position}, found {found:?}")]
    InvalidBitChar { found: char, position: usize },
    #[error("weight or bit count overflowed u64")]
    Overflow,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
