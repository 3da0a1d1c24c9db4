use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CodecError {
    #[error("Truncated {what}: expected at least {expected} bytes, got {actual}")]
    Truncated {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{trailing} trailing bytes after the package payload")]
    TrailingBytes { trailing: usize },
    #[error("Unknown package type {0}")]
    UnknownPackageType(u8),
    #[error("Package payload is empty")]
    EmptyPayload,
    #[error("Package payload is shorter than its RLP header declares")]
    TruncatedPayload,
    #[error("Invalid RLP payload: {0}")]
    Rlp(String),
}

impl From<rlp::DecoderError> for CodecError {
    fn from(e: rlp::DecoderError) -> Self {
        Self::Rlp(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
