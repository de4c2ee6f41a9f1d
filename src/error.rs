//! Error types shared by the encoder and the packer.
use thiserror::Error;

/// Reasons a single source line can fail to encode.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum EncodeError {
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),

    #[error("unknown operand tag in `{0}`")]
    UnknownTag(String),

    #[error("malformed literal in operand `{operand}`: {reason}")]
    MalformedLiteral { operand: String, reason: LiteralError },

    #[error("no addresses left for the line, counter at {0}")]
    AddressOverflow(u32),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum LiteralError {
    #[error("missing value after tag")]
    Missing,
    #[error("not a non-negative decimal integer")]
    NotDecimal,
    #[error("value exceeds 65535")]
    OutOfRange,
}

/// An encode error bound to the 1-based source line it came from.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
#[error("line {line}: {kind}")]
pub struct LineError {
    pub line: usize,
    pub kind: EncodeError,
}

/// Failures while packing a listing. Every variant is fatal to the run.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum PackError {
    #[error("malformed row on line {line}: {reason} (`{text}`)")]
    MalformedRow {
        line: usize,
        text: String,
        reason: RowError,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum RowError {
    #[error("expected address, value and annotation fields")]
    MissingFields,
    #[error("bit fields must be two groups of four binary digits")]
    InvalidBits,
}
