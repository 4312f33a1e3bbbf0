//! Error types for codec operations

use thiserror::Error;

/// Error type for codec construction, encoding, decoding, and sizing.
///
/// Composite codecs return the first error produced by a child unchanged, so the
/// variant observed by a caller is the one raised by the innermost codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid type: {0}")]
    InvalidType(String),
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
    #[error("not a slice: {0}")]
    NotASlice(String),
    #[error("slice has wrong length: {0}")]
    SliceWrongLen(String),
    #[error("internal error: {0}")]
    Internal(String),
}
