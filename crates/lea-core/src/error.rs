//! Error type shared by the key schedule and the batch processor.

use thiserror::Error;

/// Errors reported by the cipher core.
///
/// Every variant is a caller precondition violation; nothing here is transient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Key length is not 16, 24 or 32 bytes.
    #[error("invalid key length {0}, expected 16, 24 or 32 bytes")]
    InvalidKeyLength(usize),

    /// A buffer length does not describe a whole number of blocks, or buffers disagree.
    #[error("invalid block count: {buffer} buffer is {len} bytes, expected {expected}")]
    InvalidBlockCount {
        /// Which buffer was rejected (`input`, `xor` or `output`).
        buffer: &'static str,
        /// Length that was supplied.
        len: usize,
        /// Human-readable description of the accepted length.
        expected: &'static str,
    },

    /// Batch options that cannot be combined on one call.
    #[error("unsupported batch option combination: {0}")]
    UnsupportedFlagCombination(&'static str),
}

/// Result alias for the cipher core.
pub type Result<T> = core::result::Result<T, Error>;
