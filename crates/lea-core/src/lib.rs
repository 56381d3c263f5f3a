//! LEA block cipher core.
//!
//! LEA is a 128-bit ARX block cipher with 128, 192 and 256-bit keys. This
//! crate provides:
//! - The key schedule for all three key sizes.
//! - Forward and inverse rounds behind the [`BlockTransform`] trait.
//! - Single-block encryption and decryption.
//! - A batch processor with XOR chaining hooks, counter fusion and
//!   lane-parallel processing of independent blocks.
//!
//! Modes of operation, padding and key derivation are left to the caller.
//! All arithmetic is branch-free and table-free; expanded keys are zeroed on
//! drop.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod block;
mod cipher;
mod consts;
mod error;
mod key;
mod round;

pub use crate::batch::{process_blocks, BatchConfig, BatchOutcome, LANES};
pub use crate::block::{increment_be, xor_in_place, Block, State, BLOCK_BYTES};
pub use crate::cipher::{decrypt_block, encrypt_block, Decryptor, Encryptor, Lea};
pub use crate::consts::{MAX_ROUNDS, ROUND_KEY_WORDS};
pub use crate::error::{Error, Result};
pub use crate::key::{expand_key, KeySize, RoundKey, RoundKeys};
pub use crate::round::{BlockTransform, Direction, Forward, Inverse, Lanes};
