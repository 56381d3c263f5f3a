//! Single-block LEA encryption/decryption and the keyed cipher.

use crate::batch::{process_blocks, BatchConfig, BatchOutcome};
use crate::block::{load_state, store_state, xor_in_place, Block, BLOCK_BYTES};
use crate::error::{Error, Result};
use crate::key::{expand_key, KeySize, RoundKeys};
use crate::round::{BlockTransform, Direction, Forward, Inverse};

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    store_state(&Forward::transform(load_state(block), round_keys))
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    store_state(&Inverse::transform(load_state(block), round_keys))
}

/// LEA keyed with a 128, 192 or 256-bit key.
///
/// Holds only the expanded schedule, which is wiped when the value is
/// dropped. The value is immutable after construction and can be shared
/// between threads.
#[derive(Clone, Debug)]
pub struct Lea {
    round_keys: RoundKeys,
}

impl Lea {
    /// Expands `key` (16, 24 or 32 bytes).
    pub fn new(key: &[u8]) -> Result<Self> {
        let round_keys = expand_key(key)?;
        log::debug!(
            "LEA key set: {:?}, {} rounds",
            round_keys.key_size(),
            round_keys.rounds()
        );
        Ok(Self { round_keys })
    }

    /// Key size this instance was built from.
    pub fn key_size(&self) -> KeySize {
        self.round_keys.key_size()
    }

    /// Number of rounds.
    pub fn rounds(&self) -> usize {
        self.round_keys.rounds()
    }

    /// Expanded round keys.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts one block.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_block(block, &self.round_keys)
    }

    /// Decrypts one block.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_block(block, &self.round_keys)
    }

    /// Runs a batch call; see [`process_blocks`].
    pub fn process_blocks(
        &self,
        config: &BatchConfig,
        input: &[u8],
        xor: Option<&[u8]>,
        output: &mut [u8],
    ) -> Result<BatchOutcome> {
        process_blocks(&self.round_keys, config, input, xor, output)
    }

    /// Runs a batch call into a freshly allocated buffer of `blocks` blocks.
    ///
    /// Without counter fusion `blocks` must agree with the input length.
    /// A count whose byte length overflows `usize` is rejected.
    pub fn process_blocks_vec(
        &self,
        config: &BatchConfig,
        input: &[u8],
        xor: Option<&[u8]>,
        blocks: usize,
    ) -> Result<(Vec<u8>, BatchOutcome)> {
        let len = blocks
            .checked_mul(BLOCK_BYTES)
            .ok_or(Error::InvalidBlockCount {
                buffer: "output",
                len: blocks,
                expected: "a block count whose byte length fits in usize",
            })?;
        let mut output = vec![0u8; len];
        let outcome = self.process_blocks(config, input, xor, &mut output)?;
        Ok((output, outcome))
    }

    /// Encryption view sharing this schedule.
    pub fn encryptor(&self) -> Encryptor<'_> {
        Encryptor {
            round_keys: &self.round_keys,
        }
    }

    /// Decryption view sharing this schedule.
    pub fn decryptor(&self) -> Decryptor<'_> {
        Decryptor {
            round_keys: &self.round_keys,
        }
    }
}

macro_rules! directional {
    ($name:ident, $transform:ty, $direction:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug)]
        pub struct $name<'a> {
            round_keys: &'a RoundKeys,
        }

        impl $name<'_> {
            /// Transforms one block.
            pub fn process_block(&self, block: &Block) -> Block {
                store_state(&<$transform>::transform(load_state(block), self.round_keys))
            }

            /// Transforms one block and XORs `xor` into the result when given.
            pub fn process_and_xor_block(&self, block: &Block, xor: Option<&Block>) -> Block {
                let mut out = self.process_block(block);
                if let Some(xor) = xor {
                    xor_in_place(&mut out, xor);
                }
                out
            }

            /// Runs a batch call in this direction.
            ///
            /// The direction stored in `config` is replaced by this view's.
            pub fn process_blocks(
                &self,
                config: &BatchConfig,
                input: &[u8],
                xor: Option<&[u8]>,
                output: &mut [u8],
            ) -> Result<BatchOutcome> {
                let config = config.with_direction($direction);
                process_blocks(self.round_keys, &config, input, xor, output)
            }
        }
    };
}

directional!(
    Encryptor,
    Forward,
    Direction::Encrypt,
    "Encryption direction of a [`Lea`] instance."
);
directional!(
    Decryptor,
    Inverse,
    Direction::Decrypt,
    "Decryption direction of a [`Lea`] instance."
);
