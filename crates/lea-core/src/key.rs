//! Key sizes and the LEA key schedule.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::{DELTA, KEY_ROT, MAX_ROUNDS, ROUND_KEY_WORDS};
use crate::error::{Error, Result};

/// Round-key words consumed by one round.
pub type RoundKey = [u32; ROUND_KEY_WORDS];

/// Supported LEA key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key, 24 rounds.
    Lea128,
    /// 192-bit key, 28 rounds.
    Lea192,
    /// 256-bit key, 32 rounds.
    Lea256,
}

impl KeySize {
    /// Classifies a raw key length in bytes.
    pub fn from_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(Self::Lea128),
            24 => Ok(Self::Lea192),
            32 => Ok(Self::Lea256),
            other => Err(Error::InvalidKeyLength(other)),
        }
    }

    /// Key length in bytes.
    pub const fn key_bytes(self) -> usize {
        self.key_words() * 4
    }

    /// Key length in 32-bit words.
    pub const fn key_words(self) -> usize {
        match self {
            Self::Lea128 => 4,
            Self::Lea192 => 6,
            Self::Lea256 => 8,
        }
    }

    /// Number of rounds.
    pub const fn rounds(self) -> usize {
        match self {
            Self::Lea128 => 24,
            Self::Lea192 => 28,
            Self::Lea256 => 32,
        }
    }
}

/// Expanded round keys, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys {
    keys: [RoundKey; MAX_ROUNDS],
    #[zeroize(skip)]
    key_size: KeySize,
}

impl RoundKeys {
    /// Returns the round key at the requested index (`0..rounds()`).
    #[inline]
    pub fn get(&self, round: usize) -> &RoundKey {
        &self.keys[..self.rounds()][round]
    }

    /// Round keys in encryption order.
    #[inline]
    pub fn as_slice(&self) -> &[RoundKey] {
        &self.keys[..self.rounds()]
    }

    /// Number of rounds in the schedule.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.key_size.rounds()
    }

    /// Key size the schedule was expanded from.
    #[inline]
    pub fn key_size(&self) -> KeySize {
        self.key_size
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundKeys")
            .field("key_size", &self.key_size)
            .finish_non_exhaustive()
    }
}

#[inline(always)]
fn step(word: u32, delta: u32, shift: usize, rot: u32) -> u32 {
    word.wrapping_add(delta.rotate_left(shift as u32 % 32))
        .rotate_left(rot)
}

/// Expands a 16, 24 or 32-byte key into its round keys.
pub fn expand_key(key: &[u8]) -> Result<RoundKeys> {
    let key_size = KeySize::from_len(key.len())?;

    let mut t = [0u32; 8];
    for (word, chunk) in t.iter_mut().zip(key.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    let mut keys = [[0u32; ROUND_KEY_WORDS]; MAX_ROUNDS];
    let rounds = key_size.rounds();
    match key_size {
        KeySize::Lea128 => {
            for (i, rk) in keys[..rounds].iter_mut().enumerate() {
                let delta = DELTA[i % 4];
                for (j, (word, rot)) in t[..4].iter_mut().zip(KEY_ROT).enumerate() {
                    *word = step(*word, delta, i + j, rot);
                }
                *rk = [t[0], t[1], t[2], t[1], t[3], t[1]];
            }
        }
        KeySize::Lea192 => {
            for (i, rk) in keys[..rounds].iter_mut().enumerate() {
                let delta = DELTA[i % 6];
                for (j, (word, rot)) in t[..6].iter_mut().zip(KEY_ROT).enumerate() {
                    *word = step(*word, delta, i + j, rot);
                }
                rk.copy_from_slice(&t[..6]);
            }
        }
        KeySize::Lea256 => {
            for (i, rk) in keys[..rounds].iter_mut().enumerate() {
                let delta = DELTA[i % 8];
                for (j, (slot, rot)) in rk.iter_mut().zip(KEY_ROT).enumerate() {
                    let p = (6 * i + j) % 8;
                    t[p] = step(t[p], delta, i + j, rot);
                    *slot = t[p];
                }
            }
        }
    }
    t.zeroize();

    let round_keys = RoundKeys { keys, key_size };
    keys.zeroize();
    Ok(round_keys)
}
