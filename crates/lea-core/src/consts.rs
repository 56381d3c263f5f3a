//! LEA constants.

/// Round-delta words `δ[0..8]`.
pub(crate) const DELTA: [u32; 8] = [
    0xc3ef_e9db,
    0x4462_6b02,
    0x79e2_7c8a,
    0x78df_30ec,
    0x715e_a49e,
    0xc785_da0a,
    0xe04e_f22a,
    0xe5c4_0957,
];

/// Left rotations applied to the key-schedule working words, by position within a round.
pub(crate) const KEY_ROT: [u32; 6] = [1, 3, 6, 11, 13, 17];

/// Number of round-key words consumed by one round.
pub const ROUND_KEY_WORDS: usize = 6;

/// Largest round count over all key sizes.
pub const MAX_ROUNDS: usize = 32;

/// Round rotation for `X0'` (left).
pub(crate) const ROT0: u32 = 9;
/// Round rotation for `X1'` (right).
pub(crate) const ROT1: u32 = 5;
/// Round rotation for `X2'` (right).
pub(crate) const ROT2: u32 = 3;
