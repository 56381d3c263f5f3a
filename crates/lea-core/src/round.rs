//! LEA round transformations.
//!
//! Each direction is a zero-sized type implementing [`BlockTransform`]. The
//! scalar form works on one [`State`]; the lane form works on `N` blocks at
//! once, stored word-major so that every step is a uniform per-lane
//! add/rotate/xor the compiler can vectorize.

use crate::block::State;
use crate::consts::{ROT0, ROT1, ROT2};
use crate::key::{RoundKey, RoundKeys};

/// `N` block states stored word-major: `lanes[w][b]` is word `w` of block `b`.
pub type Lanes<const N: usize> = [[u32; N]; 4];

/// Direction of a block transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Forward cipher.
    Encrypt,
    /// Inverse cipher.
    Decrypt,
}

/// A single-round transform together with the order it consumes round keys in.
pub trait BlockTransform {
    /// Direction this transform implements.
    const DIRECTION: Direction;

    /// Applies one round to a single state.
    fn apply(state: State, rk: &RoundKey) -> State;

    /// Applies one round to `N` states at once.
    fn apply_lanes<const N: usize>(lanes: &mut Lanes<N>, rk: &RoundKey);

    /// Runs every round over a single state.
    #[inline]
    fn transform(mut state: State, round_keys: &RoundKeys) -> State {
        match Self::DIRECTION {
            Direction::Encrypt => {
                for rk in round_keys.as_slice() {
                    state = Self::apply(state, rk);
                }
            }
            Direction::Decrypt => {
                for rk in round_keys.as_slice().iter().rev() {
                    state = Self::apply(state, rk);
                }
            }
        }
        state
    }

    /// Runs every round over `N` states at once.
    #[inline]
    fn transform_lanes<const N: usize>(lanes: &mut Lanes<N>, round_keys: &RoundKeys) {
        match Self::DIRECTION {
            Direction::Encrypt => {
                for rk in round_keys.as_slice() {
                    Self::apply_lanes(lanes, rk);
                }
            }
            Direction::Decrypt => {
                for rk in round_keys.as_slice().iter().rev() {
                    Self::apply_lanes(lanes, rk);
                }
            }
        }
    }
}

/// Encryption round.
#[derive(Clone, Copy, Debug, Default)]
pub struct Forward;

/// Decryption round, the exact inverse of [`Forward`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Inverse;

impl BlockTransform for Forward {
    const DIRECTION: Direction = Direction::Encrypt;

    #[inline(always)]
    fn apply(x: State, rk: &RoundKey) -> State {
        [
            (x[0] ^ rk[0]).wrapping_add(x[1] ^ rk[1]).rotate_left(ROT0),
            (x[1] ^ rk[2]).wrapping_add(x[2] ^ rk[3]).rotate_right(ROT1),
            (x[2] ^ rk[4]).wrapping_add(x[3] ^ rk[5]).rotate_right(ROT2),
            x[0],
        ]
    }

    #[inline(always)]
    fn apply_lanes<const N: usize>(x: &mut Lanes<N>, rk: &RoundKey) {
        let mut t0 = xor_add(&x[0], rk[0], &x[1], rk[1]);
        let mut t1 = xor_add(&x[1], rk[2], &x[2], rk[3]);
        let mut t2 = xor_add(&x[2], rk[4], &x[3], rk[5]);
        rotl_lanes(&mut t0, ROT0);
        rotl_lanes(&mut t1, 32 - ROT1);
        rotl_lanes(&mut t2, 32 - ROT2);
        *x = [t0, t1, t2, x[0]];
    }
}

impl BlockTransform for Inverse {
    const DIRECTION: Direction = Direction::Decrypt;

    #[inline(always)]
    fn apply(y: State, rk: &RoundKey) -> State {
        let x0 = y[3];
        let x1 = y[0].rotate_right(ROT0).wrapping_sub(x0 ^ rk[0]) ^ rk[1];
        let x2 = y[1].rotate_left(ROT1).wrapping_sub(x1 ^ rk[2]) ^ rk[3];
        let x3 = y[2].rotate_left(ROT2).wrapping_sub(x2 ^ rk[4]) ^ rk[5];
        [x0, x1, x2, x3]
    }

    #[inline(always)]
    fn apply_lanes<const N: usize>(y: &mut Lanes<N>, rk: &RoundKey) {
        let x0 = y[3];
        let mut x1 = y[0];
        let mut x2 = y[1];
        let mut x3 = y[2];
        rotl_lanes(&mut x1, 32 - ROT0);
        rotl_lanes(&mut x2, ROT1);
        rotl_lanes(&mut x3, ROT2);
        sub_xor(&mut x1, &x0, rk[0], rk[1]);
        sub_xor(&mut x2, &x1, rk[2], rk[3]);
        sub_xor(&mut x3, &x2, rk[4], rk[5]);
        *y = [x0, x1, x2, x3];
    }
}

/// Lane-wise `(a ^ ka) + (b ^ kb)`.
#[inline(always)]
fn xor_add<const N: usize>(a: &[u32; N], ka: u32, b: &[u32; N], kb: u32) -> [u32; N] {
    let mut out = [0u32; N];
    for ((o, &a), &b) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
        *o = (a ^ ka).wrapping_add(b ^ kb);
    }
    out
}

/// Lane-wise `(v - (prev ^ ka)) ^ kb`, in place on `v`.
#[inline(always)]
fn sub_xor<const N: usize>(v: &mut [u32; N], prev: &[u32; N], ka: u32, kb: u32) {
    for (v, &p) in v.iter_mut().zip(prev.iter()) {
        *v = v.wrapping_sub(p ^ ka) ^ kb;
    }
}

#[inline(always)]
fn rotl_lanes<const N: usize>(v: &mut [u32; N], amount: u32) {
    for w in v.iter_mut() {
        *w = w.rotate_left(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::expand_key;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn inverse_undoes_forward_round() {
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        for _ in 0..1000 {
            let state: State = rng.gen();
            let rk: RoundKey = rng.gen();
            let next = Forward::apply(state, &rk);
            assert_eq!(next[3], state[0]);
            assert_eq!(Inverse::apply(next, &rk), state);
        }
    }

    #[test]
    fn forward_wraps_instead_of_overflowing() {
        let state = [u32::MAX; 4];
        let rk = [0u32; 6];
        let next = Forward::apply(state, &rk);
        assert_eq!(next[0], 0xffff_fffeu32.rotate_left(9));
        assert_eq!(next[3], u32::MAX);
        assert_eq!(Inverse::apply(next, &rk), state);
    }

    #[test]
    fn lanes_match_scalar_rounds() {
        let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
        let states: [State; 4] = rng.gen();
        let rk: RoundKey = rng.gen();

        let mut lanes: Lanes<4> = [[0; 4]; 4];
        for (b, state) in states.iter().enumerate() {
            for w in 0..4 {
                lanes[w][b] = state[w];
            }
        }

        let mut fwd = lanes;
        Forward::apply_lanes(&mut fwd, &rk);
        for (b, state) in states.iter().enumerate() {
            let expected = Forward::apply(*state, &rk);
            assert_eq!([fwd[0][b], fwd[1][b], fwd[2][b], fwd[3][b]], expected);
        }

        let mut inv = lanes;
        Inverse::apply_lanes(&mut inv, &rk);
        for (b, state) in states.iter().enumerate() {
            let expected = Inverse::apply(*state, &rk);
            assert_eq!([inv[0][b], inv[1][b], inv[2][b], inv[3][b]], expected);
        }
    }

    #[test]
    fn full_transform_round_trips() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        for len in [16, 24, 32] {
            let key: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let rks = expand_key(&key).unwrap();
            let state: State = rng.gen();
            let ct = Forward::transform(state, &rks);
            assert_ne!(ct, state);
            assert_eq!(Inverse::transform(ct, &rks), state);
        }
    }
}
