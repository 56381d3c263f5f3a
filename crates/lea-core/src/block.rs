//! Block representation helpers.

/// LEA block of 16 bytes.
pub type Block = [u8; 16];

/// Block size in bytes.
pub const BLOCK_BYTES: usize = 16;

/// Working state of one block: four little-endian 32-bit words `X0..X3`.
pub type State = [u32; 4];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Decodes a block into its state words.
#[inline]
pub fn load_state(block: &Block) -> State {
    let mut state = [0u32; 4];
    for (word, chunk) in state.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    state
}

/// Encodes state words back into a block.
#[inline]
pub fn store_state(state: &State) -> Block {
    let mut block = [0u8; 16];
    for (chunk, word) in block.chunks_exact_mut(4).zip(state.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    block
}

/// Increments a block as a big-endian 128-bit integer, wrapping on overflow.
#[inline]
pub fn increment_be(counter: &mut Block) {
    let value = u128::from_be_bytes(*counter).wrapping_add(1);
    *counter = value.to_be_bytes();
}
