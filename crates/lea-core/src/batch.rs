//! Multi-block processing.
//!
//! A [`BatchConfig`] says which direction to run and how the secondary XOR
//! stream and the counter are applied. When the blocks are declared
//! independent the processor pushes [`LANES`] blocks at a time through the
//! lane-wide round functions and finishes any ragged tail one block at a
//! time; the two paths produce identical output.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{increment_be, load_state, store_state, xor_in_place, Block, BLOCK_BYTES};
use crate::error::{Error, Result};
use crate::key::RoundKeys;
use crate::round::{BlockTransform, Direction, Forward, Inverse, Lanes};

/// Blocks processed together on the lane-wide path.
pub const LANES: usize = 4;

/// Options for one batch call.
///
/// Built with the chained setters and checked by [`BatchConfig::validate`]
/// before any block is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BatchConfig {
    direction: Direction,
    xor_input: bool,
    xor_output: bool,
    counter: bool,
    parallel: bool,
}

impl BatchConfig {
    /// Plain sequential processing in `direction`.
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            xor_input: false,
            xor_output: false,
            counter: false,
            parallel: false,
        }
    }

    /// Shorthand for `BatchConfig::new(Direction::Encrypt)`.
    pub const fn encrypt() -> Self {
        Self::new(Direction::Encrypt)
    }

    /// Shorthand for `BatchConfig::new(Direction::Decrypt)`.
    pub const fn decrypt() -> Self {
        Self::new(Direction::Decrypt)
    }

    /// Same options, run in `direction` instead.
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// XOR each input block with the secondary stream before the transform.
    pub const fn xor_input(mut self, on: bool) -> Self {
        self.xor_input = on;
        self
    }

    /// XOR each transformed block with the secondary stream.
    pub const fn xor_output(mut self, on: bool) -> Self {
        self.xor_output = on;
        self
    }

    /// Treat the input as one big-endian counter block, incremented per position.
    pub const fn counter(mut self, on: bool) -> Self {
        self.counter = on;
        self
    }

    /// Declare the blocks independent so they may be processed in lanes.
    pub const fn parallel(mut self, on: bool) -> Self {
        self.parallel = on;
        self
    }

    /// Direction of the transform.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the secondary stream is folded into the input.
    pub const fn is_xor_input(&self) -> bool {
        self.xor_input
    }

    /// Whether the secondary stream is folded into the output.
    pub const fn is_xor_output(&self) -> bool {
        self.xor_output
    }

    /// Whether counter fusion is on.
    pub const fn is_counter(&self) -> bool {
        self.counter
    }

    /// Whether lane batching is permitted.
    pub const fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Whether the call expects a secondary stream.
    pub const fn uses_xor(&self) -> bool {
        self.xor_input || self.xor_output
    }

    /// Rejects option sets with no single meaning.
    pub fn validate(&self) -> Result<()> {
        if self.counter && self.uses_xor() {
            return Err(Error::UnsupportedFlagCombination(
                "counter fusion cannot be combined with a secondary XOR stream",
            ));
        }
        Ok(())
    }
}

/// What a batch call produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Blocks written to the output buffer.
    pub blocks: usize,
    /// Counter value following the last one used, when counter fusion is on.
    pub next_counter: Option<Block>,
}

/// Working buffers of one batch call, wiped when the call returns.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
struct Scratch {
    lanes: Lanes<LANES>,
    block: Block,
}

/// Where input blocks come from.
enum Source<'a> {
    Buffer(&'a [u8]),
    Counter(Block),
}

impl Source<'_> {
    #[inline]
    fn next(&mut self, index: usize) -> Block {
        match self {
            Source::Buffer(buf) => block_at(buf, index),
            Source::Counter(counter) => {
                let current = *counter;
                increment_be(counter);
                current
            }
        }
    }
}

#[inline]
fn block_at(buf: &[u8], index: usize) -> Block {
    let mut block = [0u8; BLOCK_BYTES];
    block.copy_from_slice(&buf[index * BLOCK_BYTES..(index + 1) * BLOCK_BYTES]);
    block
}

fn check_lengths(
    config: &BatchConfig,
    input: &[u8],
    xor: Option<&[u8]>,
    output: &[u8],
) -> Result<()> {
    if output.len() % BLOCK_BYTES != 0 {
        return Err(Error::InvalidBlockCount {
            buffer: "output",
            len: output.len(),
            expected: "a multiple of 16",
        });
    }
    if config.is_counter() {
        if input.len() != BLOCK_BYTES {
            return Err(Error::InvalidBlockCount {
                buffer: "input",
                len: input.len(),
                expected: "exactly one 16-byte counter block",
            });
        }
    } else if input.len() != output.len() {
        return Err(Error::InvalidBlockCount {
            buffer: "input",
            len: input.len(),
            expected: "the output length",
        });
    }
    match (config.uses_xor(), xor) {
        (true, Some(xor)) if xor.len() != output.len() => Err(Error::InvalidBlockCount {
            buffer: "xor",
            len: xor.len(),
            expected: "the output length",
        }),
        (true, None) => Err(Error::UnsupportedFlagCombination(
            "XOR option set without a secondary stream",
        )),
        (false, Some(_)) => Err(Error::UnsupportedFlagCombination(
            "secondary stream supplied without an XOR option",
        )),
        _ => Ok(()),
    }
}

/// Processes `output.len() / 16` blocks.
///
/// `input` is either as long as `output` or, with counter fusion, a single
/// 16-byte counter block. `xor` must be present exactly when one of the XOR
/// options is set and must match the output length.
pub fn process_blocks(
    round_keys: &RoundKeys,
    config: &BatchConfig,
    input: &[u8],
    xor: Option<&[u8]>,
    output: &mut [u8],
) -> Result<BatchOutcome> {
    config.validate()?;
    check_lengths(config, input, xor, output)?;

    match config.direction() {
        Direction::Encrypt => Ok(run::<Forward>(round_keys, config, input, xor, output)),
        Direction::Decrypt => Ok(run::<Inverse>(round_keys, config, input, xor, output)),
    }
}

fn run<T: BlockTransform>(
    round_keys: &RoundKeys,
    config: &BatchConfig,
    input: &[u8],
    xor: Option<&[u8]>,
    output: &mut [u8],
) -> BatchOutcome {
    let blocks = output.len() / BLOCK_BYTES;
    let mut source = if config.is_counter() {
        Source::Counter(block_at(input, 0))
    } else {
        Source::Buffer(input)
    };
    let xor_in = if config.is_xor_input() { xor } else { None };
    let xor_out = if config.is_xor_output() { xor } else { None };

    let groups = if config.is_parallel() { blocks / LANES } else { 0 };
    log::trace!(
        "batch {:?}: {} blocks, {} lane groups, {} sequential",
        T::DIRECTION,
        blocks,
        groups,
        blocks - groups * LANES
    );

    let mut scratch = Scratch::default();
    for group in 0..groups {
        let first = group * LANES;
        for lane in 0..LANES {
            scratch.block = source.next(first + lane);
            if let Some(xor) = xor_in {
                xor_in_place(&mut scratch.block, &block_at(xor, first + lane));
            }
            let state = load_state(&scratch.block);
            for (word, value) in scratch.lanes.iter_mut().zip(state) {
                word[lane] = value;
            }
        }

        T::transform_lanes(&mut scratch.lanes, round_keys);

        for lane in 0..LANES {
            let index = first + lane;
            let lanes = &scratch.lanes;
            let state = [lanes[0][lane], lanes[1][lane], lanes[2][lane], lanes[3][lane]];
            scratch.block = store_state(&state);
            if let Some(xor) = xor_out {
                xor_in_place(&mut scratch.block, &block_at(xor, index));
            }
            output[index * BLOCK_BYTES..(index + 1) * BLOCK_BYTES].copy_from_slice(&scratch.block);
        }
        scratch.lanes.zeroize();
    }

    for index in groups * LANES..blocks {
        scratch.block = source.next(index);
        if let Some(xor) = xor_in {
            xor_in_place(&mut scratch.block, &block_at(xor, index));
        }
        scratch.block = store_state(&T::transform(load_state(&scratch.block), round_keys));
        if let Some(xor) = xor_out {
            xor_in_place(&mut scratch.block, &block_at(xor, index));
        }
        output[index * BLOCK_BYTES..(index + 1) * BLOCK_BYTES].copy_from_slice(&scratch.block);
    }

    BatchOutcome {
        blocks,
        next_counter: match source {
            Source::Counter(counter) => Some(counter),
            Source::Buffer(_) => None,
        },
    }
}
