//! Command-line interface for the LEA block cipher core.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, Subcommand};
use lea_core::{BatchConfig, Block, Lea, BLOCK_BYTES};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

const KAT_KEY: &str = "0f1e2d3c4b5a69788796a5b4c3d2e1f0";
const KAT_PLAIN: &str = "101112131415161718191a1b1c1d1e1f";
const KAT_CIPHER: &str = "9fc84e3528c6c6185532c7a704648bfd";

/// LEA block cipher CLI.
#[derive(Parser)]
#[command(name = "lea", version, author, about = "LEA-128/192/256 block cipher CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file block by block (length must be a multiple of 16 bytes).
    Encrypt {
        /// Key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input plaintext path.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt a file produced by `encrypt`.
    Decrypt {
        /// Key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input ciphertext path.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Encrypt successive counter values starting at a base block.
    Keystream {
        /// Key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Initial counter block as 32 hex characters (big-endian).
        #[arg(long, value_name = "HEX")]
        counter_hex: String,
        /// Number of blocks to produce.
        #[arg(long)]
        blocks: usize,
        /// Write raw bytes here instead of printing hex.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Check the known-answer vector and batch/single-block agreement.
    Selftest {
        /// Number of random samples per key size.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key, encrypt random data, decrypt back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Encrypt {
            key_hex,
            input,
            output,
        } => cmd_blocks(&key_hex, &input, &output, BatchConfig::encrypt()),
        Commands::Decrypt {
            key_hex,
            input,
            output,
        } => cmd_blocks(&key_hex, &input, &output, BatchConfig::decrypt()),
        Commands::Keystream {
            key_hex,
            counter_hex,
            blocks,
            output,
        } => cmd_keystream(&key_hex, &counter_hex, blocks, output.as_deref()),
        Commands::Selftest { samples, seed } => cmd_selftest(samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_blocks(
    key_hex: &str,
    input_path: &Path,
    output_path: &Path,
    config: BatchConfig,
) -> Result<()> {
    let cipher = parse_key_hex(key_hex)?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    if data.len() % BLOCK_BYTES != 0 {
        bail!("input length must be a multiple of {BLOCK_BYTES} bytes");
    }
    let mut out = vec![0u8; data.len()];
    cipher
        .process_blocks(&config.parallel(true), &data, None, &mut out)
        .context("process blocks")?;
    fs::write(output_path, out).with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_keystream(
    key_hex: &str,
    counter_hex: &str,
    blocks: usize,
    output_path: Option<&Path>,
) -> Result<()> {
    let cipher = parse_key_hex(key_hex)?;
    let counter = parse_block_hex(counter_hex).context("parse counter")?;
    let config = BatchConfig::encrypt().counter(true).parallel(true);
    let (stream, outcome) = cipher
        .process_blocks_vec(&config, &counter, None, blocks)
        .context("generate keystream")?;
    match output_path {
        Some(path) => {
            fs::write(path, &stream).with_context(|| format!("write {}", path.display()))?
        }
        None => {
            for chunk in stream.chunks_exact(BLOCK_BYTES) {
                println!("{}", hex::encode(chunk));
            }
        }
    }
    if let Some(next) = outcome.next_counter {
        eprintln!("next counter: {}", hex::encode(next));
    }
    Ok(())
}

fn cmd_selftest(samples: usize, seed: Option<u64>) -> Result<()> {
    let cipher = parse_key_hex(KAT_KEY)?;
    let plain = parse_block_hex(KAT_PLAIN)?;
    let expected = parse_block_hex(KAT_CIPHER)?;
    ensure!(
        cipher.encrypt_block(&plain) == expected,
        "known-answer encryption mismatch"
    );
    ensure!(
        cipher.decrypt_block(&expected) == plain,
        "known-answer decryption mismatch"
    );
    println!("known-answer vector: ok");

    let mut rng = seeded_rng(seed);
    for key_len in [16usize, 24, 32] {
        for sample in 0..samples {
            let mut key = vec![0u8; key_len];
            rng.fill_bytes(&mut key);
            let cipher = Lea::new(&key).context("set key")?;

            let blocks = sample % 11 + 1;
            let mut data = vec![0u8; blocks * BLOCK_BYTES];
            rng.fill_bytes(&mut data);

            let (batched, _) = cipher
                .process_blocks_vec(&BatchConfig::encrypt().parallel(true), &data, None, blocks)
                .context("batch encrypt")?;
            for (plain, ct) in data
                .chunks_exact(BLOCK_BYTES)
                .zip(batched.chunks_exact(BLOCK_BYTES))
            {
                let block: Block = plain.try_into().context("block size")?;
                if cipher.encrypt_block(&block) != ct {
                    bail!("batch/single-block mismatch for {}-bit key", key_len * 8);
                }
            }

            let (decrypted, _) = cipher
                .process_blocks_vec(&BatchConfig::decrypt().parallel(true), &batched, None, blocks)
                .context("batch decrypt")?;
            if decrypted != data {
                bail!("round trip failed for {}-bit key", key_len * 8);
            }
        }
        println!("LEA-{}: {} samples ok", key_len * 8, samples);
    }
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; 16];
    rng.fill_bytes(&mut key_bytes);
    let cipher = Lea::new(&key_bytes).context("set key")?;

    let mut block = [0u8; 32];
    rng.fill_bytes(&mut block);
    let plaintext_hex = hex::encode(block);

    let mut ct = [0u8; 32];
    cipher
        .process_blocks(&BatchConfig::encrypt(), &block, None, &mut ct)
        .context("encrypt")?;
    let ciphertext_hex = hex::encode(ct);

    let mut decrypted = [0u8; 32];
    cipher
        .process_blocks(&BatchConfig::decrypt(), &ct, None, &mut decrypted)
        .context("decrypt")?;
    let decrypted_hex = hex::encode(decrypted);

    println!("demo key: {}", hex::encode(key_bytes));
    println!("plaintext: {}", plaintext_hex);
    println!("ciphertext: {}", ciphertext_hex);
    println!("decrypted: {}", decrypted_hex);
    if decrypted_hex != plaintext_hex {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Lea> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    Lea::new(&bytes).context("LEA key must be 16, 24 or 32 bytes")
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    if bytes.len() != BLOCK_BYTES {
        bail!("block must be {BLOCK_BYTES} bytes (32 hex characters)");
    }
    let mut block = [0u8; 16];
    block.copy_from_slice(&bytes);
    Ok(block)
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
