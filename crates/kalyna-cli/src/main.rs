//! Command-line interface for `kalyna-core`.

#![forbid(unsafe_code)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kalyna_core::kat;
use kalyna_core::{words_to_le_bytes, Kalyna, Variant};
use log::{debug, info};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Kalyna block cipher CLI.
#[derive(Parser)]
#[command(
    name = "kalyna",
    version,
    author,
    about = "Kalyna (DSTU 7624:2014) block cipher CLI"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encipher one block.
    Enc {
        /// Block/key sizes, e.g. `128/256`.
        #[arg(long, default_value_t = Variant::Kalyna128_128)]
        variant: Variant,
        /// Master key as hex (key size / 4 characters).
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext block as hex (block size / 4 characters).
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Decipher one block.
    Dec {
        /// Block/key sizes, e.g. `128/256`.
        #[arg(long, default_value_t = Variant::Kalyna128_128)]
        variant: Variant,
        /// Master key as hex (key size / 4 characters).
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Ciphertext block as hex (block size / 4 characters).
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Run the built-in known-answer vectors for every variant.
    Kat,
    /// Print the round keys derived from a master key.
    Schedule {
        /// Block/key sizes, e.g. `128/256`.
        #[arg(long, default_value_t = Variant::Kalyna128_128)]
        variant: Variant,
        /// Master key as hex (key size / 4 characters).
        #[arg(long, value_name = "HEX")]
        key_hex: String,
    },
    /// Run a local demo: random key and block, encipher then decipher.
    Demo {
        /// Block/key sizes, e.g. `128/256`.
        #[arg(long, default_value_t = Variant::Kalyna128_128)]
        variant: Variant,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Enc {
            variant,
            key_hex,
            block_hex,
        } => cmd_block(variant, &key_hex, &block_hex, true),
        Commands::Dec {
            variant,
            key_hex,
            block_hex,
        } => cmd_block(variant, &key_hex, &block_hex, false),
        Commands::Kat => cmd_kat(),
        Commands::Schedule { variant, key_hex } => cmd_schedule(variant, &key_hex),
        Commands::Demo { variant, seed } => cmd_demo(variant, seed),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn cmd_block(variant: Variant, key_hex: &str, block_hex: &str, encipher: bool) -> Result<()> {
    let cipher = keyed_cipher(variant, key_hex)?;
    let input = parse_hex(block_hex, variant.block_bytes(), "block")?;
    let mut output = vec![0u8; input.len()];
    let result = if encipher {
        cipher.encipher_bytes(&input, &mut output)
    } else {
        cipher.decipher_bytes(&input, &mut output)
    };
    result.context("process block")?;
    println!("{}", hex::encode(output));
    Ok(())
}

fn cmd_kat() -> Result<()> {
    let mut failures = 0;
    for vector in kat::VECTORS {
        let actual = vector.run().context("run known-answer vector")?;
        let verdict = if actual == vector.expected {
            "ok"
        } else {
            failures += 1;
            "FAILED"
        };
        println!("{} {:?}: {verdict}", vector.variant, vector.direction);
        if actual != vector.expected {
            println!("  expected: {}", vector.expected);
            println!("  actual:   {actual}");
        }
    }
    if failures > 0 {
        bail!("{failures} of {} known-answer vectors failed", kat::VECTORS.len());
    }
    info!("all {} known-answer vectors passed", kat::VECTORS.len());
    Ok(())
}

fn cmd_schedule(variant: Variant, key_hex: &str) -> Result<()> {
    let cipher = keyed_cipher(variant, key_hex)?;
    let round_keys = cipher
        .round_keys()
        .context("round keys missing after expansion")?;
    for (index, key) in round_keys.iter().enumerate() {
        let mut bytes = vec![0u8; variant.block_bytes()];
        words_to_le_bytes(key, &mut bytes);
        println!("{index:02}: {}", hex::encode(bytes));
    }
    Ok(())
}

fn cmd_demo(variant: Variant, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = vec![0u8; variant.key_bytes()];
    rng.fill_bytes(&mut key);
    let mut block = vec![0u8; variant.block_bytes()];
    rng.fill_bytes(&mut block);

    let mut cipher = Kalyna::with_variant(variant);
    cipher.expand_key_bytes(&key).context("expand key")?;

    let mut ciphertext = vec![0u8; block.len()];
    cipher
        .encipher_bytes(&block, &mut ciphertext)
        .context("encipher")?;
    let mut decrypted = vec![0u8; block.len()];
    cipher
        .decipher_bytes(&ciphertext, &mut decrypted)
        .context("decipher")?;

    println!("variant: {variant}");
    println!("demo key: {}", hex::encode(&key));
    println!("plaintext: {}", hex::encode(&block));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted: {}", hex::encode(&decrypted));
    if decrypted != block {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn keyed_cipher(variant: Variant, key_hex: &str) -> Result<Kalyna> {
    let key = parse_hex(key_hex, variant.key_bytes(), "key")?;
    let mut cipher = Kalyna::with_variant(variant);
    cipher.expand_key_bytes(&key).context("expand key")?;
    debug!("{variant}: cipher keyed");
    Ok(cipher)
}

fn parse_hex(hex_str: &str, expected_len: usize, what: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(hex_str.trim()).with_context(|| format!("decode {what} hex"))?;
    if bytes.len() != expected_len {
        bail!(
            "{what} must be {expected_len} bytes ({} hex characters), got {}",
            expected_len * 2,
            bytes.len()
        );
    }
    Ok(bytes)
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_variant_flag() {
        let cli = Cli::try_parse_from([
            "kalyna",
            "enc",
            "--variant",
            "256/512",
            "--key-hex",
            "00",
            "--block-hex",
            "00",
        ])
        .unwrap();
        match cli.command {
            Commands::Enc { variant, .. } => assert_eq!(variant, Variant::Kalyna256_512),
            _ => panic!("expected enc"),
        }
        assert!(Cli::try_parse_from(["kalyna", "demo", "--variant", "192/192"]).is_err());
    }

    #[test]
    fn parse_hex_checks_length() {
        assert_eq!(parse_hex(" 0001 ", 2, "key").unwrap(), vec![0, 1]);
        let err = parse_hex("0001", 16, "key").unwrap_err();
        assert!(err.to_string().contains("key must be 16 bytes"));
        assert!(parse_hex("zz", 1, "block").is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = seeded_rng(Some(42));
        let mut b = seeded_rng(Some(42));
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn kat_command_succeeds() {
        cmd_kat().unwrap();
    }

    #[test]
    fn keyed_cipher_matches_vector() {
        let cipher = keyed_cipher(Variant::Kalyna128_128, "000102030405060708090a0b0c0d0e0f")
            .unwrap();
        let input = parse_hex("101112131415161718191a1b1c1d1e1f", 16, "block").unwrap();
        let mut output = [0u8; 16];
        cipher.encipher_bytes(&input, &mut output).unwrap();
        assert_eq!(hex::encode(output), "81bf1c7d779bac20e1c9ea39b4d2ad06");
    }
}
