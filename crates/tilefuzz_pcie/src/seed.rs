//! The `SEED` value and the random source derived from it.
//!
//! A seed is an arbitrary-width hexadecimal integer. It is folded into the
//! 32-byte seed of a [`StdRng`]: values below 2^256 map to their
//! little-endian bytes, wider values XOR their upper bytes back over the low
//! 32, and negative values take the bitwise complement.

use crate::error::SeedError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// A parsed seed: sign plus lowercase hex digits without leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed {
    negative: bool,
    digits: String,
}

impl Seed {
    /// The 32-byte generator seed for this value.
    pub fn to_rng_seed(&self) -> [u8; 32] {
        let nibbles: Vec<u8> = self
            .digits
            .bytes()
            .rev()
            .filter_map(|b| (b as char).to_digit(16))
            .map(|d| d as u8)
            .collect();

        let mut seed = [0u8; 32];
        for (i, pair) in nibbles.chunks(2).enumerate() {
            let byte = pair[0] | pair.get(1).map_or(0, |hi| hi << 4);
            seed[i % 32] ^= byte;
        }
        if self.negative {
            for byte in &mut seed {
                *byte = !*byte;
            }
        }
        seed
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self {
            negative: false,
            digits: format!("{value:x}"),
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(f, "{sign}0x{}", self.digits)
    }
}

/// Parses a hexadecimal seed of any width.
///
/// Accepts surrounding whitespace, a leading `+` or `-`, an optional `0x`
/// prefix and single `_` separators between digits (or right after the
/// prefix).
pub fn parse_seed(text: &str) -> Result<Seed, SeedError> {
    let invalid = || SeedError::Invalid(text.to_string());

    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (prefixed, body) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(body) => (true, body),
        None => (false, unsigned),
    };

    let mut digits = String::with_capacity(body.len());
    for (i, group) in body.split('_').enumerate() {
        if group.is_empty() && !(i == 0 && prefixed) {
            return Err(invalid());
        }
        if !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        digits.push_str(group);
    }
    if digits.is_empty() {
        return Err(invalid());
    }

    let significant = digits.trim_start_matches('0');
    let digits = if significant.is_empty() {
        "0".to_string()
    } else {
        significant.to_ascii_lowercase()
    };
    Ok(Seed {
        negative: negative && digits != "0",
        digits,
    })
}

/// Creates the random source for a run.
///
/// The same seed always yields the same sequence of draws.
pub fn seeded_rng(seed: &Seed) -> StdRng {
    StdRng::from_seed(seed.to_rng_seed())
}
