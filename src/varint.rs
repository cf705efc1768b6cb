//! Unsigned LEB128 variable-length integers.
//!
//! Seven value bits per byte, least significant group first; the high bit of
//! each byte is set while more groups follow.  Zero encodes as `[0x00]`.

use std::io::{self, Write};
use thiserror::Error;

/// Longest encoding of a `u64` (ceil(64 / 7)).
pub const MAX_LEN: usize = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VarintError {
    #[error("ULEB128 value is truncated")]
    Truncated,
    #[error("ULEB128 value does not fit in 64 bits")]
    Overflow,
}

/// Minimal ULEB128 encoding of `value`.
pub fn encode(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(value));
    let mut remaining = value;
    loop {
        let mut byte = (remaining & 0x7f) as u8;
        remaining >>= 7;
        if remaining != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if remaining == 0 {
            return out;
        }
    }
}

pub fn write_uleb128<W: Write>(mut writer: W, value: u64) -> io::Result<usize> {
    let bytes = encode(value);
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Decode one value from the front of `bytes`, returning it with the number
/// of bytes consumed.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().enumerate().take(MAX_LEN) {
        let group = u64::from(byte & 0x7f);
        let shift = 7 * i as u32;
        if i == MAX_LEN - 1 && group > 1 {
            return Err(VarintError::Overflow);
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if bytes.len() >= MAX_LEN {
        Err(VarintError::Overflow)
    } else {
        Err(VarintError::Truncated)
    }
}
