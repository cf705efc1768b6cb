use byteorder::WriteBytesExt;
use std::io::{self, Write};

use crate::format::BLOCK_LEVEL_FLAT;
use crate::varint;

/// A single uncompressed data block.
///
/// Layout: `block_length (ULEB128) | level (u8) | payload_length (ULEB128) | payload`.
/// `block_length` is supplied by the caller because its arithmetic is
/// configurable; `payload_length` is always exact.
#[derive(Debug, Clone, Copy)]
pub struct DataBlock<'a> {
    pub level:   u8,
    pub payload: &'a [u8],
}

impl<'a> DataBlock<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { level: BLOCK_LEVEL_FLAT, payload }
    }

    pub fn encoded_len(&self, block_length: u64) -> u64 {
        let payload_len = self.payload.len() as u64;
        (varint::encoded_len(block_length) + 1 + varint::encoded_len(payload_len)) as u64
            + payload_len
    }

    /// Returns the number of bytes written.
    pub fn write<W: Write>(&self, block_length: u64, mut writer: W) -> io::Result<u64> {
        let mut written = varint::write_uleb128(&mut writer, block_length)? as u64;
        writer.write_u8(self.level)?;
        written += 1;
        written += varint::write_uleb128(&mut writer, self.payload.len() as u64)? as u64;
        writer.write_all(self.payload)?;
        Ok(written + self.payload.len() as u64)
    }

    /// `level` followed by `payload`: the bytes covered by the data checksum.
    pub fn write_checksummed<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u8(self.level)?;
        writer.write_all(self.payload)
    }
}
