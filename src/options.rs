//! Writer configuration.

use crate::codec::CodecId;
use crate::format::{
    CODEC_TAG_LEN, DIGEST_LEN, FIXED_HEADER_LEN, LEGACY_FILE_LENGTH, LEGACY_HEADER_CONSTANT,
    MAGIC_LEN, U32_FIELD_LEN,
};

/// How the writer derives `header_length`, `block_length` and `file_length`.
///
/// `Legacy` keeps the fixed constants of the first ZS writer (224, `+2`):
///
/// | field           | value                                          |
/// |-----------------|------------------------------------------------|
/// | `header_length` | `8 + 4 + 224 + 32 + 16 + metadata_len`         |
/// | `block_length`  | `payload_len + 2`                              |
/// | `file_length`   | `224`                                          |
///
/// It is not byte-compatible with that writer, whose `header_length` has no
/// `+ 4` term.
///
/// `Exact` writes the true sizes: the header region up to the end of the
/// metadata, the level byte plus payload, and the final file size.  The
/// field sequence on disk is the same for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeArithmetic {
    #[default]
    Legacy,
    Exact,
}

impl SizeArithmetic {
    pub fn header_length(self, metadata_len: usize) -> u64 {
        let metadata_len = metadata_len as u64;
        match self {
            SizeArithmetic::Legacy => {
                (MAGIC_LEN + U32_FIELD_LEN) as u64
                    + u64::from(LEGACY_HEADER_CONSTANT)
                    + (DIGEST_LEN + CODEC_TAG_LEN) as u64
                    + metadata_len
            }
            SizeArithmetic::Exact => FIXED_HEADER_LEN as u64 + metadata_len,
        }
    }

    pub fn block_length(self, payload_len: usize) -> u64 {
        match self {
            SizeArithmetic::Legacy => payload_len as u64 + 2,
            SizeArithmetic::Exact  => payload_len as u64 + 1,
        }
    }

    /// `total` is the exact size of the finished container.
    pub fn file_length(self, total: u64) -> u64 {
        match self {
            SizeArithmetic::Legacy => u64::from(LEGACY_FILE_LENGTH),
            SizeArithmetic::Exact  => total,
        }
    }
}

/// Configuration for [`ContainerWriter`](crate::writer::ContainerWriter).
#[derive(Debug, Clone)]
pub struct WriterOptions {
    pub codec:             CodecId,
    pub arithmetic:        SizeArithmetic,
    /// Write BAD magic first and upgrade to GOOD only after the data
    /// checksum is on disk.
    pub provisional_magic: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            codec:             CodecId::None,
            arithmetic:        SizeArithmetic::Legacy,
            provisional_magic: true,
        }
    }
}

impl WriterOptions {
    pub fn arithmetic(mut self, arithmetic: SizeArithmetic) -> Self {
        self.arithmetic = arithmetic;
        self
    }

    pub fn provisional_magic(mut self, enabled: bool) -> Self {
        self.provisional_magic = enabled;
        self
    }
}
