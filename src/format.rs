//! On-disk layout constants for the ZS container.
//!
//! ```text
//! offset  field             size
//! 0       magic             8
//! 8       header_length     4   (LE u32)
//! 12      root_offset       4   (LE u32, always 0)
//! 16      root_length       4   (LE u32, always 0)
//! 20      file_length       4   (LE u32)
//! 24      content_digest    32  (SHA-256)
//! 56      codec_tag         16  (null-padded ASCII)
//! 72      metadata_length   4   (LE u32)
//! 76      metadata          variable (UTF-8 JSON)
//! ...     header_checksum   8   (CRC-64/ISO, big-endian)
//! ...     block_length      ULEB128
//! ...     level             1
//! ...     payload_length    ULEB128
//! ...     payload           variable
//! ...     data_checksum     8   (CRC-64/ISO over level + payload)
//! ```
//!
//! All fixed-width integers are little-endian.  The index block addressed by
//! `root_offset`/`root_length` is not written; containers are index-less.

pub const MAGIC_LEN:          usize = 8;
pub const DIGEST_LEN:         usize = 32;
pub const CODEC_TAG_LEN:      usize = 16;
pub const CHECKSUM_LEN:       usize = 8;
/// Width of every fixed-size integer field in the header.
pub const U32_FIELD_LEN:      usize = 4;

pub const HEADER_LENGTH_OFFSET:   usize = 8;
pub const ROOT_OFFSET_OFFSET:     usize = 12;
pub const ROOT_LENGTH_OFFSET:     usize = 16;
pub const FILE_LENGTH_OFFSET:     usize = 20;
pub const CONTENT_DIGEST_OFFSET:  usize = 24;
pub const CODEC_TAG_OFFSET:       usize = 56;
pub const METADATA_LENGTH_OFFSET: usize = 72;
pub const METADATA_OFFSET:        usize = 76;

/// Size of the header up to (not including) the metadata bytes.
pub const FIXED_HEADER_LEN: usize = METADATA_OFFSET;

/// The header checksum covers everything after the magic number.
pub const HEADER_CHECKSUM_START: usize = MAGIC_LEN;

/// Constant folded into `header_length` by the legacy arithmetic.
pub const LEGACY_HEADER_CONSTANT: u32 = 224;
/// Placeholder written to `file_length` by the legacy arithmetic.
pub const LEGACY_FILE_LENGTH:     u32 = 224;

/// Level byte of every data block in this version.
pub const BLOCK_LEVEL_FLAT: u8 = 0;
