pub mod format;
pub mod magic;
pub mod varint;
pub mod codec;
pub mod digest;
pub mod checksum;
pub mod metadata;
pub mod header;
pub mod block;
pub mod options;
pub mod error;
pub mod writer;

use std::fs::File;
use std::path::Path;

pub use magic::{Magic, MAGIC_BAD, MAGIC_GOOD};
pub use codec::CodecId;
pub use digest::{DigestProvider, Sha256Digest};
pub use checksum::{ChecksumProvider, Crc64Iso};
pub use metadata::BuildInfo;
pub use options::{SizeArithmetic, WriterOptions};
pub use error::{Result, ZsError};
pub use writer::{ContainerSummary, ContainerWriter};

/// Write `payload` to `path` with default options, stamping the metadata
/// with this host, this user and the current UTC time.
pub fn write_container<P: AsRef<Path>>(path: P, payload: &[u8]) -> Result<ContainerSummary> {
    let build = BuildInfo::from_environment(chrono::Utc::now());
    ContainerWriter::new().write_container(path, payload, &build)
}

/// Classify the file at `path` by its leading magic number.  Files that do
/// not start with either ZS sequence are rejected.
pub fn sniff<P: AsRef<Path>>(path: P) -> Result<Magic> {
    Ok(Magic::read(File::open(path)?)?)
}
