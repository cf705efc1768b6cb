//! Container writer.
//!
//! A container is produced in two passes over the destination file:
//!
//! 1. **Create** — truncate the destination, write magic and header, flush,
//!    `fsync`, close.  An identical copy of the header fields goes to a
//!    scratch file which is re-opened and checksummed.
//! 2. **Append** — re-open the destination for append, write the header
//!    checksum and the data block, then checksum a scratch copy of
//!    `level + payload` and append that checksum.
//!
//! With provisional magic enabled the file starts life with BAD magic and is
//! only patched to GOOD once pass 2 has been synced, so an interrupted write
//! never looks complete.  Nothing is cleaned up on failure.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::block::DataBlock;
use crate::checksum::{ChecksumProvider, Crc64Iso, DurableCopy};
use crate::digest::{DigestProvider, Sha256Digest};
use crate::error::{to_u32, Result};
use crate::format::{CHECKSUM_LEN, DIGEST_LEN};
use crate::header::{ContainerHeader, RootPointer};
use crate::magic::Magic;
use crate::metadata::BuildInfo;
use crate::options::WriterOptions;

/// What was written, as seen by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub content_digest:  [u8; DIGEST_LEN],
    /// Value stored in the `header_length` field.
    pub header_length:   u32,
    /// Bytes actually occupied by magic and header fields.
    pub header_size:     u64,
    pub header_checksum: [u8; CHECKSUM_LEN],
    pub block_length:    u64,
    pub data_checksum:   [u8; CHECKSUM_LEN],
    pub file_size:       u64,
    pub magic:           Magic,
}

pub struct ContainerWriter<D = Sha256Digest, C = Crc64Iso> {
    digest:   D,
    checksum: C,
    options:  WriterOptions,
}

impl ContainerWriter {
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    pub fn with_options(options: WriterOptions) -> Self {
        Self::with_providers(Sha256Digest, Crc64Iso, options)
    }
}

impl Default for ContainerWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DigestProvider, C: ChecksumProvider> ContainerWriter<D, C> {
    pub fn with_providers(digest: D, checksum: C, options: WriterOptions) -> Self {
        Self { digest, checksum, options }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Write `payload` as a complete container at `path`, replacing any
    /// existing file.
    pub fn write_container<P: AsRef<Path>>(
        &self,
        path:    P,
        payload: &[u8],
        build:   &BuildInfo,
    ) -> Result<ContainerSummary> {
        let path = path.as_ref();
        let arithmetic = self.options.arithmetic;

        let content_digest = self.digest.digest(payload);
        let metadata = build.build()?;
        to_u32("metadata_length", metadata.len() as u64)?;

        let block = DataBlock::new(payload);
        let block_length = arithmetic.block_length(payload.len());

        let mut header = ContainerHeader {
            header_length: to_u32("header_length", arithmetic.header_length(metadata.len()))?,
            root:          RootPointer::UNPOPULATED,
            file_length:   0,
            content_digest,
            codec:         self.options.codec,
            metadata,
        };
        let header_size = header.encoded_len() as u64;
        let file_size = header_size
            + CHECKSUM_LEN as u64
            + block.encoded_len(block_length)
            + CHECKSUM_LEN as u64;
        header.file_length = to_u32("file_length", arithmetic.file_length(file_size))?;

        let first_magic = if self.options.provisional_magic { Magic::Bad } else { Magic::Good };
        debug!(
            path = %path.display(),
            payload_len = payload.len(),
            ?arithmetic,
            digest = %hex::encode(content_digest),
            "writing container"
        );

        // ── Pass 1: magic + header ─────────────────────────────────────────
        {
            let file = File::create(path)?;
            let mut out = BufWriter::new(file);
            header.write(first_magic, &mut out)?;
            out.flush()?;
            out.get_ref().sync_all()?;
        }
        let mut header_copy = DurableCopy::create()?;
        header.write_fields(&mut header_copy)?;
        let header_checksum = header_copy.checksum_with(&self.checksum)?;
        debug!(header_size, header_length = header.header_length, "header persisted");

        // ── Pass 2: header checksum + data block + data checksum ───────────
        let file = OpenOptions::new().append(true).open(path)?;
        let mut out = BufWriter::new(file);
        out.write_all(&header_checksum)?;
        block.write(block_length, &mut out)?;
        out.flush()?;

        let mut data_copy = DurableCopy::create()?;
        block.write_checksummed(&mut data_copy)?;
        let data_checksum = data_copy.checksum_with(&self.checksum)?;

        out.write_all(&data_checksum)?;
        out.flush()?;
        out.get_ref().sync_all()?;
        drop(out);
        debug!(block_length, file_size, "data block persisted");

        if first_magic != Magic::Good {
            let mut file = OpenOptions::new().write(true).open(path)?;
            Magic::Good.patch(&mut file)?;
            file.sync_all()?;
            debug!(path = %path.display(), "container marked complete");
        }

        Ok(ContainerSummary {
            content_digest,
            header_length: header.header_length,
            header_size,
            header_checksum,
            block_length,
            data_checksum,
            file_size,
            magic: Magic::Good,
        })
    }
}
