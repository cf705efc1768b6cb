//! Section checksums computed over durably written bytes.
//!
//! Each checksum in a container is taken from a re-opened, fsync'd copy of
//! the section rather than from the writer's buffer, so corruption introduced
//! on the write path shows up as a mismatch.  [`DurableCopy`] is the
//! per-call scratch file that provides that copy; it is deleted on drop, so
//! concurrent writers never share a side file.
//!
//! # CRC-64/ISO
//! Polynomial `x^64 + x^4 + x^3 + x + 1` (ISO 3309), reflected, zero initial
//! value and no final XOR.  The 64-bit result is stored big-endian.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};

use crc::{Algorithm, Crc};
use tempfile::NamedTempFile;
use tracing::trace;

use crate::format::CHECKSUM_LEN;

pub const CRC_64_ZS_ISO: Algorithm<u64> = Algorithm {
    width:   64,
    poly:    0x0000_0000_0000_001b,
    init:    0x0000_0000_0000_0000,
    refin:   true,
    refout:  true,
    xorout:  0x0000_0000_0000_0000,
    check:   0x46a5_a938_8a5b_effe,
    residue: 0x0000_0000_0000_0000,
};

const CRC64_ISO: Crc<u64> = Crc::<u64>::new(&CRC_64_ZS_ISO);

const READ_CHUNK: usize = 64 * 1024;

pub trait ChecksumProvider {
    /// Stream `source` to EOF exactly once.  Read failures propagate.
    fn checksum(&self, source: &mut dyn Read) -> io::Result<[u8; CHECKSUM_LEN]>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Crc64Iso;

impl ChecksumProvider for Crc64Iso {
    fn checksum(&self, source: &mut dyn Read) -> io::Result<[u8; CHECKSUM_LEN]> {
        let mut digest = CRC64_ISO.digest();
        let mut buf = vec![0u8; READ_CHUNK];
        loop {
            let n = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            digest.update(&buf[..n]);
        }
        Ok(digest.finalize().to_be_bytes())
    }
}

/// Scratch copy of one section, written and synced before it is checksummed.
pub struct DurableCopy {
    file: NamedTempFile,
    len:  u64,
}

impl DurableCopy {
    pub fn create() -> io::Result<Self> {
        Ok(Self { file: NamedTempFile::new()?, len: 0 })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sync the copy, re-open it by path and run `provider` over the bytes
    /// read back.  The scratch file is removed when this returns.
    pub fn checksum_with<C: ChecksumProvider + ?Sized>(
        mut self,
        provider: &C,
    ) -> io::Result<[u8; CHECKSUM_LEN]> {
        self.file.flush()?;
        self.file.as_file().sync_all()?;
        let reopened: File = self.file.reopen()?;
        let checksum = provider.checksum(&mut BufReader::new(reopened))?;
        trace!(bytes = self.len, checksum = %hex::encode(checksum), "checksummed durable copy");
        Ok(checksum)
    }
}

impl Write for DurableCopy {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        self.len += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn crc(data: &[u8]) -> [u8; CHECKSUM_LEN] {
        Crc64Iso.checksum(&mut &data[..]).unwrap()
    }

    #[test]
    fn check_value() {
        assert_eq!(crc(b"123456789"), 0x46a5_a938_8a5b_effe_u64.to_be_bytes());
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(crc(b""), [0u8; CHECKSUM_LEN]);
    }

    #[test]
    fn distinct_inputs_differ() {
        let corpus: [&[u8]; 4] = [b"hello", b"hellp", b"\x00hello world", b"123456789"];
        for (i, a) in corpus.iter().enumerate() {
            for b in &corpus[i + 1..] {
                assert_ne!(crc(a), crc(b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn durable_copy_matches_in_memory_bytes() {
        let data = b"\x00some payload bytes".repeat(10_000);
        let mut copy = DurableCopy::create().unwrap();
        copy.write_all(&data).unwrap();
        assert_eq!(copy.len(), data.len() as u64);
        assert_eq!(copy.checksum_with(&Crc64Iso).unwrap(), crc(&data));
    }

    #[test]
    fn read_failure_propagates() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "unreadable"))
            }
        }
        let err = Crc64Iso.checksum(&mut Broken).unwrap_err();
        assert_eq!(err.to_string(), "unreadable");
    }

    proptest! {
        #[test]
        fn checksum_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            prop_assert_eq!(crc(&data), crc(&data));
        }
    }
}
