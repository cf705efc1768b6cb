use std::io::{self, Read, Seek, SeekFrom, Write};
use thiserror::Error;

use crate::format::MAGIC_LEN;

/// Leading bytes of a finished container ("ZSfiLe").
pub const MAGIC_GOOD: [u8; MAGIC_LEN] = [0xab, 0x5a, 0x53, 0x66, 0x69, 0x4c, 0x65, 0x01];
/// Leading bytes of a container that is still being written ("ZStoBe").
pub const MAGIC_BAD:  [u8; MAGIC_LEN] = [0xab, 0x5a, 0x53, 0x74, 0x6f, 0x42, 0x65, 0x01];

#[derive(Error, Debug)]
pub enum MagicError {
    #[error("Invalid magic number: {0}")]
    InvalidMagic(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Validity state recorded in the first eight bytes of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magic {
    Good,
    Bad,
}

impl Magic {
    pub fn bytes(self) -> &'static [u8; MAGIC_LEN] {
        match self {
            Magic::Good => &MAGIC_GOOD,
            Magic::Bad  => &MAGIC_BAD,
        }
    }

    pub fn is_complete(self) -> bool {
        self == Magic::Good
    }

    /// Anything other than the two known sequences is rejected.
    pub fn from_bytes(bytes: &[u8; MAGIC_LEN]) -> Result<Self, MagicError> {
        match bytes {
            b if b == &MAGIC_GOOD => Ok(Magic::Good),
            b if b == &MAGIC_BAD  => Ok(Magic::Bad),
            other => Err(MagicError::InvalidMagic(hex::encode(other))),
        }
    }

    pub fn write<W: Write>(self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.bytes())
    }

    pub fn read<R: Read>(mut reader: R) -> Result<Self, MagicError> {
        let mut magic = [0u8; MAGIC_LEN];
        reader.read_exact(&mut magic)?;
        Self::from_bytes(&magic)
    }

    /// Overwrite the magic at offset 0, leaving the stream position after it.
    pub fn patch<W: Write + Seek>(self, mut writer: W) -> io::Result<()> {
        writer.seek(SeekFrom::Start(0))?;
        self.write(&mut writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn known_sequences_are_accepted() {
        assert_eq!(Magic::from_bytes(&MAGIC_GOOD).unwrap(), Magic::Good);
        assert_eq!(Magic::from_bytes(&MAGIC_BAD).unwrap(), Magic::Bad);
        assert!(Magic::Good.is_complete());
        assert!(!Magic::Bad.is_complete());
    }

    #[test]
    fn foreign_bytes_are_rejected() {
        let err = Magic::from_bytes(b".6cy\0\0\0\0").unwrap_err();
        assert!(matches!(err, MagicError::InvalidMagic(ref h) if h == "2e36637900000000"));
    }

    #[test]
    fn short_input_is_an_io_error() {
        let err = Magic::read(Cursor::new(vec![0xab, 0x5a])).unwrap_err();
        assert!(matches!(err, MagicError::Io(_)));
    }

    #[test]
    fn patch_rewrites_only_the_leading_bytes() {
        let mut buf = Cursor::new(Vec::new());
        Magic::Bad.write(&mut buf).unwrap();
        buf.write_all(b"tail").unwrap();
        Magic::Good.patch(&mut buf).unwrap();

        let bytes = buf.into_inner();
        assert_eq!(&bytes[..MAGIC_LEN], &MAGIC_GOOD);
        assert_eq!(&bytes[MAGIC_LEN..], b"tail");
    }
}
