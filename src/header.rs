use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

use crate::codec::CodecId;
use crate::format::{DIGEST_LEN, FIXED_HEADER_LEN, MAGIC_LEN};
use crate::magic::Magic;

/// Pointer into the index block.  No index is written in this version, so
/// every container carries [`RootPointer::UNPOPULATED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RootPointer {
    pub offset: u32,
    pub length: u32,
}

impl RootPointer {
    pub const UNPOPULATED: RootPointer = RootPointer { offset: 0, length: 0 };

    pub fn is_populated(&self) -> bool {
        *self != Self::UNPOPULATED
    }
}

#[derive(Debug, Clone)]
pub struct ContainerHeader {
    /// Declared value; see [`SizeArithmetic`](crate::options::SizeArithmetic).
    pub header_length:  u32,
    pub root:           RootPointer,
    pub file_length:    u32,
    pub content_digest: [u8; DIGEST_LEN],
    pub codec:          CodecId,
    pub metadata:       Vec<u8>,
}

impl ContainerHeader {
    /// Bytes occupied on disk by magic plus header fields.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_LEN + self.metadata.len()
    }

    /// Every header field after the magic number.  This is also the region
    /// covered by the header checksum.
    pub fn write_fields<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let metadata_len = u32::try_from(self.metadata.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("metadata length {} does not fit in 4 bytes", self.metadata.len()),
            )
        })?;
        writer.write_u32::<LittleEndian>(self.header_length)?;
        writer.write_u32::<LittleEndian>(self.root.offset)?;
        writer.write_u32::<LittleEndian>(self.root.length)?;
        writer.write_u32::<LittleEndian>(self.file_length)?;
        writer.write_all(&self.content_digest)?;
        writer.write_all(&self.codec.tag())?;
        writer.write_u32::<LittleEndian>(metadata_len)?;
        writer.write_all(&self.metadata)?;
        Ok(())
    }

    pub fn write<W: Write>(&self, magic: Magic, mut writer: W) -> io::Result<()> {
        magic.write(&mut writer)?;
        self.write_fields(writer)
    }

    pub fn checksummed_len(&self) -> usize {
        self.encoded_len() - MAGIC_LEN
    }
}
