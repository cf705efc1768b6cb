//! Codec tags.
//!
//! The codec field is a 16-byte ASCII name padded with NUL bytes.  Payloads
//! are always stored verbatim in this version, so `none` is the only codec
//! a writer will ever declare.

use crate::format::CODEC_TAG_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecId {
    #[default]
    None,
}

impl CodecId {
    pub fn name(self) -> &'static str {
        match self {
            CodecId::None => "none",
        }
    }

    /// NUL-padded on-disk tag.
    pub fn tag(self) -> [u8; CODEC_TAG_LEN] {
        let mut tag = [0u8; CODEC_TAG_LEN];
        let name = self.name().as_bytes();
        tag[..name.len()].copy_from_slice(name);
        tag
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(CodecId::None),
            _      => None,
        }
    }

    /// Resolve an on-disk tag; trailing NUL padding is required to be NUL.
    pub fn from_tag(tag: &[u8; CODEC_TAG_LEN]) -> Option<Self> {
        let end = tag.iter().position(|&b| b == 0).unwrap_or(CODEC_TAG_LEN);
        if tag[end..].iter().any(|&b| b != 0) {
            return None;
        }
        std::str::from_utf8(&tag[..end]).ok().and_then(Self::from_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_tag_is_nul_padded() {
        let tag = CodecId::None.tag();
        assert_eq!(&tag[..4], b"none");
        assert!(tag[4..].iter().all(|&b| b == 0));
        assert_eq!(CodecId::from_tag(&tag), Some(CodecId::None));
    }

    #[test]
    fn unknown_or_garbled_tags_do_not_resolve() {
        let mut tag = [0u8; CODEC_TAG_LEN];
        tag[..4].copy_from_slice(b"zstd");
        assert_eq!(CodecId::from_tag(&tag), None);

        let mut garbled = CodecId::None.tag();
        garbled[10] = b'x';
        assert_eq!(CodecId::from_tag(&garbled), None);
    }
}
