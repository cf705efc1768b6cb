//! Content digests.
//!
//! The header carries a 32-byte digest of the payload, computed once before
//! anything is written.  SHA-256 is the reference algorithm; other providers
//! can be substituted as long as they produce 32 bytes.

use sha2::{Digest, Sha256};

use crate::format::DIGEST_LEN;

pub trait DigestProvider {
    fn digest(&self, data: &[u8]) -> [u8; DIGEST_LEN];
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl DigestProvider for Sha256Digest {
    fn digest(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        Sha256::digest(data).into()
    }
}
