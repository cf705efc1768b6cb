use std::io;
use thiserror::Error;

use crate::magic::MagicError;

/// Any failure aborts the whole container write.  No cleanup is attempted,
/// so the destination may be left truncated (with BAD magic when provisional
/// magic is enabled).
#[derive(Error, Debug)]
pub enum ZsError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Metadata encoding failed: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error("{field} = {value} does not fit in a 4-byte header field")]
    FieldOverflow { field: &'static str, value: u64 },
    #[error(transparent)]
    Magic(#[from] MagicError),
}

pub type Result<T> = std::result::Result<T, ZsError>;

pub(crate) fn to_u32(field: &'static str, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| ZsError::FieldOverflow { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_surface_unmodified() {
        let err: ZsError = io::Error::new(io::ErrorKind::NotFound, "no such dir").into();
        assert_eq!(err.to_string(), "no such dir");
    }

    #[test]
    fn overflow_names_the_field() {
        assert_eq!(to_u32("file_length", 7).unwrap(), 7);
        let err = to_u32("file_length", u64::from(u32::MAX) + 1).unwrap_err();
        assert!(matches!(err, ZsError::FieldOverflow { field: "file_length", .. }));
    }
}
