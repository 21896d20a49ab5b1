//! Error taxonomy for the fetch-and-extract operation.
//!
//! Nothing here is recovered locally: every variant aborts the run and is
//! surfaced to the caller with its source chain intact.

use std::io;
use std::path::PathBuf;

/// Coarse classification of a [`FetchError`], used by callers that only care
/// about which stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input before any I/O (unparsable URL, unnamed target, unsafe entry name).
    InvalidInput,
    /// The transfer did not complete.
    Network,
    /// The server answered with a non-2xx status.
    HttpStatus,
    /// The body is not a readable ZIP archive.
    ArchiveFormat,
    /// Creating, writing or renaming on disk failed.
    Filesystem,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid source URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("GET {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("GET {url} returned HTTP {code}")]
    HttpStatus { url: String, code: u32 },

    #[error("GET {url}: response body exceeds limit of {limit} bytes")]
    BodyTooLarge { url: String, limit: u64 },

    #[error("not a valid ZIP archive: {0}")]
    ArchiveFormat(#[from] zip::result::ZipError),

    #[error("target directory {} has no final path component", .path.display())]
    InvalidTarget { path: PathBuf },

    #[error("archive entry {name:?} resolves outside the target directory")]
    UnsafeEntryPath { name: String },

    #[error("{}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidUrl { .. }
            | FetchError::InvalidTarget { .. }
            | FetchError::UnsafeEntryPath { .. } => ErrorKind::InvalidInput,
            FetchError::Network { .. } | FetchError::BodyTooLarge { .. } => ErrorKind::Network,
            FetchError::HttpStatus { .. } => ErrorKind::HttpStatus,
            FetchError::ArchiveFormat(_) => ErrorKind::ArchiveFormat,
            FetchError::Filesystem { .. } => ErrorKind::Filesystem,
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FetchError::Filesystem {
            path: path.into(),
            source,
        }
    }
}
