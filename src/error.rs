//! Error types for the table engine.
//!
//! This module defines all error types that can occur while extracting,
//! normalizing, and reconciling tables.

/// Result type alias for table engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error taxonomy for callers that map engine errors onto a transport.
///
/// The engine itself has no transport concept; a request layer typically
/// translates `NotFound` to a 404-equivalent, `Validation` to a
/// 400-equivalent, and `Extraction` to a 500-equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A document, page, or required table could not be found.
    NotFound,
    /// Caller-supplied parameters were missing or unusable.
    Validation,
    /// The extraction collaborator or serialization machinery failed.
    Extraction,
}

/// Error types that can occur during table extraction and reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Document identifier did not resolve to readable content
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// Requested page does not exist in the document
    #[error("page {page} does not exist (document has {page_count} pages)")]
    PageNotFound {
        /// The 1-based page number that was requested
        page: usize,
        /// Number of pages actually present in the document
        page_count: usize,
    },

    /// The source page of a header copy yielded zero detected tables
    #[error("no table on source page")]
    NoSourceTable,

    /// The target page of a header copy yielded zero detected tables
    #[error("no table on target page")]
    NoTargetTable,

    /// Missing or malformed request parameter
    #[error("invalid request: {0}")]
    Validation(String),

    /// The extraction collaborator failed; wraps the underlying message
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Encoding the rendered table crop failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The coarse kind of this error, for transport mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DocumentNotFound(_)
            | Error::PageNotFound { .. }
            | Error::NoSourceTable
            | Error::NoTargetTable => ErrorKind::NotFound,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Extraction(_) | Error::Image(_) | Error::Io(_) => ErrorKind::Extraction,
        }
    }
}
