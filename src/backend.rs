//! Extraction collaborator seam.
//!
//! Region detection, structure recognition, and page rasterization are
//! delegated to an external collaborator behind the [`Backend`] trait; the
//! engine only sees finished [`ExtractedTable`]s. Inference backends are
//! expensive to construct, so a backend is built once at process startup and
//! shared across requests. A backend whose inference runtime is not
//! re-entrant can be wrapped in [`Serialized`] to funnel all calls through a
//! single execution slot.

use std::sync::{Arc, Mutex, PoisonError};

use image::DynamicImage;

use crate::error::Result;
use crate::table::RawTable;

/// One table lifted off a page: the structural frame plus the rendered crop
/// of the detected region.
#[derive(Debug, Clone)]
pub struct ExtractedTable {
    /// Tabular frame exactly as recognized; not yet normalized.
    pub frame: RawTable,
    /// Raster crop of the table region, taken while the page was live.
    pub image: DynamicImage,
}

/// An open document: an ordered sequence of pages plus held resources.
///
/// Documents are per-request. The engine opens one per call and closes it on
/// every exit path; implementations must make [`close`](Document::close)
/// idempotent and must not be shared between requests.
pub trait Document {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Release all page and detection resources. Idempotent.
    fn close(&mut self);

    /// Whether [`close`](Document::close) has been called.
    fn is_closed(&self) -> bool;
}

/// The extraction collaborator: opens documents and extracts tables.
///
/// `extract_tables` covers the whole detect-then-format pipeline of the
/// collaborator: locate table regions on a page, recognize each region's
/// structure, and render its crop. Detection order must be stable. An
/// implementation is free to run calls concurrently only if its inference
/// runtime is re-entrant; otherwise wrap it in [`Serialized`].
pub trait Backend {
    /// Document handle type produced by this backend.
    type Doc: Document;

    /// Open a document by caller-managed identifier.
    ///
    /// # Errors
    ///
    /// [`crate::Error::DocumentNotFound`] if the identifier does not resolve
    /// to readable content.
    fn open(&self, name: &str) -> Result<Self::Doc>;

    /// Detect and format every table on `page` (1-based, in range).
    ///
    /// Returns an empty vector when the page holds no tables; that is a valid
    /// result, not an error. Must only be called between `open` and `close`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Extraction`] wrapping the collaborator's message if
    /// detection or formatting fails. Failures are surfaced, never retried.
    fn extract_tables(&self, doc: &mut Self::Doc, page: usize) -> Result<Vec<ExtractedTable>>;
}

impl<B: Backend> Backend for Arc<B> {
    type Doc = B::Doc;

    fn open(&self, name: &str) -> Result<Self::Doc> {
        (**self).open(name)
    }

    fn extract_tables(&self, doc: &mut Self::Doc, page: usize) -> Result<Vec<ExtractedTable>> {
        (**self).extract_tables(doc, page)
    }
}

/// Wrapper that serializes all access to a non-re-entrant backend.
///
/// Every `open` and `extract_tables` call takes a process-wide mutex, turning
/// the collaborator into a single shared execution slot. Detection becomes a
/// pipeline bottleneck under load; that is the accepted cost of a backend
/// that cannot safely run concurrent inference.
#[derive(Debug)]
pub struct Serialized<B> {
    inner: Mutex<B>,
}

impl<B> Serialized<B> {
    /// Wrap a backend in a single execution slot.
    pub fn new(inner: B) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    // A poisoned lock means another request panicked mid-extraction; the
    // backend state itself is still usable for fresh calls.
    fn lock(&self) -> std::sync::MutexGuard<'_, B> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: Backend> Backend for Serialized<B> {
    type Doc = B::Doc;

    fn open(&self, name: &str) -> Result<Self::Doc> {
        self.lock().open(name)
    }

    fn extract_tables(&self, doc: &mut Self::Doc, page: usize) -> Result<Vec<ExtractedTable>> {
        self.lock().extract_tables(doc, page)
    }
}
