//! Shared scripted backend for integration tests.
//!
//! `MockBackend` plays the extraction collaborator: documents are scripted as
//! per-page lists of raw frames, and every `close()` call on every opened
//! document is logged so tests can assert the handle lifecycle.

#![allow(dead_code)] // not every test binary uses every helper

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use image::DynamicImage;
use pdf_tabular::{Backend, Document, Error, ExtractedTable, RawTable, Result};

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Per-page scripted tables for one document.
pub type Script = Vec<Vec<RawTable>>;

pub struct MockBackend {
    docs: HashMap<String, Script>,
    /// Pages whose extraction should fail instead of returning tables.
    fail_pages: Vec<usize>,
    /// Number of `close()` calls per opened document, in open order.
    close_log: Arc<Mutex<Vec<usize>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            docs: HashMap::new(),
            fail_pages: Vec::new(),
            close_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_document(mut self, name: &str, pages: Script) -> Self {
        self.docs.insert(name.to_string(), pages);
        self
    }

    pub fn failing_on_page(mut self, page: usize) -> Self {
        self.fail_pages.push(page);
        self
    }

    /// `close()` call counts for every document opened so far.
    pub fn close_counts(&self) -> Vec<usize> {
        self.close_log.lock().unwrap().clone()
    }
}

pub struct MockDocument {
    pages: Script,
    fail_pages: Vec<usize>,
    closed: bool,
    /// Index of this document's slot in the backend's close log.
    slot: usize,
    close_log: Arc<Mutex<Vec<usize>>>,
}

impl Document for MockDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn close(&mut self) {
        self.closed = true;
        self.close_log.lock().unwrap()[self.slot] += 1;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Backend for MockBackend {
    type Doc = MockDocument;

    fn open(&self, name: &str) -> Result<Self::Doc> {
        let pages = self
            .docs
            .get(name)
            .cloned()
            .ok_or_else(|| Error::DocumentNotFound(name.to_string()))?;
        let mut log = self.close_log.lock().unwrap();
        let slot = log.len();
        log.push(0);
        Ok(MockDocument {
            pages,
            fail_pages: self.fail_pages.clone(),
            closed: false,
            slot,
            close_log: Arc::clone(&self.close_log),
        })
    }

    fn extract_tables(&self, doc: &mut Self::Doc, page: usize) -> Result<Vec<ExtractedTable>> {
        assert!(!doc.is_closed(), "extraction after close is undefined");
        if doc.fail_pages.contains(&page) {
            return Err(Error::Extraction(format!("scripted failure on page {page}")));
        }
        let frames = doc
            .pages
            .get(page - 1)
            .ok_or_else(|| Error::Extraction(format!("page {page} out of range")))?;
        Ok(frames
            .iter()
            .map(|frame| ExtractedTable {
                frame: frame.clone(),
                image: DynamicImage::new_rgb8(4, 4),
            })
            .collect())
    }
}

/// A dense frame: every cell present.
pub fn frame(columns: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable::from_strings(
        columns.iter().copied(),
        rows.iter().map(|row| row.to_vec()).collect::<Vec<_>>(),
    )
}
