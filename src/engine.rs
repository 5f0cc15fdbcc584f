//! The table engine: upload-flow extraction, single-page repair, and
//! cross-page header copy.
//!
//! Each operation opens its own document, runs detection and formatting
//! through the shared [`Backend`], transforms the result with the normalizer
//! and reconciler, and closes the document on every exit path. No extraction
//! result is cached between calls: a repair or header copy redoes inference
//! for the pages it touches.

use crate::backend::{Backend, Document, ExtractedTable};
use crate::error::{Error, Result};
use crate::record::TableRecord;
use crate::table::{copy_schema, normalize, NormalizeOptions};

/// Table normalization and header reconciliation engine.
///
/// Holds the process-wide extraction backend; construct one at startup and
/// share it across requests. The engine itself keeps no per-request state.
///
/// # Example
///
/// ```ignore
/// use pdf_tabular::{Engine, Serialized};
/// use std::sync::Arc;
///
/// let backend = Arc::new(Serialized::new(my_backend));
/// let engine = Engine::new(backend);
/// let records = engine.normalize_all("report.pdf")?;
/// ```
#[derive(Debug)]
pub struct Engine<B: Backend> {
    backend: B,
}

impl<B: Backend> Engine<B> {
    /// Create an engine over an extraction backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Extract and normalize every table in a document (upload flow).
    ///
    /// Pages are visited in order and regions in detection order, so the
    /// returned records are stably ordered: page, then detection position.
    /// Each record's page number is the 1-based position of its page. A
    /// document without any tables yields an empty vector, which is a valid
    /// result.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentNotFound`] if the identifier does not resolve, or any
    /// error of the extraction collaborator.
    pub fn normalize_all(&self, file_name: &str) -> Result<Vec<TableRecord>> {
        require_file_name(file_name)?;
        self.with_document(file_name, |engine, doc| {
            let options = NormalizeOptions::default();
            let mut records = Vec::new();
            for page in 1..=doc.page_count() {
                let tables = engine.backend.extract_tables(doc, page)?;
                log::debug!("{file_name} page {page}: {} table(s) detected", tables.len());
                for extracted in tables {
                    let table = normalize(extracted.frame, &options);
                    records.push(TableRecord::build(&table, &extracted.image, file_name, page)?);
                }
            }
            log::debug!("{file_name}: returning {} record(s)", records.len());
            Ok(records)
        })
    }

    /// Re-extract one page and repair its header (reprocess flow).
    ///
    /// The page's first detected table is normalized — header promotion per
    /// `promote_empty_header`, label repair always — and serialized. Returns
    /// `Ok(None)` when the page exists but holds no tables; a page outside
    /// the document is an error, the two cases are deliberately distinct.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a missing file name or page number 0,
    /// [`Error::PageNotFound`] for a page outside the document, or any error
    /// of the extraction collaborator.
    pub fn reconcile_header(
        &self,
        file_name: &str,
        page: usize,
        promote_empty_header: bool,
    ) -> Result<Option<TableRecord>> {
        require_file_name(file_name)?;
        require_page_number(page)?;
        self.with_document(file_name, |engine, doc| {
            require_in_range(page, doc.page_count())?;
            let Some(extracted) = engine.first_table(doc, page)? else {
                log::debug!("{file_name} page {page}: no tables to reprocess");
                return Ok(None);
            };
            let table = normalize(
                extracted.frame,
                &NormalizeOptions {
                    promote_empty_header,
                },
            );
            Ok(Some(TableRecord::build(
                &table,
                &extracted.image,
                file_name,
                page,
            )?))
        })
    }

    /// Copy the header schema of one page's table onto another page's table.
    ///
    /// The source page's first table is normalized and its labels become the
    /// schema; the target page's first table is normalized with header
    /// promotion disabled (its header line is exactly what is being repaired)
    /// and then receives the schema via [`copy_schema`]. With
    /// `restore_first_row` the target's previous labels are reinserted as the
    /// first data row.
    ///
    /// # Errors
    ///
    /// [`Error::NoSourceTable`] / [`Error::NoTargetTable`] when the
    /// respective page has zero detected tables (no partial mutation has
    /// happened at that point), plus the same validation and page-range
    /// errors as [`Engine::reconcile_header`].
    pub fn copy_header(
        &self,
        file_name: &str,
        from_page: usize,
        to_page: usize,
        restore_first_row: bool,
    ) -> Result<TableRecord> {
        require_file_name(file_name)?;
        require_page_number(from_page)?;
        require_page_number(to_page)?;
        self.with_document(file_name, |engine, doc| {
            require_in_range(from_page, doc.page_count())?;
            require_in_range(to_page, doc.page_count())?;

            let source = engine
                .first_table(doc, from_page)?
                .ok_or(Error::NoSourceTable)?;
            let schema = normalize(source.frame, &NormalizeOptions::default());

            let target = engine
                .first_table(doc, to_page)?
                .ok_or(Error::NoTargetTable)?;
            let mut table = normalize(
                target.frame,
                &NormalizeOptions {
                    promote_empty_header: false,
                },
            );
            copy_schema(schema.columns(), &mut table, restore_first_row);

            TableRecord::build(&table, &target.image, file_name, to_page)
        })
    }

    /// First detected table on a page, if any. Later tables are ignored by
    /// the single-table flows, matching detection order.
    fn first_table(&self, doc: &mut B::Doc, page: usize) -> Result<Option<ExtractedTable>> {
        let mut tables = self.backend.extract_tables(doc, page)?;
        if tables.len() > 1 {
            log::debug!("page {page}: {} tables detected, using the first", tables.len());
        }
        Ok(if tables.is_empty() {
            None
        } else {
            Some(tables.swap_remove(0))
        })
    }

    /// Open a document, run `f`, and close the document on every exit path.
    fn with_document<T>(
        &self,
        file_name: &str,
        f: impl FnOnce(&Self, &mut B::Doc) -> Result<T>,
    ) -> Result<T> {
        let mut doc = self.backend.open(file_name)?;
        let result = f(self, &mut doc);
        doc.close();
        if let Err(err) = &result {
            log::warn!("{file_name}: request failed: {err}");
        }
        result
    }
}

fn require_file_name(file_name: &str) -> Result<()> {
    if file_name.trim().is_empty() {
        return Err(Error::Validation("file name is required".to_string()));
    }
    Ok(())
}

fn require_page_number(page: usize) -> Result<()> {
    if page == 0 {
        return Err(Error::Validation("page numbers are 1-based".to_string()));
    }
    Ok(())
}

fn require_in_range(page: usize, page_count: usize) -> Result<()> {
    if page > page_count {
        return Err(Error::PageNotFound { page, page_count });
    }
    Ok(())
}
