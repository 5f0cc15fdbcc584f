//! # pdf_tabular
//!
//! Table normalization and cross-page header reconciliation for PDF table
//! extraction pipelines.
//!
//! Detection and structure recognition are delegated to an external
//! collaborator behind the [`Backend`] trait; this crate owns what happens
//! to a raw frame afterwards:
//!
//! - **Normalization** ([`table::normalize()`]): promote a header row that the
//!   recognizer left in the data, fill blank labels with `列{n}`
//!   placeholders, deduplicate repeated labels, and square off ragged rows.
//! - **Header reconciliation** ([`table::copy_schema`]): transplant the
//!   schema discovered on one page onto a table from another page, with
//!   deterministic padding/truncation and optional restoration of the
//!   target's demoted header as a data row.
//! - **Record serialization** ([`TableRecord`]): package a normalized table
//!   as an HTML fragment, a row-oriented record list, and a base64 PNG crop,
//!   all derived from one table in one pass.
//! - **Orchestration** ([`Engine`]): per-request document lifecycle (opened
//!   once, closed exactly once on every exit path) around the upload,
//!   reprocess, and copy-header flows.
//!
//! ## Quick start
//!
//! ```ignore
//! use pdf_tabular::{Engine, Serialized};
//! use std::sync::Arc;
//!
//! // The inference backend is built once and shared; Serialized gives a
//! // non-re-entrant backend a single execution slot.
//! let backend = Arc::new(Serialized::new(my_tatr_backend()?));
//! let engine = Engine::new(backend);
//!
//! let records = engine.normalize_all("report.pdf")?;
//! let repaired = engine.reconcile_header("report.pdf", 2, true)?;
//! let copied = engine.copy_header("report.pdf", 1, 2, true)?;
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod engine;
pub mod error;
pub mod record;
pub mod table;

pub use backend::{Backend, Document, ExtractedTable, Serialized};
pub use engine::Engine;
pub use error::{Error, ErrorKind, Result};
pub use record::TableRecord;
pub use table::{copy_schema, normalize, NormalizeOptions, NormalizedTable, RawTable};
