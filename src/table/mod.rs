//! Tabular frame data model.
//!
//! Two representations flow through the engine:
//!
//! - [`RawTable`] is the frame exactly as the extraction collaborator produced
//!   it: labels may be blank or duplicated, rows may be ragged, cells may be
//!   missing.
//! - [`NormalizedTable`] is the repaired form with unique, non-empty labels
//!   and rectangular rows. It is only ever constructed by the normalizer (or
//!   by [`NormalizedTable::from_parts`], which checks the invariants).

pub mod normalize;
pub mod reconcile;

pub use normalize::{normalize, NormalizeOptions};
pub use reconcile::copy_schema;

use crate::error::{Error, Result};

/// A tabular frame as delivered by the structure-recognition collaborator.
///
/// No invariants are assumed: column labels may be empty strings or
/// duplicates, rows may be shorter or longer than the label sequence, and a
/// `None` cell is a value the recognizer could not fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column labels in left-to-right order.
    pub columns: Vec<String>,
    /// Data rows in top-to-bottom order; possibly ragged.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Create a raw table from labels and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    /// Convenience constructor for fully-populated string data.
    ///
    /// Every cell is treated as present. Useful in tests and for callers that
    /// already hold dense data.
    pub fn from_strings<C, R, S>(columns: C, rows: R) -> Self
    where
        C: IntoIterator<Item = S>,
        R: IntoIterator<Item = Vec<S>>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        }
    }
}

/// A well-formed table: unique non-empty labels, rectangular rows.
///
/// Invariants (enforced at construction, preserved by every operation):
///
/// - no two labels are equal,
/// - no label trims to the empty string,
/// - every row has exactly `columns.len()` cells.
///
/// Header reconciliation ([`copy_schema`]) is the only operation that mutates
/// an existing `NormalizedTable`, and it never touches existing row content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl NormalizedTable {
    /// Build a normalized table from pre-validated parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the labels are empty/duplicated or any
    /// row width disagrees with the label count. Callers that start from
    /// untrusted frames should use [`normalize`] instead, which repairs rather
    /// than rejects.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for (i, label) in columns.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(Error::Validation(format!("column {} has an empty label", i + 1)));
            }
            if columns[..i].contains(label) {
                return Err(Error::Validation(format!("duplicate column label: {label}")));
            }
        }
        if let Some(row) = rows.iter().find(|row| row.len() != columns.len()) {
            return Err(Error::Validation(format!(
                "row width {} does not match {} columns",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Construct without re-checking invariants. The normalizer upholds them.
    pub(crate) fn new_unchecked(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }

    /// Column labels in left-to-right order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in top-to-bottom order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Consume the table, yielding `(columns, rows)`.
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.columns, self.rows)
    }

    pub(crate) fn set_columns(&mut self, columns: Vec<String>) {
        debug_assert_eq!(columns.len(), self.columns.len());
        self.columns = columns;
    }

    pub(crate) fn prepend_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.insert(0, row);
    }
}
