//! Cross-page header reconciliation.
//!
//! Multi-page tables usually carry their header only on the first page; the
//! recognizer then mistakes the first data row of every following page for a
//! header. [`copy_schema`] transplants the schema discovered on one page onto
//! a table from another page, and can push the target's mistaken header back
//! down into the data where it belongs.

use crate::table::normalize::placeholder;
use crate::table::NormalizedTable;

/// Replace `target`'s column labels with `source` labels.
///
/// The target keeps its column count `n`:
///
/// - with exactly `n` source labels they are adopted verbatim (a schema copy
///   is assumed already well-formed, so no re-deduplication happens here);
/// - extra source labels are silently dropped;
/// - a shortfall is backfilled with `列{position}` placeholders.
///
/// Row content and row count are untouched, except that with
/// `restore_first_row` the target's previous labels are prepended as a new
/// first data row, padded or truncated to width `n`. Never fails.
pub fn copy_schema(source: &[String], target: &mut NormalizedTable, restore_first_row: bool) {
    let n = target.column_count();
    let original = target.columns().to_vec();

    let mut labels: Vec<String> = source.iter().take(n).cloned().collect();
    if source.len() != n {
        log::warn!(
            "source header has {} label(s) for a {}-column target; padding or truncating",
            source.len(),
            n
        );
    }
    for position in labels.len()..n {
        labels.push(placeholder(position + 1));
    }
    target.set_columns(labels);

    if restore_first_row && !original.is_empty() {
        let mut row = original;
        row.truncate(n);
        row.resize(n, String::new());
        target.prepend_row(row);
    }
}
