//! Table normalization: header promotion and label repair.
//!
//! Structure recognizers routinely hand back frames whose header line is
//! wrong in one of a few recurring ways: every label blank (the real header
//! landed in row one), blank labels scattered between real ones, or the same
//! label recognized twice. [`normalize`] repairs all of these in a fixed
//! order and always yields a frame satisfying the [`NormalizedTable`]
//! invariants, no matter how malformed the input is.

use std::collections::{HashMap, HashSet};

use crate::table::{NormalizedTable, RawTable};

/// Prefix of synthetic column labels (`列1`, `列2`, ...), kept byte-for-byte
/// compatible with the wire format consumers already parse.
pub const PLACEHOLDER_PREFIX: &str = "列";

/// Synthetic label for the given 1-based column position.
pub(crate) fn placeholder(position: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{position}")
}

/// Options controlling normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// When every label trims to empty and the frame has more than one row,
    /// promote the first data row to be the header. Defaults to `true`.
    pub promote_empty_header: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            promote_empty_header: true,
        }
    }
}

/// Normalize a raw frame into a well-formed table.
///
/// The transform is pure and never fails:
///
/// 1. **Header promotion** (if enabled): when every label trims to empty and
///    there is more than one row, the first row becomes the header and is
///    removed from the data. A frame with at most one row keeps its blank
///    labels and relies on step 2.
/// 2. **Label repair** (always): blank labels are filled with `列{position}`
///    (1-based, counted over the whole label sequence), then a left-to-right
///    scan suffixes repeated labels with `_{n}`, `n` starting at 1 for the
///    second appearance. Filling strictly precedes deduplication so two
///    synthetic placeholders can never collide.
/// 3. **Row repair**: rows are padded with empty strings or truncated to the
///    resolved column count, and missing cells become empty strings.
///
/// Normalizing an already-normalized table is a no-op.
pub fn normalize(raw: RawTable, options: &NormalizeOptions) -> NormalizedTable {
    let RawTable { mut columns, mut rows } = raw;

    let header_blank = columns.iter().all(|label| label.trim().is_empty());
    if options.promote_empty_header && header_blank && rows.len() > 1 {
        let first = rows.remove(0);
        columns = first
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();
        log::debug!("all labels blank; promoted first row to header ({} labels)", columns.len());
    }

    // A frame without any labels resolves its width from the widest row.
    let width = if columns.is_empty() {
        rows.iter().map(Vec::len).max().unwrap_or(0)
    } else {
        columns.len()
    };
    columns.resize(width, String::new());

    let columns = repair_labels(columns);

    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| {
            let mut cells: Vec<String> = row
                .into_iter()
                .take(width)
                .map(Option::unwrap_or_default)
                .collect();
            cells.resize(width, String::new());
            cells
        })
        .collect();

    NormalizedTable::new_unchecked(columns, rows)
}

/// Fill blank labels with positional placeholders, then deduplicate.
///
/// Deduplication tracks an occurrence counter per distinct input label; when
/// a suffixed candidate happens to collide with a label already emitted (for
/// example a literal `X_1` following two `X`s) the counter keeps advancing
/// until a free name is found, so the uniqueness invariant holds even for
/// adversarial input.
fn repair_labels(columns: Vec<String>) -> Vec<String> {
    let mut repaired = 0usize;
    let filled: Vec<String> = columns
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            if label.trim().is_empty() {
                repaired += 1;
                placeholder(i + 1)
            } else {
                label
            }
        })
        .collect();
    if repaired > 0 {
        log::debug!("filled {repaired} blank label(s) with placeholders");
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut used: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(filled.len());
    for label in filled {
        let seen = counts.entry(label.clone()).or_insert(0);
        *seen += 1;
        let mut candidate = if *seen == 1 {
            label.clone()
        } else {
            format!("{}_{}", label, *seen - 1)
        };
        while !used.insert(candidate.clone()) {
            *seen += 1;
            candidate = format!("{}_{}", label, *seen - 1);
        }
        unique.push(candidate);
    }
    unique
}
