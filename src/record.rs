//! Externally visible table records.
//!
//! A [`TableRecord`] packages one normalized table with its provenance and
//! two derived views: an HTML fragment and a row-oriented record list. Both
//! views are produced in a single pass over the same [`NormalizedTable`], so
//! they always agree on column order and labels.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageFormat};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::NormalizedTable;

/// One extracted table, ready for a response body.
///
/// Field names follow the wire format of the service this engine backs
/// (`fileName`, `pageIndex`, `html_table`, ...). `columns` is always present
/// and always matches the keys of every entry in `data`; missing cell values
/// are empty strings, never null or omitted keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Identifier of the document the table came from.
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// 1-based page the table was detected on.
    #[serde(rename = "pageIndex")]
    pub page_number: usize,
    /// Column labels, unique and non-empty, in left-to-right order.
    pub columns: Vec<String>,
    /// One ordered label-to-value mapping per data row.
    pub data: Vec<IndexMap<String, String>>,
    /// HTML rendering of the table.
    #[serde(rename = "html_table")]
    pub html: String,
    /// Rendered crop of the table region as a `data:image/png;base64,` URI.
    pub image: String,
}

impl TableRecord {
    /// Serialize a normalized table and its rendered crop into a record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Image`] if PNG encoding of the crop fails;
    /// everything else is infallible.
    pub fn build(
        table: &NormalizedTable,
        image: &DynamicImage,
        file_name: &str,
        page_number: usize,
    ) -> Result<Self> {
        let data = table
            .rows()
            .iter()
            .map(|row| {
                table
                    .columns()
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect();

        Ok(Self {
            file_name: file_name.to_string(),
            page_number,
            columns: table.columns().to_vec(),
            data,
            html: render_html(table),
            image: png_data_uri(image)?,
        })
    }
}

/// Render a table as an HTML fragment with `<thead>` and `<tbody>`.
fn render_html(table: &NormalizedTable) -> String {
    let mut html = String::from("<table border=\"1\" class=\"dataframe\">\n<thead>\n<tr>");
    for label in table.columns() {
        html.push_str("<th>");
        html.push_str(&escape_html(label));
        html.push_str("</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in table.rows() {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&escape_html(cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

/// Encode an image as a PNG `data:` URI.
fn png_data_uri(image: &DynamicImage) -> Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(format!(
        "data:image/png;base64,{}",
        BASE64.encode(buffer.into_inner())
    ))
}

/// Escape HTML special characters.
///
/// Replaces &, <, >, ", and ' with their HTML entity equivalents.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
