//! JSON and CSV writers

use super::helpers::{document_title, extract_quote, extract_username};
use crate::error::Result;
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::io::Write;
use tracing::debug;

/// Columns written by [`export_csv`], in order
pub const CSV_COLUMNS: [&str; 11] = [
    "id",
    "created",
    "updated",
    "user",
    "uri",
    "title",
    "text",
    "tags",
    "quote",
    "group",
    "references",
];

/// Separator for list-valued CSV cells
const LIST_SEPARATOR: &str = "|";

// ============================================================================
// JSON
// ============================================================================

/// Wrap annotations in an export document
pub fn json_document(annotations: &[JsonValue], exported_at: DateTime<Utc>) -> JsonValue {
    json!({
        "exported_at": exported_at.to_rfc3339(),
        "count": annotations.len(),
        "annotations": annotations,
    })
}

/// Write annotations as a pretty-printed JSON export document
///
/// The document is `{"exported_at", "count", "annotations"}` with every
/// annotation kept as received.
pub fn export_json<W: Write>(annotations: &[JsonValue], mut writer: W) -> Result<()> {
    let document = json_document(annotations, Utc::now());
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    debug!("Exported {} annotations as JSON", annotations.len());
    Ok(())
}

// ============================================================================
// CSV
// ============================================================================

/// Write annotations as CSV with a header row
///
/// Nested fields are flattened: the user becomes a bare username, list
/// fields are joined with `|`, and newlines in the text become spaces.
pub fn export_csv<W: Write>(annotations: &[JsonValue], mut writer: W) -> Result<()> {
    write_row(&mut writer, CSV_COLUMNS.iter().copied())?;

    for annotation in annotations {
        let row = csv_row(annotation);
        write_row(&mut writer, row.iter().map(String::as_str))?;
    }

    writer.flush()?;
    debug!("Exported {} annotations as CSV", annotations.len());
    Ok(())
}

fn csv_row(annotation: &JsonValue) -> [String; 11] {
    let field = |key: &str| {
        annotation
            .get(key)
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let list = |key: &str| {
        annotation
            .get(key)
            .and_then(JsonValue::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .collect::<Vec<_>>()
                    .join(LIST_SEPARATOR)
            })
            .unwrap_or_default()
    };

    [
        field("id"),
        field("created"),
        field("updated"),
        extract_username(annotation.get("user").and_then(JsonValue::as_str)),
        field("uri"),
        document_title(annotation),
        field("text").replace('\n', " "),
        list("tags"),
        extract_quote(annotation),
        field("group"),
        list("references"),
    ]
}

fn write_row<'a, W, I>(writer: &mut W, fields: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a str>,
{
    let line = fields
        .into_iter()
        .map(escape_field)
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")?;
    Ok(())
}

/// Quote a field when it contains a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
