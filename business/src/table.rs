//! Generic table derivation for a fetched JSON collection.
//!
//! Column policy: the column set is the key order of the FIRST record. Later
//! records are looked up by those keys only; their extra keys are dropped and
//! missing keys render as empty cells. This is a deliberate simplification and
//! will hide fields if a response mixes record shapes.
//!
//! Length policy: cells longer than [`MAX_CELL_CHARS`] Unicode scalar values
//! keep that many and get [`ELLIPSIS`] appended. Counting is by `char`, not by
//! UTF-16 code unit as a browser `substring` would, so a cut never splits a
//! surrogate pair and an emoji counts as one character.
//!
//! All cells and headers are stored already escaped for markup, so any surface
//! that receives a [`TableView`] can insert it verbatim.

use serde_json::Value;

use crate::escape::escape_html;

/// Rendered in place of rows when the collection is empty.
pub const EMPTY_PLACEHOLDER: &str = "No data available";

/// Longest string cell, in characters, before truncation kicks in.
pub const MAX_CELL_CHARS: usize = 50;

/// Appended to truncated cells.
pub const ELLIPSIS: &str = "...";

/// Headers and a grid of display strings derived from one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableView {
    /// Derive a table from the records of one response.
    ///
    /// Elements that are not JSON objects contribute no columns and render as
    /// rows of empty cells.
    pub fn from_records(records: &[Value]) -> Self {
        let keys: Vec<&str> = records
            .first()
            .and_then(Value::as_object)
            .map(|first| first.keys().map(String::as_str).collect())
            .unwrap_or_default();

        let rows = records
            .iter()
            .map(|record| {
                keys.iter()
                    .map(|key| escape_html(&display_value(record.get(*key))))
                    .collect()
            })
            .collect();

        Self {
            columns: keys.into_iter().map(escape_html).collect(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// True when the collection had no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bootstrap-flavoured table markup, built in one piece.
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div class="table-responsive"><table class="table table-striped">"#);

        if self.is_empty() {
            html.push_str(r#"<tbody><tr><td colspan="100%" class="text-center text-muted">"#);
            html.push_str(EMPTY_PLACEHOLDER);
            html.push_str("</td></tr></tbody>");
        } else {
            html.push_str("<thead><tr>");
            for column in &self.columns {
                html.push_str("<th>");
                html.push_str(column);
                html.push_str("</th>");
            }
            html.push_str("</tr></thead><tbody>");
            for row in &self.rows {
                html.push_str("<tr>");
                for cell in row {
                    html.push_str("<td>");
                    html.push_str(cell);
                    html.push_str("</td>");
                }
                html.push_str("</tr>");
            }
            html.push_str("</tbody>");
        }

        html.push_str("</table></div>");
        html
    }
}

/// Unescaped display text for one cell.
///
/// Nested values are serialized to JSON first and then go through the same
/// length limit as plain strings.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => truncate(s),
        Some(nested @ (Value::Object(_) | Value::Array(_))) => truncate(&nested.to_string()),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
    }
}

fn truncate(s: &str) -> String {
    match s.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &s[..cut]),
        None => s.to_owned(),
    }
}
