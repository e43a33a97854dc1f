//! Command output: a message for people and, optionally, structured data
//! for `--json`.

use serde::Serialize;
use serde_json::Value;

use crate::error::CliResult;

/// What a command hands back to the shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Out {
    /// Human-readable text, printed in the default mode.
    message: String,

    /// Structured data, printed instead of the message under `--json`.
    data: Option<Value>,
}

impl<S: Into<String>> From<S> for Out {
    fn from(value: S) -> Self {
        Out::message(value)
    }
}

impl Out {
    pub fn new<T: Serialize>(message: impl Into<String>, data: &T) -> CliResult<Self> {
        Ok(Out {
            message: message.into(),
            data: Some(serde_json::to_value(data)?),
        })
    }

    pub fn message(message: impl Into<String>) -> Self {
        Out {
            message: message.into(),
            data: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The text to print for this output.
    pub fn render(&self, json: bool) -> CliResult<String> {
        if !json {
            return Ok(self.message.clone());
        }
        let value = match &self.data {
            Some(data) => data.clone(),
            None => serde_json::json!({ "message": self.message }),
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

// =============================================================================
// Tables
// =============================================================================

/// Left-aligned text columns; columns listed in `right` are right-aligned.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    right: Vec<usize>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            right: Vec::new(),
        }
    }

    /// Right-aligns the given columns (amounts, counts).
    pub fn align_right(mut self, columns: &[usize]) -> Self {
        self.right = columns.to_vec();
        self
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let w = cell.chars().count();
                match widths.get_mut(i) {
                    Some(width) => *width = (*width).max(w),
                    None => widths.push(w),
                }
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.line(&self.headers, &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            lines.push(self.line(row, &widths));
        }
        lines.join("\n")
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                if self.right.contains(&i) {
                    format!("{:>width$}", cell, width = width)
                } else {
                    format!("{:<width$}", cell, width = width)
                }
            })
            .collect();
        padded.join("  ").trim_end().to_string()
    }
}

/// `label ........ value` pairs for statements.
pub fn key_values(pairs: &[(&str, String)]) -> String {
    let width = pairs
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{:<width$}  {:>16}", k, v, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
