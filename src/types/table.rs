/// In-memory table: a name, ordered headers and positional rows
use crate::error::{JoinError, Result};
use serde::{Deserialize, Serialize};

use super::{Row, Value};

/// Table definition with its data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name (or step alias for materialized join outputs)
    pub name: String,
    /// Column names (ordered)
    pub headers: Vec<String>,
    /// Rows aligned to `headers`
    pub data: Vec<Row>,
}

/// Blank names are rejected everywhere a name is expected
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

impl Table {
    /// Create a table, validating name, headers and row arity
    pub fn new(name: impl Into<String>, headers: Vec<String>, data: Vec<Row>) -> Result<Self> {
        let table = Self::new_unchecked(name, headers, data);
        table.validate()?;
        Ok(table)
    }

    /// Create a table without validation.
    ///
    /// The pipeline re-validates every declared table before joining, so this
    /// is mostly useful for building deliberately malformed fixtures.
    pub fn new_unchecked(name: impl Into<String>, headers: Vec<String>, data: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            headers,
            data,
        }
    }

    /// Convenience constructor from string-ish headers
    pub fn from_parts<S: AsRef<str>>(name: &str, headers: &[S], data: Vec<Row>) -> Result<Self> {
        let headers = headers.iter().map(|h| h.as_ref().to_string()).collect();
        Self::new(name, headers, data)
    }

    /// Build a table from a JSON array of arrays
    pub fn from_json(name: &str, headers: &[&str], data: serde_json::Value) -> Result<Self> {
        let rows = match data {
            serde_json::Value::Array(rows) => rows,
            _ => {
                return Err(JoinError::invalid(format!(
                    "The 'data' parameter of table '{}' is not a valid array",
                    name
                )))
            }
        };

        let mut out = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            match row {
                serde_json::Value::Array(cells) => {
                    out.push(cells.into_iter().map(Value::from).collect())
                }
                _ => {
                    return Err(JoinError::invalid(format!(
                        "Row {} of table '{}' is not a valid array",
                        i, name
                    )))
                }
            }
        }

        Self::from_parts(name, headers, out)
    }

    /// Get column position by name.
    ///
    /// Always read from `headers`, so deserialized tables and edited headers
    /// resolve the same way. With duplicate headers the first occurrence wins.
    pub fn get_column_position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.get_column_position(name).is_some()
    }

    /// Get number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Check name, headers and every row's arity
    pub fn validate(&self) -> Result<()> {
        if !is_valid_name(&self.name) {
            return Err(JoinError::invalid(format!(
                "The 'name' parameter '{}' is not a valid name",
                self.name
            )));
        }

        for (i, header) in self.headers.iter().enumerate() {
            if !is_valid_name(header) {
                return Err(JoinError::invalid(format!(
                    "Header {} of table '{}' is not a valid header",
                    i, self.name
                )));
            }
        }

        for (i, row) in self.data.iter().enumerate() {
            self.validate_row(row).map_err(|msg| {
                JoinError::invalid(format!("Row {} of table '{}': {}", i, self.name, msg))
            })?;
        }

        Ok(())
    }

    /// Validate a row against this table's headers
    pub fn validate_row(&self, row: &[Value]) -> std::result::Result<(), String> {
        if row.len() != self.headers.len() {
            return Err(format!(
                "Column count mismatch: expected {}, got {}",
                self.headers.len(),
                row.len()
            ));
        }
        Ok(())
    }
}
