/// Row projection: positional row -> named [`Record`]
use crate::error::{JoinError, Result};
use crate::types::{Record, Value};

/// Project `row` into a record.
///
/// Columns are emitted in header order, not `selected` order. When
/// `selected` is `None` every header is kept; names in `selected` that are
/// not headers are ignored. With a `prefix` each column becomes
/// `prefix.header`.
pub fn project<S: AsRef<str>>(
    row: &[Value],
    headers: &[String],
    selected: Option<&[S]>,
    prefix: Option<&str>,
) -> Result<Record> {
    if row.len() != headers.len() {
        return Err(JoinError::invalid(format!(
            "The number of row values ({}) and headers ({}) must match",
            row.len(),
            headers.len()
        )));
    }

    if let Some(sel) = selected {
        if sel.is_empty() {
            return Err(JoinError::invalid(
                "The 'selected' parameter must include at least one column name",
            ));
        }
    }

    let mut record = Record::with_capacity(selected.map_or(headers.len(), |s| s.len()));

    for (header, value) in headers.iter().zip(row) {
        let keep = selected.map_or(true, |sel| sel.iter().any(|s| s.as_ref() == header));
        if !keep {
            continue;
        }

        let column = match prefix {
            Some(p) if !p.is_empty() => format!("{}.{}", p, header),
            _ => header.clone(),
        };
        record.insert(column, value.clone());
    }

    Ok(record)
}

/// Projection plan for one table: header positions resolved once, then
/// applied to every row.
///
/// An empty selection is only reported when a row is actually projected, so
/// a side with no selected columns is fine as long as it contributes no rows.
#[derive(Debug, Clone)]
pub struct RowProjector {
    /// (position in row, output column name)
    columns: Vec<(usize, String)>,
    width: usize,
    empty_selection: bool,
}

impl RowProjector {
    /// Same selection rules as [`project`].
    pub fn new<S: AsRef<str>>(headers: &[String], selected: Option<&[S]>, prefix: Option<&str>) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| selected.map_or(true, |sel| sel.iter().any(|s| s.as_ref() == *h)))
            .map(|(idx, h)| {
                let name = match prefix {
                    Some(p) if !p.is_empty() => format!("{}.{}", p, h),
                    _ => h.clone(),
                };
                (idx, name)
            })
            .collect();

        Self {
            columns,
            width: headers.len(),
            empty_selection: selected.map_or(false, |sel| sel.is_empty()),
        }
    }

    pub fn project(&self, row: &[Value]) -> Result<Record> {
        if row.len() != self.width {
            return Err(JoinError::invalid(format!(
                "The number of row values ({}) and headers ({}) must match",
                row.len(),
                self.width
            )));
        }

        if self.empty_selection {
            return Err(JoinError::invalid(
                "The 'selected' parameter must include at least one column name",
            ));
        }

        let mut record = Record::with_capacity(self.columns.len());
        for (idx, name) in &self.columns {
            record.insert(name.clone(), row[*idx].clone());
        }
        Ok(record)
    }
}
