/// Materialization: grouped records -> positional matrix
use crate::error::{JoinError, Result};
use crate::types::{is_absent, Matrix, Record, Value};

use super::grouping::Grouping;

/// Concatenate every group's records in key order
pub fn flatten(grouping: Grouping) -> Vec<Record> {
    let mut out = Vec::with_capacity(grouping.total_records());
    for (_, records) in grouping.into_entries() {
        out.extend(records);
    }
    out
}

/// Lay records out as rows in `columns` order.
///
/// A column that is missing from a record, or holds `Null`, takes the
/// default at the same position. Empty text, zero and `false` are kept.
pub fn build_matrix<S: AsRef<str>>(
    records: &[Record],
    columns: &[S],
    defaults: &[Value],
) -> Result<Matrix> {
    if columns.len() != defaults.len() {
        return Err(JoinError::invalid(format!(
            "The 'columns' ({}) and 'defaults' ({}) parameters do not have the same number of elements",
            columns.len(),
            defaults.len()
        )));
    }

    let matrix = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .zip(defaults)
                .map(|(column, default)| {
                    let value = record.get(column.as_ref());
                    if is_absent(value) {
                        default.clone()
                    } else {
                        value.cloned().unwrap_or(Value::Null)
                    }
                })
                .collect()
        })
        .collect();

    Ok(matrix)
}
