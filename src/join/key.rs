/// Composite join keys
///
/// A key is the `|`-joined normalized form of the row's key columns.
/// Example: `"2025-06-18|JUAN"`
use crate::types::Value;

/// Separator between key parts
pub const KEY_SEPARATOR: &str = "|";

/// Normalize one value into its comparable key form.
///
/// - dates and timestamps: `YYYY-MM-DD` (UTC day)
/// - text: trimmed and upper-cased
/// - null: empty string
/// - everything else: canonical string form
pub fn normalize_key_value(value: &Value) -> String {
    match value {
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::Timestamp(ts) => match ts.utc_date() {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            // Out of calendar range; fall back to the raw instant
            None => ts.as_micros().to_string(),
        },
        Value::Text(s) => s.trim().to_uppercase(),
        Value::Null => String::new(),
        other => canonical_string(other),
    }
}

/// Canonical string form, as used for non-text key parts and list items
fn canonical_string(value: &Value) -> String {
    match value {
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => float_to_string(*f),
        Value::Bool(b) => b.to_string(),
        Value::Text(s) => s.clone(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::Timestamp(ts) => ts
            .to_datetime()
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| ts.as_micros().to_string()),
        Value::List(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => canonical_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Null => String::new(),
    }
}

fn float_to_string(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let s = if f > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if f == 0.0 {
        // -0.0 and 0.0 share a key
        "0".to_string()
    } else if f.abs() >= 1e21 || f.abs() < 1e-6 {
        // Exponent form outside [1e-6, 1e21), with an explicit `+`: `1e+21`, `1.5e-7`
        let s = format!("{:e}", f);
        match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => s,
        }
    } else {
        // Display prints the shortest round-trip form, `7` for 7.0
        f.to_string()
    }
}

/// Build the composite key for `row`.
///
/// Key columns missing from `headers` (or beyond the end of the row)
/// contribute an empty part.
pub fn build_key<S: AsRef<str>>(row: &[Value], headers: &[String], key_columns: &[S]) -> String {
    key_columns
        .iter()
        .map(|col| {
            headers
                .iter()
                .position(|h| h == col.as_ref())
                .and_then(|idx| row.get(idx))
                .map(normalize_key_value)
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// Precomputed key column positions for repeated key building over one table
#[derive(Debug, Clone)]
pub struct KeyCodec {
    positions: Vec<Option<usize>>,
}

impl KeyCodec {
    pub fn new<S: AsRef<str>>(headers: &[String], key_columns: &[S]) -> Self {
        let positions = key_columns
            .iter()
            .map(|col| headers.iter().position(|h| h == col.as_ref()))
            .collect();
        Self { positions }
    }

    /// Same result as [`build_key`] with the headers this codec was built for
    pub fn key(&self, row: &[Value]) -> String {
        self.positions
            .iter()
            .map(|pos| {
                pos.and_then(|idx| row.get(idx))
                    .map(normalize_key_value)
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR)
    }
}

/// Blank keys never take part in a join
pub fn is_blank_key(key: &str) -> bool {
    key.trim().is_empty()
}
