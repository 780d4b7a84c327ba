//! Named record flowing between projection, joining and matrix building

use super::Value;
use serde::{Deserialize, Serialize};

/// Ordered mapping from column name to value.
///
/// Insertion order is kept. Re-inserting an existing column overwrites the
/// value in place; new columns are appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.fields.iter().position(|(name, _)| name == column)
    }

    /// Set `column`, returning the previous value if it existed
    pub fn insert(&mut self, column: impl Into<String>, value: Value) -> Option<Value> {
        let column = column.into();
        match self.position(&column) {
            Some(idx) => Some(std::mem::replace(&mut self.fields[idx].1, value)),
            None => {
                self.fields.push((column, value));
                None
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, column: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.position(column).map(|idx| self.fields.remove(idx).1)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Override-merge: a copy of `self` with every column of `other`
    /// assigned on top. `other` wins on name collision.
    pub fn merge(&self, other: &Record) -> Record {
        let mut merged = Record::with_capacity(self.len() + other.len());
        merged.fields.extend(self.fields.iter().cloned());
        for (column, value) in &other.fields {
            merged.insert(column.clone(), value.clone());
        }
        merged
    }

    /// Copy of this record without `remove` columns and with `add` merged on top.
    ///
    /// Handy inside post-processors that reshape a row.
    pub fn process(&self, remove: &[&str], add: &Record) -> Record {
        let mut copy = self.clone();
        for column in remove {
            copy.remove(column);
        }
        copy.merge(add)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut r = record(&[("a", Value::Integer(1)), ("b", Value::Integer(2))]);
        let old = r.insert("a", Value::Integer(9));

        assert_eq!(old, Some(Value::Integer(1)));
        assert_eq!(r.columns().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(r.get("a"), Some(&Value::Integer(9)));
    }

    #[test]
    fn test_merge_later_wins() {
        let left = record(&[("id", Value::Integer(1)), ("name", Value::text("Ann"))]);
        let right = record(&[("name", Value::text("Bob")), ("item", Value::text("Pen"))]);

        let merged = left.merge(&right);

        assert_eq!(merged.columns().collect::<Vec<_>>(), vec!["id", "name", "item"]);
        assert_eq!(merged.get("name"), Some(&Value::text("Bob")));
        // Inputs are untouched
        assert_eq!(left.get("name"), Some(&Value::text("Ann")));
    }

    #[test]
    fn test_process_removes_and_adds() {
        let r = record(&[("a", Value::Integer(1)), ("b", Value::Integer(2))]);
        let add = record(&[("c", Value::Integer(3)), ("a", Value::Integer(10))]);

        let out = r.process(&["b"], &add);

        assert_eq!(out.columns().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(out.get("a"), Some(&Value::Integer(10)));
        assert!(!out.contains("b"));
    }

    #[test]
    fn test_get_mut_and_remove() {
        let mut r = record(&[("a", Value::Null)]);
        *r.get_mut("a").unwrap() = Value::Bool(true);
        assert_eq!(r.get("a"), Some(&Value::Bool(true)));

        assert_eq!(r.remove("a"), Some(Value::Bool(true)));
        assert!(r.is_empty());
        assert_eq!(r.remove("a"), None);
    }
}
