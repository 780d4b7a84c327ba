/// Ordered key -> records grouping
///
/// Keys keep first-insertion order; `set` on an existing key replaces its
/// records without moving it.
use crate::types::Record;
use ahash::AHashMap;

#[derive(Debug, Clone, Default)]
pub struct Grouping {
    entries: Vec<(String, Vec<Record>)>,
    index: AHashMap<String, usize>,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&[Record]> {
        self.index
            .get(key)
            .map(|&idx| self.entries[idx].1.as_slice())
    }

    /// Append `record` to the group for `key`, creating it if needed
    pub fn push(&mut self, key: &str, record: Record) {
        self.group_mut(key).push(record);
    }

    /// Group for `key`, created empty at the end if missing
    pub fn group_mut(&mut self, key: &str) -> &mut Vec<Record> {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.entries.push((key.to_string(), Vec::new()));
                let idx = self.entries.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Replace the records under `key` in place, or append a new key
    pub fn set(&mut self, key: String, records: Vec<Record>) {
        match self.index.get(&key) {
            Some(&idx) => self.entries[idx].1 = records,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, records));
            }
        }
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total records across all keys
    pub fn total_records(&self) -> usize {
        self.entries.iter().map(|(_, group)| group.len()).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.entries
            .iter()
            .map(|(key, group)| (key.as_str(), group.as_slice()))
    }

    /// Records of every key, in key order then insertion order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().flat_map(|(_, group)| group.iter())
    }

    pub fn into_entries(self) -> Vec<(String, Vec<Record>)> {
        self.entries
    }
}
