use std::collections::HashMap;

/// Append-only table: records in insertion order, looked up by key.
#[derive(Debug, Clone)]
pub(crate) struct Table<T> {
    rows: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Table<T> {
    pub(crate) fn new() -> Self {
        Table {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Appends `row` under `key`. Returns `None` if the key is taken.
    pub(crate) fn insert(&mut self, key: String, row: T) -> Option<&T> {
        if self.index.contains_key(&key) {
            return None;
        }
        let position = self.rows.len();
        self.rows.push(row);
        self.index.insert(key, position);
        self.rows.get(position)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).and_then(|&i| self.rows.get(i))
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn rows(&self) -> &[T] {
        &self.rows
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table::new()
    }
}
