use std::collections::HashMap;

/// Session-only store of looked-up covers, keyed by clean title.
#[derive(Debug)]
pub struct CoverCache<V> {
    entries: HashMap<String, V>,
}

impl<V> Default for CoverCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> CoverCache<V> {
    pub fn get(&self, title: &str) -> Option<&V> {
        self.entries.get(title)
    }

    pub fn insert(&mut self, title: impl Into<String>, value: V) {
        self.entries.insert(title.into(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
