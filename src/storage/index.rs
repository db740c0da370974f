//! Equality indexes over single columns.

use std::collections::HashMap;

use crate::types::Value;

/// An equality index: a mapping from a column's value to the positions of
/// the rows bearing it. NULL is never indexed, which is what lets unique
/// columns hold any number of NULLs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Index {
    entries: HashMap<Value, Vec<usize>>,
}

impl Index {
    pub fn new() -> Index {
        Index {
            entries: HashMap::new(),
        }
    }

    /// The row positions carrying this value, if any.
    pub fn get(&self, value: &Value) -> Option<&[usize]> {
        self.entries.get(value).map(Vec::as_slice)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.entries.contains_key(value)
    }

    /// True if some row other than `position` carries this value.
    pub fn conflicts(&self, value: &Value, position: usize) -> bool {
        self.get(value)
            .is_some_and(|positions| positions.iter().any(|&p| p != position))
    }

    /// Records `position` as carrying `value`. NULLs are skipped.
    pub fn insert(&mut self, value: &Value, position: usize) {
        if value.is_null() {
            return;
        }
        self.entries.entry(value.clone()).or_default().push(position);
    }

    /// Drops one position entry, removing the value's slot once it empties.
    pub fn remove(&mut self, value: &Value, position: usize) {
        if let Some(positions) = self.entries.get_mut(value) {
            positions.retain(|&p| p != position);
            if positions.is_empty() {
                self.entries.remove(value);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove() {
        let mut index = Index::new();
        index.insert(&Value::Int(1), 0);
        index.insert(&Value::Int(1), 2);
        index.insert(&Value::Int(2), 1);
        assert_eq!(index.get(&Value::Int(1)), Some(&[0, 2][..]));

        index.remove(&Value::Int(1), 0);
        assert_eq!(index.get(&Value::Int(1)), Some(&[2][..]));

        // The value's slot disappears with its last position.
        index.remove(&Value::Int(1), 2);
        assert_eq!(index.get(&Value::Int(1)), None);
        assert!(!index.contains(&Value::Int(1)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn null_is_not_indexed() {
        let mut index = Index::new();
        index.insert(&Value::Null, 0);
        assert!(index.is_empty());
    }

    #[test]
    fn conflicts_ignores_own_position() {
        let mut index = Index::new();
        index.insert(&Value::Str("a".into()), 3);
        assert!(!index.conflicts(&Value::Str("a".into()), 3));
        assert!(index.conflicts(&Value::Str("a".into()), 4));
        assert!(!index.conflicts(&Value::Str("b".into()), 4));
    }
}
