use super::models::EntityId;
use std::collections::BTreeMap;

/// Identifier-keyed collection with its own auto-incrementing counter.
///
/// Ids start at 1 and are never reused, so iterating the map in key order is
/// iterating in insertion order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<EntityId, T>,
    next_id: EntityId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    /// Assign the next id, build the row from it and store it
    pub fn insert_with(&mut self, build: impl FnOnce(EntityId) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;

        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    /// Replace an existing row, keeping its id
    pub fn replace(&mut self, id: EntityId, row: T) {
        self.rows.insert(id, row);
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Clone every row in insertion order
    pub fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}
