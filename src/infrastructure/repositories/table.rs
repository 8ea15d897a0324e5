//! Lock-guarded id-allocating map shared by the in-memory repositories.

use std::collections::HashMap;

use parking_lot::RwLock;

struct Inner<T> {
    next_id: i64,
    rows: HashMap<i64, T>,
}

/// A map from id to row guarded by a single reader/writer lock.
///
/// Ids start at 1 and are never reused. The counter lives under the same lock
/// as the rows, so id allocation and insertion happen as one step. Rows go in
/// and come out by value; nothing outside the table holds a reference into it.
pub(super) struct Table<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Clone> Table<T> {
    pub(super) fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                rows: HashMap::new(),
            }),
        }
    }

    /// Allocate the next id, let `assign` stamp it on `row`, store the row and
    /// return a copy of what was stored.
    pub(super) fn insert(&self, mut row: T, assign: impl FnOnce(&mut T, i64)) -> T {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        assign(&mut row, id);
        inner.rows.insert(id, row.clone());
        row
    }

    pub(super) fn get(&self, id: i64) -> Option<T> {
        self.inner.read().rows.get(&id).cloned()
    }

    /// Copies of every row matching `predicate`, in map order.
    pub(super) fn scan(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.inner
            .read()
            .rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    /// Apply `change` to the stored row. Returns `false` if `id` is absent.
    pub(super) fn update(&self, id: i64, change: impl FnOnce(&mut T)) -> bool {
        match self.inner.write().rows.get_mut(&id) {
            Some(row) => {
                change(row);
                true
            }
            None => false,
        }
    }
}
