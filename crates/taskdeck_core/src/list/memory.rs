//! In-memory row store.
//!
//! Writes run on a cloned working copy that replaces the committed rows
//! only once `op` returns, so a panicking operation leaves nothing behind.

use super::{RowStore, RowVec, StoreResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryRowStore<T> {
    rows: RowVec<T>,
}

impl<T: Clone> MemoryRowStore<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: RowVec::from(rows),
        }
    }
}

impl<T: Clone> RowStore<T> for MemoryRowStore<T> {
    fn rows(&self) -> &[T] {
        self.rows.as_slice()
    }

    fn write<R>(&mut self, op: impl FnOnce(&mut RowVec<T>) -> R) -> StoreResult<R> {
        let mut working = self.rows.clone();
        let result = op(&mut working);
        self.rows = working;
        Ok(result)
    }
}
