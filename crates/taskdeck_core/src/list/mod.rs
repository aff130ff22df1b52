//! Ordered row collections and the stores that persist them.
//!
//! # Responsibility
//! - Define the ordered collection contract gesture-driven mutations run on.
//! - Wrap every logical list operation in one store transaction.
//! - Describe list changes so views can rebind only what moved.
//!
//! # Invariants
//! - Collection order is display order.
//! - Completed rows sit below active rows once an archive settles.
//! - Out-of-range positions are silent no-ops, never panics.
//!
//! # See also
//! - `gesture::callback` for the operations that drive these mutations.

use crate::db::DbError;
use crate::model::row::{RowId, RowItem};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod adapter;
pub mod memory;
pub mod sqlite;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for row store loads and transactional writes.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidData(String),
    ParentNotFound(RowId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted row data: {message}"),
            Self::ParentNotFound(id) => write!(f, "parent task list not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::ParentNotFound(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Ordered, position-addressed collection with stable item identity.
pub trait RowCollection<T> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, position: usize) -> Option<&T>;
    fn get_mut(&mut self, position: usize) -> Option<&mut T>;

    /// Inserts at `position` (`position == len` appends). Returns `false`
    /// when `position` is out of range.
    fn insert(&mut self, position: usize, item: T) -> bool;

    fn remove_at(&mut self, position: usize) -> Option<T>;

    /// Swaps the rows at `position` and `position + 1`.
    fn swap_adjacent(&mut self, position: usize) -> bool;
}

/// `Vec`-backed collection used as the working copy inside store writes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowVec<T>(Vec<T>);

impl<T> RowVec<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<Vec<T>> for RowVec<T> {
    fn from(value: Vec<T>) -> Self {
        Self(value)
    }
}

impl<T> RowCollection<T> for RowVec<T> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn get(&self, position: usize) -> Option<&T> {
        self.0.get(position)
    }

    fn get_mut(&mut self, position: usize) -> Option<&mut T> {
        self.0.get_mut(position)
    }

    fn insert(&mut self, position: usize, item: T) -> bool {
        if position > self.0.len() {
            return false;
        }
        self.0.insert(position, item);
        true
    }

    fn remove_at(&mut self, position: usize) -> Option<T> {
        (position < self.0.len()).then(|| self.0.remove(position))
    }

    fn swap_adjacent(&mut self, position: usize) -> bool {
        if position + 1 >= self.0.len() {
            return false;
        }
        self.0.swap(position, position + 1);
        true
    }
}

/// Moves the row at `from` to `to` through a chain of adjacent swaps.
///
/// Returns `false` without touching the collection when `from == to` or
/// either position is out of range.
pub fn move_item<T, C>(rows: &mut C, from: usize, to: usize) -> bool
where
    C: RowCollection<T> + ?Sized,
{
    let len = rows.len();
    if from == to || from >= len || to >= len {
        return false;
    }
    if from < to {
        for position in from..to {
            rows.swap_adjacent(position);
        }
    } else {
        for position in (to..from).rev() {
            rows.swap_adjacent(position);
        }
    }
    true
}

/// Number of rows not yet completed.
pub fn active_count<T: RowItem>(rows: &[T]) -> usize {
    rows.iter().filter(|row| !row.is_completed()).count()
}

/// Transaction boundary around one ordered collection.
pub trait RowStore<T> {
    /// Current committed rows in display order.
    fn rows(&self) -> &[T];

    /// Runs `op` against a working copy and commits the result as one
    /// transaction. On error the committed rows stay untouched.
    fn write<R>(&mut self, op: impl FnOnce(&mut RowVec<T>) -> R) -> StoreResult<R>;

    fn len(&self) -> usize {
        self.rows().len()
    }

    fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// Structural change a view must reflect after a store write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListChange {
    Inserted { position: usize },
    Removed { position: usize },
    Moved { from: usize, to: usize },
    Changed { position: usize },
    /// Everything may have changed; rebind all rows.
    Reset,
}
