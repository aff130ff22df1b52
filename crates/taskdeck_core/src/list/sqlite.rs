//! SQLite-backed row store.
//!
//! # Responsibility
//! - Load one list level (tasks of a list, or the task lists) in display
//!   order.
//! - Persist each logical write as a single SQLite transaction.
//!
//! # Invariants
//! - `sort_order` mirrors collection position after every committed write.
//! - A failed write leaves both the database and the in-memory rows as they
//!   were before the write.
//! - Removing a task list cascades to its tasks.

use super::{RowStore, RowVec, StoreError, StoreResult};
use crate::model::row::{RowId, RowItem, Task, TaskList};
use log::{debug, error};
use rusqlite::{params, Connection};
use std::borrow::Borrow;
use std::collections::HashSet;
use uuid::Uuid;

const ROW_SELECT_SQL: &str = "SELECT
    r.uuid,
    r.text,
    r.completed,
    (SELECT COUNT(*) FROM rows c WHERE c.parent_uuid = r.uuid AND c.completed = 0)
FROM rows r
WHERE r.kind = ?1 AND r.parent_uuid IS ?2
ORDER BY r.sort_order ASC, r.rowid ASC";

const ROW_UPSERT_SQL: &str = "INSERT INTO rows (
    uuid,
    kind,
    parent_uuid,
    text,
    completed,
    sort_order
) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT(uuid) DO UPDATE SET
    text = excluded.text,
    completed = excluded.completed,
    sort_order = excluded.sort_order";

/// Raw persisted columns of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    pub uuid: RowId,
    pub text: String,
    pub completed: bool,
    /// Children of this row that are not completed.
    pub active_children: u32,
}

/// Row types that can be rebuilt from the `rows` table.
pub trait StoredRow: RowItem {
    fn from_record(record: RowRecord) -> Self;
}

impl StoredRow for Task {
    fn from_record(record: RowRecord) -> Self {
        Self {
            uuid: record.uuid,
            text: record.text,
            completed: record.completed,
        }
    }
}

impl StoredRow for TaskList {
    fn from_record(record: RowRecord) -> Self {
        Self {
            uuid: record.uuid,
            text: record.text,
            completed: record.completed,
            active_task_count: record.active_children,
        }
    }
}

/// Row store over one `(kind, parent)` scope of the `rows` table.
///
/// `C` is either an owned `Connection` or a borrow of one.
pub struct SqliteRowStore<T, C = Connection>
where
    C: Borrow<Connection>,
{
    conn: C,
    parent: Option<RowId>,
    rows: RowVec<T>,
}

impl<T, C> SqliteRowStore<T, C>
where
    T: StoredRow,
    C: Borrow<Connection>,
{
    /// Loads the rows of `T::KIND` under `parent`.
    ///
    /// # Errors
    /// - `ParentNotFound` when `parent` names no stored task list.
    /// - `InvalidData` when a stored uuid cannot be parsed.
    pub fn open(conn: C, parent: Option<RowId>) -> StoreResult<Self> {
        if let Some(parent_id) = parent {
            let exists: bool = conn.borrow().query_row(
                "SELECT EXISTS(SELECT 1 FROM rows WHERE uuid = ?1 AND kind = 'task_list');",
                [parent_id.to_string()],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(StoreError::ParentNotFound(parent_id));
            }
        }

        let rows = load_rows(conn.borrow(), T::KIND.as_str(), parent)?;
        debug!(
            "event=store_open module=list status=ok kind={} rows={}",
            T::KIND.as_str(),
            rows.len()
        );
        Ok(Self {
            conn,
            parent,
            rows: RowVec::from(rows),
        })
    }

    pub fn parent(&self) -> Option<RowId> {
        self.parent
    }

    pub fn connection(&self) -> &Connection {
        self.conn.borrow()
    }

    /// Re-reads rows and projections (such as badge counts) from disk.
    pub fn reload(&mut self) -> StoreResult<()> {
        let rows = load_rows(self.conn.borrow(), T::KIND.as_str(), self.parent)?;
        self.rows = RowVec::from(rows);
        Ok(())
    }

    fn persist(&self, working: &RowVec<T>) -> StoreResult<()> {
        let conn = self.conn.borrow();
        let tx = conn.unchecked_transaction()?;
        {
            let parent = self.parent.map(|id| id.to_string());
            let mut upsert = tx.prepare_cached(ROW_UPSERT_SQL)?;
            for (order, row) in working.as_slice().iter().enumerate() {
                upsert.execute(params![
                    row.id().to_string(),
                    T::KIND.as_str(),
                    parent.as_deref(),
                    row.text(),
                    bool_to_int(row.is_completed()),
                    order as i64,
                ])?;
            }

            let kept = working
                .as_slice()
                .iter()
                .map(RowItem::id)
                .collect::<HashSet<_>>();
            let mut delete = tx.prepare_cached("DELETE FROM rows WHERE uuid = ?1;")?;
            for row in self.rows.as_slice() {
                if !kept.contains(&row.id()) {
                    delete.execute([row.id().to_string()])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl<T, C> RowStore<T> for SqliteRowStore<T, C>
where
    T: StoredRow,
    C: Borrow<Connection>,
{
    fn rows(&self) -> &[T] {
        self.rows.as_slice()
    }

    fn write<R>(&mut self, op: impl FnOnce(&mut RowVec<T>) -> R) -> StoreResult<R> {
        let mut working = self.rows.clone();
        let result = op(&mut working);
        if let Err(err) = self.persist(&working) {
            error!(
                "event=store_write module=list status=error kind={} error={err}",
                T::KIND.as_str()
            );
            return Err(err);
        }
        self.rows = working;
        Ok(result)
    }
}

fn load_rows<T: StoredRow>(
    conn: &Connection,
    kind: &str,
    parent: Option<RowId>,
) -> StoreResult<Vec<T>> {
    let mut stmt = conn.prepare_cached(ROW_SELECT_SQL)?;
    let raw = stmt
        .query_map(params![kind, parent.map(|id| id.to_string())], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(uuid, text, completed, active_children)| {
            let uuid = Uuid::parse_str(&uuid)
                .map_err(|err| StoreError::InvalidData(format!("invalid uuid `{uuid}`: {err}")))?;
            let active_children = u32::try_from(active_children).map_err(|_| {
                StoreError::InvalidData(format!("invalid child count {active_children}"))
            })?;
            Ok(T::from_record(RowRecord {
                uuid,
                text,
                completed: completed != 0,
                active_children,
            }))
        })
        .collect()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
