//! Task and task-list rows.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another row.
//! - A task list's badge is the number of its tasks that are not completed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a row in the backing store.
pub type RowId = Uuid;

/// Placeholder text for a freshly pulled task.
pub const NEW_TASK_TEXT: &str = "New task";
/// Placeholder text for a freshly pulled task list.
pub const NEW_TASK_LIST_TEXT: &str = "New task list";

/// Which list level a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Row of the inner list.
    Task,
    /// Row of the outer list-of-lists.
    TaskList,
}

impl RowKind {
    /// Stable string id used as the `kind` column value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::TaskList => "task_list",
        }
    }

    /// Parses a stored `kind` column value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "task" => Some(Self::Task),
            "task_list" => Some(Self::TaskList),
            _ => None,
        }
    }
}

/// Attributes of a domain entity that the list core reads and writes.
pub trait RowItem: Clone {
    /// List level this item type is shown on.
    const KIND: RowKind;

    /// Creates the placeholder inserted by pull-to-create.
    fn placeholder() -> Self;

    fn id(&self) -> RowId;
    fn text(&self) -> &str;
    fn set_text(&mut self, text: String);
    fn is_completed(&self) -> bool;
    fn set_completed(&mut self, completed: bool);

    /// Count shown in the trailing badge, if this row has one.
    fn badge_count(&self) -> Option<u32> {
        None
    }

    /// Whether a completion swipe may mark this row completed.
    fn is_completable(&self) -> bool {
        true
    }
}

/// One actionable entry inside a task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub uuid: RowId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Creates an active task with a generated stable id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }
}

impl RowItem for Task {
    const KIND: RowKind = RowKind::Task;

    fn placeholder() -> Self {
        Self::new(NEW_TASK_TEXT)
    }

    fn id(&self) -> RowId {
        self.uuid
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn is_completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

/// One row of the outer list; owns tasks in the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub uuid: RowId,
    pub text: String,
    pub completed: bool,
    /// Projection of the store: tasks under this list that are still open.
    pub active_task_count: u32,
}

impl TaskList {
    /// Creates an empty, active task list with a generated stable id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            active_task_count: 0,
        }
    }
}

impl RowItem for TaskList {
    const KIND: RowKind = RowKind::TaskList;

    fn placeholder() -> Self {
        Self::new(NEW_TASK_LIST_TEXT)
    }

    fn id(&self) -> RowId {
        self.uuid
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn is_completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    fn badge_count(&self) -> Option<u32> {
        Some(self.active_task_count)
    }
}
