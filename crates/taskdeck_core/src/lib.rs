//! Core of the taskdeck to-do app.
//! Owns touch gesture recognition, per-row visual state and the list glue
//! that turns gestures into store transactions.

pub mod config;
pub mod db;
pub mod gesture;
pub mod holder;
pub mod list;
pub mod logging;
pub mod model;
pub mod screen;
pub mod view;

pub use config::{ConfigError, CoreConfig, GestureConfig, LoggingConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use gesture::{
    ActionState, GestureCallback, GestureController, MotionEvent, Pointer, PointerId, PullState,
    TouchAction,
};
pub use holder::palette::{Color, Palette};
pub use holder::{HolderSnapshot, HolderStyle, RowHolder};
pub use list::adapter::RowAdapter;
pub use list::memory::MemoryRowStore;
pub use list::sqlite::SqliteRowStore;
pub use list::{ListChange, RowCollection, RowStore, RowVec, StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::row::{RowId, RowItem, RowKind, Task, TaskList};
pub use screen::{ListScreen, TouchOutcome};
pub use view::snapshot::{SnapshotView, ViewFrame, Viewport};
pub use view::{Frame, ListView, RowBinder, ViewId};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
