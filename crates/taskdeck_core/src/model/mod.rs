//! Row domain model for the two list levels.
//!
//! # Responsibility
//! - Define the task and task-list records displayed as list rows.
//! - Expose the attributes the gesture core and adapter consume through
//!   the `RowItem` capability trait.
//!
//! # Invariants
//! - Every row is identified by a stable `RowId`.
//! - Gesture math never uses the id; it works on positions only.

pub mod row;
