//! Touch gesture recognition for list rows.
//!
//! # Responsibility
//! - Turn raw pointer streams into reorder, complete/archive, dismiss,
//!   inline-edit and pull-to-create operations.
//! - Drive per-row visual feedback while a gesture is in progress.
//!
//! # Invariants
//! - Single-threaded: every entry point runs on the host's UI thread.
//! - State changes on input events; transforms are applied in `on_draw`.
//!
//! # See also
//! - `holder` for the per-row visual state being driven.
//! - `list::adapter` for the callback implementation over a row store.

pub mod callback;
pub mod controller;
pub mod event;
pub mod geometry;
pub mod state;
pub mod tap;

pub use callback::GestureCallback;
pub use controller::GestureController;
pub use event::{MotionEvent, Pointer, PointerId, TouchAction};
pub use state::{ActionState, PullState};
