//! One list screen: controller, adapter and snapshot view wired together.
//!
//! # Responsibility
//! - Feed host input into the gesture controller.
//! - Apply the adapter's queued list changes to the view after every input,
//!   replaying bound rows into the controller.
//! - Produce a `ViewFrame` per draw pass.
//! - Keep an open edit session on the same row (by `RowItem::id`) while
//!   other rows are dismissed, archived, moved or reloaded.
//!
//! # Invariants
//! - The view never lags the store by more than one call: changes are
//!   drained before any entry point returns.

use crate::config::GestureConfig;
use crate::gesture::{ActionState, GestureController, MotionEvent};
use crate::list::adapter::RowAdapter;
use crate::list::{ListChange, RowStore};
use crate::model::row::{RowId, RowItem};
use crate::view::snapshot::{SnapshotView, ViewFrame};
use crate::view::ListView;
use log::debug;
use serde::Serialize;

/// Result of feeding one input to a screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TouchOutcome {
    pub consumed: bool,
    pub action_state: ActionState,
    pub editing: Option<usize>,
    /// List changes committed by this input, in order.
    pub changes: Vec<ListChange>,
    pub exit_requested: bool,
}

pub struct ListScreen<T, S> {
    controller: GestureController<SnapshotView, RowAdapter<T, S>>,
    /// Edited row as of the last applied change set.
    edit_anchor: Option<(usize, RowId)>,
}

impl<T, S> ListScreen<T, S>
where
    T: RowItem,
    S: RowStore<T>,
{
    /// Binds `view` from `adapter` and attaches a controller to it.
    pub fn new(config: GestureConfig, adapter: RowAdapter<T, S>, mut view: SnapshotView) -> Self {
        view.bind_all(&adapter);
        let mut controller = GestureController::new(config, adapter);
        controller.attach(Some(view));
        debug!(
            "event=screen_open module=screen status=ok kind={}",
            T::KIND.as_str()
        );
        Self {
            controller,
            edit_anchor: None,
        }
    }

    pub fn controller(&self) -> &GestureController<SnapshotView, RowAdapter<T, S>> {
        &self.controller
    }

    pub fn adapter(&self) -> &RowAdapter<T, S> {
        self.controller.callback()
    }

    pub fn adapter_mut(&mut self) -> &mut RowAdapter<T, S> {
        self.controller.callback_mut()
    }

    pub fn view(&self) -> Option<&SnapshotView> {
        self.controller.view()
    }

    pub fn view_mut(&mut self) -> Option<&mut SnapshotView> {
        self.controller.view_mut()
    }

    pub fn handle_touch(&mut self, event: &MotionEvent) -> TouchOutcome {
        let consumed = self.controller.dispatch_touch_event(event);
        self.outcome(consumed)
    }

    /// Advances time for long-press detection without an input event.
    pub fn tick(&mut self, now_ms: u64) -> TouchOutcome {
        let consumed = self.controller.poll_long_press(now_ms);
        self.outcome(consumed)
    }

    /// An ancestor took over the touch stream.
    pub fn disallow_intercept(&mut self) -> TouchOutcome {
        self.controller.on_request_disallow_intercept(true);
        self.outcome(false)
    }

    /// Replaces the open edit field's contents. Returns `false` when no row
    /// is being edited.
    pub fn type_text(&mut self, text: &str) -> bool {
        let Some(position) = self.controller.editing() else {
            return false;
        };
        let Some(holder) = self
            .controller
            .view_mut()
            .and_then(|view| view.holder_mut(position))
        else {
            return false;
        };
        holder.set_edit_text(text);
        true
    }

    /// Rebinds every row, e.g. after the store was reloaded.
    pub fn rebind(&mut self) {
        let anchor = self.current_anchor();
        self.controller.refresh_view(
            |view, adapter| view.bind_all(&*adapter),
            |adapter, position| locate_edit(adapter, anchor, position),
        );
        self.record_anchor();
    }

    /// Runs one draw pass and returns what to render.
    pub fn draw(&mut self) -> Option<ViewFrame> {
        self.controller.on_draw();
        let view = self.controller.view_mut()?;
        view.take_invalidation();
        Some(view.frame_snapshot())
    }

    /// Detaches the controller and returns the adapter with the view.
    pub fn close(mut self) -> (RowAdapter<T, S>, Option<SnapshotView>) {
        let view = self.controller.detach();
        debug!(
            "event=screen_close module=screen status=ok kind={}",
            T::KIND.as_str()
        );
        (self.controller.into_callback(), view)
    }

    /// The recorded anchor, if it still describes the open edit session.
    fn current_anchor(&self) -> Option<(usize, RowId)> {
        self.edit_anchor
            .filter(|(position, _)| self.controller.editing() == Some(*position))
    }

    fn record_anchor(&mut self) {
        self.edit_anchor = self.controller.editing().and_then(|position| {
            self.adapter()
                .rows()
                .get(position)
                .map(|row| (position, row.id()))
        });
    }

    fn outcome(&mut self, consumed: bool) -> TouchOutcome {
        let changes = self.controller.callback_mut().take_changes();
        if !changes.is_empty() {
            let anchor = self.current_anchor();
            self.controller.refresh_view(
                |view, adapter| view.apply_changes(&changes, &*adapter),
                |adapter, position| locate_edit(adapter, anchor, position),
            );
        }
        self.record_anchor();
        TouchOutcome {
            consumed,
            action_state: self.controller.action_state(),
            editing: self.controller.editing(),
            changes,
            exit_requested: self.controller.callback().exit_requested(),
        }
    }
}

fn locate_edit<T, S>(
    adapter: &RowAdapter<T, S>,
    anchor: Option<(usize, RowId)>,
    position: usize,
) -> Option<usize>
where
    T: RowItem,
    S: RowStore<T>,
{
    match anchor {
        Some((_, id)) => adapter.rows().iter().position(|row| row.id() == id),
        None => (position < adapter.rows().len()).then_some(position),
    }
}
