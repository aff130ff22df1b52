//! Gesture callbacks and row binding over a row store.
//!
//! # Responsibility
//! - Turn each semantic gesture callback into one store transaction.
//! - Queue `ListChange`s for the view to apply after each dispatch.
//! - Bind holders from rows, including palette colour and badge.
//!
//! # Invariants
//! - Out-of-range positions change nothing and queue nothing.
//! - Store failures are logged and swallowed; gestures never see them.
//! - Archiving keeps completed rows below active rows.
//! - Reverting an add removes only the placeholder this adapter inserted.

use super::{active_count, move_item, ListChange, RowCollection, RowStore, RowVec};
use crate::gesture::GestureCallback;
use crate::holder::palette::{palette_for, Color, Palette};
use crate::holder::RowHolder;
use crate::model::row::{RowId, RowItem};
use crate::view::RowBinder;
use log::{error, info};
use std::marker::PhantomData;

/// Host action for a tap on a row's trailing badge. Returns `true` when the
/// tap was handled.
pub type ClickHandler<T> = Box<dyn FnMut(usize, &T) -> bool + Send>;

pub struct RowAdapter<T, S> {
    store: S,
    palette: Palette,
    dismissable: bool,
    on_click: Option<ClickHandler<T>>,
    changes: Vec<ListChange>,
    /// Placeholder inserted by the last `on_row_added` and not yet reverted.
    placeholder: Option<RowId>,
    exit_requested: bool,
    _row: PhantomData<T>,
}

impl<T, S> RowAdapter<T, S>
where
    T: RowItem,
    S: RowStore<T>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            palette: palette_for(T::KIND),
            dismissable: true,
            on_click: None,
            changes: Vec::new(),
            placeholder: None,
            exit_requested: false,
            _row: PhantomData,
        }
    }

    pub fn with_click_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(usize, &T) -> bool + Send + 'static,
    {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn set_dismissable(&mut self, dismissable: bool) {
        self.dismissable = dismissable;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn rows(&self) -> &[T] {
        self.store.rows()
    }

    pub fn active_count(&self) -> usize {
        active_count(self.store.rows())
    }

    /// Drains changes queued since the last call.
    pub fn take_changes(&mut self) -> Vec<ListChange> {
        std::mem::take(&mut self.changes)
    }

    /// Set once an over-pull asked to leave the screen.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    fn commit<R>(
        &mut self,
        operation: &'static str,
        op: impl FnOnce(&mut RowVec<T>) -> R,
    ) -> Option<R> {
        match self.store.write(op) {
            Ok(result) => Some(result),
            Err(err) => {
                error!(
                    "event={operation} module=list status=error kind={} error={err}",
                    T::KIND.as_str()
                );
                None
            }
        }
    }
}

impl<T, S> GestureCallback for RowAdapter<T, S>
where
    T: RowItem,
    S: RowStore<T>,
{
    fn on_moved(&mut self, from: usize, to: usize) {
        if self.commit("row_move", |rows| move_item(rows, from, to)) == Some(true) {
            self.changes.push(ListChange::Moved { from, to });
        }
    }

    fn on_completed_or_archived(&mut self, position: usize) {
        let Some(row) = self.store.rows().get(position) else {
            return;
        };
        if !row.is_completed() && !row.is_completable() {
            info!("event=row_archive module=list status=rejected position={position}");
            return;
        }

        let completed = self.commit("row_archive", |rows| {
            let active = active_count(rows.as_slice());
            let row = rows.get_mut(position)?;
            let completing = !row.is_completed();
            row.set_completed(completing);
            let target = if completing {
                active.saturating_sub(1)
            } else {
                active
            };
            move_item(rows, position, target);
            Some(completing)
        });
        if let Some(Some(completed)) = completed {
            info!("event=row_archive module=list status=ok position={position} completed={completed}");
            self.changes.push(ListChange::Reset);
        }
    }

    fn on_dismissed(&mut self, position: usize) {
        if self.commit("row_dismiss", |rows| rows.remove_at(position).is_some()) == Some(true) {
            info!("event=row_dismiss module=list status=ok position={position}");
            self.changes.push(ListChange::Removed { position });
        }
    }

    fn on_clicked(&mut self, position: usize) -> bool {
        let Some(row) = self.store.rows().get(position) else {
            return false;
        };
        match self.on_click.as_mut() {
            Some(handler) => handler(position, row),
            None => false,
        }
    }

    fn on_text_changed(&mut self, position: usize, text: &str) {
        if text.trim().is_empty() {
            if self.commit("row_text", |rows| rows.remove_at(position).is_some()) == Some(true) {
                info!("event=row_text module=list status=removed_blank position={position}");
                self.changes.push(ListChange::Removed { position });
            }
            return;
        }

        let updated = self.commit("row_text", |rows| match rows.get_mut(position) {
            Some(row) => {
                row.set_text(text.to_string());
                true
            }
            None => false,
        });
        if updated == Some(true) {
            info!(
                "event=row_text module=list status=ok position={position} chars={}",
                text.chars().count()
            );
            self.changes.push(ListChange::Changed { position });
        }
    }

    fn on_row_added(&mut self) {
        self.placeholder = None;
        let placeholder = T::placeholder();
        let id = placeholder.id();
        if self.commit("row_add", |rows| rows.insert(0, placeholder)) == Some(true) {
            self.placeholder = Some(id);
            self.changes.push(ListChange::Reset);
        }
    }

    fn on_add_reverted(&mut self, refresh_ui: bool) {
        let Some(id) = self.placeholder.take() else {
            info!("event=row_revert module=list status=skipped reason=no_placeholder");
            return;
        };
        if self.store.rows().first().map(|row| row.id()) != Some(id) {
            info!("event=row_revert module=list status=skipped reason=placeholder_not_first");
            return;
        }
        if self.commit("row_revert", |rows| rows.remove_at(0).is_some()) != Some(true) {
            return;
        }
        info!("event=row_revert module=list status=ok refresh_ui={refresh_ui}");
        self.changes.push(if refresh_ui {
            ListChange::Reset
        } else {
            ListChange::Removed { position: 0 }
        });
    }

    fn on_exit(&mut self) {
        self.exit_requested = true;
    }

    fn can_dismiss(&self) -> bool {
        self.dismissable
    }
}

impl<T, S> RowBinder for RowAdapter<T, S>
where
    T: RowItem,
    S: RowStore<T>,
{
    fn row_count(&self) -> usize {
        self.store.len()
    }

    fn row_color(&self, position: usize) -> Color {
        self.palette.color_at(position, self.store.len())
    }

    fn bind_row(&self, holder: &mut RowHolder, position: usize) {
        holder.reset();
        holder.set_base_color(self.row_color(position));
        let Some(row) = self.store.rows().get(position) else {
            return;
        };
        holder.set_text(row.text());
        match row.badge_count() {
            Some(count) => {
                holder.set_badge_visible(true);
                holder.set_badge_count(count);
            }
            None => holder.set_badge_visible(false),
        }
        holder.set_completed(row.is_completed());
    }
}
