//! Uniform-row list view backed by plain holders.
//!
//! # Responsibility
//! - Lay out rows of one fixed height under a scroll offset and top
//!   padding, for hosts that only report viewport metrics.
//! - Keep one `RowHolder` per data row and rebind it on list changes.
//! - Export what to draw as a serializable `ViewFrame`.
//!
//! # Invariants
//! - After `apply_changes`, there is exactly one holder per data row.
//! - A `Moved` change carries the holder (and its transform) along with
//!   the row instead of rebinding it.

use super::{Frame, ListView, RowBinder, ViewId};
use crate::holder::{HolderSnapshot, HolderStyle, RowHolder};
use crate::list::ListChange;
use serde::Serialize;
use std::collections::BTreeSet;

/// Viewport metrics supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub row_height: f32,
    /// Width of the trailing badge tap zone on rows that show a badge.
    pub badge_width: f32,
}

/// One row as it should be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFrame {
    pub position: usize,
    pub frame: Frame,
    pub holder: HolderSnapshot,
}

/// Everything a renderer needs for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewFrame {
    pub visible: bool,
    pub top_padding: f32,
    pub scroll_offset: f32,
    /// Rows in draw order; an overdrawn (dragged) row comes last.
    pub rows: Vec<RowFrame>,
}

#[derive(Debug, Clone)]
pub struct SnapshotView {
    id: ViewId,
    viewport: Viewport,
    style: HolderStyle,
    holders: Vec<RowHolder>,
    scroll_offset: f32,
    top_padding: f32,
    visible: bool,
    scroll_dragging: bool,
    hooks_installed: bool,
    parent_disallow_intercept: bool,
    overdraw_row: Option<usize>,
    needs_draw: bool,
}

impl SnapshotView {
    pub fn new(id: ViewId, viewport: Viewport) -> Self {
        Self {
            id,
            viewport,
            style: HolderStyle::default(),
            holders: Vec::new(),
            scroll_offset: 0.0,
            top_padding: 0.0,
            visible: true,
            scroll_dragging: false,
            hooks_installed: false,
            parent_disallow_intercept: false,
            overdraw_row: None,
            needs_draw: true,
        }
    }

    pub fn with_style(mut self, style: HolderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn row_count(&self) -> usize {
        self.holders.len()
    }

    pub fn holders(&self) -> &[RowHolder] {
        &self.holders
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn top_padding(&self) -> f32 {
        self.top_padding
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn has_touch_hooks(&self) -> bool {
        self.hooks_installed
    }

    pub fn parent_disallows_intercept(&self) -> bool {
        self.parent_disallow_intercept
    }

    pub fn overdraw_row(&self) -> Option<usize> {
        self.overdraw_row
    }

    /// Host reports that the container itself is being dragged.
    pub fn set_scroll_dragging(&mut self, dragging: bool) {
        self.scroll_dragging = dragging;
    }

    /// Returns and clears the pending redraw request.
    pub fn take_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.needs_draw)
    }

    /// Rebinds every row from `binder`.
    pub fn bind_all<B>(&mut self, binder: &B) -> Vec<usize>
    where
        B: RowBinder + ?Sized,
    {
        let style = self.style;
        let badge_width = self.viewport.badge_width;
        self.holders
            .resize_with(binder.row_count(), || RowHolder::new(style, badge_width));
        for (position, holder) in self.holders.iter_mut().enumerate() {
            binder.bind_row(holder, position);
        }
        self.clamp_scroll();
        self.needs_draw = true;
        (0..self.holders.len()).collect()
    }

    /// Reflects `changes` and returns the positions that were rebound.
    pub fn apply_changes<B>(&mut self, changes: &[ListChange], binder: &B) -> Vec<usize>
    where
        B: RowBinder + ?Sized,
    {
        let mut rebind_all = false;
        let mut rebound = BTreeSet::new();
        let mut recolor = false;

        for change in changes {
            match *change {
                ListChange::Inserted { position } => {
                    let position = position.min(self.holders.len());
                    self.holders.insert(position, self.new_holder());
                    rebind_all = true;
                }
                ListChange::Removed { position } => {
                    if position < self.holders.len() {
                        self.holders.remove(position);
                    }
                    rebind_all = true;
                }
                ListChange::Moved { from, to } => {
                    if from != to && from < self.holders.len() && to < self.holders.len() {
                        let holder = self.holders.remove(from);
                        self.holders.insert(to, holder);
                        recolor = true;
                    }
                }
                ListChange::Changed { position } => {
                    rebound.insert(position);
                }
                ListChange::Reset => rebind_all = true,
            }
        }

        if rebind_all || self.holders.len() != binder.row_count() {
            return self.bind_all(binder);
        }

        if recolor {
            for (position, holder) in self.holders.iter_mut().enumerate() {
                holder.set_base_color(binder.row_color(position));
            }
        }
        let mut bound = Vec::with_capacity(rebound.len());
        for position in rebound {
            if let Some(holder) = self.holders.get_mut(position) {
                binder.bind_row(holder, position);
                bound.push(position);
            }
        }
        self.needs_draw = true;
        bound
    }

    /// Visible rows in draw order with their holder state.
    pub fn frame_snapshot(&self) -> ViewFrame {
        let mut order = self.visible_rows();
        if let Some(overdraw) = self.overdraw_row {
            if let Some(index) = order.iter().position(|position| *position == overdraw) {
                let position = order.remove(index);
                order.push(position);
            }
        }
        let rows = order
            .into_iter()
            .filter_map(|position| {
                let frame = self.frame(position)?;
                let holder = self.holders.get(position)?.snapshot();
                Some(RowFrame {
                    position,
                    frame,
                    holder,
                })
            })
            .collect();
        ViewFrame {
            visible: self.visible,
            top_padding: self.top_padding,
            scroll_offset: self.scroll_offset,
            rows,
        }
    }

    fn new_holder(&self) -> RowHolder {
        RowHolder::new(self.style, self.viewport.badge_width)
    }

    fn max_scroll_offset(&self) -> f32 {
        let content = self.holders.len() as f32 * self.viewport.row_height;
        (content - self.viewport.height).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset());
    }
}

impl ListView for SnapshotView {
    fn view_id(&self) -> ViewId {
        self.id
    }

    fn width(&self) -> f32 {
        self.viewport.width
    }

    fn height(&self) -> f32 {
        self.viewport.height
    }

    fn visible_rows(&self) -> Vec<usize> {
        (0..self.holders.len())
            .filter(|position| {
                self.frame(*position).is_some_and(|frame| {
                    frame.bottom() > 0.0 && frame.top < self.viewport.height
                })
            })
            .collect()
    }

    fn frame(&self, position: usize) -> Option<Frame> {
        if position >= self.holders.len() {
            return None;
        }
        let row_height = self.viewport.row_height;
        Some(Frame::new(
            0.0,
            self.top_padding + position as f32 * row_height - self.scroll_offset,
            self.viewport.width,
            row_height,
        ))
    }

    fn row_at(&self, x: f32, y: f32) -> Option<usize> {
        self.visible_rows().into_iter().find(|position| {
            self.frame(*position)
                .is_some_and(|frame| frame.contains(x, y))
        })
    }

    fn is_at_top(&self) -> bool {
        self.holders.is_empty() || self.scroll_offset <= 0.0
    }

    fn is_scroll_dragging(&self) -> bool {
        self.scroll_dragging
    }

    fn holder(&self, position: usize) -> Option<&RowHolder> {
        self.holders.get(position)
    }

    fn holder_mut(&mut self, position: usize) -> Option<&mut RowHolder> {
        self.holders.get_mut(position)
    }

    fn invalidate(&mut self) {
        self.needs_draw = true;
    }

    fn set_top_padding(&mut self, padding: f32) {
        self.top_padding = padding;
    }

    fn scroll_to_top(&mut self) {
        self.scroll_offset = 0.0;
    }

    fn scroll_by(&mut self, dy: f32) {
        self.scroll_offset += dy;
        self.clamp_scroll();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_overdraw_row(&mut self, position: Option<usize>) {
        self.overdraw_row = position;
    }

    fn request_parent_disallow_intercept(&mut self, disallow: bool) {
        self.parent_disallow_intercept = disallow;
    }

    fn add_touch_hooks(&mut self) {
        self.hooks_installed = true;
    }

    fn remove_touch_hooks(&mut self) {
        self.hooks_installed = false;
    }
}
