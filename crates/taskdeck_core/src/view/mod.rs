//! Contract between the gesture controller and a virtualized list view.
//!
//! # Responsibility
//! - Expose row layout (frames, visibility, hit testing) in view pixels.
//! - Expose the per-row `RowHolder`s the controller transforms each frame.
//!
//! # Invariants
//! - Positions are adapter positions, not child indices.
//! - `frame()` reports the laid-out frame, untouched by holder transforms.
//!
//! # See also
//! - `view::snapshot` for the uniform-row implementation used by hosts.

use crate::holder::palette::Color;
use crate::holder::RowHolder;
use serde::Serialize;

pub mod snapshot;

/// Identity of a list view instance across attach calls.
pub type ViewId = u64;

/// Axis-aligned rectangle in view pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Inclusive hit test.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && y >= self.top && x <= self.right() && y <= self.bottom()
    }
}

/// Scrollable row container driven by `gesture::GestureController`.
pub trait ListView {
    fn view_id(&self) -> ViewId;
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Positions of rows currently laid out, top to bottom.
    fn visible_rows(&self) -> Vec<usize>;
    fn frame(&self, position: usize) -> Option<Frame>;
    fn row_at(&self, x: f32, y: f32) -> Option<usize>;

    /// True when the list is empty or row 0 sits at the top edge.
    fn is_at_top(&self) -> bool;
    /// True while the container itself is being scrolled by the user.
    fn is_scroll_dragging(&self) -> bool;

    fn holder(&self, position: usize) -> Option<&RowHolder>;
    fn holder_mut(&mut self, position: usize) -> Option<&mut RowHolder>;

    /// Requests a draw pass.
    fn invalidate(&mut self);
    fn set_top_padding(&mut self, padding: f32);
    fn scroll_to_top(&mut self);
    fn scroll_by(&mut self, dy: f32);
    fn set_visible(&mut self, visible: bool);
    /// Draws `position` above its siblings, or restores default order.
    fn set_overdraw_row(&mut self, position: Option<usize>);
    fn request_parent_disallow_intercept(&mut self, disallow: bool);

    fn add_touch_hooks(&mut self);
    fn remove_touch_hooks(&mut self);
}

/// Populates holders from the rows of a collection.
pub trait RowBinder {
    fn row_count(&self) -> usize;

    /// Background colour for `position` given the current row count.
    fn row_color(&self, position: usize) -> Color;

    /// Resets `holder` and fills it from the row at `position`.
    fn bind_row(&self, holder: &mut RowHolder, position: usize);
}
