#![allow(dead_code)]

use taskdeck_core::gesture::GestureCallback;
use taskdeck_core::{
    Color, GestureConfig, GestureController, MotionEvent, RowBinder, RowHolder, SnapshotView,
    Viewport,
};

pub const ROW_HEIGHT: f32 = 60.0;
pub const VIEW_WIDTH: f32 = 320.0;
pub const VIEW_HEIGHT: f32 = 600.0;
pub const BADGE_WIDTH: f32 = 48.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Moved(usize, usize),
    Completed(usize),
    Dismissed(usize),
    Clicked(usize),
    TextChanged(usize, String),
    RowAdded,
    AddReverted(bool),
    Exit,
}

/// Callback that records every call and changes no rows.
#[derive(Debug)]
pub struct Recorder {
    pub calls: Vec<Call>,
    pub dismissable: bool,
    pub click_result: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            dismissable: true,
            click_result: true,
        }
    }
}

impl GestureCallback for Recorder {
    fn on_moved(&mut self, from: usize, to: usize) {
        self.calls.push(Call::Moved(from, to));
    }

    fn on_completed_or_archived(&mut self, position: usize) {
        self.calls.push(Call::Completed(position));
    }

    fn on_dismissed(&mut self, position: usize) {
        self.calls.push(Call::Dismissed(position));
    }

    fn on_clicked(&mut self, position: usize) -> bool {
        self.calls.push(Call::Clicked(position));
        self.click_result
    }

    fn on_text_changed(&mut self, position: usize, text: &str) {
        self.calls.push(Call::TextChanged(position, text.to_string()));
    }

    fn on_row_added(&mut self) {
        self.calls.push(Call::RowAdded);
    }

    fn on_add_reverted(&mut self, refresh_ui: bool) {
        self.calls.push(Call::AddReverted(refresh_ui));
    }

    fn on_exit(&mut self) {
        self.calls.push(Call::Exit);
    }

    fn can_dismiss(&self) -> bool {
        self.dismissable
    }
}

/// Binds rows labelled `row-<n>`, optionally with a badge.
pub struct Labels {
    pub count: usize,
    pub badge: bool,
}

impl RowBinder for Labels {
    fn row_count(&self) -> usize {
        self.count
    }

    fn row_color(&self, _position: usize) -> Color {
        Color(0xFF20_2020)
    }

    fn bind_row(&self, holder: &mut RowHolder, position: usize) {
        holder.reset();
        holder.set_base_color(self.row_color(position));
        holder.set_text(format!("row-{position}"));
        holder.set_badge_visible(self.badge);
        if self.badge {
            holder.set_badge_count(2);
        }
    }
}

pub fn viewport() -> Viewport {
    Viewport {
        width: VIEW_WIDTH,
        height: VIEW_HEIGHT,
        row_height: ROW_HEIGHT,
        badge_width: BADGE_WIDTH,
    }
}

pub fn view(id: u64, count: usize, badge: bool) -> SnapshotView {
    let mut view = SnapshotView::new(id, viewport());
    view.bind_all(&Labels { count, badge });
    view
}

pub fn controller(count: usize) -> GestureController<SnapshotView, Recorder> {
    controller_with(count, false, Recorder::new())
}

pub fn controller_with(
    count: usize,
    badge: bool,
    recorder: Recorder,
) -> GestureController<SnapshotView, Recorder> {
    let mut controller = GestureController::new(GestureConfig::default(), recorder);
    controller.attach(Some(view(1, count, badge)));
    controller
}

/// Feeds a whole down-move-up stroke of pointer 0 with short timestamps.
pub fn stroke<V, C>(controller: &mut GestureController<V, C>, points: &[(f32, f32)])
where
    V: taskdeck_core::ListView,
    C: GestureCallback,
{
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    controller.dispatch_touch_event(&MotionEvent::down(0, x0, y0, 0));
    let mut last = (x0, y0);
    for (index, &(x, y)) in rest.iter().enumerate() {
        controller.dispatch_touch_event(&MotionEvent::moved(0, x, y, 10 + index as u64 * 10));
        controller.on_draw();
        last = (x, y);
    }
    controller.dispatch_touch_event(&MotionEvent::up(0, last.0, last.1, 400));
}

/// A still press and release at one point.
pub fn tap<V, C>(controller: &mut GestureController<V, C>, x: f32, y: f32)
where
    V: taskdeck_core::ListView,
    C: GestureCallback,
{
    controller.dispatch_touch_event(&MotionEvent::down(0, x, y, 0));
    controller.dispatch_touch_event(&MotionEvent::up(0, x, y, 50));
}
