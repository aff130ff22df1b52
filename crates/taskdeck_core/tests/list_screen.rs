mod common;

use std::sync::{Arc, Mutex};

use common::viewport;
use taskdeck_core::{
    ActionState, GestureConfig, ListChange, ListScreen, ListView, MemoryRowStore, MotionEvent,
    RowAdapter, RowStore, RowVec, SnapshotView, StoreError, StoreResult, Task, TaskList,
};

type TaskScreen = ListScreen<Task, MemoryRowStore<Task>>;

fn screen(texts: &[&str]) -> TaskScreen {
    let store = MemoryRowStore::new(texts.iter().map(|text| Task::new(*text)).collect());
    ListScreen::new(
        GestureConfig::default(),
        RowAdapter::new(store),
        SnapshotView::new(1, viewport()),
    )
}

fn texts(screen: &TaskScreen) -> Vec<String> {
    screen
        .adapter()
        .rows()
        .iter()
        .map(|row| row.text.clone())
        .collect()
}

fn swipe(screen: &mut TaskScreen, y: f32, dx: f32) -> Vec<ListChange> {
    screen.handle_touch(&MotionEvent::down(0, 100.0, y, 0));
    screen.handle_touch(&MotionEvent::moved(0, 100.0 + dx, y, 10));
    screen.draw();
    screen
        .handle_touch(&MotionEvent::up(0, 100.0 + dx, y, 20))
        .changes
}

fn tap(screen: &mut TaskScreen, x: f32, y: f32) -> Vec<ListChange> {
    screen.handle_touch(&MotionEvent::down(0, x, y, 0));
    screen.handle_touch(&MotionEvent::up(0, x, y, 50)).changes
}

fn edit_text(screen: &TaskScreen, position: usize) -> Option<String> {
    screen
        .view()
        .and_then(|view| view.holder(position))
        .map(|holder| holder.edit_text().to_string())
}

/// Memory store whose first write fails.
struct FailFirstWrite {
    inner: MemoryRowStore<Task>,
    failed: bool,
}

impl RowStore<Task> for FailFirstWrite {
    fn rows(&self) -> &[Task] {
        self.inner.rows()
    }

    fn write<R>(&mut self, op: impl FnOnce(&mut RowVec<Task>) -> R) -> StoreResult<R> {
        if !self.failed {
            self.failed = true;
            return Err(StoreError::InvalidData("disk full".to_string()));
        }
        self.inner.write(op)
    }
}

#[test]
fn opening_screen_binds_every_row() {
    let screen = screen(&["a", "b", "c"]);
    let view = screen.view().expect("view should be attached");
    assert_eq!(view.row_count(), 3);
    assert!(view.has_touch_hooks());
    assert_eq!(
        view.holder(1).map(|holder| holder.text().to_string()),
        Some("b".to_string())
    );
}

#[test]
fn swipe_right_completes_and_archives_row() {
    let mut screen = screen(&["a", "b", "c"]);
    let changes = swipe(&mut screen, 30.0, 80.0);

    assert_eq!(changes, vec![ListChange::Reset]);
    assert_eq!(texts(&screen), vec!["b", "c", "a"]);
    assert!(screen.adapter().rows()[2].completed);
    assert_eq!(screen.adapter().active_count(), 2);
    let view = screen.view().expect("view should be attached");
    let holder = view.holder(2).expect("holder should exist");
    assert_eq!(holder.text(), "a");
    assert!(holder.is_completed());
    assert_eq!(holder.translation_x(), 0.0);
}

#[test]
fn swipe_right_on_completed_row_reopens_it() {
    let mut screen = screen(&["a", "b", "c"]);
    swipe(&mut screen, 30.0, 80.0);
    swipe(&mut screen, 150.0, 80.0);

    assert_eq!(texts(&screen), vec!["b", "c", "a"]);
    assert!(screen.adapter().rows().iter().all(|row| !row.completed));
}

#[test]
fn swipe_left_dismisses_row() {
    let mut screen = screen(&["a", "b", "c"]);
    let changes = swipe(&mut screen, 90.0, -80.0);

    assert_eq!(changes, vec![ListChange::Removed { position: 1 }]);
    assert_eq!(texts(&screen), vec!["a", "c"]);
    assert_eq!(screen.view().map(SnapshotView::row_count), Some(2));
}

#[test]
fn swipe_short_of_niche_snaps_back() {
    let mut screen = screen(&["a", "b"]);
    let changes = swipe(&mut screen, 30.0, 60.0);
    assert!(changes.is_empty());
    assert_eq!(texts(&screen), vec!["a", "b"]);
}

#[test]
fn pull_type_and_commit_creates_task() {
    let mut screen = screen(&["a", "b", "c"]);
    screen.handle_touch(&MotionEvent::down(0, 100.0, 30.0, 0));
    let started = screen.handle_touch(&MotionEvent::moved(0, 100.0, 41.0, 10));
    assert_eq!(started.action_state, ActionState::Pull);
    assert_eq!(started.changes, vec![ListChange::Reset]);
    assert_eq!(texts(&screen), vec!["New task", "a", "b", "c"]);

    screen.handle_touch(&MotionEvent::moved(0, 100.0, 96.0, 20));
    let frame = screen.draw().expect("frame should be produced");
    assert!(frame.rows[0].holder.hint_panel_visible);

    let released = screen.handle_touch(&MotionEvent::up(0, 100.0, 96.0, 30));
    assert_eq!(released.editing, Some(0));
    assert!(screen.type_text("Milk"));

    screen.handle_touch(&MotionEvent::down(0, 100.0, 500.0, 100));
    let committed = screen.handle_touch(&MotionEvent::up(0, 100.0, 500.0, 150));
    assert_eq!(committed.changes, vec![ListChange::Changed { position: 0 }]);
    assert_eq!(committed.editing, None);
    assert_eq!(texts(&screen), vec!["Milk", "a", "b", "c"]);
    let holder = screen
        .view()
        .and_then(|view| view.holder(0))
        .expect("holder should exist");
    assert_eq!(holder.text(), "Milk");
    assert!(!holder.is_editable());
}

#[test]
fn committing_blank_placeholder_removes_it() {
    let mut screen = screen(&["a"]);
    screen.handle_touch(&MotionEvent::down(0, 100.0, 30.0, 0));
    screen.handle_touch(&MotionEvent::moved(0, 100.0, 96.0, 10));
    screen.handle_touch(&MotionEvent::up(0, 100.0, 96.0, 20));
    assert!(screen.type_text("   "));

    screen.handle_touch(&MotionEvent::down(0, 100.0, 500.0, 100));
    let committed = screen.handle_touch(&MotionEvent::up(0, 100.0, 500.0, 150));
    assert_eq!(committed.changes, vec![ListChange::Removed { position: 0 }]);
    assert_eq!(texts(&screen), vec!["a"]);
}

#[test]
fn type_text_without_edit_session_is_refused() {
    let mut screen = screen(&["a"]);
    assert!(!screen.type_text("x"));
}

#[test]
fn over_pull_reverts_placeholder_and_requests_exit() {
    let mut screen = screen(&["a", "b", "c"]);
    screen.handle_touch(&MotionEvent::down(0, 100.0, 30.0, 0));
    screen.handle_touch(&MotionEvent::moved(0, 100.0, 41.0, 10));
    screen.handle_touch(&MotionEvent::moved(0, 100.0, 331.0, 20));
    let exited = screen.handle_touch(&MotionEvent::moved(0, 100.0, 351.0, 30));

    assert_eq!(exited.changes, vec![ListChange::Removed { position: 0 }]);
    assert!(exited.exit_requested);
    assert_eq!(texts(&screen), vec!["a", "b", "c"]);
    let frame = screen.draw().expect("frame should be produced");
    assert!(!frame.visible);
}

#[test]
fn cancelled_pull_removes_placeholder_with_full_rebind() {
    let mut screen = screen(&["a"]);
    screen.handle_touch(&MotionEvent::down(0, 100.0, 30.0, 0));
    screen.handle_touch(&MotionEvent::moved(0, 100.0, 60.0, 10));
    let cancelled = screen.handle_touch(&MotionEvent::cancel(20));

    assert_eq!(cancelled.changes, vec![ListChange::Reset]);
    assert_eq!(cancelled.action_state, ActionState::Idle);
    assert_eq!(texts(&screen), vec!["a"]);
}

#[test]
fn long_press_drag_reorders_rows() {
    let mut screen = screen(&["a", "b", "c", "d", "e"]);
    screen.handle_touch(&MotionEvent::down(0, 100.0, 90.0, 0));
    let pressed = screen.tick(500);
    assert!(pressed.consumed);
    assert_eq!(pressed.action_state, ActionState::Drag);

    let first = screen.handle_touch(&MotionEvent::moved(0, 100.0, 155.0, 510));
    assert_eq!(first.changes, vec![ListChange::Moved { from: 1, to: 2 }]);
    let second = screen.handle_touch(&MotionEvent::moved(0, 100.0, 215.0, 520));
    assert_eq!(second.changes, vec![ListChange::Moved { from: 2, to: 3 }]);

    let frame = screen.draw().expect("frame should be produced");
    assert_eq!(frame.rows.last().map(|row| row.position), Some(3));
    assert_eq!(frame.rows.last().map(|row| row.holder.text.as_str()), Some("b"));

    let released = screen.handle_touch(&MotionEvent::up(0, 100.0, 215.0, 530));
    assert!(released.changes.is_empty());
    assert_eq!(texts(&screen), vec!["a", "c", "d", "b", "e"]);
    let view = screen.view().expect("view should be attached");
    assert_eq!(view.holder(3).map(|holder| holder.text().to_string()), Some("b".to_string()));
    assert_eq!(view.holder(3).map(|holder| holder.translation_y()), Some(0.0));
}

#[test]
fn badge_tap_opens_list_through_click_handler() {
    let opened = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&opened);
    let mut groceries = TaskList::new("Groceries");
    groceries.active_task_count = 2;
    let adapter = RowAdapter::new(MemoryRowStore::new(vec![TaskList::new("Work"), groceries]))
        .with_click_handler(move |_, row: &TaskList| {
            if let Ok(mut opened) = sink.lock() {
                opened.push(row.text.clone());
            }
            true
        });
    let mut screen = ListScreen::new(
        GestureConfig::default(),
        adapter,
        SnapshotView::new(1, viewport()),
    );

    screen.handle_touch(&MotionEvent::down(0, 300.0, 70.0, 0));
    let outcome = screen.handle_touch(&MotionEvent::up(0, 300.0, 70.0, 40));
    assert!(outcome.consumed);
    assert_eq!(outcome.editing, None);
    assert_eq!(
        opened.lock().expect("lock should not be poisoned").clone(),
        vec!["Groceries".to_string()]
    );
    assert_eq!(
        screen
            .view()
            .and_then(|view| view.holder(1))
            .and_then(|holder| holder.badge()),
        Some(2)
    );
}

#[test]
fn disallowed_dismiss_snaps_row_back() {
    let mut screen = screen(&["a", "b"]);
    screen.adapter_mut().set_dismissable(false);
    let changes = swipe(&mut screen, 30.0, -80.0);
    assert!(changes.is_empty());
    assert_eq!(texts(&screen), vec!["a", "b"]);
}

#[test]
fn close_returns_adapter_and_unhooked_view() {
    let screen = screen(&["a"]);
    let (adapter, view) = screen.close();
    assert_eq!(adapter.rows().len(), 1);
    let view = view.expect("view should be returned");
    assert!(!view.has_touch_hooks());
}

#[test]
fn edit_stays_on_its_row_when_row_above_is_dismissed() {
    let mut screen = screen(&["a", "b", "c", "d"]);
    tap(&mut screen, 40.0, 210.0);
    assert_eq!(screen.controller().editing(), Some(3));
    assert!(screen.type_text("X"));

    let changes = swipe(&mut screen, 90.0, -90.0);
    assert_eq!(changes, vec![ListChange::Removed { position: 1 }]);
    assert_eq!(screen.controller().editing(), Some(2));
    assert_eq!(edit_text(&screen, 2).as_deref(), Some("X"));

    let committed = tap(&mut screen, 40.0, 500.0);
    assert_eq!(committed, vec![ListChange::Changed { position: 2 }]);
    assert_eq!(texts(&screen), vec!["a", "c", "X"]);
}

#[test]
fn edit_follows_its_row_when_row_above_is_archived() {
    let mut screen = screen(&["a", "b", "c"]);
    tap(&mut screen, 40.0, 150.0);
    assert!(screen.type_text("Y"));

    let changes = swipe(&mut screen, 30.0, 80.0);
    assert_eq!(changes, vec![ListChange::Reset]);
    assert_eq!(screen.controller().editing(), Some(1));
    let holder = screen
        .view()
        .and_then(|view| view.holder(1))
        .expect("holder should exist");
    assert!(holder.is_editable());
    assert_eq!(holder.edit_text(), "Y");

    tap(&mut screen, 40.0, 500.0);
    assert_eq!(texts(&screen), vec!["b", "Y", "a"]);
}

#[test]
fn rebind_keeps_typed_text() {
    let mut screen = screen(&["a", "b"]);
    tap(&mut screen, 40.0, 90.0);
    assert!(screen.type_text("draft"));

    screen.rebind();
    assert_eq!(screen.controller().editing(), Some(1));
    assert_eq!(edit_text(&screen, 1).as_deref(), Some("draft"));
}

#[test]
fn failed_placeholder_insert_never_removes_first_row() {
    let store = FailFirstWrite {
        inner: MemoryRowStore::new(vec![Task::new("a"), Task::new("b")]),
        failed: false,
    };
    let mut screen = ListScreen::new(
        GestureConfig::default(),
        RowAdapter::new(store),
        SnapshotView::new(1, viewport()),
    );
    screen.handle_touch(&MotionEvent::down(0, 100.0, 30.0, 0));
    let pulled = screen.handle_touch(&MotionEvent::moved(0, 100.0, 60.0, 10));
    assert_eq!(pulled.action_state, ActionState::Pull);
    assert!(pulled.changes.is_empty());

    let cancelled = screen.handle_touch(&MotionEvent::cancel(20));
    assert!(cancelled.changes.is_empty());
    let texts: Vec<&str> = screen
        .adapter()
        .rows()
        .iter()
        .map(|row| row.text.as_str())
        .collect();
    assert_eq!(texts, vec!["a", "b"]);
}
