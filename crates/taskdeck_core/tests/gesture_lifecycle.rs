mod common;

use common::{controller, view, Call};
use taskdeck_core::{ActionState, ListView, MotionEvent, Pointer, PointerId, TouchAction};

fn multi(
    action: TouchAction,
    action_pointer: PointerId,
    points: &[(PointerId, f32, f32)],
    time_ms: u64,
) -> MotionEvent {
    MotionEvent {
        action,
        action_pointer,
        pointers: points
            .iter()
            .map(|&(id, x, y)| Pointer { id, x, y })
            .collect(),
        time_ms,
    }
}

#[test]
fn attaching_same_view_id_hands_argument_back() {
    let mut controller = controller(3);
    let returned = controller
        .attach(Some(view(1, 5, false)))
        .expect("same-id view should be handed back");
    assert_eq!(returned.row_count(), 5);
    let attached = controller.view().expect("view should stay attached");
    assert_eq!(attached.row_count(), 3);
    assert!(attached.has_touch_hooks());
}

#[test]
fn attaching_new_view_returns_previous_without_hooks() {
    let mut controller = controller(3);
    let previous = controller
        .attach(Some(view(2, 4, false)))
        .expect("previous view should be returned");
    assert_eq!(previous.view_id(), 1);
    assert!(!previous.has_touch_hooks());

    let attached = controller.view().expect("new view should be attached");
    assert_eq!(attached.view_id(), 2);
    assert!(attached.has_touch_hooks());
}

#[test]
fn detach_is_idempotent() {
    let mut controller = controller(3);
    let detached = controller.detach().expect("view should be returned");
    assert!(!detached.has_touch_hooks());
    assert!(!controller.is_attached());
    assert!(controller.detach().is_none());
    assert!(!controller.dispatch_touch_event(&MotionEvent::down(0, 40.0, 70.0, 0)));
    assert!(!controller.poll_long_press(1_000));
}

#[test]
fn detach_mid_swipe_clears_transform_without_callbacks() {
    let mut controller = controller(3);
    controller.dispatch_touch_event(&MotionEvent::down(0, 100.0, 70.0, 0));
    controller.dispatch_touch_event(&MotionEvent::moved(0, 180.0, 70.0, 10));
    controller.on_draw();
    assert_eq!(
        controller
            .view()
            .and_then(|view| view.holder(1))
            .map(|holder| holder.translation_x() != 0.0),
        Some(true)
    );

    let detached = controller.detach().expect("view should be returned");
    let holder = detached.holder(1).expect("holder should exist");
    assert_eq!(holder.translation_x(), 0.0);
    assert_eq!(holder.row_translation_x(), 0.0);
    assert!(!detached.parent_disallows_intercept());
    assert!(controller.callback().calls.is_empty());
    assert_eq!(controller.action_state(), ActionState::Idle);
}

#[test]
fn detach_mid_edit_discards_typed_text_silently() {
    let mut controller = controller(3);
    common::tap(&mut controller, 40.0, 70.0);
    controller
        .view_mut()
        .and_then(|view| view.holder_mut(1))
        .expect("holder should exist")
        .set_edit_text("unsaved");
    let detached = controller.detach().expect("view should be returned");
    let holder = detached.holder(1).expect("holder should exist");
    assert!(!holder.is_editable());
    assert_eq!(holder.text(), "row-1");
    assert_eq!(holder.edit_text(), "");
    assert_eq!(controller.editing(), None);
    assert!(controller.callback().calls.is_empty());
}

#[test]
fn detach_mid_pull_reverts_placeholder() {
    let mut controller = controller(3);
    controller.dispatch_touch_event(&MotionEvent::down(0, 100.0, 30.0, 0));
    controller.dispatch_touch_event(&MotionEvent::moved(0, 100.0, 60.0, 10));
    controller.on_row_bound(0);
    let detached = controller.detach().expect("view should be returned");

    assert_eq!(
        controller.callback().calls,
        vec![Call::RowAdded, Call::AddReverted(true)]
    );
    assert_eq!(detached.top_padding(), 0.0);
}

#[test]
fn disallow_intercept_mid_swipe_abandons_gesture() {
    let mut controller = controller(3);
    controller.dispatch_touch_event(&MotionEvent::down(0, 100.0, 70.0, 0));
    controller.dispatch_touch_event(&MotionEvent::moved(0, 200.0, 70.0, 10));
    controller.on_draw();
    controller.on_request_disallow_intercept(true);

    assert_eq!(controller.action_state(), ActionState::Idle);
    assert_eq!(controller.selected(), None);
    controller.dispatch_touch_event(&MotionEvent::moved(0, 250.0, 70.0, 20));
    controller.dispatch_touch_event(&MotionEvent::up(0, 250.0, 70.0, 30));
    assert!(controller.callback().calls.is_empty());
    let holder = controller
        .view()
        .and_then(|view| view.holder(1))
        .expect("holder should exist");
    assert_eq!(holder.translation_x(), 0.0);
}

#[test]
fn disallow_intercept_false_changes_nothing() {
    let mut controller = controller(3);
    controller.dispatch_touch_event(&MotionEvent::down(0, 100.0, 70.0, 0));
    controller.dispatch_touch_event(&MotionEvent::moved(0, 200.0, 70.0, 10));
    controller.on_request_disallow_intercept(false);
    assert_eq!(controller.action_state(), ActionState::Swipe);
}

#[test]
fn second_pointer_is_ignored() {
    let mut controller = controller(3);
    controller.dispatch_touch_event(&MotionEvent::down(0, 100.0, 70.0, 0));
    controller.dispatch_touch_event(&multi(
        TouchAction::PointerDown,
        1,
        &[(0, 100.0, 70.0), (1, 20.0, 400.0)],
        5,
    ));
    controller.dispatch_touch_event(&multi(
        TouchAction::Move,
        0,
        &[(0, 180.0, 70.0), (1, 20.0, 10.0)],
        10,
    ));
    assert_eq!(controller.action_state(), ActionState::Swipe);
    assert_eq!(controller.selected(), Some(1));

    controller.dispatch_touch_event(&multi(
        TouchAction::PointerUp,
        1,
        &[(0, 180.0, 70.0), (1, 20.0, 10.0)],
        15,
    ));
    assert_eq!(controller.action_state(), ActionState::Swipe);

    controller.dispatch_touch_event(&MotionEvent::up(0, 180.0, 70.0, 20));
    assert_eq!(controller.callback().calls, vec![Call::Completed(1)]);
}

#[test]
fn tracked_pointer_lifting_first_finishes_gesture() {
    let mut controller = controller(3);
    controller.dispatch_touch_event(&MotionEvent::down(0, 100.0, 70.0, 0));
    controller.dispatch_touch_event(&multi(
        TouchAction::PointerDown,
        1,
        &[(0, 100.0, 70.0), (1, 20.0, 400.0)],
        5,
    ));
    controller.dispatch_touch_event(&multi(
        TouchAction::Move,
        0,
        &[(0, 180.0, 70.0), (1, 20.0, 400.0)],
        10,
    ));
    controller.dispatch_touch_event(&multi(
        TouchAction::PointerUp,
        0,
        &[(0, 180.0, 70.0), (1, 20.0, 400.0)],
        15,
    ));
    assert_eq!(controller.callback().calls, vec![Call::Completed(1)]);
    assert_eq!(controller.action_state(), ActionState::Idle);

    controller.dispatch_touch_event(&MotionEvent::moved(1, 200.0, 400.0, 20));
    controller.dispatch_touch_event(&MotionEvent::up(1, 200.0, 400.0, 30));
    assert_eq!(controller.callback().calls, vec![Call::Completed(1)]);
}

#[test]
fn move_without_tracked_pointer_returns_to_idle() {
    let mut controller = controller(3);
    controller.dispatch_touch_event(&MotionEvent::down(0, 100.0, 70.0, 0));
    controller.dispatch_touch_event(&MotionEvent::moved(0, 180.0, 70.0, 10));
    controller.dispatch_touch_event(&MotionEvent::moved(7, 200.0, 70.0, 20));

    assert_eq!(controller.action_state(), ActionState::Idle);
    assert_eq!(controller.selected(), None);
    controller.dispatch_touch_event(&MotionEvent::up(7, 200.0, 70.0, 30));
    assert!(controller.callback().calls.is_empty());
}

#[test]
fn new_down_mid_gesture_restarts_cleanly() {
    let mut controller = controller(3);
    controller.dispatch_touch_event(&MotionEvent::down(0, 100.0, 70.0, 0));
    controller.dispatch_touch_event(&MotionEvent::moved(0, 180.0, 70.0, 10));
    controller.dispatch_touch_event(&MotionEvent::down(0, 100.0, 130.0, 20));
    assert_eq!(controller.action_state(), ActionState::Idle);

    controller.dispatch_touch_event(&MotionEvent::moved(0, 20.0, 130.0, 30));
    controller.dispatch_touch_event(&MotionEvent::up(0, 20.0, 130.0, 40));
    assert_eq!(controller.callback().calls, vec![Call::Dismissed(2)]);
}
