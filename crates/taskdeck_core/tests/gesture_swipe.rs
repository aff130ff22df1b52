mod common;

use common::{controller, controller_with, stroke, tap, Call, Recorder};
use taskdeck_core::holder::Strike;
use taskdeck_core::{ActionState, GestureConfig, GestureController, ListView, MotionEvent};

#[test]
fn swipe_one_pixel_short_of_niche_snaps_back() {
    let mut controller = controller(3);
    stroke(&mut controller, &[(100.0, 30.0), (165.0, 30.0)]);
    assert!(controller.callback().calls.is_empty());
    assert_eq!(controller.action_state(), ActionState::Idle);

    stroke(&mut controller, &[(100.0, 30.0), (35.0, 30.0)]);
    assert!(controller.callback().calls.is_empty());
}

#[test]
fn swipe_one_pixel_past_niche_right_completes() {
    let mut controller = controller(3);
    stroke(&mut controller, &[(100.0, 90.0), (167.0, 90.0)]);
    assert_eq!(controller.callback().calls, vec![Call::Completed(1)]);
}

#[test]
fn swipe_one_pixel_past_niche_left_dismisses() {
    let mut controller = controller(3);
    stroke(&mut controller, &[(100.0, 30.0), (33.0, 30.0)]);
    assert_eq!(controller.callback().calls, vec![Call::Dismissed(0)]);
}

#[test]
fn niche_scales_with_density() {
    let mut controller = GestureController::new(GestureConfig::with_density(2.0), Recorder::new());
    controller.attach(Some(common::view(1, 3, false)));
    stroke(&mut controller, &[(10.0, 30.0), (140.0, 30.0)]);
    assert!(controller.callback().calls.is_empty());
    stroke(&mut controller, &[(10.0, 30.0), (143.0, 30.0)]);
    assert_eq!(controller.callback().calls, vec![Call::Completed(0)]);
}

#[test]
fn dismiss_is_refused_when_callback_cannot_dismiss() {
    let mut recorder = Recorder::new();
    recorder.dismissable = false;
    let mut controller = controller_with(3, false, recorder);
    stroke(&mut controller, &[(200.0, 30.0), (20.0, 30.0)]);
    assert!(controller.callback().calls.is_empty());
}

#[test]
fn vertical_dominant_move_does_not_swipe() {
    let mut controller = controller(20);
    if let Some(view) = controller.view_mut() {
        view.scroll_by(30.0);
    }
    controller.dispatch_touch_event(&MotionEvent::down(0, 100.0, 100.0, 0));
    controller.dispatch_touch_event(&MotionEvent::moved(0, 110.0, 130.0, 10));
    assert_eq!(controller.action_state(), ActionState::Idle);
    assert_eq!(controller.selected(), None);
}

#[test]
fn swipe_draws_progress_and_clears_on_release() {
    let mut controller = controller(3);
    controller.dispatch_touch_event(&MotionEvent::down(0, 50.0, 30.0, 0));
    controller.dispatch_touch_event(&MotionEvent::moved(0, 83.0, 30.0, 10));
    controller.on_draw();
    {
        let holder = controller
            .view()
            .and_then(|view| view.holder(0))
            .expect("row 0 holder should exist");
        assert_eq!(holder.row_translation_x(), 33.0);
        assert_eq!(holder.icon_bar_alpha(), 0.5);
        assert_eq!(holder.struck_range(), 0..3);
    }

    controller.dispatch_touch_event(&MotionEvent::moved(0, 150.0, 30.0, 20));
    controller.on_draw();
    {
        let holder = controller
            .view()
            .and_then(|view| view.holder(0))
            .expect("row 0 holder should exist");
        assert_eq!(holder.row_translation_x(), 66.0);
        assert_eq!(holder.translation_x(), 34.0);
        assert_eq!(holder.icon_bar_alpha(), 1.0);
        assert_eq!(holder.struck_range(), 0..5);
    }

    controller.dispatch_touch_event(&MotionEvent::up(0, 150.0, 30.0, 30));
    let holder = controller
        .view()
        .and_then(|view| view.holder(0))
        .expect("row 0 holder should exist");
    assert_eq!(holder.translation_x(), 0.0);
    assert_eq!(holder.row_translation_x(), 0.0);
    assert_eq!(holder.strike(), Strike::None);
    assert_eq!(controller.callback().calls, vec![Call::Completed(0)]);
}

#[test]
fn editing_row_cannot_be_swiped_but_others_can() {
    let mut controller = controller(3);
    tap(&mut controller, 40.0, 90.0);
    assert_eq!(controller.editing(), Some(1));

    stroke(&mut controller, &[(100.0, 90.0), (200.0, 90.0)]);
    assert!(controller.callback().calls.is_empty());

    stroke(&mut controller, &[(100.0, 150.0), (200.0, 150.0)]);
    assert_eq!(controller.callback().calls, vec![Call::Completed(2)]);
    assert_eq!(controller.editing(), Some(1));
}

#[test]
fn swipe_is_not_started_while_container_scrolls() {
    let mut controller = controller(3);
    if let Some(view) = controller.view_mut() {
        view.set_scroll_dragging(true);
    }
    stroke(&mut controller, &[(100.0, 30.0), (200.0, 30.0)]);
    assert!(controller.callback().calls.is_empty());
}
