//! Touch arbiter for one list view.
//!
//! # Responsibility
//! - Classify the tracked pointer's stream into swipe, drag, pull or tap.
//! - Update per-row transforms each draw pass from the accumulated delta.
//! - Emit exactly one semantic callback per finished gesture.
//!
//! # Invariants
//! - Only the pointer that went down first drives state.
//! - Cancel, pointer loss, disallow-intercept and detach return to `Idle`
//!   with no transform left and no semantic callback, except that an
//!   abandoned pull placeholder is reverted with `on_add_reverted(true)`.
//! - The controller never touches the collection; it only calls back.
//! - A badge click can never fire while an edit session is open.
//! - An edit session stays on its row across list changes; detach discards
//!   it without `on_text_changed`.

use super::callback::GestureCallback;
use super::event::{MotionEvent, Pointer, TouchAction};
use super::geometry::{
    find_swap_target, pull_fold, pull_padding, pull_reveal, resolve_swipe, swipe_layout,
    swipe_progress, PullTransform, SwipeOutcome,
};
use super::state::{ActionState, PullState, TouchSession};
use super::tap::{TapDetector, TapGesture};
use crate::config::GestureConfig;
use crate::holder::{RowHolder, PULL_TO_CREATE_HINT, RELEASE_TO_CREATE_HINT};
use crate::view::ListView;
use log::{debug, info, warn};

pub struct GestureController<V, C> {
    config: GestureConfig,
    callback: C,
    view: Option<V>,
    tap: TapDetector,
    session: Option<TouchSession>,
    action_state: ActionState,
    pull_state: PullState,
    selected: Option<usize>,
    selected_initial_x: f32,
    selected_initial_y: f32,
    editing: Option<usize>,
    awaiting_first_row: bool,
    adding_canceled: bool,
    exit_emitted: bool,
}

impl<V, C> GestureController<V, C>
where
    V: ListView,
    C: GestureCallback,
{
    pub fn new(config: GestureConfig, callback: C) -> Self {
        let tap = TapDetector::new(config.touch_slop(), config.long_press_timeout_ms);
        Self {
            config,
            callback,
            view: None,
            tap,
            session: None,
            action_state: ActionState::Idle,
            pull_state: PullState::Add,
            selected: None,
            selected_initial_x: 0.0,
            selected_initial_y: 0.0,
            editing: None,
            awaiting_first_row: false,
            adding_canceled: false,
            exit_emitted: false,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn callback(&self) -> &C {
        &self.callback
    }

    pub fn callback_mut(&mut self) -> &mut C {
        &mut self.callback
    }

    /// Consumes the controller; detach first to get the view back.
    pub fn into_callback(self) -> C {
        self.callback
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut V> {
        self.view.as_mut()
    }

    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    pub fn action_state(&self) -> ActionState {
        self.action_state
    }

    pub fn pull_state(&self) -> PullState {
        self.pull_state
    }

    /// Row receiving the gesture transform.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Row with an open edit session.
    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    /// Binds to `view`, returning the previously attached view.
    ///
    /// Attaching a view with the attached view's id changes nothing and
    /// hands the argument back. `None` detaches.
    pub fn attach(&mut self, view: Option<V>) -> Option<V> {
        if let (Some(current), Some(next)) = (self.view.as_ref(), view.as_ref()) {
            if current.view_id() == next.view_id() {
                return view;
            }
        }

        let previous = self.release_view();
        if let Some(mut next) = view {
            next.add_touch_hooks();
            info!(
                "event=gesture_attach module=gesture status=ok view_id={}",
                next.view_id()
            );
            self.view = Some(next);
        }
        previous
    }

    /// Removes hooks and hands the view back; safe to call repeatedly.
    pub fn detach(&mut self) -> Option<V> {
        self.attach(None)
    }

    /// Routes one input event. Returns `true` while the controller owns the
    /// gesture or consumed the event as a tap.
    pub fn dispatch_touch_event(&mut self, event: &MotionEvent) -> bool {
        if self.view.is_none() {
            return false;
        }
        if event.action != TouchAction::Down {
            self.poll_long_press(event.time_ms);
        }

        let was_active = self.owns_gesture();
        let tap = self.tap.on_event(event);
        let mut consumed = false;

        match event.action {
            TouchAction::Down => self.on_pointer_down(event),
            TouchAction::Move => self.on_pointer_move(event),
            TouchAction::Up => {
                if let Some(TapGesture::Tap { x, y }) = tap {
                    if self.action_state == ActionState::Idle && self.selected.is_none() {
                        consumed = self.on_single_tap(x, y);
                    }
                }
                if self.session.is_some() {
                    self.release();
                }
            }
            TouchAction::PointerUp => {
                let tracked = self.session.map(|session| session.pointer);
                if tracked == Some(event.action_pointer) {
                    self.release();
                }
            }
            TouchAction::PointerDown => {}
            TouchAction::Cancel => self.abandon("cancel"),
        }

        consumed || was_active || self.owns_gesture()
    }

    /// Fires a pending long press when the held pointer reached the
    /// timeout at `now_ms`. Returns `true` when a drag started.
    pub fn poll_long_press(&mut self, now_ms: u64) -> bool {
        if self.view.is_none() {
            return false;
        }
        let Some(TapGesture::LongPress { pointer, x, y }) = self.tap.poll_long_press(now_ms)
        else {
            return false;
        };
        if self.action_state != ActionState::Idle || self.selected.is_some() {
            return false;
        }
        let Some(position) = self.view.as_ref().and_then(|view| view.row_at(x, y)) else {
            return false;
        };
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.pointer != pointer {
            return false;
        }
        session.rebase(x, y);
        self.select(Some(position), ActionState::Drag);
        true
    }

    /// An ancestor took the stream; drop the gesture.
    pub fn on_request_disallow_intercept(&mut self, disallow: bool) {
        if disallow {
            self.abandon("disallow_intercept");
        }
    }

    /// Called whenever the view binds `position`. Seeds the pull
    /// placeholder the first time row 0 is bound during a pull.
    pub fn on_row_bound(&mut self, position: usize) {
        if self.action_state == ActionState::Pull && self.awaiting_first_row && position == 0 {
            self.awaiting_first_row = false;
            self.selected = Some(0);
            if let Some(frame) = self.view.as_ref().and_then(|view| view.frame(0)) {
                self.selected_initial_x = frame.left;
                self.selected_initial_y = frame.top;
            }
            debug!("event=pull_placeholder_bound module=gesture status=ok position=0");
            return;
        }
        if self.editing == Some(position) {
            if let Some(holder) = self.view.as_mut().and_then(|view| view.holder_mut(position)) {
                holder.set_editable(true);
            }
        }
    }

    /// Runs `refresh` against the attached view (typically applying list
    /// changes) and replays the positions it bound.
    ///
    /// An open edit session follows its row: `locate_edit` maps the edited
    /// position to where that row sits after the refresh, or `None` when it
    /// is gone. The typed field contents survive the rebind.
    pub fn refresh_view<F, L>(&mut self, refresh: F, locate_edit: L)
    where
        F: FnOnce(&mut V, &mut C) -> Vec<usize>,
        L: FnOnce(&C, usize) -> Option<usize>,
    {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let pending_edit = self.editing.map(|position| {
            let typed = view
                .holder(position)
                .map(|holder| holder.edit_text().to_string());
            (position, typed)
        });
        let bound = refresh(view, &mut self.callback);

        if let Some((position, typed)) = pending_edit {
            self.editing = locate_edit(&self.callback, position);
            match self.editing {
                Some(next) => {
                    if let Some(holder) = view.holder_mut(next) {
                        holder.set_editable(true);
                        if let Some(typed) = typed {
                            holder.set_edit_text(typed);
                        }
                    }
                    if next != position {
                        debug!("event=edit_relocate module=gesture status=ok from={position} to={next}");
                    }
                }
                None => {
                    info!("event=edit_end module=gesture status=dropped position={position} reason=row_gone");
                }
            }
        }
        for position in bound {
            self.on_row_bound(position);
        }
    }

    /// Applies the current gesture's transform to the selected row.
    pub fn on_draw(&mut self) {
        let session = self.session.unwrap_or_default();
        match (self.action_state, self.selected) {
            (ActionState::Swipe, Some(position)) => self.draw_swipe(position, session),
            (ActionState::Drag, Some(position)) => self.draw_drag(position, session),
            (ActionState::Pull, Some(position)) => self.draw_pull(position, session),
            (ActionState::Pull, None) => {
                if let Some(view) = self.view.as_mut() {
                    view.scroll_by(-session.dy);
                }
            }
            _ => {}
        }
    }

    fn owns_gesture(&self) -> bool {
        self.selected.is_some() || self.action_state != ActionState::Idle
    }

    fn on_pointer_down(&mut self, event: &MotionEvent) {
        if self.session.is_some() || self.owns_gesture() {
            self.abandon("restart");
        }
        let Some(pointer) = event.primary().copied() else {
            return;
        };
        self.session = Some(TouchSession::new(pointer.id, pointer.x, pointer.y));
        self.adding_canceled = false;
        self.exit_emitted = false;
    }

    fn on_pointer_move(&mut self, event: &MotionEvent) {
        let Some(tracked) = self.session.map(|session| session.pointer) else {
            return;
        };
        let Some(pointer) = event.pointer(tracked).copied() else {
            self.abandon("pointer_lost");
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.track(pointer.x, pointer.y);
        }

        if self.action_state == ActionState::Idle && self.selected.is_none() {
            if !self.prepare_swipe(pointer) {
                self.prepare_pull(pointer);
            }
        }

        match self.action_state {
            ActionState::Idle => return,
            ActionState::Drag => self.move_if_necessary(),
            ActionState::Pull => self.track_pull(),
            ActionState::Swipe => {}
        }
        if let Some(view) = self.view.as_mut() {
            view.invalidate();
        }
    }

    fn prepare_swipe(&mut self, pointer: Pointer) -> bool {
        let (Some(view), Some(session)) = (self.view.as_ref(), self.session) else {
            return false;
        };
        if view.is_scroll_dragging() {
            return false;
        }
        let abs_dx = session.dx.abs();
        let abs_dy = session.dy.abs();
        let slop = self.config.touch_slop();
        if (abs_dx < slop && abs_dy < slop) || abs_dy > abs_dx {
            return false;
        }
        let Some(position) = view.row_at(pointer.x, pointer.y) else {
            return false;
        };
        if self.editing == Some(position) {
            return false;
        }
        self.select(Some(position), ActionState::Swipe);
        true
    }

    fn prepare_pull(&mut self, pointer: Pointer) -> bool {
        let (Some(view), Some(session)) = (self.view.as_ref(), self.session) else {
            return false;
        };
        if !view.is_at_top() || session.dy <= self.config.pull_activation_px {
            return false;
        }

        self.end_editing();
        if let Some(session) = self.session.as_mut() {
            session.rebase(pointer.x, pointer.y);
        }
        self.pull_state = PullState::Add;
        self.awaiting_first_row = true;
        info!("event=row_add module=gesture status=start");
        self.callback.on_row_added();
        self.select(None, ActionState::Pull);
        true
    }

    fn move_if_necessary(&mut self) {
        let (Some(view), Some(session), Some(position)) =
            (self.view.as_ref(), self.session, self.selected)
        else {
            return;
        };
        let Some(frame) = view.frame(position) else {
            return;
        };
        let others = view
            .visible_rows()
            .into_iter()
            .filter(|other| *other != position)
            .filter_map(|other| view.frame(other).map(|frame| (other, frame)))
            .collect::<Vec<_>>();
        let candidate_top = self.selected_initial_y + session.dy;
        let Some(target) =
            find_swap_target(frame, candidate_top, self.config.reorder_hysteresis, others)
        else {
            return;
        };

        info!("event=row_move module=gesture status=ok from={position} to={target}");
        self.callback.on_moved(position, target);
        self.selected = Some(target);
        if let Some(view) = self.view.as_mut() {
            view.set_overdraw_row(Some(target));
        }
    }

    fn track_pull(&mut self) {
        let (Some(view), Some(session), Some(position)) =
            (self.view.as_ref(), self.session, self.selected)
        else {
            return;
        };
        let Some(row_height) = view.frame(position).map(|frame| frame.height) else {
            return;
        };
        if !self.callback.can_dismiss() || pull_reveal(session.dy, row_height).is_some() {
            return;
        }

        let baseline = view.height() * self.config.pull_exit_baseline_ratio;
        if session.dy > baseline + row_height && self.pull_state == PullState::CancelAdd {
            self.exit_pull();
            return;
        }

        let revert_baseline = baseline + row_height * self.config.pull_cancel_ratio;
        let next = match self.pull_state {
            PullState::Add if session.dy > revert_baseline => PullState::CancelAdd,
            PullState::CancelAdd if session.dy < revert_baseline => PullState::Add,
            current => current,
        };
        if next != self.pull_state {
            debug!(
                "event=pull_state module=gesture status=ok cancel={}",
                next == PullState::CancelAdd
            );
            self.pull_state = next;
        }
    }

    fn exit_pull(&mut self) {
        if !self.adding_canceled {
            if let Some(position) = self.selected {
                if let Some(holder) = self.view.as_mut().and_then(|view| view.holder_mut(position))
                {
                    holder.set_alpha(0.0);
                }
            }
            self.adding_canceled = true;
            self.selected = None;
            info!("event=row_add module=gesture status=reverted reason=exit");
            self.callback.on_add_reverted(false);
        }
        if let Some(view) = self.view.as_mut() {
            view.set_visible(false);
        }
        if !self.exit_emitted {
            self.exit_emitted = true;
            info!("event=screen_exit module=gesture status=ok");
            self.callback.on_exit();
        }
    }

    fn release(&mut self) {
        self.select(None, ActionState::Idle);
        self.session = None;
        self.pull_state = PullState::Add;
    }

    fn select(&mut self, selected: Option<usize>, action_state: ActionState) {
        if selected == self.selected && action_state == self.action_state {
            return;
        }

        let previous = self.action_state;
        match previous {
            ActionState::Swipe => self.finish_swipe(),
            ActionState::Drag => self.finish_drag(),
            ActionState::Pull => self.finish_pull(),
            ActionState::Idle => {}
        }

        self.selected = selected;
        self.action_state = action_state;
        debug!(
            "event=gesture_state module=gesture status=ok from={} to={} selected={selected:?}",
            previous.as_str(),
            action_state.as_str()
        );

        let Some(view) = self.view.as_mut() else {
            return;
        };
        if let Some(position) = selected {
            if let Some(frame) = view.frame(position) {
                self.selected_initial_x = frame.left;
                self.selected_initial_y = frame.top;
            }
            if action_state == ActionState::Drag {
                view.set_overdraw_row(Some(position));
            }
        }
        view.request_parent_disallow_intercept(self.selected.is_some());
        view.invalidate();
    }

    fn finish_swipe(&mut self) {
        let Some(position) = self.selected else {
            return;
        };
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let translation_x = match (self.session, view.frame(position)) {
            (Some(session), Some(frame)) => self.selected_initial_x + session.dx - frame.left,
            _ => 0.0,
        };
        if let Some(holder) = view.holder_mut(position) {
            holder.clear_gesture_transform();
        }

        match resolve_swipe(translation_x, self.config.niche()) {
            SwipeOutcome::SnapBack => {
                debug!("event=row_swipe module=gesture status=snap_back position={position}");
            }
            SwipeOutcome::Complete => {
                info!("event=row_complete module=gesture status=ok position={position}");
                self.callback.on_completed_or_archived(position);
            }
            SwipeOutcome::Dismiss => {
                if self.callback.can_dismiss() {
                    info!("event=row_dismiss module=gesture status=ok position={position}");
                    self.callback.on_dismissed(position);
                } else {
                    info!("event=row_dismiss module=gesture status=rejected position={position}");
                }
            }
        }
    }

    fn finish_drag(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        if let Some(holder) = self.selected.and_then(|position| view.holder_mut(position)) {
            holder.clear_gesture_transform();
        }
        view.set_overdraw_row(None);
    }

    fn finish_pull(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.set_top_padding(0.0);
            if let Some(position) = self.selected {
                if let Some(holder) = view.holder_mut(position) {
                    holder.set_rotation_x(0.0);
                    holder.set_translation_y(0.0);
                    holder.set_hint_panel_visible(false);
                    match self.pull_state {
                        PullState::CancelAdd => holder.set_alpha(0.0),
                        PullState::Add => {
                            holder.set_alpha(1.0);
                            holder.set_text("");
                            holder.set_editable(true);
                        }
                    }
                }
                if self.pull_state == PullState::Add {
                    self.editing = Some(position);
                    info!("event=row_add module=gesture status=ok position={position}");
                }
            }
        }
        if self.pull_state == PullState::CancelAdd && !self.adding_canceled {
            self.adding_canceled = true;
            info!("event=row_add module=gesture status=reverted reason=release");
            self.callback.on_add_reverted(false);
        }
        self.awaiting_first_row = false;
    }

    fn abandon(&mut self, reason: &'static str) {
        self.tap.reset();
        let state = self.action_state;
        if state != ActionState::Idle || self.selected.is_some() {
            if let Some(view) = self.view.as_mut() {
                if let Some(holder) = self.selected.and_then(|position| view.holder_mut(position))
                {
                    holder.clear_gesture_transform();
                    holder.set_hint_panel_visible(false);
                }
                view.set_overdraw_row(None);
                if state == ActionState::Pull {
                    view.set_top_padding(0.0);
                }
                view.request_parent_disallow_intercept(false);
                view.invalidate();
            }
            debug!(
                "event=gesture_abandon module=gesture status=ok state={} reason={reason}",
                state.as_str()
            );
            if state == ActionState::Pull && !self.adding_canceled {
                self.adding_canceled = true;
                info!("event=row_add module=gesture status=reverted reason={reason}");
                self.callback.on_add_reverted(true);
            }
        }
        self.selected = None;
        self.action_state = ActionState::Idle;
        self.pull_state = PullState::Add;
        self.session = None;
        self.awaiting_first_row = false;
    }

    fn release_view(&mut self) -> Option<V> {
        self.view.as_ref()?;
        self.abandon("detach");
        if let Some(position) = self.editing.take() {
            if let Some(holder) = self.view.as_mut().and_then(|view| view.holder_mut(position)) {
                holder.discard_edit();
            }
            info!("event=edit_end module=gesture status=discarded position={position} reason=detach");
        }
        let mut view = self.view.take()?;
        view.remove_touch_hooks();
        info!(
            "event=gesture_detach module=gesture status=ok view_id={}",
            view.view_id()
        );
        Some(view)
    }

    fn on_single_tap(&mut self, x: f32, y: f32) -> bool {
        let Some(view) = self.view.as_ref() else {
            return false;
        };
        let Some((position, frame)) = view
            .row_at(x, y)
            .and_then(|position| view.frame(position).map(|frame| (position, frame)))
        else {
            self.end_editing();
            return false;
        };

        if self.editing == Some(position) {
            if x - frame.left >= frame.width / 2.0 {
                self.end_editing();
            }
            return false;
        }
        if self.editing.is_some() {
            self.end_editing();
            return true;
        }

        let badge_width = view
            .holder(position)
            .map_or(0.0, RowHolder::badge_hit_width);
        if x > frame.right() - badge_width && self.callback.on_clicked(position) {
            debug!("event=row_click module=gesture status=ok position={position}");
            return true;
        }

        if let Some(holder) = self.view.as_mut().and_then(|view| view.holder_mut(position)) {
            holder.set_editable(true);
        }
        self.editing = Some(position);
        debug!("event=edit_start module=gesture status=ok position={position}");
        true
    }

    fn end_editing(&mut self) {
        let Some(position) = self.editing.take() else {
            return;
        };
        let text = self
            .view
            .as_mut()
            .and_then(|view| view.holder_mut(position))
            .map(|holder| {
                holder.set_editable(false);
                holder.text().to_string()
            });
        match text {
            Some(text) => {
                info!("event=edit_end module=gesture status=ok position={position}");
                self.callback.on_text_changed(position, &text);
            }
            None => {
                warn!("event=edit_end module=gesture status=error position={position} error_code=holder_missing");
            }
        }
    }

    fn draw_swipe(&mut self, position: usize, session: TouchSession) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let Some(frame) = view.frame(position) else {
            return;
        };
        let niche = self.config.niche();
        let translation_x = self.selected_initial_x + session.dx - frame.left;
        let layout = swipe_layout(translation_x, niche);
        let Some(holder) = view.holder_mut(position) else {
            return;
        };
        holder.set_icon_bar_alpha(layout.icon_bar_alpha);
        holder.set_row_translation_x(layout.row_translation_x);
        holder.set_translation_x(layout.item_translation_x);
        if translation_x > 0.0 {
            holder.set_strike_through_ratio(swipe_progress(translation_x, niche));
            if translation_x > niche {
                holder.change_background_color_if_needed();
            } else {
                holder.revert_background_color_if_needed();
            }
        } else {
            holder.set_strike_through_ratio(0.0);
            holder.revert_background_color_if_needed();
        }
    }

    fn draw_drag(&mut self, position: usize, session: TouchSession) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let Some(frame) = view.frame(position) else {
            return;
        };
        let translation_y = self.selected_initial_y + session.dy - frame.top;
        if let Some(holder) = view.holder_mut(position) {
            holder.set_translation_y(translation_y);
        }
    }

    fn draw_pull(&mut self, position: usize, session: TouchSession) {
        let can_dismiss = self.callback.can_dismiss();
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let Some(frame) = view.frame(position) else {
            return;
        };
        let row_height = frame.height;
        let baseline = view.height() * self.config.pull_exit_baseline_ratio;
        let release_rotation = self.config.pull_hint_release_rotation;

        if let Some(holder) = view.holder_mut(position) {
            match pull_reveal(session.dy, row_height) {
                Some(reveal) => {
                    apply_pull_transform(holder, reveal);
                    holder.set_hint_panel_visible(true);
                    holder.set_text(if reveal.rotation_x < release_rotation {
                        RELEASE_TO_CREATE_HINT
                    } else {
                        PULL_TO_CREATE_HINT
                    });
                }
                None => {
                    let fold = if can_dismiss {
                        pull_fold(session.dy, baseline, row_height)
                    } else {
                        pull_fold(session.dy, f32::INFINITY, row_height)
                    };
                    apply_pull_transform(holder, fold);
                    holder.set_hint_panel_visible(false);
                }
            }
        }
        view.set_top_padding(pull_padding(session.dy, row_height));
        view.scroll_to_top();
    }
}

fn apply_pull_transform(holder: &mut RowHolder, transform: PullTransform) {
    holder.set_translation_y(transform.translation_y);
    holder.set_rotation_x(transform.rotation_x);
}
