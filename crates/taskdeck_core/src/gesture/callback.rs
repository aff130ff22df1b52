//! Semantic operations the controller emits.

/// Capability set a host screen implements once per list.
///
/// Positions refer to the collection at the time of the call. Calls are
/// fire-and-forget: the controller keeps updating visuals from its own
/// state and never waits for the collection to change.
pub trait GestureCallback {
    /// A dragged row crossed its neighbour(s); move `from` to `to`.
    fn on_moved(&mut self, from: usize, to: usize);

    /// A row was swiped right past the niche.
    fn on_completed_or_archived(&mut self, position: usize);

    /// A row was swiped left past the niche while `can_dismiss()` held.
    fn on_dismissed(&mut self, position: usize);

    /// The trailing badge zone was tapped. `true` consumes the tap.
    fn on_clicked(&mut self, position: usize) -> bool;

    /// An edit session closed; `text` is the field contents, possibly
    /// unchanged.
    fn on_text_changed(&mut self, position: usize, text: &str);

    /// A pull started; insert a placeholder at position 0.
    fn on_row_added(&mut self);

    /// The placeholder must go away again. `refresh_ui` asks for a full
    /// rebind.
    fn on_add_reverted(&mut self, refresh_ui: bool);

    /// An over-pull asked to leave this screen.
    fn on_exit(&mut self);

    fn can_dismiss(&self) -> bool;
}
