//! Gesture recognition state.

use super::event::PointerId;
use serde::Serialize;

/// Gesture the controller is currently recognizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    #[default]
    Idle,
    /// Horizontal swipe to complete (right) or dismiss (left).
    Swipe,
    /// Long-press reorder.
    Drag,
    /// Over-pull at the top of the list to create a row.
    Pull,
}

impl ActionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Swipe => "swipe",
            Self::Drag => "drag",
            Self::Pull => "pull",
        }
    }
}

/// What releasing an active pull will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PullState {
    /// Keep the placeholder and start editing it.
    #[default]
    Add,
    /// Remove the placeholder again.
    CancelAdd,
}

/// Per-touch bookkeeping, alive from pointer down to up or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchSession {
    pub pointer: PointerId,
    pub initial_x: f32,
    pub initial_y: f32,
    pub dx: f32,
    pub dy: f32,
}

impl TouchSession {
    pub fn new(pointer: PointerId, x: f32, y: f32) -> Self {
        Self {
            pointer,
            initial_x: x,
            initial_y: y,
            dx: 0.0,
            dy: 0.0,
        }
    }

    /// Updates the accumulated delta from the pointer's current position.
    pub fn track(&mut self, x: f32, y: f32) {
        self.dx = x - self.initial_x;
        self.dy = y - self.initial_y;
    }

    /// Moves the origin to the given point and zeroes the delta.
    pub fn rebase(&mut self, x: f32, y: f32) {
        self.initial_x = x;
        self.initial_y = y;
        self.dx = 0.0;
        self.dy = 0.0;
    }
}
