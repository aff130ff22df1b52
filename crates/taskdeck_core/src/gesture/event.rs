//! Raw multi-touch input.

use serde::{Deserialize, Serialize};

/// Host-assigned pointer id, stable for the lifetime of one touch.
pub type PointerId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    /// First pointer went down.
    Down,
    Move,
    /// Last pointer went up.
    Up,
    Cancel,
    /// An additional pointer went down.
    PointerDown,
    /// A non-last pointer went up.
    PointerUp,
}

/// One pointer's coordinates in view pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub id: PointerId,
    pub x: f32,
    pub y: f32,
}

/// One input event with every pointer currently down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    pub action: TouchAction,
    /// Pointer the action refers to (the one that went down or up).
    pub action_pointer: PointerId,
    pub pointers: Vec<Pointer>,
    pub time_ms: u64,
}

impl MotionEvent {
    /// Single-pointer event.
    pub fn single(action: TouchAction, id: PointerId, x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            action,
            action_pointer: id,
            pointers: vec![Pointer { id, x, y }],
            time_ms,
        }
    }

    pub fn down(id: PointerId, x: f32, y: f32, time_ms: u64) -> Self {
        Self::single(TouchAction::Down, id, x, y, time_ms)
    }

    pub fn moved(id: PointerId, x: f32, y: f32, time_ms: u64) -> Self {
        Self::single(TouchAction::Move, id, x, y, time_ms)
    }

    pub fn up(id: PointerId, x: f32, y: f32, time_ms: u64) -> Self {
        Self::single(TouchAction::Up, id, x, y, time_ms)
    }

    pub fn cancel(time_ms: u64) -> Self {
        Self {
            action: TouchAction::Cancel,
            action_pointer: 0,
            pointers: Vec::new(),
            time_ms,
        }
    }

    pub fn pointer(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.iter().find(|pointer| pointer.id == id)
    }

    /// The pointer the action refers to, falling back to the first pointer.
    pub fn primary(&self) -> Option<&Pointer> {
        self.pointer(self.action_pointer)
            .or_else(|| self.pointers.first())
    }
}
