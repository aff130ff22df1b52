//! Tap and long-press recognition.
//!
//! A tap is confirmed when the pointer goes up without having travelled
//! past the touch slop and before a long press fired. A long press fires
//! once the pointer has been held in place for the configured timeout.

use super::event::{MotionEvent, PointerId, TouchAction};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapGesture {
    Tap { x: f32, y: f32 },
    LongPress { pointer: PointerId, x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy)]
struct PendingPress {
    pointer: PointerId,
    x: f32,
    y: f32,
    down_at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct TapDetector {
    slop: f32,
    long_press_timeout_ms: u64,
    pending: Option<PendingPress>,
}

impl TapDetector {
    pub fn new(slop: f32, long_press_timeout_ms: u64) -> Self {
        Self {
            slop,
            long_press_timeout_ms,
            pending: None,
        }
    }

    /// Feeds one event; returns a tap confirmed by this event, if any.
    pub fn on_event(&mut self, event: &MotionEvent) -> Option<TapGesture> {
        match event.action {
            TouchAction::Down => {
                self.pending = event.primary().map(|pointer| PendingPress {
                    pointer: pointer.id,
                    x: pointer.x,
                    y: pointer.y,
                    down_at_ms: event.time_ms,
                });
                None
            }
            TouchAction::Move => {
                let pending = self.pending?;
                let moved_away = match event.pointer(pending.pointer) {
                    Some(pointer) => {
                        let dx = pointer.x - pending.x;
                        let dy = pointer.y - pending.y;
                        dx * dx + dy * dy > self.slop * self.slop
                    }
                    None => true,
                };
                if moved_away {
                    self.pending = None;
                }
                None
            }
            TouchAction::Up => {
                let pending = self.pending.take()?;
                let pointer = event.pointer(pending.pointer)?;
                Some(TapGesture::Tap {
                    x: pointer.x,
                    y: pointer.y,
                })
            }
            TouchAction::Cancel | TouchAction::PointerDown | TouchAction::PointerUp => {
                self.pending = None;
                None
            }
        }
    }

    /// Fires a long press once the held pointer reaches the timeout.
    ///
    /// After a long press the release is no longer a tap.
    pub fn poll_long_press(&mut self, now_ms: u64) -> Option<TapGesture> {
        let pending = self.pending?;
        if now_ms.saturating_sub(pending.down_at_ms) < self.long_press_timeout_ms {
            return None;
        }
        self.pending = None;
        Some(TapGesture::LongPress {
            pointer: pending.pointer,
            x: pending.x,
            y: pending.y,
        })
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }
}
