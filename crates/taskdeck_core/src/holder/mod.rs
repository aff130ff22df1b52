//! Per-row visual state.
//!
//! # Responsibility
//! - Hold the transform (translation, rotation, alpha) the gesture
//!   controller applies to one row each frame.
//! - Hold presentational domain state: completed styling, badge, label vs
//!   edit field, background tint.
//!
//! # Invariants
//! - A holder never mutates domain data; it only reflects it.
//! - `reset()` must run on every recycle/rebind so state never leaks
//!   between rows of a virtualized list.
//! - `set_completed` does no work when the state is unchanged.

pub mod palette;

use palette::Color;
use serde::Serialize;
use std::ops::Range;

/// Label shown on the pull placeholder before it is far enough to commit.
pub const PULL_TO_CREATE_HINT: &str = "Pull to create item";
/// Label shown on the pull placeholder once releasing would create it.
pub const RELEASE_TO_CREATE_HINT: &str = "Release to create item";

/// Fixed colours a holder styles its sub-elements with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolderStyle {
    pub default_text: Color,
    pub completed_text: Color,
    pub completed_background: Color,
    /// Tint shown once a completion swipe passes the commit threshold.
    pub completing_background: Color,
    /// Background before the adapter assigns a palette colour.
    pub unused_background: Color,
}

impl Default for HolderStyle {
    fn default() -> Self {
        Self {
            default_text: Color(0xFFFF_FFFF),
            completed_text: Color(0xFF5C_5C5C),
            completed_background: Color(0xFF26_2626),
            completing_background: Color(0xFF55_D669),
            unused_background: Color(0xFF3B_3B3B),
        }
    }
}

/// Strike-through styling of the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strike {
    None,
    Full,
    /// Swipe progress preview split at a character index.
    Partial { split: usize },
}

/// Visual state for one list row.
#[derive(Debug, Clone)]
pub struct RowHolder {
    style: HolderStyle,
    badge_width: f32,

    translation_x: f32,
    translation_y: f32,
    rotation_x: f32,
    alpha: f32,
    row_translation_x: f32,
    icon_bar_alpha: f32,

    text: String,
    edit_text: String,
    editable: bool,
    focused: bool,
    text_color: Color,
    strike: Strike,

    completed: bool,
    completion_updates: u32,

    badge_visible: bool,
    badge_count: u32,
    badge_color: Color,
    hint_panel_visible: bool,

    base_color: Color,
    background: Color,
    should_change_background: bool,
}

/// Serializable copy of everything a renderer needs for one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolderSnapshot {
    pub translation_x: f32,
    pub translation_y: f32,
    pub rotation_x: f32,
    pub alpha: f32,
    pub row_translation_x: f32,
    pub icon_bar_alpha: f32,
    pub text: String,
    pub edit_text: String,
    pub editable: bool,
    pub focused: bool,
    pub completed: bool,
    pub text_color: Color,
    pub struck_chars: Range<usize>,
    pub badge: Option<u32>,
    pub badge_color: Color,
    pub hint_panel_visible: bool,
    pub background: Color,
}

impl RowHolder {
    /// Creates a holder for a row whose trailing badge is `badge_width`
    /// pixels wide when visible.
    pub fn new(style: HolderStyle, badge_width: f32) -> Self {
        Self {
            style,
            badge_width: badge_width.max(0.0),
            translation_x: 0.0,
            translation_y: 0.0,
            rotation_x: 0.0,
            alpha: 1.0,
            row_translation_x: 0.0,
            icon_bar_alpha: 1.0,
            text: String::new(),
            edit_text: String::new(),
            editable: false,
            focused: false,
            text_color: style.default_text,
            strike: Strike::None,
            completed: false,
            completion_updates: 0,
            badge_visible: false,
            badge_count: 0,
            badge_color: style.default_text,
            hint_panel_visible: false,
            base_color: style.unused_background,
            background: style.unused_background,
            should_change_background: true,
        }
    }

    /// Restores every transient visual property before the holder is bound
    /// to a (possibly different) row.
    pub fn reset(&mut self) {
        self.set_completed(false);
        self.set_hint_panel_visible(false);
        self.editable = false;
        self.focused = false;
        self.edit_text.clear();
        self.clear_gesture_transform();
    }

    /// Drops the transform and swipe preview of a finished gesture while
    /// keeping the bound row's domain styling.
    pub fn clear_gesture_transform(&mut self) {
        self.translation_x = 0.0;
        self.translation_y = 0.0;
        self.rotation_x = 0.0;
        self.alpha = 1.0;
        self.row_translation_x = 0.0;
        self.icon_bar_alpha = 1.0;
        self.strike = if self.completed {
            Strike::Full
        } else {
            Strike::None
        };
        self.revert_background_color_if_needed();
    }

    pub fn translation_x(&self) -> f32 {
        self.translation_x
    }

    pub fn set_translation_x(&mut self, value: f32) {
        self.translation_x = value;
    }

    pub fn translation_y(&self) -> f32 {
        self.translation_y
    }

    pub fn set_translation_y(&mut self, value: f32) {
        self.translation_y = value;
    }

    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    pub fn set_rotation_x(&mut self, degrees: f32) {
        self.rotation_x = degrees;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Translation of the foreground row over the icon bar.
    pub fn row_translation_x(&self) -> f32 {
        self.row_translation_x
    }

    pub fn set_row_translation_x(&mut self, value: f32) {
        self.row_translation_x = value;
    }

    pub fn icon_bar_alpha(&self) -> f32 {
        self.icon_bar_alpha
    }

    pub fn set_icon_bar_alpha(&mut self, alpha: f32) {
        self.icon_bar_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn edit_text(&self) -> &str {
        &self.edit_text
    }

    /// Replaces the edit field contents; ignored while not editable.
    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if self.editable {
            self.edit_text = text.into();
        }
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Swaps the label for the edit field (`true`) or back (`false`).
    ///
    /// Entering seeds the field from the label; leaving writes the field
    /// back to the label.
    pub fn set_editable(&mut self, editable: bool) {
        if editable {
            if !self.editable {
                self.edit_text = self.text.clone();
            }
            self.editable = true;
            self.focused = true;
        } else {
            if self.editable {
                self.text = self.edit_text.clone();
            }
            self.editable = false;
            self.focused = false;
        }
    }

    /// Leaves the edit field without touching the label.
    pub fn discard_edit(&mut self) {
        self.editable = false;
        self.focused = false;
        self.edit_text.clear();
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Number of times `set_completed` actually changed the styling.
    pub fn completion_update_count(&self) -> u32 {
        self.completion_updates
    }

    pub fn set_completed(&mut self, completed: bool) {
        if completed == self.completed {
            return;
        }
        self.completed = completed;
        self.completion_updates += 1;
        if completed {
            self.text_color = self.style.completed_text;
            self.strike = Strike::Full;
            self.background = self.style.completed_background;
        } else {
            self.text_color = if self.badge_visible && self.badge_count == 0 {
                self.style.completed_text
            } else {
                self.style.default_text
            };
            self.strike = Strike::None;
            self.background = self.base_color;
        }
    }

    pub fn strike(&self) -> Strike {
        self.strike
    }

    /// Character range of the label currently drawn struck through.
    pub fn struck_range(&self) -> Range<usize> {
        let len = self.text.chars().count();
        match self.strike {
            Strike::None => 0..0,
            Strike::Full => 0..len,
            Strike::Partial { split } if self.completed => split.min(len)..len,
            Strike::Partial { split } => 0..split.min(len),
        }
    }

    /// Previews completion progress by striking the first
    /// `round(len * ratio)` characters (or un-striking them on a completed
    /// row).
    ///
    /// A split one character short of the full label snaps to the full
    /// label.
    pub fn set_strike_through_ratio(&mut self, ratio: f32) {
        let len = self.text.chars().count();
        let ratio = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        let mut split = ((len as f32 * ratio).round() as usize).min(len);
        if split > 0 && split + 1 == len {
            split = len;
        }
        self.strike = Strike::Partial { split };
    }

    pub fn set_badge_visible(&mut self, visible: bool) {
        self.badge_visible = visible;
    }

    pub fn badge(&self) -> Option<u32> {
        self.badge_visible.then_some(self.badge_count)
    }

    pub fn set_badge_count(&mut self, count: u32) {
        self.badge_count = count;
        let color = if count == 0 {
            self.style.completed_text
        } else {
            self.style.default_text
        };
        self.text_color = color;
        self.badge_color = color;
    }

    /// Width of the trailing zone that counts as a badge tap.
    pub fn badge_hit_width(&self) -> f32 {
        if self.badge_visible {
            self.badge_width
        } else {
            0.0
        }
    }

    pub fn is_hint_panel_visible(&self) -> bool {
        self.hint_panel_visible
    }

    pub fn set_hint_panel_visible(&mut self, visible: bool) {
        if self.hint_panel_visible == visible {
            return;
        }
        self.hint_panel_visible = visible;
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Sets the palette colour for this row's position and paints it.
    pub fn set_base_color(&mut self, color: Color) {
        self.base_color = color;
        self.background = if self.completed {
            self.style.completed_background
        } else {
            color
        };
    }

    pub fn reset_background_color(&mut self) {
        self.background = self.base_color;
    }

    /// Switches to the "about to toggle" tint once per swipe.
    pub fn change_background_color_if_needed(&mut self) {
        if !self.should_change_background {
            return;
        }
        self.background = if self.completed {
            self.base_color
        } else {
            self.style.completing_background
        };
        self.should_change_background = false;
    }

    /// Undoes `change_background_color_if_needed` when the swipe falls back
    /// under the threshold.
    pub fn revert_background_color_if_needed(&mut self) {
        if self.should_change_background {
            return;
        }
        self.background = if self.completed {
            self.style.completed_background
        } else {
            self.base_color
        };
        self.should_change_background = true;
    }

    pub fn snapshot(&self) -> HolderSnapshot {
        HolderSnapshot {
            translation_x: self.translation_x,
            translation_y: self.translation_y,
            rotation_x: self.rotation_x,
            alpha: self.alpha,
            row_translation_x: self.row_translation_x,
            icon_bar_alpha: self.icon_bar_alpha,
            text: self.text.clone(),
            edit_text: self.edit_text.clone(),
            editable: self.editable,
            focused: self.focused,
            completed: self.completed,
            text_color: self.text_color,
            struck_chars: self.struck_range(),
            badge: self.badge(),
            badge_color: self.badge_color,
            hint_panel_visible: self.hint_panel_visible,
            background: self.background,
        }
    }
}

impl Default for RowHolder {
    fn default() -> Self {
        Self::new(HolderStyle::default(), 0.0)
    }
}
