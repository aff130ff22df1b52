//! Pure geometry behind swipe, pull and reorder.
//!
//! # Invariants
//! - Every function here is side-effect free; the controller owns state.
//! - Coordinates are view pixels, already scaled by density.

use crate::view::Frame;

/// Split of a swipe translation between the foreground row and the item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeLayout {
    /// Translation of the foreground row over the icon bar, capped at the
    /// niche width.
    pub row_translation_x: f32,
    /// Remaining translation applied to the whole item.
    pub item_translation_x: f32,
    pub icon_bar_alpha: f32,
}

pub fn swipe_layout(translation_x: f32, niche: f32) -> SwipeLayout {
    let distance = translation_x.abs();
    if distance < niche {
        return SwipeLayout {
            row_translation_x: translation_x,
            item_translation_x: 0.0,
            icon_bar_alpha: distance / niche,
        };
    }
    let row_translation_x = niche.copysign(translation_x);
    SwipeLayout {
        row_translation_x,
        item_translation_x: translation_x - row_translation_x,
        icon_bar_alpha: 1.0,
    }
}

/// Completion preview progress in `[0, 1]`.
pub fn swipe_progress(translation_x: f32, niche: f32) -> f32 {
    (translation_x.abs() / niche).min(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    SnapBack,
    Complete,
    Dismiss,
}

/// Decides a released swipe: past the niche to the right completes, past
/// it to the left dismisses.
pub fn resolve_swipe(translation_x: f32, niche: f32) -> SwipeOutcome {
    if translation_x.abs() <= niche {
        SwipeOutcome::SnapBack
    } else if translation_x < 0.0 {
        SwipeOutcome::Dismiss
    } else {
        SwipeOutcome::Complete
    }
}

/// Placeholder transform while a pull is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullTransform {
    pub translation_y: f32,
    pub rotation_x: f32,
}

/// Unfolds the placeholder as the pull covers its first row height.
///
/// Returns `None` once `dy` is outside `[0, row_height)`.
pub fn pull_reveal(dy: f32, row_height: f32) -> Option<PullTransform> {
    if dy < 0.0 || dy >= row_height {
        return None;
    }
    let ratio = dy / row_height;
    Some(PullTransform {
        translation_y: row_height - row_height * ratio,
        rotation_x: 90.0 - 90.0 * ratio,
    })
}

/// Folds the placeholder away again once an over-pull passes `baseline`.
pub fn pull_fold(dy: f32, baseline: f32, row_height: f32) -> PullTransform {
    if dy <= baseline {
        return PullTransform {
            translation_y: 0.0,
            rotation_x: 0.0,
        };
    }
    let ratio = ((dy - baseline) / row_height).min(1.0);
    PullTransform {
        translation_y: row_height * ratio,
        rotation_x: 90.0 * ratio,
    }
}

/// Top padding that makes room for the placeholder, never below `-h`.
pub fn pull_padding(dy: f32, row_height: f32) -> f32 {
    (dy - row_height).max(-row_height)
}

/// Picks the row a dragged row should swap with.
///
/// `selected` is the laid-out frame of the dragged row and `candidate_top`
/// where the gesture puts its top edge. Nothing happens until the candidate
/// is `hysteresis` row heights away from the laid-out slot. Among the rows
/// overlapping the candidate extent, ranked nearest-center first, the one
/// whose far edge the dragged row crossed by the most wins.
pub fn find_swap_target(
    selected: Frame,
    candidate_top: f32,
    hysteresis: f32,
    others: impl IntoIterator<Item = (usize, Frame)>,
) -> Option<usize> {
    if (candidate_top - selected.top).abs() < selected.height * hysteresis {
        return None;
    }
    let candidate_bottom = candidate_top + selected.height;
    let candidate_center = (candidate_top + candidate_bottom) / 2.0;

    let mut ranked = others
        .into_iter()
        .filter(|(_, frame)| frame.bottom() >= candidate_top && frame.top <= candidate_bottom)
        .map(|(position, frame)| ((candidate_center - frame.center_y()).abs(), position, frame))
        .collect::<Vec<_>>();
    ranked.sort_by(|left, right| left.0.total_cmp(&right.0));

    let moving_up = candidate_top < selected.top;
    let mut target = None;
    let mut best_score = -1.0_f32;
    for (_, position, frame) in ranked {
        let crossed = if moving_up {
            let diff = frame.top - candidate_top;
            (diff > 0.0 && frame.top < selected.top).then_some(diff)
        } else {
            let diff = frame.bottom() - candidate_bottom;
            (diff < 0.0 && frame.bottom() > selected.bottom()).then_some(diff)
        };
        if let Some(diff) = crossed {
            let score = diff.abs();
            if score > best_score {
                best_score = score;
                target = Some(position);
            }
        }
    }
    target
}
