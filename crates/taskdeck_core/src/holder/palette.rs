//! Row background palettes and gradient interpolation.
//!
//! # Invariants
//! - Palettes are immutable constants; interpolation takes them by value.
//! - `color_at` is a pure function of `(index, size)`.

use crate::model::row::RowKind;
use serde::{Deserialize, Serialize};

/// Smallest row count the gradient is spread over, so short lists keep
/// the warm/bright end of the palette.
pub const MIN_INTERPOLATION_SIZE: usize = 13;

/// Packed `0xAARRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);

    /// Builds an opaque colour from channels.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(0xFF00_0000 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

const TASK_STOPS: [Color; 7] = [
    Color(0xFFE7_A776),
    Color(0xFFE4_7D72),
    Color(0xFFE9_636F),
    Color(0xFFF2_5191),
    Color(0xFF9A_50A4),
    Color(0xFF58_569D),
    Color(0xFF38_477E),
];

const LIST_STOPS: [Color; 7] = [
    Color(0xFF06_93FB),
    Color(0xFF10_9EFB),
    Color(0xFF1A_A9FB),
    Color(0xFF21_B4FB),
    Color(0xFF28_BEFB),
    Color(0xFF2E_C6FB),
    Color(0xFF36_CFFB),
];

/// Warm gradient used behind task rows.
pub const TASK_PALETTE: Palette = Palette::new(&TASK_STOPS);
/// Blue gradient used behind task-list rows.
pub const LIST_PALETTE: Palette = Palette::new(&LIST_STOPS);

/// Ordered colour stops of a vertical row gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    stops: &'static [Color],
}

impl Palette {
    pub const fn new(stops: &'static [Color]) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &'static [Color] {
        self.stops
    }

    /// Returns the background colour for row `index` of a list with `size`
    /// rows.
    ///
    /// `index` is clamped to the last row before the size is widened to
    /// `MIN_INTERPOLATION_SIZE`, so any index past the end shares the last
    /// row's colour.
    pub fn color_at(&self, index: usize, size: usize) -> Color {
        match self.stops {
            [] => return Color::BLACK,
            [only] => return *only,
            _ => {}
        }

        let index = index.min(size.saturating_sub(1));
        let size = size.max(MIN_INTERPOLATION_SIZE);
        let fraction = (index as f64 / size as f64).clamp(0.0, 1.0);
        let step = 1.0 / (self.stops.len() - 1) as f64;
        let stop = ((fraction / step) as usize).min(self.stops.len() - 2);

        let top = self.stops[stop];
        let bottom = self.stops[stop + 1];
        let offset = (fraction - stop as f64 * step) / step;

        Color::from_rgb(
            lerp_channel(top.red(), bottom.red(), offset),
            lerp_channel(top.green(), bottom.green(), offset),
            lerp_channel(top.blue(), bottom.blue(), offset),
        )
    }
}

/// Palette used for rows of the given list level.
pub fn palette_for(kind: RowKind) -> Palette {
    match kind {
        RowKind::Task => TASK_PALETTE,
        RowKind::TaskList => LIST_PALETTE,
    }
}

fn lerp_channel(from: u8, to: u8, offset: f64) -> u8 {
    let value = f64::from(from) + (f64::from(to) - f64::from(from)) * offset;
    value.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::{palette_for, Color, LIST_PALETTE, MIN_INTERPOLATION_SIZE, TASK_PALETTE};
    use crate::model::row::RowKind;

    #[test]
    fn first_row_of_short_list_gets_first_stop() {
        for size in 0..MIN_INTERPOLATION_SIZE {
            assert_eq!(TASK_PALETTE.color_at(0, size), TASK_PALETTE.stops()[0]);
            assert_eq!(LIST_PALETTE.color_at(0, size), LIST_PALETTE.stops()[0]);
        }
    }

    #[test]
    fn index_past_end_is_clamped_to_last_row() {
        for size in [1, 5, 13, 40] {
            let last = TASK_PALETTE.color_at(size - 1, size);
            assert_eq!(TASK_PALETTE.color_at(size, size), last);
            assert_eq!(TASK_PALETTE.color_at(size + 7, size), last);
        }
    }

    #[test]
    fn channels_move_monotonically_between_adjacent_stops() {
        let size = 600;
        let stops = TASK_PALETTE.stops();
        let segment = size / (stops.len() - 1);
        for (stop, pair) in stops.windows(2).enumerate() {
            let start = stop * segment;
            let samples: Vec<Color> = (start..start + segment - 1)
                .map(|index| TASK_PALETTE.color_at(index, size))
                .collect();
            for window in samples.windows(2) {
                let (a, b) = (window[0], window[1]);
                assert_monotonic(a.red(), b.red(), pair[0].red(), pair[1].red());
                assert_monotonic(a.green(), b.green(), pair[0].green(), pair[1].green());
                assert_monotonic(a.blue(), b.blue(), pair[0].blue(), pair[1].blue());
            }
        }
    }

    #[test]
    fn interpolated_colors_are_opaque() {
        for index in 0..20 {
            assert_eq!(LIST_PALETTE.color_at(index, 20).alpha(), 0xFF);
        }
    }

    #[test]
    fn palette_follows_row_kind() {
        assert_eq!(palette_for(RowKind::Task), TASK_PALETTE);
        assert_eq!(palette_for(RowKind::TaskList), LIST_PALETTE);
    }

    fn assert_monotonic(current: u8, next: u8, from: u8, to: u8) {
        if to >= from {
            assert!(next >= current, "channel decreased: {current} -> {next}");
        } else {
            assert!(next <= current, "channel increased: {current} -> {next}");
        }
    }
}
