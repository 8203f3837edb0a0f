// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement and cell sizing.

use kurbo::{Rect, Size};

use crate::FontSpec;

/// Measures the bounding box of a title rendered in a given font.
///
/// Implemented by the host on top of its text stack. The returned rectangle
/// may have a non-zero or fractional origin; callers round it outward before
/// using its size.
pub trait TextMeasure {
    /// Bounding box of `text` set in `font`, wrapped to fit within `max`.
    ///
    /// Either dimension of `max` may be [`f64::INFINITY`] for no limit.
    fn measure(&self, text: &str, font: &FontSpec, max: Size) -> Rect;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, &FontSpec, Size) -> Rect,
{
    fn measure(&self, text: &str, font: &FontSpec, max: Size) -> Rect {
        self(text, font, max)
    }
}

/// A fixed-advance measurer, useful for terminals, tests, and layout previews.
///
/// Every character advances by `font.size * advance_ratio`; each line is
/// `font.size * line_height_ratio` tall. Text wraps by character when it would
/// exceed the maximum width, and the line count is capped by the maximum
/// height (always at least one line).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    /// Character advance as a fraction of the font size.
    pub advance_ratio: f64,
    /// Line height as a fraction of the font size.
    pub line_height_ratio: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, font: &FontSpec, max: Size) -> Rect {
        let chars = text.chars().count();
        let advance = font.size * self.advance_ratio;
        let line_height = font.size * self.line_height_ratio;
        if chars == 0 || advance <= 0.0 {
            return Rect::new(0.0, 0.0, 0.0, line_height.max(0.0));
        }

        let per_line = fit_count(max.width, advance).unwrap_or(chars).max(1);
        let max_lines = fit_count(max.height, line_height).unwrap_or(usize::MAX).max(1);
        let lines = chars.div_ceil(per_line).min(max_lines);

        #[allow(
            clippy::cast_precision_loss,
            reason = "character counts stay far below 2^52"
        )]
        let (width, height) = (
            chars.min(per_line) as f64 * advance,
            lines as f64 * line_height,
        );
        Rect::new(0.0, 0.0, width, height)
    }
}

/// Number of `unit`-sized steps that fit in `limit`, or `None` if unlimited.
fn fit_count(limit: f64, unit: f64) -> Option<usize> {
    if !limit.is_finite() || unit <= 0.0 {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "truncation toward zero is the intended floor; negatives saturate to 0"
    )]
    let count = (limit / unit) as usize;
    Some(count)
}

/// Layout size of a cell showing `text`.
///
/// Measures `text` within `max`, rounds the bounding box outward to whole
/// pixels, then widens it by `padding`.
pub fn cell_size(
    measure: &dyn TextMeasure,
    text: &str,
    font: &FontSpec,
    max: Size,
    padding: f64,
) -> Size {
    let frame = measure.measure(text, font, max).expand();
    tracing::trace!(
        target: "understory_picker::measure",
        text,
        width = frame.width(),
        height = frame.height(),
        "measured title"
    );
    Size::new(frame.width() + padding, frame.height())
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::{MonospaceMeasure, TextMeasure, cell_size};
    use crate::FontSpec;

    const UNBOUNDED: Size = Size::new(f64::INFINITY, f64::INFINITY);

    #[test]
    fn monospace_width_scales_with_length() {
        let m = MonospaceMeasure {
            advance_ratio: 0.5,
            line_height_ratio: 1.0,
        };
        let font = FontSpec::new("mono", 10.0);
        assert_eq!(m.measure("abcd", &font, UNBOUNDED), Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(m.measure("", &font, UNBOUNDED), Rect::new(0.0, 0.0, 0.0, 10.0));
    }

    #[test]
    fn monospace_wraps_at_max_width_and_caps_lines_by_height() {
        let m = MonospaceMeasure {
            advance_ratio: 0.5,
            line_height_ratio: 1.0,
        };
        let font = FontSpec::new("mono", 10.0);
        // Four characters per 20-wide line, ten characters need three lines.
        let r = m.measure("abcdefghij", &font, Size::new(20.0, f64::INFINITY));
        assert_eq!(r, Rect::new(0.0, 0.0, 20.0, 30.0));
        // Only two lines fit in 25 units of height.
        let r = m.measure("abcdefghij", &font, Size::new(20.0, 25.0));
        assert_eq!(r.height(), 20.0);
    }

    #[test]
    fn cell_size_rounds_out_and_pads() {
        let measure = |_: &str, _: &FontSpec, _: Size| Rect::new(0.25, 0.5, 10.5, 20.25);
        let size = cell_size(&measure, "x", &FontSpec::title1(), UNBOUNDED, 16.0);
        // Rounded out to 0..11 by 0..21, then padded.
        assert_eq!(size, Size::new(27.0, 21.0));
    }

    #[test]
    fn cell_width_is_monotonic_in_title_length() {
        let m = MonospaceMeasure::default();
        let font = FontSpec::title1();
        let mut previous = 0.0;
        let mut title = alloc::string::String::new();
        for _ in 0..12 {
            let size = cell_size(&m, &title, &font, UNBOUNDED, 16.0);
            assert!(size.width >= previous, "width shrank for {title:?}");
            assert!(size.width >= 16.0, "padding missing for {title:?}");
            previous = size.width;
            title.push('w');
        }
    }
}
