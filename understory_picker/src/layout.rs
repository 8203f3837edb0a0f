// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-line horizontal layout of picker cells.

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Point, Rect, Size};

use crate::PickerConfig;

/// Frames of all cells laid out left to right in one line.
///
/// Cells are placed in row order starting at the leading inset, separated by
/// the configured item spacing, and centered vertically within the viewport
/// height. Frames are in content coordinates: the content offset of the
/// viewport is subtracted by the host when drawing.
///
/// Because frames are sorted by `x0` and never overlap, point and range
/// queries are binary searches.
#[derive(Clone, Debug, Default)]
pub struct StripLayout {
    frames: Vec<Rect>,
    content_size: Size,
}

impl StripLayout {
    /// Creates an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes all frames from per-cell sizes.
    ///
    /// Negative spacing and insets are treated as zero.
    pub fn rebuild<I>(&mut self, sizes: I, viewport_height: f64, config: &PickerConfig)
    where
        I: IntoIterator<Item = Size>,
    {
        let spacing = config.item_spacing.max(0.0);
        let viewport_height = viewport_height.max(0.0);
        self.frames.clear();

        let mut x = config.leading_inset.max(0.0);
        let mut tallest: f64 = 0.0;
        for size in sizes {
            if !self.frames.is_empty() {
                x += spacing;
            }
            let width = size.width.max(0.0);
            let height = size.height.max(0.0);
            let y = (viewport_height - height) / 2.0;
            self.frames.push(Rect::new(x, y, x + width, y + height));
            x += width;
            tallest = tallest.max(height);
        }
        x += config.trailing_inset.max(0.0);
        self.content_size = Size::new(x, viewport_height.max(tallest));
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if the layout has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame of the cell at `index`, if it exists.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<Rect> {
        self.frames.get(index).copied()
    }

    /// Size of the scrollable content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// The cell whose frame contains `point`, if any.
    #[must_use]
    pub fn index_at_point(&self, point: Point) -> Option<usize> {
        let i = self.frames.partition_point(|f| f.x1 <= point.x);
        self.frames
            .get(i)
            .filter(|f| f.contains(point))
            .map(|_| i)
    }

    /// Indices of cells that horizontally overlap `viewport`, in ascending order.
    #[must_use]
    pub fn visible_range(&self, viewport: Rect) -> Range<usize> {
        let start = self.frames.partition_point(|f| f.x1 <= viewport.x0);
        let end = self.frames.partition_point(|f| f.x0 < viewport.x1);
        start..end.max(start)
    }

    /// Horizontal content offset that centers the cell at `index` in a viewport
    /// `viewport_width` wide.
    ///
    /// The result is not clamped to the content bounds; hosts that bounce or
    /// inset their scroll views may show space beyond either end.
    #[must_use]
    pub fn centering_offset(&self, index: usize, viewport_width: f64) -> Option<f64> {
        self.frame(index)
            .map(|frame| frame.center().x - viewport_width / 2.0)
    }
}
