// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll view a picker drives.

use kurbo::{Point, Rect, Size, Vec2};

/// The host toolkit's scrollable viewport.
///
/// The host owns scroll physics, animation, and drawing. The picker reads the
/// viewport geometry and issues offset changes and visual selection through
/// this trait.
pub trait PickerHost {
    /// Size of the visible area.
    fn viewport_size(&self) -> Size;

    /// Current scroll offset, in content coordinates.
    fn content_offset(&self) -> Point;

    /// Moves the viewport so its origin sits at `offset` in content coordinates.
    fn set_content_offset(&mut self, offset: Point, animated: bool);

    /// Shows the cell at `row` as selected.
    fn select_item(&mut self, row: usize, animated: bool);

    /// The visible area in content coordinates.
    fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(self.content_offset(), self.viewport_size())
    }

    /// Center of the visible area in content coordinates.
    fn viewport_center(&self) -> Point {
        let size = self.viewport_size();
        self.content_offset() + Vec2::new(size.width / 2.0, size.height / 2.0)
    }
}
