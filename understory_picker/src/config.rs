// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavioral constants of a picker, with their stock values.

use core::time::Duration;

/// Layout and timing settings for a [`PickerController`](crate::PickerController).
///
/// The defaults reproduce the stock picker: 16 units of horizontal padding per
/// cell, a 100ms settle delay before a scroll target is marked selected, and
/// cells packed edge to edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickerConfig {
    /// Width added to every measured title, split across both ends.
    pub cell_padding: f64,
    /// Delay between starting a scroll-to-center and marking the target selected.
    pub settle_delay: Duration,
    /// Gap between adjacent cells.
    pub item_spacing: f64,
    /// Space before the first cell.
    pub leading_inset: f64,
    /// Space after the last cell.
    pub trailing_inset: f64,
}

impl PickerConfig {
    /// Stock horizontal padding per cell.
    pub const DEFAULT_CELL_PADDING: f64 = 16.0;
    /// Stock settle delay.
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

    /// Sets the per-cell padding.
    #[must_use]
    pub fn with_cell_padding(mut self, padding: f64) -> Self {
        self.cell_padding = padding;
        self
    }

    /// Sets the settle delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Sets the gap between adjacent cells.
    #[must_use]
    pub fn with_item_spacing(mut self, spacing: f64) -> Self {
        self.item_spacing = spacing;
        self
    }

    /// Sets the leading and trailing insets.
    #[must_use]
    pub fn with_insets(mut self, leading: f64, trailing: f64) -> Self {
        self.leading_inset = leading;
        self.trailing_inset = trailing;
        self
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            cell_padding: Self::DEFAULT_CELL_PADDING,
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
            item_spacing: 0.0,
            leading_inset: 0.0,
            trailing_inset: 0.0,
        }
    }
}
