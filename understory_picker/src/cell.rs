// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable cell state and a small reuse pool.

use alloc::rc::Weak;
use alloc::string::String;

use smallvec::SmallVec;

use crate::{CellStyleSource, Color, FontSpec, PickerStyle};

/// The state a host view needs to draw one picker row.
///
/// Cells are reused: the host keeps a handful alive, and the picker
/// reconfigures one each time a row scrolls into view. Styling is not stored
/// on the cell. It is resolved from the style source when [`PickerCell::label`]
/// is called, so style changes reach cells the next time they are drawn.
#[derive(Debug, Default)]
pub struct PickerCell {
    row: Option<usize>,
    text: String,
    selected: bool,
    style: Option<Weak<dyn CellStyleSource>>,
}

/// A cell's title with its styling resolved, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct CellLabel<'a> {
    /// Title text.
    pub text: &'a str,
    /// Font to draw with.
    pub font: FontSpec,
    /// Text color.
    pub color: Color,
    /// Maximum number of lines the title may occupy.
    pub max_lines: u8,
    /// Whether the cell is the selected row.
    pub selected: bool,
}

impl PickerCell {
    /// Creates an unconfigured cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the cell to `row`.
    pub fn configure(
        &mut self,
        row: usize,
        text: String,
        selected: bool,
        style: Weak<dyn CellStyleSource>,
    ) {
        self.row = Some(row);
        self.text = text;
        self.selected = selected;
        self.style = Some(style);
    }

    /// The row this cell shows, if configured.
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Title text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the cell shows the selected row.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Marks the cell selected or not.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Resolves the cell's styling against its style source.
    ///
    /// Falls back to [`PickerStyle::default`] once the source has been dropped
    /// or if the cell was never configured.
    #[must_use]
    pub fn label(&self) -> CellLabel<'_> {
        let (font, color, two_lines) = match self.style.as_ref().and_then(Weak::upgrade) {
            Some(source) => (
                source.font(),
                source.text_color(),
                source.uses_two_line_mode(),
            ),
            None => {
                let style = PickerStyle::default();
                (style.font, style.text_color, style.two_line_mode)
            }
        };
        CellLabel {
            text: &self.text,
            font,
            color,
            max_lines: if two_lines { 2 } else { 1 },
            selected: self.selected,
        }
    }

    /// Clears row-specific state before the cell goes back to a pool.
    pub fn prepare_for_reuse(&mut self) {
        self.row = None;
        self.text.clear();
        self.selected = false;
        self.style = None;
    }
}

/// A free list of cells for hosts that do not have their own reuse pool.
#[derive(Debug, Default)]
pub struct CellPool {
    free: SmallVec<[PickerCell; 8]>,
    created: usize,
}

impl CellPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a cell from the pool, creating one if none is free.
    pub fn dequeue(&mut self) -> PickerCell {
        self.free.pop().unwrap_or_else(|| {
            self.created += 1;
            PickerCell::new()
        })
    }

    /// Returns a cell that scrolled out of view.
    pub fn recycle(&mut self, mut cell: PickerCell) {
        cell.prepare_for_reuse();
        self.free.push(cell);
    }

    /// Number of cells waiting for reuse.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total number of cells this pool has created.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created
    }
}
