// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data source and selection sink behind a picker.

use alloc::string::String;

/// Supplies rows to a picker and receives user-driven selection changes.
///
/// The picker holds its provider through a [`Weak`](alloc::rc::Weak) reference
/// and pulls from it on demand; it never caches the row count or titles itself.
/// Methods take `&self`, so providers that record selections use interior
/// mutability.
pub trait PickerProvider {
    /// Number of rows in the picker.
    fn row_count(&self) -> usize;

    /// Display title of `row`.
    ///
    /// Only called with rows in `0..row_count()`.
    fn title(&self, row: usize) -> String;

    /// Called when the selection changes as a result of a tap or a scroll
    /// settling on a new center cell.
    ///
    /// Programmatic selection through
    /// [`PickerController::select_row`](crate::PickerController::select_row)
    /// does not call this.
    fn row_selected(&self, row: usize);
}
