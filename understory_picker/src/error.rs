// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the picker controller.

use thiserror::Error;

/// Errors returned by [`PickerController`](crate::PickerController) operations.
///
/// Most picker operations degrade silently when a precondition is missing (no
/// provider, no host, no layout frame). Only requests a caller can correct are
/// reported here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickerError {
    /// A row index outside `0..row_count` was requested.
    #[error("row {row} is out of range for a picker with {row_count} rows")]
    RowOutOfRange {
        /// The requested row.
        row: usize,
        /// The provider's row count at the time of the request.
        row_count: usize,
    },
}
