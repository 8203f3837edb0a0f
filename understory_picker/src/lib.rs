// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Picker: a headless, horizontally scrolling, center-snapping picker.
//!
//! This crate holds the interaction and layout core of a picker control that
//! shows one cell per row in a single horizontal line. Tapping a cell centers
//! and selects it; when a scroll gesture ends, the cell under the viewport
//! center is snapped to the center and selected.
//!
//! The core concepts are:
//!
//! - [`PickerProvider`]: the data source (row count and titles) and the sink for
//!   user-driven selection changes. The picker pulls from it on demand and holds
//!   it weakly.
//! - [`PickerController`]: owns selection state, the [`StripLayout`] of cell
//!   frames, and the [`Interaction`] state machine. It lives behind an
//!   `Rc<RefCell<_>>` ([`SharedPicker`]) so deferred work and cells can refer
//!   back to it without keeping it alive.
//! - [`PickerHost`]: the host toolkit's scroll view (viewport size, content
//!   offset, visual selection).
//! - [`TextMeasure`] and [`Scheduler`]: the host's text measurement and timer
//!   facilities. [`MonospaceMeasure`] and [`ManualScheduler`] are small
//!   reference implementations.
//! - [`PickerCell`] and [`CellStyleSource`]: per-row cell state, with styling
//!   resolved from the picker at render time.
//!
//! This crate deliberately does **not** draw, animate, or run an event loop.
//! Host frameworks are responsible for:
//!
//! - Forwarding taps ([`PickerController::tap`]) and scroll gesture
//!   boundaries ([`PickerController::begin_drag`],
//!   [`PickerController::end_drag`], [`PickerController::end_deceleration`]).
//! - Applying content offsets requested through [`PickerHost::set_content_offset`].
//! - Realizing cells for [`PickerController::visible_rows`] with
//!   [`PickerController::configure_cell`] and drawing their [`CellLabel`].
//! - Running scheduled actions on the UI thread.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Size};
//! use understory_picker::{
//!     ManualScheduler, MonospaceMeasure, PickerController, PickerHost, PickerProvider,
//! };
//!
//! struct Weekdays {
//!     picked: RefCell<Vec<usize>>,
//! }
//!
//! impl PickerProvider for Weekdays {
//!     fn row_count(&self) -> usize {
//!         7
//!     }
//!     fn title(&self, row: usize) -> String {
//!         ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"][row].to_string()
//!     }
//!     fn row_selected(&self, row: usize) {
//!         self.picked.borrow_mut().push(row);
//!     }
//! }
//!
//! struct Strip {
//!     offset: Point,
//! }
//!
//! impl PickerHost for Strip {
//!     fn viewport_size(&self) -> Size {
//!         Size::new(320.0, 44.0)
//!     }
//!     fn content_offset(&self) -> Point {
//!         self.offset
//!     }
//!     fn set_content_offset(&mut self, offset: Point, _animated: bool) {
//!         self.offset = offset;
//!     }
//!     fn select_item(&mut self, _row: usize, _animated: bool) {}
//! }
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let picker = PickerController::new(MonospaceMeasure::default(), scheduler.clone());
//! let days = Rc::new(Weekdays { picked: RefCell::default() });
//! picker.borrow_mut().set_provider(&days);
//! picker.borrow_mut().attach(Strip { offset: Point::ZERO });
//!
//! // Programmatic selection centers the row and is not reported back.
//! picker.borrow_mut().select_row(4, false).unwrap();
//! scheduler.run_all();
//! assert_eq!(picker.borrow().selected_row(), 4);
//! assert!(days.picked.borrow().is_empty());
//!
//! // A tap is reported.
//! PickerController::tap(&picker, 2);
//! assert_eq!(*days.picked.borrow(), [2]);
//! ```
//!
//! All geometry is in a caller-chosen logical pixel space, with cell frames in
//! content coordinates (before the viewport's content offset is applied).
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point
//!   rounding in `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cell;
mod config;
mod controller;
mod error;
mod host;
mod layout;
mod measure;
mod provider;
mod scheduler;
mod style;

pub use cell::{CellLabel, CellPool, PickerCell};
pub use config::PickerConfig;
pub use controller::{
    Interaction, NotifyPolicy, PickerController, SelectionNotice, SharedPicker,
};
pub use error::PickerError;
pub use host::PickerHost;
pub use layout::StripLayout;
pub use measure::{MonospaceMeasure, TextMeasure, cell_size};
pub use provider::PickerProvider;
pub use scheduler::{DeferredAction, ManualScheduler, Scheduler};
pub use style::{CellStyleSource, Color, FontSpec, PickerStyle};
