// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The picker controller: selection state, scroll snapping, and cell setup.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::ops::Range;

use kurbo::{Point, Rect, Size};

use crate::{
    CellPool, CellStyleSource, Color, FontSpec, PickerCell, PickerConfig, PickerError,
    PickerHost, PickerProvider, PickerStyle, Scheduler, StripLayout, TextMeasure, cell_size,
};

/// Title used to size a cell when no provider is set.
const PLACEHOLDER_TITLE: &str = " ";

/// A picker controller shared with its deferred actions and cells.
pub type SharedPicker<H> = Rc<RefCell<PickerController<H>>>;

/// What the picker is doing in response to user or programmatic input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    /// Nothing in flight.
    #[default]
    Idle,
    /// The user is dragging the strip.
    Dragging,
    /// The user let go and the host is decelerating the scroll.
    Decelerating,
    /// Scrolling to center `row`; it is marked selected once the settle delay passes.
    ScrollingToTarget {
        /// The row being centered.
        row: usize,
    },
}

/// Whether the next selection change is reported to the provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// Report selection changes.
    #[default]
    Notify,
    /// Swallow exactly one report, then go back to [`NotifyPolicy::Notify`].
    SuppressNext,
}

/// Drives a horizontally scrolling, center-snapping picker.
///
/// The controller pulls rows from a [`PickerProvider`], lays out one cell per
/// row sized to its title, and keeps the selected row centered in a
/// [`PickerHost`] viewport:
///
/// - a tap on a cell centers it and selects it,
/// - when a drag or its deceleration ends, the cell under the viewport center
///   is centered and, after the settle delay, selected,
/// - [`select_row`](Self::select_row) centers a row and selects it after the
///   settle delay without reporting it back to the provider.
///
/// Controllers are created behind an `Rc<RefCell<_>>` ([`SharedPicker`]) so
/// that settle-delay actions and cells can refer back to them weakly. The
/// provider's [`row_selected`](PickerProvider::row_selected) callback always
/// runs with the controller unborrowed, so providers may read the picker from
/// inside it.
pub struct PickerController<H> {
    provider: Option<Weak<dyn PickerProvider>>,
    host: Option<H>,
    measure: Box<dyn TextMeasure>,
    scheduler: Rc<dyn Scheduler>,
    style: PickerStyle,
    config: PickerConfig,

    layout: StripLayout,
    layout_dirty: bool,
    layout_viewport: Size,

    selected: usize,
    notify: NotifyPolicy,
    interaction: Interaction,

    this: Weak<RefCell<Self>>,
}

/// A selection change waiting to be reported to the provider.
///
/// Returned by [`PickerController::tap_row`] so the report can be made after
/// the caller releases its borrow of the picker. [`PickerController::tap`]
/// does this for a [`SharedPicker`].
#[must_use = "the provider is not told about the selection until the notice is delivered"]
pub struct SelectionNotice {
    provider: Rc<dyn PickerProvider>,
    row: usize,
}

impl SelectionNotice {
    /// The newly selected row.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Reports the selection to the provider.
    pub fn deliver(self) {
        tracing::debug!(target: "understory_picker::controller", row = self.row, "reporting selection");
        self.provider.row_selected(self.row);
    }
}

impl fmt::Debug for SelectionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionNotice")
            .field("row", &self.row)
            .finish_non_exhaustive()
    }
}

impl<H> fmt::Debug for PickerController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerController")
            .field("has_provider", &self.provider().is_some())
            .field("attached", &self.host.is_some())
            .field("style", &self.style)
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("layout_dirty", &self.layout_dirty)
            .field("selected", &self.selected)
            .field("notify", &self.notify)
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}

impl<H> PickerController<H> {
    /// The provider, if one is set and still alive.
    #[must_use]
    pub fn provider(&self) -> Option<Rc<dyn PickerProvider>> {
        self.provider.as_ref().and_then(Weak::upgrade)
    }

    /// Number of rows, or zero without a provider.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.provider().map_or(0, |p| p.row_count())
    }

    /// Title of `row`, or `None` without a provider or for an out-of-range row.
    #[must_use]
    pub fn title(&self, row: usize) -> Option<String> {
        let provider = self.provider()?;
        (row < provider.row_count()).then(|| provider.title(row))
    }

    /// The currently selected row.
    #[must_use]
    pub fn selected_row(&self) -> usize {
        self.selected
    }

    /// The current interaction state.
    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Whether the next selection change will be reported.
    #[must_use]
    pub fn notify_policy(&self) -> NotifyPolicy {
        self.notify
    }

    /// The visual style.
    #[must_use]
    pub fn style(&self) -> &PickerStyle {
        &self.style
    }

    /// The layout and timing settings.
    #[must_use]
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// The attached host, if any.
    #[must_use]
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// The attached host, if any.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// Sets the provider. The picker keeps only a weak reference.
    pub fn set_provider<P: PickerProvider + 'static>(&mut self, provider: &Rc<P>) {
        self.provider = Some(Rc::downgrade(provider) as Weak<dyn PickerProvider>);
        self.layout_dirty = true;
    }

    /// Removes the provider. The picker then reports zero rows.
    pub fn clear_provider(&mut self) {
        self.provider = None;
        self.layout_dirty = true;
    }

    /// Replaces the whole style.
    pub fn set_style(&mut self, style: PickerStyle) {
        self.style = style;
        self.layout_dirty = true;
    }

    /// Sets the title font. Cell sizes are remeasured on the next layout pass.
    pub fn set_font(&mut self, font: FontSpec) {
        self.style.font = font;
        self.layout_dirty = true;
    }

    /// Sets the title color.
    pub fn set_text_color(&mut self, color: Color) {
        self.style.text_color = color;
    }

    /// Enables or disables two-line titles.
    pub fn set_two_line_mode(&mut self, enabled: bool) {
        self.style.two_line_mode = enabled;
    }

    /// Sets the maximum measured title width. Zero or less means unconstrained.
    pub fn set_max_element_width(&mut self, width: f64) {
        self.style.max_element_width = width;
        self.layout_dirty = true;
    }

    /// Replaces the layout and timing settings.
    pub fn set_config(&mut self, config: PickerConfig) {
        self.config = config;
        self.layout_dirty = true;
    }

    /// Marks the layout stale so it is rebuilt on next use.
    pub fn invalidate_layout(&mut self) {
        self.layout_dirty = true;
    }

    /// Records a selection change, honoring a pending suppression.
    ///
    /// The returned notice must be delivered once the controller is no
    /// longer borrowed.
    fn set_selected(&mut self, row: usize) -> Option<SelectionNotice> {
        self.selected = row;
        match self.notify {
            NotifyPolicy::SuppressNext => {
                self.notify = NotifyPolicy::Notify;
                tracing::debug!(
                    target: "understory_picker::controller",
                    row,
                    "selection changed programmatically, not reported"
                );
                None
            }
            NotifyPolicy::Notify => self
                .provider()
                .map(|provider| SelectionNotice { provider, row }),
        }
    }
}

impl<H: PickerHost + 'static> PickerController<H> {
    /// Creates a detached picker with the stock configuration.
    pub fn new(measure: impl TextMeasure + 'static, scheduler: Rc<dyn Scheduler>) -> SharedPicker<H> {
        Self::with_config(measure, scheduler, PickerConfig::default())
    }

    /// Creates a detached picker with custom layout and timing settings.
    pub fn with_config(
        measure: impl TextMeasure + 'static,
        scheduler: Rc<dyn Scheduler>,
        config: PickerConfig,
    ) -> SharedPicker<H> {
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                provider: None,
                host: None,
                measure: Box::new(measure),
                scheduler,
                style: PickerStyle::default(),
                config,
                layout: StripLayout::new(),
                layout_dirty: true,
                layout_viewport: Size::ZERO,
                selected: 0,
                notify: NotifyPolicy::Notify,
                interaction: Interaction::Idle,
                this: this.clone(),
            })
        })
    }

    /// Attaches the picker to a host viewport, returning the previous host.
    pub fn attach(&mut self, host: H) -> Option<H> {
        self.layout_dirty = true;
        self.host.replace(host)
    }

    /// Detaches the host viewport.
    pub fn detach(&mut self) -> Option<H> {
        self.host.take()
    }

    /// Layout size of the cell for `row`.
    ///
    /// The title is measured in the configured font within the maximum element
    /// width and the viewport height, rounded out to whole pixels, and padded.
    /// Without a provider, or for a row past the end, a single space is measured.
    #[must_use]
    pub fn size_for_row(&self, row: usize) -> Size {
        let text = self.title(row);
        self.size_for_text(text.as_deref().unwrap_or(PLACEHOLDER_TITLE), self.max_text_size())
    }

    /// Layout size of a cell showing `text`, measured within `max`.
    #[must_use]
    pub fn size_for_text(&self, text: &str, max: Size) -> Size {
        cell_size(
            self.measure.as_ref(),
            text,
            &self.style.font,
            max,
            self.config.cell_padding,
        )
    }

    fn max_text_size(&self) -> Size {
        let width = if self.style.max_element_width > 0.0 {
            self.style.max_element_width
        } else {
            f64::INFINITY
        };
        let height = self
            .host
            .as_ref()
            .map(|h| h.viewport_size().height)
            .filter(|h| *h > 0.0)
            .unwrap_or(f64::INFINITY);
        Size::new(width, height)
    }

    /// Re-reads every row from the provider and rebuilds the layout.
    pub fn reload_data(&mut self) {
        let count = self.row_count();
        let viewport = self.host.as_ref().map_or(Size::ZERO, |h| h.viewport_size());
        let sizes: Vec<Size> = (0..count).map(|row| self.size_for_row(row)).collect();
        self.layout.rebuild(sizes, viewport.height, &self.config);
        self.layout_dirty = false;
        self.layout_viewport = viewport;
        tracing::debug!(
            target: "understory_picker::controller",
            rows = count,
            content_width = self.layout.content_size().width,
            "laid out picker"
        );
    }

    fn ensure_layout(&mut self) {
        let viewport = self.host.as_ref().map_or(Size::ZERO, |h| h.viewport_size());
        if self.layout_dirty
            || viewport != self.layout_viewport
            || self.layout.len() != self.row_count()
        {
            self.reload_data();
        }
    }

    /// The current layout, rebuilt first if stale.
    pub fn layout(&mut self) -> &StripLayout {
        self.ensure_layout();
        &self.layout
    }

    /// Frame of the cell for `row` in content coordinates.
    pub fn frame_for_row(&mut self, row: usize) -> Option<Rect> {
        self.ensure_layout();
        self.layout.frame(row)
    }

    /// Rows whose cells overlap the viewport, in ascending order.
    ///
    /// Empty while detached.
    pub fn visible_rows(&mut self) -> Range<usize> {
        self.ensure_layout();
        match &self.host {
            Some(host) => self.layout.visible_range(host.visible_rect()),
            None => 0..0,
        }
    }

    /// The row whose cell lies under the viewport center.
    ///
    /// Falls back to the first visible row when the center hits no cell (for
    /// example in the gap between cells, or past the end of short content).
    pub fn center_row(&mut self) -> Option<usize> {
        self.ensure_layout();
        let host = self.host.as_ref()?;
        let center = host.viewport_center();
        self.layout.index_at_point(center).or_else(|| {
            let visible = self.layout.visible_range(host.visible_rect());
            (!visible.is_empty()).then_some(visible.start)
        })
    }

    /// Configures `cell` to show `row`.
    ///
    /// The cell receives the row title, whether it is the selected row, and a
    /// weak reference back to this picker for styling. Without a provider, or
    /// for a row past the end, the cell is left untouched.
    pub fn configure_cell(&self, cell: &mut PickerCell, row: usize) {
        let Some(title) = self.title(row) else {
            return;
        };
        let style: Weak<dyn CellStyleSource> = self.this.clone();
        cell.configure(row, title, self.selected == row, style);
        tracing::trace!(target: "understory_picker::controller", row, "configured cell");
    }

    /// Takes a cell from `pool` and configures it for `row`.
    pub fn cell_for_row(&self, pool: &mut CellPool, row: usize) -> PickerCell {
        let mut cell = pool.dequeue();
        self.configure_cell(&mut cell, row);
        cell
    }

    /// Centers `row` and selects it once the settle delay has passed.
    ///
    /// The provider is not told about this selection. A detached picker ignores
    /// the request.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::RowOutOfRange`] if `row` is not below
    /// [`row_count`](Self::row_count). Nothing changes in that case.
    pub fn select_row(&mut self, row: usize, animated: bool) -> Result<(), PickerError> {
        if self.host.is_none() {
            tracing::debug!(
                target: "understory_picker::controller",
                row,
                "select_row ignored: no host attached"
            );
            return Ok(());
        }
        let row_count = self.row_count();
        if row >= row_count {
            return Err(PickerError::RowOutOfRange { row, row_count });
        }
        self.notify = NotifyPolicy::SuppressNext;
        self.scroll_to_row(row, animated);
        self.schedule_selection(row);
        Ok(())
    }

    /// Handles a tap on the cell for `row`.
    ///
    /// Scrolls the cell to the center and selects it immediately. The returned
    /// notice reports the selection; deliver it after releasing the borrow, or
    /// use [`tap`](Self::tap).
    pub fn tap_row(&mut self, row: usize) -> Option<SelectionNotice> {
        if row >= self.row_count() {
            tracing::debug!(target: "understory_picker::controller", row, "tap outside rows ignored");
            return None;
        }
        self.interaction = Interaction::ScrollingToTarget { row };
        self.scroll_to_row(row, true);
        if let Some(host) = &mut self.host {
            host.select_item(row, true);
        }
        let notice = self.set_selected(row);
        self.interaction = Interaction::Idle;
        notice
    }

    /// Handles a tap on the cell for `row` and reports the selection.
    ///
    /// # Panics
    ///
    /// Panics if `picker` is already borrowed.
    pub fn tap(picker: &SharedPicker<H>, row: usize) {
        let notice = picker.borrow_mut().tap_row(row);
        if let Some(notice) = notice {
            notice.deliver();
        }
    }

    /// The user started dragging the strip.
    pub fn begin_drag(&mut self) {
        self.interaction = Interaction::Dragging;
    }

    /// The user lifted their finger.
    ///
    /// If the host will keep scrolling with momentum, snapping waits for
    /// [`end_deceleration`](Self::end_deceleration); otherwise the center cell
    /// is snapped to now.
    pub fn end_drag(&mut self, will_decelerate: bool) {
        if will_decelerate {
            self.interaction = Interaction::Decelerating;
        } else {
            self.snap_to_center();
        }
    }

    /// The host's momentum scroll came to rest.
    pub fn end_deceleration(&mut self) {
        self.snap_to_center();
    }

    /// Centers the cell under the viewport center and selects it after the settle delay.
    pub fn snap_to_center(&mut self) {
        match self.center_row() {
            Some(row) => {
                self.scroll_to_row(row, true);
                self.schedule_selection(row);
            }
            None => {
                tracing::debug!(target: "understory_picker::controller", "no cell to snap to");
                self.interaction = Interaction::Idle;
            }
        }
    }

    /// Moves the viewport so the cell for `row` is horizontally centered.
    ///
    /// Returns `false` without scrolling if detached or if the row has no frame.
    fn scroll_to_row(&mut self, row: usize, animated: bool) -> bool {
        self.ensure_layout();
        let Some(host) = &mut self.host else {
            return false;
        };
        let width = host.viewport_size().width;
        let Some(x) = self.layout.centering_offset(row, width) else {
            tracing::debug!(target: "understory_picker::controller", row, "no frame for row, scroll skipped");
            return false;
        };
        host.set_content_offset(Point::new(x, 0.0), animated);
        true
    }

    /// Marks `row` selected once the settle delay has passed.
    ///
    /// The action holds only a weak reference, so it does nothing if the
    /// picker is gone by then.
    fn schedule_selection(&mut self, row: usize) {
        self.interaction = Interaction::ScrollingToTarget { row };
        let this = self.this.clone();
        self.scheduler.schedule(
            self.config.settle_delay,
            Box::new(move || {
                let Some(picker) = this.upgrade() else {
                    tracing::trace!(target: "understory_picker::controller", row, "picker dropped before settle");
                    return;
                };
                let notice = match picker.try_borrow_mut() {
                    Ok(mut picker) => picker.finish_selection(row),
                    Err(_) => {
                        tracing::warn!(target: "understory_picker::controller", row, "picker busy at settle, selection skipped");
                        return;
                    }
                };
                if let Some(notice) = notice {
                    notice.deliver();
                }
            }),
        );
    }

    fn finish_selection(&mut self, row: usize) -> Option<SelectionNotice> {
        if let Some(host) = &mut self.host {
            host.select_item(row, true);
        }
        let notice = self.set_selected(row);
        if self.interaction == (Interaction::ScrollingToTarget { row }) {
            self.interaction = Interaction::Idle;
        }
        notice
    }
}

impl<H> CellStyleSource for RefCell<PickerController<H>> {
    fn font(&self) -> FontSpec {
        self.try_borrow()
            .map(|p| p.style.font.clone())
            .unwrap_or_default()
    }

    fn text_color(&self) -> Color {
        self.try_borrow()
            .map_or(PickerStyle::default().text_color, |p| p.style.text_color)
    }

    fn uses_two_line_mode(&self) -> bool {
        self.try_borrow()
            .map_or(PickerStyle::default().two_line_mode, |p| p.style.two_line_mode)
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::{Rc, Weak};
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::time::Duration;

    use kurbo::{Point, Rect, Size};

    use super::{Interaction, NotifyPolicy, PickerController, SharedPicker};
    use crate::{
        CellPool, Color, FontSpec, ManualScheduler, PickerConfig, PickerError, PickerHost,
        PickerProvider,
    };

    const SETTLE: Duration = Duration::from_millis(100);

    #[derive(Default)]
    struct Rows {
        titles: Vec<String>,
        selections: RefCell<Vec<usize>>,
    }

    impl Rows {
        fn new(titles: &[&str]) -> Rc<Self> {
            Rc::new(Self {
                titles: titles.iter().map(|t| t.to_string()).collect(),
                selections: RefCell::default(),
            })
        }
    }

    impl PickerProvider for Rows {
        fn row_count(&self) -> usize {
            self.titles.len()
        }
        fn title(&self, row: usize) -> String {
            self.titles[row].clone()
        }
        fn row_selected(&self, row: usize) {
            self.selections.borrow_mut().push(row);
        }
    }

    #[derive(Debug)]
    struct View {
        size: Size,
        offset: Point,
        scrolls: Vec<(Point, bool)>,
        highlighted: Vec<usize>,
    }

    impl View {
        fn new(width: f64, height: f64) -> Self {
            Self {
                size: Size::new(width, height),
                offset: Point::ZERO,
                scrolls: Vec::new(),
                highlighted: Vec::new(),
            }
        }
    }

    impl PickerHost for View {
        fn viewport_size(&self) -> Size {
            self.size
        }
        fn content_offset(&self) -> Point {
            self.offset
        }
        fn set_content_offset(&mut self, offset: Point, animated: bool) {
            self.offset = offset;
            self.scrolls.push((offset, animated));
        }
        fn select_item(&mut self, row: usize, _animated: bool) {
            self.highlighted.push(row);
        }
    }

    /// Ten units per character, twenty tall.
    fn measure(text: &str, _: &FontSpec, _: Size) -> Rect {
        #[allow(clippy::cast_precision_loss, reason = "short test strings")]
        let width = text.chars().count() as f64 * 10.0;
        Rect::new(0.0, 0.0, width, 20.0)
    }

    struct Fixture {
        picker: SharedPicker<View>,
        scheduler: Rc<ManualScheduler>,
        rows: Rc<Rows>,
    }

    /// Five single-letter rows, each 26 wide, in a 52x40 viewport.
    fn fixture(config: PickerConfig) -> Fixture {
        let scheduler = Rc::new(ManualScheduler::new());
        let picker = PickerController::with_config(measure, scheduler.clone(), config);
        let rows = Rows::new(&["A", "B", "C", "D", "E"]);
        {
            let mut p = picker.borrow_mut();
            p.set_provider(&rows);
            p.attach(View::new(52.0, 40.0));
        }
        Fixture {
            picker,
            scheduler,
            rows,
        }
    }

    fn scroll_host_to(picker: &SharedPicker<View>, x: f64) {
        let mut p = picker.borrow_mut();
        let host = p.host_mut().unwrap();
        host.offset = Point::new(x, 0.0);
    }

    #[test]
    fn cells_are_sized_to_titles_plus_padding() {
        let f = fixture(PickerConfig::default());
        let p = f.picker.borrow();
        assert_eq!(p.size_for_row(0), Size::new(26.0, 20.0));
        assert_eq!(
            p.size_for_text("abc", Size::new(f64::INFINITY, 40.0)),
            Size::new(46.0, 20.0)
        );
    }

    #[test]
    fn missing_provider_reports_no_rows_and_measures_placeholder() {
        let scheduler = Rc::new(ManualScheduler::new());
        let picker: SharedPicker<View> = PickerController::new(measure, scheduler);
        let p = picker.borrow();
        assert_eq!(p.row_count(), 0);
        assert_eq!(p.title(0), None);
        // One placeholder character plus padding.
        assert_eq!(p.size_for_row(0).width, 26.0);
    }

    #[test]
    fn dropped_provider_degrades_to_empty() {
        let f = fixture(PickerConfig::default());
        assert_eq!(f.picker.borrow().row_count(), 5);
        drop(f.rows);
        assert_eq!(f.picker.borrow().row_count(), 0);
        assert!(f.picker.borrow_mut().layout().is_empty());
    }

    #[test]
    fn select_row_centers_then_selects_without_notifying() {
        let f = fixture(PickerConfig::default());
        f.picker.borrow_mut().select_row(3, false).unwrap();

        {
            let p = f.picker.borrow();
            // Cell 3 spans 78..104, mid 91, minus half of 52.
            assert_eq!(p.host().unwrap().scrolls, vec![(Point::new(65.0, 0.0), false)]);
            assert_eq!(p.selected_row(), 0);
            assert_eq!(p.interaction(), Interaction::ScrollingToTarget { row: 3 });
            assert_eq!(p.notify_policy(), NotifyPolicy::SuppressNext);
        }

        assert_eq!(f.scheduler.advance(SETTLE), 1);
        let p = f.picker.borrow();
        assert_eq!(p.selected_row(), 3);
        assert_eq!(p.interaction(), Interaction::Idle);
        assert_eq!(p.notify_policy(), NotifyPolicy::Notify);
        assert_eq!(p.host().unwrap().highlighted, vec![3]);
        assert!(f.rows.selections.borrow().is_empty());
    }

    #[test]
    fn select_row_holds_for_every_valid_row() {
        let f = fixture(PickerConfig::default());
        for row in 0..5 {
            f.picker.borrow_mut().select_row(row, false).unwrap();
            f.scheduler.advance(SETTLE);
            let mut p = f.picker.borrow_mut();
            assert_eq!(p.selected_row(), row);
            let frame = p.frame_for_row(row).unwrap();
            let offset = p.host().unwrap().offset.x;
            assert_eq!(offset, frame.center().x - 26.0);
        }
        assert!(f.rows.selections.borrow().is_empty());
    }

    #[test]
    fn select_row_rejects_out_of_range() {
        let f = fixture(PickerConfig::default());
        let err = f.picker.borrow_mut().select_row(5, true).unwrap_err();
        assert_eq!(err, PickerError::RowOutOfRange { row: 5, row_count: 5 });
        let p = f.picker.borrow();
        assert!(p.host().unwrap().scrolls.is_empty());
        assert_eq!(p.notify_policy(), NotifyPolicy::Notify);
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[test]
    fn select_row_while_detached_is_a_no_op() {
        let f = fixture(PickerConfig::default());
        let host = f.picker.borrow_mut().detach();
        assert!(host.is_some());
        assert_eq!(f.picker.borrow_mut().select_row(99, true), Ok(()));
        assert_eq!(f.scheduler.pending(), 0);
        assert_eq!(f.picker.borrow().interaction(), Interaction::Idle);
    }

    #[test]
    fn tap_selects_immediately_and_notifies_once() {
        let f = fixture(PickerConfig::default());
        PickerController::tap(&f.picker, 1);
        let p = f.picker.borrow();
        assert_eq!(p.selected_row(), 1);
        assert_eq!(p.interaction(), Interaction::Idle);
        // Cell 1 spans 26..52, mid 39.
        assert_eq!(p.host().unwrap().scrolls, vec![(Point::new(13.0, 0.0), true)]);
        assert_eq!(*f.rows.selections.borrow(), [1]);
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[test]
    fn drag_without_momentum_snaps_to_center_cell() {
        let f = fixture(PickerConfig::default());
        f.picker.borrow_mut().begin_drag();
        assert_eq!(f.picker.borrow().interaction(), Interaction::Dragging);

        // Center at 40 + 26 = 66 lands in cell 2 (52..78).
        scroll_host_to(&f.picker, 40.0);
        f.picker.borrow_mut().end_drag(false);
        {
            let p = f.picker.borrow();
            assert_eq!(p.interaction(), Interaction::ScrollingToTarget { row: 2 });
            assert_eq!(p.host().unwrap().offset, Point::new(39.0, 0.0));
        }

        f.scheduler.advance(SETTLE);
        assert_eq!(f.picker.borrow().selected_row(), 2);
        assert_eq!(*f.rows.selections.borrow(), [2]);
    }

    #[test]
    fn momentum_defers_snapping_until_deceleration_ends() {
        let f = fixture(PickerConfig::default());
        f.picker.borrow_mut().begin_drag();
        f.picker.borrow_mut().end_drag(true);
        assert_eq!(f.picker.borrow().interaction(), Interaction::Decelerating);
        assert_eq!(f.scheduler.pending(), 0);

        scroll_host_to(&f.picker, 70.0);
        f.picker.borrow_mut().end_deceleration();
        f.scheduler.advance(SETTLE);
        // Center at 96 lands in cell 3.
        assert_eq!(f.picker.borrow().selected_row(), 3);
        assert_eq!(*f.rows.selections.borrow(), [3]);
    }

    #[test]
    fn snap_reselecting_the_same_row_still_notifies() {
        let f = fixture(PickerConfig::default());
        // Center at 13, the middle of cell 0.
        scroll_host_to(&f.picker, -13.0);
        f.picker.borrow_mut().end_drag(false);
        f.scheduler.advance(SETTLE);
        assert_eq!(f.picker.borrow().selected_row(), 0);
        assert_eq!(*f.rows.selections.borrow(), [0]);
    }

    #[test]
    fn center_detection_falls_back_to_first_visible_cell() {
        let f = fixture(PickerConfig::default().with_item_spacing(10.0));
        // Cells at 0..26, 36..62, 72..98; center 67 sits in the 62..72 gap.
        scroll_host_to(&f.picker, 41.0);
        assert_eq!(f.picker.borrow_mut().center_row(), Some(1));

        // Wide viewport, center past the end of content.
        f.picker.borrow_mut().host_mut().unwrap().size = Size::new(1000.0, 40.0);
        scroll_host_to(&f.picker, 0.0);
        assert_eq!(f.picker.borrow_mut().center_row(), Some(0));

        // Scrolled past everything.
        scroll_host_to(&f.picker, 5000.0);
        assert_eq!(f.picker.borrow_mut().center_row(), None);
    }

    #[test]
    fn deferred_selection_is_dropped_with_the_picker() {
        let f = fixture(PickerConfig::default());
        f.picker.borrow_mut().select_row(2, false).unwrap();
        drop(f.picker);
        assert_eq!(f.scheduler.advance(SETTLE), 1);
        assert!(f.rows.selections.borrow().is_empty());
    }

    #[test]
    fn settle_delay_follows_config() {
        let f = fixture(PickerConfig::default().with_settle_delay(Duration::from_millis(250)));
        f.picker.borrow_mut().select_row(4, true).unwrap();
        f.scheduler.advance(SETTLE);
        assert_eq!(f.picker.borrow().selected_row(), 0);
        f.scheduler.advance(Duration::from_millis(150));
        assert_eq!(f.picker.borrow().selected_row(), 4);
    }

    #[test]
    fn cells_pick_up_style_changes_after_configuration() {
        let f = fixture(PickerConfig::default());
        let mut pool = CellPool::new();
        let cell = f.picker.borrow().cell_for_row(&mut pool, 0);
        assert_eq!(cell.text(), "A");
        assert!(cell.is_selected());
        assert_eq!(cell.label().color, Color::LIGHT_GRAY);

        f.picker.borrow_mut().set_text_color(Color::WHITE);
        f.picker.borrow_mut().set_two_line_mode(false);
        let label = cell.label();
        assert_eq!(label.color, Color::WHITE);
        assert_eq!(label.max_lines, 1);

        let other = f.picker.borrow().cell_for_row(&mut pool, 4);
        assert_eq!(other.text(), "E");
        assert!(!other.is_selected());
    }

    #[test]
    fn configure_without_provider_leaves_cell_untouched() {
        let scheduler = Rc::new(ManualScheduler::new());
        let picker: SharedPicker<View> = PickerController::new(measure, scheduler);
        let mut pool = CellPool::new();
        let cell = picker.borrow().cell_for_row(&mut pool, 0);
        assert_eq!(cell.row(), None);
        assert_eq!(cell.text(), "");
    }

    #[test]
    fn font_change_relayouts_cells() {
        let scheduler = Rc::new(ManualScheduler::new());
        let picker: SharedPicker<View> = PickerController::new(
            |text: &str, font: &FontSpec, _: Size| {
                #[allow(clippy::cast_precision_loss, reason = "short test strings")]
                let width = text.len() as f64 * font.size;
                Rect::new(0.0, 0.0, width, font.size)
            },
            scheduler,
        );
        let rows = Rows::new(&["ab"]);
        let mut p = picker.borrow_mut();
        p.set_provider(&rows);
        p.attach(View::new(100.0, 40.0));
        p.set_font(FontSpec::new("mono", 10.0));
        assert_eq!(p.frame_for_row(0).map(|f| f.width()), Some(36.0));
        p.set_font(FontSpec::new("mono", 20.0));
        assert_eq!(p.frame_for_row(0).map(|f| f.width()), Some(56.0));
    }

    #[test]
    fn rows_past_the_end_use_the_placeholder() {
        let f = fixture(PickerConfig::default());
        let mut pool = CellPool::new();
        let p = f.picker.borrow();
        assert_eq!(p.size_for_row(7), Size::new(26.0, 20.0));
        let cell = p.cell_for_row(&mut pool, 7);
        assert_eq!(cell.row(), None);
        assert_eq!(cell.text(), "");
    }

    /// Reads the picker back from inside `row_selected`.
    struct Watcher {
        picker: RefCell<Weak<RefCell<PickerController<View>>>>,
        seen: RefCell<Vec<(usize, usize)>>,
    }

    impl PickerProvider for Watcher {
        fn row_count(&self) -> usize {
            5
        }
        fn title(&self, row: usize) -> String {
            row.to_string()
        }
        fn row_selected(&self, row: usize) {
            let picker = self.picker.borrow().upgrade().unwrap();
            let current = picker.borrow().selected_row();
            self.seen.borrow_mut().push((row, current));
        }
    }

    #[test]
    fn provider_can_read_the_picker_when_notified() {
        let scheduler = Rc::new(ManualScheduler::new());
        let picker = PickerController::new(measure, scheduler.clone());
        let watcher = Rc::new(Watcher {
            picker: RefCell::new(Rc::downgrade(&picker)),
            seen: RefCell::default(),
        });
        picker.borrow_mut().set_provider(&watcher);
        picker.borrow_mut().attach(View::new(52.0, 40.0));

        PickerController::tap(&picker, 1);
        assert_eq!(*watcher.seen.borrow(), [(1, 1)]);

        // Center at 40 + 26 = 66 lands in cell 2.
        scroll_host_to(&picker, 40.0);
        picker.borrow_mut().end_drag(false);
        assert_eq!(scheduler.advance(SETTLE), 1);
        assert_eq!(*watcher.seen.borrow(), [(1, 1), (2, 2)]);
    }

    #[test]
    fn tap_row_hands_back_the_notice() {
        let f = fixture(PickerConfig::default());
        let notice = f.picker.borrow_mut().tap_row(3).unwrap();
        assert_eq!(notice.row(), 3);
        assert!(f.rows.selections.borrow().is_empty());
        notice.deliver();
        assert_eq!(*f.rows.selections.borrow(), [3]);

        assert!(f.picker.borrow_mut().tap_row(9).is_none());
        assert_eq!(f.picker.borrow().selected_row(), 3);
    }

    #[test]
    fn settle_while_borrowed_is_skipped() {
        let f = fixture(PickerConfig::default());
        f.picker.borrow_mut().select_row(2, false).unwrap();

        let held = f.picker.borrow();
        assert_eq!(f.scheduler.advance(SETTLE), 1);
        drop(held);

        let p = f.picker.borrow();
        assert_eq!(p.selected_row(), 0);
        assert_eq!(p.notify_policy(), NotifyPolicy::SuppressNext);
        assert_eq!(p.interaction(), Interaction::ScrollingToTarget { row: 2 });
        assert!(p.host().unwrap().highlighted.is_empty());
        assert_eq!(f.scheduler.pending(), 0);
        assert!(f.rows.selections.borrow().is_empty());
    }

    #[test]
    fn visible_rows_track_the_viewport() {
        let f = fixture(PickerConfig::default());
        assert_eq!(f.picker.borrow_mut().visible_rows(), 0..2);
        scroll_host_to(&f.picker, 30.0);
        assert_eq!(f.picker.borrow_mut().visible_rows(), 1..4);
        f.picker.borrow_mut().detach();
        assert_eq!(f.picker.borrow_mut().visible_rows(), 0..0);
    }
}
