// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A picker driven by a text-mode host.
//!
//! This example shows how a host wires `understory_picker` into its own loop:
//! - a `PickerHost` that stores the content offset and highlighted row,
//! - a fixed-advance `MonospaceMeasure` so one character is one column,
//! - a `ManualScheduler` advanced by the "frame loop",
//! - a `CellPool` to realize the visible cells each frame.
//!
//! Run:
//! - `cargo run -p understory_demos --example console_picker`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Size};
use understory_picker::{
    CellPool, FontSpec, ManualScheduler, MonospaceMeasure, PickerConfig, PickerController,
    PickerHost, PickerProvider, SharedPicker,
};

const FRAME: Duration = Duration::from_millis(16);

/// Months of the year; records every selection the user makes.
struct Months {
    log: RefCell<Vec<usize>>,
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl PickerProvider for Months {
    fn row_count(&self) -> usize {
        MONTHS.len()
    }

    fn title(&self, row: usize) -> String {
        MONTHS[row].to_string()
    }

    fn row_selected(&self, row: usize) {
        println!("  provider: user picked {}", MONTHS[row]);
        self.log.borrow_mut().push(row);
    }
}

/// A 40-column, one-line terminal viewport.
#[derive(Default)]
struct Terminal {
    offset: Point,
    highlighted: Option<usize>,
}

impl PickerHost for Terminal {
    fn viewport_size(&self) -> Size {
        Size::new(40.0, 1.0)
    }

    fn content_offset(&self) -> Point {
        self.offset
    }

    fn set_content_offset(&mut self, offset: Point, animated: bool) {
        println!(
            "  host: scroll to x={} ({})",
            offset.x,
            if animated { "animated" } else { "instant" }
        );
        self.offset = offset;
    }

    fn select_item(&mut self, row: usize, _animated: bool) {
        self.highlighted = Some(row);
    }
}

/// Draws the visible cells into one line of text.
fn render(picker: &SharedPicker<Terminal>, pool: &mut CellPool) -> String {
    let rows = picker.borrow_mut().visible_rows();
    let mut line = vec![' '; 40];
    let mut realized = Vec::new();
    for row in rows {
        let cell = picker.borrow().cell_for_row(pool, row);
        let Some(frame) = picker.borrow_mut().frame_for_row(row) else {
            continue;
        };
        let offset = picker.borrow().host().map_or(0.0, |h| h.content_offset().x);
        let label = cell.label();
        let text = if label.selected {
            format!("[{}]", label.text)
        } else {
            label.text.to_string()
        };
        // Center the title within its frame, clipped to the viewport.
        let start = frame.x0 - offset + (frame.width() - text.len() as f64) / 2.0;
        for (i, ch) in text.chars().enumerate() {
            let col = start as isize + i as isize;
            if (0..40).contains(&col) {
                line[col as usize] = ch;
            }
        }
        realized.push(cell);
    }
    for cell in realized {
        pool.recycle(cell);
    }
    line.into_iter().collect()
}

fn frame(picker: &SharedPicker<Terminal>, scheduler: &ManualScheduler, pool: &mut CellPool) {
    scheduler.advance(FRAME);
    println!("|{}|", render(picker, pool));
}

fn settle(picker: &SharedPicker<Terminal>, scheduler: &ManualScheduler, pool: &mut CellPool) {
    for _ in 0..8 {
        frame(picker, scheduler, pool);
    }
}

fn main() {
    let scheduler = Rc::new(ManualScheduler::new());
    let measure = MonospaceMeasure {
        advance_ratio: 1.0,
        line_height_ratio: 1.0,
    };
    // One column of padding per cell edge in a terminal.
    let config = PickerConfig::default().with_cell_padding(2.0);
    let picker = PickerController::with_config(measure, scheduler.clone(), config);
    let months = Rc::new(Months {
        log: RefCell::default(),
    });
    {
        let mut p = picker.borrow_mut();
        p.set_font(FontSpec::new("terminal", 1.0));
        p.set_provider(&months);
        p.attach(Terminal::default());
    }
    let mut pool = CellPool::new();

    println!("select_row(5) from code:");
    if let Err(err) = picker.borrow_mut().select_row(5, false) {
        println!("  {err}");
    }
    settle(&picker, &scheduler, &mut pool);

    println!("select_row(42) from code:");
    if let Err(err) = picker.borrow_mut().select_row(42, false) {
        println!("  rejected: {err}");
    }

    println!("user drags right and flings:");
    picker.borrow_mut().begin_drag();
    if let Some(host) = picker.borrow_mut().host_mut() {
        host.offset.x += 23.0;
    }
    picker.borrow_mut().end_drag(true);
    frame(&picker, &scheduler, &mut pool);
    picker.borrow_mut().end_deceleration();
    settle(&picker, &scheduler, &mut pool);

    println!("user taps the leftmost visible cell:");
    let first = picker.borrow_mut().visible_rows().start;
    PickerController::tap(&picker, first);
    settle(&picker, &scheduler, &mut pool);

    println!(
        "selected {} (host highlight {:?}) after {} user selections; {} cells allocated",
        MONTHS[picker.borrow().selected_row()],
        picker.borrow().host().and_then(|h| h.highlighted),
        months.log.borrow().len(),
        pool.created_count()
    );
}
