// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual configuration shared between the picker and its cells.

use alloc::borrow::Cow;

/// A font request understood by the host's text measurement and rendering.
///
/// The picker does not load fonts. It passes this description to
/// [`TextMeasure`](crate::TextMeasure) and hands it to cells at render time.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Font family name, or a host-defined alias such as `"system"`.
    pub family: Cow<'static, str>,
    /// Point size in logical pixels.
    pub size: f64,
}

impl FontSpec {
    /// Creates a font request for a static family name.
    #[must_use]
    pub const fn new(family: &'static str, size: f64) -> Self {
        Self {
            family: Cow::Borrowed(family),
            size,
        }
    }

    /// The system font at the "title 1" text style size.
    #[must_use]
    pub const fn title1() -> Self {
        Self::new("system", 28.0)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::title1()
    }
}

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque light gray (two thirds white).
    pub const LIGHT_GRAY: Self = Self::rgb(170, 170, 170);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Per-picker visual settings.
///
/// Set once by the owner of the picker, read by cells each time they are
/// configured. No validity range is enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct PickerStyle {
    /// Font for cell titles, also used to measure cell sizes.
    pub font: FontSpec,
    /// Title color.
    pub text_color: Color,
    /// Allow titles to wrap onto a second line.
    pub two_line_mode: bool,
    /// Maximum title width used when measuring. Zero or less means unconstrained.
    pub max_element_width: f64,
}

impl Default for PickerStyle {
    fn default() -> Self {
        Self {
            font: FontSpec::title1(),
            text_color: Color::LIGHT_GRAY,
            two_line_mode: true,
            max_element_width: 0.0,
        }
    }
}

impl PickerStyle {
    /// Replaces the font.
    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    /// Replaces the text color.
    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Enables or disables two-line mode.
    #[must_use]
    pub fn with_two_line_mode(mut self, enabled: bool) -> Self {
        self.two_line_mode = enabled;
        self
    }

    /// Sets the maximum measured title width.
    #[must_use]
    pub fn with_max_element_width(mut self, width: f64) -> Self {
        self.max_element_width = width;
        self
    }
}

/// Styling queries a cell makes at render time.
///
/// Cells keep a non-owning reference to a style source instead of copying the
/// style, so a change on the picker shows up the next time a cell is
/// configured.
pub trait CellStyleSource {
    /// Font for the cell title.
    fn font(&self) -> FontSpec;

    /// Color for the cell title.
    fn text_color(&self) -> Color;

    /// Whether the title may wrap onto a second line.
    fn uses_two_line_mode(&self) -> bool;
}

impl CellStyleSource for PickerStyle {
    fn font(&self) -> FontSpec {
        self.font.clone()
    }

    fn text_color(&self) -> Color {
        self.text_color
    }

    fn uses_two_line_mode(&self) -> bool {
        self.two_line_mode
    }
}
