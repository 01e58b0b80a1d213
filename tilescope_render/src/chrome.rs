// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Front-end overlays drawn above the tileset: tooltip, toast, progress bar.
//!
//! Layout is the caller's job; these items carry final device-space
//! rectangles. [`text_box_size`] measures text for layout. Chrome text is
//! always anti-aliased.

use kurbo::{Point, Rect, Size};
use peniko::Color;

use crate::canvas::Canvas;
use crate::text::Font;

/// Font size of chrome text, in pixels per em.
pub const CHROME_FONT_SIZE: f64 = 18.0;

/// A filled box with optional border and one or more lines of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBox {
    /// Outer rectangle in device pixels.
    pub rect: Rect,
    /// Text lines, drawn top to bottom.
    pub lines: Vec<String>,
    /// Inner padding between the border and the text.
    pub padding: Size,
    /// Fill colour.
    pub fill: Color,
    /// Border colour and width, if any.
    pub border: Option<(Color, f64)>,
    /// Text colour.
    pub text: Color,
    /// Centre the text horizontally instead of aligning it left.
    pub centered: bool,
}

/// Horizontal export progress bar with a percentage caption.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressBar {
    /// Outer rectangle in device pixels.
    pub rect: Rect,
    /// Completed fraction in `[0, 1]`.
    pub fraction: f64,
    /// Track colour.
    pub background: Color,
    /// Completed part colour.
    pub fill: Color,
    /// Border colour.
    pub border: Color,
    /// Caption colour.
    pub text: Color,
}

impl ProgressBar {
    /// Caption drawn in the middle of the bar.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the percentage is clamped to 0..=100"
    )]
    pub fn caption(&self) -> String {
        let percent = (self.fraction.clamp(0.0, 1.0) * 100.0).floor() as u32;
        format!("Exporting... {percent}%")
    }
}

/// Something drawn on top of the view, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum ChromeItem {
    /// Tooltip or toast.
    TextBox(TextBox),
    /// Export progress.
    Progress(ProgressBar),
}

/// Outer size of a box holding `lines` in `font` with `padding` on every
/// side.
#[must_use]
pub fn text_box_size(font: &Font, lines: &[String], padding: Size) -> Size {
    let text = font.measure(&lines.join("\n"), CHROME_FONT_SIZE);
    Size::new(
        text.width + 2.0 * padding.width,
        text.height + 2.0 * padding.height,
    )
}

pub(crate) fn draw(canvas: &mut Canvas, font: &Font, items: &[ChromeItem]) {
    let previous = canvas.clip();
    let bounds = canvas.bounds();
    canvas.set_clip(bounds);
    for item in items {
        match item {
            ChromeItem::TextBox(b) => draw_text_box(canvas, font, b),
            ChromeItem::Progress(p) => draw_progress(canvas, font, p),
        }
    }
    canvas.set_clip(previous);
}

fn draw_text_box(canvas: &mut Canvas, font: &Font, b: &TextBox) {
    canvas.fill(b.rect, b.fill);
    if let Some((color, width)) = b.border {
        canvas.stroke_inside(b.rect, width, color);
    }
    let line_height = font.line_height(CHROME_FONT_SIZE);
    let mut baseline = b.rect.y0 + b.padding.height + font.ascent(CHROME_FONT_SIZE);
    for line in &b.lines {
        let width = font.measure(line, CHROME_FONT_SIZE).width;
        let x = if b.centered {
            b.rect.center().x - width / 2.0
        } else {
            b.rect.x0 + b.padding.width
        };
        let origin = Point::new(x.round(), baseline.round());
        canvas.text(font, CHROME_FONT_SIZE, line, origin, b.text, true);
        baseline += line_height;
    }
}

fn draw_progress(canvas: &mut Canvas, font: &Font, p: &ProgressBar) {
    canvas.fill(p.rect, p.background);
    let fraction = p.fraction.clamp(0.0, 1.0);
    let filled = Rect::new(
        p.rect.x0,
        p.rect.y0,
        p.rect.x0 + (p.rect.width() * fraction).floor(),
        p.rect.y1,
    );
    canvas.fill(filled, p.fill);
    canvas.stroke_inside(p.rect, 2.0, p.border);

    let caption = p.caption();
    let width = font.measure(&caption, CHROME_FONT_SIZE).width;
    let center = p.rect.center();
    let origin = Point::new(
        (center.x - width / 2.0).round(),
        (center.y + font.cap_height(CHROME_FONT_SIZE) / 2.0).round(),
    );
    canvas.text(font, CHROME_FONT_SIZE, &caption, origin, p.text, true);
}
