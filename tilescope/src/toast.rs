// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Short-lived status messages.

use std::fmt;
use std::time::{Duration, Instant};

use kurbo::{Point, Rect, Size};
use tilescope_config::Rgba;
use tilescope_render::{Font, TextBox, text_box_size, to_color};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(2500);
/// Vertical centre of the toast, measured from the top of the window.
pub(crate) const TOAST_CENTER_Y: f64 = 30.0;
/// Padding around the toast text on each side.
pub(crate) const TOAST_PADDING: Size = Size::new(10.0, 5.0);

/// Severity of a toast; selects its text colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    /// Neutral information.
    Info,
    /// An action completed.
    Success,
    /// Something was adjusted or skipped.
    Warning,
    /// An action failed.
    Error,
}

impl ToastLevel {
    /// Text colour for this level.
    #[must_use]
    pub fn colour(self) -> Rgba {
        match self {
            Self::Info => Rgba::rgb(100, 180, 255),
            Self::Success => Rgba::rgb(100, 220, 100),
            Self::Warning => Rgba::rgb(255, 180, 80),
            Self::Error => Rgba::rgb(255, 100, 100),
        }
    }
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A message shown at the top of the window for [`TOAST_LIFETIME`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    text: String,
    level: ToastLevel,
    shown_at: Instant,
}

impl Toast {
    /// Creates a toast first shown at `now`.
    #[must_use]
    pub fn new(text: impl Into<String>, level: ToastLevel, now: Instant) -> Self {
        Self {
            text: text.into(),
            level,
            shown_at: now,
        }
    }

    /// Message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Severity.
    #[must_use]
    pub fn level(&self) -> ToastLevel {
        self.level
    }

    /// Returns `true` while the toast should still be drawn at `now`.
    #[must_use]
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < TOAST_LIFETIME
    }

    /// Box for `font`, centred horizontally in a window `window_width` wide.
    #[must_use]
    pub fn layout(&self, font: &Font, window_width: f64, background: Rgba) -> TextBox {
        let lines = vec![self.text.clone()];
        let size = text_box_size(font, &lines, TOAST_PADDING);
        let center = Point::new((window_width / 2.0).floor(), TOAST_CENTER_Y);
        let origin = Point::new(
            (center.x - size.width / 2.0).round(),
            (center.y - size.height / 2.0).round(),
        );
        TextBox {
            rect: Rect::from_origin_size(origin, size),
            lines,
            padding: TOAST_PADDING,
            fill: to_color(background),
            border: None,
            text: to_color(self.level.colour()),
            centered: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use tilescope_render::CHROME_FONT_SIZE;

    use super::*;

    #[test]
    fn expires_after_its_lifetime() {
        let t0 = Instant::now();
        let toast = Toast::new("Exported to out.png", ToastLevel::Success, t0);
        assert!(toast.is_visible(t0));
        assert!(toast.is_visible(t0 + Duration::from_millis(2499)));
        assert!(!toast.is_visible(t0 + TOAST_LIFETIME));
    }

    #[test]
    fn layout_is_centred_near_the_top() {
        let font = Font::bundled();
        let toast = Toast::new("OK", ToastLevel::Info, Instant::now());
        let b = toast.layout(&font, 800.0, Rgba::rgba(30, 40, 50, 220));
        assert!((b.rect.center().x - 400.0).abs() <= 0.5, "{:?}", b.rect);
        assert_eq!(
            b.rect.height(),
            font.line_height(CHROME_FONT_SIZE) + 2.0 * TOAST_PADDING.height
        );
        assert!((b.rect.center().y - TOAST_CENTER_Y).abs() <= 0.5, "{:?}", b.rect);
        assert_eq!(b.text, to_color(ToastLevel::Info.colour()));
    }
}
