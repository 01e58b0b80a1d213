// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

use kurbo::{Affine, Point, Rect, Vec2};

use crate::modes::ClampMode;

/// Zoom changes smaller than this are ignored.
const ZOOM_EPSILON: f64 = 1e-6;

/// Pan/zoom view over an image.
///
/// `Viewport` tracks a rectangle in screen space (the drawing area) and a
/// uniform pan+zoom transform mapping image coordinates into it. The pan is
/// the screen-space offset of the image origin relative to the view rect
/// origin.
#[derive(Clone, Debug)]
pub struct Viewport {
    view_rect: Rect,
    world_bounds: Option<Rect>,
    zoom: f64,
    pan: Vec2,
    min_zoom: f64,
    max_zoom: f64,
    home_zoom: f64,
    clamp_mode: ClampMode,
    world_to_view: Affine,
    view_to_world: Affine,
}

impl Viewport {
    /// Creates a viewport covering `view_rect` with default limits.
    ///
    /// - Initial and home zoom are `1.0`.
    /// - Initial pan is zero (image origin maps to the view rect origin).
    /// - Zoom is clamped to the range `[0.05, 4.0]`.
    /// - Clamping uses [`ClampMode::CenterOrEdge`].
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        let mut vp = Self {
            view_rect,
            world_bounds: None,
            zoom: 1.0,
            pan: Vec2::ZERO,
            min_zoom: 0.05,
            max_zoom: 4.0,
            home_zoom: 1.0,
            clamp_mode: ClampMode::default(),
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the current view rectangle in screen coordinates.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Sets the view rectangle, for example after a window resize or when a
    /// toolbar is shown or hidden.
    ///
    /// Zoom and pan are kept; clamping is applied against the new rect.
    pub fn set_view_rect(&mut self, rect: Rect) {
        if self.view_rect == rect {
            return;
        }
        self.view_rect = rect;
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Sets the image bounds used by clamping and [`Viewport::reset`].
    pub fn set_world_bounds(&mut self, bounds: Option<Rect>) {
        if self.world_bounds == bounds {
            return;
        }
        self.world_bounds = bounds;
        self.clamp_to_bounds();
    }

    /// Returns the current world bounds, if any.
    #[must_use]
    pub fn world_bounds(&self) -> Option<Rect> {
        self.world_bounds
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the screen-space offset of the image origin from the view rect origin.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Returns the configured `(min, max)` zoom range.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Returns the zoom restored by [`Viewport::reset`].
    #[must_use]
    pub fn home_zoom(&self) -> f64 {
        self.home_zoom
    }

    /// Sets the clamp mode.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) {
        if self.clamp_mode != mode {
            self.clamp_mode = mode;
            self.clamp_to_bounds();
        }
    }

    /// Returns the current clamp mode.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.clamp_mode
    }

    /// Sets the zoom factor, clamping it into the configured zoom range.
    ///
    /// The pan is kept, so this scales around the image origin; use
    /// [`Viewport::zoom_about_view_point`] to keep a screen point fixed.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Pans the view by a delta in screen space.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.pan += delta;
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Zooms by `factor` around an anchor point in screen coordinates.
    ///
    /// The image point under the anchor stays under the anchor, unless
    /// clamping has to move the image afterwards. Non-positive factors and
    /// changes that the zoom limits swallow are ignored.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) {
        if factor <= 0.0 || !factor.is_finite() {
            return;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() < ZOOM_EPSILON {
            return;
        }

        let old_world = self.view_to_world_point(anchor_view);
        self.zoom = new_zoom;
        self.rebuild_transforms();
        let new_anchor_view = self.world_to_view_point(old_world);
        self.pan += anchor_view - new_anchor_view;
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Zooms by `factor` around the center of the view rect.
    pub fn zoom_about_center(&mut self, factor: f64) {
        self.zoom_about_view_point(self.view_rect.center(), factor);
    }

    /// Restores the home zoom and centers the world bounds in the view.
    ///
    /// Without world bounds the pan is reset to zero.
    pub fn reset(&mut self) {
        self.zoom = self.home_zoom.clamp(self.min_zoom, self.max_zoom);
        self.pan = match self.world_bounds {
            Some(bounds) => {
                let view_center = self.view_rect.center().to_vec2();
                let view_origin = self.view_rect.origin().to_vec2();
                view_center - view_origin - bounds.center().to_vec2() * self.zoom
            }
            None => Vec2::ZERO,
        };
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Centers the view on the given image-space point, then clamps.
    pub fn center_on(&mut self, world_pt: Point) {
        let view_center = self.view_rect.center();
        let world_in_view = self.world_to_view_point(world_pt);
        self.pan += view_center - world_in_view;
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Returns the transform mapping image space into screen space.
    #[must_use]
    pub fn world_to_view(&self) -> Affine {
        self.world_to_view
    }

    /// Returns the image-space rectangle currently visible through the view.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.view_to_world_rect(self.view_rect)
    }

    /// Converts an image-space point into screen coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.world_to_view * pt
    }

    /// Converts a screen-space point into image coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.view_to_world * pt
    }

    /// Converts an image-space rectangle into screen coordinates.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        // Axis-aligned with uniform positive zoom: the corners map directly.
        Rect::from_points(
            self.world_to_view * rect.origin(),
            self.world_to_view * Point::new(rect.x1, rect.y1),
        )
    }

    /// Converts a screen-space rectangle into image coordinates.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.view_to_world * rect.origin(),
            self.view_to_world * Point::new(rect.x1, rect.y1),
        )
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            view_rect: self.view_rect,
            world_bounds: self.world_bounds,
            visible_world_rect: self.visible_world_rect(),
            zoom: self.zoom,
            pan: self.pan,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            clamp_mode: self.clamp_mode,
        }
    }

    fn rebuild_transforms(&mut self) {
        let view_origin = self.view_rect.origin().to_vec2();
        // World → view: scale, then translate by pan into the view rect.
        self.world_to_view = Affine::translate(view_origin + self.pan) * Affine::scale(self.zoom);
        self.view_to_world = self.world_to_view.inverse();
    }

    fn clamp_to_bounds(&mut self) {
        let bounds = match self.world_bounds {
            Some(b) if b.width() > 0.0 && b.height() > 0.0 => b,
            _ => return,
        };
        let delta = match self.clamp_mode {
            ClampMode::None => return,
            ClampMode::KeepSomeVisible => self.keep_some_visible_delta(bounds),
            ClampMode::CenterOrEdge => self.center_or_edge_delta(bounds),
        };
        if delta != Vec2::ZERO {
            self.pan += delta;
            self.rebuild_transforms();
        }
    }

    /// Screen-space correction that restores some overlap with `bounds`.
    fn keep_some_visible_delta(&self, bounds: Rect) -> Vec2 {
        let visible = self.visible_world_rect();
        if visible.width() <= 0.0 || visible.height() <= 0.0 {
            return Vec2::ZERO;
        }

        let mut dx = 0.0;
        let mut dy = 0.0;
        if visible.max_x() < bounds.min_x() {
            dx = bounds.min_x() - visible.max_x();
        } else if visible.min_x() > bounds.max_x() {
            dx = bounds.max_x() - visible.min_x();
        }
        if visible.max_y() < bounds.min_y() {
            dy = bounds.min_y() - visible.max_y();
        } else if visible.min_y() > bounds.max_y() {
            dy = bounds.max_y() - visible.min_y();
        }

        // Moving the visible world rect by +d means moving the image by -d on screen.
        Vec2::new(-dx * self.zoom, -dy * self.zoom)
    }

    /// Screen-space correction that centers small content and pins large content to the edges.
    fn center_or_edge_delta(&self, bounds: Rect) -> Vec2 {
        let content = self.world_to_view_rect(bounds);
        let view = self.view_rect;
        let axis = |c0: f64, c1: f64, v0: f64, v1: f64| -> f64 {
            if c1 - c0 < v1 - v0 {
                (v0 + v1) * 0.5 - (c0 + c1) * 0.5
            } else if c0 > v0 {
                v0 - c0
            } else if c1 < v1 {
                v1 - c1
            } else {
                0.0
            }
        };
        Vec2::new(
            axis(content.x0, content.x1, view.x0, view.x1),
            axis(content.y0, content.y1, view.y0, view.y1),
        )
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Current view rectangle in screen coordinates.
    pub view_rect: Rect,
    /// Optional world bounds for clamping and reset.
    pub world_bounds: Option<Rect>,
    /// Image-space rectangle currently visible through the view.
    pub visible_world_rect: Rect,
    /// Current uniform zoom factor.
    pub zoom: f64,
    /// Current pan offset in screen coordinates.
    pub pan: Vec2,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Clamp mode applied after every change.
    pub clamp_mode: ClampMode,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::{ClampMode, Viewport};

    fn tileset_view() -> Viewport {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 1000.0, 615.0));
        vp.set_world_bounds(Some(Rect::new(0.0, 0.0, 2048.0, 512.0)));
        vp.reset();
        vp
    }

    #[test]
    fn world_view_roundtrip() {
        let mut vp = tileset_view();
        vp.set_zoom(1.7);
        let world_pt = Point::new(10.0, -5.0);
        let back = vp.view_to_world_point(vp.world_to_view_point(world_pt));
        assert!((back.x - world_pt.x).abs() < 1e-9);
        assert!((back.y - world_pt.y).abs() < 1e-9);
    }

    #[test]
    fn reset_centers_narrow_axis_and_clamps_wide_axis() {
        let vp = tileset_view();
        assert_eq!(vp.zoom(), 1.0);
        // 512 px tall content in a 615 px tall view is centered vertically.
        assert!((vp.pan().y - 51.5).abs() < 1e-9);
        // 2048 px wide content in a 1000 px wide view is centered and still
        // covers both edges.
        assert!((vp.pan().x + 524.0).abs() < 1e-9);
    }

    #[test]
    fn small_content_stays_centered_while_panning() {
        let mut vp = tileset_view();
        vp.set_zoom(0.25);
        let before = vp.pan();
        vp.pan_by_view(Vec2::new(120.0, -40.0));
        assert!((vp.pan() - before).hypot() < 1e-9);
    }

    #[test]
    fn large_content_cannot_show_a_gap() {
        let mut vp = tileset_view();
        vp.set_zoom(2.0);
        vp.pan_by_view(Vec2::new(5000.0, 5000.0));
        let content = vp.world_to_view_rect(Rect::new(0.0, 0.0, 2048.0, 512.0));
        assert!(content.x0.abs() < 1e-9);
        assert!(content.y0.abs() < 1e-9);

        vp.pan_by_view(Vec2::new(-50_000.0, -50_000.0));
        let content = vp.world_to_view_rect(Rect::new(0.0, 0.0, 2048.0, 512.0));
        assert!((content.x1 - 1000.0).abs() < 1e-9);
        assert!((content.y1 - 615.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_is_limited() {
        let mut vp = tileset_view();
        vp.zoom_about_center(100.0);
        assert_eq!(vp.zoom(), 4.0);
        vp.zoom_about_center(1e-6);
        assert_eq!(vp.zoom(), 0.05);
        vp.zoom_about_center(-1.0);
        assert_eq!(vp.zoom(), 0.05);
    }

    #[test]
    fn keep_some_visible_pulls_view_back() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        vp.set_clamp_mode(ClampMode::KeepSomeVisible);
        let bounds = Rect::new(0.0, 0.0, 50.0, 50.0);
        vp.set_world_bounds(Some(bounds));

        vp.pan_by_view(Vec2::new(1000.0, 1000.0));
        let visible = vp.visible_world_rect();
        assert!(visible.max_x() >= bounds.min_x() - 1e-6);
        assert!(visible.max_y() >= bounds.min_y() - 1e-6);
    }

    #[test]
    fn center_on_puts_point_in_the_middle() {
        let mut vp = tileset_view();
        vp.set_zoom(2.0);
        let target = Point::new(1000.0, 200.0);
        vp.center_on(target);
        let on_screen = vp.world_to_view_point(target);
        assert!((on_screen - vp.view_rect().center()).hypot() < 1e-9);
    }

    #[test]
    fn debug_info_reports_state() {
        let vp = tileset_view();
        let info = vp.debug_info();
        assert_eq!(info.view_rect, vp.view_rect());
        assert_eq!(info.clamp_mode, ClampMode::CenterOrEdge);
        assert!(info.min_zoom <= info.max_zoom);
        assert_eq!(info.zoom, 1.0);
    }
}
