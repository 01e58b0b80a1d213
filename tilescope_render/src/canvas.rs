// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

use image::RgbaImage;
use kurbo::{Affine, Point, Rect};
use peniko::Color;
use vello_cpu::kurbo::{Affine as CpuAffine, Rect as CpuRect, Shape as _};
use vello_cpu::{Image as CpuImage, ImageSource, Pixmap, RenderContext, RenderMode, RenderSettings};

use crate::text::Font;

/// Coverage above which a pixel is painted when anti-aliasing is off.
const ALIASING_THRESHOLD: u8 = 128;

/// Errors produced while rasterizing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A canvas dimension is zero.
    #[error("cannot render an empty {width}x{height} canvas")]
    Empty {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A canvas dimension exceeds what the rasterizer addresses.
    #[error("{width}x{height} exceeds the {max}x{max} canvas limit")]
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Largest supported dimension.
        max: u32,
    },
    /// A pixel buffer does not match its stated size.
    #[error("pixel buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    BufferSize {
        /// Stated width.
        width: u32,
        /// Stated height.
        height: u32,
        /// Bytes required.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

/// An RGBA8 tileset image ready to be used as a paint.
///
/// Cloning is cheap; the pixels are shared.
#[derive(Clone, Debug)]
pub struct SourceImage {
    data: peniko::ImageData,
}

impl SourceImage {
    /// Wraps straight-alpha RGBA8 pixels, row-major from the top-left.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            data: peniko::ImageData {
                data: peniko::Blob::from(pixels),
                format: peniko::ImageFormat::Rgba8,
                alpha_type: peniko::ImageAlphaType::Alpha,
                width,
                height,
            },
        })
    }

    /// Wraps a decoded image.
    #[must_use]
    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            data: peniko::ImageData {
                data: peniko::Blob::from(image.into_raw()),
                format: peniko::ImageFormat::Rgba8,
                alpha_type: peniko::ImageAlphaType::Alpha,
                width,
                height,
            },
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.data.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.data.height
    }

    /// Raw RGBA8 pixels.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.data.data.data()
    }
}

/// A `vello_cpu` render context plus a clip rectangle, drawing in device
/// pixels unless a transform is passed explicitly.
pub(crate) struct Canvas {
    ctx: RenderContext,
    width: u16,
    height: u16,
    clip: Rect,
}

impl core::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("clip", &self.clip)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    pub(crate) fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::Empty { width, height });
        }
        let too_large = || RenderError::TooLarge {
            width,
            height,
            max: u32::from(u16::MAX),
        };
        let w = u16::try_from(width).map_err(|_| too_large())?;
        let h = u16::try_from(height).map_err(|_| too_large())?;
        let settings = RenderSettings {
            render_mode: RenderMode::OptimizeSpeed,
            ..RenderSettings::default()
        };
        Ok(Self {
            ctx: RenderContext::new_with(w, h, settings),
            width: w,
            height: h,
            clip: Rect::new(0.0, 0.0, f64::from(w), f64::from(h)),
        })
    }

    pub(crate) fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Restricts subsequent fills to `rect` (within the canvas).
    pub(crate) fn set_clip(&mut self, rect: Rect) {
        self.clip = rect.intersect(self.bounds());
    }

    pub(crate) fn clip(&self) -> Rect {
        self.clip
    }

    /// Fills a device-space rectangle, clipped.
    pub(crate) fn fill(&mut self, rect: Rect, color: Color) {
        let rect = rect.intersect(self.clip);
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.ctx.set_transform(CpuAffine::IDENTITY);
        self.ctx.set_paint(color);
        self.ctx.fill_rect(&to_cpu_rect(rect));
    }

    /// Draws a border of `width` pixels just inside `rect`.
    pub(crate) fn stroke_inside(&mut self, rect: Rect, width: f64, color: Color) {
        let w = width.min(rect.width() / 2.0).min(rect.height() / 2.0);
        if w <= 0.0 {
            return;
        }
        self.fill(Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + w), color);
        self.fill(Rect::new(rect.x0, rect.y1 - w, rect.x1, rect.y1), color);
        self.fill(Rect::new(rect.x0, rect.y0 + w, rect.x0 + w, rect.y1 - w), color);
        self.fill(Rect::new(rect.x1 - w, rect.y0 + w, rect.x1, rect.y1 - w), color);
    }

    /// Fills one line of `text` at `size` pixels per em, its baseline
    /// starting at `origin`, clipped.
    ///
    /// Without `antialias` every pixel is either fully painted or untouched.
    pub(crate) fn text(
        &mut self,
        font: &Font,
        size: f64,
        text: &str,
        origin: Point,
        color: Color,
        antialias: bool,
    ) {
        let path = font.outline(text, size, origin.x, origin.y);
        if path.elements().is_empty() {
            return;
        }
        let clip = to_cpu_rect(self.clip);
        let bbox = path.bounding_box();
        if bbox.intersect(clip).area() <= 0.0 {
            return;
        }
        let clipped = clip.union(bbox) != clip;
        self.ctx.set_transform(CpuAffine::IDENTITY);
        self.ctx.set_paint(color);
        if clipped {
            self.ctx.push_clip_layer(&clip.to_path(0.1));
        }
        if !antialias {
            self.ctx.set_aliasing_threshold(Some(ALIASING_THRESHOLD));
        }
        self.ctx.fill_path(&path);
        self.ctx.set_aliasing_threshold(None);
        if clipped {
            self.ctx.pop_layer();
        }
    }

    /// Paints `region` of `image` (in image pixels) through `transform`,
    /// sampling nearest-neighbour.
    ///
    /// `region` must already be clipped to what is visible; the transform is
    /// an axis-aligned scale and translation.
    pub(crate) fn image(&mut self, image: &SourceImage, transform: Affine, region: Rect) {
        if region.width() <= 0.0 || region.height() <= 0.0 {
            return;
        }
        let source = ImageSource::from_peniko_image_data(&image.data);
        let paint = CpuImage {
            image: source,
            sampler: peniko::ImageSampler {
                quality: peniko::ImageQuality::Low,
                ..peniko::ImageSampler::default()
            },
        };
        self.ctx.set_transform(CpuAffine::new(transform.as_coeffs()));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&to_cpu_rect(region));
        self.ctx.set_transform(CpuAffine::IDENTITY);
    }

    /// Rasterizes everything drawn so far into a straight-alpha image.
    pub(crate) fn finish(mut self) -> Result<RgbaImage, RenderError> {
        self.ctx.flush();
        let mut pixmap = Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        let unpremul = pixmap.take_unpremultiplied();
        let mut bytes = Vec::with_capacity(unpremul.len() * 4);
        for p in unpremul {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        let (width, height) = (u32::from(self.width), u32::from(self.height));
        let actual = bytes.len();
        RgbaImage::from_raw(width, height, bytes).ok_or(RenderError::BufferSize {
            width,
            height,
            expected: width as usize * height as usize * 4,
            actual,
        })
    }
}

fn to_cpu_rect(rect: Rect) -> CpuRect {
    CpuRect::new(rect.x0, rect.y0, rect.x1, rect.y1)
}
