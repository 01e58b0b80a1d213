// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Outline fonts for tile labels and chrome text.
//!
//! Glyphs come from a TrueType/OpenType font through [`skrifa`] and are
//! laid out on a single baseline per line by their advance widths, without
//! shaping or kerning. [`Font::load_or_bundled`] resolves the configured font
//! name and falls back to a bundled DejaVu Sans Mono.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use kurbo::Size;
use peniko::{Blob, FontData};
use skrifa::instance::{LocationRef, Size as FontSize};
use skrifa::metrics::{GlyphMetrics, Metrics};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, GlyphId, MetadataProvider};
use vello_cpu::kurbo::{BezPath, Point as CpuPoint};

static BUNDLED_FONT: &[u8] = include_bytes!("../fonts/DejaVuSansMono.ttf");
static BUNDLED_DATA: LazyLock<FontData> =
    LazyLock::new(|| FontData::new(Blob::new(Arc::new(BUNDLED_FONT)), 0));

/// Family name of the font used when no other font can be loaded.
pub const BUNDLED_FONT_NAME: &str = "DejaVu Sans Mono";

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];
const SEARCH_DEPTH: usize = 4;

/// Errors produced while loading a font.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// The font file could not be read.
    #[error("cannot read font {}: {source}", path.display())]
    Io {
        /// Font file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The data is not a font with outlines for digits.
    #[error("{name} is not a usable font: {reason}")]
    Unusable {
        /// Font name or path.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
    /// No installed font file matches the name.
    #[error("no font named `{0}` is installed")]
    NotFound(String),
}

/// A loaded font. Cloning is cheap; the font data is shared.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    data: FontData,
    name: String,
}

impl Font {
    /// The bundled DejaVu Sans Mono.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            data: BUNDLED_DATA.clone(),
            name: BUNDLED_FONT_NAME.to_owned(),
        }
    }

    /// Wraps font data, checking that it parses and maps the digits.
    pub fn from_data(data: FontData, name: impl Into<String>) -> Result<Self, FontError> {
        let name = name.into();
        let unusable = |reason: String| FontError::Unusable {
            name: name.clone(),
            reason,
        };
        let font = FontRef::from_index(data.data.data(), data.index)
            .map_err(|err| unusable(err.to_string()))?;
        let charmap = font.charmap();
        if ('0'..='9').any(|digit| charmap.map(digit).is_none()) {
            return Err(unusable("no glyphs for digits".to_owned()));
        }
        Ok(Self { data, name })
    }

    /// Reads a font file; collections use their first font.
    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let bytes = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_data(FontData::new(Blob::from(bytes), 0), path.display().to_string())
    }

    /// Loads the font `name`: a font file path, or the family name of an
    /// installed font.
    ///
    /// Installed fonts are found by file name, ignoring case, spaces,
    /// dashes and underscores, so `DejaVu Sans` finds `DejaVuSans.ttf` and
    /// `Arial` finds `arial.ttf` or `Arial-Regular.otf`.
    pub fn find(name: &str) -> Result<Self, FontError> {
        let path = Path::new(name);
        if path.is_file() {
            return Self::from_file(path);
        }
        if normalize(name) == normalize(BUNDLED_FONT_NAME) {
            return Ok(Self::bundled());
        }
        let wanted = normalize(name);
        if wanted.is_empty() {
            return Err(FontError::NotFound(name.to_owned()));
        }
        for dir in font_dirs() {
            for entry in walkdir::WalkDir::new(&dir)
                .max_depth(SEARCH_DEPTH)
                .into_iter()
                .filter_map(Result::ok)
            {
                let candidate = entry.path();
                if entry.file_type().is_file() && matches_name(candidate, &wanted) {
                    match Self::from_file(candidate) {
                        Ok(font) => return Ok(font),
                        Err(err) => log::debug!("skipping {}: {err}", candidate.display()),
                    }
                }
            }
        }
        Err(FontError::NotFound(name.to_owned()))
    }

    /// [`Font::find`], falling back to [`Font::bundled`] with a warning.
    #[must_use]
    pub fn load_or_bundled(name: &str) -> Self {
        match Self::find(name) {
            Ok(font) => {
                log::debug!("label font `{name}` loaded from {}", font.name);
                font
            }
            Err(err) => {
                log::warn!("{err}; using {BUNDLED_FONT_NAME}");
                Self::bundled()
            }
        }
    }

    /// Path or family name the font was loaded as.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of `text` at `size` pixels per em. Lines are separated by `\n`
    /// and are [`Font::line_height`] apart.
    #[must_use]
    pub fn measure(&self, text: &str, size: f64) -> Size {
        let Some(font) = self.font_ref() else {
            return Size::ZERO;
        };
        let glyph_metrics = GlyphMetrics::new(&font, font_size(size), LocationRef::default());
        let charmap = font.charmap();
        let mut width = 0.0_f64;
        let mut lines = 0_u32;
        for line in text.split('\n') {
            let advance: f64 = line
                .chars()
                .map(|ch| {
                    let gid = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
                    f64::from(glyph_metrics.advance_width(gid).unwrap_or(0.0))
                })
                .sum();
            width = width.max(advance);
            lines += 1;
        }
        Size::new(width.ceil(), f64::from(lines) * self.line_height(size))
    }

    /// Distance between baselines, in whole pixels.
    #[must_use]
    pub fn line_height(&self, size: f64) -> f64 {
        self.metrics(size)
            .map_or(size, |m| f64::from(m.ascent - m.descent + m.leading).ceil())
    }

    /// Distance from the top of a line to its baseline.
    #[must_use]
    pub fn ascent(&self, size: f64) -> f64 {
        self.metrics(size).map_or(size, |m| f64::from(m.ascent))
    }

    /// Height of capitals and digits above the baseline.
    #[must_use]
    pub fn cap_height(&self, size: f64) -> f64 {
        self.metrics(size).map_or(size * 0.7, |m| {
            f64::from(m.cap_height.unwrap_or(m.ascent * 0.7))
        })
    }

    /// Glyph outlines of one line of `text` with its baseline starting at
    /// `(x, baseline)`, in device pixels.
    pub(crate) fn outline(&self, text: &str, size: f64, x: f64, baseline: f64) -> BezPath {
        let mut path = BezPath::new();
        let Some(font) = self.font_ref() else {
            return path;
        };
        let px = font_size(size);
        let charmap = font.charmap();
        let outlines = font.outline_glyphs();
        let glyph_metrics = GlyphMetrics::new(&font, px, LocationRef::default());
        let mut pen = PathPen {
            path: &mut path,
            x,
            baseline,
        };
        for ch in text.chars() {
            let gid = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
            let drawn = outlines.get(gid).map(|glyph| {
                glyph.draw(DrawSettings::unhinted(px, LocationRef::default()), &mut pen)
            });
            if let Some(Err(err)) = drawn {
                log::debug!("glyph {ch:?} not drawn: {err}");
            }
            pen.x += f64::from(glyph_metrics.advance_width(gid).unwrap_or(0.0));
        }
        path
    }

    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(self.data.data.data(), self.data.index).ok()
    }

    fn metrics(&self, size: f64) -> Option<Metrics> {
        let font = self.font_ref()?;
        Some(Metrics::new(&font, font_size(size), LocationRef::default()))
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::bundled()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "font sizes are small positive pixel counts"
)]
fn font_size(size: f64) -> FontSize {
    FontSize::new(size as f32)
}

/// Writes skrifa outlines (y up) into a device-space path (y down).
struct PathPen<'a> {
    path: &'a mut BezPath,
    x: f64,
    baseline: f64,
}

impl PathPen<'_> {
    fn point(&self, x: f32, y: f32) -> CpuPoint {
        CpuPoint::new(self.x + f64::from(x), self.baseline - f64::from(y))
    }
}

impl OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let (c, p) = (self.point(cx0, cy0), self.point(x, y));
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (c0, c1, p) = (self.point(cx0, cy0), self.point(cx1, cy1), self.point(x, y));
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// Lower-case letters and digits of `name`.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn matches_name(path: &Path, wanted: &str) -> bool {
    let is_font = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)));
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    let stem = normalize(stem);
    is_font
        && (stem == wanted
            || stem.strip_prefix(wanted).is_some_and(|rest| {
                matches!(rest, "regular" | "mt" | "book" | "roman")
            }))
}

/// Directories searched for installed fonts, existing ones only.
fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/Library/Fonts"),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        dirs.push(PathBuf::from(windir).join("Fonts"));
    }
    if let Some(user) = directories::UserDirs::new() {
        if let Some(fonts) = user.font_dir() {
            dirs.push(fonts.to_path_buf());
        }
        dirs.push(user.home_dir().join(".fonts"));
    }
    dirs.retain(|dir| dir.is_dir());
    dirs
}
