// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Encoding rendered images to disk.
//!
//! [`write_image`] encodes into a temporary file next to the destination and
//! renames it into place, so a failed export never leaves a partial file.

use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{fmt, io};

use image::{DynamicImage, ImageFormat, RgbaImage};
use tilescope_render::RenderError;

/// Output file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Lossless, keeps alpha.
    #[default]
    Png,
    /// Lossy, drops alpha.
    Jpeg,
    /// Uncompressed, keeps alpha.
    Bmp,
}

impl ExportFormat {
    /// Format for a file extension (`png`, `jpg`/`jpeg`, `bmp`), any case.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Format implied by the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ExportError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    /// Destination for writing `self` to `path`.
    ///
    /// A path without an extension gets [`ExportFormat::extension`]
    /// appended. An extension naming another format, or no format at all, is
    /// an error; `jpg` and `jpeg` are the same format.
    pub fn target_path(self, path: &Path) -> Result<PathBuf, ExportError> {
        let Some(ext) = path.extension() else {
            return Ok(path.with_extension(self.extension()));
        };
        match ext.to_str().and_then(Self::from_extension) {
            Some(found) if found == self => Ok(path.to_path_buf()),
            Some(found) => Err(ExportError::FormatMismatch {
                path: path.to_path_buf(),
                found,
                requested: self,
            }),
            None => Err(ExportError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Canonical file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error returned when a format name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown export format `{0}` (expected png, jpg or bmp)")]
pub struct ParseExportFormatError(pub String);

impl FromStr for ExportFormat {
    type Err = ParseExportFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim().trim_start_matches('.'))
            .ok_or_else(|| ParseExportFormatError(s.to_owned()))
    }
}

/// Errors produced while exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The destination extension is not an export format.
    #[error("unsupported export format for {}", path.display())]
    UnsupportedFormat {
        /// Destination path.
        path: PathBuf,
    },
    /// The destination extension names a different format.
    #[error("{} has a {found} extension but {requested} was requested", path.display())]
    FormatMismatch {
        /// Destination path.
        path: PathBuf,
        /// Format named by the extension.
        found: ExportFormat,
        /// Format asked for.
        requested: ExportFormat,
    },
    /// Creating, writing or renaming the file failed.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Rendering the image failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The encoder rejected the image.
    #[error("cannot encode {}: {source}", path.display())]
    Encode {
        /// Destination path.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },
}

/// Encodes `image` as `format` and writes it to `path`.
///
/// JPEG output is converted to RGB first. The destination is replaced only
/// once the whole file has been written.
pub fn write_image(image: &RgbaImage, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
    let tmp = temp_sibling(path);
    let result = encode_to(image, &tmp, format).and_then(|()| {
        fs::rename(&tmp, path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    });
    if result.is_err() {
        // Nothing to clean up if the temporary was never created.
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn encode_to(image: &RgbaImage, tmp: &Path, format: ExportFormat) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: tmp.to_path_buf(),
        source,
    };
    let encode_err = |source| ExportError::Encode {
        path: tmp.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(tmp).map_err(io_err)?);
    match format {
        ExportFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .into_rgb8()
            .write_to(&mut out, format.image_format())
            .map_err(encode_err)?,
        ExportFormat::Png | ExportFormat::Bmp => image
            .write_to(&mut out, format.image_format())
            .map_err(encode_err)?,
    }
    out.flush().map_err(io_err)?;
    out.get_ref().sync_all().map_err(io_err)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_extensions() {
        assert_eq!(
            ExportFormat::from_path(Path::new("a/b.PNG")).unwrap(),
            ExportFormat::Png
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("shot.jpeg")).unwrap(),
            ExportFormat::Jpeg
        );
        assert_eq!("jpg".parse::<ExportFormat>(), Ok(ExportFormat::Jpeg));
        assert_eq!(".bmp".parse::<ExportFormat>(), Ok(ExportFormat::Bmp));
        assert!(matches!(
            ExportFormat::from_path(Path::new("out.gif")),
            Err(ExportError::UnsupportedFormat { .. })
        ));
        assert!(ExportFormat::from_path(Path::new("noext")).is_err());
        assert!("tiff".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn target_path_appends_or_checks_the_extension() {
        assert_eq!(
            ExportFormat::Png.target_path(Path::new("dir/out")).unwrap(),
            Path::new("dir/out.png")
        );
        assert_eq!(
            ExportFormat::Jpeg.target_path(Path::new("shot.JPEG")).unwrap(),
            Path::new("shot.JPEG")
        );
        assert!(matches!(
            ExportFormat::Bmp.target_path(Path::new("out.png")),
            Err(ExportError::FormatMismatch {
                found: ExportFormat::Png,
                requested: ExportFormat::Bmp,
                ..
            })
        ));
        assert!(matches!(
            ExportFormat::Png.target_path(Path::new("out.gif")),
            Err(ExportError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn temp_file_is_hidden_next_to_the_target() {
        assert_eq!(
            temp_sibling(Path::new("dir/out.png")),
            Path::new("dir/.out.png.tmp")
        );
    }
}
