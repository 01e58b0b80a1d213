// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Loading tileset images.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tilescope_config::TilesetSettings;
use tilescope_grid::{GridError, TileGrid};
use tilescope_render::SourceImage;

/// Size of the image shown when no tileset could be loaded.
pub const PLACEHOLDER_SIZE: (u32, u32) = (2048, 512);

/// Errors produced while loading a tileset.
#[derive(Debug, thiserror::Error)]
pub enum TilesetError {
    /// The image file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },
    /// The file exists but could not be read or decoded.
    #[error("could not load {}: {source}", path.display())]
    Decode {
        /// Requested path.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },
    /// The configured tile layout does not fit the image.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A decoded tileset image and the tile grid laid over it.
#[derive(Clone, Debug)]
pub struct Tileset {
    image: SourceImage,
    grid: TileGrid,
    path: Option<PathBuf>,
}

impl Tileset {
    /// Reads and decodes the image at `path`.
    ///
    /// Pixels beyond the last whole tile are kept in the image but are not
    /// part of the grid; a warning is logged when there are any.
    pub fn open(path: &Path, settings: &TilesetSettings) -> Result<Self, TilesetError> {
        if !path.exists() {
            return Err(TilesetError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let decoded = image::open(path).map_err(|source| TilesetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let tileset = Self::from_image(decoded.into_rgba8(), Some(path.to_path_buf()), settings)?;
        let (w, h) = tileset.grid.image_size();
        log::info!(
            "loaded {} ({w}x{h}, {}x{} tiles)",
            path.display(),
            tileset.grid.cols(),
            tileset.grid.rows()
        );
        Ok(tileset)
    }

    /// Wraps an already decoded image.
    pub fn from_image(
        image: RgbaImage,
        path: Option<PathBuf>,
        settings: &TilesetSettings,
    ) -> Result<Self, TilesetError> {
        let (width, height) = image.dimensions();
        let grid = TileGrid::new(
            width,
            height,
            settings.tile_width,
            settings.tile_height,
            settings.scheme(),
        )?;
        if grid.has_partial_tiles() {
            log::warn!(
                "{width}x{height} is not a multiple of the {}x{} tile size; partial tiles are ignored",
                settings.tile_width,
                settings.tile_height
            );
        }
        Ok(Self {
            image: SourceImage::from_image(image),
            grid,
            path,
        })
    }

    /// Light grey vertical gradient, shown when no image is loaded.
    ///
    /// The placeholder grows to hold at least one tile when the configured
    /// tile size exceeds [`PLACEHOLDER_SIZE`].
    pub fn placeholder(settings: &TilesetSettings) -> Result<Self, TilesetError> {
        let width = PLACEHOLDER_SIZE.0.max(settings.tile_width);
        let height = PLACEHOLDER_SIZE.1.max(settings.tile_height);
        Self::from_image(gradient(width, height), None, settings)
    }

    /// Tileset pixels.
    #[must_use]
    pub fn image(&self) -> &SourceImage {
        &self.image
    }

    /// Tile layout over the image.
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// File the image came from; `None` for the placeholder.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns `true` for the placeholder image.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.path.is_none()
    }
}

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, y| {
        let shade = 200 + 55 * u64::from(y) / u64::from(height);
        let shade = u8::try_from(shade).unwrap_or(u8::MAX);
        image::Rgba([shade, shade, shade, 255])
    })
}

#[cfg(test)]
mod tests {
    use tilescope_config::Settings;

    use super::*;

    #[test]
    fn placeholder_is_a_light_gradient() {
        let tiles = Settings::default().tileset;
        let placeholder = Tileset::placeholder(&tiles).unwrap();
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.grid().image_size(), PLACEHOLDER_SIZE);
        assert_eq!(placeholder.grid().tile_count(), 4096);

        let px = placeholder.image().pixels();
        assert_eq!(&px[..4], &[200, 200, 200, 255]);
        let last_row = (PLACEHOLDER_SIZE.1 as usize - 1) * PLACEHOLDER_SIZE.0 as usize * 4;
        assert_eq!(px[last_row], 254);
    }

    #[test]
    fn placeholder_holds_an_oversized_tile() {
        let mut tiles = Settings::default().tileset;
        tiles.tile_width = 4096;
        let placeholder = Tileset::placeholder(&tiles).unwrap();
        assert_eq!(placeholder.grid().cols(), 1);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Tileset::open(
            Path::new("definitely/not/here.png"),
            &Settings::default().tileset,
        )
        .unwrap_err();
        assert!(matches!(err, TilesetError::NotFound { .. }), "{err}");
    }
}
