// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed settings and the schema of `tilescope_config.ini`.

use core::fmt;
use core::str::FromStr;
use std::path::PathBuf;

use tilescope_grid::IdScheme;

use crate::ini::IniDocument;
use crate::Rgba;

/// Which pixels an export writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// The whole tileset at its native resolution.
    #[default]
    Tileset,
    /// The current view as shown on screen.
    View,
}

impl ExportScope {
    /// Name used in configuration files and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Tileset => "tileset",
            Self::View => "view",
        }
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an export scope name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown export scope `{0}` (expected `tileset` or `view`)")]
pub struct ParseExportScopeError(pub String);

impl FromStr for ExportScope {
    type Err = ParseExportScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tileset" | "full" => Ok(Self::Tileset),
            "view" | "screen" => Ok(Self::View),
            _ => Err(ParseExportScopeError(s.to_owned())),
        }
    }
}

/// `[DisplayColors]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayColors {
    /// Background of the viewing area.
    pub background: Rgba,
    /// Grid lines.
    pub grid_color: Rgba,
    /// Dim layer drawn over the tileset when the background overlay is on.
    pub overlay_color: Rgba,
}

/// `[TextColors]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextColors {
    /// Tile number labels.
    pub tile_number_text: Rgba,
    /// Tooltip text.
    pub tooltip_text: Rgba,
}

/// `[HighlightColors]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightColors {
    /// Fill of the tile under the pointer.
    pub tile_hover: Rgba,
    /// Fill of selected tiles.
    pub tile_select: Rgba,
}

/// `[TooltipAppearance]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipAppearance {
    /// Tooltip box fill.
    pub tooltip_background: Rgba,
    /// Tooltip box border.
    pub tooltip_border: Rgba,
}

/// `[UIAppearance]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiAppearance {
    /// Export progress bar border, used when the theme does not set one.
    pub progress_bar_border: Rgba,
}

/// `[FontSettings]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSettings {
    /// Installed font family name, or a path to a font file. Falls back to
    /// the bundled font when it cannot be loaded.
    pub tile_number_font_name: String,
    /// Label font size at zoom 1, in pixels per em.
    pub tile_number_reference_font_size: u32,
    /// Anti-alias tile labels on screen; exports always anti-alias.
    pub tile_number_font_aa: bool,
}

/// `[Toggles]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toggles {
    /// Start with the background overlay shown.
    pub show_background_overlay_default: bool,
    /// Start with grid lines shown.
    pub show_grid_default: bool,
    /// Start with tile numbers shown.
    pub show_numbers_default: bool,
}

/// `[Export]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSettings {
    /// File extension of the default format (`png`, `jpg` or `bmp`).
    pub default_format: String,
    /// Directory offered by the export dialog.
    pub default_path: PathBuf,
    /// What an export covers.
    pub scope: ExportScope,
}

/// `[ThemeFile]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeFile {
    /// File name of the UI theme, looked up next to the executable first.
    pub theme_file_name: String,
}

/// `[Tileset]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilesetSettings {
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    /// Numbering scheme name.
    pub id_scheme: IdScheme,
    /// Strip width for the column-block scheme.
    pub block_columns: u32,
}

impl TilesetSettings {
    /// The ID scheme with the configured strip width applied.
    #[must_use]
    pub fn scheme(&self) -> IdScheme {
        match self.id_scheme {
            IdScheme::RowMajor => IdScheme::RowMajor,
            IdScheme::ColumnBlocks { .. } => IdScheme::ColumnBlocks {
                block_cols: self.block_columns,
            },
        }
    }
}

/// Every setting of `tilescope_config.ini`, typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// `[DisplayColors]`
    pub display: DisplayColors,
    /// `[TextColors]`
    pub text: TextColors,
    /// `[HighlightColors]`
    pub highlight: HighlightColors,
    /// `[TooltipAppearance]`
    pub tooltip: TooltipAppearance,
    /// `[UIAppearance]`
    pub ui: UiAppearance,
    /// `[FontSettings]`
    pub font: FontSettings,
    /// `[Toggles]`
    pub toggles: Toggles,
    /// `[Export]`
    pub export: ExportSettings,
    /// `[ThemeFile]`
    pub theme: ThemeFile,
    /// `[Tileset]`
    pub tileset: TilesetSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            display: DisplayColors {
                background: Rgba::rgb(0, 0, 0),
                grid_color: Rgba::rgb(0, 0, 0),
                overlay_color: Rgba::rgb(0, 0, 0),
            },
            text: TextColors {
                tile_number_text: Rgba::rgb(0, 0, 0),
                tooltip_text: Rgba::rgb(0, 0, 0),
            },
            highlight: HighlightColors {
                tile_hover: Rgba::rgb(0, 0, 0),
                tile_select: Rgba::rgb(0, 0, 0),
            },
            tooltip: TooltipAppearance {
                tooltip_background: Rgba::rgb(0, 0, 0),
                tooltip_border: Rgba::rgb(0, 0, 0),
            },
            ui: UiAppearance {
                progress_bar_border: Rgba::rgb(0, 0, 0),
            },
            font: FontSettings {
                tile_number_font_name: String::new(),
                tile_number_reference_font_size: 0,
                tile_number_font_aa: false,
            },
            toggles: Toggles {
                show_background_overlay_default: false,
                show_grid_default: false,
                show_numbers_default: false,
            },
            export: ExportSettings {
                default_format: String::new(),
                default_path: PathBuf::new(),
                scope: ExportScope::Tileset,
            },
            theme: ThemeFile {
                theme_file_name: String::new(),
            },
            tileset: TilesetSettings {
                tile_width: 0,
                tile_height: 0,
                id_scheme: IdScheme::default(),
                block_columns: 0,
            },
        };
        // The schema is the single source of default values.
        for field in SCHEMA {
            if let Some(value) = field.kind.parse(field.default) {
                settings.store(field, value);
            }
        }
        settings
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    Colour,
    Bool,
    /// Unsigned integer with a lower bound.
    UInt(u32),
    Text,
    Scope,
    Scheme,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Value {
    Colour(Rgba),
    Bool(bool),
    UInt(u32),
    Text(String),
    Scope(ExportScope),
    Scheme(IdScheme),
}

impl Kind {
    pub(crate) fn parse(self, raw: &str) -> Option<Value> {
        let raw = raw.trim();
        match self {
            Self::Colour => raw.parse().ok().map(Value::Colour),
            // Anything but `true` is false; this never fails.
            Self::Bool => Some(Value::Bool(raw.eq_ignore_ascii_case("true"))),
            Self::UInt(min) => raw
                .parse::<u32>()
                .ok()
                .filter(|v| *v >= min)
                .map(Value::UInt),
            Self::Text => Some(Value::Text(raw.to_owned())),
            Self::Scope => raw.parse().ok().map(Value::Scope),
            Self::Scheme => raw.parse().ok().map(Value::Scheme),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colour(c) => c.fmt(f),
            Self::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Self::UInt(v) => v.fmt(f),
            Self::Text(s) => f.write_str(s),
            Self::Scope(s) => f.write_str(s.name()),
            Self::Scheme(s) => f.write_str(s.name()),
        }
    }
}

/// One key of the settings file.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Field {
    pub(crate) section: &'static str,
    pub(crate) key: &'static str,
    pub(crate) default: &'static str,
    pub(crate) comment: Option<&'static str>,
    pub(crate) kind: Kind,
}

const fn field(
    section: &'static str,
    key: &'static str,
    default: &'static str,
    comment: &'static str,
    kind: Kind,
) -> Field {
    Field {
        section,
        key,
        default,
        comment: if comment.is_empty() { None } else { Some(comment) },
        kind,
    }
}

/// Sections and keys in file order, with defaults and comments.
pub(crate) const SCHEMA: &[Field] = &[
    field("DisplayColors", "background", "(25, 30, 40)", "Main background color of the tileset viewing area", Kind::Colour),
    field("DisplayColors", "grid_color", "(60, 70, 90)", "Color of the grid lines", Kind::Colour),
    field("DisplayColors", "overlay_color", "(0, 0, 0, 70)", "Tileset area overlay color (if enabled)", Kind::Colour),
    field("TextColors", "tile_number_text", "(220, 220, 220)", "Color of tile ID numbers", Kind::Colour),
    field("TextColors", "tooltip_text", "(230, 230, 230)", "Color of tooltip text", Kind::Colour),
    field("HighlightColors", "tile_hover", "(255, 215, 0, 128)", "Tile hover highlight color", Kind::Colour),
    field("HighlightColors", "tile_select", "(50, 200, 50, 128)", "Selected tile highlight color", Kind::Colour),
    field("TooltipAppearance", "tooltip_background", "(20, 20, 30, 220)", "Tooltip box background color", Kind::Colour),
    field("TooltipAppearance", "tooltip_border", "(70, 130, 180)", "Tooltip box border color", Kind::Colour),
    field("UIAppearance", "progress_bar_border", "(70, 100, 130)", "Export progress bar border (fallback)", Kind::Colour),
    field("FontSettings", "tile_number_font_name", "Arial", "Font family or font file for tile numbers (falls back to DejaVu Sans Mono)", Kind::Text),
    field("FontSettings", "tile_number_reference_font_size", "10", "Base size for tile numbers", Kind::UInt(1)),
    field("FontSettings", "tile_number_font_aa", "true", "Anti-alias tile numbers on display?", Kind::Bool),
    field("Toggles", "show_background_overlay_default", "true", "Default: Show background overlay on startup?", Kind::Bool),
    field("Toggles", "show_grid_default", "true", "Default: Show grid on startup?", Kind::Bool),
    field("Toggles", "show_numbers_default", "true", "Default: Show tile numbers on startup?", Kind::Bool),
    field("Export", "default_format", "png", "Default export image format (png, jpg, bmp)", Kind::Text),
    field("Export", "default_path", ".", "Default export directory ('.' is current)", Kind::Text),
    field("Export", "scope", "tileset", "What to export: tileset (full image at 1:1) or view (as on screen)", Kind::Scope),
    field("ThemeFile", "theme_file_name", "theme.json", "Name of the UI theme file (place it next to the executable to override)", Kind::Text),
    field("Tileset", "tile_width", "16", "Tile width in pixels", Kind::UInt(1)),
    field("Tileset", "tile_height", "16", "Tile height in pixels", Kind::UInt(1)),
    field("Tileset", "id_scheme", "column_blocks", "Tile numbering: column_blocks or row_major", Kind::Scheme),
    field("Tileset", "block_columns", "16", "Strip width in tiles for column_blocks", Kind::UInt(1)),
];

impl Settings {
    /// Reads every known key from `doc`.
    ///
    /// Missing keys take their default silently; malformed values take
    /// their default with a warning.
    #[must_use]
    pub fn from_document(doc: &IniDocument) -> Self {
        let mut settings = Self::default();
        for field in SCHEMA {
            let Some(raw) = doc.get(field.section, field.key) else {
                continue;
            };
            match field.kind.parse(raw) {
                Some(value) => settings.store(field, value),
                None => log::warn!(
                    "[{}] {} = `{raw}` is malformed; using default {}",
                    field.section,
                    field.key,
                    field.default
                ),
            }
        }
        settings
    }

    /// Builds the document a fresh install writes: defaults with comments.
    #[must_use]
    pub fn default_document() -> IniDocument {
        let mut doc = IniDocument::new();
        doc.set_header(HEADER.iter().copied());
        for field in SCHEMA {
            doc.set_with_comment(field.section, field.key, field.default, field.comment);
        }
        doc
    }

    /// Writes every key into `doc` in schema order.
    ///
    /// Raw text that already parses to the current value is kept as is, so
    /// hand formatting survives a save. Schema comments are restored.
    pub fn write_to(&self, doc: &mut IniDocument) {
        for field in SCHEMA {
            let value = self.load(field);
            let unchanged = doc
                .get(field.section, field.key)
                .and_then(|raw| field.kind.parse(raw))
                .is_some_and(|parsed| parsed == value);
            if unchanged {
                if let Some(raw) = doc.get(field.section, field.key).map(str::to_owned) {
                    doc.set_with_comment(field.section, field.key, raw, field.comment);
                }
            } else {
                doc.set_with_comment(field.section, field.key, value.to_string(), field.comment);
            }
        }
    }

    pub(crate) fn load(&self, field: &Field) -> Value {
        match (field.section, field.key) {
            ("DisplayColors", "background") => Value::Colour(self.display.background),
            ("DisplayColors", "grid_color") => Value::Colour(self.display.grid_color),
            ("DisplayColors", "overlay_color") => Value::Colour(self.display.overlay_color),
            ("TextColors", "tile_number_text") => Value::Colour(self.text.tile_number_text),
            ("TextColors", "tooltip_text") => Value::Colour(self.text.tooltip_text),
            ("HighlightColors", "tile_hover") => Value::Colour(self.highlight.tile_hover),
            ("HighlightColors", "tile_select") => Value::Colour(self.highlight.tile_select),
            ("TooltipAppearance", "tooltip_background") => {
                Value::Colour(self.tooltip.tooltip_background)
            }
            ("TooltipAppearance", "tooltip_border") => Value::Colour(self.tooltip.tooltip_border),
            ("UIAppearance", "progress_bar_border") => Value::Colour(self.ui.progress_bar_border),
            ("FontSettings", "tile_number_font_name") => {
                Value::Text(self.font.tile_number_font_name.clone())
            }
            ("FontSettings", "tile_number_reference_font_size") => {
                Value::UInt(self.font.tile_number_reference_font_size)
            }
            ("FontSettings", "tile_number_font_aa") => Value::Bool(self.font.tile_number_font_aa),
            ("Toggles", "show_background_overlay_default") => {
                Value::Bool(self.toggles.show_background_overlay_default)
            }
            ("Toggles", "show_grid_default") => Value::Bool(self.toggles.show_grid_default),
            ("Toggles", "show_numbers_default") => Value::Bool(self.toggles.show_numbers_default),
            ("Export", "default_format") => Value::Text(self.export.default_format.clone()),
            ("Export", "default_path") => {
                Value::Text(self.export.default_path.to_string_lossy().into_owned())
            }
            ("Export", "scope") => Value::Scope(self.export.scope),
            ("ThemeFile", "theme_file_name") => Value::Text(self.theme.theme_file_name.clone()),
            ("Tileset", "tile_width") => Value::UInt(self.tileset.tile_width),
            ("Tileset", "tile_height") => Value::UInt(self.tileset.tile_height),
            ("Tileset", "id_scheme") => Value::Scheme(self.tileset.id_scheme),
            ("Tileset", "block_columns") => Value::UInt(self.tileset.block_columns),
            _ => Value::Text(field.default.to_owned()),
        }
    }

    pub(crate) fn store(&mut self, field: &Field, value: Value) {
        match (field.section, field.key, value) {
            ("DisplayColors", "background", Value::Colour(c)) => self.display.background = c,
            ("DisplayColors", "grid_color", Value::Colour(c)) => self.display.grid_color = c,
            ("DisplayColors", "overlay_color", Value::Colour(c)) => self.display.overlay_color = c,
            ("TextColors", "tile_number_text", Value::Colour(c)) => self.text.tile_number_text = c,
            ("TextColors", "tooltip_text", Value::Colour(c)) => self.text.tooltip_text = c,
            ("HighlightColors", "tile_hover", Value::Colour(c)) => self.highlight.tile_hover = c,
            ("HighlightColors", "tile_select", Value::Colour(c)) => self.highlight.tile_select = c,
            ("TooltipAppearance", "tooltip_background", Value::Colour(c)) => {
                self.tooltip.tooltip_background = c;
            }
            ("TooltipAppearance", "tooltip_border", Value::Colour(c)) => {
                self.tooltip.tooltip_border = c;
            }
            ("UIAppearance", "progress_bar_border", Value::Colour(c)) => {
                self.ui.progress_bar_border = c;
            }
            ("FontSettings", "tile_number_font_name", Value::Text(s)) => {
                self.font.tile_number_font_name = s;
            }
            ("FontSettings", "tile_number_reference_font_size", Value::UInt(v)) => {
                self.font.tile_number_reference_font_size = v;
            }
            ("FontSettings", "tile_number_font_aa", Value::Bool(b)) => {
                self.font.tile_number_font_aa = b;
            }
            ("Toggles", "show_background_overlay_default", Value::Bool(b)) => {
                self.toggles.show_background_overlay_default = b;
            }
            ("Toggles", "show_grid_default", Value::Bool(b)) => self.toggles.show_grid_default = b,
            ("Toggles", "show_numbers_default", Value::Bool(b)) => {
                self.toggles.show_numbers_default = b;
            }
            ("Export", "default_format", Value::Text(s)) => {
                self.export.default_format = s.to_ascii_lowercase();
            }
            ("Export", "default_path", Value::Text(s)) => self.export.default_path = PathBuf::from(s),
            ("Export", "scope", Value::Scope(s)) => self.export.scope = s,
            ("ThemeFile", "theme_file_name", Value::Text(s)) => self.theme.theme_file_name = s,
            ("Tileset", "tile_width", Value::UInt(v)) => self.tileset.tile_width = v,
            ("Tileset", "tile_height", Value::UInt(v)) => self.tileset.tile_height = v,
            ("Tileset", "id_scheme", Value::Scheme(s)) => self.tileset.id_scheme = s,
            ("Tileset", "block_columns", Value::UInt(v)) => self.tileset.block_columns = v,
            (section, key, value) => {
                log::debug!("ignoring {value} for unknown setting [{section}] {key}");
            }
        }
    }
}

const HEADER: &[&str] = &[
    "TileScope settings.",
    "Colors are (R, G, B) or (R, G, B, A) with components 0-255.",
    "Toggles and export defaults are written back when TileScope quits.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = Settings::default();
        assert_eq!(s.display.background, Rgba::rgb(25, 30, 40));
        assert_eq!(s.display.overlay_color, Rgba::rgba(0, 0, 0, 70));
        assert_eq!(s.highlight.tile_hover, Rgba::rgba(255, 215, 0, 128));
        assert_eq!(s.highlight.tile_select, Rgba::rgba(50, 200, 50, 128));
        assert_eq!(s.tooltip.tooltip_background, Rgba::rgba(20, 20, 30, 220));
        assert_eq!(s.font.tile_number_reference_font_size, 10);
        assert!(s.toggles.show_grid_default);
        assert_eq!(s.export.default_format, "png");
        assert_eq!(s.export.default_path, PathBuf::from("."));
        assert_eq!(s.export.scope, ExportScope::Tileset);
        assert_eq!(s.theme.theme_file_name, "theme.json");
        assert_eq!(s.tileset.scheme(), IdScheme::ColumnBlocks { block_cols: 16 });
        assert_eq!((s.tileset.tile_width, s.tileset.tile_height), (16, 16));
    }

    #[test]
    fn every_schema_field_round_trips_through_settings() {
        let s = Settings::default();
        for field in SCHEMA {
            let value = s.load(field);
            assert_eq!(field.kind.parse(&value.to_string()), Some(value), "{}", field.key);
        }
    }

    #[test]
    fn malformed_values_fall_back_per_key() {
        let doc = IniDocument::parse(
            "[DisplayColors]\nbackground = (1, 2)\ngrid_color = (1, 2, 3)\n\
             [Toggles]\nshow_grid_default = yes\n\
             [Tileset]\ntile_width = 0\nid_scheme = row_major\n",
        )
        .unwrap();
        let s = Settings::from_document(&doc);
        assert_eq!(s.display.background, Rgba::rgb(25, 30, 40));
        assert_eq!(s.display.grid_color, Rgba::rgb(1, 2, 3));
        assert!(!s.toggles.show_grid_default);
        assert_eq!(s.tileset.tile_width, 16);
        assert_eq!(s.tileset.scheme(), IdScheme::RowMajor);
    }

    #[test]
    fn write_keeps_hand_formatting_of_unchanged_values() {
        let mut doc = IniDocument::parse(
            "[DisplayColors]\nbackground = (25,30,40)\n[Toggles]\nshow_grid_default = TRUE\n",
        )
        .unwrap();
        let mut s = Settings::from_document(&doc);
        s.toggles.show_numbers_default = false;
        s.write_to(&mut doc);

        assert_eq!(doc.get("DisplayColors", "background"), Some("(25,30,40)"));
        assert_eq!(doc.get("Toggles", "show_grid_default"), Some("TRUE"));
        assert_eq!(doc.get("Toggles", "show_numbers_default"), Some("false"));
        assert_eq!(doc.get("Tileset", "block_columns"), Some("16"));
    }

    #[test]
    fn export_scope_names() {
        assert_eq!("View".parse(), Ok(ExportScope::View));
        assert_eq!("tileset".parse(), Ok(ExportScope::Tileset));
        assert!("both".parse::<ExportScope>().is_err());
    }
}
