// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Application state driven by input events.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::RgbaImage;
use kurbo::{Point, Rect, Size};
use tilescope_config::{ConfigError, ConfigFile, ExportScope, Rgba, Settings, Theme};
use tilescope_grid::{TileCoord, TileId};
use tilescope_input::drag::DragState;
use tilescope_input::{
    Command, InputEvent, KeyBindings, Modifiers, PointerButton, clamp_window_size,
};
use tilescope_render::{
    ChromeItem, Font, Overlays, Palette, ProgressBar, RenderError, TextBox, TileScene,
    render_tileset, render_view, to_color,
};
use tilescope_selection::{SelectMode, Selection, format_sorted};
use tilescope_view::Viewport;

use crate::export::{self, ExportError, ExportFormat};
use crate::host::Host;
use crate::tileset::{Tileset, TilesetError};
use crate::toast::{Toast, ToastLevel};
use crate::tooltip;

/// Window size used when the front end does not specify one.
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1000, 700);
/// Height of the UI panel strip at the bottom of the window, in pixels.
pub const PANEL_HEIGHT: u32 = 85;
/// Wheel zoom factor per notch towards the user.
pub const WHEEL_ZOOM_IN: f64 = 1.1;
/// Wheel zoom factor per notch away from the user.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
/// Keyboard zoom step; zooming out divides by it.
pub const KEY_ZOOM_STEP: f64 = 1.2;
/// Zoom a search raises the view to.
pub const SEARCH_MIN_ZOOM: f64 = 2.0;
/// Size of the export progress bar.
pub const PROGRESS_BAR_SIZE: Size = Size::new(300.0, 30.0);

const COPY_PREVIEW_CHARS: usize = 50;
const EXPORT_FILE_STEM: &str = "tileset_export";
const PANEL_BACKGROUND: Rgba = Rgba::rgb(30, 40, 50);

/// Whether the event loop should keep running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep processing events.
    Continue,
    /// Settings were saved; close the window.
    Quit,
}

/// Errors produced by tile search.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// No tile has this ID.
    #[error("tile ID {0} is out of range")]
    OutOfRange(i64),
    /// The input is not an integer.
    #[error("`{0}` is not a tile ID")]
    InvalidFormat(String),
}

/// Display toggles of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewToggles {
    /// Grid lines.
    pub grid: bool,
    /// Tile labels.
    pub numbers: bool,
    /// Dim layer over the tileset.
    pub background_overlay: bool,
    /// UI panel strip.
    pub panel: bool,
}

impl ViewToggles {
    fn from_settings(settings: &Settings) -> Self {
        Self {
            grid: settings.toggles.show_grid_default,
            numbers: settings.toggles.show_numbers_default,
            background_overlay: settings.toggles.show_background_overlay_default,
            panel: true,
        }
    }

    /// Overlays drawn with these toggles.
    #[must_use]
    pub fn overlays(self) -> Overlays {
        Overlays {
            grid: self.grid,
            numbers: self.numbers,
            background_overlay: self.background_overlay,
        }
    }
}

/// A tileset being inspected, with its view, selection and settings.
///
/// Front ends translate native events into [`InputEvent`]s, feed them to
/// [`Session::handle_event`] and present [`Session::render_frame`].
#[derive(Debug)]
pub struct Session {
    config: ConfigFile,
    theme: Theme,
    tileset: Tileset,
    view: Viewport,
    selection: Selection<TileCoord>,
    toggles: ViewToggles,
    hover: Option<TileCoord>,
    pointer: Option<Point>,
    drag: DragState,
    toast: Option<Toast>,
    bindings: KeyBindings,
    window: (u32, u32),
    now: Instant,
    font: Font,
}

impl Session {
    /// Creates a session showing `tileset` in a `window`-sized window.
    ///
    /// Toggles start from the configured defaults and the view is reset.
    /// The label font is looked up from `[FontSettings]`, falling back to
    /// the bundled font.
    #[must_use]
    pub fn new(config: ConfigFile, theme: Theme, tileset: Tileset, window: (u32, u32)) -> Self {
        let toggles = ViewToggles::from_settings(config.settings());
        let window = clamp_window_size(window.0, window.1);
        let font = Font::load_or_bundled(&config.settings().font.tile_number_font_name);
        let mut session = Self {
            config,
            theme,
            tileset,
            view: Viewport::new(view_rect_for(window, toggles.panel)),
            selection: Selection::new(),
            toggles,
            hover: None,
            pointer: None,
            drag: DragState::default(),
            toast: None,
            bindings: KeyBindings::default(),
            window,
            now: Instant::now(),
            font,
        };
        session.fit_view();
        session
    }

    /// Loads settings and theme, then opens `image` if given.
    ///
    /// A missing or unreadable image leaves the placeholder in place with an
    /// error toast. Fails only when the configured tile size cannot lay a
    /// grid over the placeholder.
    pub fn start(
        config_path: impl Into<PathBuf>,
        image: Option<&Path>,
        window: (u32, u32),
    ) -> Result<Self, TilesetError> {
        let config = ConfigFile::load_or_create(config_path);
        let theme = Theme::load_or_empty(&config.settings().theme.theme_file_name);
        let placeholder = Tileset::placeholder(&config.settings().tileset)?;
        let mut session = Self::new(config, theme, placeholder, window);
        if let Some(path) = image {
            if let Err(err) = session.open_image(path) {
                log::debug!("starting with the placeholder: {err}");
            }
        }
        Ok(session)
    }

    /// Typed settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    /// Mutable settings; persisted by [`Session::save_settings`].
    pub fn settings_mut(&mut self) -> &mut Settings {
        self.config.settings_mut()
    }

    /// The settings file.
    #[must_use]
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// UI theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Loaded tileset.
    #[must_use]
    pub fn tileset(&self) -> &Tileset {
        &self.tileset
    }

    /// View transform.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.view
    }

    /// Mutable view transform.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.view
    }

    /// Selected tiles.
    #[must_use]
    pub fn selection(&self) -> &Selection<TileCoord> {
        &self.selection
    }

    /// Display toggles.
    #[must_use]
    pub fn toggles(&self) -> ViewToggles {
        self.toggles
    }

    /// Tile under the pointer.
    #[must_use]
    pub fn hover(&self) -> Option<TileCoord> {
        self.hover
    }

    /// Current toast, if it has not expired.
    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_visible(self.now))
    }

    /// Window size in pixels.
    #[must_use]
    pub fn window_size(&self) -> (u32, u32) {
        self.window
    }

    /// Key table used for [`InputEvent::Key`].
    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Sets the session clock without an event.
    pub fn advance_to(&mut self, now: Instant) {
        self.now = now;
    }

    /// Strip reserved for the UI panel, when shown.
    #[must_use]
    pub fn panel_rect(&self) -> Option<Rect> {
        if !self.toggles.panel {
            return None;
        }
        let view = self.view.view_rect();
        Some(Rect::new(0.0, view.y1, view.x1, f64::from(self.window.1)))
    }

    /// Applies one input event.
    pub fn handle_event(&mut self, event: &InputEvent, host: &mut dyn Host) -> ControlFlow {
        self.now = host.now();
        match *event {
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Left,
                modifiers,
            } => self.pointer_down(pos, modifiers),
            InputEvent::PointerUp {
                button: PointerButton::Left,
                ..
            } => self.drag.end(),
            InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. } => {}
            InputEvent::PointerMove { pos } => self.pointer_move(pos),
            InputEvent::PointerLeave => {
                self.pointer = None;
                self.hover = None;
            }
            InputEvent::Wheel { pos, delta } => self.wheel(pos, delta),
            InputEvent::Key { key, modifiers } => {
                if let Some(command) = self.bindings.command_for(key, modifiers) {
                    self.run_command(command, host);
                }
            }
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::Quit => {
                if let Err(err) = self.save_settings() {
                    log::error!("{err}");
                }
                return ControlFlow::Quit;
            }
        }
        ControlFlow::Continue
    }

    /// Runs a command, as from a shortcut or a panel button.
    pub fn run_command(&mut self, command: Command, host: &mut dyn Host) {
        log::debug!("command {command:?}");
        match command {
            Command::ZoomIn => self.view.zoom_about_center(KEY_ZOOM_STEP),
            Command::ZoomOut => self.view.zoom_about_center(1.0 / KEY_ZOOM_STEP),
            Command::ResetView => self.view.reset(),
            Command::TogglePanel => self.toggle_panel(),
            Command::ToggleGrid => self.toggle_grid(),
            Command::ToggleNumbers => self.toggle_numbers(),
            Command::ToggleOverlay => self.toggle_background_overlay(),
            Command::CopyIds => {
                self.copy_ids(host);
            }
            Command::Search => {
                if let Err(err) = self.search(host) {
                    log::debug!("search failed: {err}");
                }
            }
            Command::OpenImage => {
                let dir = resolve_dir(&self.settings().export.default_path);
                if let Some(path) = host.pick_open_path(&dir) {
                    if let Err(err) = self.open_image(&path) {
                        log::debug!("open failed: {err}");
                    }
                }
            }
            Command::Export => {
                if let Err(err) = self.export_dialog(host) {
                    log::debug!("export failed: {err}");
                }
            }
        }
        if let Some(pos) = self.pointer {
            self.update_hover(pos);
        }
    }

    /// Shows or hides grid lines; the new state becomes the saved default.
    pub fn toggle_grid(&mut self) {
        self.toggles.grid = !self.toggles.grid;
        self.config.settings_mut().toggles.show_grid_default = self.toggles.grid;
    }

    /// Shows or hides tile labels; the new state becomes the saved default.
    pub fn toggle_numbers(&mut self) {
        self.toggles.numbers = !self.toggles.numbers;
        self.config.settings_mut().toggles.show_numbers_default = self.toggles.numbers;
    }

    /// Shows or hides the dim overlay; the new state becomes the saved
    /// default.
    pub fn toggle_background_overlay(&mut self) {
        self.toggles.background_overlay = !self.toggles.background_overlay;
        self.config
            .settings_mut()
            .toggles
            .show_background_overlay_default = self.toggles.background_overlay;
    }

    /// Shows or hides the UI panel, resizing the view area.
    pub fn toggle_panel(&mut self) {
        self.toggles.panel = !self.toggles.panel;
        self.view
            .set_view_rect(view_rect_for(self.window, self.toggles.panel));
    }

    /// Selects the tile with `id`, zooms to at least [`SEARCH_MIN_ZOOM`] and
    /// centres it.
    ///
    /// Unknown IDs leave view and selection untouched.
    pub fn find_tile(&mut self, id: u32) -> Result<TileCoord, SearchError> {
        let grid = *self.tileset.grid();
        let Some(coord) = grid.coord_of(TileId(id)) else {
            self.show_toast(format!("Tile ID {id} not found or invalid."), ToastLevel::Error);
            return Err(SearchError::OutOfRange(i64::from(id)));
        };
        self.selection.select_only(coord);
        if self.view.zoom() < SEARCH_MIN_ZOOM {
            self.view.set_zoom(SEARCH_MIN_ZOOM);
        }
        self.view.center_on(grid.tile_center(coord));
        log::debug!("found tile {id} at {coord}");
        self.show_toast(format!("Found Tile ID: {id}"), ToastLevel::Info);
        Ok(coord)
    }

    /// Prompts for a tile ID and runs [`Session::find_tile`].
    ///
    /// Returns `Ok(None)` when the prompt is cancelled or left empty.
    pub fn search(&mut self, host: &mut dyn Host) -> Result<Option<TileCoord>, SearchError> {
        let last = self.tileset.grid().tile_count().saturating_sub(1);
        let Some(input) = host.prompt(&format!("Enter Tile ID (0-{last}):")) else {
            return Ok(None);
        };
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        let Ok(id) = input.parse::<i64>() else {
            self.show_toast("Invalid Tile ID format.", ToastLevel::Error);
            return Err(SearchError::InvalidFormat(input.to_owned()));
        };
        match u32::try_from(id) {
            Ok(id) => self.find_tile(id).map(Some),
            Err(_) => {
                self.show_toast(format!("Tile ID {id} not found or invalid."), ToastLevel::Error);
                Err(SearchError::OutOfRange(id))
            }
        }
    }

    /// Applies `mode` to one tile, as a click would.
    pub fn select_tile(&mut self, coord: TileCoord, mode: SelectMode) {
        if self.tileset.grid().contains(coord) {
            self.selection.select(coord, mode);
        }
    }

    /// Applies `mode` to every tile in the rectangle spanned by `a` and `b`.
    pub fn select_rect(&mut self, a: TileCoord, b: TileCoord, mode: SelectMode) {
        let range = self.tileset.grid().tiles_between(a, b);
        match mode {
            SelectMode::Replace => self.selection.replace_with(range.iter()),
            SelectMode::Add => self.selection.extend_with(range.iter()),
            SelectMode::Remove => {
                let coords: Vec<_> = range.iter().collect();
                self.selection.remove_all(&coords);
            }
            SelectMode::Toggle => {
                for coord in &range {
                    self.selection.toggle(coord);
                }
            }
        }
    }

    /// Selected IDs in clipboard form: sorted numerically, `", "`-separated.
    #[must_use]
    pub fn selected_ids_text(&self) -> String {
        let grid = self.tileset.grid();
        format_sorted(self.selection.iter().filter_map(|c| grid.id_of(*c)))
    }

    /// Copies the selected IDs to the clipboard and returns the copied text.
    pub fn copy_ids(&mut self, host: &mut dyn Host) -> Option<String> {
        if self.selection.is_empty() {
            self.show_toast("No tiles selected.", ToastLevel::Info);
            return None;
        }
        let text = self.selected_ids_text();
        match host.set_clipboard(&text) {
            Ok(()) => {
                let preview: String = text.chars().take(COPY_PREVIEW_CHARS).collect();
                let count = self.selection.len();
                self.show_toast(
                    format!("{count} ID(s) copied: {preview}..."),
                    ToastLevel::Success,
                );
                Some(text)
            }
            Err(err) => {
                log::error!("clipboard: {err}");
                self.show_toast(format!("Error copying to clipboard: {err}"), ToastLevel::Error);
                None
            }
        }
    }

    /// Replaces the tileset with the image at `path` and resets the view.
    ///
    /// The image's directory becomes the default dialog directory. On
    /// failure an error toast is shown, the placeholder is loaded, and the
    /// error is returned.
    pub fn open_image(&mut self, path: &Path) -> Result<(), TilesetError> {
        self.config.settings_mut().export.default_path = parent_dir(path);
        let tiles = self.settings().tileset.clone();
        match Tileset::open(path, &tiles) {
            Ok(tileset) => {
                self.set_tileset(tileset);
                Ok(())
            }
            Err(err) => {
                log::error!("{err}");
                let name = file_name(path);
                let text = match err {
                    TilesetError::NotFound { .. } => format!("File not found: {name}"),
                    _ => format!("Error loading: {name}"),
                };
                self.show_toast(text, ToastLevel::Error);
                match Tileset::placeholder(&tiles) {
                    Ok(placeholder) => self.set_tileset(placeholder),
                    Err(placeholder_err) => log::error!("{placeholder_err}"),
                }
                Err(err)
            }
        }
    }

    /// Asks the host for a destination and exports there.
    ///
    /// The picked file's extension selects the format; a name without one
    /// gets the default format's extension. Returns the written path, or
    /// `Ok(None)` if the dialog was cancelled.
    pub fn export_dialog(&mut self, host: &mut dyn Host) -> Result<Option<PathBuf>, ExportError> {
        let export = &self.settings().export;
        let dir = resolve_dir(&export.default_path);
        let (default, ext) = match ExportFormat::from_extension(&export.default_format) {
            Some(format) => (format, export.default_format.to_ascii_lowercase()),
            None => (ExportFormat::Png, ExportFormat::Png.extension().to_owned()),
        };
        let Some(path) = host.pick_save_path(&dir, &format!("{EXPORT_FILE_STEM}.{ext}")) else {
            return Ok(None);
        };
        let format = ExportFormat::from_path(&path).unwrap_or(default);
        let template = self.progress_bar(0.0);
        let written = self.export_to(&path, format, &mut |fraction| {
            host.export_progress(&ProgressBar {
                fraction,
                ..template.clone()
            });
        })?;
        Ok(Some(written))
    }

    /// Renders the configured export scope and writes it to `path` as
    /// `format`.
    ///
    /// A path without an extension gets `format`'s; an extension naming
    /// any other format is an error and nothing is written. On success the
    /// file's directory and `format` become the export defaults and the
    /// written path is returned.
    pub fn export_to(
        &mut self,
        path: &Path,
        format: ExportFormat,
        progress: &mut dyn FnMut(f64),
    ) -> Result<PathBuf, ExportError> {
        let result = format.target_path(path).and_then(|target| {
            let image = self.render_export(progress)?;
            export::write_image(&image, &target, format)?;
            Ok(target)
        });
        match result {
            Ok(target) => {
                let export = &mut self.config.settings_mut().export;
                export.default_path = parent_dir(&target);
                export.default_format = format.extension().to_owned();
                log::info!("exported {}", target.display());
                self.show_toast(
                    format!("Exported to {}", file_name(&target)),
                    ToastLevel::Success,
                );
                Ok(target)
            }
            Err(err) => {
                log::error!("export failed: {err}");
                self.show_toast(format!("Error saving: {err}"), ToastLevel::Error);
                Err(err)
            }
        }
    }

    /// Renders the image an export would write, without writing it.
    ///
    /// The `tileset` scope covers the whole tileset at 1:1 without selection
    /// or hover; the `view` scope is the view area as on screen, without
    /// tooltip, toast or panel.
    pub fn render_export(&self, progress: &mut dyn FnMut(f64)) -> Result<RgbaImage, RenderError> {
        match self.settings().export.scope {
            ExportScope::Tileset => render_tileset(&self.scene(&[], None), progress),
            ExportScope::View => {
                let (w, h) = self.view_size();
                let image = render_view(
                    &self.scene(self.selection.items(), None),
                    &self.view,
                    w,
                    h,
                    &[],
                )?;
                progress(1.0);
                Ok(image)
            }
        }
    }

    /// Renders the window: tileset, overlays, panel strip, tooltip, toast.
    pub fn render_frame(&mut self) -> Result<RgbaImage, RenderError> {
        if self.toast.as_ref().is_some_and(|t| !t.is_visible(self.now)) {
            self.toast = None;
        }

        let mut chrome = Vec::new();
        if let Some(rect) = self.panel_rect() {
            let fill = to_color(self.theme_rgba("dark_bg", &["#ui_panel"], PANEL_BACKGROUND));
            chrome.push(ChromeItem::TextBox(TextBox {
                rect,
                lines: Vec::new(),
                padding: Size::ZERO,
                fill,
                border: None,
                text: fill,
                centered: false,
            }));
        }
        if let (Some(coord), Some(pointer)) = (self.hover, self.pointer) {
            let view = self.view.view_rect();
            if view.contains(pointer) {
                if let Some(tip) = tooltip::tooltip(
                    self.tileset.grid(),
                    coord,
                    pointer,
                    view,
                    &self.font,
                    self.settings(),
                ) {
                    chrome.push(ChromeItem::TextBox(tip));
                }
            }
        }
        if let Some(toast) = &self.toast {
            let background = self
                .theme_rgba("dark_bg", &["#ui_panel"], PANEL_BACKGROUND)
                .with_alpha(220);
            chrome.push(ChromeItem::TextBox(
                toast.layout(&self.font, f64::from(self.window.0), background),
            ));
        }

        let scene = self.scene(self.selection.items(), self.hover);
        render_view(&scene, &self.view, self.window.0, self.window.1, &chrome)
    }

    /// Progress bar centred in the window, in theme colours.
    #[must_use]
    pub fn progress_bar(&self, fraction: f64) -> ProgressBar {
        let (w, h) = (f64::from(self.window.0), f64::from(self.window.1));
        let origin = Point::new(
            ((w - PROGRESS_BAR_SIZE.width) / 2.0).floor(),
            ((h - PROGRESS_BAR_SIZE.height) / 2.0).floor(),
        );
        let settings = self.settings();
        ProgressBar {
            rect: Rect::from_origin_size(origin, PROGRESS_BAR_SIZE),
            fraction,
            background: to_color(self.theme_rgba("dark_bg", &["#ui_panel"], PANEL_BACKGROUND)),
            fill: to_color(self.theme_rgba("selected_bg", &["button"], Rgba::rgb(0, 120, 215))),
            border: to_color(self.theme_rgba(
                "normal_border",
                &["#ui_panel"],
                settings.ui.progress_bar_border,
            )),
            text: to_color(self.theme_rgba("normal_text", &[], Rgba::rgb(220, 220, 220))),
        }
    }

    /// Font used for labels and chrome text.
    #[must_use]
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Writes toggles and export defaults back to the settings file.
    pub fn save_settings(&mut self) -> Result<(), ConfigError> {
        self.config.save()
    }

    fn show_toast(&mut self, text: impl Into<String>, level: ToastLevel) {
        let toast = Toast::new(text, level, self.now);
        log::debug!("{level} toast: {}", toast.text());
        self.toast = Some(toast);
    }

    fn theme_rgba(&self, name: &str, ids: &[&str], fallback: Rgba) -> Rgba {
        self.theme.colour(name, ids).unwrap_or(fallback)
    }

    fn scene<'a>(&'a self, selection: &'a [TileCoord], hover: Option<TileCoord>) -> TileScene<'a> {
        let settings = self.settings();
        TileScene {
            image: self.tileset.image(),
            grid: self.tileset.grid(),
            overlays: self.toggles.overlays(),
            palette: Palette::from_settings(settings),
            font: &self.font,
            label_size: f64::from(settings.font.tile_number_reference_font_size),
            label_antialias: settings.font.tile_number_font_aa,
            selection,
            hover,
        }
    }

    fn set_tileset(&mut self, tileset: Tileset) {
        self.tileset = tileset;
        let grid = *self.tileset.grid();
        self.selection.retain(|c| grid.contains(*c));
        self.hover = None;
        self.drag.end();
        self.fit_view();
    }

    fn fit_view(&mut self) {
        let (w, h) = self.tileset.grid().image_size();
        self.view
            .set_world_bounds(Some(Rect::new(0.0, 0.0, f64::from(w), f64::from(h))));
        self.view.reset();
    }

    fn view_size(&self) -> (u32, u32) {
        let panel = if self.toggles.panel { PANEL_HEIGHT } else { 0 };
        (self.window.0, self.window.1.saturating_sub(panel).max(1))
    }

    fn pointer_down(&mut self, pos: Point, modifiers: Modifiers) {
        self.pointer = Some(pos);
        if !self.view.view_rect().contains(pos) {
            return;
        }
        self.drag.start(pos);
        self.update_hover(pos);
        if let Some(coord) = self.hover {
            let mode = SelectMode::for_click(
                modifiers.contains(Modifiers::SHIFT),
                modifiers.contains(Modifiers::CTRL),
            );
            self.selection.select(coord, mode);
        }
    }

    fn pointer_move(&mut self, pos: Point) {
        self.pointer = Some(pos);
        if let Some(delta) = self.drag.update(pos) {
            self.view.pan_by_view(delta);
        }
        self.update_hover(pos);
    }

    fn wheel(&mut self, pos: Point, delta: f64) {
        if !self.view.view_rect().contains(pos) {
            return;
        }
        let factor = if delta > 0.0 {
            WHEEL_ZOOM_IN
        } else if delta < 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            return;
        };
        self.view.zoom_about_view_point(pos, factor);
        self.update_hover(pos);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.window = clamp_window_size(width, height);
        self.view
            .set_view_rect(view_rect_for(self.window, self.toggles.panel));
        if let Some(pos) = self.pointer {
            self.update_hover(pos);
        }
    }

    fn update_hover(&mut self, pos: Point) {
        self.hover = if self.view.view_rect().contains(pos) {
            self.tileset
                .grid()
                .tile_at(self.view.view_to_world_point(pos))
        } else {
            None
        };
    }
}

fn view_rect_for(window: (u32, u32), panel: bool) -> Rect {
    let (w, h) = (f64::from(window.0), f64::from(window.1));
    let panel = if panel {
        f64::from(PANEL_HEIGHT).min(h)
    } else {
        0.0
    };
    Rect::new(0.0, 0.0, w, h - panel)
}

/// Directory of `path`, or `.` for a bare file name.
fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Expands `.` to the working directory for dialogs.
fn resolve_dir(dir: &Path) -> PathBuf {
    if dir == Path::new(".") {
        env::current_dir().unwrap_or_else(|_| dir.to_path_buf())
    } else {
        dir.to_path_buf()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
