// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `tilescope` command-line front end.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use tilescope::{ClipboardError, ExportFormat, Host, Session, Tileset};
use tilescope_config::{ConfigFile, DEFAULT_CONFIG_FILE, ExportScope, Theme};
use tilescope_grid::{TileCoord, TileId};
use tilescope_selection::SelectMode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file; created with defaults when missing.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log debug detail.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print grid dimensions, ID range and scheme.
    Info {
        /// Tileset image.
        image: PathBuf,
    },
    /// Print the coordinate of a tile ID.
    Find {
        /// Tileset image.
        image: PathBuf,
        /// Tile ID.
        id: u32,
    },
    /// Print the IDs of the tiles in a rectangle, sorted.
    Ids {
        /// Tileset image.
        image: PathBuf,
        /// One corner, as `COL,ROW`.
        from: CoordArg,
        /// The opposite corner, as `COL,ROW`.
        to: CoordArg,
        /// Also copy the IDs to the clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Render the tileset with overlays and write it to a file.
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
struct ExportArgs {
    /// Tileset image.
    image: PathBuf,
    /// Output file; the extension selects the format unless `--format` is
    /// given, and is added when missing.
    out: PathBuf,
    /// png, jpg or bmp.
    #[arg(long)]
    format: Option<ExportFormat>,
    /// Whole tileset at 1:1, or the view as on screen.
    #[arg(long)]
    scope: Option<ExportScope>,
    /// Draw grid lines.
    #[arg(long, value_name = "BOOL")]
    grid: Option<bool>,
    /// Draw tile labels.
    #[arg(long, value_name = "BOOL")]
    numbers: Option<bool>,
    /// Draw the dim overlay.
    #[arg(long, value_name = "BOOL")]
    overlay: Option<bool>,
    /// Tile IDs to highlight (view scope).
    #[arg(long, value_name = "ID,...", value_delimiter = ',')]
    select: Vec<u32>,
    /// Centre the view on this tile ID (view scope).
    #[arg(long, value_name = "ID")]
    find: Option<u32>,
    /// View zoom factor (view scope).
    #[arg(long)]
    zoom: Option<f64>,
    /// Window size (view scope).
    #[arg(long, value_name = "WxH")]
    size: Option<SizeArg>,
}

/// `COL,ROW` on the command line.
#[derive(Clone, Copy, Debug)]
struct CoordArg(TileCoord);

impl FromStr for CoordArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (col, row) = s
            .split_once(',')
            .ok_or_else(|| format!("expected COL,ROW, got `{s}`"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|err| format!("`{v}`: {err}"))
        };
        Ok(Self(TileCoord::new(parse(col)?, parse(row)?)))
    }
}

/// `WxH` on the command line.
#[derive(Clone, Copy, Debug)]
struct SizeArg(u32, u32);

impl FromStr for SizeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|err| format!("`{v}`: {err}"))
        };
        Ok(Self(parse(w)?, parse(h)?))
    }
}

/// Host for a terminal: no dialogs, the system clipboard.
struct CliHost {
    clipboard: Option<arboard::Clipboard>,
}

impl CliHost {
    fn new() -> Self {
        Self { clipboard: None }
    }
}

impl Host for CliHost {
    fn pick_open_path(&mut self, _initial_dir: &Path) -> Option<PathBuf> {
        None
    }

    fn pick_save_path(
        &mut self,
        _initial_dir: &Path,
        _file_name: &str,
    ) -> Option<PathBuf> {
        None
    }

    fn prompt(&mut self, _prompt: &str) -> Option<String> {
        None
    }

    fn set_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.clipboard.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|err| ClipboardError(err.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text)
                .map_err(|err| ClipboardError(err.to_string())),
            None => Err(ClipboardError("no clipboard".to_owned())),
        }
    }
}

fn log_dir() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("org", "TileScope", "tilescope")?;
    let dir = dirs.config_dir().to_path_buf();
    if !dir.exists() {
        fs::create_dir_all(&dir).ok()?;
    }
    Some(dir)
}

fn start_logging(verbose: bool) -> anyhow::Result<LoggerHandle> {
    let logger = if verbose {
        Logger::try_with_str("debug")?
    } else {
        Logger::try_with_env_or_str("info")?
    };
    let logger = match log_dir() {
        Some(dir) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(&dir)
                    .basename("tilescope")
                    .suffix("log")
                    .suppress_timestamp(),
            )
            .rotate(
                Criterion::Size(64 * 1024),
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            )
            .duplicate_to_stderr(Duplicate::Warn),
        None => logger.log_to_stderr(),
    };
    Ok(logger.start()?)
}

fn open_tileset(config: &ConfigFile, image: &Path) -> anyhow::Result<Tileset> {
    Tileset::open(image, &config.settings().tileset)
        .with_context(|| format!("cannot open tileset {}", image.display()))
}

fn info(config: &ConfigFile, image: &Path) -> anyhow::Result<ExitCode> {
    let tileset = open_tileset(config, image)?;
    let grid = tileset.grid();
    let (w, h) = grid.image_size();
    let tile = grid.tile_size();
    println!("{}: {w}x{h} px", image.display());
    println!(
        "tiles: {} x {} of {}x{} px, {} total",
        grid.cols(),
        grid.rows(),
        tile.width,
        tile.height,
        grid.tile_count()
    );
    println!("ids: 0..={}", grid.tile_count().saturating_sub(1));
    println!("scheme: {}", grid.scheme());
    if grid.has_partial_tiles() {
        println!("note: pixels beyond the last whole tile are ignored");
    }
    Ok(ExitCode::SUCCESS)
}

fn find(config: &ConfigFile, image: &Path, id: u32) -> anyhow::Result<ExitCode> {
    let tileset = open_tileset(config, image)?;
    let grid = tileset.grid();
    match grid.coord_of(TileId(id)) {
        Some(coord) => {
            println!("{id}: {coord}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!(
                "tile ID {id} is out of range (0..={})",
                grid.tile_count().saturating_sub(1)
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

fn ids(
    config: ConfigFile,
    image: &Path,
    from: TileCoord,
    to: TileCoord,
    copy: bool,
) -> anyhow::Result<ExitCode> {
    let tileset = open_tileset(&config, image)?;
    let mut session =
        Session::new(config, Theme::empty(), tileset, tilescope::DEFAULT_WINDOW_SIZE);
    session.select_rect(from, to, SelectMode::Replace);
    if session.selection().is_empty() {
        bail!("{from} to {to} lies outside the grid");
    }
    println!("{}", session.selected_ids_text());
    if copy {
        let mut host = CliHost::new();
        if session.copy_ids(&mut host).is_none() {
            bail!("could not copy to the clipboard");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn export(config: ConfigFile, args: ExportArgs) -> anyhow::Result<ExitCode> {
    let tileset = open_tileset(&config, &args.image)?;
    let theme = Theme::load_or_empty(&config.settings().theme.theme_file_name);
    let window = args
        .size
        .map_or(tilescope::DEFAULT_WINDOW_SIZE, |SizeArg(w, h)| (w, h));
    let mut session = Session::new(config, theme, tileset, window);

    if let Some(scope) = args.scope {
        session.settings_mut().export.scope = scope;
    }
    let toggles = session.toggles();
    if args.grid.is_some_and(|on| on != toggles.grid) {
        session.toggle_grid();
    }
    if args.numbers.is_some_and(|on| on != toggles.numbers) {
        session.toggle_numbers();
    }
    if args.overlay.is_some_and(|on| on != toggles.background_overlay) {
        session.toggle_background_overlay();
    }
    // The export shows the view area only; the panel strip is never part of it.
    if toggles.panel {
        session.toggle_panel();
    }

    if let Some(zoom) = args.zoom {
        let factor = zoom / session.viewport().zoom();
        session.viewport_mut().zoom_about_center(factor);
    }
    // Searching replaces the selection, so it runs before `--select`.
    if let Some(id) = args.find {
        session.find_tile(id)?;
    }
    for id in &args.select {
        let Some(coord) = session.tileset().grid().coord_of(TileId(*id)) else {
            bail!("tile ID {id} is out of range");
        };
        session.select_tile(coord, SelectMode::Add);
    }

    let format = match args.format {
        Some(format) => format,
        None if args.out.extension().is_none() => ExportFormat::default(),
        None => ExportFormat::from_path(&args.out)?,
    };
    let out = session.export_to(&args.out, format, &mut |fraction| {
        log::debug!("export {:.0}%", fraction * 100.0);
    })?;
    println!("{}", out.display());
    Ok(ExitCode::SUCCESS)
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = ConfigFile::load_or_create(&args.config);
    match args.command {
        Commands::Info { image } => info(&config, &image),
        Commands::Find { image, id } => find(&config, &image, id),
        Commands::Ids {
            image,
            from,
            to,
            copy,
        } => ids(config, &image, from.0, to.0, copy),
        Commands::Export(export_args) => export(config, export_args),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _logger = match start_logging(args.verbose) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("logging disabled: {err:#}");
            None
        }
    };
    log::info!("TileScope {}", env!("CARGO_PKG_VERSION"));

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
