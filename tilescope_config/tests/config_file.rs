// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings file lifecycle on disk.

use std::fs;
use std::path::PathBuf;

use tilescope_config::ini::IniDocument;
use tilescope_config::{ConfigFile, LoadStatus, Rgba, Settings, Theme};

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("tilescope_config");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn deleted_file_is_recreated_with_defaults() {
    let path = scratch("recreate.ini");

    let first = ConfigFile::load_or_create(&path);
    assert_eq!(first.status(), LoadStatus::Created);
    assert!(path.exists());

    fs::remove_file(&path).unwrap();
    let second = ConfigFile::load_or_create(&path);
    assert_eq!(second.status(), LoadStatus::Created);
    assert_eq!(second.settings(), &Settings::default());

    let text = fs::read_to_string(&path).unwrap();
    let doc = IniDocument::parse(&text).unwrap();
    assert_eq!(doc.get("DisplayColors", "background"), Some("(25, 30, 40)"));
    assert_eq!(doc.get("HighlightColors", "tile_select"), Some("(50, 200, 50, 128)"));
    assert_eq!(doc.get("Toggles", "show_numbers_default"), Some("true"));
    assert_eq!(doc.get("Export", "default_format"), Some("png"));
    assert_eq!(doc.get("ThemeFile", "theme_file_name"), Some("theme.json"));
    assert_eq!(doc.get("Tileset", "id_scheme"), Some("column_blocks"));
    // Every key is documented.
    assert!(
        doc.sections()
            .flat_map(|s| s.entries())
            .all(|e| e.comment.is_some()),
        "all default keys carry a comment"
    );
}

#[test]
fn existing_file_keeps_known_keys_and_drops_unknown() {
    let path = scratch("merge.ini");
    fs::write(
        &path,
        "[DisplayColors]\n\
         grid_color = (1, 2, 3)\n\
         retired_key = 5\n\
         [Obsolete]\n\
         anything = 1\n",
    )
    .unwrap();

    let file = ConfigFile::load_or_create(&path);
    assert_eq!(file.status(), LoadStatus::Loaded);
    assert_eq!(file.settings().display.grid_color, Rgba::rgb(1, 2, 3));

    let doc = IniDocument::parse(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc.get("DisplayColors", "grid_color"), Some("(1, 2, 3)"));
    assert_eq!(doc.get("DisplayColors", "retired_key"), None);
    assert!(doc.section("Obsolete").is_none());
    assert_eq!(doc.get("Toggles", "show_grid_default"), Some("true"));
}

#[test]
fn malformed_file_is_left_alone_and_defaults_apply() {
    let path = scratch("broken.ini");
    let broken = "grid_color = (1, 2, 3)\n";
    fs::write(&path, broken).unwrap();

    let file = ConfigFile::load_or_create(&path);
    assert_eq!(file.status(), LoadStatus::Defaults);
    assert_eq!(file.settings(), &Settings::default());
    assert_eq!(fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn save_persists_toggles_and_export_defaults() {
    let path = scratch("save.ini");
    let mut file = ConfigFile::load_or_create(&path);
    file.settings_mut().toggles.show_grid_default = false;
    file.settings_mut().export.default_format = "bmp".to_owned();
    file.settings_mut().export.default_path = PathBuf::from("exports");
    file.save().unwrap();

    let reloaded = ConfigFile::load_or_create(&path);
    assert!(!reloaded.settings().toggles.show_grid_default);
    assert!(reloaded.settings().toggles.show_numbers_default);
    assert_eq!(reloaded.settings().export.default_format, "bmp");
    assert_eq!(reloaded.settings().export.default_path, PathBuf::from("exports"));
}

#[test]
fn theme_from_disk() {
    let path = scratch("theme.json");
    fs::write(&path, r##"{"#ui_panel": {"colours": {"dark_bg": "#1E2832"}}}"##).unwrap();
    let theme = Theme::load(&path).unwrap();
    assert_eq!(theme.colour("dark_bg", &["#ui_panel"]), Some(Rgba::rgb(30, 40, 50)));

    let bad = scratch("bad_theme.json");
    fs::write(&bad, "[1, 2").unwrap();
    assert!(Theme::load(&bad).is_err());
    assert!(Theme::load(&scratch("absent_theme.json")).is_err());
}
