//! Integration Tests for Configuration Loading
//!
//! Loads configuration files from disk and resolves the palette they select.

use std::fs;

use ansicolor::config::{ConfigFormat, LoadOptions};
use ansicolor::{AnsiTranscoder, Config, ConfigLoader, Error};
use tempfile::TempDir;

const CUSTOM_TOML: &str = r##"
palette = "solarized"

[[palettes]]
name = "solarized"
black = "#073642"
red = "#DC322F"
green = "#859900"
yellow = "#B58900"
blue = "#268BD2"
magenta = "#D33682"
cyan = "#2AA198"
white = "#EEE8D5"
bright_black = "#002B36"
bright_red = "#CB4B16"
bright_green = "#586E75"
bright_yellow = "#657B83"
bright_blue = "#839496"
bright_magenta = "#6C71C4"
bright_cyan = "#93A1A1"
bright_white = "#FDF6E3"
default_foreground = "#657B83"
default_background = "#FDF6E3"
"##;

fn loader_for(dir: &TempDir, file: &str, content: &str) -> ConfigLoader {
    let path = dir.path().join(file);
    fs::write(&path, content).unwrap();
    let mut loader = ConfigLoader::new();
    loader.set_search_path(path);
    loader
}

#[test]
fn test_custom_palette_from_toml() {
    let dir = TempDir::new().unwrap();
    let mut loader = loader_for(&dir, "config.toml", CUSTOM_TOML);

    let config = loader.load_with_options(LoadOptions::default()).unwrap();
    let palette = config.resolve_palette().unwrap();
    assert_eq!(palette.name(), "solarized");

    let html = AnsiTranscoder::new(&palette).transcode("\x1b[31mx").into_string();
    assert_eq!(html, "<span style=\"color: #DC322F;\">x</span>");
}

#[test]
fn test_json_config() {
    let dir = TempDir::new().unwrap();
    let mut loader = loader_for(&dir, "config.json", r#"{ "palette": "gnome-terminal" }"#);

    let config = loader.load_with_options(LoadOptions::default()).unwrap();
    assert_eq!(config.palette, "gnome-terminal");
    assert!(config.palettes.is_empty());
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let mut loader = loader_for(&dir, "config.toml", "");

    let config = loader.load_with_options(LoadOptions::default()).unwrap();
    assert_eq!(config, Config::default());
    assert!(loader.current_path().is_some());
}

#[test]
fn test_unknown_palette_fails_validation() {
    let dir = TempDir::new().unwrap();
    let mut loader = loader_for(&dir, "config.toml", "palette = \"nope\"\n");

    let result = loader.load_with_options(LoadOptions::default());
    assert!(matches!(result, Err(Error::PaletteNotFound { name }) if name == "nope"));

    // Without validation the file still loads
    let config = loader
        .load_with_options(LoadOptions {
            create_default: true,
            validate: false,
        })
        .unwrap();
    assert_eq!(config.palette, "nope");
}

#[test]
fn test_invalid_color_rejected() {
    let dir = TempDir::new().unwrap();
    let broken = CUSTOM_TOML.replace("#DC322F", "expression(alert(1))");
    let path = dir.path().join("config.toml");
    fs::write(&path, broken).unwrap();

    let result = ConfigLoader::new().load_from_path(&path);
    assert!(matches!(result, Err(Error::InvalidPalette(_))));
}

#[test]
fn test_parse_error_reports_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ palette: }").unwrap();

    let result = ConfigLoader::new().load_from_path(&path);
    assert!(matches!(result, Err(Error::ConfigParseFailed { ref format, .. }) if format == "JSON"));
}

#[test]
fn test_missing_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = ConfigLoader::new().load_from_path(&path);
    assert!(matches!(result, Err(Error::ConfigLoadFailed { .. })));
}

#[test]
fn test_save_round_trip_keeps_custom_palettes() {
    let dir = TempDir::new().unwrap();
    let mut loader = loader_for(&dir, "config.toml", CUSTOM_TOML);
    let config = loader.load_with_options(LoadOptions::default()).unwrap();

    let saved = dir.path().join("saved").join("config.toml");
    loader.save_to_path(&config, &saved).unwrap();
    assert_eq!(ConfigFormat::from_path(&saved), ConfigFormat::Toml);

    let reloaded = ConfigLoader::new().load_from_path(&saved).unwrap();
    assert_eq!(reloaded, config);
}
