//! ansicolor - ANSI-colored console logs rendered as HTML
//!
//! Build and console output is usually stored verbatim, escape sequences
//! included. This library turns that text into styled HTML without touching
//! the stored characters: markup is laid over the original text by offset,
//! and `file://` references become clickable links.
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`palette`] - Color palettes and the built-in presets
//! - [`ansi`] - Escape sequence scanner and HTML transcoder
//! - [`linkify`] - File URL detection
//! - [`markup`] - Host text buffers and the in-memory markup overlay
//! - [`note`] - Per-chunk annotations and how they apply to a host buffer
//!
//! ### Console Logs
//!
//! - [`persistence`] - Encoding notes into a log
//! - [`console`] - Writing annotated logs and rendering them
//!
//! ### Utilities
//!
//! - [`config`] - Configuration loading and the palette registry
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```
//! use ansicolor::{AnsiColorNote, ColorPalette, MarkupText};
//!
//! let raw = "\x1b[31mFAILED\x1b[0m see file:///tmp/build.log";
//! let mut host = MarkupText::new(raw);
//! let note = AnsiColorNote::new(raw, None);
//!
//! let result = note.apply(&mut host, 0, &ColorPalette::default());
//! assert_eq!(result.links(), 1);
//! assert!(host.render().contains("<a href=\"file:///tmp/build.log\">"));
//! ```

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod ansi;
pub mod config;
pub mod console;
pub mod error;
pub mod linkify;
pub mod markup;
pub mod note;
pub mod palette;
pub mod persistence;

// Re-exports for core functionality
pub use ansi::{colorize, AnsiTranscoder, StyleState, Transcoded};
pub use error::{Error, Result};
pub use linkify::{linkify, linkify_host, FileLink};
pub use markup::{HostText, MarkupInstruction, MarkupText, TagKind};
pub use note::{Annotation, AnsiColorNote};
pub use palette::{AnsiColor, ColorPalette, ColorSlot, PaletteError, PaletteSpec};

// Convenience re-exports for common types
pub use config::{Config, ConfigLoader, PaletteRegistry};
pub use console::{ConsoleLog, ConsoleWriter};
pub use persistence::{ConsoleNoteCodec, NoteCodec};

// Version information
/// The current version of ansicolor from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The crate description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load the configuration from the default locations and resolve its
/// palette. Falls back to the default palette when loading fails.
pub fn default_palette() -> std::sync::Arc<ColorPalette> {
    let resolved = ConfigLoader::load().and_then(|config| config.resolve_palette());
    match resolved {
        Ok(palette) => palette,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            std::sync::Arc::new(ColorPalette::default())
        }
    }
}

/// User-facing description of an error, with hints where there are any
pub fn describe_error(error: &Error) -> String {
    match error {
        Error::ConfigLoadFailed { path, reason } => {
            format!(
                "Configuration Error: Failed to load config from '{}': {}\n\nTry:\n• Check the file exists and is readable\n• Set {} to another file",
                path.display(),
                reason,
                config::loader::CONFIG_ENV
            )
        }
        Error::ConfigParseFailed { format, reason } => {
            format!(
                "Configuration Error: Failed to parse {} config: {}\n\nTry:\n• Check configuration file syntax",
                format, reason
            )
        }
        Error::PaletteNotFound { name } => {
            format!(
                "Palette Error: '{}' is not defined\n\nTry:\n• Run with --list-palettes\n• Add it under [[palettes]] in the configuration",
                name
            )
        }
        Error::InvalidPalette(err) => {
            format!("Palette Error: {}", err)
        }
        _ => error.to_string(),
    }
}
