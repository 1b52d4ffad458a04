//! Error types and Result aliases for ansicolor

use std::fmt;
use std::path::PathBuf;

use crate::palette::PaletteError;

/// Result type alias for ansicolor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ansicolor
#[derive(Debug)]
pub enum Error {
    // === Markup buffer errors ===
    /// Offset lies past the end of the host text
    OffsetOutOfBounds { offset: usize, len: usize },

    /// Offset splits a UTF-8 character
    NotCharBoundary { offset: usize },

    /// Range is reversed or empty where a non-empty one is required
    InvalidRange { start: usize, end: usize },

    /// Host text at the annotation offset differs from the stored text
    TextMismatch { offset: usize, expected_len: usize },

    // === Palette errors ===
    /// Palette validation failed
    InvalidPalette(PaletteError),

    /// Palette not registered
    PaletteNotFound { name: String },

    /// Palette name already taken
    PaletteAlreadyExists { name: String },

    /// Built-in palettes cannot be replaced or removed
    CannotReplaceBuiltInPalette { name: String },

    // === Note persistence errors ===
    /// Failed to encode a note
    NoteEncodingFailed { reason: String },

    /// Failed to decode a note
    NoteDecodingFailed { reason: String },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to parse configuration
    ConfigParseFailed { format: String, reason: String },

    /// Failed to serialize configuration
    ConfigSerializationFailed { format: String, reason: String },

    /// Configuration file not found
    ConfigNotFound,

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// Base64 decoding errors
    Base64(base64::DecodeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Markup errors
            Error::OffsetOutOfBounds { offset, len } => {
                write!(f, "Offset {} is out of bounds (text length {})", offset, len)
            }
            Error::NotCharBoundary { offset } => {
                write!(f, "Offset {} is not on a character boundary", offset)
            }
            Error::InvalidRange { start, end } => {
                write!(f, "Invalid range {}..{}", start, end)
            }
            Error::TextMismatch {
                offset,
                expected_len,
            } => {
                write!(
                    f,
                    "Host text at offset {} does not match the stored text ({} bytes)",
                    offset, expected_len
                )
            }

            // Palette errors
            Error::InvalidPalette(err) => write!(f, "Invalid palette: {}", err),
            Error::PaletteNotFound { name } => write!(f, "Palette '{}' not found", name),
            Error::PaletteAlreadyExists { name } => {
                write!(f, "Palette '{}' already exists", name)
            }
            Error::CannotReplaceBuiltInPalette { name } => {
                write!(f, "Cannot replace built-in palette '{}'", name)
            }

            // Note errors
            Error::NoteEncodingFailed { reason } => {
                write!(f, "Failed to encode console note: {}", reason)
            }
            Error::NoteDecodingFailed { reason } => {
                write!(f, "Failed to decode console note: {}", reason)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize {} config: {}", format, reason)
            }
            Error::ConfigNotFound => write!(f, "Configuration file not found"),

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Base64(err) => write!(f, "Base64 decoding error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidPalette(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Serde(err) => Some(err),
            Error::Base64(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for Error {
    fn from(err: PaletteError) -> Self {
        Error::InvalidPalette(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Base64(err)
    }
}
