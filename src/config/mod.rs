//! Configuration management for ansicolor
//!
//! Selects the palette used for rendering and declares custom palettes. The
//! configuration is read from TOML or JSON by [`loader::ConfigLoader`].

pub mod loader;
pub mod registry;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::palette::{ColorPalette, PaletteSpec, DEFAULT_PALETTE};

pub use loader::{ConfigFormat, ConfigLoader, LoadOptions};
pub use registry::PaletteRegistry;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the palette used when a note carries none
    pub palette: String,

    /// Custom palettes, in addition to the built-in ones
    pub palettes: Vec<PaletteSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_string(),
            palettes: Vec::new(),
        }
    }
}

impl Config {
    /// Registry of built-in palettes plus every custom palette
    pub fn registry(&self) -> Result<PaletteRegistry> {
        let mut registry = PaletteRegistry::new();
        for spec in &self.palettes {
            registry.add(ColorPalette::new(spec.clone())?)?;
        }
        Ok(registry)
    }

    /// The selected palette
    pub fn resolve_palette(&self) -> Result<Arc<ColorPalette>> {
        let palette = self.registry()?.get(&self.palette)?;
        debug!("Using palette '{}'", palette.name());
        Ok(palette)
    }

    /// Check that every custom palette is valid and the selection exists
    pub fn validate(&self) -> Result<()> {
        self.resolve_palette().map(|_| ())
    }
}
