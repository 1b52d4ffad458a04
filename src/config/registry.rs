//! Palette registry
//!
//! Named palettes available for rendering: the built-in presets plus any
//! custom palettes added from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::palette::{ColorPalette, PaletteSpec, BUILTIN_PALETTES};

/// Palettes by name
#[derive(Debug, Clone)]
pub struct PaletteRegistry {
    palettes: HashMap<String, Arc<ColorPalette>>,
}

impl PaletteRegistry {
    /// Create a registry holding the built-in palettes
    pub fn new() -> Self {
        let mut registry = Self {
            palettes: HashMap::new(),
        };
        registry.load_builtin_palettes();
        registry
    }

    fn load_builtin_palettes(&mut self) {
        for name in BUILTIN_PALETTES {
            if let Some(palette) = ColorPalette::builtin(name) {
                self.palettes.insert(name.to_string(), Arc::new(palette));
            }
        }
    }

    pub fn is_builtin(name: &str) -> bool {
        BUILTIN_PALETTES.contains(&name)
    }

    /// Look up a palette
    pub fn get(&self, name: &str) -> Result<Arc<ColorPalette>> {
        self.palettes
            .get(name)
            .cloned()
            .ok_or_else(|| Error::PaletteNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.palettes.contains_key(name)
    }

    /// Add a custom palette
    pub fn add(&mut self, palette: ColorPalette) -> Result<()> {
        let name = palette.name().to_string();
        if Self::is_builtin(&name) {
            return Err(Error::CannotReplaceBuiltInPalette { name });
        }
        if self.palettes.contains_key(&name) {
            return Err(Error::PaletteAlreadyExists { name });
        }
        self.palettes.insert(name, Arc::new(palette));
        Ok(())
    }

    /// Remove a custom palette
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if Self::is_builtin(name) {
            return Err(Error::CannotReplaceBuiltInPalette {
                name: name.to_string(),
            });
        }
        self.palettes
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::PaletteNotFound {
                name: name.to_string(),
            })
    }

    /// Palette names, sorted
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.palettes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Export a palette as JSON
    pub fn export_palette(&self, name: &str) -> Result<String> {
        let palette = self.get(name)?;
        Ok(serde_json::to_string_pretty(palette.spec())?)
    }

    /// Import a palette from JSON, returning its name
    pub fn import_palette(&mut self, json: &str) -> Result<String> {
        let spec: PaletteSpec = serde_json::from_str(json)?;
        let palette = ColorPalette::new(spec)?;
        let name = palette.name().to_string();
        self.add(palette)?;
        Ok(name)
    }
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
