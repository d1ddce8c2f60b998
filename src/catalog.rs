use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::color::{Color, HexError};

/// The palette resource compiled into the binary.
const BUNDLED_PALETTES: &str = include_str!("../assets/palettes.json");

/// Browsable palette data: categories of named palettes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<PaletteCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteCategory {
    pub name: String,
    pub palettes: Vec<NamedPalette>,
}

/// A named palette. Colors stay as the hex strings they were loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPalette {
    pub name: String,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("{category} / {palette}: color #{index} is malformed")]
    MalformedColor {
        category: String,
        palette: String,
        index: usize,
        #[source]
        source: HexError,
    },

    #[error("{category} / {palette}: palette has no colors")]
    EmptyPalette { category: String, palette: String },
}

impl NamedPalette {
    /// Decode every entry, mapping malformed ones to black.
    pub fn decoded(&self) -> Vec<Color> {
        self.colors
            .iter()
            .map(|hex| Color::from_hex_lossy(hex))
            .collect()
    }
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid palette data")
    }

    /// Read a palette file in the `{ "categories": [...] }` format.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).with_context(|| {
            if !path.exists() {
                format!("file not found: {}", path.display())
            } else {
                format!("failed to read palette file: {}", path.display())
            }
        })?;
        let catalog = Self::from_json(&json)
            .with_context(|| format!("unsupported palette file: {}", path.display()))?;
        debug!(
            path = %path.display(),
            categories = catalog.categories.len(),
            "loaded palette catalog"
        );
        Ok(catalog)
    }

    /// The palette set shipped with the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PALETTES).context("bundled palette resource is corrupt")
    }

    /// Load from `path`, or the bundled set when `None`.
    ///
    /// Any failure yields an empty catalog, which the preview treats as
    /// "still loading" rather than an error.
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let loaded = match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        };
        loaded.unwrap_or_else(|err| {
            warn!("palette catalog unavailable: {err:#}");
            Self::default()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, index: usize) -> Option<&PaletteCategory> {
        self.categories.get(index)
    }

    pub fn palette(&self, category: usize, palette: usize) -> Option<&NamedPalette> {
        self.category(category)?.palettes.get(palette)
    }

    /// Reject palettes with malformed hex entries or no colors at all.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for category in &self.categories {
            for palette in &category.palettes {
                if palette.colors.is_empty() {
                    return Err(CatalogError::EmptyPalette {
                        category: category.name.clone(),
                        palette: palette.name.clone(),
                    });
                }
                for (index, hex) in palette.colors.iter().enumerate() {
                    Color::from_hex(hex).map_err(|source| CatalogError::MalformedColor {
                        category: category.name.clone(),
                        palette: palette.name.clone(),
                        index,
                        source,
                    })?;
                }
            }
        }
        Ok(())
    }
}
