//! Browse selection as an explicit state machine.
//!
//! `BrowseState` records which category, palette and color are selected and
//! how many sample lines to render. Transitions are pure: each takes the
//! catalog for bounds and returns the next state.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::color::Color;
use crate::pipeline::select::{ForegroundSelector, SelectError};

/// Text line counts drawn when switching palettes.
pub const TEXT_COUNT_RANGE: RangeInclusive<usize> = 3..=5;

const INITIAL_TEXT_COUNT: usize = 3;

/// Draw a sample line count from [`TEXT_COUNT_RANGE`].
pub fn random_text_count<R: Rng>(rng: &mut R) -> usize {
    rng.random_range(TEXT_COUNT_RANGE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrowseState {
    pub category: usize,
    pub palette: usize,
    pub color_index: usize,
    pub text_count: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            category: 0,
            palette: 0,
            color_index: 0,
            text_count: INITIAL_TEXT_COUNT,
        }
    }
}

impl BrowseState {
    /// Switch to `category`, resetting the palette and color selection.
    /// Out-of-range indices leave the state unchanged.
    pub fn select_category(self, catalog: &Catalog, category: usize) -> Self {
        if category >= catalog.categories.len() || category == self.category {
            return self;
        }
        Self {
            category,
            palette: 0,
            color_index: 0,
            ..self
        }
    }

    pub fn next_category(self, catalog: &Catalog) -> Self {
        match catalog.categories.len() {
            0 => self,
            n => self.select_category(catalog, (self.category + 1) % n),
        }
    }

    pub fn previous_category(self, catalog: &Catalog) -> Self {
        match catalog.categories.len() {
            0 => self,
            n => self.select_category(catalog, (self.category + n - 1) % n),
        }
    }

    /// Tap a palette in the current category.
    ///
    /// Tapping the selected palette cycles its color; tapping another one
    /// selects it from its first color with `text_count` sample lines.
    pub fn tap_palette(self, catalog: &Catalog, palette: usize, text_count: usize) -> Self {
        if palette == self.palette {
            return self.cycle_color(catalog);
        }
        if catalog.palette(self.category, palette).is_none() {
            return self;
        }
        Self {
            palette,
            color_index: 0,
            text_count,
            ..self
        }
    }

    pub fn next_palette(self, catalog: &Catalog, text_count: usize) -> Self {
        match self.palette_count(catalog) {
            0 | 1 => self,
            n => self.tap_palette(catalog, (self.palette + 1) % n, text_count),
        }
    }

    pub fn previous_palette(self, catalog: &Catalog, text_count: usize) -> Self {
        match self.palette_count(catalog) {
            0 | 1 => self,
            n => self.tap_palette(catalog, (self.palette + n - 1) % n, text_count),
        }
    }

    /// Advance to the next color of the selected palette, wrapping around.
    pub fn cycle_color(self, catalog: &Catalog) -> Self {
        match catalog.palette(self.category, self.palette) {
            Some(palette) if !palette.colors.is_empty() => Self {
                color_index: (self.color_index + 1) % palette.colors.len(),
                ..self
            },
            _ => self,
        }
    }

    fn palette_count(&self, catalog: &Catalog) -> usize {
        catalog
            .category(self.category)
            .map_or(0, |category| category.palettes.len())
    }

    /// The selected background hex, if the selection points at a color.
    pub fn background<'a>(&self, catalog: &'a Catalog) -> Option<&'a str> {
        catalog
            .palette(self.category, self.palette)?
            .colors
            .get(self.color_index)
            .map(String::as_str)
    }

    /// Resolve the selection into a renderable preview.
    ///
    /// Returns `None` while the catalog is empty or the selection is out of
    /// range.
    pub fn preview(&self, catalog: &Catalog, selector: &ForegroundSelector) -> Option<Preview> {
        let background_hex = self.background(catalog)?;
        let category = catalog.category(self.category)?;
        let palette = category.palettes.get(self.palette)?;
        Some(Preview {
            category: category.name.clone(),
            palette: palette.name.clone(),
            background: Color::from_hex_lossy(background_hex),
            text_count: self.text_count,
            foregrounds: selector.select_hex(&palette.colors, background_hex, self.text_count),
        })
    }
}

/// What the preview area shows for one browse state.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub category: String,
    pub palette: String,
    pub background: Color,
    pub text_count: usize,
    pub foregrounds: Result<Vec<Color>, SelectError>,
}

impl Preview {
    /// Foreground for sample line `line`, cycling through the selection.
    pub fn line_color(&self, line: usize) -> Option<Color> {
        match &self.foregrounds {
            Ok(colors) if !colors.is_empty() => Some(colors[line % colors.len()]),
            _ => None,
        }
    }
}
