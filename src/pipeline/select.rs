use thiserror::Error;
use tracing::debug;

use crate::color::{Color, BLACK, WHITE};
use crate::pipeline::shade::Shade;

/// Minimum contrast ratio for a foreground color to count as legible.
pub const MIN_CONTRAST: f32 = 3.0;

/// Lightness offset applied to the background when synthesizing a color.
const BASE_SHIFT: f32 = 0.4;

/// Widening rounds before synthesis gives up. Each round tries both
/// directions; the last one tries pure black and pure white.
const SYNTHESIS_ROUNDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectError {
    #[error(
        "no legible color found for background {background} at {min_contrast}:1 after {attempts} attempts"
    )]
    NoLegibleColor {
        background: String,
        min_contrast: f32,
        attempts: usize,
    },
}

/// Neutral fallbacks, tried in order after the palette.
pub fn neutral_colors() -> [Color; 7] {
    [
        WHITE,
        BLACK,
        Color::from_rgb8(0xf5, 0xf5, 0xf5),
        Color::from_rgb8(0xfa, 0xfa, 0xfa),
        Color::from_rgb8(0xe0, 0xe0, 0xe0),
        Color::from_rgb8(0x1a, 0x1a, 0x1a),
        Color::from_rgb8(0x33, 0x33, 0x33),
    ]
}

/// Picks foreground colors that stay legible over a background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForegroundSelector {
    min_contrast: f32,
}

impl Default for ForegroundSelector {
    fn default() -> Self {
        Self::new(MIN_CONTRAST)
    }
}

impl ForegroundSelector {
    pub fn new(min_contrast: f32) -> Self {
        Self { min_contrast }
    }

    fn is_legible(&self, color: &Color, background: &Color) -> bool {
        Color::contrast_ratio(color, background) >= self.min_contrast
    }

    /// Select exactly `count` foreground colors for `background`.
    ///
    /// Up to `count / 2` come from `palette` (in order, skipping the
    /// background itself), the rest from the neutral set, and any shortfall
    /// is filled with a color synthesized from the background's lightness.
    pub fn select(
        &self,
        palette: &[Color],
        background: Color,
        count: usize,
    ) -> Result<Vec<Color>, SelectError> {
        let background_hex = background.to_hex();
        let candidates = palette
            .iter()
            .copied()
            .filter(|color| color.to_hex() != background_hex);
        self.select_from(candidates, background, count)
    }

    /// Hex-string variant of [`select`](Self::select).
    ///
    /// Entries equal to `background` (ignoring ASCII case) are skipped, and
    /// malformed entries decode to black as in [`Color::from_hex_lossy`].
    pub fn select_hex<S: AsRef<str>>(
        &self,
        palette: &[S],
        background: &str,
        count: usize,
    ) -> Result<Vec<Color>, SelectError> {
        let candidates = palette
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|hex| !hex.eq_ignore_ascii_case(background))
            .map(Color::from_hex_lossy);
        self.select_from(candidates, Color::from_hex_lossy(background), count)
    }

    fn select_from(
        &self,
        candidates: impl Iterator<Item = Color>,
        background: Color,
        count: usize,
    ) -> Result<Vec<Color>, SelectError> {
        let mut result: Vec<Color> = candidates
            .filter(|color| self.is_legible(color, &background))
            .take(count / 2)
            .collect();
        let from_palette = result.len();

        result.extend(
            neutral_colors()
                .into_iter()
                .filter(|color| self.is_legible(color, &background))
                .take(count - from_palette),
        );
        let from_neutrals = result.len() - from_palette;

        if result.len() < count {
            let synthesized = self.synthesize(background)?;
            result.resize(count, synthesized);
        }

        debug!(
            background = %background,
            count,
            from_palette,
            from_neutrals,
            synthesized = count - from_palette - from_neutrals,
            "selected foreground colors"
        );
        Ok(result)
    }

    /// Shift the background's lightness away from itself until the result
    /// is legible, widening the shift and draining saturation each round.
    fn synthesize(&self, background: Color) -> Result<Color, SelectError> {
        let shade = Shade::from_color(background);
        let primary = if shade.lightness() < 0.5 { 1.0 } else { -1.0 };

        for round in 0..SYNTHESIS_ROUNDS {
            let t = round as f32 / (SYNTHESIS_ROUNDS - 1) as f32;
            let shift = BASE_SHIFT + (1.0 - BASE_SHIFT) * t;
            let base = shade.with_saturation(shade.saturation() * (1.0 - t));

            for direction in [primary, -primary] {
                let candidate = base
                    .with_lightness(shade.lightness() + direction * shift)
                    .to_color();
                if self.is_legible(&candidate, &background) {
                    debug!(background = %background, %candidate, round, "synthesized foreground");
                    return Ok(candidate);
                }
            }
        }

        Err(SelectError::NoLegibleColor {
            background: background.to_hex(),
            min_contrast: self.min_contrast,
            attempts: SYNTHESIS_ROUNDS * 2,
        })
    }
}

/// Select `count` legible foreground colors using the default threshold.
pub fn select_foreground_colors(
    palette: &[Color],
    background: Color,
    count: usize,
) -> Result<Vec<Color>, SelectError> {
    ForegroundSelector::default().select(palette, background, count)
}
