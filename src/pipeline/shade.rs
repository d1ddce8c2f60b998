use palette::{FromColor, Hsv, Srgb};

use crate::color::Color;

/// Hue/saturation/lightness coordinates used to synthesize foreground colors.
///
/// Lightness here is derived from HSB brightness as `(2 - s) * v / 2`, which
/// is not the textbook HSL lightness. `to_color` inverts exactly that formula,
/// so the pair round-trips but should not be mixed with other HSL code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Shade {
    /// Degrees in [0, 360).
    hue: f32,
    saturation: f32,
    lightness: f32,
}

impl Shade {
    pub(crate) fn from_color(color: Color) -> Self {
        let hsv: Hsv = Hsv::from_color(color.to_srgb());
        let saturation = hsv.saturation.clamp(0.0, 1.0);
        Self {
            hue: hsv.hue.into_positive_degrees(),
            saturation,
            lightness: (2.0 - saturation) * hsv.value / 2.0,
        }
    }

    pub(crate) fn lightness(self) -> f32 {
        self.lightness
    }

    pub(crate) fn saturation(self) -> f32 {
        self.saturation
    }

    /// Same hue and saturation, new lightness. Out-of-range values are kept
    /// and only clamped by `to_color`.
    pub(crate) fn with_lightness(self, lightness: f32) -> Self {
        Self { lightness, ..self }
    }

    pub(crate) fn with_saturation(self, saturation: f32) -> Self {
        Self {
            saturation: saturation.clamp(0.0, 1.0),
            ..self
        }
    }

    pub(crate) fn to_color(self) -> Color {
        let lightness = self.lightness.clamp(0.0, 1.0);
        let value = (2.0 * lightness / (2.0 - self.saturation)).clamp(0.0, 1.0);
        let hsv: Hsv = Hsv::new(self.hue, self.saturation, value);
        Color::from_srgb(Srgb::from_color(hsv))
    }
}
