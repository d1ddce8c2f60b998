use palette::Srgb;
use thiserror::Error;

/// Errors from strict hex decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("invalid hex color {input:?}: expected 6 hex digits, got {len}")]
    InvalidLength { input: String, len: usize },

    #[error("invalid hex color {input:?}: contains non-hex characters")]
    InvalidDigit { input: String },
}

/// Core color type used throughout the crate.
/// Normalized sRGB components in [0, 1]; alpha is always opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

impl Color {
    /// Build a color from normalized components, clamping each to [0, 1].
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a hex color string like `#ff8800`, `FF8800` or ` #ff8800 `.
    pub fn from_hex(hex: &str) -> Result<Self, HexError> {
        let digits = strip_hex(hex);
        if digits.len() != 6 {
            return Err(HexError::InvalidLength {
                input: hex.to_string(),
                len: digits.chars().count(),
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HexError::InvalidDigit {
                input: hex.to_string(),
            });
        }
        Ok(Self::from_rgb8(
            hex_segment(digits, 0),
            hex_segment(digits, 1),
            hex_segment(digits, 2),
        ))
    }

    /// Parse a hex color without ever failing.
    ///
    /// Each two-digit channel that is missing or not valid hex decodes to 0,
    /// so `"#ZZZZZZ"` is black and `"#ff"` is pure red.
    pub fn from_hex_lossy(hex: &str) -> Self {
        let digits = strip_hex(hex);
        Self::from_rgb8(
            hex_segment(digits, 0),
            hex_segment(digits, 1),
            hex_segment(digits, 2),
        )
    }

    /// Round each channel to the nearest byte.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to `palette::Srgb<f32>`.
    pub fn to_srgb(self) -> Srgb<f32> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Create from `palette::Srgb<f32>`, clamping out-of-gamut channels.
    pub fn from_srgb(srgb: Srgb<f32>) -> Self {
        Self::new(srgb.red, srgb.green, srgb.blue)
    }

    /// WCAG relative luminance.
    ///
    /// Linearizes each channel, then computes the weighted sum.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: f32) -> f32 {
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG contrast ratio between two colors.
    ///
    /// Returns a value in [1, 21]. Higher means more contrast.
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f32 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn strip_hex(hex: &str) -> &str {
    let hex = hex.trim();
    hex.strip_prefix('#').unwrap_or(hex)
}

/// Decode the `index`-th two-digit channel, 0 when absent or malformed.
fn hex_segment(digits: &str, index: usize) -> u8 {
    digits
        .get(index * 2..index * 2 + 2)
        .filter(|s| s.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|s| u8::from_str_radix(s, 16).ok())
        .unwrap_or(0)
}
