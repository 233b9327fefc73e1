//! Colors, palettes and line styles for the backdrop.
//!
//! Colors are plain sRGB bytes with a straight (non-premultiplied) alpha,
//! matching how a 2D canvas interprets `rgba(r, g, b, a)` strings.
//!
//! # Usage
//!
//! ```ignore
//! let config = EngineConfig::default()
//!     .with_palette(Palette::Cyberpunk)
//!     .with_link_style(LineStyle::new(Color::rgb(100, 243, 255), 0.15, 1.0));
//! ```

/// An sRGB color with straight alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    /// Opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    ///
    /// Returns `None` for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return None;
        }
        match digits.len() {
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
                let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
                let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                let expand = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                Some(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => None,
        }
    }

    /// Same color with a different alpha, clamped to `0.0..=1.0`.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Channels as `[r, g, b, a]` bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            self.r,
            self.g,
            self.b,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Pre-defined particle palettes.
///
/// A particle picks one color uniformly from its palette at creation and
/// keeps it for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Cyan, purple, neon green, white.
    #[default]
    Cyberpunk,

    /// Indigo and slate tones of the light page theme.
    Slate,

    /// Single white color.
    Mono,
}

impl Palette {
    /// The colors of this palette.
    pub fn colors(&self) -> Vec<Color> {
        match self {
            Palette::Cyberpunk => vec![
                Color::rgb(0x00, 0xf3, 0xff), // Cyan
                Color::rgb(0xbd, 0x00, 0xff), // Purple
                Color::rgb(0x00, 0xff, 0x9d), // Neon green
                Color::rgb(0xff, 0xff, 0xff), // White
            ],
            Palette::Slate => vec![
                Color::rgb(0x63, 0x66, 0xf1), // Indigo 500
                Color::rgb(0x94, 0xa3, 0xb8), // Slate 400
                Color::rgb(0x47, 0x55, 0x69), // Slate 600
            ],
            Palette::Mono => vec![Color::WHITE],
        }
    }
}

/// Stroke style for connection lines.
///
/// The drawn alpha is `opacity * alpha_scale`, where `opacity` falls
/// linearly from 1 at distance 0 to 0 at the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub alpha_scale: f32,
    pub width: f32,
}

impl LineStyle {
    pub const fn new(color: Color, alpha_scale: f32, width: f32) -> Self {
        Self {
            color,
            alpha_scale,
            width,
        }
    }

    /// Stroke color for a line of the given opacity.
    pub fn color_at(&self, opacity: f32) -> Color {
        self.color.with_alpha(opacity * self.alpha_scale)
    }
}
