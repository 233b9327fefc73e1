//! Engine configuration.
//!
//! The configuration is fixed for the lifetime of a [`ParticleField`]; a
//! different configuration means building a new engine.
//!
//! ```ignore
//! let config = EngineConfig::default()
//!     .with_particle_count(80)
//!     .with_connection_distance(100.0)
//!     .with_seed(42);
//! let field = ParticleField::new(config)?;
//! ```
//!
//! [`ParticleField`]: crate::ParticleField

use std::ops::Range;
use std::time::Duration;

use crate::connections::ProximityStrategy;
use crate::error::ConfigError;
use crate::visuals::{Color, LineStyle, Palette};

/// Smallest non-zero `connection_distance` / `pointer_radius`, in pixels.
pub const MIN_THRESHOLD: f32 = 0.5;

/// Glyphs drawn by symbol particles.
pub const DEFAULT_SYMBOLS: [&str; 10] = ["{ }", "</>", ";", "0", "1", "&&", "||", "[]", "=>", "()"];

/// How a particle behaves at the surface edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Flip the velocity component and clamp the position back inside.
    #[default]
    Clamp,
    /// Flip the velocity component only. A particle may sit outside the
    /// surface for a frame after a fast bounce or a pointer nudge.
    Overshoot,
}

/// Breathing size oscillation for dot particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    /// Phase increment per frame, in radians.
    pub step: f32,
    /// Peak deviation from the base radius.
    pub amplitude: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            step: 0.05,
            amplitude: 0.5,
        }
    }
}

/// Random glyph replacement for symbol particles.
///
/// A glyph is swapped once its timer exceeds `min_frames + U[0,1) * spread_frames`,
/// with the threshold re-drawn every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSwap {
    pub min_frames: f32,
    pub spread_frames: f32,
}

impl Default for GlyphSwap {
    fn default() -> Self {
        Self {
            min_frames: 20.0,
            spread_frames: 50.0,
        }
    }
}

/// Immutable settings of a particle field.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub particle_count: usize,
    /// Particles closer than this are linked.
    pub connection_distance: f32,
    /// Particles closer than this to the pointer are pushed away and linked to it.
    pub pointer_radius: f32,
    /// Velocity components are drawn from `[-base_speed / 2, base_speed / 2)`.
    pub base_speed: f32,
    /// Dot base radius range.
    pub size_range: Range<f32>,
    pub palette: Vec<Color>,
    pub symbols: Vec<String>,
    pub symbol_probability: f64,
    /// Maximum pointer nudge per frame, reached at distance 0.
    pub repulsion_strength: f32,
    pub link_style: LineStyle,
    /// `None` disables lines to the pointer.
    pub pointer_link_style: Option<LineStyle>,
    pub pulse: Option<Pulse>,
    pub glyph_swap: Option<GlyphSwap>,
    pub font_size: f32,
    pub background: Color,
    pub resize_debounce: Duration,
    pub boundary: BoundaryMode,
    pub proximity: ProximityStrategy,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: 60,
            connection_distance: 120.0,
            pointer_radius: 180.0,
            base_speed: 0.8,
            size_range: 1.0..3.0,
            palette: Palette::Cyberpunk.colors(),
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            symbol_probability: 0.3,
            repulsion_strength: 2.0,
            link_style: LineStyle::new(Color::rgb(100, 243, 255), 0.15, 1.0),
            pointer_link_style: Some(LineStyle::new(Color::rgb(189, 0, 255), 0.4, 1.5)),
            pulse: Some(Pulse::default()),
            glyph_swap: Some(GlyphSwap::default()),
            font_size: 12.0,
            background: Color::rgb(0x02, 0x06, 0x17),
            resize_debounce: Duration::from_millis(100),
            boundary: BoundaryMode::Clamp,
            proximity: ProximityStrategy::Auto,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the particle-to-particle link distance.
    pub fn with_connection_distance(mut self, distance: f32) -> Self {
        self.connection_distance = distance;
        self
    }

    /// Set the pointer interaction radius.
    pub fn with_pointer_radius(mut self, radius: f32) -> Self {
        self.pointer_radius = radius;
        self
    }

    pub fn with_base_speed(mut self, speed: f32) -> Self {
        self.base_speed = speed;
        self
    }

    pub fn with_size_range(mut self, range: Range<f32>) -> Self {
        self.size_range = range;
        self
    }

    /// Use one of the built-in palettes.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette.colors();
        self
    }

    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.palette = colors;
        self
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Chance that a new particle is a glyph instead of a dot.
    pub fn with_symbol_probability(mut self, p: f64) -> Self {
        self.symbol_probability = p;
        self
    }

    pub fn with_repulsion_strength(mut self, strength: f32) -> Self {
        self.repulsion_strength = strength;
        self
    }

    pub fn with_link_style(mut self, style: LineStyle) -> Self {
        self.link_style = style;
        self
    }

    pub fn with_pointer_links(mut self, style: Option<LineStyle>) -> Self {
        self.pointer_link_style = style;
        self
    }

    pub fn with_pulse(mut self, pulse: Option<Pulse>) -> Self {
        self.pulse = pulse;
        self
    }

    pub fn with_glyph_swap(mut self, swap: Option<GlyphSwap>) -> Self {
        self.glyph_swap = swap;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }

    pub fn with_boundary(mut self, mode: BoundaryMode) -> Self {
        self.boundary = mode;
        self
    }

    pub fn with_proximity(mut self, strategy: ProximityStrategy) -> Self {
        self.proximity = strategy;
        self
    }

    /// Seed the random source for reproducible layouts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.symbols.is_empty() && self.symbol_probability > 0.0 {
            return Err(ConfigError::EmptySymbols);
        }
        for (name, value) in [
            ("connection_distance", self.connection_distance),
            ("pointer_radius", self.pointer_radius),
        ] {
            // Zero switches the feature off; anything else needs a real cell size.
            let usable = value == 0.0 || (value >= MIN_THRESHOLD && value.is_finite());
            if !usable {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if !(self.base_speed >= 0.0 && self.base_speed.is_finite()) {
            return Err(ConfigError::InvalidSpeed(self.base_speed));
        }
        let Range { start, end } = self.size_range;
        if !(start >= 0.0 && end > start && end.is_finite()) {
            return Err(ConfigError::InvalidSizeRange { min: start, max: end });
        }
        if !(0.0..=1.0).contains(&self.symbol_probability) {
            return Err(ConfigError::InvalidProbability(self.symbol_probability as f32));
        }
        if !(self.font_size > 0.0 && self.font_size.is_finite()) {
            return Err(ConfigError::InvalidFontSize(self.font_size));
        }

        let mut values = vec![
            ("repulsion_strength", self.repulsion_strength),
            ("link_style.alpha_scale", self.link_style.alpha_scale),
            ("link_style.width", self.link_style.width),
        ];
        if let Some(style) = self.pointer_link_style {
            values.push(("pointer_link_style.alpha_scale", style.alpha_scale));
            values.push(("pointer_link_style.width", style.width));
        }
        if let Some(pulse) = self.pulse {
            values.push(("pulse.step", pulse.step));
            values.push(("pulse.amplitude", pulse.amplitude));
        }
        if let Some(swap) = self.glyph_swap {
            values.push(("glyph_swap.min_frames", swap.min_frames));
            values.push(("glyph_swap.spread_frames", swap.spread_frames));
        }
        for (name, value) in values {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }
        Ok(())
    }
}
