//! # Particle Field
//!
//! An animated backdrop: drifting dots and code glyphs that bounce inside the
//! window, shy away from the pointer, and link up with faint lines when they
//! drift close to each other or to the pointer.
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_field::prelude::*;
//!
//! fn main() -> Result<(), FieldError> {
//!     run(EngineConfig::default()
//!         .with_particle_count(80)
//!         .with_palette(Palette::Slate))
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Engine
//!
//! [`ParticleField`] is the whole animation. It does not own a window: the
//! host hands it pointer events, resize requests and a [`Canvas`] to draw on
//! once per frame. That keeps the engine usable headless:
//!
//! ```ignore
//! let mut field = ParticleField::new(EngineConfig::default().with_seed(7))?;
//! let mut canvas = RecordingCanvas::default();
//! field.mount(&mut canvas, 800, 600);
//! let stats = field.frame(&mut canvas, Instant::now());
//! ```
//!
//! ### Particles
//!
//! Each particle is either a dot (a small circle whose radius can pulse) or a
//! symbol (a short code glyph such as `</>` that can swap to another glyph
//! now and then). Both drift at a constant velocity and reflect off the
//! surface edges.
//!
//! ### Connections
//!
//! Pairs of particles closer than `connection_distance` are joined by a line
//! whose opacity falls linearly with distance. Large fields switch from an
//! all-pairs scan to a uniform grid; see [`ProximityStrategy`].
//!
//! ### Pointer
//!
//! Within `pointer_radius` the pointer pushes particles away and, when
//! pointer links are enabled, draws a line to each of them.
//!
//! ### Resizing
//!
//! Resizes are debounced: a burst of resize events re-seeds the particles
//! once, at the final size, after `resize_debounce` of quiet.
//!
//! ## Rendering
//!
//! [`PixelCanvas`] rasterizes the frame on the CPU; the window host uploads
//! it to a texture and presents it with wgpu.

pub mod canvas;
pub mod config;
pub mod connections;
pub mod debounce;
pub mod error;
pub mod field;
pub mod font;
mod gpu;
pub mod particle;
pub mod pointer;
pub mod raster;
pub mod shader;
pub mod time;
pub mod visuals;
mod window;

pub use canvas::{Canvas, DrawCommand, RecordingCanvas};
pub use config::{BoundaryMode, EngineConfig, GlyphSwap, Pulse};
pub use connections::{Link, PointerLink, ProximityIndex, ProximityStrategy};
pub use error::{ConfigError, FieldError, GpuError};
pub use field::{EngineState, FrameStats, ParticleField};
pub use glam::Vec2;
pub use particle::{Appearance, Particle};
pub use pointer::PointerState;
pub use raster::PixelCanvas;
pub use time::FrameClock;
pub use visuals::{Color, LineStyle, Palette};
pub use window::{run, App};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::canvas::{Canvas, RecordingCanvas};
    pub use crate::config::{BoundaryMode, EngineConfig};
    pub use crate::connections::ProximityStrategy;
    pub use crate::error::FieldError;
    pub use crate::field::{EngineState, ParticleField};
    pub use crate::raster::PixelCanvas;
    pub use crate::visuals::{Color, LineStyle, Palette};
    pub use crate::window::run;
    pub use glam::Vec2;
}
