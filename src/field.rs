//! The particle field engine.
//!
//! [`ParticleField`] owns everything the backdrop animates: configuration,
//! the particle pool, the pointer, the resize debouncer and the random
//! source. The host feeds it input events and calls [`ParticleField::frame`]
//! once per display refresh with the canvas to draw on.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --mount--> Running --request_resize--> Resizing
//!                             ^                            |
//!                             +------ debounce expires ----+
//! any state --teardown--> Stopped (terminal)
//! ```
//!
//! Outside `Running`/`Resizing` every operation is a no-op, so a redraw that
//! was already queued when the host tore the field down draws nothing.
//!
//! # Frame
//!
//! 1. Apply a pending resize if its debounce expired (resize canvas, re-init).
//! 2. Clear the canvas.
//! 3. Step and draw each particle.
//! 4. Draw particle-to-particle links.
//! 5. Draw pointer links.

use std::time::Instant;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};
use winit::event::WindowEvent;

use crate::canvas::Canvas;
use crate::config::EngineConfig;
use crate::connections::{pointer_links, Link, PointerLink, ProximityIndex};
use crate::debounce::Debouncer;
use crate::error::ConfigError;
use crate::particle::Particle;
use crate::pointer::PointerState;

/// Lifecycle of a [`ParticleField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Built but not yet mounted on a surface.
    Uninitialized,
    /// Animating.
    Running,
    /// Animating, with a re-initialization waiting for the resize debounce.
    Resizing,
    /// Torn down. Terminal.
    Stopped,
}

impl EngineState {
    /// Whether frames are drawn in this state.
    pub fn is_live(self) -> bool {
        matches!(self, EngineState::Running | EngineState::Resizing)
    }
}

/// Counts from one drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Index of this frame, starting at 1.
    pub frame: u64,
    pub particles: usize,
    pub links: usize,
    pub pointer_links: usize,
}

pub struct ParticleField {
    config: EngineConfig,
    state: EngineState,
    size: Vec2,
    particles: Vec<Particle>,
    pointer: PointerState,
    rng: StdRng,
    resize: Debouncer<(u32, u32)>,
    proximity: ProximityIndex,
    // Scratch buffers reused every frame.
    positions: Vec<Vec2>,
    links: Vec<Link>,
    pointer_links: Vec<PointerLink>,
    frames: u64,
    reinits: u64,
    last_stats: Option<FrameStats>,
}

impl ParticleField {
    /// Build an engine. Nothing is drawn until [`mount`](Self::mount).
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            state: EngineState::Uninitialized,
            size: Vec2::ZERO,
            particles: Vec::with_capacity(config.particle_count),
            pointer: PointerState::Absent,
            rng,
            resize: Debouncer::new(config.resize_debounce),
            proximity: ProximityIndex::new(config.proximity, config.connection_distance),
            positions: Vec::with_capacity(config.particle_count),
            links: Vec::new(),
            pointer_links: Vec::new(),
            frames: 0,
            reinits: 0,
            last_stats: None,
            config,
        })
    }

    /// Size `canvas` to `width` x `height`, seed the particles and start
    /// running. Returns `false` if the field was already mounted or torn down.
    pub fn mount<C: Canvas + ?Sized>(&mut self, canvas: &mut C, width: u32, height: u32) -> bool {
        if self.state != EngineState::Uninitialized {
            return false;
        }
        canvas.resize(width, height);
        self.init(width, height);
        self.state = EngineState::Running;
        info!(width, height, particles = self.particles.len(), "particle field mounted");
        true
    }

    /// Replace every particle with a fresh random one on a `width` x `height` surface.
    pub fn init(&mut self, width: u32, height: u32) {
        self.size = Vec2::new(width as f32, height as f32);
        self.particles.clear();
        for _ in 0..self.config.particle_count {
            let particle = Particle::spawn(&mut self.rng, self.size, &self.config);
            self.particles.push(particle);
        }
        self.reinits += 1;
        debug!(
            width,
            height,
            particles = self.particles.len(),
            reinits = self.reinits,
            "particles seeded"
        );
    }

    /// Record a pointer move in surface pixels.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.state.is_live() {
            self.pointer.move_to(x, y);
        }
    }

    /// Record the pointer leaving the surface.
    pub fn pointer_left(&mut self) {
        if self.state.is_live() {
            self.pointer.clear();
        }
    }

    /// Feed a winit window event; only pointer events are consumed.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        self.state.is_live() && self.pointer.handle_event(event)
    }

    /// Ask for a re-initialization at a new size. Bursts within the debounce
    /// delay collapse into one re-init at the latest size. Zero-sized
    /// requests (minimized windows) are ignored.
    pub fn request_resize(&mut self, width: u32, height: u32, now: Instant) {
        if !self.state.is_live() {
            return;
        }
        if width == 0 || height == 0 {
            trace!(width, height, "ignoring empty resize");
            return;
        }
        self.resize.trigger((width, height), now);
        self.state = EngineState::Resizing;
    }

    /// When a pending resize will be applied, if any.
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// Advance the simulation by one step without drawing.
    pub fn update(&mut self) {
        if !self.state.is_live() {
            return;
        }
        for particle in &mut self.particles {
            particle.step(self.size, self.pointer, &self.config, &mut self.rng);
        }
    }

    /// Run one animation frame on `canvas`.
    ///
    /// Returns `None` without touching the canvas unless the field is live.
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C, now: Instant) -> Option<FrameStats> {
        if !self.state.is_live() {
            return None;
        }

        if let Some((width, height)) = self.resize.poll(now) {
            canvas.resize(width, height);
            self.init(width, height);
            self.state = EngineState::Running;
            info!(width, height, "particle field resized");
        }

        canvas.clear(self.config.background);

        for particle in &mut self.particles {
            particle.step(self.size, self.pointer, &self.config, &mut self.rng);
            particle.draw(canvas, &self.config);
        }

        self.positions.clear();
        self.positions.extend(self.particles.iter().map(|p| p.position));

        self.proximity.find_links(&self.positions, &mut self.links);
        let style = self.config.link_style;
        for link in &self.links {
            canvas.stroke_line(
                self.positions[link.a],
                self.positions[link.b],
                style.width,
                style.color_at(link.opacity),
            );
        }

        self.pointer_links.clear();
        if let (Some(pointer), Some(style)) = (self.pointer.position(), self.config.pointer_link_style) {
            pointer_links(&self.positions, pointer, self.config.pointer_radius, &mut self.pointer_links);
            for link in &self.pointer_links {
                canvas.stroke_line(
                    self.positions[link.index],
                    pointer,
                    style.width,
                    style.color_at(link.opacity),
                );
            }
        }

        self.frames += 1;
        let stats = FrameStats {
            frame: self.frames,
            particles: self.particles.len(),
            links: self.links.len(),
            pointer_links: self.pointer_links.len(),
        };
        self.last_stats = Some(stats);
        Some(stats)
    }

    /// Stop for good: drop pending work and the particle pool. Every later
    /// call is a no-op.
    pub fn teardown(&mut self) {
        if self.state == EngineState::Stopped {
            return;
        }
        self.state = EngineState::Stopped;
        self.resize.cancel();
        self.pointer.clear();
        self.particles.clear();
        info!(frames = self.frames, "particle field stopped");
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state.is_live()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the pool, for placing particles by hand.
    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Simulation surface size in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Frames drawn since mount.
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Counts from the most recent frame.
    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }

    /// Number of particle initializations, including the one at mount.
    pub fn reinit_count(&self) -> u64 {
        self.reinits
    }
}
