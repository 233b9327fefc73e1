//! Particles of the backdrop and their per-frame behavior.
//!
//! A particle drifts at a constant velocity, bounces off the surface edges,
//! and is nudged away from a nearby pointer. The nudge moves the position
//! only; velocity is untouched, so the particle glides back onto its own
//! course once the pointer leaves.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::canvas::Canvas;
use crate::config::{BoundaryMode, EngineConfig};
use crate::pointer::PointerState;
use crate::visuals::Color;

/// What a particle looks like.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    /// A filled circle.
    Dot {
        base_radius: f32,
        /// Drawn radius; breathes around `base_radius` when the pulse is on.
        radius: f32,
        /// Pulse angle in radians.
        phase: f32,
        color: Color,
    },
    /// A code glyph, indexing [`EngineConfig::symbols`].
    Symbol {
        glyph: usize,
        /// Frames since the glyph last changed.
        swap_timer: u32,
        color: Color,
    },
}

impl Appearance {
    pub fn color(&self) -> Color {
        match self {
            Appearance::Dot { color, .. } | Appearance::Symbol { color, .. } => *color,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Appearance::Symbol { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub appearance: Appearance,
}

impl Particle {
    /// A dot with a fixed radius and zero pulse phase.
    pub fn dot(position: Vec2, velocity: Vec2, radius: f32, color: Color) -> Self {
        Self {
            position,
            velocity,
            appearance: Appearance::Dot {
                base_radius: radius,
                radius,
                phase: 0.0,
                color,
            },
        }
    }

    pub fn symbol(position: Vec2, velocity: Vec2, glyph: usize, color: Color) -> Self {
        Self {
            position,
            velocity,
            appearance: Appearance::Symbol {
                glyph,
                swap_timer: 0,
                color,
            },
        }
    }

    /// A randomized particle somewhere on a `size` surface.
    pub fn spawn<R: Rng>(rng: &mut R, size: Vec2, config: &EngineConfig) -> Self {
        let position = Vec2::new(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y);
        let velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * config.base_speed,
            (rng.gen::<f32>() - 0.5) * config.base_speed,
        );
        let color = config.palette.choose(rng).copied().unwrap_or(Color::WHITE);

        let is_symbol = !config.symbols.is_empty() && rng.gen_bool(config.symbol_probability);
        let appearance = if is_symbol {
            Appearance::Symbol {
                glyph: rng.gen_range(0..config.symbols.len()),
                swap_timer: 0,
                color,
            }
        } else {
            let base_radius = rng.gen_range(config.size_range.clone());
            Appearance::Dot {
                base_radius,
                radius: base_radius,
                phase: rng.gen::<f32>() * TAU,
                color,
            }
        };

        Self {
            position,
            velocity,
            appearance,
        }
    }

    /// Advance one frame on a surface of `size`.
    pub fn step<R: Rng>(
        &mut self,
        size: Vec2,
        pointer: PointerState,
        config: &EngineConfig,
        rng: &mut R,
    ) {
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > size.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > size.y {
            self.velocity.y = -self.velocity.y;
        }

        if let Some(pointer) = pointer.position() {
            self.position += repulsion(self.position, pointer, config);
        }

        if config.boundary == BoundaryMode::Clamp {
            self.position = self.position.clamp(Vec2::ZERO, size.max(Vec2::ZERO));
        }

        match &mut self.appearance {
            Appearance::Symbol {
                glyph, swap_timer, ..
            } => {
                if let Some(swap) = config.glyph_swap {
                    *swap_timer += 1;
                    let threshold = swap.min_frames + rng.gen::<f32>() * swap.spread_frames;
                    if *swap_timer as f32 > threshold && !config.symbols.is_empty() {
                        *glyph = rng.gen_range(0..config.symbols.len());
                        *swap_timer = 0;
                    }
                }
            }
            Appearance::Dot {
                base_radius,
                radius,
                phase,
                ..
            } => {
                if let Some(pulse) = config.pulse {
                    *phase += pulse.step;
                    *radius = *base_radius + phase.sin() * pulse.amplitude;
                }
            }
        }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, config: &EngineConfig) {
        match &self.appearance {
            Appearance::Dot { radius, color, .. } => {
                canvas.fill_circle(self.position, *radius, *color);
            }
            Appearance::Symbol { glyph, color, .. } => {
                if let Some(text) = config.symbols.get(*glyph) {
                    canvas.fill_text(text, self.position, config.font_size, *color);
                }
            }
        }
    }
}

/// Displacement pushing a particle at `position` away from `pointer`.
///
/// Zero outside the pointer radius, and for a particle exactly under the
/// pointer, which has no direction to be pushed in.
pub fn repulsion(position: Vec2, pointer: Vec2, config: &EngineConfig) -> Vec2 {
    let radius = config.pointer_radius;
    let to_pointer = pointer - position;
    let distance = to_pointer.length();
    if distance <= 0.0 || distance >= radius {
        return Vec2::ZERO;
    }
    let force = (radius - distance) / radius;
    -(to_pointer / distance) * force * config.repulsion_strength
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_dot(x: f32, y: f32) -> Particle {
        Particle::dot(Vec2::new(x, y), Vec2::ZERO, 2.0, Color::WHITE)
    }

    #[test]
    fn test_spawn_respects_config() {
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let size = Vec2::new(800.0, 600.0);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, size, &config);
            assert!(p.position.x >= 0.0 && p.position.x <= size.x);
            assert!(p.position.y >= 0.0 && p.position.y <= size.y);
            assert!(p.velocity.x.abs() <= 0.4 && p.velocity.y.abs() <= 0.4);
            assert!(config.palette.contains(&p.appearance.color()));
            match p.appearance {
                Appearance::Dot { base_radius, radius, phase, .. } => {
                    assert!((1.0..3.0).contains(&base_radius));
                    assert_eq!(radius, base_radius);
                    assert!((0.0..TAU).contains(&phase));
                }
                Appearance::Symbol { glyph, swap_timer, .. } => {
                    assert!(glyph < config.symbols.len());
                    assert_eq!(swap_timer, 0);
                }
            }
        }
    }

    #[test]
    fn test_spawn_on_empty_surface() {
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let p = Particle::spawn(&mut rng, Vec2::ZERO, &config);
        assert_eq!(p.position, Vec2::ZERO);
    }

    #[test]
    fn test_symbol_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        let size = Vec2::splat(100.0);

        let never = EngineConfig::default().with_symbol_probability(0.0);
        assert!((0..100).all(|_| !Particle::spawn(&mut rng, size, &never).appearance.is_symbol()));

        let always = EngineConfig::default().with_symbol_probability(1.0);
        assert!((0..100).all(|_| Particle::spawn(&mut rng, size, &always).appearance.is_symbol()));
    }

    #[test]
    fn test_bounce_flips_velocity() {
        let config = EngineConfig::default().with_pulse(None);
        let mut rng = StdRng::seed_from_u64(4);
        let mut p = Particle::dot(Vec2::new(99.8, 50.0), Vec2::new(0.4, 0.0), 1.0, Color::WHITE);
        p.step(Vec2::splat(100.0), PointerState::Absent, &config, &mut rng);

        assert_eq!(p.velocity, Vec2::new(-0.4, 0.0));
        assert_eq!(p.position.x, 100.0);
    }

    #[test]
    fn test_overshoot_mode_keeps_position() {
        let config = EngineConfig::default()
            .with_pulse(None)
            .with_boundary(BoundaryMode::Overshoot);
        let mut rng = StdRng::seed_from_u64(4);
        let mut p = Particle::dot(Vec2::new(0.1, 50.0), Vec2::new(-0.4, 0.0), 1.0, Color::WHITE);
        p.step(Vec2::splat(100.0), PointerState::Absent, &config, &mut rng);

        assert!(p.position.x < 0.0 && p.position.x > -0.4);
        assert_eq!(p.velocity.x, 0.4);

        // Next frame it comes back inside.
        p.step(Vec2::splat(100.0), PointerState::Absent, &config, &mut rng);
        assert!(p.position.x > 0.0);
    }

    #[test]
    fn test_pointer_pushes_away_without_touching_velocity() {
        let config = EngineConfig::default().with_pulse(None);
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = still_dot(100.0, 100.0);
        let pointer = PointerState::At(Vec2::new(130.0, 140.0));
        p.step(Vec2::splat(400.0), pointer, &config, &mut rng);

        let moved = p.position - Vec2::new(100.0, 100.0);
        let away = Vec2::new(100.0, 100.0) - Vec2::new(130.0, 140.0);
        assert!(moved.length() > 0.0);
        assert!(moved.normalize().dot(away.normalize()) > 0.999);
        // distance 50, radius 180, strength 2
        let expected = (180.0 - 50.0) / 180.0 * 2.0;
        assert!((moved.length() - expected).abs() < 1e-4);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_out_of_range_or_absent() {
        let config = EngineConfig::default().with_pulse(None);
        let mut rng = StdRng::seed_from_u64(6);

        let mut p = still_dot(100.0, 100.0);
        p.step(Vec2::splat(400.0), PointerState::At(Vec2::new(290.0, 100.0)), &config, &mut rng);
        assert_eq!(p.position, Vec2::new(100.0, 100.0));

        let mut p = still_dot(100.0, 100.0);
        p.step(Vec2::splat(400.0), PointerState::Absent, &config, &mut rng);
        assert_eq!(p.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_pointer_exactly_on_particle() {
        let config = EngineConfig::default();
        assert_eq!(repulsion(Vec2::ONE, Vec2::ONE, &config), Vec2::ZERO);
    }

    #[test]
    fn test_pulse_oscillates_around_base() {
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = still_dot(10.0, 10.0);
        let mut seen_above = false;
        let mut seen_below = false;
        for _ in 0..200 {
            p.step(Vec2::splat(100.0), PointerState::Absent, &config, &mut rng);
            if let Appearance::Dot { radius, base_radius, .. } = p.appearance {
                assert!((radius - base_radius).abs() <= 0.5 + 1e-6);
                seen_above |= radius > base_radius;
                seen_below |= radius < base_radius;
            }
        }
        assert!(seen_above && seen_below);
    }

    #[test]
    fn test_glyph_swap_resets_timer() {
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut p = Particle::symbol(Vec2::splat(10.0), Vec2::ZERO, 0, Color::WHITE);
        let mut swapped = false;
        for _ in 0..80 {
            p.step(Vec2::splat(100.0), PointerState::Absent, &config, &mut rng);
            if let Appearance::Symbol { swap_timer, .. } = p.appearance {
                assert!(swap_timer <= 70);
                swapped |= swap_timer == 0;
            }
        }
        assert!(swapped);
    }

    #[test]
    fn test_draw_dispatch() {
        use crate::canvas::{DrawCommand, RecordingCanvas};

        let config = EngineConfig::default();
        let mut canvas = RecordingCanvas::new(100, 100);
        still_dot(5.0, 6.0).draw(&mut canvas, &config);
        Particle::symbol(Vec2::new(7.0, 8.0), Vec2::ZERO, 1, Color::WHITE).draw(&mut canvas, &config);

        assert_eq!(
            canvas.commands[0],
            DrawCommand::Circle {
                center: Vec2::new(5.0, 6.0),
                radius: 2.0,
                color: Color::WHITE
            }
        );
        assert_eq!(
            canvas.commands[1],
            DrawCommand::Text {
                text: "</>".to_string(),
                origin: Vec2::new(7.0, 8.0),
                size: 12.0,
                color: Color::WHITE
            }
        );
    }
}
