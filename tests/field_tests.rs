//! Integration tests for the particle field engine.
//!
//! Everything runs headless against `RecordingCanvas` / `PixelCanvas` with a
//! fixed seed, so frames are reproducible.

use std::time::{Duration, Instant};

use particle_field::connections::all_pair_links;
use particle_field::prelude::*;
use particle_field::{DrawCommand, Link, Particle, ProximityIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MS: Duration = Duration::from_millis(1);

fn still_config() -> EngineConfig {
    EngineConfig::default()
        .with_seed(42)
        .with_pulse(None)
        .with_glyph_swap(None)
}

fn mount(config: EngineConfig, width: u32, height: u32) -> (ParticleField, RecordingCanvas) {
    let mut field = ParticleField::new(config).unwrap();
    let mut canvas = RecordingCanvas::default();
    assert!(field.mount(&mut canvas, width, height));
    (field, canvas)
}

fn place(field: &mut ParticleField, points: &[(f32, f32)]) {
    let particles = field.particles_mut();
    particles.clear();
    for &(x, y) in points {
        particles.push(Particle::dot(Vec2::new(x, y), Vec2::ZERO, 2.0, Color::WHITE));
    }
}

// ============================================================================
// Simulation
// ============================================================================

#[test]
fn test_particles_stay_in_bounds() {
    let config = EngineConfig::default().with_seed(3).with_particle_count(200);
    let (mut field, mut canvas) = mount(config, 640, 480);
    let now = Instant::now();

    for i in 0..600 {
        if i % 7 == 0 {
            field.pointer_moved((i % 640) as f32, (i % 480) as f32);
        }
        field.frame(&mut canvas, now);
        canvas.take();
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= 640.0, "x = {}", p.position.x);
            assert!(p.position.y >= 0.0 && p.position.y <= 480.0, "y = {}", p.position.y);
        }
    }
}

#[test]
fn test_velocity_magnitude_is_preserved() {
    let config = EngineConfig::default().with_seed(5);
    let (mut field, mut canvas) = mount(config, 500, 500);
    let before: Vec<Vec2> = field.particles().iter().map(|p| p.velocity.abs()).collect();

    field.pointer_moved(250.0, 250.0);
    for _ in 0..300 {
        field.frame(&mut canvas, Instant::now());
    }
    let after: Vec<Vec2> = field.particles().iter().map(|p| p.velocity.abs()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_same_seed_same_frames() {
    let run = || {
        let (mut field, mut canvas) = mount(EngineConfig::default().with_seed(17), 400, 300);
        let now = Instant::now();
        for _ in 0..20 {
            field.frame(&mut canvas, now);
        }
        canvas.take()
    };
    assert_eq!(run(), run());
}

// ============================================================================
// Connections
// ============================================================================

#[test]
fn test_three_particle_links() {
    let (mut field, mut canvas) = mount(still_config(), 800, 600);
    place(&mut field, &[(0.0, 0.0), (60.0, 0.0), (200.0, 0.0)]);

    let stats = field.frame(&mut canvas, Instant::now()).unwrap();
    assert_eq!(stats.links, 1);
    assert_eq!(stats.pointer_links, 0);

    let lines: Vec<&DrawCommand> = canvas.lines().collect();
    assert_eq!(lines.len(), 1);
    match lines[0] {
        DrawCommand::Line { from, to, width, color } => {
            assert_eq!(*from, Vec2::new(0.0, 0.0));
            assert_eq!(*to, Vec2::new(60.0, 0.0));
            assert_eq!(*width, 1.0);
            assert_eq!((color.r, color.g, color.b), (100, 243, 255));
            // opacity 0.5 scaled by 0.15
            assert!((color.a - 0.075).abs() < 1e-6);
        }
        other => panic!("expected a line, got {:?}", other),
    }
}

#[test]
fn test_link_exactly_at_threshold_is_not_drawn() {
    let (mut field, mut canvas) = mount(still_config(), 800, 600);
    place(&mut field, &[(100.0, 100.0), (220.0, 100.0)]);
    let stats = field.frame(&mut canvas, Instant::now()).unwrap();
    assert_eq!(stats.links, 0);
}

#[test]
fn test_grid_matches_all_pairs_on_random_fields() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..5 {
        let positions: Vec<Vec2> = (0..600)
            .map(|_| Vec2::new(rng.gen::<f32>() * 1920.0, rng.gen::<f32>() * 1080.0))
            .collect();

        let mut expected = Vec::new();
        all_pair_links(&positions, 120.0, &mut expected);

        let mut grid = ProximityIndex::new(ProximityStrategy::Grid, 120.0);
        let mut found: Vec<Link> = Vec::new();
        grid.find_links(&positions, &mut found);

        let key = |l: &Link| (l.a, l.b);
        expected.sort_by_key(key);
        found.sort_by_key(key);
        assert_eq!(found, expected);
    }
}

#[test]
fn test_grid_survives_sub_pixel_threshold() {
    let mut rng = StdRng::seed_from_u64(31);
    let positions: Vec<Vec2> = (0..300)
        .map(|_| Vec2::new(rng.gen::<f32>() * 800.0, rng.gen::<f32>() * 600.0))
        .collect();

    let mut grid = ProximityIndex::new(ProximityStrategy::Grid, 1e-7);
    let mut found: Vec<Link> = Vec::new();
    grid.find_links(&positions, &mut found);

    let mut expected = Vec::new();
    all_pair_links(&positions, 1e-7, &mut expected);
    assert_eq!(found, expected);
}

#[test]
fn test_unusable_configs_are_rejected_before_mount() {
    let configs = [
        EngineConfig::default()
            .with_particle_count(300)
            .with_connection_distance(1e-7),
        EngineConfig::default().with_size_range(1.0..f32::INFINITY),
        EngineConfig::default().with_pointer_radius(f32::INFINITY),
        EngineConfig::default().with_base_speed(f32::NAN),
        EngineConfig::default().with_repulsion_strength(f32::INFINITY),
        EngineConfig::default().with_font_size(f32::INFINITY),
    ];
    for config in configs {
        assert!(ParticleField::new(config.clone()).is_err(), "accepted {:?}", config);
    }
}

#[test]
fn test_smallest_threshold_runs_on_grid() {
    let config = EngineConfig::default()
        .with_seed(4)
        .with_particle_count(300)
        .with_connection_distance(particle_field::config::MIN_THRESHOLD)
        .with_proximity(ProximityStrategy::Grid);
    let (mut field, mut canvas) = mount(config, 800, 600);
    for _ in 0..10 {
        assert!(field.frame(&mut canvas, Instant::now()).is_some());
    }
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn test_pointer_link_and_push() {
    let (mut field, mut canvas) = mount(still_config(), 800, 600);
    place(&mut field, &[(100.0, 100.0), (700.0, 500.0)]);
    field.pointer_moved(100.0, 150.0);

    let stats = field.frame(&mut canvas, Instant::now()).unwrap();
    assert_eq!(stats.pointer_links, 1);

    let pushed = field.particles()[0].position;
    let expected_push = (180.0 - 50.0) / 180.0 * 2.0;
    assert!((pushed.x - 100.0).abs() < 1e-4);
    assert!((100.0 - pushed.y - expected_push).abs() < 1e-4);
    assert_eq!(field.particles()[1].position, Vec2::new(700.0, 500.0));

    let line = canvas.lines().last().cloned();
    match line {
        Some(DrawCommand::Line { from, to, width, color }) => {
            assert_eq!(from, pushed);
            assert_eq!(to, Vec2::new(100.0, 150.0));
            assert_eq!(width, 1.5);
            assert_eq!((color.r, color.g, color.b), (189, 0, 255));
        }
        other => panic!("expected a pointer line, got {:?}", other),
    }
}

#[test]
fn test_pointer_leaving_stops_push_and_links() {
    let (mut field, mut canvas) = mount(still_config(), 800, 600);
    place(&mut field, &[(100.0, 100.0)]);
    field.pointer_moved(100.0, 150.0);
    field.pointer_left();

    let stats = field.frame(&mut canvas, Instant::now()).unwrap();
    assert_eq!(stats.pointer_links, 0);
    assert_eq!(field.particles()[0].position, Vec2::new(100.0, 100.0));
    assert_eq!(canvas.lines().count(), 0);
}

#[test]
fn test_pointer_links_can_be_disabled() {
    let (mut field, mut canvas) = mount(still_config().with_pointer_links(None), 800, 600);
    place(&mut field, &[(100.0, 100.0)]);
    field.pointer_moved(120.0, 100.0);

    let stats = field.frame(&mut canvas, Instant::now()).unwrap();
    assert_eq!(stats.pointer_links, 0);
    // The push still applies.
    assert!(field.particles()[0].position.x < 100.0);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_resize_burst_reinitializes_once() {
    let (mut field, mut canvas) = mount(EngineConfig::default().with_seed(8), 800, 600);
    let t0 = Instant::now();

    for (i, width) in (900..1000).step_by(10).enumerate() {
        let at = t0 + (i as u32) * 20 * MS;
        field.request_resize(width, 700, at);
        field.frame(&mut canvas, at);
    }
    assert_eq!(field.reinit_count(), 1);
    assert_eq!(field.state(), EngineState::Resizing);

    field.frame(&mut canvas, t0 + 2 * Duration::from_secs(1));
    assert_eq!(field.reinit_count(), 2);
    assert_eq!(field.size(), Vec2::new(990.0, 700.0));
    assert_eq!(canvas.size(), (990, 700));
    assert_eq!(field.particles().len(), 60);
    assert!(field
        .particles()
        .iter()
        .all(|p| p.position.x <= 990.0 && p.position.y <= 700.0));
}

#[test]
fn test_teardown_freezes_frame_counter() {
    let (mut field, mut canvas) = mount(EngineConfig::default().with_seed(1), 300, 300);
    let now = Instant::now();
    for _ in 0..5 {
        field.frame(&mut canvas, now);
    }
    field.teardown();
    field.teardown();

    for _ in 0..5 {
        assert!(field.frame(&mut canvas, now).is_none());
    }
    assert_eq!(field.frames_drawn(), 5);
    assert_eq!(field.state(), EngineState::Stopped);
    assert!(field.particles().is_empty());
}

#[test]
fn test_pixel_canvas_frame() {
    let config = EngineConfig::default().with_seed(2).with_particle_count(30);
    let mut field = ParticleField::new(config).unwrap();
    let mut canvas = PixelCanvas::new(0, 0);
    field.mount(&mut canvas, 200, 150);
    field.frame(&mut canvas, Instant::now());

    assert_eq!(canvas.size(), (200, 150));
    let background = [2, 6, 23, 255];
    let lit = canvas.image().pixels().filter(|p| p.0 != background).count();
    assert!(lit > 0);
    assert!(canvas.image().pixels().all(|p| p.0[3] == 255));
}
