//! Proximity lines between nearby particles, and between particles and the pointer.
//!
//! Every unordered pair closer than the threshold produces a [`Link`] whose
//! opacity falls linearly from 1 at distance 0 to 0 at the threshold.
//!
//! Two strategies produce the same link set:
//!
//! - [`ProximityStrategy::AllPairs`] checks all n(n-1)/2 pairs. Each pair is
//!   first rejected on either axis distance, then on squared distance, so the
//!   square root is only taken for pairs that are actually drawn. This is the
//!   fast path for the few dozen particles of a backdrop.
//! - [`ProximityStrategy::Grid`] buckets particles into cells of
//!   `threshold` size and only compares particles in the 3x3 neighborhood,
//!   trading a hash map rebuild per frame for roughly linear cost.

use std::collections::HashMap;

use glam::Vec2;

/// Above this many particles, [`ProximityStrategy::Auto`] switches to the grid.
pub const GRID_THRESHOLD: usize = 256;

/// A line between particles `a` and `b` (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    /// `1 - distance / threshold`, in `(0, 1]`.
    pub opacity: f32,
}

/// A line from particle `index` to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerLink {
    pub index: usize,
    pub opacity: f32,
}

/// How the connection pass finds close pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProximityStrategy {
    /// Compare every pair.
    AllPairs,
    /// Uniform grid keyed by `floor(pos / threshold)`.
    Grid,
    /// All pairs up to [`GRID_THRESHOLD`] particles, grid above.
    #[default]
    Auto,
}

impl ProximityStrategy {
    /// The concrete strategy used for `count` particles.
    pub fn resolve(self, count: usize) -> ProximityStrategy {
        match self {
            ProximityStrategy::Auto if count > GRID_THRESHOLD => ProximityStrategy::Grid,
            ProximityStrategy::Auto => ProximityStrategy::AllPairs,
            other => other,
        }
    }
}

/// Opacity of a line between `a` and `b`, or `None` if they are too far apart.
#[inline]
fn link_opacity(a: Vec2, b: Vec2, threshold: f32, threshold_sq: f32) -> Option<f32> {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    if dx.abs() >= threshold || dy.abs() >= threshold {
        return None;
    }
    let distance_sq = dx * dx + dy * dy;
    if distance_sq >= threshold_sq {
        return None;
    }
    Some((1.0 - distance_sq.sqrt() / threshold).max(0.0))
}

/// Find all links by checking every pair. Appends to `out`.
pub fn all_pair_links(positions: &[Vec2], threshold: f32, out: &mut Vec<Link>) {
    if !(threshold > 0.0) {
        return;
    }
    let threshold_sq = threshold * threshold;
    for (a, &pa) in positions.iter().enumerate() {
        for (b, &pb) in positions.iter().enumerate().skip(a + 1) {
            if let Some(opacity) = link_opacity(pa, pb, threshold, threshold_sq) {
                out.push(Link { a, b, opacity });
            }
        }
    }
}

/// Find every particle within `radius` of the pointer. Appends to `out`.
pub fn pointer_links(positions: &[Vec2], pointer: Vec2, radius: f32, out: &mut Vec<PointerLink>) {
    if !(radius > 0.0) {
        return;
    }
    let radius_sq = radius * radius;
    for (index, &p) in positions.iter().enumerate() {
        if let Some(opacity) = link_opacity(p, pointer, radius, radius_sq) {
            out.push(PointerLink { index, opacity });
        }
    }
}

/// Uniform grid of particle indices.
#[derive(Debug, Default)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Cell coordinates of a position.
    pub fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// Re-bucket all particles.
    pub fn rebuild(&mut self, positions: &[Vec2]) {
        self.cells.clear();
        for (index, &p) in positions.iter().enumerate() {
            let cell = self.cell_of(p);
            self.cells.entry(cell).or_default().push(index);
        }
    }

    /// Find all links closer than `threshold`, which must not exceed the cell
    /// size. Appends to `out` sorted by `(a, b)`.
    pub fn links(&self, positions: &[Vec2], threshold: f32, out: &mut Vec<Link>) {
        if !(threshold > 0.0) {
            return;
        }
        debug_assert!(threshold <= self.cell_size);
        let threshold_sq = threshold * threshold;
        let start = out.len();

        for (&(cx, cy), members) in &self.cells {
            for ox in -1..=1 {
                for oy in -1..=1 {
                    // Cells at the edge of the i32 range have no neighbour past it.
                    let (Some(nx), Some(ny)) = (cx.checked_add(ox), cy.checked_add(oy)) else {
                        continue;
                    };
                    let Some(others) = self.cells.get(&(nx, ny)) else {
                        continue;
                    };
                    for &a in members {
                        for &b in others {
                            // Each unordered pair is seen from both cells; keep one.
                            if b <= a {
                                continue;
                            }
                            if let Some(opacity) =
                                link_opacity(positions[a], positions[b], threshold, threshold_sq)
                            {
                                out.push(Link { a, b, opacity });
                            }
                        }
                    }
                }
            }
        }

        out[start..].sort_unstable_by_key(|l| (l.a, l.b));
    }
}

/// Reusable connection pass with a fixed threshold and strategy.
#[derive(Debug)]
pub struct ProximityIndex {
    strategy: ProximityStrategy,
    threshold: f32,
    grid: SpatialGrid,
}

impl ProximityIndex {
    pub fn new(strategy: ProximityStrategy, threshold: f32) -> Self {
        Self {
            strategy,
            threshold,
            grid: SpatialGrid::new(threshold),
        }
    }

    /// Replace the contents of `out` with this frame's links.
    pub fn find_links(&mut self, positions: &[Vec2], out: &mut Vec<Link>) {
        out.clear();
        match self.strategy.resolve(positions.len()) {
            ProximityStrategy::Grid if self.threshold > 0.0 => {
                self.grid.rebuild(positions);
                self.grid.links(positions, self.threshold, out);
            }
            _ => all_pair_links(positions, self.threshold, out),
        }
    }
}
