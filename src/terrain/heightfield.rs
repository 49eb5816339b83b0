//! Procedural heightfield from a truncated 2D cosine sum.
//!
//! Height at (u, v) is the sum over all frequency pairs (i, j) of
//! `A / sqrt(i^2 + j^2) * cos(i*x + j*y + phase[i][j])` with the (0, 0)
//! term zeroed. The gradient comes from term-by-term differentiation, so
//! normals are exact rather than finite-differenced.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::TerrainParams;

/// Immutable table of random phase offsets, one per frequency pair.
///
/// Built once from a seeded RNG and passed by reference; the same seed
/// always reproduces the same terrain.
pub struct PhaseTable {
    phases: Vec<f64>,
    side: usize,
}

impl PhaseTable {
    /// Generate a (max_frequency + 1)^2 table of phases in [0, phase_range)
    pub fn new(seed: u64, max_frequency: u32, phase_range: f64) -> Self {
        let side = (max_frequency + 1) as usize;
        let mut rng = StdRng::seed_from_u64(seed);
        let phases = (0..side * side)
            .map(|_| rng.gen_range(0.0..phase_range))
            .collect();
        Self { phases, side }
    }

    /// Phase offset for frequency pair (i, j)
    pub fn phase(&self, i: u32, j: u32) -> f64 {
        self.phases[i as usize * self.side + j as usize]
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

/// One heightfield sample: elevation plus the surface normal at that point.
///
/// The normal is the unnormalized upward-biased `(-dh/dx, 1, -dh/dy)`;
/// normalization is deferred to the shader.
#[derive(Debug, Clone, Copy)]
pub struct HeightSample {
    pub height: f32,
    pub normal: Vec3,
}

/// Deterministic heightfield over normalized (u, v) coordinates in [0, 1]
pub struct HeightField {
    params: TerrainParams,
    table: PhaseTable,
}

impl HeightField {
    /// Create a heightfield, building its phase table from the params' seed
    pub fn new(params: TerrainParams) -> Self {
        let table = PhaseTable::new(params.seed, params.max_frequency, params.phase_range);
        Self { params, table }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Per-term amplitude; the (0, 0) term is zeroed explicitly so the
    /// constant term never divides by zero.
    fn amplitude(&self, i: u32, j: u32) -> f64 {
        if i == 0 && j == 0 {
            0.0
        } else {
            self.params.amplitude_scale / f64::from(i * i + j * j).sqrt()
        }
    }

    /// Height and both partial derivatives in one pass over the terms.
    ///
    /// All three sums share each term's amplitude and angle, so fusing them
    /// evaluates sin/cos once per (i, j) instead of three times.
    fn sample_raw(&self, u: f64, v: f64) -> (f64, f64, f64) {
        let x = u * std::f64::consts::PI - std::f64::consts::PI;
        let y = v * std::f64::consts::PI - std::f64::consts::PI;

        let mut height = 0.0;
        let mut dx = 0.0;
        let mut dy = 0.0;

        for i in 0..=self.params.max_frequency {
            for j in 0..=self.params.max_frequency {
                let amp = self.amplitude(i, j);
                if amp == 0.0 {
                    continue;
                }
                let angle = f64::from(i) * x + f64::from(j) * y + self.table.phase(i, j);
                let (sin, cos) = angle.sin_cos();
                height += amp * cos;
                dx -= amp * sin * f64::from(i);
                dy -= amp * sin * f64::from(j);
            }
        }

        (height, dx, dy)
    }

    /// Evaluate elevation and surface normal at normalized (u, v)
    pub fn sample(&self, u: f32, v: f32) -> HeightSample {
        let (height, dx, dy) = self.sample_raw(f64::from(u), f64::from(v));
        HeightSample {
            height: height as f32,
            normal: Vec3::new(-dx as f32, 1.0, -dy as f32),
        }
    }
}
