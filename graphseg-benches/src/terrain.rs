//! Seeded synthetic inputs for segmentation benchmarks.
//!
//! Terrains are terraced: the grid is split into horizontal bands of equal
//! base height with small per-cell noise, so segmentation has real plateaus
//! to find instead of collapsing to one segment or to singletons.

use graphseg_core::{ElevationGrid, WeightedEdge};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Configuration for [`terraced_grid`].
#[derive(Clone, Debug)]
pub struct TerrainConfig {
    /// Cells per side of the square grid.
    pub side: usize,
    /// Number of horizontal bands.
    pub terraces: usize,
    /// Height difference between neighbouring bands.
    pub step: f64,
    /// Maximum absolute per-cell noise.
    pub noise: f64,
    /// RNG seed.
    pub seed: u64,
}

/// Builds a square terraced grid.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `side` or `terraces` is zero
/// and [`BenchSetupError::Grid`] if the grid is rejected.
///
/// # Examples
/// ```
/// use graphseg_benches::terrain::{TerrainConfig, terraced_grid};
///
/// let grid = terraced_grid(&TerrainConfig {
///     side: 8,
///     terraces: 2,
///     step: 10.0,
///     noise: 0.5,
///     seed: 7,
/// })?;
/// assert_eq!(grid.cell_count(), 64);
/// # Ok::<(), graphseg_benches::error::BenchSetupError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "terrain heights combine band offsets with noise"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "band indices are small enough to be exact in f64"
)]
#[expect(
    clippy::integer_division,
    reason = "rows map onto bands by truncating division"
)]
pub fn terraced_grid(config: &TerrainConfig) -> Result<ElevationGrid, BenchSetupError> {
    if config.side == 0 {
        return Err(BenchSetupError::ZeroValue { context: "side" });
    }
    if config.terraces == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "terraces",
        });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let band_height = config.side.div_ceil(config.terraces);
    let mut heights = Vec::with_capacity(config.side.saturating_mul(config.side));
    for y in 0..config.side {
        let base = (y / band_height) as f64 * config.step;
        for _ in 0..config.side {
            let jitter = if config.noise > 0.0 {
                rng.gen_range(-config.noise..=config.noise)
            } else {
                0.0
            };
            heights.push(base + jitter);
        }
    }
    Ok(ElevationGrid::new(config.side, config.side, heights)?)
}

/// Generates `edge_count` random edges over `vertex_count` vertices with
/// weights in `[0, 1)`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `vertex_count` is zero.
pub fn random_edges(
    vertex_count: usize,
    edge_count: usize,
    seed: u64,
) -> Result<Vec<WeightedEdge>, BenchSetupError> {
    if vertex_count == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "vertex_count",
        });
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    Ok((0..edge_count)
        .map(|_| {
            WeightedEdge::new(
                rng.gen_range(0..vertex_count),
                rng.gen_range(0..vertex_count),
                rng.r#gen::<f64>(),
            )
        })
        .collect())
}
