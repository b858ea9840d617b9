//! Elevation grids as segmentation graphs.
//!
//! A digital elevation model stores one height per cell. Segmenting it means
//! connecting neighbouring cells by the absolute height difference and
//! handing the resulting edges to [`crate::Segmenter`]; the per-cell labels
//! of the [`crate::Segmentation`] then index the grid in row-major order.

use thiserror::Error;
use tracing::instrument;

use crate::{
    Result as SegmentResult,
    error::define_error_codes,
    result::Segmentation,
    segment::{Segmenter, WeightedEdge},
};

/// Neighbourhood used when connecting grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Horizontal and vertical neighbours.
    #[default]
    Four,
    /// Horizontal, vertical and diagonal neighbours.
    Eight,
}

/// Errors raised while building an [`ElevationGrid`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridError {
    /// The grid must have at least one row and one column.
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension {
        /// Number of columns.
        width: usize,
        /// Number of rows.
        height: usize,
    },
    /// The cell count does not fit in `usize`.
    #[error("grid of {width}x{height} cells exceeds capacity limits")]
    CapacityOverflow {
        /// Number of columns.
        width: usize,
        /// Number of rows.
        height: usize,
    },
    /// The number of heights does not match `width * height`.
    #[error("expected {expected} heights but {found} were given")]
    LengthMismatch {
        /// `width * height`.
        expected: usize,
        /// Number of heights supplied.
        found: usize,
    },
    /// A row of a row-wise grid had a different length from the first row.
    #[error("row {row} has {found} cells but expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A height was NaN or infinite.
    #[error("cell {index} has a non-finite height")]
    NonFiniteHeight {
        /// Row-major index of the offending cell.
        index: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GridError`] variants.
    enum GridErrorCode for GridError {
        /// The grid must have at least one row and one column.
        ZeroDimension => ZeroDimension { .. } => "GRID_ZERO_DIMENSION",
        /// The cell count does not fit in `usize`.
        CapacityOverflow => CapacityOverflow { .. } => "GRID_CAPACITY_OVERFLOW",
        /// The number of heights does not match `width * height`.
        LengthMismatch => LengthMismatch { .. } => "GRID_LENGTH_MISMATCH",
        /// A row of a row-wise grid had a different length from the first row.
        RaggedRow => RaggedRow { .. } => "GRID_RAGGED_ROW",
        /// A height was NaN or infinite.
        NonFiniteHeight => NonFiniteHeight { .. } => "GRID_NON_FINITE_HEIGHT",
    }
}

/// A row-major grid of finite cell heights.
///
/// # Examples
/// ```
/// use graphseg_core::{Connectivity, ElevationGrid};
///
/// let grid = ElevationGrid::new(2, 2, vec![0.0, 0.5, 3.0, 3.0])?;
/// let edges = grid.edges(Connectivity::Four);
/// assert_eq!(edges.len(), 4);
/// assert_eq!(grid.edges(Connectivity::Eight).len(), 6);
/// # Ok::<(), graphseg_core::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    width: usize,
    height: usize,
    heights: Vec<f64>,
}

impl ElevationGrid {
    /// Creates a grid of `width` columns and `height` rows.
    ///
    /// # Errors
    /// Returns [`GridError`] when a dimension is zero, the cell count
    /// overflows, `heights.len() != width * height`, or a height is not
    /// finite.
    pub fn new(width: usize, height: usize, heights: Vec<f64>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(GridError::CapacityOverflow { width, height })?;
        if heights.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                found: heights.len(),
            });
        }
        if let Some(index) = heights.iter().position(|h| !h.is_finite()) {
            return Err(GridError::NonFiniteHeight { index });
        }
        Ok(Self {
            width,
            height,
            heights,
        })
    }

    /// Creates a grid from rows of equal length.
    ///
    /// # Errors
    /// Returns [`GridError::RaggedRow`] when rows differ in length, plus the
    /// errors of [`ElevationGrid::new`].
    ///
    /// # Examples
    /// ```
    /// use graphseg_core::{ElevationGrid, GridError};
    ///
    /// let err = ElevationGrid::from_rows(vec![vec![0.0, 1.0], vec![2.0]]).unwrap_err();
    /// assert_eq!(err, GridError::RaggedRow { row: 1, expected: 2, found: 1 });
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }
        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    /// Returns the number of columns.
    #[must_use]
    #[rustfmt::skip]
    pub const fn width(&self) -> usize { self.width }

    /// Returns the number of rows.
    #[must_use]
    #[rustfmt::skip]
    pub const fn height(&self) -> usize { self.height }

    /// Returns the number of cells, which is also the graph's vertex count.
    #[must_use]
    #[rustfmt::skip]
    pub fn cell_count(&self) -> usize { self.heights.len() }

    /// Returns the height of the cell at column `x`, row `y`.
    #[must_use]
    pub fn height_at(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.heights.get(y * self.width + x).copied()
    }

    /// Builds the neighbourhood graph, weighting each edge by the absolute
    /// height difference of its cells.
    #[must_use]
    pub fn edges(&self, connectivity: Connectivity) -> Vec<WeightedEdge> {
        let mut offsets: Vec<(isize, usize)> = vec![(1, 0), (0, 1)];
        if connectivity == Connectivity::Eight {
            offsets.extend([(1, 1), (-1, 1)]);
        }

        let mut edges = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                for &(dx, dy) in &offsets {
                    let Some(nx) = x.checked_add_signed(dx).filter(|&nx| nx < self.width) else {
                        continue;
                    };
                    let ny = y + dy;
                    if ny >= self.height {
                        continue;
                    }
                    edges.push(self.edge((x, y), (nx, ny)));
                }
            }
        }
        edges
    }

    fn edge(&self, (x, y): (usize, usize), (nx, ny): (usize, usize)) -> WeightedEdge {
        let source = y * self.width + x;
        let target = ny * self.width + nx;
        let weight = (self.heights[source] - self.heights[target]).abs();
        WeightedEdge::new(source, target, weight)
    }

    /// Segments the grid with `segmenter`.
    ///
    /// Labels of the returned [`Segmentation`] are indexed row-major.
    ///
    /// # Errors
    /// Propagates [`crate::SegmentError`] from [`Segmenter::segment`]; a valid
    /// grid always yields valid edges.
    ///
    /// # Examples
    /// ```
    /// use graphseg_core::{Connectivity, ElevationGrid, SegmenterBuilder};
    ///
    /// let grid = ElevationGrid::from_rows(vec![
    ///     vec![0.0, 0.0, 9.0],
    ///     vec![0.0, 0.0, 9.0],
    /// ])?;
    /// let segmenter = SegmenterBuilder::new().with_granularity(1.0).build()?;
    /// let segmentation = grid.segment(&segmenter, Connectivity::Four)?;
    /// let labels: Vec<usize> = segmentation.labels().iter().map(|id| id.get()).collect();
    /// assert_eq!(labels, vec![0, 0, 1, 0, 0, 1]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "core.segment_grid",
        err,
        skip(self, segmenter),
        fields(width = self.width, height = self.height),
    )]
    pub fn segment(
        &self,
        segmenter: &Segmenter,
        connectivity: Connectivity,
    ) -> SegmentResult<Segmentation> {
        segmenter.segment(self.cell_count(), &self.edges(connectivity))
    }
}
