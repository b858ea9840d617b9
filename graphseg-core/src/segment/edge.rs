//! Weighted undirected edges fed to the segmenter.

use std::cmp::Ordering;

use crate::error::SegmentError;

/// An undirected edge between two vertex ids with a dissimilarity weight.
///
/// # Examples
/// ```
/// use graphseg_core::WeightedEdge;
///
/// let edge = WeightedEdge::new(4, 1, 0.5);
/// assert_eq!((edge.source(), edge.target()), (4, 1));
/// assert_eq!(edge.canonicalise().source(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedEdge {
    source: usize,
    target: usize,
    weight: f64,
}

impl WeightedEdge {
    /// Creates a new edge.
    #[must_use]
    pub const fn new(source: usize, target: usize, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the first endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the second endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }

    /// Returns the edge with `source <= target`.
    #[must_use]
    pub const fn canonicalise(self) -> Self {
        if self.source <= self.target {
            self
        } else {
            Self {
                source: self.target,
                target: self.source,
                weight: self.weight,
            }
        }
    }
}

/// A validated, canonical edge carrying its input position for tie-breaks.
#[derive(Clone, Copy, Debug)]
pub(super) struct OrderedEdge {
    pub(super) source: usize,
    pub(super) target: usize,
    pub(super) weight: f64,
    sequence: usize,
}

impl OrderedEdge {
    /// Validates `edge` against `vertex_count`; self-edges yield `None`.
    pub(super) fn validate(
        edge: &WeightedEdge,
        sequence: usize,
        vertex_count: usize,
    ) -> Result<Option<Self>, SegmentError> {
        for vertex in [edge.source, edge.target] {
            if vertex >= vertex_count {
                return Err(SegmentError::InvalidVertex {
                    vertex,
                    vertex_count,
                });
            }
        }

        if !edge.weight.is_finite() {
            return Err(SegmentError::NonFiniteWeight {
                left: edge.source,
                right: edge.target,
            });
        }

        if edge.source == edge.target {
            return Ok(None);
        }

        let canonical = edge.canonicalise();
        Ok(Some(Self {
            source: canonical.source,
            target: canonical.target,
            weight: canonical.weight,
            sequence,
        }))
    }
}

impl PartialEq for OrderedEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedEdge {}

impl Ord for OrderedEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for OrderedEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
