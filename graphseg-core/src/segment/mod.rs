//! Graph-based segmentation driven by [`Component::compare`].
//!
//! This module implements the Felzenszwalb–Huttenlocher loop on top of
//! [`Component`]:
//!
//! - Edges are validated, canonicalised and sorted by non-decreasing weight
//!   with deterministic tie-breaks (endpoints, then input position).
//! - Every vertex starts as a singleton component with property zero.
//! - An edge joining two components merges them when its weight does not
//!   exceed their merge threshold; the survivor's property becomes the edge
//!   weight, which is the largest weight inside its minimum spanning tree.
//! - An optional second pass merges any remaining component smaller than the
//!   configured minimum size into its cheapest neighbour.
//!
//! The loop is sequential and deterministic for a fixed edge list.

mod edge;
mod forest;

use tracing::{debug, info, instrument, trace};

use crate::{Result, component::Component, error::SegmentError, result::Segmentation};

pub use self::edge::WeightedEdge;

use self::{edge::OrderedEdge, forest::ComponentForest};

/// Runs graph-based segmentation with a fixed configuration.
///
/// Construct through [`crate::SegmenterBuilder`].
///
/// # Examples
/// ```
/// use graphseg_core::{SegmenterBuilder, WeightedEdge};
///
/// let edges = [
///     WeightedEdge::new(0, 1, 0.1),
///     WeightedEdge::new(1, 2, 9.0),
///     WeightedEdge::new(2, 3, 0.2),
/// ];
/// let segmentation = SegmenterBuilder::new()
///     .with_granularity(1.0)
///     .build()?
///     .segment(4, &edges)?;
/// let labels: Vec<usize> = segmentation.labels().iter().map(|id| id.get()).collect();
/// assert_eq!(labels, vec![0, 0, 1, 1]);
/// # Ok::<(), graphseg_core::SegmentError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmenter {
    granularity: f64,
    min_component_size: usize,
}

impl Segmenter {
    pub(crate) const fn new(granularity: f64, min_component_size: usize) -> Self {
        Self {
            granularity,
            min_component_size,
        }
    }

    /// Returns the granularity `k`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn granularity(&self) -> f64 { self.granularity }

    /// Returns the minimum component size enforced by the second pass.
    #[must_use]
    #[rustfmt::skip]
    pub const fn min_component_size(&self) -> usize { self.min_component_size }

    /// Partitions `vertex_count` vertices using `edges`.
    ///
    /// Edges are undirected; self-edges are ignored and parallel edges are
    /// allowed.
    ///
    /// # Errors
    /// Returns [`SegmentError::EmptyGraph`] when `vertex_count == 0`,
    /// [`SegmentError::InvalidVertex`] when an edge references a vertex
    /// `>= vertex_count`, [`SegmentError::NonFiniteWeight`] when a weight
    /// is NaN or infinite, and [`SegmentError::CapacityOverflow`] when the
    /// per-vertex tables cannot be allocated.
    #[instrument(
        name = "core.segment",
        err,
        skip(self, edges),
        fields(
            edges = edges.len(),
            granularity = self.granularity,
            min_component_size = self.min_component_size,
        ),
    )]
    pub fn segment(&self, vertex_count: usize, edges: &[WeightedEdge]) -> Result<Segmentation> {
        if vertex_count == 0 {
            return Err(SegmentError::EmptyGraph);
        }

        let ordered = sorted_edges(vertex_count, edges)?;
        let mut forest = ComponentForest::new(vertex_count)?;

        let merged = self.merge_by_threshold(&mut forest, &ordered);
        debug!(merged, components = forest.live(), "threshold pass completed");

        if self.min_component_size > 1 {
            let absorbed = self.absorb_small(&mut forest, &ordered);
            debug!(absorbed, components = forest.live(), "minimum size pass completed");
        }

        let (owner, slots) = forest.into_parts();
        let segmentation = Segmentation::from_owners(&owner, slots);
        info!(segments = segmentation.segment_count(), "segmentation completed");
        Ok(segmentation)
    }

    fn merge_by_threshold(&self, forest: &mut ComponentForest, edges: &[OrderedEdge]) -> usize {
        let mut merged = 0;
        for edge in edges {
            let left = forest.owner(edge.source);
            let right = forest.owner(edge.target);
            if left == right {
                continue;
            }

            let threshold = forest.threshold(left, right, self.granularity);
            if edge.weight <= threshold {
                let survivor = forest.union(left, right);
                forest.set_property(survivor, edge.weight);
                merged += 1;
                trace!(
                    source = edge.source,
                    target = edge.target,
                    weight = edge.weight,
                    threshold,
                    "merged components"
                );
            }
        }
        merged
    }

    fn absorb_small(&self, forest: &mut ComponentForest, edges: &[OrderedEdge]) -> usize {
        let mut absorbed = 0;
        for edge in edges {
            let left = forest.owner(edge.source);
            let right = forest.owner(edge.target);
            if left == right {
                continue;
            }
            if forest.size(left) < self.min_component_size
                || forest.size(right) < self.min_component_size
            {
                forest.union(left, right);
                absorbed += 1;
            }
        }
        absorbed
    }
}

fn sorted_edges(vertex_count: usize, edges: &[WeightedEdge]) -> Result<Vec<OrderedEdge>> {
    let mut ordered = Vec::with_capacity(edges.len());
    for (sequence, edge) in edges.iter().enumerate() {
        if let Some(valid) = OrderedEdge::validate(edge, sequence, vertex_count)? {
            ordered.push(valid);
        }
    }
    ordered.sort_unstable();
    Ok(ordered)
}

/// Convenience wrapper used by callers that keep their own components.
///
/// Applies one step of the segmentation rule to a pair of components owned
/// by the caller: when `weight <= left.compare(right, k)` the right component
/// is drained into the left one, whose property becomes `weight`. Returns
/// whether the merge happened.
///
/// # Examples
/// ```
/// use graphseg_core::{Component, merge_if_within};
///
/// let mut left = Component::<u32, f64>::singleton(1);
/// let mut right = Component::singleton(2);
/// assert!(!merge_if_within(&mut left, &mut right, 2.0, 1.0));
/// assert!(merge_if_within(&mut left, &mut right, 2.0, 10.0));
/// assert_eq!(left.num_vertices(), 2);
/// assert_eq!(*left.property(), 2.0);
/// ```
pub fn merge_if_within<V, P>(
    left: &mut Component<V, P>,
    right: &mut Component<V, P>,
    weight: P,
    k: P,
) -> bool
where
    P: crate::component::Property,
{
    if weight <= left.compare(right, k) {
        left.merge(right);
        left.set_property(weight);
        true
    } else {
        false
    }
}
