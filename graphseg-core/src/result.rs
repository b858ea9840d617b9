//! Result types for segmentation runs.
//!
//! A [`Segmentation`] pairs a contiguous label per vertex with the surviving
//! components, so callers can either colour vertices by label or inspect each
//! segment's members and internal difference.

use crate::component::Component;

/// Identifier assigned to a segment.
///
/// Identifiers are contiguous, starting at zero, in order of the lowest
/// vertex each segment contains.
///
/// # Examples
/// ```
/// use graphseg_core::SegmentId;
///
/// let id = SegmentId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentId(usize);

impl SegmentId {
    /// Creates a new segment identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

/// The partition of a graph's vertices produced by [`crate::Segmenter`].
///
/// # Examples
/// ```
/// use graphseg_core::{SegmenterBuilder, WeightedEdge};
///
/// let segmenter = SegmenterBuilder::new().with_granularity(10.0).build()?;
/// let segmentation = segmenter.segment(
///     3,
///     &[WeightedEdge::new(0, 1, 2.0), WeightedEdge::new(1, 2, 5.0)],
/// )?;
/// assert_eq!(segmentation.segment_count(), 1);
/// assert_eq!(segmentation.segments()[0].vertices(), &[0, 1, 2]);
/// assert_eq!(*segmentation.segments()[0].property(), 5.0);
/// # Ok::<(), graphseg_core::SegmentError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segmentation {
    labels: Vec<SegmentId>,
    segments: Vec<Component<usize, f64>>,
}

impl Segmentation {
    /// Builds the partition from per-vertex owner slots and the slot table.
    ///
    /// Retired (empty) slots are dropped and members are sorted ascending.
    pub(crate) fn from_owners(owner: &[usize], mut slots: Vec<Component<usize, f64>>) -> Self {
        let mut slot_labels: Vec<Option<SegmentId>> = vec![None; slots.len()];
        let mut order = Vec::new();
        let mut labels = Vec::with_capacity(owner.len());

        for &slot in owner {
            let label = *slot_labels[slot].get_or_insert_with(|| {
                order.push(slot);
                SegmentId::new(order.len() - 1)
            });
            labels.push(label);
        }

        let segments = order
            .into_iter()
            .map(|slot| {
                let component = std::mem::take(&mut slots[slot]);
                let property = *component.property();
                let mut members = component.into_vertices();
                members.sort_unstable();
                Component::from_parts(members, property)
            })
            .collect();

        Self { labels, segments }
    }

    /// Returns the segment label of every vertex, indexed by vertex id.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &[SegmentId] { &self.labels }

    /// Returns the label of `vertex`, or `None` when it is out of range.
    #[must_use]
    pub fn label_of(&self, vertex: usize) -> Option<SegmentId> {
        self.labels.get(vertex).copied()
    }

    /// Returns the number of segments.
    #[must_use]
    #[rustfmt::skip]
    pub fn segment_count(&self) -> usize { self.segments.len() }

    /// Returns the segments ordered by [`SegmentId`].
    #[must_use]
    #[rustfmt::skip]
    pub fn segments(&self) -> &[Component<usize, f64>] { &self.segments }

    /// Returns the segment with identifier `id`.
    #[must_use]
    pub fn segment(&self, id: SegmentId) -> Option<&Component<usize, f64>> {
        self.segments.get(id.get())
    }

    /// Consumes the result, returning the segments ordered by [`SegmentId`].
    #[must_use]
    pub fn into_segments(self) -> Vec<Component<usize, f64>> {
        self.segments
    }
}
