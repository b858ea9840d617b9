//! Component bookkeeping for the segmentation loop.
//!
//! Every vertex starts in its own slot. A union drains the smaller
//! component into the larger one and repoints the owner of each transferred
//! vertex, so a lookup is a single index and every vertex moves at most
//! `log2(n)` times.

use crate::{component::Component, error::SegmentError};

#[derive(Clone, Debug)]
pub(super) struct ComponentForest {
    slots: Vec<Component<usize, f64>>,
    owner: Vec<usize>,
    live: usize,
}

impl ComponentForest {
    /// Creates one singleton slot per vertex.
    ///
    /// Both tables are reserved up front so an impossible `vertex_count`
    /// surfaces as an error instead of aborting the process.
    pub(super) fn new(vertex_count: usize) -> Result<Self, SegmentError> {
        let overflow = |_| SegmentError::CapacityOverflow { vertex_count };
        let mut owner = Vec::new();
        owner.try_reserve_exact(vertex_count).map_err(overflow)?;
        let mut slots = Vec::new();
        slots.try_reserve_exact(vertex_count).map_err(overflow)?;

        owner.extend(0..vertex_count);
        slots.extend((0..vertex_count).map(Component::singleton));
        Ok(Self {
            slots,
            owner,
            live: vertex_count,
        })
    }

    pub(super) fn owner(&self, vertex: usize) -> usize {
        self.owner[vertex]
    }

    pub(super) fn size(&self, slot: usize) -> usize {
        self.slots[slot].num_vertices()
    }

    pub(super) fn live(&self) -> usize {
        self.live
    }

    pub(super) fn threshold(&self, left: usize, right: usize, granularity: f64) -> f64 {
        self.slots[left].compare(&self.slots[right], granularity)
    }

    /// Merges the components in `left` and `right`, returning the survivor.
    ///
    /// The larger component survives; on equal sizes the lower slot does.
    /// The survivor keeps its property, callers update it afterwards.
    pub(super) fn union(&mut self, left: usize, right: usize) -> usize {
        debug_assert_ne!(left, right, "a component cannot merge into itself");
        let (survivor, retired) = if self.size(left) > self.size(right)
            || (self.size(left) == self.size(right) && left < right)
        {
            (left, right)
        } else {
            (right, left)
        };

        let mut drained = std::mem::take(&mut self.slots[retired]);
        for &vertex in &drained {
            self.owner[vertex] = survivor;
        }
        self.slots[survivor].merge(&mut drained);
        self.slots[retired] = drained;
        self.live -= 1;
        survivor
    }

    pub(super) fn set_property(&mut self, slot: usize, property: f64) {
        self.slots[slot].set_property(property);
    }

    /// Consumes the forest, returning per-vertex owners and the slots.
    pub(super) fn into_parts(self) -> (Vec<usize>, Vec<Component<usize, f64>>) {
        (self.owner, self.slots)
    }
}
