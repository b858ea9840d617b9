//! Connected components used by graph-based segmentation.
//!
//! A [`Component`] is the per-cluster record of a Felzenszwalb–Huttenlocher
//! style segmentation: the vertices currently grouped together plus a scalar
//! "internal difference" that gates further merges. The segmentation loop
//! itself lives outside this type (see [`crate::Segmenter`]); the component
//! only keeps membership and answers [`Component::compare`].
//!
//! Components are plain values. They carry no identity, no locks and no
//! cross-component bookkeeping: uniqueness of vertices across components, and
//! never merging a component into itself, are the caller's responsibility.

mod property;

pub use self::property::Property;

use std::slice;

/// A cluster of graph vertices with an aggregate property.
///
/// `V` is the vertex descriptor (typically an index) and `P` the property
/// type. Members are kept in a contiguous vector; insertion order survives
/// [`Component::insert_vertex`] but callers must not rely on order after
/// [`Component::merge`].
///
/// Any mutating call invalidates outstanding iterators, which the borrow
/// checker enforces.
///
/// # Examples
/// ```
/// use graphseg_core::Component;
///
/// let mut left = Component::<u32, f64>::singleton(1);
/// let mut right = Component::singleton(2);
/// assert_eq!(left.compare(&right, 10.0), 10.0);
///
/// left.merge(&mut right);
/// left.set_property(2.0);
/// assert_eq!(left.num_vertices(), 2);
/// assert!(right.is_empty());
/// assert_eq!(left.compare(&Component::singleton(3), 10.0), 7.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component<V, P = f64> {
    members: Vec<V>,
    property: P,
}

impl<V, P: Property> Default for Component<V, P> {
    fn default() -> Self {
        Self::with_property(P::ZERO)
    }
}

impl<V, P: Property> Component<V, P> {
    /// Creates an empty placeholder component with a zero property.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a component holding exactly `vertex` with a zero property.
    #[must_use]
    pub fn singleton(vertex: V) -> Self {
        Self::singleton_with_property(vertex, P::ZERO)
    }

    /// Returns the merge threshold between `self` and `other`.
    ///
    /// The threshold is `min(p_a + k / |a|, p_b + k / |b|)`, the minimum
    /// internal difference rule. `k` is the caller's granularity: larger
    /// values favour larger components. An empty side contributes no bound.
    ///
    /// # Examples
    /// ```
    /// use graphseg_core::Component;
    ///
    /// let mut big = Component::<u32, f64>::singleton(1);
    /// big.insert_vertex(2);
    /// big.set_property(2.0);
    /// let small = Component::singleton(3);
    /// assert_eq!(big.compare(&small, 10.0), 7.0);
    /// assert_eq!(small.compare(&big, 10.0), 7.0);
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self, k: P) -> P {
        self.threshold(k).lesser(other.threshold(k))
    }

    /// Returns `property + k / size` for this component alone.
    #[must_use]
    pub fn threshold(&self, k: P) -> P {
        self.property
            .plus(P::size_penalty(k, self.members.len()))
    }
}

impl<V, P> Component<V, P> {
    /// Creates an empty component with the given property.
    #[must_use]
    pub const fn with_property(property: P) -> Self {
        Self {
            members: Vec::new(),
            property,
        }
    }

    /// Creates a component holding exactly `vertex` with the given property.
    #[must_use]
    pub fn singleton_with_property(vertex: V, property: P) -> Self {
        Self {
            members: vec![vertex],
            property,
        }
    }

    /// Appends `vertex` to the component.
    ///
    /// Duplicates are kept: inserting a vertex that is already a member grows
    /// the component by one all the same.
    pub fn insert_vertex(&mut self, vertex: V) {
        self.members.push(vertex);
    }

    /// Transfers every vertex of `other` into `self`, leaving `other` empty.
    ///
    /// The vertex storage of `other` is drained rather than copied and no
    /// deduplication takes place. `other`'s property is left as it was; the
    /// surviving property is the caller's decision.
    pub fn merge(&mut self, other: &mut Self) {
        if self.members.is_empty() {
            std::mem::swap(&mut self.members, &mut other.members);
        } else {
            self.members.append(&mut other.members);
        }
    }

    /// Removes every vertex. The property is untouched.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Returns the number of member vertices, duplicates included.
    #[must_use]
    #[rustfmt::skip]
    pub fn num_vertices(&self) -> usize { self.members.len() }

    /// Returns `true` when the component has no members.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    /// Returns the component property.
    #[must_use]
    #[rustfmt::skip]
    pub const fn property(&self) -> &P { &self.property }

    /// Returns a mutable reference to the component property.
    #[rustfmt::skip]
    pub const fn property_mut(&mut self) -> &mut P { &mut self.property }

    /// Replaces the component property. Any value is accepted.
    pub fn set_property(&mut self, property: P) {
        self.property = property;
    }

    /// Returns the members as a slice.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> &[V] { &self.members }

    /// Iterates over the members.
    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.members.iter()
    }

    /// Consumes the component and returns its members.
    #[must_use]
    pub fn into_vertices(self) -> Vec<V> {
        self.members
    }

    pub(crate) fn from_parts(members: Vec<V>, property: P) -> Self {
        Self { members, property }
    }
}

impl<V: PartialEq, P> Component<V, P> {
    /// Removes the first occurrence of `vertex`.
    ///
    /// Returns `false` and leaves the component unchanged when `vertex` is
    /// not a member.
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        match self.members.iter().position(|member| member == vertex) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` when `vertex` is a member.
    #[must_use]
    pub fn contains(&self, vertex: &V) -> bool {
        self.members.contains(vertex)
    }
}

impl<V, P> Extend<V> for Component<V, P> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<'a, V, P> IntoIterator for &'a Component<V, P> {
    type Item = &'a V;
    type IntoIter = slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, P> IntoIterator for Component<V, P> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

#[cfg(test)]
mod tests;
