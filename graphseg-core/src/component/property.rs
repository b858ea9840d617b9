//! Scalar aggregates carried by a [`super::Component`].
//!
//! A property summarises the internal difference of a component. It is
//! meaningful only relative to the merge threshold computed by
//! [`super::Component::compare`], so the trait exposes exactly the arithmetic
//! that threshold needs and nothing more.

use std::fmt;

/// Numeric aggregate usable as a component property.
///
/// Implemented for `f32` and `f64`. No validation is performed on values:
/// negative and non-finite properties are accepted and flow through the
/// threshold arithmetic unchanged.
///
/// # Examples
/// ```
/// use graphseg_core::Property;
///
/// assert_eq!(<f64 as Property>::ZERO, 0.0);
/// assert_eq!(f64::size_penalty(10.0, 4), 2.5);
/// assert_eq!(f64::size_penalty(1.0, 0), f64::INFINITY);
/// ```
pub trait Property: Copy + PartialOrd + fmt::Debug {
    /// Property of a freshly created component.
    const ZERO: Self;

    /// Returns `k / size`.
    ///
    /// An empty component yields positive infinity so it never lowers a
    /// threshold it takes part in.
    fn size_penalty(k: Self, size: usize) -> Self;

    /// Returns `self + other`.
    #[must_use]
    fn plus(self, other: Self) -> Self;

    /// Returns the smaller of `self` and `other`, preferring the non-NaN value.
    #[must_use]
    fn lesser(self, other: Self) -> Self;
}

macro_rules! impl_float_property {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Property for $ty {
                const ZERO: Self = 0.0;

                fn size_penalty(k: Self, size: usize) -> Self {
                    if size == 0 {
                        return <$ty>::INFINITY;
                    }
                    k / size as $ty
                }

                fn plus(self, other: Self) -> Self {
                    self + other
                }

                fn lesser(self, other: Self) -> Self {
                    self.min(other)
                }
            }
        )+
    };
}

impl_float_property!(f32, f64);
