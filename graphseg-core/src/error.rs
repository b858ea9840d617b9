//! Error types for the graphseg core library.
//!
//! Defines the segmentation error enum exposed by the public API, the macro
//! that attaches stable machine-readable codes to every error enum in the
//! crate, and a convenient result alias.

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Error type produced when configuring or running a [`crate::Segmenter`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SegmentError {
    /// The granularity `k` must be finite and non-negative.
    #[error("granularity must be finite and non-negative (got {got})")]
    InvalidGranularity {
        /// The rejected granularity.
        got: f64,
    },
    /// Segmentation was requested for a graph without vertices.
    #[error("cannot segment a graph with no vertices")]
    EmptyGraph,
    /// An edge referenced a vertex that is not present in the graph.
    #[error("edge references vertex {vertex}, but vertex_count is {vertex_count}")]
    InvalidVertex {
        /// The out-of-range vertex id.
        vertex: usize,
        /// The number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge carried a NaN or infinite weight.
    #[error("edge ({left}, {right}) has non-finite weight")]
    NonFiniteWeight {
        /// The first endpoint as provided.
        left: usize,
        /// The second endpoint as provided.
        right: usize,
    },
    /// Per-vertex bookkeeping for `vertex_count` vertices could not be
    /// allocated.
    #[error("cannot allocate bookkeeping for {vertex_count} vertices")]
    CapacityOverflow {
        /// The requested number of vertices.
        vertex_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SegmentError`] variants.
    enum SegmentErrorCode for SegmentError {
        /// The granularity `k` must be finite and non-negative.
        InvalidGranularity => InvalidGranularity { .. } => "SEGMENT_INVALID_GRANULARITY",
        /// Segmentation was requested for a graph without vertices.
        EmptyGraph => EmptyGraph => "SEGMENT_EMPTY_GRAPH",
        /// An edge referenced a vertex that is not present in the graph.
        InvalidVertex => InvalidVertex { .. } => "SEGMENT_INVALID_VERTEX",
        /// An edge carried a NaN or infinite weight.
        NonFiniteWeight => NonFiniteWeight { .. } => "SEGMENT_NON_FINITE_WEIGHT",
        /// Per-vertex bookkeeping could not be allocated.
        CapacityOverflow => CapacityOverflow { .. } => "SEGMENT_CAPACITY_OVERFLOW",
    }
}

/// Convenient alias for results returned by the segmentation API.
pub type Result<T> = core::result::Result<T, SegmentError>;
