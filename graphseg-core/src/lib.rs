//! Graph-based segmentation core library.
//!
//! The centre of the crate is [`Component`], the per-cluster record of a
//! Felzenszwalb–Huttenlocher segmentation: a group of vertices plus the
//! internal difference that decides whether it may absorb a neighbour.
//! [`Segmenter`] drives components over a weighted edge list,
//! [`ElevationGrid`] turns height fields into such edge lists, and the
//! [`codec`] module persists components in a length-prefixed binary format.
//!
//! Enable the `serde` feature to derive `Serialize`/`Deserialize` for
//! [`Component`], [`SegmentId`] and [`Segmentation`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
pub mod codec;
mod component;
mod error;
mod grid;
mod result;
mod segment;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{DEFAULT_GRANULARITY, SegmenterBuilder},
    codec::{
        CodecError, CodecErrorCode, Decode, Encode, ensure_exhausted, read_components,
        write_components,
    },
    component::{Component, Property},
    error::{Result, SegmentError, SegmentErrorCode},
    grid::{Connectivity, ElevationGrid, GridError, GridErrorCode},
    result::{SegmentId, Segmentation},
    segment::{Segmenter, WeightedEdge, merge_if_within},
};
