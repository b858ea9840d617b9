//! Builder utilities for configuring [`Segmenter`] instances.
//!
//! Collects the granularity and minimum component size and validates them
//! before a [`Segmenter`] is constructed.

use crate::{Result, error::SegmentError, segment::Segmenter};

/// Default granularity used when none is configured.
pub const DEFAULT_GRANULARITY: f64 = 1.0;

/// Configures and constructs [`Segmenter`] instances.
///
/// # Examples
/// ```
/// use graphseg_core::SegmenterBuilder;
///
/// let segmenter = SegmenterBuilder::new()
///     .with_granularity(300.0)
///     .with_min_component_size(20)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(segmenter.granularity(), 300.0);
/// assert_eq!(segmenter.min_component_size(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct SegmenterBuilder {
    granularity: f64,
    min_component_size: usize,
}

impl Default for SegmenterBuilder {
    fn default() -> Self {
        Self {
            granularity: DEFAULT_GRANULARITY,
            min_component_size: 0,
        }
    }
}

impl SegmenterBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use graphseg_core::SegmenterBuilder;
    ///
    /// let builder = SegmenterBuilder::new();
    /// assert_eq!(builder.granularity(), 1.0);
    /// assert_eq!(builder.min_component_size(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the granularity `k` fed to [`crate::Component::compare`].
    ///
    /// Larger values favour larger segments.
    #[must_use]
    pub const fn with_granularity(mut self, granularity: f64) -> Self {
        self.granularity = granularity;
        self
    }

    /// Returns the configured granularity.
    #[must_use]
    pub const fn granularity(&self) -> f64 {
        self.granularity
    }

    /// Sets the size below which segments are merged unconditionally in a
    /// second pass. `0` and `1` disable the pass.
    #[must_use]
    pub const fn with_min_component_size(mut self, size: usize) -> Self {
        self.min_component_size = size;
        self
    }

    /// Returns the configured minimum component size.
    #[must_use]
    pub const fn min_component_size(&self) -> usize {
        self.min_component_size
    }

    /// Validates the configuration and constructs a [`Segmenter`].
    ///
    /// # Errors
    /// Returns [`SegmentError::InvalidGranularity`] when the granularity is
    /// negative, NaN or infinite.
    ///
    /// # Examples
    /// ```
    /// use graphseg_core::{SegmentError, SegmenterBuilder};
    ///
    /// let err = SegmenterBuilder::new().with_granularity(-1.0).build().unwrap_err();
    /// assert!(matches!(err, SegmentError::InvalidGranularity { .. }));
    /// ```
    pub fn build(self) -> Result<Segmenter> {
        if !self.granularity.is_finite() || self.granularity < 0.0 {
            return Err(SegmentError::InvalidGranularity {
                got: self.granularity,
            });
        }
        Ok(Segmenter::new(self.granularity, self.min_component_size))
    }
}
