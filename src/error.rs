//! Error types for flowpipe queries and construction.

use thiserror::Error;

/// Result type alias using [`FlowpipeError`].
pub type Result<T> = std::result::Result<T, FlowpipeError>;

/// Errors surfaced by the flowpipe query and construction layer.
///
/// Every failure here is local and synchronous: there are no transient
/// failure modes in this layer, nothing is retried, and nothing is recovered
/// internally. Callers validate inputs; out-of-range inputs are surfaced,
/// never clamped.
#[derive(Debug, Error)]
pub enum FlowpipeError {
    /// A time-point or interval query fell outside the covered time span.
    #[error("time {time} outside the covered span [{start}, {end}]")]
    TimeOutOfBounds {
        /// The queried time value.
        time: f64,
        /// Start of the valid span.
        start: f64,
        /// End of the valid span.
        end: f64,
    },

    /// An operation that is undefined (not merely expensive) on an empty
    /// flowpipe, such as requesting its dimension or time span.
    #[error("operation undefined on an empty flowpipe")]
    EmptyFlowpipe,

    /// Direct positional access outside the stored range.
    #[error("index {index} out of bounds for flowpipe of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A flowpipe is a sequence of reach sets, not a single set.
    #[error("a flowpipe holds a sequence of reach sets; use get(index) to retrieve one")]
    NoSingleSet,

    /// A projection variable exceeds the flowpipe's dimension.
    #[error("variable index {var} out of range for dimension {dim}")]
    VariableOutOfRange { var: usize, dim: usize },

    /// Reach sets within one flowpipe disagree on dimension.
    #[error("reach sets have mismatched dimensions (expected {expected}, found {found})")]
    DimensionMismatch { expected: usize, found: usize },

    /// The time axis was requested more than once in a projection.
    #[error("the time axis may be requested at most once per projection")]
    DuplicateTimeVariable,

    /// Reach sets were supplied out of chronological order.
    #[error("reach set at position {index} starts before its predecessor")]
    NotChronological { index: usize },

    /// Consecutive reach sets leave part of the time horizon uncovered.
    #[error("gap of {gap} in time coverage after position {index}")]
    CoverageGap { index: usize, gap: f64 },

    /// Extension metadata could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}
