//! Validated flowpipe construction.
//!
//! [`Flowpipe::from_reach_sets`] trusts the producer to supply a
//! chronological, gap-free sequence. `FlowpipeBuilder` is the checked path:
//! it validates chronology, time coverage (within an absolute tolerance for
//! floating time grids), and dimension consistency before handing out the
//! flowpipe.

use crate::error::{FlowpipeError, Result};
use crate::extension::{Extension, ExtensionValue};
use crate::flowpipe::Flowpipe;
use crate::reach_set::ReachSet;
use flowpipe_types::SupportSet;

/// Absolute tolerance for touching time spans on a floating time grid.
pub const DEFAULT_GAP_TOLERANCE: f64 = 1e-8;

/// Builder for validated flowpipe construction.
///
/// # Examples
///
/// ```
/// use flowpipe::{FlowpipeBuilder, ReachSet};
/// use flowpipe::{Hyperbox, TimeInterval};
///
/// let fp = FlowpipeBuilder::new()
///     .push(ReachSet::new(
///         Hyperbox::new(vec![0.0], vec![1.0]),
///         TimeInterval::new(0.0, 0.1),
///     ))
///     .push(ReachSet::new(
///         Hyperbox::new(vec![0.5], vec![1.5]),
///         TimeInterval::new(0.1, 0.2),
///     ))
///     .extension_entry("algorithm", "box")
///     .build()
///     .unwrap();
///
/// assert_eq!(fp.extension().get_str("algorithm"), Some("box"));
/// ```
#[derive(Debug)]
pub struct FlowpipeBuilder<S> {
    elements: Vec<ReachSet<S>>,
    extension: Extension,
    gap_tolerance: f64,
}

impl<S> FlowpipeBuilder<S> {
    /// Create an empty builder with the default gap tolerance.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            extension: Extension::new(),
            gap_tolerance: DEFAULT_GAP_TOLERANCE,
        }
    }

    /// Set the absolute tolerance under which consecutive spans count as
    /// touching.
    pub fn gap_tolerance(mut self, tolerance: f64) -> Self {
        assert!(
            tolerance.is_finite() && tolerance >= 0.0,
            "Gap tolerance must be finite and non-negative"
        );
        self.gap_tolerance = tolerance;
        self
    }

    /// Attach a producer metadata entry.
    pub fn extension_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<ExtensionValue>,
    ) -> Self {
        self.extension.insert(key, value);
        self
    }

    /// Append one reach set.
    pub fn push(mut self, reach_set: ReachSet<S>) -> Self {
        self.elements.push(reach_set);
        self
    }

    /// Append a sequence of reach sets.
    pub fn extend(mut self, reach_sets: impl IntoIterator<Item = ReachSet<S>>) -> Self {
        self.elements.extend(reach_sets);
        self
    }
}

impl<S: SupportSet> FlowpipeBuilder<S> {
    /// Validate and build the flowpipe.
    ///
    /// Checks, in order: chronology (start times non-decreasing), coverage
    /// (consecutive spans touch within the gap tolerance), and dimension
    /// consistency. Overlap beyond a shared boundary is legal and logged at
    /// `warn` level. An empty builder yields an empty flowpipe.
    pub fn build(self) -> Result<Flowpipe<S>> {
        for (index, window) in self.elements.windows(2).enumerate() {
            let prev = window[0].time_span();
            let next = window[1].time_span();
            if next.lo() < prev.lo() {
                return Err(FlowpipeError::NotChronological { index: index + 1 });
            }
            let gap = next.lo() - prev.hi();
            if gap > self.gap_tolerance {
                return Err(FlowpipeError::CoverageGap { index, gap });
            }
            if gap < -self.gap_tolerance {
                log::warn!(
                    "reach sets at positions {index} and {} overlap beyond a shared boundary",
                    index + 1
                );
            }
        }
        if let Some(first) = self.elements.first() {
            let expected = first.dimension();
            for rs in &self.elements[1..] {
                let found = rs.dimension();
                if found != expected {
                    return Err(FlowpipeError::DimensionMismatch { expected, found });
                }
            }
            log::debug!(
                "built flowpipe with {} reach sets over [{}, {}]",
                self.elements.len(),
                first.time_span().lo(),
                self.elements[self.elements.len() - 1].time_span().hi()
            );
        }
        Ok(Flowpipe::with_extension(self.elements, self.extension))
    }
}

impl<S> Default for FlowpipeBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowpipe_types::{Hyperbox, TimeInterval};

    fn rs(lo: f64, hi: f64) -> ReachSet<Hyperbox> {
        ReachSet::new(Hyperbox::new(vec![0.0], vec![1.0]), TimeInterval::new(lo, hi))
    }

    #[test]
    fn test_builder_empty() {
        let fp = FlowpipeBuilder::<Hyperbox>::new().build().unwrap();
        assert!(fp.elements().is_empty());
    }

    #[test]
    fn test_builder_accepts_touching_spans() {
        let fp = FlowpipeBuilder::new()
            .push(rs(0.0, 1.0))
            .push(rs(1.0, 2.0))
            .push(rs(2.0, 3.0))
            .build()
            .unwrap();
        assert_eq!(fp.elements().len(), 3);
    }

    #[test]
    fn test_builder_accepts_gap_within_tolerance() {
        let fp = FlowpipeBuilder::new()
            .push(rs(0.0, 1.0))
            .push(rs(1.0 + 1e-12, 2.0))
            .build()
            .unwrap();
        assert_eq!(fp.elements().len(), 2);
    }

    #[test]
    fn test_builder_rejects_gap() {
        let err = FlowpipeBuilder::new()
            .push(rs(0.0, 1.0))
            .push(rs(1.5, 2.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, FlowpipeError::CoverageGap { index: 0, .. }));
    }

    #[test]
    fn test_builder_rejects_out_of_order() {
        let err = FlowpipeBuilder::new()
            .push(rs(1.0, 2.0))
            .push(rs(0.0, 1.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, FlowpipeError::NotChronological { index: 1 }));
    }

    #[test]
    fn test_builder_accepts_overlap_with_warning() {
        let fp = FlowpipeBuilder::new()
            .push(rs(0.0, 1.0))
            .push(rs(0.5, 2.0))
            .build()
            .unwrap();
        assert_eq!(fp.elements().len(), 2);
    }

    #[test]
    fn test_builder_rejects_dimension_mismatch() {
        let err = FlowpipeBuilder::new()
            .push(rs(0.0, 1.0))
            .push(ReachSet::new(
                Hyperbox::new(vec![0.0, 0.0], vec![1.0, 1.0]),
                TimeInterval::new(1.0, 2.0),
            ))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            FlowpipeError::DimensionMismatch {
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_builder_custom_tolerance() {
        let fp = FlowpipeBuilder::new()
            .gap_tolerance(0.1)
            .push(rs(0.0, 1.0))
            .push(rs(1.05, 2.0))
            .build()
            .unwrap();
        assert_eq!(fp.elements().len(), 2);
    }

    #[test]
    #[should_panic(expected = "Gap tolerance must be finite and non-negative")]
    fn test_builder_invalid_tolerance() {
        FlowpipeBuilder::<Hyperbox>::new().gap_tolerance(-1.0);
    }

    #[test]
    fn test_builder_extension_entries() {
        let fp = FlowpipeBuilder::new()
            .push(rs(0.0, 1.0))
            .extension_entry("algorithm", "box")
            .extension_entry("steps", 1_i64)
            .build()
            .unwrap();
        assert_eq!(fp.extension().get_str("algorithm"), Some("box"));
        assert_eq!(fp.extension().get_int("steps"), Some(1));
    }

    #[test]
    fn test_builder_extend() {
        let fp = FlowpipeBuilder::new()
            .extend((0..5).map(|i| rs(i as f64, i as f64 + 1.0)))
            .build()
            .unwrap();
        assert_eq!(fp.elements().len(), 5);
    }
}
