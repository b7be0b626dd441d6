use flowpipe_types::{SupportSet, TimeInterval};
use serde::{Deserialize, Serialize};

/// A geometric set paired with the time span over which it bounds the
/// reachable states.
///
/// Reach sets are the atomic elements of a flowpipe. They are immutable
/// once constructed and owned exclusively by the flowpipe that holds them.
/// The optional location tag records the discrete mode that produced the
/// set in hybrid-system runs.
///
/// # Examples
///
/// ```
/// use flowpipe::ReachSet;
/// use flowpipe::{Hyperbox, TimeInterval};
///
/// let rs = ReachSet::new(
///     Hyperbox::new(vec![0.0], vec![1.0]),
///     TimeInterval::new(0.0, 0.1),
/// );
/// assert_eq!(rs.time_span().hi(), 0.1);
/// assert_eq!(rs.location(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachSet<S> {
    set: S,
    span: TimeInterval,
    location: Option<usize>,
}

impl<S> ReachSet<S> {
    /// Create a reach set from a set and its time span.
    pub fn new(set: S, span: TimeInterval) -> Self {
        Self {
            set,
            span,
            location: None,
        }
    }

    /// Create a reach set tagged with the discrete location that produced it.
    pub fn with_location(set: S, span: TimeInterval, location: usize) -> Self {
        Self {
            set,
            span,
            location: Some(location),
        }
    }

    /// Borrow the geometric set.
    pub fn set(&self) -> &S {
        &self.set
    }

    /// Consume the reach set, yielding its geometric set.
    pub fn into_set(self) -> S {
        self.set
    }

    /// The time span during which this set bounds the reachable states.
    pub fn time_span(&self) -> TimeInterval {
        self.span
    }

    /// The discrete location tag, if the producer attached one.
    pub fn location(&self) -> Option<usize> {
        self.location
    }

    /// Map the geometric set, keeping span and location.
    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> ReachSet<T> {
        ReachSet {
            set: f(self.set),
            span: self.span,
            location: self.location,
        }
    }
}

impl<S: Clone> ReachSet<S> {
    /// A copy of this reach set with its span translated by `dt`.
    pub fn shift(&self, dt: f64) -> Self {
        Self {
            set: self.set.clone(),
            span: self.span.translate(dt),
            location: self.location,
        }
    }
}

impl<S: SupportSet> ReachSet<S> {
    /// Dimension of the underlying set.
    pub fn dimension(&self) -> usize {
        self.set.dimension()
    }

    /// Support value of the underlying set along `direction`.
    pub fn support_value(&self, direction: &[f64]) -> f64 {
        self.set.support_value(direction)
    }

    /// Support point of the underlying set along `direction`.
    pub fn support_vector(&self, direction: &[f64]) -> Vec<f64> {
        self.set.support_vector(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowpipe_types::Hyperbox;

    #[test]
    fn test_reach_set_accessors() {
        let rs = ReachSet::new(
            Hyperbox::new(vec![0.0, 0.0], vec![1.0, 2.0]),
            TimeInterval::new(0.0, 0.5),
        );
        assert_eq!(rs.dimension(), 2);
        assert_eq!(rs.time_span(), TimeInterval::new(0.0, 0.5));
        assert_eq!(rs.location(), None);
        assert_eq!(rs.support_value(&[0.0, 1.0]), 2.0);
    }

    #[test]
    fn test_with_location() {
        let rs = ReachSet::with_location(
            Hyperbox::new(vec![0.0], vec![1.0]),
            TimeInterval::new(0.0, 1.0),
            3,
        );
        assert_eq!(rs.location(), Some(3));
    }

    #[test]
    fn test_shift_restamps_span_only() {
        let rs = ReachSet::new(
            Hyperbox::new(vec![0.0], vec![1.0]),
            TimeInterval::new(0.0, 1.0),
        );
        let shifted = rs.shift(5.0);
        assert_eq!(shifted.time_span(), TimeInterval::new(5.0, 6.0));
        assert_eq!(shifted.set(), rs.set());
    }

    #[test]
    fn test_map_preserves_span_and_location() {
        let rs = ReachSet::with_location(
            Hyperbox::new(vec![0.0], vec![1.0]),
            TimeInterval::new(0.0, 1.0),
            7,
        );
        let mapped = rs.map(|b| b.expand(1.0));
        assert_eq!(mapped.time_span(), TimeInterval::new(0.0, 1.0));
        assert_eq!(mapped.location(), Some(7));
        assert_eq!(mapped.set().min(), &[-1.0]);
    }
}
