use crate::error::{FlowpipeError, Result};
use crate::reach_set::ReachSet;
use crate::view::{FlowpipeAccess, FlowpipeView};
use flowpipe_types::{ConvexSet, TimeInterval};
use std::ops::Range;

/// A lazy constant time offset over a borrowed flowpipe-like value.
///
/// Nothing is copied: the wrapper holds a shared reference to its target
/// and rewrites every time-based query by the offset. The borrow checker
/// ties the wrapper's validity to the target's lifetime.
///
/// The offset applies to the *externally observed* spans only
/// ([`span_at`](FlowpipeView::span_at), the time bounds, and query
/// resolution). Individual [`ReachSet`]s obtained through
/// [`get`](FlowpipeAccess::get) or iteration are **not** re-stamped and
/// still carry their original stored spans; use the eager
/// [`Flowpipe::shift`](crate::Flowpipe::shift) when re-stamped elements are
/// needed. This asymmetry is deliberate and relied upon by composition.
///
/// # Examples
///
/// ```
/// use flowpipe::{Flowpipe, ReachSet, shift_of};
/// use flowpipe::view::FlowpipeView;
/// use flowpipe::{Hyperbox, TimeInterval};
///
/// let fp = Flowpipe::from_reach_sets(vec![ReachSet::new(
///     Hyperbox::new(vec![0.0], vec![1.0]),
///     TimeInterval::new(0.0, 3.0),
/// )]);
///
/// let shifted = shift_of(&fp, 10.0);
/// assert_eq!(shifted.time_span().unwrap(), TimeInterval::new(10.0, 13.0));
/// ```
#[derive(Debug)]
pub struct ShiftedFlowpipe<'a, F: ?Sized> {
    inner: &'a F,
    t0: f64,
}

impl<F: ?Sized> Clone for ShiftedFlowpipe<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: ?Sized> Copy for ShiftedFlowpipe<'_, F> {}

impl<'a, F: ?Sized> ShiftedFlowpipe<'a, F> {
    /// Wrap `inner`, offsetting its observed time spans by `t0`.
    pub fn new(inner: &'a F, t0: f64) -> Self {
        Self { inner, t0 }
    }

    /// The constant time offset.
    pub fn offset(&self) -> f64 {
        self.t0
    }

    /// Borrow the wrapped value.
    pub fn inner(&self) -> &'a F {
        self.inner
    }

    fn translate_error(&self, error: FlowpipeError) -> FlowpipeError {
        match error {
            FlowpipeError::TimeOutOfBounds { time, start, end } => {
                FlowpipeError::TimeOutOfBounds {
                    time: time + self.t0,
                    start: start + self.t0,
                    end: end + self.t0,
                }
            }
            other => other,
        }
    }
}

impl<F: FlowpipeView + ?Sized> FlowpipeView for ShiftedFlowpipe<'_, F> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn dimension(&self) -> Result<usize> {
        self.inner.dimension()
    }

    fn span_at(&self, index: usize) -> Result<TimeInterval> {
        Ok(self.inner.span_at(index)?.translate(self.t0))
    }

    // A time shift leaves the geometry untouched.
    fn support_value(&self, direction: &[f64]) -> Result<f64> {
        self.inner.support_value(direction)
    }

    fn support_vector(&self, direction: &[f64]) -> Result<Vec<f64>> {
        self.inner.support_vector(direction)
    }

    fn query_at(&self, t: f64) -> Result<Range<usize>> {
        self.inner
            .query_at(t - self.t0)
            .map_err(|e| self.translate_error(e))
    }

    fn query_span(&self, span: TimeInterval) -> Result<Range<usize>> {
        self.inner
            .query_span(span.translate(-self.t0))
            .map_err(|e| self.translate_error(e))
    }
}

impl<F, S> FlowpipeAccess<S> for ShiftedFlowpipe<'_, F>
where
    F: FlowpipeAccess<S> + ?Sized,
    S: ConvexSet,
{
    /// The underlying element, with its *original* stored span.
    fn get(&self, index: usize) -> Result<ReachSet<S>> {
        self.inner.get(index)
    }

    fn reach_sets(&self) -> Vec<ReachSet<S>> {
        self.inner.reach_sets()
    }
}
