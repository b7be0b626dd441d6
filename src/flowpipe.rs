//! The eager flowpipe store and its time-query algebra.

use crate::error::{FlowpipeError, Result};
use crate::extension::Extension;
use crate::reach_set::ReachSet;
use crate::view::{FlowpipeAccess, FlowpipeView};
use flowpipe_types::{ConvexSet, TimeInterval};
use once_cell::sync::OnceCell;
use smallvec::SmallVec;
use std::ops::Range;

/// A projection axis: either a state variable or the time axis.
///
/// State variables are 0-based indices into the set's dimensions. Requesting
/// [`Variable::Time`] makes each projected element the Cartesian product of
/// the element's time span with its spatial projection, time first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    /// The time axis.
    Time,
    /// The state variable with the given 0-based index.
    State(usize),
}

/// An ordered sequence of reach sets approximating the reachable states
/// over a time horizon; semantically the union of its elements.
///
/// Insertion order is chronological order: producers append reach sets whose
/// time spans are non-decreasing and collectively cover the horizon with no
/// gaps (adjacent spans may touch at a shared boundary instant). The query
/// layer never mutates a flowpipe. All elements share one geometric
/// dimension; this is asserted lazily on the first [`dimension`] call, since
/// it is undefined until at least one element exists.
///
/// [`dimension`]: FlowpipeView::dimension
///
/// # Examples
///
/// ```
/// use flowpipe::{Flowpipe, ReachSet};
/// use flowpipe::view::FlowpipeView;
/// use flowpipe::{Hyperbox, TimeInterval};
///
/// let fp = Flowpipe::from_reach_sets(vec![
///     ReachSet::new(Hyperbox::new(vec![0.0], vec![1.0]), TimeInterval::new(0.0, 1.0)),
///     ReachSet::new(Hyperbox::new(vec![1.0], vec![2.0]), TimeInterval::new(1.0, 2.0)),
/// ]);
///
/// assert_eq!(fp.len(), 2);
/// assert_eq!(fp.time_span().unwrap(), TimeInterval::new(0.0, 2.0));
/// // 0.5 lies in the first element only.
/// assert_eq!(fp.query(0.5).unwrap().len(), 1);
/// // 1.0 is the shared boundary instant: both adjacent elements bound it.
/// assert_eq!(fp.query(1.0).unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Flowpipe<S> {
    elements: Vec<ReachSet<S>>,
    extension: Extension,
    dim: OnceCell<usize>,
}

impl<S> Default for Flowpipe<S> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            extension: Extension::new(),
            dim: OnceCell::new(),
        }
    }
}

impl<S> Flowpipe<S> {
    /// Create an empty flowpipe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flowpipe from a pre-built chronological sequence.
    ///
    /// The chronology and coverage invariants are the producer's contract
    /// and are not re-checked here; use
    /// [`FlowpipeBuilder`](crate::FlowpipeBuilder) for validated
    /// construction.
    pub fn from_reach_sets(elements: Vec<ReachSet<S>>) -> Self {
        Self {
            elements,
            extension: Extension::new(),
            dim: OnceCell::new(),
        }
    }

    /// Create a flowpipe from elements and producer metadata.
    pub fn with_extension(elements: Vec<ReachSet<S>>, extension: Extension) -> Self {
        Self {
            elements,
            extension,
            dim: OnceCell::new(),
        }
    }

    /// Append a reach set. Producer-side only; appending must be serialized
    /// with respect to readers, which Rust's `&mut` aliasing rule enforces.
    pub fn push(&mut self, reach_set: ReachSet<S>) {
        self.dim.take();
        self.elements.push(reach_set);
    }

    /// Borrow the ordered element sequence.
    pub fn elements(&self) -> &[ReachSet<S>] {
        &self.elements
    }

    /// The first reach set, if any.
    pub fn first(&self) -> Option<&ReachSet<S>> {
        self.elements.first()
    }

    /// The last reach set, if any.
    pub fn last(&self) -> Option<&ReachSet<S>> {
        self.elements.last()
    }

    /// Borrow the producer metadata.
    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    /// Mutably borrow the producer metadata.
    pub fn extension_mut(&mut self) -> &mut Extension {
        &mut self.extension
    }

    /// A new, empty flowpipe of the same element type.
    ///
    /// Lets producers build a result of matching type without naming the
    /// concrete type at the call site.
    pub fn similar(&self) -> Self {
        Self::new()
    }

    /// Always fails: a flowpipe is a sequence of reach sets, not a single
    /// set. Retrieve one element with [`get`](FlowpipeAccess::get) or
    /// [`elements`](Self::elements) instead.
    pub fn set(&self) -> Result<&S> {
        Err(FlowpipeError::NoSingleSet)
    }

    fn time_bounds_error(&self, t: f64) -> FlowpipeError {
        match (self.elements.first(), self.elements.last()) {
            (Some(first), Some(last)) => FlowpipeError::TimeOutOfBounds {
                time: t,
                start: first.time_span().lo(),
                end: last.time_span().hi(),
            },
            _ => FlowpipeError::EmptyFlowpipe,
        }
    }

    /// Index of the first element whose span contains `t`, located by binary
    /// search over the non-decreasing start times.
    fn first_index_containing(&self, t: f64) -> Option<usize> {
        let k = self
            .elements
            .partition_point(|rs| rs.time_span().lo() <= t);
        let mut idx = k.checked_sub(1)?;
        if !self.elements[idx].time_span().contains(t) {
            return None;
        }
        // Step back over predecessors sharing the boundary instant.
        while idx > 0 && self.elements[idx - 1].time_span().contains(t) {
            idx -= 1;
        }
        Some(idx)
    }

    /// Index of the last element whose span contains `t`.
    fn last_index_containing(&self, t: f64) -> Option<usize> {
        let k = self
            .elements
            .partition_point(|rs| rs.time_span().lo() <= t);
        let idx = k.checked_sub(1)?;
        self.elements[idx].time_span().contains(t).then_some(idx)
    }
}

impl<S: ConvexSet> Flowpipe<S> {
    /// The element(s) whose time span contains the instant `t`, as a
    /// zero-copy view.
    ///
    /// Returns a one-element slice in the interior of a span and a
    /// two-element slice when `t` is exactly the boundary instant shared by
    /// two adjacent elements — both reach sets bound the state at that
    /// instant. Fails with [`FlowpipeError::TimeOutOfBounds`] for instants
    /// outside the covered span.
    pub fn query(&self, t: f64) -> Result<&[ReachSet<S>]> {
        let range = self.query_at(t)?;
        Ok(&self.elements[range])
    }

    /// The contiguous elements covering the interval `span`, as a zero-copy
    /// view: from the first element containing `span.lo()` through the last
    /// element containing `span.hi()`.
    pub fn query_interval(&self, span: TimeInterval) -> Result<&[ReachSet<S>]> {
        let range = self.query_span(span)?;
        Ok(&self.elements[range])
    }

    /// Eagerly project every element onto the requested axes.
    ///
    /// With only [`Variable::State`] axes this is the per-element geometric
    /// projection. Including [`Variable::Time`] makes each output element
    /// the Cartesian product of the element's time span with the spatial
    /// projection (time first); the time axis may be requested at most once.
    /// State indices are validated against the dimension and never clamped.
    ///
    /// This is the materializing counterpart of the lazy
    /// [`projection_of`](crate::projection_of).
    pub fn project(&self, vars: &[Variable]) -> Result<Vec<S>> {
        let dim = self.dimension()?;
        let mut states: SmallVec<[usize; 8]> = SmallVec::new();
        let mut with_time = false;
        for var in vars {
            match *var {
                Variable::Time => {
                    if with_time {
                        return Err(FlowpipeError::DuplicateTimeVariable);
                    }
                    with_time = true;
                }
                Variable::State(i) => {
                    if i >= dim {
                        return Err(FlowpipeError::VariableOutOfRange { var: i, dim });
                    }
                    states.push(i);
                }
            }
        }
        Ok(self
            .elements
            .iter()
            .map(|rs| {
                let spatial = rs.set().project(&states);
                if with_time {
                    spatial.with_time_axis(rs.time_span())
                } else {
                    spatial
                }
            })
            .collect())
    }

    /// A new flowpipe with every time span translated by `dt`.
    ///
    /// Sets are cloned and producer metadata is carried over. This is the
    /// materializing counterpart of the lazy [`shift_of`](crate::shift_of).
    pub fn shift(&self, dt: f64) -> Self {
        Self {
            elements: self.elements.iter().map(|rs| rs.shift(dt)).collect(),
            extension: self.extension.clone(),
            dim: self.dim.clone(),
        }
    }
}

impl<S: ConvexSet> FlowpipeView for Flowpipe<S> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn dimension(&self) -> Result<usize> {
        let first = self.elements.first().ok_or(FlowpipeError::EmptyFlowpipe)?;
        self.dim
            .get_or_try_init(|| {
                let expected = first.dimension();
                for rs in &self.elements[1..] {
                    let found = rs.dimension();
                    if found != expected {
                        return Err(FlowpipeError::DimensionMismatch { expected, found });
                    }
                }
                Ok(expected)
            })
            .copied()
    }

    fn span_at(&self, index: usize) -> Result<TimeInterval> {
        self.elements
            .get(index)
            .map(|rs| rs.time_span())
            .ok_or(FlowpipeError::IndexOutOfBounds {
                index,
                len: self.elements.len(),
            })
    }

    fn support_value(&self, direction: &[f64]) -> Result<f64> {
        let dim = self.dimension()?;
        if direction.len() != dim {
            return Err(FlowpipeError::DimensionMismatch {
                expected: dim,
                found: direction.len(),
            });
        }
        Ok(self
            .elements
            .iter()
            .map(|rs| rs.support_value(direction))
            .fold(f64::NEG_INFINITY, f64::max))
    }

    fn support_vector(&self, direction: &[f64]) -> Result<Vec<f64>> {
        let dim = self.dimension()?;
        if direction.len() != dim {
            return Err(FlowpipeError::DimensionMismatch {
                expected: dim,
                found: direction.len(),
            });
        }
        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (i, rs) in self.elements.iter().enumerate() {
            let value = rs.support_value(direction);
            if value > best_value {
                best_value = value;
                best = i;
            }
        }
        Ok(self.elements[best].support_vector(direction))
    }

    // Binary-search fast path; same answers as the contract's chronological
    // scan under the non-decreasing span invariant.
    fn query_at(&self, t: f64) -> Result<Range<usize>> {
        let first = self
            .first_index_containing(t)
            .ok_or_else(|| self.time_bounds_error(t))?;
        let end = if first + 1 < self.elements.len()
            && self.elements[first + 1].time_span().contains(t)
        {
            first + 2
        } else {
            first + 1
        };
        log::trace!("point query at {t} resolved to positions {first}..{end}");
        Ok(first..end)
    }

    fn query_span(&self, span: TimeInterval) -> Result<Range<usize>> {
        let first = self
            .first_index_containing(span.lo())
            .ok_or_else(|| self.time_bounds_error(span.lo()))?;
        let last = self
            .last_index_containing(span.hi())
            .ok_or_else(|| self.time_bounds_error(span.hi()))?;
        Ok(first..(last + 1).max(first))
    }
}

impl<S: ConvexSet> FlowpipeAccess<S> for Flowpipe<S> {
    fn get(&self, index: usize) -> Result<ReachSet<S>> {
        self.elements
            .get(index)
            .cloned()
            .ok_or(FlowpipeError::IndexOutOfBounds {
                index,
                len: self.elements.len(),
            })
    }

    fn reach_sets(&self) -> Vec<ReachSet<S>> {
        self.elements.clone()
    }
}

impl<'a, S> IntoIterator for &'a Flowpipe<S> {
    type Item = &'a ReachSet<S>;
    type IntoIter = std::slice::Iter<'a, ReachSet<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<S> FromIterator<ReachSet<S>> for Flowpipe<S> {
    fn from_iter<I: IntoIterator<Item = ReachSet<S>>>(iter: I) -> Self {
        Self::from_reach_sets(iter.into_iter().collect())
    }
}
