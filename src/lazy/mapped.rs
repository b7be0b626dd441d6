use crate::error::{FlowpipeError, Result};
use crate::reach_set::ReachSet;
use crate::view::{FlowpipeAccess, FlowpipeView};
use flowpipe_types::{ConvexSet, Matrix, TimeInterval};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// The transform carried by a [`MappedFlowpipe`].
pub enum SetTransform<S> {
    /// A linear map. Support evaluation composes through the transpose
    /// without touching any set: `h_{MS}(d) = h_S(Mᵀd)`.
    Linear(Matrix),
    /// An arbitrary set-to-set function, applied per element on access.
    General(Arc<dyn Fn(&S) -> S + Send + Sync>),
}

impl<S> Clone for SetTransform<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Linear(m) => Self::Linear(m.clone()),
            Self::General(f) => Self::General(Arc::clone(f)),
        }
    }
}

impl<S> fmt::Debug for SetTransform<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear(m) => f.debug_tuple("Linear").field(m).finish(),
            Self::General(_) => f.write_str("General(..)"),
        }
    }
}

impl<S: ConvexSet> SetTransform<S> {
    fn apply(&self, set: &S) -> S {
        match self {
            Self::Linear(m) => set.linear_image(m),
            Self::General(f) => f(set),
        }
    }
}

/// A lazy set transform over a borrowed flowpipe-like value.
///
/// No transformed sequence is ever stored: support evaluation composes the
/// transform with the underlying value's evaluation, and indexed access
/// materializes exactly one element on demand. Several simultaneous views
/// of one flowpipe (say, projections onto different variable pairs) thus
/// cost nothing beyond the wrapper itself. Time spans pass through
/// unchanged.
///
/// # Examples
///
/// ```
/// use flowpipe::{Flowpipe, ReachSet, projection_of};
/// use flowpipe::view::FlowpipeView;
/// use flowpipe::{Hyperbox, TimeInterval};
///
/// let fp = Flowpipe::from_reach_sets(vec![ReachSet::new(
///     Hyperbox::new(vec![0.0, -1.0, 5.0], vec![1.0, 1.0, 6.0]),
///     TimeInterval::new(0.0, 0.1),
/// )]);
///
/// let view = projection_of(&fp, &[0, 2]).unwrap();
/// assert_eq!(view.dimension().unwrap(), 2);
/// assert_eq!(view.support_value(&[0.0, 1.0]).unwrap(), 6.0);
/// ```
#[derive(Debug)]
pub struct MappedFlowpipe<'a, F: ?Sized, S> {
    inner: &'a F,
    transform: SetTransform<S>,
}

impl<F: ?Sized, S> Clone for MappedFlowpipe<'_, F, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner,
            transform: self.transform.clone(),
        }
    }
}

impl<'a, F, S> MappedFlowpipe<'a, F, S>
where
    F: FlowpipeAccess<S> + ?Sized,
    S: ConvexSet,
{
    /// Wrap `inner` with an arbitrary transform.
    pub fn new(inner: &'a F, transform: SetTransform<S>) -> Self {
        Self { inner, transform }
    }

    /// Wrap `inner` with a linear map, validating that the map's input
    /// dimension matches the flowpipe's.
    pub fn linear(inner: &'a F, matrix: Matrix) -> Result<Self> {
        let dim = inner.dimension()?;
        if matrix.cols() != dim {
            return Err(FlowpipeError::DimensionMismatch {
                expected: dim,
                found: matrix.cols(),
            });
        }
        Ok(Self::new(inner, SetTransform::Linear(matrix)))
    }

    /// Wrap `inner` with the projection onto the listed state variables.
    pub fn projection(inner: &'a F, vars: &[usize]) -> Result<Self> {
        let dim = inner.dimension()?;
        for &var in vars {
            if var >= dim {
                return Err(FlowpipeError::VariableOutOfRange { var, dim });
            }
        }
        Ok(Self::new(
            inner,
            SetTransform::Linear(Matrix::projection(dim, vars)),
        ))
    }

    /// Wrap `inner` with a general set-to-set function.
    pub fn general(inner: &'a F, f: impl Fn(&S) -> S + Send + Sync + 'static) -> Self {
        Self::new(inner, SetTransform::General(Arc::new(f)))
    }

    /// Borrow the wrapped value.
    pub fn inner(&self) -> &'a F {
        self.inner
    }

    /// The transform applied on access.
    pub fn transform(&self) -> &SetTransform<S> {
        &self.transform
    }
}

impl<F, S> FlowpipeView for MappedFlowpipe<'_, F, S>
where
    F: FlowpipeAccess<S> + ?Sized,
    S: ConvexSet,
{
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn dimension(&self) -> Result<usize> {
        match &self.transform {
            SetTransform::Linear(m) => {
                if self.inner.is_empty() {
                    Err(FlowpipeError::EmptyFlowpipe)
                } else {
                    Ok(m.rows())
                }
            }
            SetTransform::General(_) => {
                if self.inner.is_empty() {
                    return Err(FlowpipeError::EmptyFlowpipe);
                }
                Ok(self.get(0)?.dimension())
            }
        }
    }

    fn span_at(&self, index: usize) -> Result<TimeInterval> {
        self.inner.span_at(index)
    }

    fn support_value(&self, direction: &[f64]) -> Result<f64> {
        match &self.transform {
            SetTransform::Linear(m) => {
                if direction.len() != m.rows() {
                    return Err(FlowpipeError::DimensionMismatch {
                        expected: m.rows(),
                        found: direction.len(),
                    });
                }
                self.inner.support_value(&m.transpose_apply(direction))
            }
            SetTransform::General(_) => {
                if self.inner.is_empty() {
                    return Err(FlowpipeError::EmptyFlowpipe);
                }
                let mut best = f64::NEG_INFINITY;
                for index in 0..self.inner.len() {
                    let rs = self.get(index)?;
                    best = best.max(rs.support_value(direction));
                }
                Ok(best)
            }
        }
    }

    fn support_vector(&self, direction: &[f64]) -> Result<Vec<f64>> {
        match &self.transform {
            SetTransform::Linear(m) => {
                if direction.len() != m.rows() {
                    return Err(FlowpipeError::DimensionMismatch {
                        expected: m.rows(),
                        found: direction.len(),
                    });
                }
                let lifted = m.transpose_apply(direction);
                let point = self.inner.support_vector(&lifted)?;
                Ok(m.apply(&point))
            }
            SetTransform::General(_) => {
                if self.inner.is_empty() {
                    return Err(FlowpipeError::EmptyFlowpipe);
                }
                let mut best = f64::NEG_INFINITY;
                let mut best_index = 0;
                for index in 0..self.inner.len() {
                    let value = self.get(index)?.support_value(direction);
                    if value > best {
                        best = value;
                        best_index = index;
                    }
                }
                Ok(self.get(best_index)?.support_vector(direction))
            }
        }
    }

    // Time spans are untouched by the transform; reuse the target's lookup.
    fn query_at(&self, t: f64) -> Result<Range<usize>> {
        self.inner.query_at(t)
    }

    fn query_span(&self, span: TimeInterval) -> Result<Range<usize>> {
        self.inner.query_span(span)
    }
}

impl<F, S> FlowpipeAccess<S> for MappedFlowpipe<'_, F, S>
where
    F: FlowpipeAccess<S> + ?Sized,
    S: ConvexSet,
{
    fn get(&self, index: usize) -> Result<ReachSet<S>> {
        Ok(self
            .inner
            .get(index)?
            .map(|set| self.transform.apply(&set)))
    }

    fn reach_sets(&self) -> Vec<ReachSet<S>> {
        self.inner
            .reach_sets()
            .into_iter()
            .map(|rs| rs.map(|set| self.transform.apply(&set)))
            .collect()
    }
}
