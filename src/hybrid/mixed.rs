use crate::error::{FlowpipeError, Result};
use crate::extension::Extension;
use crate::view::FlowpipeView;
use flowpipe_types::TimeInterval;
use std::fmt;
use std::ops::Range;

/// A type-erased flowpipe-like part of a [`MixedHybridFlowpipe`].
pub type BoxedFlowpipe = Box<dyn FlowpipeView + Send + Sync>;

/// Per-location flowpipes with *differently-typed* set representations,
/// exposed through the same flattened contract.
///
/// Where [`HybridFlowpipe`](crate::HybridFlowpipe) requires one concrete
/// set type across locations, this container erases the type at the
/// boundary: each part independently implements
/// [`FlowpipeView`](crate::view::FlowpipeView) and every query dispatches
/// per part, never assuming a common representation. The collection is
/// fixed at construction. Dimension is reported from the first non-empty
/// part and is not required to be globally consistent.
///
/// # Examples
///
/// ```
/// use flowpipe::{Flowpipe, MixedHybridFlowpipe, ReachSet};
/// use flowpipe::view::FlowpipeView;
/// use flowpipe::{Hyperbox, TimeInterval};
///
/// let loc0 = Flowpipe::from_reach_sets(vec![ReachSet::new(
///     Hyperbox::new(vec![0.0], vec![1.0]),
///     TimeInterval::new(0.0, 1.0),
/// )]);
/// let loc1 = Flowpipe::from_reach_sets(vec![ReachSet::new(
///     Hyperbox::new(vec![0.5, 0.5], vec![2.0, 2.0]),
///     TimeInterval::new(1.0, 2.0),
/// )]);
///
/// let mixed = MixedHybridFlowpipe::new(vec![Box::new(loc0), Box::new(loc1)]);
/// assert_eq!(mixed.len(), 2);
/// assert_eq!(mixed.time_span().unwrap(), TimeInterval::new(0.0, 2.0));
/// ```
pub struct MixedHybridFlowpipe {
    parts: Vec<BoxedFlowpipe>,
    extension: Extension,
}

impl fmt::Debug for MixedHybridFlowpipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MixedHybridFlowpipe")
            .field("parts", &self.parts.len())
            .field("extension", &self.extension)
            .finish()
    }
}

impl MixedHybridFlowpipe {
    /// Create a container from type-erased per-location flowpipes, in
    /// location order.
    pub fn new(parts: Vec<BoxedFlowpipe>) -> Self {
        Self {
            parts,
            extension: Extension::new(),
        }
    }

    /// Create a container with producer metadata attached.
    pub fn with_extension(parts: Vec<BoxedFlowpipe>, extension: Extension) -> Self {
        Self { parts, extension }
    }

    /// Borrow the type-erased parts.
    pub fn parts(&self) -> &[BoxedFlowpipe] {
        &self.parts
    }

    /// Borrow one location's flowpipe.
    pub fn part(&self, index: usize) -> Option<&(dyn FlowpipeView + Send + Sync)> {
        self.parts.get(index).map(|p| p.as_ref())
    }

    /// Number of locations.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Borrow the producer metadata.
    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    /// Mutably borrow the producer metadata.
    pub fn extension_mut(&mut self) -> &mut Extension {
        &mut self.extension
    }

    fn views(&self) -> impl Iterator<Item = &dyn FlowpipeView> {
        self.parts.iter().map(|p| p.as_ref() as &dyn FlowpipeView)
    }
}

impl FlowpipeView for MixedHybridFlowpipe {
    fn len(&self) -> usize {
        self.parts.iter().map(|p| p.len()).sum()
    }

    /// Dimension of the first non-empty part; heterogeneous parts need not
    /// agree.
    fn dimension(&self) -> Result<usize> {
        self.parts
            .iter()
            .find(|p| !p.is_empty())
            .ok_or(FlowpipeError::EmptyFlowpipe)?
            .dimension()
    }

    fn span_at(&self, index: usize) -> Result<TimeInterval> {
        let (part, offset) = super::locate(self.parts.iter().map(|p| p.len()), index).ok_or(
            FlowpipeError::IndexOutOfBounds {
                index,
                len: self.len(),
            },
        )?;
        self.parts[part].span_at(offset)
    }

    fn time_start(&self) -> Result<f64> {
        super::union_time_start(self.views())
    }

    fn time_end(&self) -> Result<f64> {
        super::union_time_end(self.views())
    }

    fn support_value(&self, direction: &[f64]) -> Result<f64> {
        super::union_support_value(self.views(), direction)
    }

    fn support_vector(&self, direction: &[f64]) -> Result<Vec<f64>> {
        super::union_support_vector(self.views(), direction)
    }

    fn query_at(&self, t: f64) -> Result<Range<usize>> {
        match super::part_query_at(self.views(), t)? {
            Some(range) => Ok(range),
            None => Err(FlowpipeError::TimeOutOfBounds {
                time: t,
                start: self.time_start()?,
                end: self.time_end()?,
            }),
        }
    }
}
