//! Lazy flowpipe decorators.
//!
//! Long-horizon runs can hold thousands of reach sets, and consumers often
//! need several simultaneous views of the same flowpipe (projections onto
//! different variable pairs, time-realigned copies for composition). The
//! decorators in this module represent those views without materializing
//! anything: they borrow the underlying flowpipe-like value and rewrite
//! every query on demand. Decorators compose over any
//! [`FlowpipeView`](crate::view::FlowpipeView) value, including each other.

mod mapped;
mod shifted;

pub use mapped::{MappedFlowpipe, SetTransform};
pub use shifted::ShiftedFlowpipe;

use crate::error::Result;
use crate::view::{FlowpipeAccess, FlowpipeView};
use flowpipe_types::ConvexSet;

/// The lazy time shift of `flowpipe` by `t0`.
pub fn shift_of<F: FlowpipeView + ?Sized>(flowpipe: &F, t0: f64) -> ShiftedFlowpipe<'_, F> {
    ShiftedFlowpipe::new(flowpipe, t0)
}

/// The lazy projection of `flowpipe` onto the listed state variables.
///
/// Fails if a variable index exceeds the flowpipe's dimension. The time
/// axis cannot be requested lazily; use the eager
/// [`Flowpipe::project`](crate::Flowpipe::project) for time-augmented
/// output.
pub fn projection_of<'a, F, S>(flowpipe: &'a F, vars: &[usize]) -> Result<MappedFlowpipe<'a, F, S>>
where
    F: FlowpipeAccess<S> + ?Sized,
    S: ConvexSet,
{
    MappedFlowpipe::projection(flowpipe, vars)
}
