//! Hybrid-system flowpipe containers.
//!
//! A hybrid automaton run produces one flowpipe per discrete location. The
//! containers here expose such a collection as one flattened flowpipe-like
//! value: [`HybridFlowpipe`] when every location shares one concrete set
//! representation, [`MixedHybridFlowpipe`] when representations differ and
//! the parts are held behind the type-erased
//! [`FlowpipeView`](crate::view::FlowpipeView) contract.
//!
//! Unlike a single [`Flowpipe`](crate::Flowpipe), a container does not
//! enforce global chronology: different locations can be reached along
//! overlapping wall-clock time, so the container's time span is the union
//! bound over its parts, and point queries resolve per part in location
//! order. The two-element shared-boundary rule applies within one
//! location's flowpipe and never pairs elements across locations.

mod hybrid;
mod mixed;

pub use hybrid::HybridFlowpipe;
pub use mixed::{BoxedFlowpipe, MixedHybridFlowpipe};

use crate::error::{FlowpipeError, Result};
use crate::view::FlowpipeView;
use std::ops::Range;

/// Map a flat index to `(part, offset_within_part)`.
pub(crate) fn locate(lens: impl Iterator<Item = usize>, index: usize) -> Option<(usize, usize)> {
    let mut remaining = index;
    for (part, len) in lens.enumerate() {
        if remaining < len {
            return Some((part, remaining));
        }
        remaining -= len;
    }
    None
}

/// Union-bound start time over non-empty parts.
pub(crate) fn union_time_start<'a>(
    views: impl Iterator<Item = &'a dyn FlowpipeView>,
) -> Result<f64> {
    views
        .filter(|v| !v.is_empty())
        .map(|v| v.time_start())
        .try_fold(None::<f64>, |best, start| {
            let start = start?;
            Ok(Some(best.map_or(start, |b| b.min(start))))
        })?
        .ok_or(FlowpipeError::EmptyFlowpipe)
}

/// Union-bound end time over non-empty parts.
pub(crate) fn union_time_end<'a>(views: impl Iterator<Item = &'a dyn FlowpipeView>) -> Result<f64> {
    views
        .filter(|v| !v.is_empty())
        .map(|v| v.time_end())
        .try_fold(None::<f64>, |best, end| {
            let end = end?;
            Ok(Some(best.map_or(end, |b| b.max(end))))
        })?
        .ok_or(FlowpipeError::EmptyFlowpipe)
}

/// Maximum support value over non-empty parts.
pub(crate) fn union_support_value<'a>(
    views: impl Iterator<Item = &'a dyn FlowpipeView>,
    direction: &[f64],
) -> Result<f64> {
    let mut best = None;
    for view in views.filter(|v| !v.is_empty()) {
        let value = view.support_value(direction)?;
        best = Some(best.map_or(value, |b: f64| b.max(value)));
    }
    best.ok_or(FlowpipeError::EmptyFlowpipe)
}

/// Support point attaining the union maximum over non-empty parts.
pub(crate) fn union_support_vector<'a>(
    views: impl Iterator<Item = &'a dyn FlowpipeView>,
    direction: &[f64],
) -> Result<Vec<f64>> {
    let mut best: Option<(f64, &dyn FlowpipeView)> = None;
    for view in views.filter(|v| !v.is_empty()) {
        let value = view.support_value(direction)?;
        if best.is_none_or(|(b, _)| value > b) {
            best = Some((value, view));
        }
    }
    let (_, view) = best.ok_or(FlowpipeError::EmptyFlowpipe)?;
    view.support_vector(direction)
}

/// Resolve a point query per part in location order; `Ok(None)` when no
/// part covers `t`.
pub(crate) fn part_query_at<'a>(
    views: impl Iterator<Item = &'a dyn FlowpipeView>,
    t: f64,
) -> Result<Option<Range<usize>>> {
    let mut offset = 0;
    for view in views {
        match view.query_at(t) {
            Ok(range) => return Ok(Some(offset + range.start..offset + range.end)),
            Err(FlowpipeError::TimeOutOfBounds { .. }) | Err(FlowpipeError::EmptyFlowpipe) => {}
            Err(other) => return Err(other),
        }
        offset += view.len();
    }
    Ok(None)
}
