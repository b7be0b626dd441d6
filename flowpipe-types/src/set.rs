//! The opaque set capability.
//!
//! Flowpipes never look inside their geometric sets; everything they need is
//! expressed through these two traits. [`SupportSet`] is the evaluation
//! capability (dimension and support function/vector) and stays
//! dyn-compatible so heterogeneous containers can dispatch through trait
//! objects. [`ConvexSet`] adds the construction primitives eager transforms
//! need (projection, linear image, time-axis product).

use crate::interval::TimeInterval;
use crate::linear::Matrix;

/// Support-function evaluation over an opaque convex set.
///
/// For a direction `d`, the support value is the maximum of `⟨d, x⟩` over
/// all points `x` of the set, and the support vector is a point attaining
/// that maximum. Directions are dense slices whose length must equal the
/// set's dimension.
pub trait SupportSet {
    /// The ambient dimension of the set.
    fn dimension(&self) -> usize;

    /// Maximum extent of the set along `direction`.
    fn support_value(&self, direction: &[f64]) -> f64;

    /// A point of the set attaining [`support_value`](Self::support_value).
    fn support_vector(&self, direction: &[f64]) -> Vec<f64>;
}

/// Construction primitives over an opaque convex set.
///
/// Implementations may return the tightest representable enclosure where the
/// exact result leaves the representation class (e.g. the linear image of a
/// box is returned as its interval hull).
pub trait ConvexSet: SupportSet + Clone {
    /// Project the set onto the listed variables, in the listed order.
    fn project(&self, vars: &[usize]) -> Self;

    /// The image of the set under the linear map `m`.
    fn linear_image(&self, m: &Matrix) -> Self;

    /// The Cartesian product `span × self`, prepending the time axis.
    fn with_time_axis(&self, span: TimeInterval) -> Self;
}
