//! Storage and query layer for reachability flowpipes: time-indexed reach
//! sets with lazy transforms and hybrid composition.
//!
//! A flowpipe is the output of a reachability computation — an ordered,
//! time-stamped sequence of geometric sets bounding the states a dynamical
//! system can occupy. This crate holds, indexes, projects, shifts, and
//! composes such sequences; it does not compute them. Set representations
//! stay opaque behind the [`flowpipe_types::ConvexSet`] capability.
//!
//! ```rust
//! use flowpipe::prelude::*;
//! use flowpipe::{Hyperbox, TimeInterval};
//!
//! let fp = FlowpipeBuilder::new()
//!     .push(ReachSet::new(
//!         Hyperbox::new(vec![0.0], vec![1.0]),
//!         TimeInterval::new(0.0, 1.0),
//!     ))
//!     .push(ReachSet::new(
//!         Hyperbox::new(vec![0.5], vec![1.5]),
//!         TimeInterval::new(1.0, 2.0),
//!     ))
//!     .build()?;
//!
//! // The shared boundary instant is bounded by both adjacent reach sets.
//! assert_eq!(fp.query(1.0)?.len(), 2);
//!
//! // Lazy views never materialize a transformed copy.
//! let realigned = shift_of(&fp, 10.0);
//! assert_eq!(realigned.time_span()?, TimeInterval::new(10.0, 12.0));
//! # Ok::<(), flowpipe::FlowpipeError>(())
//! ```

pub mod builder;
pub mod error;
pub mod extension;
pub mod flowpipe;
pub mod hybrid;
pub mod lazy;
pub mod reach_set;
pub mod view;

pub use builder::{DEFAULT_GAP_TOLERANCE, FlowpipeBuilder};
pub use error::{FlowpipeError, Result};
pub use extension::{Extension, ExtensionValue};
pub use flowpipe::{Flowpipe, Variable};
pub use hybrid::{BoxedFlowpipe, HybridFlowpipe, MixedHybridFlowpipe};
pub use lazy::{MappedFlowpipe, SetTransform, ShiftedFlowpipe, projection_of, shift_of};
pub use reach_set::ReachSet;
pub use view::{FlowpipeAccess, FlowpipeView, ReachSetIter};

pub use flowpipe_types::{ConvexSet, Hyperbox, Matrix, SupportSet, TimeInterval};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{FlowpipeError, Result};

    pub use crate::{Flowpipe, FlowpipeBuilder, ReachSet, Variable};

    pub use crate::view::{FlowpipeAccess, FlowpipeView};

    pub use crate::{projection_of, shift_of};

    pub use crate::{HybridFlowpipe, MixedHybridFlowpipe};

    pub use crate::{Extension, ExtensionValue};

    pub use flowpipe_types::{ConvexSet, SupportSet, TimeInterval};
}
