//! # flowpipe-types
//!
//! Core value types for the flowpipe reachability storage layer.
//!
//! This crate provides the foundational types the `flowpipe` crate builds on:
//!
//! - **Time spans**: [`TimeInterval`], a closed interval on the time axis
//! - **Linear maps**: [`Matrix`], a dense row-major matrix with projection
//!   and transpose-application support
//! - **Set capability**: the [`SupportSet`] and [`ConvexSet`] traits, the
//!   boundary behind which concrete geometric representations live
//! - **Reference set**: [`Hyperbox`], an n-dimensional axis-aligned box
//!
//! All value types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use flowpipe_types::{Hyperbox, SupportSet, TimeInterval};
//!
//! let span = TimeInterval::new(0.0, 0.1);
//! let set = Hyperbox::new(vec![-1.0, -1.0], vec![1.0, 1.0]);
//! assert!(span.contains(0.05));
//! assert_eq!(set.support_value(&[1.0, 0.0]), 1.0);
//! ```

pub mod hyperbox;
pub mod interval;
pub mod linear;
pub mod set;

pub use hyperbox::Hyperbox;
pub use interval::TimeInterval;
pub use linear::Matrix;
pub use set::{ConvexSet, SupportSet};
