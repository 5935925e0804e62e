//! A parametric **2D garment pattern drafting** library: named points, straight
//! and quadratic Bézier paths, staged drafting of pieces from body
//! measurements, and seam allowances by rounded polygon offsetting.
//!
//! Coordinates are centimeters, y-up. A [`Drafter`](draft::Drafter) builds its
//! pieces stage by stage inside a [`Workspace`](draft::Workspace); finished
//! [`Piece`]s are collected into a [`Pattern`].
//!
//! # Features
//! #### Default
//! - **offset**: use `geo-buf` for seam allowances
//! - **svg-io**: render pieces and patterns to SVG
//! - **tracing**: debug and warning logs through `tracing`
//!
//! #### Optional
//! - **parallel**: use rayon for multithreading

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub(crate) mod log;

pub mod curve;
pub mod intersection;
pub mod path;
pub mod point;

pub mod piece;

pub mod draft;
pub mod measurements;

pub mod blocks;
pub mod pattern;

#[cfg(feature = "svg-io")]
pub mod io;

pub use curve::CurveShape;
pub use draft::{Drafter, Stage, Workspace, draft};
pub use errors::{DraftError, OutlineError};
pub use intersection::IntersectionMode;
pub use measurements::{Measurements, Options};
pub use path::{Curve, Line, PathElement, PathRole};
pub use pattern::Pattern;
pub use piece::{Piece, PieceBuilder};
pub use point::{Point, PointRole};
