//! Output formats for finished patterns.
//!
//! Every format sits behind its own cargo feature.

#[cfg(feature = "svg-io")]
pub mod svg;

#[cfg(feature = "svg-io")]
pub use self::svg::ToSVG;
