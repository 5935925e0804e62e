// Our Real scalar type. geo-buf only buffers f64 geometry, so drafting is f64 throughout.
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used to snap vertices when noding outlines.
/// Defaults to `1e-6` cm, but can be overridden:
///  1) **Build-time**: set env var `DRAFTRS_TOLERANCE` (e.g. `DRAFTRS_TOLERANCE=1e-5 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before drafting
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    1e-6
}

/// Returns the current snapping tolerance.
/// If not set yet, it tries `DRAFTRS_TOLERANCE` (parsed as `Real`) and
/// falls back to the default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependents
        if let Some(environment_variable) = option_env!("DRAFTRS_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `draftrs::float_types::set_tolerance(1e-5);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Determinant magnitude below which two lines are treated as parallel.
pub const PARALLEL_EPSILON: Real = 1e-4;

/// Shortest chord (or line) accepted between two distinct points.
pub const CHORD_EPSILON: Real = 1e-3;

/// Number of points a curve is sampled into unless a caller asks otherwise.
pub const DEFAULT_CURVE_SAMPLES: usize = 20;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Unit conversion (drafting units are centimeters)
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
pub const CM: Real = 1.0;
pub const MM: Real = 0.1;
pub const INCH: Real = 2.54;
