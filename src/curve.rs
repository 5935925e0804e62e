//! **Curve shaping for quadratic drafting curves**
//!
//! Drafting curves are authored by *intent* rather than by control point: how far,
//! and where along the chord, the curve should bulge away from the straight line
//! between its endpoints. This module turns such an intent into the single control
//! point of a quadratic Bézier.
//!
//! ## **Quadratic Bézier midpoint**
//! For endpoints P₀, P₂ and control C:
//! ```text
//! B(t)   = (1−t)²P₀ + 2t(1−t)C + t²P₂
//! B(0.5) = ¼P₀ + ½C + ¼P₂ = ½M + ½C        with M = (P₀+P₂)/2
//! ```
//! so the curve only travels half of the control point's offset from the chord.
//! Both entry points compensate for that contraction.
//!
//! ## **Sign convention**
//! A positive bulge distance moves the curve to the *left* of the chord direction
//! (start → end), i.e. along `n = (−dy, dx) / |chord|`.

use crate::errors::DraftError;
use crate::float_types::{CHORD_EPSILON, Real};
use nalgebra::{Point2, Vector2};

/// How a curve departs from its chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveShape {
    /// Bulge `distance` away from the chord, peaking at `ratio` ∈ [0, 1] along it.
    Offset { distance: Real, ratio: Real },
    /// Bulge relative to a reference position already placed on the pattern.
    Through { reference: Point2<Real>, distance: Real },
}

impl CurveShape {
    /// Symmetric bulge peaking at the chord midpoint.
    pub const fn offset(distance: Real) -> Self {
        CurveShape::Offset {
            distance,
            ratio: 0.5,
        }
    }

    /// Control point for a chord from `start` to `end`.
    pub fn control(&self, start: Point2<Real>, end: Point2<Real>) -> Result<Point2<Real>, ShapeError> {
        match *self {
            CurveShape::Offset { distance, ratio } => control_from_offset(start, end, distance, ratio),
            CurveShape::Through {
                reference,
                distance,
            } => control_through_reference(start, end, reference, distance),
        }
    }
}

/// Shaping failures before the endpoints' names are known.
/// [`crate::path::Curve`] lifts these into [`DraftError`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeError {
    ShortChord,
    Ratio(Real),
    Bulge(Real),
}

impl ShapeError {
    pub(crate) fn into_draft_error(self, start: &str, end: &str) -> DraftError {
        match self {
            ShapeError::ShortChord => DraftError::DegenerateChord {
                start: start.to_string(),
                end: end.to_string(),
            },
            ShapeError::Ratio(r) => DraftError::InvalidRatio(r),
            ShapeError::Bulge(d) => DraftError::InvalidBulge(d),
        }
    }
}

/// Chord vector and its length, rejecting coincident endpoints.
fn chord(start: Point2<Real>, end: Point2<Real>) -> Result<(Vector2<Real>, Real), ShapeError> {
    let chord = end - start;
    let length = chord.norm();
    if !(length >= CHORD_EPSILON) {
        return Err(ShapeError::ShortChord);
    }
    Ok((chord, length))
}

/// Left unit normal of a chord of known non-zero length.
fn left_normal(chord: &Vector2<Real>, length: Real) -> Vector2<Real> {
    Vector2::new(-chord.y, chord.x) / length
}

/// **Offset-from-chord shaping**
///
/// ```text
/// C = M + n·(2·d) + chord·((r − 0.5) / 4)
/// ```
/// The perpendicular part is doubled so that B(0.5) lies exactly `d` from the
/// chord. The along-chord part biases the peak toward the start (r < 0.5) or
/// the end (r > 0.5) without changing that perpendicular distance.
pub fn control_from_offset(
    start: Point2<Real>,
    end: Point2<Real>,
    distance: Real,
    ratio: Real,
) -> Result<Point2<Real>, ShapeError> {
    let (chord, length) = chord(start, end)?;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(ShapeError::Ratio(ratio));
    }
    if !distance.is_finite() {
        return Err(ShapeError::Bulge(distance));
    }
    let mid = nalgebra::center(&start, &end);
    let normal = left_normal(&chord, length);
    Ok(mid + normal * (2.0 * distance) + chord * ((ratio - 0.5) * 0.25))
}

/// **Offset-from-reference shaping**
///
/// 1. Project `reference` onto the chord line: closest point `C`, vector `v = R − C`.
/// 2. If `|v| < 1e-3` the reference sits on the chord; nudge `v` to `n·1e-3`.
/// 3. Control = `C + v̂·(|v| − 0.5/d)`.
///
/// Step 3 is kept exactly as drafted patterns expect it, not re-derived.
pub fn control_through_reference(
    start: Point2<Real>,
    end: Point2<Real>,
    reference: Point2<Real>,
    distance: Real,
) -> Result<Point2<Real>, ShapeError> {
    let (chord, length) = chord(start, end)?;
    if distance == 0.0 || !distance.is_finite() {
        return Err(ShapeError::Bulge(distance));
    }

    let t = (reference - start).dot(&chord) / (length * length);
    let closest = start + chord * t;
    let mut perpendicular = reference - closest;
    let mut perpendicular_length = perpendicular.norm();
    if perpendicular_length < CHORD_EPSILON {
        perpendicular = left_normal(&chord, length) * CHORD_EPSILON;
        perpendicular_length = CHORD_EPSILON;
    }

    let unit = perpendicular / perpendicular_length;
    Ok(closest + unit * (perpendicular_length - 0.5 / distance))
}

/// Evaluate a quadratic Bézier at parameter `t`.
pub fn quadratic_point(
    start: Point2<Real>,
    control: Point2<Real>,
    end: Point2<Real>,
    t: Real,
) -> Point2<Real> {
    let mt = 1.0 - t;
    Point2::from(start.coords * (mt * mt) + control.coords * (2.0 * mt * t) + end.coords * (t * t))
}

/// Sample a quadratic Bézier into `samples` points at uniform parameter steps,
/// endpoints included. Fewer than two samples are raised to two.
pub fn sample_quadratic(
    start: Point2<Real>,
    control: Point2<Real>,
    end: Point2<Real>,
    samples: usize,
) -> Vec<Point2<Real>> {
    let samples = samples.max(2);
    let last = (samples - 1) as Real;
    (0..samples)
        .map(|i| {
            if i == 0 {
                start
            } else if i == samples - 1 {
                end
            } else {
                quadratic_point(start, control, end, i as Real / last)
            }
        })
        .collect()
}

/// Signed perpendicular distance of `p` from the chord line, positive on the left.
pub fn signed_distance_from_chord(start: Point2<Real>, end: Point2<Real>, p: Point2<Real>) -> Real {
    let chord = end - start;
    let length = chord.norm();
    let rel = p - start;
    (chord.x * rel.y - chord.y * rel.x) / length
}
