//! Drafting and outline errors

use crate::draft::Stage;
use crate::float_types::Real;

/// Everything that can make a draft, a piece or a pattern fail to build.
///
/// These are permanent failures: drafting is deterministic, so retrying with the
/// same inputs yields the same error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    /// A path, grain line or lookup names a point the container does not hold
    #[error("piece `{piece}` references unregistered point `{point}`")]
    MissingPoint { piece: String, point: String },
    /// Two points in the same piece share a name
    #[error("piece `{piece}` already has a point named `{point}`")]
    DuplicatePoint { piece: String, point: String },
    /// A workspace key was looked up before it was registered
    #[error("no point registered under key {0}")]
    MissingKey(String),
    /// A workspace key was registered twice
    #[error("key {0} is already registered")]
    DuplicateKey(String),
    /// A path was looked up before the stage that builds it ran
    #[error("no path registered under {0}")]
    MissingPath(String),
    /// A path that had to be a straight line is a curve
    #[error("path {0} is a curve, expected a line")]
    NotALine(String),
    /// Start and end of a line coincide
    #[error("line from `{start}` to `{end}` has zero length")]
    DegenerateLine { start: String, end: String },
    /// Start and end of a curve coincide, so there is no chord to shape against
    #[error("curve chord from `{start}` to `{end}` is shorter than the minimum")]
    DegenerateChord { start: String, end: String },
    /// Control point sits on the chord midpoint, so the curve is a straight line
    #[error("curve from `{start}` to `{end}` has its control point on the chord midpoint")]
    DegenerateCurve { start: String, end: String },
    /// Bulge position must lie on the chord
    #[error("bulge position ratio {0} is outside [0, 1]")]
    InvalidRatio(Real),
    /// Bulge distance cannot be zero when shaping through a reference point
    #[error("bulge distance {0} is not usable")]
    InvalidBulge(Real),
    /// Two construction lines that had to cross do not
    #[error("paths {first} and {second} do not intersect")]
    NoIntersection { first: String, second: String },
    /// Seam allowance widths are finite and non-negative
    #[error("seam allowance {0} must be finite and >= 0")]
    InvalidSeamAllowance(Real),
    /// Cut quantity must be at least one
    #[error("piece `{piece}` has cut quantity 0")]
    InvalidQuantity { piece: String },
    /// Measurements are finite and strictly positive
    #[error("measurement `{name}` = {value} must be finite and > 0")]
    InvalidMeasurement { name: &'static str, value: Real },
    /// Points carry finite coordinates
    #[error("point `{name}` has a non-finite coordinate ({x}, {y})")]
    InvalidCoordinate { name: String, x: Real, y: Real },
    /// Piece names are unique within a pattern
    #[error("pattern `{pattern}` already contains a piece named `{piece}`")]
    DuplicatePiece { pattern: String, piece: String },
    /// A pattern lookup by piece name found nothing
    #[error("pattern `{pattern}` has no piece named `{piece}`")]
    MissingPiece { pattern: String, piece: String },
    /// A workspace mutation that the current stage does not allow
    #[error("{operation} is not allowed during the {stage:?} stage")]
    StageViolation { stage: Stage, operation: &'static str },
    /// The pipeline was advanced out of order
    #[error("cannot move from the {from:?} stage to the {to:?} stage")]
    StageOrder { from: Stage, to: Stage },
    /// The assemble stage produced nothing
    #[error("drafter `{0}` assembled no pieces")]
    EmptyAssembly(String),
}

/// Reasons a piece has no outline. These are recoverable: the piece is still
/// usable for rendering its raw paths, it just has no seam allowance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutlineError {
    /// No visible cut or seam line to build an outline from
    #[error("piece `{0}` has no visible cut or seam lines")]
    NoBoundaryPaths(String),
    /// The boundary lines never close into a region
    #[error("the cut and seam lines of piece `{0}` do not enclose a region")]
    NoClosedRegion(String),
}
