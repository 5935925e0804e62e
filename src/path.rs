//! Directed path elements between named points.

use crate::curve::{CurveShape, sample_quadratic};
use crate::errors::DraftError;
use crate::float_types::{CHORD_EPSILON, DEFAULT_CURVE_SAMPLES, Real};
use crate::point::{Point, PointRole};
use nalgebra::Point2;

/// What a path means on the pattern. Exporters map it to a stroke style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRole {
    CutLine,
    SeamLine,
    FoldLine,
    ConstructionLine,
    GrainLine,
    ButtonLine,
    HemLine,
}

impl PathRole {
    /// Cut and seam lines bound a piece; everything else is annotation.
    pub const fn is_boundary(self) -> bool {
        matches!(self, PathRole::CutLine | PathRole::SeamLine)
    }
}

/// A straight directed segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    start: Point,
    end: Point,
    role: PathRole,
    visible: bool,
}

impl Line {
    /// Visible line from `start` to `end`. Fails when the endpoints coincide.
    pub fn new(start: Point, end: Point, role: PathRole) -> Result<Line, DraftError> {
        if !(start.distance_to(&end) >= CHORD_EPSILON) {
            return Err(DraftError::DegenerateLine {
                start: start.name().to_string(),
                end: end.name().to_string(),
            });
        }
        Ok(Line {
            start,
            end,
            role,
            visible: true,
        })
    }

    pub const fn start(&self) -> &Point {
        &self.start
    }

    pub const fn end(&self) -> &Point {
        &self.end
    }

    pub const fn role(&self) -> PathRole {
        self.role
    }

    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Same geometry, hidden or shown.
    pub fn with_visibility(mut self, visible: bool) -> Line {
        self.visible = visible;
        self
    }

    pub fn length(&self) -> Real {
        self.start.distance_to(&self.end)
    }

    /// Position at parameter `t` along the line (0 = start, 1 = end).
    pub fn point_at(&self, t: Real) -> Point2<Real> {
        self.start.pos() + (self.end.pos() - self.start.pos()) * t
    }
}

/// A quadratic Bézier from `start` to `end` pulled toward `control`.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    start: Point,
    control: Point,
    end: Point,
    role: PathRole,
    visible: bool,
}

impl Curve {
    /// Visible curve with an explicit control point.
    ///
    /// Rejects chords shorter than `1e-3` and control points sitting on the chord
    /// midpoint, which would draw a straight line.
    pub fn new(start: Point, control: Point, end: Point, role: PathRole) -> Result<Curve, DraftError> {
        if !(start.distance_to(&end) >= CHORD_EPSILON) {
            return Err(DraftError::DegenerateChord {
                start: start.name().to_string(),
                end: end.name().to_string(),
            });
        }
        let mid = nalgebra::center(&start.pos(), &end.pos());
        if !((control.pos() - mid).norm() >= CHORD_EPSILON) {
            return Err(DraftError::DegenerateCurve {
                start: start.name().to_string(),
                end: end.name().to_string(),
            });
        }
        Ok(Curve {
            start,
            control,
            end,
            role,
            visible: true,
        })
    }

    /// Curve shaped by intent; the control point is named `"<start>~<end>"`.
    pub fn shaped(start: Point, end: Point, shape: CurveShape, role: PathRole) -> Result<Curve, DraftError> {
        let control = shape
            .control(start.pos(), end.pos())
            .map_err(|e| e.into_draft_error(start.name(), end.name()))?;
        let control = Point::at(Self::control_name(&start, &end), control, PointRole::Construction);
        Curve::new(start, control, end, role)
    }

    /// Name given to control points derived by [`Curve::shaped`].
    pub fn control_name(start: &Point, end: &Point) -> String {
        format!("{}~{}", start.name(), end.name())
    }

    pub const fn start(&self) -> &Point {
        &self.start
    }

    pub const fn control(&self) -> &Point {
        &self.control
    }

    pub const fn end(&self) -> &Point {
        &self.end
    }

    pub const fn role(&self) -> PathRole {
        self.role
    }

    pub const fn visible(&self) -> bool {
        self.visible
    }

    pub fn with_visibility(mut self, visible: bool) -> Curve {
        self.visible = visible;
        self
    }

    pub fn point_at(&self, t: Real) -> Point2<Real> {
        crate::curve::quadratic_point(self.start.pos(), self.control.pos(), self.end.pos(), t)
    }

    /// Polyline of `samples` points at uniform parameter steps, endpoints included.
    pub fn sample(&self, samples: usize) -> Vec<Point2<Real>> {
        sample_quadratic(self.start.pos(), self.control.pos(), self.end.pos(), samples)
    }

    /// Polyline with [`DEFAULT_CURVE_SAMPLES`] points.
    pub fn sampled(&self) -> Vec<Point2<Real>> {
        self.sample(DEFAULT_CURVE_SAMPLES)
    }

    /// Length of the default sampled polyline.
    pub fn length(&self) -> Real {
        self.sampled().windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// A line or a curve, as stored on a piece.
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    Line(Line),
    Curve(Curve),
}

impl PathElement {
    pub const fn role(&self) -> PathRole {
        match self {
            PathElement::Line(l) => l.role,
            PathElement::Curve(c) => c.role,
        }
    }

    pub const fn visible(&self) -> bool {
        match self {
            PathElement::Line(l) => l.visible,
            PathElement::Curve(c) => c.visible,
        }
    }

    pub const fn start(&self) -> &Point {
        match self {
            PathElement::Line(l) => &l.start,
            PathElement::Curve(c) => &c.start,
        }
    }

    pub const fn end(&self) -> &Point {
        match self {
            PathElement::Line(l) => &l.end,
            PathElement::Curve(c) => &c.end,
        }
    }

    pub const fn as_line(&self) -> Option<&Line> {
        match self {
            PathElement::Line(l) => Some(l),
            PathElement::Curve(_) => None,
        }
    }

    pub const fn as_curve(&self) -> Option<&Curve> {
        match self {
            PathElement::Curve(c) => Some(c),
            PathElement::Line(_) => None,
        }
    }

    /// Every point this element references: endpoints, plus the control point of a curve.
    pub fn points(&self) -> Vec<&Point> {
        match self {
            PathElement::Line(l) => vec![&l.start, &l.end],
            PathElement::Curve(c) => vec![&c.start, &c.control, &c.end],
        }
    }

    /// Polyline through the element: the two endpoints of a line, or the default
    /// sampling of a curve.
    pub fn polyline(&self) -> Vec<Point2<Real>> {
        match self {
            PathElement::Line(l) => vec![l.start.pos(), l.end.pos()],
            PathElement::Curve(c) => c.sampled(),
        }
    }

    pub fn length(&self) -> Real {
        match self {
            PathElement::Line(l) => l.length(),
            PathElement::Curve(c) => c.length(),
        }
    }

    /// Same geometry under a different role.
    pub fn with_role(&self, role: PathRole) -> PathElement {
        let mut element = self.clone();
        match &mut element {
            PathElement::Line(l) => l.role = role,
            PathElement::Curve(c) => c.role = role,
        }
        element
    }

    /// Rebuild the element with every referenced point passed through `f`.
    /// `f` must keep positions, so the element stays non-degenerate.
    pub fn map_points(&self, mut f: impl FnMut(&Point) -> Point) -> PathElement {
        match self {
            PathElement::Line(l) => PathElement::Line(Line {
                start: f(&l.start),
                end: f(&l.end),
                role: l.role,
                visible: l.visible,
            }),
            PathElement::Curve(c) => PathElement::Curve(Curve {
                start: f(&c.start),
                control: f(&c.control),
                end: f(&c.end),
                role: c.role,
                visible: c.visible,
            }),
        }
    }

    /// True when this is a line joining the two named points, in either direction.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        let (s, e) = (self.start().name(), self.end().name());
        (s == a && e == b) || (s == b && e == a)
    }
}

impl From<Line> for PathElement {
    fn from(line: Line) -> Self {
        PathElement::Line(line)
    }
}

impl From<Curve> for PathElement {
    fn from(curve: Curve) -> Self {
        PathElement::Curve(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::signed_distance_from_chord;

    fn p(name: &str, x: Real, y: Real) -> Point {
        Point::new(name, x, y, PointRole::Landmark)
    }

    #[test]
    fn zero_length_line_is_rejected() {
        let err = Line::new(p("a", 1.0, 1.0), p("b", 1.0, 1.0), PathRole::CutLine).unwrap_err();
        assert!(matches!(err, DraftError::DegenerateLine { .. }));
    }

    #[test]
    fn control_on_midpoint_is_rejected() {
        let err = Curve::new(
            p("a", 0.0, 0.0),
            p("c", 5.0, 0.0),
            p("b", 10.0, 0.0),
            PathRole::SeamLine,
        )
        .unwrap_err();
        assert!(matches!(err, DraftError::DegenerateCurve { .. }));
    }

    #[test]
    fn shaped_curve_names_its_control() {
        let curve = Curve::shaped(
            p("waist", 0.0, 0.0),
            p("hip", 0.0, -20.0),
            CurveShape::offset(1.5),
            PathRole::CutLine,
        )
        .unwrap();
        assert_eq!(curve.control().name(), "waist~hip");
        assert_eq!(curve.control().role(), PointRole::Construction);
        let mid = curve.point_at(0.5);
        let d = signed_distance_from_chord(curve.start().pos(), curve.end().pos(), mid);
        assert!((d - 1.5).abs() < 1e-9);
    }

    #[test]
    fn flat_shape_is_a_degenerate_curve() {
        let err = Curve::shaped(
            p("a", 0.0, 0.0),
            p("b", 4.0, 0.0),
            CurveShape::offset(0.0),
            PathRole::CutLine,
        )
        .unwrap_err();
        assert!(matches!(err, DraftError::DegenerateCurve { .. }));
    }

    #[test]
    fn shaping_errors_name_the_chord() {
        let err = Curve::shaped(
            p("a", 0.0, 0.0),
            p("b", 0.0, 0.0),
            CurveShape::offset(1.0),
            PathRole::CutLine,
        )
        .unwrap_err();
        assert_eq!(
            err,
            DraftError::DegenerateChord {
                start: "a".into(),
                end: "b".into()
            }
        );
    }

    #[test]
    fn element_exposes_all_points() {
        let curve = Curve::shaped(
            p("a", 0.0, 0.0),
            p("b", 4.0, 0.0),
            CurveShape::offset(1.0),
            PathRole::CutLine,
        )
        .unwrap();
        let element = PathElement::from(curve);
        let names: Vec<&str> = element.points().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["a", "a~b", "b"]);
        assert_eq!(element.polyline().len(), DEFAULT_CURVE_SAMPLES);
    }

    #[test]
    fn with_role_leaves_original() {
        let line: PathElement = Line::new(p("a", 0.0, 0.0), p("b", 1.0, 0.0), PathRole::CutLine)
            .unwrap()
            .into();
        let seam = line.with_role(PathRole::SeamLine);
        assert_eq!(line.role(), PathRole::CutLine);
        assert_eq!(seam.role(), PathRole::SeamLine);
        assert!(seam.joins("b", "a"));
    }
}
