//! Named drafting points.

use crate::float_types::Real;
use nalgebra::{Point2, Vector2};
use std::fmt;

/// What a point means on the pattern. Exporters pick marker styles from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRole {
    Construction,
    Landmark,
    Notch,
    CutPoint,
    SeamPoint,
    FoldPoint,
}

/// An immutable named 2D coordinate in centimeters.
///
/// Two points are different entities even when they sit at the same position;
/// equality compares name, position and role. Nothing mutates a point: methods
/// that "change" one return a new point that supersedes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    name: String,
    pos: Point2<Real>,
    role: PointRole,
}

impl Point {
    /// Create a new [`Point`].
    ///
    /// * `name` – display name, unique within the piece that registers it
    /// * `x`, `y` – position in centimeters
    /// * `role` – semantic role of the point
    pub fn new(name: impl Into<String>, x: Real, y: Real, role: PointRole) -> Self {
        Point {
            name: name.into(),
            pos: Point2::new(x, y),
            role,
        }
    }

    /// Create a point from an existing nalgebra position.
    pub fn at(name: impl Into<String>, pos: Point2<Real>, role: PointRole) -> Self {
        Point {
            name: name.into(),
            pos,
            role,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> Real {
        self.pos.x
    }

    pub fn y(&self) -> Real {
        self.pos.y
    }

    pub const fn pos(&self) -> Point2<Real> {
        self.pos
    }

    pub const fn role(&self) -> PointRole {
        self.role
    }

    pub fn is_finite(&self) -> bool {
        self.pos.x.is_finite() && self.pos.y.is_finite()
    }

    /// Same name and position, different role.
    pub fn with_role(&self, role: PointRole) -> Point {
        Point {
            name: self.name.clone(),
            pos: self.pos,
            role,
        }
    }

    /// A new point named `name`, displaced from this one by `offset`.
    pub fn offset_by(&self, name: impl Into<String>, offset: Vector2<Real>, role: PointRole) -> Point {
        Point::at(name, self.pos + offset, role)
    }

    /// True when `other` carries the same name at the same position.
    /// Roles may differ: a re-tagged point still stands for the same landmark.
    pub fn same_place(&self, other: &Point) -> bool {
        self.name == other.name && self.pos == other.pos
    }

    /// Euclidean distance between point positions.
    pub fn distance_to(&self, other: &Point) -> Real {
        (self.pos - other.pos).norm()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3}, {:.3})", self.name, self.pos.x, self.pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_are_distinct() {
        let a = Point::new("a", 1.0, 2.0, PointRole::Landmark);
        let b = Point::new("b", 1.0, 2.0, PointRole::Landmark);
        assert_ne!(a, b);
        assert_eq!(a.distance_to(&b), 0.0);
    }

    #[test]
    fn with_role_keeps_identity() {
        let a = Point::new("corner", 3.0, 4.0, PointRole::CutPoint);
        let b = a.with_role(PointRole::SeamPoint);
        assert_eq!(b.role(), PointRole::SeamPoint);
        assert!(a.same_place(&b));
        assert_ne!(a, b);
        // the original is untouched
        assert_eq!(a.role(), PointRole::CutPoint);
    }

    #[test]
    fn offset_by_moves_position() {
        let a = Point::new("a", 1.0, 1.0, PointRole::Landmark);
        let b = a.offset_by("b", Vector2::new(2.0, -1.0), PointRole::Notch);
        assert_eq!(b.pos(), Point2::new(3.0, 0.0));
        assert_eq!(b.name(), "b");
    }
}
