//! Line intersection for resolving construction geometry.
//!
//! For A(p1→p2) and B(p3→p4) the extended lines meet where
//! ```text
//! det = (x1−x2)(y3−y4) − (y1−y2)(x3−x4)
//! t   =  ((x1−x3)(y3−y4) − (y1−y3)(x3−x4)) / det      (along A)
//! u   = −((x1−x2)(y1−y3) − (y1−y2)(x1−x3)) / det      (along B)
//! ```
//! `|det| < 1e-4` is treated as parallel. "No intersection" is an ordinary
//! outcome here, returned as `None`.

use crate::float_types::{PARALLEL_EPSILON, Real};
use crate::path::Line;
use nalgebra::Point2;

/// Which part of the two lines an intersection may fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntersectionMode {
    /// Both parameters must lie in [0, 1]: a true segment crossing.
    Segments,
    /// Anywhere on the infinite extensions of both lines.
    #[default]
    Extended,
}

/// Intersection of the lines through `(p1, p2)` and `(p3, p4)`.
pub fn intersect(
    p1: Point2<Real>,
    p2: Point2<Real>,
    p3: Point2<Real>,
    p4: Point2<Real>,
    mode: IntersectionMode,
) -> Option<Point2<Real>> {
    let det = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / det;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / det;

    if mode == IntersectionMode::Segments && !((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)) {
        return None;
    }

    Some(p1 + (p2 - p1) * t)
}

/// Intersection of two drafted lines.
pub fn intersect_lines(a: &Line, b: &Line, mode: IntersectionMode) -> Option<Point2<Real>> {
    intersect(
        a.start().pos(),
        a.end().pos(),
        b.start().pos(),
        b.end().pos(),
        mode,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point2<Real>, b: Point2<Real>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn crossing_segments() {
        let hit = intersect(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 0.0),
            IntersectionMode::Segments,
        )
        .unwrap();
        assert!(close(hit, Point2::new(2.0, 2.0)));
    }

    #[test]
    fn parallel_lines_do_not_meet() {
        for mode in [IntersectionMode::Segments, IntersectionMode::Extended] {
            assert!(
                intersect(
                    Point2::new(0.0, 0.0),
                    Point2::new(5.0, 1.0),
                    Point2::new(0.0, 2.0),
                    Point2::new(5.0, 3.0),
                    mode,
                )
                .is_none()
            );
        }
    }

    #[test]
    fn extension_only_hit_depends_on_mode() {
        let (p1, p2) = (Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let (p3, p4) = (Point2::new(3.0, 1.0), Point2::new(3.0, 2.0));
        assert!(intersect(p1, p2, p3, p4, IntersectionMode::Segments).is_none());
        let hit = intersect(p1, p2, p3, p4, IntersectionMode::Extended).unwrap();
        assert!(close(hit, Point2::new(3.0, 0.0)));
    }

    #[test]
    fn touching_endpoints_count_as_segment_hit() {
        let hit = intersect(
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 3.0),
            IntersectionMode::Segments,
        )
        .unwrap();
        assert!(close(hit, Point2::new(2.0, 0.0)));
    }
}
