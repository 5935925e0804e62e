//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use draftrs::{
    Line, PathRole, Point, PointRole,
    draft::{Drafter, draft},
    float_types::Real,
    piece::Piece,
};
use geo::{Area, Polygon};

/// Route `tracing` events to the test output, filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// `[min_x, min_y, max_x, max_y]` over every point of the piece whose role is `role`.
pub fn bounds_of_role(piece: &Piece, role: PointRole) -> [Real; 4] {
    let mut bounds = [Real::MAX, Real::MAX, Real::MIN, Real::MIN];
    for p in piece.points().values().filter(|p| p.role() == role) {
        bounds[0] = bounds[0].min(p.x());
        bounds[1] = bounds[1].min(p.y());
        bounds[2] = bounds[2].max(p.x());
        bounds[3] = bounds[3].max(p.y());
    }
    bounds
}

pub fn cut(name: &str, x: Real, y: Real) -> Point {
    Point::new(name, x, y, PointRole::CutPoint)
}

/// Closed polygon of cut lines through `corners`, in order.
pub fn polygon_piece(name: &str, corners: &[(&str, Real, Real)]) -> Piece {
    let points: Vec<Point> = corners.iter().map(|&(n, x, y)| cut(n, x, y)).collect();
    let mut builder = Piece::builder(name).points(points.iter().cloned());
    for i in 0..points.len() {
        let next = (i + 1) % points.len();
        builder = builder.path(Line::new(points[i].clone(), points[next].clone(), PathRole::CutLine).unwrap());
    }
    builder.build().unwrap()
}

/// Area of a derived outline, which must be counter-clockwise.
pub fn outline_area(outline: &Polygon<Real>) -> Real {
    let area = outline.signed_area();
    assert!(area > 0.0, "outline is not counter-clockwise: {area}");
    area
}

/// Run a drafter that is expected to succeed.
pub fn drafted<D: Drafter>(drafter: &D) -> Vec<Piece> {
    draft(drafter).unwrap_or_else(|e| panic!("{} failed: {e}", drafter.name()))
}
