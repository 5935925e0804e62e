//! **Seam allowance by rounded polygon offsetting**
//!
//! The seam allowance of a piece is its outline grown outward by a uniform width,
//! the Minkowski sum of the outline with a disk of that radius:
//! ```text
//! P ⊕ D = {p + d | p ∈ P, d ∈ D}
//! ```
//! Straight edges move parallel to themselves by the width and convex corners
//! are joined by circular arcs centred on the original vertex, which is how a
//! cutter walks around a corner at a fixed distance from the sewing line.
//!
//! The offset itself comes from `geo-buf`, which resolves the self-intersections
//! that concave corners produce.

use super::Piece;
use crate::errors::DraftError;
use crate::float_types::{CHORD_EPSILON, Real};
use crate::log;
use crate::path::{Line, PathElement, PathRole};
use crate::point::{Point, PointRole};
use geo::{Area, Coord, MultiPolygon};
use geo_buf::buffer_polygon_rounded;

/// Prefix of the point names on a seam-allowance ring (`sa0`, `sa1`, ...).
/// A piece that already carries a ring gets `sa1_0`, `sa1_1`, ... instead.
pub const SEAM_ALLOWANCE_PREFIX: &str = "sa";

impl Piece {
    /// **Seam-allowance variant of this piece**
    ///
    /// Returns a new piece whose cutting boundary is the outline grown outward by
    /// `width`, with rounded corners:
    /// - original points are kept by name and position; cut points become seam points
    /// - original cut lines become seam lines, other paths are untouched
    /// - a ring of `sa{i}` cut points joined by cut lines traces the expanded
    ///   boundary and closes back to `sa0`
    ///
    /// A width of zero returns an unchanged copy. When no outline can be derived the
    /// unchanged piece is returned as well and a warning is logged: no allowance
    /// geometry is invented.
    pub fn with_seam_allowance(&self, width: Real) -> Result<Piece, DraftError> {
        if !(width >= 0.0 && width.is_finite()) {
            return Err(DraftError::InvalidSeamAllowance(width));
        }
        if width == 0.0 {
            return Ok(self.clone());
        }

        let outline = match self.outline() {
            Ok(outline) => outline,
            Err(error) => {
                log::warn!(piece = %self.name, %error, "skipping seam allowance");
                return Ok(self.clone());
            },
        };

        let buffered: MultiPolygon<Real> = buffer_polygon_rounded(&outline, width);
        let Some(grown) = buffered
            .0
            .iter()
            .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
        else {
            log::warn!(piece = %self.name, "offset produced no polygon, skipping seam allowance");
            return Ok(self.clone());
        };

        let ring = dedup_ring(&grown.exterior().0);
        if ring.len() < 3 {
            log::warn!(piece = %self.name, "offset ring collapsed, skipping seam allowance");
            return Ok(self.clone());
        }
        log::debug!(piece = %self.name, width, vertices = ring.len(), "seam allowance ring");

        let retag = |p: &Point| match p.role() {
            PointRole::CutPoint => p.with_role(PointRole::SeamPoint),
            _ => p.clone(),
        };

        let points = self.sorted_points().into_iter().map(retag);
        let paths = self.paths.iter().map(|path| {
            let path = path.map_points(retag);
            match path.role() {
                PathRole::CutLine => path.with_role(PathRole::SeamLine),
                _ => path,
            }
        });

        let prefix = ring_prefix(self, ring.len());
        let ring_points: Vec<Point> = ring
            .iter()
            .enumerate()
            .map(|(i, c)| Point::new(format!("{prefix}{i}"), c.x, c.y, PointRole::CutPoint))
            .collect();

        let mut builder = self
            .metadata_builder()
            .seam_allowance(width)
            .points(points)
            .paths(paths)
            .points(ring_points.iter().cloned());

        for i in 0..ring_points.len() {
            let next = (i + 1) % ring_points.len();
            let line = Line::new(ring_points[i].clone(), ring_points[next].clone(), PathRole::CutLine)?;
            builder = builder.path(PathElement::Line(line));
        }

        builder.build()
    }

    /// Seam-allowance variant using the width configured on this piece.
    pub fn seam_allowance_variant(&self) -> Result<Piece, DraftError> {
        self.with_seam_allowance(self.seam_allowance)
    }
}

/// First `sa`, `sa1_`, `sa2_`, ... prefix whose ring names are all free on `piece`.
fn ring_prefix(piece: &Piece, len: usize) -> String {
    (0..)
        .map(|k| match k {
            0 => SEAM_ALLOWANCE_PREFIX.to_string(),
            k => format!("{SEAM_ALLOWANCE_PREFIX}{k}_"),
        })
        .find(|prefix| (0..len).all(|i| piece.point(&format!("{prefix}{i}")).is_none()))
        .unwrap_or_default()
}

/// Open ring without the closing coordinate or vertices closer than the chord minimum.
fn dedup_ring(closed: &[Coord<Real>]) -> Vec<Coord<Real>> {
    let mut ring: Vec<Coord<Real>> = Vec::with_capacity(closed.len());
    for &c in closed {
        match ring.last() {
            Some(last) if distance(*last, c) < CHORD_EPSILON => {},
            _ => ring.push(c),
        }
    }
    while ring.len() > 1 && distance(ring[0], ring[ring.len() - 1]) < CHORD_EPSILON {
        ring.pop();
    }
    ring
}

fn distance(a: Coord<Real>, b: Coord<Real>) -> Real {
    (a.x - b.x).hypot(a.y - b.y)
}
