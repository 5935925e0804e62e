//! **Outline derivation by polygonizing a piece's boundary paths**
//!
//! A piece does not store its outline; it is recovered from the visible cut and
//! seam lines every time it is needed.
//!
//! ## **Algorithm**
//! 1. **Discretize**: lines contribute one segment, curves their default sampling.
//! 2. **Node**: every pair of segments is intersected (`geo`'s robust
//!    `line_intersection`), and each segment is split at every crossing, touch
//!    point and collinear-overlap endpoint. Vertices are snapped to the
//!    [`tolerance`] grid so shared endpoints become one graph vertex.
//! 3. **Prune**: vertices of degree 1 (stray or overshooting segments) are
//!    removed repeatedly, then bridges (edges with the same face on both
//!    sides, such as a cut line joining two closed shapes) are removed, until
//!    only edges separating two different faces remain.
//! 4. **Walk faces**: at each vertex the outgoing edges are sorted by angle; the
//!    successor of half-edge u→v is the edge leaving v just clockwise of v→u.
//!    Bounded faces come out counter-clockwise (positive area), and the outer
//!    boundary of each connected region comes out clockwise.
//! 5. **Split**: a walk that passes a vertex twice (two regions touching at a
//!    point) is cut there into simple rings.
//! 6. **Select**: every clockwise ring is a region outline; the largest one wins.
//!
//! Internal seam lines therefore split faces without changing the outline.

use super::Piece;
use crate::errors::OutlineError;
use crate::float_types::{Real, tolerance};
use crate::log;
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, Line as GeoLine, LineString, Polygon};
use hashbrown::{HashMap, HashSet};

impl Piece {
    /// Closed boundary polygon of the piece, counter-clockwise.
    ///
    /// Fails softly: callers treat an error as "no outline, no seam allowance",
    /// and the piece stays usable for rendering its raw paths.
    pub fn outline(&self) -> Result<Polygon<Real>, OutlineError> {
        let segments = boundary_segments(self);
        if segments.is_empty() {
            return Err(OutlineError::NoBoundaryPaths(self.name.clone()));
        }

        let regions = polygonize(&segments);
        if regions.len() > 1 {
            log::debug!(
                piece = %self.name,
                regions = regions.len(),
                "outline has several closed regions, keeping the largest"
            );
        }

        regions
            .into_iter()
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, ring)| Polygon::new(LineString::from(ring), vec![]))
            .ok_or_else(|| OutlineError::NoClosedRegion(self.name.clone()))
    }
}

/// Visible cut/seam paths as straight segments.
fn boundary_segments(piece: &Piece) -> Vec<GeoLine<Real>> {
    piece
        .paths
        .iter()
        .filter(|p| p.visible() && p.role().is_boundary())
        .flat_map(|p| {
            p.polyline()
                .windows(2)
                .map(|w| GeoLine::new(Coord { x: w[0].x, y: w[0].y }, Coord { x: w[1].x, y: w[1].y }))
                .collect::<Vec<_>>()
        })
        .filter(|l| l.dx() != 0.0 || l.dy() != 0.0)
        .collect()
}

/// Planar graph over snapped vertices.
#[derive(Default)]
struct Graph {
    coords: Vec<Coord<Real>>,
    index: HashMap<(i64, i64), usize>,
    edges: HashSet<(usize, usize)>,
}

impl Graph {
    fn vertex(&mut self, c: Coord<Real>, snap: Real) -> usize {
        let key = ((c.x / snap).round() as i64, (c.y / snap).round() as i64);
        if let Some(&i) = self.index.get(&key) {
            return i;
        }
        self.coords.push(c);
        self.index.insert(key, self.coords.len() - 1);
        self.coords.len() - 1
    }

    fn add_edge(&mut self, a: usize, b: usize) {
        if a != b {
            self.edges.insert((a.min(b), a.max(b)));
        }
    }

    /// Drop edges hanging off degree-1 vertices until none remain.
    fn prune_dangling(&mut self) {
        loop {
            let mut degree: HashMap<usize, usize> = HashMap::new();
            for &(a, b) in &self.edges {
                *degree.entry(a).or_default() += 1;
                *degree.entry(b).or_default() += 1;
            }
            let before = self.edges.len();
            self.edges
                .retain(|(a, b)| degree[a] > 1 && degree[b] > 1);
            if self.edges.len() == before {
                break;
            }
        }
    }

    /// Drop edges that have the same face on both sides.
    ///
    /// Such an edge bounds nothing; it only bridges two regions or hangs inside
    /// one. Returns whether anything was removed.
    fn remove_bridges(&mut self) -> bool {
        let mut face_of: HashMap<(usize, usize), usize> = HashMap::new();
        for (id, face) in faces(self).into_iter().enumerate() {
            for half_edge in face {
                face_of.insert(half_edge, id);
            }
        }
        let before = self.edges.len();
        self.edges
            .retain(|&(a, b)| face_of.get(&(a, b)) != face_of.get(&(b, a)));
        self.edges.len() != before
    }

    /// Outgoing neighbours of every vertex, sorted counter-clockwise by angle.
    fn sorted_adjacency(&self) -> HashMap<usize, Vec<usize>> {
        let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();
        for &(a, b) in &self.edges {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }
        for (&v, neighbours) in adjacency.iter_mut() {
            let origin = self.coords[v];
            neighbours.sort_by(|&p, &q| {
                let ap = angle(origin, self.coords[p]);
                let aq = angle(origin, self.coords[q]);
                ap.total_cmp(&aq)
            });
        }
        adjacency
    }
}

fn angle(from: Coord<Real>, to: Coord<Real>) -> Real {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Split every segment at its intersections with the others.
fn node(segments: &[GeoLine<Real>]) -> Graph {
    let snap = tolerance();
    let mut splits: Vec<Vec<Coord<Real>>> = segments.iter().map(|s| vec![s.start, s.end]).collect();

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            match line_intersection(segments[i], segments[j]) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    splits[i].push(intersection);
                    splits[j].push(intersection);
                },
                Some(LineIntersection::Collinear { intersection }) => {
                    for c in [intersection.start, intersection.end] {
                        splits[i].push(c);
                        splits[j].push(c);
                    }
                },
                None => {},
            }
        }
    }

    let mut graph = Graph::default();
    for (segment, mut cuts) in segments.iter().zip(splits) {
        let origin = segment.start;
        let (dx, dy) = (segment.dx(), segment.dy());
        cuts.sort_by(|a, b| {
            let ta = (a.x - origin.x) * dx + (a.y - origin.y) * dy;
            let tb = (b.x - origin.x) * dx + (b.y - origin.y) * dy;
            ta.total_cmp(&tb)
        });
        let ids: Vec<usize> = cuts.into_iter().map(|c| graph.vertex(c, snap)).collect();
        for w in ids.windows(2) {
            graph.add_edge(w[0], w[1]);
        }
    }
    graph
}

/// Closed regions of the arrangement as (area, counter-clockwise ring).
fn polygonize(segments: &[GeoLine<Real>]) -> Vec<(Real, Vec<Coord<Real>>)> {
    let mut graph = node(segments);
    graph.prune_dangling();
    while graph.remove_bridges() {
        graph.prune_dangling();
    }
    if graph.edges.is_empty() {
        return Vec::new();
    }

    let mut regions = Vec::new();
    for face in faces(&graph) {
        let walk: Vec<usize> = face.iter().map(|&(u, _)| u).collect();
        for simple in simple_rings(&walk) {
            let ring: Vec<Coord<Real>> = simple.iter().map(|&i| graph.coords[i]).collect();
            let area = signed_area(&ring);
            // Clockwise rings are the outer boundaries of connected regions.
            if ring.len() >= 3 && area < -tolerance() {
                let mut ccw = ring;
                ccw.reverse();
                regions.push((-area, ccw));
            }
        }
    }
    regions
}

/// Every face of the graph as its closed cycle of half-edges.
fn faces(graph: &Graph) -> Vec<Vec<(usize, usize)>> {
    let adjacency = graph.sorted_adjacency();
    let half_edges = graph.edges.len() * 2;
    let mut visited: HashSet<(usize, usize)> = HashSet::with_capacity(half_edges);
    let mut faces = Vec::new();

    // Deterministic start order regardless of hash iteration.
    let mut starts: Vec<(usize, usize)> = graph
        .edges
        .iter()
        .flat_map(|&(a, b)| [(a, b), (b, a)])
        .collect();
    starts.sort_unstable();

    for start in starts {
        if visited.contains(&start) {
            continue;
        }
        let mut face = Vec::new();
        let (mut u, mut v) = start;
        for _ in 0..=half_edges {
            visited.insert((u, v));
            face.push((u, v));
            let around = &adjacency[&v];
            let back = around.iter().position(|&w| w == u).unwrap_or(0);
            let next = around[(back + around.len() - 1) % around.len()];
            u = v;
            v = next;
            if (u, v) == start {
                break;
            }
        }
        faces.push(face);
    }
    faces
}

/// Split a closed vertex walk wherever it revisits a vertex.
///
/// A walk pinched at `p` such as `p a b p c d` becomes `p a b` and `p c d`.
fn simple_rings(walk: &[usize]) -> Vec<Vec<usize>> {
    let mut rings = Vec::new();
    let mut open: Vec<usize> = Vec::with_capacity(walk.len());
    for &v in walk {
        if let Some(k) = open.iter().position(|&w| w == v) {
            rings.push(open.split_off(k));
        }
        open.push(v);
    }
    rings.push(open);
    rings
}

fn signed_area(ring: &[Coord<Real>]) -> Real {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<Real>()
        * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveShape;
    use crate::path::{Curve, Line, PathRole};
    use crate::point::{Point, PointRole};
    use geo::{Area, BoundingRect};

    fn pt(name: &str, x: Real, y: Real) -> Point {
        Point::new(name, x, y, PointRole::CutPoint)
    }

    fn rectangle_with(extra: Vec<crate::path::PathElement>, extra_points: Vec<Point>) -> Piece {
        let c = [pt("a", 0.0, 0.0), pt("b", 10.0, 0.0), pt("c", 10.0, 5.0), pt("d", 0.0, 5.0)];
        let mut builder = Piece::builder("rect").points(c.iter().cloned()).points(extra_points);
        for i in 0..4 {
            builder = builder.path(Line::new(c[i].clone(), c[(i + 1) % 4].clone(), PathRole::CutLine).unwrap());
        }
        builder.paths(extra).build().unwrap()
    }

    #[test]
    fn rectangle_outline() {
        let outline = rectangle_with(vec![], vec![]).outline().unwrap();
        assert!((outline.signed_area() - 50.0).abs() < 1e-9);
        let bounds = outline.bounding_rect().unwrap();
        assert_eq!((bounds.min().x, bounds.min().y), (0.0, 0.0));
        assert_eq!((bounds.max().x, bounds.max().y), (10.0, 5.0));
    }

    #[test]
    fn internal_seam_does_not_split_outline() {
        let m1 = pt("m1", 5.0, 0.0);
        let m2 = pt("m2", 5.0, 5.0);
        let seam = Line::new(m1.clone(), m2.clone(), PathRole::SeamLine).unwrap();
        let outline = rectangle_with(vec![seam.into()], vec![m1, m2]).outline().unwrap();
        assert!((outline.unsigned_area() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn stray_segments_are_ignored() {
        let s1 = pt("s1", 20.0, 20.0);
        let s2 = pt("s2", 25.0, 21.0);
        let o1 = pt("o1", 10.0, 2.0);
        let o2 = pt("o2", 14.0, 2.0);
        let stray = Line::new(s1.clone(), s2.clone(), PathRole::CutLine).unwrap();
        let spur = Line::new(o1.clone(), o2.clone(), PathRole::CutLine).unwrap();
        let piece = rectangle_with(vec![stray.into(), spur.into()], vec![s1, s2, o1, o2]);
        let outline = piece.outline().unwrap();
        assert!((outline.unsigned_area() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn hidden_and_annotation_paths_do_not_count() {
        let a = pt("a", 0.0, 0.0);
        let b = pt("b", 4.0, 0.0);
        let c = pt("c", 0.0, 4.0);
        let piece = Piece::builder("tri")
            .points([a.clone(), b.clone(), c.clone()])
            .path(Line::new(a.clone(), b.clone(), PathRole::CutLine).unwrap())
            .path(Line::new(b.clone(), c.clone(), PathRole::CutLine).unwrap().with_visibility(false))
            .path(Line::new(c, a, PathRole::FoldLine).unwrap())
            .build()
            .unwrap();
        assert_eq!(piece.outline().unwrap_err(), OutlineError::NoClosedRegion("tri".into()));
    }

    #[test]
    fn no_boundary_paths() {
        let piece = Piece::builder("empty").build().unwrap();
        assert_eq!(piece.outline().unwrap_err(), OutlineError::NoBoundaryPaths("empty".into()));
    }

    #[test]
    fn curved_edge_is_discretized() {
        let a = pt("a", 0.0, 0.0);
        let b = pt("b", 10.0, 0.0);
        let top = Curve::shaped(b.clone(), a.clone(), CurveShape::offset(3.0), PathRole::CutLine).unwrap();
        let piece = Piece::builder("lens")
            .points([a.clone(), b.clone(), top.control().clone()])
            .path(Line::new(a, b, PathRole::CutLine).unwrap())
            .path(top)
            .build()
            .unwrap();
        let outline = piece.outline().unwrap();
        // area under a parabola of height 3 over a 10 cm chord is 2/3 * 10 * 3
        assert!((outline.unsigned_area() - 20.0).abs() < 0.2);
        // 20 distinct vertices, closed by repeating the first
        assert_eq!(outline.exterior().0.len(), 21);
    }

    fn closed_polygon(name: &str, corners: &[Point]) -> Vec<crate::path::PathElement> {
        let n = corners.len();
        (0..n)
            .map(|i| {
                let line = Line::new(corners[i].clone(), corners[(i + 1) % n].clone(), PathRole::CutLine);
                line.unwrap_or_else(|e| panic!("{name}: {e}")).into()
            })
            .collect()
    }

    #[test]
    fn bow_tie_splits_at_the_crossing() {
        // edges a-b and c-d cross at (5, 5)
        let corners = [pt("a", 0.0, 0.0), pt("b", 10.0, 10.0), pt("c", 10.0, 0.0), pt("d", 0.0, 10.0)];
        let piece = Piece::builder("bow tie")
            .points(corners.iter().cloned())
            .paths(closed_polygon("bow tie", &corners))
            .build()
            .unwrap();
        let outline = piece.outline().unwrap();
        assert!((outline.signed_area() - 25.0).abs() < 1e-9);

        // one triangle, no vertex visited twice
        let ring = &outline.exterior().0;
        assert_eq!(ring.len(), 4);
        for i in 0..3 {
            for j in (i + 1)..3 {
                assert_ne!(ring[i], ring[j]);
            }
        }
    }

    #[test]
    fn bridge_between_two_shapes_is_not_boundary() {
        let left = [pt("a", 0.0, 0.0), pt("b", 10.0, 0.0), pt("c", 10.0, 5.0), pt("d", 0.0, 5.0)];
        let right = [pt("e", 20.0, 0.0), pt("f", 30.0, 0.0), pt("g", 30.0, 5.0), pt("h", 20.0, 5.0)];
        let bridge = Line::new(left[1].clone(), right[0].clone(), PathRole::CutLine).unwrap();
        let piece = Piece::builder("pair")
            .points(left.iter().chain(&right).cloned())
            .paths(closed_polygon("left", &left))
            .paths(closed_polygon("right", &right))
            .path(bridge)
            .build()
            .unwrap();

        let outline = piece.outline().unwrap();
        assert!((outline.signed_area() - 50.0).abs() < 1e-9);
        assert_eq!(outline.exterior().0.len(), 5);
        let bounds = outline.bounding_rect().unwrap();
        assert!((bounds.width() - 10.0).abs() < 1e-9);
        assert!((bounds.height() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn pinched_walk_becomes_simple_rings() {
        assert_eq!(simple_rings(&[7, 1, 2, 7, 3, 4]), vec![vec![7, 1, 2], vec![7, 3, 4]]);
        assert_eq!(simple_rings(&[1, 2, 3]), vec![vec![1, 2, 3]]);
    }
}
