#![cfg(feature = "offset")]

mod support;

use draftrs::{
    DraftError, Line, Piece, Measurements, Options, PathRole, Pattern, PointRole,
    blocks::{RectangleDrafter, SkirtDrafter},
    float_types::Real,
    piece::offset::SEAM_ALLOWANCE_PREFIX,
};
use geo::Area;
use support::{approx_eq, bounds_of_role, cut, drafted, init_logging, polygon_piece};

#[test]
fn rectangle_grows_by_the_allowance() {
    init_logging();
    let piece = polygon_piece("r", &[("a", 0.0, 0.0), ("b", 10.0, 0.0), ("c", 10.0, 5.0), ("d", 0.0, 5.0)]);
    let with_sa = piece.with_seam_allowance(1.0).unwrap();

    let [min_x, min_y, max_x, max_y] = bounds_of_role(&with_sa, PointRole::CutPoint);
    println!("seam allowance bounds: {min_x} {min_y} {max_x} {max_y}");
    assert!(approx_eq(min_x, -1.0, 1e-6));
    assert!(approx_eq(min_y, -1.0, 1e-6));
    assert!(approx_eq(max_x, 11.0, 1e-6));
    assert!(approx_eq(max_y, 6.0, 1e-6));

    // the original corners stay put, now as seam points
    for name in ["a", "b", "c", "d"] {
        let corner = with_sa.point(name).unwrap();
        assert_eq!(corner.role(), PointRole::SeamPoint);
        assert_eq!(corner.pos(), piece.point(name).unwrap().pos());
    }
    assert_eq!(with_sa.paths_with_role(PathRole::SeamLine).count(), 4);
    assert_eq!(with_sa.seam_allowance(), 1.0);
}

#[test]
fn concave_piece_grows_by_the_allowance() {
    init_logging();
    let piece = polygon_piece(
        "ell",
        &[
            ("a", 0.0, 0.0),
            ("b", 10.0, 0.0),
            ("c", 10.0, 5.0),
            ("d", 5.0, 5.0),
            ("e", 5.0, 10.0),
            ("f", 0.0, 10.0),
        ],
    );
    let with_sa = piece.with_seam_allowance(1.0).unwrap();

    let [min_x, min_y, max_x, max_y] = bounds_of_role(&with_sa, PointRole::CutPoint);
    assert!(approx_eq(min_x, -1.0, 1e-6));
    assert!(approx_eq(min_y, -1.0, 1e-6));
    assert!(approx_eq(max_x, 11.0, 1e-6));
    assert!(approx_eq(max_y, 11.0, 1e-6));

    // the inner corner is filled by a margin, not cut off
    let before = piece.outline().unwrap().unsigned_area();
    let after = with_sa.outline().unwrap().unsigned_area();
    assert!(approx_eq(before, 75.0, 1e-9));
    assert!(after > before + 38.0 && after < before + 45.0, "area {after}");
}

#[test]
fn bridged_shapes_wrap_a_single_region() {
    init_logging();
    let left = polygon_piece("left", &[("a", 0.0, 0.0), ("b", 10.0, 0.0), ("c", 10.0, 5.0), ("d", 0.0, 5.0)]);
    let right = polygon_piece("right", &[("e", 20.0, 0.0), ("f", 30.0, 0.0), ("g", 30.0, 5.0), ("h", 20.0, 5.0)]);
    let bridge = Line::new(cut("b", 10.0, 0.0), cut("e", 20.0, 0.0), PathRole::CutLine).unwrap();
    let piece = Piece::builder("pair")
        .points(left.points().values().chain(right.points().values()).cloned())
        .paths(left.paths().iter().chain(right.paths()).cloned())
        .path(bridge)
        .build()
        .unwrap();

    let with_sa = piece.with_seam_allowance(1.0).unwrap();
    let [min_x, min_y, max_x, max_y] = bounds_of_role(&with_sa, PointRole::CutPoint);
    assert!(approx_eq(max_x - min_x, 12.0, 1e-6), "{min_x}..{max_x}");
    assert!(approx_eq(min_y, -1.0, 1e-6));
    assert!(approx_eq(max_y, 6.0, 1e-6));
}

#[test]
fn piece_without_outline_is_returned_unchanged() {
    init_logging();
    let open = Piece::builder("open")
        .point(cut("a", 0.0, 0.0))
        .point(cut("b", 5.0, 0.0))
        .path(Line::new(cut("a", 0.0, 0.0), cut("b", 5.0, 0.0), PathRole::CutLine).unwrap())
        .build()
        .unwrap();
    assert_eq!(open.with_seam_allowance(1.0).unwrap(), open);
}

#[test]
fn allowance_ring_is_closed_and_named_in_order() {
    let piece = polygon_piece("r", &[("a", 0.0, 0.0), ("b", 10.0, 0.0), ("c", 10.0, 5.0), ("d", 0.0, 5.0)]);
    let with_sa = piece.with_seam_allowance(1.0).unwrap();
    let ring: Vec<_> = with_sa
        .points()
        .values()
        .filter(|p| p.role() == PointRole::CutPoint)
        .collect();
    assert!(ring.len() > 4, "rounded corners add vertices");
    for i in 0..ring.len() {
        assert!(with_sa.point(&format!("{SEAM_ALLOWANCE_PREFIX}{i}")).is_some());
    }
    let cut_lines = with_sa.paths_with_role(PathRole::CutLine).count();
    assert_eq!(cut_lines, ring.len());
    let last = format!("{SEAM_ALLOWANCE_PREFIX}{}", ring.len() - 1);
    assert!(with_sa.edge(&last, "sa0").is_some());

    // the new cutting boundary encloses the rectangle plus a rounded margin
    let area = with_sa.outline().unwrap().unsigned_area();
    // corner arcs are approximated, so the quarter circles add a little under pi
    let straight = 50.0 + 2.0 * (10.0 + 5.0) * 1.0;
    assert!(area > straight + 2.0 && area < straight + std::f64::consts::PI + 0.5, "area {area}");
}

#[test]
fn zero_width_is_a_copy() {
    let piece = drafted(&RectangleDrafter::new("r", 4.0, 4.0)).remove(0);
    assert_eq!(piece.with_seam_allowance(0.0).unwrap(), piece);
    assert!(matches!(
        piece.with_seam_allowance(Real::INFINITY),
        Err(DraftError::InvalidSeamAllowance(_))
    ));
}

#[test]
fn applying_twice_keeps_names_unique() {
    let piece = drafted(&RectangleDrafter::new("r", 6.0, 3.0)).remove(0);
    let once = piece.with_seam_allowance(1.0).unwrap();
    let twice = once.with_seam_allowance(0.5).unwrap();
    assert!(twice.point("sa1_0").is_some());
    assert!(twice.points().len() > once.points().len());
}

#[test]
fn pattern_applies_each_piece_allowance() {
    let options = Options {
        seam_allowance: 1.5,
        ..Options::default()
    };
    let mut pattern = Pattern::new("skirt");
    pattern.draft(&SkirtDrafter::new(Measurements::default(), options)).unwrap();
    pattern.draft(&RectangleDrafter::new("label", 3.0, 2.0)).unwrap();

    let with_sa = pattern.with_seam_allowances().unwrap();
    assert_eq!(with_sa.len(), 3);

    let front = pattern.piece("skirt front").unwrap();
    let front_sa = with_sa.piece("skirt front").unwrap();
    let before = front.outline().unwrap().unsigned_area();
    let after = front_sa.outline().unwrap().unsigned_area();
    assert!(after > before);
    assert_eq!(front_sa.point("hem_cf").unwrap().role(), PointRole::SeamPoint);
    assert!(front_sa.cut_on_fold());

    // zero allowance leaves the label untouched
    assert_eq!(with_sa.piece("label"), pattern.piece("label"));
}
