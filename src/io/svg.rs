//! SVG rendering of pieces and patterns.
//!
//! Drafting coordinates are y-up centimeters; SVG is y-down, so every piece is
//! flipped about its own bounding box. Pattern pieces are laid out left to
//! right with a fixed gap. Hidden paths are never drawn.

use crate::float_types::Real;
use crate::path::{PathElement, PathRole};
use crate::pattern::Pattern;
use crate::piece::Piece;
use crate::point::PointRole;
use geo::Rect;
use std::path::Path as FsPath;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path};

/// Horizontal gap between laid-out pieces, and the page margin.
const GAP: Real = 5.0;
const NOTCH_RADIUS: Real = 0.3;

pub trait ToSVG {
    fn to_svg(&self) -> String;

    /// Write the SVG document to `path`.
    fn write_svg(&self, path: impl AsRef<FsPath>) -> std::io::Result<()> {
        std::fs::write(path, self.to_svg())
    }
}

/// Stroke for one path role: colour, width and dash pattern.
struct Stroke {
    color: &'static str,
    width: Real,
    dash: Option<&'static str>,
}

const fn stroke(role: PathRole) -> Stroke {
    match role {
        PathRole::CutLine => Stroke {
            color: "black",
            width: 0.1,
            dash: None,
        },
        PathRole::SeamLine => Stroke {
            color: "dimgray",
            width: 0.05,
            dash: Some("0.4 0.2"),
        },
        PathRole::FoldLine => Stroke {
            color: "steelblue",
            width: 0.06,
            dash: Some("1 0.3 0.2 0.3"),
        },
        PathRole::ConstructionLine => Stroke {
            color: "silver",
            width: 0.03,
            dash: Some("0.2 0.2"),
        },
        PathRole::GrainLine => Stroke {
            color: "seagreen",
            width: 0.08,
            dash: None,
        },
        PathRole::ButtonLine => Stroke {
            color: "purple",
            width: 0.05,
            dash: Some("0.5 0.2"),
        },
        PathRole::HemLine => Stroke {
            color: "sienna",
            width: 0.05,
            dash: Some("0.6 0.2"),
        },
    }
}

/// Maps drafting coordinates of one piece into page coordinates.
#[derive(Clone, Copy)]
struct Placement {
    left: Real,
    top: Real,
    min_x: Real,
    max_y: Real,
}

impl Placement {
    fn new(bounds: Rect<Real>, left: Real, top: Real) -> Self {
        Placement {
            left,
            top,
            min_x: bounds.min().x,
            max_y: bounds.max().y,
        }
    }

    fn map(&self, x: Real, y: Real) -> (f32, f32) {
        ((x - self.min_x + self.left) as f32, (self.max_y - y + self.top) as f32)
    }
}

fn path_data(path: &PathElement, place: Placement) -> Data {
    match path {
        PathElement::Line(line) => Data::new()
            .move_to(place.map(line.start().x(), line.start().y()))
            .line_to(place.map(line.end().x(), line.end().y())),
        PathElement::Curve(curve) => {
            let (cx, cy) = place.map(curve.control().x(), curve.control().y());
            let (ex, ey) = place.map(curve.end().x(), curve.end().y());
            Data::new()
                .move_to(place.map(curve.start().x(), curve.start().y()))
                .quadratic_curve_to((cx, cy, ex, ey))
        },
    }
}

fn piece_group(piece: &Piece, place: Placement) -> Group {
    let mut group = Group::new().set("id", piece.name());

    for path in piece.paths().iter().filter(|p| p.visible()) {
        let style = stroke(path.role());
        let mut element = Path::new()
            .set("fill", "none")
            .set("stroke", style.color)
            .set("stroke-width", style.width)
            .set("d", path_data(path, place));
        if let Some(dash) = style.dash {
            element = element.set("stroke-dasharray", dash);
        }
        group = group.add(element);
    }

    for notch in piece
        .sorted_points()
        .into_iter()
        .filter(|p| p.role() == PointRole::Notch)
    {
        let (cx, cy) = place.map(notch.x(), notch.y());
        group = group.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", NOTCH_RADIUS)
                .set("fill", "black"),
        );
    }
    group
}

fn document(width: Real, height: Real) -> Document {
    Document::new()
        .set("width", format!("{width}cm"))
        .set("height", format!("{height}cm"))
        .set("viewBox", format!("0 0 {width} {height}"))
}

impl ToSVG for Piece {
    fn to_svg(&self) -> String {
        let Some(bounds) = self.bounding_rect() else {
            return document(0.0, 0.0).to_string();
        };
        let place = Placement::new(bounds, GAP, GAP);
        document(bounds.width() + 2.0 * GAP, bounds.height() + 2.0 * GAP)
            .add(piece_group(self, place))
            .to_string()
    }
}

impl ToSVG for Pattern {
    fn to_svg(&self) -> String {
        let laid_out: Vec<(&Piece, Rect<Real>)> = self
            .pieces()
            .iter()
            .filter_map(|piece| piece.bounding_rect().map(|b| (piece, b)))
            .collect();
        let height = laid_out.iter().map(|(_, b)| b.height()).fold(0.0, Real::max);

        let mut left = GAP;
        let mut groups = Vec::with_capacity(laid_out.len());
        for (piece, bounds) in laid_out {
            groups.push(piece_group(piece, Placement::new(bounds, left, GAP)));
            left += bounds.width() + GAP;
        }

        groups
            .into_iter()
            .fold(document(left, height + 2.0 * GAP), |doc, group| doc.add(group))
            .set("id", self.name())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::RectangleDrafter;

    #[test]
    fn visible_paths_only() {
        let mut pattern = Pattern::new("swatches");
        pattern.draft(&RectangleDrafter::new("a", 10.0, 10.0)).unwrap();
        pattern.draft(&RectangleDrafter::new("b", 4.0, 6.0)).unwrap();
        let svg = pattern.to_svg();
        assert!(svg.starts_with("<svg"));
        // four cut lines and a grain line per piece
        assert_eq!(svg.matches("<path").count(), 10);
        assert!(svg.contains("viewBox=\"0 0 29 20\""));
    }

    #[test]
    fn y_is_flipped() {
        let piece = crate::draft::draft(&RectangleDrafter::new("p", 2.0, 3.0)).unwrap().remove(0);
        let svg = piece.to_svg();
        // bottom edge A-B sits at the bottom of the page
        assert!(svg.contains("M5,8 L7,8"));
    }
}
