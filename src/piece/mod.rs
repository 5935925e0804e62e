//! Finished pattern pieces.
//!
//! A [`Piece`] is immutable. It is put together in a [`PieceBuilder`], which
//! collects points, paths and metadata and validates everything at
//! [`PieceBuilder::build`], so an inconsistent piece is never observable.

use crate::errors::DraftError;
use crate::float_types::Real;
use crate::path::{PathElement, PathRole};
use crate::point::Point;
use geo::{BoundingRect, Coord, Rect};
use hashbrown::HashMap;
use std::collections::BTreeMap;

pub mod outline;

#[cfg(feature = "offset")]
pub mod offset;

/// A named pattern piece: points, ordered paths and cutting metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    name: String,
    points: HashMap<String, Point>,
    paths: Vec<PathElement>,
    seam_allowance: Real,
    cut_on_fold: bool,
    quantity: u32,
    grain_line: Option<(String, String)>,
    instructions: BTreeMap<String, String>,
}

impl Piece {
    /// Start building a piece called `name`.
    pub fn builder(name: impl Into<String>) -> PieceBuilder {
        PieceBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn points(&self) -> &HashMap<String, Point> {
        &self.points
    }

    pub fn point(&self, name: &str) -> Option<&Point> {
        self.points.get(name)
    }

    /// Points sorted by name, for stable iteration.
    pub fn sorted_points(&self) -> Vec<&Point> {
        let mut points: Vec<&Point> = self.points.values().collect();
        points.sort_by(|a, b| a.name().cmp(b.name()));
        points
    }

    pub fn paths(&self) -> &[PathElement] {
        &self.paths
    }

    pub fn paths_with_role(&self, role: PathRole) -> impl Iterator<Item = &PathElement> {
        self.paths.iter().filter(move |p| p.role() == role)
    }

    pub const fn seam_allowance(&self) -> Real {
        self.seam_allowance
    }

    pub const fn cut_on_fold(&self) -> bool {
        self.cut_on_fold
    }

    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Names of the two points marking the grain line, if one was set.
    pub fn grain_line(&self) -> Option<(&str, &str)> {
        self.grain_line
            .as_ref()
            .map(|(a, b)| (a.as_str(), b.as_str()))
    }

    pub const fn instructions(&self) -> &BTreeMap<String, String> {
        &self.instructions
    }

    pub fn instruction(&self, key: &str) -> Option<&str> {
        self.instructions.get(key).map(String::as_str)
    }

    /// The first straight path joining the two named points, in either direction.
    pub fn edge(&self, a: &str, b: &str) -> Option<&crate::path::Line> {
        self.paths
            .iter()
            .filter(|p| p.joins(a, b))
            .find_map(PathElement::as_line)
    }

    /// Axis-aligned bounds of every registered point and sampled path.
    pub fn bounding_rect(&self) -> Option<Rect<Real>> {
        let coords: Vec<Coord<Real>> = self
            .points
            .values()
            .map(|p| p.pos())
            .chain(self.paths.iter().flat_map(PathElement::polyline))
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        geo::MultiPoint::from(coords).bounding_rect()
    }

    /// A builder seeded with everything in this piece, for deriving a new piece.
    pub fn to_builder(&self) -> PieceBuilder {
        self.metadata_builder()
            .points(self.sorted_points().into_iter().cloned())
            .paths(self.paths.iter().cloned())
    }

    /// A builder carrying this piece's name and metadata but no geometry.
    pub(crate) fn metadata_builder(&self) -> PieceBuilder {
        PieceBuilder {
            name: self.name.clone(),
            points: Vec::new(),
            paths: Vec::new(),
            seam_allowance: self.seam_allowance,
            cut_on_fold: self.cut_on_fold,
            quantity: self.quantity,
            grain_line: self.grain_line.clone(),
            instructions: self.instructions.clone(),
        }
    }
}

/// Draft state of a [`Piece`]. Nothing is checked until [`PieceBuilder::build`].
#[derive(Debug, Clone)]
pub struct PieceBuilder {
    name: String,
    points: Vec<Point>,
    paths: Vec<PathElement>,
    seam_allowance: Real,
    cut_on_fold: bool,
    quantity: u32,
    grain_line: Option<(String, String)>,
    instructions: BTreeMap<String, String>,
}

impl PieceBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        PieceBuilder {
            name: name.into(),
            points: Vec::new(),
            paths: Vec::new(),
            seam_allowance: 0.0,
            cut_on_fold: false,
            quantity: 1,
            grain_line: None,
            instructions: BTreeMap::new(),
        }
    }

    pub fn point(mut self, point: Point) -> Self {
        self.points.push(point);
        self
    }

    pub fn points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points.extend(points);
        self
    }

    pub fn path(mut self, path: impl Into<PathElement>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn paths(mut self, paths: impl IntoIterator<Item = PathElement>) -> Self {
        self.paths.extend(paths);
        self
    }

    pub const fn seam_allowance(mut self, width: Real) -> Self {
        self.seam_allowance = width;
        self
    }

    pub const fn cut_on_fold(mut self, on_fold: bool) -> Self {
        self.cut_on_fold = on_fold;
        self
    }

    pub const fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn grain_line(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.grain_line = Some((from.into(), to.into()));
        self
    }

    pub fn instruction(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.instructions.insert(key.into(), text.into());
        self
    }

    /// Validate and freeze the piece.
    ///
    /// Fails on duplicate point names, non-finite coordinates, a negative seam
    /// allowance, a zero quantity, and any path or grain line referring to a
    /// point that is not registered here under the same name and position.
    pub fn build(self) -> Result<Piece, DraftError> {
        let PieceBuilder {
            name,
            points: point_list,
            paths,
            seam_allowance,
            cut_on_fold,
            quantity,
            grain_line,
            instructions,
        } = self;

        if !(seam_allowance >= 0.0 && seam_allowance.is_finite()) {
            return Err(DraftError::InvalidSeamAllowance(seam_allowance));
        }
        if quantity == 0 {
            return Err(DraftError::InvalidQuantity { piece: name });
        }

        let mut points = HashMap::with_capacity(point_list.len());
        for point in point_list {
            if !point.is_finite() {
                return Err(DraftError::InvalidCoordinate {
                    name: point.name().to_string(),
                    x: point.x(),
                    y: point.y(),
                });
            }
            if points.contains_key(point.name()) {
                return Err(DraftError::DuplicatePoint {
                    piece: name,
                    point: point.name().to_string(),
                });
            }
            points.insert(point.name().to_string(), point);
        }

        let missing = |point: &str| DraftError::MissingPoint {
            piece: name.clone(),
            point: point.to_string(),
        };

        for path in &paths {
            for referenced in path.points() {
                match points.get(referenced.name()) {
                    Some(registered) if registered.same_place(referenced) => {},
                    _ => return Err(missing(referenced.name())),
                }
            }
        }

        if let Some((a, b)) = &grain_line {
            for end in [a, b] {
                if !points.contains_key(end.as_str()) {
                    return Err(missing(end));
                }
            }
        }

        Ok(Piece {
            name,
            points,
            paths,
            seam_allowance,
            cut_on_fold,
            quantity,
            grain_line,
            instructions,
        })
    }
}
