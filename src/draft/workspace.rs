//! Per-draft point and path container.

use super::{DraftKey, Stage};
use crate::curve::CurveShape;
use crate::errors::DraftError;
use crate::float_types::Real;
use crate::intersection::{IntersectionMode, intersect_lines};
use crate::log;
use crate::path::{Curve, Line, PathElement, PathRole};
use crate::piece::PieceBuilder;
use crate::point::{Point, PointRole};
use hashbrown::HashMap;
use nalgebra::Point2;

const POINT_STAGES: &[Stage] = &[
    Stage::LandmarkPoints,
    Stage::RelativeGeometry,
    Stage::AdditionalFeatures,
];
const PATH_STAGES: &[Stage] = &[
    Stage::LandmarkPaths,
    Stage::RelativeGeometry,
    Stage::AdditionalFeatures,
];
const FEATURE_STAGES: &[Stage] = &[Stage::AdditionalFeatures];

/// Points and paths accumulated while one drafter runs.
///
/// `P` and `L` are the drafter's own key types, so each drafter gets a typed
/// container. Points are also unique by name, because they end up in a piece.
/// Control points of shaped curves are registered by name only.
#[derive(Debug, Clone)]
pub struct Workspace<P, L> {
    name: String,
    stage: Stage,
    registry: Vec<Point>,
    by_name: HashMap<String, usize>,
    by_key: HashMap<P, usize>,
    paths: Vec<(L, PathElement)>,
    path_index: HashMap<L, usize>,
    grain_line: Option<(P, P)>,
}

impl<P: DraftKey, L: DraftKey> Workspace<P, L> {
    /// An empty workspace in the `Initialize` stage.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Workspace {
            name: name.into(),
            stage: Stage::Initialize,
            registry: Vec::new(),
            by_name: HashMap::new(),
            by_key: HashMap::new(),
            paths: Vec::new(),
            path_index: HashMap::new(),
            grain_line: None,
        }
    }

    /// Move to `to`, which must be the immediate successor of the current stage.
    pub(crate) fn advance(&mut self, to: Stage) -> Result<(), DraftError> {
        if self.stage.next() != Some(to) {
            return Err(DraftError::StageOrder {
                from: self.stage,
                to,
            });
        }
        log::debug!(drafter = %self.name, stage = ?to, "entering stage");
        self.stage = to;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn stage(&self) -> Stage {
        self.stage
    }

    pub fn point_count(&self) -> usize {
        self.registry.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    fn require(&self, allowed: &[Stage], operation: &'static str) -> Result<(), DraftError> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(DraftError::StageViolation {
                stage: self.stage,
                operation,
            })
        }
    }

    fn register(&mut self, point: Point) -> Result<usize, DraftError> {
        if !point.is_finite() {
            return Err(DraftError::InvalidCoordinate {
                name: point.name().to_string(),
                x: point.x(),
                y: point.y(),
            });
        }
        if self.by_name.contains_key(point.name()) {
            return Err(DraftError::DuplicatePoint {
                piece: self.name.clone(),
                point: point.name().to_string(),
            });
        }
        self.by_name.insert(point.name().to_string(), self.registry.len());
        self.registry.push(point);
        Ok(self.registry.len() - 1)
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Points
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Register `point` under `key`.
    pub fn add_point(&mut self, key: P, point: Point) -> Result<&Point, DraftError> {
        self.require(POINT_STAGES, "adding a point")?;
        if self.by_key.contains_key(&key) {
            return Err(DraftError::DuplicateKey(format!("{key:?}")));
        }
        let index = self.register(point)?;
        self.by_key.insert(key, index);
        Ok(&self.registry[index])
    }

    pub fn point(&self, key: P) -> Result<&Point, DraftError> {
        self.by_key
            .get(&key)
            .map(|&i| &self.registry[i])
            .ok_or_else(|| DraftError::MissingKey(format!("{key:?}")))
    }

    /// Position of the point under `key`.
    pub fn pos(&self, key: P) -> Result<Point2<Real>, DraftError> {
        self.point(key).map(Point::pos)
    }

    pub fn point_named(&self, name: &str) -> Option<&Point> {
        self.by_name.get(name).map(|&i| &self.registry[i])
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Paths
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Register a path whose points are all already registered here.
    pub fn add_path(&mut self, key: L, path: impl Into<PathElement>) -> Result<&PathElement, DraftError> {
        self.require(PATH_STAGES, "adding a path")?;
        let path = path.into();
        if self.path_index.contains_key(&key) {
            return Err(DraftError::DuplicateKey(format!("{key:?}")));
        }
        for referenced in path.points() {
            match self.point_named(referenced.name()) {
                Some(registered) if registered.same_place(referenced) => {},
                _ => {
                    return Err(DraftError::MissingPoint {
                        piece: self.name.clone(),
                        point: referenced.name().to_string(),
                    });
                },
            }
        }
        self.path_index.insert(key, self.paths.len());
        self.paths.push((key, path));
        Ok(&self.paths[self.paths.len() - 1].1)
    }

    /// Visible line between two registered points.
    pub fn add_line(&mut self, key: L, from: P, to: P, role: PathRole) -> Result<&PathElement, DraftError> {
        let line = Line::new(self.point(from)?.clone(), self.point(to)?.clone(), role)?;
        self.add_path(key, line)
    }

    /// Hidden construction line between two registered points.
    pub fn add_construction_line(&mut self, key: L, from: P, to: P) -> Result<&PathElement, DraftError> {
        let line = Line::new(
            self.point(from)?.clone(),
            self.point(to)?.clone(),
            PathRole::ConstructionLine,
        )?
        .with_visibility(false);
        self.add_path(key, line)
    }

    /// Shaped curve between two registered points. Its control point is
    /// registered by name as part of the same operation: `"<start>~<end>"`,
    /// or `"<start>~<end>#2"`, `#3`, ... when curves share both endpoints.
    pub fn add_curve(
        &mut self,
        key: L,
        from: P,
        to: P,
        shape: CurveShape,
        role: PathRole,
    ) -> Result<&PathElement, DraftError> {
        self.require(PATH_STAGES, "adding a curve")?;
        if self.path_index.contains_key(&key) {
            return Err(DraftError::DuplicateKey(format!("{key:?}")));
        }
        let mut curve = Curve::shaped(self.point(from)?.clone(), self.point(to)?.clone(), shape, role)?;
        let base = curve.control().name().to_string();
        let mut name = base.clone();
        let mut n = 2;
        while self.by_name.contains_key(&name) {
            name = format!("{base}#{n}");
            n += 1;
        }
        if name != base {
            let control = Point::at(name, curve.control().pos(), PointRole::Construction);
            curve = Curve::new(curve.start().clone(), control, curve.end().clone(), role)?;
        }
        self.register(curve.control().clone())?;
        self.add_path(key, curve)
    }

    /// Path under `key`. Fails if the stage that builds it has not run yet.
    pub fn path(&self, key: L) -> Result<&PathElement, DraftError> {
        self.path_index
            .get(&key)
            .map(|&i| &self.paths[i].1)
            .ok_or_else(|| DraftError::MissingPath(format!("{key:?}")))
    }

    /// Straight path under `key`.
    pub fn line(&self, key: L) -> Result<&Line, DraftError> {
        self.path(key)?
            .as_line()
            .ok_or_else(|| DraftError::NotALine(format!("{key:?}")))
    }

    /// Position at parameter `t` along the path under `key`, line or curve.
    pub fn point_on(&self, key: L, t: Real) -> Result<Point2<Real>, DraftError> {
        Ok(match self.path(key)? {
            PathElement::Line(line) => line.point_at(t),
            PathElement::Curve(curve) => curve.point_at(t),
        })
    }

    /// Where the lines under `a` and `b` cross. Inside a draft, lines that had
    /// to cross and do not are a failure, not an absence.
    pub fn intersection(&self, a: L, b: L, mode: IntersectionMode) -> Result<Point2<Real>, DraftError> {
        intersect_lines(self.line(a)?, self.line(b)?, mode).ok_or_else(|| DraftError::NoIntersection {
            first: format!("{a:?}"),
            second: format!("{b:?}"),
        })
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Features and assembly
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Mark the grain line between two registered points.
    pub fn set_grain_line(&mut self, from: P, to: P) -> Result<(), DraftError> {
        self.require(FEATURE_STAGES, "setting the grain line")?;
        self.point(from)?;
        self.point(to)?;
        self.grain_line = Some((from, to));
        Ok(())
    }

    /// Builder holding every point and path in registration order, plus the
    /// grain line.
    pub fn piece(&self, name: impl Into<String>) -> Result<PieceBuilder, DraftError> {
        self.piece_without(name, &[])
    }

    /// Like [`Workspace::piece`], leaving out the paths under `excluded`.
    pub fn piece_without(&self, name: impl Into<String>, excluded: &[L]) -> Result<PieceBuilder, DraftError> {
        let mut builder = PieceBuilder::new(name)
            .points(self.registry.iter().cloned())
            .paths(
                self.paths
                    .iter()
                    .filter(|(key, _)| !excluded.contains(key))
                    .map(|(_, path)| path.clone()),
            );
        if let Some((from, to)) = self.grain_line {
            builder = builder.grain_line(self.point(from)?.name(), self.point(to)?.name());
        }
        Ok(builder)
    }
}
