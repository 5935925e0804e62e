//! Hem and facing pieces derived from a finished edge.
//!
//! A hem piece is a rectangle hanging off one straight edge of a finished piece,
//! on the edge's right-hand side (outward for a counter-clockwise outline), as
//! deep as the hem width. It is folded lengthwise along its midline.
//!
//! ```text
//!   a ─────────── edge ──────────── b
//!   │                               │
//!   fa ─ ─ ─ ─ ─ fold ─ ─ ─ ─ ─ ─ ─ fb
//!   │                               │
//!   d ───────────────────────────── c
//! ```

use super::{Drafter, Workspace};
use crate::errors::DraftError;
use crate::float_types::Real;
use crate::path::{Line, PathRole};
use crate::piece::Piece;
use crate::point::{Point, PointRole};
use nalgebra::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HemPoint {
    EdgeStart,
    EdgeEnd,
    OuterEnd,
    OuterStart,
    FoldStart,
    FoldEnd,
    GrainStart,
    GrainEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HemPath {
    Edge,
    EndSide,
    Outer,
    StartSide,
    Fold,
    Grain,
}

/// Drafts a rectangular hem/facing piece from one edge line.
#[derive(Debug, Clone)]
pub struct HemDrafter {
    name: String,
    edge: Line,
    width: Real,
    quantity: u32,
    seam_allowance: Real,
}

impl HemDrafter {
    /// Hem of depth `width` along `edge`.
    pub fn new(name: impl Into<String>, edge: Line, width: Real) -> Result<Self, DraftError> {
        if !(width > 0.0 && width.is_finite()) {
            return Err(DraftError::InvalidMeasurement {
                name: "hem width",
                value: width,
            });
        }
        Ok(HemDrafter {
            name: name.into(),
            edge,
            width,
            quantity: 1,
            seam_allowance: 0.0,
        })
    }

    /// Hem along the straight edge of `piece` joining the points named `start`
    /// and `end`. The hem is cut as many times as the piece.
    pub fn from_piece(piece: &Piece, start: &str, end: &str, width: Real) -> Result<Self, DraftError> {
        let edge = piece
            .edge(start, end)
            .ok_or_else(|| DraftError::MissingPath(format!("{start} - {end} on `{}`", piece.name())))?;
        // Follow the edge in the requested direction so the hem lands on its right side.
        let edge = if edge.start().name() == start {
            edge.clone()
        } else {
            Line::new(edge.end().clone(), edge.start().clone(), edge.role())?
        };
        Ok(HemDrafter::new(format!("{} hem", piece.name()), edge, width)?.quantity(piece.quantity()))
    }

    pub const fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub const fn seam_allowance(mut self, width: Real) -> Self {
        self.seam_allowance = width;
        self
    }

    pub const fn width(&self) -> Real {
        self.width
    }

    /// Unit direction along the edge and unit normal on its right-hand side.
    fn frame(&self) -> (Vector2<Real>, Vector2<Real>) {
        let along = (self.edge.end().pos() - self.edge.start().pos()) / self.edge.length();
        (along, Vector2::new(along.y, -along.x))
    }
}

impl Drafter for HemDrafter {
    type PointKey = HemPoint;
    type PathKey = HemPath;

    fn name(&self) -> &str {
        &self.name
    }

    fn landmark_points(&self, ws: &mut Workspace<HemPoint, HemPath>) -> Result<(), DraftError> {
        let (_, normal) = self.frame();
        let depth = normal * self.width;
        let a = Point::at("a", self.edge.start().pos(), PointRole::CutPoint);
        let b = Point::at("b", self.edge.end().pos(), PointRole::CutPoint);
        let c = b.offset_by("c", depth, PointRole::CutPoint);
        let d = a.offset_by("d", depth, PointRole::CutPoint);
        ws.add_point(HemPoint::EdgeStart, a)?;
        ws.add_point(HemPoint::EdgeEnd, b)?;
        ws.add_point(HemPoint::OuterEnd, c)?;
        ws.add_point(HemPoint::OuterStart, d)?;
        Ok(())
    }

    fn landmark_paths(&self, ws: &mut Workspace<HemPoint, HemPath>) -> Result<(), DraftError> {
        ws.add_line(HemPath::Edge, HemPoint::EdgeStart, HemPoint::EdgeEnd, PathRole::CutLine)?;
        ws.add_line(HemPath::EndSide, HemPoint::EdgeEnd, HemPoint::OuterEnd, PathRole::CutLine)?;
        ws.add_line(HemPath::Outer, HemPoint::OuterEnd, HemPoint::OuterStart, PathRole::CutLine)?;
        ws.add_line(HemPath::StartSide, HemPoint::OuterStart, HemPoint::EdgeStart, PathRole::CutLine)?;
        Ok(())
    }

    fn relative_geometry(&self, ws: &mut Workspace<HemPoint, HemPath>) -> Result<(), DraftError> {
        // Fold points sit halfway down each short side.
        let fold_start = ws.point_on(HemPath::StartSide, 0.5)?;
        let fold_end = ws.point_on(HemPath::EndSide, 0.5)?;
        ws.add_point(HemPoint::FoldStart, Point::at("fa", fold_start, PointRole::FoldPoint))?;
        ws.add_point(HemPoint::FoldEnd, Point::at("fb", fold_end, PointRole::FoldPoint))?;
        ws.add_line(HemPath::Fold, HemPoint::FoldStart, HemPoint::FoldEnd, PathRole::FoldLine)?;
        Ok(())
    }

    fn additional_features(&self, ws: &mut Workspace<HemPoint, HemPath>) -> Result<(), DraftError> {
        let (along, normal) = self.frame();
        let inset = along * (self.edge.length() * 0.1);
        let quarter = normal * (self.width * 0.25);
        let start = ws.point(HemPoint::EdgeStart)?.offset_by("grain a", quarter + inset, PointRole::Construction);
        let end = ws.point(HemPoint::EdgeEnd)?.offset_by("grain b", quarter - inset, PointRole::Construction);
        ws.add_point(HemPoint::GrainStart, start)?;
        ws.add_point(HemPoint::GrainEnd, end)?;
        ws.add_line(HemPath::Grain, HemPoint::GrainStart, HemPoint::GrainEnd, PathRole::GrainLine)?;
        ws.set_grain_line(HemPoint::GrainStart, HemPoint::GrainEnd)
    }

    fn assemble(&self, ws: &Workspace<HemPoint, HemPath>) -> Result<Vec<Piece>, DraftError> {
        let piece = ws
            .piece(self.name.clone())?
            .quantity(self.quantity)
            .seam_allowance(self.seam_allowance)
            .instruction("fold", "Fold along the midline, wrong sides together")
            .instruction("cut", format!("Cut {}", self.quantity))
            .build()?;
        Ok(vec![piece])
    }
}
