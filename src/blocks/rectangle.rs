//! A plain rectangular piece: pockets, ties, test swatches.

use crate::draft::{Drafter, Workspace};
use crate::errors::DraftError;
use crate::float_types::Real;
use crate::path::PathRole;
use crate::piece::Piece;
use crate::point::{Point, PointRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectPoint {
    A,
    B,
    C,
    D,
    GrainTop,
    GrainBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectPath {
    Bottom,
    Right,
    Top,
    Left,
    Grain,
}

/// `width` × `height` rectangle with its corner `A` at the origin, corners
/// `A B C D` counter-clockwise, and a vertical grain line.
#[derive(Debug, Clone)]
pub struct RectangleDrafter {
    name: String,
    width: Real,
    height: Real,
    quantity: u32,
    seam_allowance: Real,
    cut_on_fold: bool,
}

impl RectangleDrafter {
    pub fn new(name: impl Into<String>, width: Real, height: Real) -> Self {
        RectangleDrafter {
            name: name.into(),
            width,
            height,
            quantity: 1,
            seam_allowance: 0.0,
            cut_on_fold: false,
        }
    }

    pub const fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
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
}

impl Drafter for RectangleDrafter {
    type PointKey = RectPoint;
    type PathKey = RectPath;

    fn name(&self) -> &str {
        &self.name
    }

    fn landmark_points(&self, ws: &mut Workspace<RectPoint, RectPath>) -> Result<(), DraftError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(DraftError::InvalidMeasurement { name, value });
            }
        }
        let (w, h) = (self.width, self.height);
        ws.add_point(RectPoint::A, Point::new("A", 0.0, 0.0, PointRole::CutPoint))?;
        ws.add_point(RectPoint::B, Point::new("B", w, 0.0, PointRole::CutPoint))?;
        ws.add_point(RectPoint::C, Point::new("C", w, h, PointRole::CutPoint))?;
        ws.add_point(RectPoint::D, Point::new("D", 0.0, h, PointRole::CutPoint))?;
        Ok(())
    }

    fn landmark_paths(&self, ws: &mut Workspace<RectPoint, RectPath>) -> Result<(), DraftError> {
        ws.add_line(RectPath::Bottom, RectPoint::A, RectPoint::B, PathRole::CutLine)?;
        ws.add_line(RectPath::Right, RectPoint::B, RectPoint::C, PathRole::CutLine)?;
        ws.add_line(RectPath::Top, RectPoint::C, RectPoint::D, PathRole::CutLine)?;
        ws.add_line(RectPath::Left, RectPoint::D, RectPoint::A, PathRole::CutLine)?;
        Ok(())
    }

    fn relative_geometry(&self, _ws: &mut Workspace<RectPoint, RectPath>) -> Result<(), DraftError> {
        Ok(())
    }

    fn additional_features(&self, ws: &mut Workspace<RectPoint, RectPath>) -> Result<(), DraftError> {
        let x = self.width / 2.0;
        ws.add_point(
            RectPoint::GrainBottom,
            Point::new("grain bottom", x, self.height * 0.2, PointRole::Construction),
        )?;
        ws.add_point(
            RectPoint::GrainTop,
            Point::new("grain top", x, self.height * 0.8, PointRole::Construction),
        )?;
        ws.add_line(RectPath::Grain, RectPoint::GrainBottom, RectPoint::GrainTop, PathRole::GrainLine)?;
        ws.set_grain_line(RectPoint::GrainBottom, RectPoint::GrainTop)
    }

    fn assemble(&self, ws: &Workspace<RectPoint, RectPath>) -> Result<Vec<Piece>, DraftError> {
        let cut = if self.cut_on_fold {
            format!("Cut {} on fold", self.quantity)
        } else {
            format!("Cut {}", self.quantity)
        };
        let piece = ws
            .piece(self.name.clone())?
            .quantity(self.quantity)
            .seam_allowance(self.seam_allowance)
            .cut_on_fold(self.cut_on_fold)
            .instruction("cut", cut)
            .build()?;
        Ok(vec![piece])
    }
}
