//! Straight waistband, folded lengthwise.
//!
//! ```text
//!   d ──────────────────────────────────────────── c
//!   fa ─ ─ ─ ─ ─ ─ ─ ─ ─ fold ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ fb
//!   a ──┬────────┬────────────┬────────────┬────── b
//!     overlap  side 1    centre front    side 2
//! ```

use crate::draft::{Drafter, Workspace};
use crate::errors::DraftError;
use crate::float_types::Real;
use crate::measurements::{Measurements, Options};
use crate::path::PathRole;
use crate::piece::Piece;
use crate::point::{Point, PointRole};

/// Button overlap at one end.
const OVERLAP: Real = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandPoint {
    A,
    B,
    C,
    D,
    FoldStart,
    FoldEnd,
    Overlap,
    SideOne,
    CentreFront,
    SideTwo,
    GrainStart,
    GrainEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandPath {
    Bottom,
    Right,
    Top,
    Left,
    Fold,
    Grain,
}

#[derive(Debug, Clone)]
pub struct WaistbandDrafter {
    measurements: Measurements,
    options: Options,
}

impl WaistbandDrafter {
    pub const fn new(measurements: Measurements, options: Options) -> Self {
        WaistbandDrafter { measurements, options }
    }

    /// Finished band length: the waist plus the garment ease, so the band
    /// matches a skirt waist drafted with the same options.
    pub fn band(&self) -> Real {
        self.measurements.waist + self.options.ease
    }

    /// Full cut length, overlap included.
    pub fn length(&self) -> Real {
        self.band() + OVERLAP
    }

    /// Cut height, twice the finished width.
    pub fn height(&self) -> Real {
        self.options.waistband_width * 2.0
    }
}

impl Drafter for WaistbandDrafter {
    type PointKey = BandPoint;
    type PathKey = BandPath;

    fn name(&self) -> &str {
        "waistband"
    }

    fn landmark_points(&self, ws: &mut Workspace<BandPoint, BandPath>) -> Result<(), DraftError> {
        self.measurements.validate()?;
        self.options.validate()?;
        let (w, h) = (self.length(), self.height());
        ws.add_point(BandPoint::A, Point::new("a", 0.0, 0.0, PointRole::CutPoint))?;
        ws.add_point(BandPoint::B, Point::new("b", w, 0.0, PointRole::CutPoint))?;
        ws.add_point(BandPoint::C, Point::new("c", w, h, PointRole::CutPoint))?;
        ws.add_point(BandPoint::D, Point::new("d", 0.0, h, PointRole::CutPoint))?;
        Ok(())
    }

    fn landmark_paths(&self, ws: &mut Workspace<BandPoint, BandPath>) -> Result<(), DraftError> {
        ws.add_line(BandPath::Bottom, BandPoint::A, BandPoint::B, PathRole::CutLine)?;
        ws.add_line(BandPath::Right, BandPoint::B, BandPoint::C, PathRole::CutLine)?;
        ws.add_line(BandPath::Top, BandPoint::C, BandPoint::D, PathRole::CutLine)?;
        ws.add_line(BandPath::Left, BandPoint::D, BandPoint::A, PathRole::CutLine)?;
        Ok(())
    }

    fn relative_geometry(&self, ws: &mut Workspace<BandPoint, BandPath>) -> Result<(), DraftError> {
        let fold_start = ws.point_on(BandPath::Left, 0.5)?;
        let fold_end = ws.point_on(BandPath::Right, 0.5)?;
        ws.add_point(BandPoint::FoldStart, Point::at("fa", fold_start, PointRole::FoldPoint))?;
        ws.add_point(BandPoint::FoldEnd, Point::at("fb", fold_end, PointRole::FoldPoint))?;
        ws.add_line(BandPath::Fold, BandPoint::FoldStart, BandPoint::FoldEnd, PathRole::FoldLine)?;

        // Notches along the lower edge, measured from the overlap end.
        let length = self.length();
        let band = self.band();
        let notches = [
            (BandPoint::Overlap, "overlap", OVERLAP),
            (BandPoint::SideOne, "side 1", OVERLAP + band / 4.0),
            (BandPoint::CentreFront, "centre front", OVERLAP + band / 2.0),
            (BandPoint::SideTwo, "side 2", OVERLAP + band * 0.75),
        ];
        for (key, name, x) in notches {
            let at = ws.point_on(BandPath::Bottom, x / length)?;
            ws.add_point(key, Point::at(name, at, PointRole::Notch))?;
        }
        Ok(())
    }

    fn additional_features(&self, ws: &mut Workspace<BandPoint, BandPath>) -> Result<(), DraftError> {
        let (w, h) = (self.length(), self.height());
        ws.add_point(
            BandPoint::GrainStart,
            Point::new("grain a", w * 0.1, h * 0.25, PointRole::Construction),
        )?;
        ws.add_point(
            BandPoint::GrainEnd,
            Point::new("grain b", w * 0.9, h * 0.25, PointRole::Construction),
        )?;
        ws.add_line(BandPath::Grain, BandPoint::GrainStart, BandPoint::GrainEnd, PathRole::GrainLine)?;
        ws.set_grain_line(BandPoint::GrainStart, BandPoint::GrainEnd)
    }

    fn assemble(&self, ws: &Workspace<BandPoint, BandPath>) -> Result<Vec<Piece>, DraftError> {
        let piece = ws
            .piece("waistband")?
            .seam_allowance(self.options.seam_allowance)
            .instruction("fold", "Fold lengthwise, wrong sides together")
            .instruction("cut", "Cut 1")
            .instruction("interfacing", "Interface the outer half")
            .build()?;
        Ok(vec![piece])
    }
}
