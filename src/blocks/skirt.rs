//! Straight skirt block, front and back from one quarter draft.
//!
//! Coordinates are y-up from the hem, centre front on the `x = 0` axis.
//!
//! ```text
//!   waist_cf ‿‿‿‿‿‿‿‿ waist_side
//!   │                  )
//!   seat_cf ┄┄┄┄┄┄┄┄┄┄ seat_side
//!   │                  │
//!   hem_cf ─────────── hem_side
//! ```

use crate::curve::CurveShape;
use crate::draft::{Drafter, Workspace};
use crate::errors::DraftError;
use crate::float_types::Real;
use crate::intersection::IntersectionMode;
use crate::measurements::{Measurements, Options};
use crate::path::{Line, PathRole};
use crate::piece::Piece;
use crate::point::{Point, PointRole};

const LONG_LENGTH: Real = 62.0;
const SHORT_LENGTH: Real = 45.0;
/// Rise of the side waist above the centre front waist.
const SIDE_WAIST_RISE: Real = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkirtPoint {
    HemCf,
    HemSide,
    SeatCf,
    SeatSide,
    WaistCf,
    WaistSide,
    WaistDip,
    Balance,
    PocketTop,
    PocketBottom,
    GrainTop,
    GrainBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkirtPath {
    Hem,
    SideLower,
    HipCurve,
    Waist,
    CentreFront,
    SeatLine,
    Diagonal,
    Fold,
    Grain,
}

#[derive(Debug, Clone)]
pub struct SkirtDrafter {
    measurements: Measurements,
    options: Options,
}

impl SkirtDrafter {
    pub const fn new(measurements: Measurements, options: Options) -> Self {
        SkirtDrafter { measurements, options }
    }

    /// Finished length, waist to hem.
    pub const fn length(&self) -> Real {
        if self.options.short { SHORT_LENGTH } else { LONG_LENGTH }
    }

    fn quarter_seat(&self) -> Real {
        self.measurements.quarter_seat() + self.options.quarter_ease()
    }

    fn quarter_waist(&self) -> Real {
        self.measurements.quarter_waist() + self.options.quarter_ease()
    }
}

impl Drafter for SkirtDrafter {
    type PointKey = SkirtPoint;
    type PathKey = SkirtPath;

    fn name(&self) -> &str {
        "skirt"
    }

    fn landmark_points(&self, ws: &mut Workspace<SkirtPoint, SkirtPath>) -> Result<(), DraftError> {
        self.measurements.validate()?;
        self.options.validate()?;
        if self.measurements.waist_to_seat >= self.length() {
            return Err(DraftError::InvalidMeasurement {
                name: "waist_to_seat",
                value: self.measurements.waist_to_seat,
            });
        }

        let length = self.length();
        let seat_y = length - self.measurements.waist_to_seat;
        let (qs, qw) = (self.quarter_seat(), self.quarter_waist());
        let landmarks = [
            (SkirtPoint::HemCf, "hem_cf", 0.0, 0.0, PointRole::CutPoint),
            (SkirtPoint::HemSide, "hem_side", qs, 0.0, PointRole::CutPoint),
            (SkirtPoint::SeatCf, "seat_cf", 0.0, seat_y, PointRole::Landmark),
            (SkirtPoint::SeatSide, "seat_side", qs, seat_y, PointRole::CutPoint),
            (SkirtPoint::WaistCf, "waist_cf", 0.0, length, PointRole::CutPoint),
            (SkirtPoint::WaistSide, "waist_side", qw, length + SIDE_WAIST_RISE, PointRole::CutPoint),
            (SkirtPoint::WaistDip, "waist_dip", qw / 2.0, length, PointRole::Construction),
        ];
        for (key, name, x, y, role) in landmarks {
            ws.add_point(key, Point::new(name, x, y, role))?;
        }
        Ok(())
    }

    fn landmark_paths(&self, ws: &mut Workspace<SkirtPoint, SkirtPath>) -> Result<(), DraftError> {
        use SkirtPath::*;
        use SkirtPoint::*;

        ws.add_line(Hem, HemCf, HemSide, PathRole::CutLine)?;
        ws.add_line(SideLower, HemSide, SeatSide, PathRole::CutLine)?;
        // Negative offset bulges the hip outwards, to the right of the draft.
        ws.add_curve(
            HipCurve,
            SeatSide,
            WaistSide,
            CurveShape::Offset {
                distance: -1.0,
                ratio: 0.35,
            },
            PathRole::CutLine,
        )?;
        let dip = ws.pos(WaistDip)?;
        ws.add_curve(
            Waist,
            WaistSide,
            WaistCf,
            CurveShape::Through {
                reference: dip,
                distance: 2.0,
            },
            PathRole::CutLine,
        )?;
        ws.add_line(CentreFront, WaistCf, HemCf, PathRole::CutLine)?;
        ws.add_construction_line(SeatLine, SeatCf, SeatSide)?;
        Ok(())
    }

    fn relative_geometry(&self, ws: &mut Workspace<SkirtPoint, SkirtPath>) -> Result<(), DraftError> {
        ws.add_construction_line(SkirtPath::Diagonal, SkirtPoint::WaistSide, SkirtPoint::HemCf)?;
        let balance = ws.intersection(SkirtPath::Diagonal, SkirtPath::SeatLine, IntersectionMode::Segments)?;
        ws.add_point(SkirtPoint::Balance, Point::at("balance", balance, PointRole::Notch))?;

        if self.options.pockets {
            let top = ws.point_on(SkirtPath::HipCurve, 0.8)?;
            let bottom = ws.point_on(SkirtPath::HipCurve, 0.3)?;
            ws.add_point(SkirtPoint::PocketTop, Point::at("pocket top", top, PointRole::Notch))?;
            ws.add_point(SkirtPoint::PocketBottom, Point::at("pocket bottom", bottom, PointRole::Notch))?;
        }
        Ok(())
    }

    fn additional_features(&self, ws: &mut Workspace<SkirtPoint, SkirtPath>) -> Result<(), DraftError> {
        // Fold mark over the centre front, dropped again for the back.
        let fold = Line::new(
            ws.point(SkirtPoint::WaistCf)?.clone(),
            ws.point(SkirtPoint::HemCf)?.clone(),
            PathRole::FoldLine,
        )?;
        ws.add_path(SkirtPath::Fold, fold)?;

        let x = self.quarter_waist() / 2.0;
        let top = self.length() - self.measurements.waist_to_seat - 5.0;
        ws.add_point(
            SkirtPoint::GrainTop,
            Point::new("grain top", x, top.max(10.0), PointRole::Construction),
        )?;
        ws.add_point(
            SkirtPoint::GrainBottom,
            Point::new("grain bottom", x, 5.0, PointRole::Construction),
        )?;
        ws.add_line(SkirtPath::Grain, SkirtPoint::GrainBottom, SkirtPoint::GrainTop, PathRole::GrainLine)?;
        ws.set_grain_line(SkirtPoint::GrainBottom, SkirtPoint::GrainTop)
    }

    fn assemble(&self, ws: &Workspace<SkirtPoint, SkirtPath>) -> Result<Vec<Piece>, DraftError> {
        let mut front = ws
            .piece("skirt front")?
            .cut_on_fold(true)
            .seam_allowance(self.options.seam_allowance)
            .instruction("cut", "Cut 1 on fold");
        let mut back = ws
            .piece_without("skirt back", &[SkirtPath::Fold])?
            .quantity(2)
            .seam_allowance(self.options.seam_allowance)
            .instruction("cut", "Cut 2");
        if !self.options.include_waistband {
            let facing = "Finish the waist with a shaped facing";
            front = front.instruction("waist", facing);
            back = back.instruction("waist", facing);
        }
        if self.options.pockets {
            front = front.instruction("pockets", "Set side pockets between the pocket notches");
        }
        Ok(vec![front.build()?, back.build()?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::draft;

    #[test]
    fn front_and_back_from_one_draft() {
        let pieces = draft(&SkirtDrafter::new(Measurements::default(), Options::default())).unwrap();
        assert_eq!(pieces.len(), 2);
        let (front, back) = (&pieces[0], &pieces[1]);
        assert!(front.cut_on_fold());
        assert_eq!(back.quantity(), 2);
        assert_eq!(front.paths_with_role(PathRole::FoldLine).count(), 1);
        assert_eq!(back.paths_with_role(PathRole::FoldLine).count(), 0);
        // quarter seat plus a quarter of the ease
        assert_eq!(front.point("hem_side").unwrap().x(), 26.0);
        assert_eq!(front.point("waist_cf").unwrap().y(), 62.0);
    }

    #[test]
    fn balance_notch_lies_on_the_seat_line() {
        let pieces = draft(&SkirtDrafter::new(Measurements::default(), Options::default())).unwrap();
        let balance = pieces[0].point("balance").unwrap();
        assert!((balance.y() - 42.0).abs() < 1e-9);
        assert!(balance.x() > 0.0 && balance.x() < 26.0);
    }

    #[test]
    fn short_skirt_with_pockets() {
        let options = Options {
            short: true,
            pockets: true,
            include_waistband: false,
            ..Options::default()
        };
        let pieces = draft(&SkirtDrafter::new(Measurements::default(), options)).unwrap();
        let front = &pieces[0];
        assert_eq!(front.point("waist_cf").unwrap().y(), 45.0);
        assert_eq!(front.point("pocket top").unwrap().role(), PointRole::Notch);
        assert!(front.instruction("waist").is_some());
        assert!(pieces[1].instruction("pockets").is_none());
    }

    #[test]
    fn seat_below_the_hem_is_rejected() {
        let measurements = Measurements {
            waist_to_seat: 50.0,
            ..Measurements::default()
        };
        let options = Options {
            short: true,
            ..Options::default()
        };
        assert!(matches!(
            draft(&SkirtDrafter::new(measurements, options)),
            Err(DraftError::InvalidMeasurement {
                name: "waist_to_seat",
                ..
            })
        ));
    }
}
