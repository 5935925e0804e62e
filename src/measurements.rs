//! Body measurements and style options, the read-only inputs of every draft.

use crate::errors::DraftError;
use crate::float_types::Real;

/// Body measurements in centimeters.
///
/// `Default` is a mid-size reference body, so a caller can override only the
/// fields it knows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub chest: Real,
    pub waist: Real,
    pub seat: Real,
    /// High hip, taken about 10 cm below the waist
    pub hip: Real,
    /// Shoulder length, neck point to shoulder point
    pub shoulder: Real,
    pub neck: Real,
    pub arm_length: Real,
    pub scye_depth: Real,
    pub wrist: Real,
    pub back_neck_to_waist: Real,
    pub half_back: Real,
    pub crotch_rise: Real,
    pub inside_leg: Real,
    pub ankle: Real,
    /// Vertical distance from waist to the fullest part of the seat
    pub waist_to_seat: Real,
}

impl Default for Measurements {
    fn default() -> Self {
        Measurements {
            chest: 96.0,
            waist: 78.0,
            seat: 100.0,
            hip: 92.0,
            shoulder: 12.5,
            neck: 37.0,
            arm_length: 60.0,
            scye_depth: 21.0,
            wrist: 16.0,
            back_neck_to_waist: 42.0,
            half_back: 18.5,
            crotch_rise: 28.0,
            inside_leg: 78.0,
            ankle: 24.0,
            waist_to_seat: 20.0,
        }
    }
}

impl Measurements {
    fn named(&self) -> [(&'static str, Real); 15] {
        [
            ("chest", self.chest),
            ("waist", self.waist),
            ("seat", self.seat),
            ("hip", self.hip),
            ("shoulder", self.shoulder),
            ("neck", self.neck),
            ("arm_length", self.arm_length),
            ("scye_depth", self.scye_depth),
            ("wrist", self.wrist),
            ("back_neck_to_waist", self.back_neck_to_waist),
            ("half_back", self.half_back),
            ("crotch_rise", self.crotch_rise),
            ("inside_leg", self.inside_leg),
            ("ankle", self.ankle),
            ("waist_to_seat", self.waist_to_seat),
        ]
    }

    /// Every measurement must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), DraftError> {
        match self.named().into_iter().find(|(_, v)| !(*v > 0.0 && v.is_finite())) {
            Some((name, value)) => Err(DraftError::InvalidMeasurement { name, value }),
            None => Ok(()),
        }
    }

    /// Measurements taken in `unit` (for example [`INCH`](crate::float_types::INCH)) converted to centimeters.
    pub fn to_centimeters(self, unit: Real) -> Measurements {
        Measurements {
            chest: self.chest * unit,
            waist: self.waist * unit,
            seat: self.seat * unit,
            hip: self.hip * unit,
            shoulder: self.shoulder * unit,
            neck: self.neck * unit,
            arm_length: self.arm_length * unit,
            scye_depth: self.scye_depth * unit,
            wrist: self.wrist * unit,
            back_neck_to_waist: self.back_neck_to_waist * unit,
            half_back: self.half_back * unit,
            crotch_rise: self.crotch_rise * unit,
            inside_leg: self.inside_leg * unit,
            ankle: self.ankle * unit,
            waist_to_seat: self.waist_to_seat * unit,
        }
    }

    pub fn quarter_chest(&self) -> Real {
        self.chest / 4.0
    }

    pub fn half_waist(&self) -> Real {
        self.waist / 2.0
    }

    pub fn quarter_waist(&self) -> Real {
        self.waist / 4.0
    }

    pub fn quarter_seat(&self) -> Real {
        self.seat / 4.0
    }

    pub fn quarter_hip(&self) -> Real {
        self.hip / 4.0
    }

    /// Waist to knee, estimated from the leg measurements.
    pub fn waist_to_knee(&self) -> Real {
        self.crotch_rise + self.inside_leg / 2.0
    }
}

/// Per-garment style flags. `Default` gives a regular-length, standard-ease garment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Short instead of long variant
    pub short: bool,
    /// Total ease added around the body, in centimeters
    pub ease: Real,
    pub include_waistband: bool,
    /// Finished waistband height
    pub waistband_width: Real,
    pub pockets: bool,
    /// Seam allowance applied to drafted pieces
    pub seam_allowance: Real,
    /// Depth of hem pieces
    pub hem_width: Real,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            short: false,
            ease: 4.0,
            include_waistband: true,
            waistband_width: 4.0,
            pockets: false,
            seam_allowance: 1.0,
            hem_width: 4.0,
        }
    }
}

impl Options {
    /// Default options with the easy-fit ease.
    pub fn easy_fit() -> Self {
        Options {
            ease: 8.0,
            ..Options::default()
        }
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if !(self.ease >= 0.0 && self.ease.is_finite()) {
            return Err(DraftError::InvalidMeasurement {
                name: "ease",
                value: self.ease,
            });
        }
        if !(self.waistband_width > 0.0 && self.waistband_width.is_finite()) {
            return Err(DraftError::InvalidMeasurement {
                name: "waistband_width",
                value: self.waistband_width,
            });
        }
        if !(self.hem_width > 0.0 && self.hem_width.is_finite()) {
            return Err(DraftError::InvalidMeasurement {
                name: "hem_width",
                value: self.hem_width,
            });
        }
        if !(self.seam_allowance >= 0.0 && self.seam_allowance.is_finite()) {
            return Err(DraftError::InvalidSeamAllowance(self.seam_allowance));
        }
        Ok(())
    }

    /// Ease for one quarter of the body.
    pub fn quarter_ease(&self) -> Real {
        self.ease / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Measurements::default().validate().unwrap();
        Options::default().validate().unwrap();
        Options::easy_fit().validate().unwrap();
    }

    #[test]
    fn first_bad_measurement_is_reported() {
        let m = Measurements {
            seat: 0.0,
            ankle: -1.0,
            ..Measurements::default()
        };
        assert_eq!(
            m.validate().unwrap_err(),
            DraftError::InvalidMeasurement {
                name: "seat",
                value: 0.0
            }
        );
    }

    #[test]
    fn inches_to_centimeters() {
        use crate::float_types::{CM, INCH, MM};
        let inches = Measurements {
            waist: 30.0,
            ..Measurements::default()
        };
        assert!((inches.to_centimeters(INCH).waist - 76.2).abs() < 1e-9);
        assert_eq!(inches.to_centimeters(CM), inches);
        assert!((inches.to_centimeters(MM).waist - 3.0).abs() < 1e-12);
    }

    #[test]
    fn derived_views() {
        let m = Measurements::default();
        assert_eq!(m.quarter_seat(), 25.0);
        assert_eq!(m.quarter_waist(), 19.5);
        assert_eq!(m.quarter_chest(), 24.0);
    }
}
