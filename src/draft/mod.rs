//! The drafting pipeline every garment piece goes through.
//!
//! A [`Drafter`] implements one method per stage. [`draft`] allocates a fresh
//! [`Workspace`] and runs the stages in their fixed order:
//!
//! ```text
//! Initialize → LandmarkPoints → LandmarkPaths → RelativeGeometry
//!            → AdditionalFeatures → Assemble → Finished
//! ```
//!
//! The workspace carries the current [`Stage`] and refuses mutations the stage
//! does not allow, so later stages can rely on what earlier stages built. The
//! first error aborts the draft.

use crate::errors::DraftError;
use crate::log;
use crate::piece::Piece;
use std::fmt::Debug;
use std::hash::Hash;

pub mod hem;
mod workspace;

pub use hem::HemDrafter;
pub use workspace::Workspace;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Initialize,
    LandmarkPoints,
    LandmarkPaths,
    RelativeGeometry,
    AdditionalFeatures,
    Assemble,
    Finished,
}

impl Stage {
    /// The only stage that may follow this one.
    pub const fn next(self) -> Option<Stage> {
        match self {
            Stage::Initialize => Some(Stage::LandmarkPoints),
            Stage::LandmarkPoints => Some(Stage::LandmarkPaths),
            Stage::LandmarkPaths => Some(Stage::RelativeGeometry),
            Stage::RelativeGeometry => Some(Stage::AdditionalFeatures),
            Stage::AdditionalFeatures => Some(Stage::Assemble),
            Stage::Assemble => Some(Stage::Finished),
            Stage::Finished => None,
        }
    }
}

/// Keys a drafter uses to name its points and paths inside a [`Workspace`].
pub trait DraftKey: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> DraftKey for T {}

/// A garment piece drafter: one method per pipeline stage.
///
/// Every stage runs, in order, for every draft. A stage with nothing to do
/// simply returns `Ok(())`.
pub trait Drafter {
    /// Keys for this drafter's points, usually a fieldless enum.
    type PointKey: DraftKey;
    /// Keys for this drafter's paths.
    type PathKey: DraftKey;

    /// Name used in diagnostics and as the default piece name.
    fn name(&self) -> &str;

    /// Points computed directly from measurements and options.
    fn landmark_points(&self, ws: &mut Workspace<Self::PointKey, Self::PathKey>) -> Result<(), DraftError>;

    /// Lines and curves joining landmark points.
    fn landmark_paths(&self, ws: &mut Workspace<Self::PointKey, Self::PathKey>) -> Result<(), DraftError>;

    /// Points and paths that depend on landmark paths, such as intersections.
    fn relative_geometry(&self, ws: &mut Workspace<Self::PointKey, Self::PathKey>) -> Result<(), DraftError>;

    /// Grain line, notches, fold lines.
    fn additional_features(&self, _ws: &mut Workspace<Self::PointKey, Self::PathKey>) -> Result<(), DraftError> {
        Ok(())
    }

    /// Finished pieces built from the accumulated geometry.
    fn assemble(&self, ws: &Workspace<Self::PointKey, Self::PathKey>) -> Result<Vec<Piece>, DraftError>;
}

/// Run every stage of `drafter` and return its finished pieces.
pub fn draft<D: Drafter>(drafter: &D) -> Result<Vec<Piece>, DraftError> {
    let mut ws: Workspace<D::PointKey, D::PathKey> = Workspace::new(drafter.name());

    ws.advance(Stage::LandmarkPoints)?;
    drafter.landmark_points(&mut ws)?;

    ws.advance(Stage::LandmarkPaths)?;
    drafter.landmark_paths(&mut ws)?;

    ws.advance(Stage::RelativeGeometry)?;
    drafter.relative_geometry(&mut ws)?;

    ws.advance(Stage::AdditionalFeatures)?;
    drafter.additional_features(&mut ws)?;

    ws.advance(Stage::Assemble)?;
    let pieces = drafter.assemble(&ws)?;
    ws.advance(Stage::Finished)?;

    if pieces.is_empty() {
        return Err(DraftError::EmptyAssembly(drafter.name().to_string()));
    }
    log::debug!(
        drafter = drafter.name(),
        pieces = pieces.len(),
        points = ws.point_count(),
        paths = ws.path_count(),
        "draft finished"
    );
    Ok(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_form_a_single_chain() {
        let mut stage = Stage::Initialize;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            stage = next;
            seen.push(stage);
        }
        assert_eq!(seen.len(), 7);
        assert_eq!(stage, Stage::Finished);
    }
}
