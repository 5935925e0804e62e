//! A named, ordered collection of pieces.

use crate::draft::{Drafter, HemDrafter, draft};
use crate::errors::{DraftError, OutlineError};
use crate::float_types::Real;
use crate::log;
use crate::piece::Piece;

#[cfg(all(feature = "offset", feature = "parallel"))]
use rayon::prelude::*;

/// Pieces in drafting order. Piece names are unique within a pattern.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pattern {
    name: String,
    pieces: Vec<Piece>,
}

impl Pattern {
    pub fn new(name: impl Into<String>) -> Self {
        Pattern {
            name: name.into(),
            pieces: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, name: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn add_piece(&mut self, piece: Piece) -> Result<(), DraftError> {
        if self.piece(piece.name()).is_some() {
            return Err(DraftError::DuplicatePiece {
                pattern: self.name.clone(),
                piece: piece.name().to_string(),
            });
        }
        self.pieces.push(piece);
        Ok(())
    }

    /// Run `drafter` and add everything it assembles. Either all of its pieces
    /// are added or none are.
    pub fn draft<D: Drafter>(&mut self, drafter: &D) -> Result<usize, DraftError> {
        let pieces = draft(drafter)?;
        for (i, piece) in pieces.iter().enumerate() {
            let clash = self.piece(piece.name()).is_some()
                || pieces[..i].iter().any(|earlier| earlier.name() == piece.name());
            if clash {
                return Err(DraftError::DuplicatePiece {
                    pattern: self.name.clone(),
                    piece: piece.name().to_string(),
                });
            }
        }
        let added = pieces.len();
        self.pieces.extend(pieces);
        log::debug!(pattern = %self.name, drafter = drafter.name(), added, "pieces added");
        Ok(added)
    }

    /// Draft a hem of depth `width` off the straight edge `start`→`end` of
    /// the piece `piece` and add it to the pattern.
    pub fn add_hem(&mut self, piece: &str, start: &str, end: &str, width: Real) -> Result<&Piece, DraftError> {
        let source = self.piece(piece).ok_or_else(|| DraftError::MissingPiece {
            pattern: self.name.clone(),
            piece: piece.to_string(),
        })?;
        let drafter = HemDrafter::from_piece(source, start, end, width)?.seam_allowance(source.seam_allowance());
        self.draft(&drafter)?;
        let index = self.pieces.len() - 1;
        Ok(&self.pieces[index])
    }

    /// Pieces whose outline cannot be derived, with the reason.
    pub fn outline_failures(&self) -> Vec<(String, OutlineError)> {
        self.pieces
            .iter()
            .filter_map(|piece| piece.outline().err().map(|e| (piece.name().to_string(), e)))
            .collect()
    }

    /// A copy of the pattern with every piece replaced by its seam-allowance
    /// variant, using each piece's own allowance.
    #[cfg(feature = "offset")]
    pub fn with_seam_allowances(&self) -> Result<Pattern, DraftError> {
        #[cfg(feature = "parallel")]
        let iter = self.pieces.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = self.pieces.iter();

        let pieces = iter.map(Piece::seam_allowance_variant).collect::<Result<Vec<_>, _>>()?;
        Ok(Pattern {
            name: self.name.clone(),
            pieces,
        })
    }
}
