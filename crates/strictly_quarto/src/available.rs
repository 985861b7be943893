//! Pieces not yet placed on the board.

use crate::piece::{Piece, PieceCatalog};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The available-pieces set, kept in catalog order.
///
/// Order matters to pickers that address pieces by position, so removal
/// keeps the remaining pieces in their relative order. Deserialization goes
/// through [`AvailablePieces::from_pieces`] so lookups stay sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Piece>", into = "Vec<Piece>")]
pub struct AvailablePieces {
    pieces: Vec<Piece>,
}

impl AvailablePieces {
    /// The full catalog.
    pub fn full() -> Self {
        Self {
            pieces: PieceCatalog::all().to_vec(),
        }
    }

    /// Builds a set from arbitrary pieces, sorted into catalog order with
    /// duplicates dropped.
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Self {
        let mut pieces: Vec<_> = pieces.into_iter().collect();
        pieces.sort();
        pieces.dedup();
        Self { pieces }
    }

    /// Number of pieces left.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns true once every piece has been handed out.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns true if the piece has not been placed or selected.
    pub fn contains(&self, piece: Piece) -> bool {
        self.pieces.binary_search(&piece).is_ok()
    }

    /// Piece at a display position.
    pub fn get(&self, position: usize) -> Option<Piece> {
        self.pieces.get(position).copied()
    }

    /// Display position of a piece.
    pub fn position(&self, piece: Piece) -> Option<usize> {
        self.pieces.binary_search(&piece).ok()
    }

    /// Removes a piece by value. Returns false if it was not present.
    #[instrument(skip(self, piece), fields(piece = %piece, remaining = self.pieces.len()))]
    pub fn remove(&mut self, piece: Piece) -> bool {
        match self.pieces.binary_search(&piece) {
            Ok(position) => {
                self.pieces.remove(position);
                true
            }
            Err(_) => {
                debug!("Piece not in available set");
                false
            }
        }
    }

    /// Pieces in display order.
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.pieces.iter().copied()
    }

    /// Pieces as a slice.
    pub fn as_slice(&self) -> &[Piece] {
        &self.pieces
    }
}

impl Default for AvailablePieces {
    fn default() -> Self {
        Self::full()
    }
}

impl From<Vec<Piece>> for AvailablePieces {
    fn from(pieces: Vec<Piece>) -> Self {
        Self::from_pieces(pieces)
    }
}

impl From<AvailablePieces> for Vec<Piece> {
    fn from(available: AvailablePieces) -> Self {
        available.pieces
    }
}

impl<'a> IntoIterator for &'a AvailablePieces {
    type Item = Piece;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Piece>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter().copied()
    }
}
