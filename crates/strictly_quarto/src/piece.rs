//! Piece catalog: the 16 Quarto pieces and their stable indexing.
//!
//! A piece is a tuple of four binary attributes. Identity is the tuple
//! itself, so a [`Piece`] is a small `Copy` value rather than an object.
//! Catalog order enumerates the tuples lexicographically with attribute 0
//! most significant, which makes the catalog index equal to the packed
//! attribute bits.

use crate::error::QuartoError;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Number of pieces in the catalog.
pub const PIECE_COUNT: usize = 16;

/// Number of binary attributes each piece carries.
pub const CHANNEL_COUNT: usize = 4;

/// One of the four independent binary attributes of a piece.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Channel {
    /// Introvert (0) / Extrovert (1).
    #[strum(to_string = "I/E")]
    Energy,
    /// Intuition (0) / Sensing (1).
    #[strum(to_string = "N/S")]
    Perception,
    /// Thinking (0) / Feeling (1).
    #[strum(to_string = "T/F")]
    Judgment,
    /// Perceiving (0) / Judging (1).
    #[strum(to_string = "P/J")]
    Lifestyle,
}

impl Channel {
    /// Position of this channel in the attribute tuple (0-3).
    pub fn position(self) -> usize {
        match self {
            Channel::Energy => 0,
            Channel::Perception => 1,
            Channel::Judgment => 2,
            Channel::Lifestyle => 3,
        }
    }

    /// Display letters for attribute values 0 and 1.
    pub fn letters(self) -> [char; 2] {
        match self {
            Channel::Energy => ['I', 'E'],
            Channel::Perception => ['N', 'S'],
            Channel::Judgment => ['T', 'F'],
            Channel::Lifestyle => ['P', 'J'],
        }
    }
}

/// A Quarto piece.
///
/// Internally the four attributes are packed into the low nibble, attribute
/// 0 in bit 3. Only the 16 canonical values can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Piece(u8);

impl Piece {
    /// Looks up the piece with the given attribute tuple.
    ///
    /// # Errors
    ///
    /// Returns [`QuartoError::InvalidPiece`] if any attribute is not 0 or 1.
    #[instrument]
    pub fn from_attributes(attributes: [u8; CHANNEL_COUNT]) -> Result<Self, QuartoError> {
        if attributes.iter().any(|value| *value > 1) {
            return Err(QuartoError::InvalidPiece(attributes));
        }
        let bits = attributes
            .iter()
            .fold(0u8, |acc, value| (acc << 1) | value);
        Ok(Self(bits))
    }

    /// Returns the piece at a catalog index.
    ///
    /// # Errors
    ///
    /// Returns [`QuartoError::PieceIndexOutOfRange`] for indices past 15.
    pub fn from_index(index: usize) -> Result<Self, QuartoError> {
        u8::try_from(index)
            .ok()
            .filter(|bits| usize::from(*bits) < PIECE_COUNT)
            .map(Self)
            .ok_or(QuartoError::PieceIndexOutOfRange(index))
    }

    /// Catalog index (0-15).
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Value (0 or 1) of one attribute.
    pub fn attribute(self, channel: Channel) -> u8 {
        (self.0 >> (CHANNEL_COUNT - 1 - channel.position())) & 1
    }

    /// All four attributes in channel order.
    pub fn attributes(self) -> [u8; CHANNEL_COUNT] {
        let mut attributes = [0; CHANNEL_COUNT];
        for channel in Channel::iter() {
            attributes[channel.position()] = self.attribute(channel);
        }
        attributes
    }

    /// Board-cell encoding: the catalog index shifted by one so 0 means empty.
    pub fn cell_code(self) -> u8 {
        self.0 + 1
    }

    /// Decodes a board cell. `Ok(None)` for an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`QuartoError::PieceIndexOutOfRange`] for codes above 16.
    pub fn from_cell_code(code: u8) -> Result<Option<Self>, QuartoError> {
        match code {
            0 => Ok(None),
            code => Self::from_index(usize::from(code) - 1).map(Some),
        }
    }

    /// Four-letter label, e.g. `INTP` for `(0, 0, 0, 0)`.
    pub fn label(self) -> String {
        Channel::iter()
            .map(|channel| channel.letters()[usize::from(self.attribute(channel))])
            .collect()
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<u8> for Piece {
    type Error = QuartoError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(usize::from(index))
    }
}

impl From<Piece> for u8 {
    fn from(piece: Piece) -> Self {
        piece.0
    }
}

/// The canonical ordering of all 16 pieces.
pub struct PieceCatalog;

impl PieceCatalog {
    /// All pieces in catalog order.
    pub fn all() -> [Piece; PIECE_COUNT] {
        std::array::from_fn(|index| Piece(index as u8))
    }

    /// Catalog index of an attribute tuple.
    ///
    /// # Errors
    ///
    /// Returns [`QuartoError::InvalidPiece`] if the tuple is not canonical.
    pub fn index_of(attributes: [u8; CHANNEL_COUNT]) -> Result<usize, QuartoError> {
        Piece::from_attributes(attributes).map(Piece::index)
    }

    /// Piece at a catalog index.
    ///
    /// # Errors
    ///
    /// Returns [`QuartoError::PieceIndexOutOfRange`] for indices past 15.
    pub fn piece_at(index: usize) -> Result<Piece, QuartoError> {
        Piece::from_index(index)
    }
}
