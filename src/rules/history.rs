use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::BoardError;

/// One accepted move as the history keeps it: where it started and ended.
/// Castling is recorded as the king's move only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub origin: Position,
    pub destination: Position,
}

impl MoveRecord {
    pub fn new(origin: Position, destination: Position) -> Self { Self { origin, destination } }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)
    }
}

/// Coordinate notation, e.g. `e2e4`.
impl FromStr for MoveRecord {
    type Err = BoardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() { return Err(BoardError::InvalidSquare(s.to_string())); }
        Ok(Self { origin: s[0..2].parse()?, destination: s[2..4].parse()? })
    }
}

/// What the rules engine may ask about a game's past. Supplied by the
/// caller; the engine never stores history itself.
pub trait MoveHistory {
    /// True once any accepted move has started on `square`.
    fn has_piece_ever_left(&self, square: Position) -> bool;
    /// The most recently accepted move, if any.
    fn last_move(&self) -> Option<MoveRecord>;
}

/// Ordered in-memory list of accepted moves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveLog {
    moves: Vec<MoveRecord>,
}

impl MoveLog {
    pub fn new() -> Self { Self::default() }
    pub fn push(&mut self, record: MoveRecord) { self.moves.push(record); }
    pub fn len(&self) -> usize { self.moves.len() }
    pub fn is_empty(&self) -> bool { self.moves.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> { self.moves.iter() }
}

impl FromIterator<MoveRecord> for MoveLog {
    fn from_iter<I: IntoIterator<Item = MoveRecord>>(iter: I) -> Self {
        Self { moves: iter.into_iter().collect() }
    }
}

impl MoveHistory for MoveLog {
    fn has_piece_ever_left(&self, square: Position) -> bool {
        self.moves.iter().any(|m| m.origin == square)
    }

    fn last_move(&self) -> Option<MoveRecord> { self.moves.last().copied() }
}

impl<H: MoveHistory + ?Sized> MoveHistory for &H {
    fn has_piece_ever_left(&self, square: Position) -> bool { (**self).has_piece_ever_left(square) }
    fn last_move(&self) -> Option<MoveRecord> { (**self).last_move() }
}
