use serde::{Deserialize, Serialize};

use crate::board::{Board, Piece, PieceKind, Position};
use crate::error::MoveError;

/// A square whose content differs between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareDiff {
    pub position: Position,
    pub removed: Option<Piece>,
    pub added: Option<Piece>,
}

/// Changed squares between `old` and `new`, row-major.
pub fn diff(old: &Board, new: &Board) -> Vec<SquareDiff> {
    Position::all()
        .filter_map(|position| {
            let (removed, added) = (old.get(position), new.get(position));
            (removed != added).then_some(SquareDiff { position, removed, added })
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveShape {
    Quiet,
    Capture,
    Promotion,
    /// King two columns along its row; the rook is relocated later.
    CastleCandidate,
    /// Pawn diagonal onto an empty square; the captured pawn is removed later.
    EnPassantCandidate,
}

/// A two-square diff read as one piece travelling from `origin` to `destination`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawMove {
    pub origin: Position,
    pub destination: Position,
    pub moved: Piece,
    pub captured: Option<Piece>,
    /// What the destination holds on the proposed board.
    pub placed: Piece,
}

impl RawMove {
    pub fn row_delta(&self) -> i8 { self.origin.row() as i8 - self.destination.row() as i8 }
    pub fn col_delta(&self) -> i8 { self.origin.col() as i8 - self.destination.col() as i8 }

    pub fn shape(&self) -> MoveShape {
        if self.placed != self.moved { return MoveShape::Promotion; }
        if self.captured.is_some() { return MoveShape::Capture; }
        match self.moved.kind {
            PieceKind::King if self.row_delta() == 0 && self.col_delta().abs() == 2 => MoveShape::CastleCandidate,
            PieceKind::Pawn if self.col_delta().abs() == 1 => MoveShape::EnPassantCandidate,
            _ => MoveShape::Quiet,
        }
    }
}

/// Interpret a diff as a single move: exactly one square emptied and one
/// square gaining a piece.
pub fn classify(diffs: &[SquareDiff]) -> Result<RawMove, MoveError> {
    let ambiguous = MoveError::AmbiguousMove { changed: diffs.len() };
    let [a, b] = diffs else { return Err(ambiguous) };
    // An emptied square always had a piece, so `removed` is set on the origin.
    let (from, moved, to, placed) = match (a, b) {
        (SquareDiff { removed: Some(moved), added: None, .. }, SquareDiff { added: Some(placed), .. }) => (a, *moved, b, *placed),
        (SquareDiff { added: Some(placed), .. }, SquareDiff { removed: Some(moved), added: None, .. }) => (b, *moved, a, *placed),
        _ => return Err(ambiguous),
    };
    Ok(RawMove { origin: from.position, destination: to.position, moved, captured: to.removed, placed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn sq(s: &str) -> Position { s.parse().unwrap() }

    #[test]
    fn pawn_push_is_two_diffs_in_row_major_order() {
        let old = Board::initial();
        let new = old.relocated(sq("e2"), sq("e4"));
        let d = diff(&old, &new);
        assert_eq!(d.len(), 2);
        assert_eq!(d[0].position, sq("e4"));
        assert_eq!(d[1].position, sq("e2"));
        let mv = classify(&d).unwrap();
        assert_eq!(mv.origin, sq("e2"));
        assert_eq!(mv.destination, sq("e4"));
        assert_eq!(mv.moved, Piece::new(PieceKind::Pawn, Color::White));
        assert_eq!(mv.captured, None);
        assert_eq!((mv.row_delta(), mv.col_delta()), (2, 0));
        assert_eq!(mv.shape(), MoveShape::Quiet);
    }

    #[test]
    fn rejects_other_diff_counts() {
        let old = Board::initial();
        assert_eq!(classify(&diff(&old, &old)), Err(MoveError::AmbiguousMove { changed: 0 }));
        let mut one = old.clone();
        one.set(sq("e2"), None);
        assert_eq!(classify(&diff(&old, &one)), Err(MoveError::AmbiguousMove { changed: 1 }));
        let mut three = old.relocated(sq("e2"), sq("e4"));
        three.set(sq("a7"), None);
        assert_eq!(classify(&diff(&old, &three)), Err(MoveError::AmbiguousMove { changed: 3 }));
        let two_moves = old.relocated(sq("e2"), sq("e4")).relocated(sq("d2"), sq("d4"));
        assert_eq!(classify(&diff(&old, &two_moves)), Err(MoveError::AmbiguousMove { changed: 4 }));
    }

    #[test]
    fn two_appearing_pieces_are_ambiguous() {
        let old = Board::initial();
        let mut new = old.clone();
        new.set(sq("e4"), Some(Piece::new(PieceKind::Queen, Color::White)));
        new.set(sq("d4"), Some(Piece::new(PieceKind::Queen, Color::White)));
        assert_eq!(classify(&diff(&old, &new)), Err(MoveError::AmbiguousMove { changed: 2 }));
    }

    #[test]
    fn two_vacated_squares_are_ambiguous() {
        let old = Board::initial();
        let mut new = old.clone();
        new.set(sq("e2"), None);
        new.set(sq("d2"), None);
        assert_eq!(classify(&diff(&old, &new)), Err(MoveError::AmbiguousMove { changed: 2 }));
    }

    #[test]
    fn capture_and_promotion_shapes() {
        let mut old = Board::empty();
        old.set(sq("a7"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        old.set(sq("b8"), Some(Piece::new(PieceKind::Rook, Color::Black)));
        let capture = classify(&diff(&old, &old.relocated(sq("a7"), sq("b8")))).unwrap();
        assert_eq!(capture.shape(), MoveShape::Capture);
        assert_eq!(capture.captured, Some(Piece::new(PieceKind::Rook, Color::Black)));
        let mut promoted = old.relocated(sq("a7"), sq("b8"));
        promoted.set(sq("b8"), Some(Piece::new(PieceKind::Queen, Color::White)));
        assert_eq!(classify(&diff(&old, &promoted)).unwrap().shape(), MoveShape::Promotion);
    }

    #[test]
    fn castle_and_en_passant_shapes() {
        let mut old = Board::empty();
        old.set(sq("e1"), Some(Piece::new(PieceKind::King, Color::White)));
        old.set(sq("d5"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        let castle = classify(&diff(&old, &old.relocated(sq("e1"), sq("g1")))).unwrap();
        assert_eq!(castle.shape(), MoveShape::CastleCandidate);
        let ep = classify(&diff(&old, &old.relocated(sq("d5"), sq("c6")))).unwrap();
        assert_eq!(ep.shape(), MoveShape::EnPassantCandidate);
    }
}
