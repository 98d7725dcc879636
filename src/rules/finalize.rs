use crate::board::{rook_home, Board, CastleSide, Color, Position};
use crate::rules::resolve::MoveVerdict;

/// Move the castling rook next to the king. The king's own move is already
/// on `board`.
pub fn finalize_castle(board: &Board, color: Color, side: CastleSide) -> Board {
    let home = rook_home(color, side);
    match Position::new(color.back_row(), side.rook_col()) {
        Some(to) => board.relocated(home, to),
        None => board.clone(),
    }
}

/// Remove the pawn captured en passant, the square behind `destination`
/// from the capturer's point of view.
pub fn finalize_en_passant(board: &Board, color: Color, destination: Position) -> Board {
    let mut next = board.clone();
    if let Some(victim) = destination.offset(-color.forward(), 0) { next.set(victim, None); }
    next
}

/// The board to persist after an accepted move.
pub fn finalize(board: &Board, verdict: &MoveVerdict) -> Board {
    let color = verdict.piece_moved.color;
    if let Some(side) = verdict.castle_side {
        finalize_castle(board, color, side)
    } else if verdict.is_en_passant {
        finalize_en_passant(board, color, verdict.destination)
    } else {
        board.clone()
    }
}
