use log::trace;

use crate::board::{Board, Color, PieceKind};
use crate::rules::attacks::is_attacked;
use crate::rules::history::MoveRecord;
use crate::rules::movegen::color_moves;

/// True if `color` is in check and no single move of its pieces lifts it.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_checkmate_after(board, color, None)
}

/// Like [`is_checkmate`], with `last` being the move that produced `board`
/// so an en-passant capture counts as an escape.
pub fn is_checkmate_after(board: &Board, color: Color, last: Option<MoveRecord>) -> bool {
    let Some(king) = board.king_square(color) else { return false };
    if !is_attacked(board, king, color) { return false; }
    for cand in color_moves(board, color, last) {
        // Each candidate is tried on its own copy of the board.
        let next = cand.apply(board);
        let king_now = match next.get(cand.to) {
            Some(p) if p.kind == PieceKind::King => cand.to,
            _ => king,
        };
        if !is_attacked(&next, king_now, color) {
            trace!("{color:?} escapes check with {}{}", cand.from, cand.to);
            return false;
        }
    }
    true
}
