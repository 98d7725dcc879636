//! Destinations for a piece at rest, without reference to a submitted move.
//! Moves here may still leave the own king attacked; callers simulate them.

use crate::board::{Board, Color, PieceKind, Position};
use crate::rules::attacks::{is_attacked, DIAGONAL_DIRS, KNIGHT_OFFSETS, STRAIGHT_DIRS};
use crate::rules::history::MoveRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub from: Position,
    pub to: Position,
    /// Square of the pawn removed by an en-passant capture.
    pub en_passant_victim: Option<Position>,
}

impl Candidate {
    /// The board after this move, as a fresh copy.
    pub fn apply(&self, board: &Board) -> Board {
        let mut next = board.relocated(self.from, self.to);
        if let Some(v) = self.en_passant_victim { next.set(v, None); }
        next
    }
}

/// Square of the enemy pawn a pawn of `color` captures by moving `from` → `to`
/// en passant, if `last` was that pawn's two-square push beside `from`.
pub fn en_passant_victim(board: &Board, color: Color, from: Position, to: Position, last: Option<MoveRecord>) -> Option<Position> {
    if from.row() != color.en_passant_row() { return None; }
    let dcol = to.col() as i8 - from.col() as i8;
    if dcol.abs() != 1 || from.offset(color.forward(), dcol) != Some(to) { return None; }
    let victim = Position::new(from.row(), to.col())?;
    let enemy = color.opposite();
    match board.get(victim) {
        Some(p) if p.color == enemy && p.kind == PieceKind::Pawn => {}
        _ => return None,
    }
    let pushed_from = victim.offset(-2 * enemy.forward(), 0)?;
    (last == Some(MoveRecord::new(pushed_from, victim))).then_some(victim)
}

fn push_if_open(board: &Board, color: Color, from: Position, to: Option<Position>, out: &mut Vec<Candidate>) -> bool {
    let Some(to) = to else { return false };
    match board.get(to) {
        None => { out.push(Candidate { from, to, en_passant_victim: None }); true }
        Some(p) => {
            if p.color != color { out.push(Candidate { from, to, en_passant_victim: None }); }
            false
        }
    }
}

fn slide(board: &Board, color: Color, from: Position, dirs: &[(i8, i8)], out: &mut Vec<Candidate>) {
    for &(dr, dc) in dirs {
        let mut cur = from.offset(dr, dc);
        while push_if_open(board, color, from, cur, out) {
            cur = cur.and_then(|p| p.offset(dr, dc));
        }
    }
}

fn pawn_moves(board: &Board, color: Color, from: Position, last: Option<MoveRecord>, out: &mut Vec<Candidate>) {
    let fwd = color.forward();
    if let Some(one) = from.offset(fwd, 0).filter(|&p| board.is_empty(p)) {
        out.push(Candidate { from, to: one, en_passant_victim: None });
        if from.row() == color.pawn_row() {
            if let Some(two) = one.offset(fwd, 0).filter(|&p| board.is_empty(p)) {
                out.push(Candidate { from, to: two, en_passant_victim: None });
            }
        }
    }
    for dc in [-1, 1] {
        let Some(to) = from.offset(fwd, dc) else { continue };
        match board.get(to) {
            Some(p) if p.color != color => out.push(Candidate { from, to, en_passant_victim: None }),
            Some(_) => {}
            None => {
                if let Some(v) = en_passant_victim(board, color, from, to, last) {
                    out.push(Candidate { from, to, en_passant_victim: Some(v) });
                }
            }
        }
    }
}

/// Pseudo-legal destinations of the piece on `from`. Empty if the square is empty.
pub fn piece_moves(board: &Board, from: Position, last: Option<MoveRecord>) -> Vec<Candidate> {
    let mut out = Vec::new();
    let Some(piece) = board.get(from) else { return out };
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, color, from, last, &mut out),
        PieceKind::Knight => {
            for &(dr, dc) in &KNIGHT_OFFSETS { push_if_open(board, color, from, from.offset(dr, dc), &mut out); }
        }
        PieceKind::Bishop => slide(board, color, from, &DIAGONAL_DIRS, &mut out),
        PieceKind::Rook => slide(board, color, from, &STRAIGHT_DIRS, &mut out),
        PieceKind::Queen => {
            slide(board, color, from, &STRAIGHT_DIRS, &mut out);
            slide(board, color, from, &DIAGONAL_DIRS, &mut out);
        }
        PieceKind::King => {
            for &(dr, dc) in STRAIGHT_DIRS.iter().chain(DIAGONAL_DIRS.iter()) {
                let to = from.offset(dr, dc).filter(|&p| !is_attacked(board, p, color));
                push_if_open(board, color, from, to, &mut out);
            }
        }
    }
    out
}

/// Every pseudo-legal move of `color`'s pieces, row-major by origin.
pub fn color_moves(board: &Board, color: Color, last: Option<MoveRecord>) -> Vec<Candidate> {
    board.pieces(color).flat_map(|(from, _)| piece_moves(board, from, last)).collect()
}
