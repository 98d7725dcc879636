use crate::board::{Board, Color, PieceKind, Position};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [(2, -1), (2, 1), (-2, 1), (-2, -1), (-1, 2), (-1, -2), (1, 2), (1, -2)];
pub const STRAIGHT_DIRS: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
pub const DIAGONAL_DIRS: [(i8, i8); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];

fn holds(board: &Board, pos: Option<Position>, color: Color, kinds: &[PieceKind]) -> bool {
    match pos.and_then(|p| board.get(p)) {
        Some(piece) => piece.color == color && kinds.contains(&piece.kind),
        None => false,
    }
}

/// First occupied square walking from `from` in direction `dir`.
fn first_occupied(board: &Board, from: Position, dir: (i8, i8)) -> Option<Position> {
    let mut cur = from.offset(dir.0, dir.1);
    while let Some(p) = cur {
        if !board.is_empty(p) { return Some(p); }
        cur = p.offset(dir.0, dir.1);
    }
    None
}

/// True if a piece of the colour opposing `defender` threatens `square`.
pub fn is_attacked(board: &Board, square: Position, defender: Color) -> bool {
    let enemy = defender.opposite();
    let fwd = defender.forward();

    // Pawns sit one row toward the defender's advance, on either diagonal.
    if [-1, 1].iter().any(|&dc| holds(board, square.offset(fwd, dc), enemy, &[PieceKind::Pawn])) {
        return true;
    }

    if KNIGHT_OFFSETS.iter().any(|&(dr, dc)| holds(board, square.offset(dr, dc), enemy, &[PieceKind::Knight])) {
        return true;
    }

    let rays = STRAIGHT_DIRS
        .iter()
        .map(|&d| (d, [PieceKind::Rook, PieceKind::Queen]))
        .chain(DIAGONAL_DIRS.iter().map(|&d| (d, [PieceKind::Bishop, PieceKind::Queen])));
    for (dir, sliders) in rays {
        if holds(board, square.offset(dir.0, dir.1), enemy, &[PieceKind::King]) { return true; }
        if holds(board, first_occupied(board, square, dir), enemy, &sliders) { return true; }
    }
    false
}

/// Is `color`'s king attacked? A board without that king reports false.
pub fn in_check(board: &Board, color: Color) -> bool {
    board.king_square(color).is_some_and(|k| is_attacked(board, k, color))
}
