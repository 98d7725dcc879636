// Random games played by cozy-chess. Every move it considers legal must be
// accepted, and the persisted board and check flags must agree with it.
use boardcheck::rules::{finalize, resolve, MoveLog};
use boardcheck::{Board, Color, Piece, PieceKind, Position};
use cozy_chess as cozy;
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn position(sq: cozy::Square) -> Position { sq.to_string().parse().unwrap() }

fn kind(p: cozy::Piece) -> PieceKind {
    match p {
        cozy::Piece::Pawn => PieceKind::Pawn,
        cozy::Piece::Knight => PieceKind::Knight,
        cozy::Piece::Bishop => PieceKind::Bishop,
        cozy::Piece::Rook => PieceKind::Rook,
        cozy::Piece::Queen => PieceKind::Queen,
        cozy::Piece::King => PieceKind::King,
    }
}

fn color(c: cozy::Color) -> Color {
    match c {
        cozy::Color::White => Color::White,
        cozy::Color::Black => Color::Black,
    }
}

fn to_local(board: &cozy::Board) -> Board {
    let mut out = Board::empty();
    for sq in cozy::Square::ALL {
        if let (Some(p), Some(c)) = (board.piece_on(sq), board.color_on(sq)) {
            out.set(position(sq), Some(Piece::new(kind(p), color(c))));
        }
    }
    out
}

fn legal_moves(board: &cozy::Board) -> Vec<cozy::Move> {
    let mut moves = Vec::new();
    board.generate_moves(|pm| {
        moves.extend(pm);
        false
    });
    moves
}

/// The board a client submits for `mv`: only the moving piece changes.
/// cozy-chess encodes castling as the king taking its own rook.
fn proposal(local: &Board, mv: cozy::Move, mover: Color) -> Board {
    let from = position(mv.from);
    let mut to = position(mv.to);
    let is_castle = local.get(from) == Some(Piece::new(PieceKind::King, mover))
        && local.get(to) == Some(Piece::new(PieceKind::Rook, mover));
    if is_castle {
        let col = if to.col() > from.col() { 6 } else { 2 };
        to = Position::new(from.row(), col).unwrap();
    }
    let mut next = local.relocated(from, to);
    if let Some(p) = mv.promotion { next.set(to, Some(Piece::new(kind(p), mover))); }
    next
}

fn playout(seed: u64, max_plies: usize) -> usize {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut reference = cozy::Board::default();
    let mut local = Board::initial();
    let mut log = MoveLog::new();
    assert_eq!(to_local(&reference), local);

    for ply in 0..max_plies {
        let moves = legal_moves(&reference);
        if moves.is_empty() { return ply; }
        let mv = moves[rng.gen_range(0..moves.len())];
        let mover = color(reference.side_to_move());
        let proposed = proposal(&local, mv, mover);

        let verdict = match resolve(&local, &proposed, mover, &log) {
            Ok(v) => v,
            Err(e) => panic!("seed {seed} ply {ply}: {mv} rejected ({e})\n{local}"),
        };
        reference.play(mv);
        local = finalize(&proposed, &verdict);
        log.push(verdict.record());

        assert_eq!(local, to_local(&reference), "seed {seed} ply {ply}: {mv}");
        let in_check = !reference.checkers().is_empty();
        assert_eq!(verdict.opponent_in_check, in_check, "seed {seed} ply {ply}: {mv} check flag");
        let mated = in_check && legal_moves(&reference).is_empty();
        assert_eq!(verdict.opponent_in_checkmate, mated, "seed {seed} ply {ply}: {mv} mate flag");
        assert_eq!(Board::from_bytes(&local.to_bytes()).unwrap(), local);
    }
    max_plies
}

#[test]
fn random_playouts_agree_with_reference() {
    let mut total = 0;
    for seed in 0..48 {
        total += playout(seed, 160);
    }
    assert!(total > 1_000, "only {total} plies played");
}
