use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::board::{king_home, rook_home, Board, CastleSide, Color, Piece, PieceKind, Position};
use crate::error::{IllegalReason, MoveError};
use crate::rules::attacks::in_check;
use crate::rules::checkmate::is_checkmate_after;
use crate::rules::diff::{classify, diff, MoveShape, RawMove};
use crate::rules::finalize::{finalize_castle, finalize_en_passant};
use crate::rules::history::{MoveHistory, MoveRecord};
use crate::rules::movegen::en_passant_victim;

/// Facts about an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveVerdict {
    pub piece_moved: Piece,
    /// For en passant this is the removed pawn, not the (empty) destination.
    pub piece_captured: Option<Piece>,
    pub promoted_to: Option<PieceKind>,
    pub origin: Position,
    pub destination: Position,
    pub castle_side: Option<CastleSide>,
    pub is_en_passant: bool,
    pub opponent_in_check: bool,
    pub opponent_in_checkmate: bool,
}

impl MoveVerdict {
    pub fn record(&self) -> MoveRecord { MoveRecord::new(self.origin, self.destination) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Special {
    Plain,
    Castle(CastleSide),
    EnPassant(Position),
}

/// Decide whether `new` follows from `old` by one legal move of `mover`.
///
/// Castling and en passant are submitted as the king's or pawn's own move
/// only; the rook relocation and pawn removal are applied with
/// [`crate::rules::finalize::finalize`] once the verdict comes back.
pub fn resolve<H: MoveHistory + ?Sized>(old: &Board, new: &Board, mover: Color, history: &H) -> Result<MoveVerdict, MoveError> {
    let res = evaluate(old, new, mover, history);
    match &res {
        Ok(v) => trace!("{mover:?} {}{} accepted: {v:?}", v.origin, v.destination),
        Err(e) => debug!("{mover:?} move rejected: {e}"),
    }
    res
}

fn evaluate<H: MoveHistory + ?Sized>(old: &Board, new: &Board, mover: Color, history: &H) -> Result<MoveVerdict, MoveError> {
    let mv = classify(&diff(old, new))?;
    if mv.moved.color != mover {
        return Err(MoveError::WrongMoverColor { expected: mover, moved: mv.moved.color });
    }
    if mv.captured.is_some_and(|c| c.color == mover) {
        return Err(MoveError::CannotCaptureOwnPiece(mv.destination));
    }
    let shape = mv.shape();
    let promoted_to = check_promotion(&mv, shape)?;
    let special = check_geometry(old, &mv, shape, history)?;

    let (after, captured) = match special {
        Special::Plain => (new.clone(), mv.captured),
        Special::Castle(side) => (finalize_castle(new, mover, side), None),
        Special::EnPassant(victim) => (finalize_en_passant(new, mover, mv.destination), old.get(victim)),
    };
    if in_check(&after, mover) { return Err(MoveError::SelfCheck); }

    let opponent = mover.opposite();
    let record = MoveRecord::new(mv.origin, mv.destination);
    let opponent_in_check = in_check(&after, opponent);
    let opponent_in_checkmate = opponent_in_check && is_checkmate_after(&after, opponent, Some(record));

    Ok(MoveVerdict {
        piece_moved: mv.moved,
        piece_captured: captured,
        promoted_to,
        origin: mv.origin,
        destination: mv.destination,
        castle_side: match special { Special::Castle(side) => Some(side), _ => None },
        is_en_passant: matches!(special, Special::EnPassant(_)),
        opponent_in_check,
        opponent_in_checkmate,
    })
}

/// A changed piece is only allowed for a pawn reaching the far rank.
/// Stricter than a kind-change check alone: a pawn reaching the far rank
/// must also change, so arriving there still a pawn is rejected.
fn check_promotion(mv: &RawMove, shape: MoveShape) -> Result<Option<PieceKind>, MoveError> {
    let err = MoveError::IllegalPromotion { from: mv.moved.kind, to: mv.placed.kind };
    let reaches_far_rank = mv.moved.kind == PieceKind::Pawn && mv.destination.row() == mv.moved.color.promotion_row();
    if shape != MoveShape::Promotion {
        return if reaches_far_rank { Err(err) } else { Ok(None) };
    }
    if mv.placed.color != mv.moved.color || !reaches_far_rank || matches!(mv.placed.kind, PieceKind::King | PieceKind::Pawn) {
        return Err(err);
    }
    Ok(Some(mv.placed.kind))
}

/// Every square strictly between `from` and `to` (on a shared line) is empty.
fn path_clear(board: &Board, from: Position, to: Position) -> Result<(), IllegalReason> {
    let dr = (to.row() as i8 - from.row() as i8).signum();
    let dc = (to.col() as i8 - from.col() as i8).signum();
    let mut cur = from.offset(dr, dc);
    while let Some(p) = cur {
        if p == to { return Ok(()); }
        if !board.is_empty(p) { return Err(IllegalReason::PathBlocked); }
        cur = p.offset(dr, dc);
    }
    Ok(())
}

fn check_geometry<H: MoveHistory + ?Sized>(board: &Board, mv: &RawMove, shape: MoveShape, history: &H) -> Result<Special, IllegalReason> {
    let (dr, dc) = (mv.row_delta(), mv.col_delta());
    let straight = (dr == 0) != (dc == 0);
    let diagonal = dr != 0 && dr.abs() == dc.abs();
    match mv.moved.kind {
        PieceKind::Pawn => check_pawn(board, mv, shape, history),
        PieceKind::Knight => match (dr.abs(), dc.abs()) {
            (2, 1) | (1, 2) => Ok(Special::Plain),
            _ => Err(IllegalReason::KnightShape),
        },
        PieceKind::Bishop => {
            if !diagonal { return Err(IllegalReason::NotDiagonal); }
            path_clear(board, mv.origin, mv.destination).map(|_| Special::Plain)
        }
        PieceKind::Rook => {
            if !straight { return Err(IllegalReason::NotStraight); }
            path_clear(board, mv.origin, mv.destination).map(|_| Special::Plain)
        }
        PieceKind::Queen => {
            if !straight && !diagonal { return Err(IllegalReason::NotQueenLine); }
            path_clear(board, mv.origin, mv.destination).map(|_| Special::Plain)
        }
        PieceKind::King => match shape {
            MoveShape::CastleCandidate => check_castle(board, mv, history).map(Special::Castle),
            _ if dr.abs() <= 1 && dc.abs() <= 1 => Ok(Special::Plain),
            _ => Err(IllegalReason::KingTooFar),
        },
    }
}

fn check_pawn<H: MoveHistory + ?Sized>(board: &Board, mv: &RawMove, shape: MoveShape, history: &H) -> Result<Special, IllegalReason> {
    let color = mv.moved.color;
    let steps = -mv.row_delta() * color.forward();
    let dc = mv.col_delta();
    if steps <= 0 { return Err(IllegalReason::PawnNotForward); }
    if dc == 0 {
        if mv.captured.is_some() { return Err(IllegalReason::PawnForwardCapture); }
        return match steps {
            1 => Ok(Special::Plain),
            2 if mv.origin.row() != color.pawn_row() => Err(IllegalReason::DoublePushOffHomeRank),
            2 => path_clear(board, mv.origin, mv.destination).map(|_| Special::Plain),
            _ => Err(IllegalReason::PawnTooFar),
        };
    }
    if dc.abs() == 1 && steps == 1 {
        return match shape {
            MoveShape::EnPassantCandidate => en_passant_victim(board, color, mv.origin, mv.destination, history.last_move())
                .map(Special::EnPassant)
                .ok_or(IllegalReason::NoEnPassant),
            _ if mv.captured.is_some() => Ok(Special::Plain),
            // promoting diagonally onto an empty square
            _ => Err(IllegalReason::NoEnPassant),
        };
    }
    Err(IllegalReason::PawnTooFar)
}

/// Rights are lost for good once the king's or that rook's home square has
/// been the origin of any move, whichever piece stands there now.
fn check_castle<H: MoveHistory + ?Sized>(board: &Board, mv: &RawMove, history: &H) -> Result<CastleSide, IllegalReason> {
    let color = mv.moved.color;
    let side = if mv.destination.col() > mv.origin.col() { CastleSide::Kingside } else { CastleSide::Queenside };
    let king_sq = king_home(color);
    if mv.origin != king_sq { return Err(IllegalReason::CastleOffHome); }
    let rook_sq = rook_home(color, side);
    if history.has_piece_ever_left(king_sq) || history.has_piece_ever_left(rook_sq) {
        return Err(IllegalReason::CastlingRightsLost);
    }
    if board.get(rook_sq) != Some(Piece::new(PieceKind::Rook, color)) { return Err(IllegalReason::CastleWithoutRook); }
    path_clear(board, king_sq, rook_sq).map_err(|_| IllegalReason::CastlePathBlocked)?;
    Ok(side)
}
