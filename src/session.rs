//! Caller-side bookkeeping around the rules engine: the last accepted board,
//! whose turn it is, and the log of accepted moves.

use log::{debug, info};
use serde::Serialize;

use crate::board::{Board, Color, Piece, PieceKind};
use crate::error::{BoardError, MoveError, SessionError};
use crate::rules::{finalize, resolve, MoveLog, MoveRecord, MoveVerdict};

#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    to_move: Color,
    log: MoveLog,
    winner: Option<Color>,
}

impl Default for Session {
    fn default() -> Self { Self::new() }
}

/// Outcome of one submitted board, shaped for broadcasting.
#[derive(Clone, Debug, Serialize)]
pub struct MoveReport {
    pub ply: usize,
    pub mover: Color,
    pub legal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<MoveVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wire form of the last accepted board after this submission.
    pub state: String,
}

impl Session {
    pub fn new() -> Self { Self::from_position(Board::initial(), Color::White, MoveLog::new()) }

    pub fn from_position(board: Board, to_move: Color, log: MoveLog) -> Self {
        Self { board, to_move, log, winner: None }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn to_move(&self) -> Color { self.to_move }
    pub fn log(&self) -> &MoveLog { &self.log }
    pub fn winner(&self) -> Option<Color> { self.winner }
    pub fn is_finished(&self) -> bool { self.winner.is_some() }

    /// Validate `proposed` against the last accepted board. On success the
    /// finalised board is kept and the turn passes.
    pub fn submit(&mut self, proposed: &Board) -> Result<MoveVerdict, SessionError> {
        if let Some(winner) = self.winner { return Err(SessionError::GameOver { winner }); }
        let mover = self.to_move;
        let verdict = resolve(&self.board, proposed, mover, &self.log)?;
        self.board = finalize(proposed, &verdict);
        self.log.push(verdict.record());
        self.to_move = mover.opposite();
        if verdict.opponent_in_checkmate {
            info!("{mover:?} checkmates with {}", verdict.record());
            self.winner = Some(mover);
        } else if verdict.opponent_in_check {
            debug!("{mover:?} gives check with {}", verdict.record());
        }
        Ok(verdict)
    }

    /// Submit and describe the result; rejections leave the session unchanged.
    pub fn submit_report(&mut self, proposed: &Board) -> MoveReport {
        let (ply, mover) = (self.log.len() + 1, self.to_move);
        let (verdict, error) = match self.submit(proposed) {
            Ok(v) => (Some(v), None),
            Err(e) => (None, Some(e.to_string())),
        };
        MoveReport { ply, mover, legal: verdict.is_some(), verdict, error, state: self.board.to_wire_string() }
    }

    /// The board a client would send for coordinate move `mv` ("e2e4",
    /// "a7a8q"): only the moving piece changes, as with castling and en
    /// passant submissions.
    pub fn proposal(&self, mv: &str) -> Result<Board, BoardError> {
        let mv = mv.trim();
        let bad = || BoardError::InvalidSquare(mv.to_string());
        let record: MoveRecord = mv.get(0..4).ok_or_else(bad)?.parse()?;
        let mut next = self.board.relocated(record.origin, record.destination);
        if let Some(suffix) = mv.get(4..).filter(|s| !s.is_empty()) {
            let kind = match suffix.as_bytes() {
                [letter] => PieceKind::from_letter(*letter).ok_or_else(bad)?,
                _ => return Err(bad()),
            };
            next.set(record.destination, Some(Piece::new(kind, self.to_move)));
        }
        Ok(next)
    }

    /// Shorthand for `submit(&proposal(mv))`.
    pub fn play(&mut self, mv: &str) -> Result<MoveVerdict, SessionError> {
        let proposed = self.proposal(mv).map_err(MoveError::from)?;
        self.submit(&proposed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_alternate_and_rejections_keep_state() {
        let mut s = Session::new();
        s.play("e2e4").unwrap();
        assert_eq!(s.to_move(), Color::Black);
        let before = s.board().clone();
        assert!(s.play("e4e5").is_err());
        assert_eq!(s.board(), &before);
        assert_eq!(s.log().len(), 1);
        s.play("e7e5").unwrap();
        assert_eq!(s.to_move(), Color::White);
    }

    #[test]
    fn report_carries_error_text() {
        let mut s = Session::new();
        let bad = s.proposal("e2e5").unwrap();
        let r = s.submit_report(&bad);
        assert!(!r.legal);
        assert_eq!(r.ply, 1);
        assert!(r.error.unwrap().contains("pawn"));
        assert_eq!(r.state, Board::initial().to_wire_string());
    }

    #[test]
    fn proposal_parses_promotion_suffix() {
        let b = Board::from_placement("4k3/P7/8/8/8/8/8/4K3").unwrap();
        let s = Session::from_position(b, Color::White, MoveLog::new());
        let p = s.proposal("a7a8n").unwrap();
        assert_eq!(p.get("a8".parse().unwrap()), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert!(s.proposal("a7a8x").is_err());
        assert!(s.proposal("a7").is_err());
    }
}
