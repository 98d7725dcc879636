use thiserror::Error;

use crate::board::{Color, PieceKind, Position};

/// Failures decoding a board from its wire or text forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must be exactly 64 bytes, got {0}")]
    WrongLength(usize),
    #[error("unrecognised square byte 0x{byte:02x} at index {index}")]
    UnknownByte { index: usize, byte: u8 },
    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),
    #[error("invalid square name: {0}")]
    InvalidSquare(String),
}

/// The specific per-piece rule a rejected move broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalReason {
    #[error("pawns only move toward the opponent")]
    PawnNotForward,
    #[error("pawns cannot capture straight ahead")]
    PawnForwardCapture,
    #[error("two-square pawn push must start on the home rank")]
    DoublePushOffHomeRank,
    #[error("diagonal pawn move without a capture is not a valid en passant")]
    NoEnPassant,
    #[error("pawn cannot move that far")]
    PawnTooFar,
    #[error("knights move in an L shape")]
    KnightShape,
    #[error("bishops move diagonally")]
    NotDiagonal,
    #[error("rooks move in straight lines")]
    NotStraight,
    #[error("queens move in straight lines or diagonally")]
    NotQueenLine,
    #[error("a piece stands between origin and destination")]
    PathBlocked,
    #[error("kings move one square")]
    KingTooFar,
    #[error("castling must start from the king's home square")]
    CastleOffHome,
    #[error("castling rights on that side have been lost")]
    CastlingRightsLost,
    #[error("no rook on its home square to castle with")]
    CastleWithoutRook,
    #[error("squares between king and rook are occupied")]
    CastlePathBlocked,
}

/// Why a proposed board was not accepted as the next position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("malformed board: {0}")]
    MalformedBoard(#[from] BoardError),
    #[error("expected exactly one origin and one destination square, {changed} squares changed")]
    AmbiguousMove { changed: usize },
    #[error("{moved:?} piece moved but it is {expected:?}'s turn")]
    WrongMoverColor { expected: Color, moved: Color },
    #[error("cannot capture own piece on {0}")]
    CannotCaptureOwnPiece(Position),
    #[error("illegal promotion from {from:?} to {to:?}")]
    IllegalPromotion { from: PieceKind, to: PieceKind },
    #[error("move leaves own king in check")]
    SelfCheck,
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalReason),
}

/// Rejections raised by the game session wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("game is over, {winner:?} delivered checkmate")]
    GameOver { winner: Color },
}
