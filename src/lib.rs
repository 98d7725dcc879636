// Rules engine for snapshot-based remote chess
pub mod board;
pub mod error;
pub mod rules;
pub mod session;

pub use board::{Board, CastleSide, Color, Piece, PieceKind, Position};
pub use error::{BoardError, IllegalReason, MoveError, SessionError};
pub use rules::{resolve, MoveHistory, MoveLog, MoveRecord, MoveVerdict};
