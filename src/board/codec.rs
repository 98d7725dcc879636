//! Wire and storage format: 64 bytes, row-major, one ASCII letter per piece
//! (uppercase White, lowercase Black) and `X` for an empty square.

use serde::{Deserialize, Serialize};

use super::{Board, Piece, Position};
use crate::error::BoardError;

pub const BOARD_BYTES: usize = 64;
pub const EMPTY_BYTE: u8 = b'X';

pub fn serialize(board: &Board) -> [u8; BOARD_BYTES] {
    let mut out = [EMPTY_BYTE; BOARD_BYTES];
    for (i, pos) in Position::all().enumerate() {
        if let Some(piece) = board.get(pos) { out[i] = piece.to_byte(); }
    }
    out
}

pub fn deserialize(bytes: &[u8]) -> Result<Board, BoardError> {
    if bytes.len() != BOARD_BYTES { return Err(BoardError::WrongLength(bytes.len())); }
    let mut board = Board::empty();
    for (index, (pos, &byte)) in Position::all().zip(bytes).enumerate() {
        if byte == EMPTY_BYTE { continue; }
        let piece = Piece::from_byte(byte).ok_or(BoardError::UnknownByte { index, byte })?;
        board.set(pos, Some(piece));
    }
    Ok(board)
}

impl Board {
    pub fn to_bytes(&self) -> [u8; BOARD_BYTES] { serialize(self) }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BoardError> { deserialize(bytes) }

    /// The 64 wire bytes as a string (always ASCII).
    pub fn to_wire_string(&self) -> String {
        self.to_bytes().iter().map(|&b| b as char).collect()
    }
}

/// JSON shape of a board: an 8×8 grid of byte codes, or the 64-character
/// wire string.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoardRepr {
    Grid([[u8; 8]; 8]),
    Wire(String),
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        let bytes = serialize(&board);
        let mut grid = [[EMPTY_BYTE; 8]; 8];
        for (i, b) in bytes.into_iter().enumerate() { grid[i / 8][i % 8] = b; }
        BoardRepr::Grid(grid)
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;
    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        match repr {
            BoardRepr::Grid(grid) => deserialize(&grid.concat()),
            BoardRepr::Wire(s) => deserialize(s.as_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, PieceKind};

    #[test]
    fn start_position_bytes() {
        let bytes = serialize(&Board::initial());
        assert_eq!(&bytes[0..8], b"rnbqkbnr");
        assert_eq!(&bytes[8..16], b"pppppppp");
        assert_eq!(&bytes[16..48], [EMPTY_BYTE; 32].as_slice());
        assert_eq!(&bytes[56..64], b"RNBQKBNR");
    }

    #[test]
    fn wrong_length_is_malformed() {
        assert_eq!(deserialize(&[EMPTY_BYTE; 63]), Err(BoardError::WrongLength(63)));
        assert_eq!(deserialize(&[EMPTY_BYTE; 65]), Err(BoardError::WrongLength(65)));
        assert_eq!(deserialize(&[]), Err(BoardError::WrongLength(0)));
    }

    #[test]
    fn unknown_byte_is_malformed() {
        let mut bytes = [EMPTY_BYTE; 64];
        bytes[10] = b'z';
        assert_eq!(deserialize(&bytes), Err(BoardError::UnknownByte { index: 10, byte: b'z' }));
    }

    #[test]
    fn decodes_single_piece() {
        let mut bytes = [EMPTY_BYTE; 64];
        bytes[63] = b'k';
        let b = deserialize(&bytes).unwrap();
        assert_eq!(b.get("h1".parse().unwrap()), Some(Piece::new(PieceKind::King, Color::Black)));
    }

    #[test]
    fn json_grid_and_wire_string_forms() {
        let b = Board::initial();
        let json = serde_json::to_string(&b).unwrap();
        assert!(json.starts_with("[[114,110,98,113,107,98,110,114]"), "{json}");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
        let wire = format!("\"{}\"", b.to_wire_string());
        let from_wire: Board = serde_json::from_str(&wire).unwrap();
        assert_eq!(from_wire, b);
        assert!(serde_json::from_str::<Board>("\"XXXX\"").is_err());
    }
}
