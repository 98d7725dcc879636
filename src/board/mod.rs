//! Board model: an 8×8 grid of optional pieces.
//!
//! Row 0 is rank 8 (Black's back rank in the starting position), row 7 is
//! rank 1. Column 0 is file a.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

pub mod codec;

pub use codec::{deserialize, serialize, BOARD_BYTES, EMPTY_BYTE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step of a pawn advance.
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start.
    pub const fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row a pawn of this colour must stand on to capture en passant.
    pub const fn en_passant_row(self) -> u8 {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }

    pub const fn promotion_row(self) -> u8 {
        self.opposite().back_row()
    }
}

impl FromStr for Color {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Color::White),
            "b" | "black" => Ok(Color::Black),
            _ => Err(format!("invalid color '{s}': use 'white' or 'black'")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Uppercase algebraic letter.
    pub const fn letter(self) -> u8 {
        match self {
            PieceKind::Pawn => b'P',
            PieceKind::Knight => b'N',
            PieceKind::Bishop => b'B',
            PieceKind::Rook => b'R',
            PieceKind::Queen => b'Q',
            PieceKind::King => b'K',
        }
    }

    pub fn from_letter(letter: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.letter() == letter.to_ascii_uppercase())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self { Self { kind, color } }

    /// Wire byte: uppercase letter for White, lowercase for Black.
    pub const fn to_byte(self) -> u8 {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        let kind = PieceKind::from_letter(byte)?;
        let color = if byte.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self { kind, color })
    }
}

/// A square coordinate, both components in `0..8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 8 && col < 8).then_some(Self { row, col })
    }

    pub const fn row(self) -> u8 { self.row }
    pub const fn col(self) -> u8 { self.col }

    /// Step by a signed row/column delta, `None` if it leaves the board.
    pub fn offset(self, drow: i8, dcol: i8) -> Option<Self> {
        let row = self.row as i8 + drow;
        let col = self.col as i8 + dcol;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}

impl FromStr for Position {
    type Err = BoardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 { return Err(BoardError::InvalidSquare(s.to_string())); }
        let (file, rank) = (bytes[0].to_ascii_lowercase(), bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(BoardError::InvalidSquare(s.to_string()));
        }
        Ok(Position { row: 8 - (rank - b'0'), col: file - b'a' })
    }
}

impl TryFrom<String> for Position {
    type Error = BoardError;
    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<Position> for String {
    fn from(p: Position) -> Self { p.to_string() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Column the king lands on.
    pub const fn king_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    pub const fn rook_home_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Column the rook lands on.
    pub const fn rook_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }
}

pub const KING_HOME_COL: u8 = 4;

pub fn king_home(color: Color) -> Position {
    Position { row: color.back_row(), col: KING_HOME_COL }
}

pub fn rook_home(color: Color, side: CastleSide) -> Position {
    Position { row: color.back_row(), col: side.rook_home_col() }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "codec::BoardRepr", into = "codec::BoardRepr")]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self { Self::default() }

    /// Standard starting position.
    pub fn initial() -> Self {
        let mut b = Self::empty();
        for col in 0..8 {
            b.squares[0][col] = Some(Piece::new(BACK_RANK[col], Color::Black));
            b.squares[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            b.squares[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
            b.squares[7][col] = Some(Piece::new(BACK_RANK[col], Color::White));
        }
        b
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row as usize][pos.col as usize]
    }

    pub fn set(&mut self, pos: Position, square: Option<Piece>) {
        self.squares[pos.row as usize][pos.col as usize] = square;
    }

    pub fn is_empty(&self, pos: Position) -> bool { self.get(pos).is_none() }

    /// Copy of this board with the piece on `from` moved onto `to`.
    pub fn relocated(&self, from: Position, to: Position) -> Board {
        let mut next = self.clone();
        let piece = next.get(from);
        next.set(from, None);
        next.set(to, piece);
        next
    }

    /// Squares holding pieces of `color`, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |p| match self.get(p) {
            Some(piece) if piece.color == color => Some((p, piece)),
            _ => None,
        })
    }

    /// First king of `color` in row-major order.
    pub fn king_square(&self, color: Color) -> Option<Position> {
        self.pieces(color).find(|(_, piece)| piece.kind == PieceKind::King).map(|(p, _)| p)
    }

    /// Parse the piece-placement field of a FEN string ("rnbqkbnr/pppppppp/8/...").
    pub fn from_placement(placement: &str) -> Result<Self, BoardError> {
        let bad = || BoardError::InvalidPlacement(placement.to_string());
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 { return Err(bad()); }
        let mut b = Self::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for ch in rank.bytes() {
                if (b'1'..=b'8').contains(&ch) {
                    col += (ch - b'0') as usize;
                } else {
                    let piece = Piece::from_byte(ch).ok_or_else(bad)?;
                    if col >= 8 { return Err(bad()); }
                    b.squares[row][col] = Some(piece);
                    col += 1;
                }
                if col > 8 { return Err(bad()); }
            }
            if col != 8 { return Err(bad()); }
        }
        Ok(b)
    }

    pub fn placement(&self) -> String {
        let mut out = String::new();
        for (row, rank) in self.squares.iter().enumerate() {
            if row > 0 { out.push('/'); }
            let mut gap = 0u8;
            for square in rank {
                match square {
                    Some(piece) => {
                        if gap > 0 { out.push((b'0' + gap) as char); gap = 0; }
                        out.push(piece.to_byte() as char);
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 { out.push((b'0' + gap) as char); }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for square in rank {
                let ch = square.map(|p| p.to_byte() as char).unwrap_or('.');
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}
