use strum_macros::{EnumCount, EnumIter, FromRepr};

pub const EMPTY: i8 = 0;

pub const PAWN: i8 = 1;
pub const KNIGHT: i8 = 2;
pub const BISHOP: i8 = 3;
pub const ROOK: i8 = 4;
pub const QUEEN: i8 = 5;
pub const KING: i8 = 6;

// indexed by piece id; the king value only matters for exchange evaluation
pub const PIECE_VALUES: [i16; 7] = [0, 100, 320, 330, 500, 950, 1500];
pub const EG_PIECE_VALUES: [i16; 7] = [0, 130, 300, 320, 540, 980, 1500];

/// Typed rim around the signed piece encoding: the board itself works
/// on raw `i8` ids (the sign carries the color, `piece + 6` indexes the
/// bitboard and hash tables), the enum serves construction checks,
/// display and iteration in tests.
#[derive(Copy, Clone, Debug, Eq, PartialEq, EnumIter, EnumCount, FromRepr)]
#[repr(i8)]
pub enum Piece {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl Piece {
    pub fn id(self) -> i8 {
        self as i8
    }

    pub fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }
}

pub fn piece_to_char(piece: i8) -> char {
    match Piece::from_repr(piece.abs()) {
        Some(kind) if piece > 0 => kind.to_char().to_ascii_uppercase(),
        Some(kind) => kind.to_char(),
        None => '.',
    }
}

pub type Color = i8;

pub const WHITE: Color = 1;
pub const BLACK: Color = -1;

pub trait ColorExt {
    fn flip(self) -> Color;
    fn idx(self) -> usize;
    fn is_white(self) -> bool;
    fn piece(self, piece_id: i8) -> i8;
}

impl ColorExt for i8 {
    fn flip(self) -> Color {
        -self
    }

    // occupancy bitboards live at color + 1 (Black, empty, White)
    fn idx(self) -> usize {
        (self + 1) as usize
    }

    fn is_white(self) -> bool {
        self > 0
    }

    fn piece(self, piece_id: i8) -> i8 {
        piece_id * self
    }
}

// rank 0 is the top-left corner from White's perspective, so Black's
// corner rooks sit on the low indices and White's on the high ones
pub const BLACK_QUEEN_SIDE_ROOK_START: i32 = 0;
pub const BLACK_KING_SIDE_ROOK_START: i32 = 7;
pub const WHITE_QUEEN_SIDE_ROOK_START: i32 = 56;
pub const WHITE_KING_SIDE_ROOK_START: i32 = 63;

pub const BLACK_PAWN_LINE_START: i32 = 8;
pub const BLACK_PAWN_LINE_END: i32 = 15;
pub const WHITE_PAWN_LINE_START: i32 = 48;
pub const WHITE_PAWN_LINE_END: i32 = 55;

// target squares of en-passant captures per capturing side
pub const WHITE_EN_PASSANT_LINE_START: i32 = 16;
pub const WHITE_EN_PASSANT_LINE_END: i32 = 23;
pub const BLACK_EN_PASSANT_LINE_START: i32 = 40;
pub const BLACK_EN_PASSANT_LINE_END: i32 = 47;
