use crate::game::pieces::{EG_PIECE_VALUES, PIECE_VALUES};
use crate::utils::score::pack_scores;

// raw positional deltas are scaled per piece before packing
const MULTIPLIERS: [i16; 7] = [0, 5, 3, 6, 3, 3, 6];

// All tables are written from White's perspective with the promotion
// rank as the first row; Black reads them vertically mirrored.
#[rustfmt::skip]
const PAWN_MID: [i16; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    10, 10, 10, 10, 10, 10, 10, 10,
     4,  4,  6,  8,  8,  6,  4,  4,
     2,  2,  3,  6,  6,  3,  2,  2,
     0,  0,  0,  5,  5,  0,  0,  0,
     1, -1, -2,  0,  0, -2, -1,  1,
     1,  2,  2, -5, -5,  2,  2,  1,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const PAWN_EG: [i16; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    18, 18, 18, 18, 18, 18, 18, 18,
    12, 12, 12, 12, 12, 12, 12, 12,
     8,  8,  8,  8,  8,  8,  8,  8,
     5,  5,  5,  5,  5,  5,  5,  5,
     3,  3,  3,  3,  3,  3,  3,  3,
     1,  1,  1,  1,  1,  1,  1,  1,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_MID: [i16; 64] = [
    -10, -8, -6, -6, -6, -6, -8,-10,
     -8, -4,  0,  0,  0,  0, -4, -8,
     -6,  0,  3,  4,  4,  3,  0, -6,
     -6,  1,  4,  5,  5,  4,  1, -6,
     -6,  0,  4,  5,  5,  4,  0, -6,
     -6,  1,  3,  4,  4,  3,  1, -6,
     -8, -4,  0,  1,  1,  0, -4, -8,
    -10, -8, -6, -6, -6, -6, -8,-10,
];

#[rustfmt::skip]
const KNIGHT_EG: [i16; 64] = [
    -8, -6, -4, -4, -4, -4, -6, -8,
    -6, -2,  0,  0,  0,  0, -2, -6,
    -4,  0,  2,  3,  3,  2,  0, -4,
    -4,  0,  3,  4,  4,  3,  0, -4,
    -4,  0,  3,  4,  4,  3,  0, -4,
    -4,  0,  2,  3,  3,  2,  0, -4,
    -6, -2,  0,  0,  0,  0, -2, -6,
    -8, -6, -4, -4, -4, -4, -6, -8,
];

#[rustfmt::skip]
const BISHOP_MID: [i16; 64] = [
    -3, -1, -1, -1, -1, -1, -1, -3,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  1,  2,  2,  1,  0, -1,
    -1,  1,  1,  2,  2,  1,  1, -1,
    -1,  0,  2,  2,  2,  2,  0, -1,
    -1,  2,  2,  2,  2,  2,  2, -1,
    -1,  2,  0,  0,  0,  0,  2, -1,
    -3, -1, -2, -1, -1, -2, -1, -3,
];

#[rustfmt::skip]
const BISHOP_EG: [i16; 64] = [
    -2, -1, -1, -1, -1, -1, -1, -2,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  1,  2,  2,  1,  0, -1,
    -1,  0,  1,  2,  2,  1,  0, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -2, -1, -1, -1, -1, -1, -1, -2,
];

#[rustfmt::skip]
const ROOK_MID: [i16; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     2,  3,  3,  3,  3,  3,  3,  2,
    -2,  0,  0,  0,  0,  0,  0, -2,
    -2,  0,  0,  0,  0,  0,  0, -2,
    -2,  0,  0,  0,  0,  0,  0, -2,
    -2,  0,  0,  0,  0,  0,  0, -2,
    -2,  0,  0,  0,  0,  0,  0, -2,
     0,  0,  1,  2,  2,  1,  0,  0,
];

#[rustfmt::skip]
const ROOK_EG: [i16; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     1,  1,  1,  1,  1,  1,  1,  1,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_MID: [i16; 64] = [
    -3, -2, -2, -1, -1, -2, -2, -3,
    -2,  0,  0,  0,  0,  0,  0, -2,
    -2,  0,  1,  1,  1,  1,  0, -2,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -2,  1,  1,  1,  1,  1,  0, -2,
    -2,  0,  1,  0,  0,  0,  0, -2,
    -3, -2, -2, -1, -1, -2, -2, -3,
];

#[rustfmt::skip]
const QUEEN_EG: [i16; 64] = [
    -2, -1, -1,  0,  0, -1, -1, -2,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
     0,  0,  1,  2,  2,  1,  0,  0,
     0,  0,  1,  2,  2,  1,  0,  0,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -2, -1, -1,  0,  0, -1, -1, -2,
];

#[rustfmt::skip]
const KING_MID: [i16; 64] = [
    -5, -7, -7, -8, -8, -7, -7, -5,
    -5, -7, -7, -8, -8, -7, -7, -5,
    -5, -7, -7, -8, -8, -7, -7, -5,
    -5, -7, -7, -8, -8, -7, -7, -5,
    -3, -5, -5, -7, -7, -5, -5, -3,
    -2, -3, -4, -4, -4, -4, -3, -2,
     3,  3,  0,  0,  0,  0,  3,  3,
     3,  5,  2,  0,  0,  2,  5,  3,
];

#[rustfmt::skip]
const KING_EG: [i16; 64] = [
    -8, -6, -5, -3, -3, -5, -6, -8,
    -5, -3, -1,  0,  0, -1, -3, -5,
    -5, -2,  2,  3,  3,  2, -2, -5,
    -5, -2,  3,  4,  4,  3, -2, -5,
    -5, -2,  3,  4,  4,  3, -2, -5,
    -5, -2,  2,  3,  3,  2, -2, -5,
    -5, -4,  0,  0,  0,  0, -4, -5,
    -8, -5, -5, -5, -5, -5, -5, -8,
];

const MID_TABLES: [[i16; 64]; 6] = [
    PAWN_MID, KNIGHT_MID, BISHOP_MID, ROOK_MID, QUEEN_MID, KING_MID,
];
const EG_TABLES: [[i16; 64]; 6] = [
    PAWN_EG, KNIGHT_EG, BISHOP_EG, ROOK_EG, QUEEN_EG, KING_EG,
];

const fn calculate_white_pst() -> [u32; 7 * 64] {
    let mut table = [0u32; 7 * 64];

    let mut piece = 1;
    while piece <= 6 {
        let mut pos = 0;
        while pos < 64 {
            let mid = PIECE_VALUES[piece] + MID_TABLES[piece - 1][pos] * MULTIPLIERS[piece];
            let eg = EG_PIECE_VALUES[piece] + EG_TABLES[piece - 1][pos] * MULTIPLIERS[piece];
            table[piece * 64 + pos] = pack_scores(mid, eg);
            pos += 1;
        }
        piece += 1;
    }

    table
}

const fn calculate_black_pst() -> [u32; 7 * 64] {
    let mut table = [0u32; 7 * 64];

    let mut piece = 1;
    while piece <= 6 {
        let mut pos = 0;
        while pos < 64 {
            // vertical mirror: rank r becomes rank 7 - r
            let mirrored = pos ^ 56;
            let mid = PIECE_VALUES[piece] + MID_TABLES[piece - 1][mirrored] * MULTIPLIERS[piece];
            let eg = EG_PIECE_VALUES[piece] + EG_TABLES[piece - 1][mirrored] * MULTIPLIERS[piece];
            table[piece * 64 + pos] = pack_scores(-mid, -eg);
            pos += 1;
        }
        piece += 1;
    }

    table
}

pub static WHITE_PST: [u32; 7 * 64] = calculate_white_pst();
pub static BLACK_PST: [u32; 7 * 64] = calculate_black_pst();

/// Packed (mid, eg) material + positional score of a signed piece on a
/// square; Black entries are already negated.
pub fn pst_entry(piece: i8, pos: i32) -> u32 {
    if piece > 0 {
        WHITE_PST[piece as usize * 64 + pos as usize]
    } else {
        BLACK_PST[(-piece) as usize * 64 + pos as usize]
    }
}
