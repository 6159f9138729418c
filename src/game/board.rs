use thiserror::Error;

use crate::game::history::{PositionHistory, MAX_GAME_HALFMOVES};
use crate::game::moves::{Move, MoveExt};
use crate::game::pieces::{
    piece_to_char, Color, ColorExt, Piece, BISHOP, BLACK, BLACK_KING_SIDE_ROOK_START,
    BLACK_QUEEN_SIDE_ROOK_START, EMPTY, KING, KNIGHT, PAWN, ROOK, WHITE,
    WHITE_KING_SIDE_ROOK_START, WHITE_QUEEN_SIDE_ROOK_START,
};
use crate::game::pst::pst_entry;
use crate::game::state::{
    castling_index, en_passant_bits, BLACK_CASTLING_RIGHTS, BLACK_EN_PASSANT_SHIFT,
    BLACK_HAS_CASTLED, BLACK_KING_SIDE_CASTLING, BLACK_QUEEN_SIDE_CASTLING, EN_PASSANT_MASK,
    WHITE_CASTLING_RIGHTS, WHITE_EN_PASSANT_SHIFT, WHITE_HAS_CASTLED, WHITE_KING_SIDE_CASTLING,
    WHITE_QUEEN_SIDE_CASTLING,
};
use crate::utils::bitboard::{
    Bitboard, DARK_COLORED_FIELD_PATTERN, LIGHT_COLORED_FIELD_PATTERN,
};
use crate::utils::score::{pack_scores, unpack_eg, unpack_mid};
use crate::utils::zobrist::ZOBRIST;

/// Returned by `perform_move` instead of a captured piece id when the
/// capture was en passant; the sign bit, so it cannot collide with one.
pub const EN_PASSANT_BIT: i32 = (1u32 << 31) as i32;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum BoardError {
    #[error("expected a vector with at least 67 elements, but got {0}")]
    NotEnoughItems(usize),

    #[error("cannot set up a position with a missing {0} king")]
    MissingKing(&'static str),
}

#[derive(Copy, Clone, Debug, Default)]
struct StateEntry {
    hash: u64,
    state: u32,
    scores: u32,
    halfmove_clock: u16,
}

/// The position aggregate: a mailbox and its bitboard decomposition,
/// kept consistent incrementally together with the position hash and
/// the packed material + positional scores.
///
/// Moves are applied and taken back without legality checking; the
/// caller owns move generation and only feeds moves that keep both
/// kings on the board.
#[derive(Debug)]
pub struct Board {
    items: [i8; 64],
    bitboards: [Bitboard; 13],
    color_bitboards: [Bitboard; 3],

    white_king: i32,
    black_king: i32,

    pub(crate) score_mid: i16,
    pub(crate) score_eg: i16,

    hash: u64,
    halfmove_count: u16,
    halfmove_clock: u16,
    state: u32,
    endgame: bool,

    history: Vec<StateEntry>,
    position_history: PositionHistory,
}

impl Board {
    /// Builds a board from the 67-entry layout
    /// `[64 squares, halfmove clock, halfmove count, state]`.
    pub fn new(items: &[i32]) -> Result<Board, BoardError> {
        if items.len() < 67 {
            return Err(BoardError::NotEnoughItems(items.len()));
        }

        let mut board = Board {
            items: [EMPTY; 64],
            bitboards: [0; 13],
            color_bitboards: [0, !0, 0],
            white_king: -1,
            black_king: -1,
            score_mid: 0,
            score_eg: 0,
            hash: 0,
            halfmove_count: 0,
            halfmove_clock: 0,
            state: 0,
            endgame: false,
            history: Vec::with_capacity(MAX_GAME_HALFMOVES),
            position_history: PositionHistory::new(),
        };

        for pos in 0..64 {
            let piece = items[pos] as i8;
            if piece == EMPTY {
                continue;
            }

            debug_assert!(Piece::from_repr(piece.abs()).is_some());

            let color = if piece > 0 { WHITE } else { BLACK };
            board.add_piece(color, piece.abs(), pos as i32);

            if piece == KING {
                board.white_king = pos as i32;
            } else if piece == -KING {
                board.black_king = pos as i32;
            }
        }

        if board.white_king < 0 {
            return Err(BoardError::MissingKing("White"));
        }
        if board.black_king < 0 {
            return Err(BoardError::MissingKing("Black"));
        }

        board.halfmove_clock = items[64] as u16;
        board.halfmove_count = items[65] as u16;
        board.state = items[66] as u32;

        board.recalculate_hash();
        board.update_endgame_status();
        board.position_history.push(board.hash);

        Ok(board)
    }

    /// Rebuilds the hash from the mailbox and state word; needed after
    /// bulk mutation through the setters below.
    pub fn recalculate_hash(&mut self) {
        self.hash = 0;

        for pos in 0..64 {
            let piece = self.items[pos];
            if piece != EMPTY {
                self.hash ^= ZOBRIST.piece_key(piece, pos as i32);
            }
        }

        if !self.get_active_player().is_white() {
            self.hash ^= ZOBRIST.player;
        }

        self.hash ^= ZOBRIST.castling[castling_index(self.state)];

        let en_passant = en_passant_bits(self.state);
        if en_passant != 0 {
            self.hash ^= ZOBRIST.en_passant[en_passant.trailing_zeros() as usize];
        }
    }

    pub fn get_item(&self, pos: i32) -> i8 {
        self.items[pos as usize]
    }

    pub fn get_hash(&self) -> u64 {
        self.hash
    }

    pub fn get_state(&self) -> u32 {
        self.state
    }

    pub fn get_active_player(&self) -> Color {
        if self.halfmove_count & 1 == 0 {
            WHITE
        } else {
            BLACK
        }
    }

    pub fn get_halfmove_count(&self) -> u16 {
        self.halfmove_count
    }

    pub fn get_halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn get_full_move_count(&self) -> u16 {
        self.halfmove_count / 2 + 1
    }

    pub fn find_king_position(&self, color: Color) -> i32 {
        if color.is_white() {
            self.white_king
        } else {
            self.black_king
        }
    }

    pub fn get_bitboard(&self, piece: i8) -> Bitboard {
        self.bitboards[(piece + 6) as usize]
    }

    pub fn get_all_piece_bitboard(&self, color: Color) -> Bitboard {
        self.color_bitboards[color.idx()]
    }

    pub fn get_occupancy_bitboard(&self) -> Bitboard {
        self.color_bitboards[BLACK.idx()] | self.color_bitboards[WHITE.idx()]
    }

    pub fn get_empty_bitboard(&self) -> Bitboard {
        self.color_bitboards[1]
    }

    pub fn set_state(&mut self, state: u32) {
        self.state = state;
    }

    pub fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    pub fn initialize_halfmove_count(&mut self, count: u16) {
        self.halfmove_count = count;
    }

    pub fn set_history(&mut self, history: PositionHistory) {
        self.position_history = history;
    }

    pub fn is_endgame(&self) -> bool {
        self.endgame
    }

    /// The cached endgame flag is only refreshed on demand; the search
    /// driver decides when a refresh is worth it.
    pub fn update_endgame_status(&mut self) {
        let pawns = (self.get_bitboard(PAWN) | self.get_bitboard(-PAWN)).count_ones();
        let pieces = self.get_occupancy_bitboard().count_ones() - pawns - 2;

        self.endgame = pawns <= 3 || pieces <= 3;
    }

    fn increase_halfmove_count(&mut self) {
        self.halfmove_count += 1;
        self.halfmove_clock += 1;

        self.hash ^= ZOBRIST.player;
    }

    fn reset_halfmove_clock(&mut self) {
        self.halfmove_clock = 0;
    }

    fn store_state(&mut self) {
        debug_assert!(self.history.len() < MAX_GAME_HALFMOVES);

        self.history.push(StateEntry {
            hash: self.hash,
            state: self.state,
            scores: pack_scores(self.score_mid, self.score_eg),
            halfmove_clock: self.halfmove_clock,
        });
    }

    fn restore_state(&mut self) {
        let entry = self.history.pop().unwrap();

        self.hash = entry.hash;
        self.state = entry.state;
        self.score_mid = unpack_mid(entry.scores);
        self.score_eg = unpack_eg(entry.scores);
        self.halfmove_clock = entry.halfmove_clock;
    }

    fn clear_castling_rights(&mut self, rights: u32) {
        let previous = self.state;
        self.state &= !rights;

        self.hash ^=
            ZOBRIST.castling[castling_index(previous)] ^ ZOBRIST.castling[castling_index(self.state)];
    }

    fn set_has_castled(&mut self, color: Color) {
        // the castled flags sit outside the hashed rights nibble
        self.state |= if color.is_white() {
            WHITE_HAS_CASTLED
        } else {
            BLACK_HAS_CASTLED
        };
    }

    fn clear_en_passant(&mut self) {
        let en_passant = en_passant_bits(self.state);
        if en_passant != 0 {
            self.hash ^= ZOBRIST.en_passant[en_passant.trailing_zeros() as usize];
            self.state &= !EN_PASSANT_MASK;
        }
    }

    fn set_en_passant(&mut self, state_bit: u32) {
        debug_assert!(en_passant_bits(self.state) == 0);

        self.state |= 1 << state_bit;
        self.hash ^= ZOBRIST.en_passant[(state_bit - WHITE_EN_PASSANT_SHIFT) as usize];
    }

    fn set_king_position(&mut self, color: Color, pos: i32) {
        if color.is_white() {
            self.white_king = pos;
        } else {
            self.black_king = pos;
        }
    }

    /// Places a piece with incremental hash and score updates.
    pub fn add_piece(&mut self, color: Color, piece_id: i8, pos: i32) {
        let piece = color.piece(piece_id);

        self.hash ^= ZOBRIST.piece_key(piece, pos);

        let entry = pst_entry(piece, pos);
        self.score_mid += unpack_mid(entry);
        self.score_eg += unpack_eg(entry);

        self.add_piece_without_inc_update(piece, pos);
    }

    fn add_piece_without_inc_update(&mut self, piece: i8, pos: i32) {
        debug_assert!(self.items[pos as usize] == EMPTY);

        self.items[pos as usize] = piece;

        let mask = 1u64 << pos;
        let color = if piece > 0 { WHITE } else { BLACK };
        self.bitboards[(piece + 6) as usize] |= mask;
        self.color_bitboards[color.idx()] |= mask;
        self.color_bitboards[1] = !(self.color_bitboards[0] | self.color_bitboards[2]);
    }

    /// Removes and returns the piece on a square with incremental hash
    /// and score updates. A rook leaving (or being captured on) one of
    /// the four corner start squares drops that castling right.
    ///
    /// Removing a king does not touch the cached king square; the move
    /// path updates it explicitly after the piece lands.
    pub fn remove_piece(&mut self, pos: i32) -> i8 {
        let piece = self.items[pos as usize];

        self.hash ^= ZOBRIST.piece_key(piece, pos);

        let entry = pst_entry(piece, pos);
        self.score_mid -= unpack_mid(entry);
        self.score_eg -= unpack_eg(entry);

        if piece == ROOK {
            if pos == WHITE_KING_SIDE_ROOK_START {
                self.clear_castling_rights(WHITE_KING_SIDE_CASTLING);
            } else if pos == WHITE_QUEEN_SIDE_ROOK_START {
                self.clear_castling_rights(WHITE_QUEEN_SIDE_CASTLING);
            }
        } else if piece == -ROOK {
            if pos == BLACK_KING_SIDE_ROOK_START {
                self.clear_castling_rights(BLACK_KING_SIDE_CASTLING);
            } else if pos == BLACK_QUEEN_SIDE_ROOK_START {
                self.clear_castling_rights(BLACK_QUEEN_SIDE_CASTLING);
            }
        }

        self.remove_piece_without_inc_update(pos)
    }

    fn remove_piece_without_inc_update(&mut self, pos: i32) -> i8 {
        let piece = self.items[pos as usize];

        debug_assert!(piece != EMPTY);

        self.items[pos as usize] = EMPTY;

        let mask = 1u64 << pos;
        let color = if piece > 0 { WHITE } else { BLACK };
        self.bitboards[(piece + 6) as usize] &= !mask;
        self.color_bitboards[color.idx()] &= !mask;
        self.color_bitboards[1] = !(self.color_bitboards[0] | self.color_bitboards[2]);

        piece
    }

    /// Applies a move and returns what the matching `undo_move` needs:
    /// `EMPTY` for quiet moves, the captured piece id for captures, or
    /// `EN_PASSANT_BIT` for en-passant captures.
    ///
    /// `piece_id` already reflects a promotion choice; the moving color
    /// comes from the sign of the piece on `start`.
    pub fn perform_move(&mut self, piece_id: i8, start: i32, end: i32) -> i32 {
        let removed_piece = self.apply_move(piece_id, start, end);
        self.position_history.push(self.hash);

        removed_piece
    }

    pub fn perform_encoded_move(&mut self, encoded: Move) -> i32 {
        self.perform_move(encoded.piece_id(), encoded.start(), encoded.end())
    }

    fn apply_move(&mut self, piece_id: i8, start: i32, end: i32) -> i32 {
        self.store_state();
        self.increase_halfmove_count();

        let own_piece = self.items[start as usize];
        debug_assert!(own_piece != EMPTY);
        let color = if own_piece > 0 { WHITE } else { BLACK };

        self.remove_piece(start);
        self.clear_en_passant();

        let target_piece = self.items[end as usize];
        if target_piece != EMPTY {
            // ordinary capture; remove_piece also handles the rights of
            // a rook captured on its corner square
            self.remove_piece(end);
            self.add_piece(color, piece_id, end);
            self.reset_halfmove_clock();

            if piece_id == KING {
                self.set_king_position(color, end);
                self.clear_castling_rights(if color.is_white() {
                    WHITE_CASTLING_RIGHTS
                } else {
                    BLACK_CASTLING_RIGHTS
                });
            }

            return target_piece.abs() as i32;
        }

        self.add_piece(color, piece_id, end);

        if own_piece.abs() == PAWN {
            self.reset_halfmove_clock();

            match start - end {
                16 => {
                    // a White double push can be captured by Black
                    self.set_en_passant(BLACK_EN_PASSANT_SHIFT + (start & 7) as u32);
                }
                -16 => {
                    self.set_en_passant(WHITE_EN_PASSANT_SHIFT + (start & 7) as u32);
                }
                7 => {
                    self.remove_piece(start + 1);
                    return EN_PASSANT_BIT;
                }
                9 => {
                    self.remove_piece(start - 1);
                    return EN_PASSANT_BIT;
                }
                -7 => {
                    self.remove_piece(start - 1);
                    return EN_PASSANT_BIT;
                }
                -9 => {
                    self.remove_piece(start + 1);
                    return EN_PASSANT_BIT;
                }
                _ => {}
            }
        } else if piece_id == KING {
            self.set_king_position(color, end);
            self.clear_castling_rights(if color.is_white() {
                WHITE_CASTLING_RIGHTS
            } else {
                BLACK_CASTLING_RIGHTS
            });

            if start - end == -2 {
                // king side: the rook hops from the corner to the other
                // side of the king
                self.remove_piece(end + 1);
                self.add_piece(color, ROOK, end - 1);
                self.set_has_castled(color);
            } else if start - end == 2 {
                self.remove_piece(end - 2);
                self.add_piece(color, ROOK, end + 1);
                self.set_has_castled(color);
            }
        }

        EMPTY as i32
    }

    /// Passes the turn without moving: the opponent gets to move twice
    /// in a row. Restored by `undo_null_move`.
    pub fn perform_null_move(&mut self) {
        self.store_state();
        self.increase_halfmove_count();
        self.clear_en_passant();
    }

    pub fn undo_null_move(&mut self) {
        self.halfmove_count -= 1;
        self.restore_state();
    }

    /// Takes back a move. `piece` is the signed piece that stood on
    /// `start` before the move (a pawn for promotions) and
    /// `removed_piece` is what the matching `perform_move` returned.
    ///
    /// Hash, state and scores come back wholesale from the stored
    /// frame, so all piece movement here skips incremental updates.
    pub fn undo_move(&mut self, piece: i8, start: i32, end: i32, removed_piece: i32) {
        self.position_history.pop();
        self.halfmove_count -= 1;
        self.restore_state();

        let color = if piece > 0 { WHITE } else { BLACK };

        self.remove_piece_without_inc_update(end);
        self.add_piece_without_inc_update(piece, start);

        if removed_piece == EN_PASSANT_BIT {
            let captured_pos = match start - end {
                7 | -9 => start + 1,
                _ => start - 1,
            };
            self.add_piece_without_inc_update(color.flip().piece(PAWN), captured_pos);
        } else if removed_piece != EMPTY as i32 {
            self.add_piece_without_inc_update(color.flip().piece(removed_piece as i8), end);
        }

        if piece.abs() == KING {
            self.set_king_position(color, start);

            if start - end == -2 {
                self.remove_piece_without_inc_update(end - 1);
                self.add_piece_without_inc_update(color.piece(ROOK), end + 1);
            } else if start - end == 2 {
                self.remove_piece_without_inc_update(end + 1);
                self.add_piece_without_inc_update(color.piece(ROOK), end - 2);
            }
        }
    }

    pub fn is_engine_draw(&self) -> bool {
        self.position_history.is_single_repetition()
            || self.is_fifty_move_draw()
            || self.is_insufficient_material_draw()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.position_history.is_threefold_repetition()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    pub fn is_insufficient_material_draw(&self) -> bool {
        match self.get_occupancy_bitboard().count_ones() {
            2 => true, // K vs K

            // K vs K + a single minor piece
            3 => {
                let minor_pieces = self.get_bitboard(KNIGHT)
                    | self.get_bitboard(-KNIGHT)
                    | self.get_bitboard(BISHOP)
                    | self.get_bitboard(-BISHOP);

                minor_pieces.count_ones() == 1
            }

            // K+B vs K+B with both bishops on same-colored fields
            4 => {
                let white_bishops = self.get_bitboard(BISHOP);
                let black_bishops = self.get_bitboard(-BISHOP);

                white_bishops.count_ones() == 1
                    && black_bishops.count_ones() == 1
                    && (((white_bishops & LIGHT_COLORED_FIELD_PATTERN) != 0
                        && (black_bishops & LIGHT_COLORED_FIELD_PATTERN) != 0)
                        || ((white_bishops & DARK_COLORED_FIELD_PATTERN) != 0
                            && (black_bishops & DARK_COLORED_FIELD_PATTERN) != 0))
            }

            _ => false,
        }
    }

    /// A pawn that just landed within two ranks of its promotion
    /// square; the search uses this to avoid pruning such moves away.
    pub fn is_pawn_move_close_to_promotion(&self, piece: i8, end: i32) -> bool {
        (piece == PAWN && end < 24) || (piece == -PAWN && end > 39)
    }

    pub fn print(&self, title: Option<&str>) {
        if let Some(title_text) = title {
            log::debug!("{}", title_text);
        }

        for rank in 0..8 {
            let mut line = String::new();
            for file in 0..8 {
                line.push(piece_to_char(self.items[file + rank * 8]));
                line.push(' ');
            }
            log::debug!("{}", line);
        }

        log::debug!(
            "hash: {:016x}, state: {:08x}, clock: {}, move: {}",
            self.hash,
            self.state,
            self.halfmove_clock,
            self.get_full_move_count()
        );
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Board;
    use crate::game::pieces::{BISHOP, KING, KNIGHT, PAWN, QUEEN, ROOK};
    use crate::game::state::ALL_CASTLING_RIGHTS;

    pub fn board_from_items(items: &[i8; 64], clock: u16, count: u16, state: u32) -> Board {
        let mut vector: Vec<i32> = items.iter().map(|&piece| piece as i32).collect();
        vector.push(clock as i32);
        vector.push(count as i32);
        vector.push(state as i32);

        Board::new(&vector).unwrap()
    }

    pub fn starting_position() -> Board {
        const P: i8 = PAWN;
        const R: i8 = ROOK;
        const N: i8 = KNIGHT;
        const B: i8 = BISHOP;
        const Q: i8 = QUEEN;
        const K: i8 = KING;

        #[rustfmt::skip]
        let items: [i8; 64] = [
            -R, -N, -B, -Q, -K, -B, -N, -R,
            -P, -P, -P, -P, -P, -P, -P, -P,
             0,  0,  0,  0,  0,  0,  0,  0,
             0,  0,  0,  0,  0,  0,  0,  0,
             0,  0,  0,  0,  0,  0,  0,  0,
             0,  0,  0,  0,  0,  0,  0,  0,
             P,  P,  P,  P,  P,  P,  P,  P,
             R,  N,  B,  Q,  K,  B,  N,  R,
        ];

        board_from_items(&items, 0, 0, ALL_CASTLING_RIGHTS)
    }
}
