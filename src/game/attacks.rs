use crate::game::board::Board;
use crate::game::pieces::{
    Color, ColorExt, BISHOP, KING, KNIGHT, PAWN, PIECE_VALUES, QUEEN, ROOK,
};
use crate::utils::bitboard::{
    anti_diagonal_attacks, black_left_pawn_attacks, black_right_pawn_attacks, diagonal_attacks,
    horizontal_attacks, vertical_attacks, white_left_pawn_attacks, white_right_pawn_attacks,
    Bitboard, BitboardExt, KING_PATTERNS, KNIGHT_PATTERNS,
};

impl Board {
    /// Finds the square of the cheapest piece of `color` attacking
    /// `target`, restricted to the pieces still present in `occupied`,
    /// or -1. The sliding lookups run against the dynamic occupancy, so
    /// x-ray attackers become visible once the piece in front is gone.
    pub fn find_smallest_attacker(
        &self,
        occupied: Bitboard,
        color: Color,
        target: i32,
    ) -> i32 {
        let target_mask = 1u64 << target;

        // a pawn attacking the target stands where an opposite-colored
        // pawn on the target square would capture
        let pawns = self.get_bitboard(color.piece(PAWN)) & occupied;
        let pawn_attackers = if color.is_white() {
            pawns & (black_left_pawn_attacks(target_mask) | black_right_pawn_attacks(target_mask))
        } else {
            pawns & (white_left_pawn_attacks(target_mask) | white_right_pawn_attacks(target_mask))
        };
        if pawn_attackers != 0 {
            return pawn_attackers.next_index();
        }

        let knight_attackers =
            self.get_bitboard(color.piece(KNIGHT)) & occupied & KNIGHT_PATTERNS[target as usize];
        if knight_attackers != 0 {
            return knight_attackers.next_index();
        }

        let diagonal = diagonal_attacks(occupied, target) | anti_diagonal_attacks(occupied, target);
        let bishop_attackers = self.get_bitboard(color.piece(BISHOP)) & occupied & diagonal;
        if bishop_attackers != 0 {
            return bishop_attackers.next_index();
        }

        let orthogonal = horizontal_attacks(occupied, target) | vertical_attacks(occupied, target);
        let rook_attackers = self.get_bitboard(color.piece(ROOK)) & occupied & orthogonal;
        if rook_attackers != 0 {
            return rook_attackers.next_index();
        }

        let queen_attackers =
            self.get_bitboard(color.piece(QUEEN)) & occupied & (diagonal | orthogonal);
        if queen_attackers != 0 {
            return queen_attackers.next_index();
        }

        let king_attackers =
            self.get_bitboard(color.piece(KING)) & occupied & KING_PATTERNS[target as usize];
        if king_attackers != 0 {
            return king_attackers.next_index();
        }

        -1
    }

    /// Whether any piece of `color` attacks the square.
    pub fn is_attacked(&self, color: Color, pos: i32) -> bool {
        self.find_smallest_attacker(self.get_occupancy_bitboard(), color, pos) >= 0
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.is_attacked(color.flip(), self.find_king_position(color))
    }

    /// Static exchange evaluation of a capture on `target`: plays out
    /// the capture sequence with the cheapest attacker on each side and
    /// lets either side stand pat once continuing cannot pay off.
    ///
    /// `score` tracks the material balance of the exchange so far,
    /// `trophy` the piece currently sitting on the target square, which
    /// is what the side to move would win next.
    pub fn see_score(
        &self,
        opp_color: Color,
        start: i32,
        target: i32,
        own_piece_id: i8,
        captured_piece_id: i8,
    ) -> i32 {
        let own_color = opp_color.flip();

        let mut score = PIECE_VALUES[captured_piece_id as usize] as i32;
        let mut trophy = PIECE_VALUES[own_piece_id as usize] as i32;
        let mut occupied = self.get_occupancy_bitboard() & !(1u64 << start);

        loop {
            let attacker = self.find_smallest_attacker(occupied, opp_color, target);
            if attacker < 0 {
                return score;
            }

            score -= trophy;
            trophy = PIECE_VALUES[self.get_item(attacker).unsigned_abs() as usize] as i32;
            occupied &= !(1u64 << attacker);

            if score + trophy < 0 {
                return score;
            }

            let defender = self.find_smallest_attacker(occupied, own_color, target);
            if defender < 0 {
                return score;
            }

            score += trophy;
            trophy = PIECE_VALUES[self.get_item(defender).unsigned_abs() as usize] as i32;
            occupied &= !(1u64 << defender);

            if score - trophy > 0 {
                return score;
            }
        }
    }
}
