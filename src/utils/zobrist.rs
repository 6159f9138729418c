pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub const fn next_u64(mut self) -> (u64, Self) {
        // Knuth's MMIX constants
        const A: u64 = 6364136223846793005;
        const C: u64 = 1442695040888963407;

        self.state = self.state.wrapping_mul(A).wrapping_add(C);

        (self.state, self)
    }
}

/// Random keys for incremental position hashing. The piece table is
/// indexed by `(piece + 6) * 64 + square`, so both colors of a piece id
/// resolve without branching; the slice for the empty piece (index 6)
/// is generated but never read.
pub struct ZobristKeys {
    pub pieces: [u64; 13 * 64],
    pub castling: [u64; 16],
    pub en_passant: [u64; 16],
    pub player: u64,
}

impl ZobristKeys {
    pub const fn new() -> Self {
        let mut rng = Lcg::new(0xb0a2d_5eed);

        let mut pieces = [0u64; 13 * 64];
        let mut index = 0;
        while index < 13 * 64 {
            let (value, new_rng) = rng.next_u64();
            pieces[index] = value;
            rng = new_rng;
            index += 1;
        }

        let mut castling = [0u64; 16];
        let mut castling_idx = 0;
        while castling_idx < 16 {
            let (value, new_rng) = rng.next_u64();
            castling[castling_idx] = value;
            rng = new_rng;
            castling_idx += 1;
        }

        let mut en_passant = [0u64; 16];
        let mut ep_idx = 0;
        while ep_idx < 16 {
            let (value, new_rng) = rng.next_u64();
            en_passant[ep_idx] = value;
            rng = new_rng;
            ep_idx += 1;
        }

        let (player, _) = rng.next_u64();

        Self {
            pieces,
            castling,
            en_passant,
            player,
        }
    }

    pub const fn piece_key(&self, piece: i8, pos: i32) -> u64 {
        self.pieces[(piece as isize + 6) as usize * 64 + pos as usize]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();
