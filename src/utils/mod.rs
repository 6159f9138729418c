pub mod bitboard;
pub mod score;
pub mod zobrist;

pub use bitboard::*;
pub use score::*;
pub use zobrist::*;
