pub mod attacks;
pub mod board;
pub mod eval;
pub mod history;
pub mod moves;
pub mod pieces;
pub mod pst;
pub mod state;

pub use board::*;
pub use history::*;
pub use moves::*;
pub use pieces::*;
pub use pst::*;
pub use state::*;
