use fxhash::{FxBuildHasher, FxHashMap};

/// Upper bound for the length of a game in plies; derived from the
/// longest game the fifty-move rule permits. The stacks are sized once
/// and never grow on the hot path.
pub const MAX_GAME_HALFMOVES: usize = 11796;

/// Stack of position hashes, one entry per performed move, together
/// with an occurrence count per hash so repetition queries run in
/// constant time.
#[derive(Clone, Debug)]
pub struct PositionHistory {
    hashes: Vec<u64>,
    counts: FxHashMap<u64, u8>,
}

impl PositionHistory {
    pub fn new() -> Self {
        Self {
            hashes: Vec::with_capacity(MAX_GAME_HALFMOVES),
            counts: FxHashMap::with_capacity_and_hasher(
                MAX_GAME_HALFMOVES,
                FxBuildHasher::default(),
            ),
        }
    }

    pub fn push(&mut self, hash: u64) {
        self.hashes.push(hash);
        *self.counts.entry(hash).or_insert(0) += 1;
    }

    pub fn pop(&mut self) {
        if let Some(hash) = self.hashes.pop() {
            match self.counts.get_mut(&hash) {
                Some(count) if *count > 1 => *count -= 1,
                _ => {
                    self.counts.remove(&hash);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.hashes.clear();
        self.counts.clear();
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    fn top_count(&self) -> u8 {
        self.hashes
            .last()
            .and_then(|hash| self.counts.get(hash).copied())
            .unwrap_or(0)
    }

    /// The current position occurred at least once before.
    pub fn is_single_repetition(&self) -> bool {
        self.top_count() >= 2
    }

    /// The current position occurred at least three times in total.
    pub fn is_threefold_repetition(&self) -> bool {
        self.top_count() >= 3
    }
}

impl Default for PositionHistory {
    fn default() -> Self {
        Self::new()
    }
}
