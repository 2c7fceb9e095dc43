use super::outcome::Outcome;
use super::state::SearchState;
use squares_core::model::rank::RANK_COUNT;
use squares_core::model::side::Side;

/// Open window bounds for a root call.
pub const ALPHA_MIN: i32 = i32::MIN;
pub const BETA_MAX: i32 = i32::MAX;

/// Switches for the two search shortcuts. Both are on in play; turning them
/// off yields plain minimax over the same tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub pruning: bool,
    pub rank_memo: bool,
}

impl SearchOptions {
    pub const EXHAUSTIVE: SearchOptions = SearchOptions {
        pruning: false,
        rank_memo: false,
    };
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            pruning: true,
            rank_memo: true,
        }
    }
}

/// Depth-limited alpha-beta search that counts the nodes it visits.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    options: SearchOptions,
    nodes: u64,
}

impl Searcher {
    pub fn new(options: SearchOptions) -> Self {
        Self { options, nodes: 0 }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches `depth` plies with `mover` to play next. Side A maximizes and
    /// side B minimizes; the result is always seen from side A.
    pub fn search(
        &mut self,
        state: &mut SearchState,
        depth: usize,
        mover: Side,
        mut alpha: i32,
        mut beta: i32,
    ) -> Outcome {
        self.nodes += 1;
        if depth == 0 || state.is_decided() || state.hand(mover).is_empty() {
            return state.outcome();
        }

        let maximizing = mover == Side::A;
        let mut best = if maximizing {
            Outcome::Loss
        } else {
            Outcome::Win
        };
        // Cards of equal value leave identical positions behind, so one
        // search per bucket and ply is enough.
        let mut memo: [Option<Outcome>; RANK_COUNT] = [None; RANK_COUNT];

        for index in 0..state.hand(mover).len() {
            let bucket = state.hand(mover)[index].bucket();
            let cached = if self.options.rank_memo {
                memo[bucket]
            } else {
                None
            };
            let value = match cached {
                Some(value) => value,
                None => {
                    let value = state.with_play(mover, index, |next| {
                        self.search(next, depth - 1, mover.opponent(), alpha, beta)
                    });
                    memo[bucket] = Some(value);
                    value
                }
            };

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best.score());
            } else {
                best = best.min(value);
                beta = beta.min(best.score());
            }

            if self.options.pruning && beta <= alpha {
                break;
            }
        }

        best
    }
}

/// One-shot search with the default options.
pub fn search(
    state: &mut SearchState,
    depth: usize,
    mover: Side,
    alpha: i32,
    beta: i32,
) -> Outcome {
    Searcher::new(SearchOptions::default()).search(state, depth, mover, alpha, beta)
}
