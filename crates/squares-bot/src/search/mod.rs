//! Exhaustive two-sided search over a single hypothesis of the hidden hand.
//!
//! - `state`: the mutable search position and its scoped play/undo discipline.
//! - `outcome`: the ternary result seen from side A.
//! - `minimax`: depth-limited alpha-beta with a ply-local rank memo.

mod minimax;
mod outcome;
mod state;

pub use minimax::{ALPHA_MIN, BETA_MAX, SearchOptions, Searcher, search};
pub use outcome::Outcome;
pub use state::{DEFAULT_DEAL_SIZE, PlayUndo, SearchState};
