mod baseline;
mod search;

pub use baseline::{FirstCardPolicy, RandomPolicy};
pub use search::SearchPolicy;

use crate::bot::{DecisionContext, DecisionStats};
use squares_core::model::card::Card;

/// Unified interface for anything that can pick a card for the side to move.
pub trait Policy: Send {
    fn name(&self) -> &'static str;

    /// Choose 1 card to play from `ctx.hand`.
    fn choose_play(&mut self, ctx: &DecisionContext<'_>) -> Card;

    /// Statistics of the most recent decision, for policies that search.
    fn last_stats(&self) -> Option<DecisionStats> {
        None
    }
}
