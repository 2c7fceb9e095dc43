use super::Policy;
use crate::bot::{BotParams, DecisionContext, DecisionStats, PlayPlanner};
use rand::SeedableRng;
use rand::rngs::StdRng;
use squares_core::model::card::Card;

/// Policy backed by the sampling planner.
///
/// A seeded policy keeps one generator across decisions, so a whole game is
/// reproducible when the iteration cap (not the clock) ends each search.
pub struct SearchPolicy {
    params: BotParams,
    rng: StdRng,
    last: Option<DecisionStats>,
}

impl SearchPolicy {
    pub fn new(params: BotParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            params,
            rng,
            last: None,
        }
    }
}

impl Policy for SearchPolicy {
    fn name(&self) -> &'static str {
        "search"
    }

    fn choose_play(&mut self, ctx: &DecisionContext<'_>) -> Card {
        let decision = PlayPlanner::choose_with_rng(ctx, &self.params, &mut self.rng);
        self.last = Some(decision.stats);
        decision.card
    }

    fn last_stats(&self) -> Option<DecisionStats> {
        self.last
    }
}
