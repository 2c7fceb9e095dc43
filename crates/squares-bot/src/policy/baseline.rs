use super::Policy;
use crate::bot::DecisionContext;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use squares_core::model::card::Card;

/// Always plays the first card of the hand.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCardPolicy;

impl Policy for FirstCardPolicy {
    fn name(&self) -> &'static str {
        "first"
    }

    fn choose_play(&mut self, ctx: &DecisionContext<'_>) -> Card {
        ctx.hand[0]
    }
}

/// Plays a uniformly random card.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_play(&mut self, ctx: &DecisionContext<'_>) -> Card {
        *ctx.hand
            .choose(&mut self.rng)
            .expect("policies are only asked with a non-empty hand")
    }
}
