use squares_bot::policy::{FirstCardPolicy, Policy, RandomPolicy};

use crate::config::{OpponentConfig, OpponentKind};

/// Builds the baseline for one game. A configured seed is mixed with the deal
/// seed so every game sees a different but reproducible opponent.
pub(super) fn build_opponent(config: &OpponentConfig, deal_seed: u64) -> Box<dyn Policy> {
    match config.kind {
        OpponentKind::First => Box::new(FirstCardPolicy),
        OpponentKind::Random => Box::new(RandomPolicy::new(
            config.seed.map(|seed| seed ^ deal_seed.rotate_left(17)),
        )),
    }
}
