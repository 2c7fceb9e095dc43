mod ledger;
mod params;
mod planner;
mod sampler;

pub use ledger::Ledger;
pub use params::BotParams;
pub use planner::{Decision, DecisionContext, DecisionStats, PlayPlanner};
pub use sampler::{OpponentSampler, opponent_hand_size};
