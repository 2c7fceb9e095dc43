pub mod bot;
pub mod policy;
pub mod search;

pub use bot::{
    BotParams, Decision, DecisionContext, DecisionStats, Ledger, OpponentSampler, PlayPlanner,
};
pub use policy::{FirstCardPolicy, Policy, RandomPolicy, SearchPolicy};
pub use search::{Outcome, SearchOptions, SearchState, Searcher};
