use super::ledger::Ledger;
use super::params::BotParams;
use super::sampler::OpponentSampler;
use crate::search::{ALPHA_MIN, BETA_MAX, Outcome, SearchState, Searcher};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use squares_core::game::snapshot::DecisionSnapshot;
use squares_core::model::card::Card;
use squares_core::model::deck::Deck;
use squares_core::model::rank::RANK_COUNT;
use squares_core::model::score::Tally;
use squares_core::model::side::Side;
use squares_core::model::table::Table;
use std::time::Instant;
use tracing::{Level, event};

/// What the acting player can see when asked for a card.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub hand: &'a [Card],
    pub played: &'a [Card],
    pub table: Table,
    pub tally: Tally,
}

impl<'a> DecisionContext<'a> {
    pub fn new(hand: &'a [Card], played: &'a [Card], table: Table, tally: Tally) -> Self {
        Self {
            hand,
            played,
            table,
            tally,
        }
    }

    pub fn from_snapshot(snapshot: &'a DecisionSnapshot) -> Self {
        Self::new(
            &snapshot.hand,
            &snapshot.played,
            snapshot.table(),
            snapshot.tally(),
        )
    }

    /// The acting player is side A on even plays and side B on odd ones.
    pub fn acting_side(&self) -> Side {
        Side::to_move(self.played.len())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionStats {
    /// Opponent hands sampled and fully evaluated.
    pub iterations: u64,
    /// Searches started from the root.
    pub searches: u64,
    /// Hand positions scored from an earlier same-rank card in the same iteration.
    pub reused: u64,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub net_score: i64,
    /// True when nothing decisive was recorded and the first card was played.
    pub fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub card: Card,
    pub stats: DecisionStats,
}

pub struct PlayPlanner;

impl PlayPlanner {
    pub fn choose(ctx: &DecisionContext<'_>, params: &BotParams) -> Decision {
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::choose_with_rng(ctx, params, &mut rng)
    }

    /// Samples opponent hands until the budget runs out, searches every card
    /// of the hand against each sample and plays the card with the best
    /// wins-minus-losses record.
    ///
    /// The deadline is only checked between samples; a sample that has
    /// started is always evaluated to the end.
    pub fn choose_with_rng<R: Rng + ?Sized>(
        ctx: &DecisionContext<'_>,
        params: &BotParams,
        rng: &mut R,
    ) -> Decision {
        Self::plan(ctx, params, rng).0
    }

    /// Runs the sampling loop and hands back the per-card ledger alongside
    /// the decision.
    pub(crate) fn plan<R: Rng + ?Sized>(
        ctx: &DecisionContext<'_>,
        params: &BotParams,
        rng: &mut R,
    ) -> (Decision, Ledger) {
        assert!(!ctx.hand.is_empty(), "asked to choose from an empty hand");
        assert!(
            ctx.hand.iter().all(|card| !ctx.played.contains(card)),
            "hand overlaps the played cards"
        );

        let mut stats = DecisionStats::default();
        if ctx.hand.len() == 1 {
            let decision = Decision {
                card: ctx.hand[0],
                stats,
            };
            return (decision, Ledger::new());
        }

        let start = Instant::now();
        let budget = params.time_budget();
        let acting = ctx.acting_side();
        let mut sampler = OpponentSampler::new(&Deck::standard(), ctx.hand, ctx.played);
        let mut searcher = Searcher::new(params.search);
        let mut ledger = Ledger::new();

        while start.elapsed() < budget
            && params
                .max_iterations
                .is_none_or(|cap| stats.iterations < cap)
        {
            let opponent = sampler.sample(rng);
            let mut state =
                SearchState::for_acting(acting, ctx.hand, opponent, ctx.played, ctx.table, ctx.tally)
                    .with_deal_size(params.deal_size);

            // Decisive result per rank bucket in this sample.
            let mut decided: [Option<Outcome>; RANK_COUNT] = [None; RANK_COUNT];

            for (index, &card) in ctx.hand.iter().enumerate() {
                if let Some(outcome) = decided[card.bucket()] {
                    ledger.record(card, outcome);
                    stats.reused += 1;
                    continue;
                }

                let outcome = state.with_play(acting, index, |next| {
                    let depth = next.hand(Side::A).len() + next.hand(Side::B).len();
                    searcher.search(next, depth, acting.opponent(), ALPHA_MIN, BETA_MAX)
                });
                stats.searches += 1;

                let outcome = outcome.relative_to(acting);
                if outcome.is_decisive() {
                    ledger.record(card, outcome);
                    decided[card.bucket()] = Some(outcome);
                }
            }

            stats.iterations += 1;
        }

        stats.nodes = searcher.nodes();
        stats.elapsed_ms = start.elapsed().as_millis() as u64;

        let card = match ledger.best(ctx.hand) {
            Some((card, net)) => {
                stats.net_score = net;
                card
            }
            None => {
                stats.fallback = true;
                ctx.hand[0]
            }
        };

        log_play_decision(ctx, acting, &ledger, card, &stats);
        (Decision { card, stats }, ledger)
    }
}

fn log_play_decision(
    ctx: &DecisionContext<'_>,
    acting: Side,
    ledger: &Ledger,
    chosen: Card,
    stats: &DecisionStats,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let records = ctx
        .hand
        .iter()
        .map(|card| format!("{card}:{}/{}", ledger.wins(*card), ledger.losses(*card)))
        .collect::<Vec<_>>()
        .join(",");

    event!(
        target: "squares_bot::play",
        Level::INFO,
        side = %acting,
        hand_size = ctx.hand.len(),
        played = ctx.played.len(),
        table_count = ctx.table.count,
        table_sum = ctx.table.sum,
        iterations = stats.iterations,
        searches = stats.searches,
        reused = stats.reused,
        nodes = stats.nodes,
        elapsed_ms = stats.elapsed_ms,
        records = %records,
        chosen = %chosen,
        net_score = stats.net_score,
        fallback = stats.fallback,
    );
}
