mod opponent;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use opponent::build_opponent;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use squares_bot::bot::{BotParams, DecisionContext, DecisionStats};
use squares_bot::policy::{Policy, SearchPolicy};
use squares_bot::search::Outcome;
use squares_core::game::round::{PlayError, PlayOutcome, RoundState};
use squares_core::model::card::Card;
use squares_core::model::deck::Deck;
use squares_core::model::side::Side;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BenchmarkConfig, ResolvedOutputs};

/// Plays the engine against the configured baseline, one round per game.
pub struct MatchRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    engine_params: BotParams,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

impl MatchRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Self {
        Self {
            engine_params: config.engine_params(),
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
        }
    }

    pub fn engine_params(&self) -> &BotParams {
        &self.engine_params
    }

    /// Execute every game, streaming one JSONL row per game to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.deals.seed.unwrap_or(0));
        let mut analytics = AnalyticsCollector::new(&self.config);
        let mut rows_written = 0usize;

        for game in 0..self.config.deals.games {
            let deal_seed = rng.next_u64();
            // The engine leads in even games and replies in odd ones.
            let engine_side = if game % 2 == 0 { Side::A } else { Side::B };
            let outcome = self.play_game(game, deal_seed, engine_side)?;
            analytics.record_game(&outcome);
            write_game_row(&mut writer, &self.config.run_id, &outcome)?;
            rows_written += 1;
        }

        writer.flush()?;

        let summary = analytics.finalize();
        summary.write_markdown(&self.outputs.summary_md)?;

        Ok(RunSummary {
            games_played: summary.games,
            wins: summary.wins,
            losses: summary.losses,
            draws: summary.draws,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    /// Deals one round from `deal_seed` and plays it out with the engine
    /// seated on `engine_side`.
    pub fn play_game(
        &self,
        game: usize,
        deal_seed: u64,
        engine_side: Side,
    ) -> Result<GameOutcome, RunnerError> {
        let deck = Deck::shuffled_with_seed(deal_seed);
        let mut round = RoundState::deal(&deck, self.config.deals.hand_size);

        let engine_seed = self.engine_params.seed.map(|seed| seed ^ deal_seed);
        let mut engine = SearchPolicy::new(self.engine_params.with_seed(engine_seed));
        let mut opponent = build_opponent(&self.config.opponent, deal_seed);
        let mut metrics = DecisionMetrics::default();
        let mut collections = 0u32;

        while !round.is_complete() {
            let side = round.to_move();
            let card = {
                let ctx = DecisionContext::new(
                    round.hand(side),
                    round.played(),
                    round.table(),
                    round.tally(),
                );
                if side == engine_side {
                    let start = Instant::now();
                    let card = engine.choose_play(&ctx);
                    metrics.record(start.elapsed(), engine.last_stats());
                    card
                } else {
                    opponent.choose_play(&ctx)
                }
            };

            if let PlayOutcome::Collected { .. } = round.play(side, card)? {
                collections += 1;
            }
        }

        let tally = round.tally();
        let engine_tricks = tally.tricks(engine_side);
        let opponent_tricks = tally.tricks(engine_side.opponent());
        let result = Outcome::from_tally(tally).relative_to(engine_side);

        if self.logging_enabled && tracing::enabled!(Level::INFO) {
            event!(
                target: "squares_bench::game",
                Level::INFO,
                run_id = %self.config.run_id,
                game = game as u32,
                deal_seed,
                engine_side = %engine_side,
                engine_tricks,
                opponent_tricks,
                result = ?result,
            );
        }

        Ok(GameOutcome {
            game,
            deal_seed,
            engine_side,
            opponent: opponent.name(),
            engine_tricks,
            opponent_tricks,
            collections,
            result,
            plays: round.played().to_vec(),
            decisions: metrics.finalize(),
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    run_id: &str,
    outcome: &GameOutcome,
) -> Result<(), RunnerError> {
    let row = GameLogRow {
        run_id: run_id.to_string(),
        game_id: format!("G{:05}", outcome.game),
        game_index: outcome.game,
        deal_seed: outcome.deal_seed,
        engine_side: outcome.engine_side,
        opponent: outcome.opponent.to_string(),
        engine_tricks: outcome.engine_tricks,
        opponent_tricks: outcome.opponent_tricks,
        margin: outcome.margin(),
        result: result_label(outcome.result).to_string(),
        collections: outcome.collections,
        plays: outcome.plays.clone(),
        decisions: outcome.decisions,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

pub fn result_label(result: Outcome) -> &'static str {
    match result {
        Outcome::Win => "win",
        Outcome::Draw => "draw",
        Outcome::Loss => "loss",
    }
}

/// Everything observed in one finished game, seen from the engine.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub game: usize,
    pub deal_seed: u64,
    pub engine_side: Side,
    pub opponent: &'static str,
    pub engine_tricks: u32,
    pub opponent_tricks: u32,
    pub collections: u32,
    pub result: Outcome,
    pub plays: Vec<Card>,
    pub decisions: DecisionSummary,
}

impl GameOutcome {
    pub fn margin(&self) -> i64 {
        i64::from(self.engine_tricks) - i64::from(self.opponent_tricks)
    }
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    slowest: Duration,
    decisions: u32,
    iterations: u64,
    nodes: u64,
    fallbacks: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration, stats: Option<DecisionStats>) {
        self.total += duration;
        self.slowest = self.slowest.max(duration);
        self.decisions += 1;
        if let Some(stats) = stats {
            self.iterations += stats.iterations;
            self.nodes += stats.nodes;
            if stats.fallback {
                self.fallbacks += 1;
            }
        }
    }

    fn finalize(self) -> DecisionSummary {
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / f64::from(self.decisions)
        };

        DecisionSummary {
            decisions: self.decisions,
            avg_ms_per_decision: avg_ms,
            max_ms: self.slowest.as_secs_f64() * 1000.0,
            iterations: self.iterations,
            nodes: self.nodes,
            fallbacks: self.fallbacks,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DecisionSummary {
    pub decisions: u32,
    pub avg_ms_per_decision: f64,
    pub max_ms: f64,
    pub iterations: u64,
    pub nodes: u64,
    pub fallbacks: u32,
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    deal_seed: u64,
    engine_side: Side,
    opponent: String,
    engine_tricks: u32,
    opponent_tricks: u32,
    margin: i64,
    result: String,
    collections: u32,
    plays: Vec<Card>,
    decisions: DecisionSummary,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("illegal play during game: {0}")]
    Play(#[from] PlayError),
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}
