use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use squares_bench::config::{BenchmarkConfig, ResolvedOutputs};
use squares_bench::logging::init_logging;
use squares_bench::runner::MatchRunner;
use squares_bot::bot::{BotParams, DecisionContext, PlayPlanner};
use squares_core::game::snapshot::DecisionSnapshot;
use squares_core::model::deck::Deck;

/// Match harness for the square-sum engine.
#[derive(Debug, Parser)]
#[command(
    name = "squares-bench",
    author,
    version,
    about = "Deterministic engine-vs-baseline match harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the engine's per-decision time budget.
    #[arg(long, value_name = "MS")]
    time_budget_ms: Option<u64>,

    /// Override the engine's iteration cap per decision.
    #[arg(long, value_name = "COUNT")]
    max_iterations: Option<u64>,

    /// Decide one position read from a JSON snapshot and exit. Engine
    /// settings come from SQB_* environment variables plus any overrides.
    #[arg(long, value_name = "SNAPSHOT")]
    decide: Option<PathBuf>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.decide.as_ref() {
        return decide(path, &cli);
    }

    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.deals.games = games;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    if let Some(time_budget_ms) = cli.time_budget_ms {
        config.engine.time_budget_ms = time_budget_ms;
    }

    if let Some(max_iterations) = cli.max_iterations {
        config.engine.max_iterations = Some(max_iterations);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.deals.games;
    let hand_size = config.deals.hand_size;

    println!(
        "Loaded configuration '{run_id}' ({games} game{}, {hand_size} cards per hand, {:?} baseline)",
        if games == 1 { "" } else { "s" },
        config.opponent.kind
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = MatchRunner::new(config, outputs);

    if cli.validate_only {
        println!("Validation-only mode: match execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Match complete for '{run_id}': {} games ({} won, {} lost, {} drawn) → {} rows at {}",
        summary.games_played,
        summary.wins,
        summary.losses,
        summary.draws,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}

fn decide(path: &Path, cli: &Cli) -> anyhow::Result<()> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot at {}", path.display()))?;
    let snapshot = DecisionSnapshot::from_json(&json)
        .with_context(|| format!("parsing snapshot at {}", path.display()))?;

    let mut params = BotParams::from_env();
    if let Some(deal_size) = snapshot.deal_size {
        params.deal_size = deal_size;
    }
    if let Some(time_budget_ms) = cli.time_budget_ms {
        params = params.with_time_budget_ms(time_budget_ms);
    }
    if let Some(max_iterations) = cli.max_iterations {
        params = params.with_max_iterations(Some(max_iterations));
    }
    if let Some(seed) = cli.seed {
        params = params.with_seed(Some(seed));
    }

    check_snapshot(&snapshot, params.deal_size)?;

    let ctx = DecisionContext::from_snapshot(&snapshot);
    let decision = PlayPlanner::choose(&ctx, &params);
    let stats = decision.stats;

    println!("Side {} plays {}", ctx.acting_side(), decision.card);
    println!(
        "  {} samples, {} searches ({} shared by rank), {} nodes in {} ms; net score {}{}",
        stats.iterations,
        stats.searches,
        stats.reused,
        stats.nodes,
        stats.elapsed_ms,
        stats.net_score,
        if stats.fallback { " (fallback)" } else { "" }
    );
    let tally = snapshot.tally();
    println!("  tricks so far: A {} / B {}", tally.a, tally.b);

    Ok(())
}

/// Rejects positions the planner cannot search: repeated cards, or more
/// cards in play than the deal holds.
fn check_snapshot(snapshot: &DecisionSnapshot, deal_size: usize) -> anyhow::Result<()> {
    let hand = snapshot.hand.len();
    let played = snapshot.played.len();
    anyhow::ensure!(hand > 0, "snapshot hand is empty");
    anyhow::ensure!(
        deal_size <= Deck::SIZE,
        "a {deal_size}-card deal does not fit a {}-card deck",
        Deck::SIZE
    );

    let mut seen = HashSet::with_capacity(hand + played);
    for card in &snapshot.played {
        anyhow::ensure!(seen.insert(*card), "{card} is played more than once");
    }
    for card in &snapshot.hand {
        anyhow::ensure!(
            !snapshot.played.contains(card),
            "{card} is both in hand and already played"
        );
        anyhow::ensure!(seen.insert(*card), "snapshot hand repeats {card}");
    }

    // After an odd number of plays the waiting side already holds one card fewer.
    let in_play = hand * 2 - played % 2 + played;
    anyhow::ensure!(
        in_play <= deal_size,
        "snapshot accounts for {in_play} cards but the deal holds {deal_size}"
    );
    Ok(())
}
