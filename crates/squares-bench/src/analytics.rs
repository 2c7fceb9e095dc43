use std::fs;
use std::path::Path;

use serde::Serialize;
use squares_bot::search::Outcome;
use squares_core::model::side::Side;
use thiserror::Error;

use crate::config::{BenchmarkConfig, OpponentKind};
use crate::runner::GameOutcome;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Accumulates per-game results into the run summary.
pub struct AnalyticsCollector {
    run_id: String,
    opponent: OpponentKind,
    time_budget_ms: u64,
    seats: [SeatAccumulator; 2],
    margins: Vec<f64>,
    decisions: u64,
    total_ms: f64,
    max_ms: f64,
    fallbacks: u64,
}

#[derive(Default, Clone, Copy)]
struct SeatAccumulator {
    games: usize,
    wins: usize,
    losses: usize,
    draws: usize,
}

impl SeatAccumulator {
    fn record(&mut self, result: Outcome) {
        self.games += 1;
        match result {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        Self {
            run_id: config.run_id.clone(),
            opponent: config.opponent.kind,
            time_budget_ms: config.engine.time_budget_ms,
            seats: [SeatAccumulator::default(); 2],
            margins: Vec::with_capacity(config.deals.games),
            decisions: 0,
            total_ms: 0.0,
            max_ms: 0.0,
            fallbacks: 0,
        }
    }

    pub fn record_game(&mut self, outcome: &GameOutcome) {
        self.seats[outcome.engine_side.index()].record(outcome.result);
        self.margins.push(outcome.margin() as f64);

        let decisions = &outcome.decisions;
        self.decisions += u64::from(decisions.decisions);
        self.total_ms += decisions.avg_ms_per_decision * f64::from(decisions.decisions);
        self.max_ms = self.max_ms.max(decisions.max_ms);
        self.fallbacks += u64::from(decisions.fallbacks);
    }

    pub fn finalize(self) -> AnalyticsSummary {
        let total = self.seats[0].games + self.seats[1].games;
        let mean_margin = if self.margins.is_empty() {
            0.0
        } else {
            self.margins.iter().sum::<f64>() / self.margins.len() as f64
        };
        let avg_ms_per_decision = if self.decisions == 0 {
            0.0
        } else {
            self.total_ms / self.decisions as f64
        };

        AnalyticsSummary {
            run_id: self.run_id,
            opponent: self.opponent,
            time_budget_ms: self.time_budget_ms,
            games: total,
            wins: self.seats.iter().map(|s| s.wins).sum(),
            losses: self.seats.iter().map(|s| s.losses).sum(),
            draws: self.seats.iter().map(|s| s.draws).sum(),
            leading: SeatReport::from_seat(Side::A, self.seats[Side::A.index()]),
            replying: SeatReport::from_seat(Side::B, self.seats[Side::B.index()]),
            mean_margin,
            ci95: confidence_interval(&self.margins),
            decisions: self.decisions,
            avg_ms_per_decision,
            max_ms_per_decision: self.max_ms,
            fallbacks: self.fallbacks,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub run_id: String,
    pub opponent: OpponentKind,
    pub time_budget_ms: u64,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub leading: SeatReport,
    pub replying: SeatReport,
    pub mean_margin: f64,
    pub ci95: (f64, f64),
    pub decisions: u64,
    pub avg_ms_per_decision: f64,
    pub max_ms_per_decision: f64,
    pub fallbacks: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatReport {
    pub side: Side,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl SeatReport {
    fn from_seat(side: Side, seat: SeatAccumulator) -> Self {
        Self {
            side,
            games: seat.games,
            wins: seat.wins,
            losses: seat.losses,
            draws: seat.draws,
        }
    }

    fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

impl AnalyticsSummary {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str(&format!("# Match Summary: {}\n\n", self.run_id));
        rows.push_str(&format!(
            "Engine vs `{:?}` baseline, {} ms budget per decision\n\n",
            self.opponent, self.time_budget_ms
        ));
        rows.push_str("| Seat | Games | Wins | Losses | Draws | Win % |\n");
        rows.push_str("|------|-------|------|--------|-------|-------|\n");

        for seat in [&self.leading, &self.replying] {
            rows.push_str(&format!(
                "| {side} | {games} | {wins} | {losses} | {draws} | {win:.1}% |\n",
                side = seat.side,
                games = seat.games,
                wins = seat.wins,
                losses = seat.losses,
                draws = seat.draws,
                win = seat.win_rate() * 100.0,
            ));
        }
        rows.push_str(&format!(
            "| All | {} | {} | {} | {} | {:.1}% |\n\n",
            self.games,
            self.wins,
            self.losses,
            self.draws,
            self.win_rate() * 100.0
        ));

        rows.push_str(&format!(
            "Trick margin: {:+.3} (95% CI [{:.3}, {:.3}])\n\n",
            self.mean_margin, self.ci95.0, self.ci95.1
        ));
        rows.push_str(&format!(
            "Decisions: {} at {:.2} ms average, {:.2} ms slowest, {} fallback{}\n",
            self.decisions,
            self.avg_ms_per_decision,
            self.max_ms_per_decision,
            self.fallbacks,
            if self.fallbacks == 1 { "" } else { "s" }
        ));

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}

fn confidence_interval(points: &[f64]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mean = points.iter().sum::<f64>() / points.len() as f64;
    if points.len() == 1 {
        return (mean, mean);
    }
    let variance = points
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (points.len() as f64 - 1.0);
    let std_error = (variance / points.len() as f64).sqrt();
    let margin = CONFIDENCE_Z * std_error;
    (mean - margin, mean + margin)
}
