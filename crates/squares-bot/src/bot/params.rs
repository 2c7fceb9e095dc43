use crate::search::{DEFAULT_DEAL_SIZE, SearchOptions};
use std::time::Duration;

/// Tunable parameters for the sampling planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotParams {
    /// Wall-clock budget for the sampling loop (default: 9500 ms).
    pub time_budget_ms: u64,

    /// Stop after this many sampled hands even if time remains.
    pub max_iterations: Option<u64>,

    /// Seed for the hand sampler; `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Cards played over a whole game (default: 14).
    pub deal_size: usize,

    pub search: SearchOptions,
}

impl BotParams {
    pub const DEFAULT_TIME_BUDGET_MS: u64 = 9_500;

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    pub fn with_time_budget_ms(mut self, time_budget_ms: u64) -> Self {
        self.time_budget_ms = time_budget_ms;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: Option<u64>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let time_budget_ms = read("SQB_TIME_BUDGET_MS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(defaults.time_budget_ms);

        let max_iterations = read("SQB_MAX_ITERATIONS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .or(defaults.max_iterations);

        let seed = read("SQB_SEED")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .or(defaults.seed);

        let deal_size = read("SQB_DEAL_SIZE")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(defaults.deal_size);

        let pruning = read("SQB_DISABLE_PRUNING")
            .map(|raw| !matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(defaults.search.pruning);

        Self {
            time_budget_ms,
            max_iterations,
            seed,
            deal_size,
            search: SearchOptions {
                pruning,
                ..defaults.search
            },
        }
    }
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            time_budget_ms: Self::DEFAULT_TIME_BUDGET_MS,
            max_iterations: None,
            seed: None,
            deal_size: DEFAULT_DEAL_SIZE,
            search: SearchOptions::default(),
        }
    }
}
