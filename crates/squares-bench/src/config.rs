use serde::{Deserialize, Serialize};
use squares_bot::bot::BotParams;
use squares_bot::search::SearchOptions;
use squares_core::model::deck::Deck;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_HAND_SIZE: usize = 7;
const DEFAULT_TIME_BUDGET_MS: u64 = 1_000;
const RUN_ID_PLACEHOLDER: &str = "{run_id}";

/// A match definition: which deals to play, how the engine is tuned, which
/// baseline it faces and where results go.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub deals: DealConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub opponent: OpponentConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    /// Reads, parses and validates a YAML match file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Checks every section and fills in blank optional values. Command-line
    /// overrides are applied before this runs.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        check_run_id(&self.run_id)?;
        self.deals.validate()?;
        self.engine.validate()?;
        check_path("outputs.jsonl", &self.outputs.jsonl)?;
        check_path("outputs.summary_md", &self.outputs.summary_md)?;
        if self.logging.tracing_level.trim().is_empty() {
            self.logging.tracing_level = default_tracing_level();
        }
        Ok(())
    }

    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: expand(&self.outputs.jsonl, &self.run_id),
            summary_md: expand(&self.outputs.summary_md, &self.run_id),
        }
    }

    /// Planner parameters for the engine, sized to the configured deal.
    pub fn engine_params(&self) -> BotParams {
        let mut params = BotParams::default()
            .with_time_budget_ms(self.engine.time_budget_ms)
            .with_max_iterations(self.engine.max_iterations)
            .with_seed(self.engine.seed);
        params.deal_size = self.deals.hand_size * 2;
        params.search = SearchOptions {
            pruning: self.engine.pruning,
            rank_memo: self.engine.rank_memo,
        };
        params
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DealConfig {
    pub seed: Option<u64>,
    pub games: usize,
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,
}

impl DealConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.games == 0 {
            return Err(ValidationError::invalid("deals.games", "at least one game is required"));
        }
        let max_hand = Deck::SIZE / 2;
        if !(1..=max_hand).contains(&self.hand_size) {
            return Err(ValidationError::invalid(
                "deals.hand_size",
                format!("expected 1..={max_hand} cards, got {}", self.hand_size),
            ));
        }
        Ok(())
    }
}

/// Engine tuning. Pruning and the rank memo can be switched off to measure
/// their effect; both are on unless the file says otherwise.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default = "default_time_budget_ms")]
    pub time_budget_ms: u64,
    #[serde(default)]
    pub max_iterations: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "enabled")]
    pub pruning: bool,
    #[serde(default = "enabled")]
    pub rank_memo: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            max_iterations: None,
            seed: None,
            pruning: true,
            rank_memo: true,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.time_budget_ms == 0 {
            return Err(ValidationError::invalid(
                "engine.time_budget_ms",
                "a decision needs a non-zero budget",
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(ValidationError::invalid(
                "engine.max_iterations",
                "leave unset for no cap, or give at least 1",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct OpponentConfig {
    #[serde(default)]
    pub kind: OpponentKind,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    /// Always leads the first card in hand.
    First,
    #[default]
    Random,
}

/// Output paths; `{run_id}` is replaced with the run identifier.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    /// `None` when the configured name is not a tracing level.
    pub fn level(&self) -> Option<Level> {
        self.tracing_level.trim().parse().ok()
    }
}

/// Output paths with the run identifier substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

fn default_hand_size() -> usize {
    DEFAULT_HAND_SIZE
}

fn default_time_budget_ms() -> u64 {
    DEFAULT_TIME_BUDGET_MS
}

fn enabled() -> bool {
    true
}

fn default_tracing_level() -> String {
    "info".to_string()
}

/// Run identifiers end up in file names, so they are limited to ASCII
/// letters, digits, `.`, `_` and `-`.
fn check_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::invalid("run_id", "must not be blank"));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    match run_id.chars().find(|c| !allowed(*c)) {
        Some(bad) => Err(ValidationError::invalid(
            "run_id",
            format!("{bad:?} is not allowed; use letters, digits, '.', '_' or '-'"),
        )),
        None => Ok(()),
    }
}

fn expand(template: &str, run_id: &str) -> PathBuf {
    PathBuf::from(template.replace(RUN_ID_PLACEHOLDER, run_id))
}

fn check_path(field: &str, template: &str) -> Result<(), ValidationError> {
    if template.trim().is_empty() {
        Err(ValidationError::invalid(field, "must name a file"))
    } else {
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a valid match file: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl ValidationError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
