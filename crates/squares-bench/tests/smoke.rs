use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use squares_bench::config::BenchmarkConfig;
use squares_bench::runner::MatchRunner;
use tempfile::tempdir;

fn load_config(output_dir: &Path, opponent: &str) -> BenchmarkConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
deals:
  seed: 4242
  games: 4
  hand_size: 4
engine:
  time_budget_ms: 60000
  max_iterations: 8
  seed: 5
opponent:
  kind: "{opponent}"
  seed: 9
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("games.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

/// Hashes the JSONL rows with wall-clock fields zeroed.
fn normalized_digest(jsonl: &str) -> String {
    let mut normalized = String::new();
    for line in jsonl.lines() {
        let mut value: serde_json::Value = serde_json::from_str(line).expect("row decodes to JSON");
        if let Some(decisions) = value
            .get_mut("decisions")
            .and_then(|decisions| decisions.as_object_mut())
        {
            for key in ["avg_ms_per_decision", "max_ms"] {
                decisions.insert(key.to_string(), serde_json::json!(0.0));
            }
        }
        normalized.push_str(&serde_json::to_string(&value).expect("re-serialize normalized row"));
        normalized.push('\n');
    }

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

fn run_once(opponent: &str) -> (String, String) {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), opponent);
    let outputs = config.resolved_outputs();

    let summary = MatchRunner::new(config, outputs)
        .run()
        .expect("match completes");
    assert_eq!(summary.games_played, 4);
    assert_eq!(summary.rows_written, 4);
    assert_eq!(summary.wins + summary.losses + summary.draws, 4);

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    (jsonl, markdown)
}

#[test]
fn match_smoke_test_is_reproducible() {
    let (first, markdown) = run_once("random");
    let (second, _) = run_once("random");
    assert_eq!(normalized_digest(&first), normalized_digest(&second));

    assert!(markdown.starts_with("# Match Summary: test_smoke"));
    assert!(markdown.contains("| All | 4 |"));
}

#[test]
fn rows_alternate_seats_and_cover_every_card() {
    let (jsonl, _) = run_once("first");
    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 4);

    for (index, row) in rows.iter().enumerate() {
        let expected_side = if index % 2 == 0 { "A" } else { "B" };
        assert_eq!(row["engine_side"], expected_side);
        assert_eq!(row["game_index"], index);
        assert_eq!(row["opponent"], "first");
        assert_eq!(row["plays"].as_array().map(Vec::len), Some(8));
        assert_eq!(row["decisions"]["decisions"], 4);

        let engine = row["engine_tricks"].as_i64().expect("engine tricks");
        let opponent = row["opponent_tricks"].as_i64().expect("opponent tricks");
        assert_eq!(row["margin"], engine - opponent);
        let expected_result = match engine.cmp(&opponent) {
            std::cmp::Ordering::Greater => "win",
            std::cmp::Ordering::Less => "loss",
            std::cmp::Ordering::Equal => "draw",
        };
        assert_eq!(row["result"], expected_result);
    }
}
