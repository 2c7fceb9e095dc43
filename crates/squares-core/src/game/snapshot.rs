use super::round::RoundState;
use crate::model::card::Card;
use crate::model::score::Tally;
use crate::model::side::Side;
use crate::model::table::Table;
use serde::{Deserialize, Serialize};

/// Everything the acting player knows when it is asked for a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionSnapshot {
    pub hand: Vec<Card>,
    #[serde(default)]
    pub played: Vec<Card>,
    #[serde(default)]
    pub table_count: u32,
    #[serde(default)]
    pub table_sum: u32,
    #[serde(default)]
    pub tricks_a: u32,
    #[serde(default)]
    pub tricks_b: u32,
    /// Cards dealt to both sides at the start of the round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_size: Option<usize>,
}

impl DecisionSnapshot {
    /// Captures the view of whichever side is due to play.
    pub fn capture(round: &RoundState) -> Self {
        let table = round.table();
        let tally = round.tally();
        let dealt = round.played().len()
            + Side::LOOP
                .iter()
                .map(|side| round.hand(*side).len())
                .sum::<usize>();
        DecisionSnapshot {
            hand: round.hand(round.to_move()).to_vec(),
            played: round.played().to_vec(),
            table_count: table.count,
            table_sum: table.sum,
            tricks_a: tally.a,
            tricks_b: tally.b,
            deal_size: Some(dealt),
        }
    }

    pub fn side(&self) -> Side {
        Side::to_move(self.played.len())
    }

    pub fn table(&self) -> Table {
        Table::new(self.table_count, self.table_sum)
    }

    pub fn tally(&self) -> Tally {
        Tally::new(self.tricks_a, self.tricks_b)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
